use chrono::{NaiveDateTime, TimeDelta};

use crate::model::task::Session;
use crate::parse::ParseError;

/// Timestamp format used for session anchors and note ids: `20230814T155459`
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Parse the argument of a `@clock(...)` annotation. Sessions are separated
/// by `,` or `;`. An empty argument or an empty session is an error.
pub fn parse_clock(raw: &str) -> Result<Vec<Session>, ParseError> {
    raw.split([',', ';']).map(parse_session).collect()
}

/// Parse one session token: either `START/DURATION` or a bare `DURATION`.
///
/// The anchored form is only taken when the text left of the first `/` is a
/// valid timestamp; otherwise the whole token is parsed as a duration.
pub fn parse_session(token: &str) -> Result<Session, ParseError> {
    let token = token.trim();

    if let Some((left, right)) = token.split_once('/')
        && let Ok(start) = NaiveDateTime::parse_from_str(left.trim(), TIMESTAMP_FORMAT)
    {
        let duration = parse_duration(right.trim())?;
        return Session::anchored(start, duration).ok_or_else(|| malformed(token, "end out of range"));
    }

    Ok(Session::bare(parse_duration(token)?))
}

/// Parse `HH:MM:SS` or `MM:SS` into a time span.
pub fn parse_duration(s: &str) -> Result<TimeDelta, ParseError> {
    let parts = s
        .split(':')
        .map(|p| p.trim().parse::<i64>().ok().filter(|n| *n >= 0))
        .collect::<Option<Vec<i64>>>()
        .ok_or_else(|| malformed(s, "expected non-negative integers"))?;

    let seconds = match parts.as_slice() {
        [h, m, s] => h
            .checked_mul(3600)
            .and_then(|h| m.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|hm| hm.checked_add(*s)),
        [m, s] => m.checked_mul(60).and_then(|m| m.checked_add(*s)),
        _ => return Err(malformed(s, "expected HH:MM:SS or MM:SS")),
    };

    seconds
        .and_then(TimeDelta::try_seconds)
        .ok_or_else(|| malformed(s, "too large"))
}

/// Render a total as elapsed time with minutes to two decimals:
/// `51.25 minutes`, `2 hours and 8.82 minutes`.
pub fn format_total(total: TimeDelta) -> String {
    let seconds = total.num_seconds().max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) as f64 / 60.0;

    if hours == 0 {
        format!("{:.2} minutes", minutes)
    } else {
        format!("{} hours and {:.2} minutes", hours, minutes)
    }
}

fn malformed(input: &str, reason: &str) -> ParseError {
    ParseError::MalformedDuration {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
