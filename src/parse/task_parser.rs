use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::model::task::{TagValue, Task, TaskStatus, total_duration};
use crate::parse::ParseError;
use crate::parse::clock::{format_total, parse_clock};

/// `- [c]` anywhere in the line
static CHECKBOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- \[(.)\]").expect("checkbox pattern"));

/// `@name` with an optional `(argument)`, argument ends at the first `)`
static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([a-zA-Z0-9_]+)(?:\((.*?)\))?").expect("annotation pattern"));

/// Legacy marker annotation, carries no data
const TODO_TAG: &str = "todo";
const CLOCK_TAG: &str = "clock";

/// Parse a task line: `- [x] Title @tag @key(value) @clock(09:14)`
///
/// Fails if the line has no checkbox, or if a `clock` annotation does not
/// parse (including a bare `@clock` or `@clock()`).
pub fn parse_task(line: &str) -> Result<Task, ParseError> {
    let (checkbox, body) = split_checkbox(line).ok_or_else(|| ParseError::MalformedTask {
        line: line.trim_end().to_string(),
    })?;
    let status = TaskStatus::from_checkbox_char(checkbox);

    // Repeated names keep their first position and take the last value
    let mut raw: IndexMap<&str, Option<&str>> = IndexMap::new();
    for caps in ANNOTATION.captures_iter(body) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let arg = caps.get(2).map(|m| m.as_str()).filter(|a| !a.is_empty());
        raw.insert(name, arg);
    }
    raw.shift_remove(TODO_TAG);

    let mut tags = IndexMap::with_capacity(raw.len());
    for (name, arg) in raw {
        let value = match (name, arg) {
            (CLOCK_TAG, arg) => TagValue::Clock(parse_clock(arg.unwrap_or(""))?),
            (_, Some(text)) => TagValue::Text(text.to_string()),
            (_, None) => TagValue::Flag(true),
        };
        tags.insert(name.to_string(), value);
    }

    let title = ANNOTATION.replace_all(body, "").trim().to_string();

    let mut task = Task {
        title,
        status,
        tags,
        duration: None,
    };
    if let Some(sessions) = task.clock() {
        let total = total_duration(sessions).ok_or_else(|| ParseError::MalformedDuration {
            input: line.trim().to_string(),
            reason: "clocked total too large".to_string(),
        })?;
        task.duration = Some(format_total(total));
    }
    Ok(task)
}

/// Find the first checkbox; return its character and the trimmed text after it
fn split_checkbox(line: &str) -> Option<(char, &str)> {
    let caps = CHECKBOX.captures(line)?;
    let whole = caps.get(0)?;
    let checkbox = caps.get(1)?.as_str().chars().next()?;
    Some((checkbox, line[whole.end()..].trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_task() {
        let task = parse_task("- [ ] Buy milk").unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.status, Some(TaskStatus::Next));
        assert!(task.is_open());
        assert!(task.tags.is_empty());
        assert_eq!(task.duration, None);
        assert!(task.clock().is_none());
    }

    #[test]
    fn test_parse_task_statuses() {
        for (ch, expected, open) in [
            (' ', Some(TaskStatus::Next), true),
            ('!', Some(TaskStatus::Focus), true),
            ('@', Some(TaskStatus::InProgress), true),
            ('?', Some(TaskStatus::Someday), true),
            ('x', Some(TaskStatus::Done), false),
            ('X', None, true),
            ('>', None, true),
        ] {
            let task = parse_task(&format!("- [{}] Test task", ch)).unwrap();
            assert_eq!(task.status, expected, "checkbox {:?}", ch);
            assert_eq!(task.is_open(), open, "checkbox {:?}", ch);
        }
    }

    #[test]
    fn test_checkbox_can_be_indented_or_prefixed() {
        let task = parse_task("    - [!] Nested focus @todo\n").unwrap();
        assert_eq!(task.status, Some(TaskStatus::Focus));
        assert_eq!(task.title, "Nested focus");
        assert!(task.tags.is_empty());
    }

    #[test]
    fn test_no_checkbox_is_malformed() {
        for line in ["Buy milk @todo", "- [] empty", "-[x] no space", ""] {
            assert!(
                matches!(parse_task(line), Err(ParseError::MalformedTask { .. })),
                "line {:?}",
                line
            );
        }
    }

    #[test]
    fn test_tags_flags_and_values() {
        let task =
            parse_task("- [x] Publicar dados abertos @url(https://github.com/splor-mg/ppag2023-dadosmg/issues/14) @nirvana @empty()")
                .unwrap();
        assert_eq!(task.title, "Publicar dados abertos");
        assert_eq!(
            task.tags.get("url").and_then(TagValue::as_text),
            Some("https://github.com/splor-mg/ppag2023-dadosmg/issues/14")
        );
        assert_eq!(task.tags.get("nirvana"), Some(&TagValue::Flag(true)));
        assert_eq!(task.tags.get("empty"), Some(&TagValue::Flag(true)));
    }

    #[test]
    fn test_duplicate_tag_last_value_wins_first_position_kept() {
        let task = parse_task("- [ ] t @a(1) @b @a(2)").unwrap();
        let keys: Vec<&str> = task.tags.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(task.tags["a"], TagValue::Text("2".into()));
    }

    #[test]
    fn test_argument_stops_at_first_paren() {
        let task = parse_task("- [ ] Read (paper) @ref(see (draft) later)").unwrap();
        assert_eq!(task.tags["ref"], TagValue::Text("see (draft".into()));
        assert_eq!(task.title, "Read (paper)  later)");
    }

    #[test]
    fn test_title_keeps_inner_whitespace() {
        let task = parse_task("- [ ] Buy @shop milk").unwrap();
        assert_eq!(task.title, "Buy  milk");
    }

    #[test]
    fn test_clock_with_anchored_sessions() {
        let task = parse_task(
            "- [x] Research @nirvana @clock(20230814T155459/09:14, 20230815T155503/01:59:35) @activity(research)",
        )
        .unwrap();
        assert_eq!(task.title, "Research");
        assert_eq!(task.status, Some(TaskStatus::Done));
        assert!(!task.is_open());
        assert_eq!(task.duration.as_deref(), Some("2 hours and 8.82 minutes"));

        let sessions = task.clock().unwrap();
        assert_eq!(sessions.len(), 2);
        let fmt = |t: Option<chrono::NaiveDateTime>| t.unwrap().format("%Y%m%dT%H%M%S").to_string();
        assert_eq!(fmt(sessions[0].start), "20230814T155459");
        assert_eq!(fmt(sessions[0].end), "20230814T160413");
        assert_eq!(fmt(sessions[1].start), "20230815T155503");
        assert_eq!(fmt(sessions[1].end), "20230815T175438");

        let keys: Vec<&str> = task.tags.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["nirvana", "clock", "activity"]);
    }

    #[test]
    fn test_clock_total_overflow_is_malformed() {
        // Each session fits on its own, their sum does not
        let err = parse_task("- [x] X @clock(1300000000000:00:00, 1300000000000:00:00)").unwrap_err();
        assert!(matches!(err, ParseError::MalformedDuration { .. }));
    }

    #[test]
    fn test_clock_mixing_bare_and_anchored() {
        let task = parse_task("- [x] X @clock(09:14, 20230815T155503/01:59:35)").unwrap();
        let sessions = task.clock().unwrap();
        assert_eq!(sessions[0].start, None);
        assert_eq!(sessions[0].end, None);
        assert!(sessions[1].start.is_some());
        assert!(sessions[1].end.is_some());
    }

    #[test]
    fn test_clock_under_an_hour() {
        let task = parse_task("- [?] https://example.org/issues/14 @clock(51:15)").unwrap();
        assert_eq!(task.title, "https://example.org/issues/14");
        assert_eq!(task.duration.as_deref(), Some("51.25 minutes"));
    }

    #[test]
    fn test_malformed_clock_fails_whole_task() {
        for line in [
            "- [x] X @clock()",
            "- [x] X @clock",
            "- [x] X @clock(1:2:3:4)",
            "- [x] X @clock(09:14,)",
        ] {
            assert!(
                matches!(parse_task(line), Err(ParseError::MalformedDuration { .. })),
                "line {:?}",
                line
            );
        }
    }

    #[test]
    fn test_only_first_checkbox_splits() {
        let task = parse_task("- [ ] compare - [x] markers").unwrap();
        assert_eq!(task.status, Some(TaskStatus::Next));
        assert_eq!(task.title, "compare - [x] markers");
    }
}
