use std::sync::LazyLock;

use regex::Regex;

use crate::model::note::FrontMatter;

/// A line of three or more dashes
static BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^-{3,}\s*$").expect("boundary pattern"));

/// Split a YAML front-matter block off the top of `raw`.
///
/// Returns the metadata and the body text in play for title detection:
/// - no block: `Absent` and the trimmed text
/// - a block that parses: the mapping (or `Absent` when it is not a
///   mapping) and the trimmed text after the closing delimiter
/// - a block that fails to parse: `Malformed` and `raw` untouched
pub fn split_front_matter(raw: &str) -> (FrontMatter, &str) {
    let text = raw.trim();

    let mut boundaries = BOUNDARY.find_iter(text);
    let Some(open) = boundaries.next().filter(|m| m.start() == 0) else {
        return (FrontMatter::Absent, text);
    };
    let Some(close) = boundaries.next() else {
        return (FrontMatter::Absent, text);
    };

    let yaml = &text[open.end()..close.start()];
    let body = text[close.end()..].trim();

    match serde_yaml::from_str::<serde_yaml::Value>(yaml) {
        Ok(serde_yaml::Value::Mapping(m)) => (FrontMatter::Parsed(m), body),
        Ok(_) => (FrontMatter::Absent, body),
        Err(e) => (
            FrontMatter::Malformed {
                reason: e.to_string(),
            },
            raw,
        ),
    }
}
