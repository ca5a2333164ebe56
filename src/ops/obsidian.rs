//! Links for the Obsidian advanced-URI plugin.

const SCHEME: &str = "obsidian://adv-uri?";

/// Key whose value is passed through already encoded
const DATA_KEY: &str = "data";

/// Join `key=value` pairs into an advanced-URI link. Keys and values are
/// percent-encoded, except `data`, which the caller encodes.
pub fn build_url(params: &[(&str, &str)]) -> String {
    let query: Vec<String> = params
        .iter()
        .map(|(key, value)| {
            let value = if *key == DATA_KEY {
                (*value).to_string()
            } else {
                urlencoding::encode(value).into_owned()
            };
            format!("{}={}", urlencoding::encode(key), value)
        })
        .collect();
    format!("{}{}", SCHEME, query.join("&"))
}

/// Open an existing note by its link target
pub fn open_note_url(vault: &str, target: &str) -> String {
    build_url(&[
        ("vault", vault),
        ("filename", target),
        ("viewmode", "source"),
        ("openmode", "tab"),
    ])
}

/// Create `<id>/index` with `content`
pub fn new_note_url(vault: &str, id: &str, content: &str) -> String {
    let filename = format!("{}/index", id);
    let data = urlencoding::encode(content);
    build_url(&[
        ("vault", vault),
        ("filename", filename.as_str()),
        ("openmode", "tab"),
        ("viewmode", "source"),
        (DATA_KEY, &*data),
    ])
}
