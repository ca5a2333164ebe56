use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Config file location: $ZETTEL_CONFIG, else the XDG config directory
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("ZETTEL_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|h| h.join(".config")))?;
    Some(config_dir.join("zettel").join("config.toml"))
}

/// Load the config from its default location. A missing file means defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    match config_path() {
        Some(path) if path.exists() => load_config_from(&path),
        _ => {
            tracing::debug!("no config file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: Config = toml::from_str(&text)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Expand a leading `~` against $HOME
pub fn expand_home(dir: &str) -> PathBuf {
    expand_tilde(dir, home_dir().as_deref())
}

fn expand_tilde(dir: &str, home: Option<&Path>) -> PathBuf {
    match (dir.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(dir),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_full_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"[notebook]
dir = "/srv/notes"

[tasks]
marker = "@task"
status = "all"

[obsidian]
vault = "abc123"
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.notebook.dir, "/srv/notes");
        assert_eq!(config.tasks.marker, "@task");
        assert_eq!(config.tasks.status, "all");
        assert_eq!(config.obsidian.vault, "abc123");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[tasks]\nstatus = \"closed\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.notebook.dir, "~/Notebook");
        assert_eq!(config.tasks.marker, "@todo");
        assert_eq!(config.tasks.status, "closed");
        assert_eq!(config.obsidian.vault, "510b22d0827fd8cf");
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[notebook\n").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config_from(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_expand_tilde() {
        let home = Path::new("/home/me");
        assert_eq!(expand_tilde("~", Some(home)), PathBuf::from("/home/me"));
        assert_eq!(
            expand_tilde("~/Notebook", Some(home)),
            PathBuf::from("/home/me/Notebook")
        );
        assert_eq!(expand_tilde("~other/x", Some(home)), PathBuf::from("~other/x"));
        assert_eq!(expand_tilde("/abs", Some(home)), PathBuf::from("/abs"));
        assert_eq!(expand_tilde("~/x", None), PathBuf::from("~/x"));
    }
}
