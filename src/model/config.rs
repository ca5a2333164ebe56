use serde::{Deserialize, Serialize};

/// Configuration from `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notebook: NotebookConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
    #[serde(default)]
    pub obsidian: ObsidianConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotebookConfig {
    /// Notebook root. A leading `~` is expanded against $HOME.
    #[serde(default = "default_notebook_dir")]
    pub dir: String,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        NotebookConfig {
            dir: default_notebook_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Token that marks a line as a task in the notebook
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Default filter for `zt tasks`: open, closed or all
    #[serde(default = "default_status")]
    pub status: String,
}

impl Default for TasksConfig {
    fn default() -> Self {
        TasksConfig {
            marker: default_marker(),
            status: default_status(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObsidianConfig {
    /// Vault id passed to the advanced-URI plugin
    #[serde(default = "default_vault")]
    pub vault: String,
}

impl Default for ObsidianConfig {
    fn default() -> Self {
        ObsidianConfig {
            vault: default_vault(),
        }
    }
}

fn default_notebook_dir() -> String {
    "~/Notebook".to_string()
}

fn default_marker() -> String {
    "@todo".to_string()
}

fn default_status() -> String {
    "open".to_string()
}

fn default_vault() -> String {
    "510b22d0827fd8cf".to_string()
}
