pub mod config_io;
pub mod notebook_io;

pub use config_io::ConfigError;
pub use notebook_io::{NotebookError, SearchHit};
