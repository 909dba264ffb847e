use std::path::PathBuf;

/// Errors from configuration load and save.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(String),

    #[error("could not serialize config: {0}")]
    Serialize(String),
}
