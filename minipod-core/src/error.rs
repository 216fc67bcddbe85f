//! Error types for minipod-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can arise while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The file parsed but holds a value that cannot be used.
    #[error("invalid config at {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    /// YAML serialization error (rendering the effective config).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.cocoapods/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
