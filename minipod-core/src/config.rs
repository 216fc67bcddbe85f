//! Mirror configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.minipod/
//!   config.yaml        (optional; every key optional)
//! ~/.cocoapods/
//!   repos/
//!     <repo_name>/     (one git-backed mirror per directory)
//! ```
//!
//! # API pattern
//!
//! As with the path helpers, every loader has two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::RepoName;

/// Raw content root of the public CocoaPods Specs repo.
pub const DEFAULT_UPSTREAM_BASE: &str = "https://raw.githubusercontent.com/CocoaPods/Specs/master";

/// File name suffix of a JSON pod spec.
pub const DEFAULT_SPEC_SUFFIX: &str = ".podspec.json";

/// Everything the layout and the add workflow need to know about the
/// environment. Built once per invocation and passed down by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirrorConfig {
    /// Directory holding one subdirectory per local mirror.
    pub repos_root: PathBuf,
    /// Base URL that `/Specs/<a>/<b>/<c>/…` is appended to.
    pub upstream_base: String,
    pub spec_suffix: String,
    /// Mirror used when `--repo` is omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_repo: Option<RepoName>,
}

impl MirrorConfig {
    /// Defaults rooted at `home`: mirrors under `<home>/.cocoapods/repos`.
    pub fn for_home(home: &Path) -> Self {
        Self {
            repos_root: home.join(".cocoapods").join("repos"),
            upstream_base: DEFAULT_UPSTREAM_BASE.to_owned(),
            spec_suffix: DEFAULT_SPEC_SUFFIX.to_owned(),
            default_repo: None,
        }
    }

    /// Render as YAML (for `minipod config`).
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn apply(mut self, overrides: ConfigFile) -> Self {
        if let Some(root) = overrides.repos_root {
            self.repos_root = root;
        }
        if let Some(base) = overrides.upstream_base {
            self.upstream_base = base.trim_end_matches('/').to_owned();
        }
        if let Some(suffix) = overrides.spec_suffix {
            self.spec_suffix = suffix;
        }
        if overrides.default_repo.is_some() {
            self.default_repo = overrides.default_repo;
        }
        self
    }
}

/// On-disk shape of `config.yaml`. Absent keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    repos_root: Option<PathBuf>,
    upstream_base: Option<String>,
    spec_suffix: Option<String>,
    default_repo: Option<RepoName>,
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// `<home>/.minipod/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".minipod").join("config.yaml")
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load the effective configuration for `home`.
///
/// Returns the defaults when no config file exists, and
/// `ConfigError::Parse` (with path + line context) if it is malformed.
pub fn load_at(home: &Path) -> Result<MirrorConfig, ConfigError> {
    let defaults = MirrorConfig::for_home(home);
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(defaults);
    }
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Ok(defaults);
    }
    let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    // An empty repo name would resolve to the repos root itself.
    if file.default_repo.as_ref().is_some_and(|r| r.0.trim().is_empty()) {
        return Err(ConfigError::Invalid {
            path,
            message: "default_repo must not be empty".to_owned(),
        });
    }
    Ok(defaults.apply(file))
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<MirrorConfig, ConfigError> {
    load_at(&home()?)
}

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}
