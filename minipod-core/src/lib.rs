//! minipod core library — domain types, configuration, and mirror layout.
//!
//! - [`types`] — newtypes for pod and repo names
//! - [`config`] — [`MirrorConfig`] and `~/.minipod/config.yaml` loading
//! - [`shard`] — upstream registry shard prefix
//! - [`layout`] — upstream URL and local mirror paths
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod layout;
pub mod shard;
pub mod types;

pub use config::MirrorConfig;
pub use error::ConfigError;
pub use layout::{MirrorLayout, ResolvedPaths};
pub use types::{PodIdentity, PodName, PodVersion, RepoName};
