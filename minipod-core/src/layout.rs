//! Where a pod spec lives, upstream and in a local mirror.
//!
//! ```text
//! upstream:  <upstream_base>/Specs/<a>/<b>/<c>/<name>/<version>/<name>.podspec.json
//! mirror:    <repos_root>/<repo>/Specs/<name>/<version>/<name>.podspec.json
//! ```
//!
//! Upstream shards by the name digest (see [`crate::shard`]); mirrors stay
//! flat so they can be browsed by pod name. Everything here is pure.

use std::path::PathBuf;

use crate::config::MirrorConfig;
use crate::shard::ShardKey;
use crate::types::{PodIdentity, RepoName};

const SPECS_DIR: &str = "Specs";

/// Every location derived from one pod + one mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub upstream_url: String,
    /// `<repos_root>/<repo>/Specs/<name>/<version>/<name><suffix>`
    pub local_spec_file: PathBuf,
    /// `<repos_root>/<repo>/Specs/<name>/<version>`
    pub local_spec_dir: PathBuf,
    /// `Specs/<name>/<version>/<name><suffix>`, relative to the mirror root.
    pub local_flat_spec_path: PathBuf,
}

/// Path resolver bound to one configuration.
#[derive(Debug, Clone)]
pub struct MirrorLayout {
    config: MirrorConfig,
}

impl MirrorLayout {
    pub fn new(config: MirrorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    /// `<repos_root>/<repo>`
    pub fn repo_dir(&self, repo: &RepoName) -> PathBuf {
        self.config.repos_root.join(&repo.0)
    }

    /// Raw download URL of the spec in the sharded upstream layout.
    pub fn upstream_url(&self, pod: &PodIdentity) -> String {
        let [a, b, c] = ShardKey::for_name(&pod.name.0).segments();
        format!(
            "{base}/{SPECS_DIR}/{a}/{b}/{c}/{name}/{version}/{file}",
            base = self.config.upstream_base,
            name = pod.name,
            version = pod.version,
            file = self.spec_file_name(pod),
        )
    }

    /// Mirror-relative spec path, no sharding.
    pub fn local_flat_spec_path(&self, pod: &PodIdentity) -> PathBuf {
        self.flat_spec_dir(pod).join(self.spec_file_name(pod))
    }

    pub fn local_spec_dir_path(&self, repo: &RepoName, pod: &PodIdentity) -> PathBuf {
        self.repo_dir(repo).join(self.flat_spec_dir(pod))
    }

    pub fn local_spec_file_path(&self, repo: &RepoName, pod: &PodIdentity) -> PathBuf {
        self.repo_dir(repo).join(self.local_flat_spec_path(pod))
    }

    /// All four variants at once.
    pub fn resolve(&self, repo: &RepoName, pod: &PodIdentity) -> ResolvedPaths {
        ResolvedPaths {
            upstream_url: self.upstream_url(pod),
            local_spec_file: self.local_spec_file_path(repo, pod),
            local_spec_dir: self.local_spec_dir_path(repo, pod),
            local_flat_spec_path: self.local_flat_spec_path(pod),
        }
    }

    fn flat_spec_dir(&self, pod: &PodIdentity) -> PathBuf {
        PathBuf::from(SPECS_DIR)
            .join(&pod.name.0)
            .join(&pod.version.0)
    }

    fn spec_file_name(&self, pod: &PodIdentity) -> String {
        format!("{}{}", pod.name, self.config.spec_suffix)
    }
}
