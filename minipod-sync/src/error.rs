//! Error types for minipod-sync.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use minipod_core::{PodIdentity, RepoName};

use crate::mirror::MirrorOp;

/// A single git operation against the mirror failed.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// `git` could not be started at all.
    #[error("failed to run `git {op}` in {dir}: {source}")]
    Spawn {
        op: MirrorOp,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `git` ran and exited non-zero.
    #[error("`git {op}` exited with {status}: {output}")]
    Failed {
        op: MirrorOp,
        status: ExitStatus,
        /// git's stderr, or its stdout when stderr was empty (`git commit`
        /// with nothing to commit reports on stdout).
        output: String,
    },
}

/// Every terminal failure of the add-pod workflow.
#[derive(Debug, Error)]
pub enum AddError {
    /// The mirror directory does not exist; nothing was attempted.
    #[error("repo[{repo}] not exist in {root}")]
    RepoMissing { repo: RepoName, root: PathBuf },

    /// `pull` failed; the mirror was left untouched.
    #[error("failed to sync mirror before adding {pod}: {source}")]
    Pull {
        pod: PodIdentity,
        #[source]
        source: MirrorError,
    },

    /// The spec directory could not be created.
    #[error("cannot create spec directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Upstream answered 404.
    #[error("pod {pod} not found upstream at {url}")]
    NotFound { pod: PodIdentity, url: String },

    /// Any other non-200 status, or a transport failure.
    #[error("download of pod {pod} from {url} failed: {reason}")]
    Transfer {
        pod: PodIdentity,
        url: String,
        reason: String,
    },

    /// The downloaded bytes could not be written.
    #[error("I/O error at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// stage/commit/push failed. The spec file stays on disk.
    #[error("failed to publish {pod} (spec left at {path}): {source}")]
    Publish {
        pod: PodIdentity,
        path: PathBuf,
        #[source]
        source: MirrorError,
    },
}

/// Convenience constructor for [`AddError::Write`].
pub(crate) fn write_err(path: impl Into<PathBuf>, source: std::io::Error) -> AddError {
    AddError::Write {
        path: path.into(),
        source,
    }
}
