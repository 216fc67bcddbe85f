//! Version-control operations against one local mirror.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::MirrorError;

/// The four operations the add workflow issues against a mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorOp {
    Pull,
    StageAll,
    Commit,
    Push,
}

impl fmt::Display for MirrorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorOp::Pull => write!(f, "pull"),
            MirrorOp::StageAll => write!(f, "add"),
            MirrorOp::Commit => write!(f, "commit"),
            MirrorOp::Push => write!(f, "push"),
        }
    }
}

/// A version-controlled mirror directory. Every call blocks until the
/// operation has finished.
pub trait MirrorRepository {
    fn pull(&self) -> Result<(), MirrorError>;
    fn stage_all(&self) -> Result<(), MirrorError>;
    fn commit(&self, message: &str) -> Result<(), MirrorError>;
    fn push(&self) -> Result<(), MirrorError>;
}

// ---------------------------------------------------------------------------
// git CLI implementation
// ---------------------------------------------------------------------------

/// Mirror driven through the `git` executable on `PATH`.
///
/// Credentials, remotes and branch tracking come from the repository's own
/// git configuration.
#[derive(Debug, Clone)]
pub struct GitMirror {
    dir: PathBuf,
}

impl GitMirror {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn run(&self, op: MirrorOp, args: &[&str]) -> Result<(), MirrorError> {
        tracing::debug!("git {} in {}", args.join(" "), self.dir.display());
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .output()
            .map_err(|source| MirrorError::Spawn {
                op,
                dir: self.dir.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr
            };
            return Err(MirrorError::Failed {
                op,
                status: output.status,
                output: message,
            });
        }

        tracing::info!("git {op} done in {}", self.dir.display());
        Ok(())
    }
}

impl MirrorRepository for GitMirror {
    fn pull(&self) -> Result<(), MirrorError> {
        self.run(MirrorOp::Pull, &["pull"])
    }

    fn stage_all(&self) -> Result<(), MirrorError> {
        self.run(MirrorOp::StageAll, &["add", "."])
    }

    fn commit(&self, message: &str) -> Result<(), MirrorError> {
        self.run(MirrorOp::Commit, &["commit", "-m", message])
    }

    fn push(&self) -> Result<(), MirrorError> {
        self.run(MirrorOp::Push, &["push"])
    }
}
