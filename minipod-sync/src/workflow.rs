//! The add-pod workflow.
//!
//! ```text
//! Start ─pull─▶ Pulled ─mkdir -p─▶ DirEnsured ─GET─▶ Fetching
//!   Fetching ─404──────▶ NotFound      (stop)
//!   Fetching ─other────▶ FetchFailed   (stop)
//!   Fetching ─200─write─▶ Downloaded ─add─commit─push─▶ Published ─▶ Done
//! ```
//!
//! Each step finishes before the next starts and the first failure ends the
//! run. Nothing is rolled back: if publishing fails, the written spec stays in
//! the working tree without a commit.
//!
//! The mirror is assumed to be used by one invocation at a time; there is no
//! lock.

use std::fmt;
use std::path::PathBuf;

use minipod_core::{MirrorLayout, PodIdentity, RepoName};

use crate::error::{AddError, MirrorError};
use crate::fetch::{FetchOutcome, SpecFetcher};
use crate::mirror::MirrorRepository;
use crate::writer;

// ---------------------------------------------------------------------------
// Operator messages
// ---------------------------------------------------------------------------

/// Messages operators see (and grep for). `Display` renders the exact text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddEvent {
    NotExists(PodIdentity),
    DownloadFailure(PodIdentity),
    DownloadSuccess(PodIdentity),
    InstallSuccess(PodIdentity),
}

impl fmt::Display for AddEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddEvent::NotExists(pod) => write!(f, "pod {pod} not exists!"),
            AddEvent::DownloadFailure(pod) => write!(f, "pod {pod} download failure"),
            AddEvent::DownloadSuccess(pod) => write!(f, "pod {pod} download success"),
            AddEvent::InstallSuccess(pod) => write!(f, "pod {pod} install success"),
        }
    }
}

/// Sink for [`AddEvent`]s.
pub trait Reporter {
    fn report(&mut self, event: AddEvent);
}

impl Reporter for Vec<AddEvent> {
    fn report(&mut self, event: AddEvent) {
        self.push(event);
    }
}

// ---------------------------------------------------------------------------
// Precondition
// ---------------------------------------------------------------------------

/// Check that the mirror directory for `repo` exists and return it.
pub fn check_repo(layout: &MirrorLayout, repo: &RepoName) -> Result<PathBuf, AddError> {
    let dir = layout.repo_dir(repo);
    if !dir.is_dir() {
        return Err(AddError::RepoMissing {
            repo: repo.clone(),
            root: layout.config().repos_root.clone(),
        });
    }
    Ok(dir)
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// Add `pod` to the mirror `repo`.
///
/// The caller is expected to have run [`check_repo`] first. Returns the path
/// of the written spec file.
pub fn add_pod(
    layout: &MirrorLayout,
    repo: &RepoName,
    pod: &PodIdentity,
    fetcher: &dyn SpecFetcher,
    mirror: &dyn MirrorRepository,
    reporter: &mut dyn Reporter,
) -> Result<PathBuf, AddError> {
    let paths = layout.resolve(repo, pod);

    // Start → Pulled
    mirror.pull().map_err(|source| AddError::Pull {
        pod: pod.clone(),
        source,
    })?;
    tracing::debug!("pulled mirror {repo}");

    // Pulled → DirEnsured
    writer::ensure_dir(&paths.local_spec_dir)?;

    // DirEnsured → Fetching
    let bytes = match fetcher.fetch(&paths.upstream_url) {
        FetchOutcome::Success(bytes) => bytes,
        FetchOutcome::NotFound => {
            reporter.report(AddEvent::NotExists(pod.clone()));
            return Err(AddError::NotFound {
                pod: pod.clone(),
                url: paths.upstream_url,
            });
        }
        FetchOutcome::TransferError(reason) => {
            reporter.report(AddEvent::DownloadFailure(pod.clone()));
            return Err(AddError::Transfer {
                pod: pod.clone(),
                url: paths.upstream_url,
                reason,
            });
        }
    };

    // Fetching → Downloaded
    writer::write_spec(&paths.local_spec_file, &bytes)?;
    reporter.report(AddEvent::DownloadSuccess(pod.clone()));

    // Downloaded → Published
    publish(mirror, pod).map_err(|source| {
        tracing::warn!(
            "publish failed; {} is left uncommitted in the mirror",
            paths.local_spec_file.display()
        );
        AddError::Publish {
            pod: pod.clone(),
            path: paths.local_spec_file.clone(),
            source,
        }
    })?;

    // Published → Done
    reporter.report(AddEvent::InstallSuccess(pod.clone()));
    Ok(paths.local_spec_file)
}

/// `add <name>[<version>]`
pub fn commit_message(pod: &PodIdentity) -> String {
    format!("add {pod}")
}

fn publish(
    mirror: &dyn MirrorRepository,
    pod: &PodIdentity,
) -> Result<(), MirrorError> {
    mirror.stage_all()?;
    mirror.commit(&commit_message(pod))?;
    mirror.push()?;
    Ok(())
}
