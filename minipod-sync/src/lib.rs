//! # minipod-sync
//!
//! Download a pod spec from upstream and publish it through a local mirror.
//!
//! Call [`add_pod`] with a [`SpecFetcher`] and a [`MirrorRepository`]; the
//! production implementations are [`HttpFetcher`] and [`GitMirror`].

pub mod error;
pub mod fetch;
pub mod mirror;
pub mod workflow;
pub mod writer;

pub use error::{AddError, MirrorError};
pub use fetch::{FetchOutcome, HttpFetcher, SpecFetcher};
pub use mirror::{GitMirror, MirrorOp, MirrorRepository};
pub use workflow::{add_pod, check_repo, commit_message, AddEvent, Reporter};
