//! Domain types for pods and mirrors.
//!
//! Names are kept as opaque strings; characters that are illegal in a path
//! are the caller's problem, not something these types validate.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Name of a pod as it appears in the registry (e.g. `AFNetworking`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PodName(pub String);

impl fmt::Display for PodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PodName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PodName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Version string of a pod (e.g. `3.1.0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PodVersion(pub String);

impl fmt::Display for PodVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PodVersion {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PodVersion {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Directory name of a local mirror under the repositories root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoName(pub String);

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepoName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepoName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// PodIdentity
// ---------------------------------------------------------------------------

/// One pod at one version. Identifies exactly one spec file in either layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PodIdentity {
    pub name: PodName,
    pub version: PodVersion,
}

impl PodIdentity {
    pub fn new(name: impl Into<PodName>, version: impl Into<PodVersion>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Renders as `<name>[<version>]`, the token used in operator messages and
/// commit messages.
impl fmt::Display for PodIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.version)
    }
}
