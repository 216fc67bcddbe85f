//! Upstream registry sharding.
//!
//! The public CocoaPods Specs repo buckets every pod under three single-character
//! directories taken from the lowercase hex MD5 digest of the pod name:
//! `AFNetworking` lives under `Specs/a/7/5/AFNetworking/`. The digest must be MD5;
//! any other algorithm points at paths upstream does not have.

use md5::{Digest, Md5};

/// Three-character shard prefix for a pod name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShardKey([char; 3]);

impl ShardKey {
    /// Derive the shard key for `name`.
    pub fn for_name(name: &str) -> Self {
        let digest = hex::encode(Md5::digest(name.as_bytes()));
        let mut chars = digest.chars();
        // An MD5 hex digest is always 32 characters.
        let mut next = || chars.next().unwrap_or('0');
        Self([next(), next(), next()])
    }

    /// The three path segments, in order.
    pub fn segments(&self) -> [char; 3] {
        self.0
    }
}

impl std::fmt::Display for ShardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a}{b}{c}")
    }
}
