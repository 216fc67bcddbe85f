//! Filesystem side of the add workflow.
//!
//! ## `write_spec` — atomic replace
//!
//! 1. Write bytes to `<file>.minipod.tmp` in the same directory.
//! 2. Rename over the final path (atomic on POSIX).
//! 3. On write or rename failure, remove the `.tmp` and leave any existing
//!    file as is.

use std::path::{Path, PathBuf};

use crate::error::{write_err, AddError};

/// Create `dir` and any missing parents.
///
/// Returns whether the directory already existed. An existing directory is
/// not an error, and nothing inside it is touched.
pub fn ensure_dir(dir: &Path) -> Result<bool, AddError> {
    let existed = dir.is_dir();
    tracing::debug!("spec dir {} exists: {existed}", dir.display());
    std::fs::create_dir_all(dir).map_err(|source| AddError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(existed)
}

/// Atomically create or overwrite `path` with `bytes`.
pub fn write_spec(path: &Path, bytes: &[u8]) -> Result<(), AddError> {
    let tmp = tmp_path(path);
    write_spec_with_tmp(path, bytes, &tmp)
}

fn tmp_path(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.minipod.tmp", path.display()))
}

fn write_spec_with_tmp(path: &Path, bytes: &[u8], tmp: &Path) -> Result<(), AddError> {
    if let Err(e) = std::fs::write(tmp, bytes) {
        // A partial `.tmp` would otherwise be picked up by the next `git add .`.
        let _ = std::fs::remove_file(tmp);
        return Err(write_err(tmp, e));
    }

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(write_err(path, e));
    }

    tracing::info!("wrote: {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
