//! Symlink-aware path safety checks for every filesystem target the crate
//! touches.
//!
//! A log path is only written through if every ancestor directory is a real
//! directory (not a symlink) and the target itself is either absent or a
//! regular file. Checked before facility creation, before each rotation
//! step, and before every append — a symlink swapped in between calls is
//! caught at the next check rather than followed.

use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Absolutizes `path` against the current working directory without touching
/// the filesystem (no symlink resolution — that is the point).
///
/// # Errors
/// Fails only if the working directory itself is unavailable.
pub fn absolutize(path: &Path) -> Result<PathBuf, Error> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

/// Rejects `path` unless every ancestor is a non-symlink directory and the
/// target is absent or a regular file.
///
/// # Errors
/// [`Error::UnsafeTarget`] for a symlinked ancestor, a symlinked or
/// non-regular target, or any target inspection failure other than "not found".
pub fn assert_safe_target(path: &Path) -> Result<(), Error> {
    let absolute = absolutize(path)?;

    let mut ancestor = absolute.parent();
    while let Some(dir) = ancestor {
        if is_symlink(dir) {
            return Err(Error::UnsafeTarget(format!(
                "parent path is a symlink: '{}'",
                dir.display()
            )));
        }
        ancestor = dir.parent();
    }

    match std::fs::symlink_metadata(&absolute) {
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::UnsafeTarget(format!(
            "unable to inspect log target '{}': {e}",
            absolute.display()
        ))),
        Ok(meta) if meta.file_type().is_symlink() => Err(Error::UnsafeTarget(format!(
            "log target is a symlink: '{}'",
            absolute.display()
        ))),
        Ok(meta) if !meta.file_type().is_file() => Err(Error::UnsafeTarget(format!(
            "log target must be a regular file: '{}'",
            absolute.display()
        ))),
        Ok(_) => Ok(()),
    }
}

/// A missing ancestor is not a symlink; inspection failures here also read as
/// "not a symlink" and the target check surfaces anything genuinely wrong.
fn is_symlink(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
}
