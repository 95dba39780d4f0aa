//! Numbered rotation chain shared by the file and HTML facilities.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::guard::assert_safe_target;

fn numbered(path: &Path, index: u32) -> PathBuf {
    let name = path.file_name().map_or_else(String::new, |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!("{name}.{index}"))
}

/// Rotates `path` through its numbered chain.
///
/// `keep == 0` truncates in place. Otherwise the oldest member `F.keep` is
/// deleted, every `F.i` shifts to `F.(i+1)`, the current file becomes `F.1`,
/// and an empty `F` is recreated. Every touched path is safety-checked before
/// it is touched. The chain is not shifted atomically; a crash mid-rotation
/// can leave a partially shifted chain.
///
/// # Errors
/// Unsafe-target rejections and I/O failures from any chain step.
pub(crate) fn rotate_files(path: &Path, keep: u32) -> Result<(), Error> {
    assert_safe_target(path)?;
    if keep == 0 {
        fs::write(path, "")?;
        return Ok(());
    }

    let oldest = numbered(path, keep);
    assert_safe_target(&oldest)?;
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }

    for index in (1..keep).rev() {
        let src = numbered(path, index);
        let dst = numbered(path, index + 1);
        assert_safe_target(&src)?;
        assert_safe_target(&dst)?;
        if src.exists() {
            fs::rename(&src, &dst)?;
        }
    }

    if path.exists() {
        let first = numbered(path, 1);
        assert_safe_target(&first)?;
        fs::rename(path, &first)?;
    }

    fs::write(path, "")?;
    Ok(())
}
