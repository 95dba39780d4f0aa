//! Rotating plain-text file sink: one `[timestamp] [NATURE] message` line per
//! record, size-triggered rotation through a numbered chain.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{LogRecord, rotate_files, validate_handle};
use crate::error::Error;
use crate::fmt::flatten_message;
use crate::guard::{absolutize, assert_safe_target};

#[derive(Debug)]
pub struct FileFacility {
    path: PathBuf,
    rotations_to_keep: u32,
    max_file_size_bytes: u64,
}

impl FileFacility {
    /// Creates the facility: validates the handle, creates parent directories,
    /// safety-checks the target, optionally rotates, and ensures the file exists.
    ///
    /// # Errors
    /// Validation errors for a malformed handle, unsafe-target rejections,
    /// and I/O failures creating directories or the file.
    pub fn create(
        handle: &str,
        file_path: &str,
        rotate_on_start: bool,
        rotations_to_keep: u32,
        max_file_size_bytes: u64,
    ) -> Result<Self, Error> {
        validate_handle(handle)?;
        let expanded = shellexpand::tilde(file_path);
        let path = absolutize(Path::new(expanded.as_ref()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        assert_safe_target(&path)?;
        if rotate_on_start {
            rotate_files(&path, rotations_to_keep)?;
        }
        if !path.exists() {
            fs::write(&path, "")?;
        }
        assert_safe_target(&path)?;
        Ok(Self {
            path,
            rotations_to_keep,
            max_file_size_bytes,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one flattened record line, rotating first if the append would
    /// push the file past its size cap.
    ///
    /// # Errors
    /// Unsafe-target rejections and I/O failures.
    pub fn write(&mut self, record: &LogRecord) -> Result<(), Error> {
        assert_safe_target(&self.path)?;
        let timestamp = record.timestamp.format("%Y-%m-%d %H:%M:%S");
        let flat = flatten_message(&record.message);
        let line = format!("[{timestamp}] [{}] {flat}\n", record.nature);

        let current_size = fs::metadata(&self.path).map_or(0, |meta| meta.len());
        if current_size + line.len() as u64 > self.max_file_size_bytes {
            rotate_files(&self.path, self.rotations_to_keep)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}
