//! Directory listing abstraction used by structure-aware rules.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// File name, without the parent path.
    pub name: String,
    /// Whether the entry is a regular file.
    pub is_file: bool,
    /// Whether the entry is a directory.
    pub is_directory: bool,
}

impl DirectoryEntry {
    /// Creates a regular file entry.
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: true,
            is_directory: false,
        }
    }

    /// Creates a directory entry.
    #[must_use]
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: false,
            is_directory: true,
        }
    }
}

/// A directory could not be listed.
#[derive(Debug, Error)]
#[error("cannot list directory {path}: {source}")]
pub struct DirectoryError {
    /// Directory that failed.
    pub path: PathBuf,
    /// Underlying IO error.
    #[source]
    pub source: std::io::Error,
}

/// Lists directory contents.
///
/// Every call must reflect the file system at call time; implementations
/// must not cache listings across calls.
pub trait DirectoryReader: Send + Sync {
    /// Lists the entries of `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or one of its entries cannot be read.
    fn list(&self, dir: &Path) -> Result<Vec<DirectoryEntry>, DirectoryError>;
}

/// [`DirectoryReader`] backed by the operating system.
///
/// Entry types are taken from the directory entry itself, so symbolic links
/// are reported as neither file nor directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsDirectoryReader;

impl DirectoryReader for OsDirectoryReader {
    fn list(&self, dir: &Path) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        let wrap = |source: std::io::Error| DirectoryError {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(wrap)? {
            let entry = entry.map_err(wrap)?;
            let file_type = entry.file_type().map_err(wrap)?;
            entries.push(DirectoryEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_file: file_type.is_file(),
                is_directory: file_type.is_dir(),
            });
        }

        // read_dir order is platform dependent
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
