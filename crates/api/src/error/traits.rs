//! Error handling traits for the cryptanalysis workspace

use super::types::{Error, Result};
use std::path::PathBuf;

/// Extension trait attaching a file path to I/O failures
pub trait ResultExt<T>: Sized {
    /// Convert an I/O error into [`Error::Io`] naming `path`
    fn with_path<P: Into<PathBuf>>(self, path: P) -> Result<T>;
}

impl<T> ResultExt<T> for std::io::Result<T> {
    fn with_path<P: Into<PathBuf>>(self, path: P) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }
}
