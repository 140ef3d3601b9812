//! Error handling for the `GedcomReader`.
//!
//! Only conditions that abort a load are errors. Data anomalies found in a
//! readable file (duplicate identifiers, unparsable dates, rule violations)
//! are reported as diagnostics instead.

pub mod util;

use std::io;
use std::path::{Path, PathBuf};

/// Specialized error type for the `GedcomReader`
#[derive(Debug, thiserror::Error)]
pub enum GedcomError {
    /// Error opening or reading the source file
    #[error("IO error for {}: {context}: {source}", path.display())]
    Io {
        /// Path of the source
        path: PathBuf,
        /// What was being attempted
        context: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },
    /// The path exists but does not name a regular file
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Offending path
        path: PathBuf,
    },
}

impl GedcomError {
    /// Wrap an I/O error with the path and a short description of the operation
    pub fn io(path: &Path, context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            context: context.into(),
            source,
        }
    }

    /// Path the error relates to
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::NotAFile { path } => path,
        }
    }
}

/// Result type for `GedcomReader` operations
pub type Result<T> = std::result::Result<T, GedcomError>;
