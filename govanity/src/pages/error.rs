//! Page writing error types.

use crate::templates::TemplateError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing output files.
#[derive(Debug, Error)]
pub enum PageError {
    /// The import prefix could not be derived from the declared import path.
    #[error("Unusable import prefix for '{import_path}'")]
    UnusableImportPrefix { import_path: String },

    /// The output path would leave the output directory.
    #[error("Refusing to write '{import_path}' outside the output directory")]
    UnsafePath { import_path: String },

    /// Page rendering failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Failed to write a file.
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
