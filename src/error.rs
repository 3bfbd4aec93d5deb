//! Error types for catalog building and fix application.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
/// Failure to enumerate the document identifiers under the root.
pub enum CatalogError {
    #[error("{} directory not found", .0.display())]
    RootNotFound(PathBuf),
    #[error("failed to list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
/// Failure to rewrite a single document.
pub enum FixError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: line {line} is past the end of the file ({len} lines)", path.display())]
    LineOutOfRange {
        path: PathBuf,
        line: usize,
        len: usize,
    },
}

#[derive(Debug, thiserror::Error)]
/// The document glob could not be compiled.
#[error("invalid document pattern '{pattern}': {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: glob::PatternError,
}
