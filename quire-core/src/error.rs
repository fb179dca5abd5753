//! Error types for Quire Core

use thiserror::Error;

/// Result type alias using QuireError
pub type Result<T> = std::result::Result<T, QuireError>;

/// Top-level error type for all Quire operations
#[derive(Debug, Error)]
pub enum QuireError {
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Staging walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the basic checks on caller-supplied content paths
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Package path must not be empty")]
    EmptyPath,

    #[error("Package path escapes the package root: {0}")]
    PathEscapesPackage(String),

    #[error("Package path already in use: {0}")]
    DuplicatePath(String),

    #[error("Package path is reserved for generated files: {0}")]
    ReservedPath(String),

    #[error("Package path {0} conflicts with existing path {1}")]
    PathConflict(String, String),
}
