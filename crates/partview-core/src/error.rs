//! Error types for `partview-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`. Transport failures have
//! their own [`HttpError`](crate::remote::http::HttpError) type and are
//! converted into [`CoreError::Remote`] at the boundary.

use std::path::PathBuf;

use crate::remote::http::HttpError;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// The directory description does not have a mapping at its root.
    #[error("malformed directory: {0}")]
    MalformedDirectory(String),

    /// An action needs a selected file but nothing is selected.
    #[error("no file selected")]
    NoSelection,

    /// The selected file is excluded from text preview.
    #[error("preview unavailable for {0}")]
    PreviewUnavailable(String),

    /// A request to the backend service failed.
    #[error("remote error: {0}")]
    Remote(#[from] HttpError),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `partview-core`.
pub type CoreResult<T> = Result<T, CoreError>;
