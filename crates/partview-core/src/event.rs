//! Event system for communication between UI and background work.
//!
//! State transitions that need the backend produce a [`Command`]; the
//! frontend runs it off the UI thread and reports back with an [`Event`].
//! This keeps the state types free of I/O so any frontend can drive them.

use std::path::PathBuf;

use crate::directory::DirectoryNode;
use crate::selection::{DownloadRequest, PreviewTicket};

/// Backend work requested by a state transition.
///
/// Commands flow **state → runtime**.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the directory description.
    FetchDirectory,
    /// Fetch the preview text for the ticket's location.
    FetchPreview(PreviewTicket),
    /// Fetch the file bytes and save them locally.
    Download(DownloadRequest),
}

/// Completion of a [`Command`].
///
/// Events flow **runtime → state**.
#[derive(Debug, Clone)]
pub enum Event {
    /// The directory description was fetched and decoded.
    DirectoryLoaded(DirectoryNode),
    /// The directory could not be fetched or decoded.
    DirectoryFailed {
        error: String,
    },
    /// A preview request finished, successfully or not.
    PreviewFinished {
        ticket: PreviewTicket,
        result: Result<String, String>,
    },
    /// A download was written to disk.
    DownloadSaved {
        path: PathBuf,
    },
    DownloadFailed {
        file_name: String,
        error: String,
    },
}
