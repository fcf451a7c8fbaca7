//! Selection and preview state for the file browser.
//!
//! At most one [`FileRecord`] is selected. Preview content belongs to the
//! selection and is cleared whenever the selection changes. Every change
//! of selection and every preview request bumps a generation counter; a
//! [`PreviewTicket`] carries the generation it was issued under, so a
//! response for a superseded request is discarded instead of overwriting
//! newer state.

use std::fmt;

use crate::directory::FileRecord;
use crate::error::{CoreError, CoreResult};
use crate::kinds::{preview_eligibility, PreviewEligibility, PREVIEW_UNAVAILABLE_3D};

/// Alert shown when a download is requested with nothing selected.
pub const NO_SELECTION_FOR_DOWNLOAD: &str = "No file selected for download.";

/// Observable state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Unselected,
    SelectedNoPreview,
    SelectedPreviewLoaded,
}

/// Handle for one in-flight preview request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTicket {
    generation: u64,
    location: String,
}

impl PreviewTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Backend location of the file being previewed.
    pub fn location(&self) -> &str {
        &self.location
    }
}

/// What happened to a finished preview request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// The content is now the current preview.
    Applied,
    /// The request failed; the preview was cleared.
    Failed,
    /// A newer selection or request superseded this one; nothing changed.
    Stale,
}

/// Everything needed to download the selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub location: String,
    /// Suggested file name, taken from the record's display name.
    pub file_name: String,
}

/// Tracks the selected file and its preview.
///
/// Immutable: every transition returns a new controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionController {
    selected: Option<FileRecord>,
    preview: Option<String>,
    generation: u64,
    loading: bool,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&FileRecord> {
        self.selected.as_ref()
    }

    /// The loaded preview content, or `""` when none is loaded.
    pub fn preview_content(&self) -> &str {
        self.preview.as_deref().unwrap_or("")
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `true` while a preview request for the current generation is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> SelectionPhase {
        match (&self.selected, &self.preview) {
            (None, _) => SelectionPhase::Unselected,
            (Some(_), None) => SelectionPhase::SelectedNoPreview,
            (Some(_), Some(_)) => SelectionPhase::SelectedPreviewLoaded,
        }
    }

    /// Eligibility of the selected file, or `None` when nothing is selected.
    pub fn preview_eligibility(&self) -> Option<PreviewEligibility> {
        self.selected
            .as_ref()
            .map(|record| preview_eligibility(&record.name))
    }

    /// Text for the preview pane: the 3D placeholder for excluded files,
    /// otherwise the loaded content. `None` when nothing is selected.
    pub fn preview_text(&self) -> Option<&str> {
        match self.preview_eligibility()? {
            PreviewEligibility::Excluded3d(_) => Some(PREVIEW_UNAVAILABLE_3D),
            PreviewEligibility::Available => Some(self.preview_content()),
        }
    }

    /// Selects `record`.
    ///
    /// Selecting the file that is already selected (same uuid) changes
    /// nothing. Selecting any other file clears the preview and
    /// invalidates outstanding preview requests.
    pub fn select_file(&self, record: FileRecord) -> Self {
        if let Some(current) = &self.selected {
            if current.same_file(&record) {
                return self.clone();
            }
        }
        tracing::debug!(uuid = %record.uuid, name = %record.name, "file selected");
        Self {
            selected: Some(record),
            preview: None,
            generation: self.generation + 1,
            loading: false,
        }
    }

    /// Starts a preview request for the selected file.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NoSelection`] if nothing is selected.
    /// - [`CoreError::PreviewUnavailable`] if the file is an excluded 3D format.
    pub fn begin_preview(&self) -> CoreResult<(Self, PreviewTicket)> {
        let record = self.selected.as_ref().ok_or(CoreError::NoSelection)?;
        if !preview_eligibility(&record.name).is_available() {
            return Err(CoreError::PreviewUnavailable(record.name.clone()));
        }
        let generation = self.generation + 1;
        let ticket = PreviewTicket {
            generation,
            location: record.location.clone(),
        };
        let next = Self {
            selected: self.selected.clone(),
            preview: self.preview.clone(),
            generation,
            loading: true,
        };
        Ok((next, ticket))
    }

    /// Applies the result of the request identified by `ticket`.
    ///
    /// Failures clear the preview and are reported through `tracing`;
    /// they never surface to the caller as errors.
    pub fn finish_preview<E: fmt::Display>(
        &self,
        ticket: &PreviewTicket,
        result: Result<String, E>,
    ) -> (Self, PreviewOutcome) {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding superseded preview response"
            );
            return (self.clone(), PreviewOutcome::Stale);
        }
        match result {
            Ok(content) => {
                let next = Self {
                    preview: Some(content),
                    loading: false,
                    ..self.clone()
                };
                (next, PreviewOutcome::Applied)
            }
            Err(e) => {
                tracing::warn!(location = %ticket.location, "error fetching file content: {e}");
                let next = Self {
                    preview: None,
                    loading: false,
                    ..self.clone()
                };
                (next, PreviewOutcome::Failed)
            }
        }
    }

    /// Describes a download of the selected file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoSelection`] if nothing is selected; the caller
    /// should alert the user and make no request.
    pub fn begin_download(&self) -> CoreResult<DownloadRequest> {
        let record = self.selected.as_ref().ok_or(CoreError::NoSelection)?;
        Ok(DownloadRequest {
            location: record.location.clone(),
            file_name: record.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote() -> FileRecord {
        FileRecord::new("u1", "quote.pdf", "/a/quote.pdf")
    }

    fn notes() -> FileRecord {
        FileRecord::new("u2", "notes.txt", "/a/notes.txt")
    }

    fn model() -> FileRecord {
        FileRecord::new("u3", "model.stl", "/a/model.stl")
    }

    fn loaded(record: FileRecord, content: &str) -> SelectionController {
        let selection = SelectionController::new().select_file(record);
        let (selection, ticket) = selection.begin_preview().unwrap();
        let (selection, outcome) = selection.finish_preview::<String>(&ticket, Ok(content.into()));
        assert_eq!(outcome, PreviewOutcome::Applied);
        selection
    }

    #[test]
    fn starts_unselected() {
        let selection = SelectionController::new();
        assert_eq!(selection.phase(), SelectionPhase::Unselected);
        assert!(selection.selected().is_none());
        assert_eq!(selection.preview_content(), "");
        assert!(selection.preview_text().is_none());
    }

    #[test]
    fn selecting_moves_to_no_preview() {
        let selection = SelectionController::new().select_file(quote());
        assert_eq!(selection.phase(), SelectionPhase::SelectedNoPreview);
        assert_eq!(selection.selected(), Some(&quote()));
        assert_eq!(selection.preview_content(), "");
    }

    #[test]
    fn reselecting_same_uuid_is_noop() {
        let selection = loaded(notes(), "hello");
        let again = selection.select_file(notes());
        assert_eq!(again, selection);
        assert_eq!(again.preview_content(), "hello");

        let renamed = FileRecord::new("u2", "other-name.txt", "/elsewhere");
        let again = selection.select_file(renamed);
        assert_eq!(again.selected(), Some(&notes()));
        assert_eq!(again.preview_content(), "hello");
    }

    #[test]
    fn selecting_different_file_clears_preview() {
        let selection = loaded(notes(), "hello");
        let selection = selection.select_file(quote());
        assert_eq!(selection.phase(), SelectionPhase::SelectedNoPreview);
        assert_eq!(selection.preview_content(), "");
    }

    #[test]
    fn preview_success_then_failure_for_new_selection() {
        let selection = loaded(notes(), "hello");
        assert_eq!(selection.phase(), SelectionPhase::SelectedPreviewLoaded);
        assert_eq!(selection.preview_content(), "hello");

        let selection = selection.select_file(quote());
        let (selection, ticket) = selection.begin_preview().unwrap();
        assert!(selection.is_loading());
        let (selection, outcome) =
            selection.finish_preview(&ticket, Err("500 Internal Server Error"));
        assert_eq!(outcome, PreviewOutcome::Failed);
        assert_eq!(selection.preview_content(), "");
        assert_eq!(selection.phase(), SelectionPhase::SelectedNoPreview);
        assert!(!selection.is_loading());
    }

    #[test]
    fn failure_clears_previously_loaded_preview() {
        let selection = loaded(notes(), "hello");
        let (selection, ticket) = selection.begin_preview().unwrap();
        let (selection, outcome) = selection.finish_preview(&ticket, Err("timeout"));
        assert_eq!(outcome, PreviewOutcome::Failed);
        assert_eq!(selection.preview_content(), "");
    }

    #[test]
    fn response_for_previous_selection_is_discarded() {
        let selection = SelectionController::new().select_file(notes());
        let (selection, old_ticket) = selection.begin_preview().unwrap();
        let selection = selection.select_file(quote());

        let (after, outcome) =
            selection.finish_preview::<String>(&old_ticket, Ok("stale notes".into()));
        assert_eq!(outcome, PreviewOutcome::Stale);
        assert_eq!(after, selection);
        assert_eq!(after.preview_content(), "");
    }

    #[test]
    fn superseded_request_loses_to_latest() {
        let selection = SelectionController::new().select_file(notes());
        let (selection, first) = selection.begin_preview().unwrap();
        let (selection, second) = selection.begin_preview().unwrap();
        assert!(second.generation() > first.generation());

        let (selection, outcome) = selection.finish_preview::<String>(&second, Ok("new".into()));
        assert_eq!(outcome, PreviewOutcome::Applied);
        let (selection, outcome) = selection.finish_preview::<String>(&first, Ok("old".into()));
        assert_eq!(outcome, PreviewOutcome::Stale);
        assert_eq!(selection.preview_content(), "new");
    }

    #[test]
    fn preview_requires_selection() {
        let err = SelectionController::new().begin_preview().unwrap_err();
        assert!(matches!(err, CoreError::NoSelection));
    }

    #[test]
    fn excluded_3d_file_cannot_be_previewed() {
        let selection = SelectionController::new().select_file(model());
        assert_eq!(
            selection.preview_eligibility(),
            Some(PreviewEligibility::Excluded3d(
                crate::kinds::ExcludedExtension::Stl
            ))
        );
        assert_eq!(selection.preview_text(), Some(PREVIEW_UNAVAILABLE_3D));
        let err = selection.begin_preview().unwrap_err();
        assert!(matches!(err, CoreError::PreviewUnavailable(name) if name == "model.stl"));
    }

    #[test]
    fn excluded_3d_file_can_still_be_downloaded() {
        let selection = SelectionController::new().select_file(model());
        let request = selection.begin_download().unwrap();
        assert_eq!(
            request,
            DownloadRequest {
                location: "/a/model.stl".to_string(),
                file_name: "model.stl".to_string(),
            }
        );
    }

    #[test]
    fn uppercase_stl_is_previewable() {
        let record = FileRecord::new("u4", "part.STL", "/a/part.STL");
        let selection = SelectionController::new().select_file(record);
        assert!(selection.begin_preview().is_ok());
        assert_eq!(selection.preview_text(), Some(""));
    }

    #[test]
    fn download_without_selection_is_rejected() {
        let err = SelectionController::new().begin_download().unwrap_err();
        assert!(matches!(err, CoreError::NoSelection));
    }

    #[test]
    fn ticket_carries_location() {
        let selection = SelectionController::new().select_file(notes());
        let (_, ticket) = selection.begin_preview().unwrap();
        assert_eq!(ticket.location(), "/a/notes.txt");
    }
}
