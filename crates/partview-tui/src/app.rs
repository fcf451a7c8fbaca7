use std::path::PathBuf;

use partview_core::action::{Action, ActionRegistry};
use partview_core::config::keymap::Keymap;
use partview_core::config::settings::Config;
use partview_core::config::theme::Theme;
use partview_core::event::{Command, Event};
use partview_core::nav::tree_view::TreeView;
use partview_core::selection::{PreviewOutcome, SelectionController, NO_SELECTION_FOR_DOWNLOAD};
use partview_core::tree::{build_root, TreeNode, TreeNodeKind};
use partview_core::CoreError;

/// Application mode. Determines how input is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Help,
    /// Blocking message that must be dismissed before anything else.
    Alert(String),
}

/// Whether the directory description has arrived.
#[derive(Debug, Clone)]
pub enum DirectoryState {
    /// Waiting for the backend. A failed fetch also stays here.
    Loading,
    Ready(Vec<TreeNode>),
}

/// Returns the configuration directory path.
///
/// Prefers `./config/` when it exists (development), else `~/.config/partview/`.
pub fn config_dir() -> PathBuf {
    let local = PathBuf::from("config");
    if local.is_dir() {
        return local;
    }
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("partview")
}

/// Top-level application state. Immutable transitions via `with_*` methods.
#[derive(Debug)]
pub struct App {
    mode: AppMode,
    directory: DirectoryState,
    tree_view: TreeView,
    selection: SelectionController,
    /// First visible line of the preview text.
    preview_scroll: usize,
    should_quit: bool,
    status_message: Option<String>,
    keymap: Keymap,
    action_registry: ActionRegistry,
    theme: Theme,
    config: Config,
}

impl App {
    pub fn new(config: Config, keymap: Keymap, theme: Theme) -> Self {
        Self {
            mode: AppMode::Normal,
            directory: DirectoryState::Loading,
            tree_view: TreeView::new(),
            selection: SelectionController::new(),
            preview_scroll: 0,
            should_quit: false,
            status_message: None,
            keymap,
            action_registry: ActionRegistry::new(),
            theme,
            config,
        }
    }

    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    pub fn directory(&self) -> &DirectoryState {
        &self.directory
    }

    /// The built tree, or an empty forest while loading.
    pub fn roots(&self) -> &[TreeNode] {
        match &self.directory {
            DirectoryState::Loading => &[],
            DirectoryState::Ready(roots) => roots,
        }
    }

    pub fn tree_view(&self) -> &TreeView {
        &self.tree_view
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn preview_scroll(&self) -> usize {
        self.preview_scroll
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn action_registry(&self) -> &ActionRegistry {
        &self.action_registry
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn with_mode(self, mode: AppMode) -> Self {
        Self { mode, ..self }
    }

    /// Mark the app for quitting.
    pub fn with_quit(self) -> Self {
        Self {
            should_quit: true,
            ..self
        }
    }

    /// Set a status message.
    pub fn with_status(self, msg: String) -> Self {
        Self {
            status_message: Some(msg),
            ..self
        }
    }

    /// Clear the status message.
    pub fn with_clear_status(self) -> Self {
        Self {
            status_message: None,
            ..self
        }
    }

    pub fn with_tree_view(self, tree_view: TreeView) -> Self {
        Self { tree_view, ..self }
    }

    /// Replaces the selection. The preview scroll resets whenever the
    /// preview it scrolls over changes.
    pub fn with_selection(self, selection: SelectionController) -> Self {
        let preview_scroll = if selection.generation() == self.selection.generation() {
            self.preview_scroll
        } else {
            0
        };
        Self {
            selection,
            preview_scroll,
            ..self
        }
    }

    /// Installs a freshly built tree with everything collapsed.
    pub fn with_directory(self, roots: Vec<TreeNode>) -> Self {
        Self {
            directory: DirectoryState::Ready(roots),
            tree_view: TreeView::new(),
            ..self
        }
    }

    /// Applies `action`, returning the new state and any backend work it needs.
    pub fn dispatch(self, action: Action) -> (Self, Option<Command>) {
        let view = self.tree_view.clone();
        match action {
            Action::CursorUp => (self.with_tree_view(view.move_up()), None),
            Action::CursorDown => {
                let view = view.move_down(self.roots());
                (self.with_tree_view(view), None)
            }
            Action::CursorTop => (self.with_tree_view(view.go_to_first()), None),
            Action::CursorBottom => {
                let view = view.go_to_last(self.roots());
                (self.with_tree_view(view), None)
            }
            Action::Expand => {
                let view = view.expand(self.roots());
                (self.with_tree_view(view), None)
            }
            Action::Collapse => {
                let view = view.collapse(self.roots());
                (self.with_tree_view(view), None)
            }
            Action::ExpandAll => {
                let view = view.expand_all(self.roots());
                (self.with_tree_view(view), None)
            }
            Action::CollapseAll => {
                let view = view.collapse_all(self.roots());
                (self.with_tree_view(view), None)
            }
            Action::Activate => (self.activate(), None),
            Action::Preview => self.request_preview(),
            Action::Download => self.request_download(),
            Action::PreviewScrollDown => {
                let max = self.preview_line_count().saturating_sub(1);
                let preview_scroll = (self.preview_scroll + 1).min(max);
                (
                    Self {
                        preview_scroll,
                        ..self
                    },
                    None,
                )
            }
            Action::PreviewScrollUp => {
                let preview_scroll = self.preview_scroll.saturating_sub(1);
                (
                    Self {
                        preview_scroll,
                        ..self
                    },
                    None,
                )
            }
            Action::Help => (self.with_mode(AppMode::Help), None),
            Action::Quit => (self.with_quit(), None),
        }
    }

    /// Selects the file under the cursor, or toggles a folder.
    fn activate(self) -> Self {
        let Some(node) = self.tree_view.current(self.roots()) else {
            return self;
        };
        match &node.kind {
            TreeNodeKind::File(record) => {
                let selection = self.selection.select_file(record.clone());
                self.with_selection(selection)
            }
            TreeNodeKind::Branch | TreeNodeKind::Group(_) => {
                let view = self.tree_view.clone().toggle(self.roots());
                self.with_tree_view(view)
            }
            TreeNodeKind::Label => self,
        }
    }

    fn request_preview(self) -> (Self, Option<Command>) {
        match self.selection.begin_preview() {
            Ok((selection, ticket)) => {
                let app = self
                    .with_selection(selection)
                    .with_status("Loading preview...".to_string());
                (app, Some(Command::FetchPreview(ticket)))
            }
            Err(CoreError::NoSelection) => (self.with_status("No file selected".to_string()), None),
            Err(e) => (self.with_status(capitalize(&e.to_string())), None),
        }
    }

    fn request_download(self) -> (Self, Option<Command>) {
        match self.selection.begin_download() {
            Ok(request) => {
                let app = self.with_status(format!("Downloading {}...", request.file_name));
                (app, Some(Command::Download(request)))
            }
            Err(_) => (
                self.with_mode(AppMode::Alert(NO_SELECTION_FOR_DOWNLOAD.to_string())),
                None,
            ),
        }
    }

    /// Folds the result of background work into the state.
    pub fn handle_event(self, event: Event) -> Self {
        match event {
            Event::DirectoryLoaded(directory) => {
                let roots = build_root(&directory);
                let files = directory.file_count();
                tracing::info!(roots = roots.len(), files, "directory loaded");
                self.with_directory(roots)
                    .with_status(format!("{files} files"))
            }
            Event::DirectoryFailed { error } => {
                tracing::error!("error fetching directory: {error}");
                self
            }
            Event::PreviewFinished { ticket, result } => {
                let (selection, outcome) = self.selection.finish_preview(&ticket, result);
                match outcome {
                    PreviewOutcome::Stale => self,
                    PreviewOutcome::Applied | PreviewOutcome::Failed => {
                        self.with_selection(selection).with_clear_status()
                    }
                }
            }
            Event::DownloadSaved { path } => {
                self.with_status(format!("Saved {}", path.display()))
            }
            Event::DownloadFailed { file_name, error } => {
                tracing::warn!(file_name, "download failed: {error}");
                self.with_status(format!("Download of {file_name} failed: {error}"))
            }
        }
    }

    fn preview_line_count(&self) -> usize {
        self.selection
            .preview_text()
            .map(|text| text.lines().count())
            .unwrap_or(0)
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partview_core::directory::{DirectoryNode, FileRecord};
    use partview_core::selection::{PreviewTicket, SelectionPhase};
    use partview_core::PREVIEW_UNAVAILABLE_3D;
    use serde_json::json;

    fn new_app() -> App {
        App::new(Config::default(), Keymap::default(), Theme::default())
    }

    fn loaded_app() -> App {
        let directory = DirectoryNode::decode(json!({
            "CustomerA": {
                "Form": [
                    {"uuid": "u1", "name": "quote.pdf", "location": "/a/quote.pdf"},
                    {"uuid": "u2", "name": "notes.txt", "location": "/a/notes.txt"}
                ],
                "CAD": [
                    {"uuid": "u3", "name": "model.stl", "location": "/a/model.stl"}
                ]
            },
            "version": 3
        }))
        .unwrap();
        new_app().handle_event(Event::DirectoryLoaded(directory))
    }

    fn run(app: App, actions: &[Action]) -> (App, Vec<Command>) {
        let mut commands = Vec::new();
        let mut app = app;
        for action in actions {
            let (next, command) = app.dispatch(*action);
            app = next;
            commands.extend(command);
        }
        (app, commands)
    }

    fn ticket(command: Option<&Command>) -> PreviewTicket {
        match command {
            Some(Command::FetchPreview(ticket)) => ticket.clone(),
            other => panic!("expected a preview command, got {other:?}"),
        }
    }

    // Rows after expanding everything:
    // 0 CustomerA, 1 Form, 2 quote.pdf, 3 notes.txt, 4 CAD, 5 model.stl, 6 version
    fn expanded() -> App {
        run(loaded_app(), &[Action::ExpandAll]).0
    }

    fn select_row(app: App, row: usize) -> App {
        let view = app.tree_view().clone().with_cursor(row, app.roots());
        app.with_tree_view(view).dispatch(Action::Activate).0
    }

    // --- Creation ---

    #[test]
    fn app_new_starts_loading_in_normal_mode() {
        let app = new_app();
        assert_eq!(app.mode(), &AppMode::Normal);
        assert!(matches!(app.directory(), DirectoryState::Loading));
        assert!(app.roots().is_empty());
        assert!(!app.should_quit());
        assert!(app.status_message().is_none());
    }

    #[test]
    fn navigation_while_loading_is_noop() {
        let (app, commands) = run(
            new_app(),
            &[Action::CursorDown, Action::Expand, Action::Activate],
        );
        assert_eq!(app.tree_view().cursor(), 0);
        assert!(commands.is_empty());
    }

    // --- Directory events ---

    #[test]
    fn directory_loaded_builds_collapsed_tree() {
        let app = loaded_app();
        assert!(matches!(app.directory(), DirectoryState::Ready(_)));
        let labels: Vec<&str> = app.roots().iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["CustomerA", "version"]);
        assert_eq!(app.tree_view().visible_rows(app.roots()).len(), 2);
        assert_eq!(app.status_message(), Some("3 files"));
    }

    #[test]
    fn directory_failure_keeps_loading() {
        let app = new_app().handle_event(Event::DirectoryFailed {
            error: "unexpected status 500".to_string(),
        });
        assert!(matches!(app.directory(), DirectoryState::Loading));
        assert!(app.status_message().is_none());
    }

    // --- Activation ---

    #[test]
    fn activating_branch_toggles_it() {
        let (app, _) = run(loaded_app(), &[Action::Activate]);
        assert_eq!(app.tree_view().visible_rows(app.roots()).len(), 4);
        let (app, _) = run(app, &[Action::Activate]);
        assert_eq!(app.tree_view().visible_rows(app.roots()).len(), 2);
    }

    #[test]
    fn activating_file_selects_it_with_empty_preview() {
        let app = select_row(expanded(), 2);
        let selected = app.selection().selected().unwrap();
        assert_eq!(selected.uuid, "u1");
        assert_eq!(selected.name, "quote.pdf");
        assert_eq!(app.selection().phase(), SelectionPhase::SelectedNoPreview);
        assert_eq!(app.selection().preview_content(), "");
    }

    #[test]
    fn activating_label_does_nothing() {
        let app = select_row(expanded(), 6);
        assert!(app.selection().selected().is_none());
        assert_eq!(app.tree_view().visible_rows(app.roots()).len(), 7);
    }

    // --- Preview ---

    #[test]
    fn preview_round_trip_applies_content() {
        let app = select_row(expanded(), 3);
        let (app, command) = app.dispatch(Action::Preview);
        let ticket = ticket(command.as_ref());
        assert_eq!(ticket.location(), "/a/notes.txt");
        assert!(app.selection().is_loading());

        let app = app.handle_event(Event::PreviewFinished {
            ticket,
            result: Ok("hello".to_string()),
        });
        assert_eq!(app.selection().preview_content(), "hello");
        assert_eq!(app.selection().phase(), SelectionPhase::SelectedPreviewLoaded);
        assert!(app.status_message().is_none());
    }

    #[test]
    fn preview_failure_for_new_selection_clears_content() {
        let app = select_row(expanded(), 3);
        let (app, command) = app.dispatch(Action::Preview);
        let app = app.handle_event(Event::PreviewFinished {
            ticket: ticket(command.as_ref()),
            result: Ok("hello".to_string()),
        });

        let app = select_row(app, 2);
        assert_eq!(app.selection().preview_content(), "");
        let (app, command) = app.dispatch(Action::Preview);
        let app = app.handle_event(Event::PreviewFinished {
            ticket: ticket(command.as_ref()),
            result: Err("unexpected status 500".to_string()),
        });
        assert_eq!(app.selection().preview_content(), "");
        assert_eq!(app.selection().phase(), SelectionPhase::SelectedNoPreview);
    }

    #[test]
    fn late_response_for_old_selection_is_ignored() {
        let app = select_row(expanded(), 3);
        let (app, command) = app.dispatch(Action::Preview);
        let stale = ticket(command.as_ref());

        let app = select_row(app, 2);
        let app = app.handle_event(Event::PreviewFinished {
            ticket: stale,
            result: Ok("notes body".to_string()),
        });
        assert_eq!(app.selection().selected().unwrap().uuid, "u1");
        assert_eq!(app.selection().preview_content(), "");
    }

    #[test]
    fn preview_of_3d_file_is_refused() {
        let app = select_row(expanded(), 5);
        assert_eq!(app.selection().preview_text(), Some(PREVIEW_UNAVAILABLE_3D));

        let (app, command) = app.dispatch(Action::Preview);
        assert!(command.is_none());
        assert_eq!(
            app.status_message(),
            Some("Preview unavailable for model.stl")
        );
    }

    #[test]
    fn preview_without_selection_is_refused() {
        let (app, command) = loaded_app().dispatch(Action::Preview);
        assert!(command.is_none());
        assert_eq!(app.status_message(), Some("No file selected"));
    }

    #[test]
    fn preview_scroll_is_clamped_and_reset_on_selection() {
        let app = select_row(expanded(), 3);
        let (app, command) = app.dispatch(Action::Preview);
        let app = app.handle_event(Event::PreviewFinished {
            ticket: ticket(command.as_ref()),
            result: Ok("one\ntwo\nthree".to_string()),
        });

        let (app, _) = run(
            app,
            &[
                Action::PreviewScrollDown,
                Action::PreviewScrollDown,
                Action::PreviewScrollDown,
            ],
        );
        assert_eq!(app.preview_scroll(), 2);
        let (app, _) = run(app, &[Action::PreviewScrollUp]);
        assert_eq!(app.preview_scroll(), 1);

        let app = select_row(app, 2);
        assert_eq!(app.preview_scroll(), 0);
    }

    // --- Download ---

    #[test]
    fn download_without_selection_alerts_and_issues_nothing() {
        let (app, command) = loaded_app().dispatch(Action::Download);
        assert!(command.is_none());
        assert_eq!(
            app.mode(),
            &AppMode::Alert("No file selected for download.".to_string())
        );
    }

    #[test]
    fn download_of_3d_file_is_allowed() {
        let app = select_row(expanded(), 5);
        let (app, command) = app.dispatch(Action::Download);
        match command {
            Some(Command::Download(request)) => {
                assert_eq!(request.location, "/a/model.stl");
                assert_eq!(request.file_name, "model.stl");
            }
            other => panic!("expected a download command, got {other:?}"),
        }
        assert_eq!(app.status_message(), Some("Downloading model.stl..."));
    }

    #[test]
    fn download_events_update_status() {
        let app = new_app().handle_event(Event::DownloadSaved {
            path: PathBuf::from("/tmp/quote.pdf"),
        });
        assert_eq!(app.status_message(), Some("Saved /tmp/quote.pdf"));

        let app = app.handle_event(Event::DownloadFailed {
            file_name: "quote.pdf".to_string(),
            error: "unexpected status 404".to_string(),
        });
        assert_eq!(
            app.status_message(),
            Some("Download of quote.pdf failed: unexpected status 404")
        );
    }

    #[test]
    fn download_does_not_touch_selection() {
        let app = select_row(expanded(), 2);
        let before = app.selection().clone();
        let (app, _) = app.dispatch(Action::Download);
        assert_eq!(app.selection(), &before);
    }

    // --- Modes ---

    #[test]
    fn help_and_quit() {
        let (app, _) = new_app().dispatch(Action::Help);
        assert_eq!(app.mode(), &AppMode::Help);
        let app = app.with_mode(AppMode::Normal);
        let (app, _) = app.dispatch(Action::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn selecting_same_record_twice_keeps_preview() {
        let app = select_row(expanded(), 3);
        let (app, command) = app.dispatch(Action::Preview);
        let app = app.handle_event(Event::PreviewFinished {
            ticket: ticket(command.as_ref()),
            result: Ok("hello".to_string()),
        });
        let app = select_row(app, 3);
        assert_eq!(app.selection().preview_content(), "hello");
        assert_eq!(
            app.selection().selected(),
            Some(&FileRecord::new("u2", "notes.txt", "/a/notes.txt"))
        );
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("preview unavailable"), "Preview unavailable");
        assert_eq!(capitalize(""), "");
    }
}
