//! Unified action system for partview.
//!
//! Every user-triggerable action is represented by the [`Action`] enum.
//! [`ActionRegistry`] provides metadata (id, name, description, category)
//! used to resolve keymap files and to build the help popup.

/// Every user-triggerable action in partview.
///
/// Variants carry no parameters; context is determined at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Tree navigation
    CursorUp,
    CursorDown,
    CursorTop,
    CursorBottom,
    Expand,
    Collapse,
    Activate,
    ExpandAll,
    CollapseAll,
    // File
    Preview,
    Download,
    PreviewScrollDown,
    PreviewScrollUp,
    // System
    Help,
    Quit,
}

/// Broad category for grouping actions in the help popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    File,
    System,
}

impl ActionCategory {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::File => "File",
            Self::System => "System",
        }
    }
}

/// Metadata for a single action.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub action: Action,
    /// Snake-case identifier used in `keymap.toml` (e.g. `"cursor_up"`).
    pub id: &'static str,
    /// Human-readable name (e.g. `"Cursor Up"`).
    pub name: &'static str,
    pub description: &'static str,
    pub category: ActionCategory,
}

/// Registry of all available actions.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    descriptors: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    /// Builds the registry containing every known action.
    pub fn new() -> Self {
        let descriptors = vec![
            ActionDescriptor {
                action: Action::CursorUp,
                id: "cursor_up",
                name: "Cursor Up",
                description: "Move cursor up one row",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorDown,
                id: "cursor_down",
                name: "Cursor Down",
                description: "Move cursor down one row",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorTop,
                id: "go_first",
                name: "Go to First",
                description: "Jump to the first row",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorBottom,
                id: "go_last",
                name: "Go to Last",
                description: "Jump to the last row",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::Expand,
                id: "expand",
                name: "Expand",
                description: "Expand the node under the cursor",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::Collapse,
                id: "collapse",
                name: "Collapse",
                description: "Collapse the node, or jump to its parent",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::Activate,
                id: "activate",
                name: "Select / Toggle",
                description: "Select a file, or toggle a folder",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::ExpandAll,
                id: "expand_all",
                name: "Expand All",
                description: "Expand every folder",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CollapseAll,
                id: "collapse_all",
                name: "Collapse All",
                description: "Collapse every folder",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::Preview,
                id: "preview",
                name: "Preview",
                description: "Fetch a text preview of the selected file",
                category: ActionCategory::File,
            },
            ActionDescriptor {
                action: Action::Download,
                id: "download",
                name: "Download",
                description: "Download the selected file",
                category: ActionCategory::File,
            },
            ActionDescriptor {
                action: Action::PreviewScrollDown,
                id: "preview_scroll_down",
                name: "Scroll Preview Down",
                description: "Scroll the preview pane down",
                category: ActionCategory::File,
            },
            ActionDescriptor {
                action: Action::PreviewScrollUp,
                id: "preview_scroll_up",
                name: "Scroll Preview Up",
                description: "Scroll the preview pane up",
                category: ActionCategory::File,
            },
            ActionDescriptor {
                action: Action::Help,
                id: "help",
                name: "Help",
                description: "Show key bindings",
                category: ActionCategory::System,
            },
            ActionDescriptor {
                action: Action::Quit,
                id: "quit",
                name: "Quit",
                description: "Exit partview",
                category: ActionCategory::System,
            },
        ];
        Self { descriptors }
    }

    /// Returns every descriptor, in display order.
    pub fn all(&self) -> &[ActionDescriptor] {
        &self.descriptors
    }

    /// Looks up an action by its keymap identifier.
    pub fn find_by_id(&self, id: &str) -> Option<Action> {
        self.descriptors
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.action)
    }

    pub fn descriptor_for(&self, action: Action) -> Option<&ActionDescriptor> {
        self.descriptors.iter().find(|d| d.action == action)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
