//! partview core library: UI-agnostic file browser logic.
//!
//! `partview-core` decodes the backend's directory description, derives a
//! display tree from it, and tracks selection and preview state. It does
//! no rendering so the TUI (`partview-tui`) or any other frontend can
//! share the same logic.
//!
//! # Modules
//!
//! - [`directory`]: Decoded directory description: [`DirectoryNode`], [`FileRecord`].
//! - [`tree`]: Display tree derived from the directory: [`TreeNode`], [`build_root`].
//! - [`kinds`]: Leaf group kinds and preview eligibility rules.
//! - [`selection`]: Selected file and preview lifecycle: [`SelectionController`].
//! - [`nav`]: Expansion and cursor state over the display tree.
//! - [`remote`]: HTTP client for the directory, preview and download endpoints.
//! - [`config`]: User-facing configuration (TOML-based settings, keymaps, themes).
//! - [`event`]: Command and event types for state ↔ runtime communication.
//! - [`error`]: Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod action;
pub mod config;
pub mod directory;
pub mod error;
pub mod event;
pub mod kinds;
pub mod nav;
pub mod remote;
pub mod selection;
pub mod tree;

pub use error::{CoreError, CoreResult};
pub use event::{Command, Event};

pub use directory::{DirectoryEntry, DirectoryNode, FileRecord};
pub use kinds::{preview_eligibility, LeafGroupKind, PreviewEligibility, PREVIEW_UNAVAILABLE_3D};
pub use nav::tree_view::{TreeView, VisibleRow};
pub use selection::{
    DownloadRequest, PreviewOutcome, PreviewTicket, SelectionController, SelectionPhase,
    NO_SELECTION_FOR_DOWNLOAD,
};
pub use tree::{build_root, build_tree, NodeId, TreeNode, TreeNodeKind};

pub use action::{Action, ActionCategory, ActionDescriptor, ActionRegistry};
pub use config::keymap::Keymap;
pub use config::settings::Config;
pub use config::theme::{parse_color, Theme};
pub use remote::http::{FileService, HttpError, HttpFileService};
