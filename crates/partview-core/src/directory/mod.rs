//! Directory description received from the backend.
//!
//! The backend describes the browsable hierarchy as nested JSON objects
//! that terminate in arrays of file records. This module decodes that
//! JSON once, at the ingestion boundary, into the closed
//! [`DirectoryEntry`] union so nothing downstream re-inspects JSON shapes.

pub mod node;
pub mod record;

pub use node::{DirectoryEntry, DirectoryNode};
pub use record::FileRecord;
