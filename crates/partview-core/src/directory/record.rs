//! A single previewable / downloadable file.

use serde::{Deserialize, Serialize};

/// A file listed under a leaf-group key.
///
/// `uuid` is globally unique and doubles as the file's tree-node identity.
/// `location` is opaque to the client; it is only echoed back to the
/// backend when fetching a preview or a download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub uuid: String,
    pub name: String,
    pub location: String,
    /// Backend file type tag (e.g. `"cad"`), when present.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

impl FileRecord {
    pub fn new(
        uuid: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            location: location.into(),
            file_type: None,
        }
    }

    /// Returns `true` when both records identify the same file.
    pub fn same_file(&self, other: &FileRecord) -> bool {
        self.uuid == other.uuid
    }
}
