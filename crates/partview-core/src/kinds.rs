//! Recognised key and extension sets.
//!
//! The directory decoder and the preview eligibility check both read from
//! these enums, so the set of leaf-group keys and the set of excluded 3D
//! extensions live in exactly one place.

/// Separator used to build qualified node identifiers.
pub const PATH_SEPARATOR: char = '/';

/// Placeholder shown in place of preview text for excluded 3D files.
pub const PREVIEW_UNAVAILABLE_3D: &str = "3D files are not available for preview";

/// A key whose array value holds file records and ends recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafGroupKind {
    Form,
    Cad,
    Scan,
}

impl LeafGroupKind {
    pub const ALL: [LeafGroupKind; 3] = [Self::Form, Self::Cad, Self::Scan];

    /// The exact key used by the backend.
    pub fn key(self) -> &'static str {
        match self {
            Self::Form => "Form",
            Self::Cad => "CAD",
            Self::Scan => "Scan",
        }
    }

    /// Looks up a leaf-group kind by its wire key. Case-sensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

/// File extensions that are never offered for text preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExcludedExtension {
    Stl,
    Step,
    Ply,
}

impl ExcludedExtension {
    pub const ALL: [ExcludedExtension; 3] = [Self::Stl, Self::Step, Self::Ply];

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Stl => ".stl",
            Self::Step => ".step",
            Self::Ply => ".ply",
        }
    }

    /// Returns the excluded extension `name` ends with, if any.
    ///
    /// The match is case-sensitive: `part.STL` is not excluded.
    pub fn matching(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ext| name.ends_with(ext.suffix()))
    }
}

/// Whether a file may be previewed as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewEligibility {
    Available,
    Excluded3d(ExcludedExtension),
}

impl PreviewEligibility {
    pub fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Derives preview eligibility from a file's display name.
pub fn preview_eligibility(name: &str) -> PreviewEligibility {
    match ExcludedExtension::matching(name) {
        Some(ext) => PreviewEligibility::Excluded3d(ext),
        None => PreviewEligibility::Available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_group_keys_match_backend() {
        assert_eq!(LeafGroupKind::Form.key(), "Form");
        assert_eq!(LeafGroupKind::Cad.key(), "CAD");
        assert_eq!(LeafGroupKind::Scan.key(), "Scan");
    }

    #[test]
    fn from_key_is_case_sensitive() {
        assert_eq!(LeafGroupKind::from_key("CAD"), Some(LeafGroupKind::Cad));
        assert_eq!(LeafGroupKind::from_key("Cad"), None);
        assert_eq!(LeafGroupKind::from_key("form"), None);
        assert_eq!(LeafGroupKind::from_key("Trials"), None);
    }

    #[test]
    fn lowercase_3d_extensions_are_excluded() {
        assert_eq!(
            preview_eligibility("model.stl"),
            PreviewEligibility::Excluded3d(ExcludedExtension::Stl)
        );
        assert_eq!(
            preview_eligibility("assembly.step"),
            PreviewEligibility::Excluded3d(ExcludedExtension::Step)
        );
        assert_eq!(
            preview_eligibility("cloud.ply"),
            PreviewEligibility::Excluded3d(ExcludedExtension::Ply)
        );
    }

    // Observed behaviour: uppercase extensions slip through the exclusion.
    #[test]
    fn uppercase_extension_is_not_excluded() {
        assert_eq!(preview_eligibility("part.STL"), PreviewEligibility::Available);
        assert!(preview_eligibility("part.Step").is_available());
    }

    #[test]
    fn text_files_are_available() {
        assert!(preview_eligibility("notes.txt").is_available());
        assert!(preview_eligibility("quote.pdf").is_available());
        assert!(preview_eligibility("stl").is_available());
    }
}
