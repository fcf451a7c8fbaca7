//! Nerd Font icon mapping for tree nodes.
//!
//! Folders and leaf groups get fixed glyphs; files are mapped by extension.

use partview_core::kinds::LeafGroupKind;
use partview_core::tree::{TreeNode, TreeNodeKind};

/// Returns a Nerd Font icon for the given tree node.
pub fn icon_for_node(node: &TreeNode, is_expanded: bool) -> &'static str {
    match &node.kind {
        TreeNodeKind::Branch if is_expanded => "\u{f07c} ", // folder open
        TreeNodeKind::Branch => "\u{f07b} ",                // folder
        TreeNodeKind::Group(kind) => icon_for_group(*kind),
        TreeNodeKind::File(record) => icon_for_file_name(&record.name),
        TreeNodeKind::Label => "\u{f02b} ", // tag
    }
}

/// ASCII marker used when icons are disabled.
pub fn plain_marker(node: &TreeNode) -> &'static str {
    match node.kind {
        TreeNodeKind::Branch | TreeNodeKind::Group(_) => "/",
        TreeNodeKind::File(_) => " ",
        TreeNodeKind::Label => "-",
    }
}

fn icon_for_group(kind: LeafGroupKind) -> &'static str {
    match kind {
        LeafGroupKind::Form => "\u{f0f6} ", // file text
        LeafGroupKind::Cad => "\u{f1b2} ",  // cube
        LeafGroupKind::Scan => "\u{f03e} ", // image
    }
}

fn icon_for_file_name(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or("");
    icon_for_extension(ext)
}

fn icon_for_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        // Documents
        "pdf" => "\u{f1c1} ",
        "doc" | "docx" | "odt" | "rtf" => "\u{f1c2} ",
        "xls" | "xlsx" | "ods" | "csv" => "\u{f1c3} ",
        "txt" | "log" => "\u{f15c} ",
        "md" | "markdown" => "\u{e73e} ",
        "json" | "xml" | "yaml" | "yml" | "toml" => "\u{e60b} ",

        // 3D and CAD
        "stl" | "step" | "stp" | "ply" | "obj" | "iges" | "igs" | "3mf" => "\u{f1b2} ",
        "dxf" | "dwg" => "\u{f0e8} ",

        // Images
        "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "tif" | "tiff" | "svg" => "\u{f1c5} ",

        // Archives
        "zip" | "tar" | "gz" | "7z" | "rar" => "\u{f1c6} ",

        _ => "\u{f15b} ", // generic file
    }
}
