//! Pure construction of the renderable tree.
//!
//! [`build_root`] turns a decoded [`DirectoryNode`] into plain
//! [`TreeNode`] values. Rendering and click handling live in the front
//! end; nothing here knows about either.

use std::fmt;

use crate::directory::{DirectoryEntry, DirectoryNode, FileRecord};
use crate::kinds::{LeafGroupKind, PATH_SEPARATOR};

/// Identity of a node within the whole tree.
///
/// Branch, group and label nodes use their qualified path (`/A/B`);
/// file nodes use the record's uuid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a tree node represents.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNodeKind {
    /// A nested mapping.
    Branch,
    /// The grouping node of a leaf-group array.
    Group(LeafGroupKind),
    /// A selectable file.
    File(FileRecord),
    /// An inert label for any other value.
    Label,
}

/// A renderable node.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: NodeId,
    pub label: String,
    pub kind: TreeNodeKind,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Returns `true` for file nodes, the only nodes that react to activation
    /// with a selection.
    pub fn is_file(&self) -> bool {
        matches!(self.kind, TreeNodeKind::File(_))
    }

    /// Returns `true` for nodes that can be expanded (branches and groups).
    pub fn is_container(&self) -> bool {
        matches!(self.kind, TreeNodeKind::Branch | TreeNodeKind::Group(_))
    }

    pub fn file(&self) -> Option<&FileRecord> {
        match &self.kind {
            TreeNodeKind::File(record) => Some(record),
            _ => None,
        }
    }

    /// Pre-order iterator over this node and all descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Finds the node with the given identity in this subtree.
    pub fn find(&self, id: &NodeId) -> Option<&TreeNode> {
        self.walk().find(|node| &node.id == id)
    }
}

/// Pre-order traversal produced by [`TreeNode::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Appends `key` to `path` with the path separator.
///
/// An empty `path` is the root, so root keys become `/key`.
pub fn qualify(path: &str, key: &str) -> String {
    format!("{path}{PATH_SEPARATOR}{key}")
}

/// Builds the whole forest for a decoded directory.
pub fn build_root(root: &DirectoryNode) -> Vec<TreeNode> {
    build_tree(root, "")
}

/// Builds the children of `node`, whose own qualified identifier is `path`.
pub fn build_tree(node: &DirectoryNode, path: &str) -> Vec<TreeNode> {
    node.entries()
        .iter()
        .map(|(key, entry)| build_entry(key, entry, path))
        .collect()
}

fn build_entry(key: &str, entry: &DirectoryEntry, path: &str) -> TreeNode {
    let id = qualify(path, key);
    match entry {
        DirectoryEntry::Branch(child) => TreeNode {
            children: build_tree(child, &id),
            id: NodeId(id),
            label: key.to_string(),
            kind: TreeNodeKind::Branch,
        },
        DirectoryEntry::LeafGroup { kind, records } => TreeNode {
            id: NodeId(id),
            label: key.to_string(),
            kind: TreeNodeKind::Group(*kind),
            children: records.iter().map(file_node).collect(),
        },
        DirectoryEntry::Label(_) => TreeNode {
            id: NodeId(id),
            label: key.to_string(),
            kind: TreeNodeKind::Label,
            children: Vec::new(),
        },
    }
}

fn file_node(record: &FileRecord) -> TreeNode {
    TreeNode {
        id: NodeId(record.uuid.clone()),
        label: record.name.clone(),
        kind: TreeNodeKind::File(record.clone()),
        children: Vec::new(),
    }
}

/// Searches a forest for a node.
pub fn find_in<'a>(roots: &'a [TreeNode], id: &NodeId) -> Option<&'a TreeNode> {
    roots.iter().find_map(|root| root.find(id))
}
