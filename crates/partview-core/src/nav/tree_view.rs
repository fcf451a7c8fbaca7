//! Expansion and cursor state over a built tree.
//!
//! [`TreeView`] never owns the tree; every method takes the forest it
//! navigates. Immutable: all state transitions return a new `TreeView`,
//! and the cursor is clamped to the visible rows.

use std::collections::HashSet;

use crate::tree::{NodeId, TreeNode};

/// A row currently visible in the tree panel.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow<'a> {
    pub node: &'a TreeNode,
    /// Nesting depth (0 = root).
    pub depth: usize,
    pub is_expanded: bool,
    /// Index of the parent row in the same visible list.
    pub parent: Option<usize>,
}

/// Which nodes are expanded and where the cursor sits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeView {
    expanded: HashSet<NodeId>,
    cursor: usize,
}

impl TreeView {
    /// Creates a view with everything collapsed and the cursor on row 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded.contains(id)
    }

    /// Flattens the forest into the rows that are currently visible.
    pub fn visible_rows<'a>(&self, roots: &'a [TreeNode]) -> Vec<VisibleRow<'a>> {
        let mut rows = Vec::new();
        for root in roots {
            self.push_rows(root, 0, None, &mut rows);
        }
        rows
    }

    fn push_rows<'a>(
        &self,
        node: &'a TreeNode,
        depth: usize,
        parent: Option<usize>,
        rows: &mut Vec<VisibleRow<'a>>,
    ) {
        let is_expanded = node.is_container() && self.expanded.contains(&node.id);
        let index = rows.len();
        rows.push(VisibleRow {
            node,
            depth,
            is_expanded,
            parent,
        });
        if is_expanded {
            for child in &node.children {
                self.push_rows(child, depth + 1, Some(index), rows);
            }
        }
    }

    /// Returns the node under the cursor.
    pub fn current<'a>(&self, roots: &'a [TreeNode]) -> Option<&'a TreeNode> {
        self.visible_rows(roots).get(self.cursor).map(|row| row.node)
    }

    /// Moves the cursor up by one. No-op at the top.
    pub fn move_up(self) -> Self {
        Self {
            cursor: self.cursor.saturating_sub(1),
            ..self
        }
    }

    /// Moves the cursor down by one. No-op at the bottom.
    pub fn move_down(self, roots: &[TreeNode]) -> Self {
        let cursor = self.cursor + 1;
        self.with_cursor(cursor, roots)
    }

    pub fn go_to_first(self) -> Self {
        Self { cursor: 0, ..self }
    }

    pub fn go_to_last(self, roots: &[TreeNode]) -> Self {
        let last = self.visible_rows(roots).len().saturating_sub(1);
        Self {
            cursor: last,
            ..self
        }
    }

    /// Moves the cursor to `index`, clamped to the visible rows.
    pub fn with_cursor(self, index: usize, roots: &[TreeNode]) -> Self {
        let max = self.visible_rows(roots).len().saturating_sub(1);
        Self {
            cursor: index.min(max),
            ..self
        }
    }

    /// Expands the node under the cursor. Leaves are ignored.
    pub fn expand(self, roots: &[TreeNode]) -> Self {
        let Some(node) = self.current(roots) else {
            return self;
        };
        if !node.is_container() {
            return self;
        }
        let mut expanded = self.expanded;
        expanded.insert(node.id.clone());
        Self { expanded, ..self }
    }

    /// Collapses the node under the cursor.
    ///
    /// When the node is already collapsed (or is a leaf) the cursor moves
    /// to its parent row instead.
    pub fn collapse(self, roots: &[TreeNode]) -> Self {
        let rows = self.visible_rows(roots);
        let Some(row) = rows.get(self.cursor) else {
            return self;
        };
        if row.is_expanded {
            let id = row.node.id.clone();
            let mut expanded = self.expanded;
            expanded.remove(&id);
            return Self { expanded, ..self };
        }
        match row.parent {
            Some(parent) => Self {
                cursor: parent,
                ..self
            },
            None => self,
        }
    }

    /// Expands a collapsed container or collapses an expanded one.
    pub fn toggle(self, roots: &[TreeNode]) -> Self {
        let Some(node) = self.current(roots) else {
            return self;
        };
        if self.expanded.contains(&node.id) {
            let id = node.id.clone();
            let mut expanded = self.expanded;
            expanded.remove(&id);
            Self { expanded, ..self }
        } else {
            self.expand(roots)
        }
    }

    /// Expands every container in the forest, keeping the cursor on the same node.
    pub fn expand_all(self, roots: &[TreeNode]) -> Self {
        let current = self.current(roots).map(|node| node.id.clone());
        let expanded: HashSet<NodeId> = roots
            .iter()
            .flat_map(|root| root.walk())
            .filter(|node| node.is_container())
            .map(|node| node.id.clone())
            .collect();
        let view = Self {
            expanded,
            cursor: 0,
        };
        let cursor = current
            .and_then(|id| view.position_of(&id, roots))
            .unwrap_or(0);
        Self { cursor, ..view }
    }

    /// Collapses everything, moving the cursor onto the root that contained it.
    pub fn collapse_all(self, roots: &[TreeNode]) -> Self {
        let rows = self.visible_rows(roots);
        let mut index = self.cursor.min(rows.len().saturating_sub(1));
        while let Some(parent) = rows.get(index).and_then(|row| row.parent) {
            index = parent;
        }
        let root_position = rows
            .iter()
            .take(index)
            .filter(|row| row.depth == 0)
            .count();
        Self {
            expanded: HashSet::new(),
            cursor: root_position,
        }
    }

    /// Returns the visible row index of `id`, if it is visible.
    pub fn position_of(&self, id: &NodeId, roots: &[TreeNode]) -> Option<usize> {
        self.visible_rows(roots)
            .iter()
            .position(|row| &row.node.id == id)
    }
}
