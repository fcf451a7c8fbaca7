//! Navigation logic for partview.
//!
//! [`tree_view::TreeView`] tracks which tree nodes are expanded and where
//! the cursor sits among the visible rows.

pub mod tree_view;
