//! Selection and expansion controller for the file tree
//!
//! Rendering never recurses over widgets. [`walk`] turns the nested
//! [`FileNode`] structure plus the open/closed state into flat rows, and the
//! UI draws those rows.
//!
//! Every folder *instance* owns one open flag, addressed by its child-index
//! path from the root. Two siblings with the same name therefore never share
//! state.

use crate::files::{FileIcon, FileNode, NodeKind};
use std::collections::HashSet;

/// Child-index path from the root to one node
pub type Address = Vec<usize>;

/// One visible line of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub address: Address,
    pub depth: usize,
    pub name: String,
    pub kind: NodeKind,
    pub icon: FileIcon,
    pub expanded: bool,
    pub selected: bool,
}

/// What a click on a node reports to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub path: Vec<String>,
    pub node: FileNode,
}

/// Open/closed flags plus the keyboard cursor
#[derive(Debug, Clone, Default)]
pub struct TreeState {
    open: HashSet<Address>,
    pub cursor: usize,
}

impl TreeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, address: &[usize]) -> bool {
        self.open.contains(address)
    }

    /// Number of folders currently open
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Click on the node at `address`.
    ///
    /// Folders flip their own flag; files leave every flag alone. Both report
    /// a selection path.
    pub fn activate(&mut self, roots: &[FileNode], address: &[usize]) -> Option<Activation> {
        let node = node_at(roots, address)?;
        if node.is_folder() {
            self.toggle(address);
        }
        Some(Activation {
            path: compose_selection_path(roots, address)?,
            node: node.clone(),
        })
    }

    fn toggle(&mut self, address: &[usize]) {
        if self.open.remove(address) {
            // Closing tears down the child rows, and their flags with them
            self.open
                .retain(|open| !(open.len() > address.len() && open.starts_with(address)));
        } else {
            self.open.insert(address.to_vec());
        }
    }

    pub fn cursor_down(&mut self, row_count: usize) {
        if self.cursor + 1 < row_count {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self, row_count: usize) {
        self.cursor = row_count.saturating_sub(1);
    }

    /// Keep the cursor on a real row after the row list shrank
    pub fn clamp_cursor(&mut self, row_count: usize) {
        if self.cursor >= row_count {
            self.cursor = row_count.saturating_sub(1);
        }
    }
}

/// Look up the node at `address`
pub fn node_at<'a>(roots: &'a [FileNode], address: &[usize]) -> Option<&'a FileNode> {
    let (first, rest) = address.split_first()?;
    let mut node = roots.get(*first)?;
    for idx in rest {
        node = node.children().get(*idx)?;
    }
    Some(node)
}

/// Build the selection path the way nested click handlers would.
///
/// The clicked node reports `[name]`. Each enclosing folder prepends its own
/// bare name as the report bubbles up, so the delivered value reads from the
/// root down to the clicked node.
pub fn compose_selection_path(roots: &[FileNode], address: &[usize]) -> Option<Vec<String>> {
    let mut chain = Vec::with_capacity(address.len());
    for depth in 1..=address.len() {
        chain.push(node_at(roots, &address[..depth])?);
    }

    let (clicked, ancestors) = chain.split_last()?;
    let mut path = vec![clicked.name().to_string()];
    for ancestor in ancestors.iter().rev() {
        let mut wrapped = vec![ancestor.name().to_string()];
        wrapped.append(&mut path);
        path = wrapped;
    }
    Some(path)
}

/// A row is highlighted when the joined selection equals its bare name.
///
/// Nested selections join to `a/b` and so never match a bare name; only
/// top-level nodes highlight reliably.
pub fn is_selected(selected_path: &[String], name: &str) -> bool {
    selected_path.join("/") == name
}

/// Flatten the visible part of the tree into rows, depth first
pub fn walk(roots: &[FileNode], state: &TreeState, selected_path: &[String]) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    let mut address = Vec::new();
    walk_into(roots, 0, &mut address, state, selected_path, &mut rows);
    rows
}

fn walk_into(
    nodes: &[FileNode],
    depth: usize,
    address: &mut Address,
    state: &TreeState,
    selected_path: &[String],
    rows: &mut Vec<TreeRow>,
) {
    for (idx, node) in nodes.iter().enumerate() {
        address.push(idx);
        let expanded = node.is_folder() && state.is_open(address);
        rows.push(TreeRow {
            address: address.clone(),
            depth,
            name: node.name().to_string(),
            kind: node.kind(),
            icon: node.icon(expanded),
            expanded,
            selected: is_selected(selected_path, node.name()),
        });
        if expanded {
            walk_into(node.children(), depth + 1, address, state, selected_path, rows);
        }
        address.pop();
    }
}
