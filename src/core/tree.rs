//! In-memory tree model for sprig.
//!
//! A [Tree] mirrors a subtree of the filesystem and is populated lazily: a directory's
//! children are listed only the first time it is selected. Children are owned by their parent,
//! nodes are addressed by [NodeId] index paths.
//!
//! Invariants held by every operation here:
//! - a node has children only when it is materialized
//! - an expanded node is always materialized
//! - a failed listing leaves the node exactly as it was

use crate::config::EntryOrder;
use crate::core::error::FsError;
use crate::core::formatter::Formatter;
use crate::core::fs::{DirEntryInfo, EntryKind, FileSystem};

use std::path::{Path, PathBuf};

/// How listings become children, taken from the `[general]` config section.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingOptions {
    pub show_hidden: bool,
    pub order: EntryOrder,
}

impl ListingOptions {
    fn formatter(&self) -> Formatter {
        Formatter::new(self.order, self.show_hidden)
    }
}

/// A single filesystem entry in the tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    label: String,
    path: PathBuf,
    kind: EntryKind,
    expanded: bool,
    materialized: bool,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(label: String, path: PathBuf, kind: EntryKind) -> Self {
        TreeNode {
            label,
            path,
            kind,
            expanded: false,
            materialized: false,
            children: Vec::new(),
        }
    }

    fn from_entry(parent: &Path, entry: &DirEntryInfo) -> Self {
        TreeNode::new(
            entry.name().to_string_lossy().into_owned(),
            parent.join(entry.name()),
            entry.kind(),
        )
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    #[inline]
    pub fn is_materialized(&self) -> bool {
        self.materialized
    }

    #[inline]
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Files are leaves. A directory is a leaf once it is known to be empty.
    pub fn is_leaf(&self) -> bool {
        match self.kind {
            EntryKind::File => true,
            EntryKind::Directory => self.materialized && self.children.is_empty(),
        }
    }

    /// Lists the directory and appends one child per entry.
    ///
    /// No-op when already materialized. On failure the node is left untouched.
    pub fn materialize_children(
        &mut self,
        fs: &dyn FileSystem,
        opts: &ListingOptions,
    ) -> Result<(), FsError> {
        if self.materialized {
            return Ok(());
        }
        let children = self.list_children(fs, opts)?;
        tracing::debug!(
            path = %self.path.display(),
            count = children.len(),
            "materialized directory"
        );
        self.children = children;
        self.materialized = true;
        Ok(())
    }

    /// Lists a materialized directory again.
    ///
    /// Children whose path and kind survive keep their state and subtree, new entries are
    /// added unmaterialized, vanished entries are dropped.
    pub fn refresh_children(
        &mut self,
        fs: &dyn FileSystem,
        opts: &ListingOptions,
    ) -> Result<(), FsError> {
        if !self.materialized {
            return self.materialize_children(fs, opts);
        }
        let fresh = self.list_children(fs, opts)?;
        let mut old = std::mem::take(&mut self.children);

        self.children = fresh
            .into_iter()
            .map(|node| {
                match old
                    .iter()
                    .position(|o| o.path == node.path && o.kind == node.kind)
                {
                    Some(idx) => old.swap_remove(idx),
                    None => node,
                }
            })
            .collect();
        tracing::debug!(path = %self.path.display(), "refreshed directory");
        Ok(())
    }

    fn list_children(
        &self,
        fs: &dyn FileSystem,
        opts: &ListingOptions,
    ) -> Result<Vec<TreeNode>, FsError> {
        let mut entries = fs.list_dir(&self.path).map_err(|source| FsError::List {
            path: self.path.clone(),
            source,
        })?;
        opts.formatter().filter_entries(&mut entries);
        Ok(entries
            .iter()
            .map(|e| TreeNode::from_entry(&self.path, e))
            .collect())
    }

    /// Flips `expanded`. Only valid on a materialized node.
    pub fn toggle_expansion(&mut self) {
        if self.check_materialized("toggle") {
            self.expanded = !self.expanded;
        }
    }

    pub fn expand(&mut self) {
        if self.check_materialized("expand") {
            self.expanded = true;
        }
    }

    pub fn collapse(&mut self) {
        self.expanded = false;
    }

    fn check_materialized(&self, op: &str) -> bool {
        debug_assert!(
            self.materialized,
            "{op} on unmaterialized node {}",
            self.path.display()
        );
        if !self.materialized {
            tracing::error!(path = %self.path.display(), op, "node is not materialized");
        }
        self.materialized
    }
}

/// Index path from the root to a node. The empty path is the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodeId(Vec<usize>);

impl NodeId {
    pub fn root() -> Self {
        NodeId(Vec::new())
    }

    pub fn child(&self, idx: usize) -> Self {
        let mut path = self.0.clone();
        path.push(idx);
        NodeId(path)
    }

    /// None for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(NodeId(rest.to_vec()))
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

/// A row of the flattened tree as shown by the tree pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    pub id: NodeId,
    pub depth: usize,
}

/// The whole browsed tree.
#[derive(Debug, Clone)]
pub struct Tree {
    root: TreeNode,
}

impl Tree {
    /// Creates a tree whose root label is the path as given.
    pub fn new(root_path: &Path) -> Self {
        let label = root_path.display().to_string();
        Tree {
            root: TreeNode::new(label, root_path.to_path_buf(), EntryKind::Directory),
        }
    }

    #[inline]
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn node(&self, id: &NodeId) -> Option<&TreeNode> {
        id.0.iter()
            .try_fold(&self.root, |node, &idx| node.children.get(idx))
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut TreeNode> {
        id.0.iter()
            .try_fold(&mut self.root, |node, &idx| node.children.get_mut(idx))
    }

    /// Depth-first flattening of every node reachable through expanded directories.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        Self::collect_rows(&self.root, NodeId::root(), &mut rows);
        rows
    }

    fn collect_rows(node: &TreeNode, id: NodeId, rows: &mut Vec<VisibleRow>) {
        let depth = id.depth();
        let expanded = node.expanded;
        rows.push(VisibleRow {
            id: id.clone(),
            depth,
        });
        if expanded {
            for (idx, child) in node.children.iter().enumerate() {
                Self::collect_rows(child, id.child(idx), rows);
            }
        }
    }
}
