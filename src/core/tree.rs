//! Repository file tree assembled from a flat listing.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`], so building,
//! walking and dropping a tree never recurses regardless of its depth.
//!
//! # Ordering
//!
//! Children of every directory are ordered directories first, then files,
//! each group by byte-wise ascending name. Names are unique within a parent.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::ops::Index;

use crate::models::{EntryKind, TreeEntry};

/// Index of a node inside its [`FileTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The repository root.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A file or directory in the assembled tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    pub name: String,
    pub kind: EntryKind,
    /// Listing entry; `None` for the root and for directories implied by file paths
    pub entry: Option<TreeEntry>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TreeNode {
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered child ids.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A row produced by tree traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeRow {
    pub id: NodeId,
    /// 0 for children of the root
    pub depth: usize,
}

/// Hierarchical view of a repository listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileTree {
    nodes: Vec<TreeNode>,
    /// (parent, name) -> child
    links: HashMap<(NodeId, String), NodeId>,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl FileTree {
    /// Tree containing only the root directory.
    pub fn empty() -> Self {
        Self {
            nodes: vec![TreeNode {
                name: String::new(),
                kind: EntryKind::Directory,
                entry: None,
                parent: None,
                children: Vec::new(),
            }],
            links: HashMap::new(),
        }
    }

    /// Assemble a tree from a flat listing in any order.
    ///
    /// Directories implied by file paths are created at first reference.
    /// Empty path segments are ignored. When two file entries share a path
    /// the later one wins; an entry conflicting with a node of the other
    /// kind is dropped.
    pub fn build(entries: &[TreeEntry]) -> Self {
        let mut tree = Self::empty();
        for entry in entries {
            tree.insert(entry);
        }
        tree.sort_children();
        tree
    }

    fn insert(&mut self, entry: &TreeEntry) {
        let segments: Vec<&str> = entry.path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((leaf, parents)) = segments.split_last() else {
            log::warn!("Skipping listing entry with empty path");
            return;
        };

        let mut current = NodeId::ROOT;
        for segment in parents {
            current = match self.child(current, segment) {
                Some(id) if self[id].is_dir() => id,
                Some(_) => {
                    log::warn!("Listing conflict: '{}' blocked by an existing file", entry.path);
                    return;
                }
                None => self.push_node(current, segment, EntryKind::Directory, None),
            };
        }

        match self.child(current, leaf) {
            Some(id) if self[id].kind == entry.kind => {
                self.nodes[id.0].entry = Some(entry.clone());
            }
            Some(_) => {
                log::warn!("Listing conflict: '{}' listed as both file and directory", entry.path);
            }
            None => {
                self.push_node(current, leaf, entry.kind, Some(entry.clone()));
            }
        }
    }

    fn push_node(
        &mut self,
        parent: NodeId,
        name: &str,
        kind: EntryKind,
        entry: Option<TreeEntry>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            name: name.to_string(),
            kind,
            entry,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        self.links.insert((parent, name.to_string()), id);
        id
    }

    fn sort_children(&mut self) {
        for i in 0..self.nodes.len() {
            let mut children = std::mem::take(&mut self.nodes[i].children);
            children.sort_by(|a, b| presentation_order(&self.nodes[a.0], &self.nodes[b.0]));
            self.nodes[i].children = children;
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// Child of `parent` named `name`.
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.links.get(&(parent, name.to_string())).copied()
    }

    /// Look up a node by slash-delimited path. The empty path is the root.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(NodeId::ROOT, |current, segment| self.child(current, segment))
    }

    /// Full path of a node, rebuilt from its ancestors.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = self.get(id);
        while let Some(node) = current {
            let Some(parent) = node.parent else { break };
            names.push(node.name.as_str());
            current = self.get(parent);
        }
        names.reverse();
        names.join("/")
    }

    /// Ids of all ancestors of `id`, nearest first, excluding the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.get(id).and_then(|n| n.parent);
        while let Some(parent) = current.filter(|p| *p != NodeId::ROOT) {
            out.push(parent);
            current = self[parent].parent;
        }
        out
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn file_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.is_dir()).count()
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Pre-order traversal of every node below the root.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self, None)
    }

    /// Pre-order rows whose ancestors are all in `expanded`.
    ///
    /// This is what the navigation view renders: collapsed directories
    /// appear as a row but their contents do not.
    pub fn visible_rows(&self, expanded: &HashSet<NodeId>) -> Vec<TreeRow> {
        Walk::new(self, Some(expanded)).collect()
    }
}

impl Index<NodeId> for FileTree {
    type Output = TreeNode;

    fn index(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }
}

fn presentation_order(a: &TreeNode, b: &TreeNode) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| a.name.cmp(&b.name))
}

/// Explicit-stack pre-order iterator over a [`FileTree`].
pub struct Walk<'a> {
    tree: &'a FileTree,
    expanded: Option<&'a HashSet<NodeId>>,
    stack: Vec<TreeRow>,
}

impl<'a> Walk<'a> {
    fn new(tree: &'a FileTree, expanded: Option<&'a HashSet<NodeId>>) -> Self {
        let mut walk = Self {
            tree,
            expanded,
            stack: Vec::new(),
        };
        walk.push_children(NodeId::ROOT, 0);
        walk
    }

    fn push_children(&mut self, id: NodeId, depth: usize) {
        // Reversed so the first child is popped first
        for &child in self.tree[id].children.iter().rev() {
            self.stack.push(TreeRow { id: child, depth });
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = TreeRow;

    fn next(&mut self) -> Option<TreeRow> {
        let row = self.stack.pop()?;
        let descend = self.tree[row.id].is_dir()
            && self.expanded.is_none_or(|set| set.contains(&row.id));
        if descend {
            self.push_children(row.id, row.depth + 1);
        }
        Some(row)
    }
}
