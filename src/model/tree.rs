//! Provides the arena based merge tree.
//!
//! * [MergeTree] - Tree structure using the arena pattern, implementing
//!   [MergeTreeLike]
//! * [NodeIndex] as type used to index vertices in tree

use crate::model::tree_like::MergeTreeLike;
use crate::model::vertex::Vertex;
use std::fmt;

/// Index of a vertex in a tree (arena).
pub type NodeIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: NodeIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A merge tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [NodeIndex], so parents are plain back references and no ownership
/// cycles arise.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena.
/// - Index of root is maintained.
/// - No assumption on order of indices is maintained.
/// - Vertices may have any number of children; order is left to right.
/// - Heights are absolute and finite, larger meaning deeper.
///
/// # Construction
/// Add vertices bottom-up: leaves first, then internal vertices listing
/// their children, finally the root. Test validity with
/// [`MergeTree::is_valid()`].
///
/// # Example
/// ```
/// use merge_interleave::model::{MergeTree, MergeTreeLike};
///
/// let mut tree = MergeTree::new(3);
/// let a = tree.add_leaf(5.0);
/// let b = tree.add_leaf(4.0);
/// let u = tree.add_internal(vec![a, b], 2.0);
/// let c = tree.add_leaf(6.0);
/// let root = tree.add_root(vec![u, c], 0.0);
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.num_leaves(), 3);
/// assert_eq!(tree.parent(a), Some(u));
/// assert_eq!(tree.root(), root);
/// ```
#[derive(Debug, Clone)]
pub struct MergeTree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: NodeIndex,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl MergeTree {
    /// Creates a new empty tree with capacity for a binary tree with
    /// `num_leaves` leaves.
    ///
    /// # Arguments
    /// `num_leaves` - expected number of leaves, only used as capacity hint
    pub fn new(num_leaves: usize) -> Self {
        MergeTree {
            vertices: Vec::with_capacity((2 * num_leaves).saturating_sub(1)),
            root_index: NO_ROOT_SET_INDEX,
        }
    }

    /// Adds a root to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Child indices, left to right; empty for a single-vertex tree
    /// * `height` - Height of the root
    ///
    /// # Panics
    /// Panics if `height` is not finite or a child index is out of bounds.
    pub fn add_root(&mut self, children: Vec<NodeIndex>, height: f64) -> NodeIndex {
        let index = self.vertices.len();
        for &child in &children {
            self.vertices[child].set_parent(index);
        }
        self.vertices.push(Vertex::new_root(index, children, height));
        self.root_index = index;

        index
    }

    /// Adds an internal vertex to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Child indices, left to right (at least one)
    /// * `height` - Height of the vertex
    ///
    /// # Panics
    /// Panics if `children` is empty, `height` is not finite or a child
    /// index is out of bounds.
    pub fn add_internal(&mut self, children: Vec<NodeIndex>, height: f64) -> NodeIndex {
        assert!(!children.is_empty(), "Internal vertex needs children");
        let index = self.vertices.len();
        for &child in &children {
            self.vertices[child].set_parent(index);
        }
        self.vertices
            .push(Vertex::new_internal(index, children, height));

        index
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    ///
    /// # Panics
    /// Panics if `height` is not finite.
    pub fn add_leaf(&mut self, height: f64) -> NodeIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_leaf(index, height));
        index
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root_vertex(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: NodeIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|v| v.children().is_empty()).count()
    }

    /// Returns the number of internal vertices in this tree.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Checks that every child is at least as deep as its parent.
    pub fn has_monotone_heights(&self) -> bool {
        self.vertices.iter().all(|vertex| {
            vertex
                .parent()
                .is_none_or(|parent| self[parent].height() <= vertex.height())
        })
    }

    /// Returns a mirrored copy of this tree: same indices and heights,
    /// every child list reversed.
    pub fn reversed(&self) -> MergeTree {
        let vertices = self
            .vertices
            .iter()
            .map(|vertex| {
                let mut mirrored = vertex.clone();
                match &mut mirrored {
                    Vertex::Root { children, .. } | Vertex::Internal { children, .. } => {
                        children.reverse()
                    }
                    Vertex::Leaf { .. } => {}
                }
                mirrored
            })
            .collect();

        MergeTree {
            vertices,
            root_index: self.root_index,
        }
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is valid and points to the only Root vertex
    /// - All vertex indices match their position in the arena
    /// - All child indices are valid and point back to correct parent
    /// - All parent indices are valid and include this vertex as a child
    /// - Every vertex is reachable from the root
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if self.root_index >= self.vertices.len() || !self.vertices[self.root_index].is_root() {
            return false;
        }

        let mut found_root = false;
        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }

            if vertex.is_root() {
                if found_root {
                    return false;
                }
                found_root = true;
            }

            for &child in vertex.children() {
                if child >= self.vertices.len() || self.vertices[child].parent() != Some(index) {
                    return false;
                }
            }

            if !vertex.is_root() {
                match vertex.parent() {
                    None => return false,
                    Some(parent) => {
                        if parent >= self.vertices.len()
                            || !self.vertices[parent].children().contains(&index)
                        {
                            return false;
                        }
                    }
                }
            }
        }

        // A cycle detached from the root would pass the local checks above
        self.nodes(self.root_index).count() == self.vertices.len()
    }
}

impl MergeTreeLike for MergeTree {
    type Node = NodeIndex;

    /// # Panics
    /// Panics if the root hasn't been set yet.
    fn root(&self) -> NodeIndex {
        assert!(self.is_root_set(), "Root of tree not set");
        self.root_index
    }

    fn height(&self, node: NodeIndex) -> f64 {
        self[node].height()
    }

    fn children(&self, node: NodeIndex) -> &[NodeIndex] {
        self[node].children()
    }

    fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self[node].parent()
    }
}

impl std::ops::Index<NodeIndex> for MergeTree {
    type Output = Vertex;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// ============================================================================
// Printing (pub)
// ============================================================================
/// Visual representation of the tree.
///
/// # Example Output
/// ```text
/// Merge tree with 3 leaves (5 vertices total):
/// [4] Root (height: 0.000)
///   ├─ [2] Internal (height: 2.000)
///   │   ├─ [0] Leaf (height: 5.000)
///   │   └─ [1] Leaf (height: 4.000)
///   └─ [3] Leaf (height: 6.000)
/// ```
impl fmt::Display for MergeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Merge tree with {} leaves ({} vertices total):",
            self.num_leaves(),
            self.vertices.len()
        )?;

        if self.is_root_set() {
            self.fmt_vertex(f, self.root_index, "", true)
        } else {
            writeln!(f, "(No root set)")
        }
    }
}

impl MergeTree {
    /// Helper function to recursively print a vertex and its children.
    fn fmt_vertex(
        &self,
        f: &mut fmt::Formatter<'_>,
        idx: NodeIndex,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let vertex = &self.vertices[idx];
        let is_top = idx == self.root_index;

        let connector = if is_top {
            ""
        } else if is_last {
            "└─ "
        } else {
            "├─ "
        };

        let kind = if vertex.is_root() {
            "Root"
        } else if vertex.is_leaf() {
            "Leaf"
        } else {
            "Internal"
        };
        writeln!(
            f,
            "{}{}[{}] {} (height: {:.3})",
            prefix,
            connector,
            idx,
            kind,
            vertex.height()
        )?;

        let new_prefix = if is_top {
            "  ".to_string()
        } else {
            format!("{}{}   ", prefix, if is_last { " " } else { "│" })
        };
        let children = vertex.children();
        for (i, &child) in children.iter().enumerate() {
            self.fmt_vertex(f, child, &new_prefix, i + 1 == children.len())?;
        }

        Ok(())
    }
}
