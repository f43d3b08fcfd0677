//! Vertex of a [MergeTree](crate::model::MergeTree).

use crate::model::tree::NodeIndex;

/// During construction, Internal and Leaf vertex might not have parent set yet.
const NO_PARENT_SET: NodeIndex = usize::MAX;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) of a merge tree.
///
/// A vertex can be either:
/// - **Root**: Has no parent, has any number of children (none for a
///   single-vertex tree)
/// - **Internal**: Has a parent and at least one child
/// - **Leaf**: Has a parent, no children
///
/// # Invariants
/// - `index` is the index in the arena
/// - `height` is finite (enforced)
/// - `parent` is [NodeIndex] of parent in arena; `NO_PARENT_SET = usize::MAX`
///   only during construction
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex {
    /// Root vertex of the tree (has no parent)
    Root {
        /// Index of this vertex in the tree arena
        index: NodeIndex,
        /// Height of this vertex
        height: f64,
        /// Indices of the child vertices, ordered left to right
        children: Vec<NodeIndex>,
    },
    /// Internal vertex (has parent and children)
    Internal {
        /// Index of this vertex in the tree arena
        index: NodeIndex,
        /// Height of this vertex
        height: f64,
        /// Index of the parent vertex
        parent: NodeIndex,
        /// Indices of the child vertices, ordered left to right
        children: Vec<NodeIndex>,
    },
    /// Leaf vertex (has parent, no children)
    Leaf {
        /// Index of this vertex in the tree arena
        index: NodeIndex,
        /// Height of this vertex
        height: f64,
        /// Index of the parent vertex
        parent: NodeIndex,
    },
}

impl Vertex {
    /// Creates a new root vertex.
    ///
    /// # Panics
    /// Panics if `height` is not finite.
    pub fn new_root(index: NodeIndex, children: Vec<NodeIndex>, height: f64) -> Self {
        assert_finite(height);
        Vertex::Root {
            index,
            height,
            children,
        }
    }

    /// Creates a new internal (non-leaf, non-root) vertex.
    ///
    /// # Panics
    /// Panics if `height` is not finite.
    pub fn new_internal(index: NodeIndex, children: Vec<NodeIndex>, height: f64) -> Self {
        assert_finite(height);
        Vertex::Internal {
            index,
            height,
            parent: NO_PARENT_SET,
            children,
        }
    }

    /// Creates a new leaf vertex.
    ///
    /// # Panics
    /// Panics if `height` is not finite.
    pub fn new_leaf(index: NodeIndex, height: f64) -> Self {
        assert_finite(height);
        Vertex::Leaf {
            index,
            height,
            parent: NO_PARENT_SET,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> NodeIndex {
        match self {
            Vertex::Root { index, .. }
            | Vertex::Internal { index, .. }
            | Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns the height of this vertex.
    pub fn height(&self) -> f64 {
        match self {
            Vertex::Root { height, .. }
            | Vertex::Internal { height, .. }
            | Vertex::Leaf { height, .. } => *height,
        }
    }

    /// Returns the children, empty for a leaf (and a single-vertex root).
    pub fn children(&self) -> &[NodeIndex] {
        match self {
            Vertex::Root { children, .. } | Vertex::Internal { children, .. } => children,
            Vertex::Leaf { .. } => &[],
        }
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Returns `true` if this vertex is an internal vertex.
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns `true` if this vertex is a root.
    pub fn is_root(&self) -> bool {
        matches!(self, Vertex::Root { .. })
    }

    /// Sets new parent for non-root vertex.
    ///
    /// # Panics
    /// Panics if called on root.
    pub fn set_parent(&mut self, parent: NodeIndex) {
        match self {
            Vertex::Root { .. } => panic!("Cannot set parent on root vertex"),
            Vertex::Internal { parent: p, .. } | Vertex::Leaf { parent: p, .. } => *p = parent,
        }
    }

    /// Returns the index of parent if this a non-root vertex, else `None`.
    ///
    /// Note that parent might not be set yet during construction.
    pub fn parent(&self) -> Option<NodeIndex> {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                if *parent == NO_PARENT_SET {
                    None
                } else {
                    Some(*parent)
                }
            }
            Vertex::Root { .. } => None,
        }
    }
}

fn assert_finite(height: f64) {
    assert!(height.is_finite(), "Height must be finite, got {}", height);
}
