//! Provides the capability contract shared by all merge tree variants.
//!
//! * [MergeTreeLike] - height, children and parent of a node, plus derived
//!   traversals and queries every algorithm of this crate builds on
//! * [PostOrderIter], [BreadthFirstIter], [Ancestors] - traversal iterators
//!   over any [MergeTreeLike]
//!
//! Heights follow the screen convention: a larger height is deeper, so the
//! root has the smallest height and moving up along an edge decreases height.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

// =#========================================================================#=
// MERGE TREE LIKE (Trait)
// =#========================================================================T=
/// Trait defining the minimal capabilities of a merge tree.
///
/// Nodes are referenced by an opaque, cheap handle [Node](Self::Node).
/// Identity is by handle: two nodes with equal heights and children are still
/// distinct. Implementations must keep parent and children consistent, i.e.
/// every child reports the node it is listed under as its parent.
///
/// # Example
/// ```
/// use merge_interleave::model::{MergeTree, MergeTreeLike};
///
/// let mut tree = MergeTree::new(2);
/// let a = tree.add_leaf(5.0);
/// let b = tree.add_leaf(4.0);
/// let root = tree.add_root(vec![a, b], 1.0);
///
/// assert_eq!(tree.leaves(root), vec![a, b]);
/// assert_eq!(tree.lca(a, b), root);
/// ```
pub trait MergeTreeLike {
    /// Handle identifying a node of this tree.
    type Node: Copy + Eq + Hash + Debug;

    /// Returns the root of the tree.
    fn root(&self) -> Self::Node;

    /// Returns the height of `node` (larger = deeper).
    fn height(&self, node: Self::Node) -> f64;

    /// Returns the ordered children of `node`, empty for a leaf.
    fn children(&self, node: Self::Node) -> &[Self::Node];

    /// Returns the parent of `node`, `None` for the root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Returns `true` if `node` has no children.
    fn is_leaf(&self, node: Self::Node) -> bool {
        self.children(node).is_empty()
    }

    /// Returns the leaves of the subtree below `node`, left to right.
    fn leaves(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut leaves = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let children = self.children(current);
            if children.is_empty() {
                leaves.push(current);
            } else {
                // Reversed, so the leftmost child is popped first
                stack.extend(children.iter().rev());
            }
        }
        leaves
    }

    /// Returns an iterator over the subtree below `node` in breadth-first order,
    /// starting with `node` itself.
    fn nodes(&self, node: Self::Node) -> BreadthFirstIter<'_, Self> {
        BreadthFirstIter::new(self, node)
    }

    /// Returns an iterator over the subtree below `node` in post-order
    /// (children before parents, left to right).
    fn post_order(&self, node: Self::Node) -> PostOrderIter<'_, Self> {
        PostOrderIter::new(self, node)
    }

    /// Returns an iterator over the strict ancestors of `node`, walking up.
    fn ancestors(&self, node: Self::Node) -> Ancestors<'_, Self> {
        Ancestors {
            tree: self,
            current: self.parent(node),
        }
    }

    /// Returns `true` if `ancestor` is `node` or lies on its path to the root.
    fn is_ancestor_or_self(&self, ancestor: Self::Node, node: Self::Node) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Returns `true` if `a` and `b` lie on one monotone path,
    /// i.e. one of them is an ancestor of (or equal to) the other.
    fn share_monotone_path(&self, a: Self::Node, b: Self::Node) -> bool {
        self.is_ancestor_or_self(a, b) || self.is_ancestor_or_self(b, a)
    }

    /// Returns the lowest common ancestor of `a` and `b`.
    ///
    /// Repeatedly steps up from the deeper of the two nodes until both
    /// coincide. If the ancestor chain of one operand is exhausted, that
    /// root is returned.
    fn lca(&self, a: Self::Node, b: Self::Node) -> Self::Node {
        let (mut a, mut b) = (a, b);
        loop {
            if a == b {
                return a;
            }
            match (self.parent(a), self.parent(b)) {
                (None, _) => return a,
                (_, None) => return b,
                (Some(parent_a), Some(parent_b)) => {
                    if self.height(a) > self.height(b) {
                        a = parent_a;
                    } else {
                        b = parent_b;
                    }
                }
            }
        }
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
/// Iterator for post-order traversal (children before parents).
///
/// Uses a stack-based approach to traverse the tree without recursion.
/// Each node is visited after all its descendants have been visited.
pub struct PostOrderIter<'a, T: MergeTreeLike + ?Sized> {
    tree: &'a T,
    stack: Vec<(T::Node, bool)>, // (node, children_visited)
}

impl<'a, T: MergeTreeLike + ?Sized> PostOrderIter<'a, T> {
    fn new(tree: &'a T, start: T::Node) -> Self {
        PostOrderIter {
            tree,
            stack: vec![(start, false)],
        }
    }
}

impl<T: MergeTreeLike + ?Sized> Iterator for PostOrderIter<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, children_visited)) = self.stack.pop() {
            let children = self.tree.children(node);
            if children_visited || children.is_empty() {
                return Some(node);
            }

            self.stack.push((node, true));
            // Push children right first, so left is processed first
            for &child in children.iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for breadth-first traversal, level by level, left to right.
pub struct BreadthFirstIter<'a, T: MergeTreeLike + ?Sized> {
    tree: &'a T,
    queue: VecDeque<T::Node>,
}

impl<'a, T: MergeTreeLike + ?Sized> BreadthFirstIter<'a, T> {
    fn new(tree: &'a T, start: T::Node) -> Self {
        BreadthFirstIter {
            tree,
            queue: VecDeque::from([start]),
        }
    }
}

impl<T: MergeTreeLike + ?Sized> Iterator for BreadthFirstIter<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(self.tree.children(node).iter().copied());
        Some(node)
    }
}

/// Iterator over the strict ancestors of a node, nearest first.
pub struct Ancestors<'a, T: MergeTreeLike + ?Sized> {
    tree: &'a T,
    current: Option<T::Node>,
}

impl<T: MergeTreeLike + ?Sized> Iterator for Ancestors<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = self.tree.parent(node);
        Some(node)
    }
}
