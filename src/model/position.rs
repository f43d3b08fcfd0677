//! Addressing of arbitrary points on a merge tree.

use crate::model::tree_like::MergeTreeLike;

/// A point on a tree, given by the first node encountered when moving down
/// from it, and the height distance travelled up from that node.
///
/// Equality is structural: same node handle and same delta.
///
/// # Invariants
/// - `height_delta` is non-negative
/// - `height_delta` does not exceed the length of the incoming edge of
///   `first_down`; at a root any delta is allowed (a point above the root)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreePosition<N> {
    /// Nearest node at or below the point
    pub first_down: N,
    /// Distance travelled upward from `first_down`
    pub height_delta: f64,
}

impl<N: Copy> TreePosition<N> {
    /// Creates a new position `height_delta` above `first_down`.
    ///
    /// # Panics
    /// Panics if `height_delta` is negative or not finite.
    pub fn new(first_down: N, height_delta: f64) -> Self {
        assert!(
            height_delta >= 0.0 && height_delta.is_finite(),
            "Height delta must be finite and non-negative, got {}",
            height_delta
        );
        TreePosition {
            first_down,
            height_delta,
        }
    }

    /// Creates the position exactly at `node`.
    pub fn at(node: N) -> Self {
        TreePosition {
            first_down: node,
            height_delta: 0.0,
        }
    }

    /// Returns the absolute height of this point on `tree`.
    pub fn height<T>(&self, tree: &T) -> f64
    where
        T: MergeTreeLike<Node = N> + ?Sized,
    {
        tree.height(self.first_down) - self.height_delta
    }

    /// Returns the nearest node above this point, `None` above a root.
    pub fn first_up<T>(&self, tree: &T) -> Option<N>
    where
        T: MergeTreeLike<Node = N> + ?Sized,
    {
        tree.parent(self.first_down)
    }

    /// Returns `true` if this point coincides with its node.
    pub fn is_node(&self) -> bool {
        self.height_delta == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MergeTree;

    #[test]
    fn test_height_and_first_up() {
        let mut tree = MergeTree::new(1);
        let leaf = tree.add_leaf(5.0);
        let root = tree.add_root(vec![leaf], 1.0);

        let pos = TreePosition::new(leaf, 1.5);
        assert_eq!(pos.height(&tree), 3.5);
        assert_eq!(pos.first_up(&tree), Some(root));
        assert!(!pos.is_node());

        let top = TreePosition::at(root);
        assert_eq!(top.first_up(&tree), None);
        assert!(top.is_node());
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(TreePosition::new(3usize, 0.5), TreePosition::new(3usize, 0.5));
        assert_ne!(TreePosition::new(3usize, 0.5), TreePosition::new(4usize, 0.5));
        assert_ne!(TreePosition::new(3usize, 0.5), TreePosition::new(3usize, 0.25));
    }

    #[test]
    #[should_panic]
    fn test_negative_delta() {
        let _ = TreePosition::new(0usize, -1.0);
    }
}
