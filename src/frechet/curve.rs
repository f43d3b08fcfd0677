//! Induced curves: the 1-D height profile of a merge tree.

use crate::frechet::defs::DEFAULT_CURVE_SENTINEL;
use crate::model::MergeTreeLike;

/// Returns the induced curve of `tree`, bracketed by [DEFAULT_CURVE_SENTINEL].
///
/// See [induced_curve_with_sentinel].
pub fn induced_curve<T: MergeTreeLike + ?Sized>(tree: &T) -> Vec<f64> {
    induced_curve_with_sentinel(tree, DEFAULT_CURVE_SENTINEL)
}

/// Returns the induced curve of `tree`, bracketed by `sentinel` on both ends.
///
/// Walks the leaves left to right; for each adjacent pair emits the height of
/// the first leaf followed by the height of their lowest common ancestor, and
/// finally the height of the last leaf. A tree with `k` leaves yields
/// `2k + 1` values, leaf `i` sitting at index `2i + 1`.
///
/// # Example
/// ```
/// use merge_interleave::frechet::induced_curve_with_sentinel;
/// use merge_interleave::model::MergeTree;
///
/// let mut tree = MergeTree::new(2);
/// let a = tree.add_leaf(5.0);
/// let b = tree.add_leaf(4.0);
/// tree.add_root(vec![a, b], 1.0);
///
/// assert_eq!(induced_curve_with_sentinel(&tree, -1.0), vec![-1.0, 5.0, 1.0, 4.0, -1.0]);
/// ```
pub fn induced_curve_with_sentinel<T: MergeTreeLike + ?Sized>(tree: &T, sentinel: f64) -> Vec<f64> {
    let leaves = tree.leaves(tree.root());
    let mut curve = Vec::with_capacity(2 * leaves.len() + 1);

    curve.push(sentinel);
    for pair in leaves.windows(2) {
        curve.push(tree.height(pair[0]));
        curve.push(tree.height(tree.lca(pair[0], pair[1])));
    }
    if let Some(&last) = leaves.last() {
        curve.push(tree.height(last));
    }
    curve.push(sentinel);

    curve
}
