//! Merge-interleave is a library to build interleavings between merge trees
//! and to compare merge trees by the Fréchet distance of their induced
//! curves.
//!
//! A merge tree is a rooted tree with a height per node, every child lying
//! at least as deep as its parent (larger height value = deeper, the root is
//! the highest point). Core functionality provided:
//! - Trees: the [MergeTreeLike] trait for any arena-like tree, and the
//!   provided [MergeTree] arena model. See [crate::model].
//! - Tree mappings: extend a map of leaves onto positions of another tree to
//!   a map of every point, shifting heights by a fixed delta, and record the
//!   edge breakpoints, charges and path decomposition this induces.
//!   See [crate::mapping].
//! - Interleavings: pairs of opposite tree mappings with a common delta,
//!   from explicit leaf correspondences or from a Fréchet alignment.
//! - Fréchet engine: free-space and reachability computation, decision,
//!   binary search, path and matching extraction for 1-D height sequences.
//!   See [crate::frechet].
//!
//! Limitations:
//! - Single threaded, everything is computed eagerly on construction
//! - Mappings borrow their trees; node handles must remain valid
//!
//! # Usage patterns
//! 1. A few functions below provide quick access with default settings.
//! 2. Configure [FrechetConfig](crate::frechet::FrechetConfig) and
//!    [MappingConfig](crate::mapping::MappingConfig) for full control over
//!    search tolerance and mapping precision.
//!
//! ## Example
//! ```
//! use merge_interleave::{interleave, tree_frechet_distance};
//! use merge_interleave::model::{MergeTree, TreePosition};
//!
//! let mut a = MergeTree::new(2);
//! let a1 = a.add_leaf(5.0);
//! let a2 = a.add_leaf(4.0);
//! a.add_root(vec![a1, a2], 2.0);
//!
//! let mut b = MergeTree::new(2);
//! let b1 = b.add_leaf(5.0);
//! let b2 = b.add_leaf(5.0);
//! b.add_root(vec![b1, b2], 3.0);
//!
//! let distance = tree_frechet_distance(&a, &b)?;
//! assert!(distance >= 1.0);
//!
//! let interleaving = interleave(&a, &b, &[(a1, b1), (a2, b2)], 1.0)?;
//! let image = interleaving.f().get(&TreePosition::new(a1, 0.5))?;
//! assert_eq!(image, TreePosition::new(b1, 1.5));
//! # Ok::<(), merge_interleave::error::MergeTreeError>(())
//! ```

pub mod error;
pub mod frechet;
pub mod mapping;
pub mod model;

use crate::error::MergeTreeError;
use crate::frechet::{FrechetConfig, induced_curve};
use crate::mapping::{Interleaving, MappingConfig, monotone_interleaving};
use crate::model::{MergeTree, MergeTreeLike};

// ============================================================================
// Quick Fréchet API
// ============================================================================
/// Fréchet distance of the induced curves of two trees, using default
/// sentinel and tolerance.
///
/// See [`frechet::induced_curve`] and [`frechet::compute_frechet`].
pub fn tree_frechet_distance<A, B>(a: &A, b: &B) -> Result<f64, MergeTreeError>
where
    A: MergeTreeLike + ?Sized,
    B: MergeTreeLike + ?Sized,
{
    frechet::compute_frechet(&induced_curve(a), &induced_curve(b))
}

// ============================================================================
// Quick interleaving API
// ============================================================================
/// Builds an interleaving of two [MergeTree]s from a leaf correspondence,
/// using default precision.
///
/// See [`Interleaving::from_pairs`] for full documentation.
pub fn interleave<'t>(
    a: &'t MergeTree,
    b: &'t MergeTree,
    pairs: &[(usize, usize)],
    delta: f64,
) -> Result<Interleaving<'t, MergeTree, MergeTree>, MergeTreeError> {
    Interleaving::from_pairs(a, b, pairs, delta, &MappingConfig::new())
}

/// Builds an interleaving of two [MergeTree]s from the Fréchet alignment of
/// their induced curves, using default settings.
///
/// See [`mapping::monotone_interleaving`] for full documentation.
pub fn monotone_interleave<'t>(
    a: &'t MergeTree,
    b: &'t MergeTree,
) -> Result<Interleaving<'t, MergeTree, MergeTree>, MergeTreeError> {
    monotone_interleaving(a, b, &FrechetConfig::new(), &MappingConfig::new())
}
