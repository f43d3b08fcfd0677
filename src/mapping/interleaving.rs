//! Pairs of tree mappings shifting heights by a common delta.

use crate::error::MergeTreeError;
use crate::mapping::tree_mapping::{MappingConfig, TreeMapping};
use crate::model::{MergeTreeLike, TreePosition};
use tracing::{debug, warn};

/// Lifts each paired target leaf to the height of its source leaf shifted by
/// `delta`, producing a leaf map for [TreeMapping::new].
///
/// From the target leaf the walk climbs to the parent as long as the
/// parent's height exceeds `height(leaf) - delta - ε`
/// (ε = [landing_epsilon](MappingConfig::landing_epsilon)), stopping at the
/// root. The image lies `height(node) - (height(leaf) - delta)` above the
/// node reached; landings slightly above the node are clamped onto it.
///
/// # Errors
/// * [InvalidDelta](crate::error::MergeTreeErrorType::InvalidDelta) if
///   `delta` is negative or not finite
/// * [EmptyLeafMap](crate::error::MergeTreeErrorType::EmptyLeafMap) if
///   `pairs` is empty
pub fn leaf_mapping<S, T>(
    source: &S,
    target: &T,
    pairs: &[(S::Node, T::Node)],
    delta: f64,
    config: &MappingConfig,
) -> Result<Vec<(S::Node, TreePosition<T::Node>)>, MergeTreeError>
where
    S: MergeTreeLike + ?Sized,
    T: MergeTreeLike + ?Sized,
{
    check_delta(delta)?;
    if pairs.is_empty() {
        return Err(MergeTreeError::empty_leaf_map());
    }

    let epsilon = config.landing_epsilon();
    let mut leaf_map = Vec::with_capacity(pairs.len());

    for &(leaf, partner) in pairs {
        let landing_height = source.height(leaf) - delta;

        let mut current = partner;
        while let Some(parent) = target.parent(current) {
            if target.height(parent) <= landing_height - epsilon {
                break;
            }
            current = parent;
        }

        let height_delta = target.height(current) - landing_height;
        if height_delta < 0.0 {
            warn!(
                leaf = ?leaf,
                node = ?current,
                overshoot = -height_delta,
                "Clamped leaf image onto node"
            );
        }
        leaf_map.push((leaf, TreePosition::new(current, height_delta.max(0.0))));
    }

    Ok(leaf_map)
}

// =#========================================================================#=
// INTERLEAVING
// =#========================================================================$=
/// Two mappings `f: A -> B` and `g: B -> A`, both shifting by `delta`.
///
/// Candidate witness of an interleaving distance of at most `delta` between
/// the two trees. Immutable once built.
///
/// # Example
/// ```
/// use merge_interleave::mapping::{Interleaving, MappingConfig};
/// use merge_interleave::model::{MergeTree, TreePosition};
///
/// let mut a = MergeTree::new(2);
/// let a1 = a.add_leaf(5.0);
/// let a2 = a.add_leaf(4.0);
/// a.add_root(vec![a1, a2], 2.0);
///
/// let mut b = MergeTree::new(2);
/// let b1 = b.add_leaf(5.0);
/// let b2 = b.add_leaf(5.0);
/// b.add_root(vec![b1, b2], 3.0);
///
/// let pairs = [(a1, b1), (a2, b2)];
/// let interleaving = Interleaving::from_pairs(&a, &b, &pairs, 1.0, &MappingConfig::new())?;
///
/// assert_eq!(interleaving.delta(), 1.0);
/// assert_eq!(interleaving.f().get(&TreePosition::at(a1))?, TreePosition::new(b1, 1.0));
/// # Ok::<(), merge_interleave::error::MergeTreeError>(())
/// ```
#[derive(Debug)]
pub struct Interleaving<'t, A, B>
where
    A: MergeTreeLike + ?Sized,
    B: MergeTreeLike + ?Sized,
{
    f: TreeMapping<'t, A, B>,
    g: TreeMapping<'t, B, A>,
    delta: f64,
}

impl<'t, A, B> Interleaving<'t, A, B>
where
    A: MergeTreeLike + ?Sized,
    B: MergeTreeLike + ?Sized,
{
    /// Builds both mappings from separate leaf correspondences.
    ///
    /// `a_to_b` pairs leaves of `a` with leaves of `b`, `b_to_a` the other way
    /// round; each is lifted with [leaf_mapping] at `delta`.
    ///
    /// # Errors
    /// Errors of [leaf_mapping] and [TreeMapping::new].
    pub fn build(
        a: &'t A,
        b: &'t B,
        a_to_b: &[(A::Node, B::Node)],
        b_to_a: &[(B::Node, A::Node)],
        delta: f64,
        config: &MappingConfig,
    ) -> Result<Self, MergeTreeError> {
        let f = TreeMapping::new(a, b, leaf_mapping(a, b, a_to_b, delta, config)?, config)?;
        let g = TreeMapping::new(b, a, leaf_mapping(b, a, b_to_a, delta, config)?, config)?;

        debug!(
            delta,
            a_to_b = a_to_b.len(),
            b_to_a = b_to_a.len(),
            "Built interleaving"
        );
        Ok(Interleaving { f, g, delta })
    }

    /// Builds both mappings from one leaf correspondence, used forward for
    /// `f` and reversed for `g`.
    ///
    /// # Errors
    /// See [build](Self::build).
    pub fn from_pairs(
        a: &'t A,
        b: &'t B,
        pairs: &[(A::Node, B::Node)],
        delta: f64,
        config: &MappingConfig,
    ) -> Result<Self, MergeTreeError> {
        let reversed: Vec<_> = pairs.iter().map(|&(x, y)| (y, x)).collect();
        Self::build(a, b, pairs, &reversed, delta, config)
    }

    /// Returns the mapping from `A` into `B`.
    pub fn f(&self) -> &TreeMapping<'t, A, B> {
        &self.f
    }

    /// Returns the mapping from `B` into `A`.
    pub fn g(&self) -> &TreeMapping<'t, B, A> {
        &self.g
    }

    /// Returns the common shift of both mappings.
    pub fn delta(&self) -> f64 {
        self.delta
    }
}

fn check_delta(delta: f64) -> Result<(), MergeTreeError> {
    if delta >= 0.0 && delta.is_finite() {
        Ok(())
    } else {
        Err(MergeTreeError::invalid_delta(delta))
    }
}
