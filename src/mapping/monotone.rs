//! Interleavings whose leaf correspondence follows a Fréchet alignment of
//! the induced curves.

use crate::error::MergeTreeError;
use crate::frechet::{FrechetConfig, Matching, induced_curve_with_sentinel, origin_matching};
use crate::mapping::defs::MONOTONE_DELTA_SLACK;
use crate::mapping::interleaving::Interleaving;
use crate::mapping::tree_mapping::MappingConfig;
use crate::model::MergeTreeLike;
use tracing::debug;

/// Builds an interleaving of `a` and `b` from the Fréchet alignment of their
/// induced curves.
///
/// Both curves are bracketed by a sentinel one unit above the higher of the
/// two roots. Leaf `k` sits at curve index `2k + 1`; its matched parameter
/// on the other curve (see [origin_matching]) is rounded to the adjacent odd
/// index, which names the partner leaf.
///
/// The interleaving is built at the computed distance less
/// [MONOTONE_DELTA_SLACK], raised where needed so every leaf lands at or
/// above its partner: a partner shallower than `height(leaf) - delta`
/// would leave that leaf with a larger offset than the others.
///
/// # Errors
/// * [UnreachableSpace](crate::error::MergeTreeErrorType::UnreachableSpace)
///   if no alignment can be extracted
/// * errors of [Interleaving::build]
pub fn monotone_interleaving<'t, A, B>(
    a: &'t A,
    b: &'t B,
    frechet: &FrechetConfig,
    config: &MappingConfig,
) -> Result<Interleaving<'t, A, B>, MergeTreeError>
where
    A: MergeTreeLike + ?Sized,
    B: MergeTreeLike + ?Sized,
{
    let sentinel = a.height(a.root()).min(b.height(b.root())) - 1.0;
    let curve_a = induced_curve_with_sentinel(a, sentinel);
    let curve_b = induced_curve_with_sentinel(b, sentinel);

    let alignment = frechet.alignment(&curve_a, &curve_b)?;
    let matching = origin_matching(&alignment.path());

    let leaves_a = a.leaves(a.root());
    let leaves_b = b.leaves(b.root());
    let a_to_b = partners(&leaves_a, &leaves_b, &matching, Side::Source, alignment.distance)?;
    let b_to_a = partners(&leaves_b, &leaves_a, &matching, Side::Target, alignment.distance)?;

    let delta = interleaving_delta(a, b, &a_to_b, &b_to_a, alignment.distance);

    debug!(
        distance = alignment.distance,
        delta,
        leaves_a = leaves_a.len(),
        leaves_b = leaves_b.len(),
        "Aligned induced curves"
    );
    Interleaving::build(a, b, &a_to_b, &b_to_a, delta, config)
}

/// Offset at which every leaf reaches its partner by climbing: the distance
/// less the slack, or the largest depth gap of a pair if that is more.
fn interleaving_delta<A, B>(
    a: &A,
    b: &B,
    a_to_b: &[(A::Node, B::Node)],
    b_to_a: &[(B::Node, A::Node)],
    distance: f64,
) -> f64
where
    A: MergeTreeLike + ?Sized,
    B: MergeTreeLike + ?Sized,
{
    let gaps_a = a_to_b
        .iter()
        .map(|&(leaf, partner)| a.height(leaf) - b.height(partner));
    let gaps_b = b_to_a
        .iter()
        .map(|&(leaf, partner)| b.height(leaf) - a.height(partner));

    gaps_a
        .chain(gaps_b)
        .fold((distance - MONOTONE_DELTA_SLACK).max(0.0), f64::max)
}

#[derive(Clone, Copy)]
enum Side {
    Source,
    Target,
}

/// Pairs every leaf of `own` with the leaf of `other` its curve point is
/// matched to.
fn partners<N: Copy, M: Copy>(
    own: &[N],
    other: &[M],
    matching: &Matching,
    side: Side,
    distance: f64,
) -> Result<Vec<(N, M)>, MergeTreeError> {
    let last_odd = 2 * other.len() - 1;

    own.iter()
        .enumerate()
        .map(|(k, &leaf)| {
            let index = 2 * k + 1;
            let parameter = match side {
                Side::Source => matching.source_to_target(index),
                Side::Target => matching.target_to_source(index),
            }
            .ok_or_else(|| MergeTreeError::unreachable_space(distance))?;

            let partner = (nearest_odd(parameter, last_odd) - 1) / 2;
            Ok((leaf, other[partner]))
        })
        .collect()
}

/// Rounds a curve parameter to an adjacent odd index, at most `last_odd`.
fn nearest_odd(parameter: f64, last_odd: usize) -> usize {
    let floor = parameter.floor().max(0.0) as usize;
    let ceil = parameter.ceil().max(0.0) as usize;

    if floor % 2 == 1 {
        floor.min(last_odd)
    } else if ceil % 2 == 1 {
        ceil.min(last_odd)
    } else if floor < last_odd {
        floor + 1
    } else {
        last_odd
    }
}
