//! Decision procedure and binary search for the Fréchet distance.

use crate::error::MergeTreeError;
use crate::frechet::defs::DEFAULT_TOLERANCE;
use crate::frechet::free_space::{ReachableSpace, compute_free_space, compute_reachable_space};
use crate::frechet::path::{Matching, ReachablePathPoint, matching, reachable_path};
use tracing::{debug, trace};

// =#========================================================================#=
// FRECHET CONFIG
// =#========================================================================$=
/// Configuration of the Fréchet distance search.
///
/// # Configuration
/// * [`with_tolerance(tolerance)`](Self::with_tolerance)
///     - Absolute width of the delta bracket at which the binary search
///       stops (default [DEFAULT_TOLERANCE]). The returned distance is the
///       upper end of that bracket, so it overestimates by at most the
///       tolerance.
///
/// # Example
/// ```
/// use merge_interleave::frechet::FrechetConfig;
///
/// let config = FrechetConfig::new().with_tolerance(0.001);
/// let distance = config.distance(&[0.0, 4.0, 0.0], &[0.0, 3.0, 0.0]).unwrap();
/// assert!((distance - 1.0).abs() <= 0.001);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FrechetConfig {
    tolerance: f64,
}

/// Result of a distance search together with a feasible reachable space.
#[derive(Debug, Clone, PartialEq)]
pub struct FrechetAlignment {
    /// Converged upper bound on the distance
    pub distance: f64,
    /// Reachable space of a feasible delta close to `distance`
    pub reachable: ReachableSpace,
}

impl FrechetConfig {
    /// Creates a configuration with default tolerance.
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Sets the absolute convergence tolerance of the binary search.
    ///
    /// # Panics
    /// Panics if `tolerance` is not positive and finite.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        assert!(
            tolerance > 0.0 && tolerance.is_finite(),
            "Tolerance must be positive and finite, got {}",
            tolerance
        );
        self.tolerance = tolerance;
        self
    }

    /// Returns the convergence tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Computes the Fréchet distance of `source` and `target` up to the
    /// configured tolerance.
    ///
    /// # Errors
    /// [InvalidCurveLength](crate::error::MergeTreeErrorType::InvalidCurveLength)
    /// if either sequence has fewer than two points.
    pub fn distance(&self, source: &[f64], target: &[f64]) -> Result<f64, MergeTreeError> {
        check_lengths(source, target)?;
        let (distance, _) = self.bisect(source, target);
        Ok(distance)
    }

    /// Computes the Fréchet distance together with the reachable space of a
    /// feasible delta, from which an explicit alignment can be extracted.
    ///
    /// # Errors
    /// [InvalidCurveLength](crate::error::MergeTreeErrorType::InvalidCurveLength)
    /// if either sequence has fewer than two points,
    /// [UnreachableSpace](crate::error::MergeTreeErrorType::UnreachableSpace)
    /// if no feasible space exists near the converged distance.
    pub fn alignment(
        &self,
        source: &[f64],
        target: &[f64],
    ) -> Result<FrechetAlignment, MergeTreeError> {
        check_lengths(source, target)?;
        let (distance, space) = self.bisect(source, target);

        let reachable = match space {
            Some(space) => space,
            // Search never ran or never succeeded below the start bound;
            // a degenerate segment may still need a strictly larger delta.
            None => frechet_decision_space(distance, source, target)
                .or_else(|| frechet_decision_space(distance + self.tolerance, source, target))
                .ok_or_else(|| MergeTreeError::unreachable_space(distance))?,
        };

        Ok(FrechetAlignment {
            distance,
            reachable,
        })
    }

    /// Binary search over delta, returning the converged upper bound and the
    /// reachable space of the last successful decision (if any).
    fn bisect(&self, source: &[f64], target: &[f64]) -> (f64, Option<ReachableSpace>) {
        let mut lower = 0.0;
        let mut upper = initial_upper_bound(source, target);
        let mut space = None;
        let mut iterations = 0usize;

        while upper - lower > self.tolerance {
            let mid = (upper + lower) / 2.0;
            match frechet_decision_space(mid, source, target) {
                Some(reachable) => {
                    upper = mid;
                    space = Some(reachable);
                }
                None => lower = mid,
            }
            iterations += 1;
            trace!(iterations, lower, upper, "Fréchet bisection step");
        }

        debug!(
            source_len = source.len(),
            target_len = target.len(),
            iterations,
            distance = upper,
            "Fréchet distance converged"
        );
        (upper, space)
    }
}

impl Default for FrechetConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FrechetAlignment {
    /// Extracts the monotone staircase path through the reachable space.
    pub fn path(&self) -> Vec<ReachablePathPoint> {
        reachable_path(&self.reachable)
    }

    /// Extracts the point correspondence of the path.
    pub fn matching(&self) -> Matching {
        matching(&self.path())
    }
}

// ============================================================================
// Free functions (pub)
// ============================================================================
/// Computes the Fréchet distance of two sequences with default tolerance.
///
/// See [FrechetConfig::distance].
pub fn compute_frechet(source: &[f64], target: &[f64]) -> Result<f64, MergeTreeError> {
    FrechetConfig::new().distance(source, target)
}

/// Decides whether the sequences are within Fréchet distance `delta`.
///
/// False immediately if the first or the last points differ by more than
/// `delta`, or if either sequence is empty.
pub fn frechet_decision(delta: f64, source: &[f64], target: &[f64]) -> bool {
    frechet_decision_space(delta, source, target).is_some()
}

/// Like [frechet_decision], returning the reachable space on success.
pub fn frechet_decision_space(
    delta: f64,
    source: &[f64],
    target: &[f64],
) -> Option<ReachableSpace> {
    let (Some(first_s), Some(first_t)) = (source.first(), target.first()) else {
        return None;
    };
    let (Some(last_s), Some(last_t)) = (source.last(), target.last()) else {
        return None;
    };
    if (first_s - first_t).abs() > delta || (last_s - last_t).abs() > delta {
        return None;
    }

    let free = compute_free_space(delta, source, target);
    let reachable = compute_reachable_space(delta, source, target, &free);
    reachable.reaches_end().then_some(reachable)
}

/// A delta at which every pair of points is close enough.
fn initial_upper_bound(source: &[f64], target: &[f64]) -> f64 {
    let max = |values: &[f64]| values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = |values: &[f64]| values.iter().copied().fold(f64::INFINITY, f64::min);

    let source_above = max(source) - min(target);
    let target_above = max(target) - min(source);
    0.0f64.max(source_above).max(target_above)
}

fn check_lengths(source: &[f64], target: &[f64]) -> Result<(), MergeTreeError> {
    if source.len() < 2 || target.len() < 2 {
        return Err(MergeTreeError::invalid_curve_length(
            source.len(),
            target.len(),
        ));
    }
    Ok(())
}
