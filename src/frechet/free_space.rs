//! Free-space diagram and monotone reachability between two height sequences.
//!
//! For sequences `source` (length `n1`, rows) and `target` (length `n2`,
//! columns) the diagram has `(n1 - 1) x (n2 - 1)` cells. Edges are addressed
//! by the corner they start at:
//! * `left[i][j]` - vertical edge at column `j` between rows `i` and `i + 1`
//!   (`i < n1 - 1`, `j < n2`)
//! * `bottom[i][j]` - horizontal edge at row `i` between columns `j` and `j + 1`
//!   (`i < n1`, `j < n2 - 1`)

use crate::frechet::interval::{Interval, free_boundary};

/// Row-major two dimensional table.
pub type Grid<T> = Vec<Vec<T>>;

/// Free intervals of all cell edges for one delta.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeSpace {
    /// Free intervals of the vertical edges
    pub left: Grid<Interval>,
    /// Free intervals of the horizontal edges
    pub bottom: Grid<Interval>,
}

/// Lowest reachable parameter of every cell edge, `+∞` if unreachable.
#[derive(Debug, Clone, PartialEq)]
pub struct ReachableSpace {
    /// Reachability of the vertical edges
    pub left: Grid<f64>,
    /// Reachability of the horizontal edges
    pub bottom: Grid<f64>,
}

impl ReachableSpace {
    /// Returns `true` if some point of the final vertical edge is reachable.
    pub fn reaches_end(&self) -> bool {
        self.left
            .last()
            .and_then(|row| row.last())
            .is_some_and(|value| value.is_finite())
    }
}

/// Computes the free-space diagram of `source` and `target` for `delta`.
///
/// Each cell edge is an independent [free_boundary] evaluation.
pub fn compute_free_space(delta: f64, source: &[f64], target: &[f64]) -> FreeSpace {
    let n1 = source.len();
    let n2 = target.len();

    let left = (0..n1.saturating_sub(1))
        .map(|i| {
            (0..n2)
                .map(|j| free_boundary(delta, target[j], source[i], source[i + 1]))
                .collect()
        })
        .collect();

    let bottom = (0..n1)
        .map(|i| {
            (0..n2.saturating_sub(1))
                .map(|j| free_boundary(delta, source[i], target[j], target[j + 1]))
                .collect()
        })
        .collect();

    FreeSpace { left, bottom }
}

/// Propagates reachability through the free space, bottom-left to top-right.
///
/// The first column and row are reachable from the origin as long as every
/// corner up to them is within `delta`. Every interior edge then takes the
/// lowest free point reachable by a monotone path, following the Alt–Godau
/// recurrence.
pub fn compute_reachable_space(
    delta: f64,
    source: &[f64],
    target: &[f64],
    free: &FreeSpace,
) -> ReachableSpace {
    let n1 = source.len();
    let n2 = target.len();

    let mut left = vec![vec![f64::INFINITY; n2]; n1.saturating_sub(1)];
    let mut bottom = vec![vec![f64::INFINITY; n2.saturating_sub(1)]; n1];

    // Borders
    for i in 0..n1.saturating_sub(1) {
        if (source[i] - target[0]).abs() > delta {
            break;
        }
        left[i][0] = 0.0;
    }
    for j in 0..n2.saturating_sub(1) {
        if (source[0] - target[j]).abs() > delta {
            break;
        }
        bottom[0][j] = 0.0;
    }

    for i in 0..n1 {
        for j in 0..n2 {
            if i + 1 < n1 && j > 0 {
                let free_left = free.left[i][j];
                if !free_left.is_empty() {
                    if bottom[i][j - 1].is_finite() {
                        left[i][j] = free_left.begin;
                    } else if left[i][j - 1] <= free_left.end {
                        left[i][j] = free_left.begin.max(left[i][j - 1]);
                    }
                }
            }

            if j + 1 < n2 && i > 0 {
                let free_bottom = free.bottom[i][j];
                if !free_bottom.is_empty() {
                    if left[i - 1][j].is_finite() {
                        bottom[i][j] = free_bottom.begin;
                    } else if bottom[i - 1][j] <= free_bottom.end {
                        bottom[i][j] = free_bottom.begin.max(bottom[i - 1][j]);
                    }
                }
            }
        }
    }

    ReachableSpace { left, bottom }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shapes() {
        let free = compute_free_space(1.0, &[0.0, 1.0, 2.0], &[0.0, 2.0]);
        assert_eq!(free.left.len(), 2);
        assert!(free.left.iter().all(|row| row.len() == 2));
        assert_eq!(free.bottom.len(), 3);
        assert!(free.bottom.iter().all(|row| row.len() == 1));
    }

    #[test]
    fn test_border_stops_at_first_violation() {
        let source = [0.0, 5.0, 0.0];
        let target = [0.0, 0.0];
        let free = compute_free_space(1.0, &source, &target);
        let reachable = compute_reachable_space(1.0, &source, &target, &free);

        assert_eq!(reachable.left[0][0], 0.0);
        // Row 2 would be within delta again, but the border is already broken
        assert_eq!(reachable.left[1][0], f64::INFINITY);
        assert_eq!(reachable.bottom[0][0], 0.0);
    }

    #[test]
    fn test_identical_segments_reach_end() {
        let curve = [0.0, 3.0];
        let free = compute_free_space(0.5, &curve, &curve);
        let reachable = compute_reachable_space(0.5, &curve, &curve, &free);
        assert!(reachable.reaches_end());
    }
}
