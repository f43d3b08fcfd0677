//! Extraction of a monotone path through the reachable space and of the
//! point correspondence ("matching") it induces.

use crate::frechet::free_space::ReachableSpace;

/// One step of a path through the free-space diagram.
///
/// `(i, j)` is the cell corner (row of the source, column of the target),
/// `left` and `bottom` the parameters at which the path crosses the
/// vertical and horizontal edge of that cell; both are zero at a corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReachablePathPoint {
    /// Row index (source)
    pub i: usize,
    /// Column index (target)
    pub j: usize,
    /// Crossing parameter on the vertical edge
    pub left: f64,
    /// Crossing parameter on the horizontal edge
    pub bottom: f64,
}

impl ReachablePathPoint {
    fn corner(i: usize, j: usize) -> Self {
        ReachablePathPoint {
            i,
            j,
            left: 0.0,
            bottom: 0.0,
        }
    }

    /// Returns `true` if the path passes exactly through the cell corner.
    pub fn is_corner(&self) -> bool {
        self.left == 0.0 && self.bottom == 0.0
    }
}

/// Monotone correspondences between the two sequences, ascending.
///
/// `alpha` pairs each source index with a (fractional) target position,
/// `beta` each target index with a (fractional) source position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matching {
    /// Source index to target position
    pub alpha: Vec<(usize, f64)>,
    /// Target index to source position
    pub beta: Vec<(usize, f64)>,
}

impl Matching {
    /// Returns the target position matched to source index `i`.
    pub fn source_to_target(&self, i: usize) -> Option<f64> {
        self.alpha.iter().find(|(k, _)| *k == i).map(|&(_, t)| t)
    }

    /// Returns the source position matched to target index `j`.
    pub fn target_to_source(&self, j: usize) -> Option<f64> {
        self.beta.iter().find(|(k, _)| *k == j).map(|&(_, t)| t)
    }
}

/// Walks from the top-right corner of the reachable space back to the
/// origin, producing a monotone staircase path.
///
/// Reachability values are clamped to `[0, 1]` first. A clamped zero on
/// either edge of a cell means its lower-left corner is reachable and the
/// path steps diagonally. Otherwise the path steps left while the vertical
/// edge is reachable (or undercuts the parameter carried over from the
/// previous sideways step), and down otherwise. Once a border is hit the
/// remaining row or column is padded with corners down to `(0, 0)`.
///
/// # Example
/// ```
/// use merge_interleave::frechet::{frechet_decision_space, reachable_path};
///
/// let space = frechet_decision_space(5.0, &[0.0, 1.0], &[0.0, 1.0]).unwrap();
/// let path = reachable_path(&space);
/// assert_eq!((path[0].i, path[0].j), (1, 1));
/// assert_eq!((path[1].i, path[1].j), (0, 0));
/// ```
pub fn reachable_path(reachable: &ReachableSpace) -> Vec<ReachablePathPoint> {
    let rows = reachable.left.len();
    let cols = reachable.bottom.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return vec![ReachablePathPoint::corner(0, 0)];
    }

    let (mut i, mut j) = (rows as isize - 1, cols as isize - 1);
    let mut points = vec![ReachablePathPoint::corner(rows, cols)];

    let mut from_top = true;
    let mut start = 0.0;

    while i >= 0 && j >= 0 {
        let (row, col) = (i as usize, j as usize);
        let left = reachable.left[row][col];
        let bottom = reachable.bottom[row][col];
        let left_clamped = left.clamp(0.0, 1.0);
        let bottom_clamped = bottom.clamp(0.0, 1.0);

        if left_clamped == 0.0 || bottom_clamped == 0.0 {
            points.push(ReachablePathPoint::corner(row, col));
            i -= 1;
            j -= 1;
            from_top = false;
            start = 0.0;
        } else if left.is_finite() || (!from_top && left_clamped < start) {
            points.push(ReachablePathPoint {
                i: row,
                j: col,
                left: left_clamped,
                bottom: 0.0,
            });
            j -= 1;
            from_top = false;
            start = 1.0 - left_clamped;
        } else {
            points.push(ReachablePathPoint {
                i: row,
                j: col,
                left: 0.0,
                bottom: bottom_clamped,
            });
            i -= 1;
            from_top = true;
            start = 1.0 - bottom_clamped;
        }
    }

    for k in (0..=i).rev() {
        points.push(ReachablePathPoint::corner(k as usize, 0));
    }
    for k in (0..=j).rev() {
        points.push(ReachablePathPoint::corner(0, k as usize));
    }

    points
}

/// Converts a path (as produced by [reachable_path]) into a [Matching].
///
/// Reading the path in order, every decrease of the row index records the
/// new row matched to `column + bottom`; every decrease of the column index
/// records the new column matched to `row + left`. Both lists start at the
/// top-right corner and are returned in ascending order.
pub fn matching(path: &[ReachablePathPoint]) -> Matching {
    let Some(first) = path.first() else {
        return Matching::default();
    };

    let mut alpha = vec![(first.i, first.j as f64)];
    let mut beta = vec![(first.j, first.i as f64)];
    let (mut last_i, mut last_j) = (first.i, first.j);

    for point in &path[1..] {
        if point.i < last_i {
            alpha.push((point.i, point.j as f64 + point.bottom));
            last_i = point.i;
        }
        if point.j < last_j {
            beta.push((point.j, point.i as f64 + point.left));
            last_j = point.j;
        }
    }

    alpha.reverse();
    beta.reverse();
    Matching { alpha, beta }
}

/// Reads a matching off `path` keeping, for every index, the path point
/// closest to the origin.
///
/// Where [matching] records the first point of each row or column the path
/// enters, a staircase that runs sideways within one row reports the far end
/// of that run here. The first point of the path always stands for its own
/// row and column.
pub fn origin_matching(path: &[ReachablePathPoint]) -> Matching {
    let Some(first) = path.first() else {
        return Matching::default();
    };

    let mut alpha = vec![(first.i, first.j as f64)];
    let mut beta = vec![(first.j, first.i as f64)];

    for point in &path[1..] {
        if point.i < first.i {
            keep_last(&mut alpha, point.i, point.j as f64 + point.bottom);
        }
        if point.j < first.j {
            keep_last(&mut beta, point.j, point.i as f64 + point.left);
        }
    }

    alpha.reverse();
    beta.reverse();
    Matching { alpha, beta }
}

// Path points of one index are consecutive, so the latest entry is replaced.
fn keep_last(entries: &mut Vec<(usize, f64)>, index: usize, position: f64) {
    match entries.last_mut() {
        Some(last) if last.0 == index => last.1 = position,
        _ => entries.push((index, position)),
    }
}
