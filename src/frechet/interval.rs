//! Closed intervals on the unit parameter domain and the free-space boundary
//! of a single segment.

use std::fmt;

/// A closed interval `[begin, end]` on `[0, 1]`.
///
/// Empty iff `begin > end`; the canonical empty interval is `[1, 0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Lower end
    pub begin: f64,
    /// Upper end
    pub end: f64,
}

impl Interval {
    /// Creates the interval `[begin, end]`.
    pub fn new(begin: f64, end: f64) -> Self {
        Interval { begin, end }
    }

    /// The canonical empty interval `[1, 0]`.
    pub fn empty() -> Self {
        Interval {
            begin: 1.0,
            end: 0.0,
        }
    }

    /// The full unit interval `[0, 1]`.
    pub fn unit() -> Self {
        Interval {
            begin: 0.0,
            end: 1.0,
        }
    }

    /// Returns `true` if the interval contains no point.
    pub fn is_empty(&self) -> bool {
        self.begin > self.end
    }

    /// Returns `true` if `t` lies in the interval.
    pub fn contains(&self, t: f64) -> bool {
        self.begin <= t && t <= self.end
    }

    /// Returns `true` if both intervals are non-empty and share a point.
    pub fn intersects(&self, other: &Interval) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.begin <= other.end && other.begin <= self.end
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.begin, self.end)
    }
}

/// Returns the parameters `t ∈ [0,1]` of the segment from `start` to `end`
/// whose interpolated value lies within `delta` of `h`.
///
/// A degenerate segment (`start == end`) is either fully free, if
/// `|h - start| < delta`, or empty. Otherwise both inequalities are solved in
/// closed form and clamped to `[0, 1]`.
///
/// # Example
/// ```
/// use merge_interleave::frechet::{Interval, free_boundary};
///
/// assert_eq!(free_boundary(1.0, 5.0, 0.0, 10.0), Interval::new(0.4, 0.6));
/// assert!(free_boundary(1.0, 20.0, 0.0, 10.0).is_empty());
/// ```
pub fn free_boundary(delta: f64, h: f64, start: f64, end: f64) -> Interval {
    if start == end {
        if (h - start).abs() < delta {
            return Interval::unit();
        }
        return Interval::empty();
    }

    let lower = (h - delta - start) / (end - start);
    let upper = (h + delta - start) / (end - start);

    if start < end {
        if lower > 1.0 || upper < 0.0 {
            return Interval::empty();
        }
        return Interval::new(lower.max(0.0), upper.min(1.0));
    }

    // Decreasing segment: the inequalities swap roles
    if upper > 1.0 || lower < 0.0 {
        return Interval::empty();
    }
    Interval::new(upper.max(0.0), lower.min(1.0))
}
