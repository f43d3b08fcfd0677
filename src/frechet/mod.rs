//! Discrete Fréchet distance between 1-D height sequences.
//!
//! The engine compares two sequences of heights, typically the
//! [induced curves](induced_curve) of two merge trees, by the classic
//! free-space construction specialised to one dimension:
//!
//! 1. [free_boundary] / [compute_free_space] - free interval of every cell
//!    edge for a fixed delta
//! 2. [compute_reachable_space] - monotone reachability, bottom-left to
//!    top-right
//! 3. [frechet_decision] - is the top-right edge reachable?
//! 4. [FrechetConfig::distance] / [compute_frechet] - binary search over delta
//! 5. [reachable_path] and [matching] / [origin_matching] - explicit
//!    alignment for callers that need more than a scalar
//!
//! # Example
//! ```
//! use merge_interleave::frechet::{compute_frechet, frechet_decision};
//!
//! let source = [20.0, 0.0, 5.0, 2.0, 10.0, 0.0, 20.0];
//! let target = [20.0, 2.0, 5.0, 0.0, 10.0, 0.0, 20.0];
//!
//! assert!(frechet_decision(2.0, &source, &target));
//! assert!(!frechet_decision(0.0, &source, &target));
//!
//! let distance = compute_frechet(&source, &target)?;
//! assert!(distance <= 2.0);
//! # Ok::<(), merge_interleave::error::MergeTreeError>(())
//! ```

pub mod curve;
pub mod defs;
pub mod free_space;
pub mod interval;
pub mod path;
pub mod search;

pub use curve::{induced_curve, induced_curve_with_sentinel};
pub use defs::{DEFAULT_CURVE_SENTINEL, DEFAULT_TOLERANCE};
pub use free_space::{FreeSpace, Grid, ReachableSpace, compute_free_space, compute_reachable_space};
pub use interval::{Interval, free_boundary};
pub use path::{Matching, ReachablePathPoint, matching, origin_matching, reachable_path};
pub use search::{
    FrechetAlignment, FrechetConfig, compute_frechet, frechet_decision, frechet_decision_space,
};
