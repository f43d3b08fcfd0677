//! Tree mappings and interleavings between merge trees.
//!
//! A [TreeMapping] extends a map of source leaves onto target positions to
//! every point of the source tree, shifting heights by a constant delta.
//! Two mappings in opposite directions with the same delta form an
//! [Interleaving]. Leaf maps are usually obtained with [leaf_mapping] from a
//! plain leaf correspondence, or derived automatically from a Fréchet
//! alignment by [monotone_interleaving].

pub mod decomposition;
pub mod defs;
pub mod interleaving;
pub mod monotone;
pub mod tree_mapping;

pub use decomposition::PathDecomposition;
pub use defs::{DEFAULT_DELTA_TOLERANCE, DEFAULT_LANDING_EPSILON, MONOTONE_DELTA_SLACK};
pub use interleaving::{Interleaving, leaf_mapping};
pub use monotone::monotone_interleaving;
pub use tree_mapping::{Breakpoint, MappingConfig, TreeMapping};
