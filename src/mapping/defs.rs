//! Constants and default precision knobs of tree mapping construction.

/// Default tolerance below a target height at which climbing a leaf's image
/// still lands on the node above, so a landing never falls just short of it.
pub const DEFAULT_LANDING_EPSILON: f64 = 1e-4;

/// Default tolerance within which the offsets of all leaf map entries must agree.
pub const DEFAULT_DELTA_TOLERANCE: f64 = 1e-3;

/// Amount by which a monotone interleaving undercuts the Fréchet distance
/// before it is raised to what the chosen leaf pairs need.
pub const MONOTONE_DELTA_SLACK: f64 = 1e-5;
