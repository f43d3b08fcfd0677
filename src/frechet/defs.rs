//! Constants and default precision knobs of the Fréchet engine.

/// Default absolute tolerance at which the binary search over delta stops.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Default value bracketing induced curves, standing in for "above the root".
pub const DEFAULT_CURVE_SENTINEL: f64 = 100.0;
