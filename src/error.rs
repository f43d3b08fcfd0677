//! Error types for tree mappings, interleavings and Fréchet computations.
//!
//! This module provides [MergeTreeError] and [MergeTreeErrorType] for
//! representing and reporting malformed input to the algorithms of this crate.
//! All errors are deterministic functions of the input; nothing is retried.

use std::error::Error;
use std::fmt;

// =#========================================================================#=
// MERGE TREE ERROR TYPE
// =#========================================================================€=
/// Kinds of errors the algorithms of this crate can report.
#[derive(PartialEq, Debug, Clone)]
pub enum MergeTreeErrorType {
    /// A curve handed to the Fréchet engine has fewer than two points.
    InvalidCurveLength {
        /// Number of points of the source curve
        source_len: usize,
        /// Number of points of the target curve
        target_len: usize,
    },
    /// A leaf map or leaf correspondence without any entries.
    EmptyLeafMap,
    /// A key of a leaf map is not a leaf of the source tree.
    NotALeaf,
    /// The vertical offset of a leaf map entry disagrees with the first entry.
    InconsistentDelta {
        /// Offset derived from the first entry
        expected: f64,
        /// Offset derived from the offending entry
        found: f64,
    },
    /// Offset handed to an interleaving is negative or not finite.
    InvalidDelta(f64),
    /// Lookup of a position whose node was never reached during construction.
    UnmappedPosition,
    /// No feasible reachable space could be produced for an alignment.
    UnreachableSpace,
}

// =#========================================================================#=
// MERGE TREE ERROR
// =#========================================================================$=
/// Error with its kind and a textual context (usually the offending node).
#[derive(Debug, Clone, PartialEq)]
pub struct MergeTreeError {
    kind: MergeTreeErrorType,
    context: String,
}

impl MergeTreeError {
    /// Create a [MergeTreeError] from an error type and some context
    pub fn new(kind: MergeTreeErrorType, context: String) -> Self {
        Self { kind, context }
    }

    /// Create a [MergeTreeError] without context
    pub fn without_context(kind: MergeTreeErrorType) -> Self {
        Self {
            kind,
            context: String::new(),
        }
    }

    /// Convenience constructor for InvalidCurveLength
    pub fn invalid_curve_length(source_len: usize, target_len: usize) -> Self {
        Self::without_context(MergeTreeErrorType::InvalidCurveLength {
            source_len,
            target_len,
        })
    }

    /// Convenience constructor for EmptyLeafMap
    pub fn empty_leaf_map() -> Self {
        Self::without_context(MergeTreeErrorType::EmptyLeafMap)
    }

    /// Convenience constructor for NotALeaf
    pub fn not_a_leaf<N: fmt::Debug>(node: N) -> Self {
        Self::new(MergeTreeErrorType::NotALeaf, format!("{node:?}"))
    }

    /// Convenience constructor for InconsistentDelta
    pub fn inconsistent_delta<N: fmt::Debug>(node: N, expected: f64, found: f64) -> Self {
        Self::new(
            MergeTreeErrorType::InconsistentDelta { expected, found },
            format!("{node:?}"),
        )
    }

    /// Convenience constructor for InvalidDelta
    pub fn invalid_delta(delta: f64) -> Self {
        Self::without_context(MergeTreeErrorType::InvalidDelta(delta))
    }

    /// Convenience constructor for UnmappedPosition
    pub fn unmapped_position<N: fmt::Debug>(node: N) -> Self {
        Self::new(MergeTreeErrorType::UnmappedPosition, format!("{node:?}"))
    }

    /// Convenience constructor for UnreachableSpace
    pub fn unreachable_space(delta: f64) -> Self {
        Self::new(
            MergeTreeErrorType::UnreachableSpace,
            format!("delta {delta}"),
        )
    }

    /// Get the error kind
    pub fn kind(&self) -> &MergeTreeErrorType {
        &self.kind
    }

    /// Get the context, empty if none was recorded
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl fmt::Display for MergeTreeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            MergeTreeErrorType::InvalidCurveLength {
                source_len,
                target_len,
            } => write!(
                f,
                "Comparison requires curves of at least 2 points, got {source_len} and {target_len}"
            )?,
            MergeTreeErrorType::EmptyLeafMap => write!(f, "Leaf map is empty")?,
            MergeTreeErrorType::NotALeaf => write!(f, "Leaf map key is not a leaf")?,
            MergeTreeErrorType::InconsistentDelta { expected, found } => write!(
                f,
                "Inconsistent offset in leaf map - expected {expected}, found {found}"
            )?,
            MergeTreeErrorType::InvalidDelta(delta) => {
                write!(f, "Offset must be finite and non-negative, got {delta}")?
            }
            MergeTreeErrorType::UnmappedPosition => {
                write!(f, "Position was never reached by the mapping")?
            }
            MergeTreeErrorType::UnreachableSpace => {
                write!(f, "Free space has no monotone path to the end")?
            }
        }

        if !self.context.is_empty() {
            write!(f, " ({})", self.context)?;
        }

        Ok(())
    }
}

impl Error for MergeTreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}
