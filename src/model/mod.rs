//! Data model for merge trees.
//!
//! # Tree representation
//! All algorithms of this crate are generic over the [MergeTreeLike] trait:
//! a node handle with a height, ordered children and an optional parent.
//! Heights follow the screen convention, a larger height being deeper.
//!
//! One concrete tree type is provided:
//!
//! | Type | Node handle | Use case |
//! |------|-------------|----------|
//! | [MergeTree] | [NodeIndex] into an arena of [Vertex] | Trees built bottom-up by the caller |
//!
//! Callers with their own tree representation implement [MergeTreeLike]
//! and reuse every algorithm unchanged.
//!
//! # Points on trees
//! A [TreePosition] addresses any point on a tree, not only nodes: the
//! nearest node below plus the height travelled up its incoming edge.

pub mod position;
pub mod tree;
pub mod tree_like;
pub mod vertex;

pub use position::TreePosition;
pub use tree::MergeTree;
pub use tree::NodeIndex;
pub use tree_like::MergeTreeLike;
pub use vertex::Vertex;
