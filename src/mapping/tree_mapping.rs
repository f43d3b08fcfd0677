//! Continuous map from one merge tree into another, induced by a leaf map.

use crate::error::MergeTreeError;
use crate::mapping::decomposition::{
    PathDecomposition, accumulate_charges, decompose_paths, group_leaves,
};
use crate::mapping::defs::{DEFAULT_DELTA_TOLERANCE, DEFAULT_LANDING_EPSILON};
use crate::model::{MergeTreeLike, TreePosition};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use tracing::{debug, trace};

// =#========================================================================#=
// MAPPING CONFIG
// =#========================================================================$=
/// Precision settings of tree mapping construction.
///
/// # Configuration
/// * [`with_delta_tolerance(tolerance)`](Self::with_delta_tolerance)
///     - How far the vertical offsets of leaf map entries may deviate from
///       the first entry's (default [DEFAULT_DELTA_TOLERANCE])
/// * [`with_landing_epsilon(epsilon)`](Self::with_landing_epsilon)
///     - How far below a node's height a leaf image still lands on that node
///       (default [DEFAULT_LANDING_EPSILON])
#[derive(Debug, Clone, PartialEq)]
pub struct MappingConfig {
    delta_tolerance: f64,
    landing_epsilon: f64,
}

impl MappingConfig {
    /// Creates a configuration with default precision.
    pub fn new() -> Self {
        Self {
            delta_tolerance: DEFAULT_DELTA_TOLERANCE,
            landing_epsilon: DEFAULT_LANDING_EPSILON,
        }
    }

    /// Sets the tolerance for disagreeing leaf map offsets.
    ///
    /// # Panics
    /// Panics if `tolerance` is negative or not finite.
    pub fn with_delta_tolerance(mut self, tolerance: f64) -> Self {
        assert!(
            tolerance >= 0.0 && tolerance.is_finite(),
            "Delta tolerance must be finite and non-negative, got {}",
            tolerance
        );
        self.delta_tolerance = tolerance;
        self
    }

    /// Sets the landing epsilon of [leaf_mapping](crate::mapping::leaf_mapping).
    ///
    /// # Panics
    /// Panics if `epsilon` is negative or not finite.
    pub fn with_landing_epsilon(mut self, epsilon: f64) -> Self {
        assert!(
            epsilon >= 0.0 && epsilon.is_finite(),
            "Landing epsilon must be finite and non-negative, got {}",
            epsilon
        );
        self.landing_epsilon = epsilon;
        self
    }

    /// Returns the tolerance for disagreeing leaf map offsets.
    pub fn delta_tolerance(&self) -> f64 {
        self.delta_tolerance
    }

    /// Returns the landing epsilon.
    pub fn landing_epsilon(&self) -> f64 {
        self.landing_epsilon
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =#========================================================================#=
// BREAKPOINT
// =#========================================================================$=
/// A target node passed by the image of a source edge.
///
/// `height` is expressed in source coordinates, i.e. the target node's
/// height shifted by the mapping's delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint<N> {
    /// Height on the source edge at which the image reaches `node`
    pub height: f64,
    /// Target node reached
    pub node: N,
}

// =#========================================================================#=
// TREE MAPPING
// =#========================================================================$=
/// Map from every point of a source tree to a point of a target tree,
/// shifting heights up by a fixed `delta`.
///
/// Built once from a leaf map by propagating leaf images toward the source
/// root; read-only afterwards. Besides the map itself it records:
/// * per source node, the target nodes its incoming edge passes
///   ([edge_map](Self::edge_map))
/// * per target node, the source points hitting it strictly inside a
///   source edge ([inverse_node_epsilon_map](Self::inverse_node_epsilon_map))
///   and the resulting [charges](Self::path_charges)
/// * a grouping of the source leaves and a decomposition of the target tree
///   into root-ward paths
///
/// Node handles of both trees must stay valid for the lifetime `'t`.
pub struct TreeMapping<'t, S, T>
where
    S: MergeTreeLike + ?Sized,
    T: MergeTreeLike + ?Sized,
{
    source: &'t S,
    target: &'t T,
    delta: f64,
    node_map: HashMap<S::Node, TreePosition<T::Node>>,
    edge_map: HashMap<S::Node, Vec<Breakpoint<T::Node>>>,
    inverse_node_epsilon_map: HashMap<T::Node, Vec<TreePosition<S::Node>>>,
    path_charges: HashMap<T::Node, usize>,
    leaf_groups: Vec<Vec<S::Node>>,
    path_decomposition: PathDecomposition<T::Node>,
}

impl<'t, S, T> TreeMapping<'t, S, T>
where
    S: MergeTreeLike + ?Sized,
    T: MergeTreeLike + ?Sized,
{
    /// Builds the mapping induced by `leaf_map`.
    ///
    /// `leaf_map` pairs source leaves with their images on `target`; all
    /// entries must describe the same vertical offset
    /// `delta = |height(image) - height(leaf)|` within
    /// [delta_tolerance](MappingConfig::delta_tolerance). Should a leaf occur
    /// more than once, its first entry wins.
    ///
    /// # Errors
    /// * [EmptyLeafMap](crate::error::MergeTreeErrorType::EmptyLeafMap) if
    ///   `leaf_map` has no entries
    /// * [NotALeaf](crate::error::MergeTreeErrorType::NotALeaf) if a key is not
    ///   a leaf of `source`
    /// * [InconsistentDelta](crate::error::MergeTreeErrorType::InconsistentDelta)
    ///   if an entry's offset disagrees with the first one
    pub fn new<I>(
        source: &'t S,
        target: &'t T,
        leaf_map: I,
        config: &MappingConfig,
    ) -> Result<Self, MergeTreeError>
    where
        I: IntoIterator<Item = (S::Node, TreePosition<T::Node>)>,
    {
        let mut seen = HashSet::new();
        let leaf_map: Vec<_> = leaf_map
            .into_iter()
            .filter(|(leaf, _)| seen.insert(*leaf))
            .collect();
        let delta = validate_leaf_map(source, target, &leaf_map, config)?;

        let mut mapping = TreeMapping {
            source,
            target,
            delta,
            node_map: HashMap::new(),
            edge_map: HashMap::new(),
            inverse_node_epsilon_map: HashMap::new(),
            path_charges: HashMap::new(),
            leaf_groups: group_leaves(source, target, &leaf_map),
            path_decomposition: PathDecomposition::default(),
        };

        mapping.propagate(leaf_map);
        mapping.path_charges = accumulate_charges(&mapping.inverse_node_epsilon_map);
        mapping.path_decomposition = decompose_paths(target, &mut mapping.path_charges);

        debug!(
            delta,
            mapped_nodes = mapping.node_map.len(),
            leaf_groups = mapping.leaf_groups.len(),
            paths = mapping.path_decomposition.len(),
            "Built tree mapping"
        );
        Ok(mapping)
    }

    /// Breadth-first propagation of leaf images up to the source root.
    ///
    /// A node is processed once, the first time it is dequeued. Its incoming
    /// edge passes every target ancestor whose shifted height still lies at
    /// or below the parent's height; those strictly below are also recorded
    /// as inverse hits. The parent's image is the last breakpoint lifted to
    /// the parent's height, or the node's image lifted by the edge length.
    fn propagate(&mut self, leaf_map: Vec<(S::Node, TreePosition<T::Node>)>) {
        let mut queue: VecDeque<_> = leaf_map.into();
        let mut visited = HashSet::new();

        while let Some((node, point)) = queue.pop_front() {
            if !visited.insert(node) {
                continue;
            }
            self.node_map.insert(node, point);

            let node_height = self.source.height(node);
            let parent = self.source.parent(node);
            let parent_height = parent.map_or(f64::NEG_INFINITY, |p| self.source.height(p));

            let mut breakpoints = Vec::new();
            for ancestor in self.target.ancestors(point.first_down) {
                let this_height = self.target.height(ancestor) + self.delta;
                if this_height < parent_height {
                    break;
                }
                breakpoints.push(Breakpoint {
                    height: this_height,
                    node: ancestor,
                });
                if this_height > parent_height {
                    self.inverse_node_epsilon_map
                        .entry(ancestor)
                        .or_default()
                        .push(lifted(node, node_height - this_height));
                }
            }

            trace!(
                node = ?node,
                image = ?point.first_down,
                breakpoints = breakpoints.len(),
                "Propagated node image"
            );

            if let Some(parent) = parent {
                let parent_point = match breakpoints.last() {
                    Some(last) => lifted(last.node, last.height - parent_height),
                    None => lifted(
                        point.first_down,
                        point.height_delta + node_height - parent_height,
                    ),
                };
                queue.push_back((parent, parent_point));
            }
            self.edge_map.insert(node, breakpoints);
        }
    }

    /// Maps a point of the source tree into the target tree.
    ///
    /// A point exactly on a node maps to that node's image. Otherwise the
    /// point lies inside the incoming edge of `first_down` at height
    /// `y`; if the edge image passes target nodes strictly below `y`, the
    /// point lands above the last of them, else it lands above the image of
    /// `first_down`.
    ///
    /// # Errors
    /// [UnmappedPosition](crate::error::MergeTreeErrorType::UnmappedPosition)
    /// if `first_down` was never reached during construction, e.g. a node
    /// outside the subtrees above the mapped leaves.
    pub fn get(
        &self,
        position: &TreePosition<S::Node>,
    ) -> Result<TreePosition<T::Node>, MergeTreeError> {
        let node = position.first_down;
        let node_image = self
            .node_map
            .get(&node)
            .ok_or_else(|| MergeTreeError::unmapped_position(node))?;
        if position.is_node() {
            return Ok(*node_image);
        }

        let point_height = position.height(self.source);
        let passed = self
            .edge_map
            .get(&node)
            .into_iter()
            .flatten()
            .take_while(|breakpoint| point_height < breakpoint.height)
            .last();

        Ok(match passed {
            Some(breakpoint) => {
                TreePosition::new(breakpoint.node, breakpoint.height - point_height)
            }
            None => TreePosition::new(
                node_image.first_down,
                node_image.height_delta + position.height_delta,
            ),
        })
    }

    // =#========================================================================#=
    // ACCESSORS
    // =#========================================================================#=
    /// Returns the source tree.
    pub fn source(&self) -> &'t S {
        self.source
    }

    /// Returns the target tree.
    pub fn target(&self) -> &'t T {
        self.target
    }

    /// Returns the vertical offset of the mapping.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Returns the image of every reached source node.
    pub fn node_map(&self) -> &HashMap<S::Node, TreePosition<T::Node>> {
        &self.node_map
    }

    /// Returns the breakpoints of every reached source node's incoming edge,
    /// in walk order (upward, decreasing height).
    pub fn edge_map(&self) -> &HashMap<S::Node, Vec<Breakpoint<T::Node>>> {
        &self.edge_map
    }

    /// Returns, per target node, the source points mapped onto it from
    /// strictly inside a source edge.
    pub fn inverse_node_epsilon_map(&self) -> &HashMap<T::Node, Vec<TreePosition<S::Node>>> {
        &self.inverse_node_epsilon_map
    }

    /// Returns the charges of the target nodes (uncharged nodes are absent).
    pub fn path_charges(&self) -> &HashMap<T::Node, usize> {
        &self.path_charges
    }

    /// Returns the charge of a single target node, zero if uncharged.
    pub fn charge(&self, node: T::Node) -> usize {
        self.path_charges.get(&node).copied().unwrap_or(0)
    }

    /// Returns the groups of source leaves sharing a monotone image path,
    /// deepest group first.
    pub fn leaf_groups(&self) -> &[Vec<S::Node>] {
        &self.leaf_groups
    }

    /// Returns the path decomposition of the target tree.
    pub fn path_decomposition(&self) -> &[Vec<T::Node>] {
        self.path_decomposition.paths()
    }

    /// Returns the index of the decomposition path containing `node`.
    pub fn path_id(&self, node: T::Node) -> Option<usize> {
        self.path_decomposition.path_id(node)
    }

    /// Groups the source nodes by the decomposition path their image lies on.
    ///
    /// Group `k` belongs to path `k`; nodes are listed breadth-first from the
    /// source root. Nodes whose image is on no path are left out.
    pub fn image_path_groups(&self) -> Vec<Vec<S::Node>> {
        let mut groups = vec![Vec::new(); self.path_decomposition.len()];
        for node in self.source.nodes(self.source.root()) {
            let path = self
                .node_map
                .get(&node)
                .and_then(|image| self.path_id(image.first_down));
            if let Some(path) = path {
                groups[path].push(node);
            }
        }
        groups
    }
}

impl<S, T> fmt::Debug for TreeMapping<'_, S, T>
where
    S: MergeTreeLike + ?Sized,
    T: MergeTreeLike + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeMapping")
            .field("delta", &self.delta)
            .field("node_map", &self.node_map)
            .field("leaf_groups", &self.leaf_groups)
            .field("path_decomposition", &self.path_decomposition.paths())
            .finish_non_exhaustive()
    }
}

/// Position `height_delta` above `node`, absorbing rounding below zero.
fn lifted<N: Copy>(node: N, height_delta: f64) -> TreePosition<N> {
    TreePosition::new(node, height_delta.max(0.0))
}

/// Checks the leaf map and returns the offset of its first entry.
fn validate_leaf_map<S, T>(
    source: &S,
    target: &T,
    leaf_map: &[(S::Node, TreePosition<T::Node>)],
    config: &MappingConfig,
) -> Result<f64, MergeTreeError>
where
    S: MergeTreeLike + ?Sized,
    T: MergeTreeLike + ?Sized,
{
    let offset = |(leaf, point): &(S::Node, TreePosition<T::Node>)| {
        (point.height(target) - source.height(*leaf)).abs()
    };

    let first = leaf_map.first().ok_or_else(MergeTreeError::empty_leaf_map)?;
    let delta = offset(first);

    for entry in leaf_map {
        if !source.is_leaf(entry.0) {
            return Err(MergeTreeError::not_a_leaf(entry.0));
        }
        let found = offset(entry);
        if (found - delta).abs() > config.delta_tolerance() {
            return Err(MergeTreeError::inconsistent_delta(entry.0, delta, found));
        }
    }

    Ok(delta)
}
