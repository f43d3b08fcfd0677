//! Leaf grouping, charge accounting and greedy path decomposition.
//!
//! These derive the grouping structure of a [TreeMapping](super::TreeMapping):
//! * leaves of the source tree whose images lie on one monotone path of the
//!   target tree are grouped together
//! * every target node is charged once per source edge whose image passes
//!   strictly through it
//! * the charged part of the target tree is split into root-ward paths,
//!   each node continuing the path of its highest charged child

use crate::model::{MergeTreeLike, TreePosition};
use std::collections::HashMap;

// =#========================================================================#=
// PATH DECOMPOSITION
// =#========================================================================$=
/// Ordered list of paths, each running from its deepest node toward the root.
#[derive(Debug, Clone)]
pub struct PathDecomposition<N> {
    paths: Vec<Vec<N>>,
    path_ids: HashMap<N, usize>,
}

impl<N> Default for PathDecomposition<N> {
    fn default() -> Self {
        PathDecomposition {
            paths: Vec::new(),
            path_ids: HashMap::new(),
        }
    }
}

impl<N: Copy + Eq + std::hash::Hash> PathDecomposition<N> {
    /// Returns all paths in creation order.
    pub fn paths(&self) -> &[Vec<N>] {
        &self.paths
    }

    /// Returns the index of the path containing `node`, if any.
    pub fn path_id(&self, node: N) -> Option<usize> {
        self.path_ids.get(&node).copied()
    }

    /// Returns the number of paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if there are no paths.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    fn start(&mut self, node: N) {
        self.path_ids.insert(node, self.paths.len());
        self.paths.push(vec![node]);
    }

    fn extend(&mut self, path_id: usize, node: N) {
        self.path_ids.insert(node, path_id);
        self.paths[path_id].push(node);
    }
}

/// Partitions the leaves of a leaf map into groups sharing a monotone image
/// path, deepest group first.
///
/// Leaves are processed in reverse input order; a leaf joins the first group
/// whose first image lies on one root path with its own image.
pub(crate) fn group_leaves<S, T>(
    source: &S,
    target: &T,
    leaf_map: &[(S::Node, TreePosition<T::Node>)],
) -> Vec<Vec<S::Node>>
where
    S: MergeTreeLike + ?Sized,
    T: MergeTreeLike + ?Sized,
{
    let mut groups: Vec<(T::Node, Vec<S::Node>)> = Vec::new();

    for (leaf, point) in leaf_map.iter().rev() {
        match groups
            .iter_mut()
            .find(|(image, _)| target.share_monotone_path(*image, point.first_down))
        {
            Some((_, group)) => group.push(*leaf),
            None => groups.push((point.first_down, vec![*leaf])),
        }
    }

    let deepest = |group: &Vec<S::Node>| {
        group
            .iter()
            .map(|&leaf| source.height(leaf))
            .fold(f64::NEG_INFINITY, f64::max)
    };
    let mut groups: Vec<Vec<S::Node>> = groups.into_iter().map(|(_, group)| group).collect();
    groups.sort_by(|a, b| deepest(b).total_cmp(&deepest(a)));
    groups
}

/// Charges every target node once per recorded preimage.
pub(crate) fn accumulate_charges<N, M>(
    inverse_map: &HashMap<N, Vec<TreePosition<M>>>,
) -> HashMap<N, usize>
where
    N: Copy + Eq + std::hash::Hash,
{
    let mut charges = HashMap::with_capacity(inverse_map.len());
    for (&node, preimages) in inverse_map {
        *charges.entry(node).or_insert(0) += preimages.len();
    }
    charges
}

/// Decomposes the charged part of `tree` into paths, in post-order.
///
/// A node without charged children but with charge of its own starts a new
/// path, and its parent is charged at least once so the path continues
/// upward. A node with a charged child continues the path of its priority
/// child (see [priority_path]). A node with neither joins no path.
pub(crate) fn decompose_paths<T>(
    tree: &T,
    charges: &mut HashMap<T::Node, usize>,
) -> PathDecomposition<T::Node>
where
    T: MergeTreeLike + ?Sized,
{
    let mut decomposition = PathDecomposition::default();

    for node in tree.post_order(tree.root()) {
        let children = tree.children(node);
        let has_charged_child = children.iter().any(|&child| charge(charges, child) > 0);

        if !has_charged_child {
            if charge(charges, node) > 0 {
                decomposition.start(node);
                if let Some(parent) = tree.parent(node) {
                    let parent_charge = charges.entry(parent).or_insert(0);
                    if *parent_charge == 0 {
                        *parent_charge = 1;
                    }
                }
            }
            continue;
        }

        if let Some(path_id) = priority_path(tree, children, charges, &decomposition) {
            decomposition.extend(path_id, node);
        }
    }

    decomposition
}

fn charge<N: Eq + std::hash::Hash>(charges: &HashMap<N, usize>, node: N) -> usize {
    charges.get(&node).copied().unwrap_or(0)
}

/// Picks the path a parent of `children` continues.
///
/// Children without a path never qualify, whatever their charge. Among the
/// rest the highest charge wins, then the path starting deepest, then the
/// first child.
fn priority_path<T>(
    tree: &T,
    children: &[T::Node],
    charges: &HashMap<T::Node, usize>,
    decomposition: &PathDecomposition<T::Node>,
) -> Option<usize>
where
    T: MergeTreeLike + ?Sized,
{
    let start_height = |path_id: usize| tree.height(decomposition.paths[path_id][0]);
    let mut priority: Option<(usize, usize)> = None;

    for &child in children {
        let Some(child_path) = decomposition.path_id(child) else {
            continue;
        };
        let child_charge = charge(charges, child);
        let wins = match priority {
            None => true,
            Some((best_charge, best_path)) => {
                child_charge > best_charge
                    || (child_charge == best_charge
                        && start_height(child_path) > start_height(best_path))
            }
        };
        if wins {
            priority = Some((child_charge, child_path));
        }
    }

    priority.map(|(_, path_id)| path_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MergeTree;

    /// Root 0.0 with children u (2.0, leaves 5.0 and 4.0) and a leaf 6.0
    fn small_tree() -> (MergeTree, [usize; 5]) {
        let mut tree = MergeTree::new(3);
        let a1 = tree.add_leaf(5.0);
        let a2 = tree.add_leaf(4.0);
        let u = tree.add_internal(vec![a1, a2], 2.0);
        let a3 = tree.add_leaf(6.0);
        let r = tree.add_root(vec![u, a3], 0.0);
        (tree, [a1, a2, u, a3, r])
    }

    #[test]
    fn test_single_charged_leaf_runs_to_root() {
        let (tree, [a1, _, u, _, r]) = small_tree();
        let mut charges = HashMap::from([(a1, 1)]);

        let decomposition = decompose_paths(&tree, &mut charges);

        assert_eq!(decomposition.paths(), &[vec![a1, u, r]]);
        assert_eq!(charges[&u], 1);
    }

    #[test]
    fn test_tie_prefers_deeper_path() {
        let (tree, [a1, a2, u, a3, r]) = small_tree();
        let mut charges = HashMap::from([(a1, 1), (a2, 1), (a3, 1)]);

        let decomposition = decompose_paths(&tree, &mut charges);

        // u continues a1 (5.0 deeper than 4.0), r continues a3 (6.0 deeper than 5.0)
        assert_eq!(decomposition.len(), 3);
        assert_eq!(decomposition.path_id(u), decomposition.path_id(a1));
        assert_eq!(decomposition.path_id(r), decomposition.path_id(a3));
        assert_eq!(decomposition.paths()[decomposition.path_id(a2).unwrap()], vec![a2]);
    }

    #[test]
    fn test_higher_charge_beats_depth() {
        let (tree, [a1, _, u, a3, r]) = small_tree();
        let mut charges = HashMap::from([(a1, 1), (u, 3), (a3, 1)]);

        let decomposition = decompose_paths(&tree, &mut charges);

        assert_eq!(decomposition.path_id(r), decomposition.path_id(u));
        assert_eq!(decomposition.path_id(u), decomposition.path_id(a1));
    }

    #[test]
    fn test_path_stops_below_uncharged_ancestors() {
        // Chain 10.0 <- 8.0 <- 6.0 <- 4.0 (root), only the leaf charged
        let mut tree = MergeTree::new(1);
        let leaf = tree.add_leaf(10.0);
        let raised = tree.add_internal(vec![leaf], 8.0);
        let pass_through = tree.add_internal(vec![raised], 6.0);
        let root = tree.add_root(vec![pass_through], 4.0);
        let mut charges = HashMap::from([(leaf, 1)]);

        let decomposition = decompose_paths(&tree, &mut charges);

        assert_eq!(decomposition.paths(), &[vec![leaf, raised, pass_through]]);
        assert_eq!(charges, HashMap::from([(leaf, 1), (raised, 1)]));
        assert_eq!(decomposition.path_id(pass_through), Some(0));
        assert_eq!(decomposition.path_id(root), None);
    }

    #[test]
    fn test_uncharged_siblings_join_no_path() {
        // The root sees an uncharged pass-through and an uncharged leaf
        let mut tree = MergeTree::new(2);
        let deep = tree.add_leaf(9.0);
        let raised = tree.add_internal(vec![deep], 7.0);
        let pass_through = tree.add_internal(vec![raised], 5.0);
        let sibling = tree.add_leaf(6.0);
        let root = tree.add_root(vec![pass_through, sibling], 1.0);
        let mut charges = HashMap::from([(deep, 2)]);

        let decomposition = decompose_paths(&tree, &mut charges);

        assert_eq!(decomposition.paths(), &[vec![deep, raised, pass_through]]);
        assert_eq!(decomposition.path_id(sibling), None);
        assert_eq!(decomposition.path_id(root), None);
    }

    #[test]
    fn test_child_without_path_loses_priority() {
        let (tree, [a1, a2, u, _, _]) = small_tree();
        let mut decomposition = PathDecomposition::default();
        decomposition.start(a2);
        let charges = HashMap::from([(a1, 5), (a2, 1)]);

        let priority = priority_path(&tree, tree.children(u), &charges, &decomposition);

        assert_eq!(priority, decomposition.path_id(a2));
    }

    #[test]
    fn test_uncharged_tree_has_no_paths() {
        let (tree, _) = small_tree();
        let mut charges = HashMap::new();
        assert!(decompose_paths(&tree, &mut charges).is_empty());
    }
}
