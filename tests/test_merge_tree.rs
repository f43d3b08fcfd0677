use merge_interleave::model::{MergeTree, MergeTreeLike, Vertex};

/// ((5.0, 4.0) 2.0, 6.0) 0.0
fn sample_tree() -> (MergeTree, [usize; 5]) {
    let mut tree = MergeTree::new(3);
    let a1 = tree.add_leaf(5.0);
    let a2 = tree.add_leaf(4.0);
    let u = tree.add_internal(vec![a1, a2], 2.0);
    let a3 = tree.add_leaf(6.0);
    let r = tree.add_root(vec![u, a3], 0.0);
    (tree, [a1, a2, u, a3, r])
}

#[test]
fn test_building_tree() {
    let (tree, [a1, a2, u, a3, r]) = sample_tree();

    // Counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 5);

    // Root
    assert_eq!(tree.root(), r);
    assert!(tree.root_vertex().is_root());
    assert_eq!(tree.root_vertex().index(), r);

    // Leaf
    let leaf = &tree[a2];
    assert!(leaf.is_leaf());
    assert_eq!(leaf.index(), a2);
    assert_eq!(leaf.height(), 4.0);
    assert_eq!(leaf.parent(), Some(u));

    // Internal
    let internal = &tree[u];
    assert!(internal.is_internal());
    assert_eq!(internal.children(), &[a1, a2]);
    assert_eq!(tree.children(r), &[u, a3]);

    assert!(tree.is_valid());
    assert!(tree.has_monotone_heights());
}

#[test]
fn test_single_vertex_tree() {
    let mut tree = MergeTree::new(1);
    let root = tree.add_root(vec![], 3.0);

    assert!(tree.is_valid());
    assert!(tree.is_leaf(root));
    assert_eq!(tree.leaves(root), vec![root]);
    assert_eq!(tree.num_leaves(), 1);
}

#[test]
fn test_non_binary_tree() {
    let mut tree = MergeTree::new(3);
    let leaves: Vec<_> = [3.0, 4.0, 5.0].into_iter().map(|h| tree.add_leaf(h)).collect();
    let root = tree.add_root(leaves.clone(), 1.0);

    assert!(tree.is_valid());
    assert_eq!(tree.leaves(root), leaves);
    assert_eq!(tree.lca(leaves[0], leaves[2]), root);
}

#[test]
#[should_panic]
fn test_get_root_panics_on_empty_tree() {
    let tree = MergeTree::new(2);
    tree.root(); // Should panic
}

#[test]
#[should_panic]
fn test_get_vertex_out_of_bounds() {
    let tree = MergeTree::new(2);
    let _ = &tree[55];
}

#[test]
#[should_panic]
fn test_non_finite_height_panics() {
    let mut tree = MergeTree::new(1);
    tree.add_leaf(f64::NAN);
}

#[test]
#[should_panic]
fn test_internal_without_children_panics() {
    let mut tree = MergeTree::new(1);
    tree.add_internal(vec![], 1.0);
}

#[test]
fn test_tree_without_root_is_invalid() {
    let mut tree = MergeTree::new(2);
    let a = tree.add_leaf(1.0);
    let b = tree.add_leaf(2.0);
    tree.add_internal(vec![a, b], 0.0);
    assert!(!tree.is_valid());
}

#[test]
fn test_non_monotone_heights() {
    let mut tree = MergeTree::new(2);
    let a = tree.add_leaf(1.0);
    let b = tree.add_leaf(2.0);
    tree.add_root(vec![a, b], 1.5);
    assert!(tree.is_valid());
    assert!(!tree.has_monotone_heights());
}

// ============= Traversals =============

#[test]
fn test_leaves_left_to_right() {
    let (tree, [a1, a2, u, a3, r]) = sample_tree();
    assert_eq!(tree.leaves(r), vec![a1, a2, a3]);
    assert_eq!(tree.leaves(u), vec![a1, a2]);
}

#[test]
fn test_post_order_and_breadth_first() {
    let (tree, [a1, a2, u, a3, r]) = sample_tree();
    assert_eq!(tree.post_order(r).collect::<Vec<_>>(), vec![a1, a2, u, a3, r]);
    assert_eq!(tree.nodes(r).collect::<Vec<_>>(), vec![r, u, a3, a1, a2]);
}

#[test]
fn test_ancestors() {
    let (tree, [a1, _, u, a3, r]) = sample_tree();
    assert_eq!(tree.ancestors(a1).collect::<Vec<_>>(), vec![u, r]);
    assert_eq!(tree.ancestors(r).count(), 0);

    assert!(tree.is_ancestor_or_self(r, a1));
    assert!(tree.is_ancestor_or_self(a1, a1));
    assert!(!tree.is_ancestor_or_self(a1, u));
    assert!(tree.share_monotone_path(a1, r));
    assert!(tree.share_monotone_path(u, a1));
    assert!(!tree.share_monotone_path(a1, a3));
}

#[test]
fn test_lca() {
    let (tree, [a1, a2, u, a3, r]) = sample_tree();
    assert_eq!(tree.lca(a1, a2), u);
    assert_eq!(tree.lca(a2, a3), r);
    assert_eq!(tree.lca(u, a1), u);
    assert_eq!(tree.lca(a3, a3), a3);
    assert_eq!(tree.lca(r, a2), r);
}

// ============= Derived trees & printing =============

#[test]
fn test_reversed() {
    let (tree, [a1, a2, u, a3, r]) = sample_tree();
    let reversed = tree.reversed();

    assert!(reversed.is_valid());
    assert_eq!(reversed.leaves(r), vec![a3, a2, a1]);
    assert_eq!(reversed.children(u), &[a2, a1]);
    assert_eq!(reversed.height(a1), 5.0);
    // Original untouched
    assert_eq!(tree.leaves(r), vec![a1, a2, a3]);
}

#[test]
fn test_display() {
    let (tree, _) = sample_tree();
    let expected = "\
Merge tree with 3 leaves (5 vertices total):
[4] Root (height: 0.000)
  ├─ [2] Internal (height: 2.000)
  │   ├─ [0] Leaf (height: 5.000)
  │   └─ [1] Leaf (height: 4.000)
  └─ [3] Leaf (height: 6.000)
";
    assert_eq!(tree.to_string(), expected);
}

// ============= Vertex =============

#[test]
fn test_vertex_variants() {
    let leaf = Vertex::new_leaf(0, 0.5);
    assert!(leaf.is_leaf());
    assert_eq!(leaf.parent(), None);
    assert!(leaf.children().is_empty());

    let mut internal = Vertex::new_internal(2, vec![0, 1], 0.25);
    assert!(internal.is_internal());
    internal.set_parent(3);
    assert_eq!(internal.parent(), Some(3));

    let root = Vertex::new_root(3, vec![2], 0.0);
    assert!(root.is_root());
    assert_eq!(root.parent(), None);
}

#[test]
#[should_panic]
fn test_set_parent_on_root_panics() {
    let mut root = Vertex::new_root(0, vec![], 0.0);
    root.set_parent(1);
}
