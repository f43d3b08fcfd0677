use merge_interleave::error::MergeTreeErrorType;
use merge_interleave::frechet::{
    FrechetConfig, Interval, compute_free_space, compute_frechet, free_boundary,
    frechet_decision, frechet_decision_space, induced_curve, induced_curve_with_sentinel,
    matching, origin_matching, reachable_path,
};
use merge_interleave::model::MergeTree;

const SOURCE: [f64; 7] = [20.0, 0.0, 5.0, 2.0, 10.0, 0.0, 20.0];
const TARGET: [f64; 7] = [20.0, 2.0, 5.0, 0.0, 10.0, 0.0, 20.0];

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ============= Free boundary =============

#[test]
fn test_free_boundary_increasing_segment() {
    let interval = free_boundary(1.0, 5.0, 0.0, 10.0);
    assert_close(interval.begin, 0.4);
    assert_close(interval.end, 0.6);
}

#[test]
fn test_free_boundary_decreasing_segment() {
    let interval = free_boundary(1.0, 5.0, 10.0, 0.0);
    assert_close(interval.begin, 0.4);
    assert_close(interval.end, 0.6);
}

#[test]
fn test_free_boundary_clamps_to_unit_interval() {
    assert_eq!(free_boundary(3.0, 1.0, 0.0, 10.0), Interval::new(0.0, 0.4));
    assert_eq!(free_boundary(100.0, 1.0, 0.0, 10.0), Interval::unit());
}

#[test]
fn test_free_boundary_out_of_reach() {
    assert!(free_boundary(1.0, 20.0, 0.0, 10.0).is_empty());
    assert!(free_boundary(1.0, -5.0, 0.0, 10.0).is_empty());
}

#[test]
fn test_free_boundary_degenerate_segment() {
    assert_eq!(free_boundary(1.0, 3.5, 3.0, 3.0), Interval::unit());
    // Strict comparison on a point segment
    assert!(free_boundary(0.5, 3.5, 3.0, 3.0).is_empty());
}

// ============= Decision =============

#[test]
fn test_decision_on_scenario() {
    assert!(frechet_decision(2.0, &SOURCE, &TARGET));
    assert!(!frechet_decision(0.0, &SOURCE, &TARGET));
    assert!(!frechet_decision(0.5, &SOURCE, &TARGET));
    assert!(!frechet_decision(1.0, &SOURCE, &TARGET));
    assert!(frechet_decision(1.5, &SOURCE, &TARGET));
}

#[test]
fn test_decision_fails_on_endpoints() {
    assert!(!frechet_decision(0.5, &[0.0, 1.0], &[1.0, 1.0]));
    assert!(!frechet_decision(0.5, &[0.0, 1.0], &[0.0, 0.0]));
}

#[test]
fn test_decision_on_empty_sequences() {
    assert!(!frechet_decision(10.0, &[], &[0.0, 1.0]));
    assert!(frechet_decision_space(10.0, &[0.0, 1.0], &[]).is_none());
}

#[test]
fn test_free_space_of_identical_curves_is_fully_free_on_diagonal() {
    let free = compute_free_space(0.1, &SOURCE, &SOURCE);
    for i in 0..SOURCE.len() - 1 {
        assert!(!free.left[i][i].is_empty());
        assert!(!free.bottom[i][i].is_empty());
    }
}

// ============= Distance =============

#[test]
fn test_distance_on_scenario() {
    let forward = compute_frechet(&SOURCE, &TARGET).unwrap();
    let backward = compute_frechet(&TARGET, &SOURCE).unwrap();

    assert_close(forward, 1.50390625);
    assert_close(backward, forward);
}

#[test]
fn test_self_distance_below_tolerance() {
    let distance = compute_frechet(&SOURCE, &SOURCE).unwrap();
    assert!(distance <= 0.01);
    assert_close(distance, 0.009765625);
}

#[test]
fn test_distance_with_tight_tolerance() {
    let config = FrechetConfig::new().with_tolerance(0.001);
    let distance = config.distance(&[0.0, 4.0, 0.0], &[0.0, 3.0, 0.0]).unwrap();
    assert_close(distance, 1.0);
}

#[test]
fn test_distance_of_equal_flat_curves_is_zero() {
    assert_eq!(compute_frechet(&[0.0, 0.0], &[0.0, 0.0]).unwrap(), 0.0);
}

#[test]
fn test_distance_rejects_short_sequences() {
    let error = compute_frechet(&[1.0], &[0.0, 1.0]).unwrap_err();
    assert_eq!(
        error.kind(),
        &MergeTreeErrorType::InvalidCurveLength {
            source_len: 1,
            target_len: 2
        }
    );

    let error = compute_frechet(&[0.0, 1.0], &[]).unwrap_err();
    assert!(matches!(
        error.kind(),
        MergeTreeErrorType::InvalidCurveLength { target_len: 0, .. }
    ));
}

#[test]
#[should_panic]
fn test_non_positive_tolerance_panics() {
    let _ = FrechetConfig::new().with_tolerance(0.0);
}

// ============= Path & Matching =============

#[test]
fn test_path_of_unit_square() {
    let space = frechet_decision_space(5.0, &[0.0, 1.0], &[0.0, 1.0]).unwrap();
    let path = reachable_path(&space);

    assert_eq!(path.len(), 2);
    assert_eq!((path[0].i, path[0].j), (1, 1));
    assert_eq!((path[1].i, path[1].j), (0, 0));
    assert!(path.iter().all(|point| point.is_corner()));
}

#[test]
fn test_path_on_scenario() {
    let alignment = FrechetConfig::new().alignment(&SOURCE, &TARGET).unwrap();
    let path = alignment.path();

    let expected = [
        (6, 6, 0.0, 0.0),
        (5, 5, 0.0, 0.0),
        (4, 4, 0.0, 0.0),
        (3, 3, 0.0, 0.349609375),
        (2, 3, 0.0, 0.349609375),
        (1, 3, 0.0, 0.0),
        (0, 2, 0.8248046875, 0.0),
        (0, 1, 0.8248046875, 0.0),
        (0, 0, 0.0, 0.0),
    ];
    assert_eq!(path.len(), expected.len());
    for (point, &(i, j, left, bottom)) in path.iter().zip(expected.iter()) {
        assert_eq!((point.i, point.j), (i, j));
        assert_close(point.left, left);
        assert_close(point.bottom, bottom);
    }

    // Monotone staircase
    for pair in path.windows(2) {
        assert!(pair[1].i <= pair[0].i && pair[1].j <= pair[0].j);
    }
}

#[test]
fn test_matching_on_scenario() {
    let alignment = FrechetConfig::new().alignment(&SOURCE, &TARGET).unwrap();
    let matching = matching(&alignment.path());

    let alpha = [2.0, 3.0, 3.349609375, 3.349609375, 4.0, 5.0, 6.0];
    let beta = [0.0, 0.8248046875, 0.8248046875, 3.0, 4.0, 5.0, 6.0];

    assert_eq!(matching.alpha.len(), 7);
    assert_eq!(matching.beta.len(), 7);
    for (k, expected) in alpha.iter().enumerate() {
        assert_eq!(matching.alpha[k].0, k);
        assert_close(matching.alpha[k].1, *expected);
    }
    for (k, expected) in beta.iter().enumerate() {
        assert_eq!(matching.beta[k].0, k);
        assert_close(matching.beta[k].1, *expected);
    }
    assert_close(matching.source_to_target(2).unwrap(), 3.349609375);
    assert_close(matching.target_to_source(1).unwrap(), 0.8248046875);
    assert_eq!(matching.source_to_target(7), None);
}

#[test]
fn test_origin_matching_on_scenario() {
    let alignment = FrechetConfig::new().alignment(&SOURCE, &TARGET).unwrap();
    let matching = origin_matching(&alignment.path());

    // Sideways runs report the end nearest the origin
    let alpha = [0.0, 3.0, 3.349609375, 3.349609375, 4.0, 5.0, 6.0];
    let beta = [0.0, 0.8248046875, 0.8248046875, 1.0, 4.0, 5.0, 6.0];

    assert_eq!(matching.alpha.len(), 7);
    assert_eq!(matching.beta.len(), 7);
    for (k, expected) in alpha.iter().enumerate() {
        assert_eq!(matching.alpha[k].0, k);
        assert_close(matching.alpha[k].1, *expected);
    }
    for (k, expected) in beta.iter().enumerate() {
        assert_eq!(matching.beta[k].0, k);
        assert_close(matching.beta[k].1, *expected);
    }
    assert!(origin_matching(&[]).alpha.is_empty());
}

#[test]
fn test_alignment_of_equal_flat_curves() {
    let alignment = FrechetConfig::new()
        .alignment(&[0.0, 0.0], &[0.0, 0.0])
        .unwrap();
    assert_eq!(alignment.distance, 0.0);
    assert!(alignment.reachable.reaches_end());
}

// ============= Induced curve =============

fn tree_a() -> MergeTree {
    let mut tree = MergeTree::new(3);
    let a1 = tree.add_leaf(5.0);
    let a2 = tree.add_leaf(4.0);
    let u = tree.add_internal(vec![a1, a2], 2.0);
    let a3 = tree.add_leaf(6.0);
    tree.add_root(vec![u, a3], 0.0);
    tree
}

#[test]
fn test_induced_curve() {
    let tree = tree_a();
    assert_eq!(
        induced_curve_with_sentinel(&tree, -1.0),
        vec![-1.0, 5.0, 2.0, 4.0, 0.0, 6.0, -1.0]
    );
    assert_eq!(
        induced_curve(&tree),
        vec![100.0, 5.0, 2.0, 4.0, 0.0, 6.0, 100.0]
    );
}

#[test]
fn test_induced_curve_of_single_vertex() {
    let mut tree = MergeTree::new(1);
    tree.add_root(vec![], 3.0);
    assert_eq!(induced_curve(&tree), vec![100.0, 3.0, 100.0]);
}

#[test]
fn test_induced_curve_follows_child_order() {
    let tree = tree_a();
    assert_eq!(
        induced_curve_with_sentinel(&tree.reversed(), -1.0),
        vec![-1.0, 6.0, 0.0, 4.0, 2.0, 5.0, -1.0]
    );
}
