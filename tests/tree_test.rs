//! Tests for BinaryTree growth, queries and layout

use std::collections::BTreeSet;

use rstest::rstest;

use bintree::domain::{BinaryTree, Position, Side, TreeBuilder, TreeError, MAX_NODES};
use bintree::util::testing;

fn internal_count(tree: &BinaryTree) -> usize {
    tree.len() - tree.leaves().len()
}

// ============================================================
// Scenarios
// ============================================================

#[test]
fn given_zero_nodes_when_building_then_has_single_root_at_origin() {
    testing::init_test_setup();
    let tree = BinaryTree::with_nodes(0).unwrap();

    assert_eq!(tree.nodes(), BTreeSet::from([0]));
    assert_eq!(tree.leaves(), BTreeSet::from([0]));
    assert_eq!(tree.root(), 0);
    assert_eq!(tree.parent(0), None);
    assert_eq!(tree.children(0), None);
    assert_eq!(tree.position(0), Some(Position::new(0.0, 0.0)));
    assert_eq!(tree.dfs_order(), &[0]);
}

#[test]
fn given_two_nodes_when_building_then_root_has_two_leaf_children() {
    let tree = BinaryTree::with_nodes(2).unwrap();

    assert_eq!(tree.children(0), Some((1, 2)));
    assert_eq!(tree.leaves(), BTreeSet::from([1, 2]));
    assert_eq!(tree.root(), 0);
    assert_eq!(tree.position(1), Some(Position::new(0.0, 1.0)));
    assert_eq!(tree.position(2), Some(Position::new(1.0, 1.0)));
    assert_eq!(tree.position(0), Some(Position::new(0.5, 0.0)));
    assert_eq!(tree.dfs_order(), &[1, 2, 0]);
}

#[test]
fn given_five_nodes_when_building_then_grows_over_two_passes() {
    let tree = BinaryTree::with_nodes(5).unwrap();

    // Pass 1 promotes 0, pass 2 promotes 1 and stops before 2
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.children(0), Some((1, 2)));
    assert_eq!(tree.children(1), Some((3, 4)));
    assert_eq!(tree.children(2), None);
    assert_eq!(tree.leaves(), BTreeSet::from([2, 3, 4]));
    assert_eq!(tree.leaves().len(), internal_count(&tree) + 1);
}

#[test]
fn given_six_nodes_when_building_then_completes_second_level() {
    let tree = BinaryTree::with_nodes(6).unwrap();

    assert_eq!(tree.len(), 7);
    assert_eq!(tree.children(1), Some((3, 4)));
    assert_eq!(tree.children(2), Some((5, 6)));
    assert_eq!(tree.arena().depth(), 3);
    assert_eq!(tree.position(0), Some(Position::new(1.5, 0.0)));
}

#[test]
fn given_existing_tree_when_adding_nodes_then_continues_from_current_size() {
    let mut tree = BinaryTree::with_nodes(2).unwrap();
    let added = tree.add_nodes(2).unwrap();

    assert_eq!(added, 2);
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.children(1), Some((3, 4)));
    // Layout refreshed after growth
    assert_eq!(tree.position(3), Some(Position::new(0.0, 2.0)));
    assert_eq!(tree.position(2), Some(Position::new(2.0, 1.0)));
}

#[test]
fn given_zero_nodes_when_adding_to_existing_tree_then_unchanged() {
    let mut tree = BinaryTree::with_nodes(4).unwrap();
    let before = tree.nodes();
    assert_eq!(tree.add_nodes(0).unwrap(), 0);
    assert_eq!(tree.nodes(), before);
}

#[test]
fn given_seed_when_building_then_uses_derived_count() {
    let builder = TreeBuilder::new().seed("to344@drexel.edu");
    let requested = builder.requested();
    assert!((17..=31).contains(&requested));

    let tree = builder.build().unwrap();
    assert!(tree.len() >= requested);
}

// ============================================================
// Invariants
// ============================================================

#[rstest]
fn given_any_target_when_building_then_full_binary_invariants_hold(
    #[values(0, 1, 2, 3, 4, 5, 7, 8, 13, 17, 24, 31, 64)] n: usize,
) {
    let tree = BinaryTree::with_nodes(n).unwrap();

    // Never fewer nodes than requested, never more than one spare
    assert!(tree.len() >= n.max(1));
    assert!(tree.len() <= n + 1);

    assert_eq!(tree.leaves().len(), internal_count(&tree) + 1);
    assert_eq!(tree.roots(), vec![0]);

    for id in tree.nodes() {
        match tree.parent(id) {
            None => assert_eq!(id, 0),
            Some(p) => {
                let (l, r) = tree.children(p).unwrap();
                assert!(id == l || id == r);
            }
        }
    }

    // Ids are dense and sequential
    let expected: BTreeSet<_> = (0..tree.len()).collect();
    assert_eq!(tree.nodes(), expected);
}

#[rstest]
fn given_any_target_when_laid_out_then_internal_nodes_sit_midway(
    #[values(2, 5, 9, 17, 30)] n: usize,
) {
    let tree = BinaryTree::with_nodes(n).unwrap();

    for id in tree.nodes() {
        let at = tree.position(id).unwrap();
        if let Some((l, r)) = tree.children(id) {
            let (pl, pr) = (tree.position(l).unwrap(), tree.position(r).unwrap());
            assert_eq!(at.x, (pl.x + pr.x) / 2.0);
            assert!(pl.x <= at.x && at.x <= pr.x);
            assert_eq!(pl.y, at.y + 1.0);
            assert_eq!(pr.y, at.y + 1.0);
        }
    }
}

#[rstest]
fn given_any_target_when_laid_out_then_leaves_count_up_left_to_right(
    #[values(0, 2, 6, 11, 25)] n: usize,
) {
    let tree = BinaryTree::with_nodes(n).unwrap();
    let leaves = tree.leaves();

    let leaf_xs: Vec<f64> = tree
        .dfs_order()
        .iter()
        .filter(|id| leaves.contains(id))
        .map(|&id| tree.position(id).unwrap().x)
        .collect();
    let expected: Vec<f64> = (0..leaves.len()).map(|i| i as f64).collect();

    assert_eq!(leaf_xs, expected);
    assert_eq!(tree.layout().leaf_count(), leaves.len());
}

#[rstest]
fn given_any_target_when_traversed_then_every_node_visited_once_children_first(
    #[values(0, 3, 10, 21)] n: usize,
) {
    let tree = BinaryTree::with_nodes(n).unwrap();
    let order = tree.dfs_order();

    assert_eq!(order.len(), tree.len());
    assert_eq!(order.iter().copied().collect::<BTreeSet<_>>(), tree.nodes());
    assert_eq!(order.last(), Some(&tree.root()));

    let rank = |id| order.iter().position(|&o| o == id).unwrap();
    for id in tree.nodes() {
        if let Some((l, r)) = tree.children(id) {
            assert!(rank(l) < rank(r));
            assert!(rank(r) < rank(id));
        }
    }
}

#[test]
fn given_unchanged_tree_when_relaying_out_then_coordinates_identical() {
    let mut tree = BinaryTree::with_nodes(19).unwrap();
    let before = tree.layout().clone();

    let after = tree.relayout().clone();

    assert_eq!(before, after);
}

// ============================================================
// Mutation guards
// ============================================================

#[test]
fn given_internal_parent_when_adding_trio_then_rejects() {
    let mut tree = BinaryTree::with_nodes(2).unwrap();
    assert_eq!(tree.add_trio(0, 3, 4), Err(TreeError::NotALeaf(0)));
}

#[test]
fn given_unknown_parent_when_adding_trio_then_rejects() {
    let mut tree = BinaryTree::new();
    assert_eq!(tree.add_trio(7, 8, 9), Err(TreeError::NodeNotFound(7)));
    assert_eq!(tree.len(), 1);
}

#[test]
fn given_reused_id_when_adding_trio_then_rejects() {
    let mut tree = BinaryTree::with_nodes(2).unwrap();
    assert_eq!(tree.add_trio(1, 2, 3), Err(TreeError::DuplicateNode(2)));
    assert_eq!(tree.add_trio(1, 3, 3), Err(TreeError::DuplicateNode(3)));
    assert_eq!(tree.leaves(), BTreeSet::from([1, 2]));
}

#[test]
fn given_manual_trio_when_added_then_sides_and_layout_follow() {
    let mut tree = BinaryTree::with_nodes(2).unwrap();
    tree.add_trio(2, 10, 11).unwrap();

    assert_eq!(tree.side(0), Ok(Side::Root));
    assert_eq!(tree.side(10), Ok(Side::Left));
    assert_eq!(tree.side(11), Ok(Side::Right));
    assert_eq!(tree.position(11), Some(Position::new(2.0, 2.0)));
    assert_eq!(tree.position(2), Some(Position::new(1.5, 1.0)));
}

#[rstest]
#[case(usize::MAX)]
#[case(usize::MAX - 1)]
#[case(MAX_NODES)]
fn given_oversized_request_when_building_then_rejects_without_growing(#[case] nodes: usize) {
    let err = BinaryTree::with_nodes(nodes).unwrap_err();
    assert_eq!(
        err,
        TreeError::TooLarge {
            existing: 1,
            requested: nodes,
            limit: MAX_NODES,
        }
    );
}

#[test]
fn given_existing_tree_when_adding_past_limit_then_tree_unchanged() {
    let mut tree = BinaryTree::with_nodes(4).unwrap();
    let before = tree.dfs_order().to_vec();

    assert!(matches!(tree.add_nodes(usize::MAX), Err(TreeError::TooLarge { .. })));
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.dfs_order(), before.as_slice());
}
