//! Edit script properties: replay correctness, identity and partial ordering.

use std::collections::HashMap;

use rstest::rstest;

use treediff::domain::{DomainError, EditOp, EditScript, NodeId, Tree, TreeCodec};
use treediff::util::testing;

fn decode(text: &str) -> Tree {
    TreeCodec::default().decode(text).expect("valid edge list")
}

/// Parent of every node in `tree`.
fn parents(tree: &Tree) -> HashMap<NodeId, NodeId> {
    tree.edges().into_iter().map(|(p, c)| (c, p)).collect()
}

fn is_ancestor(parents: &HashMap<NodeId, NodeId>, ancestor: NodeId, mut node: NodeId) -> bool {
    while let Some(&parent) = parents.get(&node) {
        if parent == ancestor {
            return true;
        }
        node = parent;
    }
    false
}

fn position(script: &EditScript, op: EditOp) -> usize {
    script
        .position_of(&op)
        .unwrap_or_else(|| panic!("{} missing from {}", op, script))
}

#[rstest]
#[case::identical("[1,2][1,3][2,4]", "[1,2][1,3][2,4]")]
#[case::leaf_removed("[1,2][1,3][2,4]", "[1,2][1,3]")]
#[case::leaf_added("[1,2][1,3]", "[1,2][1,3][2,4]")]
#[case::subtree_removed("[1,2][2,3][2,4][4,5][1,6]", "[1,6]")]
#[case::subtree_added("[1,6]", "[1,2][2,3][2,4][4,5][1,6]")]
#[case::rename("[1,2][2,3]", "[1,9][9,3]")]
#[case::move_up("[1,2][2,4][4,7]", "[1,2][1,4][4,7]")]
#[case::move_down("[1,2][1,4][4,7]", "[1,2][2,4][4,7]")]
#[case::swap_parent_child("[1,2][2,3]", "[1,3][3,2]")]
#[case::to_empty("[1,2][1,3][3,4][3,5]", "")]
#[case::from_empty("", "[1,2][1,3][3,4][3,5]")]
#[case::mixed("[1,2][1,3][2,4][2,5][3,6][6,7]", "[1,3][1,8][3,6][6,9][8,2][2,5]")]
#[case::negative_ids("[1,-2][-2,-3]", "[1,-3][-3,-2]")]
fn given_two_trees_when_replaying_script_then_reaches_target(#[case] from: &str, #[case] to: &str) {
    testing::init_test_setup();
    let original = decode(from);
    let target = decode(to);

    let mut receiver = original.clone();
    let script = receiver.transform_to(&target).unwrap();

    assert_eq!(receiver, target, "receiver transformed in place");
    let mut replay = original.clone();
    replay.apply_script(&script).expect("every step applicable");
    assert_eq!(replay, target, "script: {}", script);
}

#[rstest]
#[case("")]
#[case("[1,2]")]
#[case("[1,2][1,3][2,4][4,5][4,6]")]
fn given_equal_trees_when_diffing_then_script_empty(#[case] text: &str) {
    let tree = decode(text);
    let copy = decode(text);

    assert!(tree.diff(&copy).unwrap().is_empty());
}

#[test]
fn given_sample_when_diffing_both_ways_then_single_steps() {
    let full = decode("[1,2][1,3][2,4]");
    let pruned = decode("[1,2][1,3]");

    assert_eq!(full.diff(&pruned).unwrap().to_strings(), vec!["REMOVE(4)"]);
    assert_eq!(pruned.diff(&full).unwrap().to_strings(), vec!["ADD(2,4)"]);
}

#[test]
fn given_removed_subtree_when_diffing_then_descendants_removed_before_ancestors() {
    let source = decode("[1,2][2,3][2,4][4,5][4,6][6,7][1,8]");
    let target = decode("[1,8]");
    let source_parents = parents(&source);

    let script = source.diff(&target).unwrap();

    let removed: Vec<NodeId> = script
        .iter()
        .filter_map(|op| match op {
            EditOp::Remove { node } => Some(*node),
            EditOp::Add { .. } => None,
        })
        .collect();
    assert_eq!(removed.len(), 6);
    for &ancestor in &removed {
        for &descendant in &removed {
            if is_ancestor(&source_parents, ancestor, descendant) {
                assert!(
                    position(&script, EditOp::Remove { node: descendant })
                        < position(&script, EditOp::Remove { node: ancestor }),
                    "{} must go before {} in {}",
                    descendant,
                    ancestor,
                    script
                );
            }
        }
    }
}

#[test]
fn given_added_subtree_when_diffing_then_descendant_edges_before_attachment() {
    let source = decode("[1,8]");
    let target = decode("[1,2][2,3][2,4][4,5][4,6][6,7][1,8]");
    let target_parents = parents(&target);

    let script = source.diff(&target).unwrap();

    assert_eq!(script.len(), 6);
    for op in &script {
        let EditOp::Add { parent, node } = *op else {
            panic!("unexpected {}", op);
        };
        assert_eq!(target_parents.get(&node), Some(&parent));
        // every added node hangs below the root or below another added node
        if let Some(&grandparent) = target_parents.get(&parent) {
            assert!(
                position(&script, *op)
                    < position(&script, EditOp::Add { parent: grandparent, node: parent })
            );
        }
    }
}

#[test]
fn given_move_when_diffing_then_removal_precedes_readdition() {
    let source = decode("[1,2][1,3][3,4][4,5]");
    let target = decode("[1,2][1,3][2,4][4,5]");

    let script = source.diff(&target).unwrap();

    assert_eq!(
        script.to_strings(),
        vec!["REMOVE(5)", "REMOVE(4)", "ADD(4,5)", "ADD(2,4)"]
    );
}

#[test]
fn given_different_roots_when_transforming_then_no_script_and_receiver_untouched() {
    let mut source = decode("[1,2]");
    let target = decode("[2,3]");
    let before = source.clone();

    let result = source.transform_to(&target);

    assert!(matches!(
        result,
        Err(DomainError::RootMismatch {
            source_root: 1,
            target_root: 2
        })
    ));
    assert_eq!(source, before);
}

#[test]
fn given_script_when_joining_with_delimiter_then_matches_cli_format() {
    let script = decode("[1,2][2,3]").diff(&decode("[1,2]")).unwrap();

    assert_eq!(script.join(", "), "REMOVE(3)");
    assert_eq!(script.to_string(), "REMOVE(3)");
}
