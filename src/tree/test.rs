use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::tree::{Score, ScoreTree};
use super::Idx;

// Test Helpers --------------------------------------------------------------------------------------------------------

fn score(user: i64, value: i64) -> Score {
    Score { user, value }
}

// Build a tree, checking structural invariants after every insert.
fn tree_from(scores: &[Score]) -> ScoreTree {
    let mut tree = ScoreTree::new();
    for s in scores {
        tree.insert(*s);
        assert_invariants(&tree);
    }
    tree
}

// Expected enumeration: value descending, ties broken by later insertion.
fn ranked(inserted: &[Score]) -> Vec<Score> {
    let mut indexed: Vec<(usize, Score)> = inserted.iter().cloned().enumerate().collect();
    indexed.sort_by(|a, b| b.1.value.cmp(&a.1.value).then(b.0.cmp(&a.0)));
    indexed.into_iter().map(|(_, s)| s).collect()
}

// Mirror of the facade's update flow at tree level: remove, accumulate,
// re-insert. Returns the new cell handle and the accumulated total.
fn apply_update(tree: &mut ScoreTree, idx: Idx, delta: i64) -> (Idx, i64) {
    let removed = tree.remove(idx);
    assert!(
        removed.left_idx.is_none() && removed.right_idx.is_none() && removed.parent_idx.is_none(),
        "removed cell still linked!"
    );
    let total = removed.score + delta;
    let new_idx = tree.insert(score(removed.user, total));
    (new_idx, total)
}

// Verify the structural invariants on every reachable cell:
// 1. BST order: left subtree strictly below, right subtree at or above.
// 2. lsize/rsize equal an exact recount of the subtrees.
// 3. Parent back-links agree with child links; no cell has two parents.
fn assert_invariants(tree: &ScoreTree) {
    match tree.root_idx {
        Some(root_idx) => {
            assert!(
                tree.arena.node(root_idx).parent_idx.is_none(),
                "root cell has a parent!"
            );
            let mut seen: Vec<Idx> = Vec::new();
            let reachable = check_subtree(tree, root_idx, &mut seen);
            assert_eq!(reachable, tree.len(), "reachable cells diverge from len!");
            let dedup: HashSet<Idx> = seen.iter().cloned().collect();
            assert_eq!(dedup.len(), seen.len(), "cell with multiple parents!");
        }
        None => assert_eq!(tree.len(), 0),
    }
}

fn check_subtree(tree: &ScoreTree, idx: Idx, seen: &mut Vec<Idx>) -> usize {
    seen.push(idx);
    let node = tree.arena.node(idx);
    let mut size = 1;

    if let Some(left_idx) = node.left_idx {
        let left = tree.arena.node(left_idx);
        assert!(left.score < node.score, "left child at or above parent!");
        assert_eq!(left.parent_idx, Some(idx), "left child parent link broken!");
        let left_size = check_subtree(tree, left_idx, seen);
        assert_eq!(node.lsize, left_size, "lsize diverges from recount!");
        size += left_size;
    } else {
        assert_eq!(node.lsize, 0, "lsize nonzero without a left child!");
    }

    if let Some(right_idx) = node.right_idx {
        let right = tree.arena.node(right_idx);
        assert!(right.score >= node.score, "right child below parent!");
        assert_eq!(right.parent_idx, Some(idx), "right child parent link broken!");
        let right_size = check_subtree(tree, right_idx, seen);
        assert_eq!(node.rsize, right_size, "rsize diverges from recount!");
        size += right_size;
    } else {
        assert_eq!(node.rsize, 0, "rsize nonzero without a right child!");
    }

    size
}

// Tests ---------------------------------------------------------------------------------------------------------------

#[test]
fn test_insert_orders_ties_later_first() {
    let inserted = [score(0, 7), score(9, 6), score(8, 6), score(6, 5)];
    let tree = tree_from(&inserted);

    let enumerated: Vec<Score> = tree.iter().collect();
    assert_eq!(enumerated, ranked(&inserted));
    // Of the two sixes, user 8 was recorded later and outranks user 9
    assert_eq!(
        enumerated,
        vec![score(0, 7), score(8, 6), score(9, 6), score(6, 5)]
    );
}

#[test]
fn test_top_matches_enumeration() {
    let inserted = [
        score(1, 2),
        score(2, 1),
        score(3, 10),
        score(4, 8),
        score(5, 9),
        score(6, 6),
        score(7, 7),
    ];
    let tree = tree_from(&inserted);
    let full = ranked(&inserted);

    for k in 0..=(inserted.len() as i64 + 2) {
        let expected: Vec<Score> = full.iter().take(k as usize).cloned().collect();
        assert_eq!(tree.top(k), expected, "top({}) diverged", k);
    }
    assert!(tree.top(-3).is_empty());
}

#[test]
fn test_top_on_empty_tree() {
    let tree = ScoreTree::new();
    assert!(tree.top(5).is_empty());
    assert!(tree.range(1, 2).is_empty());
}

#[test]
fn test_range_basic_window() {
    // Ranks [3, 5] of four scores: the bottom two
    let tree = tree_from(&[score(0, 3), score(1, 1), score(2, 5), score(3, 2)]);
    assert_eq!(tree.range(4, 1), vec![score(3, 2), score(1, 1)]);
}

#[test]
fn test_range_window_with_ties() {
    let tree = tree_from(&[score(0, 7), score(9, 6), score(8, 6), score(6, 5)]);
    assert_eq!(tree.range(4, 1), vec![score(9, 6), score(6, 5)]);
}

#[test]
fn test_range_windows_match_enumeration() {
    let inserted = [
        score(1, 2),
        score(2, 1),
        score(3, 10),
        score(4, 8),
        score(5, 9),
        score(6, 6),
        score(7, 7),
    ];
    let tree = tree_from(&inserted);
    let full = ranked(&inserted);
    let len = full.len() as i64;

    for position in -2..=(len + 3) {
        for count in 0..=4 {
            let lo = (position - count).max(1) - 1;
            let hi = (position + count).min(len).max(0);
            let expected: Vec<Score> = if lo < hi {
                full[lo as usize..hi as usize].to_vec()
            } else {
                Vec::new()
            };
            assert_eq!(
                tree.range(position, count),
                expected,
                "range({}, {}) diverged",
                position,
                count
            );
        }
    }
}

#[test]
fn test_update_leaf() {
    let mut tree = ScoreTree::new();
    tree.insert(score(1, 5));
    let leaf_idx = tree.insert(score(2, 3));
    tree.insert(score(3, 7));

    let (_, total) = apply_update(&mut tree, leaf_idx, 10);
    assert_eq!(total, 13);
    assert_invariants(&tree);
    assert_eq!(tree.len(), 3);
    assert_eq!(
        tree.iter().collect::<Vec<Score>>(),
        vec![score(2, 13), score(3, 7), score(1, 5)]
    );
}

#[test]
fn test_update_cell_with_one_child() {
    let mut tree = ScoreTree::new();
    tree.insert(score(1, 5));
    let mid_idx = tree.insert(score(2, 3));
    tree.insert(score(3, 2));

    let (_, total) = apply_update(&mut tree, mid_idx, 1);
    assert_eq!(total, 4);
    assert_invariants(&tree);
    assert_eq!(
        tree.iter().collect::<Vec<Score>>(),
        vec![score(1, 5), score(2, 4), score(3, 2)]
    );
}

#[test]
fn test_update_cell_with_direct_successor() {
    // Target's right child has no left subtree, so it takes over directly
    let mut tree = ScoreTree::new();
    tree.insert(score(1, 5));
    tree.insert(score(2, 3));
    let target_idx = tree.insert(score(3, 8));
    tree.insert(score(4, 9));
    tree.insert(score(5, 7));

    let (_, total) = apply_update(&mut tree, target_idx, 2);
    assert_eq!(total, 10);
    assert_invariants(&tree);
    assert_eq!(
        tree.iter().collect::<Vec<Score>>(),
        vec![score(3, 10), score(4, 9), score(5, 7), score(1, 5), score(2, 3)]
    );
}

#[test]
fn test_update_cell_with_deep_successor() {
    // The successor sits at the bottom of the right subtree's left spine
    let mut tree = ScoreTree::new();
    tree.insert(score(1, 1));
    let target_idx = tree.insert(score(2, 10));
    tree.insert(score(3, 5));
    tree.insert(score(4, 20));
    tree.insert(score(5, 12));

    let (_, total) = apply_update(&mut tree, target_idx, 5);
    assert_eq!(total, 15);
    assert_invariants(&tree);
    assert_eq!(
        tree.iter().collect::<Vec<Score>>(),
        vec![score(4, 20), score(2, 15), score(5, 12), score(3, 5), score(1, 1)]
    );
}

#[test]
fn test_update_root_with_two_children() {
    let mut tree = ScoreTree::new();
    let root_idx = tree.insert(score(1, 2));
    for s in &[
        score(2, 1),
        score(3, 10),
        score(4, 8),
        score(5, 9),
        score(6, 6),
        score(7, 7),
    ] {
        tree.insert(*s);
    }

    let (_, total) = apply_update(&mut tree, root_idx, 5);
    assert_eq!(total, 7);
    assert_invariants(&tree);
    // User 1 re-enters with value 7 and now outranks the earlier 7
    assert_eq!(
        tree.iter().collect::<Vec<Score>>(),
        vec![
            score(3, 10),
            score(5, 9),
            score(4, 8),
            score(1, 7),
            score(7, 7),
            score(6, 6),
            score(2, 1),
        ]
    );
}

#[test]
fn test_update_root_leaf() {
    let mut tree = ScoreTree::new();
    let root_idx = tree.insert(score(1, 5));

    let (_, total) = apply_update(&mut tree, root_idx, 3);
    assert_eq!(total, 8);
    assert_invariants(&tree);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.iter().collect::<Vec<Score>>(), vec![score(1, 8)]);
}

#[test]
fn test_update_root_with_one_child() {
    let mut tree = ScoreTree::new();
    let root_idx = tree.insert(score(1, 5));
    tree.insert(score(2, 3));

    // Negative increments are allowed; the key just moves down
    let (_, total) = apply_update(&mut tree, root_idx, -1);
    assert_eq!(total, 4);
    assert_invariants(&tree);
    assert_eq!(
        tree.iter().collect::<Vec<Score>>(),
        vec![score(1, 4), score(2, 3)]
    );
}

#[test]
fn test_remove_detaches_cell() {
    let mut tree = ScoreTree::new();
    tree.insert(score(1, 5));
    let target_idx = tree.insert(score(2, 3));
    tree.insert(score(3, 7));

    let removed = tree.remove(target_idx);
    assert_eq!(removed.user, 2);
    assert_eq!(removed.score, 3);
    assert!(removed.left_idx.is_none());
    assert!(removed.right_idx.is_none());
    assert!(removed.parent_idx.is_none());
    assert_eq!((removed.lsize, removed.rsize), (0, 0));

    assert_eq!(tree.len(), 2);
    assert_invariants(&tree);
}

// Randomized differential test: every operation preserves the structural
// invariants, the enumeration matches a shadow model ordered by
// (value desc, recency desc), and the pruned queries agree with the
// enumeration.
#[test]
fn test_rand_ops_match_shadow_model() {
    let mut rng = SmallRng::seed_from_u64(0x5C0_12E5);

    for _ in 0..20 {
        let mut tree = ScoreTree::new();
        let mut shadow: Vec<Score> = Vec::new();
        let mut handles: Vec<(i64, Idx)> = Vec::new();
        let mut next_user = 0i64;

        for _ in 0..60 {
            let add_new = handles.is_empty() || rng.gen_range(0, 100) < 60;
            if add_new {
                let s = score(next_user, rng.gen_range(0, 12));
                next_user += 1;
                let idx = tree.insert(s);
                handles.push((s.user, idx));
                shadow.push(s);
            } else {
                let pick = rng.gen_range(0, handles.len());
                let (user, idx) = handles[pick];
                let delta = rng.gen_range(-6, 7);
                let (new_idx, total) = apply_update(&mut tree, idx, delta);
                handles[pick] = (user, new_idx);

                let pos = shadow.iter().position(|s| s.user == user).unwrap();
                let old = shadow.remove(pos);
                assert_eq!(old.value + delta, total);
                shadow.push(score(user, total));
            }

            assert_invariants(&tree);
            let enumerated: Vec<Score> = tree.iter().collect();
            assert_eq!(enumerated, ranked(&shadow));

            // Spot-check the pruned queries against the enumeration
            let len = shadow.len() as i64;
            let k = rng.gen_range(0, len + 2);
            assert_eq!(tree.top(k), enumerated[..k.min(len) as usize].to_vec());

            let position = rng.gen_range(-1, len + 2);
            let count = rng.gen_range(0, 4);
            let lo = (position - count).max(1) - 1;
            let hi = (position + count).min(len).max(0);
            let expected: Vec<Score> = if lo < hi {
                enumerated[lo as usize..hi as usize].to_vec()
            } else {
                Vec::new()
            };
            assert_eq!(tree.range(position, count), expected);
        }
    }
}
