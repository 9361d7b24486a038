use bstree::{Color, RedBlackTree, SearchTree, Tree, TreeError};
use quickcheck_macros::quickcheck;

use crate::invariants::{
    assert_ordered, assert_red_black, do_ops, holds, ids_follow_elements, labels,
};
use crate::Op;

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let _ = pretty_env_logger::try_init();
    let mut tree = RedBlackTree::new();

    let counts = do_ops(&ops, &mut tree);
    assert_ordered(&tree);
    assert_red_black(&tree);
    holds(&tree, &counts)
}

#[quickcheck]
fn ids_survive_deletes(xs: Vec<i8>, doomed: Vec<i8>) -> bool {
    ids_follow_elements(&mut RedBlackTree::new(), &xs, &doomed)
}

#[quickcheck]
fn deletions_leave_no_placeholder(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: RedBlackTree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.delete(delete);
        assert_red_black(&tree);
    }

    let mut visited = 0;
    tree.for_each_level_order(|vertex| {
        assert_ne!(vertex.color(), Color::Uncolored);
        visited += 1;
    });
    visited == tree.len()
}

#[quickcheck]
fn rotations_never_touch_the_tree(xs: Vec<i8>) -> bool {
    let mut tree: RedBlackTree<_> = xs.into_iter().collect();
    let before = tree.clone();
    let mut ids = Vec::new();
    tree.for_each_pre_order(|vertex| ids.push(vertex.id()));

    ids.into_iter().all(|id| {
        tree.rotate_left(id) == Err(TreeError::Unsupported("Red-black"))
            && tree.rotate_right(id) == Err(TreeError::Unsupported("Red-black"))
    }) && tree == before
}

#[test]
fn three_ascending_inserts() {
    let tree: RedBlackTree<_> = [10, 20, 30].into_iter().collect();

    assert_eq!(labels(&tree), ["B{20}", "R{10}", "R{30}"]);
}

#[test]
fn ascending_then_delete_the_middle() {
    let _ = pretty_env_logger::try_init();
    let mut tree: RedBlackTree<_> = (1..=15).collect();
    assert_red_black(&tree);

    assert_eq!(tree.delete(&8), Some(8));
    assert_red_black(&tree);
    assert_ordered(&tree);
    assert_eq!(tree.len(), 14);
    assert!(tree.search(&8).is_none());
}
