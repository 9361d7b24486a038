use bstree::{OrderedTree, SearchTree, Tree, TreeError};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use crate::invariants::{assert_ordered, do_ops, holds, ids_follow_elements};
use crate::Op;

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = OrderedTree::new();

    let counts = do_ops(&ops, &mut tree);
    assert_ordered(&tree);
    holds(&tree, &counts)
}

#[quickcheck]
fn ids_survive_deletes(xs: Vec<i8>, doomed: Vec<i8>) -> bool {
    ids_follow_elements(&mut OrderedTree::new(), &xs, &doomed)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.search(x).map(|v| *v.get()) == Some(*x))
}

#[quickcheck]
fn insert_then_delete_round_trips(xs: Vec<i8>, x: i8) -> TestResult {
    // A duplicate may be found higher up than the new leaf, and deleting that one reshapes.
    if xs.contains(&x) {
        return TestResult::discard();
    }
    let mut tree: OrderedTree<_> = xs.into_iter().collect();
    let before = tree.clone();

    tree.insert(x);
    tree.delete(&x);
    TestResult::from_bool(tree == before)
}

#[quickcheck]
fn rotations_keep_the_order(xs: Vec<i8>, picks: Vec<(usize, bool)>) -> bool {
    let mut tree: OrderedTree<_> = xs.into_iter().collect();
    let mut ids = Vec::new();
    tree.for_each_level_order(|vertex| ids.push(vertex.id()));
    let before: Vec<i8> = tree.iter().copied().collect();

    for (pick, left) in picks {
        if ids.is_empty() {
            break;
        }
        let id = ids[pick % ids.len()];
        let rotated = if left {
            tree.rotate_left(id)
        } else {
            tree.rotate_right(id)
        };
        assert_eq!(rotated, Ok(()));
        assert_ordered(&tree);
    }
    tree.iter().copied().eq(before)
}

#[test]
fn absent_elements_are_rejected() {
    let mut tree = OrderedTree::<i8>::new();

    assert_eq!(tree.try_insert(None), Err(TreeError::InvalidArgument));
    assert!(tree.is_empty());
    assert!(tree.try_insert(Some(1)).is_ok());
    assert_eq!(tree.len(), 1);
}
