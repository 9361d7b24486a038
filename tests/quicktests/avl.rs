use bstree::{AvlTree, SearchTree, Tree, TreeError};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use crate::invariants::{assert_ordered, avl_height, do_ops, holds, ids_follow_elements, labels};
use crate::Op;

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let _ = pretty_env_logger::try_init();
    let mut tree = AvlTree::new();

    let counts = do_ops(&ops, &mut tree);
    assert_ordered(&tree);
    avl_height(tree.root()) == tree.height() && holds(&tree, &counts)
}

#[quickcheck]
fn ids_survive_deletes(xs: Vec<i8>, doomed: Vec<i8>) -> bool {
    ids_follow_elements(&mut AvlTree::new(), &xs, &doomed)
}

#[quickcheck]
fn insert_then_delete_keeps_the_contents(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: AvlTree<_> = xs.into_iter().collect();
    let before: Vec<i8> = tree.iter().copied().collect();

    tree.insert(x);
    tree.delete(&x);
    avl_height(tree.root());
    tree.iter().copied().eq(before)
}

#[quickcheck]
fn rotations_never_touch_the_tree(xs: Vec<i8>) -> bool {
    let mut tree: AvlTree<_> = xs.into_iter().collect();
    let before = tree.clone();
    let mut ids = Vec::new();
    tree.for_each_post_order(|vertex| ids.push(vertex.id()));

    ids.into_iter().all(|id| {
        tree.rotate_left(id) == Err(TreeError::Unsupported("AVL"))
            && tree.rotate_right(id) == Err(TreeError::Unsupported("AVL"))
    }) && tree == before
}

#[test]
fn ascending_inserts_build_a_perfect_tree() {
    let tree: AvlTree<_> = (1..=7).collect();

    let root = tree.root().unwrap();
    assert_eq!(root.get(), &4);
    assert_eq!(root.left().unwrap().height(), 1);
    assert_eq!(root.right().unwrap().height(), 1);
    assert_eq!(
        labels(&tree),
        ["4 2/0", "2 1/0", "1 0/0", "3 0/0", "6 1/0", "5 0/0", "7 0/0"]
    );
}

#[test]
fn errors_read_well() {
    let tree = AvlTree::<i8>::new();

    assert_eq!(tree.root().unwrap_err().to_string(), "There is no root vertex.");
    assert_eq!(
        TreeError::Unsupported("AVL").to_string(),
        "AVL trees cannot be rotated from outside their rebalancing code."
    );
}

#[quickcheck]
fn deleting_an_absent_element_changes_nothing(xs: Vec<i8>, x: i8) -> TestResult {
    if xs.contains(&x) {
        return TestResult::discard();
    }
    let mut tree: AvlTree<_> = xs.into_iter().collect();
    let before = tree.clone();

    TestResult::from_bool(tree.delete(&x).is_none() && tree == before)
}
