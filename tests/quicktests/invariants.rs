//! Invariant checks that only look at a tree through `Tree` and `Vertex`.

use std::collections::{BTreeMap, BTreeSet};

use bstree::{Color, Height, Relation, SearchTree, Tree, TreeError, Vertex};

use crate::Op;

type Relative<'a, T, A> = Result<Vertex<'a, T, A>, TreeError>;

/// Applies `ops` to `tree` and to a counting map standing in for a multiset, checking that
/// deletions report the same thing the map does.
pub fn do_ops<S>(ops: &[Op<S::Element>], tree: &mut S) -> BTreeMap<S::Element, usize>
where
    S: SearchTree,
    S::Element: Ord + Clone + std::fmt::Debug,
{
    let mut counts = BTreeMap::new();
    for op in ops {
        match op {
            Op::Insert(k) => {
                tree.insert(k.clone());
                *counts.entry(k.clone()).or_insert(0) += 1;
            }
            Op::Remove(k) => {
                let present = match counts.get_mut(k) {
                    Some(count) => {
                        *count -= 1;
                        if *count == 0 {
                            counts.remove(k);
                        }
                        true
                    }
                    None => false,
                };
                assert_eq!(tree.delete(k).as_ref(), present.then_some(k));
            }
        }
    }
    counts
}

/// Inserts the distinct elements of `xs`, deletes `doomed`, then checks that every id handed out
/// by an insertion still names its element, or is stale if that element was deleted.
pub fn ids_follow_elements<S>(tree: &mut S, xs: &[S::Element], doomed: &[S::Element]) -> bool
where
    S: SearchTree,
    S::Element: Ord + Clone,
{
    let distinct: BTreeSet<_> = xs.iter().cloned().collect();
    let ids: Vec<_> = distinct
        .into_iter()
        .map(|x| {
            let id = tree.insert(x.clone());
            (x, id)
        })
        .collect();
    for x in doomed {
        tree.delete(x);
    }

    ids.iter().all(|(x, id)| {
        let found = tree.vertex(*id).map(|v| v.get() == x);
        if doomed.contains(x) {
            found == Err(TreeError::NotFound(Relation::Vertex))
        } else {
            found == Ok(true)
        }
    })
}

/// Whether the tree holds exactly the multiset in `counts`, in ascending order.
pub fn holds<S>(tree: &S, counts: &BTreeMap<S::Element, usize>) -> bool
where
    S: Tree,
    S::Element: Ord,
{
    let expected = counts
        .iter()
        .flat_map(|(k, n)| std::iter::repeat(k).take(*n));
    tree.len() == counts.values().sum::<usize>() && tree.iter().eq(expected)
}

/// Panics unless parent links agree with child links and the visitors see the ordering.
pub fn assert_ordered<S>(tree: &S)
where
    S: Tree,
    S::Element: Ord + std::fmt::Debug,
{
    let mut in_order = Vec::new();
    tree.for_each_in_order(|vertex| {
        for child in [vertex.left(), vertex.right()].into_iter().flatten() {
            assert_eq!(child.parent().map(|p| p.id()), Ok(vertex.id()));
        }
        in_order.push(vertex.get());
    });
    assert!(in_order.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(in_order.len(), tree.len());
    if let Ok(root) = tree.root() {
        assert!(!root.has_parent());
    }
}

/// Checks the cached heights and balances below `vertex` and returns its height.
pub fn avl_height<T>(vertex: Relative<'_, T, Height>) -> i32 {
    let Ok(vertex) = vertex else {
        return -1;
    };
    let left = avl_height(vertex.left());
    let right = avl_height(vertex.right());
    assert_eq!(vertex.height(), 1 + left.max(right));
    assert_eq!(vertex.balance(), left - right);
    assert!(vertex.balance().abs() <= 1);
    vertex.height()
}

/// Checks the coloring rules below `vertex` and returns its black height.
pub fn black_height<T>(vertex: Relative<'_, T, Color>) -> usize {
    let Ok(vertex) = vertex else {
        return 1;
    };
    let is_black = |v: Relative<'_, T, Color>| v.map_or(true, |v| v.color() == Color::Black);
    match vertex.color() {
        Color::Red => assert!(is_black(vertex.left()) && is_black(vertex.right())),
        Color::Black => {}
        Color::Uncolored => panic!("Uncolored vertex left in the tree"),
    }

    let left = black_height(vertex.left());
    assert_eq!(left, black_height(vertex.right()));
    left + usize::from(vertex.color() == Color::Black)
}

/// Panics unless the root is black and every coloring rule holds.
pub fn assert_red_black<S>(tree: &S)
where
    S: Tree<Augment = Color>,
{
    if let Ok(root) = tree.root() {
        assert_eq!(root.color(), Color::Black);
    }
    black_height(tree.root());
}

/// Renders every vertex label, in pre-order.
pub fn labels<S>(tree: &S) -> Vec<String>
where
    S: Tree,
    S::Element: std::fmt::Display,
{
    let mut labels = Vec::new();
    tree.for_each_pre_order(|vertex| labels.push(vertex.to_string()));
    labels
}
