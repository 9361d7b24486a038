//! A red-black binary search tree.
//!
//! Every vertex is colored red or black so that:
//!
//! 1. the root is black,
//! 2. a red vertex only has black children (absent children count as black), and
//! 3. every path from a vertex down to an absent child passes the same number of black vertices.
//!
//! The longest root-to-leaf path is then at most twice the shortest, which keeps the height
//! `O(lg N)`. Insertions and deletions restore the coloring by recoloring and rotating on the way
//! back up to the root.
//!
//! # Examples
//!
//! ```
//! use bstree::{Color, RedBlackTree, SearchTree, Tree};
//!
//! let mut tree: RedBlackTree<_> = [10, 20, 30].into_iter().collect();
//!
//! let root = tree.root().unwrap();
//! assert_eq!(root.get(), &20);
//! assert_eq!(root.color(), Color::Black);
//! assert_eq!(root.left().unwrap().color(), Color::Red);
//! assert_eq!(tree.to_string(), "B{20}\n├─›R{10}\n└─»R{30}\n");
//!
//! tree.delete(&10);
//! assert_eq!(tree.to_string(), "B{20}\n└─»R{30}\n");
//! ```

use std::fmt;

use crate::augment::Augmentation;
use crate::error::TreeError;
use crate::node::{Link, NodeId};
use crate::ordered::{OrderedTree, SearchTree};
use crate::tree::{BinaryTree, Tree};
use crate::vertex::Vertex;

/// The color of a red-black vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// Red.
    Red,
    /// Black.
    Black,
    /// The color a vertex is created with, there only so that `Color` has a default. Insertion
    /// paints new vertices red and the deletion placeholder is black, so no vertex is left
    /// uncolored once a public call returns.
    #[default]
    Uncolored,
}

impl Augmentation for Color {
    fn fmt_vertex<T: fmt::Display>(
        vertex: &Vertex<'_, T, Self>,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match vertex.color() {
            Color::Red => write!(f, "R{{{}}}", vertex.get()),
            Color::Black => write!(f, "B{{{}}}", vertex.get()),
            Color::Uncolored => write!(f, "{}", vertex.get()),
        }
    }
}

impl<'a, T> Vertex<'a, T, Color> {
    /// The color of this vertex.
    pub fn color(&self) -> Color {
        *self.augmentation()
    }
}

/// A self-balancing binary search tree keeping the red-black coloring rules.
#[derive(Clone)]
pub struct RedBlackTree<T> {
    tree: OrderedTree<T, Color>,
}

impl<T: Ord> RedBlackTree<T> {
    /// Generates a new, empty `RedBlackTree`.
    pub fn new() -> Self {
        Self::default()
    }

    fn vertices(&self) -> &BinaryTree<T, Color> {
        self.tree.structure()
    }

    fn vertices_mut(&mut self) -> &mut BinaryTree<T, Color> {
        self.tree.structure_mut()
    }

    fn is_red(&self, link: Link) -> bool {
        link.map_or(false, |id| self.vertices().node(id).augment == Color::Red)
    }

    fn color_of(&self, id: NodeId) -> Color {
        self.vertices().node(id).augment
    }

    fn paint(&mut self, link: Link, color: Color) {
        if let Some(id) = link {
            self.vertices_mut().node_mut(id).augment = color;
        }
    }

    /// The children of `s` nearest to and farthest from its sibling.
    fn nephews(&self, s: NodeId, sibling_is_left: bool) -> (Link, Link) {
        let (left, right) = (self.vertices().left(s), self.vertices().right(s));
        if sibling_is_left {
            (left, right)
        } else {
            (right, left)
        }
    }

    /// Restores the coloring after `v` was inserted as a red leaf.
    fn fix_insert(&mut self, mut v: NodeId) {
        loop {
            let Some(mut p) = self.vertices().parent(v) else {
                log::trace!("{v:?} is the root");
                self.paint(Some(v), Color::Black);
                return;
            };
            if !self.is_red(Some(p)) {
                return;
            }

            let g = self
                .vertices()
                .parent(p)
                .expect("A red vertex is never the root");
            let uncle = self.vertices().sibling(p);
            if self.is_red(uncle) {
                log::trace!("red uncle of {v:?}, moving up to {g:?}");
                self.paint(uncle, Color::Black);
                self.paint(Some(p), Color::Black);
                self.paint(Some(g), Color::Red);
                v = g;
                continue;
            }

            if self.vertices().is_left_child(p) != self.vertices().is_left_child(v) {
                log::trace!("zig-zag at {v:?}");
                if self.vertices().is_left_child(p) {
                    self.vertices_mut().rotate_left(p);
                } else {
                    self.vertices_mut().rotate_right(p);
                }
                std::mem::swap(&mut p, &mut v);
            }

            log::trace!("zig-zig at {v:?}");
            self.paint(Some(p), Color::Black);
            self.paint(Some(g), Color::Red);
            if self.vertices().is_left_child(v) {
                self.vertices_mut().rotate_right(g);
            } else {
                self.vertices_mut().rotate_left(g);
            }
            return;
        }
    }

    /// Restores the coloring after a black vertex was removed from above the black vertex `v`,
    /// leaving every path through `v` one black vertex short.
    fn fix_delete(&mut self, mut v: NodeId) {
        loop {
            let Some(mut p) = self.vertices().parent(v) else {
                return;
            };
            let mut s = self
                .vertices()
                .sibling(v)
                .expect("A vertex short of a black has a sibling");

            if self.is_red(Some(s)) {
                log::trace!("red sibling of {v:?}");
                self.paint(Some(s), Color::Black);
                self.paint(Some(p), Color::Red);
                if self.vertices().is_left_child(v) {
                    self.vertices_mut().rotate_left(p);
                } else {
                    self.vertices_mut().rotate_right(p);
                }
                p = self.vertices().parent(v).expect("Rotating kept the parent");
                s = self
                    .vertices()
                    .sibling(v)
                    .expect("The red sibling's child is the new sibling");
            }

            let v_is_left = self.vertices().is_left_child(v);
            let (near, mut far) = self.nephews(s, v_is_left);

            if !self.is_red(near) && !self.is_red(far) {
                self.paint(Some(s), Color::Red);
                if self.is_red(Some(p)) {
                    log::trace!("black nephews of {v:?}, red parent");
                    self.paint(Some(p), Color::Black);
                    return;
                }
                log::trace!("black nephews of {v:?}, moving up to {p:?}");
                v = p;
                continue;
            }

            if !self.is_red(far) {
                log::trace!("near red nephew of {v:?}");
                self.paint(Some(s), Color::Red);
                self.paint(near, Color::Black);
                if v_is_left {
                    self.vertices_mut().rotate_right(s);
                } else {
                    self.vertices_mut().rotate_left(s);
                }
                s = self
                    .vertices()
                    .sibling(v)
                    .expect("The near nephew became the sibling");
                far = self.nephews(s, v_is_left).1;
            }

            log::trace!("far red nephew of {v:?}");
            let parent_color = self.color_of(p);
            self.paint(Some(s), parent_color);
            self.paint(Some(p), Color::Black);
            self.paint(far, Color::Black);
            if v_is_left {
                self.vertices_mut().rotate_left(p);
            } else {
                self.vertices_mut().rotate_right(p);
            }
            return;
        }
    }

    /// Panics unless the tree is a valid binary search tree keeping every coloring rule.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        self.tree.check_consistency();
        let vertices = self.vertices();
        if let Some(root) = vertices.root_link() {
            assert_eq!(self.color_of(root), Color::Black, "The root is not black");
        }
        vertices.pre_order(|id| {
            let node = vertices.node(id);
            assert_ne!(node.augment, Color::Uncolored, "Uncolored vertex");
            if node.augment == Color::Red {
                assert!(
                    !self.is_red(node.left) && !self.is_red(node.right),
                    "Red vertex with a red child"
                );
            }
        });
        self.black_height(vertices.root_link());
    }

    /// Black vertices on every path from `link` down to an absent child, counting the absent
    /// child itself.
    #[cfg(any(test, feature = "consistency_check"))]
    fn black_height(&self, link: Link) -> usize {
        let Some(id) = link else {
            return 1;
        };
        let node = self.vertices().node(id);
        let left = self.black_height(node.left);
        let right = self.black_height(node.right);
        assert_eq!(left, right, "Uneven black heights below {id:?}");
        left + usize::from(node.augment == Color::Black)
    }

    fn after_mutation(&self) {
        #[cfg(feature = "consistency_check")]
        self.check_consistency();
    }
}

impl<T: Ord> Tree for RedBlackTree<T> {
    type Element = T;
    type Augment = Color;

    fn structure(&self) -> &BinaryTree<T, Color> {
        self.vertices()
    }

    fn search(&self, element: &T) -> Option<Vertex<'_, T, Color>> {
        self.tree.search(element)
    }
}

impl<T: Ord> SearchTree for RedBlackTree<T> {
    fn insert(&mut self, element: T) -> NodeId {
        let id = self.tree.insert_leaf(element);
        self.paint(Some(id), Color::Red);
        self.fix_insert(id);
        self.after_mutation();
        id
    }

    /// Removes `element`. A vertex removed without children first gets a black placeholder child,
    /// so the fix-up always starts from a real vertex with a real sibling. The placeholder is
    /// spliced out again before returning.
    fn delete(&mut self, element: &T) -> Option<T> {
        let id = self.tree.find(element)?;
        self.tree.make_detachable(id);

        let placeholder = if self.vertices().node(id).is_leaf() {
            let placeholder = self.vertices_mut().new_placeholder(Color::Black);
            self.vertices_mut().attach_left(id, placeholder);
            log::debug!("attached placeholder {placeholder:?} under {id:?}");
            Some(placeholder)
        } else {
            None
        };

        let node = self.vertices().node(id);
        let child = node
            .right
            .or(node.left)
            .expect("A spliced vertex has a child or a placeholder");
        let removed_color = node.augment;
        let (element, _) = self.tree.remove_vertex(id);

        if removed_color == Color::Black {
            if self.is_red(Some(child)) {
                self.paint(Some(child), Color::Black);
            } else {
                self.fix_delete(child);
            }
        }

        if let Some(placeholder) = placeholder {
            log::debug!("detaching placeholder {placeholder:?}");
            self.vertices_mut().splice(placeholder);
        }
        self.after_mutation();
        Some(element)
    }

    /// Always fails: a rotation from outside would break the coloring rules.
    fn rotate_left(&mut self, _vertex: NodeId) -> Result<(), TreeError> {
        Err(TreeError::Unsupported("Red-black"))
    }

    /// Always fails: a rotation from outside would break the coloring rules.
    fn rotate_right(&mut self, _vertex: NodeId) -> Result<(), TreeError> {
        Err(TreeError::Unsupported("Red-black"))
    }

    fn clear(&mut self) {
        self.tree.clear();
    }
}

balanced_tree_impls!(RedBlackTree, Color);


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::test::quick::Op;

    fn do_ops<K>(ops: &[Op<K>], tree: &mut RedBlackTree<K>, counts: &mut BTreeMap<K, usize>)
    where
        K: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    tree.insert(k.clone());
                    *counts.entry(k.clone()).or_default() += 1;
                }
                Op::Remove(k) => {
                    let expected = match counts.get_mut(k) {
                        Some(count) => {
                            *count -= 1;
                            if *count == 0 {
                                counts.remove(k);
                            }
                            Some(k.clone())
                        }
                        None => None,
                    };
                    assert_eq!(tree.delete(k), expected);
                }
                Op::Iter => {
                    let expected: Vec<&K> = counts
                        .iter()
                        .flat_map(|(k, n)| std::iter::repeat(k).take(*n))
                        .collect();
                    assert_eq!(tree.iter().collect::<Vec<_>>(), expected);
                }
            }
            tree.check_consistency();
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let _ = pretty_env_logger::try_init();
            let mut tree = RedBlackTree::new();
            let mut counts = BTreeMap::new();

            do_ops(&ops, &mut tree, &mut counts);
            tree.len() == counts.values().sum::<usize>()
        }
    }

    quickcheck::quickcheck! {
        fn height_is_logarithmic(xs: Vec<u16>) -> bool {
            let tree: RedBlackTree<u16> = xs.iter().copied().collect();
            let n = tree.len() as f64;
            f64::from(tree.height() + 1) <= 2.0 * (n + 1.0).log2()
        }
    }
}
