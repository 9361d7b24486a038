//! A height-balanced (AVL) binary search tree.
//!
//! Every vertex caches the height of its subtree. After each insertion or deletion the tree walks
//! from the changed spot up to the root, recomputing heights and rotating wherever the two
//! subtrees of a vertex differ in height by two. Afterwards they never differ by more than one, so
//! the height stays `O(lg N)`.
//!
//! # Examples
//!
//! ```
//! use bstree::{AvlTree, SearchTree, Tree, TreeError};
//!
//! let tree: AvlTree<_> = (1..=7).collect();
//!
//! // Inserting in order would have produced a list; this is a perfect tree.
//! let root = tree.root().unwrap();
//! assert_eq!(root.get(), &4);
//! assert_eq!(root.left().unwrap().height(), 1);
//! assert_eq!(root.right().unwrap().height(), 1);
//!
//! // The balance is this tree's business only.
//! let mut tree = tree;
//! let root = tree.root().unwrap().id();
//! assert_eq!(tree.rotate_left(root), Err(TreeError::Unsupported("AVL")));
//! ```

use std::fmt;

use crate::augment::Augmentation;
use crate::error::TreeError;
use crate::node::{Link, NodeId};
use crate::ordered::{OrderedTree, SearchTree};
use crate::tree::{BinaryTree, Tree};
use crate::vertex::Vertex;

/// The height an AVL vertex caches: 0 for a leaf, one more than its taller child otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Height(i32);

impl Height {
    /// The cached value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl Augmentation for Height {
    fn cached_height(&self) -> Option<i32> {
        Some(self.0)
    }

    /// `<element> <height>/<balance>`
    fn fmt_vertex<T: fmt::Display>(
        vertex: &Vertex<'_, T, Self>,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} {}/{}", vertex.get(), vertex.height(), vertex.balance())
    }
}

impl<'a, T> Vertex<'a, T, Height> {
    /// Height of the left subtree minus height of the right subtree. In a balanced tree this is
    /// −1, 0 or 1.
    pub fn balance(&self) -> i32 {
        let left = self.left().map_or(-1, |left| left.height());
        let right = self.right().map_or(-1, |right| right.height());
        left - right
    }
}

/// A self-balancing binary search tree keeping the heights of sibling subtrees within one of each
/// other.
#[derive(Clone)]
pub struct AvlTree<T> {
    tree: OrderedTree<T, Height>,
}

impl<T: Ord> AvlTree<T> {
    /// Generates a new, empty `AvlTree`.
    pub fn new() -> Self {
        Self::default()
    }

    fn vertices(&self) -> &BinaryTree<T, Height> {
        self.tree.structure()
    }

    fn height_of(&self, link: Link) -> i32 {
        link.map_or(-1, |id| self.vertices().node(id).augment.get())
    }

    /// Adjusts the height of `id` to be the max of its children's heights + 1.
    fn fix_height(&mut self, id: NodeId) {
        let node = self.vertices().node(id);
        let height = 1 + self.height_of(node.left).max(self.height_of(node.right));
        self.tree.structure_mut().node_mut(id).augment = Height(height);
    }

    /// Left height minus right height, from the cached heights.
    fn balance_factor(&self, id: NodeId) -> i32 {
        let node = self.vertices().node(id);
        self.height_of(node.left) - self.height_of(node.right)
    }

    /// Walks from `start` to the root fixing heights and rotating every vertex found out of
    /// balance. See [the Wikipedia page][wiki] for the four cases.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Rebalancing
    fn rebalance(&mut self, start: Link) {
        let mut current = start;
        while let Some(id) = current {
            self.fix_height(id);
            match self.balance_factor(id) {
                -2 => {
                    let right = self
                        .vertices()
                        .right(id)
                        .expect("Right-heavy vertex has a right child");
                    if self.balance_factor(right) == 1 {
                        log::trace!("right-left imbalance at {id:?}");
                        self.tree.structure_mut().rotate_right(right);
                        self.fix_height(right);
                    } else {
                        log::trace!("right-right imbalance at {id:?}");
                    }
                    self.tree.structure_mut().rotate_left(id);
                    self.fix_height(id);
                }
                2 => {
                    let left = self
                        .vertices()
                        .left(id)
                        .expect("Left-heavy vertex has a left child");
                    if self.balance_factor(left) == -1 {
                        log::trace!("left-right imbalance at {id:?}");
                        self.tree.structure_mut().rotate_left(left);
                        self.fix_height(left);
                    } else {
                        log::trace!("left-left imbalance at {id:?}");
                    }
                    self.tree.structure_mut().rotate_right(id);
                    self.fix_height(id);
                }
                balance => debug_assert!(balance.abs() <= 1),
            }
            // After a rotation this is the vertex that moved up, whose height is still stale.
            current = self.vertices().parent(id);
        }
    }

    /// Panics unless the tree is a valid binary search tree whose cached heights are right and
    /// whose vertices are all balanced.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        self.tree.check_consistency();
        let vertices = self.vertices();
        vertices.pre_order(|id| {
            let node = vertices.node(id);
            assert_eq!(
                node.augment.get(),
                vertices.subtree_height(Some(id)),
                "Stale cached height"
            );
            assert!(self.balance_factor(id).abs() <= 1, "Unbalanced vertex");
        });
    }

    fn after_mutation(&self) {
        #[cfg(feature = "consistency_check")]
        self.check_consistency();
    }
}

impl<T: Ord> Tree for AvlTree<T> {
    type Element = T;
    type Augment = Height;

    fn structure(&self) -> &BinaryTree<T, Height> {
        self.vertices()
    }

    fn search(&self, element: &T) -> Option<Vertex<'_, T, Height>> {
        self.tree.search(element)
    }
}

impl<T: Ord> SearchTree for AvlTree<T> {
    /// Inserts `element` as a leaf, then rebalances from the leaf's parent up. The leaf itself has
    /// height 0 and can't be out of balance.
    fn insert(&mut self, element: T) -> NodeId {
        let id = self.tree.insert_leaf(element);
        let parent = self.vertices().parent(id);
        self.rebalance(parent);
        self.after_mutation();
        id
    }

    /// Removes `element`, then rebalances from the parent of the vertex that was spliced out.
    fn delete(&mut self, element: &T) -> Option<T> {
        let id = self.tree.find(element)?;
        self.tree.make_detachable(id);
        let (element, parent) = self.tree.remove_vertex(id);
        self.rebalance(parent);
        self.after_mutation();
        Some(element)
    }

    /// Always fails: a rotation from outside would undo the balance.
    fn rotate_left(&mut self, _vertex: NodeId) -> Result<(), TreeError> {
        Err(TreeError::Unsupported("AVL"))
    }

    /// Always fails: a rotation from outside would undo the balance.
    fn rotate_right(&mut self, _vertex: NodeId) -> Result<(), TreeError> {
        Err(TreeError::Unsupported("AVL"))
    }

    fn clear(&mut self) {
        self.tree.clear();
    }
}

balanced_tree_impls!(AvlTree, Height);
