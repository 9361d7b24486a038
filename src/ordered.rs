//! An unbalanced binary search tree.
//!
//! Every element in the left subtree of a vertex is less than or equal to the vertex's element and
//! every element in the right subtree is greater than or equal to it. Duplicates are kept (the tree
//! is a multiset) and go to the left.
//!
//! # Examples
//!
//! ```
//! use bstree::{OrderedTree, SearchTree, Tree};
//!
//! let mut tree = OrderedTree::new();
//! tree.insert(5);
//! tree.insert(3);
//! let seven = tree.insert(7);
//!
//! assert!(tree.contains(&3));
//! assert_eq!(tree.root().unwrap().get(), &5);
//!
//! // Rotations are a plain structural edit here.
//! tree.rotate_right(tree.root().unwrap().id()).unwrap();
//! assert_eq!(tree.root().unwrap().get(), &3);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 5, 7]);
//!
//! // Deleting hands the element back.
//! assert_eq!(tree.delete(&5), Some(5));
//! assert_eq!(tree.delete(&5), None);
//! assert_eq!(tree.vertex(seven).unwrap().depth(), 1);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::augment::Augmentation;
use crate::error::{Relation, TreeError};
use crate::node::{Link, NodeId};
use crate::tree::{BinaryTree, Iter, Tree};
use crate::vertex::Vertex;

/// The mutating contract of the search trees in this crate.
pub trait SearchTree: Tree {
    /// Inserts `element` and returns the id of the vertex now holding it.
    ///
    /// The id keeps naming the inserted element until it is deleted, but anything derived from
    /// the tree's shape (its depth, its neighbours) is only meaningful until the next mutation.
    fn insert(&mut self, element: Self::Element) -> NodeId;

    /// Like [`SearchTree::insert`], for callers holding an element that may be missing.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidArgument`] if `element` is `None`.
    fn try_insert(&mut self, element: Option<Self::Element>) -> Result<NodeId, TreeError> {
        match element {
            Some(element) => Ok(self.insert(element)),
            None => Err(TreeError::InvalidArgument),
        }
    }

    /// Removes one occurrence of `element` and returns it. Deleting an element that isn't in the
    /// tree does nothing.
    fn delete(&mut self, element: &Self::Element) -> Option<Self::Element>;

    /// Rotates the tree to the left around `vertex`. Nothing happens if `vertex` has no right
    /// child.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if `vertex` was deleted, [`TreeError::Unsupported`] if the tree
    /// keeps itself balanced.
    fn rotate_left(&mut self, vertex: NodeId) -> Result<(), TreeError>;

    /// Rotates the tree to the right around `vertex`. Nothing happens if `vertex` has no left
    /// child.
    ///
    /// # Errors
    ///
    /// Same as [`SearchTree::rotate_left`].
    fn rotate_right(&mut self, vertex: NodeId) -> Result<(), TreeError>;

    /// Removes every element.
    fn clear(&mut self);
}

/// A binary search tree without any balancing. `A` is the augmentation the self-balancing trees
/// plug in; users of the plain tree leave it as `()`.
#[derive(Clone)]
pub struct OrderedTree<T, A = ()> {
    tree: BinaryTree<T, A>,
}

impl<T, A: Augmentation> Default for OrderedTree<T, A> {
    fn default() -> Self {
        Self {
            tree: BinaryTree::new(),
        }
    }
}

impl<T: Ord> OrderedTree<T> {
    /// Generates a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Ord, A: Augmentation> OrderedTree<T, A> {
    pub(crate) fn structure_mut(&mut self) -> &mut BinaryTree<T, A> {
        &mut self.tree
    }

    /// Descends following the ordering and stops at the first vertex holding `element`.
    pub(crate) fn find(&self, element: &T) -> Link {
        let mut current = self.tree.root_link();
        while let Some(id) = current {
            let node = self.tree.node(id);
            current = match element.cmp(node.element()) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Hangs a new leaf holding `element` where the descent falls off the tree.
    pub(crate) fn insert_leaf(&mut self, element: T) -> NodeId {
        let Some(mut current) = self.tree.root_link() else {
            let id = self.tree.new_vertex(element);
            self.tree.make_root(id);
            return id;
        };

        loop {
            let goes_left = element <= *self.tree.node(current).element();
            let next = if goes_left {
                self.tree.left(current)
            } else {
                self.tree.right(current)
            };
            match next {
                Some(next) => current = next,
                None => {
                    let id = self.tree.new_vertex(element);
                    if goes_left {
                        self.tree.attach_left(current, id);
                    } else {
                        self.tree.attach_right(current, id);
                    }
                    return id;
                }
            }
        }
    }

    /// Moves the vertex to delete to a spot where it can be spliced out. A vertex with two
    /// children trades places with the largest vertex of its left subtree, which has no right
    /// child. Both vertices keep their ids.
    pub(crate) fn make_detachable(&mut self, id: NodeId) {
        if let (Some(left), Some(_)) = (self.tree.left(id), self.tree.right(id)) {
            let predecessor = self.tree.max_in_subtree(left);
            self.tree.swap_positions(id, predecessor);
        }
    }

    /// Splices out a vertex with at most one child. Returns its element and former parent.
    pub(crate) fn remove_vertex(&mut self, id: NodeId) -> (T, Link) {
        let (removed, parent) = self.tree.splice(id);
        self.tree.forget_one();
        let element = removed
            .element
            .expect("Only vertices holding elements are counted");
        (element, parent)
    }

    fn checked(&self, vertex: NodeId) -> Result<NodeId, TreeError> {
        if self.tree.is_live(vertex) {
            Ok(vertex)
        } else {
            Err(TreeError::NotFound(Relation::Vertex))
        }
    }

    /// Panics unless every vertex is correctly linked and the elements are in order.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        self.tree.check_links();
        let elements: Vec<&T> = self.iter().collect();
        assert!(
            elements.windows(2).all(|pair| pair[0] <= pair[1]),
            "Elements are out of order"
        );
    }

    fn after_mutation(&self) {
        #[cfg(feature = "consistency_check")]
        self.check_consistency();
    }
}

impl<T: Ord, A: Augmentation> Tree for OrderedTree<T, A> {
    type Element = T;
    type Augment = A;

    fn structure(&self) -> &BinaryTree<T, A> {
        &self.tree
    }

    /// Searches along the path the ordering dictates. With duplicates, this is the first match on
    /// that path, not necessarily the first one in order.
    fn search(&self, element: &T) -> Option<Vertex<'_, T, A>> {
        self.find(element).map(|id| Vertex::new(&self.tree, id))
    }
}

impl<T: Ord, A: Augmentation> SearchTree for OrderedTree<T, A> {
    fn insert(&mut self, element: T) -> NodeId {
        let id = self.insert_leaf(element);
        self.after_mutation();
        id
    }

    fn delete(&mut self, element: &T) -> Option<T> {
        let id = self.find(element)?;
        self.make_detachable(id);
        let (element, _) = self.remove_vertex(id);
        self.after_mutation();
        Some(element)
    }

    fn rotate_left(&mut self, vertex: NodeId) -> Result<(), TreeError> {
        let vertex = self.checked(vertex)?;
        self.tree.rotate_left(vertex);
        self.after_mutation();
        Ok(())
    }

    fn rotate_right(&mut self, vertex: NodeId) -> Result<(), TreeError> {
        let vertex = self.checked(vertex)?;
        self.tree.rotate_right(vertex);
        self.after_mutation();
        Ok(())
    }

    fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<T: PartialEq, A: Augmentation> PartialEq for OrderedTree<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq, A: Augmentation> Eq for OrderedTree<T, A> {}

impl<T: fmt::Display, A: Augmentation> fmt::Display for OrderedTree<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.fmt(f)
    }
}

impl<T: fmt::Debug, A: Augmentation> fmt::Debug for OrderedTree<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedTree")
            .field("tree", &self.tree)
            .finish()
    }
}

impl<T: Ord, A: Augmentation> FromIterator<T> for OrderedTree<T, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord, A: Augmentation> Extend<T> for OrderedTree<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a, T: Ord, A: Augmentation> IntoIterator for &'a OrderedTree<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
