//! This crate exposes a family of Binary Search Trees (BSTs) sharing one vertex storage,
//! mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a vertex. A vertex stores some
//! value (the value that was inserted, for example) and sometimes has
//! child vertices. The most important invariants of a BST are:
//!
//! 1. For every vertex in a BST, all the vertices in its left subtree have a
//!    value less than or equal to its own value.
//! 2. For every vertex in a BST, all the vertices in its right subtree have a
//!    value greater than or equal to its own value.
//!
//! > Note that some vertices have no children. These vertices are called "leaves".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is the longest
//! path from the root to a leaf). With clever construction the height of a BST can be
//! limited to `O(lg N)` where `N` is the number of vertices in the tree. BSTs also
//! naturally support sorted iteration by visiting the left subtree, then the subtree
//! root, then the right subtree.
//!
//! ## The trees
//!
//! - [`BinaryTree`] is the plain shape: vertices, links and traversals. It knows nothing about
//!   ordering, so its [`Tree::search`] walks every vertex.
//! - [`OrderedTree`] keeps the BST invariants but never rebalances. Its rotations are public so
//!   you can watch what they do.
//! - [`AvlTree`] caches the height of every vertex and rotates whenever sibling subtrees differ
//!   in height by two.
//! - [`RedBlackTree`] colors every vertex and recolors or rotates to keep the coloring rules.
//!
//! Read access goes through the [`Tree`] trait and a [`Vertex`] handle; mutation goes through
//! [`SearchTree`]. A [`NodeId`] returned by an insertion names its vertex until that vertex is
//! deleted.
//!
//! ```
//! use bstree::{AvlTree, OrderedTree, Tree};
//!
//! let list: OrderedTree<_> = (1..=7).collect();
//! let balanced: AvlTree<_> = (1..=7).collect();
//!
//! assert_eq!(list.height(), 6);
//! assert_eq!(balanced.height(), 2);
//! assert!(list.iter().eq(balanced.iter()));
//! ```
//!
//! ## Features
//!
//! - `consistency_check`: validate every invariant of a tree after each mutating call, panicking
//!   on the first violation. Slow, meant for debugging.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

/// The trait impls [`AvlTree`] and [`RedBlackTree`] share, all forwarding to the wrapped
/// [`OrderedTree`].
macro_rules! balanced_tree_impls {
    ($tree:ident, $augment:ty) => {
        impl<T> Default for $tree<T> {
            fn default() -> Self {
                Self {
                    tree: $crate::OrderedTree::default(),
                }
            }
        }

        impl<T: PartialEq> PartialEq for $tree<T> {
            fn eq(&self, other: &Self) -> bool {
                self.tree == other.tree
            }
        }

        impl<T: Eq> Eq for $tree<T> {}

        impl<T: ::std::fmt::Display> ::std::fmt::Display for $tree<T> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.tree, f)
            }
        }

        impl<T: ::std::fmt::Debug> ::std::fmt::Debug for $tree<T> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($tree))
                    .field("tree", &self.tree)
                    .finish()
            }
        }

        impl<T: Ord> FromIterator<T> for $tree<T> {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                let mut tree = Self::new();
                tree.extend(iter);
                tree
            }
        }

        impl<T: Ord> Extend<T> for $tree<T> {
            fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
                for element in iter {
                    $crate::SearchTree::insert(self, element);
                }
            }
        }

        impl<'a, T: Ord> IntoIterator for &'a $tree<T> {
            type Item = &'a T;
            type IntoIter = $crate::Iter<'a, T, $augment>;

            fn into_iter(self) -> Self::IntoIter {
                $crate::Tree::iter(self)
            }
        }
    };
}

mod augment;
mod error;
mod node;
mod ordered;
mod tree;
mod vertex;

pub mod avl;
pub mod red_black;


pub use augment::Augmentation;
pub use avl::{AvlTree, Height};
pub use error::{Relation, TreeError};
pub use node::NodeId;
pub use ordered::{OrderedTree, SearchTree};
pub use red_black::{Color, RedBlackTree};
pub use tree::{BinaryTree, Iter, Tree};
pub use vertex::Vertex;
