//! Read-only handles onto the vertices of a tree.

use std::fmt;

use crate::augment::Augmentation;
use crate::error::{Relation, TreeError};
use crate::node::{Link, Node, NodeId};
use crate::tree::BinaryTree;

/// A borrowed view of one vertex. The borrow keeps the tree from being mutated while the handle
/// is alive; use [`Vertex::id`] to remember a vertex across a mutation.
///
/// # Examples
///
/// ```
/// use bstree::{OrderedTree, Tree};
///
/// let tree: OrderedTree<_> = [2, 1, 3].into_iter().collect();
/// let root = tree.root().unwrap();
///
/// assert_eq!(root.get(), &2);
/// assert_eq!(root.left().unwrap().get(), &1);
/// assert_eq!(root.right().unwrap().depth(), 1);
/// assert!(root.parent().is_err());
/// ```
pub struct Vertex<'a, T, A> {
    tree: &'a BinaryTree<T, A>,
    id: NodeId,
}

impl<'a, T, A> Clone for Vertex<'a, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T, A> Copy for Vertex<'a, T, A> {}

impl<'a, T, A: Augmentation> Vertex<'a, T, A> {
    pub(crate) fn new(tree: &'a BinaryTree<T, A>, id: NodeId) -> Self {
        Self { tree, id }
    }

    fn node(&self) -> &'a Node<T, A> {
        &self.tree.nodes()[self.id]
    }

    fn relative(&self, link: Link, relation: Relation) -> Result<Self, TreeError> {
        link.map(|id| Self::new(self.tree, id))
            .ok_or(TreeError::NotFound(relation))
    }

    /// The id of this vertex, valid until the vertex is deleted.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The element stored in this vertex.
    pub fn get(&self) -> &'a T {
        self.node().element()
    }

    /// The payload the tree flavour keeps on this vertex.
    pub fn augmentation(&self) -> &'a A {
        &self.node().augment
    }

    /// Whether this vertex has a parent, i.e. whether it is not the root.
    pub fn has_parent(&self) -> bool {
        self.node().parent.is_some()
    }

    /// Whether this vertex has a left child.
    pub fn has_left(&self) -> bool {
        self.node().left.is_some()
    }

    /// Whether this vertex has a right child.
    pub fn has_right(&self) -> bool {
        self.node().right.is_some()
    }

    /// The parent of this vertex, or [`TreeError::NotFound`] for the root.
    pub fn parent(&self) -> Result<Self, TreeError> {
        self.relative(self.node().parent, Relation::Parent)
    }

    /// The left child of this vertex, or [`TreeError::NotFound`] if there is none.
    pub fn left(&self) -> Result<Self, TreeError> {
        self.relative(self.node().left, Relation::Left)
    }

    /// The right child of this vertex, or [`TreeError::NotFound`] if there is none.
    pub fn right(&self) -> Result<Self, TreeError> {
        self.relative(self.node().right, Relation::Right)
    }

    /// The height of the subtree rooted here. A leaf has height 0.
    pub fn height(&self) -> i32 {
        self.augmentation()
            .cached_height()
            .unwrap_or_else(|| self.tree.subtree_height(Some(self.id)))
    }

    /// How many edges separate this vertex from the root.
    pub fn depth(&self) -> usize {
        self.tree.depth(self.id)
    }
}

impl<'a, T: fmt::Display, A: Augmentation> fmt::Display for Vertex<'a, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        A::fmt_vertex(self, f)
    }
}

impl<'a, T: fmt::Debug, A: Augmentation> fmt::Debug for Vertex<'a, T, A> {
    // TODO stack based Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vertex")
            .field("element", self.get())
            .field("augmentation", self.augmentation())
            .field("left", &self.left().ok())
            .field("right", &self.right().ok())
            .finish()
    }
}
