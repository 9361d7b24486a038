//! The shape every tree in this crate shares: vertices with an element, a parent and two children.
//!
//! [`BinaryTree`] owns the vertices and knows how to walk, compare and draw them, but it has no
//! notion of order. The ordered tree and the self-balancing trees wrap it and decide where
//! elements go. What they all expose for reading lives on the [`Tree`] trait.
//!
//! # Rendering
//!
//! Trees print as an indented diagram. `├─›` leads to a left child that has a right sibling,
//! `└─›` to a lone left child and `└─»` to a right child:
//!
//! ```
//! use bstree::OrderedTree;
//!
//! let tree: OrderedTree<_> = [4, 2, 6, 1, 3, 5].into_iter().collect();
//!
//! assert_eq!(
//!     tree.to_string(),
//!     "4\n\
//!      ├─›2\n\
//!      │  ├─›1\n\
//!      │  └─»3\n\
//!      └─»6\n   \
//!         └─›5\n"
//! );
//! ```

use std::collections::VecDeque;
use std::fmt;

use crate::augment::Augmentation;
use crate::error::{Relation, TreeError};
use crate::node::{Arena, Link, Node, NodeId};
use crate::vertex::Vertex;

/// A binary tree of vertices, each holding an element and an augmentation `A`.
///
/// The tree keeps the root, the number of elements and the storage all vertices live in. It is
/// the common core of [`OrderedTree`][crate::OrderedTree], [`AvlTree`][crate::AvlTree] and
/// [`RedBlackTree`][crate::RedBlackTree]; on its own it offers only the read-only [`Tree`]
/// operations.
#[derive(Clone)]
pub struct BinaryTree<T, A = ()> {
    nodes: Arena<T, A>,
    root: Link,
    len: usize,
}

/// Where the iterative traversal came from when it arrived at a vertex.
#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

impl<T, A: Augmentation> Default for BinaryTree<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Augmentation> BinaryTree<T, A> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    pub(crate) fn nodes(&self) -> &Arena<T, A> {
        &self.nodes
    }

    pub(crate) fn root_link(&self) -> Link {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T, A> {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T, A> {
        &mut self.nodes[id]
    }

    /// Whether `id` names a vertex a caller is allowed to see.
    pub(crate) fn is_live(&self, id: NodeId) -> bool {
        self.nodes
            .get(id)
            .map_or(false, |node| node.element.is_some())
    }

    /// The one place vertices holding elements are created. Every flavour starts its vertices with
    /// the default augmentation and adjusts it in its own rebalancing code.
    pub(crate) fn new_vertex(&mut self, element: T) -> NodeId {
        self.len += 1;
        self.nodes.alloc(Node::new(Some(element), A::default()))
    }

    /// Creates an element-less vertex. It is not counted and must be spliced out again before the
    /// operation that created it returns.
    pub(crate) fn new_placeholder(&mut self, augment: A) -> NodeId {
        self.nodes.alloc(Node::new(None, augment))
    }

    pub(crate) fn make_root(&mut self, id: NodeId) {
        debug_assert!(self.root.is_none());
        self.nodes[id].parent = None;
        self.root = Some(id);
    }

    pub(crate) fn attach_left(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[parent].left.is_none());
        self.nodes[parent].left = Some(child);
        self.nodes[child].parent = Some(parent);
    }

    pub(crate) fn attach_right(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[parent].right.is_none());
        self.nodes[parent].right = Some(child);
        self.nodes[child].parent = Some(parent);
    }

    pub(crate) fn parent(&self, id: NodeId) -> Link {
        self.nodes[id].parent
    }

    pub(crate) fn left(&self, id: NodeId) -> Link {
        self.nodes[id].left
    }

    pub(crate) fn right(&self, id: NodeId) -> Link {
        self.nodes[id].right
    }

    pub(crate) fn is_left_child(&self, id: NodeId) -> bool {
        self.parent(id)
            .map_or(false, |parent| self.nodes[parent].left == Some(id))
    }

    /// The other child of this vertex's parent.
    pub(crate) fn sibling(&self, id: NodeId) -> Link {
        let parent = self.parent(id)?;
        if self.is_left_child(id) {
            self.nodes[parent].right
        } else {
            self.nodes[parent].left
        }
    }

    /// Points whatever held `old` (its parent's child slot, or the root) at `new` instead.
    fn replace_child(&mut self, parent: Link, old: NodeId, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent = &mut self.nodes[parent];
                if parent.left == Some(old) {
                    parent.left = new;
                } else {
                    parent.right = new;
                }
            }
        }
        if let Some(new) = new {
            self.nodes[new].parent = parent;
        }
    }

    /// Rotate around `id` to the left. This moves the right child up and `id` down. Does nothing
    /// when there is no right child.
    ///
    /// ```text
    ///   Option<parent>              Option<parent>
    ///        /                           /
    ///      old (id)                    new
    ///     /   \                       /   \
    ///    x    new     rotate ->     old    z
    ///         / \                   / \
    ///        y   z                 x   y
    /// ```
    pub(crate) fn rotate_left(&mut self, id: NodeId) {
        let Some(new) = self.nodes[id].right else {
            return;
        };
        log::trace!("rotating left around {id:?}");

        let inner = self.nodes[new].left;
        let parent = self.nodes[id].parent;
        self.replace_child(parent, id, Some(new));

        self.nodes[new].left = Some(id);
        self.nodes[id].parent = Some(new);

        self.nodes[id].right = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(id);
        }
    }

    /// Rotate around `id` to the right. This moves the left child up and `id` down. Does nothing
    /// when there is no left child.
    ///
    /// ```text
    ///      Option<parent>            Option<parent>
    ///        /                         /
    ///      old (id)                  new
    ///     /     \                   /   \
    ///   new      z    rotate ->    x    old
    ///   / \                             / \
    ///  x   y                           y   z
    /// ```
    pub(crate) fn rotate_right(&mut self, id: NodeId) {
        let Some(new) = self.nodes[id].left else {
            return;
        };
        log::trace!("rotating right around {id:?}");

        let inner = self.nodes[new].right;
        let parent = self.nodes[id].parent;
        self.replace_child(parent, id, Some(new));

        self.nodes[new].right = Some(id);
        self.nodes[id].parent = Some(new);

        self.nodes[id].left = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(id);
        }
    }

    /// Removes a vertex with at most one child by moving that child (or nothing) into its slot.
    /// Returns the removed vertex and the parent it hung from.
    ///
    /// The element count is left alone, callers that removed an element account for it.
    pub(crate) fn splice(&mut self, id: NodeId) -> (Node<T, A>, Link) {
        let node = &self.nodes[id];
        assert!(
            node.left.is_none() || node.right.is_none(),
            "Only vertices with at most one child can be spliced out"
        );
        let child = node.left.or(node.right);
        let parent = node.parent;
        log::debug!("splicing out {id:?}, promoting {child:?}");

        self.replace_child(parent, id, child);
        let mut removed = self.nodes.release(id);
        removed.parent = None;
        removed.left = None;
        removed.right = None;
        (removed, parent)
    }

    /// Records that one element left the tree.
    pub(crate) fn forget_one(&mut self) {
        debug_assert!(self.len > 0);
        self.len -= 1;
    }

    /// Trades the places of two vertices in the tree. Each keeps its element and its id, and the
    /// augmentations stay where they were, so whatever is cached about a position survives.
    pub(crate) fn swap_positions(&mut self, a: NodeId, b: NodeId) {
        let other = |link: Link| {
            link.map(|id| match id {
                _ if id == a => b,
                _ if id == b => a,
                _ => id,
            })
        };
        let (pa, la, ra) = {
            let node = &self.nodes[a];
            (node.parent, node.left, node.right)
        };
        let (pb, lb, rb) = {
            let node = &self.nodes[b];
            (node.parent, node.left, node.right)
        };

        for (id, parent, left, right) in [(a, pb, lb, rb), (b, pa, la, ra)] {
            let node = &mut self.nodes[id];
            node.parent = other(parent);
            node.left = other(left);
            node.right = other(right);
        }

        for (id, was) in [(a, b), (b, a)] {
            if let Some(parent) = self.nodes[id].parent.filter(|p| *p != a && *p != b) {
                let parent = &mut self.nodes[parent];
                if parent.left == Some(was) {
                    parent.left = Some(id);
                } else if parent.right == Some(was) {
                    parent.right = Some(id);
                }
            }
            let node = &self.nodes[id];
            for child in [node.left, node.right].into_iter().flatten() {
                if child != a && child != b {
                    self.nodes[child].parent = Some(id);
                }
            }
        }
        self.root = other(self.root);

        let augment = self.nodes[a].augment.clone();
        self.nodes[a].augment = std::mem::replace(&mut self.nodes[b].augment, augment);
    }

    /// The rightmost vertex below (and including) `id`.
    pub(crate) fn max_in_subtree(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.nodes[id].right {
            id = right;
        }
        id
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Height of the subtree at `link`, computed from the shape alone: −1 when empty.
    pub(crate) fn subtree_height(&self, link: Link) -> i32 {
        let mut height = -1;
        let mut stack: Vec<(NodeId, i32)> = link.map(|id| (id, 0)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            stack.extend([node.left, node.right].into_iter().flatten().map(|c| (c, depth + 1)));
        }
        height
    }

    pub(crate) fn depth(&self, mut id: NodeId) -> usize {
        let mut depth = 0;
        while let Some(parent) = self.nodes[id].parent {
            depth += 1;
            id = parent;
        }
        depth
    }

    /// Looks at every vertex, pre-order, until one holds `element`. Knows nothing about ordering.
    pub(crate) fn find_by_traversal(&self, element: &T) -> Link
    where
        T: PartialEq,
    {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.element() == element {
                return Some(id);
            }
            stack.extend(node.right);
            stack.extend(node.left);
        }
        None
    }

    pub(crate) fn pre_order<F: FnMut(NodeId)>(&self, visit: F) {
        self.traverse(visit, |_| {}, |_| {});
    }

    pub(crate) fn in_order<F: FnMut(NodeId)>(&self, visit: F) {
        self.traverse(|_| {}, visit, |_| {});
    }

    pub(crate) fn post_order<F: FnMut(NodeId)>(&self, visit: F) {
        self.traverse(|_| {}, |_| {}, visit);
    }

    pub(crate) fn level_order<F: FnMut(NodeId)>(&self, mut visit: F) {
        let mut queue: VecDeque<NodeId> = self.root.into_iter().collect();
        while let Some(id) = queue.pop_front() {
            visit(id);
            let node = &self.nodes[id];
            queue.extend(node.left);
            queue.extend(node.right);
        }
    }

    /// Depth-first walk following parent links, so no stack is needed.
    fn traverse<Pre, In, Post>(&self, mut preorder: Pre, mut inorder: In, mut postorder: Post)
    where
        Pre: FnMut(NodeId),
        In: FnMut(NodeId),
        Post: FnMut(NodeId),
    {
        let Some(mut id) = self.root else {
            return;
        };
        let mut dir = Direction::FromParent;
        loop {
            match dir {
                Direction::FromParent => {
                    preorder(id);
                    match self.nodes[id].left {
                        Some(left) => id = left,
                        None => dir = Direction::FromLeft,
                    }
                }
                Direction::FromLeft => {
                    inorder(id);
                    match self.nodes[id].right {
                        Some(right) => {
                            id = right;
                            dir = Direction::FromParent;
                        }
                        None => dir = Direction::FromRight,
                    }
                }
                Direction::FromRight => {
                    postorder(id);
                    match self.nodes[id].parent {
                        Some(parent) => {
                            dir = if self.nodes[parent].left == Some(id) {
                                Direction::FromLeft
                            } else {
                                Direction::FromRight
                            };
                            id = parent;
                        }
                        None => break,
                    }
                }
            }
        }
    }

    fn same_subtrees(&self, mine: Link, other: &Self, theirs: Link) -> bool
    where
        T: PartialEq,
    {
        let mut pending = vec![(mine, theirs)];
        while let Some(pair) = pending.pop() {
            match pair {
                (None, None) => {}
                (Some(mine), Some(theirs)) => {
                    let (a, b) = (&self.nodes[mine], &other.nodes[theirs]);
                    if a.element != b.element || a.augment != b.augment {
                        return false;
                    }
                    pending.push((a.right, b.right));
                    pending.push((a.left, b.left));
                }
                _ => return false,
            }
        }
        true
    }

    /// Writes the diagram of the subtree at `root`, one vertex per line.
    ///
    /// `bars[l]` says whether the vertex at level `l` on the current path still has a sibling
    /// below, in which case its column keeps a `│`.
    fn render(&self, f: &mut fmt::Formatter<'_>, root: NodeId) -> fmt::Result
    where
        T: fmt::Display,
    {
        let mut bars: Vec<bool> = Vec::new();
        let mut pending: Vec<(NodeId, usize, &str, bool)> = vec![(root, 0, "", false)];
        while let Some((id, level, connector, bar)) = pending.pop() {
            if level > 0 {
                bars.truncate(level - 1);
                Self::indent(f, &bars)?;
                f.write_str(connector)?;
                bars.push(bar);
            }
            writeln!(f, "{}", Vertex::new(self, id))?;

            let node = &self.nodes[id];
            match (node.left, node.right) {
                (Some(left), Some(right)) => {
                    pending.push((right, level + 1, "└─»", false));
                    pending.push((left, level + 1, "├─›", true));
                }
                (Some(left), None) => pending.push((left, level + 1, "└─›", false)),
                (None, Some(right)) => pending.push((right, level + 1, "└─»", false)),
                (None, None) => {}
            }
        }
        Ok(())
    }

    fn indent(f: &mut fmt::Formatter<'_>, bars: &[bool]) -> fmt::Result {
        for &bar in bars {
            f.write_str(if bar { "│  " } else { "   " })?;
        }
        Ok(())
    }

    /// Checks the links of every reachable vertex and the element count.
    #[cfg(any(test, feature = "consistency_check"))]
    pub(crate) fn check_links(&self) {
        if let Some(root) = self.root {
            assert!(self.nodes[root].parent.is_none(), "The root has a parent");
        }

        let mut reachable = 0;
        self.pre_order(|id| {
            let node = &self.nodes[id];
            assert!(node.element.is_some(), "A placeholder was left in the tree");
            for child in [node.left, node.right].into_iter().flatten() {
                assert_eq!(self.nodes[child].parent, Some(id), "Broken parent link");
            }
            reachable += 1;
        });

        assert_eq!(reachable, self.len);
        assert_eq!(self.nodes.live(), self.len);
    }
}

impl<T: PartialEq, A: Augmentation> PartialEq for BinaryTree<T, A> {
    /// Two trees are equal when they have the same shape with equal elements and equal
    /// augmentations at corresponding positions.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.same_subtrees(self.root, other, other.root)
    }
}

impl<T: Eq, A: Augmentation> Eq for BinaryTree<T, A> {}

impl<T: fmt::Display, A: Augmentation> fmt::Display for BinaryTree<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => self.render(f, root),
            None => Ok(()),
        }
    }
}

impl<T: fmt::Debug, A: Augmentation> fmt::Debug for BinaryTree<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryTree")
            .field("len", &self.len)
            .field("root", &self.root.map(|id| Vertex::new(self, id)))
            .finish()
    }
}

/// The read-only contract every tree in this crate satisfies.
///
/// All methods have a default implementation on top of [`Tree::structure`]. Ordered trees
/// override [`Tree::search`] with a descent that follows the ordering.
pub trait Tree {
    /// What the tree stores.
    type Element: PartialEq;
    /// What the tree keeps next to each element.
    type Augment: Augmentation;

    /// The underlying vertices.
    fn structure(&self) -> &BinaryTree<Self::Element, Self::Augment>;

    /// The number of elements in the tree.
    fn len(&self) -> usize {
        self.structure().len
    }

    /// Whether the tree holds no elements.
    fn is_empty(&self) -> bool {
        self.structure().root.is_none()
    }

    /// The height of the root, or −1 for an empty tree.
    fn height(&self) -> i32 {
        self.root().map_or(-1, |root| root.height())
    }

    /// The root vertex, or [`TreeError::NotFound`] if the tree is empty.
    fn root(&self) -> Result<Vertex<'_, Self::Element, Self::Augment>, TreeError> {
        let structure = self.structure();
        structure
            .root
            .map(|id| Vertex::new(structure, id))
            .ok_or(TreeError::NotFound(Relation::Root))
    }

    /// The vertex behind `id`, or [`TreeError::NotFound`] if it has been deleted since.
    fn vertex(&self, id: NodeId) -> Result<Vertex<'_, Self::Element, Self::Augment>, TreeError> {
        let structure = self.structure();
        if structure.is_live(id) {
            Ok(Vertex::new(structure, id))
        } else {
            Err(TreeError::NotFound(Relation::Vertex))
        }
    }

    /// Some vertex holding `element`, if there is one. This version visits every vertex.
    fn search(&self, element: &Self::Element) -> Option<Vertex<'_, Self::Element, Self::Augment>> {
        let structure = self.structure();
        structure
            .find_by_traversal(element)
            .map(|id| Vertex::new(structure, id))
    }

    /// Whether some vertex holds `element`.
    fn contains(&self, element: &Self::Element) -> bool {
        self.search(element).is_some()
    }

    /// Calls `visit` on each vertex: the vertex first, then its left and right subtrees.
    fn for_each_pre_order<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(Vertex<'a, Self::Element, Self::Augment>),
        Self::Element: 'a,
        Self::Augment: 'a,
    {
        let structure = self.structure();
        structure.pre_order(|id| visit(Vertex::new(structure, id)));
    }

    /// Calls `visit` on each vertex: left subtree, the vertex, right subtree.
    fn for_each_in_order<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(Vertex<'a, Self::Element, Self::Augment>),
        Self::Element: 'a,
        Self::Augment: 'a,
    {
        let structure = self.structure();
        structure.in_order(|id| visit(Vertex::new(structure, id)));
    }

    /// Calls `visit` on each vertex: left and right subtrees, then the vertex.
    fn for_each_post_order<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(Vertex<'a, Self::Element, Self::Augment>),
        Self::Element: 'a,
        Self::Augment: 'a,
    {
        let structure = self.structure();
        structure.post_order(|id| visit(Vertex::new(structure, id)));
    }

    /// Calls `visit` on each vertex, level by level from the root, left to right.
    fn for_each_level_order<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(Vertex<'a, Self::Element, Self::Augment>),
        Self::Element: 'a,
        Self::Augment: 'a,
    {
        let structure = self.structure();
        structure.level_order(|id| visit(Vertex::new(structure, id)));
    }

    /// Iterates over the elements in order.
    fn iter(&self) -> Iter<'_, Self::Element, Self::Augment> {
        Iter::new(self.structure())
    }
}

impl<T: PartialEq, A: Augmentation> Tree for BinaryTree<T, A> {
    type Element = T;
    type Augment = A;

    fn structure(&self) -> &BinaryTree<T, A> {
        self
    }
}

/// In-order iterator over the elements of a tree.
pub struct Iter<'a, T, A> {
    tree: &'a BinaryTree<T, A>,
    /// Vertices whose left subtree has been pushed but which haven't been yielded.
    pending: Vec<NodeId>,
}

impl<'a, T, A: Augmentation> Iter<'a, T, A> {
    fn new(tree: &'a BinaryTree<T, A>) -> Self {
        let mut iter = Self {
            tree,
            pending: Vec::new(),
        };
        iter.push_left_spine(tree.root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link) {
        while let Some(id) = link {
            self.pending.push(id);
            link = self.tree.nodes[id].left;
        }
    }
}

impl<'a, T, A: Augmentation> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.pending.pop()?;
        let node = &self.tree.nodes[id];
        self.push_left_spine(node.right);
        Some(node.element())
    }
}
