//! Vertex storage shared by every tree in the crate.
//!
//! A tree owns all of its vertices through an [`Arena`]. Children and parents refer to each other
//! by [`NodeId`] instead of by pointer, so the parent back-link never owns anything and there is
//! no reference cycle to break when a vertex goes away.

use std::ops::{Index, IndexMut};

/// Names one vertex of the tree that created it.
///
/// Ids stay attached to the same vertex across rotations. Removing the vertex invalidates its id:
/// looking it up afterwards reports [`TreeError::NotFound`][crate::TreeError::NotFound] even if
/// the storage slot has been re-used by a later insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// A possibly missing vertex. Absent children count as leaves.
pub(crate) type Link = Option<NodeId>;

#[derive(Clone, Debug)]
pub(crate) struct Node<T, A> {
    /// `None` only for the placeholder a red-black deletion hangs under the vertex it removes.
    pub(crate) element: Option<T>,
    pub(crate) augment: A,
    pub(crate) parent: Link,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl<T, A> Node<T, A> {
    pub(crate) fn new(element: Option<T>, augment: A) -> Self {
        Self {
            element,
            augment,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn element(&self) -> &T {
        self.element
            .as_ref()
            .expect("Placeholder vertices never outlive a deletion")
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[derive(Clone, Debug)]
struct Slot<T, A> {
    generation: u32,
    node: Option<Node<T, A>>,
}

/// Slots of vertices plus a free list of released slots.
#[derive(Clone, Debug)]
pub(crate) struct Arena<T, A> {
    slots: Vec<Slot<T, A>>,
    vacant: Vec<usize>,
}

impl<T, A> Default for Arena<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A> Arena<T, A> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
        }
    }

    /// Stores `node` and returns the id it can be reached by.
    pub(crate) fn alloc(&mut self, node: Node<T, A>) -> NodeId {
        match self.vacant.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                debug_assert!(slot.node.is_none());
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Takes the vertex out of the arena. Its id is dead from here on.
    pub(crate) fn release(&mut self, id: NodeId) -> Node<T, A> {
        let slot = &mut self.slots[id.index];
        assert_eq!(slot.generation, id.generation, "Releasing a stale vertex");
        let node = slot.node.take().expect("Releasing a live vertex");
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(id.index);
        node
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<T, A>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T, A>> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Drops every vertex. Ids handed out before stay dead.
    pub(crate) fn clear(&mut self) {
        self.vacant.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.vacant.push(index);
        }
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.vacant.len()
    }
}

impl<T, A> Index<NodeId> for Arena<T, A> {
    type Output = Node<T, A>;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.get(id).expect("Links only point at live vertices")
    }
}

impl<T, A> IndexMut<NodeId> for Arena<T, A> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.get_mut(id).expect("Links only point at live vertices")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_slots_are_reused_with_a_new_generation() {
        let mut arena = Arena::new();
        let first = arena.alloc(Node::new(Some(1), ()));
        let second = arena.alloc(Node::new(Some(2), ()));

        assert_eq!(arena.release(first).element, Some(1));
        assert!(arena.get(first).is_none());

        let third = arena.alloc(Node::new(Some(3), ()));
        assert_eq!(third.index, first.index);
        assert_ne!(third, first);
        assert!(arena.get(first).is_none());
        assert_eq!(arena[third].element(), &3);
        assert_eq!(arena[second].element(), &2);
        assert_eq!(arena.live(), 2);
    }

    #[test]
    fn clear_kills_every_id() {
        let mut arena = Arena::new();
        let ids: Vec<_> = (0..4).map(|x| arena.alloc(Node::new(Some(x), ()))).collect();

        arena.clear();

        assert_eq!(arena.live(), 0);
        assert!(ids.iter().all(|id| arena.get(*id).is_none()));
    }
}
