//! The payload each tree flavour keeps next to every element.
//!
//! The ordered tree needs nothing, so it uses `()`. The AVL tree caches heights
//! ([`Height`][crate::avl::Height]) and the red-black tree keeps a
//! [`Color`][crate::red_black::Color]. All the shared tree code is written once over
//! `A: Augmentation` and every flavour plugs its own payload in.

use std::fmt;

use crate::vertex::Vertex;

/// What a vertex payload has to provide to live in a [`BinaryTree`][crate::BinaryTree].
///
/// `Default` is the payload a brand new vertex is created with.
pub trait Augmentation: Clone + Default + PartialEq + fmt::Debug {
    /// The height cached on the vertex, if this payload caches one. When `None`, heights are
    /// computed by walking the subtree.
    fn cached_height(&self) -> Option<i32> {
        None
    }

    /// Writes the label of `vertex` as it shows up in a rendered tree.
    fn fmt_vertex<T: fmt::Display>(
        vertex: &Vertex<'_, T, Self>,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", vertex.get())
    }
}

impl Augmentation for () {}
