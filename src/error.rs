//! Errors surfaced by the trees in this crate.
//!
//! Every error here is a precondition violation on the caller's side. None of them leave the tree
//! in a modified state.

use std::fmt;

use thiserror::Error;

/// Tree error
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum TreeError {
    /// Tried to insert an element that isn't there.
    #[error("Cannot insert an absent element.")]
    InvalidArgument,
    /// Asked a tree or a vertex for a relative it doesn't have.
    #[error("There is no {0} vertex.")]
    NotFound(Relation),
    /// The structure refuses the operation, e.g. rotating a self-balancing tree by hand.
    #[error("{0} trees cannot be rotated from outside their rebalancing code.")]
    Unsupported(&'static str),
}

/// Which vertex a [`TreeError::NotFound`] was looking for.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Relation {
    /// The root of an empty tree.
    Root,
    /// The parent of the root.
    Parent,
    /// A missing left child.
    Left,
    /// A missing right child.
    Right,
    /// A `NodeId` that is stale or belongs to another tree.
    Vertex,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Root => "root",
            Self::Parent => "parent",
            Self::Left => "left",
            Self::Right => "right",
            Self::Vertex => "such",
        };
        f.write_str(name)
    }
}
