//! Positioned syntax tree: the restorer's output.
//!
//! Every node mirrors a decorated node, but each token it owns carries the
//! offset the cursor booked for it, and every child is a [`PosId`] into the
//! same [`PositionedTree`] arena. Annotations flushed during restoration are
//! kept beside the nodes as one ordered stream.

mod node;
mod tree;
mod walk;

pub use node::{
    CommaList, PDeclRef, PNode, PObject, PObjectData, PObjectId, PScope, PScopeId, PosId,
};
pub use tree::{PlacedAnnotation, PositionedTree};
pub use walk::PlacedToken;
