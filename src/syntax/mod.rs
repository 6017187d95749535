//! Decorated syntax tree: the restorer's input.
//!
//! Nodes carry semantic fields and a [`Decorations`] record but no offsets.
//! Everything lives in one [`DecoratedTree`] arena: children, scopes and
//! objects are referenced by id, so a subtree may be shared by several
//! parents and symbol links may form cycles.

mod decorations;
mod node;
mod symbols;
mod tree;

pub use decorations::{Annotation, Decorations, Placement, Slot};
pub use node::{ChanDir, Delim, Node, NodeClass, NodeId, NodeKind, Shape};
pub use symbols::{DeclRef, ObjKind, Object, ObjectData, ObjectId, Scope, ScopeId};
pub use tree::{DecoratedNode, DecoratedTree};
