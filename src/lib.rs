//! # dectree
//!
//! Restores decorated syntax trees into positioned concrete syntax trees.
//!
//! A decorated tree carries semantic content and free-form annotations
//! (comments, blank-line hints) attached to named slots, but no offsets.
//! Restoration books every token through a monotonic cursor, reinserts the
//! annotations at their slots, and rebuilds the scope/object graph with shared
//! identity.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! restore     → Restoration pass: dispatcher, flusher, identity cache, symbols
//!   ↓
//! positioned  → Output tree with resolved offsets and placed annotations
//!   ↓
//! syntax      → Input tree: nodes, decorations, scopes and objects
//!   ↓
//! base        → Primitives (arena ids, tokens, emission cursor)
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → positioned → restore)
// ============================================================================

/// Foundation types: arena ids, token spellings, emission cursor
pub mod base;

/// Decorated input tree: nodes, decorations, scopes, objects
pub mod syntax;

/// Positioned output tree: offsets, placed annotations, token walk
pub mod positioned;

/// Restoration pass: decorated tree → positioned tree
pub mod restore;

// Re-export foundation types
pub use base::{Cursor, LitKind, TextSize, Token};

// Re-export the tree types on both sides of the pass
pub use positioned::{PNode, PlacedAnnotation, PlacedToken, PosId, PositionedTree};
pub use syntax::{
    Annotation, DecoratedTree, Decorations, Node, NodeId, NodeKind, ObjectId, Placement, ScopeId,
    Slot,
};

// Re-export the pass entry points
pub use restore::{
    LostAnnotation, RestoreError, RestoreJob, RestoreOptions, Restorer, lost_annotations, restore,
    restore_batch,
};
