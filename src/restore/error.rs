//! Error types for restoration.

use text_size::TextSize;
use thiserror::Error;

use crate::syntax::{NodeId, NodeKind, ObjectId, ScopeId, Shape};

/// Errors that abort a restoration pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    /// A child whose kind the grammar does not allow in its position.
    #[error("{parent}.{field}: expected {expected}, found {found}")]
    UnexpectedChild {
        parent: NodeKind,
        field: &'static str,
        expected: Shape,
        found: NodeKind,
    },

    /// A node id with no entry in the decorated tree.
    #[error("No decorated node with id {0:?}")]
    MissingNode(NodeId),

    /// A scope id with no entry in the decorated tree.
    #[error("No scope with id {0:?}")]
    MissingScope(ScopeId),

    /// An object id with no entry in the decorated tree.
    #[error("No object with id {0:?}")]
    MissingObject(ObjectId),

    /// A raw span would move the cursor past the largest representable offset.
    #[error("Span of {length} bytes at {offset:?} overflows the offset range")]
    OffsetOverflow { offset: TextSize, length: u32 },

    /// An output entry was reserved but never filled in.
    #[error("Restored {what} {index} was reserved but never completed")]
    Incomplete { what: &'static str, index: usize },
}

impl RestoreError {
    /// Create an unexpected-child error.
    pub fn unexpected(
        parent: NodeKind,
        field: &'static str,
        expected: Shape,
        found: NodeKind,
    ) -> Self {
        Self::UnexpectedChild {
            parent,
            field,
            expected,
            found,
        }
    }
}

/// Result type for restoration.
pub type Result<T> = std::result::Result<T, RestoreError>;
