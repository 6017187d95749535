//! Foundation types for the restorer.
//!
//! This module provides fundamental types used throughout the crate:
//! - `arena_id!` - compact `u32` ids for every arena in the crate
//! - [`Token`], [`LitKind`] - token spellings of the grammar
//! - [`Cursor`] - the monotonic emission cursor
//!
//! This module has NO dependencies on other dectree modules.

mod cursor;
pub(crate) mod id;
mod token;

pub use cursor::Cursor;
pub use token::{LitKind, Token};

// Re-export text-size types for convenience
pub use text_size::{self, TextSize};
