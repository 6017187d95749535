//! Arena identifiers.
//!
//! Every arena in the crate (decorated nodes, scopes, objects and their
//! positioned counterparts) is a `Vec` addressed by a compact `u32` newtype.
//! Cross links are always ids, never ownership edges, so cyclic graphs are
//! representable without shared mutable aliasing.

/// Declares a `u32` arena id with `new`/`index` helpers.
macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            /// Create an id from an arena index
            pub fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// Get the index into the arena
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

pub(crate) use arena_id;
