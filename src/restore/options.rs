//! Restoration options

use text_size::TextSize;

/// Options for one restoration pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOptions {
    /// Offset the cursor starts at. Offset 0 stays free to mean "no position".
    pub base_offset: TextSize,
    /// Rebuild scopes and objects (false = every symbol link restores to none)
    pub restore_symbols: bool,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self {
            base_offset: TextSize::new(1),
            restore_symbols: true,
        }
    }
}

impl RestoreOptions {
    pub fn with_base_offset(mut self, base_offset: TextSize) -> Self {
        self.base_offset = base_offset;
        self
    }

    /// Skip the scope and object graph entirely
    pub fn without_symbols(mut self) -> Self {
        self.restore_symbols = false;
        self
    }
}
