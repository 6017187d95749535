//! Decoration flushing.
//!
//! Annotations queued on a slot are emitted, in their original order, when
//! the restorer reaches that slot in the node's grammar sequence. Each one
//! takes up room on the cursor like a token does.

use tracing::debug;

use super::Restorer;
use crate::positioned::{PlacedAnnotation, PosId};
use crate::syntax::{Decorations, NodeKind, Slot};

/// The node whose slots are being flushed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame<'t> {
    pub at: PosId,
    pub kind: NodeKind,
    pub decs: &'t Decorations,
}

impl Restorer<'_> {
    /// Emit the annotations queued on `slot` at the cursor.
    pub(crate) fn flush(&mut self, frame: &Frame<'_>, slot: Slot) {
        for annotation in frame.decs.get(slot) {
            let offset = self.cursor.advance(&annotation.text);
            self.annotations.push(PlacedAnnotation {
                offset,
                node: frame.at,
                slot,
                text: annotation.text.clone(),
                placement: annotation.placement,
            });
        }
    }

    /// Flush a slot that only exists when the piece it follows is present.
    ///
    /// Without the piece the slot's annotations are dropped and the cursor
    /// stays put.
    pub(crate) fn flush_if(&mut self, frame: &Frame<'_>, slot: Slot, present: bool) {
        if present {
            self.flush(frame, slot);
            return;
        }
        let dropped = frame.decs.get(slot).len();
        if dropped > 0 {
            debug!(
                "[RESTORE] Dropping {} annotation(s) on {}.{}: no piece to follow",
                dropped, frame.kind, slot
            );
        }
    }
}
