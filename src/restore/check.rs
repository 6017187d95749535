//! Post-pass check for annotations that never reached the output.
//!
//! Restoration drops annotations queued on slots it does not reach: slots
//! gated on an absent piece, and slots the construct never declares. This
//! check finds them by comparing each restored node's decorations with the
//! annotations placed for it.

use rustc_hash::FxHashMap;

use crate::positioned::{PositionedTree, PosId};
use crate::syntax::{Annotation, DecoratedTree, NodeId, NodeKind, Slot};

/// Annotations on one slot of one node that were not placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LostAnnotation {
    pub node: NodeId,
    pub restored: PosId,
    pub kind: NodeKind,
    pub slot: Slot,
    pub annotations: Vec<Annotation>,
}

/// Report every decorated slot of a restored node whose annotations are
/// missing from `restored`, in restoration order.
pub fn lost_annotations(tree: &DecoratedTree, restored: &PositionedTree) -> Vec<LostAnnotation> {
    let mut placed: FxHashMap<(PosId, Slot), usize> = FxHashMap::default();
    for annotation in restored.annotations() {
        *placed.entry((annotation.node, annotation.slot)).or_default() += 1;
    }

    let mut lost = Vec::new();
    for (at, origin) in restored.origins() {
        let Some(decorated) = tree.get(origin) else {
            continue;
        };
        for (slot, annotations) in decorated.decs.iter() {
            let count = placed.get(&(at, slot)).copied().unwrap_or(0);
            if count < annotations.len() {
                lost.push(LostAnnotation {
                    node: origin,
                    restored: at,
                    kind: decorated.node.kind(),
                    slot,
                    annotations: annotations[count..].to_vec(),
                });
            }
        }
    }
    lost
}
