//! The finished output of one restoration pass.

use smol_str::SmolStr;
use text_size::TextSize;

use super::{PNode, PObject, PObjectId, PScope, PScopeId, PosId};
use crate::syntax::{NodeId, Placement, Slot};

/// An annotation that reached the output, with the offset it was flushed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedAnnotation {
    pub offset: TextSize,
    /// The positioned node whose slot held the annotation.
    pub node: PosId,
    pub slot: Slot,
    pub text: SmolStr,
    pub placement: Placement,
}

impl PlacedAnnotation {
    pub fn is_newline(&self) -> bool {
        self.text == "\n"
    }
}

/// Positioned nodes, restored scopes and objects, and the annotation stream.
///
/// Built only by [`Restorer::finish`](crate::restore::Restorer::finish), so
/// every id stored in it resolves.
#[derive(Debug, Clone)]
pub struct PositionedTree {
    pub(crate) nodes: Vec<PNode>,
    pub(crate) origins: Vec<NodeId>,
    pub(crate) scopes: Vec<PScope>,
    pub(crate) objects: Vec<PObject>,
    pub(crate) annotations: Vec<PlacedAnnotation>,
    pub(crate) root: PosId,
    pub(crate) end: TextSize,
}

impl PositionedTree {
    pub fn root(&self) -> PosId {
        self.root
    }

    pub fn node(&self, id: PosId) -> Option<&PNode> {
        self.nodes.get(id.index())
    }

    /// Root node of the tree.
    pub fn root_node(&self) -> Option<&PNode> {
        self.node(self.root)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Offset one past the last booked token or annotation.
    pub fn end(&self) -> TextSize {
        self.end
    }

    pub fn scope(&self, id: PScopeId) -> Option<&PScope> {
        self.scopes.get(id.index())
    }

    pub fn object(&self, id: PObjectId) -> Option<&PObject> {
        self.objects.get(id.index())
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    // ============================================================
    // Origin map
    // ============================================================

    /// The decorated node a positioned node was restored from.
    pub fn origin(&self, id: PosId) -> Option<NodeId> {
        self.origins.get(id.index()).copied()
    }

    /// Every `(positioned, decorated)` pair, in restoration order.
    pub fn origins(&self) -> impl Iterator<Item = (PosId, NodeId)> + '_ {
        self.origins
            .iter()
            .enumerate()
            .map(|(index, origin)| (PosId::new(index), *origin))
    }

    // ============================================================
    // Annotations
    // ============================================================

    /// All flushed annotations in emission order.
    pub fn annotations(&self) -> &[PlacedAnnotation] {
        &self.annotations
    }

    /// Annotations flushed from the slots of node `id`.
    pub fn annotations_of(&self, id: PosId) -> impl Iterator<Item = &PlacedAnnotation> + '_ {
        self.annotations
            .iter()
            .filter(move |annotation| annotation.node == id)
    }
}
