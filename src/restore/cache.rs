//! Identity cache.
//!
//! Maps every decorated identity to its restored counterpart. A node is
//! entered as [`Cached::Pending`] before its children are restored, so a
//! child that refers back to an ancestor gets the ancestor's id without
//! restoring it again. Only the id and kind of a pending node are known;
//! its fields exist once the node is complete.
//!
//! Scopes and objects have their own maps: a symbol id and a node id with
//! the same index are different identities.

use rustc_hash::FxHashMap;

use crate::positioned::{PObjectId, PScopeId, PosId};
use crate::syntax::{NodeId, NodeKind, ObjectId, ScopeId};

/// A reserved output slot whose node is still being restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRef {
    pub id: PosId,
    pub kind: NodeKind,
}

/// State of a node in the identity cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cached {
    Pending(PendingRef),
    Complete(PosId),
}

impl Cached {
    pub fn id(self) -> PosId {
        match self {
            Cached::Pending(pending) => pending.id,
            Cached::Complete(id) => id,
        }
    }

    pub fn is_complete(self) -> bool {
        matches!(self, Cached::Complete(_))
    }
}

#[derive(Debug, Default)]
pub(crate) struct IdentityCache {
    nodes: FxHashMap<NodeId, Cached>,
    scopes: FxHashMap<ScopeId, PScopeId>,
    objects: FxHashMap<ObjectId, PObjectId>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================
    // Node domain
    // ============================================================

    pub fn node(&self, id: NodeId) -> Option<Cached> {
        self.nodes.get(&id).copied()
    }

    /// Enter `id` as pending. Returns false if it was already cached.
    pub fn reserve(&mut self, id: NodeId, pending: PendingRef) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, Cached::Pending(pending));
        true
    }

    /// Mark a pending node complete. Returns false if `id` was never reserved.
    pub fn complete(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(&id) {
            Some(entry) => {
                *entry = Cached::Complete(entry.id());
                true
            }
            None => false,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.nodes.values().filter(|c| !c.is_complete()).count()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ============================================================
    // Symbol domain
    // ============================================================

    pub fn scope(&self, id: ScopeId) -> Option<PScopeId> {
        self.scopes.get(&id).copied()
    }

    pub fn insert_scope(&mut self, id: ScopeId, restored: PScopeId) {
        self.scopes.insert(id, restored);
    }

    pub fn object(&self, id: ObjectId) -> Option<PObjectId> {
        self.objects.get(&id).copied()
    }

    pub fn insert_object(&mut self, id: ObjectId, restored: PObjectId) {
        self.objects.insert(id, restored);
    }
}
