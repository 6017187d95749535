//! Restoration pass: decorated tree → positioned tree.
//!
//! One [`Restorer`] owns every piece of mutable state of a pass: the
//! cursor, the identity cache and the output arenas. It walks the decorated
//! tree depth-first from the root. At each node it books tokens, flushes the
//! node's annotations at its slots and recurses into children, following the
//! grammar table in `dispatch`.
//!
//! Output arenas hold `Option`s: an entry is reserved (`None`) before the
//! node's children are restored and filled in when the node is complete.
//! [`Restorer::finish`] turns the arenas into a [`PositionedTree`] and fails
//! if any reserved entry was never filled.

mod batch;
mod cache;
mod check;
mod dispatch;
mod error;
mod flush;
mod options;
mod symbols;

pub use batch::{RestoreJob, restore_batch};
pub use cache::{Cached, PendingRef};
pub use check::{LostAnnotation, lost_annotations};
pub use error::{RestoreError, Result};
pub use options::RestoreOptions;

use text_size::TextSize;
use tracing::{debug, trace};

use crate::base::Cursor;
use crate::positioned::{
    PNode, PObject, PObjectId, PScope, PlacedAnnotation, PositionedTree, PosId,
};
use crate::syntax::{DecoratedTree, NodeId, NodeKind};
use cache::IdentityCache;

/// Restore the subtree of `tree` rooted at `root`.
pub fn restore(
    tree: &DecoratedTree,
    root: NodeId,
    options: &RestoreOptions,
) -> Result<PositionedTree> {
    let root_kind = tree
        .node(root)
        .map(|node| node.kind())
        .ok_or(RestoreError::MissingNode(root))?;
    debug!(
        "[RESTORE] Restoring {} {:?} from offset {:?}",
        root_kind, root, options.base_offset
    );

    let mut restorer = Restorer::new(tree, options.clone());
    let restored = restorer.restore_node(root)?;
    restorer.finish(restored)
}

/// State of one restoration pass over a decorated tree.
pub struct Restorer<'t> {
    tree: &'t DecoratedTree,
    options: RestoreOptions,
    cursor: Cursor,
    cache: IdentityCache,
    nodes: Vec<Option<PNode>>,
    origins: Vec<NodeId>,
    scopes: Vec<Option<PScope>>,
    objects: Vec<Option<PObject>>,
    annotations: Vec<PlacedAnnotation>,
    /// Objects declared by nodes that had not been restored when the object was.
    deferred: Vec<(PObjectId, NodeId)>,
}

impl<'t> Restorer<'t> {
    pub fn new(tree: &'t DecoratedTree, options: RestoreOptions) -> Self {
        Self {
            tree,
            cursor: Cursor::new(options.base_offset),
            options,
            cache: IdentityCache::new(),
            nodes: Vec::new(),
            origins: Vec::new(),
            scopes: Vec::new(),
            objects: Vec::new(),
            annotations: Vec::new(),
            deferred: Vec::new(),
        }
    }

    /// Current cursor offset.
    pub fn offset(&self) -> TextSize {
        self.cursor.offset()
    }

    /// Cache state of a decorated node, if it has been reached.
    pub fn cached(&self, id: NodeId) -> Option<Cached> {
        self.cache.node(id)
    }

    /// Reserve an output slot for `id` and enter it in the cache as pending.
    fn reserve(&mut self, id: NodeId, kind: NodeKind) -> PosId {
        let at = PosId::new(self.nodes.len());
        self.nodes.push(None);
        self.origins.push(id);
        self.cache.reserve(id, PendingRef { id: at, kind });
        at
    }

    fn complete(&mut self, id: NodeId, at: PosId, node: PNode) {
        if let Some(slot) = self.nodes.get_mut(at.index()) {
            *slot = Some(node);
        }
        self.cache.complete(id);
    }

    /// End the pass, resolve deferred object links and hand out the tree.
    pub fn finish(mut self, root: PosId) -> Result<PositionedTree> {
        self.link_deferred();
        trace!(
            "[RESTORE] Cache: {} nodes, {} still pending",
            self.cache.node_count(),
            self.cache.pending_count()
        );

        let nodes = collect(self.nodes, "node")?;
        let scopes = collect(self.scopes, "scope")?;
        let objects = collect(self.objects, "object")?;
        let end = self.cursor.offset();

        debug!(
            "[RESTORE] Done: {} nodes, {} scopes, {} objects, {} annotations, end {:?}",
            nodes.len(),
            scopes.len(),
            objects.len(),
            self.annotations.len(),
            end
        );

        Ok(PositionedTree {
            nodes,
            origins: self.origins,
            scopes,
            objects,
            annotations: self.annotations,
            root,
            end,
        })
    }
}

fn collect<T>(slots: Vec<Option<T>>, what: &'static str) -> Result<Vec<T>> {
    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.ok_or(RestoreError::Incomplete { what, index }))
        .collect()
}
