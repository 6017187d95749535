//! Arena holding a decorated tree.

use smol_str::SmolStr;

use super::{
    Annotation, Decorations, Delim, Node, NodeId, Object, ObjectId, Scope, ScopeId, Slot,
};
use crate::base::LitKind;

/// A node together with the annotations queued on its slots.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedNode {
    pub node: Node,
    pub decs: Decorations,
}

/// Arena storage for nodes, scopes and objects - the single source of truth
/// for one decorated tree.
///
/// The tree is built by the decorating stage (or by hand) and is read-only
/// while it is being restored.
#[derive(Debug, Clone, Default)]
pub struct DecoratedTree {
    nodes: Vec<DecoratedNode>,
    scopes: Vec<Scope>,
    objects: Vec<Object>,
}

impl DecoratedTree {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================
    // Nodes
    // ============================================================

    /// Add an undecorated node and return its identity.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        self.alloc_decorated(node, Decorations::new())
    }

    pub fn alloc_decorated(&mut self, node: Node, decs: Decorations) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(DecoratedNode { node, decs });
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&DecoratedNode> {
        self.nodes.get(id.index())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.get(id).map(|decorated| &decorated.node)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).map(|decorated| &mut decorated.node)
    }

    pub fn decorations(&self, id: NodeId) -> Option<&Decorations> {
        self.get(id).map(|decorated| &decorated.decs)
    }

    pub fn decorations_mut(&mut self, id: NodeId) -> Option<&mut Decorations> {
        self.nodes.get_mut(id.index()).map(|decorated| &mut decorated.decs)
    }

    /// Queue `annotation` on `slot` of node `id`. Returns false for an unknown id.
    pub fn decorate(&mut self, id: NodeId, slot: Slot, annotation: Annotation) -> bool {
        match self.decorations_mut(id) {
            Some(decs) => {
                decs.push(slot, annotation);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate all node ids in allocation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::new)
    }

    // ============================================================
    // Scopes and objects
    // ============================================================

    pub fn add_scope(&mut self, scope: Scope) -> ScopeId {
        let id = ScopeId::new(self.scopes.len());
        self.scopes.push(scope);
        id
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    pub fn scope_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        self.scopes.get_mut(id.index())
    }

    pub fn add_object(&mut self, object: Object) -> ObjectId {
        let id = ObjectId::new(self.objects.len());
        self.objects.push(object);
        id
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.index())
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id.index())
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    // ============================================================
    // Shorthands for common leaves
    // ============================================================

    pub fn ident(&mut self, name: impl Into<SmolStr>) -> NodeId {
        self.alloc(Node::Ident {
            name: name.into(),
            obj: None,
        })
    }

    /// An identifier bound to a declaration object.
    pub fn ident_of(&mut self, name: impl Into<SmolStr>, obj: ObjectId) -> NodeId {
        self.alloc(Node::Ident {
            name: name.into(),
            obj: Some(obj),
        })
    }

    pub fn lit(&mut self, kind: LitKind, value: impl Into<SmolStr>) -> NodeId {
        self.alloc(Node::BasicLit {
            kind,
            value: value.into(),
        })
    }

    pub fn block(&mut self, list: Vec<NodeId>) -> NodeId {
        self.alloc(Node::BlockStmt { list })
    }

    pub fn expr_stmt(&mut self, x: NodeId) -> NodeId {
        self.alloc(Node::ExprStmt { x })
    }

    /// A parenthesized field list, as used for parameters and results.
    pub fn params(&mut self, list: Vec<NodeId>) -> NodeId {
        self.alloc(Node::FieldList {
            delim: Delim::Paren,
            opening: true,
            list,
            closing: true,
        })
    }
}
