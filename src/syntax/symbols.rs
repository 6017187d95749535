//! Scopes and declaration objects of the decorated tree.
//!
//! Both live in arenas of the [`DecoratedTree`](super::DecoratedTree). An
//! object is shared by id between its declaring node and every use site, and
//! may point back at the declaring node or at a scope, so the graph is
//! cyclic in general.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::NodeId;
use crate::base::id::arena_id;

arena_id!(
    /// Identity of a scope in the decorated tree.
    ScopeId
);

arena_id!(
    /// Identity of a declaration object in the decorated tree.
    ObjectId
);

/// Kind of entity an object declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjKind {
    Bad,
    Pkg,
    Con,
    Typ,
    Var,
    Fun,
    Lbl,
}

/// Back-reference from an object to what declared it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclRef {
    Node(NodeId),
    Scope(ScopeId),
}

/// Kind-specific payload of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectData {
    /// Iota value of a constant.
    Int(i64),
    /// Package scope of a package object.
    Scope(ScopeId),
}

/// A declaration identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub kind: ObjKind,
    pub name: SmolStr,
    pub decl: Option<DeclRef>,
    pub data: Option<ObjectData>,
}

impl Object {
    pub fn new(kind: ObjKind, name: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            name: name.into(),
            decl: None,
            data: None,
        }
    }

    pub fn with_decl(mut self, decl: DeclRef) -> Self {
        self.decl = Some(decl);
        self
    }

    pub fn with_data(mut self, data: ObjectData) -> Self {
        self.data = Some(data);
        self
    }
}

/// Name → object mapping with a non-owning link to the enclosing scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub outer: Option<ScopeId>,
    /// Maps object name to ObjectId (objects are stored in the arena)
    pub objects: IndexMap<SmolStr, ObjectId>,
}

impl Scope {
    pub fn new(outer: Option<ScopeId>) -> Self {
        Self {
            outer,
            objects: IndexMap::new(),
        }
    }

    /// Bind `name`, returning the object it previously referred to.
    pub fn insert(&mut self, name: impl Into<SmolStr>, object: ObjectId) -> Option<ObjectId> {
        self.objects.insert(name.into(), object)
    }

    /// Look `name` up in this scope only (no chain walking).
    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        self.objects.get(name).copied()
    }
}
