//! Scope and object restoration.
//!
//! Scopes and objects form a cyclic graph: a package object's data is its
//! scope, which binds the object again. Each symbol is entered in the cache
//! before its links are followed, so a cycle ends at the reserved id.

use std::mem;

use tracing::{debug, trace};

use super::{RestoreError, Restorer, Result};
use crate::positioned::{PDeclRef, PObject, PObjectData, PObjectId, PScope, PScopeId};
use crate::syntax::{DeclRef, ObjectData, ObjectId, ScopeId};

impl Restorer<'_> {
    pub(crate) fn restore_scope(&mut self, id: ScopeId) -> Result<PScopeId> {
        if let Some(restored) = self.cache.scope(id) {
            trace!("[RESTORE] Scope {:?} already restored as {:?}", id, restored);
            return Ok(restored);
        }
        let tree = self.tree;
        let scope = tree.scope(id).ok_or(RestoreError::MissingScope(id))?;

        let at = PScopeId::new(self.scopes.len());
        self.scopes.push(None);
        self.cache.insert_scope(id, at);

        let outer = scope
            .outer
            .map(|outer| self.restore_scope(outer))
            .transpose()?;
        let mut restored = PScope {
            outer,
            objects: Default::default(),
        };
        for (name, object) in &scope.objects {
            restored
                .objects
                .insert(name.clone(), self.restore_object(*object)?);
        }

        self.scopes[at.index()] = Some(restored);
        Ok(at)
    }

    pub(crate) fn restore_object(&mut self, id: ObjectId) -> Result<PObjectId> {
        if let Some(restored) = self.cache.object(id) {
            trace!("[RESTORE] Object {:?} already restored as {:?}", id, restored);
            return Ok(restored);
        }
        let tree = self.tree;
        let object = tree.object(id).ok_or(RestoreError::MissingObject(id))?;

        let at = PObjectId::new(self.objects.len());
        self.objects.push(None);
        self.cache.insert_object(id, at);

        let decl = match object.decl {
            None => None,
            Some(DeclRef::Scope(scope)) => Some(PDeclRef::Scope(self.restore_scope(scope)?)),
            // Restoring the declaring node here would book its tokens out of
            // place, so a node not reached yet is linked after the traversal.
            Some(DeclRef::Node(node)) => match self.cache.node(node) {
                Some(cached) => Some(PDeclRef::Node(cached.id())),
                None => {
                    self.deferred.push((at, node));
                    None
                }
            },
        };
        let data = match object.data {
            None => None,
            Some(ObjectData::Int(value)) => Some(PObjectData::Int(value)),
            Some(ObjectData::Scope(scope)) => Some(PObjectData::Scope(self.restore_scope(scope)?)),
        };

        self.objects[at.index()] = Some(PObject {
            kind: object.kind,
            name: object.name.clone(),
            decl,
            data,
        });
        Ok(at)
    }

    /// Link objects whose declaring node was restored after them.
    pub(crate) fn link_deferred(&mut self) {
        for (object, node) in mem::take(&mut self.deferred) {
            let Some(cached) = self.cache.node(node) else {
                debug!(
                    "[RESTORE] Object {:?} declared by {:?}, which is not in the restored tree",
                    object, node
                );
                continue;
            };
            if let Some(Some(restored)) = self.objects.get_mut(object.index()) {
                restored.decl = Some(PDeclRef::Node(cached.id()));
            }
        }
    }
}
