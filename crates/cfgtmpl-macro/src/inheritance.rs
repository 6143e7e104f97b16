//! Template inheritance line
//!
//! Walks `(child, parent)` edges from an object up to its root template.

use crate::error::InheritanceError;
use crate::macros::Macro;
use crate::types::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One parent link as stored by the template repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateInheritance {
    /// Inheriting template or service
    pub child_id: ObjectId,
    /// Template it inherits from
    pub parent_id: ObjectId,
}

impl TemplateInheritance {
    #[inline]
    #[must_use]
    pub fn new(child_id: ObjectId, parent_id: ObjectId) -> Self {
        Self {
            child_id,
            parent_id,
        }
    }
}

/// Ancestors of an object, nearest first
///
/// # Invariants
/// - finite and acyclic; never contains `object_id`
/// - `ancestors[0]` is the direct parent, the last entry is the root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InheritanceLine {
    object_id: ObjectId,
    ancestors: Vec<ObjectId>,
}

impl InheritanceLine {
    /// Line of an object without parent
    #[inline]
    #[must_use]
    pub fn root(object_id: ObjectId) -> Self {
        Self {
            object_id,
            ancestors: Vec::new(),
        }
    }

    /// Build the line of `object_id` from parent edges
    ///
    /// Edges unrelated to the chain are ignored. When a child has several
    /// parent edges the first one wins.
    ///
    /// # Errors
    /// Returns [`InheritanceError::Cycle`] if the chain revisits an id.
    pub fn build(
        object_id: ObjectId,
        edges: &[TemplateInheritance],
    ) -> Result<Self, InheritanceError> {
        let mut parents: HashMap<ObjectId, ObjectId> = HashMap::with_capacity(edges.len());
        for edge in edges {
            parents.entry(edge.child_id).or_insert(edge.parent_id);
        }

        let mut seen = HashSet::from([object_id]);
        let mut ancestors = Vec::new();
        let mut current = object_id;

        while let Some(&parent) = parents.get(&current) {
            if !seen.insert(parent) {
                let mut path = Vec::with_capacity(ancestors.len() + 2);
                path.push(object_id);
                path.extend_from_slice(&ancestors);
                path.push(parent);
                return Err(InheritanceError::Cycle { object_id, path });
            }
            ancestors.push(parent);
            current = parent;
        }

        tracing::debug!(object_id = %object_id, depth = ancestors.len(), "inheritance line built");
        Ok(Self {
            object_id,
            ancestors,
        })
    }

    /// Object the line belongs to
    #[inline]
    #[must_use]
    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    /// Ancestors, nearest first
    #[inline]
    #[must_use]
    pub fn ancestors(&self) -> &[ObjectId] {
        &self.ancestors
    }

    /// Direct parent, if any
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<ObjectId> {
        self.ancestors.first().copied()
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.ancestors.is_empty()
    }

    /// Whether `id` is the object or one of its ancestors
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        id == self.object_id || self.ancestors.contains(&id)
    }

    /// Object followed by its ancestors, for loading every macro in one query
    pub fn owners(&self) -> impl Iterator<Item = ObjectId> + '_ {
        std::iter::once(self.object_id).chain(self.ancestors.iter().copied())
    }

    /// Ensure every macro is owned by the object or one of its ancestors
    ///
    /// Run on repository output before [`crate::MacroResolver`], which
    /// treats a stray owner as a contract violation.
    ///
    /// # Errors
    /// Returns [`InheritanceError::OutsideLine`] for the first stray macro
    pub fn check_owners(&self, macros: &[Macro]) -> Result<(), InheritanceError> {
        match macros.iter().find(|m| !self.contains(m.owner_id())) {
            Some(stray) => Err(InheritanceError::OutsideLine {
                name: stray.name().to_string(),
                owner_id: stray.owner_id(),
                object_id: self.object_id,
            }),
            None => Ok(()),
        }
    }
}
