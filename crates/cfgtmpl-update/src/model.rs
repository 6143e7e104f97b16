//! Domain records read by the use case

use cfgtmpl_macro::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Topology role granting write access to service templates
pub const ROLE_CONFIGURATION_SERVICES_TEMPLATES_READ_WRITE: &str =
    "configuration_services_templates_rw";

/// Service template as loaded for an update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTemplate {
    id: ObjectId,
    name: String,
    #[serde(default)]
    command_id: Option<ObjectId>,
}

impl ServiceTemplate {
    #[inline]
    #[must_use]
    pub fn new(id: ObjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            command_id: None,
        }
    }

    /// With check command
    #[inline]
    #[must_use]
    pub fn with_command(mut self, command_id: ObjectId) -> Self {
        self.command_id = Some(command_id);
        self
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check command, if the template defines one
    #[inline]
    #[must_use]
    pub fn command_id(&self) -> Option<ObjectId> {
        self.command_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: ObjectId,
    pub name: String,
}

impl ServiceCategory {
    #[inline]
    #[must_use]
    pub fn new(id: ObjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// ACL group a non-admin contact belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccessGroup {
    pub id: i64,
    pub name: String,
}

impl AccessGroup {
    #[inline]
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Current user
///
/// Authentication happens upstream; the use case only reads the admin flag
/// and topology roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    id: i64,
    alias: String,
    #[serde(default)]
    admin: bool,
    #[serde(default)]
    topology_roles: BTreeSet<String>,
}

impl Contact {
    #[inline]
    #[must_use]
    pub fn new(id: i64, alias: impl Into<String>) -> Self {
        Self {
            id,
            alias: alias.into(),
            admin: false,
            topology_roles: BTreeSet::new(),
        }
    }

    /// Mark as administrator
    #[inline]
    #[must_use]
    pub fn admin(mut self) -> Self {
        self.admin = true;
        self
    }

    /// Grant a topology role
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.topology_roles.insert(role.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    #[inline]
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Role check; administrators hold every role
    #[must_use]
    pub fn has_topology_role(&self, role: &str) -> bool {
        self.admin || self.topology_roles.contains(role)
    }
}
