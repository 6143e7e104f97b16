//! Collaborator interfaces
//!
//! One trait per entity and direction. Implementations are wired explicitly
//! into [`ServiceTemplateRepositories`]; every write is expected to join the
//! transaction opened through [`DataStorageEngine`].

use crate::error::RepositoryError;
use crate::model::{AccessGroup, Contact, ServiceCategory, ServiceTemplate};
use async_trait::async_trait;
use cfgtmpl_macro::{CommandMacro, CommandMacroType, Macro, ObjectId, TemplateInheritance};
use std::sync::Arc;

/// Result type for collaborator calls
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait ReadServiceTemplateRepository: Send + Sync {
    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<ServiceTemplate>>;

    /// Every parent edge reachable from `id`
    async fn find_parents(&self, id: ObjectId) -> RepositoryResult<Vec<TemplateInheritance>>;
}

#[async_trait]
pub trait WriteServiceTemplateRepository: Send + Sync {
    async fn link_to_hosts(&self, id: ObjectId, host_template_ids: &[ObjectId])
        -> RepositoryResult<()>;

    async fn unlink_hosts(&self, id: ObjectId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ReadHostTemplateRepository: Send + Sync {
    /// Subset of `ids` that exist
    async fn find_all_existing_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<ObjectId>>;
}

#[async_trait]
pub trait ReadServiceCategoryRepository: Send + Sync {
    /// Subset of `ids` that exist
    async fn find_all_existing_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<ObjectId>>;

    /// Subset of `ids` that exist and are visible to `access_groups`
    async fn find_all_existing_ids_by_access_groups(
        &self,
        ids: &[ObjectId],
        access_groups: &[AccessGroup],
    ) -> RepositoryResult<Vec<ObjectId>>;

    async fn find_by_service(&self, service_id: ObjectId)
        -> RepositoryResult<Vec<ServiceCategory>>;

    async fn find_by_service_and_access_groups(
        &self,
        service_id: ObjectId,
        access_groups: &[AccessGroup],
    ) -> RepositoryResult<Vec<ServiceCategory>>;
}

#[async_trait]
pub trait WriteServiceCategoryRepository: Send + Sync {
    async fn link_to_service(&self, service_id: ObjectId, category_ids: &[ObjectId])
        -> RepositoryResult<()>;

    async fn unlink_from_service(
        &self,
        service_id: ObjectId,
        category_ids: &[ObjectId],
    ) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ReadAccessGroupRepository: Send + Sync {
    async fn find_by_contact(&self, contact: &Contact) -> RepositoryResult<Vec<AccessGroup>>;
}

#[async_trait]
pub trait ReadServiceMacroRepository: Send + Sync {
    /// Macros owned by any of `ids`, each tagged with its owner
    async fn find_by_service_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<Macro>>;
}

#[async_trait]
pub trait WriteServiceMacroRepository: Send + Sync {
    async fn add(&self, macro_: &Macro) -> RepositoryResult<()>;

    async fn update(&self, macro_: &Macro) -> RepositoryResult<()>;

    async fn delete(&self, macro_: &Macro) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ReadCommandMacroRepository: Send + Sync {
    /// Macros of a command, nearest command first
    async fn find_by_command_id_and_type(
        &self,
        command_id: ObjectId,
        kind: CommandMacroType,
    ) -> RepositoryResult<Vec<CommandMacro>>;
}

/// Transactional storage engine
#[async_trait]
pub trait DataStorageEngine: Send + Sync {
    async fn start_transaction(&self) -> RepositoryResult<()>;

    async fn commit_transaction(&self) -> RepositoryResult<()>;

    async fn rollback_transaction(&self) -> RepositoryResult<()>;
}

/// Repositories used by the service template update
///
/// Fields are public so callers can swap a single collaborator.
#[derive(Clone)]
pub struct ServiceTemplateRepositories {
    pub read_service_template: Arc<dyn ReadServiceTemplateRepository>,
    pub write_service_template: Arc<dyn WriteServiceTemplateRepository>,
    pub read_host_template: Arc<dyn ReadHostTemplateRepository>,
    pub read_service_category: Arc<dyn ReadServiceCategoryRepository>,
    pub write_service_category: Arc<dyn WriteServiceCategoryRepository>,
    pub read_access_group: Arc<dyn ReadAccessGroupRepository>,
    pub read_service_macro: Arc<dyn ReadServiceMacroRepository>,
    pub write_service_macro: Arc<dyn WriteServiceMacroRepository>,
    pub read_command_macro: Arc<dyn ReadCommandMacroRepository>,
    pub storage_engine: Arc<dyn DataStorageEngine>,
}

impl std::fmt::Debug for ServiceTemplateRepositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceTemplateRepositories").finish_non_exhaustive()
    }
}
