//! Partial update of a service template
//!
//! Checks rights and referenced ids and computes the macro difference, then
//! relinks host templates and service categories and persists the difference,
//! all inside a single transaction that is rolled back on any failure.

use crate::basic_difference::BasicDifference;
use crate::config::UpdateConfig;
use crate::error::ServiceTemplateError;
use crate::factory::MacroFactory;
use crate::model::{AccessGroup, Contact, ServiceTemplate};
use crate::repository::ServiceTemplateRepositories;
use crate::request::{MacroRequest, PartialUpdateServiceTemplateRequest};
use crate::response::{Presenter, UpdateResponse};
use cfgtmpl_macro::{
    CommandMacroMap, CommandMacroType, InheritanceLine, MacroDifference, MacroManager, MacroMap,
    MacroResolver, ObjectId, ResolvedMacros,
};

/// Service template partial update use case
#[derive(Debug)]
pub struct PartialUpdateServiceTemplate {
    repositories: ServiceTemplateRepositories,
    user: Contact,
    config: UpdateConfig,
}

impl PartialUpdateServiceTemplate {
    #[must_use]
    pub fn new(repositories: ServiceTemplateRepositories, user: Contact) -> Self {
        Self {
            repositories,
            user,
            config: UpdateConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: UpdateConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the update and hand the outcome to `presenter`
    pub async fn invoke(
        &self,
        request: PartialUpdateServiceTemplateRequest,
        presenter: &dyn Presenter,
    ) {
        presenter.present(self.execute(request).await);
    }

    /// Run the update
    ///
    /// Never fails: every error is logged and mapped to a response kind.
    pub async fn execute(&self, request: PartialUpdateServiceTemplateRequest) -> UpdateResponse {
        tracing::info!(service_template_id = %request.id, "Update the service template");

        match self.update(&request).await {
            Ok(()) => UpdateResponse::NoContent,
            Err(err) => {
                tracing::error!(
                    service_template_id = %request.id,
                    user_id = self.user.id(),
                    "Service template update failed: {}",
                    err
                );
                UpdateResponse::from(err)
            }
        }
    }

    async fn update(
        &self,
        request: &PartialUpdateServiceTemplateRequest,
    ) -> Result<(), ServiceTemplateError> {
        if !self.user.has_topology_role(&self.config.required_role) {
            return Err(ServiceTemplateError::UpdateNotAllowed);
        }

        let template = self
            .repositories
            .read_service_template
            .find_by_id(request.id)
            .await?
            .ok_or(ServiceTemplateError::NotFound(request.id))?;

        let access_groups = if self.user.is_admin() {
            Vec::new()
        } else {
            self.repositories
                .read_access_group
                .find_by_contact(&self.user)
                .await?
        };

        self.assert_all_properties(request, &access_groups).await?;

        let macro_difference = match &request.macros {
            Some(requested) => Some(self.compute_macro_difference(&template, requested).await?),
            None => None,
        };

        self.update_properties_in_transaction(request, macro_difference.as_ref(), &access_groups)
            .await
    }

    /// Id checks run before the transaction
    async fn assert_all_properties(
        &self,
        request: &PartialUpdateServiceTemplateRequest,
        access_groups: &[AccessGroup],
    ) -> Result<(), ServiceTemplateError> {
        if let Some(ids) = &request.host_templates {
            let ids = unique(ids);
            let found = self
                .repositories
                .read_host_template
                .find_all_existing_ids(&ids)
                .await?;
            ensure_all_found("host_templates", &ids, &found)?;
        }

        if let Some(ids) = &request.service_categories {
            let ids = unique(ids);
            let categories = &self.repositories.read_service_category;
            let found = if self.user.is_admin() {
                categories.find_all_existing_ids(&ids).await?
            } else {
                categories
                    .find_all_existing_ids_by_access_groups(&ids, access_groups)
                    .await?
            };
            ensure_all_found("service_categories", &ids, &found)?;
        }

        Ok(())
    }

    async fn update_properties_in_transaction(
        &self,
        request: &PartialUpdateServiceTemplateRequest,
        macro_difference: Option<&MacroDifference>,
        access_groups: &[AccessGroup],
    ) -> Result<(), ServiceTemplateError> {
        let storage = &self.repositories.storage_engine;

        tracing::debug!("Start transaction");
        storage.start_transaction().await?;

        let result = async {
            self.link_to_host_templates(request).await?;
            self.link_to_service_categories(request, access_groups).await?;
            if let Some(difference) = macro_difference {
                self.update_macros(request.id, difference).await?;
            }

            tracing::debug!("Commit transaction");
            storage.commit_transaction().await?;
            Ok::<(), ServiceTemplateError>(())
        }
        .await;

        if result.is_err() {
            tracing::debug!("Rollback transaction");
            if let Err(rollback) = storage.rollback_transaction().await {
                tracing::error!("Rollback failed: {}", rollback);
            }
        }
        result
    }

    async fn link_to_host_templates(
        &self,
        request: &PartialUpdateServiceTemplateRequest,
    ) -> Result<(), ServiceTemplateError> {
        let Some(host_templates) = &request.host_templates else {
            return Ok(());
        };
        let repository = &self.repositories.write_service_template;

        tracing::info!(service_template_id = %request.id, "Unlink existing host templates");
        repository.unlink_hosts(request.id).await?;

        tracing::info!(
            service_template_id = %request.id,
            host_templates = ?host_templates,
            "Link host templates"
        );
        repository
            .link_to_hosts(request.id, &unique(host_templates))
            .await?;
        Ok(())
    }

    async fn link_to_service_categories(
        &self,
        request: &PartialUpdateServiceTemplateRequest,
        access_groups: &[AccessGroup],
    ) -> Result<(), ServiceTemplateError> {
        let Some(requested) = &request.service_categories else {
            return Ok(());
        };

        let read = &self.repositories.read_service_category;
        let original = if self.user.is_admin() {
            read.find_by_service(request.id).await?
        } else {
            read.find_by_service_and_access_groups(request.id, access_groups)
                .await?
        };
        tracing::info!(service_categories = ?original, "Original service categories found");

        let difference = BasicDifference::new(
            original.iter().map(|category| category.id),
            requested.iter().copied(),
        );
        let to_remove = difference.removed();
        let to_add = difference.added();
        let write = &self.repositories.write_service_category;

        if !to_remove.is_empty() {
            tracing::info!(service_categories = ?to_remove, "Unlink service categories");
            write.unlink_from_service(request.id, &to_remove).await?;
        }
        if !to_add.is_empty() {
            tracing::info!(service_categories = ?to_add, "Link service categories");
            write.link_to_service(request.id, &to_add).await?;
        }
        Ok(())
    }

    /// Ordered difference between stored macros and `requested`
    ///
    /// Reads and validation only; nothing is written here.
    async fn compute_macro_difference(
        &self,
        template: &ServiceTemplate,
        requested: &[MacroRequest],
    ) -> Result<MacroDifference, ServiceTemplateError> {
        let (existing, command_macros) = self
            .find_all_macros(template.id(), template.command_id())
            .await?;

        let mut target = MacroMap::new();
        for macro_request in requested {
            let macro_ = MacroFactory::create(
                macro_request,
                template.id(),
                &existing,
                &command_macros,
                &self.config.macro_limits,
            )?;
            target.insert(macro_.name().to_string(), macro_);
        }

        let mut difference = MacroDifference::compute(
            &existing.direct,
            &existing.inherited,
            &command_macros,
            &target,
        );
        MacroManager::set_order(&mut difference, &target, &existing.direct);
        MacroManager::fill_descriptions(&mut difference, &command_macros);
        Ok(difference)
    }

    async fn update_macros(
        &self,
        service_template_id: ObjectId,
        difference: &MacroDifference,
    ) -> Result<(), ServiceTemplateError> {
        tracing::info!(service_template_id = %service_template_id, "Update macros");

        let write = &self.repositories.write_service_macro;
        for macro_ in difference.removed_macros.values() {
            tracing::info!("Delete the macro {}", macro_.name());
            write.delete(macro_).await?;
        }
        for macro_ in difference.updated_macros.values() {
            tracing::info!("Update the macro {}", macro_.name());
            write.update(macro_).await?;
        }
        for macro_ in difference.added_macros.values() {
            tracing::info!("Add the macro {}", macro_.name());
            write.add(macro_).await?;
        }
        Ok(())
    }

    /// Direct/inherited macros of the template and the flattened macros of its command
    async fn find_all_macros(
        &self,
        service_template_id: ObjectId,
        command_id: Option<ObjectId>,
    ) -> Result<(ResolvedMacros, CommandMacroMap), ServiceTemplateError> {
        let parents = self
            .repositories
            .read_service_template
            .find_parents(service_template_id)
            .await?;
        let line = InheritanceLine::build(service_template_id, &parents)?;

        let owners: Vec<ObjectId> = line.owners().collect();
        let stored = self
            .repositories
            .read_service_macro
            .find_by_service_ids(&owners)
            .await?;
        line.check_owners(&stored)?;
        let resolved = MacroResolver::resolve_inheritance(&stored, &line);

        let command_macros = match command_id {
            Some(command_id) => {
                let declared = self
                    .repositories
                    .read_command_macro
                    .find_by_command_id_and_type(command_id, CommandMacroType::Service)
                    .await?;
                MacroManager::resolve_inheritance_for_command_macro(declared)
            }
            None => CommandMacroMap::new(),
        };

        Ok((resolved, command_macros))
    }
}

fn unique(ids: &[ObjectId]) -> Vec<ObjectId> {
    let mut seen = indexmap::IndexSet::with_capacity(ids.len());
    seen.extend(ids.iter().copied());
    seen.into_iter().collect()
}

fn ensure_all_found(
    property: &'static str,
    requested: &[ObjectId],
    found: &[ObjectId],
) -> Result<(), ServiceTemplateError> {
    let missing: Vec<ObjectId> = requested
        .iter()
        .filter(|id| !found.contains(*id))
        .copied()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ServiceTemplateError::ids_do_not_exist(property, missing))
    }
}
