//! Testing utilities for cfgtmpl workspace
//!
//! In-memory store implementing every repository trait, plus fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use cfgtmpl_macro::{CommandMacro, CommandMacroType, Macro, ObjectId, TemplateInheritance};
use cfgtmpl_update::{
    AccessGroup, Contact, DataStorageEngine, PartialUpdateServiceTemplate, Presenter,
    ReadAccessGroupRepository, ReadCommandMacroRepository, ReadHostTemplateRepository,
    ReadServiceCategoryRepository, ReadServiceMacroRepository, ReadServiceTemplateRepository,
    RepositoryError, RepositoryResult, ServiceCategory, ServiceTemplate,
    ServiceTemplateRepositories, UpdateResponse, WriteServiceCategoryRepository,
    WriteServiceMacroRepository, WriteServiceTemplateRepository,
    ROLE_CONFIGURATION_SERVICES_TEMPLATES_READ_WRITE,
};
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Everything the store holds; cloned as a whole for transactions
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub templates: BTreeMap<ObjectId, ServiceTemplate>,
    pub parents: Vec<TemplateInheritance>,
    pub host_templates: BTreeSet<ObjectId>,
    pub host_links: BTreeMap<ObjectId, Vec<ObjectId>>,
    pub categories: BTreeMap<ObjectId, ServiceCategory>,
    /// Categories visible per access group id
    pub category_acl: BTreeMap<i64, BTreeSet<ObjectId>>,
    pub category_links: BTreeMap<ObjectId, BTreeSet<ObjectId>>,
    /// Access groups per contact id
    pub access_groups: BTreeMap<i64, Vec<AccessGroup>>,
    pub macros: Vec<Macro>,
    pub command_macros: Vec<CommandMacro>,
}

impl StoreState {
    /// Direct macros of `owner`, by stored order
    #[must_use]
    pub fn macros_of(&self, owner: ObjectId) -> Vec<Macro> {
        let mut owned: Vec<Macro> = self
            .macros
            .iter()
            .filter(|m| m.owner_id() == owner)
            .cloned()
            .collect();
        owned.sort_by_key(Macro::order);
        owned
    }

    fn visible_categories(&self, access_groups: &[AccessGroup]) -> BTreeSet<ObjectId> {
        access_groups
            .iter()
            .filter_map(|group| self.category_acl.get(&group.id))
            .flatten()
            .copied()
            .collect()
    }
}

/// In-memory store with snapshot transactions and failure injection
///
/// `start_transaction` snapshots the state, `rollback_transaction` restores it.
/// Every write call is appended to a journal.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    snapshot: Mutex<Option<StoreState>>,
    journal: Mutex<Vec<String>>,
    failing_macros: Mutex<BTreeSet<String>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new(state: StoreState) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(state),
            ..Self::default()
        })
    }

    /// Wire this store as every collaborator
    #[must_use]
    pub fn repositories(self: &Arc<Self>) -> ServiceTemplateRepositories {
        ServiceTemplateRepositories {
            read_service_template: self.clone(),
            write_service_template: self.clone(),
            read_host_template: self.clone(),
            read_service_category: self.clone(),
            write_service_category: self.clone(),
            read_access_group: self.clone(),
            read_service_macro: self.clone(),
            write_service_macro: self.clone(),
            read_command_macro: self.clone(),
            storage_engine: self.clone(),
        }
    }

    /// Copy of the current state
    #[must_use]
    pub fn state(&self) -> StoreState {
        self.state.lock().clone()
    }

    /// Recorded calls, in order
    #[must_use]
    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().clone()
    }

    /// Make every write of macro `name` fail
    pub fn fail_macro_writes(&self, name: impl Into<String>) {
        self.failing_macros.lock().insert(name.into());
    }

    fn record(&self, entry: String) {
        self.journal.lock().push(entry);
    }

    fn check_macro_write(&self, macro_: &Macro) -> RepositoryResult<()> {
        if self.failing_macros.lock().contains(macro_.name()) {
            return Err(RepositoryError::Storage(format!(
                "write of macro {} rejected",
                macro_.name()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ReadServiceTemplateRepository for InMemoryStore {
    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<ServiceTemplate>> {
        Ok(self.state.lock().templates.get(&id).cloned())
    }

    async fn find_parents(&self, id: ObjectId) -> RepositoryResult<Vec<TemplateInheritance>> {
        let state = self.state.lock();
        let mut edges = Vec::new();
        let mut visited = BTreeSet::from([id]);
        let mut frontier = vec![id];
        while let Some(child) = frontier.pop() {
            for edge in state.parents.iter().filter(|e| e.child_id == child) {
                edges.push(*edge);
                if visited.insert(edge.parent_id) {
                    frontier.push(edge.parent_id);
                }
            }
        }
        Ok(edges)
    }
}

#[async_trait]
impl WriteServiceTemplateRepository for InMemoryStore {
    async fn link_to_hosts(
        &self,
        id: ObjectId,
        host_template_ids: &[ObjectId],
    ) -> RepositoryResult<()> {
        self.record(format!("link hosts {id} {host_template_ids:?}"));
        self.state
            .lock()
            .host_links
            .entry(id)
            .or_default()
            .extend_from_slice(host_template_ids);
        Ok(())
    }

    async fn unlink_hosts(&self, id: ObjectId) -> RepositoryResult<()> {
        self.record(format!("unlink hosts {id}"));
        self.state.lock().host_links.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ReadHostTemplateRepository for InMemoryStore {
    async fn find_all_existing_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<ObjectId>> {
        let state = self.state.lock();
        Ok(ids
            .iter()
            .filter(|id| state.host_templates.contains(*id))
            .copied()
            .collect())
    }
}

#[async_trait]
impl ReadServiceCategoryRepository for InMemoryStore {
    async fn find_all_existing_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<ObjectId>> {
        let state = self.state.lock();
        Ok(ids
            .iter()
            .filter(|id| state.categories.contains_key(*id))
            .copied()
            .collect())
    }

    async fn find_all_existing_ids_by_access_groups(
        &self,
        ids: &[ObjectId],
        access_groups: &[AccessGroup],
    ) -> RepositoryResult<Vec<ObjectId>> {
        let state = self.state.lock();
        let visible = state.visible_categories(access_groups);
        Ok(ids
            .iter()
            .filter(|id| state.categories.contains_key(*id) && visible.contains(*id))
            .copied()
            .collect())
    }

    async fn find_by_service(
        &self,
        service_id: ObjectId,
    ) -> RepositoryResult<Vec<ServiceCategory>> {
        let state = self.state.lock();
        Ok(state
            .category_links
            .get(&service_id)
            .into_iter()
            .flatten()
            .filter_map(|id| state.categories.get(id).cloned())
            .collect())
    }

    async fn find_by_service_and_access_groups(
        &self,
        service_id: ObjectId,
        access_groups: &[AccessGroup],
    ) -> RepositoryResult<Vec<ServiceCategory>> {
        let state = self.state.lock();
        let visible = state.visible_categories(access_groups);
        Ok(state
            .category_links
            .get(&service_id)
            .into_iter()
            .flatten()
            .filter(|id| visible.contains(*id))
            .filter_map(|id| state.categories.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl WriteServiceCategoryRepository for InMemoryStore {
    async fn link_to_service(
        &self,
        service_id: ObjectId,
        category_ids: &[ObjectId],
    ) -> RepositoryResult<()> {
        self.record(format!("link categories {service_id} {category_ids:?}"));
        self.state
            .lock()
            .category_links
            .entry(service_id)
            .or_default()
            .extend(category_ids.iter().copied());
        Ok(())
    }

    async fn unlink_from_service(
        &self,
        service_id: ObjectId,
        category_ids: &[ObjectId],
    ) -> RepositoryResult<()> {
        self.record(format!("unlink categories {service_id} {category_ids:?}"));
        if let Some(links) = self.state.lock().category_links.get_mut(&service_id) {
            links.retain(|id| !category_ids.contains(id));
        }
        Ok(())
    }
}

#[async_trait]
impl ReadAccessGroupRepository for InMemoryStore {
    async fn find_by_contact(&self, contact: &Contact) -> RepositoryResult<Vec<AccessGroup>> {
        Ok(self
            .state
            .lock()
            .access_groups
            .get(&contact.id())
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl ReadServiceMacroRepository for InMemoryStore {
    async fn find_by_service_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<Macro>> {
        let state = self.state.lock();
        let mut found: Vec<Macro> = state
            .macros
            .iter()
            .filter(|m| ids.contains(&m.owner_id()))
            .cloned()
            .collect();
        found.sort_by_key(Macro::order);
        Ok(found)
    }
}

#[async_trait]
impl WriteServiceMacroRepository for InMemoryStore {
    async fn add(&self, macro_: &Macro) -> RepositoryResult<()> {
        self.check_macro_write(macro_)?;
        self.record(format!("add macro {}", macro_.name()));
        self.state.lock().macros.push(macro_.clone());
        Ok(())
    }

    async fn update(&self, macro_: &Macro) -> RepositoryResult<()> {
        self.check_macro_write(macro_)?;
        self.record(format!("update macro {}", macro_.name()));
        let mut state = self.state.lock();
        let stored = state
            .macros
            .iter_mut()
            .find(|m| m.owner_id() == macro_.owner_id() && m.name() == macro_.name())
            .ok_or_else(|| RepositoryError::Storage(format!("macro {} not found", macro_.name())))?;
        *stored = macro_.clone();
        Ok(())
    }

    async fn delete(&self, macro_: &Macro) -> RepositoryResult<()> {
        self.check_macro_write(macro_)?;
        self.record(format!("delete macro {}", macro_.name()));
        self.state
            .lock()
            .macros
            .retain(|m| !(m.owner_id() == macro_.owner_id() && m.name() == macro_.name()));
        Ok(())
    }
}

#[async_trait]
impl ReadCommandMacroRepository for InMemoryStore {
    async fn find_by_command_id_and_type(
        &self,
        command_id: ObjectId,
        kind: CommandMacroType,
    ) -> RepositoryResult<Vec<CommandMacro>> {
        Ok(self
            .state
            .lock()
            .command_macros
            .iter()
            .filter(|m| m.command_id() == command_id && m.kind() == kind)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DataStorageEngine for InMemoryStore {
    async fn start_transaction(&self) -> RepositoryResult<()> {
        let mut snapshot = self.snapshot.lock();
        if snapshot.is_some() {
            return Err(RepositoryError::Transaction(
                "transaction already started".to_string(),
            ));
        }
        *snapshot = Some(self.state.lock().clone());
        self.record("start transaction".to_string());
        Ok(())
    }

    async fn commit_transaction(&self) -> RepositoryResult<()> {
        self.snapshot
            .lock()
            .take()
            .ok_or_else(|| RepositoryError::Transaction("no active transaction".to_string()))?;
        self.record("commit transaction".to_string());
        Ok(())
    }

    async fn rollback_transaction(&self) -> RepositoryResult<()> {
        let restored = self
            .snapshot
            .lock()
            .take()
            .ok_or_else(|| RepositoryError::Transaction("no active transaction".to_string()))?;
        *self.state.lock() = restored;
        self.record("rollback transaction".to_string());
        Ok(())
    }
}

/// Presenter that keeps the last response
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    response: Mutex<Option<UpdateResponse>>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn response(&self) -> Option<UpdateResponse> {
        self.response.lock().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&self, response: UpdateResponse) {
        *self.response.lock() = Some(response);
    }
}

pub const TEMPLATE_ID: ObjectId = ObjectId(30);
pub const PARENT_ID: ObjectId = ObjectId(20);
pub const ROOT_ID: ObjectId = ObjectId(10);
pub const COMMAND_ID: ObjectId = ObjectId(500);

pub fn macro_with(owner: ObjectId, name: &str, value: &str, order: u32) -> Macro {
    Macro::builder(owner, name)
        .value(value)
        .order(order)
        .build()
        .unwrap()
}

/// Template 30 -> 20 -> 10 with a check command and a few macros
///
/// - root (10): TIMEOUT=10, PORT=161
/// - parent (20): TIMEOUT=30
/// - template (30): PORT=1161 (order 0), COMMUNITY=public (order 1)
/// - command 500: WARNING, CRITICAL (described)
/// - host templates 1, 2, 3; categories 100, 101, 102 (template linked to 100)
pub fn create_test_state() -> StoreState {
    let mut state = StoreState::default();
    state.templates.insert(
        TEMPLATE_ID,
        ServiceTemplate::new(TEMPLATE_ID, "snmp-template").with_command(COMMAND_ID),
    );
    state
        .templates
        .insert(PARENT_ID, ServiceTemplate::new(PARENT_ID, "generic-active"));
    state
        .templates
        .insert(ROOT_ID, ServiceTemplate::new(ROOT_ID, "generic-service"));
    state.parents = vec![
        TemplateInheritance::new(TEMPLATE_ID, PARENT_ID),
        TemplateInheritance::new(PARENT_ID, ROOT_ID),
    ];
    state.host_templates = [ObjectId(1), ObjectId(2), ObjectId(3)].into();
    for (id, name) in [(100, "network"), (101, "system"), (102, "database")] {
        state
            .categories
            .insert(ObjectId(id), ServiceCategory::new(ObjectId(id), name));
    }
    state
        .category_links
        .insert(TEMPLATE_ID, [ObjectId(100)].into());
    state.macros = vec![
        macro_with(ROOT_ID, "TIMEOUT", "10", 0),
        macro_with(ROOT_ID, "PORT", "161", 1),
        macro_with(PARENT_ID, "TIMEOUT", "30", 0),
        macro_with(TEMPLATE_ID, "PORT", "1161", 0),
        macro_with(TEMPLATE_ID, "COMMUNITY", "public", 1),
    ];
    state.command_macros = vec![
        CommandMacro::new(COMMAND_ID, CommandMacroType::Service, "WARNING")
            .with_description("warning threshold"),
        CommandMacro::new(COMMAND_ID, CommandMacroType::Service, "CRITICAL")
            .with_description("critical threshold"),
        CommandMacro::new(COMMAND_ID, CommandMacroType::Host, "ADDRESS"),
    ];
    state
}

pub fn admin() -> Contact {
    Contact::new(1, "admin").admin()
}

pub fn operator() -> Contact {
    Contact::new(2, "operator").with_role(ROLE_CONFIGURATION_SERVICES_TEMPLATES_READ_WRITE)
}

pub fn setup_use_case(user: Contact) -> (Arc<InMemoryStore>, PartialUpdateServiceTemplate) {
    let store = InMemoryStore::new(create_test_state());
    let use_case = PartialUpdateServiceTemplate::new(store.repositories(), user);
    (store, use_case)
}
