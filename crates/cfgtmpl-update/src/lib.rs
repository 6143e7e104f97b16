//! Service template partial update
//!
//! The use case around the macro engine:
//! - Checks the caller's rights and the ids referenced by the request
//! - Relinks host templates and service categories
//! - Resolves, diffs and orders macros, then persists the difference
//! - Runs every write in one transaction, rolled back on any failure
//!
//! Storage, access control data and presentation are consumed through the
//! traits in [`repository`] and [`Presenter`].
//!
//! # Example
//!
//! ```rust,ignore
//! use cfgtmpl_update::{
//!     Contact, MacroRequest, PartialUpdateServiceTemplate, PartialUpdateServiceTemplateRequest,
//! };
//!
//! let use_case = PartialUpdateServiceTemplate::new(repositories, Contact::new(1, "admin").admin());
//! let request = PartialUpdateServiceTemplateRequest::new(ObjectId(12))
//!     .with_macros(vec![MacroRequest::new("TIMEOUT", "60")]);
//!
//! let response = use_case.execute(request).await;
//! assert!(response.is_success());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod basic_difference;
mod config;
mod error;
mod factory;
mod model;
mod partial_update;
pub mod repository;
mod request;
mod response;

pub use basic_difference::BasicDifference;
pub use config::UpdateConfig;
pub use error::{RepositoryError, ServiceTemplateError};
pub use factory::MacroFactory;
pub use model::{
    AccessGroup, Contact, ServiceCategory, ServiceTemplate,
    ROLE_CONFIGURATION_SERVICES_TEMPLATES_READ_WRITE,
};
pub use partial_update::PartialUpdateServiceTemplate;
pub use repository::{
    DataStorageEngine, ReadAccessGroupRepository, ReadCommandMacroRepository,
    ReadHostTemplateRepository, ReadServiceCategoryRepository, ReadServiceMacroRepository,
    ReadServiceTemplateRepository, RepositoryResult, ServiceTemplateRepositories,
    WriteServiceCategoryRepository, WriteServiceMacroRepository, WriteServiceTemplateRepository,
};
pub use request::{MacroRequest, PartialUpdateServiceTemplateRequest};
pub use response::{Presenter, UpdateResponse};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
