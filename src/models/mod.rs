//! # Domain Models
//!
//! Typed views of the entities the orchestration engine works with:
//! repositories (catalog-owned), content-type policy, and content proxies.
//! The catalog trait is the persistence seam; everything else is plain data.

pub mod catalog;
pub mod content_type;
pub mod proxy;
pub mod repository;

pub use catalog::{CatalogError, CatalogResult, InMemoryCatalog, RepositoryCatalog};
pub use content_type::{ContentType, ContentTypeRegistry};
pub use proxy::{ContentProxy, ProxyId, ProxyRole};
pub use repository::{EnvironmentId, PublicationHandle, Repository, RepositoryId};
