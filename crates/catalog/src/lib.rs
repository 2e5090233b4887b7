//! Permission catalog: the static Module → Entity → Action hierarchy.
//!
//! The catalog is configuration. Every other crate reads it; nothing mutates
//! it after construction. All category/action iteration lives here so the
//! role builder, the classifier and the validator agree on membership.

pub mod catalog;
pub mod ehs;
pub mod establishment;
pub mod model;
pub mod policy;

pub use catalog::{ActionLocation, Catalog, CatalogError, action_key};
pub use ehs::OSHA_MODULE;
pub use establishment::Establishment;
pub use model::{
    CatalogMode, Category, LicenseTier, PermissionAction, PermissionEntity, PermissionModule, Verb,
};
pub use policy::TierPolicy;
