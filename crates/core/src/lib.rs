//! `ehsrbac-core` — shared building blocks for the RBAC role builder.
//!
//! This crate contains **pure domain** primitives (no IO, no UI concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ActionId, ActionKey, EntityName, EstablishmentId, ModuleId, RoleId, UserId};
