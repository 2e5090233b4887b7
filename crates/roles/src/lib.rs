//! Custom roles: the persisted unit that bundles a name with both permission
//! maps, the protected system templates, and the checks run before a role is
//! committed.

pub mod role;
pub mod templates;
pub mod validation;

pub use role::{CustomRole, NewCustomRole, RoleEdit, SYSTEM_ACTOR};
pub use templates::{GLOBAL_ADMIN, TECHNICIAN, VIEW_ONLY, global_admin, system_roles, technician, view_only};
pub use validation::{
    RoleValidation, ValidationIssue, ensure_committable, has_osha_access, validate_role, validate_view_only_role,
};
