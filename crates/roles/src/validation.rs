//! Structural checks for constrained role templates.
//!
//! Validation is a query: it reports every violation at once and never blocks
//! an edit. Only [`ensure_committable`] turns violations into an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ehsrbac_catalog::{Catalog, OSHA_MODULE};
use ehsrbac_core::DomainError;
use ehsrbac_licensing::{count_paid_permissions, is_view_only_role_name};
use ehsrbac_permissions::{OshaLocationPermissions, RolePermissions};

use crate::role::CustomRole;

/// A single structural violation. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("View Only roles cannot have Create/Edit/Submit/Approve permissions")]
    PaidPermissions { count: usize },

    #[error("View Only roles must have zero OSHA access")]
    OshaAccess,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleValidation {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl RoleValidation {
    pub fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn ok() -> Self {
        Self::from_issues(Vec::new())
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Any granted leaf under the `osha` module, or any granted leaf at any
/// establishment in the overlay.
pub fn has_osha_access(state: &RolePermissions, overlay: Option<&OshaLocationPermissions>) -> bool {
    let module_access = state
        .module(OSHA_MODULE)
        .is_some_and(|grants| grants.any_enabled());

    module_access || overlay.is_some_and(OshaLocationPermissions::has_any_grant)
}

/// Both checks always run so callers see every violation.
pub fn validate_view_only_role(
    catalog: &Catalog,
    state: &RolePermissions,
    overlay: Option<&OshaLocationPermissions>,
) -> RoleValidation {
    let mut errors = Vec::new();

    let paid = count_paid_permissions(catalog, state);
    if paid > 0 {
        errors.push(ValidationIssue::PaidPermissions { count: paid });
    }
    if has_osha_access(state, overlay) {
        errors.push(ValidationIssue::OshaAccess);
    }

    RoleValidation::from_issues(errors)
}

/// Applies the View-Only rules when the role carries a View-Only name.
pub fn validate_role(catalog: &Catalog, role: &CustomRole) -> RoleValidation {
    if !is_view_only_role_name(&role.name) {
        return RoleValidation::ok();
    }
    validate_view_only_role(catalog, &role.permissions, Some(&role.osha_location_permissions))
}

/// Gate run by the persistence collaborator before storing a role.
pub fn ensure_committable(catalog: &Catalog, role: &CustomRole) -> Result<(), DomainError> {
    if role.name.trim().is_empty() {
        return Err(DomainError::validation("role name must not be blank"));
    }

    let validation = validate_role(catalog, role);
    if !validation.valid {
        tracing::warn!(role = %role.id, issues = validation.errors.len(), "role rejected at commit");
        return Err(DomainError::invariant(validation.messages().join("; ")));
    }
    Ok(())
}
