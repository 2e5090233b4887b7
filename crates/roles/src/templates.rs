//! Protected system role templates shipped with the catalog.

use chrono::{DateTime, Utc};

use ehsrbac_catalog::{Catalog, CatalogMode, Category, OSHA_MODULE};
use ehsrbac_permissions::{RolePermissions, create_default_permissions, toggle_category_permissions, toggle_global_permissions};

use crate::role::CustomRole;

pub const GLOBAL_ADMIN: &str = "Global Admin";
pub const VIEW_ONLY: &str = "View-Only";
pub const TECHNICIAN: &str = "Technician";

/// Actions a Technician adds on top of View-Only.
const TECHNICIAN_EXTRAS: [&str; 2] = ["event:create", "event:edit"];

pub fn global_admin(catalog: &Catalog, now: DateTime<Utc>) -> CustomRole {
    let permissions = toggle_global_permissions(
        catalog,
        &create_default_permissions(catalog),
        CatalogMode::Advanced,
        true,
    );
    CustomRole::system(GLOBAL_ADMIN, "Full access to every module", permissions, now)
}

pub fn view_only(catalog: &Catalog, now: DateTime<Utc>) -> CustomRole {
    CustomRole::system(VIEW_ONLY, "Read-only access outside OSHA", view_only_permissions(catalog), now)
}

pub fn technician(catalog: &Catalog, now: DateTime<Utc>) -> CustomRole {
    let permissions = TECHNICIAN_EXTRAS
        .iter()
        .fold(view_only_permissions(catalog), |acc, action_id| grant(catalog, &acc, action_id));
    CustomRole::system(TECHNICIAN, "Reports and updates safety events", permissions, now)
}

/// Every template, in display order.
pub fn system_roles(catalog: &Catalog, now: DateTime<Utc>) -> Vec<CustomRole> {
    vec![global_admin(catalog, now), view_only(catalog, now), technician(catalog, now)]
}

fn view_only_permissions(catalog: &Catalog) -> RolePermissions {
    catalog
        .modules()
        .iter()
        .filter(|module| module.id.as_str() != OSHA_MODULE)
        .fold(create_default_permissions(catalog), |acc, module| {
            toggle_category_permissions(catalog, &acc, module.id.as_str(), Category::View, true)
        })
}

/// Actions missing from a custom catalog are skipped.
fn grant(catalog: &Catalog, state: &RolePermissions, action_id: &str) -> RolePermissions {
    match catalog.action(action_id) {
        Some(loc) => state.with(loc.module.id.clone(), loc.entity.name.clone(), loc.action.id.action_key(), true),
        None => state.clone(),
    }
}
