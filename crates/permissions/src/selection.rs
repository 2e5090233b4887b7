//! Catalog-scoped aggregation and bulk toggles.
//!
//! Every predicate walks the *catalog* actions of its scope and reads their
//! values from state. Stale keys in state never count, and a scope with zero
//! catalog actions is never fully selected.

use serde::{Deserialize, Serialize};

use ehsrbac_catalog::{Catalog, CatalogMode, Category, PermissionAction, PermissionEntity, PermissionModule};
use ehsrbac_core::{EntityName, ModuleId};

use crate::error::PermissionError;
use crate::grants::{ActionGrants, EntityGrants, RolePermissions};

/// Tri-state checkbox value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    Checked,
    Indeterminate,
    Unchecked,
}

/// Enabled/total counts over one scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    enabled: usize,
    total: usize,
}

impl Tally {
    pub(crate) fn of(values: impl IntoIterator<Item = bool>) -> Self {
        values.into_iter().fold(Self::default(), |acc, value| Self {
            enabled: acc.enabled + usize::from(value),
            total: acc.total + 1,
        })
    }

    pub(crate) fn fully(&self) -> bool {
        self.total > 0 && self.enabled == self.total
    }

    pub(crate) fn partially(&self) -> bool {
        self.enabled > 0 && self.enabled < self.total
    }

    pub(crate) fn selection(&self) -> Selection {
        if self.fully() {
            Selection::Checked
        } else if self.partially() {
            Selection::Indeterminate
        } else {
            Selection::Unchecked
        }
    }
}

fn entity_values<'a>(
    state: &'a RolePermissions,
    module_id: &'a str,
    entity: &'a PermissionEntity,
) -> impl Iterator<Item = bool> + 'a {
    entity
        .actions
        .iter()
        .map(move |action| state.get(module_id, entity.name.as_str(), action.key()))
}

fn module_values<'a>(state: &'a RolePermissions, module: &'a PermissionModule) -> impl Iterator<Item = bool> + 'a {
    module
        .actions()
        .map(move |(entity, action)| state.get(module.id.as_str(), entity.name.as_str(), action.key()))
}

fn entity_tally(catalog: &Catalog, state: &RolePermissions, module_id: &str, entity: &str) -> Tally {
    match catalog.entity(module_id, entity) {
        Some(entity) => Tally::of(entity_values(state, module_id, entity)),
        None => Tally::default(),
    }
}

fn module_tally(catalog: &Catalog, state: &RolePermissions, module_id: &str) -> Tally {
    match catalog.module(module_id) {
        Some(module) => Tally::of(module_values(state, module)),
        None => Tally::default(),
    }
}

fn category_tally(catalog: &Catalog, state: &RolePermissions, module_id: &str, category: Category) -> Tally {
    Tally::of(
        catalog
            .category_actions(module_id, category)
            .into_iter()
            .map(|(entity, action)| state.get(module_id, entity.name.as_str(), action.key())),
    )
}

fn global_tally(catalog: &Catalog, state: &RolePermissions, mode: CatalogMode) -> Tally {
    Tally::of(
        catalog
            .visible_modules(mode)
            .flat_map(|module| module_values(state, module)),
    )
}

/// All-false tree shaped exactly like the catalog (every module, advanced-only included).
pub fn create_default_permissions(catalog: &Catalog) -> RolePermissions {
    catalog
        .modules()
        .iter()
        .map(|module| (module.id.clone(), EntityGrants::uniform(module, false)))
        .collect()
}

pub fn get_permission_value(state: &RolePermissions, module_id: &str, entity: &str, key: &str) -> bool {
    state.get(module_id, entity, key)
}

/// Write one leaf. Paths unknown to the catalog are stored as-is; they are
/// ignored by every catalog-scoped aggregate.
pub fn set_permission_value(
    state: &RolePermissions,
    module_id: impl Into<ModuleId>,
    entity: impl Into<EntityName>,
    key: impl Into<ehsrbac_core::ActionKey>,
    value: bool,
) -> RolePermissions {
    state.with(module_id, entity, key, value)
}

/// Like [`set_permission_value`] but refuses paths the catalog does not know.
pub fn set_permission_value_checked(
    catalog: &Catalog,
    state: &RolePermissions,
    module_id: &str,
    entity: &str,
    key: &str,
    value: bool,
) -> Result<RolePermissions, PermissionError> {
    let (Some(module), Some(entity_def), Some(action)) = (
        catalog.module(module_id),
        catalog.entity(module_id, entity),
        catalog.resolve(module_id, entity, key),
    ) else {
        return Err(PermissionError::UnknownPath {
            module: module_id.to_string(),
            entity: entity.to_string(),
            key: key.to_string(),
        });
    };

    Ok(state.with(
        module.id.clone(),
        entity_def.name.clone(),
        action.id.action_key(),
        value,
    ))
}

pub fn is_entity_fully_selected(catalog: &Catalog, state: &RolePermissions, module_id: &str, entity: &str) -> bool {
    entity_tally(catalog, state, module_id, entity).fully()
}

pub fn is_entity_partially_selected(
    catalog: &Catalog,
    state: &RolePermissions,
    module_id: &str,
    entity: &str,
) -> bool {
    entity_tally(catalog, state, module_id, entity).partially()
}

pub fn entity_selection(catalog: &Catalog, state: &RolePermissions, module_id: &str, entity: &str) -> Selection {
    entity_tally(catalog, state, module_id, entity).selection()
}

pub fn is_module_fully_selected(catalog: &Catalog, state: &RolePermissions, module_id: &str) -> bool {
    module_tally(catalog, state, module_id).fully()
}

pub fn is_module_partially_selected(catalog: &Catalog, state: &RolePermissions, module_id: &str) -> bool {
    module_tally(catalog, state, module_id).partially()
}

pub fn module_selection(catalog: &Catalog, state: &RolePermissions, module_id: &str) -> Selection {
    module_tally(catalog, state, module_id).selection()
}

pub fn is_category_fully_selected(
    catalog: &Catalog,
    state: &RolePermissions,
    module_id: &str,
    category: Category,
) -> bool {
    category_tally(catalog, state, module_id, category).fully()
}

pub fn is_category_partially_selected(
    catalog: &Catalog,
    state: &RolePermissions,
    module_id: &str,
    category: Category,
) -> bool {
    category_tally(catalog, state, module_id, category).partially()
}

pub fn category_selection(
    catalog: &Catalog,
    state: &RolePermissions,
    module_id: &str,
    category: Category,
) -> Selection {
    category_tally(catalog, state, module_id, category).selection()
}

/// Fully selected across the modules visible in `mode`.
pub fn is_globally_fully_selected(catalog: &Catalog, state: &RolePermissions, mode: CatalogMode) -> bool {
    global_tally(catalog, state, mode).fully()
}

pub fn is_globally_partially_selected(catalog: &Catalog, state: &RolePermissions, mode: CatalogMode) -> bool {
    global_tally(catalog, state, mode).partially()
}

pub fn global_selection(catalog: &Catalog, state: &RolePermissions, mode: CatalogMode) -> Selection {
    global_tally(catalog, state, mode).selection()
}

/// Rebuild one entity's leaf map from the catalog with every action set to
/// `enable`. Stale keys for the entity are dropped. Unknown entities leave the
/// state unchanged.
pub fn toggle_entity_permissions(
    catalog: &Catalog,
    state: &RolePermissions,
    module_id: &str,
    entity: &str,
    enable: bool,
) -> RolePermissions {
    let (Some(module), Some(entity_def)) = (catalog.module(module_id), catalog.entity(module_id, entity)) else {
        return state.clone();
    };

    let grants = ActionGrants::uniform(entity_def, enable);
    tracing::debug!(module = module_id, entity, enable, leaves = grants.len(), "toggled entity");
    state.with_entity(module.id.clone(), entity_def.name.clone(), grants)
}

/// Rebuild one module's subtree from the catalog.
pub fn toggle_module_permissions(
    catalog: &Catalog,
    state: &RolePermissions,
    module_id: &str,
    enable: bool,
) -> RolePermissions {
    let Some(module) = catalog.module(module_id) else {
        return state.clone();
    };

    tracing::debug!(module = module_id, enable, leaves = module.action_count(), "toggled module");
    state.with_module(module.id.clone(), EntityGrants::uniform(module, enable))
}

/// Set every action of `category` in `module_id`; other leaves are untouched.
pub fn toggle_category_permissions(
    catalog: &Catalog,
    state: &RolePermissions,
    module_id: &str,
    category: Category,
    enable: bool,
) -> RolePermissions {
    let Some(module) = catalog.module(module_id) else {
        return state.clone();
    };

    let actions: Vec<(&PermissionEntity, &PermissionAction)> = catalog.category_actions(module_id, category);
    tracing::debug!(module = module_id, %category, enable, leaves = actions.len(), "toggled category");

    actions.into_iter().fold(state.clone(), |acc, (entity, action)| {
        acc.with(module.id.clone(), entity.name.clone(), action.id.action_key(), enable)
    })
}

/// Rebuild every module visible in `mode`. Modules hidden by `mode` are not touched.
pub fn toggle_global_permissions(
    catalog: &Catalog,
    state: &RolePermissions,
    mode: CatalogMode,
    enable: bool,
) -> RolePermissions {
    let modules: Vec<&PermissionModule> = catalog.visible_modules(mode).collect();
    tracing::debug!(?mode, enable, modules = modules.len(), "toggled all permissions");

    modules.into_iter().fold(state.clone(), |acc, module| {
        acc.with_module(module.id.clone(), EntityGrants::uniform(module, enable))
    })
}

/// Number of enabled leaves, catalog-agnostic.
pub fn count_enabled_permissions(state: &RolePermissions) -> usize {
    state.leaves().filter(|(_, _, _, value)| *value).count()
}

/// Drop every leaf whose path no longer resolves in the catalog.
pub fn prune_unknown(catalog: &Catalog, state: &RolePermissions) -> RolePermissions {
    let mut next = state.clone();
    let mut dropped = 0;

    next.retain_modules(|module_id, grants| {
        if catalog.module(module_id.as_str()).is_none() {
            dropped += grants.leaves().count();
            return false;
        }
        let stale = grants
            .leaves()
            .filter(|(entity, key, _)| catalog.resolve(module_id.as_str(), entity.as_str(), key.as_str()).is_none())
            .count();
        if stale > 0 {
            dropped += std::sync::Arc::make_mut(grants).retain_known(|entity, key| {
                catalog
                    .resolve(module_id.as_str(), entity.as_str(), key.as_str())
                    .is_some()
            });
        }
        true
    });

    if dropped > 0 {
        tracing::warn!(dropped, "pruned permissions unknown to the catalog");
    }
    next
}
