use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use ehsrbac_core::{ActionId, ModuleId};

use crate::model::{
    CatalogMode, Category, LicenseTier, PermissionAction, PermissionEntity, PermissionModule,
};
use crate::policy::TierPolicy;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog has no modules")]
    Empty,

    #[error("duplicate module id '{0}'")]
    DuplicateModule(String),

    #[error("module '{module}' has a blank {field}")]
    BlankField { module: String, field: &'static str },

    #[error("module '{module}' declares entity '{entity}' more than once")]
    DuplicateEntity { module: String, entity: String },

    #[error("action id '{0}' is not of the form 'prefix:key'")]
    MalformedActionId(String),

    #[error("duplicate action id '{0}'")]
    DuplicateAction(String),

    #[error("entity '{entity}' in module '{module}' declares key '{key}' more than once")]
    DuplicateActionKey {
        module: String,
        entity: String,
        key: String,
    },

    #[error("malformed catalog document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where an action id lives in the catalog.
#[derive(Debug, Clone, Copy)]
pub struct ActionLocation<'a> {
    pub module: &'a PermissionModule,
    pub entity: &'a PermissionEntity,
    pub action: &'a PermissionAction,
}

/// Validated, ordered list of modules plus the tier policy.
///
/// Module order is significant and preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    modules: Vec<PermissionModule>,
    tier_policy: TierPolicy,
}

#[derive(Deserialize)]
struct CatalogDocument {
    modules: Vec<PermissionModule>,
    #[serde(default)]
    tier_policy: TierPolicy,
}

/// Bare action key of an action id: `"event:create"` → `"create"`.
///
/// Ids without a separator are returned unchanged.
pub fn action_key(action_id: &str) -> &str {
    match action_id.split_once(':') {
        Some((_, key)) => key,
        None => action_id,
    }
}

impl Catalog {
    pub fn new(modules: Vec<PermissionModule>, tier_policy: TierPolicy) -> Result<Self, CatalogError> {
        validate(&modules)?;
        Ok(Self {
            modules,
            tier_policy,
        })
    }

    pub(crate) fn from_parts_unchecked(modules: Vec<PermissionModule>, tier_policy: TierPolicy) -> Self {
        Self {
            modules,
            tier_policy,
        }
    }

    /// Load an externally supplied catalog.
    ///
    /// A document without `tier_policy` uses [`TierPolicy::default`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        let catalog = Self::new(doc.modules, doc.tier_policy)?;
        tracing::debug!(
            modules = catalog.modules.len(),
            actions = catalog.action_count(),
            "loaded permission catalog"
        );
        Ok(catalog)
    }

    pub fn modules(&self) -> &[PermissionModule] {
        &self.modules
    }

    pub fn tier_policy(&self) -> &TierPolicy {
        &self.tier_policy
    }

    /// Modules shown in `mode`, in catalog order.
    pub fn visible_modules(
        &self,
        mode: CatalogMode,
    ) -> impl Iterator<Item = &PermissionModule> + '_ {
        self.modules.iter().filter(move |m| mode.includes(m))
    }

    pub fn module(&self, module_id: &str) -> Option<&PermissionModule> {
        self.modules.iter().find(|m| m.id.as_str() == module_id)
    }

    /// Entities owned by a module; empty for unknown modules.
    pub fn entities(&self, module_id: &str) -> &[PermissionEntity] {
        self.module(module_id)
            .map(|m| m.entities.as_slice())
            .unwrap_or(&[])
    }

    pub fn entity(&self, module_id: &str, entity: &str) -> Option<&PermissionEntity> {
        self.entities(module_id)
            .iter()
            .find(|e| e.name.as_str() == entity)
    }

    /// Resolve a stored permission path to its catalog action.
    pub fn resolve(&self, module_id: &str, entity: &str, key: &str) -> Option<&PermissionAction> {
        self.entity(module_id, entity)?.action(key)
    }

    /// Find an action by its full id.
    pub fn action(&self, action_id: &str) -> Option<ActionLocation<'_>> {
        self.modules.iter().find_map(|module| {
            module
                .actions()
                .find(|(_, action)| action.id.as_str() == action_id)
                .map(|(entity, action)| ActionLocation {
                    module,
                    entity,
                    action,
                })
        })
    }

    /// Actions of `module_id` tagged with `category`, with their entity, in catalog order.
    pub fn category_actions(
        &self,
        module_id: &str,
        category: Category,
    ) -> Vec<(&PermissionEntity, &PermissionAction)> {
        match self.module(module_id) {
            Some(module) => module
                .actions()
                .filter(|(_, action)| action.category == Some(category))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Action ids of `module_id` tagged with `category`, in catalog order.
    pub fn actions_by_category(&self, module_id: &str, category: Category) -> Vec<&ActionId> {
        self.category_actions(module_id, category)
            .into_iter()
            .map(|(_, action)| &action.id)
            .collect()
    }

    /// Categories present in a module, in [`Category::ORDERED`] order.
    pub fn module_categories(&self, module_id: &str) -> Vec<Category> {
        let Some(module) = self.module(module_id) else {
            return Vec::new();
        };
        let present: HashSet<Category> = module.actions().filter_map(|(_, a)| a.category).collect();
        Category::ORDERED
            .into_iter()
            .filter(|c| present.contains(c))
            .collect()
    }

    pub fn count_module_actions(&self, module_id: &str) -> usize {
        self.module(module_id).map_or(0, PermissionModule::action_count)
    }

    pub fn action_count(&self) -> usize {
        self.modules.iter().map(PermissionModule::action_count).sum()
    }

    pub fn tier_of(&self, action: &PermissionAction) -> LicenseTier {
        self.tier_policy.tier_of(action)
    }

    pub fn module_ids(&self, mode: CatalogMode) -> Vec<&ModuleId> {
        self.visible_modules(mode).map(|m| &m.id).collect()
    }
}

fn validate(modules: &[PermissionModule]) -> Result<(), CatalogError> {
    if modules.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut module_ids = HashSet::new();
    let mut action_ids = HashSet::new();

    for module in modules {
        let module_id = module.id.as_str();
        if module_id.trim().is_empty() {
            return Err(CatalogError::BlankField {
                module: module_id.to_string(),
                field: "id",
            });
        }
        if module.name.trim().is_empty() {
            return Err(CatalogError::BlankField {
                module: module_id.to_string(),
                field: "name",
            });
        }
        if !module_ids.insert(module_id) {
            return Err(CatalogError::DuplicateModule(module_id.to_string()));
        }

        let mut entity_names = HashSet::new();
        for entity in &module.entities {
            if entity.name.as_str().trim().is_empty() {
                return Err(CatalogError::BlankField {
                    module: module_id.to_string(),
                    field: "entity name",
                });
            }
            if !entity_names.insert(entity.name.as_str()) {
                return Err(CatalogError::DuplicateEntity {
                    module: module_id.to_string(),
                    entity: entity.name.to_string(),
                });
            }

            let mut keys = HashSet::new();
            for action in &entity.actions {
                let id = action.id.as_str();
                match id.split_once(':') {
                    Some((prefix, key)) if !prefix.is_empty() && !key.is_empty() => {}
                    _ => return Err(CatalogError::MalformedActionId(id.to_string())),
                }
                if !action_ids.insert(id) {
                    return Err(CatalogError::DuplicateAction(id.to_string()));
                }
                if !keys.insert(action.key()) {
                    return Err(CatalogError::DuplicateActionKey {
                        module: module_id.to_string(),
                        entity: entity.name.to_string(),
                        key: action.key().to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}
