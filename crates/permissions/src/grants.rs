//! Grant trees and their copy-on-write primitives.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ehsrbac_catalog::{PermissionEntity, PermissionModule};
use ehsrbac_core::{ActionKey, EntityName, ModuleId};

/// Action key → granted, for one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionGrants(BTreeMap<ActionKey, bool>);

impl ActionGrants {
    /// Every catalog action of `entity` set to `value`; nothing else.
    pub fn uniform(entity: &PermissionEntity, value: bool) -> Self {
        Self(
            entity
                .actions
                .iter()
                .map(|action| (action.id.action_key(), value))
                .collect(),
        )
    }

    /// Missing keys read as `false`.
    pub fn get(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    pub fn insert(&mut self, key: ActionKey, value: bool) {
        self.0.insert(key, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ActionKey, bool)> {
        self.0.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn retain(&mut self, mut keep: impl FnMut(&ActionKey) -> bool) {
        self.0.retain(|k, _| keep(k));
    }
}

/// Entity name → action grants: one module's worth of permissions.
///
/// Also the per-establishment shape of the OSHA overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityGrants(BTreeMap<EntityName, Arc<ActionGrants>>);

impl EntityGrants {
    /// Every catalog action of every entity of `module` set to `value`.
    pub fn uniform(module: &PermissionModule, value: bool) -> Self {
        Self::uniform_entities(&module.entities, value)
    }

    pub fn uniform_entities(entities: &[PermissionEntity], value: bool) -> Self {
        Self(
            entities
                .iter()
                .map(|entity| (entity.name.clone(), Arc::new(ActionGrants::uniform(entity, value))))
                .collect(),
        )
    }

    pub fn get(&self, entity: &str, key: &str) -> bool {
        self.0.get(entity).is_some_and(|grants| grants.get(key))
    }

    pub fn entity(&self, entity: &str) -> Option<&ActionGrants> {
        self.0.get(entity).map(Arc::as_ref)
    }

    pub fn entities(&self) -> impl Iterator<Item = (&EntityName, &ActionGrants)> {
        self.0.iter().map(|(name, grants)| (name, grants.as_ref()))
    }

    pub(crate) fn set(&mut self, entity: EntityName, key: ActionKey, value: bool) {
        Arc::make_mut(self.0.entry(entity).or_default()).insert(key, value);
    }

    pub(crate) fn replace_entity(&mut self, entity: EntityName, grants: ActionGrants) {
        self.0.insert(entity, Arc::new(grants));
    }

    /// `(entity, key, value)` for every stored leaf.
    pub fn leaves(&self) -> impl Iterator<Item = (&EntityName, &ActionKey, bool)> {
        self.0
            .iter()
            .flat_map(|(entity, grants)| grants.iter().map(move |(key, value)| (entity, key, value)))
    }

    pub fn any_enabled(&self) -> bool {
        self.leaves().any(|(_, _, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop entities and keys for which `known` returns false.
    pub(crate) fn retain_known(&mut self, mut known: impl FnMut(&EntityName, &ActionKey) -> bool) -> usize {
        let mut dropped = 0;
        for (entity, grants) in self.0.iter_mut() {
            let stale = grants.iter().filter(|(key, _)| !known(entity, *key)).count();
            if stale > 0 {
                dropped += stale;
                Arc::make_mut(grants).retain(|key| known(entity, key));
            }
        }
        self.0.retain(|_, grants| !grants.is_empty());
        dropped
    }
}

/// One role's grant set: module → entity → action → granted.
///
/// Sparse: an absent key reads exactly like an explicit `false`. Cloning is
/// cheap (branches are reference counted) and every `with_*` method returns a
/// new tree sharing all untouched branches with `self`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RolePermissions(BTreeMap<ModuleId, Arc<EntityGrants>>);

impl RolePermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, module: &str, entity: &str, key: &str) -> bool {
        self.0.get(module).is_some_and(|grants| grants.get(entity, key))
    }

    pub fn module(&self, module: &str) -> Option<&EntityGrants> {
        self.0.get(module).map(Arc::as_ref)
    }

    pub fn module_ids(&self) -> impl Iterator<Item = &ModuleId> {
        self.0.keys()
    }

    /// Write exactly one leaf, creating the module/entity maps if needed.
    pub fn with(
        &self,
        module: impl Into<ModuleId>,
        entity: impl Into<EntityName>,
        key: impl Into<ActionKey>,
        value: bool,
    ) -> Self {
        let mut next = self.clone();
        Arc::make_mut(next.0.entry(module.into()).or_default()).set(entity.into(), key.into(), value);
        next
    }

    /// Replace one entity's leaf map wholesale.
    pub fn with_entity(&self, module: impl Into<ModuleId>, entity: EntityName, grants: ActionGrants) -> Self {
        let mut next = self.clone();
        Arc::make_mut(next.0.entry(module.into()).or_default()).replace_entity(entity, grants);
        next
    }

    /// Replace one module's subtree wholesale.
    pub fn with_module(&self, module: impl Into<ModuleId>, grants: EntityGrants) -> Self {
        let mut next = self.clone();
        next.0.insert(module.into(), Arc::new(grants));
        next
    }

    /// `(module, entity, key, value)` for every stored leaf.
    pub fn leaves(&self) -> impl Iterator<Item = (&ModuleId, &EntityName, &ActionKey, bool)> {
        self.0.iter().flat_map(|(module, grants)| {
            grants
                .leaves()
                .map(move |(entity, key, value)| (module, entity, key, value))
        })
    }

    /// Whether two states share the same subtree for `module` (no copy happened).
    pub fn shares_module_with(&self, other: &Self, module: &str) -> bool {
        match (self.0.get(module), other.0.get(module)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    pub(crate) fn retain_modules(&mut self, keep: impl FnMut(&ModuleId, &mut Arc<EntityGrants>) -> bool) {
        self.0.retain(keep);
    }
}

impl FromIterator<(ModuleId, EntityGrants)> for RolePermissions {
    fn from_iter<I: IntoIterator<Item = (ModuleId, EntityGrants)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, grants)| (id, Arc::new(grants))).collect())
    }
}
