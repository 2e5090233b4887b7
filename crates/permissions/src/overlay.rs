//! Per-establishment OSHA permissions.
//!
//! Each establishment carries one module's worth of grants shaped like the
//! catalog's `osha` module. The overlay is additive to the role's own `osha`
//! entry in [`RolePermissions`](crate::RolePermissions).

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ehsrbac_catalog::{Catalog, OSHA_MODULE};
use ehsrbac_core::{ActionKey, EntityName, EstablishmentId};

use crate::error::PermissionError;
use crate::grants::{ActionGrants, EntityGrants};
use crate::selection::{Selection, Tally};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OshaLocationPermissions(BTreeMap<EstablishmentId, Arc<EntityGrants>>);

impl OshaLocationPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, establishment: &str, entity: &str, key: &str) -> bool {
        self.0
            .get(establishment)
            .is_some_and(|grants| grants.get(entity, key))
    }

    pub fn establishment(&self, establishment: &str) -> Option<&EntityGrants> {
        self.0.get(establishment).map(Arc::as_ref)
    }

    /// Write one leaf for one establishment.
    pub fn with(
        &self,
        establishment: impl Into<EstablishmentId>,
        entity: impl Into<EntityName>,
        key: impl Into<ActionKey>,
        value: bool,
    ) -> Self {
        let mut next = self.clone();
        Arc::make_mut(next.0.entry(establishment.into()).or_default()).set(entity.into(), key.into(), value);
        next
    }

    /// Rebuild one OSHA entity for one establishment from the catalog.
    pub fn toggle_entity(
        &self,
        catalog: &Catalog,
        establishment: impl Into<EstablishmentId>,
        entity: &str,
        enable: bool,
    ) -> Result<Self, PermissionError> {
        let entity_def = catalog
            .entity(OSHA_MODULE, entity)
            .ok_or_else(|| PermissionError::UnknownOshaEntity(entity.to_string()))?;

        let mut next = self.clone();
        Arc::make_mut(next.0.entry(establishment.into()).or_default())
            .replace_entity(entity_def.name.clone(), ActionGrants::uniform(entity_def, enable));
        Ok(next)
    }

    /// Rebuild every OSHA entity for one establishment from the catalog.
    pub fn toggle_establishment(
        &self,
        catalog: &Catalog,
        establishment: impl Into<EstablishmentId>,
        enable: bool,
    ) -> Self {
        let establishment = establishment.into();
        let grants = EntityGrants::uniform_entities(catalog.entities(OSHA_MODULE), enable);
        tracing::debug!(%establishment, enable, "toggled establishment");

        let mut next = self.clone();
        next.0.insert(establishment, Arc::new(grants));
        next
    }

    pub fn without(&self, establishment: &str) -> Self {
        let mut next = self.clone();
        next.0.remove(establishment);
        next
    }

    /// Establishments with at least one granted OSHA action, in id order.
    pub fn establishments_with_access(&self) -> Vec<&EstablishmentId> {
        self.0
            .iter()
            .filter(|(_, grants)| grants.any_enabled())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn has_any_grant(&self) -> bool {
        self.0.values().any(|grants| grants.any_enabled())
    }

    /// Tri-state of one OSHA entity at one establishment.
    pub fn entity_selection(&self, catalog: &Catalog, establishment: &str, entity: &str) -> Selection {
        let tally = match catalog.entity(OSHA_MODULE, entity) {
            Some(entity_def) => Tally::of(
                entity_def
                    .actions
                    .iter()
                    .map(|action| self.get(establishment, entity, action.key())),
            ),
            None => Tally::default(),
        };
        tally.selection()
    }

    /// Tri-state of every OSHA action at one establishment.
    pub fn establishment_selection(&self, catalog: &Catalog, establishment: &str) -> Selection {
        Tally::of(catalog.entities(OSHA_MODULE).iter().flat_map(|entity_def| {
            entity_def
                .actions
                .iter()
                .map(move |action| self.get(establishment, entity_def.name.as_str(), action.key()))
        }))
        .selection()
    }
}
