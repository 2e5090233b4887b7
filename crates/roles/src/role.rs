//! Custom role record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ehsrbac_catalog::{Catalog, CatalogMode, Category};
use ehsrbac_core::{ActionKey, DomainError, Entity, EntityName, EstablishmentId, ModuleId, RoleId, UserId};
use ehsrbac_licensing::{
    LicensePricing, LicenseStatusSummary, LicenseType, get_license_status_summary, get_role_license_type_display,
    is_free_system_role_name,
};
use ehsrbac_permissions::{
    OshaLocationPermissions, RolePermissions, create_default_permissions, set_permission_value,
    toggle_category_permissions, toggle_entity_permissions, toggle_global_permissions, toggle_module_permissions,
};

/// Author recorded on built-in templates.
pub const SYSTEM_ACTOR: UserId = UserId::nil();

// ─────────────────────────────────────────────────────────────────────────────
// Custom Role
// ─────────────────────────────────────────────────────────────────────────────

/// A named grant set plus its per-establishment OSHA overlay.
///
/// # Invariants
/// - Starts from [`create_default_permissions`], so every catalog action has a value.
/// - System roles cannot be renamed or deleted.
/// - Edits are never rejected for content; violations surface through
///   [`crate::validate_role`] and block only at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRole {
    pub id: RoleId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub permissions: RolePermissions,
    #[serde(default)]
    pub osha_location_permissions: OshaLocationPermissions,
    #[serde(default)]
    pub is_system_role: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: UserId,
    pub updated_at: DateTime<Utc>,
    pub updated_by: UserId,
}

/// Input of the role builder's "create" step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomRole {
    pub name: String,
    pub description: Option<String>,
    pub created_by: UserId,
}

impl CustomRole {
    pub fn new(catalog: &Catalog, new: NewCustomRole, now: DateTime<Utc>) -> Self {
        Self {
            id: RoleId::new(),
            name: new.name,
            description: normalize_description(new.description),
            permissions: create_default_permissions(catalog),
            osha_location_permissions: OshaLocationPermissions::new(),
            is_system_role: false,
            created_at: now,
            created_by: new.created_by,
            updated_at: now,
            updated_by: new.created_by,
        }
    }

    pub(crate) fn system(
        name: &str,
        description: &str,
        permissions: RolePermissions,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RoleId::new(),
            name: name.to_string(),
            description: Some(description.to_string()),
            permissions,
            osha_location_permissions: OshaLocationPermissions::new(),
            is_system_role: true,
            created_at: now,
            created_by: SYSTEM_ACTOR,
            updated_at: now,
            updated_by: SYSTEM_ACTOR,
        }
    }

    /// Apply one builder edit. Later edits win over earlier ones.
    pub fn apply(&mut self, catalog: &Catalog, edit: RoleEdit, actor: UserId, now: DateTime<Utc>) -> Result<(), DomainError> {
        let state = &self.permissions;
        let overlay = &self.osha_location_permissions;

        match edit {
            RoleEdit::Set { module, entity, key, value } => {
                self.permissions = set_permission_value(state, module, entity, key, value);
            }
            RoleEdit::ToggleEntity { module, entity, enable } => {
                self.permissions = toggle_entity_permissions(catalog, state, module.as_str(), entity.as_str(), enable);
            }
            RoleEdit::ToggleModule { module, enable } => {
                self.permissions = toggle_module_permissions(catalog, state, module.as_str(), enable);
            }
            RoleEdit::ToggleCategory { module, category, enable } => {
                self.permissions = toggle_category_permissions(catalog, state, module.as_str(), category, enable);
            }
            RoleEdit::ToggleGlobal { mode, enable } => {
                self.permissions = toggle_global_permissions(catalog, state, mode, enable);
            }
            RoleEdit::SetLocation { establishment, entity, key, value } => {
                self.osha_location_permissions = overlay.with(establishment, entity, key, value);
            }
            RoleEdit::ToggleLocationEntity { establishment, entity, enable } => {
                self.osha_location_permissions = overlay
                    .toggle_entity(catalog, establishment, entity.as_str(), enable)
                    .map_err(|err| DomainError::not_found(err.to_string()))?;
            }
            RoleEdit::ToggleLocation { establishment, enable } => {
                self.osha_location_permissions = overlay.toggle_establishment(catalog, establishment, enable);
            }
            RoleEdit::RemoveLocation { establishment } => {
                self.osha_location_permissions = overlay.without(establishment.as_str());
            }
        }

        self.touch(actor, now);
        Ok(())
    }

    pub fn rename(&mut self, name: impl Into<String>, actor: UserId, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.is_system_role {
            return Err(DomainError::invariant("system roles cannot be renamed"));
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("role name must not be blank"));
        }

        self.name = name;
        self.touch(actor, now);
        Ok(())
    }

    /// Blank descriptions are stored as `None`.
    pub fn describe(&mut self, description: Option<String>, actor: UserId, now: DateTime<Utc>) {
        self.description = normalize_description(description);
        self.touch(actor, now);
    }

    pub fn is_deletable(&self) -> bool {
        !self.is_system_role
    }

    /// Displayed tier, with the View-Only / Technician override.
    pub fn license_type(&self, catalog: &Catalog) -> LicenseType {
        get_role_license_type_display(catalog, &self.name, &self.permissions)
    }

    /// Badge summary. Counts are raw; the tier and prices honour the name override.
    pub fn license_summary(&self, catalog: &Catalog, pricing: &LicensePricing) -> LicenseStatusSummary {
        let summary = get_license_status_summary(catalog, &self.permissions, pricing);
        if !is_free_system_role_name(&self.name) {
            return summary;
        }
        LicenseStatusSummary {
            license_type: LicenseType::Free,
            price_yearly: 0,
            price_monthly: 0,
            ..summary
        }
    }

    fn touch(&mut self, actor: UserId, now: DateTime<Utc>) {
        self.updated_at = now;
        self.updated_by = actor;
        tracing::debug!(role = %self.id, actor = %actor, "role updated");
    }
}

impl Entity for CustomRole {
    type Id = RoleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.trim().is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Edits
// ─────────────────────────────────────────────────────────────────────────────

/// One user intent captured by the role builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoleEdit {
    Set {
        module: ModuleId,
        entity: EntityName,
        key: ActionKey,
        value: bool,
    },
    ToggleEntity {
        module: ModuleId,
        entity: EntityName,
        enable: bool,
    },
    ToggleModule {
        module: ModuleId,
        enable: bool,
    },
    ToggleCategory {
        module: ModuleId,
        category: Category,
        enable: bool,
    },
    ToggleGlobal {
        mode: CatalogMode,
        enable: bool,
    },
    SetLocation {
        establishment: EstablishmentId,
        entity: EntityName,
        key: ActionKey,
        value: bool,
    },
    ToggleLocationEntity {
        establishment: EstablishmentId,
        entity: EntityName,
        enable: bool,
    },
    ToggleLocation {
        establishment: EstablishmentId,
        enable: bool,
    },
    RemoveLocation {
        establishment: EstablishmentId,
    },
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use ehsrbac_permissions::{count_enabled_permissions, is_module_fully_selected};

    use super::*;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
    }

    fn supervisor(catalog: &Catalog) -> CustomRole {
        CustomRole::new(
            catalog,
            NewCustomRole {
                name: "Supervisor".into(),
                description: Some("  ".into()),
                created_by: UserId::new(),
            },
            at(8),
        )
    }

    #[test]
    fn new_role_is_complete_and_empty() {
        let catalog = Catalog::ehs();
        let role = supervisor(&catalog);

        assert_eq!(role.permissions, create_default_permissions(&catalog));
        assert_eq!(count_enabled_permissions(&role.permissions), 0);
        assert_eq!(role.description, None);
        assert_eq!(role.created_at, role.updated_at);
        assert!(role.is_deletable());
        assert_eq!(Entity::id(&role), &role.id);
    }

    #[test]
    fn apply_stamps_author_and_time() {
        let catalog = Catalog::ehs();
        let mut role = supervisor(&catalog);
        let editor = UserId::new();

        role.apply(
            &catalog,
            RoleEdit::ToggleModule { module: "capa".into(), enable: true },
            editor,
            at(9),
        )
        .unwrap();

        assert!(is_module_fully_selected(&catalog, &role.permissions, "capa"));
        assert_eq!(role.updated_by, editor);
        assert_eq!(role.updated_at, at(9));
        assert_eq!(role.created_at, at(8));
    }

    #[test]
    fn location_edits_touch_only_the_overlay() {
        let catalog = Catalog::ehs();
        let mut role = supervisor(&catalog);
        let actor = UserId::new();

        role.apply(
            &catalog,
            RoleEdit::ToggleLocation { establishment: "osha_toronto".into(), enable: true },
            actor,
            at(9),
        )
        .unwrap();
        assert!(role.osha_location_permissions.get("osha_toronto", "OSHA Report (300/301)", "create"));
        assert_eq!(count_enabled_permissions(&role.permissions), 0);

        role.apply(
            &catalog,
            RoleEdit::RemoveLocation { establishment: "osha_toronto".into() },
            actor,
            at(10),
        )
        .unwrap();
        assert!(!role.osha_location_permissions.has_any_grant());
    }

    #[test]
    fn unknown_osha_entity_is_not_found() {
        let catalog = Catalog::ehs();
        let mut role = supervisor(&catalog);
        let before = role.clone();

        let err = role
            .apply(
                &catalog,
                RoleEdit::ToggleLocationEntity {
                    establishment: "osha_toronto".into(),
                    entity: "Safety Event".into(),
                    enable: true,
                },
                UserId::new(),
                at(9),
            )
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(role, before);
    }

    #[test]
    fn system_roles_keep_their_name() {
        let mut role = CustomRole::system("Technician", "template", RolePermissions::new(), at(0));
        assert!(!role.is_deletable());
        assert_eq!(role.created_by, SYSTEM_ACTOR);

        let err = role.rename("Lead Technician", UserId::new(), at(1)).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(role.name, "Technician");
    }

    #[test]
    fn rename_rejects_blank_names() {
        let catalog = Catalog::ehs();
        let mut role = supervisor(&catalog);
        assert!(matches!(
            role.rename("   ", UserId::new(), at(9)),
            Err(DomainError::Validation(_))
        ));
        role.rename("Shift Lead", UserId::new(), at(9)).unwrap();
        assert_eq!(role.name, "Shift Lead");
    }

    #[test]
    fn technician_summary_is_free_even_with_paid_grants() {
        let catalog = Catalog::ehs();
        let mut role = supervisor(&catalog);
        role.apply(&catalog, RoleEdit::ToggleModule { module: "capa".into(), enable: true }, UserId::new(), at(9))
            .unwrap();
        let pricing = LicensePricing::default();

        assert_eq!(role.license_type(&catalog), LicenseType::Paid);
        assert_eq!(role.license_summary(&catalog, &pricing).price_monthly, pricing.monthly);

        role.name = "technician".into();
        let summary = role.license_summary(&catalog, &pricing);
        assert_eq!(role.license_type(&catalog), LicenseType::Free);
        assert_eq!(summary.license_type, LicenseType::Free);
        assert_eq!(summary.price_monthly, 0);
        assert!(summary.paid_permissions > 0);
    }

    #[test]
    fn edits_serialize_with_a_type_tag() {
        let edit = RoleEdit::ToggleCategory { module: "jha".into(), category: Category::Approvals, enable: true };
        let json = serde_json::to_value(&edit).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "toggle_category", "module": "jha", "category": "approvals", "enable": true})
        );
        let back: RoleEdit = serde_json::from_value(json).unwrap();
        assert_eq!(back, edit);
    }
}
