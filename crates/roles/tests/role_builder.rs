//! End-to-end role builder flows over the built-in EHS catalog.

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};

use ehsrbac_catalog::{Catalog, CatalogMode, Category};
use ehsrbac_core::{DomainError, UserId};
use ehsrbac_licensing::{
    LicensePricing, LicenseType, get_license_status_summary, get_role_license_type, get_role_license_type_display,
};
use ehsrbac_permissions::{
    Selection, get_permission_value, global_selection, is_entity_fully_selected, is_module_partially_selected,
    module_selection,
};
use ehsrbac_roles::{
    CustomRole, NewCustomRole, RoleEdit, ValidationIssue, ensure_committable, technician, validate_role,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap()
}

fn draft(catalog: &Catalog, name: &str) -> CustomRole {
    ehsrbac_observability::init_with_default("warn");
    CustomRole::new(
        catalog,
        NewCustomRole {
            name: name.to_string(),
            description: None,
            created_by: UserId::new(),
        },
        now(),
    )
}

fn set(module: &'static str, entity: &'static str, key: &'static str, value: bool) -> RoleEdit {
    RoleEdit::Set {
        module: module.into(),
        entity: entity.into(),
        key: key.into(),
        value,
    }
}

#[test]
fn single_grant_leaves_module_partial() -> Result<()> {
    let catalog = Catalog::ehs();
    let mut role = draft(&catalog, "Reporter");

    role.apply(&catalog, set("event", "Safety Event", "create", true), UserId::new(), now())?;

    let state = &role.permissions;
    assert!(get_permission_value(state, "event", "Safety Event", "create"));
    assert!(!is_entity_fully_selected(&catalog, state, "event", "Safety Event"));
    assert!(is_module_partially_selected(&catalog, state, "event"));
    assert_eq!(module_selection(&catalog, state, "event"), Selection::Indeterminate);
    assert_eq!(module_selection(&catalog, state, "capa"), Selection::Unchecked);
    Ok(())
}

#[test]
fn view_only_with_full_safety_event_is_rejected() -> Result<()> {
    let catalog = Catalog::ehs();
    let mut role = draft(&catalog, "View-Only");

    role.apply(
        &catalog,
        RoleEdit::ToggleEntity {
            module: "event".into(),
            entity: "Safety Event".into(),
            enable: true,
        },
        UserId::new(),
        now(),
    )?;

    let validation = validate_role(&catalog, &role);
    assert!(!validation.valid);
    assert!(matches!(validation.errors.as_slice(), [ValidationIssue::PaidPermissions { .. }]));
    assert!(validation.messages()[0].contains("Create/Edit/Submit/Approve"));

    let err = ensure_committable(&catalog, &role).unwrap_err();
    assert!(matches!(err, DomainError::InvariantViolation(_)));
    Ok(())
}

#[test]
fn view_only_flags_overlay_access_too() -> Result<()> {
    let catalog = Catalog::ehs();
    let mut role = draft(&catalog, "view only");

    role.apply(
        &catalog,
        RoleEdit::SetLocation {
            establishment: "osha_chicago".into(),
            entity: "OSHA Report (300/301)".into(),
            key: "create".into(),
            value: true,
        },
        UserId::new(),
        now(),
    )?;

    let validation = validate_role(&catalog, &role);
    assert_eq!(validation.errors, vec![ValidationIssue::OshaAccess]);
    Ok(())
}

#[test]
fn technician_license_is_free_with_or_without_the_name() -> Result<()> {
    let catalog = Catalog::ehs();
    let mut role = draft(&catalog, "Technician");
    let actor = UserId::new();
    role.apply(&catalog, set("event", "Safety Event", "create", true), actor, now())?;
    role.apply(&catalog, set("event", "Safety Event", "view", true), actor, now())?;

    assert_eq!(
        get_role_license_type_display(&catalog, &role.name, &role.permissions),
        LicenseType::Free
    );
    assert_eq!(get_role_license_type(&catalog, &role.permissions), LicenseType::Free);

    let mut copy = role.clone();
    copy.rename("Field Reporter", actor, now())?;
    assert_eq!(copy.license_type(&catalog), LicenseType::Free);

    let summary = get_license_status_summary(&catalog, &copy.permissions, &LicensePricing::default());
    assert_eq!((summary.paid_permissions, summary.free_permissions), (0, 2));
    assert_eq!(summary.price_yearly, 0);
    Ok(())
}

#[test]
fn technician_template_with_everything_still_displays_free() -> Result<()> {
    let catalog = Catalog::ehs();
    let mut role = technician(&catalog, now());
    role.apply(
        &catalog,
        RoleEdit::ToggleGlobal { mode: CatalogMode::Advanced, enable: true },
        UserId::new(),
        now(),
    )?;

    assert_eq!(global_selection(&catalog, &role.permissions, CatalogMode::Advanced), Selection::Checked);
    assert_eq!(get_role_license_type(&catalog, &role.permissions), LicenseType::Paid);
    assert_eq!(role.license_type(&catalog), LicenseType::Free);
    Ok(())
}

#[test]
fn simple_mode_select_all_leaves_advanced_modules_alone() -> Result<()> {
    let catalog = Catalog::ehs();
    let mut role = draft(&catalog, "Auditor");
    let actor = UserId::new();
    role.apply(&catalog, set("audit", "Audit", "view", true), actor, now())?;

    role.apply(&catalog, RoleEdit::ToggleGlobal { mode: CatalogMode::Simple, enable: false }, actor, now())?;
    assert!(get_permission_value(&role.permissions, "audit", "Audit", "view"));
    assert_eq!(global_selection(&catalog, &role.permissions, CatalogMode::Simple), Selection::Unchecked);

    role.apply(&catalog, RoleEdit::ToggleGlobal { mode: CatalogMode::Simple, enable: true }, actor, now())?;
    assert_eq!(global_selection(&catalog, &role.permissions, CatalogMode::Simple), Selection::Checked);
    assert_eq!(global_selection(&catalog, &role.permissions, CatalogMode::Advanced), Selection::Indeterminate);
    Ok(())
}

#[test]
fn role_survives_a_json_round_trip() -> Result<()> {
    let catalog = Catalog::ehs();
    let mut role = draft(&catalog, "Supervisor");
    let actor = UserId::new();
    role.describe(Some("Day shift supervisors".into()), actor, now());
    role.apply(
        &catalog,
        RoleEdit::ToggleCategory {
            module: "jha".into(),
            category: Category::Approvals,
            enable: true,
        },
        actor,
        now(),
    )?;
    role.apply(
        &catalog,
        RoleEdit::ToggleLocation {
            establishment: "osha_atlanta".into(),
            enable: true,
        },
        actor,
        now(),
    )?;

    let json = serde_json::to_string(&role)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["permissions"]["jha"]["JHA"]["approve"], true);
    assert_eq!(value["oshaLocationPermissions"]["osha_atlanta"]["OSHA Location"]["view"], true);
    assert_eq!(value["isSystemRole"], false);

    let back: CustomRole = serde_json::from_str(&json)?;
    assert_eq!(back, role);
    Ok(())
}

#[test]
fn blank_names_cannot_be_committed() {
    let catalog = Catalog::ehs();
    let role = draft(&catalog, "  ");
    assert!(matches!(
        ensure_committable(&catalog, &role),
        Err(DomainError::Validation(_))
    ));
}
