use serde::{Deserialize, Serialize};

use ehsrbac_catalog::{Catalog, LicenseTier};
use ehsrbac_permissions::RolePermissions;

use crate::names::is_free_system_role_name;
use crate::pricing::LicensePricing;

/// License of a whole role. Same two values as an action's tier.
pub type LicenseType = LicenseTier;

/// Badge data for a role's license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseStatusSummary {
    #[serde(rename = "type")]
    pub license_type: LicenseType,
    pub paid_permissions: usize,
    pub free_permissions: usize,
    pub price_yearly: u32,
    pub price_monthly: u32,
}

/// Tier of a catalog action; unknown ids are not paid.
pub fn is_action_paid(catalog: &Catalog, action_id: &str) -> bool {
    catalog
        .action(action_id)
        .is_some_and(|loc| catalog.tier_of(loc.action) == LicenseTier::Paid)
}

/// Tiers of every enabled leaf that still resolves in the catalog.
fn enabled_tiers<'a>(catalog: &'a Catalog, state: &'a RolePermissions) -> impl Iterator<Item = LicenseTier> + 'a {
    state
        .leaves()
        .filter(|(_, _, _, enabled)| *enabled)
        .filter_map(|(module, entity, key, _)| {
            catalog
                .resolve(module.as_str(), entity.as_str(), key.as_str())
                .map(|action| catalog.tier_of(action))
        })
}

pub fn count_paid_permissions(catalog: &Catalog, state: &RolePermissions) -> usize {
    enabled_tiers(catalog, state)
        .filter(|tier| *tier == LicenseTier::Paid)
        .count()
}

pub fn count_free_permissions(catalog: &Catalog, state: &RolePermissions) -> usize {
    enabled_tiers(catalog, state)
        .filter(|tier| *tier == LicenseTier::Free)
        .count()
}

/// Paid iff at least one enabled action is paid.
pub fn get_role_license_type(catalog: &Catalog, state: &RolePermissions) -> LicenseType {
    if enabled_tiers(catalog, state).any(|tier| tier == LicenseTier::Paid) {
        LicenseTier::Paid
    } else {
        LicenseTier::Free
    }
}

/// [`get_role_license_type`] with the View-Only / Technician name override.
pub fn get_role_license_type_display(catalog: &Catalog, role_name: &str, state: &RolePermissions) -> LicenseType {
    if is_free_system_role_name(role_name) {
        return LicenseTier::Free;
    }
    get_role_license_type(catalog, state)
}

pub fn get_license_status_summary(
    catalog: &Catalog,
    state: &RolePermissions,
    pricing: &LicensePricing,
) -> LicenseStatusSummary {
    let (paid, free) = enabled_tiers(catalog, state).fold((0, 0), |(paid, free), tier| match tier {
        LicenseTier::Paid => (paid + 1, free),
        LicenseTier::Free => (paid, free + 1),
    });
    let license_type = if paid > 0 { LicenseTier::Paid } else { LicenseTier::Free };
    let (price_yearly, price_monthly) = match license_type {
        LicenseTier::Paid => (pricing.yearly, pricing.monthly),
        LicenseTier::Free => (0, 0),
    };

    LicenseStatusSummary {
        license_type,
        paid_permissions: paid,
        free_permissions: free,
        price_yearly,
        price_monthly,
    }
}
