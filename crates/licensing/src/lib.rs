//! License classification: paid vs free, derived from a role's grants.
//!
//! The tier is a view over state, never stored. Two protected system role
//! names are pinned to free whatever they grant.

pub mod classifier;
pub mod names;
pub mod pricing;

pub use classifier::{
    LicenseStatusSummary, LicenseType, count_free_permissions, count_paid_permissions, get_license_status_summary,
    get_role_license_type, get_role_license_type_display, is_action_paid,
};
pub use names::{is_free_system_role_name, is_technician_role_name, is_view_only_role_name};
pub use pricing::{LicensePricing, PricingConfigError};
