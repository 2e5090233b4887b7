//! Permission state model for one role.
//!
//! State is a sparse Module → Entity → Action → bool tree. Every operation is
//! pure: mutations return a new tree and share untouched branches with the
//! input. Aggregation is always scoped by the catalog, never by whatever
//! keys happen to be present in state.

pub mod error;
pub mod grants;
pub mod overlay;
pub mod selection;

pub use error::PermissionError;
pub use grants::{ActionGrants, EntityGrants, RolePermissions};
pub use overlay::OshaLocationPermissions;
pub use selection::{
    Selection, category_selection, count_enabled_permissions, create_default_permissions,
    entity_selection, get_permission_value, global_selection, is_category_fully_selected,
    is_category_partially_selected, is_entity_fully_selected, is_entity_partially_selected,
    is_globally_fully_selected, is_globally_partially_selected, is_module_fully_selected,
    is_module_partially_selected, module_selection, prune_unknown, set_permission_value,
    set_permission_value_checked, toggle_category_permissions, toggle_entity_permissions,
    toggle_global_permissions, toggle_module_permissions,
};
