//! Name matching for the protected system roles.
//!
//! Names compare case-insensitively after collapsing whitespace, so
//! `"  view   ONLY "` matches `"View Only"`.

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// `"View-Only"` or `"View Only"`.
pub fn is_view_only_role_name(name: &str) -> bool {
    matches!(normalize(name).as_str(), "view-only" | "view only")
}

pub fn is_technician_role_name(name: &str) -> bool {
    normalize(name) == "technician"
}

/// Roles whose license is always free.
pub fn is_free_system_role_name(name: &str) -> bool {
    is_view_only_role_name(name) || is_technician_role_name(name)
}
