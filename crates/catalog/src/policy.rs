//! Action → license tier mapping.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use ehsrbac_core::ActionId;

use crate::model::{Category, LicenseTier, PermissionAction, Verb};

/// Which catalog actions are billable.
///
/// The tier of an action depends only on its catalog entry (id, verb,
/// category), so classification is stable across catalog versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPolicy {
    /// Categorized actions in these categories are paid.
    pub paid_categories: BTreeSet<Category>,
    /// Uncategorized actions with these verbs are paid.
    pub paid_verbs: BTreeSet<Verb>,
    /// Always free, whatever their category or verb.
    #[serde(default)]
    pub free_actions: BTreeSet<ActionId>,
}

impl TierPolicy {
    pub fn tier_of(&self, action: &PermissionAction) -> LicenseTier {
        if self.free_actions.contains(action.id.as_str()) {
            return LicenseTier::Free;
        }

        let paid = match action.category {
            Some(category) => self.paid_categories.contains(&category),
            None => self.paid_verbs.contains(&action.verb),
        };

        if paid { LicenseTier::Paid } else { LicenseTier::Free }
    }
}

impl Default for TierPolicy {
    /// Viewing and collaboration are free, as are creating and editing
    /// safety events.
    fn default() -> Self {
        Self {
            paid_categories: BTreeSet::from([
                Category::CreateEdit,
                Category::Approvals,
                Category::ArchiveDelete,
                Category::Reporting,
            ]),
            paid_verbs: BTreeSet::from([
                Verb::Create,
                Verb::Edit,
                Verb::Delete,
                Verb::Export,
                Verb::UpdateStatus,
            ]),
            free_actions: BTreeSet::from([
                ActionId::from_static("event:create"),
                ActionId::from_static("event:edit"),
            ]),
        }
    }
}
