use serde::{Deserialize, Serialize};

use ehsrbac_core::{ActionId, EntityName, ModuleId};

/// Coarse grouping used by the simple display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    View,
    CreateEdit,
    Approvals,
    Collaboration,
    ArchiveDelete,
    Reporting,
}

impl Category {
    /// Fixed display order.
    pub const ORDERED: [Category; 6] = [
        Category::View,
        Category::CreateEdit,
        Category::Approvals,
        Category::Collaboration,
        Category::ArchiveDelete,
        Category::Reporting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::View => "view",
            Category::CreateEdit => "create-edit",
            Category::Approvals => "approvals",
            Category::Collaboration => "collaboration",
            Category::ArchiveDelete => "archive-delete",
            Category::Reporting => "reporting",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::View => "View",
            Category::CreateEdit => "Create & Edit",
            Category::Approvals => "Approvals",
            Category::Collaboration => "Collaboration",
            Category::ArchiveDelete => "Archive & Delete",
            Category::Reporting => "Reporting",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::View => "Read-only access to view records and lists",
            Category::CreateEdit => "Data entry and modification rights",
            Category::Approvals => "Authority to approve/reject workflows",
            Category::Collaboration => "Commenting and tagging capabilities",
            Category::ArchiveDelete => "Destructive capabilities",
            Category::Reporting => "Data export and report generation",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission verb attached to every action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verb {
    Create,
    View,
    Edit,
    Delete,
    Export,
    Comment,
    UpdateStatus,
}

/// Billing tier of a single action (and, derived, of a role).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseTier {
    Paid,
    Free,
}

/// Smallest controllable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionAction {
    pub id: ActionId,
    pub label: String,
    pub description: String,
    pub verb: Verb,
    /// `None` for actions only reachable through entity/module controls
    /// (advanced mode); they never show up in a category lookup.
    #[serde(default)]
    pub category: Option<Category>,
}

impl PermissionAction {
    /// Key under which this action is stored in role state.
    pub fn key(&self) -> &str {
        self.id.key_str()
    }
}

/// Named object type within a module, owning an ordered list of actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionEntity {
    pub name: EntityName,
    pub actions: Vec<PermissionAction>,
}

impl PermissionEntity {
    pub fn action(&self, key: &str) -> Option<&PermissionAction> {
        self.actions.iter().find(|a| a.key() == key)
    }
}

/// Top-level grouping of entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionModule {
    pub id: ModuleId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub advanced_only: bool,
    pub entities: Vec<PermissionEntity>,
}

impl PermissionModule {
    /// Every action of the module with its owning entity, in catalog order.
    pub fn actions(&self) -> impl Iterator<Item = (&PermissionEntity, &PermissionAction)> {
        self.entities
            .iter()
            .flat_map(|entity| entity.actions.iter().map(move |action| (entity, action)))
    }

    pub fn action_count(&self) -> usize {
        self.entities.iter().map(|e| e.actions.len()).sum()
    }

    /// Single-entity modules render without entity grouping.
    pub fn is_single_entity(&self) -> bool {
        self.entities.len() == 1
    }
}

/// Catalog visibility mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogMode {
    /// Modules without `advanced_only`.
    #[default]
    Simple,
    /// Every module.
    Advanced,
}

impl CatalogMode {
    pub fn includes(&self, module: &PermissionModule) -> bool {
        match self {
            CatalogMode::Simple => !module.advanced_only,
            CatalogMode::Advanced => true,
        }
    }
}
