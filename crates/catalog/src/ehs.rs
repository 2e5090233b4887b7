//! Built-in EHS permission catalog.
//!
//! Modules follow the sidebar order: Access Point → Event → CAPA → OSHA →
//! documentation (JHA, SOP, LOTO, PTW) → Work Orders → Audit. Only `audit`
//! is advanced-only.

use ehsrbac_core::{ActionId, EntityName, ModuleId};

use crate::catalog::Catalog;
use crate::establishment::Establishment;
use crate::model::{Category as C, PermissionAction, PermissionEntity, PermissionModule, Verb as V};
use crate::policy::TierPolicy;

type Row = (&'static str, &'static str, &'static str, V, Option<C>);

const ACCESS_POINT: &[Row] = &[
    ("access-point:create", "Create", "Generate QR code", V::Create, Some(C::CreateEdit)),
    ("access-point:create-bulk", "Bulk Create", "Import with AI matching", V::Create, Some(C::CreateEdit)),
    ("access-point:view", "View", "Access details", V::View, Some(C::View)),
    ("access-point:view-list", "Browse", "List all QR codes", V::View, Some(C::View)),
    ("access-point:edit", "Update", "Modify assignment", V::Edit, Some(C::CreateEdit)),
    ("access-point:archive", "Archive", "Deactivate", V::Edit, Some(C::ArchiveDelete)),
    ("access-point:delete", "Delete", "Hard delete", V::Delete, Some(C::ArchiveDelete)),
    ("access-point:export", "Export", "Download CSV", V::Export, Some(C::Reporting)),
];

const SAFETY_EVENT: &[Row] = &[
    ("event:create", "Report Incident", "Create new safety event", V::Create, Some(C::CreateEdit)),
    ("event:view", "View Incident Details", "Access full details", V::View, Some(C::View)),
    ("event:view-list", "Browse Incident Log", "List all events", V::View, Some(C::View)),
    ("event:edit", "Update Incident", "Modify event details", V::Edit, Some(C::CreateEdit)),
    ("event:archive", "Archive Incident", "Soft-delete", V::Edit, Some(C::ArchiveDelete)),
    ("event:delete", "Permanently Delete", "Hard delete", V::Delete, Some(C::ArchiveDelete)),
    ("event:export", "Export Data", "Download as CSV", V::Export, Some(C::Reporting)),
    ("event:comment", "Add Comment", "Post comment", V::Comment, Some(C::Collaboration)),
    ("event:view-comments", "View Comments", "Read threads", V::View, Some(C::Collaboration)),
    ("event:delete-comment", "Delete Comment", "Remove comment", V::Edit, Some(C::Collaboration)),
];

const CAPA: &[Row] = &[
    ("capa:create", "Create CAPA", "Create corrective action", V::Create, Some(C::CreateEdit)),
    ("capa:view", "View Details", "Access CAPA details", V::View, Some(C::View)),
    ("capa:view-list", "Browse CAPAs", "List all CAPAs", V::View, Some(C::View)),
    ("capa:edit", "Update CAPA", "Modify details", V::Edit, Some(C::CreateEdit)),
    ("capa:duplicate", "Duplicate CAPA", "Copy with attachments", V::Create, Some(C::CreateEdit)),
    ("capa:archive", "Archive", "Soft-delete", V::Edit, Some(C::ArchiveDelete)),
    ("capa:delete", "Permanently Delete", "Hard delete", V::Delete, Some(C::ArchiveDelete)),
    ("capa:export", "Export Data", "Download as CSV", V::Export, Some(C::Reporting)),
    ("capa:comment", "Add Comment", "Post comment", V::Comment, Some(C::Collaboration)),
    ("capa:view-comments", "View Comments", "Read threads", V::View, Some(C::Collaboration)),
    ("capa:delete-comment", "Delete Comment", "Remove comment", V::Edit, Some(C::Collaboration)),
];

const OSHA_REPORT: &[Row] = &[
    ("osha-report:create", "Create Report", "Record injury/illness", V::Create, Some(C::CreateEdit)),
    ("osha-report:view", "View Report", "Access details", V::View, Some(C::View)),
    ("osha-report:view-list", "Browse Reports", "List all reports", V::View, Some(C::View)),
    ("osha-report:edit", "Update Report", "Modify classification", V::Edit, Some(C::CreateEdit)),
    ("osha-report:archive", "Archive", "Soft-delete", V::Edit, Some(C::ArchiveDelete)),
    ("osha-report:delete", "Permanently Delete", "Hard delete", V::Delete, Some(C::ArchiveDelete)),
    ("osha-report:export", "Export", "Download as CSV", V::Export, Some(C::Reporting)),
];

const OSHA_SUMMARY: &[Row] = &[
    ("osha-summary:view-cases", "View Annual Summary", "Access 300A with rates", V::View, Some(C::View)),
    ("osha-summary:view-establishment", "View Establishment Info", "Company hours/details", V::View, Some(C::View)),
    ("osha-summary:upsert-establishment", "Update Establishment", "Modify hours worked", V::Create, Some(C::CreateEdit)),
    ("osha-summary:certify", "Executive Certification", "Sign 300A", V::Create, Some(C::Approvals)),
    ("osha-summary:archive", "Archive Summary", "Archive year", V::Create, Some(C::ArchiveDelete)),
    ("osha-summary:view-archived", "View Archived", "Previous years", V::View, Some(C::View)),
];

const OSHA_AGENCY: &[Row] = &[
    ("osha-agency:create", "Create Submission", "Draft agency report", V::Create, Some(C::CreateEdit)),
    ("osha-agency:view", "View Submission", "Access report", V::View, Some(C::View)),
    ("osha-agency:view-list", "Browse Submissions", "List reports", V::View, Some(C::View)),
    ("osha-agency:edit", "Update Submission", "Modify before submit", V::Edit, Some(C::CreateEdit)),
    ("osha-agency:archive", "Archive", "Soft-delete", V::Edit, Some(C::ArchiveDelete)),
    ("osha-agency:export", "Export", "Download as CSV", V::Export, Some(C::Reporting)),
];

const OSHA_LOCATION: &[Row] = &[
    ("osha-location:create", "Register Location", "Add establishment", V::Create, Some(C::CreateEdit)),
    ("osha-location:view", "View Location", "Access details", V::View, Some(C::View)),
    ("osha-location:view-list", "Browse Locations", "List locations", V::View, Some(C::View)),
    ("osha-location:archive", "Archive", "Soft-delete", V::Edit, Some(C::ArchiveDelete)),
    ("osha-location:export", "Export", "Download as CSV", V::Export, Some(C::Reporting)),
];

const OSHA_AUDIT_TRAIL: &[Row] = &[
    ("osha-audit-trail:view", "View Audit Trail", "Compliance logs", V::View, Some(C::View)),
    ("osha-audit-trail:create", "Log Action", "Manual log entry", V::Create, None),
];

const JHA: &[Row] = &[
    ("jha:create", "Create JHA", "Draft analysis", V::Create, Some(C::CreateEdit)),
    ("jha:view", "View JHA", "Access details", V::View, Some(C::View)),
    ("jha:view-list", "Browse Library", "List all JHAs", V::View, Some(C::View)),
    ("jha:edit", "Update", "Modify JHA", V::Edit, Some(C::CreateEdit)),
    ("jha:submit-review", "Submit", "Send to approvers", V::UpdateStatus, Some(C::Approvals)),
    ("jha:approve", "Approve", "Sign off", V::UpdateStatus, Some(C::Approvals)),
    ("jha:reject", "Reject", "Send back", V::UpdateStatus, Some(C::Approvals)),
    ("jha:archive", "Archive", "Soft-delete", V::Edit, Some(C::ArchiveDelete)),
    ("jha:delete", "Delete", "Hard delete", V::Delete, Some(C::ArchiveDelete)),
    ("jha:export", "Export", "Download CSV", V::Export, Some(C::Reporting)),
];

const SOP: &[Row] = &[
    ("sop:create", "Create SOP", "Draft procedure", V::Create, Some(C::CreateEdit)),
    ("sop:view", "View SOP", "Access details", V::View, Some(C::View)),
    ("sop:view-list", "Browse Library", "List all SOPs", V::View, Some(C::View)),
    ("sop:edit", "Update", "Modify SOP", V::Edit, Some(C::CreateEdit)),
    ("sop:duplicate", "Duplicate", "Copy SOP", V::Create, Some(C::CreateEdit)),
    ("sop:submit-review", "Submit", "Send to approvers", V::UpdateStatus, Some(C::Approvals)),
    ("sop:approve", "Approve", "Sign off", V::UpdateStatus, Some(C::Approvals)),
    ("sop:reject", "Reject", "Send back", V::UpdateStatus, Some(C::Approvals)),
    ("sop:archive", "Archive", "Soft-delete", V::Edit, Some(C::ArchiveDelete)),
    ("sop:delete", "Delete", "Hard delete", V::Delete, Some(C::ArchiveDelete)),
    ("sop:export", "Export", "Download CSV", V::Export, Some(C::Reporting)),
];

const LOTO: &[Row] = &[
    ("loto:create", "Create Procedure", "Draft LOTO", V::Create, Some(C::CreateEdit)),
    ("loto:view", "View Procedure", "Access details", V::View, Some(C::View)),
    ("loto:view-list", "Browse Library", "List all LOTOs", V::View, Some(C::View)),
    ("loto:edit", "Update", "Modify procedure", V::Edit, Some(C::CreateEdit)),
    ("loto:duplicate", "Duplicate", "Copy procedure", V::Create, Some(C::CreateEdit)),
    ("loto:submit-review", "Submit", "Send to approvers", V::UpdateStatus, Some(C::Approvals)),
    ("loto:approve", "Approve", "Sign off", V::UpdateStatus, Some(C::Approvals)),
    ("loto:reject", "Reject", "Send back", V::UpdateStatus, Some(C::Approvals)),
    ("loto:archive", "Archive", "Soft-delete", V::Edit, Some(C::ArchiveDelete)),
    ("loto:delete", "Delete", "Hard delete", V::Delete, Some(C::ArchiveDelete)),
    ("loto:export", "Export", "Download CSV", V::Export, Some(C::Reporting)),
];

const PTW: &[Row] = &[
    ("ptw:create", "Create Permit", "Draft PTW", V::Create, Some(C::CreateEdit)),
    ("ptw:view", "View Permit", "Access details", V::View, Some(C::View)),
    ("ptw:view-list", "Browse Permits", "List all PTWs", V::View, Some(C::View)),
    ("ptw:edit", "Update", "Modify permit", V::Edit, Some(C::CreateEdit)),
    ("ptw:duplicate", "Duplicate", "Copy permit", V::Create, Some(C::CreateEdit)),
    ("ptw:submit-review", "Submit", "Send to approvers", V::UpdateStatus, Some(C::Approvals)),
    ("ptw:approve", "Approve", "Authorize work", V::UpdateStatus, Some(C::Approvals)),
    ("ptw:reject", "Reject", "Send back", V::UpdateStatus, Some(C::Approvals)),
    ("ptw:archive", "Archive", "Soft-delete", V::Edit, Some(C::ArchiveDelete)),
    ("ptw:delete", "Delete", "Hard delete", V::Delete, Some(C::ArchiveDelete)),
    ("ptw:export", "Export", "Download CSV", V::Export, Some(C::Reporting)),
];

const WORK_ORDER: &[Row] = &[
    ("work-order:search", "Search Work Orders", "Find WOs from CMMS", V::View, Some(C::View)),
    ("work-order:view", "View Details", "Access WO with analysis", V::View, Some(C::View)),
    ("work-order:create", "Create WO", "Generic work order", V::Create, Some(C::CreateEdit)),
    ("work-order:create-from-entity", "Create from CAPA/Event", "Link to entity", V::Create, Some(C::CreateEdit)),
    ("work-order:link", "Link Existing WO", "Associate WO", V::Edit, Some(C::CreateEdit)),
    ("work-order:unlink", "Unlink WO", "Remove association", V::Edit, Some(C::CreateEdit)),
    ("work-order:get-by-capa", "List by CAPA", "View CAPA WOs", V::View, Some(C::View)),
    ("work-order:count-by-capa", "Count by CAPA", "WO count", V::View, Some(C::View)),
    ("work-order:enqueue-analysis", "Queue AI Analysis", "Analyze completed WO", V::Create, None),
];

const AUDIT: &[Row] = &[
    ("audit:create", "Create Audit", "Schedule inspection", V::Create, Some(C::CreateEdit)),
    ("audit:view", "View Audit", "Access details", V::View, Some(C::View)),
    ("audit:view-list", "Browse Audits", "List all audits", V::View, Some(C::View)),
    ("audit:edit", "Update", "Modify audit", V::Edit, Some(C::CreateEdit)),
    ("audit:duplicate", "Duplicate", "Copy template", V::Create, Some(C::CreateEdit)),
    ("audit:submit-review", "Submit", "Send to approvers", V::UpdateStatus, Some(C::Approvals)),
    ("audit:approve", "Approve", "Sign off", V::UpdateStatus, Some(C::Approvals)),
    ("audit:reject", "Reject", "Send back", V::UpdateStatus, Some(C::Approvals)),
    ("audit:archive", "Archive", "Soft-delete", V::Edit, Some(C::ArchiveDelete)),
    ("audit:delete", "Delete", "Hard delete", V::Delete, Some(C::ArchiveDelete)),
    ("audit:export", "Export", "Download CSV", V::Export, Some(C::Reporting)),
];

/// Module id of the regulated OSHA sub-domain.
pub const OSHA_MODULE: &str = "osha";

fn entity(name: &'static str, rows: &[Row]) -> PermissionEntity {
    PermissionEntity {
        name: EntityName::from_static(name),
        actions: rows
            .iter()
            .map(|&(id, label, description, verb, category)| PermissionAction {
                id: ActionId::from_static(id),
                label: label.to_string(),
                description: description.to_string(),
                verb,
                category,
            })
            .collect(),
    }
}

fn module(
    id: &'static str,
    name: &str,
    description: &str,
    advanced_only: bool,
    entities: Vec<PermissionEntity>,
) -> PermissionModule {
    PermissionModule {
        id: ModuleId::from_static(id),
        name: name.to_string(),
        description: description.to_string(),
        advanced_only,
        entities,
    }
}

/// Modules of the built-in catalog, in sidebar order.
pub fn modules() -> Vec<PermissionModule> {
    vec![
        module(
            "access-point",
            "Access Points (QR Codes)",
            "QR code generation for locations",
            false,
            vec![entity("Access Point", ACCESS_POINT)],
        ),
        module(
            "event",
            "Safety Events",
            "Safety event reporting and tracking",
            false,
            vec![entity("Safety Event", SAFETY_EVENT)],
        ),
        module(
            "capa",
            "CAPAs",
            "CAPA management with ownership tracking",
            false,
            vec![entity("CAPA", CAPA)],
        ),
        module(
            OSHA_MODULE,
            "OSHA Compliance",
            "Complete OSHA recordkeeping and reporting (Contains PII)",
            false,
            vec![
                entity("OSHA Report (300/301)", OSHA_REPORT),
                entity("OSHA 300A Summary", OSHA_SUMMARY),
                entity("OSHA Agency Report", OSHA_AGENCY),
                entity("OSHA Location", OSHA_LOCATION),
                entity("OSHA Audit Trail", OSHA_AUDIT_TRAIL),
            ],
        ),
        module("jha", "Job Hazard Analysis", "Task risk assessment", false, vec![entity("JHA", JHA)]),
        module(
            "sop",
            "Standard Operating Procedures",
            "SOP documentation and approval",
            false,
            vec![entity("SOP", SOP)],
        ),
        module(
            "loto",
            "Lockout/Tagout",
            "Equipment isolation procedures",
            false,
            vec![entity("LOTO Procedure", LOTO)],
        ),
        module(
            "ptw",
            "Permit to Work",
            "High-risk work authorization",
            false,
            vec![entity("Work Permit", PTW)],
        ),
        module(
            "work-order",
            "Safety Work Orders",
            "CMMS integration for corrective maintenance",
            false,
            vec![entity("Work Order", WORK_ORDER)],
        ),
        module(
            "audit",
            "Safety Audits",
            "Audit management with checklist generation",
            true,
            vec![entity("Audit", AUDIT)],
        ),
    ]
}

/// Sample OSHA establishments for location scoping.
pub fn establishments() -> Vec<Establishment> {
    vec![
        Establishment::new("osha_toronto", "Toronto Distribution Center", "Toronto", "ON")
            .with_number("1234567"),
        Establishment::new("osha_atlanta", "Atlanta Manufacturing", "Atlanta", "GA")
            .with_number("2345678"),
    ]
}

impl Catalog {
    /// The built-in EHS catalog with the default tier policy.
    ///
    /// The data is constant and covered by `builtin_catalog_validates`, so it
    /// skips the runtime validation external catalogs go through.
    pub fn ehs() -> Self {
        Self::from_parts_unchecked(modules(), TierPolicy::default())
    }
}
