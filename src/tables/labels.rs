/// Category used when a code has no second segment.
pub(super) const FALLBACK_CATEGORY: &str = "general";

/// Module-scoped category labels.
pub(super) const CATEGORY_LABELS: &[(&str, &[(&str, &str)])] = &[
    (
        "aup",
        &[
            ("protocol", "Protocols"),
            ("review", "Protocol Review"),
            ("amendment", "Amendments"),
            ("committee", "Committee"),
            ("attachment", "Attachments"),
        ],
    ),
    (
        "pig",
        &[
            ("record", "Animal Records"),
            ("observation", "Observations"),
            ("surgery", "Surgery"),
            ("weight", "Weights"),
            ("vaccination", "Vaccinations"),
            ("pen", "Pens"),
            ("source", "Animal Sources"),
            ("export", "Data Export"),
        ],
    ),
    (
        "erp",
        &[
            ("warehouse", "Warehouses"),
            ("product", "Products"),
            ("sku", "SKU"),
            ("partner", "Partners"),
            ("purchase", "Purchasing"),
            ("sales", "Sales"),
            ("stock", "Stock"),
            ("document", "Documents"),
            ("report", "Reports"),
        ],
    ),
    (
        "dev",
        &[
            ("user", "Users"),
            ("role", "Roles"),
            ("permission", "Permissions"),
            ("notification", "Notifications"),
            ("audit", "Audit Log"),
            ("setting", "Settings"),
        ],
    ),
    (
        "hr",
        &[
            ("leave", "Leave"),
            ("attendance", "Attendance"),
            ("overtime", "Overtime"),
            ("calendar", "Calendar"),
            ("balance", "Leave Balances"),
        ],
    ),
];

/// Action-like categories shared by every module.
pub(super) const OPERATION_LABELS: &[(&str, &str)] = &[
    ("general", "General"),
    ("view", "View"),
    ("read", "View"),
    ("list", "List"),
    ("create", "Create"),
    ("update", "Edit"),
    ("edit", "Edit"),
    ("delete", "Delete"),
    ("approve", "Approve"),
    ("reject", "Reject"),
    ("submit", "Submit"),
    ("export", "Export"),
    ("import", "Import"),
    ("manage", "Manage"),
    ("assign", "Assign"),
];
