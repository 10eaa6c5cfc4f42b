/// Explicit module tags that were renamed or folded into another module.
pub(super) const MODULE_REMAPS: &[(&str, &str)] = &[
    ("animal", "pig"),
    ("notification", "dev"),
    ("admin", "dev"),
    ("system", "dev"),
    ("report", "erp"),
    ("inventory", "erp"),
];

/// First code segment -> module, used when a record carries no module tag.
pub(super) const PREFIX_MODULES: &[(&str, &str)] = &[
    // protocols
    ("aup", "aup"),
    ("protocol", "aup"),
    ("review", "aup"),
    ("amendment", "aup"),
    // animals
    ("pig", "pig"),
    ("animal", "pig"),
    ("observation", "pig"),
    ("surgery", "pig"),
    ("pen", "pig"),
    // warehouse / purchasing / sales / inventory
    ("erp", "erp"),
    ("warehouse", "erp"),
    ("purchase", "erp"),
    ("purchasing", "erp"),
    ("sales", "erp"),
    ("inventory", "erp"),
    ("stock", "erp"),
    ("product", "erp"),
    ("sku", "erp"),
    ("partner", "erp"),
    ("document", "erp"),
    ("report", "erp"),
    // administration
    ("dev", "dev"),
    ("admin", "dev"),
    ("user", "dev"),
    ("role", "dev"),
    ("permission", "dev"),
    ("notification", "dev"),
    ("audit", "dev"),
    ("system", "dev"),
    // people
    ("hr", "hr"),
    ("leave", "hr"),
    ("attendance", "hr"),
    ("overtime", "hr"),
];

/// Legacy code prefix -> the current prefix that supersedes it.
pub(super) const SUPERSESSIONS: &[(&str, &str)] = &[("animal", "pig")];
