/// `(key, order, label)` for every top-level module. Lower order sorts first.
pub(super) const MODULES: &[(&str, u32, &str)] = &[
    ("aup", 1, "Animal Use Protocols"),
    ("pig", 2, "Animal Management"),
    ("erp", 3, "Inventory & ERP"),
    ("dev", 4, "System Administration"),
    ("hr", 5, "Human Resources"),
    ("other", 99, "Other"),
];

/// Catch-all module; its order must stay the largest in `MODULES`.
pub(super) const FALLBACK_MODULE: &str = "other";
