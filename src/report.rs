use permtax::{ModuleGroup, Query, ResolveDetails, Taxonomy};
use std::fmt::Display;

/// What a piece of report text is, so color choices live in one place.
#[derive(Clone, Copy)]
enum Tone {
    Title,
    Rule,
    ModuleKey,
    Module,
    Category,
    Code,
    Figure,
    Result,
    Muted,
}

impl Tone {
    fn sgr(self) -> &'static str {
        match self {
            Tone::Title => "1;36",
            Tone::Rule => "90",
            Tone::ModuleKey => "34",
            Tone::Module => "1;32",
            Tone::Category => "36",
            Tone::Code | Tone::Figure => "33",
            Tone::Result => "32",
            Tone::Muted => "2",
        }
    }
}

struct Palette {
    color: bool,
}

impl Palette {
    fn paint(&self, text: impl Display, tone: Tone) -> String {
        if self.color { format!("\x1b[{}m{text}\x1b[0m", tone.sgr()) } else { text.to_string() }
    }

    fn section(&self, title: &str) {
        println!("\n{}", self.paint(format!("━━━ {title} ━━━"), Tone::Rule));
    }
}

pub fn print_taxonomy(taxonomy: &Taxonomy, details: &ResolveDetails, query: &Query, color: bool) {
    let palette = Palette { color };
    println!(
        "\n{} {}",
        palette.paint(format!("⚙  Permissions: {} of {}", taxonomy.visible_count(), taxonomy.stats.total), Tone::Title),
        palette.paint(format!("(catalog v{})", details.catalog_version), Tone::Muted)
    );
    if !query.is_unrestricted() {
        println!("{}", palette.paint(describe_query(query), Tone::Muted));
    }

    palette.section("Modules");
    for option in &taxonomy.module_options {
        println!(
            "  {} {} {}",
            palette.paint(format!("{:<8}", option.module), Tone::ModuleKey),
            option.module_name,
            palette.paint(format!("({})", option.count), Tone::Muted)
        );
    }

    palette.section("Tree");
    if taxonomy.filtered.is_empty() {
        println!("{}", palette.paint("  No permissions found", Tone::Muted));
    }
    for group in &taxonomy.filtered {
        print_module(group, &palette);
    }

    palette.section("Dedup");
    let dedup = &details.dedup;
    println!(
        "  {} in  │  {} duplicate ids  │  {} superseded codes  │  {} out",
        palette.paint(dedup.input, Tone::Figure),
        palette.paint(dedup.duplicate_ids, Tone::Figure),
        palette.paint(dedup.superseded_codes, Tone::Figure),
        palette.paint(dedup.output, Tone::Result),
    );

    palette.section("Timing");
    let metrics = &details.metrics;
    println!(
        "  Total: {}  │  Dedup: {}  │  Build: {}  │  Filter: {}",
        palette.paint(format!("{:?}", metrics.total), Tone::Result),
        palette.paint(format!("{:?}", metrics.dedup), Tone::Muted),
        palette.paint(format!("{:?}", metrics.build), Tone::Muted),
        palette.paint(format!("{:?}", metrics.filter), Tone::Muted),
    );
    println!();
}

fn print_module(group: &ModuleGroup, palette: &Palette) {
    println!(
        "  {} {} {}",
        palette.paint(&group.module_name, Tone::Module),
        palette.paint(format!("[{}]", group.module), Tone::Muted),
        palette.paint(format!("{} permissions", group.permission_count()), Tone::Muted)
    );
    for category in &group.categories {
        println!(
            "    {} {}",
            palette.paint(&category.category_name, Tone::Category),
            palette.paint(format!("[{}]", category.category), Tone::Muted)
        );
        for permission in &category.permissions {
            println!("      {} {}", permission.name, palette.paint(&permission.code, Tone::Code));
        }
    }
}

fn describe_query(query: &Query) -> String {
    let mut parts = Vec::new();
    if let Some(module) = query.module.as_deref().filter(|m| !m.trim().is_empty()) {
        parts.push(format!("module = {}", module.trim()));
    }
    if !query.search.trim().is_empty() {
        parts.push(format!("search = \"{}\"", query.search.trim()));
    }
    format!("  filter: {}", parts.join(", "))
}
