use crate::config::{MapConfig, NameFixups};
use crate::table::Table;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// `[960 000–1 500 000]` style annotations and `(note)` asides on estimates.
/// An unclosed bracket runs to the end of the value.
static ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*(\[[^\]]*(\]|$)|\([^)]*(\)|$))").expect("static regex")
});

/// "Name (qualifier)" → "Name, qualifier".
pub fn clean_country(raw: &str) -> String {
    raw.trim()
        .replace(" (", ", ")
        .replace('(', ", ")
        .replace(')', "")
}

/// Reduce a free-text estimate to its bare number, or to "" for a placeholder.
pub fn clean_estimate(raw: &str, placeholders: &[String]) -> String {
    // 1) drop bracketed/parenthesised annotations
    let without_notes = ANNOTATION.replace_all(raw, "");

    // 2) drop thousands separators and padding
    let compact: String = without_notes
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    // 3) drop comparison markers
    let bare = compact.trim_matches(|c: char| c == '<' || c == '>');

    // 4) blank out "no data"
    if is_placeholder(bare, placeholders) {
        return String::new();
    }
    bare.to_string()
}

fn is_placeholder(value: &str, placeholders: &[String]) -> bool {
    placeholders.iter().any(|p| {
        let p: String = p.chars().filter(|c| !c.is_whitespace()).collect();
        value.eq_ignore_ascii_case(&p)
    })
}

/// Clean every row, then apply the name fixups.
pub fn clean_table(mut table: Table, config: &MapConfig) -> Table {
    clean_rows(&mut table, &config.placeholders, &config.fixups);
    table
}

fn clean_rows(table: &mut Table, placeholders: &[String], fixups: &NameFixups) {
    for row in &mut table.rows {
        let country = clean_country(&row.country);
        let country = fixups.apply(&country).to_string();
        let estimate = clean_estimate(&row.estimated_count, placeholders);

        if country != row.country || estimate != row.estimated_count {
            debug!(
                from = %row.country,
                to = %country,
                estimate = %estimate,
                "cleaned row"
            );
        }
        row.country = country;
        row.estimated_count = estimate;
    }
}
