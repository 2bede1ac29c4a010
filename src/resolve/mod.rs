use crate::catalog::Catalog;
use crate::table::Table;
use tracing::{debug, info};

/// Alpha-3 code for `name` in the embedded catalog, `None` if it has no match.
pub fn country_code(name: &str) -> Option<String> {
    code_in(Catalog::embedded(), name)
}

fn code_in(catalog: &Catalog, name: &str) -> Option<String> {
    match catalog.lookup(name) {
        Some(country) => Some(country.alpha_3.clone()),
        None => {
            debug!(country = %name, "no catalog match");
            None
        }
    }
}

/// Set `code` on every row from the embedded catalog.
pub fn resolve_codes(table: Table) -> Table {
    resolve_codes_with(table, Catalog::embedded())
}

/// One pass in row order on the calling thread. Unmatched rows stay in the
/// table with `code = None`.
pub fn resolve_codes_with(mut table: Table, catalog: &Catalog) -> Table {
    for row in &mut table.rows {
        row.code = code_in(catalog, &row.country);
    }

    let resolved = table.resolved_count();
    info!(
        resolved,
        unresolved = table.len() - resolved,
        "resolved country codes"
    );
    table
}
