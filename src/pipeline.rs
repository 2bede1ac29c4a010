use crate::config::MapConfig;
use crate::load::{clean_table, load_table};
use crate::render::{build_chart, write_html};
use crate::resolve::resolve_codes;
use anyhow::{Context, Result};
use std::{path::PathBuf, time::Instant};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub rows: usize,
    pub resolved: usize,
    pub unresolved: usize,
    pub output: PathBuf,
}

/// raw file → cleaned table → coded table → chart → HTML page
#[tracing::instrument(level = "info", skip(config), fields(input = %config.input.display()))]
pub fn run(config: &MapConfig) -> Result<PipelineSummary> {
    let start = Instant::now();

    // ─── 1) load + clean ─────────────────────────────────────────────
    let table = load_table(&config.input, &config.year_column)
        .with_context(|| format!("loading {}", config.input.display()))?;
    let table = clean_table(table, config);
    info!(rows = table.len(), elapsed = ?start.elapsed(), "cleaned");

    // ─── 2) resolve codes ───────────────────────────────────────────
    let table = resolve_codes(table);

    // ─── 3) chart + write ───────────────────────────────────────────
    let chart = build_chart(&table);
    let output = write_html(&chart, &config.output)?;

    let resolved = table.resolved_count();
    let summary = PipelineSummary {
        rows: table.len(),
        resolved,
        unresolved: table.len() - resolved,
        output,
    };
    info!(?summary, elapsed = ?start.elapsed(), "pipeline finished");
    Ok(summary)
}
