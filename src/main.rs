use anyhow::Result;
use clap::Parser;
use hivmap::{
    config::{DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_YEAR_COLUMN},
    MapConfig, NameFixups,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Choropleth of estimated people living with HIV, by country"
)]
struct Args {
    /// WHO export with a title line above the header
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,
    /// `.html` is appended when there is no extension
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Header of the estimate column to map
    #[arg(long, default_value = DEFAULT_YEAR_COLUMN)]
    year: String,
    /// YAML mapping of extra source-name → catalog-name fixups
    #[arg(long)]
    fixups: Option<PathBuf>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hivmap=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) config ───────────────────────────────────────────────────
    let args = Args::parse();
    let fixups = match &args.fixups {
        Some(path) => NameFixups::from_yaml_file(path)?,
        None => NameFixups::default(),
    };
    let config = MapConfig {
        input: args.input,
        output: args.output,
        year_column: args.year,
        fixups,
        ..MapConfig::default()
    };
    info!(?config, "startup");

    // ─── 3) run ──────────────────────────────────────────────────────
    let summary = hivmap::run(&config)?;
    info!(
        "mapped {} of {} countries → {}",
        summary.resolved,
        summary.rows,
        summary.output.display()
    );
    Ok(())
}
