// Scorecast entry point.
//
// Startup sequence:
// 1. Parse arguments, load config, apply overrides
// 2. Initialize tracing (log to file, stdout carries the report)
// 3. Load the analysis document
// 4. Compute stats, scoring summary and grades
// 5. Print the report, write the optional CSV

use scorecast_app::cli::Cli;
use scorecast_app::config::{self, LoggingConfig};
use scorecast_app::export;
use scorecast_app::report::{self, GameReport};
use scorecast_app::source::DocumentSource;

use anyhow::Context;
use clap::Parser;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Config
    let cli = Cli::parse();
    let mut config = config::load_config().context("failed to load configuration")?;
    cli.apply(&mut config);

    // 2. Tracing
    init_tracing(&config.logging)?;
    info!("Scorecast starting up");

    // 3. Document
    let source = DocumentSource::parse(&config.source.location);
    let timeout = Duration::from_secs(config.source.timeout_secs);
    let document = source
        .load(timeout)
        .await
        .with_context(|| format!("failed to load analysis document from {source}"))?;
    info!(
        "Loaded game {} ({}), {} at-bats",
        document.game.game_id,
        document.game.matchup(),
        document.at_bats.len()
    );

    // 4. Compute
    let game_report = GameReport::build(&document);
    for mismatch in report::upstream_mismatches(&document, &game_report.comparison) {
        warn!(
            owner = %mismatch.owner,
            upstream = ?mismatch.upstream,
            computed = ?mismatch.computed,
            "upstream stat line differs from recomputed line"
        );
    }

    // 5. Output
    print!("{}", report::render(&game_report, &config.display));

    if let Some(path) = config.export.csv_path() {
        export::write_batters(path, &document.game, &game_report.batters)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        println!("\nBatter lines written to {}", path.display());
    }

    info!("Scorecast finished");
    Ok(())
}

/// Initialize tracing to a log file so the terminal only shows the report.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join(&logging.directory);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("scorecast.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
