use anyhow::{Context, Result};
use std::io;
use tracing_subscriber::EnvFilter;

use expense_tracker::{AppConfig, ChartSurface, Shell, INTERRUPTED_FAREWELL};

fn main() -> Result<()> {
    let settings = expense_tracker::config::load().context("failed to load configuration")?;
    init_logging(&settings);

    tracing::info!(
        version = expense_tracker::VERSION,
        data_file = %settings.data_file.display(),
        "starting expense tracker"
    );

    // Ctrl-C at a prompt ends the session with the same farewell as end of input.
    ctrlc::set_handler(|| {
        println!("\n{}", INTERRUPTED_FAREWELL);
        tracing::info!("session interrupted by signal");
        std::process::exit(0);
    })
    .context("failed to install Ctrl-C handler")?;

    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout(), chart_surface(), settings);
    shell.run().context("console I/O failed")?;

    Ok(())
}

// Logs go to stderr so they never mix with the menu on stdout.
fn init_logging(settings: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "tui")]
fn chart_surface() -> Box<dyn ChartSurface> {
    Box::new(expense_tracker::ui::TerminalCharts)
}

#[cfg(not(feature = "tui"))]
fn chart_surface() -> Box<dyn ChartSurface> {
    Box::new(expense_tracker::UnavailableCharts)
}
