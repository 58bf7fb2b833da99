//! DividendLens TUI: interactive terminal dashboard for one company's dividends.
//!
//! Tabs for the headline indicators, dividend history, outlook, peer
//! comparison, risks and the segmented analysis, built with `ratatui` +
//! `crossterm`.

mod app;
mod screens;
mod widgets;

use std::fs::OpenOptions;
use std::sync::Mutex;

use color_eyre::eyre::{Result, WrapErr};
use dividendlens_core::Dashboard;
use dividendlens_shared::load_config;

/// Environment variable naming the log file. Unset means no logging.
const LOG_ENV: &str = "DIVIDENDLENS_LOG";

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let config = load_config()?;
    let dashboard = Dashboard::load(&config).wrap_err("failed to load dashboard data")?;

    app::run(dashboard)
}

/// Send logs to the file named by `DIVIDENDLENS_LOG`, if any. The terminal
/// belongs to the UI, so nothing is written to stderr.
fn init_tracing() -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.to_string_lossy()))?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dividendlens=debug"));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
