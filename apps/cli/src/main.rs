//! DividendLens CLI: dividend dashboard and analysis segmenter.
//!
//! Segments the companion analysis document, prints dividend metrics and
//! renders the full dashboard as Markdown.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
