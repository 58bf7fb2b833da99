//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use dividendlens_core::analysis::load_analysis;
use dividendlens_core::metrics::{CagrRow, KeyIndicators};
use dividendlens_core::{Dashboard, report};
use dividendlens_segmenter::{SegmentOptions, segment_with};
use dividendlens_shared::{AppConfig, DuplicatePolicy, SectionMap, init_config, load_config, load_config_from};
use serde::Serialize;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// DividendLens: dividend metrics and analysis for a single company.
#[derive(Parser)]
#[command(
    name = "dividendlens",
    version,
    about = "Dividend dashboard: key metrics, projections and a segmented analysis report.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.dividendlens/dividendlens.toml.
    #[arg(long, global = true, env = "DIVIDENDLENS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Output format for data commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Output format for the `report` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum ReportFormat {
    Markdown,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Split an analysis document into titled sections.
    Sections {
        /// Document to segment (defaults to the configured analysis path).
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output format.
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Duplicate title handling: overwrite, append or disambiguate.
        #[arg(long)]
        duplicates: Option<DuplicatePolicy>,

        /// Title of the section before the first heading.
        #[arg(long)]
        intro_label: Option<String>,
    },

    /// Print key dividend indicators and growth rates.
    Metrics {
        /// Output format.
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Render the full dashboard as Markdown or JSON.
    Report {
        /// Analysis document (defaults to the configured analysis path).
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output format.
        #[arg(long, default_value = "markdown")]
        format: ReportFormat,

        /// Write the report here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "dividendlens=info",
        1 => "dividendlens=debug",
        _ => "dividendlens=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Command::Sections {
            file,
            format,
            duplicates,
            intro_label,
        } => cmd_sections(&config, file.as_deref(), format, duplicates, intro_label),
        Command::Metrics { format } => cmd_metrics(&config, format),
        Command::Report { file, format, out } => cmd_report(config, file, format, out.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_sections(
    config: &AppConfig,
    file: Option<&Path>,
    format: OutputFormat,
    duplicates: Option<DuplicatePolicy>,
    intro_label: Option<String>,
) -> Result<()> {
    let path = file.map_or_else(|| PathBuf::from(&config.analysis.path), Path::to_path_buf);
    let opts = segment_options(config, duplicates, intro_label);

    let document = load_analysis(&path);
    if let Some(warning) = document.warning() {
        warn!("{warning}");
    }

    let sections = segment_with(&document.text, &opts);
    info!(path = %path.display(), sections = sections.len(), "segmented analysis");

    match format {
        OutputFormat::Text => print!("{}", format_sections(&sections)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sections)?),
    }
    Ok(())
}

/// Segmentation options from config, with CLI overrides applied.
fn segment_options(
    config: &AppConfig,
    duplicates: Option<DuplicatePolicy>,
    intro_label: Option<String>,
) -> SegmentOptions {
    let mut opts = SegmentOptions::from(&config.analysis);
    if let Some(policy) = duplicates {
        opts.duplicates = policy;
    }
    if let Some(label) = intro_label {
        opts.intro_label = label;
    }
    opts
}

/// Plain-text listing: a `== Title ==` banner followed by the body.
fn format_sections(sections: &SectionMap) -> String {
    let mut out = String::new();
    for (title, body) in sections.iter() {
        out.push_str(&format!("== {title} ==\n"));
        if body.is_empty() {
            out.push_str("(empty)\n");
        } else {
            out.push_str(body);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// JSON shape of the `metrics` command.
#[derive(Serialize)]
struct MetricsOutput<'a> {
    indicators: &'a KeyIndicators,
    growth: &'a [CagrRow],
    peer_yield_average: Option<f64>,
}

fn cmd_metrics(config: &AppConfig, format: OutputFormat) -> Result<()> {
    let dashboard = Dashboard::load(config).wrap_err("failed to load dashboard data")?;

    match format {
        OutputFormat::Json => {
            let output = MetricsOutput {
                indicators: &dashboard.indicators,
                growth: &dashboard.growth,
                peer_yield_average: dashboard.peer_yield_average,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            let company = &dashboard.dataset.company;
            let ind = &dashboard.indicators;
            println!();
            println!("  {} ({})", company.name, company.ticker);
            println!("  Last DPS (FY{}):   € {:.2}", ind.last_dps_year, ind.last_dps);
            println!("  Trailing yield:    {}", percent(ind.trailing_yield));
            println!("  Payout policy:     {}", ind.payout_policy);
            println!(
                "  Expected DPS (FY{}): € {:.2} ({})",
                ind.expected_dps_year, ind.expected_dps, ind.expected_growth
            );
            println!();
            for row in &dashboard.growth {
                println!(
                    "  {:<12} {:>7}  {}",
                    row.period,
                    percent(row.cagr),
                    row.description
                );
            }
            println!();
            println!("  Peer yield average: {}", percent(dashboard.peer_yield_average));
            println!();
        }
    }
    Ok(())
}

fn percent(v: Option<f64>) -> String {
    v.map_or_else(|| "N/A".to_string(), |v| format!("{v:.1}%"))
}

fn cmd_report(
    mut config: AppConfig,
    file: Option<PathBuf>,
    format: ReportFormat,
    out: Option<&Path>,
) -> Result<()> {
    if let Some(file) = file {
        config.analysis.path = file.to_string_lossy().into_owned();
    }

    let dashboard = Dashboard::load(&config).wrap_err("failed to load dashboard data")?;
    if let Some(warning) = &dashboard.analysis.warning {
        warn!("{warning}");
    }

    let rendered = render_report(&dashboard, format)?;
    match out {
        Some(path) => {
            std::fs::write(path, &rendered)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = rendered.len(), "report written");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// The dashboard as a Markdown document or as pretty-printed JSON.
fn render_report(dashboard: &Dashboard, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Markdown => Ok(report::render_markdown(dashboard)),
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(dashboard)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config written to {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
