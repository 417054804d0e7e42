use analytics::{Dashboard, DashboardQuery};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use configuration::{Config, SourceKind};
use core_types::PlayRecord;
use indicatif::{ProgressBar, ProgressStyle};
use loader::{provider_from_config, RecordProvider};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

mod render;

/// The main entry point for the Legup analytics dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if present
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    if let Some(kind) = cli.source {
        config.source.kind = kind;
        config.validate()?;
    }
    let _log_guard = configuration::init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, &config).await,
        Commands::Analyst(args) => handle_analyst(args, &config).await,
        Commands::Members => handle_members(&config).await,
        Commands::Serve(args) => {
            if let Some(addr) = args.addr {
                config.server.addr = addr;
            }
            web_server::run_server(&config).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Performance analytics for a group of sports-betting analysts.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the TOML configuration file.
    #[arg(long, global = true, default_value = "legup.toml")]
    config: PathBuf,

    /// Overrides `source.kind` from the configuration.
    #[arg(long, global = true, value_enum)]
    source: Option<SourceKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show overall, top-cohort and per-analyst statistics with recent plays.
    Report(ReportArgs),
    /// Show one analyst's statistics and every play in the window.
    Analyst(AnalystArgs),
    /// List every analyst in the play history.
    Members,
    /// Serve the dashboard as a JSON API.
    Serve(ServeArgs),
}

#[derive(Args)]
struct WindowArgs {
    /// First day of the window (format: YYYY-MM-DD). Defaults to the earliest play.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day of the window (format: YYYY-MM-DD). Defaults to the latest play.
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Print JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ReportArgs {
    #[command(flatten)]
    window: WindowArgs,

    /// Size of the all-time top performer cohort.
    #[arg(long)]
    top: Option<usize>,

    /// How many recent plays to list (0 lists every play in the window).
    #[arg(long)]
    recent: Option<usize>,
}

#[derive(Parser)]
struct AnalystArgs {
    /// The analyst (MEMBER column) to show.
    member: String,

    #[command(flatten)]
    window: WindowArgs,
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to listen on, overriding `server.addr`.
    #[arg(long)]
    addr: Option<SocketAddr>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Loads the full play set once, with a spinner while the source is fetched.
async fn load_records(config: &Config) -> anyhow::Result<Vec<PlayRecord>> {
    let provider = provider_from_config(&config.source, &config.cache);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Loading plays from {}...", provider.describe()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = provider.load().await;
    spinner.finish_and_clear();

    let records = result.with_context(|| format!("Could not load plays from {}", provider.describe()))?;
    tracing::info!(plays = records.len(), "Loaded plays.");
    Ok(records)
}

async fn handle_report(args: ReportArgs, config: &Config) -> anyhow::Result<()> {
    let records = load_records(config).await?;

    let recent = args.recent.unwrap_or(config.dashboard.recent_limit);
    let query = DashboardQuery {
        start: args.window.from,
        end: args.window.to,
        top_n: args.top.unwrap_or(config.dashboard.top_n),
        recent_limit: (recent > 0).then_some(recent),
        policy: config.dashboard.win_rate_policy,
    };
    let report = Dashboard::build(&records, &query)?;

    if args.window.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render::render_report(&report));
    }
    Ok(())
}

async fn handle_analyst(args: AnalystArgs, config: &Config) -> anyhow::Result<()> {
    let records = load_records(config).await?;

    let detail = Dashboard::analyst_detail(
        &records,
        &args.member,
        args.window.from,
        args.window.to,
        config.dashboard.win_rate_policy,
    )?;

    if args.window.json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        println!("{}", render::render_analyst(&detail));
    }
    Ok(())
}

async fn handle_members(config: &Config) -> anyhow::Result<()> {
    let records = load_records(config).await?;
    for member in analytics::dashboard::members(&records) {
        println!("{member}");
    }
    Ok(())
}
