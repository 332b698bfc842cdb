// Statcast leaderboard report runner.
//
// Startup sequence:
// 1. Initialize tracing (stderr; stdout carries the report)
// 2. Parse arguments and pick the report window
// 3. Load config (copying defaults on first run)
// 4. Load, clean and rank the pitch table
// 5. Print the report as JSON

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use statcast_leaders::app;
use statcast_leaders::config;
use statcast_leaders::report::{ReportKind, ReportWindow};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "statcast-leaders")]
#[command(about = "Rank statcast pitch data into daily, playoff and season leaderboards")]
struct Args {
    /// Which report to build.
    #[arg(value_enum, default_value_t = ReportKind::Daily)]
    kind: ReportKind,

    /// Report on this day (YYYY-MM-DD). Defaults to yesterday.
    #[arg(long, conflicts_with_all = ["season", "game"])]
    date: Option<NaiveDate>,

    /// Report on a whole season.
    #[arg(long, conflicts_with = "game")]
    season: Option<i32>,

    /// Report on a single game id.
    #[arg(long)]
    game: Option<u64>,

    /// Directory holding defaults/, config/ and the data files.
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

impl Args {
    fn window(&self, today: NaiveDate) -> ReportWindow {
        if let Some(game) = self.game {
            ReportWindow::Game(game)
        } else if let Some(year) = self.season {
            ReportWindow::Season(year)
        } else if let Some(date) = self.date {
            ReportWindow::Day(date)
        } else if self.kind == ReportKind::Season {
            ReportWindow::Season(today.year())
        } else {
            ReportWindow::yesterday(today)
        }
    }
}

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;

    // 2. Arguments
    let args = Args::parse();
    let window = args.window(Local::now().date_naive());
    info!("Building {:?} report for {}", args.kind, window);

    // 3. Config
    let base_dir = match &args.base_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let copied = config::ensure_config_files(&base_dir).context("failed to prepare config")?;
    for path in &copied {
        info!("Copied default config to {}", path.display());
    }
    let config = config::load_config_from(&base_dir).context("failed to load configuration")?;

    // 4. Report
    let report = app::run(&config, &base_dir, args.kind, window)?;
    info!(
        "Report ready: {} sections, {} game boards",
        report.sections.len(),
        report.games.len()
    );

    // 5. Output
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("failed to serialize report")?;
    println!("{json}");

    Ok(())
}

/// Initialize tracing to stderr so stdout stays machine-readable.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("statcast_leaders=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
