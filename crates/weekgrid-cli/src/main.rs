//! weekgrid CLI - Weekly schedule sheets
//!
//! Builds the week grid and writes it out. Run without arguments to render
//! the built-in personal plan to `planning_personnel.xlsx` in the current
//! directory.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use weekgrid_core::{builtin, plan_file, GridBuilder, Plan, Renderer};
use weekgrid_render::{ExcelRenderer, TextRenderer};

const DEFAULT_OUTPUT: &str = "planning_personnel.xlsx";

#[derive(Parser)]
#[command(name = "weekgrid")]
#[command(author, version, about = "Weekly schedule sheet generator", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// TOML plan file (built-in personal plan if not specified)
    #[arg(long, value_name = "FILE")]
    plan: Option<PathBuf>,

    /// Output file (planning_personnel.xlsx for xlsx, stdout for text)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Xlsx)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Xlsx,
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let plan = load(&cli)?;
    let schedule = GridBuilder::new(&plan)
        .build()
        .with_context(|| format!("Invalid plan '{}'", plan.title))?;

    match cli.format {
        OutputFormat::Xlsx => {
            let path = cli.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
            ExcelRenderer::new()
                .save(&plan, &schedule, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        OutputFormat::Text => {
            let text = TextRenderer::new()
                .with_overlaps()
                .render(&plan, &schedule)?;
            match cli.output {
                Some(path) => std::fs::write(&path, text)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => print!("{text}"),
            }
        }
    }

    info!(
        overlaps = schedule.overlaps.len(),
        free_minutes = schedule.totals.free_time(),
        "Done"
    );
    Ok(())
}

fn load(cli: &Cli) -> Result<Plan> {
    match &cli.plan {
        Some(path) => {
            info!(path = %path.display(), "Loading plan file");
            plan_file::load_plan(path)
                .with_context(|| format!("Failed to load plan {}", path.display()))
        }
        None => Ok(builtin::personal_plan()),
    }
}
