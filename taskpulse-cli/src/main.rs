use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskpulse_core::{Dataset, DelayFlag, FilterSelection, TaskStats};
use taskpulse_ingest::{load_tasks_csv, LoadOptions};
use taskpulse_insights::{evaluate, DashboardReport};
use tracing::info;

mod config;
mod logging;
mod render;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "taskpulse",
    version,
    about = "Workflow task analytics: KPIs, aggregates and recommendations"
)]
struct Cli {
    /// Config file (default: ~/.taskpulse/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Headline KPIs for the selection
    Kpis(SelectArgs),

    /// Ordered recommendations for the selection
    Insights(SelectArgs),

    /// Every aggregate plus recommendations
    Report {
        #[command(flatten)]
        select: SelectArgs,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Size of the workload ranking (default: from config)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Distinct values available for each filter
    Options {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long)]
        json: bool,
    },

    /// Write the default config file
    InitConfig,
}

#[derive(Args, Debug, Clone, Default)]
struct InputArgs {
    /// Task table CSV (default: data.csv_path from config)
    #[arg(long)]
    csv: Option<PathBuf>,
}

// Omit a flag to keep every value; pass it with no values to select none.
#[derive(Args, Debug, Clone, Default)]
struct SelectArgs {
    #[command(flatten)]
    input: InputArgs,

    #[arg(long, num_args = 0.., value_delimiter = ',')]
    department: Option<Vec<String>>,

    #[arg(long, num_args = 0.., value_delimiter = ',')]
    priority: Option<Vec<String>>,

    /// Delayed and/or On-Time
    #[arg(long, num_args = 0.., value_delimiter = ',')]
    delay: Option<Vec<String>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config(cli.config.as_deref())?;
    logging::init_logging(&cfg.logging.level);

    match cli.command {
        Command::Kpis(select) => {
            let dataset = load_dataset(&select.input, &cfg)?;
            let records = dataset.select(&build_selection(&select, &dataset)?);
            render::print_kpis(&TaskStats::new(&records).kpis());
        }

        Command::Insights(select) => {
            let dataset = load_dataset(&select.input, &cfg)?;
            let records = dataset.select(&build_selection(&select, &dataset)?);
            render::print_insights(&evaluate(&records));
        }

        Command::Report { select, json, top } => {
            let dataset = load_dataset(&select.input, &cfg)?;
            let selection = build_selection(&select, &dataset)?;
            let top_n = top.unwrap_or(cfg.report.top_employees);
            let report = DashboardReport::build(&dataset, &selection, top_n);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                render::print_report(&report);
            }
        }

        Command::Options { input, json } => {
            let dataset = load_dataset(&input, &cfg)?;
            let options = dataset.options();
            if json {
                println!("{}", serde_json::to_string_pretty(&options)?);
            } else {
                render::print_options(&options);
            }
        }

        Command::InitConfig => {
            config::init_config(cli.config.as_deref())?;
        }
    }

    Ok(())
}

fn load_dataset(input: &InputArgs, cfg: &Config) -> Result<Dataset> {
    let csv_path = input.csv.clone().unwrap_or_else(|| cfg.data.csv_path.clone());
    if !csv_path.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", csv_path.display());
    }

    let opts = LoadOptions {
        timezone: cfg.timezone()?,
    };
    let raw = load_tasks_csv(&csv_path, &opts)
        .with_context(|| format!("loading {}", csv_path.display()))?;

    let dataset = Dataset::from_raw(raw);
    info!(rows = dataset.len(), path = %csv_path.display(), "dataset ready");
    Ok(dataset)
}

/// Start from every observed value; each flag that was passed replaces its dimension.
fn build_selection(args: &SelectArgs, dataset: &Dataset) -> Result<FilterSelection> {
    let mut selection = dataset.default_selection();

    if let Some(departments) = &args.department {
        selection = selection.with_departments(departments.iter().map(|s| s.trim()));
    }
    if let Some(priorities) = &args.priority {
        selection = selection.with_priorities(priorities.iter().map(|s| s.trim()));
    }
    if let Some(statuses) = &args.delay {
        let flags = statuses
            .iter()
            .map(|s| s.parse::<DelayFlag>().map_err(anyhow::Error::msg))
            .collect::<Result<Vec<_>>>()?;
        selection = selection.with_delay_statuses(flags);
    }

    Ok(selection)
}
