use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use loadplan_core::PlannerConfig;
use loadplan_core::config::DEFAULT_CONFIG_FILE;

mod commands;
mod render;

#[derive(Parser)]
#[command(
    name = "loadplan",
    about = "Loadplan — ULD load planner for aircraft cargo decks",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Planner config file. Defaults apply when it does not exist.
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign ULDs to deck slots and print the load plan.
    ///
    /// Units are placed in manifest order. Each unit goes to the contiguous
    /// span that keeps the load's mean arm closest to the balance target;
    /// units with no feasible span are reported as UNASSIGNED.
    Plan {
        /// Unit manifest (.toml with [[units]] tables, or .json array).
        #[arg(short, long)]
        units: PathBuf,
        /// Aircraft model from the aircraft database.
        #[arg(short, long)]
        aircraft: Option<String>,
        /// Main deck slot count for an aircraft not in the database.
        #[arg(long)]
        main_slots: Option<usize>,
        /// Lower deck slot count for an aircraft not in the database.
        #[arg(long)]
        lower_slots: Option<usize>,
        /// Override [paths].aircraft_db.
        #[arg(long)]
        aircraft_db: Option<PathBuf>,
        /// Override [paths].catalog.
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Override [paths].report.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Do not write the report file.
        #[arg(long)]
        no_save: bool,
        /// Output format.
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Colour occupants by ULD type.
        #[arg(long)]
        color: bool,
    },
    /// List aircraft in the database.
    Aircraft {
        /// Override [paths].aircraft_db.
        #[arg(long)]
        aircraft_db: Option<PathBuf>,
    },
    /// Write a default loadplan.toml.
    Init {
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("loadplan=info".parse()?);
    let logs = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        logs.json().init();
    } else {
        logs.init();
    }

    match cli.command {
        Commands::Init { path, force } => commands::init::init(&path, force),
        Commands::Aircraft { aircraft_db } => {
            let config = PlannerConfig::load_or_default(&cli.config)?;
            commands::aircraft::list(&aircraft_db.unwrap_or(config.paths.aircraft_db))
        }
        Commands::Plan {
            units,
            aircraft,
            main_slots,
            lower_slots,
            aircraft_db,
            catalog,
            output,
            no_save,
            format,
            color,
        } => {
            let mut config = PlannerConfig::load_or_default(&cli.config)?;
            if let Some(path) = aircraft_db {
                config.paths.aircraft_db = path;
            }
            if let Some(path) = catalog {
                config.paths.catalog = path;
            }
            if let Some(path) = output {
                config.paths.report = path;
            }
            let request = commands::plan::PlanRequest {
                units,
                aircraft,
                main_slots,
                lower_slots,
                save: !no_save,
                format,
                color,
            };
            commands::plan::plan(&request, &config)
        }
    }
}
