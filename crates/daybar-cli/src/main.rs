//! daybar CLI: drag-point day editor for the terminal

use clap::{Parser, Subcommand, ValueEnum};
use daybar_engine::{format_duration, Config, ConfigError, FirstRowPolicy, TimelineModel};
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Split a working day into sessions by dragging markers along a bar
#[derive(Parser)]
#[command(name = "daybar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: .daybar/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed marker positions in percent (comma-separated, e.g. 0,50,100)
    #[arg(long, global = true, value_delimiter = ',', allow_hyphen_values = true)]
    positions: Option<Vec<f64>>,

    /// How the earliest marker becomes a row
    #[arg(long, global = true, value_enum)]
    first_row: Option<FirstRowArg>,

    /// Write logs to this file (the TUI logs nowhere otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Print the derived rows
    Rows {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the tab-separated export
    Export,

    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FirstRowArg {
    /// The earliest marker only opens the first row
    Boundary,
    /// The first row runs from the range start to the earliest marker
    FromStart,
}

impl From<FirstRowArg> for FirstRowPolicy {
    fn from(arg: FirstRowArg) -> Self {
        match arg {
            FirstRowArg::Boundary => FirstRowPolicy::BoundaryOnly,
            FirstRowArg::FromStart => FirstRowPolicy::FromRangeStart,
        }
    }
}

const DAYBAR_DIR: &str = ".daybar";

fn default_config_path() -> PathBuf {
    Path::new(DAYBAR_DIR).join("config.json")
}

fn main() {
    let cli = Cli::parse();
    let headless = !matches!(cli.command, None | Some(Commands::Tui));
    init_logging(cli.log_file.as_deref(), headless);

    match cli.command {
        None | Some(Commands::Tui) => {
            let config = load_config(&cli).unwrap_or_else(|e| fail(e));
            if let Err(e) = daybar_tui::run_tui(&config) {
                fail(e);
            }
        }
        Some(Commands::Rows { json }) => {
            let model = load_model(&cli);
            cmd_rows(&model, json);
        }
        Some(Commands::Export) => {
            let model = load_model(&cli);
            print!("{}", model.export_tsv());
        }
        Some(Commands::Init { force }) => {
            let path = cli.config.clone().unwrap_or_else(default_config_path);
            cmd_init(&path, force);
        }
    }
}

/// Print `Error: ...` and exit with status 1.
fn fail(e: impl Display) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

/// Install the subscriber: stderr for headless commands, the log file when
/// given, and nothing for the TUI without one.
fn init_logging(log_file: Option<&Path>, headless: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .unwrap_or_else(|e| fail(format!("cannot open log file {}: {e}", path.display())));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None if headless => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init();
        }
        None => {}
    }
}

/// Load the config file and apply command-line overrides.
///
/// An explicit `--config` must exist; the default path may be missing.
fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&default_config_path())?,
    };
    apply_overrides(&mut config, cli.positions.as_deref(), cli.first_row);
    config.validate()?;
    debug!(
        markers = config.seed_positions.len(),
        first_row = config.first_row.label(),
        "Loaded config"
    );
    Ok(config)
}

fn apply_overrides(config: &mut Config, positions: Option<&[f64]>, first_row: Option<FirstRowArg>) {
    if let Some(positions) = positions {
        config.seed_positions = positions.to_vec();
    }
    if let Some(first_row) = first_row {
        config.first_row = first_row.into();
    }
}

fn load_model(cli: &Cli) -> TimelineModel {
    let config = load_config(cli).unwrap_or_else(|e| fail(e));
    TimelineModel::from_config(&config).unwrap_or_else(|e| fail(e))
}

fn cmd_rows(model: &TimelineModel, json: bool) {
    let rows = model.rows();

    if json {
        match serde_json::to_string_pretty(&rows) {
            Ok(text) => println!("{text}"),
            Err(e) => fail(e),
        }
        return;
    }

    if rows.is_empty() {
        println!("No rows");
        return;
    }

    println!("{:>3}  {:<13}  {:<8}  Problem / Solution", "No", "Time Range", "Duration");
    for row in &rows {
        let lunch = if row.lunch_break { " (lunch)" } else { "" };
        let flag = if row.flagged { " *" } else { "" };
        println!(
            "{:>3}  {:<13}  {:<8}  {} / {}{lunch}{flag}",
            row.ordinal, row.time_range, row.duration, row.problem, row.solution
        );
    }
    println!();
    println!("Total: {}", format_duration(model.total_minutes()));
}

fn cmd_init(path: &Path, force: bool) {
    if path.exists() && !force {
        println!("Config already exists at {}", path.display());
        return;
    }

    match Config::default().save(path) {
        Ok(()) => println!("Created {}", path.display()),
        Err(e) => fail(format!("failed to write config: {e}")),
    }
}
