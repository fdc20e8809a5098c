//! CLI entry point for the gradebook.
//!
//! Provides an interactive console for entering module marks, a script
//! runner for the same command language, and a grading-scale printer.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gradebook::command::HELP;
use gradebook::config::GradingConfig;
use gradebook::console::{Mode, Style, finish, run_lines};
use gradebook::render;
use gradebook::{GradingPolicy, SessionStore};
use std::ffi::OsStr;
use std::io::{self, BufReader, IsTerminal};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gradebook")]
#[command(about = "Record module marks and grade students", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter marks interactively
    Session {
        /// JSON file mapping letter grades to minimum averages
        #[arg(short, long)]
        boundaries: Option<String>,

        /// CSV file to write the summary report to on exit
        #[arg(long)]
        csv: Option<String>,

        /// Print the summary report as JSON on exit
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run a file of console commands, then print the summary report
    Run {
        /// Path to the command script
        #[arg(value_name = "SCRIPT")]
        script: String,

        /// JSON file mapping letter grades to minimum averages
        #[arg(short, long)]
        boundaries: Option<String>,

        /// CSV file to write the summary report to
        #[arg(long)]
        csv: Option<String>,

        /// Print the summary report as JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the grading scale
    Scale {
        /// JSON file mapping letter grades to minimum averages
        #[arg(short, long)]
        boundaries: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/gradebook.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gradebook.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let cli = Cli::parse();

    let stderr_level = stderr_level(&cli.command);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive(stderr_level.parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let style = Style {
        color: io::stdout().is_terminal(),
    };

    match cli.command {
        Commands::Session {
            boundaries,
            csv,
            json,
        } => {
            let mut store = new_store(boundaries.as_deref())?;
            println!("{HELP}\n");
            let mut stdout = io::stdout().lock();
            run_lines(&mut store, io::stdin().lock(), &mut stdout, Mode::Interactive, style)?;
            finish(&store, &mut stdout, csv.as_deref(), json, style)?;
        }
        Commands::Run {
            script,
            boundaries,
            csv,
            json,
        } => {
            let mut store = new_store(boundaries.as_deref())?;
            let file = std::fs::File::open(&script)?;
            info!(script = %script, "Running command script");
            let mut stdout = io::stdout().lock();
            run_lines(&mut store, BufReader::new(file), &mut stdout, Mode::Script, style)?;
            finish(&store, &mut stdout, csv.as_deref(), json, style)?;
        }
        Commands::Scale { boundaries } => {
            let table = GradingConfig::resolve(boundaries.as_deref())?;
            print!("{}", render::scale_legend(&table.scale()));
        }
    }

    Ok(())
}

/// Default stderr filter. The console already echoes every action on stdout,
/// so it only surfaces problems there.
fn stderr_level(command: &Commands) -> &'static str {
    match command {
        Commands::Session { .. } => "warn",
        _ => "info",
    }
}

fn new_store(boundaries: Option<&str>) -> Result<SessionStore> {
    let table = GradingConfig::resolve(boundaries)?;
    Ok(SessionStore::new(GradingPolicy::new(table)))
}
