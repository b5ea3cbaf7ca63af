use clap::Parser;
use eyre::Result;
use std::io;
use std::path::PathBuf;
use tasktrack::{Config, Console, TaskStore};
use tracing::{Level, info};

#[derive(Parser)]
#[command(name = "tasktrack")]
#[command(about = "TaskTrack - Interactive personal task tracking with CSV export")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/tasktrack/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for CSV exports, overrides the config file
    #[arg(short, long)]
    export_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing; stdout belongs to the menu
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let mut config = Config::discover(cli.config.as_deref())?;
    if let Some(dir) = cli.export_dir {
        config.export_dir = dir;
    }
    if cli.no_color {
        config.color = false;
    }

    let stdin = io::stdin();
    let mut console = Console::new(TaskStore::new(), config, stdin.lock(), io::stdout());
    console.run()?;

    info!(tasks = console.store().len(), "Session ended");
    Ok(())
}
