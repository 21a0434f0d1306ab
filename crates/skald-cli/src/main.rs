mod cmd_import;
mod cmd_init;
mod cmd_log;
mod cmd_status;
mod cmd_watch;

use clap::{Parser, Subcommand};
use skald_log::SkaldPaths;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "skald",
    version,
    about = "Chronicle AI-assistant chat activity into a durable log"
)]
struct Cli {
    /// Base directory for the log and config (defaults to ./.skald)
    #[arg(long, global = true)]
    base: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the log directory and file (idempotent)
    Init,
    /// Import previously persisted chat sessions into the log
    Import,
    /// Watch a path for live assistant interactions
    Watch {
        /// File or directory to watch (defaults to the current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the oldest entries of the activity log
    Log {
        /// Maximum number of lines to show
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Show resolved paths and configuration
    Status,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let base = cli.base.unwrap_or_else(SkaldPaths::default_base);

    match cli.cmd {
        Command::Init => cmd_init::execute(&base),
        Command::Import => cmd_import::execute(&base),
        Command::Watch { path } => {
            let watch_path = match path {
                Some(p) => p,
                None => std::env::current_dir()?,
            };
            cmd_watch::execute(&base, &watch_path)
        }
        Command::Log { limit } => cmd_log::execute(&base, limit),
        Command::Status => cmd_status::execute(&base),
    }
}
