//! pagegraph CLI
//!
//! Replays primitive logs and inspects snapshot checkpoints

use clap::{Parser, Subcommand, ValueEnum};
use pagegraph_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "pagegraph")]
#[command(about = "pagegraph - entity-graph reducer tools", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Dev)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Dev,
    Json,
}

impl From<LogFormat> for Profile {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Dev => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reduce a JSONL primitive log into a snapshot
    Replay(commands::replay::ReplayArgs),
    /// Validate the invariants of a snapshot checkpoint
    Check(commands::check::CheckArgs),
    /// Print the digest of a snapshot checkpoint
    Digest(commands::digest::DigestArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_format.into());

    let result = match cli.command {
        Commands::Replay(args) => commands::replay::execute(args),
        Commands::Check(args) => commands::check::execute(args),
        Commands::Digest(args) => commands::digest::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
