//! Check command
//!
//! Usage: pagegraph check <SNAPSHOT>

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Path to a snapshot checkpoint
    pub snapshot: PathBuf,
}

/// Execute check command
pub fn execute(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = super::read_snapshot(&args.snapshot)?;
    super::ensure_valid(&snapshot)?;

    println!("Snapshot valid:");
    println!("  entities: {}", snapshot.entities().len());
    println!("  relationships: {}", snapshot.relationships().len());
    println!("  sequence: {}", snapshot.sequence());
    Ok(())
}
