//! Digest command
//!
//! Usage: pagegraph digest <SNAPSHOT> [--tree]

use clap::Args;
use pagegraph_core::snapshot::digest::{compute_snapshot_digest, compute_tree_digest};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DigestArgs {
    /// Path to a snapshot checkpoint
    pub snapshot: PathBuf,

    /// Hash only the entity tree and root order
    #[arg(long)]
    pub tree: bool,
}

/// Execute digest command
pub fn execute(args: DigestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = super::read_snapshot(&args.snapshot)?;
    let digest = if args.tree {
        compute_tree_digest(&snapshot)?
    } else {
        compute_snapshot_digest(&snapshot)?
    };
    println!("{}", digest);
    Ok(())
}
