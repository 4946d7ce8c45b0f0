//! Replay command
//!
//! Usage: pagegraph replay <LOG> [--from <SNAPSHOT>] [--checkpoint <OUT>]
//!
//! A `--from` checkpoint must pass every structural check before any
//! primitive is applied. Each non-blank line of the log is one primitive.
//! Stdout gets one JSON outcome line per primitive followed by a summary
//! line carrying the final digest.

use clap::Args;
use pagegraph_core::snapshot::digest::compute_snapshot_digest;
use pagegraph_core::{
    log_op_end, log_op_start, reduce_value, Outcome, PageGraphError, Reduction, Rejection,
    Snapshot,
};
use pagegraph_core_types::correlation::RunContext;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Path to a JSONL primitive log
    pub log: PathBuf,

    /// Start from this snapshot checkpoint instead of an empty snapshot
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Write the final snapshot here
    #[arg(long)]
    pub checkpoint: Option<PathBuf>,
}

/// Execute replay command
pub fn execute(args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RunContext::new().with_source(args.log.display().to_string());
    let start = Instant::now();
    log_op_start!("cli.replay", run_id = %ctx.run_id, source = ctx.source.as_deref());

    let mut snapshot = match &args.from {
        Some(path) => {
            let checkpoint = super::read_snapshot(path)?;
            super::ensure_valid(&checkpoint)
                .map_err(|e| format!("checkpoint {} is invalid: {}", path.display(), e))?;
            checkpoint
        }
        None => Snapshot::new(),
    };

    let log = std::fs::read_to_string(&args.log)
        .map_err(|e| format!("cannot read log {}: {}", args.log.display(), e))?;

    let mut accepted = 0u64;
    let mut rejected = 0u64;
    for (index, line) in log.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let reduction = reduce_line(snapshot, line);
        if reduction.is_accepted() {
            accepted += 1;
        } else {
            rejected += 1;
        }
        println!("{}", outcome_line(index + 1, line, &reduction));
        snapshot = reduction.snapshot;
    }

    let digest = compute_snapshot_digest(&snapshot)?;
    if let Some(path) = &args.checkpoint {
        std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)
            .map_err(|e| format!("cannot write checkpoint {}: {}", path.display(), e))?;
    }

    println!(
        "{}",
        json!({
            "run_id": ctx.run_id.as_str(),
            "accepted": accepted,
            "rejected": rejected,
            "sequence": snapshot.sequence(),
            "digest": digest,
        })
    );

    log_op_end!(
        "cli.replay",
        duration_ms = start.elapsed().as_millis() as u64,
        run_id = %ctx.run_id,
        accepted,
        rejected
    );
    Ok(())
}

/// Reduce one log line; text that is not JSON is a malformed primitive
fn reduce_line(snapshot: Snapshot, line: &str) -> Reduction {
    match serde_json::from_str::<Value>(line) {
        Ok(record) => reduce_value(snapshot, &record),
        Err(e) => {
            let err = PageGraphError::MalformedOperation {
                reason: format!("line is not JSON: {}", e),
            };
            Reduction {
                snapshot,
                outcome: Outcome::Rejected {
                    rejection: Rejection::from(err),
                },
                signal: None,
            }
        }
    }
}

fn outcome_line(line_no: usize, line: &str, reduction: &Reduction) -> Value {
    let op = serde_json::from_str::<Value>(line)
        .ok()
        .and_then(|v| v.get("op").and_then(Value::as_str).map(str::to_string));

    let mut out = json!({ "line": line_no, "op": op });
    match &reduction.outcome {
        Outcome::Accepted { warnings } => {
            out["status"] = json!("accepted");
            if !warnings.is_empty() {
                out["warnings"] = json!(warnings);
            }
        }
        Outcome::Rejected { rejection } => {
            out["status"] = json!("rejected");
            out["code"] = json!(rejection.code());
            out["rejection"] = json!(rejection);
        }
    }
    if let Some(signal) = &reduction.signal {
        out["signal"] = json!(signal);
    }
    out
}
