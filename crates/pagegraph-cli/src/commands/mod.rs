//! CLI command implementations

pub mod check;
pub mod digest;
pub mod replay;

use pagegraph_core::rules::validation::validate_snapshot;
use pagegraph_core::{Rejection, Snapshot};
use std::path::Path;

/// Load a snapshot checkpoint written by `replay --checkpoint`
pub fn read_snapshot(path: &Path) -> Result<Snapshot, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read snapshot {}: {}", path.display(), e))?;
    let snapshot = serde_json::from_str(&raw)
        .map_err(|e| format!("invalid snapshot {}: {}", path.display(), e))?;
    Ok(snapshot)
}

/// Run every structural check; a failure carries its `ERR_*` code
pub fn ensure_valid(snapshot: &Snapshot) -> Result<(), Box<dyn std::error::Error>> {
    validate_snapshot(snapshot).map_err(|err| {
        let rejection = Rejection::from(err);
        Box::<dyn std::error::Error>::from(format!("{} {}", rejection.code(), rejection.message()))
    })
}
