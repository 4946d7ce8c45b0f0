//! Replay - fold `reduce` over an ordered primitive log
//!
//! This is the rebuild path for a persistence layer: start from an empty
//! snapshot or a checkpoint and re-apply the log in order. Rejections are
//! recorded and skipped, exactly as they were when the log was first
//! reduced, so the same log always lands on the same snapshot.

use serde_json::Value;

use crate::primitive::{Primitive, Signal};
use crate::reduce::{reduce, reduce_value, Outcome, Reduction};
use crate::snapshot::Snapshot;

/// Result of replaying a sequence of primitives
#[derive(Debug, Clone)]
pub struct Replay {
    pub snapshot: Snapshot,
    /// One outcome per input, in input order
    pub outcomes: Vec<Outcome>,
    /// Signals in the order they were seen
    pub signals: Vec<Signal>,
}

impl Replay {
    fn starting_at(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            outcomes: Vec::new(),
            signals: Vec::new(),
        }
    }

    fn absorb(&mut self, reduction: Reduction) {
        self.snapshot = reduction.snapshot;
        self.outcomes.push(reduction.outcome);
        self.signals.extend(reduction.signal);
    }

    pub fn accepted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_accepted()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes.len() - self.accepted_count()
    }
}

/// Reduce each primitive in order, starting from `start`
pub fn replay<'a, I>(start: Snapshot, primitives: I) -> Replay
where
    I: IntoIterator<Item = &'a Primitive>,
{
    let mut result = Replay::starting_at(start);
    for primitive in primitives {
        let snapshot = std::mem::take(&mut result.snapshot);
        result.absorb(reduce(snapshot, primitive));
    }
    result
}

/// Reduce each raw JSON record in order, starting from `start`
///
/// Records that do not parse are recorded as `malformed-operation`
/// rejections.
pub fn replay_values<'a, I>(start: Snapshot, records: I) -> Replay
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut result = Replay::starting_at(start);
    for record in records {
        let snapshot = std::mem::take(&mut result.snapshot);
        result.absorb(reduce_value(snapshot, record));
    }
    result
}
