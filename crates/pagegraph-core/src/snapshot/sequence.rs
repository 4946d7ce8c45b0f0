//! Sequencer - the monotonic audit stamp
//!
//! Every mutating primitive advances the counter exactly once and stamps
//! the touched records with the new value. Signals and no-op writes leave
//! it alone.

use serde::{Deserialize, Serialize};

/// Monotonic sequence counter carried by each snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Sequence(u64);

impl Sequence {
    /// Start a fresh counter at zero (no writes yet)
    pub fn new() -> Self {
        Self(0)
    }

    /// The stamp of the most recent write
    pub fn current(&self) -> u64 {
        self.0
    }

    /// Advance and return the new stamp
    pub(crate) fn advance(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_is_strictly_increasing() {
        let mut seq = Sequence::new();
        assert_eq!(seq.current(), 0);
        assert_eq!(seq.advance(), 1);
        assert_eq!(seq.advance(), 2);
        assert_eq!(seq.current(), 2);
    }
}
