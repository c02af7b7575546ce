use serde::{Deserialize, Serialize};
use std::fmt;

/// Trainer identifier pair: `low` is the TID, `high` the SID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IdPair {
    pub low: u16,
    pub high: u16,
}

impl IdPair {
    pub fn new(low: u16, high: u16) -> Self {
        Self { low, high }
    }
}

impl fmt::Display for IdPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Split a generator output into its identifier halves.
pub fn extract_id(output: u32) -> IdPair {
    IdPair {
        low: (output & 0xFFFF) as u16,
        high: (output >> 16) as u16,
    }
}
