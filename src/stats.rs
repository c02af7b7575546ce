//! `BuildStats` tallies how each seed of a sweep concluded. The counters are
//! collected per worker and summed after the join, the same way the table
//! itself is merged.

use serde::Serialize;
use std::ops::Add;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub accepted: u64,
    pub rejected: u64,
    pub abandoned: u64,
}

impl BuildStats {
    pub fn concluded(&self) -> u64 {
        self.accepted + self.rejected + self.abandoned
    }

    pub fn report(&self) {
        tracing::info!(
            accepted = self.accepted,
            rejected = self.rejected,
            abandoned = self.abandoned,
            "sweep finished"
        );
    }
}

impl Add for BuildStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            accepted: self.accepted + rhs.accepted,
            rejected: self.rejected + rhs.rejected,
            abandoned: self.abandoned + rhs.abandoned,
        }
    }
}
