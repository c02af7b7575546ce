use crate::{IdPair, TidSearchError};

/// Parameters for one table build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Identifier pair the sweep is looking for.
    pub target: IdPair,
    /// Exclusive upper bound on recorded advance counts.
    pub timeout: u32,
    /// First seed of the inclusive sweep range.
    pub start: u32,
    /// Last seed of the inclusive sweep range.
    pub end: u32,
    /// Worker thread count, `0` uses the global rayon pool.
    pub threads: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            target: IdPair::default(),
            timeout: 0,
            start: 0,
            end: u32::MAX,
            threads: 0,
        }
    }
}

impl BuildConfig {
    pub fn validate(&self) -> Result<(), TidSearchError> {
        if self.end < self.start {
            return Err(TidSearchError::InvalidRange {
                what: "seed",
                lower: self.start,
                upper: self.end,
            });
        }
        Ok(())
    }

    /// Number of seeds in the sweep.
    pub fn seed_count(&self) -> u64 {
        (self.end as u64).saturating_sub(self.start as u64) + 1
    }
}

/// Parameters for one proximity query.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub base_seed: u32,
    pub min_advance: u32,
    pub max_advance: u32,
    /// Maximum number of results. Zero is valid and yields nothing.
    pub limit: usize,
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), TidSearchError> {
        if self.max_advance < self.min_advance {
            return Err(TidSearchError::InvalidRange {
                what: "advance",
                lower: self.min_advance,
                upper: self.max_advance,
            });
        }
        Ok(())
    }
}
