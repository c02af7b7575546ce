//! Nearest-seed queries against a loaded table.
//!
//! The query window starts at the reference seed and runs forward through
//! the whole seed space, wrapping once: offset `d` in `0..2^32` names the
//! candidate `(base + d) mod 2^32`. Offsets are held in a `u64` so the
//! window end never overflows.
//!
//! Rather than probing all four billion candidates, the searcher keeps the
//! in-range seeds in an ordered set and walks `base..` followed by `..base`.
//! That visits exactly the table members the forward scan would, in the
//! same order, so results come out sorted by distance without a sort pass.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::{init_state_vector, SearchConfig, SeedDatabase, StateVector, TidSearchError};

/// Number of distinct seeds; one past the largest scan offset.
pub const SEED_SPACE: u64 = 1 << 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    /// Forward offset from the reference seed.
    pub distance: u64,
    pub seed: u32,
    pub state: StateVector,
}

/// Forward offset of `candidate` within the window starting at `base`.
pub fn scan_offset(base: u32, candidate: u32) -> u64 {
    let base = u64::from(base);
    let candidate = u64::from(candidate);
    if candidate >= base {
        candidate - base
    } else {
        candidate + SEED_SPACE - base
    }
}

/// Ordered view of the seeds whose advance falls in `[min, max]`.
pub struct ProximitySearcher {
    seeds: BTreeSet<u32>,
}

impl ProximitySearcher {
    pub fn new(db: &SeedDatabase, min_advance: u32, max_advance: u32) -> Result<Self, TidSearchError> {
        if max_advance < min_advance {
            return Err(TidSearchError::InvalidRange {
                what: "advance",
                lower: min_advance,
                upper: max_advance,
            });
        }
        let seeds = db
            .iter()
            .filter(|&(_, advance)| (min_advance..=max_advance).contains(&advance))
            .map(|(seed, _)| seed)
            .collect();
        Ok(Self { seeds })
    }

    /// Number of seeds eligible for any query.
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Up to `limit` eligible seeds nearest to `base_seed`, nearest first.
    pub fn nearest(&self, base_seed: u32, limit: usize) -> Vec<QueryResult> {
        if limit == 0 {
            return Vec::new();
        }
        self.seeds
            .range(base_seed..)
            .chain(self.seeds.range(..base_seed))
            .take(limit)
            .map(|&seed| QueryResult {
                distance: scan_offset(base_seed, seed),
                seed,
                state: init_state_vector(seed),
            })
            .collect()
    }
}

/// Run one query described by `config` against `db`.
pub fn search(db: &SeedDatabase, config: &SearchConfig) -> Result<Vec<QueryResult>, TidSearchError> {
    config.validate()?;
    if config.limit == 0 {
        return Ok(Vec::new());
    }
    let searcher = ProximitySearcher::new(db, config.min_advance, config.max_advance)?;
    let results = searcher.nearest(config.base_seed, config.limit);
    tracing::debug!(
        base = config.base_seed,
        eligible = searcher.len(),
        found = results.len(),
        "proximity search done"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IdPair;

    #[test]
    fn offsets_wrap_forward() {
        assert_eq!(scan_offset(10, 10), 0);
        assert_eq!(scan_offset(10, 15), 5);
        assert_eq!(scan_offset(10, 9), SEED_SPACE - 1);
        assert_eq!(scan_offset(u32::MAX, 0), 1);
        assert_eq!(scan_offset(0, u32::MAX), SEED_SPACE - 1);
    }

    #[test]
    fn wrapped_candidates_come_last() {
        let db = SeedDatabase::from_entries(
            IdPair::default(),
            100,
            [(0xFFFF_FFF0, 1), (0x0000_0005, 1), (0x8000_0000, 1)],
        );
        let searcher = ProximitySearcher::new(&db, 0, 100).unwrap();
        let got: Vec<(u64, u32)> = searcher
            .nearest(0xFFFF_FF00, 10)
            .into_iter()
            .map(|r| (r.distance, r.seed))
            .collect();
        assert_eq!(
            got,
            vec![
                (0xF0, 0xFFFF_FFF0),
                (0x105, 0x0000_0005),
                (0x8000_0100, 0x8000_0000),
            ]
        );
    }

    #[test]
    fn zero_limit_is_empty() {
        let db = SeedDatabase::from_entries(IdPair::default(), 10, [(1, 1)]);
        let cfg = SearchConfig {
            base_seed: 0,
            min_advance: 0,
            max_advance: 10,
            limit: 0,
        };
        assert!(search(&db, &cfg).unwrap().is_empty());
    }
}
