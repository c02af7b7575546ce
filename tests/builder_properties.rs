use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use tidsearch::{BuildConfig, DatabaseBuilder, IdGenerator, IdPair, SeedDatabase, TinyMt};

/// TinyMT with outputs squeezed into a 4x4 identifier space so a short
/// sweep produces plenty of hits.
struct Narrow(TinyMt);

impl IdGenerator for Narrow {
    fn advance(&mut self) {
        self.0.advance();
    }

    fn next_output(&mut self) -> u32 {
        self.0.next_output() & 0x0003_0003
    }
}

fn narrow(seed: u32) -> Narrow {
    Narrow(TinyMt::new(seed))
}

const NARROW_TARGET: IdPair = IdPair { low: 1, high: 2 };

fn config(target: IdPair, timeout: u32, start: u32, end: u32) -> BuildConfig {
    BuildConfig {
        target,
        timeout,
        start,
        end,
        threads: 4,
    }
}

fn build_narrow(timeout: u32, start: u32, end: u32) -> SeedDatabase {
    DatabaseBuilder::new(config(NARROW_TARGET, timeout, start, end))
        .unwrap()
        .build_with(narrow)
        .unwrap()
        .database
}

fn entry_set(db: &SeedDatabase) -> HashSet<(u32, u32)> {
    db.iter().collect()
}

#[test]
fn seed_zero_reference_trace() {
    // After the warm-up, seed 0 draws 0xFA6BCD8A then 0x06A4ECEC.
    let run = |target: IdPair, timeout: u32| {
        DatabaseBuilder::new(config(target, timeout, 0, 0))
            .unwrap()
            .build()
            .unwrap()
            .database
    };

    assert!(run(IdPair::new(0, 0), 1).is_empty());
    assert_eq!(run(IdPair::new(52618, 64107), 1).get(0), Some(0));
    assert!(run(IdPair::new(60652, 1700), 1).is_empty());
    assert_eq!(run(IdPair::new(60652, 1700), 2).get(0), Some(1));
    assert!(run(IdPair::new(52618, 64107), 0).is_empty());
}

#[test]
fn finds_known_seed_in_small_window() {
    let out = DatabaseBuilder::new(config(IdPair::new(19531, 64364), 3030, 0xB281_A4E0, 0xB281_A4FF))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(out.database.sorted_entries(), vec![(0xB281_A4EE, 2)]);
    assert_eq!(out.stats.accepted, 1);
    assert_eq!(out.stats.rejected, 31);
    assert_eq!(out.database.target(), IdPair::new(19531, 64364));
    assert_eq!(out.database.timeout(), 3030);
}

#[test]
fn split_ranges_match_whole_range() {
    let whole = build_narrow(6, 1_000, 4_999);
    let mut left = build_narrow(6, 1_000, 2_716);
    let right = build_narrow(6, 2_717, 4_999);
    assert!(!whole.is_empty());
    left.merge(right);
    assert_eq!(entry_set(&whole), entry_set(&left));
}

#[test]
fn thread_count_does_not_change_result() {
    let single = DatabaseBuilder::new(BuildConfig {
        threads: 1,
        ..config(NARROW_TARGET, 5, 0, 2_000)
    })
    .unwrap()
    .build_with(narrow)
    .unwrap()
    .database;
    let pooled = build_narrow(5, 0, 2_000);
    assert_eq!(single, pooled);
}

#[test]
fn recorded_advances_stay_below_timeout() {
    for timeout in [1u32, 2, 7, 20] {
        let db = build_narrow(timeout, 0, 3_000);
        assert!(db.iter().all(|(_, advance)| advance < timeout));
    }
}

#[test]
fn range_at_top_of_seed_space() {
    let out = DatabaseBuilder::new(config(NARROW_TARGET, 4, u32::MAX - 99, u32::MAX))
        .unwrap()
        .build_with(narrow)
        .unwrap();
    assert_eq!(out.stats.concluded(), 100);
    assert!(out.database.iter().all(|(seed, _)| seed >= u32::MAX - 99));
}

#[test]
fn cancelled_build_is_subset_of_full_build() {
    let full = build_narrow(6, 0, 19_999);

    let builder = DatabaseBuilder::new(config(NARROW_TARGET, 6, 0, 19_999)).unwrap();
    let token = builder.cancel_token();
    let started = AtomicU64::new(0);
    let out = builder
        .build_with(|seed| {
            if started.fetch_add(1, Ordering::Relaxed) == 2_500 {
                token.cancel();
            }
            narrow(seed)
        })
        .unwrap();

    assert!(out.cancelled);
    assert!(out.stats.concluded() < 20_000);
    assert_eq!(builder.progress().get(), out.stats.concluded());
    let partial = entry_set(&out.database);
    assert!(partial.len() < full.len());
    assert!(partial.is_subset(&entry_set(&full)));
}

#[test]
fn inverted_range_is_rejected() {
    assert!(DatabaseBuilder::new(config(NARROW_TARGET, 6, 10, 9)).is_err());
}
