//! Parallel sweep that turns a seed range into a [`SeedDatabase`].
//!
//! Every seed is simulated independently: build a generator, burn the
//! warm-up steps, then draw identifier pairs until the target appears or
//! the timeout is reached. Workers fold hits into private tables which are
//! merged once the sweep joins, so the hot path never takes a lock.
//!
//! Cancellation is cooperative. The token ends the parallel iteration, so
//! no further seeds are handed out, and is also checked on every draw; a seed interrupted mid-simulation leaves no entry, while
//! entries already folded into a worker table are kept.

use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{
    extract_id, BuildConfig, BuildStats, IdGenerator, IdPair, ProgressCounter, SeedDatabase,
    TidSearchError, TinyMt,
};

/// Generator steps consumed before the first identifier draw.
///
/// The origin of these 14 advances is not fully understood; the value is
/// matched to the convention of the external TID search tools so tables
/// stay interchangeable.
pub const WARMUP_ADVANCES: usize = 14;

/// Cooperative cancellation flag shared between the builder and its caller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// How a single seed's simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Target seen after this many non-matching draws.
    Accepted(u32),
    /// No match before the timeout.
    Rejected,
    /// Cancellation observed mid-simulation.
    Abandoned,
}

/// Run the per-seed search on an already seeded generator.
pub fn simulate_seed<G: IdGenerator>(
    rng: &mut G,
    target: IdPair,
    timeout: u32,
    cancel: &CancelToken,
) -> SeedOutcome {
    for _ in 0..WARMUP_ADVANCES {
        if cancel.is_cancelled() {
            return SeedOutcome::Abandoned;
        }
        rng.advance();
    }

    let mut count = 0u32;
    loop {
        if cancel.is_cancelled() {
            return SeedOutcome::Abandoned;
        }
        if count == timeout {
            return SeedOutcome::Rejected;
        }
        if extract_id(rng.next_output()) == target {
            return SeedOutcome::Accepted(count);
        }
        count += 1;
    }
}

/// Result of a sweep, complete or cancelled.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub database: SeedDatabase,
    pub stats: BuildStats,
    pub cancelled: bool,
}

pub struct DatabaseBuilder {
    config: BuildConfig,
    cancel: CancelToken,
    progress: ProgressCounter,
}

impl DatabaseBuilder {
    /// Validate `config` and prepare a builder. Nothing runs until `build`.
    pub fn new(config: BuildConfig) -> Result<Self, TidSearchError> {
        config.validate()?;
        Ok(Self {
            config,
            cancel: CancelToken::new(),
            progress: ProgressCounter::new(),
        })
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Number of seeds the sweep covers.
    pub fn seed_count(&self) -> u64 {
        self.config.seed_count()
    }

    /// Handle that stops the sweep when cancelled.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Handle to the concluded-seed counter.
    pub fn progress(&self) -> ProgressCounter {
        self.progress.clone()
    }

    /// Sweep the configured range with TinyMT.
    pub fn build(&self) -> Result<BuildOutput, TidSearchError> {
        self.build_with(TinyMt::new)
    }

    /// Sweep the configured range, seeding generators through `make`.
    pub fn build_with<G, F>(&self, make: F) -> Result<BuildOutput, TidSearchError>
    where
        G: IdGenerator,
        F: Fn(u32) -> G + Sync + Send,
    {
        let cfg = &self.config;
        tracing::info!(
            pair = %cfg.target,
            timeout = cfg.timeout,
            start = cfg.start,
            end = cfg.end,
            "starting sweep"
        );

        let (database, stats) = if cfg.threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(cfg.threads)
                .build()?;
            pool.install(|| self.sweep(&make))
        } else {
            self.sweep(&make)
        };

        let cancelled = self.cancel.is_cancelled();
        if cancelled {
            tracing::warn!(entries = database.len(), "sweep cancelled, keeping partial table");
        }
        stats.report();
        Ok(BuildOutput {
            database,
            stats,
            cancelled,
        })
    }

    fn sweep<G, F>(&self, make: &F) -> (SeedDatabase, BuildStats)
    where
        G: IdGenerator,
        F: Fn(u32) -> G + Sync + Send,
    {
        let BuildConfig {
            target,
            timeout,
            start,
            end,
            ..
        } = self.config;
        let empty = || (SeedDatabase::new(target, timeout), BuildStats::default());

        // Once cancelled, workers stop pulling seeds instead of draining the range.
        (start..=end)
            .into_par_iter()
            .take_any_while(|_| !self.cancel.is_cancelled())
            .fold(empty, |(mut db, mut stats), seed| {
                let mut rng = make(seed);
                match simulate_seed(&mut rng, target, timeout, &self.cancel) {
                    SeedOutcome::Accepted(count) => {
                        db.insert(seed, count);
                        stats.accepted += 1;
                    }
                    SeedOutcome::Rejected => stats.rejected += 1,
                    SeedOutcome::Abandoned => stats.abandoned += 1,
                }
                self.progress.tick();
                (db, stats)
            })
            .reduce(empty, |(mut a, sa), (b, sb)| {
                a.merge(b);
                (a, sa + sb)
            })
    }
}
