//! Seed tables for TinyMT trainer-ID searches.
//!
//! A table maps every seed in a swept range whose generator produces the
//! target TID/SID pair within a bounded number of draws to that draw count.
//! Tables are built once in parallel and then queried for the seeds closest
//! to a seed observed at runtime.

pub mod builder;
pub mod config;
pub mod database;
pub mod error;
pub mod id;
pub mod io_utils;
pub mod progress;
pub mod report;
pub mod rng;
pub mod search;
pub mod state;
pub mod stats;

pub use builder::{
    simulate_seed, BuildOutput, CancelToken, DatabaseBuilder, SeedOutcome, WARMUP_ADVANCES,
};
pub use config::{BuildConfig, SearchConfig};
pub use database::{SeedDatabase, TABLE_EXTENSION};
pub use error::TidSearchError;
pub use id::{extract_id, IdPair};
pub use progress::{spawn_progress_bar, ProgressCounter};
pub use rng::{IdGenerator, TinyMt};
pub use search::{scan_offset, search, ProximitySearcher, QueryResult, SEED_SPACE};
pub use state::{format_state_vector, init_state_vector, StateVector};
pub use stats::BuildStats;
