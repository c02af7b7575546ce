//! Seed-completion counter and its console rendering.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::CancelToken;

/// Shared count of seeds whose simulation has concluded.
///
/// Updates use relaxed ordering; readers only ever see an approximation
/// for display.
#[derive(Debug, Clone, Default)]
pub struct ProgressCounter(Arc<AtomicU64>);

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

const REFRESH: Duration = Duration::from_millis(200);

/// Poll `counter` into an indicatif bar until `stop` is cancelled.
pub fn spawn_progress_bar(counter: ProgressCounter, total: u64, stop: CancelToken) -> JoinHandle<()> {
    thread::spawn(move || {
        let bar = ProgressBar::new(total);
        let style = ProgressStyle::with_template(
            "{elapsed_precise} [{bar:40}] {pos}/{len} ({percent}%) eta {eta}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
        bar.set_style(style);
        while !stop.is_cancelled() {
            bar.set_position(counter.get());
            thread::sleep(REFRESH);
        }
        bar.set_position(counter.get());
        bar.finish();
    })
}
