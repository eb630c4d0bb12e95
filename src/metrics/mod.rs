//! Metrics collection.
//!
//! This module provides:
//! - Cache hit/miss counters
//! - Pruned-thought counters
//! - A running average of processing latency
//! - A latency [`Timer`]
//!
//! # Example
//!
//! ```
//! use thought_search::metrics::EngineMetrics;
//!
//! let metrics = EngineMetrics::new();
//! metrics.record_thought();
//! metrics.record_hit();
//! metrics.record_processing_time(12);
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.total_thoughts, 1);
//! assert_eq!(snapshot.cache_hits, 1);
//! assert!((snapshot.hit_rate - 1.0).abs() < f64::EPSILON);
//! ```

// Allow intentional numeric casts for running-average calculations
#![allow(clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use std::time::Instant;

/// Internal counter state guarded by the lock.
#[derive(Debug, Default, Clone)]
struct Counters {
    cache_hits: u64,
    cache_misses: u64,
    total_thoughts: u64,
    pruned_thoughts: u64,
    avg_processing_ms: f64,
}

/// Point-in-time view of engine metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricsSnapshot {
    /// Number of optimize calls answered from cache.
    pub cache_hits: u64,
    /// Number of optimize calls that computed a fresh result.
    pub cache_misses: u64,
    /// Total optimize calls observed.
    pub total_thoughts: u64,
    /// Total branches removed by pruning.
    pub pruned_thoughts: u64,
    /// Running average processing time in milliseconds.
    pub avg_processing_ms: f64,
    /// Fraction of calls answered from cache (0.0-1.0).
    pub hit_rate: f64,
    /// Pruned branches per optimize call.
    pub prune_rate: f64,
    /// Current cache entry count (filled in by the cache).
    pub cache_size: usize,
}

/// Thread-safe metrics counters shared by the cache and pruning paths.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    counters: RwLock<Counters>,
}

impl EngineMetrics {
    /// Create a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start of an optimize call.
    pub fn record_thought(&self) {
        self.with_write(|c| c.total_thoughts += 1);
    }

    /// Record a cache hit.
    pub fn record_hit(&self) {
        self.with_write(|c| c.cache_hits += 1);
    }

    /// Record a cache miss.
    pub fn record_miss(&self) {
        self.with_write(|c| c.cache_misses += 1);
    }

    /// Record branches removed by pruning.
    pub fn record_pruned(&self, count: u64) {
        self.with_write(|c| c.pruned_thoughts += count);
    }

    /// Fold a latency sample into the running average.
    ///
    /// Uses `avg = (avg * (n - 1) + sample) / n` where `n` is the number of
    /// thoughts recorded so far; a sample recorded before any thought is
    /// treated as the first.
    pub fn record_processing_time(&self, elapsed_ms: u64) {
        self.with_write(|c| {
            let n = c.total_thoughts.max(1) as f64;
            c.avg_processing_ms = (c.avg_processing_ms * (n - 1.0) + elapsed_ms as f64) / n;
        });
    }

    /// Get a point-in-time snapshot.
    ///
    /// `cache_size` is zero here; [`ThoughtCache::stats`] fills it in.
    ///
    /// [`ThoughtCache::stats`]: crate::cache::ThoughtCache::stats
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let counters = match self.counters.read() {
            Ok(c) => c.clone(),
            Err(poison_error) => {
                tracing::warn!(
                    error = %poison_error,
                    "Reading metrics from poisoned lock, using recovered data"
                );
                poison_error.into_inner().clone()
            }
        };

        let total = counters.total_thoughts;
        let hit_rate = if total > 0 {
            counters.cache_hits as f64 / total as f64
        } else {
            0.0
        };
        let prune_rate = if total > 0 {
            counters.pruned_thoughts as f64 / total as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            cache_hits: counters.cache_hits,
            cache_misses: counters.cache_misses,
            total_thoughts: counters.total_thoughts,
            pruned_thoughts: counters.pruned_thoughts,
            avg_processing_ms: counters.avg_processing_ms,
            hit_rate,
            prune_rate,
            cache_size: 0,
        }
    }

    /// Reset all counters.
    pub fn clear(&self) {
        self.with_write(|c| *c = Counters::default());
    }

    fn with_write(&self, f: impl FnOnce(&mut Counters)) {
        match self.counters.write() {
            Ok(mut counters) => f(&mut counters),
            Err(poison_error) => {
                tracing::error!(
                    error = %poison_error,
                    "Failed to update metrics: RwLock poisoned"
                );
            }
        }
    }
}

/// Timer for measuring operation latency.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time in milliseconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::start()
    }
}
