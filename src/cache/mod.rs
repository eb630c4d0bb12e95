//! Memoization cache for reasoning functions.
//!
//! [`ThoughtCache`] wraps any reasoning function with an LRU cache keyed by
//! a normalized content hash of the query plus its options. A hit returns
//! the stored value without invoking the function; a miss computes, stores
//! (evicting the least-recently-used entry at capacity), and returns.
//!
//! Two eviction mechanisms coexist: LRU at capacity on insert, and an
//! explicit TTL sweep via [`ThoughtCache::clear_old_cache`]. Hits do not
//! check entry age; stale entries survive until a sweep removes them.
//!
//! # Example
//!
//! ```
//! use thought_search::cache::{CacheOptions, ThoughtCache};
//! use thought_search::config::CacheConfig;
//!
//! let cache: ThoughtCache<u64> = ThoughtCache::new(CacheConfig::default());
//! let options = CacheOptions::new();
//!
//! let first = cache.optimize(|q| q.len() as u64, "agregar templo", &options);
//! let second = cache.optimize(|q| q.len() as u64, "agregar templo", &options);
//! assert!(!first.from_cache);
//! assert!(second.from_cache);
//! assert_eq!(first.value, second.value);
//! ```

pub mod store;

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use lru::LruCache;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{CacheConfig, DEFAULT_EARLY_STOP_THRESHOLD};
use crate::error::CacheError;
use crate::metrics::{EngineMetrics, MetricsSnapshot, Timer};
use crate::search::SearchResult;
use store::CacheStore;

/// Namespace used by [`ThoughtCache::persist`] and [`ThoughtCache::restore`].
const STORE_NAMESPACE: &str = "thought_optimizer";

/// Free-form options that become part of the cache key.
///
/// A `BTreeMap` keeps serialization order stable, so equal option maps
/// always produce equal keys.
pub type CacheOptions = BTreeMap<String, serde_json::Value>;

/// Values that expose a comparable quality score, used for early stopping.
pub trait Scored {
    /// The value's quality score.
    fn score(&self) -> f64;
}

impl Scored for SearchResult {
    fn score(&self) -> f64 {
        self.confidence
    }
}

impl<T: Scored> Scored for Cached<T> {
    fn score(&self) -> f64 {
        self.value.score()
    }
}

/// A stored cache entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached value.
    pub result: T,
    /// Insertion time as epoch milliseconds.
    pub timestamp_ms: u64,
}

/// Result of an [`optimize`](ThoughtCache::optimize) call.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    /// The computed or remembered value.
    pub value: T,
    /// Whether the value came from the cache.
    pub from_cache: bool,
    /// Wall-clock time spent in this call, in milliseconds.
    pub processing_time_ms: u64,
}

/// LRU + TTL memoization cache with shared metrics.
#[derive(Debug)]
pub struct ThoughtCache<T: Clone> {
    entries: Mutex<LruCache<String, CacheEntry<T>>>,
    metrics: Arc<EngineMetrics>,
    config: CacheConfig,
    early_stop_threshold: f64,
}

impl<T: Clone> ThoughtCache<T> {
    /// Create a cache with its own metrics collector.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self::with_metrics(config, Arc::new(EngineMetrics::new()))
    }

    /// Create a cache sharing an existing metrics collector.
    #[must_use]
    pub fn with_metrics(config: CacheConfig, metrics: Arc<EngineMetrics>) -> Self {
        let capacity = NonZeroUsize::new(config.max_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            metrics,
            config,
            early_stop_threshold: DEFAULT_EARLY_STOP_THRESHOLD,
        }
    }

    /// Set the batch early-stop threshold, typically routed from
    /// [`SearchConfig::early_stop_threshold`](crate::config::SearchConfig::early_stop_threshold).
    #[must_use]
    pub fn with_early_stop_threshold(mut self, threshold: f64) -> Self {
        self.early_stop_threshold = threshold;
        self
    }

    /// The metrics collector this cache reports to.
    #[must_use]
    pub fn metrics(&self) -> Arc<EngineMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run `reasoning_fn` for `query`, answering from cache when possible.
    ///
    /// A hit refreshes the entry's recency and returns the stored value
    /// without invoking the function. A miss invokes it, stores the value
    /// (evicting the least-recently-used entry at capacity), and returns.
    pub fn optimize<F>(&self, reasoning_fn: F, query: &str, options: &CacheOptions) -> Cached<T>
    where
        F: FnOnce(&str) -> T,
    {
        let timer = Timer::start();
        self.metrics.record_thought();

        let key = cache_key(query, options);

        if let Some(entry) = self.lock().get(&key).cloned() {
            self.metrics.record_hit();
            let processing_time_ms = timer.elapsed_ms();
            self.metrics.record_processing_time(processing_time_ms);
            debug!(query = %truncate(query, 30), processing_time_ms, "Cache hit");
            return Cached {
                value: entry.result,
                from_cache: true,
                processing_time_ms,
            };
        }

        self.metrics.record_miss();
        debug!(query = %truncate(query, 30), "Cache miss, computing");

        let value = reasoning_fn(query);
        self.insert(key, value.clone());

        let processing_time_ms = timer.elapsed_ms();
        self.metrics.record_processing_time(processing_time_ms);
        Cached {
            value,
            from_cache: false,
            processing_time_ms,
        }
    }

    /// Optimize a batch of reasoning functions over parallel query arrays.
    ///
    /// With `early_stop` set, stops issuing calls once an already-collected
    /// result scores at or above the configured early-stop threshold; the
    /// returned vector is then shorter than the input.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::BatchLengthMismatch`] when the arrays differ in
    /// length.
    pub fn batch_optimize<F>(
        &self,
        reasoning_fns: Vec<F>,
        queries: &[String],
        options: &CacheOptions,
        early_stop: bool,
    ) -> Result<Vec<Cached<T>>, CacheError>
    where
        F: FnOnce(&str) -> T,
        T: Scored,
    {
        if reasoning_fns.len() != queries.len() {
            return Err(CacheError::BatchLengthMismatch {
                functions: reasoning_fns.len(),
                queries: queries.len(),
            });
        }

        let mut results = Vec::with_capacity(queries.len());
        for (reasoning_fn, query) in reasoning_fns.into_iter().zip(queries) {
            results.push(self.optimize(reasoning_fn, query, options));

            if early_stop && self.should_early_stop(&results) {
                debug!(collected = results.len(), "Early stop triggered");
                break;
            }
        }
        Ok(results)
    }

    /// Whether a collected batch already contains a good-enough result.
    ///
    /// True iff the maximum score reaches the configured early-stop
    /// threshold; an empty batch never stops early.
    #[must_use]
    pub fn should_early_stop<S: Scored>(&self, results: &[S]) -> bool {
        results
            .iter()
            .map(Scored::score)
            .fold(f64::NEG_INFINITY, f64::max)
            >= self.early_stop_threshold
            && !results.is_empty()
    }

    /// Remove entries older than `max_age_ms`, returning how many were
    /// removed.
    pub fn clear_old_cache(&self, max_age_ms: u64) -> usize {
        let now = now_ms();
        let mut entries = self.lock();

        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| now.saturating_sub(entry.timestamp_ms) > max_age_ms)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            entries.pop(key);
        }
        if !expired.is_empty() {
            debug!(cleared = expired.len(), "Cleared old cache entries");
        }
        expired.len()
    }

    /// Remove entries older than the configured age limit.
    pub fn sweep(&self) -> usize {
        self.clear_old_cache(self.config.max_age_ms)
    }

    /// Remove every entry.
    pub fn clear_cache(&self) {
        let mut entries = self.lock();
        let size = entries.len();
        entries.clear();
        debug!(size, "Cleared cache");
    }

    /// Current entry count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Metrics snapshot with the live entry count filled in.
    #[must_use]
    pub fn stats(&self) -> MetricsSnapshot {
        let mut snapshot = self.metrics.snapshot();
        snapshot.cache_size = self.len();
        snapshot
    }

    fn insert(&self, key: String, value: T) {
        let mut entries = self.lock();
        if entries.len() == entries.cap().get() {
            if let Some((evicted, _)) = entries.pop_lru() {
                debug!(key = %evicted, "Evicted least-recently-used entry");
            }
        }
        entries.put(
            key,
            CacheEntry {
                result: value,
                timestamp_ms: now_ms(),
            },
        );
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, CacheEntry<T>>> {
        self.entries.lock().unwrap_or_else(|poison_error| {
            warn!("Cache mutex poisoned, recovering inner state");
            poison_error.into_inner()
        })
    }
}

impl<T: Clone + Serialize> ThoughtCache<T> {
    /// Serialize all entries to `store` under the optimizer namespace.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::StoreFailed`] if encoding or the store write
    /// fails.
    pub fn persist(&self, store: &dyn CacheStore) -> Result<(), CacheError> {
        let entries: Vec<(String, CacheEntry<T>)> = self
            .lock()
            .iter()
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect();

        let payload = serde_json::to_string(&entries).map_err(|e| CacheError::StoreFailed {
            message: format!("failed to encode cache: {e}"),
        })?;
        store.save(STORE_NAMESPACE, &payload)
    }
}

impl<T: Clone + DeserializeOwned> ThoughtCache<T> {
    /// Replace the cache contents from `store`.
    ///
    /// A missing payload leaves the cache empty; a corrupt payload is
    /// logged and treated the same way, never surfaced to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::StoreFailed`] only if the store itself cannot
    /// be read.
    pub fn restore(&self, store: &dyn CacheStore) -> Result<(), CacheError> {
        let Some(payload) = store.load(STORE_NAMESPACE)? else {
            return Ok(());
        };

        let entries: Vec<(String, CacheEntry<T>)> = match serde_json::from_str(&payload) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(%error, "Corrupt cache payload, starting empty");
                return Ok(());
            }
        };

        let mut guard = self.lock();
        guard.clear();
        // Stored most-recent first; insert in reverse to rebuild recency.
        for (key, entry) in entries.into_iter().rev() {
            guard.put(key, entry);
        }
        debug!(size = guard.len(), "Restored cache from store");
        Ok(())
    }
}

/// Derive the cache key for a query and options.
///
/// The query is lowercased and trimmed, hashed to 32 bits, and rendered in
/// base 36; non-empty options append their canonical JSON after a colon.
#[must_use]
pub fn cache_key(query: &str, options: &CacheOptions) -> String {
    let normalized = query.to_lowercase();
    let hash = to_base36(string_hash(normalized.trim()));

    if options.is_empty() {
        hash
    } else {
        // BTreeMap serialization is order-stable, so equal maps hash equal.
        let options_json =
            serde_json::to_string(options).unwrap_or_else(|_| String::from("{}"));
        format!("{hash}:{options_json}")
    }
}

/// 32-bit string hash over UTF-16 code units.
///
/// `hash = hash * 31 + code` with wrapping arithmetic, matching the widely
/// used `(hash << 5) - hash + code` formulation.
fn string_hash(text: &str) -> u32 {
    let mut hash: i32 = 0;
    for code in text.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(code));
    }
    hash.unsigned_abs()
}

/// Render a number in lowercase base 36.
fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Current time as epoch milliseconds.
#[allow(clippy::cast_sign_loss)]
fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let prefix: String = text.chars().take(max_len).collect();
        format!("{prefix}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Answer {
        text: String,
        quality: f64,
    }

    impl Scored for Answer {
        fn score(&self) -> f64 {
            self.quality
        }
    }

    fn answer(text: &str, quality: f64) -> Answer {
        Answer {
            text: text.to_string(),
            quality,
        }
    }

    fn small_cache(max_size: usize) -> ThoughtCache<Answer> {
        ThoughtCache::new(CacheConfig::default().with_max_size(max_size))
    }

    #[test]
    fn test_miss_then_hit() {
        let cache = small_cache(10);
        let options = CacheOptions::new();

        let first = cache.optimize(|q| answer(q, 0.8), "Agregar Templo", &options);
        assert!(!first.from_cache);

        let second = cache.optimize(|_| answer("never called", 0.0), "Agregar Templo", &options);
        assert!(second.from_cache);
        assert_eq!(second.value, first.value);
    }

    #[test]
    fn test_key_normalizes_case_and_whitespace() {
        let cache = small_cache(10);
        let options = CacheOptions::new();

        cache.optimize(|q| answer(q, 0.5), "  AGREGAR templo  ", &options);
        let hit = cache.optimize(|q| answer(q, 0.5), "agregar templo", &options);
        assert!(hit.from_cache);
    }

    #[test]
    fn test_options_partition_the_key() {
        let cache = small_cache(10);
        let empty = CacheOptions::new();
        let mut depth_two = CacheOptions::new();
        depth_two.insert("max_depth".to_string(), serde_json::json!(2));

        cache.optimize(|q| answer(q, 0.5), "query", &empty);
        let other = cache.optimize(|q| answer(q, 0.5), "query", &depth_two);
        assert!(!other.from_cache);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_option_insertion_order_is_irrelevant() {
        let mut a = CacheOptions::new();
        a.insert("x".to_string(), serde_json::json!(1));
        a.insert("y".to_string(), serde_json::json!(2));
        let mut b = CacheOptions::new();
        b.insert("y".to_string(), serde_json::json!(2));
        b.insert("x".to_string(), serde_json::json!(1));

        assert_eq!(cache_key("q", &a), cache_key("q", &b));
    }

    #[test]
    fn test_eviction_at_capacity() {
        let cache = small_cache(2);
        let options = CacheOptions::new();

        cache.optimize(|q| answer(q, 0.5), "one", &options);
        cache.optimize(|q| answer(q, 0.5), "two", &options);
        cache.optimize(|q| answer(q, 0.5), "three", &options);

        assert_eq!(cache.len(), 2);
        // "one" was the least recently used.
        let one = cache.optimize(|q| answer(q, 0.5), "one", &options);
        assert!(!one.from_cache);
    }

    #[test]
    fn test_hit_refreshes_recency() {
        let cache = small_cache(2);
        let options = CacheOptions::new();

        cache.optimize(|q| answer(q, 0.5), "one", &options);
        cache.optimize(|q| answer(q, 0.5), "two", &options);
        // Touch "one" so "two" becomes the eviction candidate.
        cache.optimize(|q| answer(q, 0.5), "one", &options);
        cache.optimize(|q| answer(q, 0.5), "three", &options);

        let one = cache.optimize(|q| answer(q, 0.5), "one", &options);
        assert!(one.from_cache);
        let two = cache.optimize(|q| answer(q, 0.5), "two", &options);
        assert!(!two.from_cache);
    }

    #[test]
    fn test_metrics_track_hits_and_misses() {
        let cache = small_cache(10);
        let options = CacheOptions::new();

        cache.optimize(|q| answer(q, 0.5), "a", &options);
        cache.optimize(|q| answer(q, 0.5), "a", &options);
        cache.optimize(|q| answer(q, 0.5), "b", &options);

        let stats = cache.stats();
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.cache_misses, 2);
        assert_eq!(stats.total_thoughts, 3);
        assert_eq!(stats.cache_size, 2);
        assert!((stats.hit_rate - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_clear_cache() {
        let cache = small_cache(10);
        let options = CacheOptions::new();
        cache.optimize(|q| answer(q, 0.5), "a", &options);

        cache.clear_cache();
        assert!(cache.is_empty());
        let recomputed = cache.optimize(|q| answer(q, 0.5), "a", &options);
        assert!(!recomputed.from_cache);
    }

    #[test]
    fn test_clear_old_cache_removes_only_stale() {
        let cache = small_cache(10);
        let options = CacheOptions::new();
        cache.optimize(|q| answer(q, 0.5), "fresh", &options);

        // Nothing is older than an hour yet.
        assert_eq!(cache.clear_old_cache(3_600_000), 0);
        assert_eq!(cache.len(), 1);

        // With a zero age limit everything is stale.
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(cache.clear_old_cache(0), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_batch_length_mismatch() {
        let cache = small_cache(10);
        let fns = vec![|q: &str| answer(q, 0.5)];
        let queries = vec!["a".to_string(), "b".to_string()];

        let result = cache.batch_optimize(fns, &queries, &CacheOptions::new(), false);
        assert!(matches!(
            result,
            Err(CacheError::BatchLengthMismatch {
                functions: 1,
                queries: 2
            })
        ));
    }

    #[test]
    fn test_batch_runs_all_without_early_stop() {
        let cache = small_cache(10);
        let fns = vec![
            |q: &str| answer(q, 0.95),
            |q: &str| answer(q, 0.5),
            |q: &str| answer(q, 0.6),
        ];
        let queries: Vec<String> = ["a", "b", "c"].iter().map(ToString::to_string).collect();

        let results = cache
            .batch_optimize(fns, &queries, &CacheOptions::new(), false)
            .unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_batch_early_stop_truncates() {
        let cache = small_cache(10);
        let fns = vec![
            |q: &str| answer(q, 0.95),
            |q: &str| answer(q, 0.5),
            |q: &str| answer(q, 0.6),
        ];
        let queries: Vec<String> = ["a", "b", "c"].iter().map(ToString::to_string).collect();

        // Default threshold is 0.9; the first result already clears it.
        let results = cache
            .batch_optimize(fns, &queries, &CacheOptions::new(), true)
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_should_early_stop() {
        let cache = small_cache(10);
        assert!(!cache.should_early_stop::<Answer>(&[]));
        assert!(!cache.should_early_stop(&[answer("a", 0.5)]));
        assert!(cache.should_early_stop(&[answer("a", 0.5), answer("b", 0.9)]));
    }

    #[test]
    fn test_early_stop_threshold_routed_from_search_config() {
        let search = crate::config::SearchConfig::default().with_early_stop_threshold(0.99);
        let cache = small_cache(10).with_early_stop_threshold(search.early_stop_threshold);

        // 0.95 clears the default threshold but not the routed one.
        assert!(!cache.should_early_stop(&[answer("a", 0.95)]));
        assert!(cache.should_early_stop(&[answer("a", 0.99)]));
    }

    #[test]
    fn test_persist_restore_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store::JsonFileStore::new(dir.path());
        let options = CacheOptions::new();

        let cache = small_cache(10);
        cache.optimize(|q| answer(q, 0.8), "a", &options);
        cache.optimize(|q| answer(q, 0.6), "b", &options);
        cache.persist(&store).unwrap();

        let restored = small_cache(10);
        restored.restore(&store).unwrap();
        assert_eq!(restored.len(), 2);
        let hit = restored.optimize(|_| answer("recomputed", 0.0), "a", &options);
        assert!(hit.from_cache);
        assert_eq!(hit.value, answer("a", 0.8));
    }

    #[test]
    fn test_restore_missing_payload_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store::JsonFileStore::new(dir.path());

        let cache = small_cache(10);
        cache.restore(&store).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_restore_corrupt_payload_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store::JsonFileStore::new(dir.path());
        store.save(STORE_NAMESPACE, "{not json").unwrap();

        let cache = small_cache(10);
        cache.restore(&store).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_restore_preserves_recency_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store::JsonFileStore::new(dir.path());
        let options = CacheOptions::new();

        let cache = small_cache(2);
        cache.optimize(|q| answer(q, 0.5), "old", &options);
        cache.optimize(|q| answer(q, 0.5), "new", &options);
        cache.persist(&store).unwrap();

        let restored = small_cache(2);
        restored.restore(&store).unwrap();
        // Inserting a third entry should evict "old", not "new".
        restored.optimize(|q| answer(q, 0.5), "third", &options);
        assert!(
            restored
                .optimize(|_| answer("recomputed", 0.0), "new", &options)
                .from_cache
        );
    }

    #[test]
    fn test_cache_key_stable_for_same_input() {
        assert_eq!(
            cache_key("Agregar Templo", &CacheOptions::new()),
            cache_key("agregar templo  ", &CacheOptions::new())
        );
    }

    #[test]
    fn test_string_hash_known_values() {
        assert_eq!(string_hash(""), 0);
        // "a" hashes to its code unit.
        assert_eq!(string_hash("a"), 97);
        // "ab" = 97 * 31 + 98
        assert_eq!(string_hash("ab"), 97 * 31 + 98);
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(97), "2p");
    }

    #[test]
    fn test_truncate_long_query() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ab", 3), "ab");
    }

    #[test]
    fn test_zero_capacity_config_clamps_to_one() {
        let cache: ThoughtCache<Answer> =
            ThoughtCache::new(CacheConfig::default().with_max_size(0));
        let options = CacheOptions::new();
        cache.optimize(|q| answer(q, 0.5), "a", &options);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_search_result_scored_by_confidence() {
        let result = SearchResult {
            query: String::new(),
            best_path: Vec::new(),
            scores: Vec::new(),
            reasoning: String::new(),
            total_nodes: 1,
            pruned_nodes: 0,
            confidence: 0.42,
        };
        assert_eq!(Scored::score(&result), 0.42);
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(small_cache(50));
        let options = CacheOptions::new();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = Arc::clone(&cache);
                let options = options.clone();
                std::thread::spawn(move || {
                    for j in 0..20 {
                        let query = format!("query-{}", (i + j) % 10);
                        cache.optimize(|q| answer(q, 0.5), &query, &options);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 10);
        assert_eq!(cache.stats().total_thoughts, 80);
    }
}
