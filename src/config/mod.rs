//! Configuration management.
//!
//! This module handles:
//! - Search and cache tuning parameters with sensible defaults
//! - Scoring weight validation (weights must sum to 1.0)
//! - Environment variable loading via [`Config::from_env`]
//!
//! # Example
//!
//! ```
//! use thought_search::config::{ScoringWeights, SearchConfig};
//!
//! let config = SearchConfig::default()
//!     .with_max_depth(2)
//!     .with_branching_factor(4);
//! assert_eq!(config.max_depth, 2);
//!
//! // Weights are validated at configuration time, never at scoring time.
//! assert!(ScoringWeights::default().validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default maximum exploration depth.
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Default maximum surviving branches per node.
pub const DEFAULT_BRANCHING_FACTOR: u32 = 3;

/// Default pruning threshold; candidates scoring below it are dropped.
pub const DEFAULT_MIN_SCORE: f64 = 0.3;

/// Default early-stop threshold for batch optimization.
pub const DEFAULT_EARLY_STOP_THRESHOLD: f64 = 0.9;

/// Default maximum number of cache entries.
pub const DEFAULT_CACHE_MAX_SIZE: usize = 100;

/// Default cache entry age limit for TTL sweeps (1 hour).
pub const DEFAULT_CACHE_MAX_AGE_MS: u64 = 3_600_000;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Tuning parameters for a single tree search.
///
/// Immutable per `explore` invocation; construct one per call (or clone and
/// override) rather than mutating a shared instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum tree depth (root is depth 0).
    pub max_depth: u32,
    /// Maximum surviving children per node.
    pub branching_factor: u32,
    /// Candidates scoring below this are pruned.
    pub min_score: f64,
    /// Batch search stops once a result scores at or above this.
    pub early_stop_threshold: f64,
    /// When every candidate at a node falls below `min_score`, keep the
    /// single best one instead of producing a childless node.
    pub keep_at_least_one: bool,
    /// Optional cap on total node visits; expansion stops once reached and
    /// the partial tree is used as-is.
    pub node_budget: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            branching_factor: DEFAULT_BRANCHING_FACTOR,
            min_score: DEFAULT_MIN_SCORE,
            early_stop_threshold: DEFAULT_EARLY_STOP_THRESHOLD,
            keep_at_least_one: false,
            node_budget: None,
        }
    }
}

impl SearchConfig {
    /// Set the maximum depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the branching factor.
    #[must_use]
    pub const fn with_branching_factor(mut self, branching_factor: u32) -> Self {
        self.branching_factor = branching_factor;
        self
    }

    /// Set the pruning threshold.
    #[must_use]
    pub const fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Set the early-stop threshold.
    #[must_use]
    pub const fn with_early_stop_threshold(mut self, threshold: f64) -> Self {
        self.early_stop_threshold = threshold;
        self
    }

    /// Keep the single best candidate when all fall below the threshold.
    #[must_use]
    pub const fn with_keep_at_least_one(mut self, keep: bool) -> Self {
        self.keep_at_least_one = keep;
        self
    }

    /// Cap the total number of node visits per exploration.
    #[must_use]
    pub const fn with_node_budget(mut self, budget: u32) -> Self {
        self.node_budget = Some(budget);
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `max_depth` or
    /// `branching_factor` is zero, or a threshold is outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                var: "max_depth".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.branching_factor == 0 {
            return Err(ConfigError::InvalidValue {
                var: "branching_factor".into(),
                reason: "must be at least 1".into(),
            });
        }
        validate_unit_interval("min_score", self.min_score)?;
        validate_unit_interval("early_stop_threshold", self.early_stop_threshold)?;
        Ok(())
    }
}

/// Tuning parameters for the memoization cache.
///
/// The early-stop threshold for batch optimization lives in
/// [`SearchConfig`]; the cache takes it via
/// [`ThoughtCache::with_early_stop_threshold`](crate::cache::ThoughtCache::with_early_stop_threshold).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries before LRU eviction.
    pub max_size: usize,
    /// Entry age limit used by TTL sweeps, in milliseconds.
    pub max_age_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_CACHE_MAX_SIZE,
            max_age_ms: DEFAULT_CACHE_MAX_AGE_MS,
        }
    }
}

impl CacheConfig {
    /// Set the maximum cache size.
    #[must_use]
    pub const fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the TTL sweep age limit.
    #[must_use]
    pub const fn with_max_age_ms(mut self, max_age_ms: u64) -> Self {
        self.max_age_ms = max_age_ms;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `max_size` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "max_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Per-criterion weights for the scoring heuristic.
///
/// The five weights must sum to 1.0; this is enforced by [`validate`] at
/// configuration time. Scoring never renormalizes.
///
/// [`validate`]: ScoringWeights::validate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Textual relevance to the query domain.
    pub relevance: f64,
    /// How executable the candidate is.
    pub feasibility: f64,
    /// Safety/reliability of the approach.
    pub safety: f64,
    /// Originality of the approach.
    pub creativity: f64,
    /// Time/cost efficiency of the approach.
    pub efficiency: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            relevance: 0.3,
            feasibility: 0.3,
            safety: 0.2,
            creativity: 0.1,
            efficiency: 0.1,
        }
    }
}

/// Tolerance for the weight-sum invariant.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

impl ScoringWeights {
    /// Sum of all five weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.relevance + self.feasibility + self.safety + self.creativity + self.efficiency
    }

    /// Validate that weights are non-negative and sum to 1.0.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if any weight is negative or
    /// the sum deviates from 1.0 beyond floating-point tolerance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("relevance", self.relevance),
            ("feasibility", self.feasibility),
            ("safety", self.safety),
            ("creativity", self.creativity),
            ("efficiency", self.efficiency),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    var: name.into(),
                    reason: "must be a non-negative finite number".into(),
                });
            }
        }
        if (self.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidValue {
                var: "scoring_weights".into(),
                reason: format!("weights must sum to 1.0, got {}", self.sum()),
            });
        }
        Ok(())
    }
}

/// Engine configuration.
///
/// Use [`Config::from_env`] to load configuration from environment
/// variables, or build the parts directly for embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Tree search parameters.
    pub search: SearchConfig,
    /// Memoization cache parameters.
    pub cache: CacheConfig,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            cache: CacheConfig::default(),
            log_level: DEFAULT_LOG_LEVEL.into(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional, with defaults:
    /// - `SEARCH_MAX_DEPTH`: maximum tree depth (default: `3`)
    /// - `SEARCH_BRANCHING_FACTOR`: surviving branches per node (default: `3`)
    /// - `SEARCH_MIN_SCORE`: pruning threshold (default: `0.3`)
    /// - `EARLY_STOP_THRESHOLD`: batch early-stop score (default: `0.9`)
    /// - `CACHE_MAX_SIZE`: cache entry cap (default: `100`)
    /// - `CACHE_MAX_AGE_MS`: TTL sweep age in ms (default: `3600000`)
    /// - `LOG_LEVEL`: logging level (default: `info`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to a value that does not
    /// parse or fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let search = SearchConfig {
            max_depth: parse_env_u32("SEARCH_MAX_DEPTH", DEFAULT_MAX_DEPTH)?,
            branching_factor: parse_env_u32("SEARCH_BRANCHING_FACTOR", DEFAULT_BRANCHING_FACTOR)?,
            min_score: parse_env_f64("SEARCH_MIN_SCORE", DEFAULT_MIN_SCORE)?,
            early_stop_threshold: parse_env_f64(
                "EARLY_STOP_THRESHOLD",
                DEFAULT_EARLY_STOP_THRESHOLD,
            )?,
            keep_at_least_one: false,
            node_budget: None,
        };

        let cache = CacheConfig {
            max_size: parse_env_usize("CACHE_MAX_SIZE", DEFAULT_CACHE_MAX_SIZE)?,
            max_age_ms: parse_env_u64("CACHE_MAX_AGE_MS", DEFAULT_CACHE_MAX_AGE_MS)?,
        };

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());

        let config = Self {
            search,
            cache,
            log_level,
        };
        config.search.validate()?;
        config.cache.validate()?;
        Ok(config)
    }
}

/// Validate that a value lies in `[0, 1]`.
fn validate_unit_interval(var: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidValue {
            var: var.into(),
            reason: "must be between 0 and 1".into(),
        });
    }
    Ok(())
}

/// Parse an environment variable as u32, using a default if not set.
fn parse_env_u32(name: &str, default: u32) -> Result<u32, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}

/// Parse an environment variable as u64, using a default if not set.
fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}

/// Parse an environment variable as usize, using a default if not set.
fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}

/// Parse an environment variable as f64, using a default if not set.
fn parse_env_f64(name: &str, default: f64) -> Result<f64, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a number".into(),
        })
    })
}
