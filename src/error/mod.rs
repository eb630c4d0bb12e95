//! Error types for the reasoning-search engine.
//!
//! This module defines a hierarchical error system:
//! - [`EngineError`]: Top-level engine errors
//! - [`SearchError`]: Branch generation and exploration errors
//! - [`CacheError`]: Memoization cache errors
//! - [`ConfigError`]: Configuration errors
//!
//! Failures that occur *inside* tree expansion (a generator returning an
//! error, a heuristic producing a non-finite score) are deliberately not
//! represented here as fatal paths: the explorer degrades them to leaf nodes
//! or zero scores and logs them. Only operations with a caller-visible
//! failure mode (batch shape mismatches, persistence, configuration) return
//! these types.

use thiserror::Error;

/// Top-level engine error.
///
/// This is the main error type returned by public API functions.
/// It wraps all subsystem errors for unified error handling.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Search error.
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Cache error.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Branch generation and exploration errors.
///
/// Returned by [`BranchGenerator`](crate::search::BranchGenerator)
/// implementations. The explorer treats any of these as "no candidates at
/// this node" and continues with a leaf.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The branch generator failed to produce candidates.
    #[error("Branch generation failed: {message}")]
    GeneratorFailed {
        /// Description of the failure.
        message: String,
    },

    /// The generator produced a candidate the engine cannot use.
    #[error("Malformed branch: {reason}")]
    MalformedBranch {
        /// Why the candidate is unusable.
        reason: String,
    },
}

/// Memoization cache errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Batch optimization received parallel arrays of different lengths.
    #[error("Batch length mismatch: {functions} functions vs {queries} queries")]
    BatchLengthMismatch {
        /// Number of reasoning functions supplied.
        functions: usize,
        /// Number of queries supplied.
        queries: usize,
    },

    /// A persistence store operation failed.
    #[error("Cache store failed: {message}")]
    StoreFailed {
        /// Description of the failure.
        message: String,
    },
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required configuration is missing.
    #[error("Missing required: {var}")]
    MissingRequired {
        /// The missing variable name.
        var: String,
    },

    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
