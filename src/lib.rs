//! Heuristic reasoning-search engine.
//!
//! A bounded tree-search explorer for assistant-style reasoning: it expands a
//! user query into a tree of candidate "thoughts", scores each candidate with
//! weighted heuristics, prunes weak or excess branches, and selects the best
//! root-to-leaf reasoning path with a confidence estimate. A content-addressed
//! memoization cache with LRU + TTL eviction avoids recomputing identical
//! searches, and a standalone pruner bounds any scored tree, not just the
//! explorer's own.
//!
//! # Components
//!
//! - [`search::TreeExplorer`]: bounded-depth, bounded-branching expansion
//! - [`search::HeuristicScorer`]: weighted-criteria scoring in `[0, 1]`
//! - [`search::TemplateBranchGenerator`]: deterministic candidate generation
//! - [`pruner`]: generic score-threshold + branch-cap pruning
//! - [`cache::ThoughtCache`]: memoization with LRU eviction and TTL sweeps
//! - [`metrics::EngineMetrics`]: hit/miss, prune, and latency counters
//!
//! # Architecture
//!
//! ```text
//! explore(query, context)
//!     │
//!     ▼
//! ┌───────────────┐   generate    ┌──────────────────┐
//! │ TreeExplorer  │──────────────▶│ BranchGenerator  │
//! │  (expansion)  │◀──────────────│  (candidates)    │
//! └──────┬────────┘               └──────────────────┘
//!        │ score + prune per node
//!        ▼
//!  scored tree ──▶ best path ──▶ confidence ──▶ SearchResult
//!
//! ThoughtCache::optimize(fn, query, options) wraps any reasoning function
//! (including explore) with content-addressed memoization.
//! ```
//!
//! # Example
//!
//! ```
//! use thought_search::config::SearchConfig;
//! use thought_search::search::{ReasoningContext, TemplateBranchGenerator, TreeExplorer};
//!
//! let explorer = TreeExplorer::new(TemplateBranchGenerator::new(), SearchConfig::default());
//! let context = ReasoningContext::new().with_domain("viaje a Japón");
//! let result = explorer.explore("agregar templo en Kioto", &context);
//!
//! assert!(!result.best_path.is_empty());
//! assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pruner;
pub mod search;
