//! Tree-of-thoughts search.
//!
//! The search module hosts the engine's core loop: the arena [`ThoughtTree`],
//! the pluggable [`BranchGenerator`] seam, the [`HeuristicScorer`], path
//! selection, and the [`TreeExplorer`] that ties them together.
//!
//! A search proceeds in three phases:
//! 1. **Expansion**: the explorer asks the generator for candidates, scores
//!    them, prunes weak ones, and recurses to the configured depth.
//! 2. **Selection**: all root-to-leaf paths are ranked by average score
//!    (tie-broken by minimum score, then shorter length).
//! 3. **Summary**: the winning path is rendered into a [`SearchResult`]
//!    with a human-readable reasoning trace and a confidence estimate.

use serde::{Deserialize, Serialize};

mod context;
mod explorer;
mod generate;
mod path;
mod scoring;
mod tree;

pub use context::{ReasoningContext, UserType};
pub use explorer::{Exploration, TreeExplorer};
pub use generate::{Branch, BranchGenerator, QueryType, TemplateBranchGenerator};
pub use path::{all_paths, confidence, path_stats, reasoning_trace, select_best, PathStats};
pub use scoring::{ContextBonuses, HeuristicScorer, ScoringTables, StanceFactors};
pub use tree::{BranchKind, NodeId, ThoughtNode, ThoughtTree};

/// Outcome of one `explore` call.
///
/// Read-only to the caller; all fields describe the completed search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The query that was explored.
    pub query: String,
    /// Thoughts along the winning root-to-leaf path.
    pub best_path: Vec<String>,
    /// Scores aligned with `best_path`.
    pub scores: Vec<f64>,
    /// Human-readable reasoning trace for the winning path.
    pub reasoning: String,
    /// Total nodes in the explored tree.
    pub total_nodes: u32,
    /// Candidates dropped for scoring below the minimum.
    pub pruned_nodes: u32,
    /// Blended confidence estimate in `[0, 1]`.
    pub confidence: f64,
}

impl SearchResult {
    /// Score of the winning path's final thought, or 0.0 for an empty path.
    #[must_use]
    pub fn final_score(&self) -> f64 {
        self.scores.last().copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn sample_result() -> SearchResult {
        SearchResult {
            query: "agregar templo".to_string(),
            best_path: vec!["root".to_string(), "option".to_string()],
            scores: vec![1.0, 0.85],
            reasoning: "trace".to_string(),
            total_nodes: 4,
            pruned_nodes: 1,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_final_score() {
        assert_eq!(sample_result().final_score(), 0.85);
    }

    #[test]
    fn test_final_score_empty() {
        let result = SearchResult {
            best_path: Vec::new(),
            scores: Vec::new(),
            ..sample_result()
        };
        assert_eq!(result.final_score(), 0.0);
    }

    #[test]
    fn test_search_result_serialize_round_trip() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let parsed: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, parsed);
    }
}
