//! Bounded tree-of-thoughts exploration.
//!
//! [`TreeExplorer`] drives the whole search: it builds a scored tree by
//! repeatedly asking the [`BranchGenerator`] for candidates, scoring them,
//! pruning weak ones, and recursing until the depth bound. It then selects
//! the best root-to-leaf path and packages it as a [`SearchResult`].
//!
//! Exploration is stateless between calls: the pruned counter lives on the
//! stack of each invocation, so one explorer can serve concurrent searches.

use std::sync::Arc;

use tracing::{debug, warn};

use super::context::ReasoningContext;
use super::generate::BranchGenerator;
use super::path;
use super::scoring::HeuristicScorer;
use super::tree::{NodeId, ThoughtTree};
use super::SearchResult;
use crate::config::SearchConfig;
use crate::metrics::EngineMetrics;

/// Domain label used when the context does not provide one.
const DEFAULT_DOMAIN: &str = "viaje a Japón";

/// A built tree together with its pruning count.
///
/// Returned by [`TreeExplorer::build_tree`] for callers that want the raw
/// tree instead of the summarized [`SearchResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct Exploration {
    /// The scored thought tree.
    pub tree: ThoughtTree,
    /// Candidates dropped for scoring below the minimum.
    pub pruned_nodes: u32,
}

/// Book-keeping for one `explore` invocation.
struct ExpandState {
    pruned: u32,
    visits: u32,
}

/// Heuristic tree-of-thoughts search engine.
#[derive(Debug, Clone)]
pub struct TreeExplorer<G> {
    generator: G,
    scorer: HeuristicScorer,
    config: SearchConfig,
    metrics: Option<Arc<EngineMetrics>>,
}

impl<G: BranchGenerator> TreeExplorer<G> {
    /// Create an explorer with the default scorer.
    #[must_use]
    pub fn new(generator: G, config: SearchConfig) -> Self {
        Self {
            generator,
            scorer: HeuristicScorer::new(),
            config,
            metrics: None,
        }
    }

    /// Replace the scorer.
    #[must_use]
    pub fn with_scorer(mut self, scorer: HeuristicScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Report pruning counts to a shared metrics collector, typically the
    /// one a [`ThoughtCache`](crate::cache::ThoughtCache) reports to.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<EngineMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// The configuration in effect for this explorer.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Explore a query and return the best reasoning path.
    ///
    /// Never fails: generator errors degrade the affected node to a leaf,
    /// and the worst outcome is a shallower, less confident result.
    #[must_use]
    pub fn explore(&self, query: &str, context: &ReasoningContext) -> SearchResult {
        let Exploration { tree, pruned_nodes } = self.build_tree(query, context);

        let best = path::select_best(&tree);
        let reasoning = path::reasoning_trace(&tree, &best);
        let confidence = path::confidence(&tree, &best);

        let best_path: Vec<String> = best
            .iter()
            .filter_map(|&id| tree.get(id).map(|n| n.thought.clone()))
            .collect();
        let scores: Vec<f64> = best
            .iter()
            .filter_map(|&id| tree.get(id).map(|n| n.score))
            .collect();

        #[allow(clippy::cast_possible_truncation)]
        let total_nodes = tree.len() as u32;

        debug!(
            query,
            total_nodes,
            pruned_nodes,
            confidence,
            "Exploration complete"
        );

        SearchResult {
            query: query.to_string(),
            best_path,
            scores,
            reasoning,
            total_nodes,
            pruned_nodes,
            confidence,
        }
    }

    /// Build the scored tree without summarizing it.
    #[must_use]
    pub fn build_tree(&self, query: &str, context: &ReasoningContext) -> Exploration {
        let domain = context.domain.as_deref().unwrap_or(DEFAULT_DOMAIN);
        let root_thought = format!("Entender query: \"{query}\" en contexto de {domain}");

        let mut tree = ThoughtTree::new(root_thought);
        let root = tree.root();
        let mut state = ExpandState {
            pruned: 0,
            visits: 1,
        };
        self.expand(&mut tree, root, 1, context, &mut state);

        if let Some(metrics) = &self.metrics {
            metrics.record_pruned(u64::from(state.pruned));
        }

        Exploration {
            tree,
            pruned_nodes: state.pruned,
        }
    }

    /// Expand `parent` with children at `child_depth`, recursing to the
    /// configured depth bound.
    fn expand(
        &self,
        tree: &mut ThoughtTree,
        parent: NodeId,
        child_depth: u32,
        context: &ReasoningContext,
        state: &mut ExpandState,
    ) {
        if child_depth > self.config.max_depth {
            return;
        }
        if self.budget_exhausted(state) {
            return;
        }

        let Some(parent_thought) = tree.get(parent).map(|n| n.thought.clone()) else {
            return;
        };

        let branches = match self.generator.generate(&parent_thought, context, child_depth) {
            Ok(branches) => branches,
            Err(error) => {
                warn!(%error, depth = child_depth, "Branch generation failed, treating node as leaf");
                return;
            }
        };

        let mut scored: Vec<_> = branches
            .into_iter()
            .map(|branch| {
                let score = self.scorer.score(&branch.text, branch.kind, context);
                (branch, score)
            })
            .collect();

        // Filter below-minimum candidates, then keep the first
        // branching_factor survivors in generator order.
        let mut survivors = Vec::new();
        let mut rejected_best: Option<(super::generate::Branch, f64)> = None;
        for (branch, score) in scored.drain(..) {
            if score < self.config.min_score {
                state.pruned += 1;
                debug!(score, kind = %branch.kind, "Pruned low-score branch");
                if rejected_best
                    .as_ref()
                    .is_none_or(|(_, best)| score > *best)
                {
                    rejected_best = Some((branch, score));
                }
                continue;
            }
            if survivors.len() < self.config.branching_factor as usize {
                survivors.push((branch, score));
            }
        }

        if survivors.is_empty() && self.config.keep_at_least_one {
            if let Some(kept) = rejected_best.take() {
                state.pruned -= 1;
                survivors.push(kept);
            }
        }

        for (branch, score) in survivors {
            if self.budget_exhausted(state) {
                debug!(visits = state.visits, "Node budget reached, returning partial tree");
                return;
            }
            let Some(child) = tree.add_child(parent, branch.text, score, branch.kind) else {
                continue;
            };
            state.visits += 1;
            self.expand(tree, child, child_depth + 1, context, state);
        }
    }

    fn budget_exhausted(&self, state: &ExpandState) -> bool {
        self.config
            .node_budget
            .is_some_and(|budget| state.visits >= budget)
    }
}
