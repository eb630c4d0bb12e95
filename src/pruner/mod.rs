//! Standalone tree pruning.
//!
//! [`GenericPruner`] applies the same pruning policy the explorer applies
//! inline, but to any tree shape exposing a score and a child list via the
//! [`Prunable`] trait. This lets unrelated planning code reuse the policy on
//! search spaces the explorer never built.
//!
//! The policy at every node: drop children scoring below the minimum, then,
//! if more than the branch cap remain, sort the survivors descending by
//! score and truncate. Both removals count toward the pruned total. Note the
//! sort step: unlike the explorer, which preserves generator order, the
//! standalone pruner ranks before capping.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SearchConfig;
use crate::metrics::EngineMetrics;

/// A tree node the pruner can operate on.
pub trait Prunable: Sized {
    /// The node's score.
    fn score(&self) -> f64;
    /// Mutable access to the node's children.
    fn children_mut(&mut self) -> &mut Vec<Self>;
}

/// A minimal owned scored tree, for callers without their own node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredNode<T> {
    /// Caller payload.
    pub value: T,
    /// Score in `[0, 1]`.
    pub score: f64,
    /// Child nodes.
    pub children: Vec<ScoredNode<T>>,
}

impl<T> ScoredNode<T> {
    /// Create a leaf node.
    pub fn new(value: T, score: f64) -> Self {
        Self {
            value,
            score,
            children: Vec::new(),
        }
    }

    /// Attach a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

impl<T> Prunable for ScoredNode<T> {
    fn score(&self) -> f64 {
        self.score
    }

    fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }
}

/// Score-threshold and branch-cap pruner for arbitrary scored trees.
#[derive(Debug, Clone)]
pub struct GenericPruner {
    min_score: f64,
    max_branches: usize,
    keep_at_least_one: bool,
    metrics: Option<Arc<EngineMetrics>>,
}

impl GenericPruner {
    /// Create a pruner with an explicit threshold and branch cap.
    #[must_use]
    pub const fn new(min_score: f64, max_branches: usize) -> Self {
        Self {
            min_score,
            max_branches,
            keep_at_least_one: false,
            metrics: None,
        }
    }

    /// Derive a pruner from search configuration, so standalone pruning
    /// matches the explorer's thresholds.
    #[must_use]
    pub const fn from_search_config(config: &SearchConfig) -> Self {
        Self {
            min_score: config.min_score,
            max_branches: config.branching_factor as usize,
            keep_at_least_one: config.keep_at_least_one,
            metrics: None,
        }
    }

    /// Report pruning counts to a shared metrics collector.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<EngineMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// When every child falls below the threshold, keep the single best one
    /// instead of leaving the node childless.
    #[must_use]
    pub const fn with_keep_at_least_one(mut self, keep: bool) -> Self {
        self.keep_at_least_one = keep;
        self
    }

    /// Prune the tree rooted at `node` in place, returning how many nodes
    /// were removed (subtrees count each removed root once).
    ///
    /// The root itself is never removed, whatever its score.
    pub fn prune<N: Prunable>(&self, node: &mut N) -> u32 {
        let mut pruned = 0;
        self.prune_node(node, &mut pruned);
        if let Some(metrics) = &self.metrics {
            metrics.record_pruned(u64::from(pruned));
        }
        debug!(pruned, "Pruning pass complete");
        pruned
    }

    #[allow(clippy::cast_possible_truncation)]
    fn prune_node<N: Prunable>(&self, node: &mut N, pruned: &mut u32) {
        let children = node.children_mut();

        let before = children.len();
        if self.keep_at_least_one
            && before > 0
            && children.iter().all(|c| c.score() < self.min_score)
        {
            let best_index = children
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| {
                    a.score()
                        .partial_cmp(&b.score())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map_or(0, |(index, _)| index);
            children.swap(0, best_index);
            children.truncate(1);
            *pruned += (before - 1) as u32;
        } else {
            children.retain(|child| child.score() >= self.min_score);
            *pruned += (before - children.len()) as u32;
        }

        if children.len() > self.max_branches {
            // Survivors are ranked before capping.
            children.sort_by(|a, b| {
                b.score()
                    .partial_cmp(&a.score())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            *pruned += (children.len() - self.max_branches) as u32;
            children.truncate(self.max_branches);
        }

        for child in children.iter_mut() {
            self.prune_node(child, pruned);
        }
    }
}
