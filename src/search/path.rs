//! Path enumeration and best-path selection.
//!
//! A path is the sequence of node ids from the root to a leaf. Selection
//! ranks paths by average score, breaking ties by minimum score and then by
//! path length (shorter wins); remaining ties resolve to the first path in
//! depth-first order, so selection is fully deterministic.

use super::tree::{NodeId, ThoughtTree};

/// Weight of the average score in the confidence blend.
const CONFIDENCE_AVG_WEIGHT: f64 = 0.7;
/// Weight of the minimum score in the confidence blend.
const CONFIDENCE_MIN_WEIGHT: f64 = 0.3;
/// Tolerance under which two path statistics count as tied.
///
/// Averages of mathematically equal score sets can differ by float noise
/// depending on summation order; without a tolerance the secondary ranking
/// keys would never fire.
const PATH_SCORE_TOLERANCE: f64 = 1e-9;

/// Summary statistics for one root-to-leaf path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStats {
    /// Mean node score along the path.
    pub avg: f64,
    /// Weakest node score along the path.
    pub min: f64,
    /// Number of nodes on the path.
    pub len: usize,
}

/// Enumerate every root-to-leaf path in depth-first order.
///
/// Children are visited in insertion order, so for a fixed tree the result
/// is stable across calls.
#[must_use]
pub fn all_paths(tree: &ThoughtTree) -> Vec<Vec<NodeId>> {
    let mut paths = Vec::new();
    let mut stack = vec![tree.root()];
    collect_paths(tree, &mut stack, &mut paths);
    paths
}

fn collect_paths(tree: &ThoughtTree, stack: &mut Vec<NodeId>, paths: &mut Vec<Vec<NodeId>>) {
    let Some(current) = stack.last().copied().and_then(|id| tree.get(id)) else {
        return;
    };
    if current.children.is_empty() {
        paths.push(stack.clone());
        return;
    }
    let children = current.children.clone();
    for child in children {
        stack.push(child);
        collect_paths(tree, stack, paths);
        stack.pop();
    }
}

/// Compute the average/minimum/length statistics of a path.
///
/// Returns `None` for an empty path or if any id is not in the tree.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn path_stats(tree: &ThoughtTree, path: &[NodeId]) -> Option<PathStats> {
    if path.is_empty() {
        return None;
    }
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    for &id in path {
        let score = tree.get(id)?.score;
        sum += score;
        min = min.min(score);
    }
    Some(PathStats {
        avg: sum / path.len() as f64,
        min,
        len: path.len(),
    })
}

/// Select the best root-to-leaf path.
///
/// Ranking is by average score descending, then minimum score descending,
/// then path length ascending. The root-only tree yields the one-node path.
#[must_use]
pub fn select_best(tree: &ThoughtTree) -> Vec<NodeId> {
    let paths = all_paths(tree);
    let mut best: Option<(Vec<NodeId>, PathStats)> = None;
    for path in paths {
        let Some(stats) = path_stats(tree, &path) else {
            continue;
        };
        let better = match &best {
            None => true,
            Some((_, best_stats)) => is_better(&stats, best_stats),
        };
        if better {
            best = Some((path, stats));
        }
    }
    best.map(|(path, _)| path).unwrap_or_default()
}

/// Whether `candidate` strictly outranks `incumbent`.
///
/// Ties keep the incumbent, which preserves depth-first order.
fn is_better(candidate: &PathStats, incumbent: &PathStats) -> bool {
    if (candidate.avg - incumbent.avg).abs() > PATH_SCORE_TOLERANCE {
        return candidate.avg > incumbent.avg;
    }
    if (candidate.min - incumbent.min).abs() > PATH_SCORE_TOLERANCE {
        return candidate.min > incumbent.min;
    }
    candidate.len < incumbent.len
}

/// Blend a path's statistics into a confidence estimate.
///
/// `confidence = avg * 0.7 + min * 0.3`; an empty path has confidence 0.0.
#[must_use]
pub fn confidence(tree: &ThoughtTree, path: &[NodeId]) -> f64 {
    path_stats(tree, path).map_or(0.0, |stats| {
        stats.avg * CONFIDENCE_AVG_WEIGHT + stats.min * CONFIDENCE_MIN_WEIGHT
    })
}

/// Render a human-readable reasoning trace for a path.
///
/// One numbered line per step with its score to two decimals, followed by a
/// conclusion restating the final thought.
#[must_use]
pub fn reasoning_trace(tree: &ThoughtTree, path: &[NodeId]) -> String {
    let steps: Vec<String> = path
        .iter()
        .enumerate()
        .filter_map(|(i, &id)| {
            tree.get(id)
                .map(|node| format!("{}. {} (score: {:.2})", i + 1, node.thought, node.score))
        })
        .collect();

    let conclusion = path
        .last()
        .and_then(|&id| tree.get(id))
        .map_or_else(String::new, |node| node.thought.clone());

    format!(
        "Razonamiento mediante exploración de árbol:\n\n{}\n\nConclusión: {}",
        steps.join("\n"),
        conclusion
    )
}
