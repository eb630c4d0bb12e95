//! End-to-end properties of the search engine.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use proptest::prelude::*;
use thought_search::config::SearchConfig;
use thought_search::pruner::{GenericPruner, ScoredNode};
use thought_search::search::{
    all_paths, BranchKind, Exploration, ReasoningContext, TemplateBranchGenerator, TreeExplorer,
    UserType,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn default_explorer() -> TreeExplorer<TemplateBranchGenerator> {
    init_tracing();
    TreeExplorer::new(TemplateBranchGenerator::new(), SearchConfig::default())
}

#[test]
fn explore_is_deterministic() {
    let explorer = default_explorer();
    let context = ReasoningContext::new()
        .with_domain("Japan trip")
        .with_user_type(UserType::Explorer);

    let first = explorer.explore("agregar templo", &context);
    let second = explorer.explore("agregar templo", &context);

    assert_eq!(first, second);
}

#[test]
fn explore_bounded_tree_at_depth_two() {
    let config = SearchConfig::default()
        .with_max_depth(2)
        .with_branching_factor(3)
        .with_min_score(0.3);
    let explorer = TreeExplorer::new(TemplateBranchGenerator::new(), config);
    let context = ReasoningContext::new().with_domain("Japan trip");

    let result = explorer.explore("agregar templo", &context);

    assert!(result.total_nodes <= 13);
    assert!(!result.best_path.is_empty());
    assert!(result.best_path[0].starts_with("Entender query:"));
    assert!((0.0..=1.0).contains(&result.confidence));
}

#[test]
fn surviving_nodes_respect_min_score_and_branching_factor() {
    let config = SearchConfig::default()
        .with_min_score(0.5)
        .with_branching_factor(2);
    let explorer = TreeExplorer::new(TemplateBranchGenerator::new(), config.clone());
    let Exploration { tree, .. } =
        explorer.build_tree("optimizar la ruta", &ReasoningContext::new());

    for node in tree.iter() {
        if node.kind != BranchKind::Root {
            assert!(node.score >= config.min_score);
        }
        assert!(node.children.len() <= config.branching_factor as usize);
    }
}

#[test]
fn best_path_is_a_real_tree_path() {
    let explorer = default_explorer();
    let Exploration { tree, .. } = explorer.build_tree("agregar templo", &ReasoningContext::new());
    let result = explorer.explore("agregar templo", &ReasoningContext::new());

    let path_thoughts: Vec<Vec<String>> = all_paths(&tree)
        .iter()
        .map(|path| {
            path.iter()
                .map(|&id| tree.get(id).unwrap().thought.clone())
                .collect()
        })
        .collect();

    assert!(path_thoughts.contains(&result.best_path));
}

#[test]
fn confidence_matches_blend_of_path_scores() {
    let explorer = default_explorer();
    let result = explorer.explore("un plan económico", &ReasoningContext::new());

    let avg: f64 = result.scores.iter().sum::<f64>() / result.scores.len() as f64;
    let min = result.scores.iter().copied().fold(f64::INFINITY, f64::min);

    assert!((result.confidence - (avg * 0.7 + min * 0.3)).abs() < 1e-9);
}

#[test]
fn context_bonus_shifts_best_path() {
    let explorer = default_explorer();

    let neutral = explorer.explore("agregar templo", &ReasoningContext::new());
    let exploring = explorer.explore(
        "agregar templo",
        &ReasoningContext::new().with_user_type(UserType::Explorer),
    );

    // The explorer bonus lifts creative branches; scores must differ.
    assert_ne!(neutral.scores, exploring.scores);
}

#[test]
fn explorer_and_pruner_agree_on_thresholds() {
    let config = SearchConfig::default().with_min_score(0.5);
    let explorer = TreeExplorer::new(TemplateBranchGenerator::new(), config.clone());
    let Exploration { tree, .. } =
        explorer.build_tree("agregar templo", &ReasoningContext::new());

    // Rebuild the explorer's tree as a generic scored tree and prune it with
    // the same thresholds; nothing further should be removed.
    fn convert(
        tree: &thought_search::search::ThoughtTree,
        id: thought_search::search::NodeId,
    ) -> ScoredNode<String> {
        let node = tree.get(id).unwrap();
        let mut converted = ScoredNode::new(node.thought.clone(), node.score);
        for &child in &node.children {
            converted = converted.with_child(convert(tree, child));
        }
        converted
    }

    let mut generic = convert(&tree, tree.root());
    let pruned = GenericPruner::from_search_config(&config).prune(&mut generic);
    assert_eq!(pruned, 0);
}

#[test]
fn node_budget_caps_total_nodes() {
    let config = SearchConfig::default().with_node_budget(4);
    let explorer = TreeExplorer::new(TemplateBranchGenerator::new(), config);

    let result = explorer.explore("agregar templo", &ReasoningContext::new());
    assert!(result.total_nodes <= 4);
    assert!(!result.best_path.is_empty());
}

#[test]
fn keep_at_least_one_avoids_barren_root() {
    let config = SearchConfig::default()
        .with_min_score(0.99)
        .with_keep_at_least_one(true);
    let explorer = TreeExplorer::new(TemplateBranchGenerator::new(), config);

    let result = explorer.explore("agregar templo", &ReasoningContext::new());
    assert!(result.best_path.len() > 1);
}

proptest! {
    #[test]
    fn scores_always_in_unit_interval(query in ".{0,60}") {
        let result = default_explorer().explore(&query, &ReasoningContext::new());
        prop_assert!(result.scores.iter().all(|s| (0.0..=1.0).contains(s)));
        prop_assert!((0.0..=1.0).contains(&result.confidence));
    }

    #[test]
    fn explore_never_panics_and_stays_bounded(
        query in ".{0,60}",
        max_depth in 1_u32..5,
        branching in 1_u32..5,
    ) {
        let config = SearchConfig::default()
            .with_max_depth(max_depth)
            .with_branching_factor(branching);
        let explorer = TreeExplorer::new(TemplateBranchGenerator::new(), config);
        let result = explorer.explore(&query, &ReasoningContext::new());

        // Worst case is a full tree: sum of branching^d for d in 0..=max_depth.
        let mut bound: u64 = 0;
        let mut level: u64 = 1;
        for _ in 0..=max_depth {
            bound += level;
            level *= u64::from(branching);
        }
        prop_assert!(u64::from(result.total_nodes) <= bound);
        prop_assert!(!result.best_path.is_empty());
    }

    #[test]
    fn repeated_exploration_is_stable(query in "[a-záéíóú ]{1,40}") {
        let explorer = default_explorer();
        let context = ReasoningContext::new().with_budget_low(true);
        let first = explorer.explore(&query, &context);
        let second = explorer.explore(&query, &context);
        prop_assert_eq!(first, second);
    }
}
