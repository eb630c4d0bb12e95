//! Heuristic thought scoring.
//!
//! [`HeuristicScorer`] maps a candidate thought to a score in `[0, 1]` from
//! five weighted criteria (relevance, feasibility, safety, creativity,
//! efficiency) plus contextual bonuses. The weight table, keyword tables,
//! and bonus table are all configuration: callers may substitute different
//! tables without touching the engine.
//!
//! Scoring is pure and total: whatever the inputs, the result is a finite
//! number clamped to the unit interval.

use super::context::{ReasoningContext, UserType};
use super::tree::BranchKind;
use crate::config::ScoringWeights;
use crate::error::ConfigError;

/// Per-stance multiplier table for a single criterion.
///
/// Each stance maps to a factor in `[0, 1]` that scales the criterion's
/// weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StanceFactors {
    /// Factor for conservative branches.
    pub conservative: f64,
    /// Factor for creative branches.
    pub creative: f64,
    /// Factor for practical branches.
    pub practical: f64,
    /// Factor for fallback branches.
    pub fallback: f64,
    /// Factor for the root (rarely scored, but total).
    pub root: f64,
}

impl StanceFactors {
    /// Look up the factor for a stance.
    #[must_use]
    pub const fn factor(&self, kind: BranchKind) -> f64 {
        match kind {
            BranchKind::Conservative => self.conservative,
            BranchKind::Creative => self.creative,
            BranchKind::Practical => self.practical,
            BranchKind::Fallback => self.fallback,
            BranchKind::Root => self.root,
        }
    }
}

/// Keyword and factor tables driving the heuristic.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringTables {
    /// Keywords granting full relevance credit.
    pub relevance_keywords: Vec<String>,
    /// Relevance factor when no keyword matches.
    pub relevance_miss_factor: f64,
    /// Keywords granting full feasibility credit.
    pub feasibility_strong_keywords: Vec<String>,
    /// Keywords granting partial (creative) feasibility credit.
    pub feasibility_creative_keywords: Vec<String>,
    /// Feasibility factor for creative-keyword matches.
    pub feasibility_creative_factor: f64,
    /// Feasibility factor when no keyword matches.
    pub feasibility_default_factor: f64,
    /// Safety factors per stance.
    pub safety: StanceFactors,
    /// Creativity factors per stance.
    pub creativity: StanceFactors,
    /// Efficiency factors per stance.
    pub efficiency: StanceFactors,
    /// Keywords that trigger the low-budget bonus.
    pub economic_keywords: Vec<String>,
}

impl Default for ScoringTables {
    fn default() -> Self {
        Self {
            relevance_keywords: vec!["japón".into(), "viaje".into(), "actividad".into()],
            relevance_miss_factor: 1.0 / 3.0,
            feasibility_strong_keywords: vec![
                "segura".into(),
                "confiable".into(),
                "eficiente".into(),
            ],
            feasibility_creative_keywords: vec!["única".into(), "creativa".into()],
            feasibility_creative_factor: 2.0 / 3.0,
            feasibility_default_factor: 0.5,
            safety: StanceFactors {
                conservative: 1.0,
                creative: 0.5,
                practical: 0.75,
                fallback: 0.5,
                root: 0.5,
            },
            creativity: StanceFactors {
                conservative: 0.5,
                creative: 1.0,
                practical: 0.5,
                fallback: 0.8,
                root: 0.5,
            },
            efficiency: StanceFactors {
                conservative: 0.8,
                creative: 0.5,
                practical: 1.0,
                fallback: 0.5,
                root: 0.5,
            },
            economic_keywords: vec!["económico".into()],
        }
    }
}

/// Contextual bonus table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextBonuses {
    /// Bonus for creative branches when the user is an explorer.
    pub explorer_creative: f64,
    /// Bonus for conservative branches when the user needs guidance.
    pub guided_conservative: f64,
    /// Bonus for economic wording when the budget is tight.
    pub budget_economic: f64,
}

impl Default for ContextBonuses {
    fn default() -> Self {
        Self {
            explorer_creative: 0.15,
            guided_conservative: 0.15,
            budget_economic: 0.10,
        }
    }
}

/// Weighted-criteria thought scorer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeuristicScorer {
    weights: ScoringWeights,
    tables: ScoringTables,
    bonuses: ContextBonuses,
}

impl HeuristicScorer {
    /// Create a scorer with the default weight, keyword, and bonus tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scorer with custom weights, validating them first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the weights do not sum to 1.0.
    pub fn with_weights(weights: ScoringWeights) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self {
            weights,
            ..Self::default()
        })
    }

    /// Replace the keyword/factor tables.
    #[must_use]
    pub fn with_tables(mut self, tables: ScoringTables) -> Self {
        self.tables = tables;
        self
    }

    /// Replace the contextual bonus table.
    #[must_use]
    pub const fn with_bonuses(mut self, bonuses: ContextBonuses) -> Self {
        self.bonuses = bonuses;
        self
    }

    /// Score a candidate thought.
    ///
    /// Always returns a finite value in `[0, 1]`; a non-finite intermediate
    /// (possible only with pathological custom tables) is coerced to 0.0 so
    /// the candidate becomes prunable instead of poisoning the search.
    #[must_use]
    pub fn score(&self, text: &str, kind: BranchKind, context: &ReasoningContext) -> f64 {
        let lower = text.to_lowercase();
        let mut score = 0.0;

        let relevance_factor = if contains_any(&lower, &self.tables.relevance_keywords) {
            1.0
        } else {
            self.tables.relevance_miss_factor
        };
        score += self.weights.relevance * relevance_factor;

        let feasibility_factor = if contains_any(&lower, &self.tables.feasibility_strong_keywords)
        {
            1.0
        } else if contains_any(&lower, &self.tables.feasibility_creative_keywords) {
            self.tables.feasibility_creative_factor
        } else {
            self.tables.feasibility_default_factor
        };
        score += self.weights.feasibility * feasibility_factor;

        score += self.weights.safety * self.tables.safety.factor(kind);
        score += self.weights.creativity * self.tables.creativity.factor(kind);
        score += self.weights.efficiency * self.tables.efficiency.factor(kind);

        // Bonuses are an ordered chain: at most one applies.
        if context.user_type == Some(UserType::Explorer) && kind == BranchKind::Creative {
            score += self.bonuses.explorer_creative;
        } else if context.user_type == Some(UserType::NeedsGuidance)
            && kind == BranchKind::Conservative
        {
            score += self.bonuses.guided_conservative;
        } else if context.budget_low && contains_any(&lower, &self.tables.economic_keywords) {
            score += self.bonuses.budget_economic;
        }

        if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            tracing::warn!(kind = %kind, "Non-finite score coerced to 0.0");
            0.0
        }
    }
}

/// Whether `text` (already lowercased) contains any of the keywords.
fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| text.contains(k.as_str()))
}
