//! Domain context supplied by the caller.
//!
//! The engine itself knows nothing about trips or itineraries; everything it
//! learns about the surrounding domain arrives through this context and
//! influences scoring bonuses only.

use serde::{Deserialize, Serialize};

/// Coarse traveler profile used for contextual scoring bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserType {
    /// Prefers original, off-the-beaten-path options.
    Explorer,
    /// Prefers safe, well-trodden options.
    NeedsGuidance,
}

/// Hints about the user and domain for a single search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReasoningContext {
    /// Domain label woven into the root thought (e.g. `viaje a Japón`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Traveler profile, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
    /// Whether the user is operating under a tight budget.
    #[serde(default)]
    pub budget_low: bool,
}

impl ReasoningContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the domain label.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the traveler profile.
    #[must_use]
    pub const fn with_user_type(mut self, user_type: UserType) -> Self {
        self.user_type = Some(user_type);
        self
    }

    /// Mark the context as budget-constrained.
    #[must_use]
    pub const fn with_budget_low(mut self, budget_low: bool) -> Self {
        self.budget_low = budget_low;
        self
    }
}
