//! Branch generation.
//!
//! [`BranchGenerator`] is the engine's one pluggable seam: given a parent
//! thought, it proposes a small set of candidate next-thoughts. The engine
//! caps consumption to the configured branching factor, so implementations
//! may return fewer or more candidates.
//!
//! Determinism is the implementor's responsibility: for reproducible
//! searches (and meaningful property tests), `generate` must return the same
//! candidates for the same `(parent_thought, context, depth)`.
//!
//! [`TemplateBranchGenerator`] is the production implementation: it
//! classifies the thought into a query type by keyword matching and emits
//! one candidate per reasoning stance, adding a hybrid fallback stance once
//! the search is at least two levels deep.

use serde::{Deserialize, Serialize};

use super::context::ReasoningContext;
use super::tree::BranchKind;
use crate::error::SearchError;

/// Depth at which the fallback stance joins the candidate set.
const FALLBACK_MIN_DEPTH: u32 = 2;

/// Coarse classification of what the user is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    /// Add activities to the plan.
    Add,
    /// Remove activities from the plan.
    Remove,
    /// Optimize routes or schedules.
    Optimize,
    /// Reduce spending.
    Budget,
    /// Slow the pace down.
    Relax,
    /// Seek out adventure.
    Adventure,
    /// Anything else.
    General,
}

impl QueryType {
    /// Classify a thought by keyword matching (Spanish and English).
    ///
    /// Checks are ordered; the first matching category wins.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();

        if lower.contains("agregar") || lower.contains("add") {
            return Self::Add;
        }
        if lower.contains("quitar") || lower.contains("remove") {
            return Self::Remove;
        }
        if lower.contains("optimizar") || lower.contains("optimize") {
            return Self::Optimize;
        }
        if lower.contains("barato") || lower.contains("económico") {
            return Self::Budget;
        }
        if lower.contains("relajado") || lower.contains("descanso") {
            return Self::Relax;
        }
        if lower.contains("aventura") || lower.contains("explore") {
            return Self::Adventure;
        }
        Self::General
    }

    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Optimize => "optimize",
            Self::Budget => "budget",
            Self::Relax => "relax",
            Self::Adventure => "adventure",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A candidate next-thought proposed by a generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Candidate thought text.
    pub text: String,
    /// Stance the candidate was generated with.
    pub kind: BranchKind,
    /// Query type the parent thought was classified as.
    pub query_type: QueryType,
}

impl Branch {
    /// Create a new branch.
    #[must_use]
    pub fn new(text: impl Into<String>, kind: BranchKind, query_type: QueryType) -> Self {
        Self {
            text: text.into(),
            kind,
            query_type,
        }
    }
}

/// Proposes candidate next-thoughts for a parent thought.
///
/// Implementations should be pure with respect to their inputs. Errors are
/// not fatal: the explorer logs them and treats the node as a leaf.
#[cfg_attr(test, mockall::automock)]
pub trait BranchGenerator {
    /// Generate candidates for `parent_thought` at the given depth.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] when no candidates can be produced; the
    /// explorer degrades this to a leaf node.
    fn generate(
        &self,
        parent_thought: &str,
        context: &ReasoningContext,
        depth: u32,
    ) -> Result<Vec<Branch>, SearchError>;
}

/// Template-based deterministic branch generator.
///
/// Emits one candidate per stance: conservative, creative, practical, and
/// (from depth 2 on) a hybrid fallback. Template texts are fixed per
/// (stance, query type) pair, so output depends only on the inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateBranchGenerator;

impl TemplateBranchGenerator {
    /// Create a new template generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn conservative_text(query_type: QueryType) -> &'static str {
        match query_type {
            QueryType::Add => {
                "Agregar actividades SEGURAS y populares (templos top, restaurantes famosos). \
                 Priorizar seguridad y confiabilidad."
            }
            QueryType::Remove => {
                "Quitar solo actividades no esenciales. Mantener las experiencias core de Japón."
            }
            QueryType::Optimize => {
                "Optimizar rutas minimizando riesgo. Usar transporte público confiable."
            }
            QueryType::Budget => {
                "Reducir presupuesto SIN sacrificar seguridad. Opciones económicas pero confiables."
            }
            _ => {
                "Enfoque conservador: priorizar seguridad, confiabilidad y experiencias probadas."
            }
        }
    }

    fn creative_text(query_type: QueryType) -> &'static str {
        match query_type {
            QueryType::Add => {
                "Agregar actividades ÚNICAS y off-the-beaten-path. \
                 Experiencias locales auténticas."
            }
            QueryType::Remove => {
                "Quitar actividades turísticas. Enfocarse en descubrimientos únicos."
            }
            QueryType::Optimize => {
                "Optimizar para VARIEDAD y sorpresa. Mezclar tradición con modernidad."
            }
            QueryType::Budget => {
                "Buscar opciones económicas CREATIVAS (mercados locales, festivales gratuitos)."
            }
            _ => {
                "Enfoque creativo: priorizar originalidad, variedad y experiencias memorables."
            }
        }
    }

    fn practical_text(query_type: QueryType) -> &'static str {
        match query_type {
            QueryType::Add => {
                "Agregar actividades EFICIENTES en tiempo/dinero. \
                 Maximizar experiencia por yen."
            }
            QueryType::Remove => {
                "Quitar actividades que consumen mucho tiempo/dinero sin suficiente value."
            }
            QueryType::Optimize => {
                "Optimizar para EFICIENCIA: minimizar tiempo de viaje, maximizar experiencias."
            }
            QueryType::Budget => {
                "Reducir presupuesto con ESTRATEGIA: priorizar lo esencial, eliminar extras."
            }
            _ => "Enfoque práctico: priorizar eficiencia, value y optimización de recursos.",
        }
    }

    fn fallback_text() -> &'static str {
        "Considerando alternativa: Si las opciones anteriores no funcionan, \
         explorar enfoque híbrido que combine lo mejor de cada uno."
    }
}

impl BranchGenerator for TemplateBranchGenerator {
    fn generate(
        &self,
        parent_thought: &str,
        _context: &ReasoningContext,
        depth: u32,
    ) -> Result<Vec<Branch>, SearchError> {
        let query_type = QueryType::classify(parent_thought);

        let mut branches = vec![
            Branch::new(
                Self::conservative_text(query_type),
                BranchKind::Conservative,
                query_type,
            ),
            Branch::new(
                Self::creative_text(query_type),
                BranchKind::Creative,
                query_type,
            ),
            Branch::new(
                Self::practical_text(query_type),
                BranchKind::Practical,
                query_type,
            ),
        ];

        if depth >= FALLBACK_MIN_DEPTH {
            branches.push(Branch::new(
                Self::fallback_text(),
                BranchKind::Fallback,
                query_type,
            ));
        }

        Ok(branches)
    }
}
