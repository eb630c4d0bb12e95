//! Arena-backed thought tree.
//!
//! Nodes live in a flat vector and refer to their children by index, which
//! keeps ownership simple and makes the whole tree cheaply serializable. A
//! node's score is computed once at creation and never changes; re-scoring a
//! thought means creating a new node.

use serde::{Deserialize, Serialize};

/// Index of a node within a [`ThoughtTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Position in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Reasoning stance a branch was generated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BranchKind {
    /// The synthetic root of the tree.
    #[default]
    Root,
    /// Safe, proven, low-risk approach.
    Conservative,
    /// Original, off-the-beaten-path approach.
    Creative,
    /// Time/cost-efficient approach.
    Practical,
    /// Hybrid alternative proposed at deeper levels.
    Fallback,
}

impl BranchKind {
    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Conservative => "conservative",
            Self::Creative => "creative",
            Self::Practical => "practical",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for BranchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BranchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "root" => Ok(Self::Root),
            "conservative" => Ok(Self::Conservative),
            "creative" => Ok(Self::Creative),
            "practical" => Ok(Self::Practical),
            "fallback" => Ok(Self::Fallback),
            _ => Err(format!("Unknown branch kind: {s}")),
        }
    }
}

/// A single candidate reasoning step in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThoughtNode {
    /// The thought content.
    pub thought: String,
    /// Heuristic score in `[0, 1]`, fixed at creation.
    pub score: f64,
    /// Distance from the root (root is 0).
    pub depth: u32,
    /// Stance this node was generated with.
    pub kind: BranchKind,
    /// Child node indices; empty for leaves.
    pub children: Vec<NodeId>,
}

/// A scored reasoning tree built by the explorer.
///
/// The root is always present and occupies index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThoughtTree {
    nodes: Vec<ThoughtNode>,
}

impl ThoughtTree {
    /// Create a tree containing only a root node with score 1.0.
    #[must_use]
    pub fn new(root_thought: impl Into<String>) -> Self {
        Self {
            nodes: vec![ThoughtNode {
                thought: root_thought.into(),
                score: 1.0,
                depth: 0,
                kind: BranchKind::Root,
                children: Vec::new(),
            }],
        }
    }

    /// The root node's id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Look up a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&ThoughtNode> {
        self.nodes.get(id.index())
    }

    /// Append a child under `parent` and return its id.
    ///
    /// The child's depth is `parent.depth + 1`. Returns `None` if `parent`
    /// is not in the tree.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        thought: impl Into<String>,
        score: f64,
        kind: BranchKind,
    ) -> Option<NodeId> {
        let depth = self.get(parent)?.depth + 1;
        #[allow(clippy::cast_possible_truncation)]
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(ThoughtNode {
            thought: thought.into(),
            score,
            depth,
            kind,
            children: Vec::new(),
        });
        self.nodes.get_mut(parent.index())?.children.push(id);
        Some(id)
    }

    /// Total number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree is never empty; provided for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the node has no children.
    #[must_use]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.children.is_empty())
    }

    /// Iterate over all nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &ThoughtNode> {
        self.nodes.iter()
    }
}
