//! Influence graph.
//!
//! Tracks who acts on whom and how openly. Actors with heavy outgoing
//! influence that is rarely seen are ranked as puppeteers.

pub mod influence;
pub mod ranking;

pub use influence::InfluenceGraph;
pub use ranking::rank_puppeteers;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A node in the influence graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Actor identifier
    pub id: String,
    /// Times this actor has been observed
    pub evidence_count: u32,
    /// Whether the actor holds titled, formal power
    pub formal_power: bool,
}

impl Actor {
    /// Create an actor on first mention.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            evidence_count: 0,
            formal_power: false,
        }
    }
}

/// A directed influence relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceEdge {
    /// Actor exerting influence
    pub source: String,
    /// Actor being influenced
    pub target: String,
    /// Strength of influence (0.0 - 1.0)
    pub strength: f64,
    /// How visible the relationship is (0.0 - 1.0)
    pub visibility: f64,
    /// Times this edge has been observed
    pub evidence_count: u32,
}

/// One influence relationship seen by a caller, before it is merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeObservation {
    /// Actor exerting influence
    pub source: String,
    /// Actor being influenced
    pub target: String,
    /// Observed strength, clamped on merge
    pub strength: f64,
    /// Observed visibility, clamped on merge
    pub visibility: f64,
}

impl EdgeObservation {
    /// Create an observation.
    pub fn new(source: impl Into<String>, target: impl Into<String>, strength: f64, visibility: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            strength,
            visibility,
        }
    }
}

/// How a repeated observation updates an existing edge's strength.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMergePolicy {
    /// Keep the larger strength
    #[default]
    Max,
    /// Add strengths, capped at 1.0
    Sum,
}

impl EdgeMergePolicy {
    /// Combine an existing strength with a new observation.
    pub fn merge(&self, existing: f64, observed: f64) -> f64 {
        match self {
            Self::Max => existing.max(observed),
            Self::Sum => (existing + observed).min(1.0),
        }
    }
}

/// A ranked puppeteer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuppeteerRank {
    /// Actor identifier
    pub actor: String,
    /// Sum of outgoing strengths
    pub out_weight: f64,
    /// Mean visibility of incoming edges, 0.0 with none
    pub visibility: f64,
    /// Number of outgoing edges
    pub out_degree: usize,
}

impl PuppeteerRank {
    /// Ranking key: influence minus visibility.
    pub fn concealment(&self) -> f64 {
        self.out_weight - self.visibility
    }
}

/// Consistent view of the whole network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// Every actor, by id
    pub actors: Vec<Actor>,
    /// Every edge, by (source, target)
    pub edges: Vec<InfluenceEdge>,
    /// Edges below the hidden-visibility cutoff
    pub hidden_edges: Vec<InfluenceEdge>,
    /// Hidden edges over all edges, 0.0 with none
    pub hidden_edge_ratio: f64,
    /// Ranked puppeteers
    pub puppeteers: Vec<PuppeteerRank>,
    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
}
