//! Analysis results and how deep they see.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detect::{ArchitectureReport, CooccurrenceMatrix, DetectionBundle, FamilyScores};
use crate::graph::{EdgeObservation, InfluenceEdge};
use crate::scoring::{CageReport, PotencyReport};

/// Edges needed for the graph to count fully toward awareness.
const AWARENESS_EDGE_SATURATION: f64 = 5.0;

/// Active categories needed for a family to count fully toward awareness.
const AWARENESS_FAMILY_SATURATION: f64 = 3.0;

/// How far an analysis has seen into a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeeingDepth {
    /// Content only
    Surface,
    /// Recurring shapes
    Pattern,
    /// The architecture behind the shapes
    Structure,
    /// What generates the architecture
    Generative,
}

impl SeeingDepth {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Surface => "surface",
            Self::Pattern => "pattern",
            Self::Structure => "structure",
            Self::Generative => "generative",
        }
    }

    /// Short reading of the depth.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Surface => {
                "Seeing content, what is said. The architecture that shapes the saying is still invisible."
            }
            Self::Pattern => {
                "Seeing patterns that recur across contexts. Next is the structure that generates them."
            }
            Self::Structure => {
                "Seeing architecture, the structures that shape perception and possibility."
            }
            Self::Generative => {
                "Seeing the forces and incentives that produce the architecture."
            }
        }
    }
}

/// Name given to systems the caller does not name.
pub const DEFAULT_SYSTEM_NAME: &str = "Unknown System";

/// What the caller knows about a text beyond its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeOptions {
    /// Name of the system the text describes
    pub system_name: String,
    /// Surrounding text, scanned for frames only
    pub context: String,
    /// Influence relationships observed alongside the text
    pub edges: Vec<EdgeObservation>,
}

impl AnalyzeOptions {
    /// Options naming the analyzed system.
    pub fn new(system_name: impl Into<String>) -> Self {
        Self {
            system_name: system_name.into(),
            ..Self::default()
        }
    }

    /// Add surrounding context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Add an observed influence edge.
    pub fn with_edge(mut self, edge: EdgeObservation) -> Self {
        self.edges.push(edge);
        self
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            system_name: DEFAULT_SYSTEM_NAME.to_string(),
            context: String::new(),
            edges: Vec::new(),
        }
    }
}

/// Mean over the four families and the graph of how much has been mapped.
///
/// Each family contributes `min(active / 3, 1)`; the graph contributes
/// `min(edges / 5, 1)`.
pub fn awareness_score(bundle: &DetectionBundle, threshold: f64, edge_count: usize) -> f64 {
    let mut components: Vec<f64> = bundle
        .families()
        .into_iter()
        .map(|f| (f.active_count(threshold) as f64 / AWARENESS_FAMILY_SATURATION).min(1.0))
        .collect();
    components.push((edge_count as f64 / AWARENESS_EDGE_SATURATION).min(1.0));

    components.iter().sum::<f64>() / components.len() as f64
}

/// Depth reached by a bundle with the given awareness.
pub fn seeing_depth(bundle: &DetectionBundle, threshold: f64, awareness: f64) -> SeeingDepth {
    let frames = bundle.frames.active_count(threshold);
    let spells = bundle.spells.active_count(threshold);
    let prisons = bundle.prisons.active_count(threshold);
    let any_active = !bundle.active(threshold).is_empty();

    if any_active && awareness > 0.6 {
        SeeingDepth::Generative
    } else if frames > 2 && spells > 1 && prisons > 1 {
        SeeingDepth::Structure
    } else if frames > 0 || spells > 0 {
        SeeingDepth::Pattern
    } else {
        SeeingDepth::Surface
    }
}

/// Everything one text revealed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Unique analysis ID
    pub analysis_id: String,
    /// Detector that produced it
    pub detector_id: String,
    /// System the text describes
    pub system_name: String,
    /// Per-family scores and hits
    pub bundle: DetectionBundle,
    /// Spell potency
    pub potency: PotencyReport,
    /// Prison cage score and doors
    pub cage: CageReport,
    /// Performer actors mentioned for active masks
    pub performers: Vec<String>,
    /// Edges observed with this text, as merged into the graph
    pub edges: Vec<InfluenceEdge>,
    /// Awareness (0.0 - 1.0)
    pub awareness: f64,
    /// Depth of seeing
    pub depth: SeeingDepth,
    /// When the analysis finished
    pub analyzed_at: DateTime<Utc>,
}

/// Result of scanning a corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusReport {
    /// One analysis per text, in input order
    pub analyses: Vec<Analysis>,
    /// Co-occurrence across the corpus
    pub matrix: CooccurrenceMatrix,
    /// Summary of the matrix
    pub architecture: ArchitectureReport,
    /// Potency of each spell's strongest showing across the corpus
    pub spell_potency: PotencyReport,
    /// Cage of each prison's strongest showing across the corpus
    pub cage: CageReport,
}

/// Per-category maximum across several results of one family.
pub(crate) fn strongest<'a>(
    family: lexicon::Family,
    results: impl IntoIterator<Item = &'a FamilyScores>,
) -> FamilyScores {
    let mut merged = FamilyScores::zeroed(family);
    for result in results {
        for score in &result.scores {
            if let Some(slot) = merged
                .scores
                .iter_mut()
                .find(|s| s.category == score.category)
            {
                slot.score = slot.score.max(score.score);
                slot.hit_count += score.hit_count;
            }
        }
    }
    merged.scores.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.category.index().cmp(&b.category.index()))
    });
    merged
}
