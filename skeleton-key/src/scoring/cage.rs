//! Constraint (cage) scoring.
//!
//! ```text
//! base        = mean of active scores
//! compounded  = min(1, base · (1 + step · (active - 1)))
//! cage        = compounded · (1 - doors / (active + 1))
//! ```
//!
//! Each door the caller has found opens part of the cage; the `+ 1` keeps a
//! fully-doored cage from dropping straight to zero.

use serde::{Deserialize, Serialize};

use lexicon::{Category, Lexicon};

use crate::config::ScoringConfig;
use crate::detect::{CategoryScore, FamilyScores};

/// Cage score with the default threshold and interlock step.
pub fn cage_score(scores: &[CategoryScore], doors_found: usize) -> f64 {
    cage_score_with(scores, doors_found, &ScoringConfig::default())
}

/// Cage score with explicit scoring configuration.
pub fn cage_score_with(scores: &[CategoryScore], doors_found: usize, config: &ScoringConfig) -> f64 {
    let active: Vec<f64> = scores
        .iter()
        .filter(|s| s.is_active(config.active_threshold))
        .map(|s| s.score)
        .collect();
    if active.is_empty() {
        return 0.0;
    }

    let count = active.len() as f64;
    let base = active.iter().sum::<f64>() / count;
    let compounded = (base * (1.0 + config.interlock_step * (count - 1.0))).min(1.0);
    let open = (doors_found as f64 / (count + 1.0)).min(1.0);

    (compounded * (1.0 - open)).clamp(0.0, 1.0)
}

/// How confined a system reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CageLevel {
    /// No active constraints
    OpenField,
    MostlyFree,
    LightConstraint,
    ModerateConstraint,
    HeavyConstraint,
    TotalConfinement,
}

impl CageLevel {
    /// Level for a cage score.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.8 => Self::TotalConfinement,
            s if s >= 0.6 => Self::HeavyConstraint,
            s if s >= 0.4 => Self::ModerateConstraint,
            s if s >= 0.2 => Self::LightConstraint,
            _ => Self::MostlyFree,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenField => "open_field",
            Self::MostlyFree => "mostly_free",
            Self::LightConstraint => "light_constraint",
            Self::ModerateConstraint => "moderate_constraint",
            Self::HeavyConstraint => "heavy_constraint",
            Self::TotalConfinement => "total_confinement",
        }
    }
}

/// The way out of one active prison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    /// Prison category
    pub category: Category,
    /// Exit text from the lexicon
    pub exit: String,
    /// The stronger the prison, the harder the door (0.0 - 1.0)
    pub escape_difficulty: f64,
}

/// Doors for every active category in `prisons`, strongest prison first.
pub fn find_doors(prisons: &FamilyScores, lexicon: &Lexicon, threshold: f64) -> Vec<Door> {
    prisons
        .active(threshold)
        .filter_map(|s| {
            lexicon.entry(s.category).map(|entry| Door {
                category: s.category,
                exit: entry.mitigation.clone(),
                escape_difficulty: s.score,
            })
        })
        .collect()
}

/// Cage score with its interpretation and doors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CageReport {
    /// Cage score (0.0 - 1.0)
    pub score: f64,
    /// Number of active prisons
    pub active_count: usize,
    /// Doors the caller reported as found
    pub doors_found: usize,
    /// Interpretation
    pub level: CageLevel,
    /// Highest-scoring active prison
    pub most_elegant: Option<Category>,
    /// Available doors
    pub doors: Vec<Door>,
    /// One-paragraph reading of the figures
    pub insight: String,
}

/// Score a prison family and list its doors.
pub fn cage_report(
    prisons: &FamilyScores,
    doors_found: usize,
    lexicon: &Lexicon,
    config: &ScoringConfig,
) -> CageReport {
    let score = cage_score_with(&prisons.scores, doors_found, config);
    let active_count = prisons.active_count(config.active_threshold);
    let most_elegant = prisons
        .active(config.active_threshold)
        .max_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then(b.category.index().cmp(&a.category.index()))
        })
        .map(|s| s.category);

    let insight = match most_elegant {
        Some(category) => format!(
            "Cage score: {:.2}. {} interlocking constraints detected. The most elegant prison is {}; elegant prisons are loved by their inmates.",
            score, active_count, category
        ),
        None => "No active constraints. Nothing here is holding anyone in place.".to_string(),
    };

    CageReport {
        score,
        active_count,
        doors_found,
        level: if active_count == 0 {
            CageLevel::OpenField
        } else {
            CageLevel::from_score(score)
        },
        most_elegant,
        doors: find_doors(prisons, lexicon, config.active_threshold),
        insight,
    }
}
