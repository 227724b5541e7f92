//! Signal detection.
//!
//! Turns raw text into per-category scores for each family:
//! - **Matcher**: weighted lexical matching against the lexicon
//! - **Co-occurrence**: which categories show up together across a corpus

pub mod cooccurrence;
pub mod matcher;

pub use cooccurrence::{map_architecture, ArchitectureReport, CooccurrenceMatrix};
pub use matcher::{normalize, SignalMatcher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lexicon::{Category, Family};

/// One occurrence of a signal term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionHit {
    /// Category the term belongs to
    pub category: Category,
    /// Matched term
    pub term: String,
    /// Term weight
    pub weight: f64,
    /// Byte offset in the normalized text
    pub position: usize,
}

/// Score for one category in one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Category scored
    pub category: Category,
    /// Compound score (0.0 - 1.0)
    pub score: f64,
    /// Number of hits that contributed, repeats included
    pub hit_count: usize,
}

impl CategoryScore {
    /// Whether the score exceeds `threshold`.
    pub fn is_active(&self, threshold: f64) -> bool {
        self.score > threshold
    }
}

/// One family's result for one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyScores {
    /// Family scanned
    pub family: Family,
    /// Exactly one entry per category, descending by score
    pub scores: Vec<CategoryScore>,
    /// Every hit, in text order
    pub hits: Vec<DetectionHit>,
}

impl FamilyScores {
    /// All-zero result for a family.
    pub fn zeroed(family: Family) -> Self {
        Self {
            family,
            scores: family
                .categories()
                .into_iter()
                .map(|category| CategoryScore {
                    category,
                    score: 0.0,
                    hit_count: 0,
                })
                .collect(),
            hits: vec![],
        }
    }

    /// Score for a category, 0.0 if it belongs to another family.
    pub fn score(&self, category: Category) -> f64 {
        self.scores
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.score)
            .unwrap_or(0.0)
    }

    /// Highest-scoring entry.
    pub fn top(&self) -> Option<&CategoryScore> {
        self.scores.first()
    }

    /// Highest score, 0.0 when nothing matched.
    pub fn max_score(&self) -> f64 {
        self.top().map(|s| s.score).unwrap_or(0.0)
    }

    /// Entries above `threshold`, in ranked order.
    pub fn active(&self, threshold: f64) -> impl Iterator<Item = &CategoryScore> {
        self.scores.iter().filter(move |s| s.is_active(threshold))
    }

    /// Number of entries above `threshold`.
    pub fn active_count(&self, threshold: f64) -> usize {
        self.active(threshold).count()
    }
}

/// All four families' results for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionBundle {
    /// Frame family scores
    pub frames: FamilyScores,
    /// Mask family scores
    pub masks: FamilyScores,
    /// Spell family scores
    pub spells: FamilyScores,
    /// Prison family scores
    pub prisons: FamilyScores,
    /// When the scan ran
    pub scanned_at: DateTime<Utc>,
}

impl DetectionBundle {
    /// Scores for one family.
    pub fn family(&self, family: Family) -> &FamilyScores {
        match family {
            Family::Frame => &self.frames,
            Family::Mask => &self.masks,
            Family::Spell => &self.spells,
            Family::Prison => &self.prisons,
        }
    }

    /// Families in enumeration order.
    pub fn families(&self) -> [&FamilyScores; 4] {
        [&self.frames, &self.masks, &self.spells, &self.prisons]
    }

    /// Active categories across all families, family by family.
    pub fn active(&self, threshold: f64) -> Vec<&CategoryScore> {
        self.families()
            .into_iter()
            .flat_map(|f| f.active(threshold))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexicon::MaskType;

    #[test]
    fn test_zeroed_family() {
        let scores = FamilyScores::zeroed(Family::Mask);
        assert_eq!(scores.scores.len(), 8);
        assert_eq!(scores.max_score(), 0.0);
        assert_eq!(scores.active_count(0.0), 0);
        assert_eq!(scores.score(Category::Mask(MaskType::Tradition)), 0.0);
    }
}
