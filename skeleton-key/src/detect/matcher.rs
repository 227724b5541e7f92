//! Weighted lexical signal matching.
//!
//! Text and terms are lowercased and whitespace-collapsed before matching.
//! A category's score compounds its distinct matched terms:
//!
//! ```text
//! score = 1 - Π (1 - weight_i)
//! ```
//!
//! Repeats of a term raise the hit count but not the score.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, trace};

use lexicon::{Family, Lexicon};

use crate::detect::{CategoryScore, DetectionBundle, DetectionHit, FamilyScores};

/// Lowercase and collapse runs of whitespace to a single space.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scans text against a shared lexicon.
///
/// Stateless beyond its configuration; one matcher can serve many threads.
#[derive(Debug, Clone)]
pub struct SignalMatcher {
    lexicon: Arc<Lexicon>,
    whole_word: bool,
    trace_hits: bool,
}

impl SignalMatcher {
    /// Create a matcher with whole-word matching.
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            lexicon,
            whole_word: true,
            trace_hits: false,
        }
    }

    /// Toggle word-boundary checks. Off means plain substring matching.
    pub fn with_whole_word(mut self, whole_word: bool) -> Self {
        self.whole_word = whole_word;
        self
    }

    /// Log each hit at trace level.
    pub fn with_trace_hits(mut self, trace_hits: bool) -> Self {
        self.trace_hits = trace_hits;
        self
    }

    /// The lexicon this matcher reads.
    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    /// Score every category of one family.
    pub fn detect(&self, text: &str, family: Family) -> FamilyScores {
        self.detect_normalized(&normalize(text), family)
    }

    /// Score all four families.
    pub fn detect_all(&self, text: &str) -> DetectionBundle {
        let normalized = normalize(text);
        let bundle = DetectionBundle {
            frames: self.detect_normalized(&normalized, Family::Frame),
            masks: self.detect_normalized(&normalized, Family::Mask),
            spells: self.detect_normalized(&normalized, Family::Spell),
            prisons: self.detect_normalized(&normalized, Family::Prison),
            scanned_at: Utc::now(),
        };

        debug!(
            text_len = normalized.len(),
            frame = bundle.frames.max_score(),
            mask = bundle.masks.max_score(),
            spell = bundle.spells.max_score(),
            prison = bundle.prisons.max_score(),
            "Scanned text"
        );

        bundle
    }

    fn detect_normalized(&self, text: &str, family: Family) -> FamilyScores {
        let entries = self.lexicon.entries(family);
        if text.is_empty() || entries.is_empty() {
            return FamilyScores::zeroed(family);
        }

        let mut scores = Vec::with_capacity(entries.len());
        let mut hits = Vec::new();

        for entry in entries {
            let mut seen: HashSet<String> = HashSet::new();
            let mut remaining = 1.0_f64;
            let mut hit_count = 0;

            for signal in &entry.signals {
                let term = normalize(&signal.term);
                if term.is_empty() {
                    continue;
                }

                let positions = self.find(text, &term);
                if positions.is_empty() {
                    continue;
                }

                hit_count += positions.len();
                if seen.insert(term.clone()) {
                    remaining *= 1.0 - signal.weight.clamp(0.0, 1.0);
                }

                for position in positions {
                    if self.trace_hits {
                        trace!(
                            category = %entry.category,
                            term = %term,
                            position,
                            "Signal hit"
                        );
                    }
                    hits.push(DetectionHit {
                        category: entry.category,
                        term: term.clone(),
                        weight: signal.weight,
                        position,
                    });
                }
            }

            scores.push(CategoryScore {
                category: entry.category,
                score: (1.0 - remaining).clamp(0.0, 1.0),
                hit_count,
            });
        }

        scores.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.category.index().cmp(&b.category.index()))
        });
        hits.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then(a.category.index().cmp(&b.category.index()))
        });

        FamilyScores {
            family,
            scores,
            hits,
        }
    }

    /// Byte offsets of every non-overlapping occurrence of `term`.
    fn find(&self, text: &str, term: &str) -> Vec<usize> {
        text.match_indices(term)
            .map(|(pos, _)| pos)
            .filter(|&pos| !self.whole_word || on_word_boundaries(text, term, pos))
            .collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A boundary is only required where the term itself starts or ends with a
/// word character.
fn on_word_boundaries(text: &str, term: &str, pos: usize) -> bool {
    let starts_word = term.chars().next().is_some_and(is_word_char);
    let ends_word = term.chars().next_back().is_some_and(is_word_char);

    let before_ok = !starts_word || !text[..pos].chars().next_back().is_some_and(is_word_char);
    let after_ok = !ends_word
        || !text[pos + term.len()..]
            .chars()
            .next()
            .is_some_and(is_word_char);

    before_ok && after_ok
}
