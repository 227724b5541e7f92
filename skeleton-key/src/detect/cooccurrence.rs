//! Co-occurrence mapping across a corpus.
//!
//! Counts how often pairs of active categories appear in the same text. The
//! matrix spans all 32 categories; the diagonal holds how often each category
//! was active at all.

use serde::{Deserialize, Serialize};
use tracing::debug;

use lexicon::{Category, Family, FAMILY_SIZE};

use crate::detect::{DetectionBundle, SignalMatcher};

const SIZE: usize = FAMILY_SIZE * 4;

fn slot(category: Category) -> usize {
    category.family() as usize * FAMILY_SIZE + category.index()
}

fn all_categories() -> Vec<Category> {
    Family::ALL
        .into_iter()
        .flat_map(|family| family.categories())
        .collect()
}

/// Symmetric pair counts over every category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CooccurrenceMatrix {
    /// Number of texts scanned
    pub corpus_size: usize,
    /// Threshold a score had to exceed to count
    pub threshold: f64,
    /// Row and column order
    pub categories: Vec<Category>,
    /// Raw counts, `counts[i][j] == counts[j][i]`
    counts: Vec<Vec<usize>>,
}

impl CooccurrenceMatrix {
    /// Empty matrix.
    pub fn new(threshold: f64) -> Self {
        Self {
            corpus_size: 0,
            threshold,
            categories: all_categories(),
            counts: vec![vec![0; SIZE]; SIZE],
        }
    }

    /// Build from already-scanned texts.
    pub fn from_bundles<'a>(
        bundles: impl IntoIterator<Item = &'a DetectionBundle>,
        threshold: f64,
    ) -> Self {
        let mut matrix = Self::new(threshold);
        for bundle in bundles {
            matrix.record(bundle);
        }
        matrix
    }

    /// Add one text's result.
    pub fn record(&mut self, bundle: &DetectionBundle) {
        let active: Vec<usize> = bundle
            .active(self.threshold)
            .into_iter()
            .map(|s| slot(s.category))
            .collect();

        for (i, &a) in active.iter().enumerate() {
            self.counts[a][a] += 1;
            for &b in &active[i + 1..] {
                self.counts[a][b] += 1;
                self.counts[b][a] += 1;
            }
        }
        self.corpus_size += 1;
    }

    /// Texts in which both categories were active. For `a == b`, texts in
    /// which `a` was active.
    pub fn count(&self, a: Category, b: Category) -> usize {
        self.counts[slot(a)][slot(b)]
    }

    /// Count divided by corpus size, 0.0 for an empty corpus.
    pub fn value(&self, a: Category, b: Category) -> f64 {
        if self.corpus_size == 0 {
            return 0.0;
        }
        self.count(a, b) as f64 / self.corpus_size as f64
    }

    /// Summarize the matrix.
    pub fn report(&self) -> ArchitectureReport {
        let mut frequency: Vec<(Category, usize)> = self
            .categories
            .iter()
            .map(|&c| (c, self.count(c, c)))
            .filter(|&(_, n)| n > 0)
            .collect();
        frequency.sort_by(|a, b| b.1.cmp(&a.1).then(slot(a.0).cmp(&slot(b.0))));

        let mut strongest_pair: Option<(Category, Category, usize)> = None;
        for (i, &a) in self.categories.iter().enumerate() {
            for &b in &self.categories[i + 1..] {
                let n = self.count(a, b);
                if n > 0 && strongest_pair.map_or(true, |(_, _, best)| n > best) {
                    strongest_pair = Some((a, b, n));
                }
            }
        }

        let total_active: usize = frequency.iter().map(|(_, n)| n).sum();
        let density = total_active as f64 / self.corpus_size.max(1) as f64;

        ArchitectureReport {
            corpus_size: self.corpus_size,
            total_active,
            dominant: frequency.first().map(|&(c, _)| c),
            frequency,
            strongest_pair,
            density,
        }
    }
}

/// Corpus-level summary of which categories dominate and reinforce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureReport {
    /// Number of texts scanned
    pub corpus_size: usize,
    /// Active category occurrences across the corpus
    pub total_active: usize,
    /// Most frequently active category
    pub dominant: Option<Category>,
    /// Active counts, most frequent first
    pub frequency: Vec<(Category, usize)>,
    /// Pair that co-occurred most often
    pub strongest_pair: Option<(Category, Category, usize)>,
    /// Active categories per text
    pub density: f64,
}

impl ArchitectureReport {
    /// One-paragraph reading of the report.
    pub fn insight(&self) -> String {
        let Some(&(top, count)) = self.frequency.first() else {
            return "No active categories. Where nothing registers, the framing may be total."
                .to_string();
        };

        let mut insight = format!("The dominant pattern is {} (active in {} texts). ", top, count);
        if let Some((a, b, n)) = self.strongest_pair {
            insight.push_str(&format!(
                "The strongest reinforcement is {} with {} (together in {} texts); look for how one naturalizes the other.",
                a, b, n
            ));
        }
        insight
    }
}

/// Scan a corpus and build its co-occurrence matrix.
pub fn map_architecture<S: AsRef<str>>(
    matcher: &SignalMatcher,
    texts: &[S],
    threshold: f64,
) -> CooccurrenceMatrix {
    let bundles: Vec<DetectionBundle> = texts
        .iter()
        .map(|t| matcher.detect_all(t.as_ref()))
        .collect();
    let matrix = CooccurrenceMatrix::from_bundles(&bundles, threshold);

    debug!(
        corpus_size = matrix.corpus_size,
        threshold,
        "Mapped co-occurrence"
    );

    matrix
}
