//! The validated lexicon store.
//!
//! A [`Lexicon`] is assembled once, validated, and then only read. Callers
//! share it behind an `Arc`; there is no process-wide instance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::families::{
    FamilyProvider, FrameSignals, MaskSignals, PrisonSignals, SpellSignals,
};
use crate::types::{Category, Family, LexiconEntry, SignalTerm, FAMILY_SIZE};

/// Error types for lexicon loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// A reference string did not name a known family or category
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// A family is missing one of its categories
    #[error("Missing category: {0}")]
    MissingCategory(String),

    /// A category appears more than once
    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),

    /// A category has no signal terms
    #[error("Category has no signals: {0}")]
    EmptySignals(String),

    /// A signal weight is outside (0, 1]
    #[error("Invalid weight {weight} for '{term}' in {category}")]
    InvalidWeight {
        category: String,
        term: String,
        weight: f64,
    },

    /// Malformed lexicon document
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// On-disk shape of a custom lexicon.
#[derive(Debug, Serialize, Deserialize)]
struct LexiconDocument {
    entries: Vec<LexiconEntry>,
}

/// Immutable mapping from category to its entry.
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// Entries per family, each ordered by enumeration index
    families: BTreeMap<Family, Vec<LexiconEntry>>,
}

impl Lexicon {
    /// The built-in lexicon assembled from the four family providers.
    pub fn builtin() -> Self {
        let providers: Vec<Box<dyn FamilyProvider>> = vec![
            Box::new(FrameSignals),
            Box::new(MaskSignals),
            Box::new(SpellSignals),
            Box::new(PrisonSignals),
        ];

        let mut families = BTreeMap::new();
        for provider in providers {
            let mut entries = provider.entries();
            entries.sort_by_key(|e| e.category.index());
            families.insert(provider.family(), entries);
        }

        Self { families }
    }

    /// Build a lexicon from arbitrary entries, validating the closed-set invariants.
    pub fn from_entries(entries: Vec<LexiconEntry>) -> Result<Self, LexiconError> {
        let mut families: BTreeMap<Family, Vec<LexiconEntry>> = BTreeMap::new();

        for mut entry in entries {
            for signal in &mut entry.signals {
                signal.term = signal.term.to_lowercase();
            }
            families.entry(entry.category.family()).or_default().push(entry);
        }

        for entries in families.values_mut() {
            entries.sort_by_key(|e| e.category.index());
        }

        let lexicon = Self { families };
        lexicon.validate()?;

        tracing::debug!(
            signals = lexicon.signal_count(),
            "Loaded custom lexicon"
        );

        Ok(lexicon)
    }

    /// Load a lexicon from YAML.
    ///
    /// ```yaml
    /// entries:
    ///   - category: "mask:authority"
    ///     signals:
    ///       - { term: leadership, weight: 0.4 }
    ///     question: "..."
    ///     hidden_cost: "..."
    ///     mitigation: "..."
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, LexiconError> {
        let doc: LexiconDocument = serde_yaml::from_str(yaml)?;
        Self::from_entries(doc.entries)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, LexiconError> {
        let doc = LexiconDocument {
            entries: self.families.values().flatten().cloned().collect(),
        };
        Ok(serde_yaml::to_string(&doc)?)
    }

    /// Check that every family holds exactly its eight categories, each once,
    /// with at least one signal and all weights in (0, 1].
    pub fn validate(&self) -> Result<(), LexiconError> {
        for family in Family::ALL {
            let entries = self.entries(family);

            for category in family.categories() {
                let count = entries.iter().filter(|e| e.category == category).count();
                match count {
                    0 => return Err(LexiconError::MissingCategory(category.reference())),
                    1 => {}
                    _ => return Err(LexiconError::DuplicateCategory(category.reference())),
                }
            }
            debug_assert_eq!(entries.len(), FAMILY_SIZE);

            for entry in entries {
                if entry.signals.is_empty() {
                    return Err(LexiconError::EmptySignals(entry.category.reference()));
                }
                if let Some(bad) = entry.signals.iter().find(|s| !valid_weight(s)) {
                    return Err(LexiconError::InvalidWeight {
                        category: entry.category.reference(),
                        term: bad.term.clone(),
                        weight: bad.weight,
                    });
                }
            }
        }
        Ok(())
    }

    /// Entries for a family in enumeration order.
    pub fn entries(&self, family: Family) -> &[LexiconEntry] {
        self.families
            .get(&family)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Look up a single category.
    pub fn entry(&self, category: Category) -> Option<&LexiconEntry> {
        self.entries(category.family())
            .iter()
            .find(|e| e.category == category)
    }

    /// Total number of signal terms across all families.
    pub fn signal_count(&self) -> usize {
        self.families
            .values()
            .flatten()
            .map(|e| e.signals.len())
            .sum()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

fn valid_weight(signal: &SignalTerm) -> bool {
    signal.weight > 0.0 && signal.weight <= 1.0
}
