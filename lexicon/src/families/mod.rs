//! Built-in family content.
//!
//! Each family provides its eight entries. Multi-word phrases carry more
//! weight than single words because they are less likely to appear by
//! accident.

pub mod frame;
pub mod mask;
pub mod prison;
pub mod spell;

pub use frame::FrameSignals;
pub use mask::MaskSignals;
pub use prison::PrisonSignals;
pub use spell::SpellSignals;

use crate::types::{Category, Family, LexiconEntry, SignalTerm};

/// Trait for family-specific lexicon content.
pub trait FamilyProvider: Send + Sync {
    /// Get the family this provider handles
    fn family(&self) -> Family;

    /// Get the built-in entries for this family
    fn entries(&self) -> Vec<LexiconEntry>;
}

pub(crate) fn entry(
    category: Category,
    signals: &[(&str, f64)],
    question: &str,
    hidden_cost: &str,
    mitigation: &str,
) -> LexiconEntry {
    LexiconEntry {
        category,
        signals: signals
            .iter()
            .map(|(term, weight)| SignalTerm::new(term, *weight))
            .collect(),
        question: question.to_string(),
        hidden_cost: hidden_cost.to_string(),
        mitigation: mitigation.to_string(),
    }
}
