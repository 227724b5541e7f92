//! Signal Lexicon for the Skeleton Key detector
//!
//! This crate holds the immutable knowledge the detector matches against:
//! four closed families of eight categories, each category carrying weighted
//! signal terms and the text that explains what a match means.
//!
//! - **Frame**: implicit assumptions (normative, linguistic, institutional, ...)
//! - **Mask**: performed identities (authority, benevolence, neutrality, ...)
//! - **Spell**: persuasive narratives (origin myth, fear, scarcity, ...)
//! - **Prison**: systemic constraints (choice architecture, debt, ...)
//!
//! # Key Components
//!
//! - [`Lexicon`]: validated, read-only store of all entries
//! - [`FamilyProvider`]: trait for family-specific built-in content
//! - [`Category`]: a category from any family, with a stable reference string
//!
//! # Example
//!
//! ```
//! use lexicon::{Category, Family, Lexicon, MaskType};
//!
//! let lexicon = Lexicon::builtin();
//! assert_eq!(lexicon.entries(Family::Mask).len(), 8);
//!
//! let entry = lexicon.entry(Category::Mask(MaskType::Inevitability)).unwrap();
//! assert!(entry.signals.iter().any(|s| s.term == "no alternative"));
//! ```

pub mod families;
pub mod store;
pub mod types;

// Re-export main types
pub use families::FamilyProvider;
pub use store::{Lexicon, LexiconError};
pub use types::*;
