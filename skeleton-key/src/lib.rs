//! Skeleton Key - structural pattern detection in text
//!
//! Scans text for four families of recurring structure, scores them, tracks
//! who influences whom, and leaves a hash-chained trail of what it found:
//!
//! - **Detection**: weighted lexical matching per category
//! - **Co-occurrence**: which categories reinforce each other across a corpus
//! - **Influence graph**: actors, edges and puppeteer ranking
//! - **Scoring**: spell potency (entropy) and prison cage score
//! - **Crumbs**: one verifiable record per active category
//!
//! # Architecture
//!
//! ```text
//! text ──► SignalMatcher ──► DetectionBundle ──┬──► potency / cage
//!                                              ├──► InfluenceGraph (mask performers)
//!                                              └──► generate_crumbs ──► Trail
//! ```
//!
//! # Example
//!
//! ```
//! use skeleton_key::{SkeletonConfig, SkeletonKey};
//! use lexicon::{Category, MaskType};
//!
//! let key = SkeletonKey::new(SkeletonConfig::new("doc"));
//! let analysis = key
//!     .analyze("The market naturally rewards merit; there is no alternative to this system")
//!     .unwrap();
//!
//! assert!(analysis.bundle.masks.score(Category::Mask(MaskType::Meritocracy)) > 0.0);
//! let records = key.leave_trail(&analysis).unwrap();
//! assert!(!records.is_empty());
//! ```

pub mod analysis;
pub mod config;
pub mod crumbs;
pub mod detect;
pub mod graph;
pub mod key;
pub mod scoring;
pub mod types;

// Re-export main types
pub use analysis::{Analysis, AnalyzeOptions, CorpusReport, SeeingDepth};
pub use config::SkeletonConfig;
pub use key::{CancelFlag, SkeletonKey};
pub use types::*;
