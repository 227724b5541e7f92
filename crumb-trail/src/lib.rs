//! Crumb Trail - hash-chained records of detector findings
//!
//! Every finding the detector wants to leave behind becomes a crumb. Crumbs
//! are sealed into a [`Trail`] where each record carries the digest of its
//! predecessor, so any edit, removal or reordering is caught on load.
//! Records also carry a chain id; [`Trail::follow_chain`] pulls one chain
//! back out of a trail shared by many analyses.
//!
//! The digest is an integrity check, not an authentication code: anyone who
//! can rewrite the file can also recompute the chain.
//!
//! # Example
//!
//! ```
//! use crumb_trail::{Crumb, CrumbType, Trail, ROOT_DIGEST};
//!
//! let trail = Trail::new();
//! let first = trail
//!     .append(Crumb::new(CrumbType::Question, "Who wrote this rule?", "frame:institutional"))
//!     .unwrap();
//! assert_eq!(first.prev_digest, ROOT_DIGEST);
//! trail.verify().unwrap();
//! ```

pub mod crumb;
pub mod error;
pub mod persist;
pub mod trail;

pub use crumb::{compute_hash, Crumb, CrumbRecord, CrumbType, MARKER_PREFIX, ROOT_DIGEST};
pub use error::{Result, TrailError};
pub use trail::{verify_chain, Trail, DEFAULT_LOCK_TIMEOUT};
