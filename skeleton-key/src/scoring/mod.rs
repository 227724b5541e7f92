//! Aggregate scoring.
//!
//! - **Potency**: how concentrated a family's narrative pressure is
//! - **Cage**: how confined a system is by interlocking constraints

pub mod cage;
pub mod potency;

pub use cage::{cage_report, cage_score, cage_score_with, find_doors, CageLevel, CageReport, Door};
pub use potency::{potency, potency_report, EnchantmentLevel, PotencyReport};
