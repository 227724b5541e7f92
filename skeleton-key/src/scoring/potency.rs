//! Narrative potency.
//!
//! Potency blends the strongest score with how concentrated the scores are.
//! Concentration is one minus the normalized Shannon entropy of the nonzero
//! scores:
//!
//! ```text
//! p_i     = s_i / Σ s
//! H       = -Σ p_i log2 p_i
//! H_norm  = H / log2 n        (0 when n = 1)
//! potency = α · max(s) + (1 - α) · (1 - H_norm)
//! ```

use serde::{Deserialize, Serialize};

use lexicon::Category;

use crate::detect::CategoryScore;

/// Shannon entropy in bits of the nonzero scores, and how many there were.
fn entropy(scores: &[CategoryScore]) -> (f64, usize) {
    let nonzero: Vec<f64> = scores
        .iter()
        .map(|s| s.score)
        .filter(|&s| s > 0.0)
        .collect();
    let total: f64 = nonzero.iter().sum();
    if nonzero.is_empty() || total <= 0.0 {
        return (0.0, 0);
    }

    let h = nonzero
        .iter()
        .map(|s| s / total)
        .map(|p| -p * p.log2())
        .sum::<f64>();
    (h.max(0.0), nonzero.len())
}

fn normalized_entropy(h: f64, n: usize) -> f64 {
    if n <= 1 {
        0.0
    } else {
        (h / (n as f64).log2()).clamp(0.0, 1.0)
    }
}

/// Potency of a family's scores in [0, 1]. All-zero input scores 0.
pub fn potency(scores: &[CategoryScore], alpha: f64) -> f64 {
    let (h, n) = entropy(scores);
    if n == 0 {
        return 0.0;
    }
    let alpha = alpha.clamp(0.0, 1.0);
    let max = scores.iter().map(|s| s.score).fold(0.0, f64::max);
    let concentration = 1.0 - normalized_entropy(h, n);

    (alpha * max + (1.0 - alpha) * concentration).clamp(0.0, 1.0)
}

/// How enchanted a narrative environment is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnchantmentLevel {
    /// Nothing detected
    Clear,
    Minimal,
    Light,
    Moderate,
    Heavy,
    Total,
}

impl EnchantmentLevel {
    /// Level for a potency value.
    pub fn from_potency(potency: f64) -> Self {
        match potency {
            p if p >= 0.8 => Self::Total,
            p if p >= 0.6 => Self::Heavy,
            p if p >= 0.4 => Self::Moderate,
            p if p >= 0.2 => Self::Light,
            _ => Self::Minimal,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Minimal => "minimal_enchantment",
            Self::Light => "light_enchantment",
            Self::Moderate => "moderate_enchantment",
            Self::Heavy => "heavy_enchantment",
            Self::Total => "total_enchantment",
        }
    }
}

/// Potency with the figures behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotencyReport {
    /// Potency (0.0 - 1.0)
    pub potency: f64,
    /// Entropy of the nonzero scores in bits
    pub entropy_bits: f64,
    /// Entropy divided by its maximum (0.0 - 1.0)
    pub normalized_entropy: f64,
    /// Number of nonzero categories
    pub nonzero_count: usize,
    /// Highest-scoring category, if any scored
    pub dominant: Option<Category>,
    /// Interpretation
    pub level: EnchantmentLevel,
    /// One-paragraph reading of the figures
    pub insight: String,
}

/// Entropy above which several stories are reinforcing each other.
const HIGH_DIVERSITY_BITS: f64 = 1.5;

/// Potency plus entropy, dominant category and level.
pub fn potency_report(scores: &[CategoryScore], alpha: f64) -> PotencyReport {
    let (h, n) = entropy(scores);
    let value = potency(scores, alpha);

    let dominant = scores
        .iter()
        .filter(|s| s.score > 0.0)
        .max_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then(b.category.index().cmp(&a.category.index()))
        })
        .map(|s| s.category);

    let insight = match dominant {
        Some(category) => format!(
            "Dominant narrative: {} (potency {:.2}). Narrative diversity: {:.2} bits.{}",
            category,
            value,
            h,
            if h > HIGH_DIVERSITY_BITS {
                " High diversity means multiple reinforcing stories."
            } else {
                ""
            }
        ),
        None => "No narrative detected.".to_string(),
    };

    PotencyReport {
        potency: value,
        entropy_bits: h,
        normalized_entropy: normalized_entropy(h, n),
        nonzero_count: n,
        dominant,
        level: if n == 0 {
            EnchantmentLevel::Clear
        } else {
            EnchantmentLevel::from_potency(value)
        },
        insight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexicon::{Family, SpellType};

    fn scores(values: &[f64]) -> Vec<CategoryScore> {
        Family::Spell
            .categories()
            .into_iter()
            .zip(values.iter().copied().chain(std::iter::repeat(0.0)))
            .map(|(category, score)| CategoryScore {
                category,
                score,
                hit_count: usize::from(score > 0.0),
            })
            .collect()
    }

    #[test]
    fn test_all_zero_is_zero() {
        assert_eq!(potency(&scores(&[]), 0.6), 0.0);
        let report = potency_report(&scores(&[]), 0.6);
        assert_eq!(report.level, EnchantmentLevel::Clear);
        assert!(report.dominant.is_none());
        assert_eq!(report.insight, "No narrative detected.");
    }

    #[test]
    fn test_insight_names_dominant_and_diversity() {
        let report = potency_report(&scores(&[0.9]), 0.6);
        assert!(report.insight.starts_with("Dominant narrative: spell:origin_myth"));
        assert!(!report.insight.contains("High diversity"));

        let spread = potency_report(&scores(&[0.5, 0.5, 0.5, 0.5]), 0.6);
        assert!(spread.insight.contains("2.00 bits"));
        assert!(spread.insight.contains("High diversity"));
    }

    #[test]
    fn test_uniform_scores_have_full_entropy() {
        let s = scores(&[0.5, 0.5, 0.5, 0.5]);
        let report = potency_report(&s, 0.6);
        assert!((report.normalized_entropy - 1.0).abs() < 1e-9);
        assert!((report.entropy_bits - 2.0).abs() < 1e-9);
        assert!((report.potency - 0.6 * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_single_score_is_fully_concentrated() {
        let s = scores(&[0.5]);
        // α·0.5 + (1 - α)·1
        assert!((potency(&s, 0.6) - (0.3 + 0.4)).abs() < 1e-9);
    }

    #[test]
    fn test_concentration_raises_potency() {
        let spread = potency(&scores(&[0.6, 0.6, 0.6]), 0.6);
        let focused = potency(&scores(&[0.6, 0.1, 0.1]), 0.6);
        assert!(focused > spread);
    }

    #[test]
    fn test_dominant_ties_break_by_enumeration() {
        let s = scores(&[0.4, 0.7, 0.7]);
        let report = potency_report(&s, 0.6);
        assert_eq!(report.dominant, Some(lexicon::Category::Spell(SpellType::ProgressNarrative)));
    }

    #[test]
    fn test_levels() {
        assert_eq!(EnchantmentLevel::from_potency(0.85), EnchantmentLevel::Total);
        assert_eq!(EnchantmentLevel::from_potency(0.6), EnchantmentLevel::Heavy);
        assert_eq!(EnchantmentLevel::from_potency(0.1), EnchantmentLevel::Minimal);
        assert_eq!(EnchantmentLevel::Heavy.as_str(), "heavy_enchantment");
    }
}
