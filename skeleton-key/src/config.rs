//! Configuration for the detector.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::graph::EdgeMergePolicy;
use crate::types::Result;

/// Configuration for a [`SkeletonKey`](crate::SkeletonKey).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletonConfig {
    /// Detector ID, stamped on every analysis
    pub detector_id: String,
    /// Signal matching configuration
    pub matcher: MatcherConfig,
    /// Scoring configuration
    pub scoring: ScoringConfig,
    /// Influence graph configuration
    pub graph: GraphConfig,
    /// Crumb trail configuration
    pub trail: TrailConfig,
    /// General settings
    pub general: GeneralConfig,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            detector_id: uuid::Uuid::new_v4().to_string(),
            matcher: MatcherConfig::default(),
            scoring: ScoringConfig::default(),
            graph: GraphConfig::default(),
            trail: TrailConfig::default(),
            general: GeneralConfig::default(),
        }
    }
}

impl SkeletonConfig {
    /// Create a new config with detector ID.
    pub fn new(detector_id: impl Into<String>) -> Self {
        Self {
            detector_id: detector_id.into(),
            ..Default::default()
        }
    }

    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Signal matching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Require terms to start and end on word boundaries
    pub whole_word: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self { whole_word: true }
    }
}

/// Scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// A category is active when its score exceeds this (0.0 - 1.0)
    pub active_threshold: f64,
    /// Weight of the strongest spell in potency (0.0 - 1.0)
    pub potency_alpha: f64,
    /// Cage compounding per additional active prison
    pub interlock_step: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            active_threshold: 0.3,
            potency_alpha: 0.6,
            interlock_step: 0.1,
        }
    }
}

/// Influence graph configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Minimum summed outgoing strength for a puppeteer
    pub out_weight_threshold: f64,
    /// Maximum mean incoming visibility for a puppeteer
    pub visibility_ceiling: f64,
    /// Edges below this visibility count as hidden in snapshots
    pub hidden_visibility_cutoff: f64,
    /// How repeated observations of an edge combine
    pub merge_policy: EdgeMergePolicy,
    /// Bound on lock acquisition (milliseconds)
    pub lock_timeout_ms: u64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            out_weight_threshold: 0.5,
            visibility_ceiling: 0.2,
            hidden_visibility_cutoff: 0.5,
            merge_policy: EdgeMergePolicy::Max,
            lock_timeout_ms: 250,
        }
    }
}

impl GraphConfig {
    /// Lock timeout as a duration.
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

/// Crumb trail configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Bound on lock acquisition (milliseconds)
    pub lock_timeout_ms: u64,
    /// Append a bridge crumb after each analysis's category crumbs
    pub bridge_crumb: bool,
    /// Where [`SkeletonKey::leave_trail`](crate::SkeletonKey::leave_trail) persists
    pub persist_path: Option<String>,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: 250,
            bridge_crumb: false,
            persist_path: None,
        }
    }
}

impl TrailConfig {
    /// Lock timeout as a duration.
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Mention a performer actor in the graph for every active mask
    pub track_mask_performers: bool,
    /// Log every individual hit at trace level
    pub trace_hits: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            track_mask_performers: true,
            trace_hits: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SkeletonConfig::new("test-detector");
        assert_eq!(config.detector_id, "test-detector");
        assert_eq!(config.scoring.active_threshold, 0.3);
        assert_eq!(config.scoring.potency_alpha, 0.6);
        assert_eq!(config.graph.merge_policy, EdgeMergePolicy::Max);
        assert_eq!(config.graph.lock_timeout(), Duration::from_millis(250));
        assert!(config.matcher.whole_word);
        assert!(!config.trail.bridge_crumb);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = SkeletonConfig::new("yaml");
        let yaml = config.to_yaml().unwrap();
        let parsed = SkeletonConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.detector_id, "yaml");
        assert_eq!(parsed.graph.visibility_ceiling, config.graph.visibility_ceiling);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
detector_id: partial
graph:
  merge_policy: sum
scoring:
  potency_alpha: 0.5
"#;
        let config = SkeletonConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.graph.merge_policy, EdgeMergePolicy::Sum);
        assert_eq!(config.graph.out_weight_threshold, 0.5);
        assert_eq!(config.scoring.potency_alpha, 0.5);
        assert_eq!(config.scoring.active_threshold, 0.3);
    }

    #[test]
    fn test_bad_yaml_is_config_error() {
        let err = SkeletonConfig::from_yaml("scoring: [not, a, map]").unwrap_err();
        assert!(matches!(err, crate::SkeletonError::Config(_)));
    }
}
