//! Crumbs and sealed crumb records.
//!
//! A [`Crumb`] is what a caller hands to the trail. Sealing it against the
//! previous digest produces an immutable [`CrumbRecord`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Previous-digest value of the first record in every trail.
pub const ROOT_DIGEST: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Prefix of short crumb markers.
pub const MARKER_PREFIX: &str = "sk";

/// What kind of finding a crumb carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrumbType {
    /// A question that makes a frame visible
    Question,
    /// What moves behind a mask
    Pattern,
    /// The question that breaks a spell
    Paradox,
    /// The door out of a prison
    TrailToDoor,
    /// Summary linking one analysis to the next
    Bridge,
}

impl CrumbType {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Pattern => "pattern",
            Self::Paradox => "paradox",
            Self::TrailToDoor => "trail_to_door",
            Self::Bridge => "bridge",
        }
    }
}

impl std::fmt::Display for CrumbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unsealed crumb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crumb {
    /// Kind of finding
    pub crumb_type: CrumbType,
    /// Human-readable text left for the next reader
    pub payload: String,
    /// Category reference the crumb came from, e.g. `mask:meritocracy`
    pub source: String,
    /// Chain the crumb belongs to; the trail's own id when unset
    pub chain_id: Option<String>,
    /// When the finding was made
    pub created_at: DateTime<Utc>,
}

impl Crumb {
    /// Create a crumb stamped with the current time.
    pub fn new(crumb_type: CrumbType, payload: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            crumb_type,
            payload: payload.into(),
            source: source.into(),
            chain_id: None,
            created_at: Utc::now(),
        }
    }

    /// Group the crumb with others from the same analysis.
    pub fn with_chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = Some(chain_id.into());
        self
    }

    /// Override the creation time.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// A crumb sealed into a trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrumbRecord {
    /// Kind of finding
    #[serde(rename = "type")]
    pub crumb_type: CrumbType,
    /// Human-readable text
    pub payload: String,
    /// Source category reference
    pub source: String,
    /// Chain the record belongs to
    pub chain_id: String,
    /// When the finding was made
    pub created_at: DateTime<Utc>,
    /// Digest of the predecessor, or [`ROOT_DIGEST`]
    pub prev_digest: String,
    /// Digest over every other field
    pub digest: String,
}

impl CrumbRecord {
    /// Seal a crumb after `prev_digest`. A crumb without a chain id joins
    /// `default_chain`.
    pub fn seal(crumb: Crumb, prev_digest: &str, default_chain: &str) -> Self {
        let mut record = Self {
            crumb_type: crumb.crumb_type,
            payload: crumb.payload,
            source: crumb.source,
            chain_id: crumb.chain_id.unwrap_or_else(|| default_chain.to_string()),
            created_at: crumb.created_at,
            prev_digest: prev_digest.to_string(),
            digest: String::new(),
        };
        record.digest = record.compute_digest();
        record
    }

    /// Recompute the digest from the record's fields.
    ///
    /// Each field is length-prefixed so that moving bytes between fields
    /// changes the digest.
    pub fn compute_digest(&self) -> String {
        let created_at = self.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true);
        let mut hasher = Sha256::new();
        for field in [
            self.crumb_type.as_str(),
            self.payload.as_str(),
            self.source.as_str(),
            self.chain_id.as_str(),
            created_at.as_str(),
            self.prev_digest.as_str(),
        ] {
            hasher.update((field.len() as u64).to_be_bytes());
            hasher.update(field.as_bytes());
        }
        hex::encode(hasher.finalize())
    }

    /// Whether the stored digest matches the fields.
    pub fn is_intact(&self) -> bool {
        self.digest == self.compute_digest()
    }

    /// Short marker that can be embedded in other text.
    pub fn marker(&self) -> String {
        let payload_hash = compute_hash(self.payload.as_bytes());
        format!(
            "{}:{}:{}",
            MARKER_PREFIX,
            self.digest.get(..8).unwrap_or(&self.digest),
            &payload_hash[..16]
        )
    }
}

/// Compute SHA-256 hash of content.
pub fn compute_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}
