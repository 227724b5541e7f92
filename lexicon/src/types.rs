//! Core types for the signal lexicon.
//!
//! Four closed families of eight categories each. Every category carries a
//! fixed enumeration index that doubles as the tie-break order when scores
//! are ranked.
//!
//! With the `typescript` feature enabled, these types can be exported to
//! TypeScript using ts-rs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::LexiconError;

/// Number of categories in every family.
pub const FAMILY_SIZE: usize = 8;

/// The four detection families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Implicit assumptions that shape what is thinkable
    Frame = 0,
    /// Performed identities that conceal actual function
    Mask = 1,
    /// Persuasive narratives
    Spell = 2,
    /// Systemic constraints on possibility
    Prison = 3,
}

impl Family {
    /// All families in enumeration order.
    pub const ALL: [Family; 4] = [Family::Frame, Family::Mask, Family::Spell, Family::Prison];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frame => "frame",
            Self::Mask => "mask",
            Self::Spell => "spell",
            Self::Prison => "prison",
        }
    }

    /// The family's categories in enumeration order.
    pub fn categories(&self) -> [Category; FAMILY_SIZE] {
        match self {
            Self::Frame => FrameType::ALL.map(Category::Frame),
            Self::Mask => MaskType::ALL.map(Category::Mask),
            Self::Spell => SpellType::ALL.map(Category::Spell),
            Self::Prison => PrisonType::ALL.map(Category::Prison),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Family::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| LexiconError::UnknownCategory(s.to_string()))
    }
}

/// Categories of invisible architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum FrameType {
    /// "This is just how things are"
    Normative = 0,
    /// The words that shape thought
    Linguistic = 1,
    /// The rules that feel like physics
    Institutional = 2,
    /// The timeline that feels inevitable
    Temporal = 3,
    /// What counts as knowledge
    Epistemic = 4,
    /// What counts as value
    Economic = 5,
    /// What technology makes thinkable
    Technological = 6,
    /// The stories that feel like truth
    Mythological = 7,
}

impl FrameType {
    /// All frame types in enumeration order.
    pub const ALL: [FrameType; FAMILY_SIZE] = [
        Self::Normative,
        Self::Linguistic,
        Self::Institutional,
        Self::Temporal,
        Self::Epistemic,
        Self::Economic,
        Self::Technological,
        Self::Mythological,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normative => "normative",
            Self::Linguistic => "linguistic",
            Self::Institutional => "institutional",
            Self::Temporal => "temporal",
            Self::Epistemic => "epistemic",
            Self::Economic => "economic",
            Self::Technological => "technological",
            Self::Mythological => "mythological",
        }
    }
}

/// Performed identities in systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum MaskType {
    /// Power dressed as competence
    Authority = 0,
    /// Control dressed as care
    Benevolence = 1,
    /// Ideology dressed as objectivity
    Neutrality = 2,
    /// Privilege dressed as achievement
    Meritocracy = 3,
    /// Choice dressed as necessity
    Inevitability = 4,
    /// Inertia dressed as wisdom
    Tradition = 5,
    /// Disruption dressed as progress
    Innovation = 6,
    /// Gatekeeping dressed as knowledge
    Expertise = 7,
}

impl MaskType {
    /// All mask types in enumeration order.
    pub const ALL: [MaskType; FAMILY_SIZE] = [
        Self::Authority,
        Self::Benevolence,
        Self::Neutrality,
        Self::Meritocracy,
        Self::Inevitability,
        Self::Tradition,
        Self::Innovation,
        Self::Expertise,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authority => "authority",
            Self::Benevolence => "benevolence",
            Self::Neutrality => "neutrality",
            Self::Meritocracy => "meritocracy",
            Self::Inevitability => "inevitability",
            Self::Tradition => "tradition",
            Self::Innovation => "innovation",
            Self::Expertise => "expertise",
        }
    }

    /// Masks whose performers hold formal, titled power.
    pub fn carries_formal_power(&self) -> bool {
        matches!(self, Self::Authority | Self::Expertise)
    }
}

/// Categories of narrative enchantment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum SpellType {
    /// "This is where we came from"
    OriginMyth = 0,
    /// "Things are getting better"
    ProgressNarrative = 1,
    /// "Without us, chaos"
    FearNarrative = 2,
    /// "There isn't enough"
    Scarcity = 3,
    /// "This is who you are"
    Identity = 4,
    /// "You couldn't understand"
    Complexity = 5,
    /// "We're all in this together"
    Unity = 6,
    /// "You're either with us or against us"
    Binary = 7,
}

impl SpellType {
    /// All spell types in enumeration order.
    pub const ALL: [SpellType; FAMILY_SIZE] = [
        Self::OriginMyth,
        Self::ProgressNarrative,
        Self::FearNarrative,
        Self::Scarcity,
        Self::Identity,
        Self::Complexity,
        Self::Unity,
        Self::Binary,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OriginMyth => "origin_myth",
            Self::ProgressNarrative => "progress_narrative",
            Self::FearNarrative => "fear_narrative",
            Self::Scarcity => "scarcity",
            Self::Identity => "identity",
            Self::Complexity => "complexity",
            Self::Unity => "unity",
            Self::Binary => "binary",
        }
    }
}

/// Types of invisible constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum PrisonType {
    /// The menu is the cage
    ChoiceArchitecture = 0,
    /// The range of acceptable thought
    OvertonWindow = 1,
    /// Financial chains
    DebtStructure = 2,
    /// Permission to think
    CredentialGate = 3,
    /// Digital dependency
    PlatformLock = 4,
    /// Too busy to see
    TemporalTrap = 5,
    /// "People like us don't..."
    IdentityCage = 6,
    /// "Nothing can change"
    LearnedHelplessness = 7,
}

impl PrisonType {
    /// All prison types in enumeration order.
    pub const ALL: [PrisonType; FAMILY_SIZE] = [
        Self::ChoiceArchitecture,
        Self::OvertonWindow,
        Self::DebtStructure,
        Self::CredentialGate,
        Self::PlatformLock,
        Self::TemporalTrap,
        Self::IdentityCage,
        Self::LearnedHelplessness,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChoiceArchitecture => "choice_architecture",
            Self::OvertonWindow => "overton_window",
            Self::DebtStructure => "debt_structure",
            Self::CredentialGate => "credential_gate",
            Self::PlatformLock => "platform_lock",
            Self::TemporalTrap => "temporal_trap",
            Self::IdentityCage => "identity_cage",
            Self::LearnedHelplessness => "learned_helplessness",
        }
    }
}

/// A category from any family.
///
/// Serialized as its reference string, e.g. `"mask:meritocracy"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Frame(FrameType),
    Mask(MaskType),
    Spell(SpellType),
    Prison(PrisonType),
}

impl Category {
    /// The family this category belongs to.
    pub fn family(&self) -> Family {
        match self {
            Self::Frame(_) => Family::Frame,
            Self::Mask(_) => Family::Mask,
            Self::Spell(_) => Family::Spell,
            Self::Prison(_) => Family::Prison,
        }
    }

    /// Position within the family's enumeration (0..8).
    pub fn index(&self) -> usize {
        match self {
            Self::Frame(t) => *t as usize,
            Self::Mask(t) => *t as usize,
            Self::Spell(t) => *t as usize,
            Self::Prison(t) => *t as usize,
        }
    }

    /// Category name without the family prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frame(t) => t.as_str(),
            Self::Mask(t) => t.as_str(),
            Self::Spell(t) => t.as_str(),
            Self::Prison(t) => t.as_str(),
        }
    }

    /// Stable reference string, `family:name`.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.family().as_str(), self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family().as_str(), self.as_str())
    }
}

impl FromStr for Category {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (family, name) = s
            .split_once(':')
            .ok_or_else(|| LexiconError::UnknownCategory(s.to_string()))?;
        let family: Family = family.parse()?;
        family
            .categories()
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| LexiconError::UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = LexiconError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.reference()
    }
}

/// A weighted signal term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct SignalTerm {
    /// Lowercased phrase to look for
    pub term: String,
    /// Contribution when matched, in (0.0, 1.0]
    pub weight: f64,
}

impl SignalTerm {
    /// Create a term, lowercasing the phrase.
    pub fn new(term: impl AsRef<str>, weight: f64) -> Self {
        Self {
            term: term.as_ref().to_lowercase(),
            weight,
        }
    }
}

/// Everything the lexicon knows about one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct LexiconEntry {
    /// Category this entry describes
    #[cfg_attr(feature = "typescript", ts(type = "string"))]
    pub category: Category,
    /// Signal terms in declaration order
    pub signals: Vec<SignalTerm>,
    /// The question that makes the pattern visible
    pub question: String,
    /// What the pattern costs the people inside it
    pub hidden_cost: String,
    /// How to step outside the pattern
    pub mitigation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_family_has_eight_distinct_categories() {
        for family in Family::ALL {
            let categories = family.categories();
            for (i, category) in categories.iter().enumerate() {
                assert_eq!(category.family(), family);
                assert_eq!(category.index(), i);
            }
        }
    }

    #[test]
    fn test_category_reference_roundtrip() {
        let category = Category::Mask(MaskType::Meritocracy);
        assert_eq!(category.reference(), "mask:meritocracy");
        assert_eq!("mask:meritocracy".parse::<Category>().unwrap(), category);
        assert!("mask:nonsense".parse::<Category>().is_err());
        assert!("meritocracy".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_as_reference() {
        let category = Category::Prison(PrisonType::DebtStructure);
        let yaml = serde_yaml::to_string(&category).unwrap();
        assert_eq!(yaml.trim(), "prison:debt_structure");

        let parsed: Category = serde_yaml::from_str("spell:binary").unwrap();
        assert_eq!(parsed, Category::Spell(SpellType::Binary));
    }

    #[test]
    fn test_signal_term_lowercases() {
        let term = SignalTerm::new("C-Suite", 0.4);
        assert_eq!(term.term, "c-suite");
    }

    #[test]
    fn test_formal_power_masks() {
        assert!(MaskType::Authority.carries_formal_power());
        assert!(MaskType::Expertise.carries_formal_power());
        assert!(!MaskType::Meritocracy.carries_formal_power());
    }
}
