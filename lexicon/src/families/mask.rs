//! Mask family - performed identities that conceal actual function.
//!
//! The hidden cost of a mask is what moves behind it; that text becomes the
//! pattern crumb.

use crate::families::{entry, FamilyProvider};
use crate::types::{Category, Family, LexiconEntry, MaskType};

/// Provider for the mask family.
pub struct MaskSignals;

impl FamilyProvider for MaskSignals {
    fn family(&self) -> Family {
        Family::Mask
    }

    fn entries(&self) -> Vec<LexiconEntry> {
        vec![
            entry(
                Category::Mask(MaskType::Authority),
                &[
                    ("leadership", 0.35),
                    ("executive", 0.3),
                    ("decision-maker", 0.4),
                    ("vision", 0.2),
                    ("strategy", 0.2),
                    ("mandate", 0.35),
                    ("c-suite", 0.45),
                    ("the board", 0.35),
                    ("chain of command", 0.45),
                    ("by order of", 0.6),
                    ("direction", 0.15),
                    ("board", 0.2),
                    ("governance", 0.25),
                ],
                "Who sets the agenda that the visible leaders enact?",
                "Power is often held not by the visible leaders but by those who set the agenda they enact.",
                "Watch where the mask slips: contradicts own policy, defers upward, cannot explain the rationale, reads from a script.",
            ),
            entry(
                Category::Mask(MaskType::Benevolence),
                &[
                    ("for your own good", 0.7),
                    ("we care", 0.45),
                    ("protecting", 0.25),
                    ("safety", 0.2),
                    ("support", 0.15),
                    ("empower", 0.3),
                    ("wellbeing", 0.3),
                    ("we only want", 0.45),
                    ("in your best interest", 0.6),
                    ("help", 0.1),
                    ("serve", 0.15),
                    ("community", 0.15),
                ],
                "Does this care share power, or hoard it?",
                "Care rhetoric often masks control. True care shares power; false care hoards it.",
                "Watch where the mask slips: help requires compliance, support has conditions, empowerment means obedience.",
            ),
            entry(
                Category::Mask(MaskType::Neutrality),
                &[
                    ("objective", 0.3),
                    ("balanced", 0.3),
                    ("both sides", 0.45),
                    ("unbiased", 0.4),
                    ("neutral", 0.35),
                    ("apolitical", 0.45),
                    ("nonpartisan", 0.4),
                    ("just the facts", 0.55),
                    ("centrist", 0.35),
                    ("fair", 0.15),
                ],
                "Which arrangement of power does this 'neutral' baseline preserve?",
                "Claimed neutrality serves the status quo. The center is the current arrangement of power.",
                "Watch where the mask slips: challengers framed as extreme, the current system treated as baseline, critique equated with bias.",
            ),
            entry(
                Category::Mask(MaskType::Meritocracy),
                &[
                    ("merit", 0.45),
                    ("rewards merit", 0.65),
                    ("earned", 0.35),
                    ("deserved", 0.4),
                    ("hard work", 0.4),
                    ("achievement", 0.25),
                    ("best and brightest", 0.6),
                    ("top tier", 0.35),
                    ("elite", 0.3),
                    ("pull yourself up", 0.6),
                    ("performance", 0.2),
                    ("competitive", 0.2),
                ],
                "Does success here track effort, or starting position?",
                "Meritocracy narratives attribute systemic outcomes to individual qualities, hiding the architecture of advantage.",
                "Watch where the mask slips: success correlates with starting position, failure blamed on the individual, structural advantages unnamed.",
            ),
            entry(
                Category::Mask(MaskType::Inevitability),
                &[
                    ("no alternative", 0.7),
                    ("the only way", 0.55),
                    ("necessary", 0.2),
                    ("unavoidable", 0.45),
                    ("market forces", 0.45),
                    ("economic reality", 0.5),
                    ("there is no choice", 0.7),
                    ("we must", 0.3),
                    ("the situation demands", 0.55),
                    ("forced by circumstances", 0.6),
                ],
                "Who benefits when this choice is presented as no choice at all?",
                "Inevitability is the most powerful mask. When choices vanish, power becomes invisible.",
                "Watch where the mask slips: alternatives existed historically, other systems do it differently, someone benefits from 'no choice'.",
            ),
            entry(
                Category::Mask(MaskType::Tradition),
                &[
                    ("always been done", 0.55),
                    ("heritage", 0.3),
                    ("custom", 0.2),
                    ("time-tested", 0.45),
                    ("wisdom of the ages", 0.6),
                    ("sacred", 0.3),
                    ("founding principles", 0.5),
                    ("the way we do things", 0.5),
                    ("roots", 0.2),
                    ("values", 0.15),
                ],
                "When was this 'tradition' actually introduced, and who contested it?",
                "Tradition selectively remembers. What is called traditional was once someone's radical innovation.",
                "Watch where the mask slips: the tradition is recent, it was contested when introduced, other traditions are excluded.",
            ),
            entry(
                Category::Mask(MaskType::Innovation),
                &[
                    ("disrupt", 0.35),
                    ("disruptive", 0.35),
                    ("revolutionize", 0.45),
                    ("cutting-edge", 0.35),
                    ("breakthrough", 0.3),
                    ("paradigm shift", 0.45),
                    ("next generation", 0.3),
                    ("reimagine", 0.35),
                    ("move fast", 0.45),
                    ("transform", 0.2),
                    ("future", 0.15),
                ],
                "Who was disrupted, and were they consulted?",
                "Innovation rhetoric often masks extraction. Disruption frequently means destroying what communities built and selling it back.",
                "Watch where the mask slips: the innovation benefits investors most, disrupted communities were not consulted, old problems recreated at scale.",
            ),
            entry(
                Category::Mask(MaskType::Expertise),
                &[
                    ("expert", 0.3),
                    ("experts agree", 0.55),
                    ("specialist", 0.25),
                    ("credentials", 0.35),
                    ("qualified", 0.25),
                    ("professional", 0.15),
                    ("accredited", 0.3),
                    ("leave it to the professionals", 0.65),
                    ("authority", 0.2),
                    ("trained", 0.2),
                ],
                "Who decides what counts as knowing here?",
                "Expertise is real, but the gatekeeping of expertise is a power structure.",
                "Watch where the mask slips: experts disagree but one view dominates, credentials gate access, lived experience dismissed.",
            ),
        ]
    }
}
