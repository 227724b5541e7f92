//! Spell family - narratives that enchant perception.

use crate::families::{entry, FamilyProvider};
use crate::types::{Category, Family, LexiconEntry, SpellType};

/// Provider for the spell family.
pub struct SpellSignals;

impl FamilyProvider for SpellSignals {
    fn family(&self) -> Family {
        Family::Spell
    }

    fn entries(&self) -> Vec<LexiconEntry> {
        vec![
            entry(
                Category::Spell(SpellType::OriginMyth),
                &[
                    ("founded", 0.3),
                    ("origin", 0.25),
                    ("genesis", 0.35),
                    ("started with", 0.3),
                    ("our story", 0.45),
                    ("once upon", 0.5),
                    ("in the beginning", 0.5),
                    ("from humble beginnings", 0.7),
                    ("in a garage", 0.55),
                    ("began", 0.15),
                    ("founding", 0.25),
                ],
                "What does this origin story leave out? Who was already here?",
                "Creates loyalty by making the listener part of a sacred story.",
                "Name the emotional hook (belonging, legitimacy, pride) and ask what it asks you to forget.",
            ),
            entry(
                Category::Spell(SpellType::ProgressNarrative),
                &[
                    ("better than ever", 0.55),
                    ("improving", 0.2),
                    ("advancing", 0.25),
                    ("more than ever", 0.4),
                    ("unprecedented", 0.35),
                    ("next level", 0.35),
                    ("forward", 0.15),
                    ("brighter future", 0.55),
                    ("steady progress", 0.45),
                    ("better", 0.1),
                    ("growing", 0.15),
                    ("developing", 0.15),
                ],
                "Better for whom? By whose metric? At what cost to what?",
                "Makes the current trajectory feel inevitable and good; resistance feels regressive.",
                "Name the emotional hook (hope, optimism, participation) and ask who sets the metric.",
            ),
            entry(
                Category::Spell(SpellType::FearNarrative),
                &[
                    ("threat", 0.3),
                    ("danger", 0.3),
                    ("crisis", 0.3),
                    ("enemy", 0.35),
                    ("collapse", 0.35),
                    ("catastrophe", 0.4),
                    ("if we don't act now", 0.7),
                    ("at risk", 0.25),
                    ("under attack", 0.5),
                    ("existential", 0.4),
                ],
                "Who benefits from this fear? What becomes possible when people are afraid?",
                "Justifies extreme measures and suppresses dissent ('now is not the time').",
                "Name the emotional hook (fear, urgency, tribal bonding) and slow down before agreeing to anything.",
            ),
            entry(
                Category::Spell(SpellType::Scarcity),
                &[
                    ("not enough", 0.4),
                    ("limited", 0.2),
                    ("scarce", 0.4),
                    ("running out", 0.45),
                    ("zero-sum", 0.55),
                    ("fight for", 0.35),
                    ("earn your place", 0.55),
                    ("only the best", 0.45),
                    ("while supplies last", 0.6),
                    ("competition", 0.2),
                ],
                "Is this truly scarce, or is access being controlled? By whom?",
                "Prevents solidarity by making people see each other as competitors for artificially limited resources.",
                "Name the emotional hook (anxiety, competition, hoarding) and count what is actually available.",
            ),
            entry(
                Category::Spell(SpellType::Identity),
                &[
                    ("we are", 0.2),
                    ("our people", 0.45),
                    ("who we are", 0.45),
                    ("our values", 0.35),
                    ("our kind", 0.5),
                    ("real americans", 0.65),
                    ("true believers", 0.55),
                    ("the faithful", 0.45),
                    ("patriots", 0.4),
                ],
                "Who is 'we', and who is excluded? What happens to those who disagree from within?",
                "Creates an in-group that cannot question without losing identity.",
                "Name the emotional hook (belonging, exclusion) and find the people the 'we' leaves out.",
            ),
            entry(
                Category::Spell(SpellType::Complexity),
                &[
                    ("it's complicated", 0.5),
                    ("you wouldn't understand", 0.7),
                    ("technical", 0.15),
                    ("nuanced", 0.25),
                    ("leave it to the experts", 0.65),
                    ("too complex", 0.5),
                    ("sophisticated", 0.25),
                    ("intricate", 0.25),
                ],
                "Is it truly complex, or is complexity being weaponized to exclude?",
                "Prevents democratic engagement with decisions that affect everyone.",
                "Name the emotional hook (deference, helplessness) and ask for the one-paragraph version.",
            ),
            entry(
                Category::Spell(SpellType::Unity),
                &[
                    ("together", 0.25),
                    ("united", 0.3),
                    ("one team", 0.45),
                    ("shared purpose", 0.45),
                    ("all of us", 0.3),
                    ("in this together", 0.6),
                    ("common goal", 0.4),
                    ("one family", 0.45),
                    ("collective", 0.2),
                    ("solidarity", 0.25),
                ],
                "Whose version of 'together'? Who set the terms? Who is silenced by 'unity'?",
                "Suppresses legitimate disagreement by framing it as betrayal of the group.",
                "Name the emotional hook (warmth, safety) and ask who was not in the room when the terms were set.",
            ),
            entry(
                Category::Spell(SpellType::Binary),
                &[
                    ("with us or against us", 0.75),
                    ("against us", 0.4),
                    ("right side of history", 0.6),
                    ("good vs evil", 0.55),
                    ("black and white", 0.4),
                    ("choose a side", 0.5),
                    ("no middle ground", 0.55),
                    ("either you", 0.35),
                    ("either", 0.15),
                    ("or", 0.05),
                    ("with us", 0.3),
                ],
                "What would a third position look like? What does the binary hide?",
                "Eliminates the third option, the one that would reveal the frame itself.",
                "Name the emotional hook (moral clarity, urgency) and write down a third option.",
            ),
        ]
    }
}
