//! Prison family - invisible constraints on possibility.
//!
//! Every prison has a door. The mitigation text names it.

use crate::families::{entry, FamilyProvider};
use crate::types::{Category, Family, LexiconEntry, PrisonType};

/// Provider for the prison family.
pub struct PrisonSignals;

impl FamilyProvider for PrisonSignals {
    fn family(&self) -> Family {
        Family::Prison
    }

    fn entries(&self) -> Vec<LexiconEntry> {
        vec![
            entry(
                Category::Prison(PrisonType::ChoiceArchitecture),
                &[
                    ("option", 0.15),
                    ("options", 0.15),
                    ("plan", 0.1),
                    ("tier", 0.3),
                    ("package", 0.2),
                    ("menu", 0.25),
                    ("choose from", 0.45),
                    ("select one", 0.4),
                    ("opt out", 0.4),
                    ("default setting", 0.45),
                    ("select", 0.15),
                    ("pick", 0.15),
                    ("preference", 0.15),
                    ("customize", 0.2),
                ],
                "What option is missing from this menu, and why?",
                "Freedom is performed through selection from a pre-curated menu. The menu is the cage.",
                "Design your own menu. Ask what option is missing, and why.",
            ),
            entry(
                Category::Prison(PrisonType::OvertonWindow),
                &[
                    ("mainstream", 0.3),
                    ("fringe", 0.35),
                    ("extreme", 0.3),
                    ("moderate", 0.25),
                    ("reasonable", 0.2),
                    ("radical", 0.3),
                    ("unthinkable", 0.45),
                    ("politically feasible", 0.55),
                    ("serious people", 0.5),
                    ("acceptable", 0.2),
                ],
                "Which idea cannot be spoken in this space?",
                "The range of acceptable opinion is itself a structure of control. Moving the window is a power act.",
                "Name the idea that cannot be spoken in this space. That is where the wall is.",
            ),
            entry(
                Category::Prison(PrisonType::DebtStructure),
                &[
                    ("loan", 0.35),
                    ("mortgage", 0.4),
                    ("tuition", 0.35),
                    ("credit", 0.25),
                    ("payment plan", 0.45),
                    ("interest", 0.2),
                    ("debt", 0.45),
                    ("owe", 0.3),
                    ("afford", 0.2),
                    ("minimum payment", 0.5),
                    ("obligation", 0.2),
                ],
                "Who collects the interest on this arrangement?",
                "Debt restructures time itself. The indebted cannot afford to question because they cannot afford to lose.",
                "Calculate the total lifetime interest paid. Follow where it goes. That is the architecture.",
            ),
            entry(
                Category::Prison(PrisonType::CredentialGate),
                &[
                    ("degree", 0.3),
                    ("certification", 0.35),
                    ("accreditation", 0.35),
                    ("licensed", 0.3),
                    ("authorized", 0.25),
                    ("prerequisite", 0.4),
                    ("requirements", 0.2),
                    ("must be certified", 0.6),
                ],
                "Who learned this without the credential, and how?",
                "Credentials gatekeep knowledge that often came from the uncredentialed. The gate charges rent on the commons.",
                "Find someone who knows this without the credential. They exist. Ask how they learned.",
            ),
            entry(
                Category::Prison(PrisonType::PlatformLock),
                &[
                    ("ecosystem", 0.3),
                    ("integration", 0.2),
                    ("compatible", 0.2),
                    ("api", 0.2),
                    ("platform", 0.25),
                    ("migration cost", 0.6),
                    ("switching cost", 0.6),
                    ("vendor", 0.3),
                    ("proprietary", 0.45),
                    ("lock-in", 0.6),
                ],
                "What happens to your data, network and history if you leave?",
                "Digital dependency creates invisible walls. Your data, network and history are held hostage by design.",
                "Export everything. If you can't, that is the wall. Build on what you can leave.",
            ),
            entry(
                Category::Prison(PrisonType::TemporalTrap),
                &[
                    ("busy", 0.25),
                    ("no time", 0.45),
                    ("deadline", 0.3),
                    ("urgent", 0.3),
                    ("asap", 0.4),
                    ("bandwidth", 0.3),
                    ("overwhelmed", 0.4),
                    ("crunch", 0.4),
                    ("hustle", 0.35),
                    ("sprint", 0.2),
                ],
                "What would you see if you stopped for one day?",
                "The trap that prevents seeing all other traps. With no time to think, there is no time to be free.",
                "The most radical act may be stopping. Not forever. Just long enough to see.",
            ),
            entry(
                Category::Prison(PrisonType::IdentityCage),
                &[
                    ("people like us", 0.65),
                    ("that's not who i am", 0.6),
                    ("i could never", 0.5),
                    ("not for people like me", 0.7),
                    ("stay in your lane", 0.65),
                    ("know your place", 0.7),
                    ("that's not for people like me", 0.7),
                ],
                "Who told you that people like you don't do this?",
                "Identity becomes a cage when it limits possibility. Who you are becomes what you're allowed to want.",
                "Try the thing that 'people like you' don't do. The cage is made of stories, not steel.",
            ),
            entry(
                Category::Prison(PrisonType::LearnedHelplessness),
                &[
                    ("nothing changes", 0.6),
                    ("what's the point", 0.55),
                    ("they won't let us", 0.6),
                    ("it's always been this way", 0.65),
                    ("you can't fight", 0.6),
                    ("too big to change", 0.65),
                    ("no alternative", 0.35),
                ],
                "Who escaped this before, and how?",
                "The most elegant prison. The prisoner maintains their own walls by believing escape is impossible.",
                "Find one person who escaped. One example breaks the spell. Then find another.",
            ),
        ]
    }
}
