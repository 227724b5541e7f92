//! Frame family - the invisible architecture of assumptions.
//!
//! Frames make social arrangements read as natural law. Their revealing
//! question is what the crumb trail leaves behind.

use crate::families::{entry, FamilyProvider};
use crate::types::{Category, Family, FrameType, LexiconEntry};

/// Provider for the frame family.
pub struct FrameSignals;

impl FamilyProvider for FrameSignals {
    fn family(&self) -> Family {
        Family::Frame
    }

    fn entries(&self) -> Vec<LexiconEntry> {
        vec![
            entry(
                Category::Frame(FrameType::Normative),
                &[
                    ("normal", 0.25),
                    ("natural", 0.3),
                    ("naturally", 0.3),
                    ("obvious", 0.25),
                    ("common sense", 0.45),
                    ("everyone knows", 0.5),
                    ("that's just how it is", 0.7),
                    ("always been", 0.4),
                    ("standard", 0.2),
                    ("the way things work", 0.6),
                    ("realistic", 0.25),
                    ("pragmatic", 0.25),
                    ("human nature", 0.5),
                    ("the real world", 0.45),
                    ("tradition", 0.2),
                    ("inevitable", 0.3),
                ],
                "What would change if this were seen as a choice rather than a fact?",
                "Normative frames disguise social constructions as natural law.",
                "Ask who decided this was 'normal', and when.",
            ),
            entry(
                Category::Frame(FrameType::Linguistic),
                &[
                    ("stakeholder", 0.3),
                    ("human resources", 0.5),
                    ("collateral damage", 0.6),
                    ("externality", 0.45),
                    ("optimization", 0.25),
                    ("leverage", 0.25),
                    ("synergy", 0.35),
                    ("alignment", 0.2),
                    ("talent", 0.2),
                    ("assets", 0.2),
                    ("deliverables", 0.3),
                    ("value proposition", 0.45),
                    ("headcount", 0.4),
                    ("rightsizing", 0.55),
                    ("disruption", 0.2),
                    ("capital", 0.15),
                    ("growth", 0.15),
                    ("scale", 0.15),
                ],
                "What does this language conceal about who is affected and how?",
                "Linguistic frames make harm abstract and turn people into resources.",
                "Replace each term with plain language and notice what changes.",
            ),
            entry(
                Category::Frame(FrameType::Institutional),
                &[
                    ("policy", 0.25),
                    ("procedure", 0.25),
                    ("compliance", 0.3),
                    ("regulation", 0.25),
                    ("protocol", 0.2),
                    ("due process", 0.45),
                    ("standard operating", 0.5),
                    ("best practice", 0.4),
                    ("industry standard", 0.45),
                    ("official channels", 0.5),
                    ("chain of command", 0.55),
                    ("per the guidelines", 0.5),
                    ("governance", 0.25),
                ],
                "Who wrote these rules, and what do they protect?",
                "Institutional frames make power arrangements feel like physics.",
                "Trace each rule to its origin. Someone wrote it. Someone benefits.",
            ),
            entry(
                Category::Frame(FrameType::Temporal),
                &[
                    ("progress", 0.25),
                    ("the future", 0.25),
                    ("moving forward", 0.35),
                    ("behind the times", 0.5),
                    ("modernization", 0.35),
                    ("outdated", 0.35),
                    ("evolving", 0.2),
                    ("trajectory", 0.3),
                    ("momentum", 0.25),
                    ("the arc of history", 0.7),
                    ("tipping point", 0.4),
                    ("only a matter of time", 0.6),
                    ("inevitable", 0.3),
                    ("legacy", 0.2),
                    ("disruption cycle", 0.45),
                ],
                "Whose timeline is this, and what does it erase?",
                "Temporal frames make one group's trajectory feel like destiny.",
                "Ask: inevitable for whom? Progress toward what? Decided by whom?",
            ),
            entry(
                Category::Frame(FrameType::Epistemic),
                &[
                    ("evidence-based", 0.4),
                    ("data-driven", 0.4),
                    ("peer-reviewed", 0.35),
                    ("scientific consensus", 0.5),
                    ("expert opinion", 0.45),
                    ("credible sources", 0.45),
                    ("rigorous", 0.25),
                    ("statistically significant", 0.4),
                    ("empirical", 0.25),
                    ("measurable", 0.25),
                    ("anecdotal", 0.4),
                    ("unsubstantiated", 0.4),
                    ("misinformation", 0.4),
                    ("methodology", 0.2),
                ],
                "What ways of knowing are being excluded, and why?",
                "Epistemic frames decide what counts as knowledge and who counts as a knower.",
                "Ask what a different discipline, culture or tradition would see here.",
            ),
            entry(
                Category::Frame(FrameType::Economic),
                &[
                    ("market", 0.3),
                    ("efficiency", 0.25),
                    ("roi", 0.35),
                    ("cost-benefit", 0.4),
                    ("productivity", 0.25),
                    ("supply and demand", 0.5),
                    ("rational actor", 0.5),
                    ("incentive", 0.25),
                    ("gdp", 0.3),
                    ("bottom line", 0.45),
                    ("monetize", 0.4),
                    ("free market", 0.55),
                    ("shareholder value", 0.6),
                    ("scarcity", 0.25),
                    ("profit margin", 0.4),
                    ("valuation", 0.25),
                    ("competition", 0.2),
                ],
                "What is being valued, and what is being discarded?",
                "Economic frames reduce all value to a single metric and hide the rest.",
                "Name three things this framework cannot measure that matter enormously.",
            ),
            entry(
                Category::Frame(FrameType::Technological),
                &[
                    ("platform", 0.2),
                    ("algorithm", 0.3),
                    ("automation", 0.3),
                    ("machine learning", 0.35),
                    ("digital transformation", 0.55),
                    ("cloud", 0.15),
                    ("scalable", 0.3),
                    ("tech-enabled", 0.45),
                    ("frictionless", 0.45),
                    ("seamless", 0.35),
                    ("personalized", 0.3),
                    ("the algorithm decides", 0.7),
                    ("ai", 0.2),
                    ("smart", 0.15),
                    ("innovation", 0.2),
                ],
                "What human decisions are hidden inside this technology?",
                "Technological frames make human choices appear as neutral computation.",
                "Find the humans. Someone designed this, chose the data, and profits from it.",
            ),
            entry(
                Category::Frame(FrameType::Mythological),
                &[
                    ("founding fathers", 0.55),
                    ("self-made", 0.5),
                    ("american dream", 0.6),
                    ("invisible hand", 0.6),
                    ("free world", 0.45),
                    ("civilization", 0.3),
                    ("manifest destiny", 0.7),
                    ("heritage", 0.3),
                    ("promised land", 0.6),
                    ("destiny", 0.35),
                    ("greatness", 0.35),
                    ("chosen people", 0.6),
                    ("meritocracy", 0.35),
                    ("the people", 0.3),
                    ("legacy", 0.2),
                    ("chosen", 0.25),
                ],
                "What does this myth authorize, and what does it forbid?",
                "Mythological frames sacralize power arrangements so they cannot be questioned.",
                "Tell the same story from the perspective of those the myth excludes.",
            ),
        ]
    }
}
