use std::sync::Arc;

use lexicon::{Family, Lexicon};
use proptest::prelude::*;
use skeleton_key::detect::{CategoryScore, SignalMatcher};
use skeleton_key::graph::InfluenceGraph;
use skeleton_key::scoring::{cage_score, potency};

fn spell_scores(values: &[f64]) -> Vec<CategoryScore> {
    Family::Spell
        .categories()
        .into_iter()
        .zip(values.iter().copied())
        .map(|(category, score)| CategoryScore {
            category,
            score,
            hit_count: 0,
        })
        .collect()
}

fn prison_scores(values: &[f64]) -> Vec<CategoryScore> {
    Family::Prison
        .categories()
        .into_iter()
        .zip(values.iter().copied())
        .map(|(category, score)| CategoryScore {
            category,
            score,
            hit_count: 0,
        })
        .collect()
}

const PHRASES: [&str; 8] = [
    "no alternative",
    "rewards merit",
    "everyone knows",
    "stay in your lane",
    "if we don't act now",
    "payment plan",
    "the arc of history",
    "in this together",
];

proptest! {
    #[test]
    fn detection_scores_stay_bounded(s in ".{0,300}") {
        let matcher = SignalMatcher::new(Arc::new(Lexicon::builtin()));
        for family in Family::ALL {
            let result = matcher.detect(&s, family);
            prop_assert_eq!(result.scores.len(), 8);
            for score in &result.scores {
                prop_assert!((0.0..=1.0).contains(&score.score));
            }
        }
    }

    #[test]
    fn compounding_never_exceeds_one(picks in proptest::collection::vec(0usize..8, 0..40)) {
        let text = picks.iter().map(|&i| PHRASES[i]).collect::<Vec<_>>().join(". ");
        let matcher = SignalMatcher::new(Arc::new(Lexicon::builtin()));
        let bundle = matcher.detect_all(&text);
        for family in bundle.families() {
            for score in &family.scores {
                prop_assert!(score.score <= 1.0 && score.score >= 0.0);
            }
        }
    }

    #[test]
    fn potency_stays_bounded(
        values in proptest::collection::vec(0.0f64..=1.0, 8),
        alpha in 0.0f64..=1.0,
    ) {
        let p = potency(&spell_scores(&values), alpha);
        prop_assert!((0.0..=1.0).contains(&p), "potency {}", p);
    }

    #[test]
    fn cage_stays_bounded(
        values in proptest::collection::vec(0.0f64..=1.0, 8),
        doors in 0usize..20,
    ) {
        let c = cage_score(&prison_scores(&values), doors);
        prop_assert!((0.0..=1.0).contains(&c), "cage {}", c);
    }

    #[test]
    fn doors_never_raise_the_cage(
        values in proptest::collection::vec(0.0f64..=1.0, 8),
        doors in 0usize..8,
    ) {
        let scores = prison_scores(&values);
        prop_assert!(cage_score(&scores, doors + 1) <= cage_score(&scores, doors));
    }

    #[test]
    fn edges_stay_bounded(
        observations in proptest::collection::vec((0usize..4, 0usize..4, -1.0f64..2.0, -1.0f64..2.0), 1..30),
    ) {
        let graph = InfluenceGraph::new();
        for (s, t, strength, visibility) in observations {
            let result = graph.add_edge(&format!("a{}", s), &format!("a{}", t), strength, visibility);
            prop_assert_eq!(result.is_err(), s == t);
        }
        let snapshot = graph.unmask_network(0.5, 0.2, 0.5).unwrap();
        for edge in &snapshot.edges {
            prop_assert!(edge.source != edge.target);
            prop_assert!((0.0..=1.0).contains(&edge.strength));
            prop_assert!((0.0..=1.0).contains(&edge.visibility));
        }
    }
}
