//! Puppeteer ranking.

use std::collections::BTreeMap;

use crate::graph::{InfluenceEdge, PuppeteerRank};

#[derive(Default)]
struct Tally {
    out_weight: f64,
    out_degree: usize,
    incoming_visibility: f64,
    in_degree: usize,
}

/// Rank actors whose outgoing strength reaches `out_threshold` while the
/// mean visibility of their incoming edges stays at or below
/// `visibility_ceiling`.
///
/// Actors with no outgoing edges never qualify. Results are ordered by
/// `out_weight - visibility` descending, then by actor id.
pub fn rank_puppeteers<'a>(
    edges: impl IntoIterator<Item = &'a InfluenceEdge>,
    out_threshold: f64,
    visibility_ceiling: f64,
) -> Vec<PuppeteerRank> {
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

    for edge in edges {
        let source = tallies.entry(edge.source.as_str()).or_default();
        source.out_weight += edge.strength;
        source.out_degree += 1;

        let target = tallies.entry(edge.target.as_str()).or_default();
        target.incoming_visibility += edge.visibility;
        target.in_degree += 1;
    }

    let mut ranked: Vec<PuppeteerRank> = tallies
        .into_iter()
        .filter(|(_, t)| t.out_degree > 0)
        .map(|(actor, t)| PuppeteerRank {
            actor: actor.to_string(),
            out_weight: t.out_weight,
            visibility: if t.in_degree == 0 {
                0.0
            } else {
                t.incoming_visibility / t.in_degree as f64
            },
            out_degree: t.out_degree,
        })
        .filter(|r| r.out_weight >= out_threshold && r.visibility <= visibility_ceiling)
        .collect();

    ranked.sort_by(|a, b| {
        b.concealment()
            .total_cmp(&a.concealment())
            .then_with(|| a.actor.cmp(&b.actor))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(source: &str, target: &str, strength: f64, visibility: f64) -> InfluenceEdge {
        InfluenceEdge {
            source: source.into(),
            target: target.into(),
            strength,
            visibility,
            evidence_count: 1,
        }
    }

    #[test]
    fn test_qualification_thresholds() {
        // "hidden" pushes 0.9 out and is seen through an edge of visibility 0.05
        let edges = vec![
            edge("hidden", "board", 0.9, 0.3),
            edge("press", "hidden", 0.1, 0.05),
        ];
        let ranked = rank_puppeteers(&edges, 0.5, 0.2);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].actor, "hidden");
        assert!((ranked[0].visibility - 0.05).abs() < 1e-9);

        let visible = vec![
            edge("hidden", "board", 0.9, 0.3),
            edge("press", "hidden", 0.1, 0.5),
        ];
        assert!(rank_puppeteers(&visible, 0.5, 0.2).is_empty());
    }

    #[test]
    fn test_no_incoming_means_zero_visibility() {
        let edges = vec![edge("a", "b", 0.6, 0.9)];
        let ranked = rank_puppeteers(&edges, 0.5, 0.2);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].visibility, 0.0);
    }

    #[test]
    fn test_sink_never_qualifies() {
        let edges = vec![edge("a", "b", 0.6, 0.0)];
        let ranked = rank_puppeteers(&edges, 0.0, 1.0);
        assert!(ranked.iter().all(|r| r.actor != "b"));
    }

    #[test]
    fn test_ordering_and_ties() {
        let edges = vec![
            edge("zed", "x", 0.8, 0.0),
            edge("amy", "x", 0.8, 0.0),
            edge("top", "x", 1.0, 0.0),
            edge("top", "y", 0.5, 0.0),
        ];
        let ranked: Vec<String> = rank_puppeteers(&edges, 0.5, 0.2)
            .into_iter()
            .map(|r| r.actor)
            .collect();
        assert_eq!(ranked, vec!["top", "amy", "zed"]);
    }
}
