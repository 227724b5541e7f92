//! Crumb generation from detection results.
//!
//! Each active category yields one crumb, carrying the lexicon text that
//! fits its family:
//!
//! | Family | Crumb type      | Payload         |
//! |--------|-----------------|-----------------|
//! | frame  | `question`      | question        |
//! | mask   | `pattern`       | hidden cost     |
//! | spell  | `paradox`       | question        |
//! | prison | `trail_to_door` | mitigation      |
//!
//! Crumbs are stamped with the scan time, so the same bundle always yields
//! the same crumbs.

use crumb_trail::{Crumb, CrumbType};
use lexicon::{Family, Lexicon, LexiconEntry};

use crate::detect::DetectionBundle;

/// Source reference used by bridge crumbs.
pub const BRIDGE_SOURCE: &str = "bridge";

fn crumb_parts(entry: &LexiconEntry) -> (CrumbType, &str) {
    match entry.category.family() {
        Family::Frame => (CrumbType::Question, entry.question.as_str()),
        Family::Mask => (CrumbType::Pattern, entry.hidden_cost.as_str()),
        Family::Spell => (CrumbType::Paradox, entry.question.as_str()),
        Family::Prison => (CrumbType::TrailToDoor, entry.mitigation.as_str()),
    }
}

/// One crumb per active category, family by family in ranked order.
pub fn generate_crumbs(bundle: &DetectionBundle, lexicon: &Lexicon, threshold: f64) -> Vec<Crumb> {
    bundle
        .active(threshold)
        .into_iter()
        .filter_map(|score| lexicon.entry(score.category))
        .map(|entry| {
            let (crumb_type, payload) = crumb_parts(entry);
            Crumb::new(crumb_type, payload, entry.category.reference())
                .with_created_at(bundle.scanned_at)
        })
        .collect()
}

/// Summary crumb counting active categories per family.
pub fn bridge_crumb(bundle: &DetectionBundle, threshold: f64, awareness: f64) -> Crumb {
    let counts: Vec<String> = bundle
        .families()
        .into_iter()
        .map(|f| format!("{} {}", f.family, f.active_count(threshold)))
        .collect();
    let payload = format!(
        "Active: {}. Awareness {:.2}. Follow the crumbs above to see what the text takes for granted.",
        counts.join(", "),
        awareness
    );

    Crumb::new(CrumbType::Bridge, payload, BRIDGE_SOURCE).with_created_at(bundle.scanned_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::SignalMatcher;
    use lexicon::{Category, MaskType};
    use std::sync::Arc;

    #[test]
    fn test_one_crumb_per_active_category() {
        let lexicon = Arc::new(Lexicon::builtin());
        let matcher = SignalMatcher::new(Arc::clone(&lexicon));
        let bundle =
            matcher.detect_all("The market naturally rewards merit; there is no alternative to this system");

        let crumbs = generate_crumbs(&bundle, &lexicon, 0.3);
        assert_eq!(crumbs.len(), bundle.active(0.3).len());
        assert!(crumbs.iter().all(|c| c.created_at == bundle.scanned_at));

        let merit = Category::Mask(MaskType::Meritocracy);
        let crumb = crumbs
            .iter()
            .find(|c| c.source == merit.reference())
            .expect("meritocracy crumb");
        assert_eq!(crumb.crumb_type, CrumbType::Pattern);
        assert_eq!(crumb.payload, lexicon.entry(merit).unwrap().hidden_cost);
    }

    #[test]
    fn test_family_mapping() {
        let lexicon = Arc::new(Lexicon::builtin());
        let matcher = SignalMatcher::new(Arc::clone(&lexicon));
        let bundle = matcher.detect_all(
            "Everyone knows that's just how it is. If we don't act now, collapse. Stay in your lane.",
        );

        let crumbs = generate_crumbs(&bundle, &lexicon, 0.3);
        let type_of = |source: &str| {
            crumbs
                .iter()
                .find(|c| c.source == source)
                .map(|c| c.crumb_type)
        };
        assert_eq!(type_of("frame:normative"), Some(CrumbType::Question));
        assert_eq!(type_of("spell:fear_narrative"), Some(CrumbType::Paradox));
        assert_eq!(type_of("prison:identity_cage"), Some(CrumbType::TrailToDoor));
    }

    #[test]
    fn test_empty_bundle_has_no_crumbs() {
        let lexicon = Arc::new(Lexicon::builtin());
        let bundle = SignalMatcher::new(Arc::clone(&lexicon)).detect_all("");
        assert!(generate_crumbs(&bundle, &lexicon, 0.3).is_empty());

        let bridge = bridge_crumb(&bundle, 0.3, 0.0);
        assert_eq!(bridge.crumb_type, CrumbType::Bridge);
        assert!(bridge.payload.contains("frame 0"));
    }
}
