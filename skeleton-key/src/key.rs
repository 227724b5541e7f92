//! SkeletonKey - the detector orchestrator.
//!
//! Owns the lexicon, matcher, influence graph and crumb trail for one
//! caller. Nothing here is global; build as many as you need.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crumb_trail::{CrumbRecord, Trail};
use lexicon::{Category, Family, Lexicon};

use crate::analysis::{
    awareness_score, seeing_depth, strongest, Analysis, AnalyzeOptions, CorpusReport,
};
use crate::config::SkeletonConfig;
use crate::crumbs::{bridge_crumb, generate_crumbs};
use crate::detect::{CooccurrenceMatrix, FamilyScores, SignalMatcher};
use crate::graph::{InfluenceGraph, NetworkSnapshot};
use crate::scoring::{cage_report, potency_report};
use crate::types::{Result, SkeletonError};

/// Cooperative cancellation for corpus scans.
///
/// Checked between texts; a text already being scanned finishes.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The detector.
///
/// Analyses:
/// - Score all four families for a text
/// - Rate spell potency and prison confinement
/// - Mention mask performers in the influence graph
/// - Leave a verifiable crumb trail
pub struct SkeletonKey {
    /// Configuration
    config: SkeletonConfig,
    /// Shared lexicon
    lexicon: Arc<Lexicon>,
    /// Signal matcher over the lexicon
    matcher: SignalMatcher,
    /// Influence graph
    graph: InfluenceGraph,
    /// Crumb trail
    trail: Trail,
}

impl SkeletonKey {
    /// Create a detector with the built-in lexicon.
    pub fn new(config: SkeletonConfig) -> Self {
        Self::with_lexicon(config, Arc::new(Lexicon::builtin()))
    }

    /// Create a detector over a custom lexicon.
    pub fn with_lexicon(config: SkeletonConfig, lexicon: Arc<Lexicon>) -> Self {
        let matcher = SignalMatcher::new(Arc::clone(&lexicon))
            .with_whole_word(config.matcher.whole_word)
            .with_trace_hits(config.general.trace_hits);
        let graph = InfluenceGraph::from_config(&config.graph);
        let trail = Trail::new().with_lock_timeout(config.trail.lock_timeout());

        info!(
            detector_id = %config.detector_id,
            signals = lexicon.signal_count(),
            "SkeletonKey created"
        );

        Self {
            config,
            lexicon,
            matcher,
            graph,
            trail,
        }
    }

    /// Replace the trail, e.g. with one loaded from disk.
    pub fn with_trail(mut self, trail: Trail) -> Self {
        self.trail = trail.with_lock_timeout(self.config.trail.lock_timeout());
        self
    }

    /// Get detector ID.
    pub fn id(&self) -> &str {
        &self.config.detector_id
    }

    /// Configuration in use.
    pub fn config(&self) -> &SkeletonConfig {
        &self.config
    }

    /// The lexicon.
    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    /// The signal matcher.
    pub fn matcher(&self) -> &SignalMatcher {
        &self.matcher
    }

    /// The influence graph.
    pub fn graph(&self) -> &InfluenceGraph {
        &self.graph
    }

    /// The crumb trail.
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Analyze one text.
    pub fn analyze(&self, text: &str) -> Result<Analysis> {
        self.analyze_with(text, AnalyzeOptions::default())
    }

    /// Analyze one text with a system name, context and observed edges.
    ///
    /// Context is scanned for frames only. Observed edges are merged into
    /// the graph, and only they count toward this analysis's awareness.
    pub fn analyze_with(&self, text: &str, options: AnalyzeOptions) -> Result<Analysis> {
        let threshold = self.config.scoring.active_threshold;
        let mut bundle = self.matcher.detect_all(text);
        if !options.context.trim().is_empty() {
            let framed = format!("{} {}", text, options.context);
            bundle.frames = self.matcher.detect(&framed, Family::Frame);
        }

        let mut performers = Vec::new();
        if self.config.general.track_mask_performers {
            for score in bundle.masks.active(threshold) {
                if let Category::Mask(mask) = score.category {
                    let id = format!("performer:{}", mask.as_str());
                    self.graph.mention(&id, mask.carries_formal_power())?;
                    performers.push(id);
                }
            }
        }

        let mut edges = Vec::with_capacity(options.edges.len());
        for observed in &options.edges {
            edges.push(self.graph.add_edge(
                &observed.source,
                &observed.target,
                observed.strength,
                observed.visibility,
            )?);
        }

        let distinct: BTreeSet<(&str, &str)> = edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        let awareness = awareness_score(&bundle, threshold, distinct.len());
        let depth = seeing_depth(&bundle, threshold, awareness);

        let analysis = Analysis {
            analysis_id: uuid::Uuid::new_v4().to_string(),
            detector_id: self.config.detector_id.clone(),
            system_name: options.system_name,
            potency: potency_report(&bundle.spells.scores, self.config.scoring.potency_alpha),
            cage: cage_report(&bundle.prisons, 0, &self.lexicon, &self.config.scoring),
            bundle,
            performers,
            edges,
            awareness,
            depth,
            analyzed_at: Utc::now(),
        };

        debug!(
            analysis_id = %analysis.analysis_id,
            system = %analysis.system_name,
            depth = analysis.depth.as_str(),
            awareness = analysis.awareness,
            potency = analysis.potency.potency,
            cage = analysis.cage.score,
            "Analysis complete"
        );

        Ok(analysis)
    }

    /// Analyze every text and aggregate across the corpus.
    ///
    /// Stops between texts once `cancel` is set.
    pub fn scan_corpus<S: AsRef<str>>(&self, texts: &[S], cancel: &CancelFlag) -> Result<CorpusReport> {
        let threshold = self.config.scoring.active_threshold;
        let mut analyses = Vec::with_capacity(texts.len());

        for text in texts {
            if cancel.is_cancelled() {
                info!(completed = analyses.len(), total = texts.len(), "Corpus scan cancelled");
                return Err(SkeletonError::Cancelled {
                    completed: analyses.len(),
                });
            }
            analyses.push(self.analyze(text.as_ref())?);
        }

        let matrix = CooccurrenceMatrix::from_bundles(analyses.iter().map(|a| &a.bundle), threshold);
        let spells = strongest(Family::Spell, analyses.iter().map(|a| &a.bundle.spells));
        let prisons = strongest(Family::Prison, analyses.iter().map(|a| &a.bundle.prisons));

        let report = CorpusReport {
            architecture: matrix.report(),
            matrix,
            spell_potency: potency_report(&spells.scores, self.config.scoring.potency_alpha),
            cage: cage_report(&prisons, 0, &self.lexicon, &self.config.scoring),
            analyses,
        };

        info!(
            corpus_size = report.matrix.corpus_size,
            dominant = ?report.architecture.dominant.map(|c| c.reference()),
            "Corpus scanned"
        );

        Ok(report)
    }

    /// Seal an analysis's crumbs into the trail as one chain named by the
    /// analysis id.
    ///
    /// With a persist path configured, the crumbs are committed only once
    /// the extended trail is on disk; a failed write can be retried without
    /// sealing them twice.
    pub fn leave_trail(&self, analysis: &Analysis) -> Result<Vec<CrumbRecord>> {
        let threshold = self.config.scoring.active_threshold;
        let mut crumbs = generate_crumbs(&analysis.bundle, &self.lexicon, threshold);
        if self.config.trail.bridge_crumb {
            crumbs.push(bridge_crumb(&analysis.bundle, threshold, analysis.awareness));
        }
        let crumbs = crumbs
            .into_iter()
            .map(|c| c.with_chain_id(analysis.analysis_id.as_str()));

        let records = match &self.config.trail.persist_path {
            Some(path) => self.trail.append_all_and_persist(crumbs, path)?,
            None => self.trail.append_all(crumbs)?,
        };

        debug!(
            analysis_id = %analysis.analysis_id,
            crumbs = records.len(),
            "Left trail"
        );

        Ok(records)
    }

    /// Crumbs one analysis left, in trail order.
    pub fn follow_chain(&self, analysis: &Analysis) -> Result<Vec<CrumbRecord>> {
        Ok(self.trail.follow_chain(&analysis.analysis_id)?)
    }

    /// Run the frame family over source text.
    pub fn examine_source(&self, source: &str) -> FamilyScores {
        self.matcher.detect(source, Family::Frame)
    }

    /// Snapshot of the influence network with configured thresholds.
    pub fn network(&self) -> Result<NetworkSnapshot> {
        let graph = &self.config.graph;
        self.graph.unmask_network(
            graph.out_weight_threshold,
            graph.visibility_ceiling,
            graph.hidden_visibility_cutoff,
        )
    }

    /// Puppeteer ids with configured thresholds.
    pub fn puppeteers(&self) -> Result<Vec<String>> {
        let graph = &self.config.graph;
        self.graph
            .find_puppeteers(graph.out_weight_threshold, graph.visibility_ceiling)
    }
}

impl Default for SkeletonKey {
    fn default() -> Self {
        Self::new(SkeletonConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeObservation;
    use lexicon::MaskType;

    const MERIT: &str = "The market naturally rewards merit; there is no alternative to this system";

    #[test]
    fn test_analyze_mentions_performers() {
        let key = SkeletonKey::new(SkeletonConfig::new("test"));
        let analysis = key.analyze(MERIT).unwrap();

        assert_eq!(analysis.detector_id, "test");
        assert!(analysis
            .performers
            .contains(&"performer:meritocracy".to_string()));
        let actor = key
            .graph()
            .get_actor("performer:meritocracy")
            .unwrap()
            .unwrap();
        assert!(!actor.formal_power);
    }

    #[test]
    fn test_performers_can_be_disabled() {
        let mut config = SkeletonConfig::new("quiet");
        config.general.track_mask_performers = false;
        let key = SkeletonKey::new(config);
        let analysis = key.analyze(MERIT).unwrap();
        assert!(analysis.performers.is_empty());
        assert_eq!(key.graph().size().unwrap(), (0, 0));
    }

    #[test]
    fn test_leave_trail_with_bridge() {
        let mut config = SkeletonConfig::new("bridge");
        config.trail.bridge_crumb = true;
        let key = SkeletonKey::new(config);

        let analysis = key.analyze(MERIT).unwrap();
        let records = key.leave_trail(&analysis).unwrap();

        let active = analysis.bundle.active(0.3).len();
        assert_eq!(records.len(), active + 1);
        assert_eq!(
            records.last().unwrap().crumb_type,
            crumb_trail::CrumbType::Bridge
        );
        key.trail().verify().unwrap();
    }

    #[test]
    fn test_trail_spans_analyses() {
        let key = SkeletonKey::default();
        let first = key.leave_trail(&key.analyze(MERIT).unwrap()).unwrap();
        let second = key
            .leave_trail(&key.analyze("Stay in your lane.").unwrap())
            .unwrap();

        assert_eq!(second[0].prev_digest, first.last().unwrap().digest);
        key.trail().verify().unwrap();
    }

    #[test]
    fn test_context_feeds_frames_only() {
        let key = SkeletonKey::default();
        let options = AnalyzeOptions::new("hiring pipeline").with_context("Everyone knows that's just how it is.");
        let analysis = key.analyze_with("A quiet afternoon.", options).unwrap();

        assert_eq!(analysis.system_name, "hiring pipeline");
        assert!(analysis.bundle.frames.max_score() > 0.0);
        assert_eq!(analysis.bundle.masks.max_score(), 0.0);
        assert_eq!(analysis.bundle.spells.max_score(), 0.0);

        let plain = key.analyze("A quiet afternoon.").unwrap();
        assert_eq!(plain.system_name, crate::analysis::DEFAULT_SYSTEM_NAME);
        assert_eq!(plain.bundle.frames.max_score(), 0.0);
    }

    #[test]
    fn test_awareness_counts_only_own_edges() {
        let key = SkeletonKey::default();
        let mut options = AnalyzeOptions::new("board");
        for n in 0..5 {
            options = options.with_edge(EdgeObservation::new("board", format!("seat{}", n), 0.8, 0.1));
        }
        let with_edges = key.analyze_with("", options).unwrap();
        assert_eq!(with_edges.edges.len(), 5);
        assert!((with_edges.awareness - 0.2).abs() < 1e-9);
        assert_eq!(key.graph().size().unwrap(), (6, 5));

        let later = key.analyze("").unwrap();
        assert!(later.edges.is_empty());
        assert_eq!(later.awareness, 0.0);
    }

    #[test]
    fn test_repeated_edge_counts_once() {
        let key = SkeletonKey::default();
        let options = AnalyzeOptions::default()
            .with_edge(EdgeObservation::new("a", "b", 0.4, 0.1))
            .with_edge(EdgeObservation::new("a", "b", 0.6, 0.3));
        let analysis = key.analyze_with("", options).unwrap();
        assert_eq!(analysis.edges.len(), 2);
        assert!((analysis.awareness - 0.2 / 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_follow_chain_separates_analyses() {
        let key = SkeletonKey::default();
        let first = key.analyze(MERIT).unwrap();
        let second = key.analyze("Stay in your lane.").unwrap();
        let first_records = key.leave_trail(&first).unwrap();
        let second_records = key.leave_trail(&second).unwrap();

        assert!(!first_records.is_empty());
        assert!(first_records.iter().all(|r| r.chain_id == first.analysis_id));
        assert_eq!(key.follow_chain(&first).unwrap(), first_records);
        assert_eq!(key.follow_chain(&second).unwrap(), second_records);
        key.trail().verify().unwrap();
    }

    #[test]
    fn test_cancelled_scan() {
        let key = SkeletonKey::default();
        let cancel = CancelFlag::new();
        cancel.cancel();

        let err = key.scan_corpus(&[MERIT, MERIT], &cancel).unwrap_err();
        assert!(matches!(err, SkeletonError::Cancelled { completed: 0 }));
    }

    #[test]
    fn test_scan_corpus() {
        let key = SkeletonKey::default();
        let report = key
            .scan_corpus(&[MERIT, "There is no alternative.", ""], &CancelFlag::new())
            .unwrap();

        assert_eq!(report.analyses.len(), 3);
        assert_eq!(report.matrix.corpus_size, 3);
        assert_eq!(
            report.architecture.dominant,
            Some(Category::Mask(MaskType::Inevitability))
        );
    }

    #[test]
    fn test_examine_source() {
        let key = SkeletonKey::default();
        let frames = key.examine_source("// the algorithm decides; this is the standard procedure");
        assert_eq!(frames.family, Family::Frame);
        assert!(frames.max_score() > 0.0);
    }
}
