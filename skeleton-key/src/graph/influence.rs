//! The concurrency-safe influence graph store.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::config::GraphConfig;
use crate::graph::{
    rank_puppeteers, Actor, EdgeMergePolicy, InfluenceEdge, NetworkSnapshot, PuppeteerRank,
};
use crate::types::{Result, SkeletonError};

#[derive(Debug, Default)]
struct GraphState {
    actors: BTreeMap<String, Actor>,
    edges: BTreeMap<(String, String), InfluenceEdge>,
}

impl GraphState {
    fn observe(&mut self, id: &str, formal_power: bool) -> &Actor {
        let actor = self
            .actors
            .entry(id.to_string())
            .or_insert_with(|| Actor::new(id));
        actor.evidence_count += 1;
        actor.formal_power |= formal_power;
        actor
    }
}

/// Directed graph of actors and influence edges.
///
/// One mutex guards the whole graph, so every read sees a consistent state.
/// Actors are created on first mention and never removed.
#[derive(Debug)]
pub struct InfluenceGraph {
    state: Mutex<GraphState>,
    merge_policy: EdgeMergePolicy,
    lock_timeout: Duration,
}

impl InfluenceGraph {
    /// Create an empty graph with default settings.
    pub fn new() -> Self {
        Self::from_config(&GraphConfig::default())
    }

    /// Create an empty graph from configuration.
    pub fn from_config(config: &GraphConfig) -> Self {
        Self {
            state: Mutex::new(GraphState::default()),
            merge_policy: config.merge_policy,
            lock_timeout: config.lock_timeout(),
        }
    }

    /// Set the edge merge policy.
    pub fn with_merge_policy(mut self, policy: EdgeMergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    /// Set the lock timeout.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, GraphState>> {
        self.state.try_lock_for(self.lock_timeout).ok_or_else(|| {
            let waited_ms = self.lock_timeout.as_millis() as u64;
            warn!(waited_ms, "Influence graph lock timed out");
            SkeletonError::ConcurrencyConflict {
                resource: "influence graph",
                waited_ms,
            }
        })
    }

    /// Record a mention of an actor, creating it if needed.
    pub fn mention(&self, id: &str, formal_power: bool) -> Result<Actor> {
        if id.is_empty() {
            return Err(SkeletonError::InvalidEdge("empty actor id".to_string()));
        }
        let mut state = self.lock()?;
        Ok(state.observe(id, formal_power).clone())
    }

    /// Record an influence observation.
    ///
    /// Strength and visibility are clamped to [0, 1]. A repeat of an
    /// existing `(source, target)` pair updates that edge: strength by the
    /// merge policy, visibility as the running mean of observations.
    pub fn add_edge(
        &self,
        source: &str,
        target: &str,
        strength: f64,
        visibility: f64,
    ) -> Result<InfluenceEdge> {
        if source.is_empty() || target.is_empty() {
            return Err(SkeletonError::InvalidEdge("empty actor id".to_string()));
        }
        if source == target {
            return Err(SkeletonError::InvalidEdge(format!(
                "self-loop on '{}'",
                source
            )));
        }
        if !strength.is_finite() || !visibility.is_finite() {
            return Err(SkeletonError::InvalidEdge(format!(
                "non-finite value on '{}' -> '{}'",
                source, target
            )));
        }

        let strength = strength.clamp(0.0, 1.0);
        let visibility = visibility.clamp(0.0, 1.0);
        let policy = self.merge_policy;

        let mut state = self.lock()?;
        state.observe(source, false);
        state.observe(target, false);

        let key = (source.to_string(), target.to_string());
        let edge = state
            .edges
            .entry(key)
            .and_modify(|edge| {
                let n = edge.evidence_count as f64;
                edge.strength = policy.merge(edge.strength, strength);
                edge.visibility = (edge.visibility * n + visibility) / (n + 1.0);
                edge.evidence_count += 1;
            })
            .or_insert_with(|| InfluenceEdge {
                source: source.to_string(),
                target: target.to_string(),
                strength,
                visibility,
                evidence_count: 1,
            })
            .clone();

        debug!(
            source = %edge.source,
            target = %edge.target,
            strength = edge.strength,
            visibility = edge.visibility,
            evidence = edge.evidence_count,
            "Recorded influence edge"
        );

        Ok(edge)
    }

    /// Look up an actor.
    pub fn get_actor(&self, id: &str) -> Result<Option<Actor>> {
        Ok(self.lock()?.actors.get(id).cloned())
    }

    /// Look up an edge.
    pub fn get_edge(&self, source: &str, target: &str) -> Result<Option<InfluenceEdge>> {
        Ok(self
            .lock()?
            .edges
            .get(&(source.to_string(), target.to_string()))
            .cloned())
    }

    /// Number of actors and edges.
    pub fn size(&self) -> Result<(usize, usize)> {
        let state = self.lock()?;
        Ok((state.actors.len(), state.edges.len()))
    }

    /// Ranked puppeteers with their figures.
    pub fn rank_puppeteers(
        &self,
        out_threshold: f64,
        visibility_ceiling: f64,
    ) -> Result<Vec<PuppeteerRank>> {
        let state = self.lock()?;
        Ok(rank_puppeteers(
            state.edges.values(),
            out_threshold,
            visibility_ceiling,
        ))
    }

    /// Ids of ranked puppeteers.
    pub fn find_puppeteers(&self, out_threshold: f64, visibility_ceiling: f64) -> Result<Vec<String>> {
        Ok(self
            .rank_puppeteers(out_threshold, visibility_ceiling)?
            .into_iter()
            .map(|r| r.actor)
            .collect())
    }

    /// Full view of the network with hidden relationships called out.
    pub fn unmask_network(
        &self,
        out_threshold: f64,
        visibility_ceiling: f64,
        hidden_cutoff: f64,
    ) -> Result<NetworkSnapshot> {
        let state = self.lock()?;

        let edges: Vec<InfluenceEdge> = state.edges.values().cloned().collect();
        let hidden_edges: Vec<InfluenceEdge> = edges
            .iter()
            .filter(|e| e.visibility < hidden_cutoff)
            .cloned()
            .collect();
        let hidden_edge_ratio = if edges.is_empty() {
            0.0
        } else {
            hidden_edges.len() as f64 / edges.len() as f64
        };

        Ok(NetworkSnapshot {
            actors: state.actors.values().cloned().collect(),
            puppeteers: rank_puppeteers(&edges, out_threshold, visibility_ceiling),
            edges,
            hidden_edges,
            hidden_edge_ratio,
            taken_at: Utc::now(),
        })
    }
}

impl Default for InfluenceGraph {
    fn default() -> Self {
        Self::new()
    }
}
