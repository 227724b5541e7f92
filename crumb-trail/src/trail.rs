//! The append-only trail store.

use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::crumb::{Crumb, CrumbRecord, ROOT_DIGEST};
use crate::error::{Result, TrailError};

/// Default bound on lock acquisition.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(250);

/// Ordered, hash-chained sequence of crumb records.
///
/// All mutation goes through one mutex. Lock waits are bounded and a timeout
/// surfaces as [`TrailError::ConcurrencyConflict`].
#[derive(Debug)]
pub struct Trail {
    /// Chain id given to crumbs that do not name their own
    trail_id: String,
    records: Mutex<Vec<CrumbRecord>>,
    lock_timeout: Duration,
}

impl Trail {
    /// Create an empty trail.
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    /// Set the lock timeout.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Set the trail id.
    pub fn with_trail_id(mut self, trail_id: impl Into<String>) -> Self {
        self.trail_id = trail_id.into();
        self
    }

    pub(crate) fn from_records(records: Vec<CrumbRecord>) -> Self {
        let mut trail_id = Uuid::new_v4().simple().to_string();
        trail_id.truncate(16);
        Self {
            trail_id,
            records: Mutex::new(records),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Get trail ID.
    pub fn trail_id(&self) -> &str {
        &self.trail_id
    }

    /// Seal `crumb` after the last of `records`.
    pub(crate) fn seal_next(&self, records: &[CrumbRecord], crumb: Crumb) -> CrumbRecord {
        let prev = records
            .last()
            .map(|r| r.digest.as_str())
            .unwrap_or(ROOT_DIGEST);
        CrumbRecord::seal(crumb, prev, &self.trail_id)
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Vec<CrumbRecord>>> {
        self.records.try_lock_for(self.lock_timeout).ok_or_else(|| {
            let waited_ms = self.lock_timeout.as_millis() as u64;
            warn!(waited_ms, "Trail lock timed out");
            TrailError::ConcurrencyConflict { waited_ms }
        })
    }

    /// Seal a crumb after the current tail and append it.
    pub fn append(&self, crumb: Crumb) -> Result<CrumbRecord> {
        let mut records = self.lock()?;
        let record = self.seal_next(&records, crumb);

        debug!(
            index = records.len(),
            crumb_type = %record.crumb_type,
            source = %record.source,
            "Appended crumb"
        );

        records.push(record.clone());
        Ok(record)
    }

    /// Append several crumbs under one lock acquisition.
    pub fn append_all(&self, crumbs: impl IntoIterator<Item = Crumb>) -> Result<Vec<CrumbRecord>> {
        let mut records = self.lock()?;
        let mut sealed = Vec::new();
        for crumb in crumbs {
            let record = self.seal_next(&records, crumb);
            records.push(record.clone());
            sealed.push(record);
        }
        debug!(count = sealed.len(), total = records.len(), "Appended crumbs");
        Ok(sealed)
    }

    /// Snapshot of every record in order.
    pub fn records(&self) -> Result<Vec<CrumbRecord>> {
        Ok(self.lock()?.clone())
    }

    /// Number of records.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// Whether the trail has no records.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    /// Digest of the last record, or [`ROOT_DIGEST`] for an empty trail.
    pub fn last_digest(&self) -> Result<String> {
        Ok(self
            .lock()?
            .last()
            .map(|r| r.digest.clone())
            .unwrap_or_else(|| ROOT_DIGEST.to_string()))
    }

    /// Check every link and digest in the chain.
    pub fn verify(&self) -> Result<()> {
        verify_chain(&self.lock()?)
    }

    /// Records whose marker appears in `markers`, in trail order.
    pub fn find_by_markers<S: AsRef<str>>(&self, markers: &[S]) -> Result<Vec<CrumbRecord>> {
        let records = self.lock()?;
        Ok(records
            .iter()
            .filter(|r| {
                let marker = r.marker();
                markers.iter().any(|m| m.as_ref() == marker)
            })
            .cloned()
            .collect())
    }

    /// Records of one chain, in trail order.
    pub fn follow_chain(&self, chain_id: &str) -> Result<Vec<CrumbRecord>> {
        let records = self.lock()?;
        Ok(records
            .iter()
            .filter(|r| r.chain_id == chain_id)
            .cloned()
            .collect())
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk a chain from the root and report the first broken record.
pub fn verify_chain(records: &[CrumbRecord]) -> Result<()> {
    let mut expected_prev = ROOT_DIGEST;
    for (index, record) in records.iter().enumerate() {
        if record.prev_digest != expected_prev {
            warn!(index, "Chain link mismatch");
            return Err(TrailError::ChainIntegrity {
                index,
                reason: "previous digest does not match predecessor".to_string(),
            });
        }
        if !record.is_intact() {
            warn!(index, "Record digest mismatch");
            return Err(TrailError::ChainIntegrity {
                index,
                reason: "digest does not match record contents".to_string(),
            });
        }
        expected_prev = &record.digest;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crumb::CrumbType;
    use std::sync::Arc;

    fn crumb(n: usize) -> Crumb {
        Crumb::new(CrumbType::Question, format!("question {}", n), "frame:normative")
    }

    #[test]
    fn test_first_record_links_to_root() {
        let trail = Trail::new();
        let record = trail.append(crumb(0)).unwrap();
        assert_eq!(record.prev_digest, ROOT_DIGEST);
        assert_eq!(trail.last_digest().unwrap(), record.digest);
    }

    #[test]
    fn test_chain_links() {
        let trail = Trail::new();
        let sealed = trail.append_all((0..5).map(crumb)).unwrap();
        assert_eq!(sealed.len(), 5);

        let records = trail.records().unwrap();
        for pair in records.windows(2) {
            assert_eq!(pair[1].prev_digest, pair[0].digest);
        }
        trail.verify().unwrap();
    }

    #[test]
    fn test_verify_reports_tampered_index() {
        let trail = Trail::new();
        trail.append_all((0..4).map(crumb)).unwrap();

        let mut records = trail.records().unwrap();
        records[2].payload = "rewritten".to_string();

        match verify_chain(&records) {
            Err(TrailError::ChainIntegrity { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected chain integrity error, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_reports_reordering() {
        let trail = Trail::new();
        trail.append_all((0..3).map(crumb)).unwrap();

        let mut records = trail.records().unwrap();
        records.swap(1, 2);

        match verify_chain(&records) {
            Err(TrailError::ChainIntegrity { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected chain integrity error, got {:?}", other),
        }
    }

    #[test]
    fn test_find_by_markers() {
        let trail = Trail::new();
        let sealed = trail.append_all((0..3).map(crumb)).unwrap();

        let found = trail
            .find_by_markers(&[sealed[1].marker(), "sk:deadbeef:0000".to_string()])
            .unwrap();
        assert_eq!(found, vec![sealed[1].clone()]);
    }

    #[test]
    fn test_follow_chain() {
        let trail = Trail::new().with_trail_id("shared");
        trail.append(crumb(0)).unwrap();
        let grouped = trail
            .append_all((1..3).map(|n| crumb(n).with_chain_id("analysis-a")))
            .unwrap();
        trail.append(crumb(3)).unwrap();

        assert_eq!(trail.follow_chain("analysis-a").unwrap(), grouped);
        assert_eq!(trail.follow_chain("shared").unwrap().len(), 2);
        assert!(trail.follow_chain("absent").unwrap().is_empty());
        trail.verify().unwrap();
    }

    #[test]
    fn test_trail_id_shape() {
        let trail = Trail::new();
        assert_eq!(trail.trail_id().len(), 16);
        assert_ne!(trail.trail_id(), Trail::new().trail_id());
    }

    #[test]
    fn test_lock_timeout_is_conflict() {
        let trail = Arc::new(Trail::new().with_lock_timeout(Duration::from_millis(10)));
        let guard = trail.lock().unwrap();

        let other = Arc::clone(&trail);
        let result = std::thread::spawn(move || other.append(crumb(0)))
            .join()
            .unwrap();
        drop(guard);

        match result {
            Err(err @ TrailError::ConcurrencyConflict { .. }) => assert!(err.is_retryable()),
            other => panic!("expected conflict, got {:?}", other),
        }
        assert_eq!(trail.len().unwrap(), 0);
    }

    #[test]
    fn test_concurrent_appends_keep_chain() {
        let trail = Arc::new(Trail::new().with_lock_timeout(Duration::from_secs(5)));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let trail = Arc::clone(&trail);
                std::thread::spawn(move || {
                    for n in 0..10 {
                        trail.append(crumb(t * 100 + n)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(trail.len().unwrap(), 40);
        trail.verify().unwrap();
    }
}
