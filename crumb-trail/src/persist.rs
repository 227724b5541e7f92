//! JSON Lines persistence for trails.
//!
//! One record per line. Writes go to a temporary file in the destination
//! directory which is then renamed over the target, so readers see either
//! the old trail or the new one.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::crumb::{Crumb, CrumbRecord};
use crate::error::{Result, TrailError};
use crate::trail::{verify_chain, Trail};

impl Trail {
    /// Write the full trail to `path`, replacing any existing file.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let records = self.records()?;
        write_records(path, &records)?;

        info!(path = %path.display(), records = records.len(), "Trail persisted");
        Ok(())
    }

    /// Seal `crumbs`, write the extended trail to `path`, then commit.
    ///
    /// If the write fails the in-memory trail is left untouched, so the
    /// same crumbs can be offered again.
    pub fn append_all_and_persist(
        &self,
        crumbs: impl IntoIterator<Item = Crumb>,
        path: impl AsRef<Path>,
    ) -> Result<Vec<CrumbRecord>> {
        let path = path.as_ref();
        let mut records = self.lock()?;

        let mut staged = records.clone();
        let committed = staged.len();
        for crumb in crumbs {
            let record = self.seal_next(&staged, crumb);
            staged.push(record);
        }
        write_records(path, &staged)?;

        let sealed = staged[committed..].to_vec();
        *records = staged;

        info!(
            path = %path.display(),
            appended = sealed.len(),
            records = records.len(),
            "Trail extended and persisted"
        );
        Ok(sealed)
    }

    /// Load a trail from `path`, verifying every link and digest.
    ///
    /// Fails on the first broken record; no partial trail is returned. A
    /// line that is not valid UTF-8 or not a record is reported as a broken
    /// chain at that record's index.
    pub fn load(path: impl AsRef<Path>) -> Result<Trail> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|e| TrailError::persistence(path, e))?;

        let mut records = Vec::new();
        for line in content
            .split(|&b| b == b'\n')
            .filter(|l| !l.iter().all(u8::is_ascii_whitespace))
        {
            let index = records.len();
            let record = parse_record(line).map_err(|reason| {
                warn!(path = %path.display(), index, %reason, "Malformed trail record");
                TrailError::ChainIntegrity { index, reason }
            })?;
            records.push(record);
        }

        verify_chain(&records)?;

        info!(path = %path.display(), records = records.len(), "Trail loaded");
        Ok(Trail::from_records(records))
    }
}

fn parse_record(line: &[u8]) -> std::result::Result<CrumbRecord, String> {
    let line = std::str::from_utf8(line).map_err(|e| format!("invalid utf-8: {}", e))?;
    serde_json::from_str(line).map_err(|e| format!("malformed record: {}", e))
}

/// Write records as JSON Lines through a temp file renamed over `path`.
fn write_records(path: &Path, records: &[CrumbRecord]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir).map_err(|e| TrailError::persistence(path, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        for record in records {
            serde_json::to_writer(&mut writer, record)?;
            writer
                .write_all(b"\n")
                .map_err(|e| TrailError::persistence(path, e))?;
        }
        writer.flush().map_err(|e| TrailError::persistence(path, e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| TrailError::persistence(path, e))?;
    tmp.persist(path)
        .map_err(|e| TrailError::persistence(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crumb::CrumbType;

    fn filled(n: usize) -> Trail {
        let trail = Trail::new();
        for i in 0..n {
            trail
                .append(Crumb::new(
                    CrumbType::Pattern,
                    format!("line one {}\nline two", i),
                    "mask:neutrality",
                ))
                .unwrap();
        }
        trail
    }

    #[test]
    fn test_persist_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trail.jsonl");

        let trail = filled(5);
        trail.persist(&path).unwrap();

        let loaded = Trail::load(&path).unwrap();
        assert_eq!(loaded.records().unwrap(), trail.records().unwrap());
    }

    #[test]
    fn test_one_record_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trail.jsonl");

        filled(3).persist(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_empty_trail_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.jsonl");

        Trail::new().persist(&path).unwrap();
        assert!(Trail::load(&path).unwrap().is_empty().unwrap());
    }

    #[test]
    fn test_tampered_payload_fails_at_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trail.jsonl");
        filled(4).persist(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines: Vec<String> = content.lines().map(String::from).collect();
        let mut record: CrumbRecord = serde_json::from_str(&lines[2]).unwrap();
        record.payload = "something else".to_string();
        lines[2] = serde_json::to_string(&record).unwrap();
        fs::write(&path, lines.join("\n")).unwrap();

        match Trail::load(&path) {
            Err(TrailError::ChainIntegrity { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected chain integrity error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_malformed_line_fails_at_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trail.jsonl");
        filled(2).persist(&path).unwrap();

        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str("{not json}\n");
        fs::write(&path, content).unwrap();

        match Trail::load(&path) {
            Err(TrailError::ChainIntegrity { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected chain integrity error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_invalid_utf8_fails_at_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trail.jsonl");
        filled(3).persist(&path).unwrap();

        let mut bytes = fs::read(&path).unwrap();
        let second_line = bytes.iter().position(|&b| b == b'\n').unwrap() + 1;
        let needle = b"line one 1";
        let offset = bytes[second_line..]
            .windows(needle.len())
            .position(|w| w == needle)
            .unwrap();
        bytes[second_line + offset] = 0xFF;
        fs::write(&path, bytes).unwrap();

        match Trail::load(&path) {
            Err(err @ TrailError::ChainIntegrity { index: 1, .. }) => assert!(!err.is_retryable()),
            other => panic!("expected chain integrity error at 1, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_failed_persist_leaves_trail_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing").join("trail.jsonl");
        let trail = filled(2);
        let before = trail.records().unwrap();
        let crumbs = || (0..3).map(|i| Crumb::new(CrumbType::Question, format!("q{}", i), "frame:normative"));

        for _ in 0..2 {
            let err = trail.append_all_and_persist(crumbs(), &missing).unwrap_err();
            assert!(err.is_retryable());
            assert_eq!(trail.records().unwrap(), before);
        }

        let path = dir.path().join("trail.jsonl");
        let sealed = trail.append_all_and_persist(crumbs(), &path).unwrap();
        assert_eq!(sealed.len(), 3);
        assert_eq!(sealed[0].prev_digest, before[1].digest);
        assert_eq!(trail.len().unwrap(), 5);
        assert_eq!(Trail::load(&path).unwrap().records().unwrap(), trail.records().unwrap());
    }

    #[test]
    fn test_missing_file_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Trail::load(dir.path().join("absent.jsonl")).unwrap_err();
        assert!(matches!(err, TrailError::Persistence { .. }));
        assert!(err.is_retryable());
    }
}
