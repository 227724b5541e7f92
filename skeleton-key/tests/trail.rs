use std::fs;

use crumb_trail::{CrumbRecord, CrumbType, Trail, TrailError, ROOT_DIGEST};
use skeleton_key::{SkeletonConfig, SkeletonKey, SkeletonError};

const TEXTS: [&str; 3] = [
    "The market naturally rewards merit; there is no alternative to this system",
    "Everyone knows that's just how it is. Stay in your lane.",
    "If we don't act now, collapse. We are all in this together.",
];

fn key_with_trail(path: &std::path::Path) -> SkeletonKey {
    let mut config = SkeletonConfig::new("trail-test");
    config.trail.persist_path = Some(path.to_string_lossy().into_owned());
    config.trail.bridge_crumb = true;
    SkeletonKey::new(config)
}

#[test]
fn persisted_trail_loads_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crumbs.jsonl");
    let key = key_with_trail(&path);

    for text in TEXTS {
        let analysis = key.analyze(text).unwrap();
        key.leave_trail(&analysis).unwrap();
    }

    let original = key.trail().records().unwrap();
    assert!(original.len() >= TEXTS.len());
    assert_eq!(original[0].prev_digest, ROOT_DIGEST);

    let loaded = Trail::load(&path).unwrap();
    assert_eq!(loaded.records().unwrap(), original);
    loaded.verify().unwrap();
}

#[test]
fn tampered_payload_fails_at_its_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crumbs.jsonl");
    let key = key_with_trail(&path);

    for text in TEXTS {
        let analysis = key.analyze(text).unwrap();
        key.leave_trail(&analysis).unwrap();
    }

    let content = fs::read_to_string(&path).unwrap();
    let mut lines: Vec<String> = content.lines().map(String::from).collect();
    let target = lines.len() / 2;

    let mut record: CrumbRecord = serde_json::from_str(&lines[target]).unwrap();
    record.payload.push_str(" (edited)");
    lines[target] = serde_json::to_string(&record).unwrap();
    fs::write(&path, lines.join("\n") + "\n").unwrap();

    match Trail::load(&path) {
        Err(TrailError::ChainIntegrity { index, .. }) => assert_eq!(index, target),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("tampered trail loaded"),
    }
}

#[test]
fn resumed_trail_continues_chain() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crumbs.jsonl");

    let first = key_with_trail(&path);
    let analysis = first.analyze(TEXTS[0]).unwrap();
    first.leave_trail(&analysis).unwrap();
    let tail = first.trail().last_digest().unwrap();

    let second = key_with_trail(&path).with_trail(Trail::load(&path).unwrap());
    let analysis = second.analyze(TEXTS[1]).unwrap();
    let records = second.leave_trail(&analysis).unwrap();

    assert_eq!(records[0].prev_digest, tail);
    Trail::load(&path).unwrap().verify().unwrap();
}

#[test]
fn markers_recover_records() {
    let key = SkeletonKey::default();
    let analysis = key.analyze(TEXTS[1]).unwrap();
    let records = key.leave_trail(&analysis).unwrap();

    let markers: Vec<String> = records.iter().map(CrumbRecord::marker).collect();
    assert_eq!(key.trail().find_by_markers(&markers).unwrap(), records);
}

#[test]
fn unwritable_path_is_retryable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("crumbs.jsonl");
    let key = key_with_trail(&path);

    let analysis = key.analyze(TEXTS[0]).unwrap();
    for _ in 0..2 {
        let err = key.leave_trail(&analysis).unwrap_err();
        assert!(matches!(err, SkeletonError::Trail(TrailError::Persistence { .. })));
        assert!(err.is_retryable());
        assert_eq!(key.trail().len().unwrap(), 0);
    }

    fs::create_dir(dir.path().join("missing-dir")).unwrap();
    let records = key.leave_trail(&analysis).unwrap();
    assert_eq!(key.trail().len().unwrap(), records.len());
    assert_eq!(Trail::load(&path).unwrap().records().unwrap(), records);
}

#[test]
fn chains_group_records_per_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crumbs.jsonl");
    let key = key_with_trail(&path);

    let analyses: Vec<_> = TEXTS.iter().map(|t| key.analyze(t).unwrap()).collect();
    for analysis in &analyses {
        key.leave_trail(analysis).unwrap();
    }

    let loaded = Trail::load(&path).unwrap();
    for analysis in &analyses {
        let chain = loaded.follow_chain(&analysis.analysis_id).unwrap();
        assert_eq!(chain, key.follow_chain(analysis).unwrap());
        assert_eq!(chain.last().unwrap().crumb_type, CrumbType::Bridge);
    }
}
