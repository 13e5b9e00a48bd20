#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::NaiveDate;
use docvault_core::ExErrorKind;
use docvault_store::{
    BackupOutcome, DocumentStore, ManualClock, SaveOutcome, StoreConfig, DEFAULT_DOCUMENT,
};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    store: DocumentStore,
    clock: Arc<ManualClock>,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let start = NaiveDate::from_ymd_opt(2026, 1, 18)
        .unwrap()
        .and_hms_opt(14, 0, 0)
        .unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let store = DocumentStore::with_clock(StoreConfig::rooted_at(dir.path()), clock.clone());
    Fixture {
        _dir: dir,
        store,
        clock,
    }
}

fn seed(store: &DocumentStore, content: &str) {
    fs::write(store.document_path(), content).unwrap();
}

fn backup_names(store: &DocumentStore) -> Vec<String> {
    store
        .list_backups()
        .unwrap()
        .into_iter()
        .map(|s| s.filename)
        .collect()
}

#[test]
fn test_save_twice_is_saved_then_noop() {
    let fx = fixture();
    seed(&fx.store, "old: true\n");

    let first = fx.store.save("services: []\n").unwrap();
    fx.clock.advance_secs(1);
    let second = fx.store.save("services: []\n").unwrap();

    assert!(matches!(
        first,
        SaveOutcome::Saved {
            backup: BackupOutcome::Created(_)
        }
    ));
    assert_eq!(second, SaveOutcome::NoOp);
    assert_eq!(backup_names(&fx.store).len(), 1);
}

#[test]
fn test_invalid_yaml_touches_nothing() {
    let fx = fixture();
    seed(&fx.store, "keep: me\n");

    let outcome = fx.store.save("{invalid: [").unwrap();

    match outcome {
        SaveOutcome::Rejected { reason } => assert!(!reason.is_empty()),
        other => panic!("expected Rejected, got {:?}", other),
    }
    assert_eq!(
        fs::read_to_string(fx.store.document_path()).unwrap(),
        "keep: me\n"
    );
    assert!(!fx.store.backups().dir().exists());
}

#[test]
fn test_trailing_newline_counts_as_change() {
    let fx = fixture();
    fx.store.save("a: 1\n").unwrap();
    fx.clock.advance_secs(1);

    let outcome = fx.store.save("a: 1").unwrap();

    let SaveOutcome::Saved { backup } = outcome else {
        panic!("expected Saved");
    };
    let snapshot = backup.snapshot().expect("backup of previous content");
    assert_eq!(
        fx.store.backups().read(&snapshot.filename).unwrap(),
        "a: 1\n"
    );
    assert_eq!(fs::read_to_string(fx.store.document_path()).unwrap(), "a: 1");
}

#[test]
fn test_restore_round_trip() {
    let fx = fixture();
    let c1 = "version: 1\nitems: [a, b]\n";
    let c2 = "version: 2\nitems: [c]\n";
    seed(&fx.store, c1);

    let SaveOutcome::Saved { backup } = fx.store.save(c2).unwrap() else {
        panic!("expected Saved");
    };
    let b1 = backup.filename().unwrap().to_string();
    assert_eq!(fx.store.backups().read(&b1).unwrap(), c1);

    fx.clock.advance_secs(1);
    let restored = fx.store.restore(&b1).unwrap();

    assert_eq!(restored.filename, b1);
    assert_eq!(restored.content, c1);
    let b2 = restored.previous.filename().unwrap().to_string();
    assert_ne!(b1, b2);
    assert_eq!(fx.store.backups().read(&b2).unwrap(), c2);
    assert_eq!(fx.store.load(), c1);
}

#[test]
fn test_restore_rejects_traversal() {
    let fx = fixture();
    seed(&fx.store, "a: 1\n");

    for name in ["../../etc/passwd", "x.yaml/../y.yaml", "..\\services.yaml"] {
        let err = fx.store.restore(name).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidFilename, "name: {}", name);
    }
    assert_eq!(
        fs::read_to_string(fx.store.document_path()).unwrap(),
        "a: 1\n"
    );
    assert!(!fx.store.backups().dir().exists());
}

#[test]
fn test_restore_wrong_extension_rejected() {
    let fx = fixture();
    let err = fx.store.restore("services_20260101_000000.txt").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidFilename);
}

#[test]
fn test_restore_unknown_snapshot_not_found() {
    let fx = fixture();
    seed(&fx.store, "a: 1\n");
    fx.store.ensure_layout().unwrap();

    let err = fx.store.restore("services_20200101_000000.yaml").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert!(backup_names(&fx.store).is_empty());
}

#[test]
fn test_first_load_persists_default_once() {
    let fx = fixture();
    assert!(!fx.store.document_path().exists());

    let first = fx.store.load();
    assert_eq!(first, DEFAULT_DOCUMENT);
    assert_eq!(
        fs::read_to_string(fx.store.document_path()).unwrap(),
        DEFAULT_DOCUMENT
    );
    let modified = fs::metadata(fx.store.document_path())
        .unwrap()
        .modified()
        .unwrap();

    let second = fx.store.load();

    assert_eq!(second, first);
    assert_eq!(
        fs::metadata(fx.store.document_path())
            .unwrap()
            .modified()
            .unwrap(),
        modified
    );
}

#[test]
fn test_custom_default_content() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::rooted_at(dir.path()).with_default_content("empty: {}\n");
    let store = DocumentStore::new(config);

    assert_eq!(store.load(), "empty: {}\n");
}

#[test]
fn test_load_directory_in_place_of_document_returns_placeholder() {
    let fx = fixture();
    fs::create_dir_all(fx.store.document_path()).unwrap();

    let content = fx.store.load();

    assert!(content.starts_with("# Error reading file: "));
    assert!(content.ends_with("# Please check file permissions and try again.\n"));
}

#[test]
fn test_restore_copies_non_utf8_snapshot_bytes() {
    let fx = fixture();
    seed(&fx.store, "current: 1\n");
    fs::create_dir_all(fx.store.backups().dir()).unwrap();
    let raw = b"name: caf\xe9\n".to_vec();
    fs::write(
        fx.store.backups().dir().join("services_20250101_000000.yaml"),
        &raw,
    )
    .unwrap();

    let restored = fx.store.restore("services_20250101_000000.yaml").unwrap();

    assert_eq!(fs::read(fx.store.document_path()).unwrap(), raw);
    assert!(restored.content.starts_with("# Error reading file: "));
    assert!(restored.previous.snapshot().is_some());
}

#[test]
fn test_backup_failure_does_not_block_save() {
    let dir = TempDir::new().unwrap();
    // A regular file where the backup directory should be
    let blocker = dir.path().join("backups");
    fs::write(&blocker, "not a directory").unwrap();
    let store = DocumentStore::new(StoreConfig::rooted_at(dir.path()));
    seed(&store, "a: 1\n");

    let outcome = store.save("a: 2\n").unwrap();

    match &outcome {
        SaveOutcome::Saved {
            backup: BackupOutcome::Failed { reason },
        } => assert!(!reason.is_empty()),
        other => panic!("expected Saved with failed backup, got {:?}", other),
    }
    assert!(outcome.message().contains("Warning"));
    assert_eq!(fs::read_to_string(store.document_path()).unwrap(), "a: 2\n");
}

#[test]
fn test_save_creates_missing_parent_directory() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new(
        dir.path().join("nested/deeper/services.yaml"),
        dir.path().join("nested/backups"),
    );
    let store = DocumentStore::new(config);

    let outcome = store.save("a: 1\n").unwrap();

    assert_eq!(
        outcome,
        SaveOutcome::Saved {
            backup: BackupOutcome::Skipped
        }
    );
    assert_eq!(fs::read_to_string(store.document_path()).unwrap(), "a: 1\n");
}

#[test]
fn test_saved_message_names_backup() {
    let fx = fixture();
    seed(&fx.store, "a: 1\n");

    let outcome = fx.store.save("a: 2\n").unwrap();

    assert_eq!(
        outcome.message(),
        "File saved successfully. Backup created: services_20260118_140000.yaml"
    );
}

#[test]
fn test_concurrent_saves_leave_one_complete_document() {
    let fx = fixture();
    seed(&fx.store, "start: 0\n");
    let store = Arc::new(fx.store);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.save(&format!("writer: {}\n", i)).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let content = fs::read_to_string(store.document_path()).unwrap();
    assert!(content.starts_with("writer: "));
    assert!(content.ends_with('\n'));
    assert_eq!(content.lines().count(), 1);
    let leftovers: Vec<_> = fs::read_dir(store.document_path().parent().unwrap())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
