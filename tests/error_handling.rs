use glucoplay::config::persistence::StarLedger;
use glucoplay::config::GameConfig;
use glucoplay::error::{self, is_recoverable};
use glucoplay::GameError;

#[test]
fn test_user_friendly_messages() {
    let msg = error::user_friendly_message(&GameError::IoError(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "x",
    )));
    assert!(msg.contains("Permission denied"));

    let msg = error::user_friendly_message(&GameError::ConfigError("bad value".into()));
    assert!(msg.contains("bad value"));
    assert!(msg.contains("glucoplay.toml"));

    let msg = error::user_friendly_message(&GameError::PersistenceError("disk full".into()));
    assert!(msg.contains("stars"));
}

#[test]
fn test_recoverable_errors() {
    assert!(is_recoverable(&GameError::ConfigError("x".into())));
    assert!(is_recoverable(&GameError::PersistenceError("x".into())));
    assert!(!is_recoverable(&GameError::TuiError("x".into())));
    assert!(!is_recoverable(&GameError::IoError(std::io::Error::new(
        std::io::ErrorKind::Other,
        "x"
    ))));
}

#[test]
fn test_bad_config_file_is_recoverable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("glucoplay.toml");
    std::fs::write(&path, "[tuning.catcher]\nspawn_interval = \"0s\"\n").unwrap();

    let err = GameConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, GameError::ConfigError(_)));
    assert!(is_recoverable(&err));

    std::fs::write(&path, "frame_interval = \"soon\"\n").unwrap();
    let err = GameConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_unwritable_ledger_does_not_panic() {
    use glucoplay::games::StarSink;

    let dir = tempfile::tempdir().unwrap();
    // A plain file where the ledger directory should be makes every write fail
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();

    let mut ledger = StarLedger::open_at(blocker.join("stars.json")).unwrap();
    ledger.add_stars(3);
    assert_eq!(ledger.total(), 3);
    assert!(ledger.record(1).is_err());
}

#[test]
fn test_unreadable_ledger_is_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stars.json");
    std::fs::create_dir_all(&path).unwrap();

    let err = StarLedger::open_at(path);
    assert!(matches!(err, Err(GameError::PersistenceError(_))));
}

#[test]
fn test_error_display_and_source() {
    use std::error::Error;

    let err = GameError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
    assert!(err.to_string().contains("gone"));
    assert!(err.source().is_some());
    assert!(GameError::TuiError("x".into()).source().is_none());
}
