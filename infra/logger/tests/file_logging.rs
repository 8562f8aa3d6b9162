use hhub_logger::{LevelFilter, Logger};
use serial_test::serial;
use std::fs;
use std::time::Duration;

#[test]
#[serial]
fn file_logging_creates_log_files() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("test-app")
        .console(false)
        .path(&log_dir)
        .level(LevelFilter::INFO)
        .init()
        .unwrap();

    tracing::info!("hello world");
    // Give the background worker a moment to flush.
    std::thread::sleep(Duration::from_millis(50));
    drop(logger);

    assert!(log_dir.exists(), "log directory should be created by logger init");

    let has_log = fs::read_dir(&log_dir)
        .unwrap()
        .flatten()
        .any(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("log"));

    assert!(has_log, "at least one log file should be created");
}
