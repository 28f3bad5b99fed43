use forma_domain::config::LoggingConfig;
use forma_logger::Logger;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn config_with_directory_writes_json_files() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");
    let config = LoggingConfig {
        name: "integration-from-config".to_owned(),
        level: "debug".to_owned(),
        console: false,
        json: true,
        directory: Some(log_dir.clone()),
    };

    let logger = Logger::from_config(&config)?;
    assert!(logger.writes_files());
    tracing::info!(answer = 42, "hello from config");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(log_file)?;
    let line =
        contents.lines().find(|line| line.contains("hello from config")).expect("event logged");
    assert!(line.starts_with('{'), "expected a JSON line, got {line}");
    assert!(line.contains("\"answer\":42"));
    Ok(())
}
