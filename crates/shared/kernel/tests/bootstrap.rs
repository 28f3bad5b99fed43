use forma_kernel::bootstrap;
use forma_kernel::config::load_config;
use forma_kernel::domain::config::{DuplicatePolicy, FormaConfig};
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

#[test]
#[serial]
fn bootstrap_installs_logging_from_a_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let logs = dir.path().join("logs");
    let path = dir.path().join("forma.toml");
    fs::write(
        &path,
        format!(
            concat!(
                "[model]\n",
                "duplicate_params = \"reject\"\n\n",
                "[logging]\n",
                "name = \"kernel-test\"\n",
                "console = false\n",
                "directory = {:?}\n",
            ),
            logs.display().to_string()
        ),
    )?;

    let config: FormaConfig = load_config(Some(&path))?;
    assert_eq!(config.model.duplicate_params, DuplicatePolicy::Reject);

    let logger = bootstrap(&config)?;
    assert!(logger.writes_files());
    assert!(logs.is_dir());

    let err = bootstrap(&config).expect_err("the global subscriber is already installed");
    assert_eq!(err.kind(), "Subscriber");
    Ok(())
}
