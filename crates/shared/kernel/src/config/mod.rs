use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// File looked up (with any supported extension) when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "forma";
/// Prefix of environment overrides, e.g. `FORMA__MODEL__DUPLICATE_PARAMS=reject`.
pub const ENV_PREFIX: &str = "FORMA";
const ENV_SEPARATOR: &str = "__";

#[forma_derive::forma_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file, overlaid with environment overrides.
///
/// 1. **File**: `path` is required to exist. Without a path, the optional
///    [`DEFAULT_CONFIG_FILE`] in the working directory is used.
/// 2. **Environment**: variables prefixed with `FORMA__`, nested with double
///    underscores (`FORMA__LOGGING__LEVEL` sets `logging.level`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if a given file is missing or malformed, or the
/// merged values do not fit `T`.
///
/// # Example
/// ```rust
/// use forma_kernel::config::load_config;
/// use forma_kernel::domain::config::FormaConfig;
///
/// let cfg: FormaConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, None)
}

fn load_layered<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let required = path.is_some();
    let path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    info!(path = %path.display(), required, "Loading config");

    Config::builder()
        .add_source(File::from(path.as_path()).required(required))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR).source(env))
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use forma_domain::config::{DuplicatePolicy, FormaConfig};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn file_values_are_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("forma.toml");
        fs::write(&path, "[model]\nduplicate_params = \"reject\"\n\n[logging]\nlevel = \"debug\"\n")
            .unwrap();

        let cfg: FormaConfig = load_layered(Some(&path), Some(Map::new())).unwrap();
        assert_eq!(cfg.model.duplicate_params, DuplicatePolicy::Reject);
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.logging.console);
    }

    #[test]
    fn environment_overrides_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("forma.toml");
        fs::write(&path, "[logging]\nlevel = \"debug\"\nconsole = true\n").unwrap();

        let env = Map::from([
            ("FORMA__LOGGING__LEVEL".to_owned(), "warn".to_owned()),
            ("FORMA__MODEL__DUPLICATE_PARAMS".to_owned(), "reject".to_owned()),
        ]);
        let cfg: FormaConfig = load_layered(Some(&path), Some(env)).unwrap();
        assert_eq!(cfg.logging.level, "warn");
        assert_eq!(cfg.model.duplicate_params, DuplicatePolicy::Reject);
    }

    #[test]
    fn an_explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_config::<FormaConfig>(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().starts_with("Config error (Failed to build config)"));
    }

    #[test]
    fn without_a_file_defaults_apply() {
        let cfg: FormaConfig = load_layered(None::<&Path>, Some(Map::new())).unwrap();
        assert_eq!(cfg.model.duplicate_params, DuplicatePolicy::LastWins);
        assert_eq!(cfg.logging.name, "forma");
    }
}
