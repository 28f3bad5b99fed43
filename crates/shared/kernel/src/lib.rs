//! Kernel utilities shared by Forma applications: layered config loading and
//! logging bootstrap.
//!
//! ```rust,no_run
//! use forma_kernel::config::load_config;
//! use forma_kernel::domain::config::FormaConfig;
//!
//! let config: FormaConfig = load_config(Some("config/forma.toml")).unwrap();
//! let _logger = forma_kernel::bootstrap(&config).unwrap();
//! ```

pub mod config;

pub use forma_domain as domain;

use forma_domain::config::FormaConfig;
use forma_logger::{Logger, LoggerError};
use tracing::info;

/// Installs logging as configured and reports the effective model settings.
///
/// Keep the returned [`Logger`] alive for the lifetime of the process.
///
/// # Errors
/// Propagates [`LoggerError`] from subscriber installation.
pub fn bootstrap(config: &FormaConfig) -> Result<Logger, LoggerError> {
    let logger = Logger::from_config(&config.logging)?;
    info!(
        name = %config.logging.name,
        duplicate_params = ?config.model.duplicate_params,
        "Forma bootstrapped"
    );
    Ok(logger)
}
