//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI argument → environment variables → XDG path →
//! system path → built-in defaults.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::filter::FilterConfig;
use crate::validate::{validate_config, ValidationResult};

/// Discovered configuration file path.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path to filter.json (or None if not found).
    pub filter: Option<PathBuf>,

    /// Source of the filter config (for diagnostics).
    pub filter_source: ConfigSource,
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/logfilter/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_CONFIG_PATH: &str = "LOGFILTER_CONFIG";
pub const ENV_CONFIG_DIR: &str = "LOGFILTER_CONFIG_DIR";

/// Standard config file name.
pub const FILTER_FILENAME: &str = "filter.json";

/// Application name for XDG directories.
const APP_NAME: &str = "logfilter";

/// Resolve the filter config path using the standard resolution order.
///
/// 1. Explicit CLI path (if provided and present)
/// 2. LOGFILTER_CONFIG environment variable
/// 3. LOGFILTER_CONFIG_DIR environment variable + filename
/// 4. XDG config directory (~/.config/logfilter/)
/// 5. System config (/etc/logfilter/)
/// 6. Built-in defaults (None)
pub fn resolve_config(cli_path: Option<&Path>) -> ConfigPaths {
    let mut paths = ConfigPaths::default();
    paths.filter = resolve_single_config(cli_path, &mut paths.filter_source);
    paths
}

fn resolve_single_config(cli_path: Option<&Path>, source: &mut ConfigSource) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        if path.exists() {
            *source = ConfigSource::CliArgument;
            return Some(path.to_path_buf());
        }
        debug!(path = %path.display(), "CLI config path does not exist, continuing");
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            *source = ConfigSource::Environment;
            return Some(path);
        }
    }

    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(FILTER_FILENAME);
        if path.exists() {
            *source = ConfigSource::Environment;
            return Some(path);
        }
    }

    if let Some(dir) = xdg_config_dir() {
        let path = dir.join(FILTER_FILENAME);
        if path.exists() {
            *source = ConfigSource::XdgConfig;
            return Some(path);
        }
    }

    let system_path = system_config_dir().join(FILTER_FILENAME);
    if system_path.exists() {
        *source = ConfigSource::SystemConfig;
        return Some(system_path);
    }

    *source = ConfigSource::BuiltinDefault;
    None
}

/// Resolve, load and validate the filter config.
///
/// Falls back to [`FilterConfig::default`] when no file is found. A file that
/// exists but fails to parse or validate is an error, never silently replaced
/// by defaults.
pub fn load_resolved(cli_path: Option<&Path>) -> ValidationResult<(FilterConfig, ConfigSource)> {
    let paths = resolve_config(cli_path);

    let config = match &paths.filter {
        Some(path) => {
            let config = FilterConfig::from_file(path)?;
            validate_config(&config)?;
            info!(
                path = %path.display(),
                source = %paths.filter_source,
                fingerprint = %config.fingerprint(),
                "Loaded filter config"
            );
            config
        }
        None => {
            debug!("No filter config found, using built-in defaults");
            FilterConfig::default()
        }
    };

    Ok((config, paths.filter_source))
}

/// Get the XDG config directory for logfilter.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_source_display() {
        assert_eq!(format!("{}", ConfigSource::CliArgument), "CLI argument");
        assert_eq!(
            format!("{}", ConfigSource::Environment),
            "environment variable"
        );
        assert_eq!(format!("{}", ConfigSource::XdgConfig), "XDG config");
        assert_eq!(format!("{}", ConfigSource::SystemConfig), "system config");
        assert_eq!(
            format!("{}", ConfigSource::BuiltinDefault),
            "builtin default"
        );
    }

    #[test]
    fn test_cli_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        std::fs::write(&path, "{}").unwrap();

        let paths = resolve_config(Some(&path));
        assert_eq!(paths.filter.as_deref(), Some(path.as_path()));
        assert_eq!(paths.filter_source, ConfigSource::CliArgument);
    }

    #[test]
    fn test_xdg_config_dir() {
        if let Some(path) = xdg_config_dir() {
            assert!(path.ends_with(APP_NAME));
        }
    }

    #[test]
    fn test_system_config_dir() {
        assert_eq!(system_config_dir(), PathBuf::from("/etc/logfilter"));
    }
}
