pub mod schema;

pub use schema::{GraxxConfig, StatsConfig, WindowConfig};

use graxx_core::{GraxxError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `GraxxConfig::default()` if
/// the file doesn't exist.
pub fn load(path: impl AsRef<Path>) -> Result<GraxxConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(GraxxConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| GraxxError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let config: GraxxConfig =
        toml::from_str(&raw).map_err(|e| GraxxError::Config(format!("TOML parse error: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("graxx").join("graxx.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, GraxxConfig::default());
        assert_eq!(config.stats.capacity, 1000);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[stats]\ncapacity = 250\n\n[window]\nsize = 3").unwrap();

        let config = load(file.path()).unwrap();
        assert_eq!(config.stats.capacity, 250);
        assert_eq!(config.stats.percentiles, vec![25, 50, 75, 90]);
        assert_eq!(config.window.size, 3);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[stats\ncapacity = ").unwrap();
        assert!(matches!(load(file.path()), Err(GraxxError::Config(_))));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[stats]\npercentiles = [50, 0]").unwrap();
        assert!(matches!(load(file.path()), Err(GraxxError::Config(_))));

        let mut config = GraxxConfig::default();
        config.window.size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        assert!(default_path().ends_with("graxx/graxx.toml"));
    }
}
