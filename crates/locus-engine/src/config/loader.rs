use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::schema::LocusConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load from default locations:
/// 1. ./locus.yaml
/// 2. ~/.locus/config.yaml
/// 3. Built-in defaults
pub fn load_config() -> Result<LocusConfig, ConfigError> {
    let local_config = PathBuf::from("./locus.yaml");
    if local_config.exists() {
        return load_config_from(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".locus").join("config.yaml");
        if home_config.exists() {
            return load_config_from(&home_config);
        }
    }

    debug!("no config file found, using defaults");
    Ok(LocusConfig::default())
}

pub fn load_config_from(path: &Path) -> Result<LocusConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: LocusConfig = serde_yaml::from_str(&content)?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Strategy;

    #[test]
    fn reads_overrides_and_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locus.yaml");
        fs::write(
            &path,
            "resolver:\n  strategy: legacy\n  max_text_len: 40\nweights:\n  fluent:\n    placeholder: 70\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.resolver.strategy, Strategy::Legacy);
        assert_eq!(config.resolver.max_text_len, 40);
        assert_eq!(config.weights.fluent.placeholder, 70);
        assert_eq!(config.weights.fluent.test_id, 100);
        assert_eq!(config.weights.classic.id, 100);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(matches!(load_config_from(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "resolver: [").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
