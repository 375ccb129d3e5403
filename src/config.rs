use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

/// Bundled defaults, validated by build.rs
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub code: CodeConfig,
    pub blocks: BlocksConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CodeConfig {
    /// Language recorded for a fence that names none
    pub default_language: String,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            default_language: "plain text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BlocksConfig {
    pub unsupported: UnsupportedPolicy,
}

/// What the serializer does with blocks it cannot render.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedPolicy {
    /// Drop silently
    Skip,
    /// Drop and log a warning
    #[default]
    Warn,
    /// Render the rest, then fail with the first unsupported block
    Error,
}

impl Config {
    /// The configuration bundled with the crate.
    ///
    /// build.rs type-checks every field of the bundled file, so the fallback
    /// to struct defaults is not reached for a crate that built.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::compiled_default());
            }
            Err(source) => {
                return Err(Error::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_compiled_default_matches_struct_default() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn test_bundled_file_deserializes_without_fallback() {
        let parsed: std::result::Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert_eq!(parsed.unwrap(), Config::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[blocks]\nunsupported = \"error\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.blocks.unsupported, UnsupportedPolicy::Error);
        assert_eq!(config.code.default_language, "plain text");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[blocks]\nunsupported = \"explode\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
