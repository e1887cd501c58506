use std::{fs, path::Path};

use thiserror::Error;
use yaml_rust2::{Yaml, YamlLoader};

/// 10 MiB.
pub const DEFAULT_MAX_LINE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid Config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Upper bound for one logical line. A quoted value spanning several
    /// physical lines counts as one.
    pub max_line_bytes: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

impl ParseConfig {
    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_yaml_str(&s)
    }

    /// Reads a YAML mapping. Missing keys keep their defaults; an empty
    /// document is the default config.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let docs = YamlLoader::load_from_str(s).map_err(|e| ConfigError::Yaml(e.to_string()))?;
        let Some(doc) = docs.into_iter().next() else {
            return Ok(Self::default());
        };

        let map = match &doc {
            Yaml::Hash(map) => map,
            Yaml::Null => return Ok(Self::default()),
            other => {
                return Err(ConfigError::Invalid(format!(
                    "expected a mapping at the top level, got {:?}",
                    other
                )));
            }
        };

        let mut config = Self::default();
        for (key, value) in map {
            let key = key
                .as_str()
                .ok_or_else(|| ConfigError::Invalid(format!("Config keys must be strings, got {:?}", key)))?;
            match key {
                "max_line_bytes" => {
                    config.max_line_bytes = value
                        .as_i64()
                        .filter(|&n| n > 0)
                        .and_then(|n| usize::try_from(n).ok())
                        .ok_or_else(|| {
                            ConfigError::Invalid(format!(
                                "'max_line_bytes' must be a positive integer, got {:?}",
                                value
                            ))
                        })?;
                }
                unknown => return Err(ConfigError::Invalid(format!("Unknown key '{}'", unknown))),
            }
        }
        Ok(config)
    }
}
