//! Optional YAML configuration.
//!
//! A `portacheck.yaml` in the working directory can exclude paths,
//! disable whole categories, and raise the minimum reported severity.
//! Everything defaults to "check everything, report everything".

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::check::{Category, Severity};

/// Default config file names, searched in order.
const DEFAULT_CONFIG_NAMES: &[&str] = &["portacheck.yaml", ".portacheck.yaml"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid exclude glob {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },
    #[error("unknown category {0:?} in disabled_categories")]
    UnknownCategory(String),
    #[error("unknown severity {0:?} in min_severity")]
    UnknownSeverity(String),
}

/// Tool configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Glob patterns for paths to skip (e.g. "**/generated/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Category tags that should not be reported (e.g. ["PLATFORM"]).
    #[serde(default)]
    pub disabled_categories: Vec<String>,
    /// Lowest severity to report: "error", "warning", or "info".
    #[serde(default)]
    pub min_severity: Option<String>,
}

impl Config {
    /// Parse a config from a YAML file and validate it.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Find a default config file in the current directory.
    pub fn discover() -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for tag in &self.disabled_categories {
            if Category::parse(tag).is_none() {
                return Err(ConfigError::UnknownCategory(tag.clone()));
            }
        }
        if let Some(s) = &self.min_severity {
            if s.parse::<Severity>().is_err() {
                return Err(ConfigError::UnknownSeverity(s.clone()));
            }
        }
        Ok(())
    }

    /// Compile the exclude globs once for matching during collection.
    pub fn exclude_matcher(&self) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern).map_err(|source| ConfigError::InvalidGlob {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|source| ConfigError::InvalidGlob {
            pattern: String::new(),
            source,
        })
    }

    /// Whether issues of this category should be reported.
    pub fn category_enabled(&self, category: Category) -> bool {
        !self
            .disabled_categories
            .iter()
            .any(|tag| Category::parse(tag) == Some(category))
    }

    /// The minimum severity to report, if restricted.
    pub fn min_severity(&self) -> Option<Severity> {
        self.min_severity.as_deref().and_then(|s| s.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = "excluded_paths:\n  - \"**/vendor/**\"\ndisabled_categories:\n  - PLATFORM\nmin_severity: warning\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        config.validate().unwrap();

        assert!(!config.category_enabled(Category::Platform));
        assert!(config.category_enabled(Category::Path));
        assert_eq!(config.min_severity(), Some(Severity::Warning));

        let matcher = config.exclude_matcher().unwrap();
        assert!(matcher.is_match("third_party/vendor/lib.py"));
        assert!(!matcher.is_match("src/main.py"));
    }

    #[test]
    fn test_empty_config_defaults() {
        let config = Config::default();
        assert!(config.category_enabled(Category::Env));
        assert_eq!(config.min_severity(), None);
        assert!(config.exclude_matcher().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let yaml = "disabled_categories:\n  - BOGUS\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_bad_glob_rejected() {
        let config = Config {
            excluded_paths: vec!["[".to_string()],
            ..Default::default()
        };
        assert!(config.exclude_matcher().is_err());
    }
}
