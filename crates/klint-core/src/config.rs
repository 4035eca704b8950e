//! Configuration types for klint.

use crate::threshold::SeverityThresholds;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration, usually loaded from `klint.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Rule identifiers to run. `None` means the whole catalog.
    #[serde(default)]
    pub enable_rules: Option<Vec<String>>,

    /// Rule identifiers removed from the enabled set.
    #[serde(default)]
    pub disable_rules: Vec<String>,

    /// Reporter name (`text`, `html`, `json`, `pmd`, `xcode`).
    #[serde(default)]
    pub report_type: Option<String>,

    /// File to write the report to instead of stdout.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Maximum tolerated issue count per severity name.
    #[serde(default)]
    pub thresholds: HashMap<String, usize>,

    /// Glob patterns excluded from source discovery.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Per-rule option tables keyed by rule identifier.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Resolves the rule identifiers to register against `catalog`.
    ///
    /// Starts from `enable-rules` (or every catalog identifier when unset)
    /// and removes `disable-rules`. Identifiers unknown to the catalog are
    /// kept; the registry ignores them.
    #[must_use]
    pub fn rule_identifiers<'a, I>(&self, catalog: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let enabled: Vec<String> = match &self.enable_rules {
            Some(ids) => ids.clone(),
            None => catalog.into_iter().map(String::from).collect(),
        };
        enabled
            .into_iter()
            .filter(|id| !self.disable_rules.contains(id))
            .collect()
    }

    /// Builds the threshold map, dropping unknown severity names.
    #[must_use]
    pub fn severity_thresholds(&self) -> SeverityThresholds {
        SeverityThresholds::from_names(&self.thresholds)
    }

    /// Builds the rule configuration map handed to every inspection.
    #[must_use]
    pub fn rule_configurations(&self) -> RuleConfigurations {
        RuleConfigurations::new(self.rules.clone())
    }
}

/// Engine-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Run rule inspections on a worker pool.
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Number of workers (default: one per core).
    #[serde(default)]
    pub jobs: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            jobs: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets an integer option with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(default)
    }
}

/// Rule configuration map passed to every inspection, keyed by rule identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleConfigurations {
    rules: HashMap<String, RuleConfig>,
}

impl RuleConfigurations {
    /// Wraps a map of rule identifier to options.
    #[must_use]
    pub fn new(rules: HashMap<String, RuleConfig>) -> Self {
        Self { rules }
    }

    /// Options for `rule_identifier`, if any were configured.
    #[must_use]
    pub fn get(&self, rule_identifier: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_identifier)
    }

    /// Sets a single option for a rule.
    pub fn set(
        &mut self,
        rule_identifier: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<toml::Value>,
    ) {
        self.rules
            .entry(rule_identifier.into())
            .or_default()
            .options
            .insert(key.into(), value.into());
    }

    /// Integer option for a rule, falling back to `default`.
    #[must_use]
    pub fn int_option(&self, rule_identifier: &str, key: &str, default: i64) -> i64 {
        self.get(rule_identifier)
            .map_or(default, |c| c.get_int(key, default))
    }

    /// Severity override configured for a rule.
    #[must_use]
    pub fn severity_override(&self, rule_identifier: &str) -> Option<Severity> {
        self.get(rule_identifier).and_then(|c| c.severity)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.engine.parallel);
        assert!(config.rules.is_empty());
        assert!(config.enable_rules.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
report-type = "html"
disable-rules = ["class_naming"]

[thresholds]
major = 3
blocker = 1

[engine]
jobs = 4

[rules.long_line]
severity = "major"
max = 120
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.report_type.as_deref(), Some("html"));
        assert_eq!(config.engine.jobs, Some(4));
        assert!(config.engine.parallel);

        let rules = config.rule_configurations();
        assert_eq!(rules.int_option("long_line", "max", 100), 120);
        assert_eq!(rules.int_option("trailing_whitespace", "max", 7), 7);
        assert_eq!(rules.severity_override("long_line"), Some(Severity::Major));

        let thresholds = config.severity_thresholds();
        assert_eq!(thresholds.threshold(Severity::Major), 3);
        assert_eq!(thresholds.threshold(Severity::Minor), 20);
    }

    #[test]
    fn rule_identifiers_default_to_catalog_minus_disabled() {
        let config = Config::parse(r#"disable-rules = ["b"]"#).expect("Failed to parse");
        assert_eq!(config.rule_identifiers(["a", "b", "c"]), vec!["a", "c"]);
    }

    #[test]
    fn rule_identifiers_prefer_enable_list() {
        let config = Config::parse(r#"enable-rules = ["c", "zzz"]"#).expect("Failed to parse");
        assert_eq!(config.rule_identifiers(["a", "b", "c"]), vec!["c", "zzz"]);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Config::parse("report-type = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn int_options_ignore_other_value_types() {
        let mut rules = RuleConfigurations::default();
        rules.set("long_file", "max", 10);
        rules.set("long_line", "max", "wide");
        assert_eq!(rules.int_option("long_file", "max", 1000), 10);
        assert_eq!(rules.int_option("long_line", "max", 100), 100);
        assert_eq!(rules.int_option("too_many_parameters", "max", 10), 10);
    }
}
