//! Configuration types for gaplint.
//!
//! Configuration comes from several layers: an in-process override, the
//! command line, and an on-disk TOML document. Each layer is a
//! [`PartialConfig`] where an absent key means "not set". [`LayeredConfig`]
//! reduces the layers into one effective [`Config`]:
//!
//! - scalar keys take the value of the highest-precedence layer setting them;
//! - `disable` is the union of every layer's list.

use crate::rule::{RuleId, RuleRegistry, RuleSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default maximum line width.
pub const DEFAULT_COLUMNS: usize = 80;
/// Default indentation unit.
pub const DEFAULT_INDENTATION: usize = 2;
/// Default diagnostic threshold.
pub const DEFAULT_MAX_WARNINGS: usize = 1000;

/// Effective configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum line width in characters.
    pub columns: usize,
    /// Spaces per nesting level.
    pub indentation: usize,
    /// Number of diagnostics after which the run stops.
    pub max_warnings: usize,
    /// Rules disabled for every file.
    pub disabled: RuleSet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            indentation: DEFAULT_INDENTATION,
            max_warnings: DEFAULT_MAX_WARNINGS,
            disabled: RuleSet::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if a rule is globally disabled.
    #[must_use]
    pub fn is_disabled(&self, id: RuleId) -> bool {
        self.disabled.contains(&id)
    }
}

/// One configuration source. Absent keys are not set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    /// Maximum line width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,

    /// Indentation unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indentation: Option<usize>,

    /// Diagnostic threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_warnings: Option<usize>,

    /// Rule codes or names to disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable: Option<Vec<String>>,
}

impl PartialConfig {
    /// Creates an empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a layer from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses a layer from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Sets `columns`.
    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Sets `indentation`.
    #[must_use]
    pub fn with_indentation(mut self, indentation: usize) -> Self {
        self.indentation = Some(indentation);
        self
    }

    /// Sets `max_warnings`.
    #[must_use]
    pub fn with_max_warnings(mut self, max_warnings: usize) -> Self {
        self.max_warnings = Some(max_warnings);
        self
    }

    /// Sets `disable`.
    #[must_use]
    pub fn with_disable<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disable = Some(tokens.into_iter().map(Into::into).collect());
        self
    }
}

/// Configuration sources, highest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// Supplied by the embedding program.
    Override,
    /// Command-line options of this run.
    CommandLine,
    /// On-disk configuration document.
    File,
}

/// Ordered set of configuration layers.
#[derive(Debug, Clone, Default)]
pub struct LayeredConfig {
    layers: Vec<(ConfigLayer, PartialConfig)>,
}

impl LayeredConfig {
    /// Creates an empty set of layers. Resolving it yields the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a layer.
    #[must_use]
    pub fn layer(mut self, layer: ConfigLayer, partial: PartialConfig) -> Self {
        self.layers.retain(|(existing, _)| *existing != layer);
        self.layers.push((layer, partial));
        self.layers.sort_by_key(|(layer, _)| *layer);
        self
    }

    /// Returns the partial configuration of a layer, if present.
    #[must_use]
    pub fn get(&self, layer: ConfigLayer) -> Option<&PartialConfig> {
        self.layers
            .iter()
            .find(|(existing, _)| *existing == layer)
            .map(|(_, partial)| partial)
    }

    /// Reduces the layers into the effective configuration.
    ///
    /// `disable` tokens are resolved against `registry`; unknown tokens are
    /// ignored with a warning.
    #[must_use]
    pub fn resolve(&self, registry: &RuleRegistry) -> Config {
        let mut columns = None;
        let mut indentation = None;
        let mut max_warnings = None;
        let mut disabled = RuleSet::new();

        for (layer, partial) in &self.layers {
            columns = columns.or(partial.columns);
            indentation = indentation.or(partial.indentation);
            max_warnings = max_warnings.or(partial.max_warnings);
            if let Some(tokens) = &partial.disable {
                let resolved = registry.resolve_tokens(tokens);
                tracing::debug!("{:?} layer disables {} rule(s)", layer, resolved.len());
                disabled.extend(resolved);
            }
        }

        Config {
            columns: columns.unwrap_or(DEFAULT_COLUMNS),
            indentation: indentation.unwrap_or(DEFAULT_INDENTATION),
            max_warnings: max_warnings.unwrap_or(DEFAULT_MAX_WARNINGS),
            disabled,
        }
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
    use crate::rule::{Finding, RuleDefinition};
    use crate::context::LineContext;

    fn noop(_: &LineContext<'_>, _: &mut Vec<Finding>) {}

    fn registry() -> RuleRegistry {
        RuleRegistry::new()
            .with(RuleDefinition::warning("W001", "empty-lines", "", noop))
            .with(RuleDefinition::warning("W002", "line-too-long", "", noop))
            .with(RuleDefinition::warning("W003", "indentation", "", noop))
    }

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::new().resolve(&registry());
        assert_eq!(config, Config::default());
        assert_eq!(config.columns, 80);
        assert_eq!(config.indentation, 2);
        assert_eq!(config.max_warnings, 1000);
        assert!(config.disabled.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
columns = 100
disable = ["W001", "line-too-long"]
"#;
        let partial = PartialConfig::parse(toml).expect("Failed to parse");
        assert_eq!(partial.columns, Some(100));
        assert_eq!(partial.indentation, None);
        assert_eq!(
            partial.disable,
            Some(vec!["W001".to_string(), "line-too-long".to_string()])
        );
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = PartialConfig::parse("colums = 100").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_override_beats_file() {
        let config = LayeredConfig::new()
            .layer(ConfigLayer::File, PartialConfig::new().with_columns(80))
            .layer(ConfigLayer::Override, PartialConfig::new().with_columns(100))
            .resolve(&registry());
        assert_eq!(config.columns, 100);
    }

    #[test]
    fn test_scalar_falls_through_unset_layers() {
        let config = LayeredConfig::new()
            .layer(ConfigLayer::Override, PartialConfig::new().with_columns(120))
            .layer(ConfigLayer::CommandLine, PartialConfig::new())
            .layer(ConfigLayer::File, PartialConfig::new().with_indentation(4))
            .resolve(&registry());
        assert_eq!(config.columns, 120);
        assert_eq!(config.indentation, 4);
        assert_eq!(config.max_warnings, DEFAULT_MAX_WARNINGS);
    }

    #[test]
    fn test_disable_is_union() {
        let config = LayeredConfig::new()
            .layer(
                ConfigLayer::Override,
                PartialConfig::new().with_disable(["empty-lines"]),
            )
            .layer(
                ConfigLayer::CommandLine,
                PartialConfig::new().with_disable(Vec::<String>::new()),
            )
            .layer(
                ConfigLayer::File,
                PartialConfig::new().with_disable(["W003", "W999"]),
            )
            .resolve(&registry());
        let codes: Vec<&str> = config.disabled.iter().map(|id| id.code()).collect();
        assert_eq!(codes, vec!["W001", "W003"]);
    }

    #[test]
    fn test_layer_replaces_same_source() {
        let layered = LayeredConfig::new()
            .layer(ConfigLayer::File, PartialConfig::new().with_columns(90))
            .layer(ConfigLayer::File, PartialConfig::new().with_columns(70));
        assert_eq!(layered.get(ConfigLayer::File).unwrap().columns, Some(70));
        assert_eq!(layered.resolve(&registry()).columns, 70);
    }
}
