//! Core analyzer for orchestrating lint execution.

use crate::budget::DiagnosticBudget;
use crate::config::Config;
use crate::engine::{FileChecker, FileOutcome};
use crate::rule::RuleRegistry;
use crate::types::{FileFailure, LintResult};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading a file.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    registry: RuleRegistry,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rules to run.
    #[must_use]
    pub fn registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the effective configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer. The configuration is fixed from here on.
    #[must_use]
    pub fn build(self) -> Analyzer {
        Analyzer {
            registry: self.registry,
            config: self.config.unwrap_or_default(),
        }
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    registry: RuleRegistry,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the effective configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the registered rules.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Analyzes files in parallel.
    ///
    /// Diagnostics are grouped by file in the order of `paths`. Files that
    /// cannot be read are recorded in [`LintResult::failures`]. Once
    /// `max_warnings` diagnostics have been collected, remaining work stops
    /// at the next line boundary and the result is marked truncated.
    #[must_use]
    pub fn analyze<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> LintResult {
        info!("Starting analysis of {} file(s)", paths.len());

        let budget = DiagnosticBudget::new(self.config.max_warnings);
        let checker = FileChecker::new(&self.registry, &self.config, &budget);

        let outcomes: Vec<Result<Option<FileOutcome>, AnalyzerError>> = paths
            .par_iter()
            .map(|path| {
                if budget.is_exhausted() {
                    return Ok(None);
                }
                Self::analyze_file(&checker, path.as_ref()).map(Some)
            })
            .collect();

        let mut result = LintResult::new();
        for (path, outcome) in paths.iter().zip(outcomes) {
            match outcome {
                Ok(Some(outcome)) => {
                    result.diagnostics.extend(outcome.diagnostics);
                    result.files_checked += 1;
                }
                Ok(None) => debug!("Skipped {}", path.as_ref().display()),
                Err(e) => {
                    warn!("{}", e);
                    result.failures.push(FileFailure {
                        file: path.as_ref().to_path_buf(),
                        message: e.to_string(),
                    });
                }
            }
        }
        result.truncated = budget.is_exhausted();

        info!(
            "Analysis complete: {} diagnostic(s) in {} file(s)",
            result.diagnostics.len(),
            result.files_checked
        );

        result
    }

    /// Analyzes in-memory source as if it were the file at `path`.
    #[must_use]
    pub fn analyze_source(&self, path: impl AsRef<Path>, content: &str) -> LintResult {
        let budget = DiagnosticBudget::new(self.config.max_warnings);
        let outcome =
            FileChecker::new(&self.registry, &self.config, &budget).check(path.as_ref(), content);

        LintResult {
            diagnostics: outcome.diagnostics,
            files_checked: 1,
            truncated: budget.is_exhausted(),
            failures: Vec::new(),
        }
    }

    /// Reads and checks a single file.
    fn analyze_file(checker: &FileChecker<'_>, path: &Path) -> Result<FileOutcome, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let bytes = std::fs::read(path).map_err(|e| AnalyzerError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let content = String::from_utf8_lossy(&bytes);

        Ok(checker.check(path, &content))
    }
}
