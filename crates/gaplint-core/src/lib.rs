//! # gaplint-core
//!
//! Core engine of a line-oriented style checker for GAP source files.
//!
//! This crate provides the machinery every rule builds on. It includes:
//!
//! - [`Preprocessor`] for column-preserving removal of escapes, strings and
//!   comments
//! - [`ScopeTracker`] for nesting depth and function-local declarations
//! - [`SuppressionMap`] for `# gaplint: disable=...` directives
//! - [`LayeredConfig`] for merging configuration sources
//! - [`RuleRegistry`] holding rules as plain data
//! - [`Analyzer`] for checking many files in parallel
//!
//! Rule implementations live in `gaplint-rules`.
//!
//! ## Example
//!
//! ```ignore
//! use gaplint_core::{Analyzer, ConfigLayer, LayeredConfig, PartialConfig};
//!
//! let registry = gaplint_rules::builtin_registry();
//! let config = LayeredConfig::new()
//!     .layer(ConfigLayer::CommandLine, PartialConfig::new().with_columns(100))
//!     .resolve(&registry);
//!
//! let analyzer = Analyzer::builder().registry(registry).config(config).build();
//! let result = analyzer.analyze(&["lib/foo.gi"]);
//! print!("{}", result.format_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod budget;
mod config;
mod context;
mod engine;
mod rule;
mod suppression;
mod types;

/// Line preprocessing stages.
pub mod preprocess;
/// Nesting and local-variable scope tracking.
pub mod scope;
/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use budget::DiagnosticBudget;
pub use config::{
    Config, ConfigError, ConfigLayer, LayeredConfig, PartialConfig, DEFAULT_COLUMNS,
    DEFAULT_INDENTATION, DEFAULT_MAX_WARNINGS,
};
pub use context::{FileContext, LineContext, SourceKind, TRANSCRIPT_EXTENSIONS};
pub use engine::{FileChecker, FileOutcome};
pub use preprocess::{CleanLine, Preprocessor, PreprocessorState, Stages};
pub use rule::{Category, CheckFn, Finding, RuleDefinition, RuleId, RuleRegistry, RuleSet};
pub use scope::{ScopeEvents, ScopeTracker};
pub use suppression::SuppressionMap;
pub use types::{Diagnostic, DiagnosticReport, FileFailure, LintResult, Location};
