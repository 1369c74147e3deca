//! Core types for diagnostics and results.

use miette::SourceSpan;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as given to the analyzer.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed), when the rule reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Byte offset in file (for miette integration).
    #[serde(skip)]
    pub offset: usize,
    /// Length of the span in bytes.
    #[serde(skip)]
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: Option<usize>) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A formatting problem found during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule code (e.g., "W002").
    pub code: String,
    /// Rule name (e.g., "line-too-long").
    pub rule: String,
    /// Where the problem is.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            location,
            message: message.into(),
        }
    }

    /// Formats the diagnostic on one line, without the column.
    #[must_use]
    pub fn format(&self) -> String {
        format!(
            "{}:{}: {} [{}/{}]",
            self.location.file.display(),
            self.location.line,
            self.message,
            self.code,
            self.rule
        )
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} {}",
            self.location.file.display(),
            self.location.line,
            self.location.column.unwrap_or(1),
            self.code,
            self.message
        )
    }
}

/// Converts a [`Diagnostic`] to a miette diagnostic for rich display.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
pub struct DiagnosticReport {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Diagnostic> for DiagnosticReport {
    fn from(d: &Diagnostic) -> Self {
        Self {
            message: format!("[{}] {}", d.code, d.message),
            help: Some(format!(
                "suppress with `# gaplint: disable={}`",
                d.rule
            )),
            span: SourceSpan::from((d.location.offset, d.location.length)),
            label_message: d.rule.clone(),
        }
    }
}

/// A file that could not be checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    /// File that failed.
    pub file: PathBuf,
    /// Reason, suitable for display.
    pub message: String,
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All diagnostics found, grouped by file in input order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of files checked.
    pub files_checked: usize,
    /// The run stopped early because the diagnostic threshold was reached.
    pub truncated: bool,
    /// Files that could not be read.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing was reported, every file was read and the
    /// run was not cut short by the threshold.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.failures.is_empty() && !self.truncated
    }

    /// One-line summary of the run.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Found {} warning(s) in {} file(s)",
            self.diagnostics.len(),
            self.files_checked
        );
        if !self.failures.is_empty() {
            summary.push_str(&format!(", {} file(s) could not be read", self.failures.len()));
        }
        if self.truncated {
            summary.push_str(", stopped at the warning threshold");
        }
        summary
    }

    /// Formats every diagnostic and the summary as a report.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        for d in &self.diagnostics {
            let _ = writeln!(report, "{}", d.format());
        }
        for failure in &self.failures {
            let _ = writeln!(
                report,
                "{}: {}",
                failure.file.display(),
                failure.message
            );
        }
        let _ = writeln!(report, "{}", self.summary());
        report
    }
}
