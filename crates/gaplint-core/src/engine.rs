//! Per-file rule evaluation.
//!
//! Checking a file is a fold over its lines. The preprocessor state, scope
//! tracker and blank-line memory are created fresh for every file and
//! threaded from one line to the next, so files never share mutable state
//! apart from the run-wide [`DiagnosticBudget`].

use crate::budget::DiagnosticBudget;
use crate::config::Config;
use crate::context::{FileContext, LineContext, SourceKind};
use crate::preprocess::{Preprocessor, Stages};
use crate::rule::{CheckFn, Finding, RuleDefinition, RuleRegistry, RuleSet};
use crate::scope::ScopeTracker;
use crate::suppression::SuppressionMap;
use crate::types::{Diagnostic, Location};
use crate::utils::tokens::is_blank;
use std::path::Path;
use tracing::debug;

/// Diagnostics of one file.
#[derive(Debug, Default)]
pub struct FileOutcome {
    /// Diagnostics ordered by line, then rule code.
    pub diagnostics: Vec<Diagnostic>,
    /// Evaluation stopped before the last line because the budget ran out.
    pub stopped_early: bool,
}

/// Runs the enabled rules of a registry over single files.
#[derive(Debug, Clone, Copy)]
pub struct FileChecker<'a> {
    registry: &'a RuleRegistry,
    config: &'a Config,
    budget: &'a DiagnosticBudget,
}

impl<'a> FileChecker<'a> {
    /// Creates a checker sharing `budget` with other checkers of the run.
    #[must_use]
    pub fn new(registry: &'a RuleRegistry, config: &'a Config, budget: &'a DiagnosticBudget) -> Self {
        Self {
            registry,
            config,
            budget,
        }
    }

    /// Checks one file's content.
    #[must_use]
    pub fn check(&self, path: &Path, content: &str) -> FileOutcome {
        let file = FileContext::new(path, content);
        let suppressions = SuppressionMap::scan(content, file.kind, self.registry);

        let disabled = suppressions.file_disabled(&self.config.disabled);

        let active = self.active_rules(&disabled, file.kind);
        debug!(
            "Checking {} with {} active rule(s)",
            path.display(),
            active.len()
        );

        let mut preprocessor = Preprocessor::new(Stages::without(&disabled));
        let mut scope = ScopeTracker::new();
        let mut previous_blank = false;
        let mut findings = Vec::new();
        let mut outcome = FileOutcome::default();

        'lines: for (index, raw) in content.lines().enumerate() {
            if self.budget.is_exhausted() {
                outcome.stopped_early = true;
                break;
            }
            let line = index + 1;

            let Some(code) = file.kind.code_portion(raw) else {
                previous_blank = false;
                continue;
            };
            let clean_line = preprocessor.process(&code);
            let events = scope.consume(line, &clean_line.clean, clean_line.starts_in_string);

            let ctx = LineContext {
                line,
                original: raw,
                code: &code,
                stripped: &clean_line.stripped,
                clean: &clean_line.clean,
                starts_in_string: clean_line.starts_in_string,
                previous_blank,
                kind: file.kind,
                config: self.config,
                scope: &events,
            };

            for (rule, check) in &active {
                check(&ctx, &mut findings);
                for finding in findings.drain(..) {
                    let target = finding.line.unwrap_or(line);
                    if suppressions
                        .effective(target, &self.config.disabled)
                        .contains(&rule.id())
                    {
                        continue;
                    }
                    if !self.budget.try_acquire() {
                        outcome.stopped_early = true;
                        break 'lines;
                    }
                    outcome
                        .diagnostics
                        .push(Self::diagnostic(&file, rule, target, finding));
                }
            }

            previous_blank = is_blank(&code) && !clean_line.starts_in_string;
        }

        scope.finish();
        outcome
            .diagnostics
            .sort_by(|a, b| {
                a.location
                    .line
                    .cmp(&b.location.line)
                    .then_with(|| a.code.cmp(&b.code))
            });
        outcome
    }

    fn active_rules(
        &self,
        disabled: &RuleSet,
        kind: SourceKind,
    ) -> Vec<(&'a RuleDefinition, CheckFn)> {
        self.registry
            .iter()
            .filter(|rule| !disabled.contains(&rule.id()))
            .filter(|rule| !(kind == SourceKind::Transcript && rule.skip_transcripts))
            .filter_map(|rule| rule.check.map(|check| (rule, check)))
            .collect()
    }

    fn diagnostic(
        file: &FileContext<'_>,
        rule: &RuleDefinition,
        line: usize,
        finding: Finding,
    ) -> Diagnostic {
        let offset = file.offset_for(line, finding.column.unwrap_or(1));
        let length = usize::from(finding.column.is_some());
        let location = Location::new(file.path.to_path_buf(), line, finding.column)
            .with_span(offset, length);
        Diagnostic::new(rule.code, rule.name, location, finding.message)
    }
}
