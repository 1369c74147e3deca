//! Helpers for rule unit tests.

use gaplint_core::{Analyzer, Config, RuleDefinition, RuleRegistry};

/// `(line, column, message)` of every diagnostic.
pub(crate) type Reported = Vec<(usize, Option<usize>, String)>;

/// Runs `rule`, together with the modify rules, over a `.g` source.
pub(crate) fn lint(rule: RuleDefinition, source: &str) -> Reported {
    lint_with(rule, Config::default(), "test.g", source)
}

/// Runs `rule` with an explicit configuration and file name.
pub(crate) fn lint_with(
    rule: RuleDefinition,
    config: Config,
    path: &str,
    source: &str,
) -> Reported {
    let mut registry = RuleRegistry::new();
    for modify in crate::modify::rules() {
        registry.register(modify);
    }
    registry.register(rule);

    Analyzer::builder()
        .registry(registry)
        .config(config)
        .build()
        .analyze_source(path, source)
        .diagnostics
        .into_iter()
        .map(|d| (d.location.line, d.location.column, d.message))
        .collect()
}

/// Line numbers of every diagnostic.
pub(crate) fn lines(reported: &Reported) -> Vec<usize> {
    reported.iter().map(|(line, _, _)| *line).collect()
}
