//! The built-in rule set.

use crate::{comments, indentation, keywords, lvars, modify, operators, punctuation, whitespace};
use gaplint_core::{RuleDefinition, RuleRegistry};

/// Returns all built-in rules: modify rules first, then warnings by code.
#[must_use]
pub fn all_rules() -> Vec<RuleDefinition> {
    let mut rules = modify::rules();
    rules.extend([
        lvars::rule(),
        whitespace::empty_lines(),
        whitespace::line_too_long(),
        indentation::rule(),
        whitespace::trailing_whitespace(),
        whitespace::tabs(),
        comments::rule(),
        punctuation::space_after_comma(),
        punctuation::space_before_comma(),
        punctuation::space_after_bracket(),
        punctuation::space_before_bracket(),
        punctuation::multiple_semicolons(),
        keywords::keyword_function(),
        keywords::function_local_same_line(),
    ]);
    rules.extend(operators::rules());
    rules
}

/// Returns a registry holding every built-in rule.
#[must_use]
pub fn builtin_registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    for rule in all_rules() {
        registry.register(rule);
    }
    tracing::debug!("Registered {} built-in rule(s)", registry.len());
    registry
}
