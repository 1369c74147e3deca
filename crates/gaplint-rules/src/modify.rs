//! Modify rules.
//!
//! These rules never report anything. Each one names a preprocessor stage so
//! it can be disabled like any other rule: disabling one globally or with a
//! file-level directive skips that stage for the file.

use gaplint_core::preprocess::{COMMENTS, ESCAPED_QUOTES, MULTILINE_STRINGS, QUOTES};
use gaplint_core::RuleDefinition;

/// Stage 1: escaped quotes.
#[must_use]
pub fn replace_escaped_quotes() -> RuleDefinition {
    RuleDefinition::modify(
        ESCAPED_QUOTES.code(),
        "replace-escaped-quotes",
        "Replaces escaped quotes so they never delimit a string",
    )
}

/// Stage 2: triple-quoted strings.
#[must_use]
pub fn replace_multiline_strings() -> RuleDefinition {
    RuleDefinition::modify(
        MULTILINE_STRINGS.code(),
        "replace-multiline-strings",
        "Blanks the contents of \"\"\"-delimited strings, across lines",
    )
}

/// Stage 3: single-line literals.
#[must_use]
pub fn replace_quotes() -> RuleDefinition {
    RuleDefinition::modify(
        QUOTES.code(),
        "replace-quotes",
        "Blanks the contents of string and character literals",
    )
}

/// Stage 4: comments.
#[must_use]
pub fn remove_comments() -> RuleDefinition {
    RuleDefinition::modify(
        COMMENTS.code(),
        "remove-comments",
        "Removes everything from the comment marker to the end of the line",
    )
}

/// All modify rules in stage order.
#[must_use]
pub fn rules() -> Vec<RuleDefinition> {
    vec![
        replace_escaped_quotes(),
        replace_multiline_strings(),
        replace_quotes(),
        remove_comments(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaplint_core::Category;

    #[test]
    fn test_stage_order_and_category() {
        let codes: Vec<&str> = rules().iter().map(|r| r.code).collect();
        assert_eq!(codes, vec!["M001", "M002", "M003", "M004"]);
        assert!(rules().iter().all(|r| r.category == Category::Modify));
    }
}
