//! Rules for commas, brackets and semicolons.
//!
//! All of these run on the clean line, so strings and comments never match.
//! A rule reports every occurrence on a line.

use gaplint_core::utils::column_at;
use gaplint_core::{Finding, LineContext, RuleDefinition};
use regex::Regex;
use std::sync::LazyLock;

/// Rule code for space-after-comma.
pub const SPACE_AFTER_COMMA: &str = "W007";
/// Rule code for space-before-comma.
pub const SPACE_BEFORE_COMMA: &str = "W008";
/// Rule code for space-after-bracket.
pub const SPACE_AFTER_BRACKET: &str = "W009";
/// Rule code for space-before-bracket.
pub const SPACE_BEFORE_BRACKET: &str = "W010";
/// Rule code for multiple-semicolons.
pub const MULTIPLE_SEMICOLONS: &str = "W011";

// A comma directly followed by code, or by two or more spaces and code.
// Consecutive commas (list holes) and a comma ending the line are fine.
#[allow(clippy::expect_used)]
static AFTER_COMMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",(?:[^,\s]|\s{2,}[^\s,])").expect("comma pattern is valid")
});

#[allow(clippy::expect_used)]
static BEFORE_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S\s+,").expect("comma pattern is valid"));

#[allow(clippy::expect_used)]
static AFTER_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[(\[{][ \t]+\S").expect("bracket pattern is valid"));

#[allow(clippy::expect_used)]
static BEFORE_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S[ \t]+[)\]}]").expect("bracket pattern is valid"));

/// Requires exactly one space after a comma.
#[must_use]
pub fn space_after_comma() -> RuleDefinition {
    RuleDefinition::warning(
        SPACE_AFTER_COMMA,
        "space-after-comma",
        "Warns if a comma is not followed by exactly one space",
        check_space_after_comma,
    )
}

fn check_space_after_comma(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    for m in AFTER_COMMA.find_iter(ctx.clean) {
        out.push(
            Finding::new("exactly one space required after comma")
                .at_column(column_at(ctx.clean, m.start())),
        );
    }
}

/// Forbids whitespace between code and a following comma.
#[must_use]
pub fn space_before_comma() -> RuleDefinition {
    RuleDefinition::warning(
        SPACE_BEFORE_COMMA,
        "space-before-comma",
        "Warns if there is whitespace before a comma",
        check_space_before_comma,
    )
}

fn check_space_before_comma(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    for m in BEFORE_COMMA.find_iter(ctx.clean) {
        out.push(
            Finding::new("no space before comma").at_column(column_at(ctx.clean, m.end() - 1)),
        );
    }
}

/// Forbids whitespace after an opening bracket.
#[must_use]
pub fn space_after_bracket() -> RuleDefinition {
    RuleDefinition::warning(
        SPACE_AFTER_BRACKET,
        "space-after-bracket",
        "Warns if there is whitespace after an opening bracket",
        check_space_after_bracket,
    )
}

fn check_space_after_bracket(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    for m in AFTER_BRACKET.find_iter(ctx.clean) {
        out.push(
            Finding::new("no space allowed after bracket")
                .at_column(column_at(ctx.clean, m.start())),
        );
    }
}

/// Forbids whitespace between code and a closing bracket.
#[must_use]
pub fn space_before_bracket() -> RuleDefinition {
    RuleDefinition::warning(
        SPACE_BEFORE_BRACKET,
        "space-before-bracket",
        "Warns if there is whitespace before a closing bracket",
        check_space_before_bracket,
    )
}

fn check_space_before_bracket(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    for m in BEFORE_BRACKET.find_iter(ctx.clean) {
        out.push(
            Finding::new("no space allowed before bracket")
                .at_column(column_at(ctx.clean, m.end() - 1)),
        );
    }
}

/// Allows at most one statement terminator per line.
#[must_use]
pub fn multiple_semicolons() -> RuleDefinition {
    RuleDefinition::warning(
        MULTIPLE_SEMICOLONS,
        "multiple-semicolons",
        "Warns if there is more than one semicolon in a line",
        check_multiple_semicolons,
    )
    .skip_transcripts()
}

fn check_multiple_semicolons(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    if let Some((second, _)) = ctx.clean.match_indices(';').nth(1) {
        out.push(
            Finding::new("more than one semicolon").at_column(column_at(ctx.clean, second)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lint, lint_with};
    use gaplint_core::Config;

    fn columns(reported: &[(usize, Option<usize>, String)]) -> Vec<usize> {
        reported.iter().filter_map(|(_, c, _)| *c).collect()
    }

    #[test]
    fn test_space_after_comma() {
        let reported = lint(space_after_comma(), "f(a,b,  c, d);\n");
        assert_eq!(columns(&reported), vec![4, 6]);
        assert_eq!(reported[0].2, "exactly one space required after comma");
    }

    #[test]
    fn test_space_after_comma_allows_holes_and_line_end() {
        assert!(lint(space_after_comma(), "l := [1,, 3];\nf(a,\n  b);\n").is_empty());
    }

    #[test]
    fn test_space_after_comma_ignores_strings() {
        assert!(lint(space_after_comma(), "s := \"a,b\";  # x,y\n").is_empty());
    }

    #[test]
    fn test_space_before_comma() {
        let reported = lint(space_before_comma(), "f(a , b);\n");
        assert_eq!(columns(&reported), vec![5]);
        assert!(lint(space_before_comma(), "f(a,\n  , b);\n").is_empty());
    }

    #[test]
    fn test_space_after_bracket() {
        let reported = lint(space_after_bracket(), "f( a, [ 1], rec( ));\n");
        assert_eq!(columns(&reported), vec![2, 7, 16]);
    }

    #[test]
    fn test_space_before_bracket() {
        let reported = lint(space_before_bracket(), "f(a, [1 ], x );\nl := [\n  1\n];\n");
        assert_eq!(columns(&reported), vec![9, 14]);
    }

    #[test]
    fn test_multiple_semicolons() {
        let reported = lint(multiple_semicolons(), "x := 1; y := 2;\nz := \";\";\n");
        assert_eq!(reported, vec![(1, Some(15), "more than one semicolon".to_string())]);
    }

    #[test]
    fn test_multiple_semicolons_skips_transcripts() {
        let reported = lint_with(multiple_semicolons(), Config::default(), "t.tst", "gap> x;;\n");
        assert!(reported.is_empty());
    }
}
