//! Rules reading the raw line: blank runs, width, trailing whitespace, tabs.
//!
//! These look at the line as written, so text inside strings and comments
//! counts.

use gaplint_core::utils::is_blank;
use gaplint_core::{Finding, LineContext, RuleDefinition};

/// Rule code for empty-lines.
pub const EMPTY_LINES: &str = "W001";
/// Rule code for line-too-long.
pub const LINE_TOO_LONG: &str = "W002";
/// Rule code for trailing-whitespace.
pub const TRAILING_WHITESPACE: &str = "W004";
/// Rule code for tabs.
pub const TABS: &str = "W005";

/// Warns on the second and later of consecutive blank lines.
#[must_use]
pub fn empty_lines() -> RuleDefinition {
    RuleDefinition::warning(
        EMPTY_LINES,
        "empty-lines",
        "Warns if there are consecutive empty lines",
        check_empty_lines,
    )
}

fn check_empty_lines(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    if ctx.previous_blank && !ctx.starts_in_string && is_blank(ctx.code) {
        out.push(Finding::new("consecutive empty lines"));
    }
}

/// Warns if a line is wider than `columns` characters.
#[must_use]
pub fn line_too_long() -> RuleDefinition {
    RuleDefinition::warning(
        LINE_TOO_LONG,
        "line-too-long",
        "Warns if a line is longer than the configured number of columns",
        check_line_too_long,
    )
    .with_params(&["columns"])
}

fn check_line_too_long(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    let width = ctx.original.chars().count();
    let columns = ctx.config.columns;
    if width > columns {
        out.push(
            Finding::new(format!("too long line ({width} / {columns})")).at_column(columns + 1),
        );
    }
}

/// Warns about whitespace at the end of a line.
#[must_use]
pub fn trailing_whitespace() -> RuleDefinition {
    RuleDefinition::warning(
        TRAILING_WHITESPACE,
        "trailing-whitespace",
        "Warns if there is whitespace at the end of a line",
        check_trailing_whitespace,
    )
    .skip_transcripts()
}

fn check_trailing_whitespace(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    let trimmed = ctx.original.trim_end();
    if trimmed.len() < ctx.original.len() {
        let column = trimmed.chars().count() + 1;
        out.push(Finding::new("trailing whitespace").at_column(column));
    }
}

/// Warns about tab characters.
#[must_use]
pub fn tabs() -> RuleDefinition {
    RuleDefinition::warning(
        TABS,
        "tabs",
        "Warns if there are tabs in a line",
        check_tabs,
    )
}

fn check_tabs(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    if let Some(index) = ctx.original.chars().position(|c| c == '\t') {
        out.push(
            Finding::new("there are tabs in this line, replace with spaces").at_column(index + 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lines, lint, lint_with};
    use gaplint_core::Config;

    #[test]
    fn test_second_blank_line_warns() {
        let reported = lint(empty_lines(), "x := 1;\n\n\ny := 2;\n");
        assert_eq!(lines(&reported), vec![3]);
        assert_eq!(reported[0].2, "consecutive empty lines");
    }

    #[test]
    fn test_every_extra_blank_line_warns() {
        let reported = lint(empty_lines(), "x;\n\n  \n\t\nz;\n");
        assert_eq!(lines(&reported), vec![3, 4]);
    }

    #[test]
    fn test_comment_breaks_blank_run() {
        assert!(lint(empty_lines(), "x;\n\n# c\n\ny;\n").is_empty());
    }

    #[test]
    fn test_blank_lines_inside_multiline_string() {
        let source = "s := \"\"\"\n\n\n\"\"\";\n";
        assert!(lint(empty_lines(), source).is_empty());
    }

    #[test]
    fn test_line_too_long() {
        let source = format!("{}\n{}\n", "x".repeat(80), "y".repeat(81));
        let reported = lint(line_too_long(), &source);
        assert_eq!(
            reported,
            vec![(2, Some(81), "too long line (81 / 80)".to_string())]
        );
    }

    #[test]
    fn test_line_too_long_counts_characters_and_comments() {
        let config = Config {
            columns: 11,
            ..Config::default()
        };
        let reported = lint_with(line_too_long(), config.clone(), "t.g", "x := \"äöü\";\n");
        assert!(reported.is_empty());
        let reported = lint_with(line_too_long(), config, "t.g", "x := 1; # comment\n");
        assert_eq!(reported[0].2, "too long line (17 / 11)");
    }

    #[test]
    fn test_trailing_whitespace() {
        let reported = lint(trailing_whitespace(), "x := 1;  \ny := 2;\n   \n");
        assert_eq!(
            reported,
            vec![
                (1, Some(8), "trailing whitespace".to_string()),
                (3, Some(1), "trailing whitespace".to_string())
            ]
        );
    }

    #[test]
    fn test_trailing_whitespace_skips_transcripts() {
        let reported = lint_with(trailing_whitespace(), Config::default(), "t.tst", "gap> 1;  \n");
        assert!(reported.is_empty());
    }

    #[test]
    fn test_tabs() {
        let reported = lint(tabs(), "if x then\n\treturn 1;\nfi;\n");
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].0, 2);
        assert_eq!(reported[0].1, Some(1));
    }
}
