//! Rule to check indentation against nesting depth.
//!
//! # Detected Patterns
//!
//! A line indented by fewer than `indentation * depth` spaces, where depth
//! counts open brackets and the keyword pairs `function…end`, `do…od`,
//! `if…fi` and `repeat…until`. A line starting with a closing keyword or
//! bracket, `else` or `elif` is expected one level shallower.
//!
//! Closing more than was opened makes nesting inconsistent. That is reported
//! once, and indentation is not checked for the rest of the file.

use gaplint_core::{Finding, LineContext, RuleDefinition};

/// Rule code for indentation.
pub const CODE: &str = "W003";

/// Rule name for indentation.
pub const NAME: &str = "indentation";

/// Creates the rule.
#[must_use]
pub fn rule() -> RuleDefinition {
    RuleDefinition::warning(CODE, NAME, "Warns if a line is under-indented", check)
        .with_params(&["indentation"])
        .skip_transcripts()
}

fn check(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    if ctx.scope.unbalanced {
        out.push(Finding::new(
            "unbalanced brackets or keywords, indentation checks suspended for the rest of the file",
        ));
        return;
    }

    let Some(indent) = ctx.scope.indent else {
        return;
    };
    let expected = indent.expected_depth * ctx.config.indentation;
    if indent.found < expected {
        out.push(
            Finding::new(format!(
                "bad indentation: found {} expected at least {}",
                indent.found, expected
            ))
            .at_column(indent.found + 1),
        );
    }
}
