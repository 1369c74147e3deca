//! Rules about the `function` keyword.

use gaplint_core::utils::{column_at, tokenize};
use gaplint_core::{Finding, LineContext, RuleDefinition};

/// Rule code for keyword-function.
pub const KEYWORD_FUNCTION: &str = "W012";
/// Rule code for function-local-same-line.
pub const FUNCTION_LOCAL_SAME_LINE: &str = "W013";

/// Requires `function` to be directly followed by `(`.
#[must_use]
pub fn keyword_function() -> RuleDefinition {
    RuleDefinition::warning(
        KEYWORD_FUNCTION,
        "keyword-function",
        "Warns if the keyword function is not followed by an opening bracket",
        check_keyword_function,
    )
}

fn check_keyword_function(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    for token in tokenize(ctx.clean) {
        if token.is_keyword("function") && !ctx.clean[token.end()..].starts_with('(') {
            out.push(
                Finding::new("keyword function not followed by (")
                    .at_column(column_at(ctx.clean, token.start)),
            );
        }
    }
}

/// Requires `local` declarations to start on their own line.
#[must_use]
pub fn function_local_same_line() -> RuleDefinition {
    RuleDefinition::warning(
        FUNCTION_LOCAL_SAME_LINE,
        "function-local-same-line",
        "Warns if the keywords function and local appear on the same line",
        check_function_local_same_line,
    )
}

fn check_function_local_same_line(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    let tokens = tokenize(ctx.clean);
    let Some(function) = tokens.iter().position(|t| t.is_keyword("function")) else {
        return;
    };
    if let Some(local) = tokens[function..].iter().find(|t| t.is_keyword("local")) {
        out.push(
            Finding::new("keywords function and local in the same line")
                .at_column(column_at(ctx.clean, local.start)),
        );
    }
}
