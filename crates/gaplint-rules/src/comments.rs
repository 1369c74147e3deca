//! Rule to limit comment markers.

use gaplint_core::utils::column_at;
use gaplint_core::{Finding, LineContext, RuleDefinition};
use regex::Regex;
use std::sync::LazyLock;

/// Rule code for too-many-hashes.
pub const CODE: &str = "W006";

/// Rule name for too-many-hashes.
pub const NAME: &str = "too-many-hashes";

#[allow(clippy::expect_used)]
static MANY_HASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#{3,}.*\w").expect("hash pattern is valid"));

/// Warns about comments opened with three or more `#` followed by text.
///
/// Runs on the string-stripped line, so `#` inside literals is ignored.
/// Separator lines made only of `#` are allowed.
#[must_use]
pub fn rule() -> RuleDefinition {
    RuleDefinition::warning(
        CODE,
        NAME,
        "Warns if a comment starts with too many # characters",
        check,
    )
}

fn check(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    let Some(start) = ctx.stripped.find('#') else {
        return;
    };
    if let Some(m) = MANY_HASHES.find(&ctx.stripped[start..]) {
        if m.start() == 0 {
            out.push(
                Finding::new("too many hashes").at_column(column_at(ctx.stripped, start)),
            );
        }
    }
}
