//! Rule to detect unused local variables.
//!
//! # Rationale
//!
//! A `local` that is never referenced is dead code, usually left behind by a
//! refactoring.
//!
//! # Scoping
//!
//! Locals belong to the innermost function. A reference inside a nested
//! function does not count as a use of an outer local, and record components
//! (`r.x`) are not references. Diagnostics are reported at the declaration
//! once the function closes. Functions that never close cleanly report
//! nothing.

use gaplint_core::{Finding, LineContext, RuleDefinition};

/// Rule code for analyse-lvars.
pub const CODE: &str = "W000";

/// Rule name for analyse-lvars.
pub const NAME: &str = "analyse-lvars";

/// Creates the rule.
#[must_use]
pub fn rule() -> RuleDefinition {
    RuleDefinition::warning(
        CODE,
        NAME,
        "Warns about local variables that are declared but never used",
        check,
    )
}

fn check(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    for unused in &ctx.scope.unused {
        out.push(
            Finding::new(format!("unused local variable: {}", unused.name))
                .on_line(unused.line)
                .at_column(unused.column),
        );
    }
}
