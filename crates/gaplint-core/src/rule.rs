//! Rule descriptors and the ordered rule registry.
//!
//! Rules are plain data: a code, a name, a category and (for warning rules) a
//! pure check function over a [`LineContext`]. Disabling a rule, or all of
//! them, is a set operation over [`RuleId`]s.

use crate::context::LineContext;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Stable identifier of a rule, its code (e.g. `"W002"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RuleId(&'static str);

impl RuleId {
    /// Wraps a rule code.
    #[must_use]
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    /// Returns the rule code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// An ordered set of rule identifiers.
pub type RuleSet = BTreeSet<RuleId>;

/// Kind of rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Reports diagnostics.
    Warning,
    /// Rewrites a line for internal analysis only; never reports.
    Modify,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.pad("warning"),
            Self::Modify => f.pad("modify"),
        }
    }
}

/// A single hit reported by a check function.
///
/// `line` defaults to the line being checked; rules that report on an
/// earlier line (unused locals are reported where they were declared) set it
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Line override (1-indexed).
    pub line: Option<usize>,
    /// Column of the offending text (1-indexed).
    pub column: Option<usize>,
    /// Human-readable message.
    pub message: String,
}

impl Finding {
    /// Creates a finding on the current line with no column.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            line: None,
            column: None,
            message: message.into(),
        }
    }

    /// Sets the column.
    #[must_use]
    pub fn at_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    /// Moves the finding to another line.
    #[must_use]
    pub fn on_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Check function of a warning rule.
pub type CheckFn = fn(&LineContext<'_>, &mut Vec<Finding>);

/// Immutable descriptor of a rule.
#[derive(Debug, Clone)]
pub struct RuleDefinition {
    /// Rule code (e.g. "W002").
    pub code: &'static str,
    /// Kebab-case alias (e.g. "line-too-long").
    pub name: &'static str,
    /// Warning or modify.
    pub category: Category,
    /// Brief description of what the rule checks or does.
    pub description: &'static str,
    /// Configuration keys the rule reads.
    pub params: &'static [&'static str],
    /// Whether the rule is skipped for `.tst`/`.xml` transcripts.
    pub skip_transcripts: bool,
    /// Line check, `None` for modify rules.
    pub check: Option<CheckFn>,
}

impl RuleDefinition {
    /// Creates a warning rule.
    #[must_use]
    pub fn warning(
        code: &'static str,
        name: &'static str,
        description: &'static str,
        check: CheckFn,
    ) -> Self {
        Self {
            code,
            name,
            category: Category::Warning,
            description,
            params: &[],
            skip_transcripts: false,
            check: Some(check),
        }
    }

    /// Creates a modify rule. Its behavior lives in the preprocessor.
    #[must_use]
    pub fn modify(code: &'static str, name: &'static str, description: &'static str) -> Self {
        Self {
            code,
            name,
            category: Category::Modify,
            description,
            params: &[],
            skip_transcripts: false,
            check: None,
        }
    }

    /// Declares the configuration keys this rule reads.
    #[must_use]
    pub fn with_params(mut self, params: &'static [&'static str]) -> Self {
        self.params = params;
        self
    }

    /// Marks the rule as not applicable to transcripts.
    #[must_use]
    pub fn skip_transcripts(mut self) -> Self {
        self.skip_transcripts = true;
        self
    }

    /// Returns the rule identifier.
    #[must_use]
    pub fn id(&self) -> RuleId {
        RuleId::new(self.code)
    }
}

/// Ordered collection of rule definitions, registered once at startup.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<RuleDefinition>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule. A rule whose code is already registered is ignored.
    pub fn register(&mut self, rule: RuleDefinition) {
        if self.get(rule.id()).is_some() {
            tracing::warn!("Rule {} registered twice, keeping the first", rule.code);
            return;
        }
        self.rules.push(rule);
    }

    /// Adds a rule, builder style.
    #[must_use]
    pub fn with(mut self, rule: RuleDefinition) -> Self {
        self.register(rule);
        self
    }

    /// Iterates over rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.iter()
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Looks up a rule by identifier.
    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&RuleDefinition> {
        self.rules.iter().find(|r| r.code == id.code())
    }

    /// Resolves a rule code or name (case-insensitive) to its identifier.
    #[must_use]
    pub fn lookup(&self, token: &str) -> Option<RuleId> {
        let token = token.trim();
        self.rules
            .iter()
            .find(|r| r.code.eq_ignore_ascii_case(token) || r.name.eq_ignore_ascii_case(token))
            .map(RuleDefinition::id)
    }

    /// Every registered identifier.
    #[must_use]
    pub fn ids(&self) -> RuleSet {
        self.rules.iter().map(RuleDefinition::id).collect()
    }

    /// Resolves directive or configuration tokens to a rule set.
    ///
    /// `all` expands to every registered rule. Unknown tokens are skipped.
    pub fn resolve_tokens<I, S>(&self, tokens: I) -> RuleSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = RuleSet::new();
        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            if token.eq_ignore_ascii_case("all") {
                set.extend(self.ids());
            } else if let Some(id) = self.lookup(token) {
                set.insert(id);
            } else {
                tracing::warn!("Ignoring unknown rule: {}", token);
            }
        }
        set
    }
}
