//! Per-file suppression directives.
//!
//! A file is scanned once, before any rule runs, for `gaplint: disable`
//! comments. The result is immutable for the rest of the file's evaluation.

use crate::context::SourceKind;
use crate::preprocess::{Preprocessor, Stages};
use crate::rule::{RuleRegistry, RuleSet};
use crate::utils::directive::{parse_directive, DirectiveScope};
use crate::utils::tokens::is_blank;
use std::collections::BTreeMap;

/// Rules disabled for a whole file and for individual lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionMap {
    file_wide: RuleSet,
    lines: BTreeMap<usize, RuleSet>,
}

impl SuppressionMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `content` for directives.
    ///
    /// - `disable=` trailing code applies to that line.
    /// - `disable=` before any code applies to the whole file.
    /// - `disable(nextline)=` applies to the next line containing code.
    ///
    /// Tokens are resolved against `registry`; unknown tokens are ignored.
    #[must_use]
    pub fn scan(content: &str, kind: SourceKind, registry: &RuleRegistry) -> Self {
        let mut map = Self::new();
        let mut preprocessor = Preprocessor::new(Stages::all());
        let mut seen_code = false;
        let mut pending = RuleSet::new();

        for (index, raw) in content.lines().enumerate() {
            let line = index + 1;
            let Some(code) = kind.code_portion(raw) else {
                // Transcript output lines only carry whole-line `#` comments.
                if kind == SourceKind::Transcript {
                    map.apply(line, raw, false, seen_code, &mut pending, registry);
                }
                continue;
            };
            let clean_line = preprocessor.process(&code);
            let has_code = clean_line.starts_in_string || !is_blank(&clean_line.clean);

            if has_code && !pending.is_empty() {
                map.add_line(line, std::mem::take(&mut pending));
            }
            map.apply(line, clean_line.comment(), has_code, seen_code, &mut pending, registry);

            seen_code |= has_code;
        }

        map
    }

    fn apply(
        &mut self,
        line: usize,
        comment: &str,
        has_code: bool,
        seen_code: bool,
        pending: &mut RuleSet,
        registry: &RuleRegistry,
    ) {
        let Some(directive) = parse_directive(comment) else {
            return;
        };
        let rules = registry.resolve_tokens(&directive.tokens);
        match directive.scope {
            DirectiveScope::NextLine => pending.extend(rules),
            DirectiveScope::Line if !has_code && !seen_code => {
                tracing::debug!("File-wide suppression of {} rule(s)", rules.len());
                self.file_wide.extend(rules);
            }
            DirectiveScope::Line => self.add_line(line, rules),
        }
    }

    fn add_line(&mut self, line: usize, rules: RuleSet) {
        if !rules.is_empty() {
            self.lines.entry(line).or_default().extend(rules);
        }
    }

    /// Rules disabled for the whole file: `global` plus file-wide
    /// directives.
    #[must_use]
    pub fn file_disabled(&self, global: &RuleSet) -> RuleSet {
        let mut set = global.clone();
        set.extend(self.file_wide.iter().copied());
        set
    }

    /// Effective disabled set of a line: `global`, file-wide and line
    /// directives combined.
    #[must_use]
    pub fn effective(&self, line: usize, global: &RuleSet) -> RuleSet {
        let mut set = self.file_disabled(global);
        if let Some(rules) = self.lines.get(&line) {
            set.extend(rules.iter().copied());
        }
        set
    }
}
