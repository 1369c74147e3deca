//! Nesting depth and local-variable scope tracking.
//!
//! The tracker consumes clean lines in order and maintains:
//!
//! - a running nesting depth, where brackets and the keyword pairs
//!   `function…end`, `do…od`, `if…fi` and `repeat…until` each count as one
//!   level;
//! - an explicit stack of function scopes, each recording the `local`
//!   declarations of one function body and whether they were used.
//!
//! Name resolution is frame-local: an identifier only marks a local of the
//! innermost function as used. When a function closes, its unused locals are
//! reported. Unbalanced nesting suspends both indentation and local tracking
//! for the rest of the file.

use crate::utils::tokens::{column_at, is_blank, tokenize, Token, TokenKind};

/// Declaration state of one local variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVar {
    /// Line of the declaration (1-indexed).
    pub line: usize,
    /// Column of the name in the declaration (1-indexed).
    pub column: usize,
    /// Whether the name was referenced after being declared.
    pub used: bool,
}

/// Locals of one function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame {
    /// Line of the `function` keyword.
    pub owner_line: usize,
    /// Nesting depth just before the `function` keyword.
    pub entry_depth: usize,
    /// Declared names in declaration order.
    pub declared: Vec<(String, LocalVar)>,
}

impl ScopeFrame {
    fn new(owner_line: usize, entry_depth: usize) -> Self {
        Self {
            owner_line,
            entry_depth,
            declared: Vec::new(),
        }
    }

    fn declare(&mut self, name: &str, line: usize, column: usize) {
        if self.lookup(name).is_none() {
            self.declared.push((
                name.to_string(),
                LocalVar {
                    line,
                    column,
                    used: false,
                },
            ));
        }
    }

    fn lookup(&mut self, name: &str) -> Option<&mut LocalVar> {
        self.declared
            .iter_mut()
            .find(|(declared, _)| declared == name)
            .map(|(_, var)| var)
    }

    fn into_unused(self) -> impl Iterator<Item = UnusedLocal> {
        self.declared
            .into_iter()
            .filter(|(_, var)| !var.used)
            .map(|(name, var)| UnusedLocal {
                name,
                line: var.line,
                column: var.column,
            })
    }
}

/// A local that was never referenced in its function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedLocal {
    /// Variable name.
    pub name: String,
    /// Declaration line.
    pub line: usize,
    /// Declaration column.
    pub column: usize,
}

/// Indentation measured on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentCheck {
    /// Leading whitespace width.
    pub found: usize,
    /// Nesting levels the line must be indented by.
    pub expected_depth: usize,
}

/// What the tracker learned from one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeEvents {
    /// Nesting depth before the line.
    pub depth_at_start: usize,
    /// Indentation to verify, absent for blank lines, lines inside strings,
    /// and once nesting is inconsistent.
    pub indent: Option<IndentCheck>,
    /// Nesting became inconsistent on this line.
    pub unbalanced: bool,
    /// Locals reported when a function closed on this line.
    pub unused: Vec<UnusedLocal>,
}

/// Per-file nesting and scope state.
#[derive(Debug, Clone, Default)]
pub struct ScopeTracker {
    depth: usize,
    frames: Vec<ScopeFrame>,
    in_local_statement: bool,
    suspended: bool,
}

const OPENING_KEYWORDS: &[&str] = &["do", "if", "repeat"];
const CLOSING_KEYWORDS: &[&str] = &["od", "fi", "until"];
const DEDENT_KEYWORDS: &[&str] = &["od", "fi", "until", "end", "else", "elif"];

impl ScopeTracker {
    /// Creates a tracker at depth zero with no open scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Open function scopes, innermost last.
    #[must_use]
    pub fn frames(&self) -> &[ScopeFrame] {
        &self.frames
    }

    /// Consumes the clean form of line `line`.
    pub fn consume(&mut self, line: usize, clean: &str, starts_in_string: bool) -> ScopeEvents {
        let mut events = ScopeEvents {
            depth_at_start: self.depth,
            ..ScopeEvents::default()
        };

        let tokens = tokenize(clean);
        if !self.suspended && !starts_in_string && !is_blank(clean) {
            events.indent = Some(IndentCheck {
                found: clean.chars().take_while(|c| c.is_whitespace()).count(),
                expected_depth: self.expected_depth(tokens.first()),
            });
        }

        for token in &tokens {
            if self.suspended {
                break;
            }
            self.consume_token(line, clean, token, &mut events);
        }

        events
    }

    /// Finishes the file. Scopes still open are discarded without reports.
    pub fn finish(&mut self) {
        if !self.frames.is_empty() && !self.suspended {
            tracing::debug!(
                "{} function scope(s) never closed, first opened on line {}",
                self.frames.len(),
                self.frames[0].owner_line
            );
        }
        *self = Self::default();
    }

    fn expected_depth(&self, first: Option<&Token<'_>>) -> usize {
        let dedent = first.is_some_and(|t| {
            DEDENT_KEYWORDS.iter().any(|k| t.is_keyword(k))
                || (t.kind == TokenKind::Punct && matches!(t.text, ")" | "]" | "}"))
        });
        if dedent {
            self.depth.saturating_sub(1)
        } else {
            self.depth
        }
    }

    fn consume_token(
        &mut self,
        line: usize,
        clean: &str,
        token: &Token<'_>,
        events: &mut ScopeEvents,
    ) {
        match token.kind {
            TokenKind::Punct => match token.text {
                "(" | "[" | "{" => self.depth += 1,
                ")" | "]" | "}" => self.close(events),
                ";" => self.in_local_statement = false,
                _ => {}
            },
            TokenKind::Number => {}
            TokenKind::Ident => {
                if token.is_keyword("function") {
                    self.frames.push(ScopeFrame::new(line, self.depth));
                    self.depth += 1;
                } else if token.is_keyword("end") {
                    self.close_function(events);
                } else if token.is_keyword("local") {
                    self.in_local_statement = !self.frames.is_empty();
                } else if OPENING_KEYWORDS.iter().any(|k| token.is_keyword(k)) {
                    self.depth += 1;
                } else if CLOSING_KEYWORDS.iter().any(|k| token.is_keyword(k)) {
                    self.close(events);
                } else if token.is_name() {
                    self.reference(line, clean, token);
                }
            }
        }
    }

    fn reference(&mut self, line: usize, clean: &str, token: &Token<'_>) {
        let declaring = self.in_local_statement;
        let Some(frame) = self.frames.last_mut() else {
            return;
        };
        if declaring {
            frame.declare(token.text, line, column_at(clean, token.start));
        } else if let Some(var) = frame.lookup(token.text) {
            var.used = true;
        }
    }

    fn close(&mut self, events: &mut ScopeEvents) {
        if self.depth == 0 {
            self.suspend(events);
        } else {
            self.depth -= 1;
        }
    }

    fn close_function(&mut self, events: &mut ScopeEvents) {
        self.close(events);
        if self.suspended {
            return;
        }
        match self.frames.pop() {
            Some(frame) if frame.entry_depth == self.depth => {
                events.unused.extend(frame.into_unused());
            }
            _ => self.suspend(events),
        }
        self.in_local_statement = false;
    }

    fn suspend(&mut self, events: &mut ScopeEvents) {
        tracing::debug!("Unbalanced nesting, suspending scope tracking");
        self.suspended = true;
        self.frames.clear();
        self.in_local_statement = false;
        events.unbalanced = true;
        events.indent = None;
    }
}
