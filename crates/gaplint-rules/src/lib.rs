//! # gaplint-rules
//!
//! Built-in formatting rules for gaplint.
//!
//! Every rule is a [`RuleDefinition`]: a code, a kebab-case name and, for
//! warning rules, a check function run once per line.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | M001 | `replace-escaped-quotes` | Neutralizes `\"` and `\'` before string handling |
//! | M002 | `replace-multiline-strings` | Blanks `"""` strings, across lines |
//! | M003 | `replace-quotes` | Blanks string and character literals |
//! | M004 | `remove-comments` | Drops comments |
//! | W000 | `analyse-lvars` | Unused local variables |
//! | W001 | `empty-lines` | Consecutive empty lines |
//! | W002 | `line-too-long` | Lines wider than `columns` |
//! | W003 | `indentation` | Lines indented less than their nesting depth |
//! | W004 | `trailing-whitespace` | Whitespace at the end of a line |
//! | W005 | `tabs` | Tab characters |
//! | W006 | `too-many-hashes` | Comments starting with `###` and text |
//! | W007 | `space-after-comma` | Not exactly one space after a comma |
//! | W008 | `space-before-comma` | Whitespace before a comma |
//! | W009 | `space-after-bracket` | Whitespace after `(`, `[`, `{` |
//! | W010 | `space-before-bracket` | Whitespace before `)`, `]`, `}` |
//! | W011 | `multiple-semicolons` | More than one `;` in a line |
//! | W012 | `keyword-function` | `function` not followed by `(` |
//! | W013 | `function-local-same-line` | `function` and `local` in one line |
//! | W014-W027 | `whitespace-op-*`, `whitespace-double-dot` | Spacing around binary operators |
//!
//! ## Usage
//!
//! ```ignore
//! use gaplint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .registry(gaplint_rules::builtin_registry())
//!     .build();
//! let result = analyzer.analyze(&["lib/foo.gi"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod comments;
pub mod indentation;
pub mod keywords;
pub mod lvars;
pub mod modify;
pub mod operators;
pub mod punctuation;
mod registry;
pub mod whitespace;

#[cfg(test)]
mod test_support;

pub use registry::{all_rules, builtin_registry};

/// Re-export core types for convenience.
pub use gaplint_core::{Diagnostic, RuleDefinition, RuleRegistry};
