//! Utility functions for rule implementations.

pub mod directive;
pub mod tokens;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use directive::{parse_directive, Directive, DirectiveScope};
#[doc(inline)]
pub use tokens::{column_at, is_blank, is_keyword, tokenize, Token, TokenKind};
