//! Comment-based suppression directives.
//!
//! Supports directives like:
//! ```text
//! x:=1;  # gaplint: disable=W014
//! # gaplint: disable(nextline)=whitespace-op-assign, W002
//! ```

use regex::Regex;
use std::sync::LazyLock;

/// Matches the directive body inside a comment. Group 1 is the optional
/// `(nextline)` marker, group 2 the token list.
#[allow(clippy::expect_used)]
static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)gaplint:\s*disable\s*(\(\s*nextline\s*\))?\s*=\s*(.*)$")
        .expect("directive pattern is valid")
});

/// Which line a directive targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveScope {
    /// `disable=`: the line carrying the comment, or the whole file when it
    /// appears before any code.
    Line,
    /// `disable(nextline)=`: the next line containing code.
    NextLine,
}

/// Parsed suppression directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Target of the directive.
    pub scope: DirectiveScope,
    /// Rule codes or names, unvalidated.
    pub tokens: Vec<String>,
}

/// Parses a suppression directive from the comment part of a line.
///
/// The comment must start at the comment marker. Returns `None` if the
/// comment carries no directive or the directive lists no token.
#[must_use]
pub fn parse_directive(comment: &str) -> Option<Directive> {
    let comment = comment.trim_start();
    if !comment.starts_with('#') {
        return None;
    }

    let captures = DIRECTIVE.captures(comment)?;
    let scope = if captures.get(1).is_some() {
        DirectiveScope::NextLine
    } else {
        DirectiveScope::Line
    };

    let tokens: Vec<String> = captures
        .get(2)
        .map_or("", |m| m.as_str())
        .split(',')
        .filter_map(|part| part.split_whitespace().next())
        .map(String::from)
        .collect();

    if tokens.is_empty() {
        return None;
    }

    Some(Directive { scope, tokens })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline_directive() {
        let directive = parse_directive("# gaplint: disable=W002").unwrap();
        assert_eq!(directive.scope, DirectiveScope::Line);
        assert_eq!(directive.tokens, vec!["W002"]);
    }

    #[test]
    fn test_parse_nextline_directive() {
        let directive =
            parse_directive("# gaplint: disable(nextline)=line-too-long, W004").unwrap();
        assert_eq!(directive.scope, DirectiveScope::NextLine);
        assert_eq!(directive.tokens, vec!["line-too-long", "W004"]);
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let directive = parse_directive("#GAPLINT: DISABLE = all").unwrap();
        assert_eq!(directive.tokens, vec!["all"]);
    }

    #[test]
    fn test_trailing_text_after_token_is_dropped() {
        let directive = parse_directive("# gaplint: disable=W001 because reasons").unwrap();
        assert_eq!(directive.tokens, vec!["W001"]);
    }

    #[test]
    fn test_not_a_directive() {
        assert!(parse_directive("# just a comment").is_none());
        assert!(parse_directive("# gaplint: disable=").is_none());
        assert!(parse_directive("gaplint: disable=W001").is_none());
        assert!(parse_directive("# gaplint: enable=W001").is_none());
    }
}
