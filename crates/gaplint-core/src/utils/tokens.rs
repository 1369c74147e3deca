//! Minimal lexical scanning of clean lines.
//!
//! This is not a GAP parser. It splits a comment- and string-free line into
//! identifiers, numbers and single punctuation characters, which is all the
//! keyword and scope tracking needs.

/// Reserved words of the GAP language.
pub const KEYWORDS: &[&str] = &[
    "and", "atomic", "break", "continue", "do", "elif", "else", "end", "false", "fi", "for",
    "function", "if", "in", "local", "mod", "not", "od", "or", "quit", "QUIT", "readonly",
    "readwrite", "rec", "repeat", "return", "then", "true", "until", "while",
];

/// Returns true if `word` is a reserved word.
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Returns true if the text is empty or whitespace only.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Converts a byte offset into a 1-indexed character column.
#[must_use]
pub fn column_at(line: &str, byte: usize) -> usize {
    line.get(..byte).map_or(0, |prefix| prefix.chars().count()) + 1
}

/// Token classes produced by [`tokenize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword.
    Ident,
    /// Integer or float literal.
    Number,
    /// Any other single non-whitespace character.
    Punct,
}

/// A token of a clean line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token class.
    pub kind: TokenKind,
    /// Source text of the token.
    pub text: &'a str,
    /// Byte offset in the line.
    pub start: usize,
    /// Identifier used as a record component (`r.name`, `r!.name`).
    pub component: bool,
}

impl Token<'_> {
    /// Byte offset one past the token.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Whether this is a keyword token (not a record component).
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Ident && !self.component && self.text == word
    }

    /// Whether this is a variable name (identifier, not keyword, not component).
    #[must_use]
    pub fn is_name(&self) -> bool {
        self.kind == TokenKind::Ident && !self.component && !is_keyword(self.text)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '@'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '@'
}

/// Splits a clean line into tokens.
#[must_use]
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        let kind = if is_ident_start(c) {
            TokenKind::Ident
        } else if c.is_ascii_digit() {
            TokenKind::Number
        } else {
            TokenKind::Punct
        };

        let mut end = start + c.len_utf8();
        if kind != TokenKind::Punct {
            while let Some(&(i, next)) = chars.peek() {
                if !is_ident_continue(next) {
                    break;
                }
                end = i + next.len_utf8();
                chars.next();
            }
        }

        let component = kind == TokenKind::Ident && is_component(&line[..start]);
        tokens.push(Token {
            kind,
            text: &line[start..end],
            start,
            component,
        });
    }

    tokens
}

/// A name directly after `.` or `!.` is a record component, `..` is a range.
fn is_component(before: &str) -> bool {
    before.ends_with('.') && !before.ends_with("..")
}
