//! Line preprocessing: strips escapes, strings and comments.
//!
//! Each raw line is turned into a *clean* line that downstream rules can
//! pattern-match without tripping over string contents or comments. Stages
//! run in a fixed order, each one relying on the previous:
//!
//! 1. escaped quotes (`\"`, `\'`) become `__`, so they never delimit a string;
//! 2. triple-quoted strings are blanked, possibly across lines;
//! 3. the interior of `"…"` and `'…'` literals is blanked, delimiters kept;
//! 4. the line is truncated at the comment marker.
//!
//! Blanking replaces every character with a single space, so the character
//! column of everything that survives is the same as in the raw line. The
//! delimiters of a triple-quoted string are rewritten to look like an empty
//! `""` literal, which keeps operator spacing checks honest on the lines
//! where such a string opens or closes.

use crate::rule::{RuleId, RuleSet};

/// Rule code of stage 1.
pub const ESCAPED_QUOTES: RuleId = RuleId::new("M001");
/// Rule code of stage 2.
pub const MULTILINE_STRINGS: RuleId = RuleId::new("M002");
/// Rule code of stage 3.
pub const QUOTES: RuleId = RuleId::new("M003");
/// Rule code of stage 4.
pub const COMMENTS: RuleId = RuleId::new("M004");

const TRIPLE_QUOTE: [char; 3] = ['"', '"', '"'];
const PLACEHOLDER: char = '_';
const COMMENT_MARKER: char = '#';

/// Which stages are active for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stages {
    /// Stage 1.
    pub escaped_quotes: bool,
    /// Stage 2.
    pub multiline_strings: bool,
    /// Stage 3.
    pub quotes: bool,
    /// Stage 4.
    pub comments: bool,
}

impl Default for Stages {
    fn default() -> Self {
        Self::all()
    }
}

impl Stages {
    /// Every stage enabled.
    #[must_use]
    pub fn all() -> Self {
        Self {
            escaped_quotes: true,
            multiline_strings: true,
            quotes: true,
            comments: true,
        }
    }

    /// Every stage whose modify rule is not in `disabled`.
    #[must_use]
    pub fn without(disabled: &RuleSet) -> Self {
        Self {
            escaped_quotes: !disabled.contains(&ESCAPED_QUOTES),
            multiline_strings: !disabled.contains(&MULTILINE_STRINGS),
            quotes: !disabled.contains(&QUOTES),
            comments: !disabled.contains(&COMMENTS),
        }
    }
}

/// State carried from one line to the next within a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreprocessorState {
    /// Inside a `"""` string.
    pub in_multiline_string: bool,
    /// Inside a single-line literal continued with a trailing backslash.
    pub string_delimiter: Option<char>,
}

impl PreprocessorState {
    /// Whether the next line starts inside some string literal.
    #[must_use]
    pub fn in_string(&self) -> bool {
        self.in_multiline_string || self.string_delimiter.is_some()
    }
}

/// Output of [`Preprocessor::process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanLine {
    /// Line after stages 1-3: strings blanked, comment still present.
    pub stripped: String,
    /// Line after all stages.
    pub clean: String,
    /// The line began inside a string literal.
    pub starts_in_string: bool,
}

impl CleanLine {
    /// The comment part of the stripped line, including the marker.
    #[must_use]
    pub fn comment(&self) -> &str {
        self.stripped.get(self.clean.len()..).unwrap_or("")
    }
}

/// Stateful per-file line normalizer.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    stages: Stages,
    state: PreprocessorState,
}

impl Preprocessor {
    /// Creates a preprocessor with the given stages and fresh state.
    #[must_use]
    pub fn new(stages: Stages) -> Self {
        Self {
            stages,
            state: PreprocessorState::default(),
        }
    }

    /// Current carried state.
    #[must_use]
    pub fn state(&self) -> &PreprocessorState {
        &self.state
    }

    /// Processes one line. Always yields exactly one clean line.
    pub fn process(&mut self, line: &str) -> CleanLine {
        let starts_in_string = self.state.in_string();
        let mut chars: Vec<char> = line.chars().collect();

        if self.stages.escaped_quotes {
            neutralize_escaped_quotes(&mut chars);
        }
        if self.stages.multiline_strings {
            self.blank_multiline_strings(&mut chars);
        }
        if self.stages.quotes {
            self.blank_quotes(&mut chars, line.ends_with('\\'));
        }

        let stripped: String = chars.iter().collect();
        let clean = if self.stages.comments {
            let end = chars
                .iter()
                .position(|&c| c == COMMENT_MARKER)
                .unwrap_or(chars.len());
            chars[..end].iter().collect()
        } else {
            stripped.clone()
        };

        CleanLine {
            stripped,
            clean,
            starts_in_string,
        }
    }

    fn blank_multiline_strings(&mut self, chars: &mut [char]) {
        let mut from = 0;

        if self.state.in_multiline_string {
            let Some(end) = find_sequence(chars, 0, &TRIPLE_QUOTE) else {
                blank(chars, 0, chars.len());
                return;
            };
            blank(chars, 0, end + 1);
            chars[end + 1] = '"';
            chars[end + 2] = '"';
            self.state.in_multiline_string = false;
            from = end + 3;
        }

        while let Some(start) = find_opening_triple(chars, from, self.state.string_delimiter) {
            if let Some(end) = find_sequence(chars, start + 3, &TRIPLE_QUOTE) {
                blank(chars, start + 1, end + 2);
                from = end + 3;
            } else {
                blank(chars, start + 2, chars.len());
                self.state.in_multiline_string = true;
                return;
            }
        }
    }

    fn blank_quotes(&mut self, chars: &mut [char], continued: bool) {
        let mut open = self.state.string_delimiter.take();

        for c in chars.iter_mut() {
            match open {
                Some(quote) if *c == quote => open = None,
                Some(_) => *c = ' ',
                None if *c == COMMENT_MARKER => break,
                None if *c == '"' || *c == '\'' => open = Some(*c),
                None => {}
            }
        }

        if let Some(quote) = open {
            if continued {
                self.state.string_delimiter = Some(quote);
            } else {
                tracing::debug!("Unterminated {} literal, blanked to end of line", quote);
            }
        }
    }
}

/// Replaces each quote preceded by an odd run of backslashes, together with
/// its escaping backslash, by placeholders.
fn neutralize_escaped_quotes(chars: &mut [char]) {
    for i in 1..chars.len() {
        if chars[i] != '"' && chars[i] != '\'' {
            continue;
        }
        let backslashes = chars[..i].iter().rev().take_while(|&&c| c == '\\').count();
        if backslashes % 2 == 1 {
            chars[i - 1] = PLACEHOLDER;
            chars[i] = PLACEHOLDER;
        }
    }
}

/// Finds an opening `"""` that is code: not inside a single-line literal and
/// not after the comment marker.
fn find_opening_triple(chars: &[char], from: usize, carried: Option<char>) -> Option<usize> {
    let mut open = if from == 0 { carried } else { None };
    let mut i = from;

    while i < chars.len() {
        let c = chars[i];
        match open {
            Some(quote) if c == quote => open = None,
            Some(_) => {}
            None if c == COMMENT_MARKER => return None,
            None if chars[i..].starts_with(&TRIPLE_QUOTE) => return Some(i),
            None if c == '"' || c == '\'' => open = Some(c),
            None => {}
        }
        i += 1;
    }

    None
}

fn find_sequence(chars: &[char], from: usize, needle: &[char]) -> Option<usize> {
    if from >= chars.len() {
        return None;
    }
    chars[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| pos + from)
}

fn blank(chars: &mut [char], from: usize, to: usize) {
    let to = to.min(chars.len());
    if from < to {
        chars[from..to].fill(' ');
    }
}
