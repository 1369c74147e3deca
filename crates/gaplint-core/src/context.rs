//! Context types for rule execution.

use crate::config::Config;
use crate::scope::ScopeEvents;
use std::borrow::Cow;
use std::path::Path;

/// Extensions treated as GAP test transcripts.
pub const TRANSCRIPT_EXTENSIONS: &[&str] = &["tst", "xml"];

const PRIMARY_PROMPT: &str = "gap>";
const CONTINUATION_PROMPT: &str = ">";

/// How the lines of a file are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Plain GAP source.
    Gap,
    /// Test transcript, where only prompt lines are code.
    Transcript,
}

impl SourceKind {
    /// Detects the kind from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let transcript = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| TRANSCRIPT_EXTENSIONS.contains(&ext));
        if transcript {
            Self::Transcript
        } else {
            Self::Gap
        }
    }

    /// Returns the code portion of a raw line, or `None` when the line is
    /// not code.
    ///
    /// Transcript prompts are replaced by spaces so columns still match the
    /// raw line.
    #[must_use]
    pub fn code_portion<'a>(&self, raw: &'a str) -> Option<Cow<'a, str>> {
        match self {
            Self::Gap => Some(Cow::Borrowed(raw)),
            Self::Transcript => {
                let prompt = [PRIMARY_PROMPT, CONTINUATION_PROMPT]
                    .into_iter()
                    .find(|p| raw.starts_with(p))?;
                Some(Cow::Owned(format!(
                    "{}{}",
                    " ".repeat(prompt.len()),
                    &raw[prompt.len()..]
                )))
            }
        }
    }
}

/// Everything a warning rule sees about one line.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// Line number (1-indexed).
    pub line: usize,
    /// Raw text of the line, as read from the file.
    pub original: &'a str,
    /// Code portion of the line (prompts blanked in transcripts).
    pub code: &'a str,
    /// Code with strings blanked, comment still present.
    pub stripped: &'a str,
    /// Code with strings blanked and comment removed.
    pub clean: &'a str,
    /// The line began inside a string literal.
    pub starts_in_string: bool,
    /// The previous code line was blank.
    pub previous_blank: bool,
    /// How the file is interpreted.
    pub kind: SourceKind,
    /// Effective configuration.
    pub config: &'a Config,
    /// Scope tracking results for this line.
    pub scope: &'a ScopeEvents,
}

/// Context provided for one analyzed file.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path of the file as given.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// How the file is interpreted.
    pub kind: SourceKind,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str) -> Self {
        Self {
            path,
            content,
            kind: SourceKind::from_path(path),
        }
    }

    /// Calculates byte offset for a given line and column.
    ///
    /// # Arguments
    ///
    /// * `line` - 1-indexed line number
    /// * `column` - 1-indexed character column
    ///
    /// # Returns
    ///
    /// Byte offset from the start of the file, or 0 if out of bounds.
    #[must_use]
    pub fn offset_for(&self, line: usize, column: usize) -> usize {
        if line == 0 {
            return 0;
        }

        let mut offset = 0;
        for (i, line_content) in self.content.split('\n').enumerate() {
            if i + 1 == line {
                let within = line_content
                    .char_indices()
                    .nth(column.saturating_sub(1))
                    .map_or(line_content.len(), |(byte, _)| byte);
                return offset + within;
            }
            offset += line_content.len() + 1;
        }

        0
    }
}
