//! Line-indexed view of one source file

use crate::error::{GuardError, GuardResult};
use std::path::Path;

/// One file's source as an ordered sequence of lines
///
/// Each line keeps its terminator (`\n` or `\r\n`), so concatenating the lines
/// reproduces the original text exactly. The last line may have no terminator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// Split text into lines, keeping terminators
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    /// Read a UTF-8 file
    pub fn read(path: &Path) -> GuardResult<Self> {
        std::fs::read_to_string(path)
            .map(|text| Self::from_text(&text))
            .map_err(|e| GuardError::read(path, e))
    }

    /// Number of lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Buffer has no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index`, terminator included
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// All lines in order
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Reassemble the original text
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.concat()
    }
}
