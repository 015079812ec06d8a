//! Host-language conventions
//!
//! A [`Dialect`] names everything the scanner needs to know about the language
//! being rewritten: the guard markers, which calls to wrap, which lines start a
//! new declaration, and the lexical characters for strings and nesting.
//! Defaults describe Swift with `#if DEBUG` / `#endif` guards.
//!
//! ## Example dialect file
//!
//! ```yaml
//! open_marker: "#if DEBUG"
//! close_marker: "#endif"
//! call_tokens: [print, debugPrint, dump]
//! window: 10
//! ```

use crate::error::{GuardError, GuardResult};
use serde::{Deserialize, Serialize};

/// Lines scanned backward (and forward) when looking for an enclosing guard
pub const DEFAULT_WINDOW: usize = 10;

/// Upper bound on a configured window
pub const MAX_WINDOW: usize = 100;

/// Conventions of the language being rewritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    /// Guard-open directive, e.g. `#if DEBUG`
    pub open_marker: String,
    /// Guard-close directive, e.g. `#endif`
    pub close_marker: String,
    /// Call names whose statements get wrapped
    pub call_tokens: Vec<String>,
    /// Keywords that start a declaration boundary
    pub declaration_keywords: Vec<String>,
    /// Modifiers allowed before a declaration keyword
    pub declaration_modifiers: Vec<String>,
    /// Line-comment prefix
    pub line_comment: String,
    /// String delimiter
    pub quote: char,
    /// Escape character
    pub escape: char,
    /// Opening nesting delimiter
    pub open_delim: char,
    /// Closing nesting delimiter
    pub close_delim: char,
    /// Bounded-window size for guard lookback and lookahead
    pub window: usize,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::swift()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Dialect {
    /// Swift with `#if DEBUG` guards around `print(...)`
    #[must_use]
    pub fn swift() -> Self {
        Self {
            open_marker: "#if DEBUG".to_string(),
            close_marker: "#endif".to_string(),
            call_tokens: strings(&["print"]),
            declaration_keywords: strings(&[
                "func",
                "var",
                "let",
                "class",
                "struct",
                "enum",
                "protocol",
                "extension",
                "init",
                "actor",
            ]),
            declaration_modifiers: strings(&[
                "public",
                "private",
                "fileprivate",
                "internal",
                "open",
                "static",
                "final",
                "override",
                "mutating",
                "nonmutating",
                "lazy",
                "weak",
                "unowned",
                "convenience",
                "required",
                "nonisolated",
            ]),
            line_comment: "//".to_string(),
            quote: '"',
            escape: '\\',
            open_delim: '(',
            close_delim: ')',
            window: DEFAULT_WINDOW,
        }
    }

    /// Set the call tokens
    #[must_use]
    pub fn with_call_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.call_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Set the window size
    #[must_use]
    pub const fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Check the dialect is usable by the scanner
    pub fn validate(&self) -> GuardResult<()> {
        if self.open_marker.trim().is_empty() || self.close_marker.trim().is_empty() {
            return Err(GuardError::invalid_dialect("guard markers must not be empty"));
        }
        if self.open_marker.trim() == self.close_marker.trim() {
            return Err(GuardError::invalid_dialect(
                "open and close markers must differ",
            ));
        }
        if self.call_tokens.is_empty() {
            return Err(GuardError::invalid_dialect("at least one call token is required"));
        }
        if let Some(bad) = self.call_tokens.iter().find(|t| !is_identifier(t)) {
            return Err(GuardError::invalid_dialect(format!(
                "call token '{bad}' is not an identifier"
            )));
        }
        if self.line_comment.is_empty() {
            return Err(GuardError::invalid_dialect("line comment prefix must not be empty"));
        }
        let lexical = [self.quote, self.escape, self.open_delim, self.close_delim];
        for (i, a) in lexical.iter().enumerate() {
            if lexical[i + 1..].contains(a) {
                return Err(GuardError::invalid_dialect(format!(
                    "character '{a}' is used for more than one role"
                )));
            }
        }
        if self.window == 0 || self.window > MAX_WINDOW {
            return Err(GuardError::invalid_dialect(format!(
                "window must be between 1 and {MAX_WINDOW}, got {}",
                self.window
            )));
        }
        Ok(())
    }

    /// Line is a guard-open directive
    #[must_use]
    pub fn is_guard_open(&self, line: &str) -> bool {
        directive_matches(line, &self.open_marker)
    }

    /// Line is a guard-close directive
    #[must_use]
    pub fn is_guard_close(&self, line: &str) -> bool {
        directive_matches(line, &self.close_marker)
    }

    /// Line introduces a function, type, or variable declaration
    ///
    /// Leading attributes (`@MainActor`) and modifiers (`private(set)`,
    /// `static`) are skipped before the keyword is checked.
    #[must_use]
    pub fn is_declaration(&self, line: &str) -> bool {
        for word in line.split_whitespace() {
            if word.starts_with('@') {
                continue;
            }
            let bare = word.split('(').next().unwrap_or(word);
            if self.declaration_modifiers.iter().any(|m| m == bare) {
                continue;
            }
            return self.declaration_keywords.iter().any(|k| k == word);
        }
        false
    }
}

/// Identifier character for word-boundary checks
#[must_use]
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_') && chars.all(is_ident_char)
}

fn directive_matches(line: &str, marker: &str) -> bool {
    line.trim_start()
        .strip_prefix(marker.trim())
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}
