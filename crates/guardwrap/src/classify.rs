//! Character classification: code, string, escape, comment
//!
//! Every scan in the crate goes through [`Classifier`], so a delimiter or call
//! token inside a string literal or a line comment is never mistaken for code.
//! Quote and escape state carry across lines; comment state does not.

use crate::dialect::{is_ident_char, Dialect};

/// Lexical region a character belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Ordinary code
    Code,
    /// Inside a string literal, delimiting quotes included
    Quoted,
    /// Character made literal by a preceding escape
    Escaped,
    /// Line comment, prefix through end of line
    Comment,
}

/// A classified character: byte offset in its line, the character, its region
pub type Classified = (usize, char, Region);

/// Streaming classifier over consecutive lines
#[derive(Debug, Clone)]
pub struct Classifier<'d> {
    dialect: &'d Dialect,
    in_quote: bool,
    escaped: bool,
}

impl<'d> Classifier<'d> {
    /// Create a classifier starting in code
    #[must_use]
    pub const fn new(dialect: &'d Dialect) -> Self {
        Self {
            dialect,
            in_quote: false,
            escaped: false,
        }
    }

    /// Currently inside a string literal
    #[must_use]
    pub const fn in_quote(&self) -> bool {
        self.in_quote
    }

    /// Classify every character of `line`, advancing the quote and escape state
    pub fn classify_line(&mut self, line: &str) -> Vec<Classified> {
        let mut out = Vec::with_capacity(line.len());

        for (i, c) in line.char_indices() {
            if self.escaped {
                self.escaped = false;
                out.push((i, c, Region::Escaped));
                continue;
            }
            if c == self.dialect.escape {
                self.escaped = true;
                out.push((i, c, self.plain_region()));
                continue;
            }
            if c == self.dialect.quote {
                self.in_quote = !self.in_quote;
                out.push((i, c, Region::Quoted));
                continue;
            }
            if !self.in_quote && line[i..].starts_with(self.dialect.line_comment.as_str()) {
                out.extend(
                    line[i..]
                        .char_indices()
                        .map(|(j, ch)| (i + j, ch, Region::Comment)),
                );
                break;
            }
            out.push((i, c, self.plain_region()));
        }

        out
    }

    const fn plain_region(&self) -> Region {
        if self.in_quote {
            Region::Quoted
        } else {
            Region::Code
        }
    }
}

/// Byte offset of the first call-token invocation in code on `line`
///
/// The token must start on a word boundary and be followed, after optional
/// spaces or tabs, by the opening delimiter. Only the first match counts.
#[must_use]
pub fn find_call(line: &str, dialect: &Dialect) -> Option<usize> {
    let chars = Classifier::new(dialect).classify_line(line);

    chars.iter().enumerate().find_map(|(k, &(offset, c, region))| {
        if region != Region::Code || !is_ident_char(c) {
            return None;
        }
        if k > 0 && is_ident_char(chars[k - 1].1) {
            return None;
        }
        dialect.call_tokens.iter().find_map(|token| {
            if !line[offset..].starts_with(token.as_str()) {
                return None;
            }
            let mut next = k + token.chars().count();
            while chars
                .get(next)
                .is_some_and(|&(_, ch, r)| r == Region::Code && (ch == ' ' || ch == '\t'))
            {
                next += 1;
            }
            chars
                .get(next)
                .is_some_and(|&(_, ch, r)| r == Region::Code && ch == dialect.open_delim)
                .then_some(offset)
        })
    })
}

/// Line has a call-token invocation outside strings and comments
#[must_use]
pub fn has_call(line: &str, dialect: &Dialect) -> bool {
    find_call(line, dialect).is_some()
}
