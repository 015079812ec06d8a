//! Indentation and line-terminator helpers

/// Width in bytes of a line's leading whitespace
///
/// Line terminators are not counted, so a blank line has the width of its
/// spaces and tabs only.
#[must_use]
pub fn indent_width(line: &str) -> usize {
    line.char_indices()
        .find(|&(_, c)| !c.is_whitespace() || c == '\n' || c == '\r')
        .map_or(line.len(), |(i, _)| i)
}

/// Leading whitespace of a line, exactly as written
#[must_use]
pub fn indent_of(line: &str) -> &str {
    &line[..indent_width(line)]
}

/// Terminator a line ends with: `"\r\n"`, `"\n"`, or `""` for a final line
#[must_use]
pub fn line_ending(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_width() {
        assert_eq!(indent_width("print(1)\n"), 0);
        assert_eq!(indent_width("    print(1)\n"), 4);
        assert_eq!(indent_width("\t\tprint(1)\n"), 2);
        assert_eq!(indent_width("   \n"), 3);
        assert_eq!(indent_width(""), 0);
    }

    #[test]
    fn test_indent_of_keeps_tabs() {
        assert_eq!(indent_of("\t  print(1)\n"), "\t  ");
    }

    #[test]
    fn test_line_ending() {
        assert_eq!(line_ending("a\r\n"), "\r\n");
        assert_eq!(line_ending("a\n"), "\n");
        assert_eq!(line_ending("a"), "");
    }
}
