//! Line grammar of the settings text format
//!
//! ```text
//! # comment
//! :Category:
//! name=value
//! ```
//!
//! Only the first `=` separates name from value, so values may contain `=`.
//! Category and setting names can never contain `:`, `=` or `#`, which keeps
//! every line unambiguous.

pub(crate) const CATEGORY_DELIMITER: char = ':';
pub(crate) const SEPARATOR: char = '=';
pub(crate) const COMMENT: char = '#';

/// One classified line of settings text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// Blank or comment line
    Ignored,
    Category(&'a str),
    Entry { name: &'a str, value: &'a str },
}

/// Classify a single line (without its terminator).
///
/// Returns the reason when the line is malformed.
pub(crate) fn classify(line: &str) -> Result<Line<'_>, &'static str> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if line.trim().is_empty() || line.starts_with(COMMENT) {
        return Ok(Line::Ignored);
    }

    if let Some(rest) = line.strip_prefix(CATEGORY_DELIMITER) {
        return match rest.strip_suffix(CATEGORY_DELIMITER) {
            Some(category) => Ok(Line::Category(category)),
            None => Err("malformed category header"),
        };
    }

    match line.split_once(SEPARATOR) {
        Some((name, value)) => Ok(Line::Entry { name, value }),
        None => Err("missing separator"),
    }
}

/// Iterate `(line_number, line)` pairs, numbering from 1.
pub(crate) fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n').enumerate().map(|(i, line)| (i + 1, line))
}

/// Whether `value` fits on one line and reads back unchanged
pub(crate) fn is_single_line(value: &str) -> bool {
    !value.contains(['\n', '\r'])
}

pub(crate) fn write_comment(out: &mut String, comment: &str) {
    for line in comment.lines() {
        out.push(COMMENT);
        if !line.is_empty() {
            out.push(' ');
            out.push_str(line);
        }
        out.push('\n');
    }
}

pub(crate) fn write_category(out: &mut String, category: &str) {
    out.push(CATEGORY_DELIMITER);
    out.push_str(category);
    out.push(CATEGORY_DELIMITER);
    out.push('\n');
}

/// Write one `name=value` line. `value` must satisfy [`is_single_line`].
pub(crate) fn write_entry(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push(SEPARATOR);
    out.push_str(value);
    out.push('\n');
}
