//! Comment stripping and line classification.
//!
//! This is a pure pre-pass: the section parser only ever sees lines with
//! comments removed and whitespace trimmed.

use std::borrow::Cow;

/// A raw line after comment stripping, classified by indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Nothing left after removing comments and whitespace.
    Blank,
    /// Unindented content, expected to be a section header.
    Header(Cow<'a, str>),
    /// Indented content, expected to be a `key: value` entry.
    Entry(Cow<'a, str>),
}

/// Remove everything from the first unescaped `#` onwards.
///
/// `\#` is an escaped literal `#`; the backslash is dropped from the result.
pub fn strip_comment(raw: &str) -> Cow<'_, str> {
    let bytes = raw.as_bytes();
    let mut cut = raw.len();
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if b == b'#' {
            if i > 0 && bytes[i - 1] == b'\\' {
                escaped = true;
                continue;
            }
            cut = i;
            break;
        }
    }

    let content = &raw[..cut];
    if escaped {
        Cow::Owned(content.replace("\\#", "#"))
    } else {
        Cow::Borrowed(content)
    }
}

/// Strip comments, trim, and classify a single raw line.
pub fn normalize_line(raw: &str) -> LineKind<'_> {
    let indented = raw.starts_with([' ', '\t']);

    let text = match strip_comment(raw) {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
        Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
    };

    if text.is_empty() {
        LineKind::Blank
    } else if indented {
        LineKind::Entry(text)
    } else {
        LineKind::Header(text)
    }
}
