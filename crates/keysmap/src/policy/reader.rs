//! Splits keys map text into logical lines.
//!
//! Each raw line is trimmed and cut at the first unescaped `#`; `\#` stands
//! for a literal `#`. Blank lines are dropped. A line ending in `\` is
//! joined with the next non-blank line, the backslash becoming one space.

use std::str::Lines;

/// Iterator over the logical lines of a keys map source.
pub struct LogicalLines<'a> {
    raw: Lines<'a>,
}

impl<'a> LogicalLines<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { raw: source.lines() }
    }

    fn next_non_blank(&mut self) -> Option<String> {
        self.raw
            .by_ref()
            .map(strip_comment)
            .find(|line| !line.is_empty())
    }
}

impl Iterator for LogicalLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut logical = String::new();
        while let Some(line) = self.next_non_blank() {
            match line.strip_suffix('\\') {
                Some(head) => {
                    logical.push_str(head);
                    logical.push(' ');
                }
                None => {
                    logical.push_str(&line);
                    break;
                }
            }
        }
        let logical = logical.trim();
        (!logical.is_empty()).then(|| logical.to_string())
    }
}

/// Trim a raw line and drop everything from the first unescaped `#`.
pub fn strip_comment(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.trim().chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'#') => {
                chars.next();
                out.push('#');
            }
            '#' => break,
            _ => out.push(c),
        }
    }
    out.trim().to_string()
}

/// Decode ISO-8859-1 bytes. Every byte maps to the code point of equal value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
