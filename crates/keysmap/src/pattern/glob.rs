//! Glob segments: `*` matches any run of characters, `?` matches one.

use regex_lite::Regex;

use crate::error::PolicyError;

/// One compiled glob segment of an artifact pattern.
///
/// A bare `*` (or an omitted segment) is kept as [`Glob::any`] so it can also
/// match coordinate fields that are absent altogether.
#[derive(Debug, Clone)]
pub struct Glob {
    source: String,
    regex: Option<Regex>,
}

impl Glob {
    /// A glob matching everything, including absent fields.
    pub fn any() -> Self {
        Self {
            source: "*".to_string(),
            regex: None,
        }
    }

    /// Compile a glob expression into an anchored regular expression.
    pub fn compile(pattern: &str) -> Result<Self, PolicyError> {
        if pattern == "*" {
            return Ok(Self::any());
        }

        let mut expr = String::with_capacity(pattern.len() * 2 + 6);
        expr.push_str("(?s)^");
        for ch in pattern.chars() {
            match ch {
                '*' => expr.push_str(".*"),
                '?' => expr.push('.'),
                c => expr.push_str(&regex_lite::escape(c.encode_utf8(&mut [0u8; 4]))),
            }
        }
        expr.push('$');

        let regex = Regex::new(&expr).map_err(|e| PolicyError::MalformedPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex: Some(regex),
        })
    }

    /// True when this glob accepts every value.
    pub fn is_any(&self) -> bool {
        self.regex.is_none()
    }

    pub fn matches(&self, value: &str) -> bool {
        match &self.regex {
            None => true,
            Some(regex) => regex.is_match(value),
        }
    }

    /// Match an optional coordinate field; absent fields only match `*`.
    pub fn matches_opt(&self, value: Option<&str>) -> bool {
        match value {
            Some(v) => self.matches(v),
            None => self.is_any(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}
