//! One `pattern = keys` rule of a keys map.

use std::fmt;

use crate::artifact::ArtifactCoordinate;
use crate::error::PolicyError;
use crate::keys::{Fingerprint, KeySpecifier};
use crate::pattern::ArtifactPattern;

#[derive(Debug, Clone)]
pub struct PolicyRule {
    pattern: ArtifactPattern,
    keys: KeySpecifier,
}

impl PolicyRule {
    pub fn new(pattern: ArtifactPattern, keys: KeySpecifier) -> Self {
        Self { pattern, keys }
    }

    /// Parse a logical line. The text after the first `=` is the key
    /// specifier; without `=` the rule accepts any key.
    pub fn parse(line: &str) -> Result<Self, PolicyError> {
        let (pattern, keys) = line.split_once('=').unwrap_or((line, ""));
        Ok(Self {
            pattern: ArtifactPattern::compile(pattern.trim())?,
            keys: KeySpecifier::parse(keys.trim())?,
        })
    }

    pub fn pattern(&self) -> &ArtifactPattern {
        &self.pattern
    }

    pub fn keys(&self) -> &KeySpecifier {
        &self.keys
    }

    pub fn matches(&self, artifact: &ArtifactCoordinate) -> bool {
        self.pattern.matches(artifact)
    }

    pub fn accepts(&self, fingerprint: &Fingerprint) -> bool {
        self.keys.accepts(fingerprint)
    }
}

/// Writes the rule as a keys map line, escaping `#` so it reloads unchanged.
impl fmt::Display for PolicyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pattern = self.pattern.as_str().replace('#', "\\#");
        if self.keys.entries().is_empty() {
            f.write_str(&pattern)
        } else {
            write!(f, "{pattern} = {}", self.keys)
        }
    }
}
