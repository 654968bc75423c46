//! Artifact patterns: the left-hand side of a keys map rule.
//!
//! A pattern has the form `group[:artifact[:version[:classifier[:type]]]]`.
//! Every segment is a glob; the version segment may instead be a Maven
//! range such as `[1.0,2.0)`. Omitted trailing segments match anything.

pub mod glob;
pub mod range;
pub mod version;

pub use glob::Glob;
pub use range::VersionRange;
pub use version::MavenVersion;

use std::fmt;

use crate::artifact::ArtifactCoordinate;
use crate::error::PolicyError;

const MAX_SEGMENTS: usize = 5;

/// How the version segment is matched.
#[derive(Debug, Clone)]
pub enum VersionMatcher {
    /// `*`: every version, snapshots included.
    Any,
    Range(VersionRange),
    Glob(Glob),
}

impl VersionMatcher {
    fn compile(segment: &str, pattern: &str) -> Result<Self, PolicyError> {
        if segment == "*" {
            return Ok(VersionMatcher::Any);
        }
        if VersionRange::looks_like_range(segment) {
            return VersionRange::parse(segment).map(VersionMatcher::Range);
        }
        compile_glob(segment, pattern).map(VersionMatcher::Glob)
    }

    pub fn matches(&self, version: &str) -> bool {
        match self {
            VersionMatcher::Any => true,
            VersionMatcher::Range(range) => range.contains_str(version),
            VersionMatcher::Glob(glob) => glob.matches(version),
        }
    }
}

/// A compiled artifact pattern. Matching is pure and never fails.
#[derive(Debug, Clone)]
pub struct ArtifactPattern {
    source: String,
    group: Glob,
    artifact: Glob,
    version: VersionMatcher,
    classifier: Glob,
    kind: Glob,
}

impl ArtifactPattern {
    pub fn compile(pattern: &str) -> Result<Self, PolicyError> {
        let source = pattern.trim();
        if source.is_empty() {
            return Err(malformed(source, "empty pattern"));
        }

        let segments: Vec<&str> = source.split(':').map(str::trim).collect();
        if segments.len() > MAX_SEGMENTS {
            return Err(malformed(
                source,
                &format!("expected at most {MAX_SEGMENTS} segments, found {}", segments.len()),
            ));
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(malformed(source, "empty segment"));
        }

        let segment = |index: usize| -> Result<Glob, PolicyError> {
            match segments.get(index) {
                Some(s) => compile_glob(s, source),
                None => Ok(Glob::any()),
            }
        };

        let version = match segments.get(2) {
            Some(s) => VersionMatcher::compile(s, source)?,
            None => VersionMatcher::Any,
        };

        Ok(Self {
            source: source.to_string(),
            group: segment(0)?,
            artifact: segment(1)?,
            version,
            classifier: segment(3)?,
            kind: segment(4)?,
        })
    }

    pub fn matches(&self, artifact: &ArtifactCoordinate) -> bool {
        self.group.matches(artifact.group())
            && self.artifact.matches(artifact.artifact())
            && self.version.matches(artifact.version())
            && self.classifier.matches_opt(artifact.classifier())
            && self.kind.matches_opt(artifact.kind())
    }

    pub fn version_matcher(&self) -> &VersionMatcher {
        &self.version
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for ArtifactPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn compile_glob(segment: &str, pattern: &str) -> Result<Glob, PolicyError> {
    if segment.chars().any(char::is_whitespace) {
        return Err(malformed(pattern, "whitespace inside segment"));
    }
    Glob::compile(segment)
}

fn malformed(pattern: &str, reason: &str) -> PolicyError {
    PolicyError::MalformedPattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    }
}
