//! Version ranges in Maven syntax.
//!
//! `[1.0,2.0)` includes 1.0 and excludes 2.0, `[1.0,)` is open ended,
//! `[1.5]` pins a single version, and `[1,2),[3,4]` is a union.

use std::cmp::Ordering;
use std::fmt;

use crate::error::PolicyError;

use super::version::MavenVersion;

#[derive(Debug, Clone)]
struct Bound {
    version: MavenVersion,
    inclusive: bool,
}

/// One bracketed restriction of a range.
#[derive(Debug, Clone)]
pub struct Restriction {
    lower: Option<Bound>,
    upper: Option<Bound>,
}

impl Restriction {
    pub fn contains(&self, version: &MavenVersion) -> bool {
        if let Some(lower) = &self.lower {
            match lower.version.cmp(version) {
                Ordering::Greater => return false,
                Ordering::Equal if !lower.inclusive => return false,
                _ => {}
            }
        }
        if let Some(upper) = &self.upper {
            match upper.version.cmp(version) {
                Ordering::Less => return false,
                Ordering::Equal if !upper.inclusive => return false,
                _ => {}
            }
        }
        true
    }

    fn parse(text: &str, range: &str) -> Result<Self, PolicyError> {
        let malformed = |reason: &str| PolicyError::MalformedRange {
            range: range.to_string(),
            reason: reason.to_string(),
        };

        let lower_inclusive = text.starts_with('[');
        let upper_inclusive = text.ends_with(']');
        let body = text[1..text.len() - 1].trim();

        match body.split_once(',') {
            None => {
                if !lower_inclusive || !upper_inclusive {
                    return Err(malformed("single version must be surrounded by []"));
                }
                if body.is_empty() {
                    return Err(malformed("empty version"));
                }
                let version = MavenVersion::parse(body);
                Ok(Self {
                    lower: Some(Bound {
                        version: version.clone(),
                        inclusive: true,
                    }),
                    upper: Some(Bound {
                        version,
                        inclusive: true,
                    }),
                })
            }
            Some((lower, upper)) => {
                let (lower, upper) = (lower.trim(), upper.trim());
                if upper.contains(',') {
                    return Err(malformed("a restriction cannot contain more than 2 versions"));
                }
                if !lower.is_empty() && lower == upper {
                    return Err(malformed("range cannot have identical boundaries"));
                }
                let lower = (!lower.is_empty()).then(|| Bound {
                    version: MavenVersion::parse(lower),
                    inclusive: lower_inclusive,
                });
                let upper = (!upper.is_empty()).then(|| Bound {
                    version: MavenVersion::parse(upper),
                    inclusive: upper_inclusive,
                });
                if let (Some(l), Some(u)) = (&lower, &upper) {
                    if u.version < l.version {
                        return Err(malformed("range defies version ordering"));
                    }
                }
                Ok(Self { lower, upper })
            }
        }
    }
}

/// A union of restrictions, kept in source order.
#[derive(Debug, Clone)]
pub struct VersionRange {
    source: String,
    restrictions: Vec<Restriction>,
}

impl VersionRange {
    /// True when the text is meant as a range rather than a glob.
    pub fn looks_like_range(text: &str) -> bool {
        text.starts_with('[') || text.starts_with('(')
    }

    pub fn parse(text: &str) -> Result<Self, PolicyError> {
        let source = text.trim();
        let malformed = |reason: &str| PolicyError::MalformedRange {
            range: source.to_string(),
            reason: reason.to_string(),
        };

        let mut restrictions: Vec<Restriction> = Vec::new();
        let mut previous_upper: Option<MavenVersion> = None;
        let mut rest = source;

        while VersionRange::looks_like_range(rest) {
            let close = rest
                .find([')', ']'])
                .ok_or_else(|| malformed("unbounded range"))?;
            let restriction = Restriction::parse(&rest[..=close], source)?;

            if let Some(prev) = &previous_upper {
                let overlaps = match &restriction.lower {
                    None => true,
                    Some(lower) => lower.version < *prev,
                };
                if overlaps {
                    return Err(malformed("ranges overlap"));
                }
            } else if !restrictions.is_empty() {
                // previous restriction was open ended
                return Err(malformed("ranges overlap"));
            }

            previous_upper = restriction.upper.as_ref().map(|u| u.version.clone());
            restrictions.push(restriction);

            rest = rest[close + 1..].trim_start();
            if let Some(after) = rest.strip_prefix(',') {
                rest = after.trim_start();
            }
        }

        if !rest.is_empty() || restrictions.is_empty() {
            return Err(malformed("only fully bracketed restrictions are allowed"));
        }

        Ok(Self {
            source: source.to_string(),
            restrictions,
        })
    }

    pub fn contains(&self, version: &MavenVersion) -> bool {
        self.restrictions.iter().any(|r| r.contains(version))
    }

    pub fn contains_str(&self, version: &str) -> bool {
        self.contains(&MavenVersion::parse(version))
    }

    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
