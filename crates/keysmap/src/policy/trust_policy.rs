//! The keys map: an ordered table of rules mapping artifact patterns to the
//! keys trusted to sign them.
//!
//! Two matching modes are used over the same table. Governance questions
//! ([`TrustPolicy::first_match`], [`TrustPolicy::requires_key`]) look only
//! at the first rule in file order that matches an artifact. Sentinel and
//! key authorization questions consider every matching rule.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use crate::artifact::ArtifactCoordinate;
use crate::error::{PolicyError, ResourceError, Result};
use crate::keyring::{master_key, KeyRing, PublicKey};
use crate::keys::Fingerprint;

use super::loader::ResourceLoader;
use super::reader::{decode_latin1, LogicalLines};
use super::rule::PolicyRule;

/// Logged whenever a loaded keys map holds no rules.
pub const EMPTY_POLICY_WARNING: &str = "No keys map specified or the keys map contains no \
entries. Only signatures will be checked: file corruption is detected, but valid signatures \
of any public key will be accepted.";

/// Immutable after construction; safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct TrustPolicy {
    rules: Vec<PolicyRule>,
}

impl TrustPolicy {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rules(rules: Vec<PolicyRule>) -> Self {
        Self { rules }
    }

    /// Compile keys map text. Any malformed rule fails the whole load.
    pub fn parse(source: &str) -> std::result::Result<Self, PolicyError> {
        let rules = LogicalLines::new(source)
            .map(|line| PolicyRule::parse(&line))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Read and compile an ISO-8859-1 encoded keys map.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::parse(&decode_latin1(&bytes))?)
    }

    /// Load the keys map named by `locator`.
    ///
    /// A missing or blank locator yields an empty policy without touching
    /// the loader. An empty result is reported at warn level.
    pub fn load(loader: &dyn ResourceLoader, locator: Option<&str>) -> Result<Self> {
        let policy = match locator.map(str::trim).filter(|l| !l.is_empty()) {
            Some(locator) => {
                let mut reader = loader.open(locator)?;
                let mut bytes = Vec::new();
                reader
                    .read_to_end(&mut bytes)
                    .map_err(|source| ResourceError::Io {
                        locator: locator.to_string(),
                        source,
                    })?;
                let policy = Self::parse(&decode_latin1(&bytes))?;
                log::debug!("Loaded {} keys map rules from {locator}", policy.len());
                policy
            }
            None => Self::empty(),
        };

        if policy.is_empty() {
            log::warn!("{EMPTY_POLICY_WARNING}");
        }
        Ok(policy)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn rules(&self) -> &[PolicyRule] {
        &self.rules
    }

    /// The first rule, in file order, whose pattern matches.
    pub fn first_match(&self, artifact: &ArtifactCoordinate) -> Option<&PolicyRule> {
        self.rules.iter().find(|rule| rule.matches(artifact))
    }

    /// Every rule whose pattern matches, in file order.
    pub fn matching_rules<'p>(
        &'p self,
        artifact: &'p ArtifactCoordinate,
    ) -> impl Iterator<Item = &'p PolicyRule> + 'p {
        self.rules.iter().filter(move |rule| rule.matches(artifact))
    }

    /// Any matching rule allows the artifact to be unsigned.
    pub fn permits_no_signature(&self, artifact: &ArtifactCoordinate) -> bool {
        self.matching_rules(artifact)
            .any(|rule| rule.keys().is_no_signature())
    }

    /// Any matching rule allows a signature that fails verification.
    pub fn permits_broken_signature(&self, artifact: &ArtifactCoordinate) -> bool {
        self.matching_rules(artifact)
            .any(|rule| rule.keys().is_broken_signature())
    }

    /// Any matching rule allows the signing key to be unavailable.
    pub fn permits_missing_key(&self, artifact: &ArtifactCoordinate) -> bool {
        self.matching_rules(artifact)
            .any(|rule| rule.keys().is_key_missing())
    }

    /// Whether the artifact is governed by the keys map at all.
    pub fn has_any_rule_for(&self, artifact: &ArtifactCoordinate) -> bool {
        self.first_match(artifact).is_some()
    }

    /// True when the first matching rule exists and does not allow the
    /// artifact to be unsigned. Later rules never override it.
    #[doc(alias = "is_with_key")]
    pub fn requires_key(&self, artifact: &ArtifactCoordinate) -> bool {
        self.first_match(artifact)
            .is_some_and(|rule| !rule.keys().is_no_signature())
    }

    /// Whether a signature by `fingerprint` is trusted for the artifact.
    ///
    /// Always true for an empty policy.
    pub fn is_key_authorized(&self, artifact: &ArtifactCoordinate, fingerprint: &Fingerprint) -> bool {
        self.is_empty()
            || self
                .matching_rules(artifact)
                .any(|rule| rule.accepts(fingerprint))
    }

    /// Like [`is_key_authorized`](Self::is_key_authorized) for a ring
    /// member: a subkey is also trusted when its master key is listed.
    pub fn is_valid_key(
        &self,
        artifact: &ArtifactCoordinate,
        key: &PublicKey,
        ring: Option<&KeyRing>,
    ) -> bool {
        if self.is_empty() {
            return true;
        }
        let master = ring.and_then(|ring| master_key(key, ring));
        self.matching_rules(artifact).any(|rule| {
            rule.accepts(key.fingerprint())
                || master.is_some_and(|m| rule.accepts(m.fingerprint()))
        })
    }
}

impl FromStr for TrustPolicy {
    type Err = PolicyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TrustPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}
