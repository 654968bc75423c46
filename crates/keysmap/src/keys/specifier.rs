//! Key specifiers: the right-hand side of a keys map rule.
//!
//! A comma-separated list of entries, each one of:
//!   - a fingerprint (160 bits) or key id (64 bits), hex, optional `0x`
//!   - `*`: any key, as long as the signature is valid
//!   - `noSig`: the artifact may be unsigned
//!   - `badSig`: the artifact may carry a signature that fails verification
//!   - `noKey`: the signing key may be unavailable
//!
//! An empty specifier accepts any key.

use std::fmt;

use crate::error::PolicyError;

use super::fingerprint::{strip_hex_prefix, Fingerprint};

const MIN_KEY_BITS: usize = 64;
const MAX_KEY_BITS: usize = 160;

/// Policy exceptions that stand in for a specific key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    NoSig,
    BadSig,
    NoKey,
}

impl Sentinel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentinel::NoSig => "noSig",
            Sentinel::BadSig => "badSig",
            Sentinel::NoKey => "noKey",
        }
    }

    fn parse(token: &str) -> Option<Self> {
        [Sentinel::NoSig, Sentinel::BadSig, Sentinel::NoKey]
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key given by its full fingerprint or a trailing part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBits {
    bytes: Vec<u8>,
}

impl KeyBits {
    fn parse(token: &str) -> Result<Self, PolicyError> {
        let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
        let digits = strip_hex_prefix(&compact);

        let bits = digits.len() * 4;
        if !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&bits) {
            return Err(PolicyError::InvalidKeyLength {
                token: token.to_string(),
                bits,
            });
        }

        let bytes = hex::decode(digits).map_err(|e| PolicyError::InvalidKeyToken {
            token: token.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { bytes })
    }

    pub fn bits(&self) -> usize {
        self.bytes.len() * 8
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// A 64-bit id matches any fingerprint ending in it; a full
    /// fingerprint must be equal.
    pub fn matches(&self, fingerprint: &Fingerprint) -> bool {
        fingerprint.as_bytes().ends_with(&self.bytes)
    }
}

impl fmt::Display for KeyBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode_upper(&self.bytes))
    }
}

/// One entry of a key specifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyEntry {
    Sentinel(Sentinel),
    Wildcard,
    Key(KeyBits),
}

impl KeyEntry {
    pub fn parse(token: &str) -> Result<Self, PolicyError> {
        if token == "*" {
            return Ok(KeyEntry::Wildcard);
        }
        if let Some(sentinel) = Sentinel::parse(token) {
            return Ok(KeyEntry::Sentinel(sentinel));
        }
        KeyBits::parse(token).map(KeyEntry::Key)
    }
}

impl fmt::Display for KeyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEntry::Sentinel(s) => fmt::Display::fmt(s, f),
            KeyEntry::Wildcard => f.write_str("*"),
            KeyEntry::Key(k) => fmt::Display::fmt(k, f),
        }
    }
}

/// The compiled right-hand side of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySpecifier {
    entries: Vec<KeyEntry>,
}

impl KeySpecifier {
    pub fn parse(spec: &str) -> Result<Self, PolicyError> {
        let entries = spec
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(KeyEntry::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[KeyEntry] {
        &self.entries
    }

    /// True for an empty specifier or one containing `*`.
    pub fn is_any_key(&self) -> bool {
        self.entries.is_empty() || self.entries.contains(&KeyEntry::Wildcard)
    }

    pub fn is_sentinel(&self, sentinel: Sentinel) -> bool {
        self.entries.contains(&KeyEntry::Sentinel(sentinel))
    }

    pub fn is_no_signature(&self) -> bool {
        self.is_sentinel(Sentinel::NoSig)
    }

    pub fn is_broken_signature(&self) -> bool {
        self.is_sentinel(Sentinel::BadSig)
    }

    pub fn is_key_missing(&self) -> bool {
        self.is_sentinel(Sentinel::NoKey)
    }

    /// Whether a signature made by this fingerprint is acceptable.
    pub fn accepts(&self, fingerprint: &Fingerprint) -> bool {
        self.is_any_key()
            || self.entries.iter().any(|entry| match entry {
                KeyEntry::Key(key) => key.matches(fingerprint),
                KeyEntry::Sentinel(_) | KeyEntry::Wildcard => false,
            })
    }
}

impl fmt::Display for KeySpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(entry, f)?;
        }
        Ok(())
    }
}
