//! Public keys, their attached signatures, and key rings.
//!
//! These mirror what an OpenPGP layer exposes after parsing: a ring is a
//! master key followed by subkeys, and every subkey carries the binding
//! (or revocation) signatures issued for it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KeysMapError, Result};
use crate::keys::{Fingerprint, KeyId};

/// Signature types relevant to key binding, with their OpenPGP type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureKind {
    /// User id certification (0x10).
    Certification,
    /// Subkey binding (0x18).
    SubkeyBinding,
    /// Direct key signature (0x1F).
    Direct,
    /// Key revocation (0x20).
    KeyRevocation,
    /// Subkey revocation (0x28).
    SubkeyRevocation,
}

impl SignatureKind {
    pub fn code(&self) -> u8 {
        match self {
            SignatureKind::Certification => 0x10,
            SignatureKind::SubkeyBinding => 0x18,
            SignatureKind::Direct => 0x1F,
            SignatureKind::KeyRevocation => 0x20,
            SignatureKind::SubkeyRevocation => 0x28,
        }
    }
}

impl fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A signature attached to a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySignature {
    pub kind: SignatureKind,
    /// Key id of the claimed issuer.
    pub signer: KeyId,
    /// Creation time (microseconds since epoch).
    pub created_at: u64,
    /// Raw signature bytes.
    #[serde(with = "base64_bytes")]
    pub signature: Vec<u8>,
}

/// A public key (master or subkey) as found in a key ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    fingerprint: Fingerprint,
    #[serde(with = "base64_bytes")]
    material: Vec<u8>,
    #[serde(default)]
    is_master: bool,
    #[serde(default)]
    user_ids: Vec<String>,
    #[serde(default)]
    signatures: Vec<KeySignature>,
}

impl PublicKey {
    pub fn new(fingerprint: Fingerprint, material: Vec<u8>, is_master: bool) -> Self {
        Self {
            fingerprint,
            material,
            is_master,
            user_ids: Vec::new(),
            signatures: Vec::new(),
        }
    }

    /// Build a key whose fingerprint is derived from its material.
    pub fn from_material(material: Vec<u8>, is_master: bool) -> Self {
        Self::new(Fingerprint::from_material(&material), material, is_master)
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_ids.push(user_id.into());
        self
    }

    pub fn with_signature(mut self, signature: KeySignature) -> Self {
        self.signatures.push(signature);
        self
    }

    pub fn add_signature(&mut self, signature: KeySignature) {
        self.signatures.push(signature);
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn key_id(&self) -> KeyId {
        self.fingerprint.key_id()
    }

    pub fn material(&self) -> &[u8] {
        &self.material
    }

    pub fn is_master(&self) -> bool {
        self.is_master
    }

    pub fn user_ids(&self) -> &[String] {
        &self.user_ids
    }

    pub fn signatures(&self) -> &[KeySignature] {
        &self.signatures
    }

    pub fn signatures_of_kind(&self, kind: SignatureKind) -> impl Iterator<Item = &KeySignature> {
        self.signatures.iter().filter(move |s| s.kind == kind)
    }

    /// True when the key carries a revocation signature of its own kind.
    pub fn has_revocation(&self) -> bool {
        let kind = if self.is_master {
            SignatureKind::KeyRevocation
        } else {
            SignatureKind::SubkeyRevocation
        };
        self.signatures_of_kind(kind).next().is_some()
    }
}

/// A master key and its subkeys, in ring order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRing {
    keys: Vec<PublicKey>,
}

impl KeyRing {
    pub fn new(keys: Vec<PublicKey>) -> Self {
        Self { keys }
    }

    pub fn push(&mut self, key: PublicKey) {
        self.keys.push(key);
    }

    pub fn keys(&self) -> &[PublicKey] {
        &self.keys
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PublicKey> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Look up a ring member by key id.
    pub fn public_key(&self, key_id: KeyId) -> Option<&PublicKey> {
        self.keys.iter().find(|k| k.key_id() == key_id)
    }

    pub fn master(&self) -> Option<&PublicKey> {
        self.keys.iter().find(|k| k.is_master())
    }

    pub fn contains(&self, key_id: KeyId) -> bool {
        self.public_key(key_id).is_some()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| KeysMapError::Serialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| KeysMapError::Serialization(e.to_string()))
    }
}

impl<'a> IntoIterator for &'a KeyRing {
    type Item = &'a PublicKey;
    type IntoIter = std::slice::Iter<'a, PublicKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

/// Several key rings, as returned by a key server lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRingCollection {
    rings: Vec<KeyRing>,
}

impl KeyRingCollection {
    pub fn new(rings: Vec<KeyRing>) -> Self {
        Self { rings }
    }

    pub fn rings(&self) -> &[KeyRing] {
        &self.rings
    }

    /// The first ring containing a key with the given id.
    pub fn ring_for(&self, key_id: KeyId) -> Option<&KeyRing> {
        self.rings.iter().find(|r| r.contains(key_id))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| KeysMapError::Serialization(e.to_string()))
    }
}

mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(text)
            .map_err(serde::de::Error::custom)
    }
}
