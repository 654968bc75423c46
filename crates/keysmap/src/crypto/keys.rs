//! Ed25519 key pairs for issuing binding signatures.

use ed25519_dalek::{SigningKey, VerifyingKey};

use crate::error::{KeysMapError, Result, VerificationError};
use crate::keyring::PublicKey;
use crate::keys::Fingerprint;

/// An Ed25519 key pair.
///
/// The secret half is wiped on drop by `SigningKey` itself.
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl Ed25519KeyPair {
    /// Generate a new random Ed25519 key pair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Reconstruct a key pair from raw signing key bytes.
    pub fn from_signing_key_bytes(bytes: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(bytes);
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Reconstruct a verifying key from raw key material.
    pub fn verifying_key_from_material(material: &[u8]) -> Result<VerifyingKey> {
        let bytes: [u8; 32] = material.try_into().map_err(|_| {
            VerificationError::InvalidKeyMaterial(format!(
                "ed25519 key must be 32 bytes, got {}",
                material.len()
            ))
        })?;
        VerifyingKey::from_bytes(&bytes).map_err(|e| {
            KeysMapError::from(VerificationError::InvalidKeyMaterial(format!(
                "invalid verifying key: {e}"
            )))
        })
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    pub fn verifying_key_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::from_material(&self.verifying_key_bytes())
    }

    /// The public half as a ring member.
    pub fn public_key(&self, is_master: bool) -> PublicKey {
        PublicKey::from_material(self.verifying_key_bytes().to_vec(), is_master)
    }
}
