//! Ed25519 signing and verification over raw messages.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use crate::error::{Result, VerificationError};

/// Sign a message with an Ed25519 signing key.
pub fn sign(signing_key: &SigningKey, message: &[u8]) -> Signature {
    signing_key.sign(message)
}

/// Verify an Ed25519 signature against a public key and message.
pub fn verify(verifying_key: &VerifyingKey, message: &[u8], signature: &Signature) -> bool {
    verifying_key.verify(message, signature).is_ok()
}

/// Decode raw signature bytes.
pub fn signature_from_bytes(bytes: &[u8]) -> Result<Signature> {
    let array: [u8; 64] = bytes.try_into().map_err(|_| {
        VerificationError::InvalidKeyMaterial(format!(
            "signature must be 64 bytes, got {}",
            bytes.len()
        ))
    })?;
    Ok(Signature::from_bytes(&array))
}
