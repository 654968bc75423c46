//! Verification of the signatures that hold a key ring together.
//!
//! A ring passes only if every subkey carries at least one valid signature
//! of the required kind, issued by a key that is a member of the same ring.
//! The kind is a subkey revocation when the subkey has been revoked and a
//! subkey binding otherwise.

use crate::crypto::{CertificationVerifier, Ed25519Certifier};
use crate::error::VerificationError;
use crate::keys::KeyId;
use crate::observe::{LogObserver, VerificationObserver};

use super::resolve::issuer;
use super::ring::{KeyRing, KeyRingCollection, PublicKey, SignatureKind};

/// Signature kind a subkey must carry to be accepted.
pub fn required_signature_kind(subkey: &PublicKey) -> SignatureKind {
    if subkey.has_revocation() {
        SignatureKind::SubkeyRevocation
    } else {
        SignatureKind::SubkeyBinding
    }
}

/// Verify every subkey of `ring`.
///
/// A signature naming a signer outside the ring, or the subkey itself,
/// aborts verification with [`VerificationError::SignerNotFound`].
/// Signatures that fail the cryptographic check are reported to `observer`
/// and skipped.
pub fn verify_key_ring(
    ring: &KeyRing,
    verifier: &dyn CertificationVerifier,
    observer: &dyn VerificationObserver,
) -> Result<(), VerificationError> {
    for subkey in ring.iter().filter(|k| !k.is_master()) {
        verify_subkey(ring, subkey, verifier, observer)?;
    }
    Ok(())
}

fn verify_subkey(
    ring: &KeyRing,
    subkey: &PublicKey,
    verifier: &dyn CertificationVerifier,
    observer: &dyn VerificationObserver,
) -> Result<(), VerificationError> {
    let kind = required_signature_kind(subkey);

    let verified = subkey
        .signatures_of_kind(kind)
        .try_fold(false, |verified, signature| {
            let signer = issuer(signature, subkey, ring).ok_or_else(|| {
                VerificationError::SignerNotFound {
                    signature_type: kind.to_string(),
                    signer: signature.signer.to_string(),
                    subkey: subkey.key_id().to_string(),
                }
            })?;
            if verifier.verify_certification(signature, signer, subkey) {
                Ok(true)
            } else {
                observer.invalid_signature(subkey, signature);
                Ok(verified)
            }
        })?;

    if !verified {
        return Err(VerificationError::NoValidSignature {
            signature_type: kind.to_string(),
            subkey: subkey.fingerprint().to_string(),
        });
    }
    observer.subkey_verified(subkey, kind);
    Ok(())
}

/// Pick the ring holding `key_id` out of a key server response and verify it.
///
/// `Ok(None)` when no ring contains the key.
pub fn load_verified_ring<'c>(
    collection: &'c KeyRingCollection,
    key_id: KeyId,
    verifier: &dyn CertificationVerifier,
    observer: &dyn VerificationObserver,
) -> Result<Option<&'c KeyRing>, VerificationError> {
    let Some(ring) = collection.ring_for(key_id) else {
        log::debug!("No key ring contains key {key_id}");
        return Ok(None);
    };
    verify_key_ring(ring, verifier, observer)?;
    Ok(Some(ring))
}

impl KeyRing {
    /// Verify with Ed25519 certifications, reporting skips through `log`.
    pub fn verify(&self) -> Result<(), VerificationError> {
        verify_key_ring(self, &Ed25519Certifier, &LogObserver)
    }
}
