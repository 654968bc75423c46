//! Key certification: the raw binding signature check.
//!
//! A certification binds a subject key to its signer. The signed message
//! covers the signature kind, both fingerprints and the creation time, so a
//! signature cannot be replayed onto another subkey or reinterpreted as a
//! different kind.

use crate::keyring::{KeySignature, PublicKey, SignatureKind};
use crate::keys::Fingerprint;

use super::keys::Ed25519KeyPair;
use super::signing;

/// Cryptographic verification of one certification signature.
pub trait CertificationVerifier: Send + Sync {
    /// True when `signature` is a valid certification of `subject` by `signer`.
    fn verify_certification(
        &self,
        signature: &KeySignature,
        signer: &PublicKey,
        subject: &PublicKey,
    ) -> bool;
}

/// Ed25519 certifications over 32-byte key material.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Certifier;

impl Ed25519Certifier {
    /// Issue a certification of `subject` by `signer`.
    pub fn certify(
        signer: &Ed25519KeyPair,
        subject: &PublicKey,
        kind: SignatureKind,
    ) -> KeySignature {
        let signer_fingerprint = signer.fingerprint();
        let created_at = crate::time::now_micros();
        let message =
            certification_message(kind, &signer_fingerprint, subject.fingerprint(), created_at);
        let signature = signing::sign(signer.signing_key(), &message);

        KeySignature {
            kind,
            signer: signer_fingerprint.key_id(),
            created_at,
            signature: signature.to_bytes().to_vec(),
        }
    }
}

impl CertificationVerifier for Ed25519Certifier {
    fn verify_certification(
        &self,
        signature: &KeySignature,
        signer: &PublicKey,
        subject: &PublicKey,
    ) -> bool {
        let verifying_key = match Ed25519KeyPair::verifying_key_from_material(signer.material()) {
            Ok(key) => key,
            Err(e) => {
                log::debug!("Unusable signer key {}: {e}", signer.fingerprint());
                return false;
            }
        };
        let sig = match signing::signature_from_bytes(&signature.signature) {
            Ok(sig) => sig,
            Err(e) => {
                log::debug!("Unusable signature from {}: {e}", signature.signer);
                return false;
            }
        };

        let message = certification_message(
            signature.kind,
            signer.fingerprint(),
            subject.fingerprint(),
            signature.created_at,
        );
        signing::verify(&verifying_key, &message, &sig)
    }
}

/// Bytes covered by a certification signature.
pub fn certification_message(
    kind: SignatureKind,
    signer: &Fingerprint,
    subject: &Fingerprint,
    created_at: u64,
) -> Vec<u8> {
    format!(
        "keysmap-cert:{}:{}:{}:{}",
        kind.code(),
        signer.to_hex(),
        subject.to_hex(),
        created_at
    )
    .into_bytes()
}
