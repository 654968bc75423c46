//! Master key resolution inside a key ring.

use crate::keys::Fingerprint;

use super::ring::{KeyRing, KeySignature, PublicKey, SignatureKind};

/// The ring member that issued `signature` over `subject`.
///
/// A key never counts as the issuer of a signature over itself.
pub fn issuer<'r>(
    signature: &KeySignature,
    subject: &PublicKey,
    ring: &'r KeyRing,
) -> Option<&'r PublicKey> {
    if signature.signer == subject.key_id() {
        return None;
    }
    ring.public_key(signature.signer)
}

/// Return the master key for a subkey.
///
/// `None` when `key` is itself a master key, when it carries no subkey
/// binding signature, or when the binding's signer is not another member
/// of the ring.
pub fn master_key<'r>(key: &PublicKey, ring: &'r KeyRing) -> Option<&'r PublicKey> {
    if key.is_master() {
        return None;
    }
    let binding = key.signatures_of_kind(SignatureKind::SubkeyBinding).next()?;
    issuer(binding, key, ring)
}

/// Fingerprint of the key's master, or of the key itself.
pub fn fingerprint_for_master(key: &PublicKey, ring: &KeyRing) -> Fingerprint {
    *master_key(key, ring).unwrap_or(key).fingerprint()
}

/// Human readable key identity, for messages only.
pub fn key_id_description(key: &PublicKey, ring: &KeyRing) -> String {
    match master_key(key, ring) {
        Some(master) => format!("SubKeyId: {} of {}", key.key_id(), master.fingerprint()),
        None => format!("KeyId: {}", key.fingerprint()),
    }
}

/// User ids of the key together with those of its master, deduplicated.
pub fn user_ids(key: &PublicKey, ring: &KeyRing) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    let master_ids = master_key(key, ring).map(|m| m.user_ids()).unwrap_or_default();
    for id in key.user_ids().iter().chain(master_ids) {
        if !ids.contains(id) {
            ids.push(id.clone());
        }
    }
    ids
}
