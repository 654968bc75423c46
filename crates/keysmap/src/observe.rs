//! Observer for events raised while verifying key rings.
//!
//! Verification reports skipped signatures through an injected observer
//! instead of a process-wide logger. [`LogObserver`] forwards to `log`.

use crate::keyring::{KeySignature, PublicKey, SignatureKind};
use crate::time::micros_to_rfc3339;

/// Receives non-fatal events from ring verification.
pub trait VerificationObserver: Send + Sync {
    /// A signature of the required kind failed cryptographic verification
    /// and was skipped.
    fn invalid_signature(&self, subkey: &PublicKey, signature: &KeySignature);

    /// A subkey was proven bound (or revoked) by at least one signature.
    fn subkey_verified(&self, _subkey: &PublicKey, _kind: SignatureKind) {}
}

/// Forwards verification events to the `log` facade at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl VerificationObserver for LogObserver {
    fn invalid_signature(&self, subkey: &PublicKey, signature: &KeySignature) {
        log::debug!(
            "Invalid signature [{}] type: {} for subKey: {}",
            micros_to_rfc3339(signature.created_at),
            signature.kind,
            subkey.fingerprint()
        );
    }

    fn subkey_verified(&self, subkey: &PublicKey, kind: SignatureKind) {
        log::debug!("Verified signature type: {kind} for subKey: {}", subkey.fingerprint());
    }
}
