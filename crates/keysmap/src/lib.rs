//! Keysmap: artifact signing trust policy.
//!
//! Maps artifact coordinate patterns to the OpenPGP keys trusted to sign
//! them, and verifies that every subkey of a key ring is bound to a key
//! of the same ring before the subkey is trusted.

pub mod artifact;
pub mod crypto;
pub mod error;
pub mod keyring;
pub mod keys;
pub mod observe;
pub mod pattern;
pub mod policy;
pub mod time;

// Re-export primary types
pub use artifact::{ArtifactCoordinate, ArtifactCoordinateBuilder};
pub use error::{KeysMapError, PolicyError, ResourceError, Result, VerificationError};
pub use policy::{FileLoader, MemoryLoader, PolicyRule, ResourceLoader, TrustPolicy};

// Re-export key types
pub use keys::{Fingerprint, KeyId, KeySpecifier, Sentinel};
pub use pattern::ArtifactPattern;

// Re-export key ring types
pub use keyring::{
    key_id_description, load_verified_ring, master_key, verify_key_ring, KeyRing,
    KeyRingCollection, KeySignature, PublicKey, SignatureKind,
};
pub use observe::{LogObserver, VerificationObserver};
