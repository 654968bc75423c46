//! Key identification and key acceptance rules.

pub mod fingerprint;
pub mod specifier;

pub use fingerprint::{Fingerprint, KeyId, FINGERPRINT_LEN};
pub use specifier::{KeyBits, KeyEntry, KeySpecifier, Sentinel};
