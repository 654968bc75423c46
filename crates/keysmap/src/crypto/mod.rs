//! Cryptographic primitives for keysmap.
//!
//! This module provides:
//! - Ed25519 key pairs and raw signing/verification
//! - The certification primitive used to check subkey binding signatures

pub mod certification;
pub mod keys;
pub mod signing;

pub use certification::{certification_message, CertificationVerifier, Ed25519Certifier};
pub use keys::Ed25519KeyPair;
