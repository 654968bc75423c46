//! Key rings as handed over by an OpenPGP layer.
//!
//! This module provides:
//! - Ring data: public keys, their signatures, rings and ring collections
//! - Master key resolution and presentational key descriptions
//! - Verification that every subkey is bound inside its own ring

pub mod resolve;
pub mod ring;
pub mod verify;

pub use resolve::{fingerprint_for_master, issuer, key_id_description, master_key, user_ids};
pub use ring::{KeyRing, KeyRingCollection, KeySignature, PublicKey, SignatureKind};
pub use verify::{load_verified_ring, required_signature_kind, verify_key_ring};
