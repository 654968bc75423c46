//! Stress test: verification of rings with many subkeys.

use std::time::Instant;

use keysmap::crypto::{Ed25519Certifier, Ed25519KeyPair};
use keysmap::keyring::{key_id_description, master_key};
use keysmap::{KeyRing, KeySignature, SignatureKind, VerificationError};

fn ring_with_subkeys(n: usize) -> (Ed25519KeyPair, KeyRing) {
    let master = Ed25519KeyPair::generate();
    let mut ring = KeyRing::new(vec![master.public_key(true)]);
    for _ in 0..n {
        let mut sub = Ed25519KeyPair::generate().public_key(false);
        sub.add_signature(Ed25519Certifier::certify(
            &master,
            &sub,
            SignatureKind::SubkeyBinding,
        ));
        ring.push(sub);
    }
    (master, ring)
}

#[test]
fn stress_ring_with_200_subkeys() {
    let (master, ring) = ring_with_subkeys(200);

    let start = Instant::now();
    ring.verify().expect("every subkey is bound");
    let elapsed = start.elapsed();
    assert!(elapsed.as_secs() < 10, "verification took {elapsed:?}");

    for key in ring.iter().skip(1) {
        assert_eq!(master_key(key, &ring).unwrap().fingerprint(), &master.fingerprint());
        assert!(key_id_description(key, &ring).starts_with("SubKeyId: 0x"));
    }
}

#[test]
fn stress_last_subkey_unbound_fails_whole_ring() {
    let (_, mut ring) = ring_with_subkeys(100);
    ring.push(Ed25519KeyPair::generate().public_key(false));
    assert!(matches!(
        ring.verify(),
        Err(VerificationError::NoValidSignature { .. })
    ));
}

#[test]
fn stress_many_invalid_signatures_before_a_valid_one() {
    let master = Ed25519KeyPair::generate();
    let mut sub = Ed25519KeyPair::generate().public_key(false);
    for i in 0..500u64 {
        sub.add_signature(KeySignature {
            kind: SignatureKind::SubkeyBinding,
            signer: master.fingerprint().key_id(),
            created_at: i,
            signature: vec![(i % 251) as u8; 64],
        });
    }
    sub.add_signature(Ed25519Certifier::certify(
        &master,
        &sub,
        SignatureKind::SubkeyBinding,
    ));
    let ring = KeyRing::new(vec![master.public_key(true), sub]);
    assert!(ring.verify().is_ok());
}
