//! Integration test: full end-to-end workflow.
//!
//! Tests the complete lifecycle:
//! 1. Build key rings for two publishers
//! 2. Exchange them as JSON, as a key server response would
//! 3. Pick and verify the ring for a signing subkey
//! 4. Load a keys map naming the publishers' master keys
//! 5. Decide whether each artifact's signing key is trusted

use keysmap::crypto::{Ed25519Certifier, Ed25519KeyPair};
use keysmap::keyring::{fingerprint_for_master, user_ids};
use keysmap::{
    load_verified_ring, ArtifactCoordinate, KeyRing, KeyRingCollection, LogObserver,
    MemoryLoader, PublicKey, SignatureKind, TrustPolicy, VerificationError,
};

struct Publisher {
    master: Ed25519KeyPair,
    signing: Ed25519KeyPair,
    ring: KeyRing,
}

impl Publisher {
    fn new(uid: &str) -> Self {
        let master = Ed25519KeyPair::generate();
        let signing = Ed25519KeyPair::generate();
        let master_key = master.public_key(true).with_user_id(uid);
        let mut sub = signing.public_key(false);
        sub.add_signature(Ed25519Certifier::certify(
            &master,
            &sub,
            SignatureKind::SubkeyBinding,
        ));
        let ring = KeyRing::new(vec![master_key, sub]);
        Self {
            master,
            signing,
            ring,
        }
    }

    fn signing_key(&self) -> &PublicKey {
        &self.ring.keys()[1]
    }
}

#[test]
fn full_workflow_ring_to_authorization() {
    // ── Step 1: Build key rings ─────────────────────────────────────────
    let apache = Publisher::new("Release Manager <rm@apache.example>");
    let junit = Publisher::new("JUnit Team <team@junit.example>");

    // ── Step 2: Round-trip through JSON ─────────────────────────────────
    let collection = KeyRingCollection::new(vec![apache.ring.clone(), junit.ring.clone()]);
    let json = serde_json::to_string(&collection).unwrap();
    let collection = KeyRingCollection::from_json(&json).unwrap();
    assert_eq!(collection.rings().len(), 2);

    // ── Step 3: Pick and verify the ring of the junit signing key ───────
    let signing_id = junit.signing.fingerprint().key_id();
    let ring = load_verified_ring(&collection, signing_id, &Ed25519Certifier, &LogObserver)
        .expect("ring should verify")
        .expect("ring should be found");
    let signing_key = ring.public_key(signing_id).unwrap();
    assert_eq!(signing_key, junit.signing_key());
    assert_eq!(
        fingerprint_for_master(signing_key, ring),
        junit.master.fingerprint()
    );
    assert_eq!(user_ids(signing_key, ring), vec!["JUnit Team <team@junit.example>"]);

    // ── Step 4: Load a keys map ─────────────────────────────────────────
    let keys_map = format!(
        "# trusted publishers\n\
         org.apache.* = {apache}\n\
         junit:junit:[4.0,5.0) = {junit}\n\
         org.legacy:* = noSig\n",
        apache = apache.master.fingerprint(),
        junit = junit.master.fingerprint().key_id(),
    );
    let loader = MemoryLoader::new().with_source("keysmap.list", keys_map);
    let policy = TrustPolicy::load(&loader, Some("keysmap.list")).unwrap();
    assert_eq!(policy.len(), 3);

    // ── Step 5: Decide trust ────────────────────────────────────────────
    let junit_412 = ArtifactCoordinate::new("junit", "junit", "4.12");
    let junit_5 = ArtifactCoordinate::new("junit", "junit", "5.0");
    let commons = ArtifactCoordinate::new("org.apache.commons", "commons-lang3", "3.12.0");
    let legacy = ArtifactCoordinate::new("org.legacy", "old", "0.1");

    assert!(policy.is_valid_key(&junit_412, signing_key, Some(ring)));
    assert!(!policy.is_valid_key(&junit_412, signing_key, None));
    assert!(!policy.is_valid_key(&junit_5, signing_key, Some(ring)));
    assert!(!policy.is_valid_key(&commons, signing_key, Some(ring)));
    assert!(policy.is_valid_key(&commons, apache.signing_key(), Some(&apache.ring)));

    assert!(policy.requires_key(&junit_412));
    assert!(!policy.has_any_rule_for(&junit_5));
    assert!(policy.permits_no_signature(&legacy));
    assert!(!policy.requires_key(&legacy));
}

#[test]
fn tampered_ring_is_rejected() {
    let publisher = Publisher::new("Someone <someone@example.org>");
    let attacker = Ed25519KeyPair::generate();

    // the attacker binds their own subkey with their own master, which is not in the ring
    let mut smuggled = attacker.public_key(false);
    smuggled.add_signature(Ed25519Certifier::certify(
        &attacker,
        &smuggled,
        SignatureKind::SubkeyBinding,
    ));
    let mut ring = publisher.ring.clone();
    ring.push(smuggled);

    match ring.verify() {
        Err(VerificationError::SignerNotFound { signer, .. }) => {
            assert_eq!(signer, attacker.fingerprint().key_id().to_string());
        }
        other => panic!("expected SignerNotFound, got {other:?}"),
    }

    // forging a binding under the real master's key id does not verify either
    let mut forged = attacker.public_key(false);
    let mut signature = Ed25519Certifier::certify(&attacker, &forged, SignatureKind::SubkeyBinding);
    signature.signer = publisher.master.fingerprint().key_id();
    forged.add_signature(signature);
    let mut ring = publisher.ring.clone();
    ring.push(forged);

    assert!(matches!(
        ring.verify(),
        Err(VerificationError::NoValidSignature { .. })
    ));
}

#[test]
fn empty_keys_map_trusts_any_verified_key() {
    let publisher = Publisher::new("Anyone <anyone@example.org>");
    let policy = TrustPolicy::load(&MemoryLoader::new(), None).unwrap();
    let artifact = ArtifactCoordinate::new("com.example", "anything", "1.0");

    assert!(publisher.ring.verify().is_ok());
    assert!(policy.is_valid_key(&artifact, publisher.signing_key(), Some(&publisher.ring)));
    assert!(policy.is_key_authorized(&artifact, &publisher.signing.fingerprint()));
    assert!(!policy.has_any_rule_for(&artifact));
}
