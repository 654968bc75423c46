//! Integration test: keys maps loaded from disk through `FileLoader`.

use std::path::{Path, PathBuf};

use keysmap::{
    ArtifactCoordinate, FileLoader, Fingerprint, KeysMapError, PolicyError, ResourceError,
    TrustPolicy,
};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../tests/fixtures")
}

fn key(id: u64) -> Fingerprint {
    let mut bytes = [0u8; 20];
    bytes[12..].copy_from_slice(&id.to_be_bytes());
    Fingerprint::from_bytes(bytes)
}

fn load_fixture(name: &str) -> keysmap::Result<TrustPolicy> {
    TrustPolicy::load(&FileLoader::with_base_dir(fixtures()), Some(name))
}

#[test]
fn fixture_loads_every_rule() {
    let policy = load_fixture("keysmap.list").unwrap();
    assert_eq!(policy.len(), 14);
    assert_eq!(policy.rules()[0].pattern().as_str(), "junit:junit:4.12");
    assert_eq!(
        policy.rules()[13].pattern().as_str(),
        "org.hash:with#hash",
        "escaped hash must survive comment stripping"
    );
}

#[test]
fn fixture_answers_match_expectations() {
    let policy = load_fixture("keysmap.list").unwrap();

    let junit = ArtifactCoordinate::new("junit", "junit", "4.12");
    assert!(policy.is_key_authorized(&junit, &key(0x123456789abcdef0)));
    assert!(policy.is_key_authorized(&junit, &key(0x123456789abcdeff)));
    assert!(!policy.is_key_authorized(
        &ArtifactCoordinate::new("junit", "junit", "4.11"),
        &key(0x123456789abcdef0)
    ));

    let old = ArtifactCoordinate::new("org.ranged", "lib", "1.9.9");
    let new = ArtifactCoordinate::new("org.ranged", "lib", "2.0");
    assert!(policy.is_key_authorized(&old, &key(0x1111111111111111)));
    assert!(!policy.is_key_authorized(&old, &key(0x2222222222222222)));
    assert!(policy.is_key_authorized(&new, &key(0x2222222222222222)));
    assert!(!policy.has_any_rule_for(&ArtifactCoordinate::new("org.ranged", "lib", "0.9")));

    assert!(policy.permits_broken_signature(&ArtifactCoordinate::new("badSig", "x", "1")));
    assert!(policy.permits_missing_key(&ArtifactCoordinate::new("noKey", "x", "1")));
    assert!(!policy.requires_key(&ArtifactCoordinate::new("noSig", "test2", "1")));
}

#[test]
fn short_key_fixture_fails() {
    let err = load_fixture("keysmap-short-key.list").unwrap_err();
    assert!(matches!(
        err,
        KeysMapError::Policy(PolicyError::InvalidKeyLength { bits: 8, .. })
    ));
}

#[test]
fn file_prefix_and_absolute_paths() {
    let absolute = fixtures().join("keysmap.list");
    let locator = format!("file:{}", absolute.display());
    let policy = TrustPolicy::load(&FileLoader::new(), Some(&locator)).unwrap();
    assert_eq!(policy.len(), 14);
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = TrustPolicy::load(&FileLoader::with_base_dir(dir.path()), Some("nope.list"))
        .unwrap_err();
    assert!(matches!(
        err,
        KeysMapError::Resource(ResourceError::NotFound(ref l)) if l == "nope.list"
    ));
}

#[test]
fn latin1_file_with_continuations() {
    let dir = tempfile::tempdir().unwrap();
    let mut content = b"# \xe9diteur\r\norg.\xe9diteur:lib = \\\r\n  0x1234567890ABCDEF, \\\r\n\r\n  noKey\r\n".to_vec();
    content.extend_from_slice(b"org.other = *\n");
    std::fs::write(dir.path().join("latin1.list"), content).unwrap();

    let policy = TrustPolicy::load(&FileLoader::with_base_dir(dir.path()), Some("latin1.list"))
        .unwrap();
    assert_eq!(policy.len(), 2);

    let artifact = ArtifactCoordinate::new("org.\u{e9}diteur", "lib", "1.0");
    assert!(policy.is_key_authorized(&artifact, &key(0x1234567890ABCDEF)));
    assert!(policy.permits_missing_key(&artifact));
    assert!(policy.is_key_authorized(
        &ArtifactCoordinate::new("org.other", "any", "1"),
        &key(42)
    ));
}

#[test]
fn directory_instead_of_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub.list")).unwrap();
    let result = TrustPolicy::load(&FileLoader::with_base_dir(dir.path()), Some("sub.list"));
    assert!(matches!(
        result,
        Err(KeysMapError::Resource(ResourceError::Io { .. }))
    ));
}
