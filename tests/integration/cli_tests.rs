//! Integration tests for the CLI binary.
//!
//! This test is registered as a [[test]] in the keysmap-cli crate
//! so that CARGO_BIN_EXE_keysmap is available.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use keysmap::crypto::{Ed25519Certifier, Ed25519KeyPair};
use keysmap::{KeyRing, SignatureKind};

fn keysmap_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_keysmap"))
}

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../tests/fixtures")
}

fn run(args: &[&str]) -> Output {
    keysmap_binary()
        .arg("--base-dir")
        .arg(fixtures())
        .args(args)
        .output()
        .expect("failed to execute keysmap")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn cli_responds_to_help() {
    let output = keysmap_binary()
        .arg("--help")
        .output()
        .expect("failed to execute keysmap --help");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Usage"), "got: {out}");
    assert!(out.contains("verify-ring"), "got: {out}");
}

#[test]
fn cli_responds_to_version() {
    let output = keysmap_binary()
        .arg("--version")
        .output()
        .expect("failed to execute keysmap --version");

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = keysmap_binary()
        .arg("--nonexistent-flag")
        .output()
        .expect("failed to execute keysmap");
    assert!(!output.status.success());
}

#[test]
fn check_counts_rules() {
    let output = run(&["--keys-map", "keysmap.list", "check"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Keys map OK: 14 rules"), "got: {}", stdout(&output));
}

#[test]
fn check_without_keys_map_reports_empty() {
    let output = run(&["check"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Keys map is empty"));
}

#[test]
fn check_rejects_short_key() {
    let output = run(&["--keys-map", "keysmap-short-key.list", "check"]);
    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("Key length for = 0x10 is 8 bits, should be between 64 and 160 bits"),
        "got: {}",
        stderr(&output)
    );
}

#[test]
fn check_missing_file() {
    let output = run(&["--keys-map", "does-not-exist.list", "check"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Keys map not found: does-not-exist.list"));
}

#[test]
fn query_authorized_key() {
    let output = run(&[
        "--keys-map",
        "keysmap.list",
        "query",
        "junit:junit:4.12",
        "--fingerprint",
        "0x123456789ABCDEF0",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("governed:     yes"), "got: {out}");
    assert!(out.contains("requires-key: yes"), "got: {out}");
    assert!(out.contains("authorized:   yes"), "got: {out}");
}

#[test]
fn query_version_range() {
    let output = run(&[
        "--keys-map",
        "keysmap.list",
        "query",
        "org.ranged:lib:1.5",
        "--fingerprint",
        "0x2222222222222222",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("authorized:   no"));
}

#[test]
fn query_json() {
    let output = run(&["--keys-map", "keysmap.list", "query", "noSig:test:1", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["governed"], true);
    assert_eq!(value["requires_key"], false);
    assert_eq!(value["no_sig"], true);
    assert_eq!(value["bad_sig"], false);
    assert!(value["authorized"].is_null());
    assert_eq!(value["first_rule"], "noSig:test = noSig");
}

#[test]
fn verify_ring_ok_and_broken() {
    let dir = tempfile::tempdir().unwrap();

    let master = Ed25519KeyPair::generate();
    let mut sub = Ed25519KeyPair::generate()
        .public_key(false)
        .with_user_id("Build <build@example.org>");
    sub.add_signature(Ed25519Certifier::certify(
        &master,
        &sub,
        SignatureKind::SubkeyBinding,
    ));
    let good = KeyRing::new(vec![master.public_key(true), sub]);
    let good_path = dir.path().join("good.json");
    std::fs::write(&good_path, good.to_json().unwrap()).unwrap();

    let output = run(&["verify-ring", good_path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Key ring OK: 2 keys"), "got: {out}");
    assert!(out.contains("SubKeyId: 0x"), "got: {out}");

    let outsider = Ed25519KeyPair::generate();
    let mut stray = Ed25519KeyPair::generate().public_key(false);
    stray.add_signature(Ed25519Certifier::certify(
        &outsider,
        &stray,
        SignatureKind::SubkeyBinding,
    ));
    let bad = KeyRing::new(vec![master.public_key(true), stray]);
    let bad_path = dir.path().join("bad.json");
    std::fs::write(&bad_path, bad.to_json().unwrap()).unwrap();

    let output = run(&["verify-ring", bad_path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Not found key"), "got: {}", stderr(&output));
}

#[test]
fn verify_ring_against_keys_map() {
    let dir = tempfile::tempdir().unwrap();
    let master = Ed25519KeyPair::generate();
    let mut sub = Ed25519KeyPair::generate().public_key(false);
    sub.add_signature(Ed25519Certifier::certify(
        &master,
        &sub,
        SignatureKind::SubkeyBinding,
    ));
    let ring = KeyRing::new(vec![master.public_key(true), sub]);
    let ring_path = dir.path().join("ring.json");
    std::fs::write(&ring_path, ring.to_json().unwrap()).unwrap();
    std::fs::write(
        dir.path().join("trusted.list"),
        format!("org.trusted = {}\n", master.fingerprint()),
    )
    .unwrap();

    let output = keysmap_binary()
        .arg("--base-dir")
        .arg(dir.path())
        .args(["--keys-map", "trusted.list", "verify-ring"])
        .arg(&ring_path)
        .args(["--artifact", "org.trusted:lib:1.0"])
        .output()
        .expect("failed to execute keysmap");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert_eq!(out.matches("trusted for org.trusted:lib:1.0: yes").count(), 2, "got: {out}");
}
