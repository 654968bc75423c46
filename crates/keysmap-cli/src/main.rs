//! Keysmap CLI: `keysmap` command.
//!
//! Checks keys map files, answers trust questions for single artifacts,
//! and verifies JSON encoded key rings.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use keysmap::error::root_message;
use keysmap::keyring::{fingerprint_for_master, user_ids};
use keysmap::{
    key_id_description, ArtifactCoordinate, FileLoader, Fingerprint, KeyId, KeyRing,
    KeyRingCollection, LogObserver, TrustPolicy,
};

// ── CLI structure ─────────────────────────────────────────────────────────────

/// Keysmap CLI: keys map trust policy and key ring verification.
#[derive(Parser, Debug)]
#[command(
    name = "keysmap",
    about = "Keys map trust policy CLI",
    version,
    long_about = "keysmap: check keys map files, query which keys may sign an artifact,\nand verify the subkey bindings of key rings."
)]
struct Cli {
    /// Keys map locator (a path, optionally prefixed with `file:`)
    #[arg(long = "keys-map", global = true)]
    keys_map: Option<String>,

    /// Directory relative keys map locators are resolved against
    #[arg(long = "base-dir", global = true)]
    base_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the keys map and report its rules
    Check,

    /// Evaluate the keys map for one artifact
    Query {
        /// Artifact coordinates: group:artifact:version[:classifier[:type]]
        coords: String,

        /// Fingerprint or key id of the signing key
        #[arg(long)]
        fingerprint: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify the subkey bindings of a JSON key ring
    VerifyRing {
        /// Key ring file (a single ring, or a collection with --key-id)
        file: PathBuf,

        /// Treat the file as a ring collection and pick the ring holding this key
        #[arg(long = "key-id")]
        key_id: Option<String>,

        /// Also check each key against the keys map for this artifact
        #[arg(long)]
        artifact: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match &cli.command {
        Commands::Check => cmd_check(&cli),
        Commands::Query {
            coords,
            fingerprint,
            json,
        } => cmd_query(&cli, coords, fingerprint.as_deref(), *json),
        Commands::VerifyRing {
            file,
            key_id,
            artifact,
        } => cmd_verify_ring(&cli, file, key_id.as_deref(), artifact.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_policy(cli: &Cli) -> Result<TrustPolicy> {
    let loader = match &cli.base_dir {
        Some(dir) => FileLoader::with_base_dir(dir),
        None => FileLoader::new(),
    };
    let locator = cli.keys_map.as_deref();
    TrustPolicy::load(&loader, locator)
        .with_context(|| format!("loading keys map {}", locator.unwrap_or("<none>")))
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Accepts a 160-bit fingerprint, or a 64-bit key id padded into the
/// trailing bytes of an otherwise zero fingerprint.
fn parse_signer(text: &str) -> Result<Fingerprint> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    if digits.len() == 16 {
        let id = KeyId::from_hex(digits).with_context(|| format!("invalid key id {text}"))?;
        let mut bytes = [0u8; keysmap::keys::FINGERPRINT_LEN];
        bytes[keysmap::keys::FINGERPRINT_LEN - 8..].copy_from_slice(&id.0.to_be_bytes());
        return Ok(Fingerprint::from_bytes(bytes));
    }
    Fingerprint::from_hex(digits).with_context(|| format!("invalid fingerprint {text}"))
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn cmd_check(cli: &Cli) -> Result<()> {
    let policy = load_policy(cli)?;

    if policy.is_empty() {
        println!("Keys map is empty: valid signatures of any key will be accepted");
        return Ok(());
    }

    println!("Keys map OK: {} rules", policy.len());
    if cli.verbose {
        for rule in policy.rules() {
            println!("  {rule}");
        }
    }
    Ok(())
}

fn cmd_query(cli: &Cli, coords: &str, fingerprint: Option<&str>, json: bool) -> Result<()> {
    let policy = load_policy(cli)?;
    let artifact = ArtifactCoordinate::parse(coords);
    if artifact.group().is_empty() {
        return Err(anyhow!("artifact coordinates must name a group: '{coords}'"));
    }

    let authorized = match fingerprint {
        Some(text) => Some(policy.is_key_authorized(&artifact, &parse_signer(text)?)),
        None => None,
    };
    let first_rule = policy.first_match(&artifact).map(|rule| rule.to_string());

    if json {
        let out = serde_json::json!({
            "artifact": artifact.to_string(),
            "governed": policy.has_any_rule_for(&artifact),
            "requires_key": policy.requires_key(&artifact),
            "no_sig": policy.permits_no_signature(&artifact),
            "bad_sig": policy.permits_broken_signature(&artifact),
            "no_key": policy.permits_missing_key(&artifact),
            "authorized": authorized,
            "first_rule": first_rule,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Artifact: {artifact}");
    println!("  governed:     {}", yes_no(policy.has_any_rule_for(&artifact)));
    println!("  requires-key: {}", yes_no(policy.requires_key(&artifact)));
    println!("  no-sig:       {}", yes_no(policy.permits_no_signature(&artifact)));
    println!("  bad-sig:      {}", yes_no(policy.permits_broken_signature(&artifact)));
    println!("  no-key:       {}", yes_no(policy.permits_missing_key(&artifact)));
    if let Some(authorized) = authorized {
        println!("  authorized:   {}", yes_no(authorized));
    }
    if cli.verbose {
        if let Some(rule) = first_rule {
            println!("  first rule:   {rule}");
        }
    }
    Ok(())
}

fn cmd_verify_ring(
    cli: &Cli,
    file: &Path,
    key_id: Option<&str>,
    artifact: Option<&str>,
) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("reading key ring {}", file.display()))?;

    let collection;
    let single;
    let ring: &KeyRing = match key_id {
        Some(id) => {
            collection = KeyRingCollection::from_json(&text)
                .with_context(|| format!("parsing key ring collection {}", file.display()))?;
            let id = KeyId::from_hex(id).with_context(|| format!("invalid key id {id}"))?;
            match keysmap::load_verified_ring(
                &collection,
                id,
                &keysmap::crypto::Ed25519Certifier,
                &LogObserver,
            ) {
                Ok(Some(ring)) => ring,
                Ok(None) => return Err(anyhow!("no key ring contains key {id}")),
                Err(err) => {
                    return Err(anyhow!("key ring verification failed: {}", root_message(&err)))
                }
            }
        }
        None => {
            single = KeyRing::from_json(&text)
                .with_context(|| format!("parsing key ring {}", file.display()))?;
            if let Err(err) = single.verify() {
                return Err(anyhow!("key ring verification failed: {}", root_message(&err)));
            }
            &single
        }
    };

    let policy_check = match artifact {
        Some(coords) => Some((load_policy(cli)?, ArtifactCoordinate::parse(coords))),
        None => None,
    };

    println!("Key ring OK: {} keys", ring.len());
    for key in ring {
        println!("  {}", key_id_description(key, ring));
        if cli.verbose {
            println!("    master: {}", fingerprint_for_master(key, ring));
            for uid in user_ids(key, ring) {
                println!("    uid:    {uid}");
            }
        }
        if let Some((policy, artifact)) = &policy_check {
            let valid = policy.is_valid_key(artifact, key, Some(ring));
            println!("    trusted for {artifact}: {}", yes_no(valid));
        }
    }
    Ok(())
}
