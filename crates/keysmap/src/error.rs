//! Error types for keysmap.
//!
//! Policy errors surface at load time and are fatal to startup. Resource
//! errors come from locating or reading the keys map. Verification errors
//! are produced per key ring. Matching itself never fails.

/// Errors raised while compiling a keys map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("Malformed artifact pattern '{pattern}': {reason}")]
    MalformedPattern { pattern: String, reason: String },

    #[error("Malformed version range '{range}': {reason}")]
    MalformedRange { range: String, reason: String },

    #[error("Key length for = {token} is {bits} bits, should be between 64 and 160 bits")]
    InvalidKeyLength { token: String, bits: usize },

    #[error("Invalid key '{token}': {reason}")]
    InvalidKeyToken { token: String, reason: String },
}

/// Errors raised while locating or reading a keys map source.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Keys map not found: {0}")]
    NotFound(String),

    #[error("Cannot read keys map {locator}: {source}")]
    Io {
        locator: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while verifying the internal signatures of a key ring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("Signature type: {signature_type} Not found key {signer} for subKeyId: {subkey}")]
    SignerNotFound {
        signature_type: String,
        signer: String,
        subkey: String,
    },

    #[error("No valid signature type: {signature_type} for subKey: {subkey}")]
    NoValidSignature {
        signature_type: String,
        subkey: String,
    },

    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),
}

/// Umbrella error for every fallible keysmap operation.
#[derive(Debug, thiserror::Error)]
pub enum KeysMapError {
    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid fingerprint: {0}")]
    InvalidFingerprint(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, KeysMapError>;

/// Return the first non-blank message found walking an error and its sources.
///
/// Falls back to the outermost message when every message in the chain is blank.
pub fn root_message(err: &(dyn std::error::Error + 'static)) -> String {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = current {
        let message = e.to_string();
        if !message.trim().is_empty() {
            return message;
        }
        current = e.source();
    }
    err.to_string()
}
