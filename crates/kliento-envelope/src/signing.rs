//! Minisign helpers shared by certificates and signature bundles.

use crate::{EnvelopeError, EnvelopeResult};
use chrono::{DateTime, SubsecRound, Utc};
use minisign::{PublicKey, SecretKey, SignatureBox};
use sha2::{Digest, Sha256};
use std::io::Cursor;

/// Compute SHA256 hash of data and return as hex string.
pub(crate) fn compute_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Sign data using a minisign secret key.
///
/// Returns the signature in minisign format.
pub(crate) fn sign_data(secret_key: &SecretKey, data: &[u8]) -> EnvelopeResult<String> {
    let signature_box = minisign::sign(
        None, // No public key needed for signing
        secret_key, data, None, // No trusted comment
        None, // No untrusted comment
    )
    .map_err(|e| EnvelopeError::SigningFailed(e.to_string()))?;

    Ok(signature_box.to_string())
}

/// Check that `signature` is a readable minisign signature.
pub(crate) fn check_signature(signature: &str) -> Result<(), String> {
    SignatureBox::from_string(signature)
        .map(|_| ())
        .map_err(|e| format!("unreadable signature: {e}"))
}

/// Check a minisign signature over data.
///
/// Returns the reason on failure so callers can attach it to the error
/// variant matching the link being checked.
pub(crate) fn verify_data(
    public_key: &PublicKey,
    data: &[u8],
    signature: &str,
) -> Result<(), String> {
    let signature_box = SignatureBox::from_string(signature)
        .map_err(|e| format!("unreadable signature: {e}"))?;

    minisign::verify(
        public_key,
        &signature_box,
        Cursor::new(data),
        true,  // quiet
        false, // don't echo the data
        false, // reject legacy signatures
    )
    .map_err(|e| e.to_string())
}

/// Decode a base64 minisign public key.
pub(crate) fn decode_public_key(public_key: &str) -> EnvelopeResult<PublicKey> {
    PublicKey::from_base64(public_key).map_err(|e| EnvelopeError::InvalidPublicKey(e.to_string()))
}

/// Dates are signed and compared with whole-second precision.
pub(crate) fn truncate(date: DateTime<Utc>) -> DateTime<Utc> {
    date.trunc_subsecs(0)
}
