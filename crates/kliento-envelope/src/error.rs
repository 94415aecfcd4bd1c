//! Error types for envelope operations.

use thiserror::Error;

/// Result type for envelope operations.
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

/// Errors that can occur while producing, parsing or verifying envelopes.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The serialisation is not a well-formed envelope.
    #[error("Malformed envelope: {0}")]
    Malformed(String),

    /// JSON parsing or serialisation error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A public key could not be decoded.
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Producing a signature failed.
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// The validity period ends before it starts.
    #[error("Invalid validity period: expiry {expiry} precedes start {start}")]
    InvalidValidityPeriod { start: String, expiry: String },

    /// No trust anchors were supplied for verification.
    #[error("No trust anchors supplied")]
    NoTrustAnchors,

    /// No trust anchor vouches for the organisation.
    #[error("Organisation is not trusted: {0}")]
    UntrustedOrganisation(String),

    /// A certificate in the chain is invalid.
    #[error("Invalid certificate: {0}")]
    InvalidCertificate(String),

    /// The envelope signature does not verify.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// The envelope was produced for another service.
    #[error("Service mismatch: expected {expected}, got {actual}")]
    ServiceMismatch { expected: String, actual: String },

    /// The verification date falls outside the validity period.
    #[error("Envelope is not valid at {date}: valid from {start} to {expiry}")]
    OutsideValidityPeriod {
        date: String,
        start: String,
        expiry: String,
    },

    /// A detached envelope was verified without its plaintext.
    #[error("Plaintext is neither embedded nor supplied")]
    MissingPlaintext,

    /// The supplied plaintext differs from the embedded one.
    #[error("Plaintext does not match the embedded plaintext")]
    PlaintextMismatch,
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
