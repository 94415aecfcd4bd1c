//! Error types for token bundle operations.

use kliento_core::TokenError;
use kliento_envelope::EnvelopeError;
use thiserror::Error;

/// Boxed cause attached to [`BundleError::Malformed`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during token bundle operations.
#[derive(Debug, Error)]
pub enum BundleError {
    /// Serialised bundle exceeds the accepted size.
    #[error("Token bundle is too large: {actual} octets (maximum is {max})")]
    TooLarge { actual: usize, max: usize },

    /// Bundle bytes (or their header encoding) could not be parsed.
    #[error("Malformed token bundle: {0}")]
    Malformed(#[source] BoxError),

    /// Authorization header uses a scheme other than `Kliento`.
    #[error("Unsupported authorization scheme: {0}")]
    UnsupportedScheme(String),

    /// Envelope failed signature, chain or validity checks.
    #[error("Invalid token bundle envelope: {0}")]
    EnvelopeInvalid(#[source] EnvelopeError),

    /// Envelope is valid but its payload is not a valid token.
    #[error("Malformed token: {0}")]
    MalformedToken(#[source] TokenError),

    /// Token was issued for another audience.
    #[error("Expected {expected}, got {actual}")]
    AudienceMismatch { expected: String, actual: String },

    /// Envelope service refused to sign.
    #[error("Failed to sign token bundle: {0}")]
    SigningFailed(#[source] EnvelopeError),

    /// Envelope could not be serialised.
    #[error("Failed to serialise token bundle: {0}")]
    SerialisationFailed(#[source] EnvelopeError),
}

impl BundleError {
    pub(crate) fn malformed(cause: impl Into<BoxError>) -> Self {
        BundleError::Malformed(cause.into())
    }
}
