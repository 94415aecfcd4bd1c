//! Error types for the token codec

use thiserror::Error;

/// Result type alias for token codec operations
pub type TokenResult<T> = Result<T, TokenError>;

/// Error type for token serialisation and deserialisation
///
/// The two variants separate a byte stream that is not a JSON document at
/// all from a document that parsed but does not describe a valid token.
#[derive(Error, Debug)]
pub enum TokenError {
    /// The serialisation could not be parsed
    #[error("invalid token serialisation: {0}")]
    InvalidSerialisation(#[source] serde_json::Error),

    /// The serialisation parsed but violates the token structure
    #[error("invalid token structure: {0}")]
    InvalidStructure(String),
}

impl TokenError {
    /// Returns true if the error was raised before the document was parsed
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, TokenError::InvalidSerialisation(_))
    }
}
