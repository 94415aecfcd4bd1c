//! Kliento tokens and their canonical serialisation
//!
//! A token serialises to a UTF-8 JSON document:
//!
//! ```text
//! {"audience":"https://api.example.com","claims":{"role":"admin"}}
//! ```
//!
//! The `claims` member is omitted when the claim set is empty, so a token
//! built without claims and one built with an empty claim set produce the
//! same bytes.

use crate::{TokenError, TokenResult};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// String claims carried by a token, keyed by claim name
pub type ClaimSet = BTreeMap<String, String>;

const AUDIENCE_FIELD: &str = "audience";
const CLAIMS_FIELD: &str = "claims";

/// Kliento token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    audience: String,
    claims: ClaimSet,
}

#[derive(Serialize)]
struct TokenDocument<'a> {
    audience: &'a str,
    #[serde(skip_serializing_if = "is_empty_claim_set")]
    claims: &'a ClaimSet,
}

fn is_empty_claim_set(claims: &&ClaimSet) -> bool {
    claims.is_empty()
}

impl Token {
    /// Create a token without claims
    pub fn new(audience: impl Into<String>) -> Self {
        Self::with_claims(audience, ClaimSet::new())
    }

    /// Create a token with the given claims
    pub fn with_claims(audience: impl Into<String>, claims: ClaimSet) -> Self {
        Self {
            audience: audience.into(),
            claims,
        }
    }

    /// The service the token is intended for
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// The claims in the token (empty if none were given)
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Consume the token, returning its claims
    pub fn into_claims(self) -> ClaimSet {
        self.claims
    }

    /// Serialise the token
    ///
    /// Fails if the audience or any claim key is empty.
    pub fn serialise(&self) -> TokenResult<Vec<u8>> {
        if self.audience.is_empty() {
            return Err(TokenError::InvalidStructure(
                "audience must not be empty".to_string(),
            ));
        }
        if self.claims.contains_key("") {
            return Err(TokenError::InvalidStructure(
                "claim keys must not be empty".to_string(),
            ));
        }

        let document = TokenDocument {
            audience: &self.audience,
            claims: &self.claims,
        };
        serde_json::to_vec(&document).map_err(TokenError::InvalidSerialisation)
    }

    /// Deserialise a token
    ///
    /// A serialisation without claims yields an empty claim set.
    pub fn deserialise(serialisation: &[u8]) -> TokenResult<Self> {
        let document: Value =
            serde_json::from_slice(serialisation).map_err(TokenError::InvalidSerialisation)?;

        let Value::Object(mut fields) = document else {
            return Err(invalid("token must be a JSON object"));
        };

        let audience = match fields.remove(AUDIENCE_FIELD) {
            Some(Value::String(audience)) if !audience.is_empty() => audience,
            Some(Value::String(_)) => return Err(invalid("audience must not be empty")),
            Some(_) => return Err(invalid("audience must be a string")),
            None => return Err(invalid("audience is missing")),
        };

        let claims = match fields.remove(CLAIMS_FIELD) {
            None => ClaimSet::new(),
            Some(Value::Object(entries)) => entries
                .into_iter()
                .map(|(key, value)| parse_claim(key, value))
                .collect::<TokenResult<ClaimSet>>()?,
            Some(_) => return Err(invalid("claims must be an object")),
        };

        Ok(Self { audience, claims })
    }
}

fn parse_claim(key: String, value: Value) -> TokenResult<(String, String)> {
    if key.is_empty() {
        return Err(invalid("claim keys must not be empty"));
    }
    match value {
        Value::String(value) => Ok((key, value)),
        _ => Err(TokenError::InvalidStructure(format!(
            "claim {key} must be a string"
        ))),
    }
}

fn invalid(reason: &str) -> TokenError {
    TokenError::InvalidStructure(reason.to_string())
}
