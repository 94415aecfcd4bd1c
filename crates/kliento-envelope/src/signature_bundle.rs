//! Minisign-backed signature envelope.

use crate::signing::{check_signature, compute_sha256, sign_data, truncate, verify_data};
use crate::{
    Chain, EnvelopeError, EnvelopeResult, EnvelopeVerification, SignOptions, SignatureEnvelope,
    TrustAnchor,
};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use minisign::SecretKey;
use serde::{Deserialize, Serialize};

/// Signature envelope serialised as a JSON document.
///
/// The member key signs the service OID, the validity period and the SHA256
/// digests of the chain and the plaintext. The plaintext itself is carried
/// base64-encoded when embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignatureBundle {
    chain: Chain,
    service_oid: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    start: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    expiry: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    plaintext: Option<String>,
    signature: String,
}

/// The part of a signature bundle covered by the member signature.
#[derive(Serialize)]
struct SignedAttributes<'a> {
    service_oid: &'a str,
    start: i64,
    expiry: i64,
    chain_sha256: String,
    plaintext_sha256: String,
}

impl SignatureBundle {
    /// The certificate chain of the signer.
    #[must_use]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Service the envelope was produced for.
    #[must_use]
    pub fn service_oid(&self) -> &str {
        &self.service_oid
    }

    /// Start of the signature validity period.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End of the signature validity period.
    #[must_use]
    pub fn expiry(&self) -> DateTime<Utc> {
        self.expiry
    }

    /// Whether the plaintext is embedded in the envelope.
    #[must_use]
    pub fn is_plaintext_embedded(&self) -> bool {
        self.plaintext.is_some()
    }

    fn signed_attributes(&self, plaintext: &[u8]) -> EnvelopeResult<Vec<u8>> {
        let attributes = SignedAttributes {
            service_oid: &self.service_oid,
            start: self.start.timestamp(),
            expiry: self.expiry.timestamp(),
            chain_sha256: compute_sha256(&serde_json::to_vec(&self.chain)?),
            plaintext_sha256: compute_sha256(plaintext),
        };
        Ok(serde_json::to_vec(&attributes)?)
    }

    fn resolve_plaintext(&self, expected: Option<&[u8]>) -> EnvelopeResult<Vec<u8>> {
        let embedded = self
            .plaintext
            .as_deref()
            .map(|encoded| {
                BASE64
                    .decode(encoded)
                    .map_err(|e| EnvelopeError::Malformed(format!("embedded plaintext: {e}")))
            })
            .transpose()?;

        match (embedded, expected) {
            (Some(embedded), Some(expected)) if embedded != expected => {
                Err(EnvelopeError::PlaintextMismatch)
            }
            (Some(embedded), _) => Ok(embedded),
            (None, Some(expected)) => Ok(expected.to_vec()),
            (None, None) => Err(EnvelopeError::MissingPlaintext),
        }
    }

    /// Reject envelopes whose encoded fields cannot be decoded.
    fn check_structure(&self) -> EnvelopeResult<()> {
        self.chain.check_structure()?;
        if let Some(encoded) = &self.plaintext {
            BASE64
                .decode(encoded)
                .map_err(|e| EnvelopeError::Malformed(format!("embedded plaintext: {e}")))?;
        }
        check_signature(&self.signature)
            .map_err(|reason| EnvelopeError::Malformed(format!("envelope signature: {reason}")))
    }

    /// Intersection of the signature and certificate validity periods.
    fn validity_period(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let organisation = &self.chain.organisation_certificate;
        let member = &self.chain.member_certificate;
        let start = self.start.max(organisation.start()).max(member.start());
        let expiry = self.expiry.min(organisation.expiry()).min(member.expiry());
        (start, expiry)
    }
}

#[async_trait]
impl SignatureEnvelope for SignatureBundle {
    type Chain = Chain;
    type PrivateKey = SecretKey;
    type TrustAnchor = TrustAnchor;

    async fn sign(
        plaintext: &[u8],
        service_oid: &str,
        chain: &Chain,
        private_key: &SecretKey,
        expiry: DateTime<Utc>,
        options: SignOptions,
    ) -> EnvelopeResult<Self> {
        let start = truncate(options.start_date.unwrap_or_else(Utc::now));
        let expiry = truncate(expiry);
        if expiry < start {
            return Err(EnvelopeError::InvalidValidityPeriod {
                start: start.to_rfc3339(),
                expiry: expiry.to_rfc3339(),
            });
        }

        let mut bundle = Self {
            chain: chain.clone(),
            service_oid: service_oid.to_string(),
            start,
            expiry,
            plaintext: options
                .embed_plaintext
                .then(|| BASE64.encode(plaintext)),
            signature: String::new(),
        };
        bundle.signature = sign_data(private_key, &bundle.signed_attributes(plaintext)?)?;

        tracing::debug!(
            service_oid,
            signer = %chain.member_certificate.subject(),
            start = %start,
            expiry = %expiry,
            "produced signature bundle"
        );
        Ok(bundle)
    }

    async fn verify(
        &self,
        expected_plaintext: Option<&[u8]>,
        service_oid: &str,
        date: DateTime<Utc>,
        trust_anchors: Option<&[TrustAnchor]>,
    ) -> EnvelopeResult<EnvelopeVerification> {
        let plaintext = self.resolve_plaintext(expected_plaintext)?;

        let (member, member_key) = self.chain.verify(trust_anchors.unwrap_or_default())?;

        verify_data(&member_key, &self.signed_attributes(&plaintext)?, &self.signature)
            .map_err(EnvelopeError::InvalidSignature)?;

        if self.service_oid != service_oid {
            return Err(EnvelopeError::ServiceMismatch {
                expected: service_oid.to_string(),
                actual: self.service_oid.clone(),
            });
        }

        let (start, expiry) = self.validity_period();
        let date = truncate(date);
        if date < start || expiry < date {
            return Err(EnvelopeError::OutsideValidityPeriod {
                date: date.to_rfc3339(),
                start: start.to_rfc3339(),
                expiry: expiry.to_rfc3339(),
            });
        }

        Ok(EnvelopeVerification { member, plaintext })
    }

    fn serialise(&self) -> EnvelopeResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    fn deserialise(serialisation: &[u8]) -> EnvelopeResult<Self> {
        let bundle: Self = serde_json::from_slice(serialisation)?;
        bundle.check_structure()?;
        Ok(bundle)
    }
}
