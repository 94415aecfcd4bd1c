//! Certificates, chains and trust anchors.

use crate::signing::{check_signature, decode_public_key, sign_data, truncate, verify_data};
use crate::{EnvelopeError, EnvelopeResult, Member};
use chrono::{DateTime, Utc};
use minisign::{PublicKey, SecretKey};
use serde::{Deserialize, Serialize};

/// Root of trust that certifies organisations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustAnchor {
    /// Minisign public key (base64-encoded).
    public_key: String,
}

impl TrustAnchor {
    /// Create an anchor for the given key.
    pub fn new(public_key: &PublicKey) -> Self {
        Self {
            public_key: public_key.to_base64(),
        }
    }

    /// Create an anchor from a base64-encoded minisign public key.
    pub fn from_base64(public_key: &str) -> EnvelopeResult<Self> {
        decode_public_key(public_key)?;
        Ok(Self {
            public_key: public_key.to_string(),
        })
    }

    /// The anchor key.
    pub fn public_key(&self) -> EnvelopeResult<PublicKey> {
        decode_public_key(&self.public_key)
    }
}

/// Binds a public key to a member for a validity period.
///
/// The signature covers every other field and is produced by the issuer:
/// a trust anchor for organisation certificates, the organisation key for
/// member certificates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Certificate {
    organisation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    public_key: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    start: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    expiry: DateTime<Utc>,
    signature: String,
}

/// The part of a certificate covered by its signature.
#[derive(Serialize)]
struct CertificateFields<'a> {
    organisation: &'a str,
    user: Option<&'a str>,
    public_key: &'a str,
    start: i64,
    expiry: i64,
}

impl Certificate {
    /// Issue a certificate for `subject` and sign it with `issuer_key`.
    pub fn issue(
        subject: &Member,
        public_key: &PublicKey,
        start: DateTime<Utc>,
        expiry: DateTime<Utc>,
        issuer_key: &SecretKey,
    ) -> EnvelopeResult<Self> {
        let (start, expiry) = (truncate(start), truncate(expiry));
        if expiry < start {
            return Err(EnvelopeError::InvalidValidityPeriod {
                start: start.to_rfc3339(),
                expiry: expiry.to_rfc3339(),
            });
        }

        let mut certificate = Self {
            organisation: subject.organisation.clone(),
            user: subject.user.clone(),
            public_key: public_key.to_base64(),
            start,
            expiry,
            signature: String::new(),
        };
        certificate.signature = sign_data(issuer_key, &certificate.signed_fields()?)?;
        Ok(certificate)
    }

    /// The member the certificate was issued to.
    #[must_use]
    pub fn subject(&self) -> Member {
        Member {
            organisation: self.organisation.clone(),
            user: self.user.clone(),
        }
    }

    /// Organisation name.
    #[must_use]
    pub fn organisation(&self) -> &str {
        &self.organisation
    }

    /// The certified key.
    pub fn public_key(&self) -> EnvelopeResult<PublicKey> {
        decode_public_key(&self.public_key)
    }

    /// Start of the validity period.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End of the validity period.
    #[must_use]
    pub fn expiry(&self) -> DateTime<Utc> {
        self.expiry
    }

    /// Check that `issuer` signed this certificate.
    pub fn verify_issuer(&self, issuer: &PublicKey) -> EnvelopeResult<()> {
        verify_data(issuer, &self.signed_fields()?, &self.signature).map_err(|reason| {
            EnvelopeError::InvalidCertificate(format!(
                "certificate for {} was not issued by the expected key: {reason}",
                self.subject()
            ))
        })
    }

    /// Reject certificates whose key or signature cannot be decoded.
    pub(crate) fn check_structure(&self) -> EnvelopeResult<()> {
        decode_public_key(&self.public_key).map_err(|e| {
            EnvelopeError::Malformed(format!("certificate for {}: {e}", self.subject()))
        })?;
        check_signature(&self.signature).map_err(|reason| {
            EnvelopeError::Malformed(format!("certificate for {}: {reason}", self.subject()))
        })
    }

    fn signed_fields(&self) -> EnvelopeResult<Vec<u8>> {
        let fields = CertificateFields {
            organisation: &self.organisation,
            user: self.user.as_deref(),
            public_key: &self.public_key,
            start: self.start.timestamp(),
            expiry: self.expiry.timestamp(),
        };
        Ok(serde_json::to_vec(&fields)?)
    }
}

/// Certificates linking a signer to its organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Chain {
    /// Organisation certificate, issued by a trust anchor.
    pub organisation_certificate: Certificate,

    /// Signer certificate, issued by the organisation.
    pub member_certificate: Certificate,
}

impl Chain {
    /// Parse a chain from JSON.
    pub fn from_json(json: &str) -> EnvelopeResult<Self> {
        let chain: Self = serde_json::from_str(json)?;
        chain.check_structure()?;
        Ok(chain)
    }

    /// Serialise the chain to pretty-printed JSON.
    pub fn to_json(&self) -> EnvelopeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub(crate) fn check_structure(&self) -> EnvelopeResult<()> {
        self.organisation_certificate.check_structure()?;
        self.member_certificate.check_structure()
    }

    /// Verify the chain against `trust_anchors`, returning the signer and
    /// its key.
    ///
    /// Validity periods are not checked here.
    pub(crate) fn verify(&self, trust_anchors: &[TrustAnchor]) -> EnvelopeResult<(Member, PublicKey)> {
        if trust_anchors.is_empty() {
            return Err(EnvelopeError::NoTrustAnchors);
        }

        // Anchors whose key cannot be decoded never match
        let organisation_certificate = &self.organisation_certificate;
        let trusted = trust_anchors.iter().any(|anchor| {
            anchor
                .public_key()
                .is_ok_and(|key| organisation_certificate.verify_issuer(&key).is_ok())
        });
        if !trusted {
            return Err(EnvelopeError::UntrustedOrganisation(
                organisation_certificate.organisation.clone(),
            ));
        }

        let member_certificate = &self.member_certificate;
        if member_certificate.organisation != organisation_certificate.organisation {
            return Err(EnvelopeError::InvalidCertificate(format!(
                "member certificate belongs to {}, not {}",
                member_certificate.organisation, organisation_certificate.organisation
            )));
        }
        member_certificate.verify_issuer(&organisation_certificate.public_key()?)?;

        Ok((member_certificate.subject(), member_certificate.public_key()?))
    }
}

#[cfg(test)]
#[path = "certificate/certificate_tests.rs"]
mod certificate_tests;
