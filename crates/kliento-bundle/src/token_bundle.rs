//! Token bundle signing, parsing and verification.

use crate::options::{TokenBundleOptions, TokenBundleVerification, TokenBundleVerificationOptions};
use crate::{BundleError, BundleResult, authorization};
use chrono::{DateTime, Utc};
use kliento_core::{KLIENTO_SERVICE_OID, MAX_TOKEN_BUNDLE_OCTETS, Token};
use kliento_envelope::{SignOptions, SignatureBundle, SignatureEnvelope};
use tracing::debug;

/// A Kliento token signed into a signature envelope.
///
/// Bundles are immutable once created. Verification does not modify the
/// bundle and may be repeated, for example against different dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBundle<E: SignatureEnvelope = SignatureBundle> {
    envelope: E,
}

impl<E: SignatureEnvelope> TokenBundle<E> {
    /// Wrap an existing envelope.
    pub fn from_envelope(envelope: E) -> Self {
        Self { envelope }
    }

    /// The underlying signature envelope.
    pub fn envelope(&self) -> &E {
        &self.envelope
    }

    /// Sign `token` with the member key of `chain`.
    ///
    /// The token is embedded in the envelope and bound to the Kliento
    /// service OID.
    pub async fn sign(
        token: &Token,
        private_key: &E::PrivateKey,
        chain: &E::Chain,
        expiry: DateTime<Utc>,
        options: TokenBundleOptions,
    ) -> BundleResult<Self> {
        let plaintext = token.serialise().map_err(BundleError::MalformedToken)?;

        let sign_options = SignOptions {
            embed_plaintext: true,
            start_date: options.start_date,
        };
        let envelope = E::sign(
            &plaintext,
            KLIENTO_SERVICE_OID,
            chain,
            private_key,
            expiry,
            sign_options,
        )
        .await
        .map_err(BundleError::SigningFailed)?;

        debug!(audience = token.audience(), %expiry, "Signed token bundle");
        Ok(Self { envelope })
    }

    /// Parse a serialised bundle, rejecting anything over
    /// [`MAX_TOKEN_BUNDLE_OCTETS`].
    pub fn deserialise(serialisation: &[u8]) -> BundleResult<Self> {
        Self::deserialise_with_limit(serialisation, MAX_TOKEN_BUNDLE_OCTETS)
    }

    /// Parse a serialised bundle of at most `max_octets` bytes.
    ///
    /// The size check runs before any parsing.
    pub fn deserialise_with_limit(serialisation: &[u8], max_octets: usize) -> BundleResult<Self> {
        if serialisation.len() > max_octets {
            return Err(BundleError::TooLarge {
                actual: serialisation.len(),
                max: max_octets,
            });
        }

        let envelope = E::deserialise(serialisation).map_err(BundleError::malformed)?;
        Ok(Self { envelope })
    }

    /// Parse a bundle from an `Authorization` header value such as
    /// `Kliento <base64>`.
    ///
    /// This only parses the bundle; call [`verify`](Self::verify) before
    /// trusting it.
    pub fn from_authorization_header(header_value: &str) -> BundleResult<Self> {
        Self::from_authorization_header_with_limit(header_value, MAX_TOKEN_BUNDLE_OCTETS)
    }

    /// Like [`from_authorization_header`](Self::from_authorization_header)
    /// with a custom size limit.
    pub fn from_authorization_header_with_limit(
        header_value: &str,
        max_octets: usize,
    ) -> BundleResult<Self> {
        let serialisation = authorization::decode(header_value, max_octets)?;
        Self::deserialise_with_limit(&serialisation, max_octets)
    }

    /// Serialise the bundle. The output is the envelope serialisation.
    pub fn serialise(&self) -> BundleResult<Vec<u8>> {
        self.envelope
            .serialise()
            .map_err(BundleError::SerialisationFailed)
    }

    /// Format the bundle as an `Authorization` header value.
    pub fn to_authorization_header(&self) -> BundleResult<String> {
        Ok(authorization::encode(&self.serialise()?))
    }

    /// Verify the bundle for `audience` and return its claims and signer.
    pub async fn verify(
        &self,
        audience: &str,
        options: &TokenBundleVerificationOptions<E::TrustAnchor>,
    ) -> BundleResult<TokenBundleVerification> {
        let date = options.date.unwrap_or_else(Utc::now);

        let verification = self
            .envelope
            .verify(
                None,
                KLIENTO_SERVICE_OID,
                date,
                options.trust_anchors.as_deref(),
            )
            .await
            .map_err(|e| {
                debug!(audience, error = %e, "Token bundle envelope rejected");
                BundleError::EnvelopeInvalid(e)
            })?;

        let token =
            Token::deserialise(&verification.plaintext).map_err(BundleError::MalformedToken)?;

        if token.audience() != audience {
            debug!(
                expected = audience,
                actual = token.audience(),
                "Token bundle audience mismatch"
            );
            return Err(BundleError::AudienceMismatch {
                expected: audience.to_string(),
                actual: token.audience().to_string(),
            });
        }

        debug!(audience, subject = %verification.member, "Verified token bundle");
        Ok(TokenBundleVerification {
            claims: token.into_claims(),
            subject: verification.member,
        })
    }
}
