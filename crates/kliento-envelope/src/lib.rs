//! Signature envelopes for Kliento token bundles
//!
//! An envelope binds a plaintext to the member of an organisation that
//! signed it, a service identifier and a validity period. Token bundles only
//! depend on the [`SignatureEnvelope`] contract; [`SignatureBundle`] is the
//! realisation shipped with this crate.
//!
//! # Trust Model
//!
//! ```text
//! TrustAnchor ──signs──▶ organisation certificate ──signs──▶ member certificate
//!                                                              │
//!                                                              └─signs──▶ SignatureBundle
//! ```
//!
//! All signatures are minisign (Ed25519) signatures, and every link has its
//! own validity period. A bundle verifies at a given date only if the date is
//! inside all of them.
//!
//! # Example
//!
//! ```no_run
//! use chrono::{Duration, Utc};
//! use kliento_envelope::{MockTrustChain, SignOptions, SignatureBundle, SignatureEnvelope};
//!
//! # async fn example() -> kliento_envelope::EnvelopeResult<()> {
//! let trust_chain = MockTrustChain::generate("example.com", Some("alice"), Utc::now() + Duration::minutes(10))?;
//! let bundle = SignatureBundle::sign(
//!     b"payload",
//!     "1.3.6.1.4.1.58708.3.0",
//!     &trust_chain.chain,
//!     &trust_chain.signer_private_key,
//!     Utc::now() + Duration::seconds(30),
//!     SignOptions::embedded(),
//! )
//! .await?;
//!
//! let verification = bundle
//!     .verify(None, "1.3.6.1.4.1.58708.3.0", Utc::now(), Some(&trust_chain.trust_anchors))
//!     .await?;
//! assert_eq!(verification.member.id(), "alice@example.com");
//! # Ok(())
//! # }
//! ```

mod certificate;
mod error;
mod member;
mod mock;
mod signature_bundle;
mod signing;

pub use certificate::{Certificate, Chain, TrustAnchor};
pub use error::{EnvelopeError, EnvelopeResult};
pub use member::Member;
pub use minisign::{KeyPair, PublicKey, SecretKey};
pub use mock::MockTrustChain;
pub use signature_bundle::SignatureBundle;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Options for producing an envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignOptions {
    /// Embed the plaintext in the envelope instead of only signing it.
    pub embed_plaintext: bool,

    /// Start of the validity period (defaults to the time of signing).
    pub start_date: Option<DateTime<Utc>>,
}

impl SignOptions {
    /// Options for an envelope that carries its plaintext.
    #[must_use]
    pub fn embedded() -> Self {
        Self {
            embed_plaintext: true,
            start_date: None,
        }
    }

    /// Set the start of the validity period.
    #[must_use]
    pub fn with_start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }
}

/// Outcome of a successful envelope verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeVerification {
    /// Member whose key produced the signature.
    pub member: Member,

    /// The signed plaintext.
    pub plaintext: Vec<u8>,
}

/// Contract of a signature envelope service.
///
/// Implementations must be stateless: verifying the same envelope with the
/// same inputs always yields the same outcome.
#[async_trait]
pub trait SignatureEnvelope: Sized + Send + Sync {
    /// Certificate chain from an organisation down to the signer.
    type Chain: Send + Sync;

    /// Key used by the signer.
    type PrivateKey: Send + Sync;

    /// Root of trust the chain is verified against.
    type TrustAnchor: Send + Sync;

    /// Sign `plaintext` for the service identified by `service_oid`.
    async fn sign(
        plaintext: &[u8],
        service_oid: &str,
        chain: &Self::Chain,
        private_key: &Self::PrivateKey,
        expiry: DateTime<Utc>,
        options: SignOptions,
    ) -> EnvelopeResult<Self>;

    /// Verify the envelope at `date`, returning the signer and plaintext.
    ///
    /// `expected_plaintext` is required for envelopes that do not embed their
    /// plaintext, and must match the embedded one otherwise.
    async fn verify(
        &self,
        expected_plaintext: Option<&[u8]>,
        service_oid: &str,
        date: DateTime<Utc>,
        trust_anchors: Option<&[Self::TrustAnchor]>,
    ) -> EnvelopeResult<EnvelopeVerification>;

    /// Serialise the envelope.
    fn serialise(&self) -> EnvelopeResult<Vec<u8>>;

    /// Parse a serialised envelope without verifying it.
    fn deserialise(serialisation: &[u8]) -> EnvelopeResult<Self>;
}
