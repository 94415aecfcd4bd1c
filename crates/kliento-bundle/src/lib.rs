//! Signed Kliento token bundles
//!
//! A token bundle is a signature envelope whose embedded plaintext is a
//! serialised [`Token`](kliento_core::Token). Issuers sign tokens into
//! bundles; services parse bundles (typically from an `Authorization`
//! header) and verify them to obtain the token claims and the identity of
//! the signer.
//!
//! # Wire Format
//!
//! ```text
//! Authorization: Kliento <base64 of the envelope serialisation>
//! ```
//!
//! Serialised bundles larger than
//! [`MAX_TOKEN_BUNDLE_OCTETS`](kliento_core::MAX_TOKEN_BUNDLE_OCTETS) are
//! rejected before any parsing takes place.
//!
//! # Example
//!
//! ```no_run
//! use chrono::{Duration, Utc};
//! use kliento_bundle::{TokenBundle, TokenBundleOptions, TokenBundleVerificationOptions};
//! use kliento_core::{ClaimSet, Token};
//! use kliento_envelope::{MockTrustChain, SignatureBundle};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let trust_chain = MockTrustChain::generate("example.com", Some("alice"), Utc::now() + Duration::minutes(10))?;
//!
//! // Issuer
//! let claims = ClaimSet::from([("role".to_string(), "admin".to_string())]);
//! let bundle = TokenBundle::<SignatureBundle>::sign(
//!     &Token::with_claims("https://api.example.com", claims),
//!     &trust_chain.signer_private_key,
//!     &trust_chain.chain,
//!     Utc::now() + Duration::seconds(30),
//!     TokenBundleOptions::default(),
//! )
//! .await?;
//! let header = bundle.to_authorization_header()?;
//!
//! // Service
//! let received = TokenBundle::<SignatureBundle>::from_authorization_header(&header)?;
//! let options = TokenBundleVerificationOptions::new().with_trust_anchors(trust_chain.trust_anchors);
//! let verification = received.verify("https://api.example.com", &options).await?;
//! assert_eq!(verification.subject_id(), "alice@example.com");
//! # Ok(())
//! # }
//! ```

mod authorization;
mod error;
mod options;
mod token_bundle;

pub use error::{BoxError, BundleError};
pub use options::{TokenBundleOptions, TokenBundleVerification, TokenBundleVerificationOptions};
pub use token_bundle::TokenBundle;

/// Result type for token bundle operations.
pub type BundleResult<T> = Result<T, BundleError>;
