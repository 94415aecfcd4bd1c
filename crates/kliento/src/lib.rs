//! # kliento
//!
//! Compact signed access tokens for service-to-service authorization.
//!
//! A Kliento token names an audience and carries optional string claims.
//! Issuers sign tokens into token bundles bound to an organisational trust
//! chain, with an expiry and an optional start date. Services receive
//! bundles in an `Authorization: Kliento <base64>` header and verify them
//! against their trust anchors, learning the claims and who signed them.
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! kliento = "0.3"
//! ```
//!
//! ## Issuing and Verifying
//!
//! ```no_run
//! use kliento::prelude::*;
//! use kliento::chrono::{Duration, Utc};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Development chain; production issuers load their own chain and key
//! let trust_chain = MockTrustChain::generate("example.com", Some("alice"), Utc::now() + Duration::hours(1))?;
//!
//! let token = Token::with_claims(
//!     "https://api.example.com",
//!     ClaimSet::from([("role".to_string(), "admin".to_string())]),
//! );
//! let bundle = TokenBundle::<SignatureBundle>::sign(
//!     &token,
//!     &trust_chain.signer_private_key,
//!     &trust_chain.chain,
//!     Utc::now() + Duration::minutes(5),
//!     TokenBundleOptions::default(),
//! )
//! .await?;
//! let header = bundle.to_authorization_header()?;
//!
//! let received = TokenBundle::<SignatureBundle>::from_authorization_header(&header)?;
//! let verification = received
//!     .verify(
//!         "https://api.example.com",
//!         &TokenBundleVerificationOptions::new().with_trust_anchors(trust_chain.trust_anchors),
//!     )
//!     .await?;
//! println!("{} may act as {:?}", verification.subject_id(), verification.claims);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`kliento_core`] - Token codec, constants and configuration
//! - [`kliento_envelope`] - Signature envelope contract and its minisign realisation
//! - [`kliento_bundle`] - Token bundle signing, parsing and verification
//! - [`kliento_logging`] - Tracing subscriber setup

// Re-export core types
pub use kliento_core::{
    AUTHORIZATION_SCHEME, ClaimSet, KLIENTO_OID_ARC, KLIENTO_SERVICE_OID, KlientoConfig, LogLevel,
    MAX_TOKEN_BUNDLE_OCTETS, Token, TokenError, TokenResult,
};

// Re-export envelope types
pub use kliento_envelope::{
    Certificate, Chain, EnvelopeError, EnvelopeResult, EnvelopeVerification, Member,
    MockTrustChain, SignOptions, SignatureBundle, SignatureEnvelope, TrustAnchor,
};

// Re-export bundle types
pub use kliento_bundle::{
    BundleError, BundleResult, TokenBundle, TokenBundleOptions, TokenBundleVerification,
    TokenBundleVerificationOptions,
};

// Re-export common dependencies
pub use async_trait::async_trait;
pub use chrono;
pub use tracing;

/// Logging setup.
pub mod logging {
    pub use kliento_logging::{ReloadHandle, init_logging, init_logging_from_config, level_filter};
}

/// Prelude module for convenient imports.
///
/// Use `use kliento::prelude::*;` to import commonly used types.
///
/// This includes:
/// - Tokens: `Token`, `ClaimSet`
/// - Bundles: `TokenBundle`, `TokenBundleOptions`, `TokenBundleVerificationOptions`
/// - Envelope: `SignatureBundle`, `SignatureEnvelope`, `TrustAnchor`, `Chain`, `Member`
/// - Errors: `BundleError`, `BundleResult`
pub mod prelude {
    pub use crate::{
        BundleError, BundleResult, Chain, ClaimSet, Member, MockTrustChain, SignatureBundle,
        SignatureEnvelope, Token, TokenBundle, TokenBundleOptions, TokenBundleVerification,
        TokenBundleVerificationOptions, TrustAnchor, async_trait,
    };
}
