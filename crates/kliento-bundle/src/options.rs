//! Signing and verification options for token bundles.

use chrono::{DateTime, Utc};
use kliento_core::ClaimSet;
use kliento_envelope::Member;

/// Options for [`TokenBundle::sign`](crate::TokenBundle::sign).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenBundleOptions {
    /// Start of the validity period. Defaults to the signing time.
    pub start_date: Option<DateTime<Utc>>,
}

impl TokenBundleOptions {
    pub fn with_start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }
}

/// Options for [`TokenBundle::verify`](crate::TokenBundle::verify).
///
/// `A` is the trust anchor type of the envelope service.
#[derive(Debug, Clone)]
pub struct TokenBundleVerificationOptions<A> {
    /// Date to verify at. Defaults to the verification time.
    pub date: Option<DateTime<Utc>>,

    /// Anchors that may certify the signing organisation.
    pub trust_anchors: Option<Vec<A>>,
}

impl<A> Default for TokenBundleVerificationOptions<A> {
    fn default() -> Self {
        Self {
            date: None,
            trust_anchors: None,
        }
    }
}

impl<A> TokenBundleVerificationOptions<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_trust_anchors(mut self, trust_anchors: Vec<A>) -> Self {
        self.trust_anchors = Some(trust_anchors);
        self
    }
}

/// Outcome of a successful token bundle verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBundleVerification {
    /// Claims carried by the token. Empty when the token had none.
    pub claims: ClaimSet,

    /// Member whose key signed the bundle.
    pub subject: Member,
}

impl TokenBundleVerification {
    /// Identifier of the signer, such as `alice@example.com`.
    pub fn subject_id(&self) -> String {
        self.subject.id()
    }
}
