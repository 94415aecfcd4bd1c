//! Self-contained trust chains for tests and development.

use crate::signing::truncate;
use crate::{Certificate, Chain, EnvelopeError, EnvelopeResult, Member, TrustAnchor};
use chrono::{DateTime, Utc};
use minisign::{KeyPair, PublicKey, SecretKey};

/// A trust anchor, organisation and member generated on the fly.
///
/// The anchor and organisation keys are discarded once the certificates
/// are issued, so the chain cannot be extended later.
pub struct MockTrustChain {
    /// Certificates of the signer.
    pub chain: Chain,

    /// Key the signer uses to produce envelopes.
    pub signer_private_key: SecretKey,

    /// Public half of `signer_private_key`.
    pub signer_public_key: PublicKey,

    /// Anchors that vouch for the organisation.
    pub trust_anchors: Vec<TrustAnchor>,
}

impl MockTrustChain {
    /// Generate a chain valid from now until `expiry`.
    ///
    /// A `user` of `None` makes the organisation itself the signer.
    pub fn generate(
        organisation: &str,
        user: Option<&str>,
        expiry: DateTime<Utc>,
    ) -> EnvelopeResult<Self> {
        let KeyPair { pk, sk } = generate_keypair()?;
        let (chain, trust_anchors) = Self::certify(organisation, user, expiry, &pk)?;

        Ok(Self {
            chain,
            signer_private_key: sk,
            signer_public_key: pk,
            trust_anchors,
        })
    }

    /// Certify an existing member key under a freshly generated anchor and
    /// organisation.
    pub fn certify(
        organisation: &str,
        user: Option<&str>,
        expiry: DateTime<Utc>,
        member_public_key: &PublicKey,
    ) -> EnvelopeResult<(Chain, Vec<TrustAnchor>)> {
        let start = truncate(Utc::now());
        let anchor = generate_keypair()?;
        let organisation_keys = generate_keypair()?;

        let organisation_certificate = Certificate::issue(
            &Member::organisation(organisation),
            &organisation_keys.pk,
            start,
            expiry,
            &anchor.sk,
        )?;
        let member = Member {
            organisation: organisation.to_string(),
            user: user.map(str::to_string),
        };
        let member_certificate = Certificate::issue(
            &member,
            member_public_key,
            start,
            expiry,
            &organisation_keys.sk,
        )?;

        tracing::debug!(member = %member, expiry = %expiry, "generated mock trust chain");

        let chain = Chain {
            organisation_certificate,
            member_certificate,
        };
        Ok((chain, vec![TrustAnchor::new(&anchor.pk)]))
    }
}

fn generate_keypair() -> EnvelopeResult<KeyPair> {
    KeyPair::generate_unencrypted_keypair().map_err(|e| EnvelopeError::SigningFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use chrono::Duration;

    #[test]
    fn MockTrustChain___generate___certifies_signer_key() {
        let trust_chain =
            MockTrustChain::generate("example.com", Some("alice"), Utc::now() + Duration::minutes(1))
                .unwrap();

        let (member, key) = trust_chain.chain.verify(&trust_chain.trust_anchors).unwrap();

        assert_eq!(member, Member::user("example.com", "alice"));
        assert_eq!(key.to_base64(), trust_chain.signer_public_key.to_base64());
    }

    #[test]
    fn MockTrustChain___generate___without_user___signs_as_organisation() {
        let trust_chain =
            MockTrustChain::generate("example.com", None, Utc::now() + Duration::minutes(1)).unwrap();

        assert_eq!(
            trust_chain.chain.member_certificate.subject(),
            Member::organisation("example.com")
        );
    }

    #[test]
    fn MockTrustChain___generate___expiry_in_past___returns_error() {
        let result = MockTrustChain::generate("example.com", None, Utc::now() - Duration::hours(1));

        assert!(matches!(
            result,
            Err(EnvelopeError::InvalidValidityPeriod { .. })
        ));
    }

    #[test]
    fn MockTrustChain___certify___uses_fresh_anchor_each_time() {
        let KeyPair { pk, .. } = KeyPair::generate_unencrypted_keypair().unwrap();
        let expiry = Utc::now() + Duration::minutes(1);

        let (_, first) = MockTrustChain::certify("example.com", None, expiry, &pk).unwrap();
        let (_, second) = MockTrustChain::certify("example.com", None, expiry, &pk).unwrap();

        assert_ne!(first, second);
    }
}
