//! The prelude is enough to issue and verify a token bundle.

#![allow(non_snake_case)]

use kliento::chrono::{Duration, Utc};
use kliento::prelude::*;

#[tokio::test]
async fn prelude___issue_and_verify___round_trips_through_header() {
    let trust_chain =
        MockTrustChain::generate("example.com", None, Utc::now() + Duration::hours(1)).unwrap();
    let token = Token::with_claims(
        "svc",
        ClaimSet::from([("scope".to_string(), "read".to_string())]),
    );

    let header = TokenBundle::<SignatureBundle>::sign(
        &token,
        &trust_chain.signer_private_key,
        &trust_chain.chain,
        Utc::now() + Duration::minutes(1),
        TokenBundleOptions::default(),
    )
    .await
    .unwrap()
    .to_authorization_header()
    .unwrap();
    let verification = TokenBundle::<SignatureBundle>::from_authorization_header(&header)
        .unwrap()
        .verify(
            "svc",
            &TokenBundleVerificationOptions::new().with_trust_anchors(trust_chain.trust_anchors),
        )
        .await
        .unwrap();

    assert_eq!(verification.subject, Member::organisation("example.com"));
    assert_eq!(verification.claims["scope"], "read");
}

#[test]
fn prelude___authorization_scheme___is_kliento() {
    assert_eq!(kliento::AUTHORIZATION_SCHEME, "Kliento");
    assert_eq!(kliento::MAX_TOKEN_BUNDLE_OCTETS, 16384);
}
