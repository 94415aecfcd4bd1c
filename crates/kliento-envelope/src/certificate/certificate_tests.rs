#![allow(non_snake_case)]

use super::*;
use chrono::Duration;
use minisign::KeyPair;

fn keypair() -> KeyPair {
    KeyPair::generate_unencrypted_keypair().unwrap()
}

fn issue_chain(anchor: &KeyPair, organisation: &KeyPair, member: &KeyPair) -> Chain {
    let start = Utc::now();
    let expiry = start + Duration::minutes(5);
    Chain {
        organisation_certificate: Certificate::issue(
            &Member::organisation("example.com"),
            &organisation.pk,
            start,
            expiry,
            &anchor.sk,
        )
        .unwrap(),
        member_certificate: Certificate::issue(
            &Member::user("example.com", "alice"),
            &member.pk,
            start,
            expiry,
            &organisation.sk,
        )
        .unwrap(),
    }
}

#[test]
fn Certificate___issue___truncates_dates_to_seconds() {
    let issuer = keypair();
    let subject = keypair();
    let start = DateTime::from_timestamp(1_700_000_000, 500_000_000).unwrap();

    let certificate = Certificate::issue(
        &Member::organisation("example.com"),
        &subject.pk,
        start,
        start + Duration::seconds(10),
        &issuer.sk,
    )
    .unwrap();

    assert_eq!(certificate.start().timestamp_subsec_nanos(), 0);
    assert_eq!(certificate.expiry().timestamp(), 1_700_000_010);
}

#[test]
fn Certificate___issue___expiry_before_start___returns_error() {
    let issuer = keypair();
    let start = Utc::now();

    let result = Certificate::issue(
        &Member::organisation("example.com"),
        &issuer.pk,
        start,
        start - Duration::seconds(5),
        &issuer.sk,
    );

    assert!(matches!(
        result,
        Err(EnvelopeError::InvalidValidityPeriod { .. })
    ));
}

#[test]
fn Certificate___verify_issuer___accepts_issuer_key() {
    let issuer = keypair();
    let subject = keypair();
    let start = Utc::now();

    let certificate = Certificate::issue(
        &Member::user("example.com", "alice"),
        &subject.pk,
        start,
        start + Duration::minutes(1),
        &issuer.sk,
    )
    .unwrap();

    certificate.verify_issuer(&issuer.pk).unwrap();
    assert_eq!(certificate.subject(), Member::user("example.com", "alice"));
}

#[test]
fn Certificate___verify_issuer___tampered_subject___returns_error() {
    let issuer = keypair();
    let subject = keypair();
    let start = Utc::now();
    let mut certificate = Certificate::issue(
        &Member::user("example.com", "alice"),
        &subject.pk,
        start,
        start + Duration::minutes(1),
        &issuer.sk,
    )
    .unwrap();

    certificate.user = Some("mallory".to_string());

    assert!(matches!(
        certificate.verify_issuer(&issuer.pk),
        Err(EnvelopeError::InvalidCertificate(_))
    ));
}

#[test]
fn Chain___verify___returns_member_and_key() {
    let (anchor, organisation, member) = (keypair(), keypair(), keypair());
    let chain = issue_chain(&anchor, &organisation, &member);

    let (signer, signer_key) = chain.verify(&[TrustAnchor::new(&anchor.pk)]).unwrap();

    assert_eq!(signer.id(), "alice@example.com");
    assert_eq!(signer_key.to_base64(), member.pk.to_base64());
}

#[test]
fn Chain___verify___without_anchors___returns_error() {
    let (anchor, organisation, member) = (keypair(), keypair(), keypair());
    let chain = issue_chain(&anchor, &organisation, &member);

    assert!(matches!(chain.verify(&[]), Err(EnvelopeError::NoTrustAnchors)));
}

#[test]
fn Chain___verify___unknown_anchor___returns_untrusted_organisation() {
    let (anchor, organisation, member) = (keypair(), keypair(), keypair());
    let chain = issue_chain(&anchor, &organisation, &member);
    let stranger = keypair();

    let result = chain.verify(&[TrustAnchor::new(&stranger.pk)]);

    assert!(matches!(
        result,
        Err(EnvelopeError::UntrustedOrganisation(org)) if org == "example.com"
    ));
}

#[test]
fn Chain___verify___any_matching_anchor___is_enough() {
    let (anchor, organisation, member) = (keypair(), keypair(), keypair());
    let chain = issue_chain(&anchor, &organisation, &member);
    let stranger = keypair();

    let result = chain.verify(&[TrustAnchor::new(&stranger.pk), TrustAnchor::new(&anchor.pk)]);

    assert!(result.is_ok());
}

#[test]
fn Chain___verify___undecodable_anchor___is_skipped() {
    let (anchor, organisation, member) = (keypair(), keypair(), keypair());
    let chain = issue_chain(&anchor, &organisation, &member);
    let undecodable = TrustAnchor {
        public_key: "not a key".to_string(),
    };

    let result = chain.verify(&[undecodable, TrustAnchor::new(&anchor.pk)]);

    assert!(result.is_ok());
}

#[test]
fn Chain___verify___only_undecodable_anchors___returns_untrusted_organisation() {
    let (anchor, organisation, member) = (keypair(), keypair(), keypair());
    let chain = issue_chain(&anchor, &organisation, &member);
    let undecodable = TrustAnchor {
        public_key: "not a key".to_string(),
    };

    let result = chain.verify(&[undecodable]);

    assert!(matches!(result, Err(EnvelopeError::UntrustedOrganisation(_))));
}

#[test]
fn Chain___verify___member_from_other_organisation___returns_error() {
    let (anchor, organisation, member) = (keypair(), keypair(), keypair());
    let start = Utc::now();
    let mut chain = issue_chain(&anchor, &organisation, &member);
    chain.member_certificate = Certificate::issue(
        &Member::user("other.example", "bob"),
        &member.pk,
        start,
        start + Duration::minutes(1),
        &organisation.sk,
    )
    .unwrap();

    let result = chain.verify(&[TrustAnchor::new(&anchor.pk)]);

    assert!(matches!(result, Err(EnvelopeError::InvalidCertificate(_))));
}

#[test]
fn Chain___json___roundtrips() {
    let (anchor, organisation, member) = (keypair(), keypair(), keypair());
    let chain = issue_chain(&anchor, &organisation, &member);

    let parsed = Chain::from_json(&chain.to_json().unwrap()).unwrap();

    assert_eq!(parsed, chain);
}

#[test]
fn TrustAnchor___from_base64___rejects_garbage() {
    assert!(matches!(
        TrustAnchor::from_base64("not a key"),
        Err(EnvelopeError::InvalidPublicKey(_))
    ));
}

#[test]
fn Chain___from_json___unreadable_signature___returns_malformed() {
    let (anchor, organisation, member) = (keypair(), keypair(), keypair());
    let mut chain = issue_chain(&anchor, &organisation, &member);
    chain.member_certificate.signature = "not a minisign signature".to_string();

    let result = Chain::from_json(&chain.to_json().unwrap());

    assert!(matches!(result, Err(EnvelopeError::Malformed(_))));
}

#[test]
fn Chain___from_json___undecodable_public_key___returns_malformed() {
    let (anchor, organisation, member) = (keypair(), keypair(), keypair());
    let mut chain = issue_chain(&anchor, &organisation, &member);
    chain.organisation_certificate.public_key = "bm90IGEga2V5".to_string();

    let result = Chain::from_json(&chain.to_json().unwrap());

    assert!(matches!(result, Err(EnvelopeError::Malformed(_))));
}
