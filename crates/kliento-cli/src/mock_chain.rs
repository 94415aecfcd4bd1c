//! Development trust chains.
//!
//! Certifies a signing key under a freshly generated anchor and
//! organisation. The anchor and organisation secret keys are discarded, so
//! the chain can only be reproduced by running the command again.

use crate::keys::load_public_key;
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use kliento_envelope::{Chain, MockTrustChain, TrustAnchor};
use std::path::{Path, PathBuf};

pub const CHAIN_FILE: &str = "chain.json";
pub const TRUST_ANCHORS_FILE: &str = "trust-anchors.json";

/// Run the mock-chain command.
pub fn run(
    organisation: &str,
    user: Option<&str>,
    public_key_path: &Path,
    valid_days: u32,
    output_dir: &Path,
) -> Result<()> {
    let public_key = load_public_key(public_key_path)?;
    let expiry = Utc::now() + Duration::days(i64::from(valid_days));

    let (chain, trust_anchors) = MockTrustChain::certify(organisation, user, expiry, &public_key)
        .context("Failed to certify public key")?;
    let (chain_path, anchors_path) = write(output_dir, &chain, &trust_anchors)?;

    let subject = chain.member_certificate.subject();
    tracing::info!(subject = %subject, %expiry, "Created development trust chain");

    println!("✓ Trust chain created for {subject}");
    println!();
    println!("  Chain:         {}", chain_path.display());
    println!("  Trust anchors: {}", anchors_path.display());
    println!("  Expires:       {expiry}");

    Ok(())
}

/// Write the chain and its trust anchors into `output_dir`.
pub fn write(
    output_dir: &Path,
    chain: &Chain,
    trust_anchors: &[TrustAnchor],
) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let chain_path = output_dir.join(CHAIN_FILE);
    std::fs::write(&chain_path, chain.to_json()?)
        .with_context(|| format!("Failed to write {}", chain_path.display()))?;

    let anchors_path = output_dir.join(TRUST_ANCHORS_FILE);
    std::fs::write(&anchors_path, serde_json::to_string_pretty(trust_anchors)?)
        .with_context(|| format!("Failed to write {}", anchors_path.display()))?;

    Ok((chain_path, anchors_path))
}

/// Load a chain written by [`write`].
pub fn load_chain(path: &Path) -> Result<Chain> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read chain: {}", path.display()))?;
    Chain::from_json(&json).with_context(|| format!("Invalid chain: {}", path.display()))
}

/// Load trust anchors written by [`write`].
pub fn load_trust_anchors(path: &Path) -> Result<Vec<TrustAnchor>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trust anchors: {}", path.display()))?;
    let trust_anchors: Vec<TrustAnchor> = serde_json::from_str(&json)
        .with_context(|| format!("Invalid trust anchors: {}", path.display()))?;

    // Anchors are decoded lazily during verification; catch bad keys here
    for anchor in &trust_anchors {
        anchor
            .public_key()
            .with_context(|| format!("Invalid trust anchor in {}", path.display()))?;
    }

    Ok(trust_anchors)
}
