//! Token bundle verification command.

use crate::mock_chain::load_trust_anchors;
use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use kliento_bundle::{
    BundleError, TokenBundle, TokenBundleVerification, TokenBundleVerificationOptions,
};
use kliento_core::{AUTHORIZATION_SCHEME, KlientoConfig};
use kliento_envelope::{SignatureBundle, TrustAnchor};
use std::path::PathBuf;

/// Where the bundle to verify comes from.
pub enum Input {
    /// An Authorization header value.
    Header(String),
    /// A file holding either a header value or bare base64.
    File(PathBuf),
}

/// Parse a bundle from a header value or bare base64.
pub fn parse_bundle(value: &str, max_octets: usize) -> Result<TokenBundle<SignatureBundle>> {
    let value = value.trim();

    let has_scheme = value
        .get(..AUTHORIZATION_SCHEME.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(AUTHORIZATION_SCHEME));
    if has_scheme || value.contains(' ') {
        return Ok(TokenBundle::<SignatureBundle>::from_authorization_header_with_limit(
            value, max_octets,
        )?);
    }

    let serialisation = BASE64
        .decode(value)
        .map_err(|e| BundleError::Malformed(Box::new(e)))?;
    Ok(TokenBundle::<SignatureBundle>::deserialise_with_limit(
        &serialisation,
        max_octets,
    )?)
}

/// Verify `bundle` for `audience`.
pub async fn verify_bundle(
    bundle: &TokenBundle<SignatureBundle>,
    audience: &str,
    trust_anchors: Vec<TrustAnchor>,
) -> Result<TokenBundleVerification> {
    let options = TokenBundleVerificationOptions::new().with_trust_anchors(trust_anchors);
    Ok(bundle.verify(audience, &options).await?)
}

/// Render a verification as JSON.
pub fn to_json(verification: &TokenBundleVerification) -> serde_json::Value {
    serde_json::json!({
        "subject": verification.subject_id(),
        "claims": verification.claims,
    })
}

fn read_input(input: Input) -> Result<String> {
    match input {
        Input::Header(header) => Ok(header),
        Input::File(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read bundle: {}", path.display())),
    }
}

fn anchors_path(anchors: Option<PathBuf>, config: &KlientoConfig) -> Result<PathBuf> {
    anchors
        .or_else(|| config.trust_anchors_path.clone())
        .context("No trust anchors given: pass --anchors or set trust_anchors_path")
}

/// Run the verify command.
pub async fn run(
    audience: &str,
    input: Input,
    anchors: Option<PathBuf>,
    config: &KlientoConfig,
) -> Result<()> {
    let anchors_path = anchors_path(anchors, config)?;
    let trust_anchors = load_trust_anchors(&anchors_path)?;

    let bundle = parse_bundle(&read_input(input)?, config.max_bundle_octets)
        .context("Failed to parse token bundle")?;
    let verification = verify_bundle(&bundle, audience, trust_anchors)
        .await
        .context("Token bundle verification failed")?;

    tracing::info!(audience, subject = %verification.subject, "Verified token bundle");
    println!("{}", serde_json::to_string_pretty(&to_json(&verification))?);
    Ok(())
}
