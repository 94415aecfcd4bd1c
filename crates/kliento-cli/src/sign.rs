//! Token signing command.

use crate::keys::load_secret_key;
use crate::mock_chain::load_chain;
use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Duration, Utc};
use kliento_bundle::{TokenBundle, TokenBundleOptions};
use kliento_core::{ClaimSet, Token};
use kliento_envelope::{Chain, SecretKey, SignatureBundle};
use std::path::Path;

/// Parse a `KEY=VALUE` claim argument.
///
/// Only the first `=` separates key and value.
pub fn parse_claim(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("invalid claim '{arg}': expected KEY=VALUE"))?;

    if key.is_empty() {
        return Err(format!("invalid claim '{arg}': key must not be empty"));
    }

    Ok((key.to_string(), value.to_string()))
}

/// Build a claim set, rejecting repeated keys.
pub fn claim_set(claims: Vec<(String, String)>) -> Result<ClaimSet> {
    let mut claim_set = ClaimSet::new();
    for (key, value) in claims {
        if claim_set.contains_key(&key) {
            anyhow::bail!("Claim '{key}' given more than once");
        }
        claim_set.insert(key, value);
    }
    Ok(claim_set)
}

/// Sign a token for `audience` that expires `ttl` after `now`.
pub async fn sign_token(
    audience: &str,
    claims: ClaimSet,
    chain: &Chain,
    private_key: &SecretKey,
    now: DateTime<Utc>,
    ttl: u64,
) -> Result<TokenBundle<SignatureBundle>> {
    let expiry = i64::try_from(ttl)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .context("TTL is too large")?;
    let token = Token::with_claims(audience, claims);

    let bundle = TokenBundle::<SignatureBundle>::sign(
        &token,
        private_key,
        chain,
        expiry,
        TokenBundleOptions::default().with_start_date(now),
    )
    .await
    .context("Failed to sign token")?;

    Ok(bundle)
}

/// Format a bundle as an Authorization header value or bare base64.
pub fn format_bundle(bundle: &TokenBundle<SignatureBundle>, header: bool) -> Result<String> {
    if header {
        return Ok(bundle.to_authorization_header()?);
    }
    Ok(BASE64.encode(bundle.serialise()?))
}

/// Run the sign command.
pub async fn run(
    audience: &str,
    claims: Vec<(String, String)>,
    chain_path: &Path,
    key_path: &Path,
    ttl: u64,
    header: bool,
) -> Result<()> {
    let claims = claim_set(claims)?;
    let chain = load_chain(chain_path)?;
    let private_key = load_secret_key(key_path)
        .with_context(|| format!("Failed to load signing key from {}", key_path.display()))?;

    let bundle = sign_token(audience, claims, &chain, &private_key, Utc::now(), ttl).await?;
    tracing::info!(audience, expiry = %bundle.envelope().expiry(), "Signed token bundle");

    println!("{}", format_bundle(&bundle, header)?);
    Ok(())
}
