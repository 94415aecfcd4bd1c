//! Loading keys written by `keygen`.

use anyhow::{Context, Result};
use minisign::{PublicKey, PublicKeyBox, SecretKey, SecretKeyBox};
use std::path::Path;

/// Environment variable consulted before prompting for a key password.
pub const PASSWORD_ENV: &str = "KLIENTO_KEY_PASSWORD";

/// Read a key password from [`PASSWORD_ENV`], or prompt for it.
pub fn read_password(prompt: &str) -> Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }

    println!("{prompt}");
    rpassword::read_password().context("Failed to read password")
}

/// Load and decrypt a secret key file.
pub fn load_secret_key(path: &Path) -> Result<SecretKey> {
    let key_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read key file: {}", path.display()))?;
    let secret_key_box = SecretKeyBox::from_string(&key_str).context("Invalid key file format")?;

    let password = read_password("Enter password for signing key: ")?;

    secret_key_box
        .into_secret_key(Some(password))
        .map_err(|_| anyhow::anyhow!("Invalid password or corrupted key file"))
}

/// Load a public key file.
///
/// Accepts the minisign public key file format or a bare base64 key.
pub fn load_public_key(path: &Path) -> Result<PublicKey> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read public key file: {}", path.display()))?;

    parse_public_key(&content)
        .with_context(|| format!("Invalid public key file: {}", path.display()))
}

fn parse_public_key(content: &str) -> Result<PublicKey> {
    let content = content.trim();

    if content.lines().count() > 1 {
        let public_key_box = PublicKeyBox::from_string(content)?;
        return Ok(public_key_box.into_public_key()?);
    }

    Ok(PublicKey::from_base64(content)?)
}
