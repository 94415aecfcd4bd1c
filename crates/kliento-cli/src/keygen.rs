//! Generate minisign key pairs for signing token bundles.

use crate::keys::{PASSWORD_ENV, read_password};
use anyhow::{Context, Result};
use minisign::KeyPair;
use std::path::{Path, PathBuf};

/// Generate a new minisign key pair.
///
/// The secret key is encrypted with a password provided by the user, or
/// taken from `KLIENTO_KEY_PASSWORD` when set. The public key is written
/// next to it with a `.pub` extension.
///
/// # Arguments
/// * `output` - Optional output path for the secret key. If None, uses ~/.kliento/signing.key
/// * `force` - If true, overwrites existing keys without prompting
pub fn run(output: Option<PathBuf>, force: bool) -> Result<()> {
    let secret_key_path = match output {
        Some(path) => path,
        None => default_key_path()?,
    };

    let public_key_path = secret_key_path.with_extension("pub");

    // Check if keys already exist
    if secret_key_path.exists() && !force {
        anyhow::bail!(
            "Secret key already exists at {}. Use --force to overwrite.",
            secret_key_path.display()
        );
    }

    println!("Generating new minisign key pair...");
    println!();

    let password = read_new_password()?;

    let KeyPair { pk, sk } = KeyPair::generate_encrypted_keypair(Some(password))
        .context("Failed to generate key pair")?;

    let secret_key_box = sk.to_box(None).context("Failed to encode secret key")?;
    std::fs::write(&secret_key_path, secret_key_box.to_string())
        .context("Failed to write secret key")?;

    let public_key_box = pk.to_box().context("Failed to encode public key")?;
    std::fs::write(&public_key_path, public_key_box.to_string())
        .context("Failed to write public key")?;

    println!();
    println!("✓ Key pair generated successfully!");
    println!();
    println!("  Secret key: {}", secret_key_path.display());
    println!("  Public key: {}", public_key_path.display());
    println!();
    println!("Public key (for distribution):");
    println!("{}", pk.to_base64());
    println!();
    println!("Keep your secret key safe and never commit it to version control!");

    Ok(())
}

/// `~/.kliento/signing.key`, creating the directory if needed
fn default_key_path() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    let kliento_dir = Path::new(&home).join(".kliento");
    std::fs::create_dir_all(&kliento_dir).context("Failed to create ~/.kliento directory")?;
    Ok(kliento_dir.join("signing.key"))
}

fn read_new_password() -> Result<String> {
    let password = read_password("Enter password to encrypt secret key: ")?;
    check_password(&password)?;

    if std::env::var(PASSWORD_ENV).is_ok() {
        return Ok(password);
    }

    println!("Confirm password: ");
    let password_confirm =
        rpassword::read_password().context("Failed to read password confirmation")?;
    confirm_password(&password, &password_confirm)?;

    Ok(password)
}

fn check_password(password: &str) -> Result<()> {
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }
    Ok(())
}

fn confirm_password(password: &str, confirmation: &str) -> Result<()> {
    if password != confirmation {
        anyhow::bail!("Passwords do not match");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn check_password___empty___returns_error() {
        let result = check_password("");

        assert_eq!(result.unwrap_err().to_string(), "Password cannot be empty");
    }

    #[test]
    fn check_password___non_empty___is_accepted() {
        assert!(check_password("correct horse").is_ok());
    }

    #[test]
    fn confirm_password___mismatch___returns_error() {
        let result = confirm_password("one", "two");

        assert_eq!(result.unwrap_err().to_string(), "Passwords do not match");
    }

    #[test]
    fn run___existing_key_without_force___returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let key_path = temp_dir.path().join("signing.key");
        std::fs::write(&key_path, "existing").unwrap();

        let result = run(Some(key_path.clone()), false);

        assert!(result.unwrap_err().to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&key_path).unwrap(), "existing");
    }
}
