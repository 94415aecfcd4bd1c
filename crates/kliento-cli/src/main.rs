//! kliento CLI - Issue and verify Kliento token bundles
//!
//! Commands:
//! - `kliento keygen` - Generate a signing key pair
//! - `kliento mock-chain` - Certify a key into a development trust chain
//! - `kliento sign` - Sign a token into a bundle
//! - `kliento verify` - Verify a bundle and print its claims

use clap::{ArgGroup, Parser, Subcommand};
use kliento_core::LogLevel;
use std::path::PathBuf;

mod config;
mod keygen;
mod keys;
mod mock_chain;
mod sign;
mod verify;

#[derive(Parser)]
#[command(name = "kliento")]
#[command(author, version, about = "Issue and verify Kliento token bundles", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a password-protected signing key pair
    Keygen {
        /// Secret key path (default: ~/.kliento/signing.key)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing keys
        #[arg(short, long)]
        force: bool,
    },

    /// Certify a public key into a development trust chain
    MockChain {
        /// Organisation the key signs for
        #[arg(long)]
        organisation: String,

        /// User within the organisation (default: the organisation itself)
        #[arg(long)]
        user: Option<String>,

        /// Public key file written by `keygen`
        #[arg(long)]
        public_key: PathBuf,

        /// Days until the certificates expire
        #[arg(long, default_value_t = 30)]
        valid_days: u32,

        /// Directory for chain.json and trust-anchors.json
        #[arg(long)]
        output_dir: PathBuf,
    },

    /// Sign a token into a bundle
    Sign {
        /// Audience the token is issued for
        #[arg(short, long)]
        audience: String,

        /// Claim as KEY=VALUE (repeatable)
        #[arg(short, long = "claim", value_parser = sign::parse_claim)]
        claims: Vec<(String, String)>,

        /// Chain file written by `mock-chain`
        #[arg(long)]
        chain: PathBuf,

        /// Secret key file written by `keygen`
        #[arg(long)]
        key: PathBuf,

        /// Lifetime in seconds (default: from configuration)
        #[arg(long)]
        ttl: Option<u64>,

        /// Print an Authorization header value instead of bare base64
        #[arg(long)]
        header: bool,
    },

    /// Verify a bundle and print its subject and claims
    #[command(group(ArgGroup::new("input").required(true).args(["header", "file"])))]
    Verify {
        /// Audience the bundle must be issued for
        #[arg(short, long)]
        audience: String,

        /// Authorization header value
        #[arg(long)]
        header: Option<String>,

        /// File holding the output of `sign`
        #[arg(long)]
        file: Option<PathBuf>,

        /// Trust anchors file (default: from configuration)
        #[arg(long)]
        anchors: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.log_level = level.to_string();
    }
    kliento_logging::init_logging_from_config(&config);

    match cli.command {
        Commands::Keygen { output, force } => {
            keygen::run(output, force)?;
        }
        Commands::MockChain {
            organisation,
            user,
            public_key,
            valid_days,
            output_dir,
        } => {
            mock_chain::run(
                &organisation,
                user.as_deref(),
                &public_key,
                valid_days,
                &output_dir,
            )?;
        }
        Commands::Sign {
            audience,
            claims,
            chain,
            key,
            ttl,
            header,
        } => {
            let ttl = ttl.unwrap_or(config.default_ttl_seconds);
            sign::run(&audience, claims, &chain, &key, ttl, header).await?;
        }
        Commands::Verify {
            audience,
            header,
            file,
            anchors,
        } => {
            let input = match (header, file) {
                (Some(header), _) => verify::Input::Header(header),
                (None, Some(file)) => verify::Input::File(file),
                (None, None) => anyhow::bail!("Either --header or --file is required"),
            };
            verify::run(&audience, input, anchors, &config).await?;
        }
    }

    Ok(())
}
