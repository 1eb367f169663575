//! AX-Admin: build, inspect and validate axé attorney actions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use ax_02_membership_state::{CommittedState, StateConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ax_admin::commands;

/// AX-Admin: axé attorney action tool
#[derive(Parser, Debug)]
#[command(name = "ax-admin")]
#[command(about = "Build, inspect and validate attorney protocol actions")]
struct Args {
    /// RocksDB data directory (overrides AX_DATA_DIR; needs the rocksdb feature)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a seed and its token
    Keygen {
        /// Reuse an existing 32-byte hex seed
        #[arg(long)]
        seed: Option<String>,
    },
    /// Build a signed JoinNetwork action
    Join {
        #[arg(long)]
        seed: String,
        #[arg(long, default_value_t = 0)]
        epoch: u64,
        #[arg(long)]
        handle: String,
        #[arg(long, default_value = "{}")]
        details: String,
    },
    /// Build a signed UpdateInfo action
    Update {
        /// Signer seed
        #[arg(long)]
        seed: String,
        /// Author token, when signing as attorney
        #[arg(long)]
        author: Option<String>,
        #[arg(long, default_value_t = 0)]
        epoch: u64,
        #[arg(long)]
        details: String,
    },
    /// Build a signed GrantPowerOfAttorney action
    Grant {
        #[arg(long)]
        seed: String,
        #[arg(long)]
        attorney: String,
        /// Hex fingerprint of the attorney's key material
        #[arg(long)]
        fingerprint: Option<String>,
        #[arg(long, default_value_t = 0)]
        epoch: u64,
    },
    /// Build a signed RevokePowerOfAttorney action
    Revoke {
        #[arg(long)]
        seed: String,
        #[arg(long)]
        attorney: String,
        #[arg(long, default_value_t = 0)]
        epoch: u64,
    },
    /// Build a signed Void action carrying an outer-protocol payload
    Void {
        /// Signer seed
        #[arg(long)]
        seed: String,
        /// Author token, when signing as attorney
        #[arg(long)]
        author: Option<String>,
        /// 4-byte hex protocol code
        #[arg(long, default_value = "01000000")]
        protocol: String,
        /// Hex payload
        #[arg(long, default_value = "")]
        data: String,
        #[arg(long, default_value_t = 0)]
        epoch: u64,
    },
    /// Decode a hex action and print it as JSON
    Inspect { action: String },
    /// Validate hex actions in order over one overlay
    Validate {
        /// Current validator epoch
        #[arg(long)]
        epoch: u64,
        /// Incorporate the resulting mutation set
        #[arg(long)]
        commit: bool,
        #[arg(required = true)]
        actions: Vec<String>,
    },
}

fn decode_hex(label: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value.trim()).with_context(|| format!("{label} is not valid hex"))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Keygen { seed } => print_json(&commands::keygen(seed.as_deref())?)?,
        Command::Join {
            seed,
            epoch,
            handle,
            details,
        } => {
            let key = commands::parse_seed(&seed)?;
            let bytes = commands::build_join(&key, epoch, &handle, &details)?;
            println!("{}", hex::encode(bytes));
        }
        Command::Update {
            seed,
            author,
            epoch,
            details,
        } => {
            let key = commands::parse_seed(&seed)?;
            let author = author.as_deref().map(commands::parse_token).transpose()?;
            let bytes = commands::build_update(&key, author, epoch, &details)?;
            println!("{}", hex::encode(bytes));
        }
        Command::Grant {
            seed,
            attorney,
            fingerprint,
            epoch,
        } => {
            let key = commands::parse_seed(&seed)?;
            let attorney = commands::parse_token(&attorney)?;
            let bytes = commands::build_grant(&key, attorney, fingerprint.as_deref(), epoch)?;
            println!("{}", hex::encode(bytes));
        }
        Command::Revoke {
            seed,
            attorney,
            epoch,
        } => {
            let key = commands::parse_seed(&seed)?;
            let attorney = commands::parse_token(&attorney)?;
            let bytes = commands::build_revoke(&key, attorney, epoch)?;
            println!("{}", hex::encode(bytes));
        }
        Command::Void {
            seed,
            author,
            protocol,
            data,
            epoch,
        } => {
            let key = commands::parse_seed(&seed)?;
            let author = author.as_deref().map(commands::parse_token).transpose()?;
            let protocol = commands::parse_protocol(&protocol)?;
            let data = decode_hex("data", &data)?;
            let bytes = commands::build_void(&key, author, protocol, epoch, &data)?;
            println!("{}", hex::encode(bytes));
        }
        Command::Inspect { action } => {
            let bytes = decode_hex("action", &action)?;
            print_json(&commands::inspect(&bytes)?)?;
        }
        Command::Validate {
            epoch,
            commit,
            actions,
        } => {
            let mut config = StateConfig::from_env()?;
            if let Some(dir) = args.data_dir {
                config.data_dir = Some(dir);
            }
            let batch = actions
                .iter()
                .enumerate()
                .map(|(i, action)| decode_hex(&format!("action {i}"), action))
                .collect::<Result<Vec<_>>>()?;

            let state = CommittedState::open(&config).context("failed to open committed state")?;
            let report = commands::validate_batch(&state, epoch, &batch, commit);
            state.shutdown().context("failed to shut down committed state")?;
            print_json(&report?)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    run(Args::parse())
}
