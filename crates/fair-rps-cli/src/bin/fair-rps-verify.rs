//! Fair RPS Verifier
//!
//! Recomputes HMAC(key, move) and checks it against the digest that was
//! published before the player chose.

use clap::Parser;
use fair_rps_core::crypto::{verify_move, HmacSha256Hasher, MoveDigest, SecretKey};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit code for a well-formed digest that does not match
const MISMATCH: u8 = 1;
/// Exit code for malformed hex input
const MALFORMED: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "fair-rps-verify")]
#[command(about = "Check a revealed fair-rps key against the published HMAC", long_about = None)]
struct Args {
    /// Revealed key (the `HMAC key:` line)
    #[arg(long)]
    key: String,

    /// Published digest (the `HMAC:` line)
    #[arg(long)]
    digest: String,

    /// Log filter directive
    #[arg(long, env = "FAIR_RPS_LOG", default_value = "warn")]
    log: String,

    /// Computer move name, exactly as displayed
    #[arg(value_name = "MOVE", allow_hyphen_values = true)]
    move_name: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let key: SecretKey = match args.key.parse() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Invalid key: {e}");
            return ExitCode::from(MALFORMED);
        }
    };
    let digest: MoveDigest = match args.digest.parse() {
        Ok(digest) => digest,
        Err(e) => {
            eprintln!("Invalid digest: {e}");
            return ExitCode::from(MALFORMED);
        }
    };

    debug!(%digest, move_name = %args.move_name, "verifying");

    if verify_move(&HmacSha256Hasher, &key, &args.move_name, &digest) {
        println!("OK: HMAC matches move {:?}", args.move_name);
        ExitCode::SUCCESS
    } else {
        println!("MISMATCH: HMAC does not match move {:?}", args.move_name);
        ExitCode::from(MISMATCH)
    }
}
