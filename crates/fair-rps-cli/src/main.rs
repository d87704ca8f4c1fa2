//! Fair RPS
//!
//! Terminal game: prints the rules table, commits to a computer move with an
//! HMAC, reads the player's move, then reveals the result and the key.

use clap::Parser;
use fair_rps_core::{
    crypto::{CryptoRandom, HmacSha256Hasher},
    error::Error,
    run, LineInput, RoundEnd,
};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fair-rps")]
#[command(about = "Provably-fair rock-paper-scissors for any odd number of moves", long_about = None)]
#[command(after_help = "Options go before the moves; every argument from the first move on is a move.\n\
Use `--` when the first move itself starts with `-`: fair-rps -- -x y z")]
struct Args {
    /// Print a JSON transcript of the round after the result
    #[arg(long)]
    json: bool,

    /// Log filter directive
    #[arg(long, env = "FAIR_RPS_LOG", default_value = "warn")]
    log: String,

    /// Move names, odd count >= 3, no duplicates (e.g. rock paper scissors)
    #[arg(value_name = "MOVES", trailing_var_arg = true, allow_hyphen_values = true)]
    moves: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing on stderr so stdout carries only the game
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut input = LineInput::new(stdin.lock());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let end = run(
        &args.moves,
        &mut input,
        &mut out,
        &mut CryptoRandom::os(),
        &HmacSha256Hasher,
    );

    match end {
        Ok(RoundEnd::Resolved(round)) => {
            info!(round_id = %round.id(), outcome = %round.outcome(), "round complete");
            if args.json {
                if let Err(e) = print_transcript(&mut out, &round.transcript()) {
                    error!("failed to write transcript: {}", e);
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Ok(RoundEnd::Exited) => ExitCode::SUCCESS,
        Err(Error::Config(e)) => {
            eprintln!("Invalid input: {e}. Please provide an odd number (at least 3) of non-repeating moves.");
            eprintln!("Example: fair-rps rock paper scissors");
            ExitCode::FAILURE
        }
        Err(Error::Input(e)) => {
            eprintln!("Invalid move: {e}. Please enter a number from the list.");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_transcript<W: Write>(
    out: &mut W,
    transcript: &fair_rps_core::RoundTranscript,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, transcript)?;
    writeln!(out)
}
