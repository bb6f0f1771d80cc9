use std::env;
use std::path::PathBuf;
use std::process;

use env_logger::Env;
use log::info;

use simple_bank_ledger::cli::run;

const DEFAULT_LEDGER_FILE: &str = "accounts.json";

fn main() {
    // Collect command-line arguments - the ledger file path is the one
    // optional argument
    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [accounts.json]", args[0]);
        process::exit(1);
    }
    let path = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_FILE));

    // Initialize logger (respect RUST_LOG env var if set)
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("starting bank ledger with file: {}", path.display());

    if let Err(e) = run(&path) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
