//! `pfannkuchen [N]`: print the fannkuch-redux maximum flip count.
//!
//! Run with:
//! ```bash
//! cargo run --release -- 12
//!
//! # Show the first 30 permutations, then the result
//! PFANNKUCHEN_PREVIEW=30 cargo run --release -- 7
//!
//! # Scheduler logging
//! RUST_LOG=pfannkuchen=debug cargo run --release --features tracing -- 10
//! ```

use std::process::ExitCode;

use pfannkuchen::{Config, DEFAULT_N, FannkuchError};

fn main() -> ExitCode {
    pfannkuchen::init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pfannkuchen: {e}");
            eprintln!("Usage: pfannkuchen [N]   (0 <= N <= {})", pfannkuchen::MAX_N);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), FannkuchError> {
    let n = match std::env::args().nth(1) {
        Some(arg) => Config::parse_size(&arg)?,
        None => DEFAULT_N,
    };

    let config = Config::from_env(n)?;
    // Reject bad knobs before any preview line is printed. `run` validates
    // again because it is also a library entry point.
    config.validate()?;

    if config.preview() > 0 {
        for perm in pfannkuchen::preview(n, config.preview())? {
            println!("{perm}");
        }
    }

    let report = pfannkuchen::run(&config)?;
    println!("{report}");
    Ok(())
}
