//! Common test utilities: tracing setup and an independent brute-force oracle.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//!
//! #[test]
//! fn my_test() {
//!     common::init_tracing();
//!     // ... test code with tracing::info!, tracing::debug!, etc.
//! }
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Filter directives (e.g., `pfannkuchen=debug`)
//! - `PFANNKUCHEN_LOG_DIR`: When set, also write NDJSON logs to `<dir>/pfannkuchen.jsonl`
//! - `PFANNKUCHEN_LOG_CONSOLE`: Set to "0" to disable console output
//!
//! ```bash
//! # Show only warnings and errors from a JSON log
//! cat logs/pfannkuchen.jsonl | jq 'select(.level == "WARN" or .level == "ERROR")'
//! ```

#![allow(dead_code)]

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Ensures tracing is only initialized once across all tests.
static INIT: Once = Once::new();

/// Initialize the tracing subscriber with console and optional file logging.
///
/// Safe to call multiple times - only the first call takes effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        setup_tracing();
    });
}

/// Configuration for tracing setup.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Directory for the NDJSON log file, if any.
    pub log_dir: Option<PathBuf>,
    /// Enable console output.
    pub console_enabled: bool,
    /// Default log level if RUST_LOG is not set.
    pub default_level: Level,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            console_enabled: true,
            default_level: Level::INFO,
        }
    }
}

impl TracingConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("PFANNKUCHEN_LOG_DIR") {
            config.log_dir = Some(PathBuf::from(dir));
        }

        if env::var("PFANNKUCHEN_LOG_CONSOLE").is_ok_and(|v| v == "0") {
            config.console_enabled = false;
        }

        config
    }
}

/// Create an EnvFilter from RUST_LOG or use default level.
fn make_filter(default_level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{default_level}")))
}

#[expect(clippy::expect_used)]
fn setup_tracing() {
    let config = TracingConfig::from_env();

    let console_layer = config.console_enabled.then(|| {
        tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_thread_names(true)
            .with_target(true)
            .compact()
            .with_filter(make_filter(config.default_level))
    });

    // Append mode: nextest runs tests in separate processes.
    let file_layer = config.log_dir.as_ref().map(|dir| {
        std::fs::create_dir_all(dir).expect("Failed to create log directory");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("pfannkuchen.jsonl"))
            .expect("Failed to open log file");

        tracing_subscriber::fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_thread_names(true)
            .with_target(true)
            .json()
            .with_filter(make_filter(config.default_level))
    });

    // try_init: the library's own init_tracing may already have run.
    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

// ============================================================================
//  Brute-force oracle
// ============================================================================

/// Flip count by literally reversing prefixes until 0 is in front.
pub fn naive_flips(values: &[u8]) -> u32 {
    let mut work = values.to_vec();
    let mut flips = 0;

    while let Some(&front) = work.first() {
        if front == 0 {
            break;
        }
        work[..=usize::from(front)].reverse();
        flips += 1;
    }

    flips
}

/// Step `values` to its lexicographic successor. Returns `false` at the last.
pub fn next_lexicographic(values: &mut [u8]) -> bool {
    let Some(pivot) = values.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };

    let successor = values
        .iter()
        .rposition(|&v| v > values[pivot])
        .expect("a larger element exists right of the pivot");
    values.swap(pivot, successor);
    values[pivot + 1..].reverse();
    true
}

/// Max flip count over all permutations of `0..n`, in lexicographic order.
pub fn brute_force_max_flips(n: usize) -> u32 {
    let mut values: Vec<u8> = (0..n as u8).collect();
    let mut best = naive_flips(&values);

    while next_lexicographic(&mut values) {
        best = best.max(naive_flips(&values));
    }

    best
}

/// `n!` without going through the crate.
pub fn factorial(n: usize) -> u64 {
    (1..=n as u64).product()
}
