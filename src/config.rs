//! Filepath: src/config.rs
//!
//! Run configuration and input validation.
//!
//! # Environment
//!
//! - `PFANNKUCHEN_WORKERS`: worker thread count (default: available parallelism)
//! - `PFANNKUCHEN_CHUNK_SIZE`: permutations per chunk (default: [`DEFAULT_CHUNK_SIZE`])
//! - `PFANNKUCHEN_PREVIEW`: print this many leading permutations first (default: 0)

use std::env;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::thread;

use crate::codec;
use crate::error::FannkuchError;

/// Size used when none is given on the command line.
pub const DEFAULT_N: usize = 7;

/// Permutations per chunk: `4 * 7!`.
pub const DEFAULT_CHUNK_SIZE: u64 = 5040 * 4;

const WORKERS_VAR: &str = "PFANNKUCHEN_WORKERS";
const CHUNK_SIZE_VAR: &str = "PFANNKUCHEN_CHUNK_SIZE";
const PREVIEW_VAR: &str = "PFANNKUCHEN_PREVIEW";

/// Worker count from the host's available parallelism, falling back to 1.
#[must_use]
pub fn default_workers() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    n: usize,
    workers: usize,
    chunk_size: u64,
    preview: usize,
}

impl Config {
    /// Defaults for size `n`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            n,
            workers: default_workers(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            preview: 0,
        }
    }

    /// Defaults for size `n`, overridden by `PFANNKUCHEN_*` variables.
    ///
    /// # Errors
    ///
    /// [`FannkuchError::InvalidArgument`] if a variable is set but does not
    /// parse.
    pub fn from_env(n: usize) -> Result<Self, FannkuchError> {
        let mut config = Self::new(n);

        if let Some(workers) = env_value(WORKERS_VAR)? {
            config.workers = workers;
        }
        if let Some(chunk_size) = env_value(CHUNK_SIZE_VAR)? {
            config.chunk_size = chunk_size;
        }
        if let Some(preview) = env_value(PREVIEW_VAR)? {
            config.preview = preview;
        }

        Ok(config)
    }

    /// Parse a command-line size argument.
    ///
    /// # Errors
    ///
    /// - [`FannkuchError::InvalidArgument`] if `arg` is not an integer.
    /// - [`FannkuchError::NegativeSize`] if it is negative.
    pub fn parse_size(arg: &str) -> Result<usize, FannkuchError> {
        let value: i64 = arg
            .trim()
            .parse()
            .map_err(|_| FannkuchError::InvalidArgument(format!("size {arg:?} is not an integer")))?;

        if value < 0 {
            return Err(FannkuchError::NegativeSize(value));
        }

        usize::try_from(value)
            .map_err(|_| FannkuchError::InvalidArgument(format!("size {value} is out of range")))
    }

    /// Set the worker count.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the chunk size.
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set how many leading permutations to preview.
    #[must_use]
    pub const fn with_preview(mut self, preview: usize) -> Self {
        self.preview = preview;
        self
    }

    /// Permutation length.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Worker thread count.
    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Permutations per chunk.
    #[must_use]
    pub const fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Leading permutations to preview.
    #[must_use]
    pub const fn preview(&self) -> usize {
        self.preview
    }

    /// Reject anything that would corrupt chunk boundaries or stall the pool.
    ///
    /// # Errors
    ///
    /// - [`FannkuchError::SizeTooLarge`] / [`FannkuchError::FactorialOverflow`]
    ///   if `n!` cannot be enumerated.
    /// - [`FannkuchError::InvalidWorkerCount`] if `workers` is 0.
    /// - [`FannkuchError::InvalidChunkSize`] if `chunk_size` is 0.
    pub fn validate(&self) -> Result<(), FannkuchError> {
        codec::factorial(self.n)?;

        if self.workers == 0 {
            return Err(FannkuchError::InvalidWorkerCount);
        }
        if self.chunk_size == 0 {
            return Err(FannkuchError::InvalidChunkSize);
        }

        Ok(())
    }
}

fn env_value<T: FromStr>(key: &str) -> Result<Option<T>, FannkuchError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| FannkuchError::InvalidArgument(format!("{key}={raw:?} does not parse"))),
        Err(_) => Ok(None),
    }
}
