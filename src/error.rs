//! Filepath: src/error.rs
//!
//! Error type shared by configuration, planning and the worker pool.

use std::fmt as StdFmt;

// ============================================================================
//  FannkuchError
// ============================================================================

/// Errors that can stop a run before (or while) workers execute.
///
/// Everything except [`WorkerSpawn`](Self::WorkerSpawn) and
/// [`WorkerPanicked`](Self::WorkerPanicked) is detected by
/// [`Config::validate`](crate::Config::validate) before a single thread is
/// started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FannkuchError {
    /// N was negative.
    NegativeSize(i64),

    /// N does not fit the fixed permutation buffer.
    SizeTooLarge {
        /// Requested size.
        n: usize,
        /// Largest supported size.
        max: usize,
    },

    /// N! does not fit in a `u64`.
    FactorialOverflow(usize),

    /// Chunk size of zero.
    InvalidChunkSize,

    /// Worker count of zero.
    InvalidWorkerCount,

    /// A command-line or environment value could not be parsed.
    InvalidArgument(String),

    /// The OS refused to start a worker thread.
    WorkerSpawn {
        /// Index of the worker that failed to start.
        worker: usize,
        /// OS error text.
        reason: String,
    },

    /// A worker thread panicked. Internal defect; the run has no result.
    WorkerPanicked(usize),
}

impl StdFmt::Display for FannkuchError {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self {
            Self::NegativeSize(n) => write!(f, "size must be non-negative, got {n}"),

            Self::SizeTooLarge { n, max } => {
                write!(f, "size {n} exceeds the supported maximum of {max}")
            }

            Self::FactorialOverflow(n) => write!(f, "{n}! does not fit in 64 bits"),

            Self::InvalidChunkSize => write!(f, "chunk size must be at least 1"),

            Self::InvalidWorkerCount => write!(f, "worker count must be at least 1"),

            Self::InvalidArgument(arg) => write!(f, "invalid argument: {arg}"),

            Self::WorkerSpawn { worker, reason } => {
                write!(f, "failed to start worker {worker}: {reason}")
            }

            Self::WorkerPanicked(worker) => write!(f, "worker {worker} panicked"),
        }
    }
}

impl std::error::Error for FannkuchError {}
