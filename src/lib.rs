//! # `pfannkuchen`
//!
//! Parallel fannkuch-redux: the largest number of pancake flips needed to
//! bring 0 to the front, over every permutation of `0..n`.
//!
//! The crate is a benchmark kernel, not a general permutation library. It
//! exists to stress tight integer-array loops and coarse-grained work
//! distribution across threads.
//!
//! ## Example
//!
//! ```rust
//! use pfannkuchen::{Config, run};
//!
//! let report = run(&Config::new(7)).unwrap();
//! assert_eq!(report.max_flips, 16);
//! assert_eq!(report.checksum, 228);
//! ```
//!
//! ## Design
//!
//! | Piece | Type | Role |
//! |-------|------|------|
//! | Codec | [`codec::seek`] | index in `0..n!` → permutation, via factorial digits |
//! | Cursor | [`PermutationCursor`] | amortized O(1) step to the next permutation |
//! | Scoring | [`FlipCounter`] | flip count on a private scratch copy |
//! | Scheduling | [`ChunkScheduler`] | atomic chunk claims, one result slot per chunk |
//!
//! Every worker owns one cursor and one flip counter for its whole life.
//! Both are fixed-size inline buffers ([`MAX_N`] bytes), so the hot loop
//! never allocates.
//!
//! ## Thread Safety
//!
//! The only shared mutable state is the claim counter and the per-chunk
//! result slots. Each slot has exactly one writer and is read only after the
//! worker scope joins, so every atomic access is `Relaxed` (see
//! [`ordering`]).
//!
//! ## Size Constraints
//!
//! - `n <= MAX_N` (16). Larger sizes are rejected by [`Config::validate`].
//! - `n <= 1` short-circuits to 0 flips.

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod tracing_helpers;

pub mod codec;
pub mod config;
pub mod cursor;
pub mod driver;
pub mod error;
pub mod flips;
pub mod ordering;
pub mod permutation;
pub mod scheduler;

// Re-export main types for convenience
pub use config::{Config, DEFAULT_CHUNK_SIZE, DEFAULT_N};
pub use cursor::PermutationCursor;
pub use driver::{Preview, Report, preview, run, run_serial};
pub use error::FannkuchError;
pub use flips::{FlipCounter, count_flips};
pub use permutation::{MAX_N, MixedRadixCounter, Permutation};
pub use scheduler::{Chunk, ChunkPlan, ChunkResult, ChunkScheduler};
pub use tracing_helpers::init_tracing;
