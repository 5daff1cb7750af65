//! Filepath: src/driver.rs
//!
//! Entry points tying configuration, scheduling and reduction together.

use std::fmt as StdFmt;

use crate::codec;
use crate::config::Config;
use crate::cursor::PermutationCursor;
use crate::error::FannkuchError;
use crate::permutation::Permutation;
use crate::scheduler::{ChunkResult, ChunkScheduler};
use crate::tracing_helpers::debug_log;

/// Final answer for one size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Report {
    /// Permutation length.
    pub n: usize,
    /// Maximum flip count over all `n!` permutations.
    pub max_flips: u32,
    /// Alternating flip-count sum over the enumeration order.
    pub checksum: i64,
    /// Chunks the index space was split into (0 for `n <= 1`).
    pub chunks: usize,
    /// Worker threads used (0 when nothing was enumerated).
    pub workers: usize,
}

impl Report {
    /// `n <= 1` has one permutation and it needs no flips.
    const fn trivial(n: usize) -> Self {
        Self {
            n,
            max_flips: 0,
            checksum: 0,
            chunks: 0,
            workers: 0,
        }
    }

    fn from_result(n: usize, result: ChunkResult, chunks: usize, workers: usize) -> Self {
        Self {
            n,
            max_flips: result.max_flips,
            checksum: result.checksum,
            chunks,
            workers,
        }
    }
}

/// The single labeled result line, `Pfannkuchen(n) = max`. The checksum
/// stays on the struct.
impl StdFmt::Display for Report {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        write!(f, "Pfannkuchen({}) = {}", self.n, self.max_flips)
    }
}

/// Compute the maximum flip count for `config.n()` on a worker pool.
///
/// # Errors
///
/// Validation errors from [`Config::validate`], raised before any thread
/// starts, and worker failures from [`ChunkScheduler::run_workers`].
pub fn run(config: &Config) -> Result<Report, FannkuchError> {
    config.validate()?;

    let n = config.n();
    if n <= 1 {
        debug_log!(n, "trivial size, skipping enumeration");
        return Ok(Report::trivial(n));
    }

    let scheduler = ChunkScheduler::new(n, config.chunk_size())?;
    let chunks = scheduler.plan().len();
    let workers = config.workers();

    scheduler.run_workers(workers)?;

    Ok(Report::from_result(n, scheduler.into_result(), chunks, workers))
}

/// Same computation as [`run`], draining every chunk on the calling thread.
///
/// The worker count in `config` is ignored; the report records 1.
///
/// # Errors
///
/// Validation errors from [`Config::validate`].
pub fn run_serial(config: &Config) -> Result<Report, FannkuchError> {
    config.validate()?;

    let n = config.n();
    if n <= 1 {
        return Ok(Report::trivial(n));
    }

    let scheduler = ChunkScheduler::new(n, config.chunk_size())?;
    let chunks = scheduler.plan().len();
    scheduler.drain();

    Ok(Report::from_result(n, scheduler.into_result(), chunks, 1))
}

/// Lazy walk over the leading permutations, driven by one cursor.
///
/// Yields at most `min(count, n!)` items and holds no buffer beyond the
/// cursor itself.
#[derive(Clone, Debug)]
pub struct Preview {
    cursor: PermutationCursor,
    remaining: u64,
    started: bool,
}

impl Iterator for Preview {
    type Item = Permutation;

    fn next(&mut self) -> Option<Permutation> {
        if self.remaining == 0 {
            return None;
        }
        if self.started && !self.cursor.advance() {
            self.remaining = 0;
            return None;
        }

        self.started = true;
        self.remaining -= 1;
        Some(*self.cursor.permutation())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (left, usize::try_from(self.remaining).ok())
    }
}

/// The first `min(count, n!)` permutations in enumeration order, produced
/// one at a time.
///
/// # Errors
///
/// [`codec::factorial`] errors for unsupported `n`.
pub fn preview(n: usize, count: usize) -> Result<Preview, FannkuchError> {
    let total = codec::factorial(n)?;

    Ok(Preview {
        cursor: PermutationCursor::new(n),
        remaining: total.min(u64::try_from(count).unwrap_or(u64::MAX)),
        started: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_sizes() {
        for n in 0..=1 {
            let report = run(&Config::new(n)).unwrap();
            assert_eq!(report.max_flips, 0);
            assert_eq!(report.checksum, 0);
            assert_eq!(report.chunks, 0);
        }
    }

    #[test]
    fn seven_matches_reference_output() {
        let report = run(&Config::new(7).with_workers(2)).unwrap();
        assert_eq!(report.max_flips, 16);
        assert_eq!(report.checksum, 228);
        assert_eq!(report.to_string(), "Pfannkuchen(7) = 16");
    }

    #[test]
    fn serial_matches_parallel() {
        let config = Config::new(8).with_workers(3).with_chunk_size(999);
        let parallel = run(&config).unwrap();
        let serial = run_serial(&config).unwrap();
        assert_eq!(parallel.max_flips, serial.max_flips);
        assert_eq!(parallel.checksum, serial.checksum);
        assert_eq!(serial.workers, 1);
    }

    #[test]
    fn preview_lists_leading_permutations() {
        let lines: Vec<_> = preview(3, 30)
            .unwrap()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(lines, ["123", "213", "231", "321", "312", "132"]);

        assert_eq!(preview(7, 4).unwrap().count(), 4);
        assert_eq!(preview(1, 30).unwrap().count(), 1);
        assert_eq!(preview(0, 0).unwrap().next(), None);
    }

    #[test]
    fn preview_is_lazy_for_huge_counts() {
        let mut walk = preview(16, usize::MAX).unwrap();
        assert_eq!(walk.size_hint().0, 20_922_789_888_000);

        let head: Vec<_> = walk.by_ref().take(3).map(|p| p.to_string()).collect();
        assert_eq!(head.len(), 3);
        assert!(head[0].starts_with("12345678910"));
        assert_eq!(walk.size_hint().0, 20_922_789_888_000 - 3);
    }

    #[test]
    fn preview_stops_at_last_permutation() {
        let mut walk = preview(4, usize::MAX).unwrap();
        assert_eq!(walk.by_ref().count(), 24);
        assert_eq!(walk.next(), None);
    }

    #[test]
    fn invalid_config_fails_before_work() {
        assert_eq!(
            run(&Config::new(3).with_chunk_size(0)),
            Err(FannkuchError::InvalidChunkSize)
        );
    }
}
