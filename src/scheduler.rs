//! Filepath: src/scheduler.rs
//!
//! Chunked work distribution over the enumeration index space.
//!
//! `[0, n!)` is cut into fixed-size [`Chunk`]s before any worker starts.
//! Workers claim chunk ids from a shared atomic counter, score every
//! permutation in the claimed range, and store a [`ChunkResult`] in the
//! chunk's own slot. Slots are reduced once the worker scope has joined.
//!
//! ```text
//! claim id ──► seek(start) ──► score, advance, score, ... ──► slot[id]
//!     ▲                                                          │
//!     └──────────────────────── until ids run out ◄──────────────┘
//! ```

use std::sync::atomic::{AtomicI64, AtomicU32, AtomicUsize};
use std::thread;

use crate::codec;
use crate::cursor::PermutationCursor;
use crate::error::FannkuchError;
use crate::flips::FlipCounter;
use crate::ordering::{CLAIM_ORD, SLOT_ORD};
use crate::tracing_helpers::{debug_log, trace_log, warn_log};


// ============================================================================
//  Chunk / ChunkPlan
// ============================================================================

/// A half-open index range `[start, end)` owned by one worker.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Chunk {
    /// Position in the plan, and the index of its result slot.
    pub id: usize,
    /// First enumeration index (inclusive).
    pub start: u64,
    /// Last enumeration index (exclusive).
    pub end: u64,
}

impl Chunk {
    /// Number of permutations in the chunk.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Always false for chunks produced by a [`ChunkPlan`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Static partition of `[0, total)` into chunks of `chunk_size`.
///
/// The last chunk is clamped to `total`, so every chunk is non-empty and the
/// chunks tile the range with no gap and no overlap.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChunkPlan {
    total: u64,
    chunk_size: u64,
    count: usize,
}

impl ChunkPlan {
    /// Plan `ceil(total / chunk_size)` chunks.
    ///
    /// # Errors
    ///
    /// - [`FannkuchError::InvalidChunkSize`] if `chunk_size` is 0.
    /// - [`FannkuchError::InvalidArgument`] if the chunk count does not fit
    ///   in `usize`.
    pub fn new(total: u64, chunk_size: u64) -> Result<Self, FannkuchError> {
        if chunk_size == 0 {
            return Err(FannkuchError::InvalidChunkSize);
        }

        let count = usize::try_from(total.div_ceil(chunk_size)).map_err(|_| {
            FannkuchError::InvalidArgument(format!(
                "{total} permutations in chunks of {chunk_size} is too many chunks"
            ))
        })?;

        Ok(Self {
            total,
            chunk_size,
            count,
        })
    }

    /// Number of chunks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// True when there is nothing to enumerate.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Size of the indexed range.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Configured chunk size (the last chunk may be shorter).
    #[must_use]
    pub const fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Chunk `id`, or `None` once ids run past the plan.
    #[must_use]
    pub fn chunk(&self, id: usize) -> Option<Chunk> {
        if id >= self.count {
            return None;
        }

        let start = id as u64 * self.chunk_size;
        let end = self.total.min(start + self.chunk_size);
        debug_assert!(start < end, "chunk {id}: empty range {start}..{end}");

        Some(Chunk { id, start, end })
    }

    /// All chunks in id order.
    pub fn iter(&self) -> impl Iterator<Item = Chunk> + '_ {
        (0..self.count).filter_map(|id| self.chunk(id))
    }
}

// ============================================================================
//  ChunkResult
// ============================================================================

/// What one chunk contributes to the final answer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ChunkResult {
    /// Largest flip count in the chunk.
    pub max_flips: u32,
    /// Alternating sum of flip counts: `+flips` at even indices, `-flips` at odd.
    pub checksum: i64,
}

impl ChunkResult {
    /// Fold in the score of the permutation at `index`.
    #[inline]
    pub fn record(&mut self, index: u64, flips: u32) {
        self.max_flips = self.max_flips.max(flips);
        if index % 2 == 0 {
            self.checksum += i64::from(flips);
        } else {
            self.checksum -= i64::from(flips);
        }
    }

    /// Combine two results. Commutative and associative.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            max_flips: self.max_flips.max(other.max_flips),
            checksum: self.checksum + other.checksum,
        }
    }
}

/// Score every permutation of `chunk`, reusing the worker's buffers.
pub fn process_chunk(
    chunk: Chunk,
    cursor: &mut PermutationCursor,
    flips: &mut FlipCounter,
) -> ChunkResult {
    debug_assert!(chunk.start < chunk.end, "chunk {} is empty", chunk.id);

    cursor.seek(chunk.start);

    let mut result = ChunkResult::default();
    let mut index = chunk.start;
    loop {
        result.record(index, flips.count(cursor.permutation()));

        index += 1;
        if index == chunk.end || !cursor.advance() {
            break;
        }
    }

    debug_assert_eq!(index, chunk.end, "chunk {} ended early", chunk.id);
    result
}

// ============================================================================
//  ChunkScheduler
// ============================================================================

/// Result slot for one chunk. Written by exactly one worker.
#[derive(Debug, Default)]
struct ChunkSlot {
    max_flips: AtomicU32,
    checksum: AtomicI64,
}

/// Hands chunks to workers and collects their results.
///
/// Shared by reference across the worker scope. The claim counter and the
/// slots are the only shared mutable state; each slot has a single writer.
#[derive(Debug)]
pub struct ChunkScheduler {
    n: usize,
    plan: ChunkPlan,
    next: AtomicUsize,
    slots: Box<[ChunkSlot]>,
}

impl ChunkScheduler {
    /// Scheduler over all `n!` permutations of `n` elements.
    ///
    /// # Errors
    ///
    /// Propagates [`codec::factorial`] and [`ChunkPlan::new`] errors.
    pub fn new(n: usize, chunk_size: u64) -> Result<Self, FannkuchError> {
        let total = codec::factorial(n)?;
        let plan = ChunkPlan::new(total, chunk_size)?;
        let slots = (0..plan.len()).map(|_| ChunkSlot::default()).collect();

        Ok(Self {
            n,
            plan,
            next: AtomicUsize::new(0),
            slots,
        })
    }

    /// Permutation length.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// The static partition being handed out.
    #[must_use]
    pub const fn plan(&self) -> &ChunkPlan {
        &self.plan
    }

    /// Claim the next unassigned chunk, or `None` when all are taken.
    ///
    /// Safe for any number of concurrent callers: each id is returned once.
    #[inline]
    pub fn next_chunk(&self) -> Option<Chunk> {
        let id = self.next.fetch_add(1, CLAIM_ORD);
        self.plan.chunk(id)
    }

    /// Store the result for `chunk`. Each chunk must be recorded once, by
    /// the worker that claimed it.
    pub fn record(&self, chunk: Chunk, result: ChunkResult) {
        debug_assert!(chunk.id < self.slots.len(), "chunk id {} out of range", chunk.id);

        let slot = &self.slots[chunk.id];
        slot.max_flips.store(result.max_flips, SLOT_ORD);
        slot.checksum.store(result.checksum, SLOT_ORD);
    }

    /// Worker loop: claim and process chunks until none remain.
    ///
    /// Creates one cursor and one flip counter and reuses them for every
    /// chunk. Returns the number of chunks this caller processed.
    pub fn drain(&self) -> usize {
        let mut cursor = PermutationCursor::new(self.n);
        let mut flips = FlipCounter::new();
        let mut processed = 0;

        while let Some(chunk) = self.next_chunk() {
            let result = process_chunk(chunk, &mut cursor, &mut flips);
            self.record(chunk, result);
            processed += 1;
        }

        processed
    }

    /// Run `workers` OS threads over the plan and wait for all of them.
    ///
    /// # Errors
    ///
    /// - [`FannkuchError::InvalidWorkerCount`] if `workers` is 0.
    /// - [`FannkuchError::WorkerSpawn`] if a thread cannot be started. Workers
    ///   already running still drain the plan before this returns.
    /// - [`FannkuchError::WorkerPanicked`] if any worker panicked.
    pub fn run_workers(&self, workers: usize) -> Result<(), FannkuchError> {
        if workers == 0 {
            return Err(FannkuchError::InvalidWorkerCount);
        }

        debug_log!(
            n = self.n,
            chunks = self.plan.len(),
            chunk_size = self.plan.chunk_size(),
            workers,
            "starting workers"
        );

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);
            let mut spawn_error = None;

            for worker in 0..workers {
                let spawned = thread::Builder::new()
                    .name(format!("pfannkuchen-worker-{worker}"))
                    .spawn_scoped(scope, move || self.drain());

                match spawned {
                    Ok(handle) => handles.push((worker, handle)),
                    Err(e) => {
                        warn_log!(worker, error = %e, "failed to spawn worker");
                        spawn_error = Some(FannkuchError::WorkerSpawn {
                            worker,
                            reason: e.to_string(),
                        });
                        break;
                    }
                }
            }

            // Join every handle before reporting, so no panic escapes the scope.
            let mut panicked = None;
            let mut processed = 0;
            for (worker, handle) in handles {
                match handle.join() {
                    Ok(chunks) => {
                        trace_log!(worker, chunks, "worker finished");
                        processed += chunks;
                    }
                    Err(_) => {
                        panicked.get_or_insert(worker);
                    }
                }
            }

            if let Some(error) = spawn_error {
                return Err(error);
            }
            if let Some(worker) = panicked {
                return Err(FannkuchError::WorkerPanicked(worker));
            }

            debug_assert_eq!(processed, self.plan.len(), "chunks lost or repeated");
            Ok(())
        })
    }

    /// Reduce all slots. Consuming `self` means every worker has finished.
    #[must_use]
    pub fn into_result(self) -> ChunkResult {
        let total = self
            .slots
            .into_vec()
            .into_iter()
            .map(|slot| ChunkResult {
                max_flips: slot.max_flips.into_inner(),
                checksum: slot.checksum.into_inner(),
            })
            .fold(ChunkResult::default(), ChunkResult::merge);

        debug_log!(
            max_flips = total.max_flips,
            checksum = total.checksum,
            "reduced chunk results"
        );
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::FACTORIALS;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[test]
    fn plan_clamps_last_chunk() {
        let plan = ChunkPlan::new(10, 4).unwrap();
        let chunks: Vec<_> = plan.iter().map(|c| (c.start, c.end)).collect();
        assert_eq!(chunks, vec![(0, 4), (4, 8), (8, 10)]);
        assert!(plan.chunk(3).is_none());
    }

    #[test]
    fn plan_rejects_zero_chunk_size() {
        assert_eq!(ChunkPlan::new(10, 0), Err(FannkuchError::InvalidChunkSize));
    }

    #[test]
    fn chunk_result_record_alternates_sign() {
        let mut r = ChunkResult::default();
        r.record(0, 3);
        r.record(1, 5);
        r.record(2, 1);
        assert_eq!(r.max_flips, 5);
        assert_eq!(r.checksum, 3 - 5 + 1);
    }

    #[test]
    fn process_chunk_covers_its_range() {
        let n = 5;
        let mut cursor = PermutationCursor::new(n);
        let mut flips = FlipCounter::new();

        let whole = Chunk { id: 0, start: 0, end: FACTORIALS[n] };
        let expected = process_chunk(whole, &mut cursor, &mut flips);

        let plan = ChunkPlan::new(FACTORIALS[n], 7).unwrap();
        let pieced = plan
            .iter()
            .map(|c| process_chunk(c, &mut cursor, &mut flips))
            .fold(ChunkResult::default(), ChunkResult::merge);

        assert_eq!(pieced, expected);
    }

    #[test]
    fn concurrent_claims_are_unique() {
        let scheduler = ChunkScheduler::new(7, 10).unwrap();
        let claimed = Mutex::new(Vec::new());

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let mut mine = Vec::new();
                    while let Some(chunk) = scheduler.next_chunk() {
                        mine.push(chunk.id);
                    }
                    claimed.lock().unwrap().extend(mine);
                });
            }
        });

        let claimed = claimed.into_inner().unwrap();
        let unique: HashSet<_> = claimed.iter().copied().collect();
        assert_eq!(claimed.len(), scheduler.plan().len());
        assert_eq!(unique.len(), scheduler.plan().len());
    }

    #[test]
    fn zero_workers_rejected() {
        let scheduler = ChunkScheduler::new(4, 5).unwrap();
        assert_eq!(
            scheduler.run_workers(0),
            Err(FannkuchError::InvalidWorkerCount)
        );
    }

    #[test]
    fn drain_on_calling_thread_matches_workers() {
        let serial = ChunkScheduler::new(7, 100).unwrap();
        assert_eq!(serial.drain(), serial.plan().len());
        let serial = serial.into_result();

        let parallel = ChunkScheduler::new(7, 100).unwrap();
        parallel.run_workers(4).unwrap();
        assert_eq!(parallel.into_result(), serial);
        assert_eq!(serial.max_flips, 16);
    }
}
