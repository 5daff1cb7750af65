//! Memory orderings for the scheduler's shared state.
//!
//! The worker scope's join is the only synchronization point the result
//! slots need, so every access here is `Relaxed`. The constants keep that
//! decision in one place.

use std::sync::atomic::Ordering;

/// Ordering for the chunk-claim `fetch_add`.
/// Atomicity alone guarantees each id is handed out once.
pub const CLAIM_ORD: Ordering = Ordering::Relaxed;

/// Ordering for storing a chunk result into its slot.
/// Each slot has a single writer; readers run after the join.
pub const SLOT_ORD: Ordering = Ordering::Relaxed;
