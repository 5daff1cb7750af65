//! Filepath: src/codec.rs
//!
//! Seeking into the enumeration order.
//!
//! An index in `0..n!` is read as a factorial-number-system value. Each digit
//! `d` at radix position `i - 1` says how many times the leading `i`
//! elements have been rotated left, which is exactly the state
//! [`PermutationCursor::advance`](crate::PermutationCursor::advance) would
//! have reached after `index` steps from the identity.

use crate::error::FannkuchError;
use crate::permutation::{MAX_N, MixedRadixCounter, Permutation};

/// `FACTORIALS[i] == i!` for `i` in `0..=MAX_N`.
pub const FACTORIALS: [u64; MAX_N + 1] = compute_factorials();

const fn compute_factorials() -> [u64; MAX_N + 1] {
    let mut table = [1u64; MAX_N + 1];
    let mut i: usize = 1;

    while i <= MAX_N {
        table[i] = table[i - 1] * i as u64;
        i += 1;
    }

    table
}

/// `n!`, or `None` if it does not fit in a `u64`.
#[must_use]
pub fn checked_factorial(n: usize) -> Option<u64> {
    (2..=n as u64).try_fold(1u64, u64::checked_mul)
}

/// `n!` for a size the engine can enumerate.
///
/// # Errors
///
/// - [`FannkuchError::FactorialOverflow`] if `n!` does not fit in a `u64`.
/// - [`FannkuchError::SizeTooLarge`] if `n > MAX_N`.
pub fn factorial(n: usize) -> Result<u64, FannkuchError> {
    if n <= MAX_N {
        return Ok(FACTORIALS[n]);
    }

    match checked_factorial(n) {
        None => Err(FannkuchError::FactorialOverflow(n)),
        Some(_) => Err(FannkuchError::SizeTooLarge { n, max: MAX_N }),
    }
}

/// The permutation at position `index` of the enumeration order for `n`
/// elements, together with its counter.
///
/// `index` must be below `n!`; checked in debug builds only.
#[must_use]
pub fn seek(n: usize, index: u64) -> (Permutation, MixedRadixCounter) {
    let mut perm = Permutation::identity(n);
    let mut counter = MixedRadixCounter::zero(n);
    seek_into(index, &mut perm, &mut counter);
    (perm, counter)
}

/// In-place form of [`seek`]: overwrites `perm` and `counter` with the state
/// at `index`, keeping their length.
pub fn seek_into(index: u64, perm: &mut Permutation, counter: &mut MixedRadixCounter) {
    let n = perm.len();
    debug_assert_eq!(counter.len(), n, "seek: counter/permutation length mismatch");
    debug_assert!(index < FACTORIALS[n], "seek: index {index} >= {n}!");

    *perm = Permutation::identity(n);
    *counter = MixedRadixCounter::zero(n);

    let mut remaining = index;
    for i in (1..=n).rev() {
        let radix = FACTORIALS[i - 1];
        let d = remaining / radix;
        remaining %= radix;

        counter.set(i - 1, d);
        #[allow(clippy::cast_possible_truncation)]
        perm.rotate_prefix_left(i, d as usize);
    }
}
