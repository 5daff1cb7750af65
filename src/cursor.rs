//! Filepath: src/cursor.rs
//!
//! Incremental walk through the enumeration order.

use crate::codec;
use crate::permutation::{MixedRadixCounter, Permutation};

/// One live permutation plus the counter that locates it.
///
/// A worker creates a single cursor and reuses it for every chunk it
/// claims: [`seek`](Self::seek) repositions it, [`advance`](Self::advance)
/// steps it. Neither allocates.
#[derive(Clone, Debug)]
pub struct PermutationCursor {
    perm: Permutation,
    counter: MixedRadixCounter,
}

impl PermutationCursor {
    /// Cursor at the identity permutation of `n` elements (index 0).
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            perm: Permutation::identity(n),
            counter: MixedRadixCounter::zero(n),
        }
    }

    /// Reposition at enumeration `index`. Requires `index < n!`.
    #[inline]
    pub fn seek(&mut self, index: u64) {
        codec::seek_into(index, &mut self.perm, &mut self.counter);
    }

    /// Current permutation.
    #[inline]
    #[must_use]
    pub const fn permutation(&self) -> &Permutation {
        &self.perm
    }

    /// Current counter.
    #[inline]
    #[must_use]
    pub const fn counter(&self) -> &MixedRadixCounter {
        &self.counter
    }

    /// Enumeration index of the current permutation.
    #[must_use]
    pub fn index(&self) -> u64 {
        self.counter.value()
    }

    /// Step to the next permutation in enumeration order.
    ///
    /// Returns `false` once the enumeration is exhausted; the cursor state is
    /// then meaningless until the next [`seek`](Self::seek). Fewer than two
    /// elements have a single permutation, so `false` is returned at once.
    ///
    /// Amortized O(1): the carry loop runs past position `i` only once every
    /// `(i + 1)!` steps.
    #[inline]
    pub fn advance(&mut self) -> bool {
        let n = self.perm.len();
        if n < 2 {
            return false;
        }

        self.perm.swap_front();

        let mut i = 1;
        while !self.counter.bump(i) {
            i += 1;
            if i == n {
                return false;
            }
            self.perm.rotate_prefix_left(i + 1, 1);
        }

        true
    }
}
