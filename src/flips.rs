//! Filepath: src/flips.rs
//!
//! Pancake-flip scoring.
//!
//! A flip reverses the leading `k + 1` elements, where `k` is the value at
//! the front. Repeating until 0 reaches the front gives the permutation's
//! score.

use std::mem;

use crate::permutation::{MAX_N, Permutation};

/// Scores permutations on a private scratch buffer.
///
/// The scratch buffer lives as long as the counter, so a worker that keeps
/// one `FlipCounter` never allocates while scoring.
#[derive(Clone, Debug)]
pub struct FlipCounter {
    scratch: [u8; MAX_N],
}

impl Default for FlipCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FlipCounter {
    /// Counter with a zeroed scratch buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scratch: [0; MAX_N],
        }
    }

    /// Number of flips needed to bring 0 to the front of `perm`.
    ///
    /// `perm` is only read. The front element is tracked in a local instead
    /// of being written back, so `scratch[0]` goes stale after the first flip
    /// and is never read again.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn count(&mut self, perm: &Permutation) -> u32 {
        let p = perm.as_slice();
        let Some(&first) = p.first() else {
            return 0;
        };

        let mut front = usize::from(first);
        if front == 0 {
            return 0;
        }
        if p[front] == 0 {
            return 1;
        }

        let scratch = &mut self.scratch[..p.len()];
        scratch.copy_from_slice(p);

        // Counts the final flip (the one that brings 0 forward) up front.
        let mut flips = 1;
        while scratch[front] != 0 {
            let next = mem::replace(&mut scratch[front], front as u8);
            scratch[1..front].reverse();
            front = usize::from(next);
            flips += 1;
        }

        flips
    }
}

/// One-off scoring with a temporary [`FlipCounter`].
#[must_use]
pub fn count_flips(perm: &Permutation) -> u32 {
    FlipCounter::new().count(perm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perm(values: &[u8]) -> Permutation {
        Permutation::from_slice(values).unwrap()
    }

    #[test]
    fn identity_needs_no_flips() {
        for n in 0..=MAX_N {
            assert_eq!(count_flips(&Permutation::identity(n)), 0);
        }
    }

    #[test]
    fn single_flip_shortcut() {
        // Front is 2 and position 2 holds 0.
        assert_eq!(count_flips(&perm(&[2, 1, 0])), 1);
        assert_eq!(count_flips(&perm(&[1, 0, 2, 3])), 1);
    }

    #[test]
    fn known_scores() {
        // 312 -> 213 -> 123 (1-based): two flips.
        assert_eq!(count_flips(&perm(&[2, 0, 1])), 2);
        // 3142 -> 4132 -> 2314 -> 3214 -> 1234: four flips.
        assert_eq!(count_flips(&perm(&[2, 0, 3, 1])), 4);
    }

    #[test]
    fn reused_counter_is_stateless() {
        let mut counter = FlipCounter::new();
        let p = perm(&[2, 0, 3, 1]);
        assert_eq!(counter.count(&p), 4);
        assert_eq!(counter.count(&perm(&[2, 0, 1])), 2);
        assert_eq!(counter.count(&p), 4);
        assert_eq!(p.as_slice(), &[2, 0, 3, 1]);
    }
}
