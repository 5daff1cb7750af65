//! Filepath: src/permutation.rs
//!
//! Fixed-capacity permutation and mixed-radix counter buffers.
//!
//! Both types live entirely inline (`[u8; MAX_N]` plus a length) so a worker
//! can own one of each for its whole lifetime and overwrite them in place for
//! every permutation it visits. Nothing here allocates.

use std::fmt as StdFmt;

use crate::codec::FACTORIALS;

/// Maximum permutation length.
///
/// 16 slots keeps `MAX_N!` comfortably inside `u64` and lets a permutation
/// fit in a single 16-byte buffer.
pub const MAX_N: usize = 16;

// ============================================================================
//  Permutation
// ============================================================================

/// An arrangement of the values `0..len`.
///
/// # Invariants
///
/// - `len <= MAX_N`
/// - Every value in `0..len` appears exactly once in `as_slice()`
/// - Slots `len..MAX_N` are zero, so the derived `Eq`/`Hash` only see the
///   live elements
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Permutation {
    slots: [u8; MAX_N],
    len: u8,
}

impl Permutation {
    /// The identity permutation `[0, 1, ..., len - 1]`.
    ///
    /// # Panics
    /// Panics in debug builds if `len > MAX_N`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn identity(len: usize) -> Self {
        debug_assert!(len <= MAX_N, "identity: len ({len}) > MAX_N ({MAX_N})");

        let mut slots = [0u8; MAX_N];
        for (value, slot) in slots.iter_mut().enumerate().take(len) {
            *slot = value as u8;
        }

        Self {
            slots,
            len: len as u8,
        }
    }

    /// Build a permutation from explicit values.
    ///
    /// Returns `None` unless `values` is a bijection on `0..values.len()` of
    /// at most [`MAX_N`] elements.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_slice(values: &[u8]) -> Option<Self> {
        if values.len() > MAX_N {
            return None;
        }

        let mut slots = [0u8; MAX_N];
        slots[..values.len()].copy_from_slice(values);
        let perm = Self {
            slots,
            len: values.len() as u8,
        };

        perm.is_bijection().then_some(perm)
    }

    /// Number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// True for the (unique) permutation of zero elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The live elements.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.slots[..self.len()]
    }

    /// True if every element sits at its own index.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.as_slice()
            .iter()
            .enumerate()
            .all(|(pos, &value)| usize::from(value) == pos)
    }

    /// Check the bijection invariant.
    #[must_use]
    pub fn is_bijection(&self) -> bool {
        let mut seen = [false; MAX_N];

        for &value in self.as_slice() {
            let value = usize::from(value);
            if value >= self.len() || seen[value] {
                return false;
            }
            seen[value] = true;
        }

        true
    }

    /// Exchange positions 0 and 1 (a rotation of the 2-element prefix).
    #[inline]
    pub(crate) fn swap_front(&mut self) {
        self.slots.swap(0, 1);
    }

    /// Rotate the leading `prefix` elements left by `by` positions.
    ///
    /// The element at `by` moves to the front and the first `by` elements
    /// wrap around to the end of the prefix.
    #[inline]
    pub(crate) fn rotate_prefix_left(&mut self, prefix: usize, by: usize) {
        debug_assert!(prefix <= self.len(), "rotate: prefix ({prefix}) > len");
        debug_assert!(by <= prefix, "rotate: by ({by}) > prefix ({prefix})");

        self.slots[..prefix].rotate_left(by);
    }
}

/// Renders the 1-based digit string (`"1234567"` for the identity of 7).
impl StdFmt::Display for Permutation {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        for &value in self.as_slice() {
            write!(f, "{}", u32::from(value) + 1)?;
        }
        Ok(())
    }
}

// ============================================================================
//  MixedRadixCounter
// ============================================================================

/// Factorial-number-system digits driving enumeration.
///
/// Digit `i` has radix `i + 1`, so it ranges over `0..=i`. The digits read as
/// a number (`value()`) equal the enumeration index of the permutation the
/// counter travels with.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct MixedRadixCounter {
    digits: [u8; MAX_N],
    len: u8,
}

impl MixedRadixCounter {
    /// All-zero counter with `len` digits.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn zero(len: usize) -> Self {
        debug_assert!(len <= MAX_N);

        Self {
            digits: [0; MAX_N],
            len: len as u8,
        }
    }

    /// Number of digits.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// True for a zero-digit counter.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Digit at radix position `pos`.
    #[inline]
    #[must_use]
    pub fn digit(&self, pos: usize) -> usize {
        usize::from(self.digits()[pos])
    }

    /// The live digits, least significant first.
    #[inline]
    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len()]
    }

    /// The enumeration index these digits encode.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.digits()
            .iter()
            .enumerate()
            .map(|(pos, &d)| u64::from(d) * FACTORIALS[pos])
            .sum()
    }

    /// True when every digit sits at its maximum (the last permutation).
    #[must_use]
    pub fn is_max(&self) -> bool {
        self.digits()
            .iter()
            .enumerate()
            .all(|(pos, &d)| usize::from(d) == pos)
    }

    /// Overwrite digit `pos`.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn set(&mut self, pos: usize, digit: u64) {
        debug_assert!(digit <= pos as u64, "digit {digit} out of radix at {pos}");
        self.digits[pos] = digit as u8;
    }

    /// Increment digit `pos`.
    ///
    /// Returns `true` if the digit stayed within its radix. On overflow the
    /// digit is reset to 0 and `false` is returned so the caller can carry.
    #[inline]
    pub(crate) fn bump(&mut self, pos: usize) -> bool {
        let digit = &mut self.digits[pos];
        *digit += 1;

        if usize::from(*digit) > pos {
            *digit = 0;
            false
        } else {
            true
        }
    }
}
