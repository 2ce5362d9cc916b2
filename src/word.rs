//! Storage words and the bit-position arithmetic built on top of them.
//!
//! Every container in this crate stores bits in a buffer of [`Word`]s. Bit
//! `i` of a container lives in word `i / W::BITS`, at bit `i % W::BITS` of
//! that word, least significant bit first.

use core::{
    fmt,
    hash::Hash,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, Shr},
};

use crate::macros::impl_word;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// An unsigned integer used as the unit of bit storage.
///
/// Implemented for `u8`, `u16`, `u32`, `u64` and `usize`. The trait is
/// sealed: the algorithms rely on wrapping and shifting behaving exactly like
/// the primitive unsigned integers.
pub trait Word:
    sealed::Sealed
    + Copy
    + Default
    + Eq
    + Ord
    + Hash
    + fmt::Debug
    + fmt::Binary
    + BitAnd<Output = Self>
    + BitAndAssign
    + BitOr<Output = Self>
    + BitOrAssign
    + BitXor<Output = Self>
    + BitXorAssign
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Width of the word in bits.
    const BITS: u32;
    /// The word with no bit set.
    const ZERO: Self;
    /// The word with only bit 0 set.
    const ONE: Self;
    /// The word with every bit set.
    const ONES: Self;

    /// Number of set bits.
    fn count_ones(self) -> u32;
    /// Number of clear bits above the highest set bit.
    fn leading_zeros(self) -> u32;
    /// Number of clear bits below the lowest set bit.
    fn trailing_zeros(self) -> u32;
    /// Mirrors the bit order of the word.
    fn reverse_bits(self) -> Self;
    /// Modular addition.
    fn wrapping_add(self, rhs: Self) -> Self;
    /// Modular subtraction.
    fn wrapping_sub(self, rhs: Self) -> Self;
    /// Left shift, `None` when `n >= BITS`.
    fn checked_shl(self, n: u32) -> Option<Self>;
    /// Right shift, `None` when `n >= BITS`.
    fn checked_shr(self, n: u32) -> Option<Self>;

    /// Returns [`ONES`](Self::ONES) for `true` and [`ZERO`](Self::ZERO) for
    /// `false`.
    #[inline(always)]
    fn splat(value: bool) -> Self {
        if value { Self::ONES } else { Self::ZERO }
    }
}

impl_word!(u8, u16, u32, u64, usize);

const _: () = assert!(usize::BITS >= 32, "pointer width below 32 bits is unsupported");

/// Number of words needed to hold `bits` bits.
///
/// # Examples
///
/// ```
/// use smol_bitvec::word::bit_space;
///
/// assert_eq!(bit_space::<u64>(0), 0);
/// assert_eq!(bit_space::<u64>(64), 1);
/// assert_eq!(bit_space::<u64>(65), 2);
/// assert_eq!(bit_space::<u8>(17), 3);
/// ```
#[must_use]
#[inline(always)]
pub const fn bit_space<W: Word>(bits: usize) -> usize {
    bits.div_ceil(W::BITS as usize)
}

/// Index of the word holding bit `pos`.
#[must_use]
#[inline(always)]
pub const fn word_index<W: Word>(pos: usize) -> usize {
    pos / W::BITS as usize
}

/// Offset of bit `pos` inside its word.
#[must_use]
#[inline(always)]
pub const fn bit_index<W: Word>(pos: usize) -> u32 {
    (pos % W::BITS as usize) as u32
}

/// Single-bit mask selecting bit `pos` inside its word.
#[must_use]
#[inline(always)]
pub fn bit_mask<W: Word>(pos: usize) -> W {
    W::ONE << bit_index::<W>(pos)
}

/// Bits `[bit, BITS)` of a word. `bit` must be below `BITS`.
#[must_use]
#[inline(always)]
pub fn mask_from<W: Word>(bit: u32) -> W {
    debug_assert!(bit < W::BITS);
    W::ONES << bit
}

/// Bits `[0, bit)` of a word. `bit` may equal `BITS`.
#[must_use]
#[inline(always)]
pub fn mask_to<W: Word>(bit: u32) -> W {
    debug_assert!(bit <= W::BITS);
    if bit == W::BITS {
        W::ONES
    } else {
        !(W::ONES << bit)
    }
}

/// Bits `[lo, hi)` of a word, with `lo < BITS` and `lo <= hi <= BITS`.
#[must_use]
#[inline(always)]
pub fn mask_range<W: Word>(lo: u32, hi: u32) -> W {
    debug_assert!(lo <= hi);
    if lo == hi {
        return W::ZERO;
    }
    mask_from::<W>(lo) & mask_to::<W>(hi)
}

/// Mirrors the low `n` bits of `w` into the low `n` bits of the result.
#[must_use]
#[inline(always)]
pub(crate) fn reverse_low<W: Word>(w: W, n: u32) -> W {
    debug_assert!(n >= 1 && n <= W::BITS);
    w.reverse_bits() >> (W::BITS - n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_split_is_injective() {
        for pos in 0..1000usize {
            let (wi, bi) = (word_index::<u64>(pos), bit_index::<u64>(pos));
            assert_eq!(wi * 64 + bi as usize, pos);
            let (wi, bi) = (word_index::<u8>(pos), bit_index::<u8>(pos));
            assert_eq!(wi * 8 + bi as usize, pos);
        }
    }

    #[test]
    fn test_masks() {
        assert_eq!(mask_from::<u8>(3), 0b1111_1000);
        assert_eq!(mask_to::<u8>(3), 0b0000_0111);
        assert_eq!(mask_to::<u8>(8), 0xFF);
        assert_eq!(mask_to::<u8>(0), 0);
        assert_eq!(mask_range::<u8>(2, 5), 0b0001_1100);
        assert_eq!(mask_range::<u64>(0, 64), u64::MAX);
        assert_eq!(mask_range::<u64>(7, 7), 0);
        assert_eq!(bit_mask::<u32>(37), 1 << 5);
    }

    #[test]
    fn test_reverse_low() {
        assert_eq!(reverse_low::<u8>(0b0000_0011, 3), 0b110);
        assert_eq!(reverse_low::<u64>(1, 64), 1 << 63);
        assert_eq!(reverse_low::<u16>(0b1, 1), 0b1);
    }

    #[test]
    fn test_bit_space() {
        assert_eq!(bit_space::<u32>(0), 0);
        assert_eq!(bit_space::<u32>(1), 1);
        assert_eq!(bit_space::<u32>(32), 1);
        assert_eq!(bit_space::<u32>(33), 2);
        assert_eq!(bit_space::<usize>(usize::MAX), usize::MAX / usize::BITS as usize + 1);
    }
}
