//! The fixed-size inline bit set.

use core::{
    fmt,
    ops::{
        BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Index, Not, Shl, ShlAssign,
        Shr, ShrAssign,
    },
    str::FromStr,
};

use crate::{
    bits::{Bits, BitsMut},
    error::{Error, Result},
    ptr::BitPtr,
    traits::{scan_bit_str, store_bit_str, write_bits},
    word::{Word, bit_space, mask_to},
};

/// Exactly `N` bits stored inline in `WORDS` words of type `W`.
///
/// `WORDS` must equal `bit_space::<W>(N)`; a mismatch is rejected when the
/// type is first used. Bits past `N` in the last word are always zero, so
/// the derived comparisons and hash only see the `N` bits.
///
/// # Examples
///
/// ```
/// use smol_bitvec::{BitSet, Bits, BitsMut};
///
/// let mut a = BitSet::<u8, 12, 2>::new();
/// a.set(3, true);
/// a.set(11, true);
/// let b: BitSet<u8, 12, 2> = "0000_0000_1000".parse().unwrap();
///
/// assert_eq!((a & b).ones().collect::<Vec<_>>(), [3]);
/// assert_eq!((a << 1).ones().collect::<Vec<_>>(), [4]);
/// assert_eq!((!a).count_ones(), 10);
/// assert_eq!(a.as_words(), &[0b1000, 0b1000]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitSet<W: Word, const N: usize, const WORDS: usize> {
    words: [W; WORDS],
}

impl<W: Word, const N: usize, const WORDS: usize> BitSet<W, N, WORDS> {
    const LAYOUT: () = assert!(
        WORDS == bit_space::<W>(N),
        "WORDS must be the number of words needed for N bits"
    );

    /// A set with every bit clear.
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::LAYOUT;
        Self {
            words: [W::ZERO; WORDS],
        }
    }

    /// A set with every bit equal to `value`.
    #[must_use]
    pub fn splat(value: bool) -> Self {
        let mut out = Self::new();
        if value {
            out.set_all();
        }
        out
    }

    /// Builds a set from its words, clearing any bit past `N`.
    #[must_use]
    pub fn from_words(words: [W; WORDS]) -> Self {
        let mut out = Self { words };
        let () = Self::LAYOUT;
        out.trim();
        out
    }

    /// The words, least significant bit of the first word first.
    #[inline]
    pub const fn as_words(&self) -> &[W; WORDS] {
        &self.words
    }

    /// Unwraps the words.
    #[inline]
    pub const fn into_words(self) -> [W; WORDS] {
        self.words
    }

    /// Clears the bits of the last word past `N`.
    #[inline]
    fn trim(&mut self) {
        let rem = (N % W::BITS as usize) as u32;
        if rem != 0
            && let Some(last) = self.words.last_mut()
        {
            *last &= mask_to::<W>(rem);
        }
    }
}

impl<W: Word, const N: usize, const WORDS: usize> Default for BitSet<W, N, WORDS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Word, const N: usize, const WORDS: usize> Bits for BitSet<W, N, WORDS> {
    type Word = W;

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn begin(&self) -> BitPtr<W> {
        BitPtr::from_slice(&self.words)
    }
}

impl<W: Word, const N: usize, const WORDS: usize> BitsMut for BitSet<W, N, WORDS> {
    #[inline]
    fn begin_mut(&mut self) -> BitPtr<W> {
        BitPtr::from_mut_slice(&mut self.words)
    }
}

impl<W: Word, const N: usize, const WORDS: usize> Index<usize> for BitSet<W, N, WORDS> {
    type Output = bool;

    #[track_caller]
    fn index(&self, index: usize) -> &bool {
        if self.test(index) { &true } else { &false }
    }
}

impl<W: Word, const N: usize, const WORDS: usize> fmt::Display for BitSet<W, N, WORDS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bits(self, f)
    }
}

impl<W: Word, const N: usize, const WORDS: usize> fmt::Binary for BitSet<W, N, WORDS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bits(self, f)
    }
}

impl<W: Word, const N: usize, const WORDS: usize> fmt::Debug for BitSet<W, N, WORDS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSet<{N}>({self})")
    }
}

impl<W: Word, const N: usize, const WORDS: usize> FromStr for BitSet<W, N, WORDS> {
    type Err = Error;

    /// Parses exactly `N` digits, highest position first. A leading `0b` and
    /// `_` separators are accepted, as for [`BitVec`](crate::BitVec).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChar`] for a stray character and
    /// [`Error::LengthMismatch`] when the digit count is not `N`.
    fn from_str(s: &str) -> Result<Self> {
        let (digits, n) = scan_bit_str(s)?;
        if n != N {
            return Err(Error::LengthMismatch {
                expected: N,
                actual: n,
            });
        }
        let mut out = Self::new();
        store_bit_str(digits, &mut out);
        Ok(out)
    }
}

macro_rules! impl_bitwise {
    ($Op:ident $op:ident, $OpAssign:ident $op_assign:ident, $w:tt) => {
        impl<W: Word, const N: usize, const WORDS: usize> $OpAssign for BitSet<W, N, WORDS> {
            #[inline]
            fn $op_assign(&mut self, rhs: Self) {
                for (a, b) in self.words.iter_mut().zip(rhs.words) {
                    *a = *a $w b;
                }
            }
        }

        impl<W: Word, const N: usize, const WORDS: usize> $Op for BitSet<W, N, WORDS> {
            type Output = Self;

            #[inline]
            fn $op(mut self, rhs: Self) -> Self {
                self.$op_assign(rhs);
                self
            }
        }
    };
}

impl_bitwise!(BitAnd bitand, BitAndAssign bitand_assign, &);
impl_bitwise!(BitOr bitor, BitOrAssign bitor_assign, |);
impl_bitwise!(BitXor bitxor, BitXorAssign bitxor_assign, ^);

impl<W: Word, const N: usize, const WORDS: usize> Not for BitSet<W, N, WORDS> {
    type Output = Self;

    #[inline]
    fn not(mut self) -> Self {
        for w in &mut self.words {
            *w = !*w;
        }
        self.trim();
        self
    }
}

impl<W: Word, const N: usize, const WORDS: usize> ShlAssign<usize> for BitSet<W, N, WORDS> {
    #[inline]
    fn shl_assign(&mut self, n: usize) {
        self.shift_left(n);
    }
}

impl<W: Word, const N: usize, const WORDS: usize> ShrAssign<usize> for BitSet<W, N, WORDS> {
    #[inline]
    fn shr_assign(&mut self, n: usize) {
        self.shift_right(n);
    }
}

impl<W: Word, const N: usize, const WORDS: usize> Shl<usize> for BitSet<W, N, WORDS> {
    type Output = Self;

    #[inline]
    fn shl(mut self, n: usize) -> Self {
        self <<= n;
        self
    }
}

impl<W: Word, const N: usize, const WORDS: usize> Shr<usize> for BitSet<W, N, WORDS> {
    type Output = Self;

    #[inline]
    fn shr(mut self, n: usize) -> Self {
        self >>= n;
        self
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::ToString, vec::Vec};

    use super::*;

    type Set100 = BitSet<u32, 100, 4>;

    #[test]
    fn test_not_keeps_tail_clear() {
        let s = !Set100::new();
        assert!(s.all());
        assert_eq!(s.count_ones(), 100);
        assert_eq!(s.as_words()[3], 0xF);
        assert_eq!(Set100::splat(true), s);
    }

    #[test]
    fn test_from_words_trims() {
        let s = Set100::from_words([u32::MAX; 4]);
        assert_eq!(s.count_ones(), 100);
        assert_eq!(s, Set100::splat(true));
    }

    #[test]
    fn test_shifts_cross_words() {
        let mut s = Set100::new();
        s.set(30, true);
        s.set(99, true);
        let l = s << 5;
        assert_eq!(l.ones().collect::<Vec<_>>(), [35]);
        let r = s >> 31;
        assert_eq!(r.ones().collect::<Vec<_>>(), [68]);
        assert_eq!((s << 100).count_ones(), 0);
    }

    #[test]
    fn test_parse_checks_length() {
        assert_eq!(
            "0b101".parse::<BitSet<u8, 4, 1>>(),
            Err(Error::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
        let s: BitSet<u8, 4, 1> = "1_101".parse().unwrap();
        assert_eq!(s.to_string(), "1101");
        assert_eq!(format!("{s:?}"), "BitSet<4>(1101)");
        assert_eq!(format!("{s:#b}"), "0b1101");
    }

    #[test]
    fn test_zero_width() {
        let s = BitSet::<u64, 0, 0>::new();
        assert!(s.is_empty());
        assert!(s.all());
        assert!(s.none());
        assert_eq!(s.to_string(), "");
    }

    #[test]
    fn test_binary_ops() {
        let a: BitSet<u16, 20, 2> = "1111_0000_1111_0000_1010".parse().unwrap();
        let b: BitSet<u16, 20, 2> = "1010_1010_1010_1010_1010".parse().unwrap();
        assert_eq!((a & b).to_string(), "10100000101000001010");
        assert_eq!((a | b).to_string(), "11111010111110101010");
        assert_eq!((a ^ b).to_string(), "01011010010110100000");
        let mut c = a;
        c ^= a;
        assert!(c.none());
    }
}
