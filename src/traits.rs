//! Standard trait implementations for [`BitVec`], and the text format shared
//! by every container.

use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::{
        BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, ShlAssign, Shr,
        ShrAssign,
    },
    str::FromStr,
};

use crate::{
    bits::{Bits, BitsMut},
    bitvec::BitVec,
    error::{Error, Result, or_panic},
    storage::Storage,
};

/// Strips an optional `0b` prefix and checks the digits, returning them
/// together with the number of bits they encode. `_` is skipped.
pub(crate) fn scan_bit_str(s: &str) -> Result<(&str, usize)> {
    let digits = s.strip_prefix("0b").unwrap_or(s);
    let skipped = s.len() - digits.len();
    let mut n = 0;
    for (i, ch) in digits.chars().enumerate() {
        match ch {
            '0' | '1' => n += 1,
            '_' => {}
            _ => return Err(Error::InvalidChar { ch, pos: skipped + i }),
        }
    }
    Ok((digits, n))
}

/// Stores digits accepted by [`scan_bit_str`], highest position first, into
/// `dst`, which must be exactly as long as the digit count.
pub(crate) fn store_bit_str<B: BitsMut + ?Sized>(digits: &str, dst: &mut B) {
    let mut i = dst.len();
    for b in digits.bytes() {
        match b {
            b'1' => {
                i -= 1;
                dst.set(i, true);
            }
            b'0' => i -= 1,
            _ => {}
        }
    }
    debug_assert_eq!(i, 0);
}

/// Writes `bits` highest position first, as `0`/`1` digits.
pub(crate) fn write_bits<B: Bits + ?Sized>(bits: &B, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if f.alternate() {
        f.write_str("0b")?;
    }
    for b in bits.iter().rev() {
        f.write_str(if b { "1" } else { "0" })?;
    }
    Ok(())
}

impl<S: Storage> Clone for BitVec<S> {
    /// Deep copy.
    ///
    /// # Panics
    ///
    /// Panics if the copy cannot be allocated; see
    /// [`try_clone`](BitVec::try_clone).
    #[track_caller]
    fn clone(&self) -> Self {
        or_panic(self.try_clone())
    }
}

impl<S: Storage> fmt::Display for BitVec<S> {
    /// Writes the bits highest position first. With `{:#}` the digits are
    /// prefixed by `0b`.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::{BitVec, BitsMut};
    ///
    /// let mut bits: BitVec = BitVec::with_len(5, false);
    /// bits.set(0, true);
    /// assert_eq!(bits.to_string(), "00001");
    /// assert_eq!(format!("{bits:#}"), "0b00001");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bits(self, f)
    }
}

impl<S: Storage> fmt::Binary for BitVec<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bits(self, f)
    }
}

impl<S: Storage> fmt::Debug for BitVec<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitVec")
            .field("len", &self.len())
            .field("bits", &format_args!("{self}"))
            .finish()
    }
}

impl<S: Storage + Default> FromStr for BitVec<S> {
    type Err = Error;

    /// Parses `0`/`1` digits written highest position first. A leading `0b`
    /// and `_` separators are accepted. The empty string gives an empty
    /// vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChar`] with the character offset in `s` of
    /// the first character that is not a digit or separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::{BitVec, Bits, Error};
    ///
    /// let bits: BitVec = "0b1_0110".parse().unwrap();
    /// assert_eq!(bits.len(), 5);
    /// assert_eq!(bits.ones().collect::<Vec<_>>(), [1, 2, 4]);
    ///
    /// let err = "10x1".parse::<BitVec>().unwrap_err();
    /// assert_eq!(err, Error::InvalidChar { ch: 'x', pos: 2 });
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let (digits, n) = scan_bit_str(s)?;
        let mut out = Self::try_with_len(n, false)?;
        store_bit_str(digits, &mut out);
        Ok(out)
    }
}

impl<S: Storage, S2: Storage<Word = S::Word>> PartialEq<BitVec<S2>> for BitVec<S> {
    fn eq(&self, other: &BitVec<S2>) -> bool {
        self.bits_eq(other)
    }
}

impl<S: Storage> Eq for BitVec<S> {}

impl<S: Storage> PartialOrd for BitVec<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Storage> Ord for BitVec<S> {
    /// Lexicographic order over the bits from position 0, like `[bool]`.
    fn cmp(&self, other: &Self) -> Ordering {
        let common = self.len().min(other.len());
        let (a, b) = (self.begin(), other.begin());
        // SAFETY: both ranges hold `common` bits
        let same = unsafe { crate::algo::equal(a, a + common, b) };
        if same {
            return self.len().cmp(&other.len());
        }
        self.iter().cmp(other.iter())
    }
}

impl<S: Storage> Hash for BitVec<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.words()[..].hash(state);
    }
}

impl<S: Storage + Default> From<&[bool]> for BitVec<S> {
    fn from(bits: &[bool]) -> Self {
        bits.iter().copied().collect()
    }
}

impl<S: Storage + Default, const N: usize> From<[bool; N]> for BitVec<S> {
    fn from(bits: [bool; N]) -> Self {
        bits.into_iter().collect()
    }
}

macro_rules! impl_bitwise {
    ($Op:ident $op:ident, $OpAssign:ident $op_assign:ident, $with:ident) => {
        impl<S: Storage, S2: Storage<Word = S::Word>> $Op<&BitVec<S2>> for &BitVec<S> {
            type Output = BitVec<S>;

            #[inline]
            fn $op(self, rhs: &BitVec<S2>) -> BitVec<S> {
                let mut out = self.clone();
                out.$with(rhs);
                out
            }
        }

        impl<S: Storage, S2: Storage<Word = S::Word>> $Op<&BitVec<S2>> for BitVec<S> {
            type Output = BitVec<S>;

            #[inline]
            fn $op(mut self, rhs: &BitVec<S2>) -> BitVec<S> {
                self.$with(rhs);
                self
            }
        }

        impl<S: Storage, S2: Storage<Word = S::Word>> $Op<BitVec<S2>> for BitVec<S> {
            type Output = BitVec<S>;

            #[inline]
            fn $op(mut self, rhs: BitVec<S2>) -> BitVec<S> {
                self.$with(&rhs);
                self
            }
        }

        impl<S: Storage, S2: Storage<Word = S::Word>> $OpAssign<&BitVec<S2>> for BitVec<S> {
            #[inline]
            fn $op_assign(&mut self, rhs: &BitVec<S2>) {
                self.$with(rhs);
            }
        }

        impl<S: Storage, S2: Storage<Word = S::Word>> $OpAssign<BitVec<S2>> for BitVec<S> {
            #[inline]
            fn $op_assign(&mut self, rhs: BitVec<S2>) {
                self.$with(&rhs);
            }
        }
    };
}

impl_bitwise!(BitAnd bitand, BitAndAssign bitand_assign, intersection_with);
impl_bitwise!(BitOr bitor, BitOrAssign bitor_assign, union_with);
impl_bitwise!(BitXor bitxor, BitXorAssign bitxor_assign, symmetric_difference_with);

impl<S: Storage> Not for BitVec<S> {
    type Output = Self;

    /// Complements every bit; the length is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::BitVec;
    ///
    /// let bits: BitVec = "0011".parse().unwrap();
    /// assert_eq!((!bits).to_string(), "1100");
    /// ```
    #[inline]
    fn not(mut self) -> Self {
        self.flip_all();
        self
    }
}

impl<S: Storage> Not for &BitVec<S> {
    type Output = BitVec<S>;

    #[inline]
    fn not(self) -> BitVec<S> {
        !self.clone()
    }
}

impl<S: Storage> ShlAssign<usize> for BitVec<S> {
    /// See [`BitsMut::shift_left`].
    #[inline]
    fn shl_assign(&mut self, n: usize) {
        self.shift_left(n);
    }
}

impl<S: Storage> ShrAssign<usize> for BitVec<S> {
    /// See [`BitsMut::shift_right`].
    #[inline]
    fn shr_assign(&mut self, n: usize) {
        self.shift_right(n);
    }
}

impl<S: Storage> Shl<usize> for BitVec<S> {
    type Output = Self;

    /// Moves every bit `n` positions up; the length is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::BitVec;
    ///
    /// let bits: BitVec = "0001_0011".parse().unwrap();
    /// assert_eq!((bits.clone() << 2).to_string(), "01001100");
    /// assert_eq!((bits >> 1).to_string(), "00001001");
    /// ```
    #[inline]
    fn shl(mut self, n: usize) -> Self {
        self <<= n;
        self
    }
}

impl<S: Storage> Shr<usize> for BitVec<S> {
    type Output = Self;

    #[inline]
    fn shr(mut self, n: usize) -> Self {
        self >>= n;
        self
    }
}
