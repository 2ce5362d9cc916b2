use super::{blend, in_one_word, read_bits, word_span, write_bits};
use crate::{
    ptr::{BitPtr, distance},
    word::{Word, mask_from, mask_range, mask_to},
};

/// A bitwise operation combining two words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `a & b`
    And,
    /// `a | b`
    Or,
    /// `a ^ b`
    Xor,
    /// `a & !b`
    AndNot,
}

impl BinaryOp {
    /// Applies the operation to two words.
    #[must_use]
    #[inline(always)]
    pub fn apply<W: Word>(self, a: W, b: W) -> W {
        match self {
            Self::And => a & b,
            Self::Or => a | b,
            Self::Xor => a ^ b,
            Self::AndNot => a & !b,
        }
    }
}

/// Writes `op(a, b)` for every pair of bits from `[first1, last1)` and the
/// range starting at `first2` into the range starting at `d_first`, and
/// returns the end of the destination range.
///
/// The destination may be one of the inputs.
///
/// # Safety
///
/// Both inputs must be readable and the destination writable. A destination
/// that partially overlaps an input must start no later than that input.
pub unsafe fn transform<W: Word>(
    first1: BitPtr<W>,
    last1: BitPtr<W>,
    first2: BitPtr<W>,
    d_first: BitPtr<W>,
    op: BinaryOp,
) -> BitPtr<W> {
    let len = distance(first1, last1);
    if len == 0 {
        return d_first;
    }
    unsafe {
        if first1.bit() == d_first.bit() && first2.bit() == d_first.bit() {
            transform_aligned(first1, last1, first2, d_first, len, op);
        } else {
            transform_unaligned(first1, first2, d_first, len, op);
        }
    }
    d_first + len
}

unsafe fn transform_aligned<W: Word>(
    first1: BitPtr<W>,
    last1: BitPtr<W>,
    first2: BitPtr<W>,
    d_first: BitPtr<W>,
    len: usize,
    op: BinaryOp,
) {
    let bit = first1.bit();
    let mut a = first1.word_ptr();
    let mut b = first2.word_ptr();
    let mut d = d_first.word_ptr();
    unsafe {
        if in_one_word(first1, len) {
            let m = mask_range::<W>(bit, bit + len as u32);
            blend(d, op.apply(a.read(), b.read()), m);
            return;
        }
        if bit != 0 {
            blend(d, op.apply(a.read(), b.read()), mask_from::<W>(bit));
            a = a.add(1);
            b = b.add(1);
            d = d.add(1);
        }
        let n = word_span(a, last1.word_ptr());
        for i in 0..n {
            d.add(i).write(op.apply(a.add(i).read(), b.add(i).read()));
        }
        if last1.bit() != 0 {
            let v = op.apply(a.add(n).read(), b.add(n).read());
            blend(d.add(n), v, mask_to::<W>(last1.bit()));
        }
    }
}

unsafe fn transform_unaligned<W: Word>(
    mut a: BitPtr<W>,
    mut b: BitPtr<W>,
    mut d: BitPtr<W>,
    mut rem: usize,
    op: BinaryOp,
) {
    unsafe {
        if d.bit() != 0 {
            let n = rem.min((W::BITS - d.bit()) as usize) as u32;
            write_bits(d, n, op.apply(read_bits(a, n), read_bits(b, n)));
            a += n as usize;
            b += n as usize;
            d += n as usize;
            rem -= n as usize;
        }
        let mut dp = d.word_ptr();
        while rem >= W::BITS as usize {
            dp.write(op.apply(read_bits(a, W::BITS), read_bits(b, W::BITS)));
            a += W::BITS as usize;
            b += W::BITS as usize;
            dp = dp.add(1);
            rem -= W::BITS as usize;
        }
        if rem != 0 {
            let n = rem as u32;
            write_bits(BitPtr::new(dp, 0), n, op.apply(read_bits(a, n), read_bits(b, n)));
        }
    }
}

/// Whether `op(a, b)` is set for any pair of bits from `[first1, last1)` and
/// the range starting at `first2`.
///
/// With [`BinaryOp::And`] this tests whether the ranges intersect, with
/// [`BinaryOp::AndNot`] whether the first is not a subset of the second.
///
/// # Safety
///
/// Both ranges must be readable.
pub unsafe fn any_of<W: Word>(
    first1: BitPtr<W>,
    last1: BitPtr<W>,
    first2: BitPtr<W>,
    op: BinaryOp,
) -> bool {
    let mut rem = distance(first1, last1);
    let mut a = first1;
    let mut b = first2;
    unsafe {
        if rem != 0 && a.bit() != 0 {
            let n = rem.min((W::BITS - a.bit()) as usize) as u32;
            if op.apply(read_bits(a, n), read_bits(b, n)) != W::ZERO {
                return true;
            }
            a += n as usize;
            b += n as usize;
            rem -= n as usize;
        }
        while rem >= W::BITS as usize {
            if op.apply(a.read_word(), read_bits(b, W::BITS)) != W::ZERO {
                return true;
            }
            a += W::BITS as usize;
            b += W::BITS as usize;
            rem -= W::BITS as usize;
        }
        rem != 0 && {
            let n = rem as u32;
            op.apply(read_bits(a, n), read_bits(b, n)) != W::ZERO
        }
    }
}
