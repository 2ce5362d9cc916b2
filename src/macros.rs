macro_rules! impl_word {
    ($($t:ty),* $(,)?) => {$(
        impl crate::word::sealed::Sealed for $t {}

        impl crate::word::Word for $t {
            const BITS: u32 = <$t>::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const ONES: Self = <$t>::MAX;

            #[inline(always)]
            fn count_ones(self) -> u32 {
                <$t>::count_ones(self)
            }

            #[inline(always)]
            fn leading_zeros(self) -> u32 {
                <$t>::leading_zeros(self)
            }

            #[inline(always)]
            fn trailing_zeros(self) -> u32 {
                <$t>::trailing_zeros(self)
            }

            #[inline(always)]
            fn reverse_bits(self) -> Self {
                <$t>::reverse_bits(self)
            }

            #[inline(always)]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline(always)]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$t>::wrapping_sub(self, rhs)
            }

            #[inline(always)]
            fn checked_shl(self, n: u32) -> Option<Self> {
                <$t>::checked_shl(self, n)
            }

            #[inline(always)]
            fn checked_shr(self, n: u32) -> Option<Self> {
                <$t>::checked_shr(self, n)
            }
        }
    )*};
}

pub(crate) use impl_word;
