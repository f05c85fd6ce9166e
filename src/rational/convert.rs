use crate::{Integer, Problem, Rational};
use num::{BigInt, One};

// sig * 2^shift, built already canonical: the trailing zeros of the
// significand are moved into the exponent, leaving an odd numerator over
// a power of two.
fn dyadic(neg: bool, sig: u64, shift: i32) -> Rational {
    if sig == 0 {
        return Rational::zero();
    }
    let zeros = sig.trailing_zeros();
    let sig = sig >> zeros;
    let shift = shift + zeros as i32;
    let mut answer = if shift >= 0 {
        let big = BigInt::from(sig) << shift as usize;
        Rational::from_integer(Integer::from(big))
    } else {
        Rational {
            num: Integer::from(sig),
            den: Integer::from(BigInt::one() << shift.unsigned_abs() as usize),
        }
    };
    if neg {
        answer.negate();
    }
    answer
}

impl TryFrom<f32> for Rational {
    type Error = Problem;

    fn try_from(n: f32) -> Result<Rational, Problem> {
        const NEG_BITS: u32 = 0x8000_0000;
        const EXP_BITS: u32 = 0x7f80_0000;
        const SIG_BITS: u32 = 0x007f_ffff;
        debug_assert_eq!(NEG_BITS + EXP_BITS + SIG_BITS, u32::MAX);

        let bits = n.to_bits();
        let neg = (bits & NEG_BITS) == NEG_BITS;
        let exp = (bits & EXP_BITS) >> EXP_BITS.trailing_zeros();
        let sig = bits & SIG_BITS;
        match exp {
            0 => Ok(dyadic(neg, sig.into(), -149)),
            255 => {
                if sig == 0 {
                    Err(Problem::Infinity)
                } else {
                    Err(Problem::NotANumber)
                }
            }
            _ => Ok(dyadic(neg, (SIG_BITS + 1 + sig).into(), exp as i32 - 150)),
        }
    }
}

impl TryFrom<f64> for Rational {
    type Error = Problem;

    fn try_from(n: f64) -> Result<Rational, Problem> {
        const NEG_BITS: u64 = 0x8000_0000_0000_0000;
        const EXP_BITS: u64 = 0x7ff0_0000_0000_0000;
        const SIG_BITS: u64 = 0x000f_ffff_ffff_ffff;
        debug_assert_eq!(NEG_BITS + EXP_BITS + SIG_BITS, u64::MAX);

        let bits = n.to_bits();
        let neg = (bits & NEG_BITS) == NEG_BITS;
        let exp = (bits & EXP_BITS) >> EXP_BITS.trailing_zeros();
        let sig = bits & SIG_BITS;
        match exp {
            0 => Ok(dyadic(neg, sig, -1074)),
            2047 => {
                if sig == 0 {
                    Err(Problem::Infinity)
                } else {
                    Err(Problem::NotANumber)
                }
            }
            _ => Ok(dyadic(neg, SIG_BITS + 1 + sig, exp as i32 - 1075)),
        }
    }
}

macro_rules! from_native {
    ($($t:ty)*) => {$(
        impl From<$t> for Rational {
            fn from(n: $t) -> Rational {
                Rational::from_integer(Integer::from(n))
            }
        }
    )*};
}

from_native!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

impl From<Integer> for Rational {
    fn from(n: Integer) -> Rational {
        Rational::from_integer(n)
    }
}

impl From<&Integer> for Rational {
    fn from(n: &Integer) -> Rational {
        Rational::from_integer(n.clone())
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Rational {
        Rational::from_integer(Integer::from(n))
    }
}

impl Rational {
    /// Numerator divided by denominator, each first converted to [`f64`]
    ///
    /// This is not correctly rounded. When either part is beyond the float
    /// range the answer is an infinity, zero, or NaN even if the value
    /// itself is representable.
    pub fn to_f64(&self) -> f64 {
        self.num.to_f64() / self.den.to_f64()
    }

    /// Numerator divided by denominator, each first converted to [`f32`]
    pub fn to_f32(&self) -> f32 {
        self.num.to_f32() / self.den.to_f32()
    }
}

impl From<&Rational> for f64 {
    fn from(r: &Rational) -> f64 {
        r.to_f64()
    }
}

impl From<Rational> for f64 {
    fn from(r: Rational) -> f64 {
        r.to_f64()
    }
}

impl From<&Rational> for f32 {
    fn from(r: &Rational) -> f32 {
        r.to_f32()
    }
}

impl From<Rational> for f32 {
    fn from(r: Rational) -> f32 {
        r.to_f32()
    }
}

impl From<&Rational> for Integer {
    fn from(r: &Rational) -> Integer {
        r.to_integer()
    }
}

macro_rules! try_into_native {
    ($($t:ty)*) => {$(
        impl TryFrom<&Rational> for $t {
            type Error = Problem;

            fn try_from(r: &Rational) -> Result<$t, Problem> {
                <$t>::try_from(&r.to_integer())
            }
        }

        impl TryFrom<Rational> for $t {
            type Error = Problem;

            fn try_from(r: Rational) -> Result<$t, Problem> {
                <$t>::try_from(&r)
            }
        }
    )*};
}

try_into_native!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero() {
        let f: f32 = 0.0;
        let d: f64 = -0.0;
        let a: Rational = f.try_into().unwrap();
        let b: Rational = d.try_into().unwrap();
        let zero = Rational::zero();
        assert_eq!(a, zero);
        assert_eq!(b, zero);
        assert!(b.is_canonical());
    }

    #[test]
    fn half_from_float() {
        let half = 0.5_f32;
        let correct = Rational::new(1, 2).unwrap();
        let answer: Rational = half.try_into().unwrap();
        assert_eq!(answer, correct);
        let half = 0.5_f64;
        let answer: Rational = half.try_into().unwrap();
        assert_eq!(answer, correct);
        let answer: Rational = (-0.5_f64).try_into().unwrap();
        assert_eq!(answer, -correct);
    }

    #[test]
    fn repr_f32() {
        let f: f32 = 1.23456789;
        let a: Rational = f.try_into().unwrap();
        let correct = Rational::new(5178153, 4194304).unwrap();
        assert_eq!(a, correct);
        assert_eq!(a.to_f32(), f);
    }

    #[test]
    fn repr_f64() {
        let f: f64 = 1.23456789;
        let a: Rational = f.try_into().unwrap();
        let correct = Rational::new(5559999489367579_i64, 4503599627370496_i64).unwrap();
        assert_eq!(a, correct);
        assert_eq!(a.to_f64(), f);
    }

    #[test]
    fn not_finite() {
        assert_eq!(Rational::try_from(f64::NAN), Err(Problem::NotANumber));
        assert_eq!(Rational::try_from(f64::INFINITY), Err(Problem::Infinity));
        assert_eq!(Rational::try_from(f32::NEG_INFINITY), Err(Problem::Infinity));
        assert_eq!(Rational::try_from(f32::NAN), Err(Problem::NotANumber));
    }

    #[test]
    fn extremes() {
        let tiny = Rational::try_from(f32::from_bits(1)).unwrap();
        assert_eq!(tiny.numerator(), &Integer::ONE);
        assert_eq!(tiny.denominator(), &Integer::new(2).pow(149));
        let tiny = Rational::try_from(-f64::from_bits(1)).unwrap();
        assert_eq!(tiny.numerator(), &Integer::new(-1));
        assert_eq!(tiny.denominator(), &Integer::new(2).pow(1074));
        let big = Rational::try_from(2.0_f64.powi(100)).unwrap();
        assert_eq!(big, Rational::from(1u128 << 100));
        let max = Rational::try_from(f64::MAX).unwrap();
        assert!(max.is_integer());
        assert!(!max.numerator().is_inline());
        assert_eq!(max.to_f64(), f64::MAX);
    }

    #[test]
    fn lossy_to_float() {
        assert_eq!(Rational::new(1, 3).unwrap().to_f64(), 1.0 / 3.0);
        // both parts overflow the float range
        let huge = Rational::new(Integer::new(10).pow(400), Integer::new(3).pow(700)).unwrap();
        assert!(huge.to_f64().is_nan());
        assert_eq!(f64::from(&Rational::new(-3, 4).unwrap()), -0.75);
    }

    #[test]
    fn to_natives() {
        let r = Rational::new(-7, 2).unwrap();
        assert_eq!(i32::try_from(&r), Ok(-3));
        assert_eq!(u8::try_from(&r), Err(Problem::OutOfRange));
        assert_eq!(u8::try_from(Rational::from(255)), Ok(255));
        assert_eq!(u8::try_from(Rational::from(256)), Err(Problem::OutOfRange));
        assert_eq!(Integer::from(&r), Integer::new(-3));
    }
}
