use crate::{Integer, Problem, Rational};
use std::any::type_name;
use std::fmt::Display;

/// Checked conversion which fails instead of rounding or truncating
///
/// # Example
///
/// ```
/// use mprat::{safe_cast, Problem, ProblemKind, Rational};
/// let seven: i8 = safe_cast(&Rational::from(7)).unwrap();
/// assert_eq!(seven, 7);
/// let half = Rational::new(1, 2).unwrap();
/// let failed = safe_cast::<i8, _>(&half).unwrap_err();
/// assert_eq!(failed.kind(), ProblemKind::SafeCastFailure);
/// ```
pub trait SafeCast<To> {
    fn safe_cast(&self) -> Result<To, Problem>;
}

/// Free function form of [`SafeCast::safe_cast`]
pub fn safe_cast<To, T: SafeCast<To> + ?Sized>(x: &T) -> Result<To, Problem> {
    x.safe_cast()
}

fn failure<To>(value: &dyn Display, reason: &'static str) -> Problem {
    let target = type_name::<To>();
    tracing::debug!(%value, to = target, reason, "safe cast failed");
    Problem::SafeCast {
        value: value.to_string(),
        target,
        reason,
    }
}

const NOT_FINITE: &str = "the value is not finite";
const NOT_INTEGRAL: &str = "the denominator is not 1";
const TOO_BIG: &str = "the value does not fit";

macro_rules! float_to_rational {
    ($($f:ty)*) => {$(
        impl SafeCast<Rational> for $f {
            fn safe_cast(&self) -> Result<Rational, Problem> {
                Rational::try_from(*self).map_err(|_| failure::<Rational>(self, NOT_FINITE))
            }
        }
    )*};
}

float_to_rational!(f32 f64);

macro_rules! native_casts {
    ($($t:ty)*) => {$(
        impl SafeCast<Rational> for $t {
            fn safe_cast(&self) -> Result<Rational, Problem> {
                Ok(Rational::from(*self))
            }
        }

        impl SafeCast<$t> for Rational {
            fn safe_cast(&self) -> Result<$t, Problem> {
                if !self.is_integer() {
                    return Err(failure::<$t>(self, NOT_INTEGRAL));
                }
                <$t>::try_from(self.numerator()).map_err(|_| failure::<$t>(self, TOO_BIG))
            }
        }
    )*};
}

native_casts!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

impl SafeCast<Rational> for Integer {
    fn safe_cast(&self) -> Result<Rational, Problem> {
        Ok(Rational::from(self))
    }
}

impl SafeCast<Integer> for Rational {
    fn safe_cast(&self) -> Result<Integer, Problem> {
        if !self.is_integer() {
            return Err(failure::<Integer>(self, NOT_INTEGRAL));
        }
        Ok(self.numerator().clone())
    }
}
