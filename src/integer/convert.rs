use crate::{Integer, Problem};
use num::bigint::Sign::*;
use num::{BigInt, BigUint, ToPrimitive};
use std::fmt;

fn from_i128(n: i128) -> Integer {
    let sign = match n.signum() {
        -1 => Minus,
        0 => NoSign,
        _ => Plus,
    };
    Integer::from_small(sign, n.unsigned_abs())
}

macro_rules! from_signed {
    ($($t:ty)*) => {$(
        impl From<$t> for Integer {
            fn from(n: $t) -> Integer {
                from_i128(n as i128)
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty)*) => {$(
        impl From<$t> for Integer {
            fn from(n: $t) -> Integer {
                Integer::from_small(Plus, n as u128)
            }
        }
    )*};
}

from_signed!(i8 i16 i32 i64 i128 isize);
from_unsigned!(u8 u16 u32 u64 u128 usize);

impl From<BigInt> for Integer {
    fn from(n: BigInt) -> Integer {
        Integer::from_bigint(n)
    }
}

impl From<BigUint> for Integer {
    fn from(n: BigUint) -> Integer {
        Integer::from_bigint(BigInt::from_biguint(Plus, n))
    }
}

impl From<Integer> for BigInt {
    fn from(n: Integer) -> BigInt {
        n.as_bigint().into_owned()
    }
}

impl From<&Integer> for BigInt {
    fn from(n: &Integer) -> BigInt {
        n.as_bigint().into_owned()
    }
}

impl Integer {
    /// The nearest [`f64`], beyond the float range this is an infinity
    pub fn to_f64(&self) -> f64 {
        let magnitude = match self.small() {
            Some((_, mag)) => mag as f64,
            None => self
                .as_bigint()
                .magnitude()
                .to_f64()
                .unwrap_or(f64::INFINITY),
        };
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// The nearest [`f32`], beyond the float range this is an infinity
    pub fn to_f32(&self) -> f32 {
        let magnitude = match self.small() {
            Some((_, mag)) => mag as f32,
            None => f32::INFINITY,
        };
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl ToPrimitive for Integer {
    fn to_i64(&self) -> Option<i64> {
        self.to_i128()?.to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_u128()?.to_u64()
    }

    fn to_i128(&self) -> Option<i128> {
        match self.small()? {
            (Minus, mag) if mag == 1 << 127 => Some(i128::MIN),
            (Minus, mag) => i128::try_from(mag).ok().map(|m| -m),
            (_, mag) => i128::try_from(mag).ok(),
        }
    }

    fn to_u128(&self) -> Option<u128> {
        match self.small()? {
            (Minus, _) => None,
            (_, mag) => Some(mag),
        }
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Integer::to_f64(self))
    }

    fn to_f32(&self) -> Option<f32> {
        Some(Integer::to_f32(self))
    }
}

macro_rules! try_into_native {
    ($($t:ty => $method:ident),*) => {$(
        impl TryFrom<&Integer> for $t {
            type Error = Problem;

            fn try_from(n: &Integer) -> Result<$t, Problem> {
                n.$method().ok_or(Problem::OutOfRange)
            }
        }

        impl TryFrom<Integer> for $t {
            type Error = Problem;

            fn try_from(n: Integer) -> Result<$t, Problem> {
                <$t>::try_from(&n)
            }
        }
    )*};
}

try_into_native!(
    i8 => to_i8, i16 => to_i16, i32 => to_i32, i64 => to_i64, i128 => to_i128, isize => to_isize,
    u8 => to_u8, u16 => to_u16, u32 => to_u32, u64 => to_u64, u128 => to_u128, usize => to_usize
);

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.small() {
            Some((sign, mag)) => f.pad_integral(sign != Minus, "", &mag.to_string()),
            None => fmt::Display::fmt(&*self.as_bigint(), f),
        }
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({self})")
    }
}

impl std::str::FromStr for Integer {
    type Err = Problem;

    fn from_str(s: &str) -> Result<Self, Problem> {
        let (sign, digits) = match s.strip_prefix('-') {
            Some(rest) => (Minus, rest),
            None => (Plus, s.strip_prefix('+').unwrap_or(s)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Problem::BadInteger);
        }
        if let Ok(mag) = digits.parse::<u128>() {
            return Ok(Integer::from_small(sign, mag));
        }
        let mag = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or(Problem::BadInteger)?;
        Ok(Integer::from_bigint(BigInt::from_biguint(sign, mag)))
    }
}
