use crate::Problem;
use num::bigint::Sign::{self, *};
use num::{BigInt, BigUint, ToPrimitive};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use tracing::trace;

pub(crate) mod convert;
pub(crate) mod view;

/// One machine word of an [`Integer`] magnitude
pub type Limb = u64;

/// Number of limbs an [`Integer`] keeps inline before moving to the heap
pub const INLINE_LIMBS: usize = 2;

#[derive(Clone)]
enum Repr {
    Inline {
        sign: Sign,
        limbs: [Limb; INLINE_LIMBS],
    },
    Heap(BigInt),
}

/// Arbitrary precision signed integer
///
/// Values whose magnitude fits in [`INLINE_LIMBS`] limbs are stored inline
/// and use native double word arithmetic. When a result outgrows the inline
/// limbs it is promoted to a heap allocated [`BigInt`], and heap results
/// which fit again are demoted, so the storage of a value depends only on
/// its magnitude. Arithmetic never silently overflows.
///
/// # Examples
///
/// ```
/// use mprat::Integer;
/// let big: Integer = "340282366920938463463374607431768211456".parse().unwrap();
/// assert!(!big.is_inline());
/// let small = &big - &Integer::ONE;
/// assert!(small.is_inline());
/// assert_eq!(small, Integer::from(u128::MAX));
/// ```
#[derive(Clone)]
pub struct Integer {
    repr: Repr,
}

fn join(limbs: &[Limb; INLINE_LIMBS]) -> u128 {
    u128::from(limbs[0]) | (u128::from(limbs[1]) << Limb::BITS)
}

fn split(mag: u128) -> [Limb; INLINE_LIMBS] {
    [mag as Limb, (mag >> Limb::BITS) as Limb]
}

type Small = (Sign, u128);

fn add_small((sa, ma): Small, (sb, mb): Small) -> Option<Small> {
    match (sa, sb) {
        (any, NoSign) => Some((any, ma)),
        (NoSign, any) => Some((any, mb)),
        (Plus, Plus) | (Minus, Minus) => ma.checked_add(mb).map(|m| (sa, m)),
        (x, y) => match ma.cmp(&mb) {
            Ordering::Greater => Some((x, ma - mb)),
            Ordering::Equal => Some((NoSign, 0)),
            Ordering::Less => Some((y, mb - ma)),
        },
    }
}

fn sub_small(a: Small, (sb, mb): Small) -> Option<Small> {
    add_small(a, (-sb, mb))
}

fn mul_small((sa, ma): Small, (sb, mb): Small) -> Option<Small> {
    ma.checked_mul(mb).map(|m| (sa * sb, m))
}

fn div_small((sa, ma): Small, (sb, mb): Small) -> Option<Small> {
    Some((sa * sb, ma / mb))
}

fn rem_small((sa, ma): Small, (_, mb): Small) -> Option<Small> {
    Some((sa, ma % mb))
}

impl Integer {
    /// Zero, the additive identity
    pub const ZERO: Integer = Integer {
        repr: Repr::Inline {
            sign: NoSign,
            limbs: [0; INLINE_LIMBS],
        },
    };

    /// One, the multiplicative identity
    pub const ONE: Integer = Integer {
        repr: Repr::Inline {
            sign: Plus,
            limbs: [1, 0],
        },
    };

    pub(crate) const MINUS_ONE: Integer = Integer {
        repr: Repr::Inline {
            sign: Minus,
            limbs: [1, 0],
        },
    };

    /// The Integer corresponding to the provided [`i64`]
    pub fn new(n: i64) -> Self {
        Self::from(n)
    }

    // NoSign means zero whatever the magnitude, as for `BigInt::from_biguint`
    pub(crate) fn from_small(sign: Sign, mag: u128) -> Self {
        let (sign, mag) = match (sign, mag) {
            (NoSign, _) | (_, 0) => (NoSign, 0),
            other => other,
        };
        Self {
            repr: Repr::Inline {
                sign,
                limbs: split(mag),
            },
        }
    }

    pub(crate) fn from_bigint(n: BigInt) -> Self {
        match n.magnitude().to_u128() {
            Some(mag) => Self::from_small(n.sign(), mag),
            None => Self {
                repr: Repr::Heap(n),
            },
        }
    }

    /// The Integer with the given [`Sign`] and magnitude limbs, least
    /// significant first
    ///
    /// The sign is ignored when the magnitude is zero, and [`NoSign`] always
    /// gives zero.
    pub fn from_limbs(sign: Sign, limbs: &[Limb]) -> Self {
        let len = limbs.iter().rposition(|&l| l != 0).map_or(0, |i| i + 1);
        let limbs = &limbs[..len];
        if limbs.len() <= INLINE_LIMBS {
            let mut inline = [0; INLINE_LIMBS];
            inline[..limbs.len()].copy_from_slice(limbs);
            return Self::from_small(sign, join(&inline));
        }
        let digits: Vec<u32> = limbs
            .iter()
            .flat_map(|&l| [l as u32, (l >> 32) as u32])
            .collect();
        Self::from_bigint(BigInt::from_biguint(sign, BigUint::new(digits)))
    }

    fn small(&self) -> Option<Small> {
        match &self.repr {
            Repr::Inline { sign, limbs } => Some((*sign, join(limbs))),
            Repr::Heap(_) => None,
        }
    }

    pub(crate) fn as_bigint(&self) -> Cow<'_, BigInt> {
        match &self.repr {
            Repr::Inline { sign, limbs } => {
                Cow::Owned(BigInt::from_biguint(*sign, BigUint::from(join(limbs))))
            }
            Repr::Heap(n) => Cow::Borrowed(n),
        }
    }

    fn binary(
        a: &Integer,
        b: &Integer,
        op: &'static str,
        small: fn(Small, Small) -> Option<Small>,
        big: fn(&BigInt, &BigInt) -> BigInt,
    ) -> Integer {
        if let (Some(x), Some(y)) = (a.small(), b.small()) {
            if let Some((sign, mag)) = small(x, y) {
                return Self::from_small(sign, mag);
            }
            trace!(op, "inline limbs overflowed, promoting to heap storage");
        }
        Self::from_bigint(big(&a.as_bigint(), &b.as_bigint()))
    }

    fn add_ref(a: &Integer, b: &Integer) -> Integer {
        Self::binary(a, b, "add", add_small, |x, y| x + y)
    }

    fn sub_ref(a: &Integer, b: &Integer) -> Integer {
        Self::binary(a, b, "sub", sub_small, |x, y| x - y)
    }

    fn mul_ref(a: &Integer, b: &Integer) -> Integer {
        Self::binary(a, b, "mul", mul_small, |x, y| x * y)
    }

    fn div_ref(a: &Integer, b: &Integer) -> Integer {
        Self::binary(a, b, "div", div_small, |x, y| x / y)
    }

    fn rem_ref(a: &Integer, b: &Integer) -> Integer {
        Self::binary(a, b, "rem", rem_small, |x, y| x % y)
    }

    /// Is this value stored inline rather than on the heap?
    pub fn is_inline(&self) -> bool {
        matches!(self.repr, Repr::Inline { .. })
    }

    /// The [`Sign`] of this value
    pub fn sign(&self) -> Sign {
        match &self.repr {
            Repr::Inline { sign, .. } => *sign,
            Repr::Heap(n) => n.sign(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.sign() == NoSign
    }

    pub fn is_one(&self) -> bool {
        matches!(self.small(), Some((Plus, 1)))
    }

    pub fn is_negative(&self) -> bool {
        self.sign() == Minus
    }

    pub fn is_positive(&self) -> bool {
        self.sign() == Plus
    }

    pub(crate) fn is_odd(&self) -> bool {
        match &self.repr {
            Repr::Inline { limbs, .. } => limbs[0] & 1 == 1,
            Repr::Heap(n) => num::Integer::is_odd(n),
        }
    }

    /// Flip the sign in place
    pub fn negate(&mut self) {
        match &mut self.repr {
            Repr::Inline { sign, .. } => *sign = -*sign,
            Repr::Heap(n) => *n = -std::mem::take(n),
        }
    }

    /// The absolute value
    pub fn abs(&self) -> Self {
        let mut answer = self.clone();
        if answer.is_negative() {
            answer.negate();
        }
        answer
    }

    /// Truncating division, or [`Problem::DivideByZero`]
    pub fn checked_div(&self, other: &Integer) -> Result<Self, Problem> {
        if other.is_zero() {
            return Err(Problem::DivideByZero);
        }
        Ok(Self::div_ref(self, other))
    }

    /// The non-negative greatest common divisor
    ///
    /// # Example
    ///
    /// ```
    /// use mprat::Integer;
    /// let g = Integer::new(-12).gcd(&Integer::new(18));
    /// assert_eq!(g, Integer::new(6));
    /// ```
    pub fn gcd(&self, other: &Integer) -> Self {
        Self::binary(
            self,
            other,
            "gcd",
            |(_, a), (_, b)| Some((Plus, num::Integer::gcd(&a, &b))),
            |x, y| num::Integer::gcd(x, y),
        )
    }

    /// Division where the caller guarantees `other` divides `self`
    pub fn div_exact(&self, other: &Integer) -> Self {
        debug_assert!(Self::rem_ref(self, other).is_zero());
        Self::div_ref(self, other)
    }

    /// `self += a * b`
    pub fn add_mul(&mut self, a: &Integer, b: &Integer) {
        *self = Self::add_ref(self, &Self::mul_ref(a, b));
    }

    /// `self -= a * b`
    pub fn sub_mul(&mut self, a: &Integer, b: &Integer) {
        *self = Self::sub_ref(self, &Self::mul_ref(a, b));
    }

    /// Raise to a native power, `0.pow(0)` is one
    pub fn pow(&self, exp: u32) -> Self {
        if exp == 0 {
            return Self::ONE;
        }
        if let Some((sign, mag)) = self.small() {
            if let Some(mag) = mag.checked_pow(exp) {
                let sign = if sign == Minus && exp % 2 == 0 {
                    Plus
                } else {
                    sign
                };
                return Self::from_small(sign, mag);
            }
            trace!(op = "pow", exp, "inline limbs overflowed, promoting to heap storage");
        }
        Self::from_bigint(self.as_bigint().pow(exp))
    }

    /// Raise to an Integer power
    ///
    /// Negative powers are only integers for a base of one or minus one, zero
    /// to a negative power is a division by zero. Exponents too large for a
    /// [`u32`] are rejected unless the base is zero or a unit.
    pub fn pow_integer(&self, exp: &Integer) -> Result<Self, Problem> {
        let unit = self.is_one() || *self == Self::MINUS_ONE;
        if exp.is_negative() {
            if self.is_zero() {
                return Err(Problem::DivideByZero);
            }
            if !unit {
                return Err(Problem::NotAnInteger);
            }
        }
        if let Ok(e) = u32::try_from(exp) {
            return Ok(self.pow(e));
        }
        if self.is_zero() {
            Ok(Self::ZERO)
        } else if unit {
            if self.is_negative() && exp.is_odd() {
                Ok(Self::MINUS_ONE)
            } else {
                Ok(Self::ONE)
            }
        } else {
            Err(Problem::Exhausted)
        }
    }

    /// Binomial coefficient, defined for all signed `self` and `k`
    ///
    /// A negative top uses `C(n, k) = (-1)^k C(k - n - 1, k)`, a negative
    /// bottom is zero except when `k <= n < 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use mprat::Integer;
    /// assert_eq!(Integer::new(5).binomial(&Integer::new(2)).unwrap(), Integer::new(10));
    /// assert_eq!(Integer::new(-3).binomial(&Integer::new(2)).unwrap(), Integer::new(6));
    /// assert_eq!(Integer::new(4).binomial(&Integer::new(-1)).unwrap(), Integer::ZERO);
    /// ```
    pub fn binomial(&self, k: &Integer) -> Result<Self, Problem> {
        if !k.is_negative() {
            if self.is_negative() {
                let top = &(k - self) - &Self::ONE;
                let answer = Self::binomial_natural(&top, k)?;
                return Ok(if k.is_odd() { -answer } else { answer });
            }
            return Self::binomial_natural(self, k);
        }
        if self.is_negative() && k <= self {
            let top = &(-k) - &Self::ONE;
            let bottom = self - k;
            let answer = Self::binomial_natural(&top, &bottom)?;
            return Ok(if bottom.is_odd() { -answer } else { answer });
        }
        Ok(Self::ZERO)
    }

    // Both arguments non-negative
    fn binomial_natural(n: &Integer, k: &Integer) -> Result<Self, Problem> {
        if k > n {
            return Ok(Self::ZERO);
        }
        let rest = n - k;
        let k = if rest < *k { rest } else { k.clone() };
        let steps = u64::try_from(&k).map_err(|_| Problem::Exhausted)?;
        let mut answer = Self::ONE;
        let mut top = n.clone();
        for i in 1..=steps {
            answer = (&answer * &top).div_exact(&Self::from(i));
            top -= &Self::ONE;
        }
        Ok(answer)
    }
}

use core::ops::*;

macro_rules! forward_binop {
    ($Trait:ident, $method:ident, $Assign:ident, $assign:ident, $kernel:ident) => {
        impl $Trait<&Integer> for &Integer {
            type Output = Integer;

            fn $method(self, other: &Integer) -> Integer {
                Integer::$kernel(self, other)
            }
        }

        impl $Trait<Integer> for &Integer {
            type Output = Integer;

            fn $method(self, other: Integer) -> Integer {
                Integer::$kernel(self, &other)
            }
        }

        impl $Trait<&Integer> for Integer {
            type Output = Integer;

            fn $method(self, other: &Integer) -> Integer {
                Integer::$kernel(&self, other)
            }
        }

        impl $Trait for Integer {
            type Output = Integer;

            fn $method(self, other: Integer) -> Integer {
                Integer::$kernel(&self, &other)
            }
        }

        impl $Assign<&Integer> for Integer {
            fn $assign(&mut self, other: &Integer) {
                *self = Integer::$kernel(self, other);
            }
        }

        impl $Assign for Integer {
            fn $assign(&mut self, other: Integer) {
                *self = Integer::$kernel(self, &other);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign, add_ref);
forward_binop!(Sub, sub, SubAssign, sub_assign, sub_ref);
forward_binop!(Mul, mul, MulAssign, mul_assign, mul_ref);
forward_binop!(Div, div, DivAssign, div_assign, div_ref);
forward_binop!(Rem, rem, RemAssign, rem_assign, rem_ref);

impl Neg for Integer {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.negate();
        self
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        -self.clone()
    }
}

impl Default for Integer {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Inline { sign: a, limbs: x }, Repr::Inline { sign: b, limbs: y }) => {
                a == b && x == y
            }
            (Repr::Heap(x), Repr::Heap(y)) => x == y,
            _ => false,
        }
    }
}

impl Eq for Integer {}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.small(), other.small()) {
            (Some((sa, ma)), Some((sb, mb))) => match sa.cmp(&sb) {
                Ordering::Equal => match sa {
                    Plus => ma.cmp(&mb),
                    Minus => mb.cmp(&ma),
                    NoSign => Ordering::Equal,
                },
                unequal => unequal,
            },
            _ => self.as_bigint().cmp(&other.as_bigint()),
        }
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Integer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sign().hash(state);
        for limb in self.view().limbs() {
            limb.hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> Integer {
        s.parse().unwrap()
    }

    #[test]
    fn promote_and_demote() {
        let max = Integer::from(u128::MAX);
        assert!(max.is_inline());
        let bigger = &max + &Integer::ONE;
        assert!(!bigger.is_inline());
        assert_eq!(bigger, big("340282366920938463463374607431768211456"));
        let back = bigger - Integer::ONE;
        assert!(back.is_inline());
        assert_eq!(back, max);
    }

    #[test]
    fn mixed_signs() {
        let a = Integer::new(-7);
        let b = Integer::new(3);
        assert_eq!(&a + &b, Integer::new(-4));
        assert_eq!(&a - &b, Integer::new(-10));
        assert_eq!(&a * &b, Integer::new(-21));
        assert_eq!(&a / &b, Integer::new(-2));
        assert_eq!(&a % &b, Integer::new(-1));
        assert_eq!(&b + &a, Integer::new(-4));
        assert_eq!(&a - &a, Integer::ZERO);
        assert_eq!((&a - &a).sign(), NoSign);
    }

    #[test]
    fn multiply_overflow() {
        let a = Integer::from(u64::MAX);
        let square = &a * &a;
        assert!(square.is_inline());
        let cube = &square * &a;
        assert!(!cube.is_inline());
        assert_eq!(
            cube,
            big("6277101735386680762814942322444851025767571854389858533375")
        );
        assert_eq!(cube.div_exact(&a), square);
    }

    #[test]
    fn gcd() {
        let a = big("-1000000000000000000000000000000000000000000");
        let b = Integer::new(48);
        assert_eq!(a.gcd(&b), Integer::new(16));
        assert_eq!(Integer::ZERO.gcd(&Integer::new(-5)), Integer::new(5));
        assert_eq!(Integer::ZERO.gcd(&Integer::ZERO), Integer::ZERO);
    }

    #[test]
    fn ordering() {
        let huge = big("99999999999999999999999999999999999999999999");
        let tiny = -huge.clone();
        assert!(huge > Integer::new(5));
        assert!(tiny < Integer::new(-5));
        assert!(Integer::new(-2) < Integer::new(-1));
        assert!(Integer::ZERO < Integer::ONE);
    }

    #[test]
    fn power() {
        assert_eq!(Integer::new(-2).pow(3), Integer::new(-8));
        assert_eq!(Integer::new(-2).pow(4), Integer::new(16));
        assert_eq!(Integer::ZERO.pow(0), Integer::ONE);
        assert_eq!(Integer::new(2).pow(200), big("1606938044258990275541962092341162602522202993782792835301376"));
        assert_eq!(
            Integer::new(5).pow_integer(&Integer::new(-1)),
            Err(Problem::NotAnInteger)
        );
        assert_eq!(
            Integer::ZERO.pow_integer(&Integer::new(-1)),
            Err(Problem::DivideByZero)
        );
        let huge = big("100000000000000000000000");
        assert_eq!(Integer::MINUS_ONE.pow_integer(&huge), Ok(Integer::ONE));
        assert_eq!(Integer::new(3).pow_integer(&huge), Err(Problem::Exhausted));
    }

    #[test]
    fn binomials() {
        let c = |n: i64, k: i64| Integer::new(n).binomial(&Integer::new(k)).unwrap();
        assert_eq!(c(10, 3), Integer::new(120));
        assert_eq!(c(10, 0), Integer::ONE);
        assert_eq!(c(3, 5), Integer::ZERO);
        assert_eq!(c(-1, 3), Integer::new(-1));
        assert_eq!(c(-4, 2), Integer::new(10));
        assert_eq!(c(-1, -1), Integer::ONE);
        assert_eq!(c(-3, -5), Integer::new(6));
        assert_eq!(c(-3, -2), Integer::ZERO);
        assert_eq!(c(100, 50), big("100891344545564193334812497256"));
    }

    #[test]
    fn limbs_round_trip() {
        let n = big("-123456789012345678901234567890123456789012345678901234567890");
        let view = n.view();
        let back = Integer::from_limbs(view.sign(), view.limbs());
        assert_eq!(back, n);
        assert_eq!(Integer::from_limbs(Minus, &[0, 0, 0]), Integer::ZERO);
        assert_eq!(Integer::from_limbs(Plus, &[7, 0, 0, 0]), Integer::new(7));
    }

    #[test]
    fn no_sign_is_zero() {
        let cases: [&[Limb]; 3] = [&[5], &[5, 1], &[5, 0, 1]];
        for limbs in cases {
            let n = Integer::from_limbs(NoSign, limbs);
            assert!(n.is_zero());
            assert_eq!(n, Integer::ZERO);
            assert_eq!(n.to_string(), "0");
        }
        let n = Integer::from_limbs(NoSign, &[5]);
        let r = crate::Rational::new(n, 3).unwrap();
        assert_eq!(r, crate::Rational::zero());
        assert!(r.is_canonical());
    }
}
