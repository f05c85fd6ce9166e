//! Closed operand set for mixed-kind arithmetic
//!
//! The `std::ops` impls on [`Rational`] cover statically typed code. This
//! module is the same matrix for values whose kind is only known at run
//! time: every operand is one of the [`Operand`] variants and each operation
//! is a single match over them.

use crate::{Integer, Problem, Rational};
use num::bigint::Sign::*;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use statrs::function::gamma::gamma;

/// Anything a [`Rational`] can be combined with
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Rational(Rational),
    Integer(Integer),
    Signed(i128),
    Unsigned(u128),
    Float(f64),
}

/// Result of a dispatched operation
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Rational(Rational),
    Integer(Integer),
    Float(f64),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn float(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
        }
    }
}

impl Operand {
    pub fn is_float(&self) -> bool {
        matches!(self, Operand::Float(_))
    }

    fn as_integer(&self) -> Option<Cow<'_, Integer>> {
        match self {
            Operand::Integer(n) => Some(Cow::Borrowed(n)),
            Operand::Signed(n) => Some(Cow::Owned(Integer::from(*n))),
            Operand::Unsigned(n) => Some(Cow::Owned(Integer::from(*n))),
            Operand::Rational(_) | Operand::Float(_) => None,
        }
    }

    /// The exact value as a [`Rational`], failing only for non-finite floats
    pub fn to_rational(&self) -> Result<Rational, Problem> {
        match self {
            Operand::Rational(q) => Ok(q.clone()),
            Operand::Integer(n) => Ok(Rational::from(n)),
            Operand::Signed(n) => Ok(Rational::from(*n)),
            Operand::Unsigned(n) => Ok(Rational::from(*n)),
            Operand::Float(x) => Rational::try_from(*x),
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Operand::Rational(q) => q.to_f64(),
            Operand::Integer(n) => n.to_f64(),
            Operand::Signed(n) => *n as f64,
            Operand::Unsigned(n) => *n as f64,
            Operand::Float(x) => *x,
        }
    }
}

impl From<Rational> for Operand {
    fn from(q: Rational) -> Operand {
        Operand::Rational(q)
    }
}

impl From<Integer> for Operand {
    fn from(n: Integer) -> Operand {
        Operand::Integer(n)
    }
}

macro_rules! operand_from {
    ($variant:ident as $wide:ty; $($t:ty)*) => {$(
        impl From<$t> for Operand {
            fn from(n: $t) -> Operand {
                Operand::$variant(n as $wide)
            }
        }
    )*};
}

operand_from!(Signed as i128; i8 i16 i32 i64 i128 isize);
operand_from!(Unsigned as u128; u8 u16 u32 u64 u128 usize);
operand_from!(Float as f64; f32 f64);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Rational(q) => fmt::Display::fmt(q, f),
            Number::Integer(n) => fmt::Display::fmt(n, f),
            Number::Float(x) => fmt::Display::fmt(x, f),
        }
    }
}

/// Combine two operands
///
/// If either side is a float the whole computation is done in [`f64`],
/// otherwise it is exact and the answer is a [`Rational`].
///
/// # Example
///
/// ```
/// use mprat::{apply, BinaryOp, Number, Rational};
/// let third = Rational::new(1, 3).unwrap();
/// let sum = apply(&third.clone().into(), BinaryOp::Add, &2u8.into()).unwrap();
/// assert_eq!(sum, Number::Rational(Rational::new(7, 3).unwrap()));
/// let sum = apply(&third.into(), BinaryOp::Add, &0.5_f64.into()).unwrap();
/// assert!(matches!(sum, Number::Float(_)));
/// ```
pub fn apply(lhs: &Operand, op: BinaryOp, rhs: &Operand) -> Result<Number, Problem> {
    if lhs.is_float() || rhs.is_float() {
        return Ok(Number::Float(op.float(lhs.to_f64(), rhs.to_f64())));
    }
    let mut answer = lhs.to_rational()?;
    answer.apply_assign(op, rhs)?;
    Ok(Number::Rational(answer))
}

/// Order a rational against any operand, `None` only against NaN
pub fn compare(q: &Rational, rhs: &Operand) -> Option<Ordering> {
    match rhs {
        Operand::Rational(r) => Some(q.cmp(r)),
        Operand::Integer(n) => q.partial_cmp(n),
        Operand::Signed(n) => q.partial_cmp(n),
        Operand::Unsigned(n) => q.partial_cmp(n),
        Operand::Float(x) => q.partial_cmp(x),
    }
}

// How a rational exponent resolves once the base is known
enum Plan {
    Base,
    Zero,
    One,
    Raise(Integer),
}

fn plan(base_is_one: bool, base_is_zero: bool, exp: &Rational) -> Result<Plan, Problem> {
    if base_is_one {
        return Ok(Plan::Base);
    }
    if base_is_zero {
        return match exp.sign() {
            Plus => Ok(Plan::Zero),
            NoSign => Ok(Plan::One),
            Minus => Err(Problem::DivideByZero),
        };
    }
    if !exp.is_integer() {
        return Err(Problem::NonIntegralExponent);
    }
    Ok(Plan::Raise(exp.numerator().clone()))
}

/// Raise any operand to the power of any operand
///
/// A float on either side gives [`f64::powf`]. An integral base stays
/// integral, so a negative exponent only works for a base of one. Rational
/// exponents must reduce to integers unless the base is zero or one.
///
/// # Example
///
/// ```
/// use mprat::{pow, Number, Problem, Rational};
/// let half = Rational::new(1, 2).unwrap();
/// let four = Rational::from(4);
/// assert_eq!(
///     pow(&half.clone().into(), &Rational::from(-2).into()),
///     Ok(Number::Rational(four))
/// );
/// assert_eq!(pow(&2u8.into(), &half.into()), Err(Problem::NonIntegralExponent));
/// ```
pub fn pow(base: &Operand, exp: &Operand) -> Result<Number, Problem> {
    if base.is_float() || exp.is_float() {
        return Ok(Number::Float(base.to_f64().powf(exp.to_f64())));
    }
    let b = match base.as_integer() {
        Some(b) => b,
        None => {
            let q = base.to_rational()?;
            let answer = match exp.as_integer() {
                Some(n) => q.pow(n.into_owned())?,
                None => q.pow_rational(&exp.to_rational()?)?,
            };
            return Ok(Number::Rational(answer));
        }
    };
    let e = exp.to_rational()?;
    let answer = match plan(b.is_one(), b.is_zero(), &e)? {
        Plan::Base => b.into_owned(),
        Plan::Zero => Integer::ZERO,
        Plan::One => Integer::ONE,
        Plan::Raise(n) => b.pow_integer(&n)?,
    };
    Ok(Number::Integer(answer))
}

// Gamma function form of x choose y for non-integral arguments
fn float_binomial(x: f64, y: f64) -> Result<f64, Problem> {
    for v in [x, y] {
        if v.is_nan() {
            return Err(Problem::NotANumber);
        }
        if v.is_infinite() {
            return Err(Problem::Infinity);
        }
    }
    Ok(gamma(x + 1.0) / (gamma(y + 1.0) * gamma(x - y + 1.0)))
}

/// Binomial coefficient of any two operands
///
/// An integral bottom keeps the answer exact: an integral top gives an
/// [`Integer`] and a rational top gives a [`Rational`]. A float on either
/// side, or a rational bottom, moves both to [`f64`] and uses the gamma
/// function.
///
/// # Example
///
/// ```
/// use mprat::{binomial, Number, Rational};
/// let half = Rational::new(1, 2).unwrap();
/// assert_eq!(
///     binomial(&half.clone().into(), &2u8.into()),
///     Ok(Number::Rational(Rational::new(-1, 8).unwrap()))
/// );
/// assert!(matches!(binomial(&5u8.into(), &half.into()), Ok(Number::Float(_))));
/// ```
pub fn binomial(top: &Operand, bottom: &Operand) -> Result<Number, Problem> {
    let k = match bottom.as_integer() {
        Some(k) if !top.is_float() => k,
        _ => return float_binomial(top.to_f64(), bottom.to_f64()).map(Number::Float),
    };
    match top.as_integer() {
        Some(n) => Ok(Number::Integer(n.binomial(&k)?)),
        None => Ok(Number::Rational(top.to_rational()?.binomial(k.into_owned())?)),
    }
}

impl Rational {
    /// Apply `op` with `rhs` in place
    ///
    /// On failure `self` is unchanged. A float operand computes in [`f64`]
    /// and the result replaces `self` exactly, so a non-finite result is a
    /// failure.
    pub fn apply_assign(&mut self, op: BinaryOp, rhs: &Operand) -> Result<(), Problem> {
        let n = match rhs {
            Operand::Float(x) => {
                *self = Rational::try_from(op.float(self.to_f64(), *x))?;
                return Ok(());
            }
            Operand::Rational(q) => {
                match op {
                    BinaryOp::Add => *self += q,
                    BinaryOp::Sub => *self -= q,
                    BinaryOp::Mul => *self *= q,
                    BinaryOp::Div => self.try_div_assign(q)?,
                }
                return Ok(());
            }
            Operand::Integer(n) => Cow::Borrowed(n),
            Operand::Signed(n) => Cow::Owned(Integer::from(*n)),
            Operand::Unsigned(n) => Cow::Owned(Integer::from(*n)),
        };
        match op {
            BinaryOp::Add => *self += &*n,
            BinaryOp::Sub => *self -= &*n,
            BinaryOp::Mul => *self *= &*n,
            BinaryOp::Div => self.try_div_assign_integer(&n)?,
        }
        Ok(())
    }

    /// Raise to a rational power
    ///
    /// One stays one and zero follows the sign of the exponent, otherwise
    /// the exponent must be an integer.
    pub fn pow_rational(&self, exp: &Rational) -> Result<Rational, Problem> {
        Ok(match plan(self.is_one(), self.is_zero(), exp)? {
            Plan::Base => self.clone(),
            Plan::Zero => Rational::zero(),
            Plan::One => Rational::one(),
            Plan::Raise(n) => self.pow(n)?,
        })
    }
}
