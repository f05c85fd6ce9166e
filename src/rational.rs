use crate::{Integer, Problem};
use num::bigint::Sign;
use num::{One, Zero};
use std::fmt;

pub(crate) mod arith;
pub(crate) mod compare;
pub(crate) mod convert;
pub(crate) mod raw;

/// Ratio of two integers in canonical form
///
/// The numerator and denominator are [`Integer`] values which are kept
/// coprime, with a strictly positive denominator, and zero is always `0/1`.
/// Every public operation preserves this, the only way to break it is the
/// explicit [`raw_parts_mut`](Rational::raw_parts_mut) accessor.
///
/// The "ordinary" floating point numbers are rationals, but when converted
/// the exact rational may not be what you intuitively expected. It's obvious
/// that one third isn't represented exactly as an f64, but not everybody
/// will realise that 0.3 isn't either.
///
/// # Examples
///
/// Parsing a rational from a simple fraction
/// ```
/// use mprat::Rational;
/// let half: Rational = "9/18".parse().unwrap();
/// assert_eq!(half.to_string(), "1/2");
/// ```
///
/// Converting a 64-bit floating point number
/// ```
/// use mprat::Rational;
/// let r: Rational = 0.3_f64.try_into().unwrap();
/// assert!(r != Rational::new(3, 10).unwrap());
/// ```
///
/// Simple arithmetic
/// ```
/// use mprat::Rational;
/// let quarter = Rational::new(1, 4).unwrap();
/// let eighteen = Rational::from(18);
/// let two = Rational::one() + Rational::one();
/// let sixteen = eighteen - two;
/// let four = quarter * sixteen;
/// assert_eq!(four, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    num: Integer,
    den: Integer,
}

impl Rational {
    /// Zero, the additive identity
    pub fn zero() -> Self {
        Self {
            num: Integer::ZERO,
            den: Integer::ONE,
        }
    }

    /// One, the multiplicative identity
    pub fn one() -> Self {
        Self {
            num: Integer::ONE,
            den: Integer::ONE,
        }
    }

    /// The Rational `n / d` from anything convertible to [`Integer`]
    ///
    /// # Examples
    ///
    /// ```
    /// use mprat::{Integer, Problem, Rational};
    /// let two = Rational::new(4, 2).unwrap();
    /// assert_eq!(two.numerator(), &Integer::new(2));
    /// assert_eq!(two.to_string(), "2");
    /// let half = Rational::new(-1i8, Integer::new(-2)).unwrap();
    /// assert_eq!(half.to_string(), "1/2");
    /// assert_eq!(Rational::new(1, 0), Err(Problem::DivideByZero));
    /// ```
    pub fn new<N: Into<Integer>, D: Into<Integer>>(n: N, d: D) -> Result<Self, Problem> {
        let den = d.into();
        if den.is_zero() {
            return Err(Problem::DivideByZero);
        }
        let mut answer = Self { num: n.into(), den };
        answer.canonicalize();
        Ok(answer)
    }

    /// The Rational corresponding to the provided [`Integer`]
    pub fn from_integer(n: Integer) -> Self {
        Self {
            num: n,
            den: Integer::ONE,
        }
    }

    /// Restore canonical form
    ///
    /// Divides out the common factor and moves any negative sign onto the
    /// numerator. Only needed after using [`raw_parts_mut`](Rational::raw_parts_mut).
    pub fn canonicalize(&mut self) {
        if self.num.is_zero() {
            self.den = Integer::ONE;
            return;
        }
        debug_assert!(!self.den.is_zero());
        let divisor = self.num.gcd(&self.den);
        if !divisor.is_one() {
            self.num = self.num.div_exact(&divisor);
            self.den = self.den.div_exact(&divisor);
        }
        if self.den.is_negative() {
            self.num.negate();
            self.den.negate();
        }
    }

    /// Is this value in canonical form?
    pub fn is_canonical(&self) -> bool {
        if !self.den.is_positive() {
            return false;
        }
        if self.num.is_zero() {
            return self.den.is_one();
        }
        self.num.gcd(&self.den).is_one()
    }

    pub fn numerator(&self) -> &Integer {
        &self.num
    }

    pub fn denominator(&self) -> &Integer {
        &self.den
    }

    /// Split into numerator and denominator
    pub fn into_parts(self) -> (Integer, Integer) {
        (self.num, self.den)
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.num.is_one() && self.den.is_one()
    }

    /// Checks if the value is an integer
    ///
    /// # Example
    ///
    /// ```
    /// use mprat::Rational;
    /// assert!(Rational::from(5).is_integer());
    /// assert!(Rational::new(16, 4).unwrap().is_integer());
    /// assert!(!Rational::new(5, 4).unwrap().is_integer());
    /// ```
    pub fn is_integer(&self) -> bool {
        self.den.is_one()
    }

    /// The [`Sign`] of this value
    pub fn sign(&self) -> Sign {
        self.num.sign()
    }

    /// Flip the sign in place
    pub fn negate(&mut self) {
        self.num.negate();
    }

    /// The absolute value
    pub fn abs(&self) -> Self {
        Self {
            num: self.num.abs(),
            den: self.den.clone(),
        }
    }

    /// The reciprocal, or [`Problem::DivideByZero`] for zero
    pub fn recip(&self) -> Result<Self, Problem> {
        if self.is_zero() {
            return Err(Problem::DivideByZero);
        }
        let mut answer = Self {
            num: self.den.clone(),
            den: self.num.clone(),
        };
        if answer.den.is_negative() {
            answer.num.negate();
            answer.den.negate();
        }
        Ok(answer)
    }

    /// The integer part of this Rational
    ///
    /// Non integer rationals will thus be truncated towards zero
    ///
    /// # Example
    ///
    /// ```
    /// use mprat::Rational;
    /// let approx_pi = Rational::new(22, 7).unwrap();
    /// assert_eq!(approx_pi.trunc(), 3);
    /// ```
    pub fn trunc(&self) -> Self {
        if self.is_integer() {
            return self.clone();
        }
        Self::from_integer(self.to_integer())
    }

    /// The fractional part of this Rational
    ///
    /// If the rational was negative, this fraction will also be negative
    ///
    /// # Example
    ///
    /// ```
    /// use mprat::Rational;
    /// let backward = Rational::new(-53, 9).unwrap();
    /// assert_eq!(backward.fract(), Rational::new(-8, 9).unwrap());
    /// ```
    pub fn fract(&self) -> Self {
        if self.is_integer() {
            return Self::zero();
        }
        Self {
            num: &self.num % &self.den,
            den: self.den.clone(),
        }
    }

    /// The truncated [`Integer`] quotient of numerator and denominator
    pub fn to_integer(&self) -> Integer {
        &self.num / &self.den
    }

    /// Integer exponentiation
    ///
    /// Numerator and denominator are raised independently. A negative
    /// exponent inverts first, so zero to a negative power is a division
    /// by zero.
    ///
    /// # Example
    ///
    /// ```
    /// use mprat::{Problem, Rational};
    /// let two_thirds = Rational::new(2, 3).unwrap();
    /// assert_eq!(two_thirds.pow(-2), Ok(Rational::new(9, 4).unwrap()));
    /// assert_eq!(Rational::zero().pow(-1), Err(Problem::DivideByZero));
    /// ```
    pub fn pow<E: Into<Integer>>(&self, exp: E) -> Result<Self, Problem> {
        let exp = exp.into();
        if !exp.is_negative() {
            return Ok(Self {
                num: self.num.pow_integer(&exp)?,
                den: self.den.pow_integer(&exp)?,
            });
        }
        if self.is_zero() {
            return Err(Problem::DivideByZero);
        }
        let exp = -exp;
        let mut answer = Self {
            num: self.den.pow_integer(&exp)?,
            den: self.num.pow_integer(&exp)?,
        };
        if answer.den.is_negative() {
            answer.num.negate();
            answer.den.negate();
        }
        Ok(answer)
    }

    /// Binomial coefficient with this value on top
    ///
    /// Integral values use [`Integer::binomial`], otherwise a negative `k`
    /// gives zero and a non-negative `k` uses [`generic_binomial`](Rational::generic_binomial).
    ///
    /// # Example
    ///
    /// ```
    /// use mprat::Rational;
    /// let half = Rational::new(1, 2).unwrap();
    /// assert_eq!(half.binomial(2), Ok(Rational::new(-1, 8).unwrap()));
    /// assert_eq!(half.binomial(-3), Ok(Rational::zero()));
    /// assert_eq!(Rational::from(6).binomial(3), Ok(Rational::from(20)));
    /// ```
    pub fn binomial<K: Into<Integer>>(&self, k: K) -> Result<Self, Problem> {
        let k = k.into();
        if self.is_integer() {
            return Ok(Self::from_integer(self.num.binomial(&k)?));
        }
        if k.is_negative() {
            return Ok(Self::zero());
        }
        Self::generic_binomial(self, &k)
    }

    /// Falling factorial binomial `x (x - 1) ... (x - k + 1) / k!`
    ///
    /// This costs `k` rational multiplications and divisions.
    pub fn generic_binomial(x: &Rational, k: &Integer) -> Result<Self, Problem> {
        if k.is_negative() {
            return Err(Problem::NegativeBinomialIndex);
        }
        let steps = u64::try_from(k).map_err(|_| Problem::Exhausted)?;
        let mut answer = Self::one();
        let mut top = x.clone();
        for i in 1..=steps {
            answer *= &top;
            answer.div_integer(&Integer::from(i));
            top -= 1;
        }
        Ok(answer)
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Rational::zero()
    }

    fn is_zero(&self) -> bool {
        Rational::is_zero(self)
    }
}

impl One for Rational {
    fn one() -> Self {
        Rational::one()
    }

    fn is_one(&self) -> bool {
        Rational::is_one(self)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            fmt::Display::fmt(&self.num, f)
        } else {
            let text = format!("{}/{}", self.num.abs(), self.den);
            f.pad_integral(!self.num.is_negative(), "", &text)
        }
    }
}

impl std::str::FromStr for Rational {
    type Err = Problem;

    fn from_str(s: &str) -> Result<Self, Problem> {
        match s.split_once('/') {
            Some((n, d)) => {
                let num: Integer = n.parse().map_err(|_| Problem::BadFraction)?;
                let den: Integer = d.parse().map_err(|_| Problem::BadFraction)?;
                Self::new(num, den)
            }
            None => Ok(Self::from_integer(s.parse()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> Rational {
        s.parse().unwrap()
    }

    #[test]
    fn canonical_construction() {
        let two = Rational::new(4, 2).unwrap();
        assert_eq!(two.numerator(), &Integer::new(2));
        assert_eq!(two.denominator(), &Integer::ONE);
        assert_eq!(two.to_string(), "2");
        let half = Rational::new(-1, -2).unwrap();
        assert_eq!(half.to_string(), "1/2");
        let minus_half = Rational::new(3, -6).unwrap();
        assert_eq!(minus_half.to_string(), "-1/2");
        let zero = Rational::new(0, -17).unwrap();
        assert_eq!(zero.denominator(), &Integer::ONE);
        assert_eq!(zero, Rational::default());
        for r in [two, half, minus_half, zero] {
            assert!(r.is_canonical());
        }
    }

    #[test]
    fn divide_by_zero() {
        assert_eq!(Rational::new(1, 0), Err(Problem::DivideByZero));
        assert_eq!("5/0".parse::<Rational>(), Err(Problem::DivideByZero));
        assert_eq!(Rational::zero().recip(), Err(Problem::DivideByZero));
    }

    #[test]
    fn parse() {
        assert_eq!(q("3/6"), Rational::new(1, 2).unwrap());
        assert_eq!(q("-12"), Rational::from(-12));
        assert_eq!(q("6/-4"), Rational::new(-3, 2).unwrap());
        assert_eq!(
            q("288230376151711743") * q("45"),
            q("12970366926827028435")
        );
        assert_eq!("".parse::<Rational>(), Err(Problem::BadInteger));
        assert_eq!("1/".parse::<Rational>(), Err(Problem::BadFraction));
        assert_eq!("/2".parse::<Rational>(), Err(Problem::BadFraction));
        assert_eq!("1/2/3".parse::<Rational>(), Err(Problem::BadFraction));
        assert_eq!("0.5".parse::<Rational>(), Err(Problem::BadInteger));
    }

    #[test]
    fn display_round_trip() {
        for text in ["0", "-7", "22/7", "-1/3", "123456789012345678901234567890/11"] {
            assert_eq!(q(text).to_string(), text);
            assert_eq!(q(&q(text).to_string()), q(text));
        }
    }

    #[test]
    fn display_flags() {
        assert_eq!(format!("{:>6}", q("1/2")), "   1/2");
        assert_eq!(format!("{:<6}|", q("-1/3")), "-1/3  |");
        assert_eq!(format!("{:+}", q("22/7")), "+22/7");
        assert_eq!(format!("{:^7}", q("5")), "   5   ");
    }

    #[test]
    fn is_canonical_detects_raw_state() {
        let mut r = Rational::new(1, 2).unwrap();
        *r.raw_parts_mut().numerator_mut() = Integer::new(4);
        *r.raw_parts_mut().denominator_mut() = Integer::new(8);
        assert!(!r.is_canonical());
        r.canonicalize();
        assert!(r.is_canonical());
        assert_eq!(r, Rational::new(1, 2).unwrap());
    }

    #[test]
    fn reciprocal() {
        let r = Rational::new(-2, 5).unwrap();
        assert_eq!(r.recip(), Ok(Rational::new(-5, 2).unwrap()));
        assert_eq!(r.abs(), Rational::new(2, 5).unwrap());
    }

    #[test]
    fn fract() {
        let seventy_ninths = Rational::new(70, 9).unwrap();
        assert_eq!(seventy_ninths.fract(), Rational::new(7, 9).unwrap());
        assert_eq!(
            (-seventy_ninths.clone()).fract(),
            Rational::new(-7, 9).unwrap()
        );
        assert_eq!(Rational::from(6).fract(), Rational::zero());
    }

    #[test]
    fn trunc() {
        let seventy_ninths = Rational::new(70, 9).unwrap();
        let whole = seventy_ninths.trunc();
        let frac = seventy_ninths.fract();
        assert_eq!(whole + frac, seventy_ninths);
        let shrink = Rational::new(-405, 11).unwrap();
        assert_eq!(shrink.trunc(), -36);
        assert_eq!(shrink.trunc() + shrink.fract(), shrink);
    }

    #[test]
    fn power() {
        let two_thirds = Rational::new(2, 3).unwrap();
        assert_eq!(two_thirds.pow(-2), Ok(Rational::new(9, 4).unwrap()));
        assert_eq!(two_thirds.pow(0), Ok(Rational::one()));
        assert_eq!(two_thirds.pow(3), Ok(Rational::new(8, 27).unwrap()));
        let minus_half = Rational::new(-1, 2).unwrap();
        assert_eq!(minus_half.pow(-3), Ok(Rational::from(-8)));
        assert_eq!(Rational::new(-2, 3).unwrap().pow(-1), Ok(Rational::new(-3, 2).unwrap()));
        assert_eq!(Rational::zero().pow(-1), Err(Problem::DivideByZero));
        assert_eq!(Rational::zero().pow(0), Ok(Rational::one()));
        assert_eq!(Rational::from(7).pow(11), Ok(Rational::from(1_977_326_743)));
        let huge: Integer = "100000000000000000000".parse().unwrap();
        assert_eq!(Rational::one().pow(huge.clone()), Ok(Rational::one()));
        assert_eq!(two_thirds.pow(huge), Err(Problem::Exhausted));
    }

    #[test]
    fn binomials() {
        let half = Rational::new(1, 2).unwrap();
        assert_eq!(half.binomial(0), Ok(Rational::one()));
        assert_eq!(half.binomial(1), Ok(half.clone()));
        assert_eq!(half.binomial(3), Ok(Rational::new(1, 16).unwrap()));
        assert_eq!(half.binomial(-1), Ok(Rational::zero()));
        assert_eq!(Rational::from(-2).binomial(3), Ok(Rational::from(-4)));
        assert_eq!(
            Rational::generic_binomial(&half, &Integer::new(-1)),
            Err(Problem::NegativeBinomialIndex)
        );
        assert_eq!(
            Rational::generic_binomial(&Rational::from(10), &Integer::new(4)),
            Ok(Rational::from(210))
        );
    }

    #[test]
    fn take_leaves_zero() {
        let mut r = Rational::new(5, 3).unwrap();
        let moved = std::mem::take(&mut r);
        assert_eq!(moved, Rational::new(5, 3).unwrap());
        assert_eq!(r, Rational::zero());
        assert!(r.is_canonical());
    }
}
