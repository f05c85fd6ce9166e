use crate::{Integer, Problem, Rational};
use core::ops::*;

fn divide_by_zero() -> ! {
    panic!("division of a rational by zero")
}

// In-place kernels. Each one leaves the receiver canonical, skipping the
// gcd whenever the shape of the operands already guarantees it.
impl Rational {
    fn add_rational(&mut self, other: &Rational) {
        let (u1, u2) = (self.den.is_one(), other.den.is_one());
        if u1 && u2 {
            self.num += &other.num;
        } else if u1 {
            // n + a/b = (n*b + a)/b, and gcd(n*b + a, b) = gcd(a, b) = 1
            self.num = &(&self.num * &other.den) + &other.num;
            self.den = other.den.clone();
        } else if u2 {
            self.num.add_mul(&self.den, &other.num);
        } else if self.den == other.den {
            self.num += &other.num;
            self.canonicalize();
        } else {
            self.num *= &other.den;
            self.num.add_mul(&self.den, &other.num);
            self.den *= &other.den;
            self.canonicalize();
        }
    }

    fn sub_rational(&mut self, other: &Rational) {
        let (u1, u2) = (self.den.is_one(), other.den.is_one());
        if u1 && u2 {
            self.num -= &other.num;
        } else if u1 {
            self.num = &(&self.num * &other.den) - &other.num;
            self.den = other.den.clone();
        } else if u2 {
            self.num.sub_mul(&self.den, &other.num);
        } else if self.den == other.den {
            self.num -= &other.num;
            self.canonicalize();
        } else {
            self.num *= &other.den;
            self.num.sub_mul(&self.den, &other.num);
            self.den *= &other.den;
            self.canonicalize();
        }
    }

    fn mul_rational(&mut self, other: &Rational) {
        if self.den.is_one() && other.den.is_one() {
            self.num *= &other.num;
        } else {
            self.num *= &other.num;
            self.den *= &other.den;
            self.canonicalize();
        }
    }

    // other must be non-zero
    fn div_rational(&mut self, other: &Rational) {
        self.num *= &other.den;
        self.den *= &other.num;
        self.canonicalize();
    }

    fn add_integer(&mut self, n: &Integer) {
        if self.den.is_one() {
            self.num += n;
        } else {
            self.num.add_mul(&self.den, n);
        }
    }

    fn sub_integer(&mut self, n: &Integer) {
        if self.den.is_one() {
            self.num -= n;
        } else {
            self.num.sub_mul(&self.den, n);
        }
    }

    fn mul_integer(&mut self, n: &Integer) {
        self.num *= n;
        if !self.den.is_one() {
            self.canonicalize();
        }
    }

    // n must be non-zero
    pub(crate) fn div_integer(&mut self, n: &Integer) {
        self.den *= n;
        self.canonicalize();
    }

    fn div_rational_or_panic(&mut self, other: &Rational) {
        if other.is_zero() {
            divide_by_zero();
        }
        self.div_rational(other);
    }

    fn div_integer_or_panic(&mut self, n: &Integer) {
        if n.is_zero() {
            divide_by_zero();
        }
        self.div_integer(n);
    }

    /// Division, or [`Problem::DivideByZero`]
    ///
    /// Dividing a value by itself gives exactly one without any arithmetic.
    ///
    /// # Example
    ///
    /// ```
    /// use mprat::{Problem, Rational};
    /// let a = Rational::new(3, 4).unwrap();
    /// assert_eq!(a.checked_div(&a), Ok(Rational::one()));
    /// assert_eq!(a.checked_div(&Rational::zero()), Err(Problem::DivideByZero));
    /// ```
    pub fn checked_div(&self, other: &Rational) -> Result<Rational, Problem> {
        if other.is_zero() {
            return Err(Problem::DivideByZero);
        }
        if std::ptr::eq(self, other) {
            return Ok(Self::one());
        }
        let mut answer = self.clone();
        answer.div_rational(other);
        Ok(answer)
    }

    /// Division by an [`Integer`], or [`Problem::DivideByZero`]
    pub fn checked_div_integer(&self, n: &Integer) -> Result<Rational, Problem> {
        if n.is_zero() {
            return Err(Problem::DivideByZero);
        }
        let mut answer = self.clone();
        answer.div_integer(n);
        Ok(answer)
    }

    /// In-place division which leaves `self` untouched on failure
    pub fn try_div_assign(&mut self, other: &Rational) -> Result<(), Problem> {
        if other.is_zero() {
            return Err(Problem::DivideByZero);
        }
        self.div_rational(other);
        Ok(())
    }

    /// In-place division by an [`Integer`] which leaves `self` untouched on failure
    pub fn try_div_assign_integer(&mut self, n: &Integer) -> Result<(), Problem> {
        if n.is_zero() {
            return Err(Problem::DivideByZero);
        }
        self.div_integer(n);
        Ok(())
    }
}

// Rational with Rational, and Rational with Integer on the right
macro_rules! exact_binop {
    ($Rhs:ty, $Trait:ident, $method:ident, $Assign:ident, $assign:ident, $kernel:ident) => {
        impl $Assign<&$Rhs> for Rational {
            fn $assign(&mut self, other: &$Rhs) {
                self.$kernel(other);
            }
        }

        impl $Assign<$Rhs> for Rational {
            fn $assign(&mut self, other: $Rhs) {
                self.$kernel(&other);
            }
        }

        impl $Trait<&$Rhs> for Rational {
            type Output = Rational;

            fn $method(mut self, other: &$Rhs) -> Rational {
                self.$kernel(other);
                self
            }
        }

        impl $Trait<$Rhs> for Rational {
            type Output = Rational;

            fn $method(mut self, other: $Rhs) -> Rational {
                self.$kernel(&other);
                self
            }
        }

        impl $Trait<&$Rhs> for &Rational {
            type Output = Rational;

            fn $method(self, other: &$Rhs) -> Rational {
                let mut answer = self.clone();
                answer.$kernel(other);
                answer
            }
        }

        impl $Trait<$Rhs> for &Rational {
            type Output = Rational;

            fn $method(self, other: $Rhs) -> Rational {
                let mut answer = self.clone();
                answer.$kernel(&other);
                answer
            }
        }
    };
}

exact_binop!(Rational, Add, add, AddAssign, add_assign, add_rational);
exact_binop!(Rational, Sub, sub, SubAssign, sub_assign, sub_rational);
exact_binop!(Rational, Mul, mul, MulAssign, mul_assign, mul_rational);
exact_binop!(Rational, Div, div, DivAssign, div_assign, div_rational_or_panic);
exact_binop!(Integer, Add, add, AddAssign, add_assign, add_integer);
exact_binop!(Integer, Sub, sub, SubAssign, sub_assign, sub_integer);
exact_binop!(Integer, Mul, mul, MulAssign, mul_assign, mul_integer);
exact_binop!(Integer, Div, div, DivAssign, div_assign, div_integer_or_panic);

// Integer on the left. Results are rationals, so `n - q` is `-(q - n)`
// and `n / q` promotes `n` before dividing.
impl Integer {
    fn add_rational(&self, q: &Rational) -> Rational {
        q + self
    }

    fn sub_rational(&self, q: &Rational) -> Rational {
        -(q - self)
    }

    fn mul_rational(&self, q: &Rational) -> Rational {
        q * self
    }

    fn div_rational(&self, q: &Rational) -> Rational {
        let mut answer = Rational::from_integer(self.clone());
        answer.div_rational_or_panic(q);
        answer
    }
}

macro_rules! integer_lhs_binop {
    ($Trait:ident, $method:ident, $kernel:ident) => {
        impl $Trait<&Rational> for &Integer {
            type Output = Rational;

            fn $method(self, q: &Rational) -> Rational {
                self.$kernel(q)
            }
        }

        impl $Trait<Rational> for &Integer {
            type Output = Rational;

            fn $method(self, q: Rational) -> Rational {
                self.$kernel(&q)
            }
        }

        impl $Trait<&Rational> for Integer {
            type Output = Rational;

            fn $method(self, q: &Rational) -> Rational {
                self.$kernel(q)
            }
        }

        impl $Trait<Rational> for Integer {
            type Output = Rational;

            fn $method(self, q: Rational) -> Rational {
                self.$kernel(&q)
            }
        }
    };
}

integer_lhs_binop!(Add, add, add_rational);
integer_lhs_binop!(Sub, sub, sub_rational);
integer_lhs_binop!(Mul, mul, mul_rational);
integer_lhs_binop!(Div, div, div_rational);

// Native integers go through Integer on either side
macro_rules! native_binop {
    ($Trait:ident, $method:ident, $Assign:ident, $assign:ident; $($t:ty)*) => {$(
        impl $Assign<$t> for Rational {
            fn $assign(&mut self, n: $t) {
                $Assign::$assign(self, &Integer::from(n));
            }
        }

        impl $Trait<$t> for Rational {
            type Output = Rational;

            fn $method(self, n: $t) -> Rational {
                $Trait::$method(self, &Integer::from(n))
            }
        }

        impl $Trait<$t> for &Rational {
            type Output = Rational;

            fn $method(self, n: $t) -> Rational {
                $Trait::$method(self, &Integer::from(n))
            }
        }

        impl $Trait<Rational> for $t {
            type Output = Rational;

            fn $method(self, q: Rational) -> Rational {
                $Trait::$method(&Integer::from(self), &q)
            }
        }

        impl $Trait<&Rational> for $t {
            type Output = Rational;

            fn $method(self, q: &Rational) -> Rational {
                $Trait::$method(&Integer::from(self), q)
            }
        }
    )*};
}

macro_rules! native_binops {
    ($($t:ty)*) => {
        native_binop!(Add, add, AddAssign, add_assign; $($t)*);
        native_binop!(Sub, sub, SubAssign, sub_assign; $($t)*);
        native_binop!(Mul, mul, MulAssign, mul_assign; $($t)*);
        native_binop!(Div, div, DivAssign, div_assign; $($t)*);
    };
}

native_binops!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

// Any float operand abandons exactness: the rational is converted and the
// float type does the arithmetic.
macro_rules! float_binop {
    ($Trait:ident, $method:ident, $Assign:ident, $assign:ident, $op:tt; $($f:ty => $to:ident)*) => {$(
        impl $Trait<$f> for &Rational {
            type Output = $f;

            fn $method(self, x: $f) -> $f {
                self.$to() $op x
            }
        }

        impl $Trait<$f> for Rational {
            type Output = $f;

            fn $method(self, x: $f) -> $f {
                self.$to() $op x
            }
        }

        impl $Trait<&Rational> for $f {
            type Output = $f;

            fn $method(self, q: &Rational) -> $f {
                self $op q.$to()
            }
        }

        impl $Trait<Rational> for $f {
            type Output = $f;

            fn $method(self, q: Rational) -> $f {
                self $op q.$to()
            }
        }

        impl $Assign<&Rational> for $f {
            fn $assign(&mut self, q: &Rational) {
                *self = *self $op q.$to();
            }
        }

        impl $Assign<Rational> for $f {
            fn $assign(&mut self, q: Rational) {
                *self = *self $op q.$to();
            }
        }
    )*};
}

float_binop!(Add, add, AddAssign, add_assign, +; f32 => to_f32 f64 => to_f64);
float_binop!(Sub, sub, SubAssign, sub_assign, -; f32 => to_f32 f64 => to_f64);
float_binop!(Mul, mul, MulAssign, mul_assign, *; f32 => to_f32 f64 => to_f64);
float_binop!(Div, div, DivAssign, div_assign, /; f32 => to_f32 f64 => to_f64);

impl Neg for Rational {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.negate();
        self
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        -self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn half_plus_third() {
        assert_eq!(q(1, 2) + q(1, 3), q(5, 6));
        assert_eq!(&q(1, 2) - &q(1, 3), q(1, 6));
    }

    #[test]
    fn addition_shapes() {
        // both integral
        assert_eq!(q(3, 1) + q(4, 1), q(7, 1));
        // left integral
        assert_eq!(q(3, 1) + q(1, 4), q(13, 4));
        // right integral
        assert_eq!(q(1, 4) + q(3, 1), q(13, 4));
        // same denominator, reduces
        assert_eq!(q(1, 4) + q(1, 4), q(1, 2));
        assert_eq!(q(1, 4) - q(1, 4), Rational::zero());
        // general
        assert_eq!(q(1, 6) + q(1, 10), q(4, 15));
        assert_eq!(q(1, 6) - q(1, 10), q(1, 15));
        assert_eq!(q(3, 1) - q(1, 4), q(11, 4));
        assert_eq!(q(1, 4) - q(3, 1), q(-11, 4));
    }

    #[test]
    fn self_operands() {
        let mut a = q(3, 4);
        a += a.clone();
        assert_eq!(a, q(3, 2));
        a *= a.clone();
        assert_eq!(a, q(9, 4));
        a -= a.clone();
        assert_eq!(a, Rational::zero());
        let b = q(-5, 7);
        assert_eq!(&b / &b, Rational::one());
        assert_eq!(b.checked_div(&b), Ok(Rational::one()));
    }

    #[test]
    fn multiply_and_divide() {
        assert_eq!(q(2, 3) * q(9, 4), q(3, 2));
        assert_eq!(q(2, 3) / q(4, 9), q(3, 2));
        assert_eq!(q(2, 3) / q(-4, 9), q(-3, 2));
        assert_eq!(q(2, 3) * Rational::zero(), Rational::zero());
        assert!((q(2, 3) * Rational::zero()).is_canonical());
    }

    #[test]
    fn with_integers() {
        let seven = Integer::new(7);
        assert_eq!(q(1, 2) + &seven, q(15, 2));
        assert_eq!(q(1, 2) - &seven, q(-13, 2));
        assert_eq!(&seven - q(1, 2), q(13, 2));
        assert_eq!(q(1, 14) * &seven, q(1, 2));
        assert_eq!(q(7, 2) / &seven, q(1, 2));
        assert_eq!(&seven / q(7, 2), Rational::from(2));
        assert_eq!(q(1, 2) * Integer::ZERO, Rational::zero());
        assert_eq!(q(1, 2) / Integer::new(-2), q(-1, 4));
    }

    #[test]
    fn with_natives() {
        assert_eq!(q(1, 3) + 1, q(4, 3));
        assert_eq!(1u8 - q(1, 3), q(2, 3));
        assert_eq!(q(2, 3) * 3i64, Rational::from(2));
        assert_eq!(q(2, 3) / 4usize, q(1, 6));
        assert_eq!(2i128 / q(2, 3), Rational::from(3));
        let mut r = q(5, 2);
        r -= 3;
        assert_eq!(r, q(-1, 2));
        r *= -4i16;
        assert_eq!(r, Rational::from(2));
    }

    #[test]
    fn with_floats() {
        assert_eq!(q(1, 2) + 0.25_f64, 0.75);
        assert_eq!(0.25_f32 - q(1, 2), -0.25);
        assert_eq!(q(1, 4) * 2.0_f64, 0.5);
        assert_eq!(1.0_f64 / q(1, 4), 4.0);
        let mut x = 1.5_f64;
        x += q(1, 2);
        assert_eq!(x, 2.0);
        assert!((q(1, 3) / 0.0_f64).is_infinite());
    }

    #[test]
    fn division_failures_leave_receiver() {
        let mut a = q(3, 5);
        assert_eq!(a.try_div_assign(&Rational::zero()), Err(Problem::DivideByZero));
        assert_eq!(a, q(3, 5));
        assert_eq!(
            a.try_div_assign_integer(&Integer::ZERO),
            Err(Problem::DivideByZero)
        );
        assert_eq!(a, q(3, 5));
        assert_eq!(a.checked_div_integer(&Integer::ZERO), Err(Problem::DivideByZero));
        a.try_div_assign(&q(3, 5)).unwrap();
        assert_eq!(a, Rational::one());
    }

    #[test]
    #[should_panic(expected = "division of a rational by zero")]
    fn divide_operator_panics() {
        let _ = q(1, 2) / Rational::zero();
    }

    #[test]
    fn large_values() {
        let big: Rational = "340282366920938463463374607431768211457/3".parse().unwrap();
        let sum = &big + &big;
        assert_eq!(sum.to_string(), "680564733841876926926749214863536422914/3");
        assert_eq!(&sum / &big, Rational::from(2));
        assert!(sum.is_canonical());
    }
}
