use crate::{Integer, Rational};
use std::cmp::Ordering;

impl Rational {
    // Denominators are positive, so scaling the integer by ours keeps order.
    fn cmp_integer(&self, n: &Integer) -> Ordering {
        if self.den.is_one() {
            self.num.cmp(n)
        } else {
            self.num.cmp(&(&self.den * n))
        }
    }

    fn eq_integer(&self, n: &Integer) -> bool {
        self.den.is_one() && self.num == *n
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign().cmp(&other.sign()) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        if self.den == other.den {
            return self.num.cmp(&other.num);
        }
        // TODO: compare limb counts of the cross products before multiplying
        (&self.num * &other.den).cmp(&(&other.num * &self.den))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<Integer> for Rational {
    fn eq(&self, other: &Integer) -> bool {
        self.eq_integer(other)
    }
}

impl PartialEq<Rational> for Integer {
    fn eq(&self, other: &Rational) -> bool {
        other.eq_integer(self)
    }
}

impl PartialOrd<Integer> for Rational {
    fn partial_cmp(&self, other: &Integer) -> Option<Ordering> {
        Some(self.cmp_integer(other))
    }
}

impl PartialOrd<Rational> for Integer {
    fn partial_cmp(&self, other: &Rational) -> Option<Ordering> {
        Some(other.cmp_integer(self).reverse())
    }
}

macro_rules! native_compare {
    ($($t:ty)*) => {$(
        impl PartialEq<$t> for Rational {
            fn eq(&self, other: &$t) -> bool {
                self.eq_integer(&Integer::from(*other))
            }
        }

        impl PartialEq<Rational> for $t {
            fn eq(&self, other: &Rational) -> bool {
                other.eq_integer(&Integer::from(*self))
            }
        }

        impl PartialOrd<$t> for Rational {
            fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                Some(self.cmp_integer(&Integer::from(*other)))
            }
        }

        impl PartialOrd<Rational> for $t {
            fn partial_cmp(&self, other: &Rational) -> Option<Ordering> {
                Some(other.cmp_integer(&Integer::from(*self)).reverse())
            }
        }
    )*};
}

native_compare!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

// Floats compare after conversion, so NaN is unordered and unequal to
// every rational.
macro_rules! float_compare {
    ($($f:ty => $to:ident)*) => {$(
        impl PartialEq<$f> for Rational {
            fn eq(&self, other: &$f) -> bool {
                self.$to() == *other
            }
        }

        impl PartialEq<Rational> for $f {
            fn eq(&self, other: &Rational) -> bool {
                *self == other.$to()
            }
        }

        impl PartialOrd<$f> for Rational {
            fn partial_cmp(&self, other: &$f) -> Option<Ordering> {
                self.$to().partial_cmp(other)
            }
        }

        impl PartialOrd<Rational> for $f {
            fn partial_cmp(&self, other: &Rational) -> Option<Ordering> {
                self.partial_cmp(&other.$to())
            }
        }
    )*};
}

float_compare!(f32 => to_f32 f64 => to_f64);
