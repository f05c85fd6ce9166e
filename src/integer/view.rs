use super::{Integer, Limb, Repr};
use num::bigint::Sign::{self, *};
use std::borrow::Cow;

/// Read-only limb view of an [`Integer`]
///
/// The view borrows its source, so the source cannot be modified while the
/// view (or any [`RawInteger`] taken from it) is in use. Views are
/// deliberately neither [`Clone`] nor [`Copy`].
#[derive(Debug)]
pub struct IntegerView<'a> {
    sign: Sign,
    limbs: Cow<'a, [Limb]>,
}

/// C layout description of an integer: a signed limb count (negative for
/// negative values) and a pointer to the magnitude limbs, least significant
/// first
///
/// A `RawInteger` taken from an [`IntegerView`] is valid only while that
/// view is alive.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct RawInteger {
    pub size: isize,
    pub d: *const Limb,
}

impl Integer {
    /// A read-only view of the magnitude limbs
    ///
    /// # Example
    ///
    /// ```
    /// use mprat::Integer;
    /// let n = Integer::from(u64::MAX) + Integer::from(2u8);
    /// let view = n.view();
    /// assert_eq!(view.limbs(), &[1, 1]);
    /// ```
    pub fn view(&self) -> IntegerView<'_> {
        match &self.repr {
            Repr::Inline { sign, limbs } => {
                let len = limbs.iter().rposition(|&l| l != 0).map_or(0, |i| i + 1);
                IntegerView {
                    sign: *sign,
                    limbs: Cow::Borrowed(&limbs[..len]),
                }
            }
            Repr::Heap(n) => IntegerView {
                sign: n.sign(),
                limbs: Cow::Owned(n.iter_u64_digits().collect()),
            },
        }
    }

    /// Read an Integer back from a C layout description
    ///
    /// # Safety
    ///
    /// `raw.d` must point to at least `raw.size.unsigned_abs()` initialised
    /// limbs which stay valid for the duration of the call. It may dangle
    /// only when `raw.size` is zero.
    pub unsafe fn from_raw(raw: &RawInteger) -> Integer {
        let len = raw.size.unsigned_abs();
        if len == 0 {
            return Integer::ZERO;
        }
        let limbs = unsafe { std::slice::from_raw_parts(raw.d, len) };
        let sign = if raw.size < 0 { Minus } else { Plus };
        Integer::from_limbs(sign, limbs)
    }
}

impl IntegerView<'_> {
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Magnitude limbs, least significant first, without trailing zeros
    pub fn limbs(&self) -> &[Limb] {
        &self.limbs
    }

    /// The C layout description of the viewed value
    pub fn as_raw(&self) -> RawInteger {
        let len = self.limbs.len() as isize;
        RawInteger {
            size: if self.sign == Minus { -len } else { len },
            d: self.limbs.as_ptr(),
        }
    }
}
