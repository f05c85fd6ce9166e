use crate::{Integer, IntegerView, Problem, RawInteger, Rational};

/// Unchecked mutable access to the parts of a [`Rational`]
///
/// Writes through this accessor may leave the value non-canonical. The
/// caller must restore canonical form, either by finishing with
/// [`canonicalize`](RawParts::canonicalize) or by writing parts which are
/// already coprime with a positive denominator, before the value is used
/// for anything else. [`Rational::is_canonical`] checks the result.
#[derive(Debug)]
pub struct RawParts<'a> {
    inner: &'a mut Rational,
}

impl RawParts<'_> {
    pub fn numerator_mut(&mut self) -> &mut Integer {
        &mut self.inner.num
    }

    /// Writing zero or a negative value here leaves an invalid rational.
    pub fn denominator_mut(&mut self) -> &mut Integer {
        &mut self.inner.den
    }

    /// Replace the denominator, refusing anything not strictly positive
    pub fn set_denominator(&mut self, den: Integer) -> Result<(), Problem> {
        if !den.is_positive() {
            return Err(Problem::NonPositiveDenominator);
        }
        self.inner.den = den;
        Ok(())
    }

    /// Restore canonical form and release the borrow
    pub fn canonicalize(self) {
        self.inner.canonicalize();
    }
}

/// Read-only view of both parts of a [`Rational`]
#[derive(Debug)]
pub struct RationalView<'a> {
    num: IntegerView<'a>,
    den: IntegerView<'a>,
}

/// C layout pair of [`RawInteger`] descriptions, numerator first
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct RawRational {
    pub num: RawInteger,
    pub den: RawInteger,
}

impl Rational {
    /// Mutable access to numerator and denominator without canonicalization
    ///
    /// # Example
    ///
    /// ```
    /// use mprat::{Integer, Rational};
    /// let mut r = Rational::zero();
    /// let mut parts = r.raw_parts_mut();
    /// *parts.numerator_mut() = Integer::new(6);
    /// parts.set_denominator(Integer::new(4)).unwrap();
    /// parts.canonicalize();
    /// assert_eq!(r, Rational::new(3, 2).unwrap());
    /// ```
    pub fn raw_parts_mut(&mut self) -> RawParts<'_> {
        RawParts { inner: self }
    }

    /// Assemble a Rational from parts exactly as given
    ///
    /// Only a zero denominator is rejected. Everything else is stored without
    /// canonicalization, so this is for parts already known to be canonical.
    pub fn from_raw_parts(num: Integer, den: Integer) -> Result<Self, Problem> {
        if den.is_zero() {
            return Err(Problem::DivideByZero);
        }
        Ok(Self { num, den })
    }

    pub fn view(&self) -> RationalView<'_> {
        RationalView {
            num: self.num.view(),
            den: self.den.view(),
        }
    }

    /// Read a Rational back from a C layout description, canonicalizing it
    ///
    /// # Safety
    ///
    /// Both parts of `raw` must satisfy the requirements of
    /// [`Integer::from_raw`].
    pub unsafe fn from_raw(raw: &RawRational) -> Result<Self, Problem> {
        let num = unsafe { Integer::from_raw(&raw.num) };
        let den = unsafe { Integer::from_raw(&raw.den) };
        tracing::debug!(
            num_limbs = raw.num.size,
            den_limbs = raw.den.size,
            "adopting rational from raw parts"
        );
        Self::new(num, den)
    }
}

impl RationalView<'_> {
    pub fn numerator(&self) -> &IntegerView<'_> {
        &self.num
    }

    pub fn denominator(&self) -> &IntegerView<'_> {
        &self.den
    }

    pub fn as_raw(&self) -> RawRational {
        RawRational {
            num: self.num.as_raw(),
            den: self.den.as_raw(),
        }
    }
}
