// We need to refer to these types in the documentation
#[allow(unused_imports)]
use crate::{Integer, Rational};

/// Problems when constructing, converting or doing arithmetic with
/// [`Rational`] and [`Integer`] values
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Problem {
    /// Tried to divide by Zero, also arises if attempting to make a fraction with a zero
    /// denominator or to raise zero to a negative power
    #[error("division by zero")]
    DivideByZero,
    /// Tried to convert a floating point NaN, which has no equivalent
    #[error("cannot convert a NaN to a rational")]
    NotANumber,
    /// Tried to convert a floating point Infinity which has no equivalent
    #[error("cannot convert an infinity to a rational")]
    Infinity,
    /// When parsing an integer there were non-digits in the text
    #[error("malformed integer")]
    BadInteger,
    /// When parsing a fraction either the numerator or denominator weren't decimal digits
    #[error("malformed fraction")]
    BadFraction,
    /// The low level denominator setter was given zero or a negative value
    #[error("cannot set non-positive denominator in rational")]
    NonPositiveDenominator,
    /// The lower index of a binomial coefficient was negative
    #[error("negative k value in binomial coefficient")]
    NegativeBinomialIndex,
    /// Raising to a rational power whose denominator is not 1
    #[error("unable to raise to a rational power whose denominator is not 1")]
    NonIntegralExponent,
    /// The value was not an integer
    #[error("the result is not an integer")]
    NotAnInteger,
    /// The integer was outside the range for the chosen type
    #[error("value out of range for the target type")]
    OutOfRange,
    /// Operation was rejected because it was likely to consume all available resources
    #[error("operation would exhaust available resources")]
    Exhausted,
    /// A checked narrowing conversion could not preserve the value
    #[error("cannot convert the value {value} to '{target}': {reason}")]
    SafeCast {
        value: String,
        target: &'static str,
        reason: &'static str,
    },
}

/// Broad classes of [`Problem`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProblemKind {
    ZeroDivision,
    InvalidArgument,
    Overflow,
    SafeCastFailure,
    ResourceExhausted,
}

impl Problem {
    /// Which broad class this problem belongs to
    ///
    /// # Example
    ///
    /// ```
    /// use mprat::{Problem, ProblemKind, Rational};
    /// let err = Rational::new(1, 0).unwrap_err();
    /// assert_eq!(err, Problem::DivideByZero);
    /// assert_eq!(err.kind(), ProblemKind::ZeroDivision);
    /// ```
    pub fn kind(&self) -> ProblemKind {
        use Problem::*;
        match self {
            DivideByZero => ProblemKind::ZeroDivision,
            NotANumber
            | Infinity
            | BadInteger
            | BadFraction
            | NonPositiveDenominator
            | NegativeBinomialIndex
            | NonIntegralExponent
            | NotAnInteger => ProblemKind::InvalidArgument,
            OutOfRange => ProblemKind::Overflow,
            SafeCast { .. } => ProblemKind::SafeCastFailure,
            Exhausted => ProblemKind::ResourceExhausted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Problem::Infinity.kind(), ProblemKind::InvalidArgument);
        assert_eq!(Problem::OutOfRange.kind(), ProblemKind::Overflow);
        assert_eq!(Problem::Exhausted.kind(), ProblemKind::ResourceExhausted);
    }

    #[test]
    fn safe_cast_message() {
        let p = Problem::SafeCast {
            value: "1/2".to_string(),
            target: "i32",
            reason: "the denominator is not 1",
        };
        assert_eq!(
            p.to_string(),
            "cannot convert the value 1/2 to 'i32': the denominator is not 1"
        );
        assert_eq!(p.kind(), ProblemKind::SafeCastFailure);
    }
}
