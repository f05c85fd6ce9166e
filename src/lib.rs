mod problem;
pub use crate::problem::{Problem, ProblemKind};

mod integer;
pub use crate::integer::view::{IntegerView, RawInteger};
pub use crate::integer::{Integer, Limb, INLINE_LIMBS};

mod rational;
pub use crate::rational::raw::{RationalView, RawParts, RawRational};
pub use crate::rational::Rational;

mod operand;
pub use crate::operand::{apply, binomial, compare, pow, BinaryOp, Number, Operand};

mod safe_cast;
pub use crate::safe_cast::{safe_cast, SafeCast};

mod proptests;
