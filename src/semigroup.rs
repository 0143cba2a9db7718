//! Semigroup trait for merging failure reports
//!
//! A Semigroup is a type with an associative binary operation. Failure
//! reports use it to merge the errors of several validation calls into one,
//! preserving the order in which they were produced.
//!
//! # Laws
//!
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use fieldguard::{ConstraintError, Semigroup, ValidationErrors, Violation};
//!
//! let first = ValidationErrors::from(vec![ConstraintError::new("a", Violation::NotAllowed)]);
//! let second = ValidationErrors::from(vec![ConstraintError::new("b", Violation::TextTooLong)]);
//!
//! assert_eq!(first.combine(second).len(), 2);
//! ```

/// A type that supports an associative binary operation
///
/// `combine` takes `self` by value; clone first if the originals are needed.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl<T: Semigroup> Semigroup for Option<T> {
    #[inline]
    fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Some(a), Some(b)) => Some(a.combine(b)),
            (a, None) => a,
            (None, b) => b,
        }
    }
}
