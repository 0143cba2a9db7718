//! Testing utilities
//!
//! Assertion macros for code that validates records, plus `proptest`
//! strategies (behind the `proptest` feature) for generating rules.
//!
//! # Examples
//!
//! ```rust
//! use fieldguard::{assert_invalid, assert_valid, assert_violations, record, Violation};
//!
//! record! {
//!     pub struct Pin {
//!         #[validate = "len:4"]
//!         pub digits: String,
//!     }
//! }
//!
//! assert_valid!(&Pin { digits: "1234".into() });
//! assert_invalid!(&Pin { digits: "12".into() });
//! assert_invalid!(&Pin { digits: "12".into() }, 1);
//! assert_violations!(&Pin { digits: "12".into() }, [Violation::LengthMismatch]);
//! ```

/// Assert that a record passes validation.
///
/// Panics with the failures if it does not.
#[macro_export]
macro_rules! assert_valid {
    ($record:expr) => {
        match $crate::validate($record) {
            ::core::result::Result::Ok(()) => {}
            ::core::result::Result::Err(e) => {
                panic!("Expected valid record, got error: {:?}", e);
            }
        }
    };
}

/// Assert that a record fails with field errors, optionally with an exact count.
///
/// [`Error::NotARecord`](crate::Error::NotARecord) and
/// [`Error::Internal`](crate::Error::Internal) do not satisfy this assertion.
#[macro_export]
macro_rules! assert_invalid {
    ($record:expr) => {
        match $crate::validate($record) {
            ::core::result::Result::Err($crate::Error::Invalid(_)) => {}
            other => {
                panic!("Expected field errors, got: {:?}", other);
            }
        }
    };
    ($record:expr, $count:expr) => {
        match $crate::validate($record) {
            ::core::result::Result::Err($crate::Error::Invalid(errors)) => {
                assert_eq!(
                    errors.len(),
                    $count,
                    "unexpected number of field errors: {:?}",
                    errors
                );
            }
            other => {
                panic!("Expected {} field errors, got: {:?}", $count, other);
            }
        }
    };
}

/// Assert that a record fails with exactly the given violations, in field order.
#[macro_export]
macro_rules! assert_violations {
    ($record:expr, $expected:expr) => {
        match $crate::validate($record) {
            ::core::result::Result::Err($crate::Error::Invalid(errors)) => {
                assert_eq!(errors.violations(), $expected);
            }
            other => {
                panic!(
                    "Expected violations {:?}, got: {:?}",
                    $expected, other
                );
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
use crate::ConstraintKind;

#[cfg(feature = "proptest")]
impl Arbitrary for ConstraintKind {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        proptest::sample::select(ConstraintKind::ALL.to_vec()).boxed()
    }
}

/// Well-formed annotation strings, `"<kind>:<parameter>"`.
///
/// Numeric kinds get parameters in `-limit..=limit`; `in` gets one to five
/// integer tokens.
#[cfg(feature = "proptest")]
pub fn rule_strategy(limit: i64) -> impl Strategy<Value = String> {
    let bound = -limit..=limit;
    prop_oneof![
        bound.clone().prop_map(|n| format!("len:{n}")),
        bound.clone().prop_map(|n| format!("min:{n}")),
        bound.clone().prop_map(|n| format!("max:{n}")),
        (bound.clone(), bound.clone()).prop_map(|(lo, hi)| format!("between:{lo},{hi}")),
        proptest::collection::vec(bound, 1..=5).prop_map(|tokens| {
            let tokens: Vec<String> = tokens.iter().map(i64::to_string).collect();
            format!("in:{}", tokens.join(","))
        }),
    ]
}
