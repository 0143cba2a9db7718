//! # fieldguard
//!
//! Declarative, annotation-driven validation for Rust records.
//!
//! Fields are annotated with a compact rule, `"<kind>:<parameter>"`, and
//! [`validate`] checks every annotated field, collecting *all* failures
//! instead of stopping at the first one.
//!
//! | Rule | Meaning |
//! |---|---|
//! | `len:n` | text length is exactly `n` |
//! | `in:a,b,c` | value is one of the listed tokens |
//! | `min:n` | text length or integer is at least `n` |
//! | `max:n` | text length or integer is at most `n` |
//! | `between:lo,hi` | text length or integer lies in `lo..=hi` |
//!
//! Sequence fields (`Vec<String>`, `Vec<i64>`, ...) apply the rule to every
//! element and report the first element that fails.
//!
//! ## Quick Example
//!
//! ```rust
//! use fieldguard::{record, validate, Error};
//!
//! record! {
//!     #[derive(Debug)]
//!     pub struct User {
//!         #[validate = "len:36"]
//!         pub id: String,
//!         #[validate = "between:18,50"]
//!         pub age: i32,
//!         #[validate = "in:admin,staff"]
//!         pub role: String,
//!         #[validate = "min:1"]
//!         pub phones: Vec<String>,
//!     }
//! }
//!
//! let user = User {
//!     id: "not-a-uuid".into(),
//!     age: 12,
//!     role: "admin".into(),
//!     phones: vec!["+31".into()],
//! };
//!
//! match validate(&user) {
//!     Ok(()) => println!("valid"),
//!     Err(Error::Invalid(errors)) => {
//!         for error in &errors {
//!             println!("{}: {}", error.field(), error);
//!         }
//!         assert_eq!(errors.len(), 2);
//!     }
//!     Err(other) => panic!("unexpected: {other}"),
//! }
//! ```
//!
//! ## Cargo features
//!
//! - `tracing`: emit `tracing` events while validating.
//! - `serde`: `Serialize` for error reports and rule types.
//! - `proptest`: `Arbitrary` for [`ConstraintKind`] and rule strategies.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod constraint;
pub mod engine;
pub mod error;
pub mod record;
pub mod rule;
pub mod semigroup;
pub mod testing;
pub mod value;

// Re-exports
pub use engine::{validate, validate_all, Collector};
pub use error::{ConstraintError, ElementKind, ElementReason, Error, ValidationErrors, Violation};
pub use record::{Access, FieldSpec, Inspect, Record, Shape};
pub use rule::{ConstraintKind, Rule};
pub use semigroup::Semigroup;
pub use value::{AsValue, Value};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{validate, validate_all};
    pub use crate::error::{ConstraintError, Error, ValidationErrors, Violation};
    pub use crate::record::{Inspect, Record};
    pub use crate::record;
    pub use crate::value::AsValue;
}
