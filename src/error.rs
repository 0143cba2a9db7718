//! Error types
//!
//! [`validate`](crate::validate) returns one of three outcomes on failure:
//!
//! - [`Error::NotARecord`] when the input is not a record at all,
//! - [`Error::Invalid`] carrying every per-field [`ConstraintError`],
//! - [`Error::Internal`] when a checker hit a fault that is not a
//!   constraint violation; validation stops at that field.
//!
//! Messages are stable and may be compared directly, but matching on
//! [`Violation`] variants is the intended way to classify failures.

use std::fmt;

use crate::semigroup::Semigroup;

/// Which element type a positional failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElementKind {
    /// Element of a text sequence.
    String,
    /// Element of an integer sequence.
    Integer,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::String => f.write_str("string"),
            ElementKind::Integer => f.write_str("integer"),
        }
    }
}

/// Why a sequence element failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElementReason {
    /// Length differs from `len:<n>`.
    WrongLength,
    /// Not a member of the `in:` set.
    NotAllowed,
    /// Text shorter than `min:<n>`.
    TooShort,
    /// Text longer than `max:<n>`.
    TooLong,
    /// Integer below `min:<n>`.
    TooSmall,
    /// Integer above `max:<n>`.
    TooLarge,
    /// Outside `between:<lo>,<hi>`.
    OutOfRange,
}

impl fmt::Display for ElementReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ElementReason::WrongLength => "has the wrong length",
            ElementReason::NotAllowed => "is not allowed",
            ElementReason::TooShort => "is shorter than allowed",
            ElementReason::TooLong => "is longer than allowed",
            ElementReason::TooSmall => "is less than allowed",
            ElementReason::TooLarge => "is more than allowed",
            ElementReason::OutOfRange => "is out of the allowed range",
        };
        f.write_str(text)
    }
}

/// The cause of a single field failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "violation", rename_all = "snake_case"))]
pub enum Violation {
    /// An annotated field is private.
    #[error("validation for unexported field is not allowed")]
    InaccessibleField,
    /// Malformed annotation, unparseable parameter, or a rule applied to a
    /// value shape it does not support.
    #[error("invalid validator syntax")]
    InvalidRuleSyntax,
    /// The annotation's kind token is not a known constraint.
    #[error("Unexpected validator option")]
    UnrecognizedKind,
    /// Text length differs from `len:<n>`.
    #[error("lengths don't match")]
    LengthMismatch,
    /// Value is not in the `in:` set.
    #[error("Field value isn't allowed")]
    NotAllowed,
    /// Text shorter than `min:<n>`.
    #[error("String length is less than allowed")]
    TextTooShort,
    /// Text longer than `max:<n>`.
    #[error("String length is more than allowed")]
    TextTooLong,
    /// Text length outside `between:<lo>,<hi>`.
    #[error("String length is not allowed")]
    TextLengthOutOfRange,
    /// Integer below `min:<n>`.
    #[error("Integer is less than allowed")]
    IntegerTooSmall,
    /// Integer above `max:<n>`.
    #[error("Integer is more than allowed")]
    IntegerTooLarge,
    /// Integer outside `between:<lo>,<hi>`.
    #[error("Integer is out of the allowed range")]
    IntegerOutOfRange,
    /// The first failing element of a sequence field.
    #[error("The {element} on position {index} {reason}")]
    Element {
        /// Element type.
        element: ElementKind,
        /// Zero-based position of the element.
        index: usize,
        /// What was wrong with it.
        reason: ElementReason,
    },
}

impl Violation {
    /// Returns `true` if the annotation itself, rather than the value, is at fault.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Violation::InvalidRuleSyntax | Violation::UnrecognizedKind
        )
    }

    /// Returns `true` for value failures on sequence elements.
    pub fn is_positional(&self) -> bool {
        matches!(self, Violation::Element { .. })
    }
}

/// A failure attributed to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConstraintError {
    field: &'static str,
    violation: Violation,
}

impl ConstraintError {
    /// Attribute a violation to a field.
    pub fn new(field: &'static str, violation: Violation) -> Self {
        ConstraintError { field, violation }
    }

    /// Name of the failing field.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// What went wrong.
    pub fn violation(&self) -> &Violation {
        &self.violation
    }
}

// Only the violation is rendered; the field name is available through `field()`.
impl fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.violation, f)
    }
}

impl std::error::Error for ConstraintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.violation)
    }
}

/// Every field failure of a validation call, in field order.
///
/// Never empty when returned from [`validate`](crate::validate).
///
/// ```
/// use fieldguard::{ConstraintError, ValidationErrors, Violation};
///
/// let errors = ValidationErrors::from(vec![
///     ConstraintError::new("a", Violation::LengthMismatch),
///     ConstraintError::new("b", Violation::NotAllowed),
/// ]);
/// assert_eq!(errors.to_string(), "lengths don't matchField value isn't allowed");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ValidationErrors(Vec<ConstraintError>);

impl ValidationErrors {
    /// An empty collection.
    pub fn new() -> Self {
        ValidationErrors(Vec::new())
    }

    /// Append a failure.
    pub fn push(&mut self, error: ConstraintError) {
        self.0.push(error);
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing has failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over failures in field order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConstraintError> {
        self.0.iter()
    }

    /// The failures as a slice.
    pub fn as_slice(&self) -> &[ConstraintError] {
        &self.0
    }

    /// Just the violations, in field order.
    pub fn violations(&self) -> Vec<Violation> {
        self.0.iter().map(|e| e.violation).collect()
    }

    /// Failures recorded for `field`.
    pub fn for_field<'s>(&'s self, field: &'s str) -> impl Iterator<Item = &'s ConstraintError> + 's {
        self.0.iter().filter(move |e| e.field == field)
    }

    /// Consume into the underlying vector.
    pub fn into_vec(self) -> Vec<ConstraintError> {
        self.0
    }
}

impl From<Vec<ConstraintError>> for ValidationErrors {
    fn from(errors: Vec<ConstraintError>) -> Self {
        ValidationErrors(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ConstraintError;
    type IntoIter = std::vec::IntoIter<ConstraintError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ConstraintError;
    type IntoIter = std::slice::Iter<'a, ConstraintError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Semigroup for ValidationErrors {
    #[inline]
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.0 {
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Failure of a whole validation call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "error", content = "details", rename_all = "snake_case"))]
pub enum Error {
    /// The input is not a record.
    #[error("wrong argument given, should be a struct")]
    NotARecord,
    /// One or more fields failed their constraint.
    #[error(transparent)]
    Invalid(ValidationErrors),
    /// A checker fault that is not a constraint violation.
    #[error("internal fault validating field `{field}`: {reason}")]
    Internal {
        /// Field being validated when the fault occurred.
        field: &'static str,
        /// Description of the fault.
        reason: String,
    },
}

impl Error {
    /// Returns `true` for [`Error::NotARecord`].
    pub fn is_not_a_record(&self) -> bool {
        matches!(self, Error::NotARecord)
    }

    /// The aggregate of field failures, if this is [`Error::Invalid`].
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Error::Invalid(errors) => Some(errors),
            _ => None,
        }
    }

    /// Consume into the aggregate of field failures, if any.
    pub fn into_validation_errors(self) -> Option<ValidationErrors> {
        match self {
            Error::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Invalid(errors)
    }
}
