//! Inclusive integer bounds shared by `len`, `min`, `max` and `between`.

use super::{ensure, Fault};
use crate::error::{ElementKind, ElementReason, Violation};
use crate::value::Value;

/// Inclusive `[min, max]` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Bounds {
    min: i64,
    max: i64,
}

impl Bounds {
    pub(super) fn exactly(n: i64) -> Self {
        Bounds { min: n, max: n }
    }

    pub(super) fn at_least(min: i64) -> Self {
        Bounds { min, max: i64::MAX }
    }

    pub(super) fn at_most(max: i64) -> Self {
        Bounds { min: i64::MIN, max }
    }

    pub(super) fn between(min: i64, max: i64) -> Self {
        Bounds { min, max }
    }

    #[inline]
    pub(super) fn contains(self, n: i64) -> bool {
        self.min <= n && n <= self.max
    }
}

/// The violations a bounds check reports for each value shape.
///
/// `None` marks a shape the constraint does not apply to.
#[derive(Debug)]
pub(super) struct Failures {
    text: Violation,
    integer: Option<Violation>,
    text_element: ElementReason,
    integer_element: Option<ElementReason>,
}

impl Failures {
    pub(super) const LENGTH: Failures = Failures {
        text: Violation::LengthMismatch,
        integer: None,
        text_element: ElementReason::WrongLength,
        integer_element: None,
    };

    pub(super) const MINIMUM: Failures = Failures {
        text: Violation::TextTooShort,
        integer: Some(Violation::IntegerTooSmall),
        text_element: ElementReason::TooShort,
        integer_element: Some(ElementReason::TooSmall),
    };

    pub(super) const MAXIMUM: Failures = Failures {
        text: Violation::TextTooLong,
        integer: Some(Violation::IntegerTooLarge),
        text_element: ElementReason::TooLong,
        integer_element: Some(ElementReason::TooLarge),
    };

    pub(super) const RANGE: Failures = Failures {
        text: Violation::TextLengthOutOfRange,
        integer: Some(Violation::IntegerOutOfRange),
        text_element: ElementReason::OutOfRange,
        integer_element: Some(ElementReason::OutOfRange),
    };
}

fn text_len(text: &str) -> Result<i64, Fault> {
    i64::try_from(text.len()).map_err(|_| {
        Fault::Internal(format!(
            "text length {} does not fit in a signed 64-bit integer",
            text.len()
        ))
    })
}

fn element_failure(element: ElementKind, index: usize, reason: ElementReason) -> Fault {
    Fault::Violation(Violation::Element {
        element,
        index,
        reason,
    })
}

pub(super) fn check_bounds(
    value: &Value<'_>,
    bounds: Bounds,
    failures: &Failures,
) -> Result<(), Fault> {
    match value {
        Value::Text(text) => ensure(bounds.contains(text_len(text)?), failures.text),
        Value::Integer(n) => match failures.integer {
            Some(violation) => ensure(bounds.contains(*n), violation),
            None => Err(Violation::InvalidRuleSyntax.into()),
        },
        Value::TextSequence(items) => {
            for (index, item) in items.iter().enumerate() {
                if !bounds.contains(text_len(item)?) {
                    return Err(element_failure(
                        ElementKind::String,
                        index,
                        failures.text_element,
                    ));
                }
            }
            Ok(())
        }
        Value::IntegerSequence(items) => {
            let Some(reason) = failures.integer_element else {
                return Err(Violation::InvalidRuleSyntax.into());
            };
            match items.iter().position(|&n| !bounds.contains(n)) {
                Some(index) => Err(element_failure(ElementKind::Integer, index, reason)),
                None => Ok(()),
            }
        }
        Value::Unsupported(_) => Err(Violation::InvalidRuleSyntax.into()),
    }
}
