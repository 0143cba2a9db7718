//! The `in:` checker.

use std::collections::HashSet;

use super::{ensure, Fault};
use crate::error::{ElementKind, ElementReason, Violation};
use crate::rule::parse_integer;
use crate::value::Value;

const TOKEN_SEPARATOR: char = ',';

// Every token must parse, even when an earlier one would already match.
fn integer_set(tokens: &HashSet<&str>) -> Result<HashSet<i64>, Fault> {
    tokens
        .iter()
        .map(|token| parse_integer(token).map_err(Fault::from))
        .collect()
}

fn not_allowed_at(element: ElementKind, index: Option<usize>) -> Result<(), Fault> {
    match index {
        Some(index) => Err(Fault::Violation(Violation::Element {
            element,
            index,
            reason: ElementReason::NotAllowed,
        })),
        None => Ok(()),
    }
}

pub(super) fn check_membership(value: &Value<'_>, parameter: &str) -> Result<(), Fault> {
    // An empty set admits nothing, whatever the value shape.
    if parameter.is_empty() {
        return Err(Violation::NotAllowed.into());
    }

    let tokens: HashSet<&str> = parameter.split(TOKEN_SEPARATOR).collect();

    match value {
        Value::Text(text) => ensure(tokens.contains(text), Violation::NotAllowed),
        Value::Integer(n) => {
            let allowed = integer_set(&tokens)?;
            ensure(allowed.contains(n), Violation::NotAllowed)
        }
        Value::TextSequence(items) => not_allowed_at(
            ElementKind::String,
            items.iter().position(|item| !tokens.contains(item)),
        ),
        Value::IntegerSequence(items) => {
            let allowed = integer_set(&tokens)?;
            not_allowed_at(
                ElementKind::Integer,
                items.iter().position(|n| !allowed.contains(n)),
            )
        }
        Value::Unsupported(_) => Err(Violation::InvalidRuleSyntax.into()),
    }
}
