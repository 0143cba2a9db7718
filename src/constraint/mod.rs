//! Constraint checkers
//!
//! One checker per [`ConstraintKind`], stored in a `const` table indexed by
//! the kind. Each checker interprets the raw parameter itself and then
//! dispatches over the closed [`Value`] shapes:
//!
//! | Constraint | Text | Integer | Text sequence | Integer sequence |
//! |---|---|---|---|---|
//! | `len:n` | length == n | syntax error | every length == n | syntax error |
//! | `in:a,b` | member | member (integer tokens) | every element member | every element member |
//! | `min:n` | length >= n | value >= n | every length >= n | every element >= n |
//! | `max:n` | length <= n | value <= n | every length <= n | every element <= n |
//! | `between:lo,hi` | lo <= length <= hi | lo <= value <= hi | all lengths in range | all elements in range |
//!
//! Text length is the UTF-8 byte length. Sequences stop at the first failing
//! element.

mod bounds;
mod membership;

use crate::error::Violation;
use crate::rule::{parse_integer, parse_pair, ConstraintKind, Rule};
use crate::value::Value;

use bounds::{check_bounds, Bounds, Failures};

/// Outcome of a failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Fault {
    /// The value or the rule does not satisfy the constraint.
    Violation(Violation),
    /// Something went wrong that is not the caller's fault.
    Internal(String),
}

impl From<Violation> for Fault {
    fn from(violation: Violation) -> Self {
        Fault::Violation(violation)
    }
}

pub(crate) type Checker = fn(&Value<'_>, &str) -> Result<(), Fault>;

const CHECKERS: [Checker; 5] = [
    check_length,
    membership::check_membership,
    check_minimum,
    check_maximum,
    check_range,
];

/// Look up the checker for a kind.
pub(crate) fn checker(kind: ConstraintKind) -> Checker {
    CHECKERS[kind.index()]
}

impl Rule<'_> {
    /// Check `value` against this rule.
    pub(crate) fn evaluate(&self, value: &Value<'_>) -> Result<(), Fault> {
        checker(self.kind)(value, self.parameter)
    }
}

#[inline]
pub(crate) fn ensure(ok: bool, violation: Violation) -> Result<(), Fault> {
    if ok {
        Ok(())
    } else {
        Err(Fault::Violation(violation))
    }
}

fn check_length(value: &Value<'_>, parameter: &str) -> Result<(), Fault> {
    let expected = parse_integer(parameter)?;
    check_bounds(value, Bounds::exactly(expected), &Failures::LENGTH)
}

fn check_minimum(value: &Value<'_>, parameter: &str) -> Result<(), Fault> {
    let min = parse_integer(parameter)?;
    check_bounds(value, Bounds::at_least(min), &Failures::MINIMUM)
}

fn check_maximum(value: &Value<'_>, parameter: &str) -> Result<(), Fault> {
    let max = parse_integer(parameter)?;
    check_bounds(value, Bounds::at_most(max), &Failures::MAXIMUM)
}

fn check_range(value: &Value<'_>, parameter: &str) -> Result<(), Fault> {
    let (lo, hi) = parse_pair(parameter)?;
    check_bounds(value, Bounds::between(lo, hi), &Failures::RANGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ElementKind, ElementReason};

    fn run(rule: &str, value: Value<'_>) -> Result<(), Fault> {
        Rule::parse(rule)
            .expect("rule should parse")
            .evaluate(&value)
    }

    fn violation(v: Violation) -> Result<(), Fault> {
        Err(Fault::Violation(v))
    }

    const SYNTAX: Result<(), Fault> = Err(Fault::Violation(Violation::InvalidRuleSyntax));

    #[test]
    fn test_table_is_keyed_by_kind() {
        let text = Value::Text("abc");
        assert!(checker(ConstraintKind::Length)(&text, "3").is_ok());
        assert!(checker(ConstraintKind::Membership)(&text, "abc").is_ok());
        assert!(checker(ConstraintKind::Minimum)(&text, "3").is_ok());
        assert!(checker(ConstraintKind::Maximum)(&text, "3").is_ok());
        assert!(checker(ConstraintKind::Range)(&text, "3,3").is_ok());
    }

    #[test]
    fn test_length() {
        assert_eq!(run("len:20", Value::Text("abcdefghjklmopqrstvu")), Ok(()));
        assert_eq!(run("len:0", Value::Text("")), Ok(()));
        assert_eq!(
            run("len:5", Value::Text("abcdef")),
            violation(Violation::LengthMismatch)
        );
        assert_eq!(
            run("len:-6", Value::Text("abcd")),
            violation(Violation::LengthMismatch)
        );
        assert_eq!(run("len:%12", Value::Text("abc")), SYNTAX);
        assert_eq!(run("len:3", Value::Integer(3)), SYNTAX);
        assert_eq!(run("len:3", Value::IntegerSequence(vec![1])), SYNTAX);
        assert_eq!(run("len:3", Value::Unsupported("bool")), SYNTAX);
    }

    #[test]
    fn test_length_counts_bytes() {
        assert_eq!(run("len:2", Value::Text("é")), Ok(()));
    }

    #[test]
    fn test_length_sequence_reports_first_failure() {
        assert_eq!(
            run("len:3", Value::TextSequence(vec!["baa", "kaa", "ab", "x"])),
            violation(Violation::Element {
                element: ElementKind::String,
                index: 2,
                reason: ElementReason::WrongLength,
            })
        );
        assert_eq!(run("len:3", Value::TextSequence(vec![])), Ok(()));
    }

    #[test]
    fn test_minimum() {
        assert_eq!(run("min:10", Value::Text("abcdefghjklmnop")), Ok(()));
        assert_eq!(run("min:-10", Value::Integer(-9)), Ok(()));
        assert_eq!(run("min:-1", Value::Text("")), Ok(()));
        assert_eq!(
            run("min:12", Value::Text("ef")),
            violation(Violation::TextTooShort)
        );
        assert_eq!(
            run("min:-12", Value::Integer(-22)),
            violation(Violation::IntegerTooSmall)
        );
        assert_eq!(run("min:", Value::Integer(11)), SYNTAX);
        assert_eq!(run("min:5-", Value::Integer(12)), SYNTAX);
        assert_eq!(run("min: 4", Value::TextSequence(vec!["ba"])), SYNTAX);
    }

    #[test]
    fn test_minimum_sequences() {
        assert_eq!(
            run("min:3", Value::IntegerSequence(vec![3, 6, 1000])),
            Ok(())
        );
        assert_eq!(
            run("min:3", Value::IntegerSequence(vec![3, 2])),
            violation(Violation::Element {
                element: ElementKind::Integer,
                index: 1,
                reason: ElementReason::TooSmall,
            })
        );
        assert_eq!(
            run("min:4", Value::TextSequence(vec!["abcd", "ab"])),
            violation(Violation::Element {
                element: ElementKind::String,
                index: 1,
                reason: ElementReason::TooShort,
            })
        );
    }

    #[test]
    fn test_maximum() {
        assert_eq!(run("max:20", Value::Integer(16)), Ok(()));
        assert_eq!(run("max:-2", Value::Integer(-3)), Ok(()));
        assert_eq!(
            run("max:2", Value::Text("efgh")),
            violation(Violation::TextTooLong)
        );
        assert_eq!(
            run("max:-7", Value::Text("ab")),
            violation(Violation::TextTooLong)
        );
        assert_eq!(
            run("max:-12", Value::Integer(22)),
            violation(Violation::IntegerTooLarge)
        );
        assert_eq!(run("max:", Value::Text("abc")), SYNTAX);
        assert_eq!(
            run("max:-5", Value::IntegerSequence(vec![-123, -666, -10000])),
            Ok(())
        );
        assert_eq!(
            run("max:3", Value::TextSequence(vec!["baa", "kaasdf"])),
            violation(Violation::Element {
                element: ElementKind::String,
                index: 1,
                reason: ElementReason::TooLong,
            })
        );
    }

    #[test]
    fn test_range() {
        assert_eq!(run("between:3,17", Value::Text("asdfasdf")), Ok(()));
        assert_eq!(
            run("between:15,35", Value::Text("aba")),
            violation(Violation::TextLengthOutOfRange)
        );
        assert_eq!(run("between:-5,5", Value::Integer(0)), Ok(()));
        assert_eq!(
            run("between:-5,5", Value::Integer(6)),
            violation(Violation::IntegerOutOfRange)
        );
        assert_eq!(
            run("between:1,2", Value::IntegerSequence(vec![1, 2, 3])),
            violation(Violation::Element {
                element: ElementKind::Integer,
                index: 2,
                reason: ElementReason::OutOfRange,
            })
        );
        assert_eq!(run("between:5", Value::Text("abcde")), SYNTAX);
        assert_eq!(run("between:x,5", Value::Text("abcde")), SYNTAX);
        assert_eq!(run("between:1,5,9", Value::Text("abcde")), SYNTAX);
    }

    #[test]
    fn test_inverted_range_never_matches() {
        assert_eq!(
            run("between:5,1", Value::Integer(3)),
            violation(Violation::IntegerOutOfRange)
        );
    }

    fn every_shape() -> [Value<'static>; 5] {
        [
            Value::Text("abc"),
            Value::Integer(7),
            Value::TextSequence(vec!["ab", "cd"]),
            Value::IntegerSequence(vec![1, 2]),
            Value::Unsupported("f64"),
        ]
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_minimum_matches_comparison(value in any::<i64>(), min in any::<i64>()) {
                let passed = run(&format!("min:{min}"), Value::Integer(value)).is_ok();
                prop_assert_eq!(passed, value >= min);
            }

            #[test]
            fn prop_maximum_matches_comparison(value in any::<i64>(), max in any::<i64>()) {
                let passed = run(&format!("max:{max}"), Value::Integer(value)).is_ok();
                prop_assert_eq!(passed, value <= max);
            }

            #[test]
            fn prop_range_matches_comparison(
                value in any::<i64>(),
                lo in any::<i64>(),
                hi in any::<i64>()
            ) {
                let passed = run(&format!("between:{lo},{hi}"), Value::Integer(value)).is_ok();
                prop_assert_eq!(passed, lo <= value && value <= hi);
            }

            #[test]
            fn prop_text_bounds_use_byte_length(text in ".{0,16}", n in -2_i64..40) {
                let len = text.len() as i64;
                let at_least = run(&format!("min:{n}"), Value::Text(&text)).is_ok();
                let at_most = run(&format!("max:{n}"), Value::Text(&text)).is_ok();
                let exactly = run(&format!("len:{n}"), Value::Text(&text)).is_ok();
                prop_assert_eq!(at_least, len >= n);
                prop_assert_eq!(at_most, len <= n);
                prop_assert_eq!(exactly, len == n);
            }

            #[test]
            fn prop_non_numeric_parameter_is_syntax_error(
                kind in prop::sample::select(vec!["len", "min", "max", "between"]),
                junk in "[a-z%]{1,4}"
            ) {
                let raw = if kind == "between" {
                    format!("between:1,{junk}")
                } else {
                    format!("{kind}:{junk}")
                };
                for value in every_shape() {
                    let outcome = run(&raw, value);
                    prop_assert_eq!(outcome, SYNTAX);
                }
            }
        }
    }
}
