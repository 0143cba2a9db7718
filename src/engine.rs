//! The validation pass
//!
//! [`validate`] walks a record's fields in declaration order, parses each
//! annotation, runs the matching checker and hands the outcome to a
//! [`Collector`]. The collector is the only place that decides between
//! recording a failure and aborting the call.
//!
//! # Examples
//!
//! ```
//! use fieldguard::{record, validate, Error, Violation};
//!
//! record! {
//!     pub struct Account {
//!         #[validate = "min:3"]
//!         pub login: String,
//!         #[validate = "in:admin,editor,viewer"]
//!         pub role: String,
//!         #[validate = "between:0,10"]
//!         pub level: i32,
//!     }
//! }
//!
//! let account = Account {
//!     login: "al".into(),
//!     role: "root".into(),
//!     level: 4,
//! };
//!
//! let Err(Error::Invalid(errors)) = validate(&account) else {
//!     panic!("expected field failures");
//! };
//! assert_eq!(
//!     errors.violations(),
//!     [Violation::TextTooShort, Violation::NotAllowed]
//! );
//! ```

use crate::constraint::Fault;
use crate::error::{ConstraintError, Error, ValidationErrors, Violation};
use crate::record::{FieldSpec, Inspect, Record, Shape};
use crate::rule::Rule;
use crate::semigroup::Semigroup;

/// Accumulates field failures for one validation call.
///
/// Constraint violations are recorded and the pass continues; an internal
/// fault is turned into an [`Error::Internal`] that the caller returns
/// immediately.
#[derive(Debug, Default)]
pub struct Collector {
    errors: ValidationErrors,
}

impl Collector {
    /// An empty collector.
    pub fn new() -> Self {
        Collector::default()
    }

    /// Record a violation for `field`.
    pub fn reject(&mut self, field: &'static str, violation: Violation) {
        self.errors.push(ConstraintError::new(field, violation));
    }

    /// Record the outcome of a checker.
    ///
    /// Returns `Err` only when the outcome must abort the whole call.
    pub(crate) fn absorb(
        &mut self,
        field: &'static str,
        outcome: Result<(), Fault>,
    ) -> Result<(), Error> {
        match outcome {
            Ok(()) => Ok(()),
            Err(Fault::Violation(violation)) => {
                self.reject(field, violation);
                Ok(())
            }
            Err(Fault::Internal(reason)) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(field, %reason, "aborting validation on internal fault");
                Err(Error::Internal { field, reason })
            }
        }
    }

    /// Number of failures recorded so far.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if nothing has failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` if nothing failed, otherwise the aggregate.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn check_field(record: &dyn Record, spec: &FieldSpec, raw: &str) -> Result<(), Fault> {
    let rule = Rule::parse(raw)?;
    let value = record.value(spec.name);

    #[cfg(feature = "tracing")]
    tracing::trace!(
        field = spec.name,
        ty = spec.type_name,
        kind = %rule.kind,
        parameter = rule.parameter,
        shape = value.shape_name(),
        "evaluating field"
    );

    rule.evaluate(&value)
}

fn collect(record: &dyn Record, collector: &mut Collector) -> Result<(), Error> {
    for spec in record.fields() {
        let Some(raw) = spec.rule else {
            continue;
        };

        if !spec.access.is_public() {
            collector.reject(spec.name, Violation::InaccessibleField);
            continue;
        }

        collector.absorb(spec.name, check_field(record, spec, raw))?;
    }
    Ok(())
}

fn validate_record(record: &dyn Record) -> Result<(), Error> {
    let mut collector = Collector::new();
    collect(record, &mut collector)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        record = record.type_name(),
        fields = record.fields().len(),
        failures = collector.len(),
        "validated record"
    );

    collector.finish().map_err(Error::Invalid)
}

/// Validate every annotated field of `value`.
///
/// Returns `Ok(())` when all constraints hold, [`Error::NotARecord`] when
/// `value` is not a record, [`Error::Invalid`] with one entry per failing
/// field otherwise. An internal checker fault aborts with
/// [`Error::Internal`].
///
/// ```
/// use fieldguard::{validate, Error};
/// use std::collections::HashMap;
///
/// assert_eq!(validate("just a string"), Err(Error::NotARecord));
/// assert_eq!(validate(&HashMap::<String, i32>::new()), Err(Error::NotARecord));
/// ```
pub fn validate<T: Inspect + ?Sized>(value: &T) -> Result<(), Error> {
    match value.shape() {
        Shape::Record(record) => validate_record(record),
        #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
        Shape::Other(kind) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(%kind, "rejecting non-record value");
            Err(Error::NotARecord)
        }
    }
}

/// Validate a batch of records, merging their failures in order.
///
/// [`Error::NotARecord`] and [`Error::Internal`] stop the batch at the
/// offending item.
///
/// ```
/// use fieldguard::{record, validate_all, Error};
///
/// record! {
///     pub struct Code {
///         #[validate = "len:3"]
///         pub value: String,
///     }
/// }
///
/// let codes = [
///     Code { value: "abc".into() },
///     Code { value: "toolong".into() },
///     Code { value: "x".into() },
/// ];
///
/// let Err(Error::Invalid(errors)) = validate_all(&codes) else {
///     panic!("expected failures");
/// };
/// assert_eq!(errors.len(), 2);
/// ```
pub fn validate_all<'a, I, T>(records: I) -> Result<(), Error>
where
    I: IntoIterator<Item = &'a T>,
    T: Inspect + ?Sized + 'a,
{
    let mut merged: Option<ValidationErrors> = None;
    for record in records {
        match validate(record) {
            Ok(()) => {}
            Err(Error::Invalid(errors)) => merged = merged.combine(Some(errors)),
            Err(fatal) => return Err(fatal),
        }
    }
    merged.map_or(Ok(()), |errors| Err(Error::Invalid(errors)))
}
