//! Record introspection
//!
//! The engine never sees concrete Rust types. It asks a value for its
//! [`Shape`] through the [`Inspect`] trait; only values that report
//! [`Shape::Record`] are validated, everything else is rejected up front.
//!
//! Records describe their fields with a static table of [`FieldSpec`]s and
//! hand out each field's runtime [`Value`] on request. The [`record!`] macro
//! writes both for you:
//!
//! ```
//! use fieldguard::{record, validate};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Signup {
//!         #[validate = "len:2"]
//!         pub country: String,
//!         #[validate = "between:18,130"]
//!         pub age: i32,
//!         pub nickname: String,
//!     }
//! }
//!
//! let signup = Signup {
//!     country: "NL".into(),
//!     age: 31,
//!     nickname: String::new(),
//! };
//! assert!(validate(&signup).is_ok());
//! ```
//!
//! Fields declared without a visibility qualifier are private and may not
//! carry a `validate` annotation; doing so is reported as
//! [`Violation::InaccessibleField`](crate::Violation::InaccessibleField).

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::value::Value;

/// Whether the engine is allowed to read a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Access {
    /// Declared with `pub` or a restricted `pub(..)`.
    Public,
    /// Declared without a visibility qualifier.
    Private,
}

impl Access {
    /// Derive accessibility from the source text of a visibility qualifier.
    ///
    /// ```
    /// use fieldguard::record::Access;
    ///
    /// assert_eq!(Access::from_visibility("pub"), Access::Public);
    /// assert_eq!(Access::from_visibility("pub(crate)"), Access::Public);
    /// assert_eq!(Access::from_visibility(""), Access::Private);
    /// ```
    pub const fn from_visibility(vis: &str) -> Self {
        if vis.is_empty() {
            Access::Private
        } else {
            Access::Public
        }
    }

    /// Returns `true` for [`Access::Public`].
    pub const fn is_public(self) -> bool {
        matches!(self, Access::Public)
    }
}

/// Static description of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as declared.
    pub name: &'static str,
    /// Declared type, as source text.
    pub type_name: &'static str,
    /// Accessibility of the field.
    pub access: Access,
    /// Raw `validate` annotation, if any.
    pub rule: Option<&'static str>,
}

impl FieldSpec {
    /// Describe a field.
    pub const fn new(
        name: &'static str,
        type_name: &'static str,
        access: Access,
        rule: Option<&'static str>,
    ) -> Self {
        FieldSpec {
            name,
            type_name,
            access,
            rule,
        }
    }
}

/// A product type with named fields.
///
/// Usually implemented through [`record!`]. A manual implementation must
/// return the fields in declaration order, and `value` must accept every
/// annotated field name from `fields`.
///
/// ```
/// use fieldguard::record::{Access, FieldSpec, Inspect, Record, Shape};
/// use fieldguard::value::{AsValue, Value};
///
/// struct Port(u16);
///
/// impl Record for Port {
///     fn fields(&self) -> &'static [FieldSpec] {
///         const FIELDS: &[FieldSpec] =
///             &[FieldSpec::new("0", "u16", Access::Public, Some("min:1024"))];
///         FIELDS
///     }
///
///     fn value(&self, field: &str) -> Value<'_> {
///         match field {
///             "0" => self.0.as_value(),
///             _ => Value::Unsupported("unknown field"),
///         }
///     }
/// }
///
/// impl Inspect for Port {
///     fn shape(&self) -> Shape<'_> {
///         Shape::Record(self)
///     }
/// }
///
/// assert!(fieldguard::validate(&Port(8080)).is_ok());
/// assert!(fieldguard::validate(&Port(80)).is_err());
/// ```
pub trait Record {
    /// Declared fields, in declaration order.
    fn fields(&self) -> &'static [FieldSpec];

    /// Runtime value of the named field.
    fn value(&self, field: &str) -> Value<'_>;

    /// Name of the record type, used in log output.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Non-record shapes, reported when something other than a record is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Strings and string slices.
    Text,
    /// Integer scalars.
    Integer,
    /// Floating point scalars.
    Float,
    /// `bool`.
    Boolean,
    /// `char`.
    Char,
    /// Vectors, slices, arrays.
    Sequence,
    /// Key-value maps.
    Mapping,
    /// Boxes and reference-counted pointers.
    Pointer,
    /// `Option<T>`.
    Optional,
    /// Tuples, including `()`.
    Tuple,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Text => "text",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Boolean => "boolean",
            Kind::Char => "char",
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
            Kind::Pointer => "pointer",
            Kind::Optional => "optional",
            Kind::Tuple => "tuple",
        };
        f.write_str(name)
    }
}

/// What a value looks like to the engine.
pub enum Shape<'a> {
    /// A record whose fields can be enumerated.
    Record(&'a dyn Record),
    /// Anything else.
    Other(Kind),
}

impl fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Record(record) => f.debug_tuple("Record").field(&record.type_name()).finish(),
            Shape::Other(kind) => f.debug_tuple("Other").field(kind).finish(),
        }
    }
}

/// A value that can be passed to [`validate`](crate::validate).
pub trait Inspect {
    /// Report the shape of this value.
    fn shape(&self) -> Shape<'_>;
}

macro_rules! impl_inspect_other {
    ($kind:expr => $($T:ty),+) => {
        $(
            impl Inspect for $T {
                #[inline]
                fn shape(&self) -> Shape<'_> {
                    Shape::Other($kind)
                }
            }
        )+
    };
}

impl_inspect_other!(Kind::Text => String, str);
impl_inspect_other!(Kind::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_inspect_other!(Kind::Float => f32, f64);
impl_inspect_other!(Kind::Boolean => bool);
impl_inspect_other!(Kind::Char => char);
impl_inspect_other!(Kind::Tuple => ());

impl<T> Inspect for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Other(Kind::Sequence)
    }
}

impl<T> Inspect for [T] {
    fn shape(&self) -> Shape<'_> {
        Shape::Other(Kind::Sequence)
    }
}

impl<T, const N: usize> Inspect for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::Other(Kind::Sequence)
    }
}

impl<K, V, S> Inspect for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Other(Kind::Mapping)
    }
}

impl<K, V> Inspect for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Other(Kind::Mapping)
    }
}

impl<T> Inspect for Option<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Other(Kind::Optional)
    }
}

// A pointer to a record is not itself a record.
impl<T: ?Sized> Inspect for Box<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Other(Kind::Pointer)
    }
}

impl<T: ?Sized> Inspect for Rc<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Other(Kind::Pointer)
    }
}

impl<T: ?Sized> Inspect for Arc<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Other(Kind::Pointer)
    }
}

/// Declare a struct and make it validatable.
///
/// Each field may carry one `#[validate = "<kind>:<parameter>"]` attribute.
/// Other attributes, doc comments included, are passed through unchanged on
/// both the struct and its fields. Lifetime parameters are supported; records
/// generic over types implement [`Record`] by hand.
///
/// ```
/// use fieldguard::{record, validate, Error};
///
/// record! {
///     /// Labels attached to a ticket.
///     pub struct Tags<'a> {
///         /// Display colors.
///         #[validate = "in:red,green,blue"]
///         pub colors: Vec<&'a str>,
///         /// Ranking, lowest first.
///         #[validate = "max:3"]
///         pub priorities: Vec<i64>,
///     }
/// }
///
/// let palette = String::from("red mauve");
/// let tags = Tags {
///     colors: palette.split(' ').collect(),
///     priorities: vec![1, 2],
/// };
///
/// match validate(&tags) {
///     Err(Error::Invalid(errors)) => {
///         assert_eq!(errors.len(), 1);
///         assert_eq!(errors.to_string(), "The string on position 1 is not allowed");
///     }
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$attr:meta])*
        $svis:vis struct $name:ident $(< $($lt:lifetime),+ >)? {
            $(
                $(#[$($fattr:tt)*])*
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $crate::__record_struct! {
            head [ $(#[$attr])* $svis struct $name $(< $($lt),+ >)? ]
            done []
            todo [ $( { [ $( [$($fattr)*] )* ] $fvis $field : $ty } )* ]
        }

        impl $(< $($lt),+ >)? $crate::record::Record for $name $(< $($lt),+ >)? {
            fn fields(&self) -> &'static [$crate::record::FieldSpec] {
                const FIELDS: &[$crate::record::FieldSpec] = &[
                    $(
                        $crate::record::FieldSpec::new(
                            stringify!($field),
                            stringify!($ty),
                            $crate::record::Access::from_visibility(stringify!($fvis)),
                            $crate::__field_rule!($( [$($fattr)*] )*),
                        )
                    ),*
                ];
                FIELDS
            }

            #[allow(unused_variables)]
            fn value(&self, field: &str) -> $crate::value::Value<'_> {
                $(
                    if field == stringify!($field) {
                        return $crate::__field_value!(self.$field, $ty; $( [$($fattr)*] )*);
                    }
                )*
                $crate::value::Value::Unsupported("unknown field")
            }

            fn type_name(&self) -> &'static str {
                stringify!($name)
            }
        }

        impl $(< $($lt),+ >)? $crate::record::Inspect for $name $(< $($lt),+ >)? {
            fn shape(&self) -> $crate::record::Shape<'_> {
                $crate::record::Shape::Record(self)
            }
        }
    };
}

// Emits the struct one field at a time, dropping `validate` attributes and
// keeping every other field attribute in place.
#[doc(hidden)]
#[macro_export]
macro_rules! __record_struct {
    (head [$($head:tt)*] done [$($done:tt)*] todo []) => {
        $($head)* { $($done)* }
    };
    (
        head $head:tt
        done $done:tt
        todo [ { [$($attrs:tt)*] $($field:tt)* } $($rest:tt)* ]
    ) => {
        $crate::__record_struct! {
            @attrs
            head $head
            done $done
            kept []
            attrs [$($attrs)*]
            field [$($field)*]
            todo [$($rest)*]
        }
    };
    (
        @attrs
        head $head:tt
        done [$($done:tt)*]
        kept [$($kept:tt)*]
        attrs []
        field [$($field:tt)*]
        todo $todo:tt
    ) => {
        $crate::__record_struct! {
            head $head
            done [$($done)* $($kept)* $($field)*,]
            todo $todo
        }
    };
    (
        @attrs
        head $head:tt
        done $done:tt
        kept $kept:tt
        attrs [ [validate = $rule:literal] $($rest:tt)* ]
        field $field:tt
        todo $todo:tt
    ) => {
        $crate::__record_struct! {
            @attrs
            head $head
            done $done
            kept $kept
            attrs [$($rest)*]
            field $field
            todo $todo
        }
    };
    (
        @attrs
        head $head:tt
        done $done:tt
        kept [$($kept:tt)*]
        attrs [ [$($attr:tt)*] $($rest:tt)* ]
        field $field:tt
        todo $todo:tt
    ) => {
        $crate::__record_struct! {
            @attrs
            head $head
            done $done
            kept [$($kept)* #[$($attr)*]]
            attrs [$($rest)*]
            field $field
            todo $todo
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_rule {
    () => {
        ::core::option::Option::None
    };
    ([validate = $rule:literal] $($rest:tt)*) => {
        ::core::option::Option::Some($rule)
    };
    ([$($other:tt)*] $($rest:tt)*) => {
        $crate::__field_rule!($($rest)*)
    };
}

// Unannotated fields are never read, so their type need not implement AsValue.
#[doc(hidden)]
#[macro_export]
macro_rules! __field_value {
    ($place:expr, $ty:ty;) => {
        $crate::value::Value::Unsupported(stringify!($ty))
    };
    ($place:expr, $ty:ty; [validate = $rule:literal] $($rest:tt)*) => {
        $crate::value::AsValue::as_value(&$place)
    };
    ($place:expr, $ty:ty; [$($other:tt)*] $($rest:tt)*) => {
        $crate::__field_value!($place, $ty; $($rest)*)
    };
}
