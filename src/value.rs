//! Runtime values handed to constraint checkers
//!
//! Every annotated field is converted into a [`Value`] exactly once, through
//! the [`AsValue`] trait. Checkers then dispatch over this closed set of
//! shapes instead of inspecting concrete Rust types.
//!
//! # Examples
//!
//! ```
//! use fieldguard::value::{AsValue, Value};
//!
//! assert_eq!("abc".to_string().as_value(), Value::Text("abc"));
//! assert_eq!(42_i32.as_value(), Value::Integer(42));
//! assert_eq!(
//!     vec![1_i64, 2].as_value(),
//!     Value::IntegerSequence(vec![1, 2])
//! );
//! assert!(true.as_value().is_unsupported());
//! ```

/// The shape of a field value, as seen by the constraint checkers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'a> {
    /// A scalar string.
    Text(&'a str),
    /// A scalar signed integer.
    Integer(i64),
    /// An ordered sequence of strings.
    TextSequence(Vec<&'a str>),
    /// An ordered sequence of signed integers.
    IntegerSequence(Vec<i64>),
    /// Any other type; carries the Rust type name for diagnostics.
    Unsupported(&'static str),
}

impl Value<'_> {
    /// Returns `true` if no checker accepts this value.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Value::Unsupported(_))
    }

    /// Short name of the shape, used in log output.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::TextSequence(_) => "text sequence",
            Value::IntegerSequence(_) => "integer sequence",
            Value::Unsupported(_) => "unsupported",
        }
    }
}

/// Conversion of a field into a [`Value`].
///
/// Implemented for the text and integer types the checkers understand, their
/// sequences, and a handful of common types that map to
/// [`Value::Unsupported`] so that annotating them still compiles and is
/// reported as a rule syntax error at validation time.
pub trait AsValue {
    /// Borrow `self` as a checker value.
    fn as_value(&self) -> Value<'_>;
}

impl AsValue for String {
    #[inline]
    fn as_value(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl AsValue for &str {
    #[inline]
    fn as_value(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl AsValue for Box<str> {
    #[inline]
    fn as_value(&self) -> Value<'_> {
        Value::Text(self)
    }
}

macro_rules! impl_as_value_text_seq {
    ($($T:ty),+) => {
        $(
            impl AsValue for Vec<$T> {
                fn as_value(&self) -> Value<'_> {
                    Value::TextSequence(self.iter().map(|s| &**s).collect())
                }
            }

            impl AsValue for [$T] {
                fn as_value(&self) -> Value<'_> {
                    Value::TextSequence(self.iter().map(|s| &**s).collect())
                }
            }

            impl<const N: usize> AsValue for [$T; N] {
                fn as_value(&self) -> Value<'_> {
                    self.as_slice().as_value()
                }
            }
        )+
    };
}

impl_as_value_text_seq!(String, &str, Box<str>);

// Integer types that widen losslessly into i64
macro_rules! impl_as_value_integer {
    ($($T:ty),+) => {
        $(
            impl AsValue for $T {
                #[inline]
                fn as_value(&self) -> Value<'_> {
                    Value::Integer(i64::from(*self))
                }
            }

            impl AsValue for Vec<$T> {
                fn as_value(&self) -> Value<'_> {
                    self.as_slice().as_value()
                }
            }

            impl AsValue for [$T] {
                fn as_value(&self) -> Value<'_> {
                    Value::IntegerSequence(self.iter().map(|&n| i64::from(n)).collect())
                }
            }

            impl<const N: usize> AsValue for [$T; N] {
                fn as_value(&self) -> Value<'_> {
                    self.as_slice().as_value()
                }
            }
        )+
    };
}

impl_as_value_integer!(i8, i16, i32, i64, u8, u16, u32);

// isize has no From impl into i64, but is at most 64 bits on every supported target.
impl AsValue for isize {
    #[inline]
    fn as_value(&self) -> Value<'_> {
        match i64::try_from(*self) {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::Unsupported("isize"),
        }
    }
}

macro_rules! impl_as_value_unsupported {
    ($($T:ty),+) => {
        $(
            impl AsValue for $T {
                #[inline]
                fn as_value(&self) -> Value<'_> {
                    Value::Unsupported(std::any::type_name::<$T>())
                }
            }
        )+
    };
}

impl_as_value_unsupported!(bool, char, f32, f64, u64, usize, u128, i128);

impl<T> AsValue for Option<T> {
    #[inline]
    fn as_value(&self) -> Value<'_> {
        Value::Unsupported(std::any::type_name::<Option<T>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_values() {
        assert_eq!(String::from("hello").as_value(), Value::Text("hello"));
        assert_eq!("hi".as_value(), Value::Text("hi"));
        let boxed: Box<str> = "boxed".into();
        assert_eq!(boxed.as_value(), Value::Text("boxed"));
    }

    #[test]
    fn test_integer_values_widen() {
        assert_eq!((-3_i8).as_value(), Value::Integer(-3));
        assert_eq!(u32::MAX.as_value(), Value::Integer(4_294_967_295));
        assert_eq!(7_isize.as_value(), Value::Integer(7));
    }

    #[test]
    fn test_sequences() {
        let names = vec!["a".to_string(), "bc".to_string()];
        assert_eq!(names.as_value(), Value::TextSequence(vec!["a", "bc"]));

        let arr = [1_u8, 2, 3];
        assert_eq!(arr.as_value(), Value::IntegerSequence(vec![1, 2, 3]));

        let empty: Vec<i32> = Vec::new();
        assert_eq!(empty.as_value(), Value::IntegerSequence(vec![]));
    }

    #[test]
    fn test_unsupported() {
        assert!(1.5_f64.as_value().is_unsupported());
        assert!(42_u64.as_value().is_unsupported());
        assert!(Some(3).as_value().is_unsupported());
        assert_eq!(true.as_value(), Value::Unsupported("bool"));
    }

    #[test]
    fn test_shape_name() {
        assert_eq!(Value::Text("x").shape_name(), "text");
        assert_eq!(Value::IntegerSequence(vec![]).shape_name(), "integer sequence");
    }
}
