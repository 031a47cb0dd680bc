//! Dynamic argument values.
//!
//! Mocked operations receive their arguments as an ordered list of [`Value`]s.
//! The enum distinguishes the fixed-width numeric kinds so that the widener
//! and the type matcher can observe the exact representation a caller used.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single argument, return value or raise reason.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// The "no value" sentinel.
    Nil,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// A pointer or reference to another value.
    Ref(Box<Value>),
    /// A structure with named fields, in declaration order.
    Record {
        type_name: String,
        fields: Vec<(String, Value)>,
    },
}

impl Value {
    /// Wrap a value as a reference to it.
    pub fn reference(inner: impl Into<Value>) -> Self {
        Value::Ref(Box::new(inner.into()))
    }

    /// Build a record value.
    pub fn record<I, K, V>(type_name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Record {
            type_name: type_name.into(),
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Whether this is [`Value::Nil`].
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Whether this value is of a basic, directly comparable kind.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Bool(_)
                | Value::I8(_)
                | Value::I16(_)
                | Value::I32(_)
                | Value::I64(_)
                | Value::U8(_)
                | Value::U16(_)
                | Value::U32(_)
                | Value::U64(_)
                | Value::F32(_)
                | Value::F64(_)
                | Value::Char(_)
                | Value::Str(_)
        )
    }

    /// Whether this is an integer or float of any width.
    pub fn is_numeric(&self) -> bool {
        self.is_scalar() && !matches!(self, Value::Bool(_) | Value::Char(_) | Value::Str(_))
    }

    /// Numeric value as `f64`, or `None` for non-numeric kinds.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::I8(v) => Some(v as f64),
            Value::I16(v) => Some(v as f64),
            Value::I32(v) => Some(v as f64),
            Value::I64(v) => Some(v as f64),
            Value::U8(v) => Some(v as f64),
            Value::U16(v) => Some(v as f64),
            Value::U32(v) => Some(v as f64),
            Value::U64(v) => Some(v as f64),
            Value::F32(v) => Some(v as f64),
            Value::F64(v) => Some(v),
            _ => None,
        }
    }

    /// The string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Rust-flavoured name of this value's type.
    ///
    /// Collections report the type of their first element (`Vec<u8>`), or
    /// `_` when empty. Records report their own type name.
    pub fn type_name(&self) -> String {
        match self {
            Value::Nil => "nil".into(),
            Value::Bool(_) => "bool".into(),
            Value::I8(_) => "i8".into(),
            Value::I16(_) => "i16".into(),
            Value::I32(_) => "i32".into(),
            Value::I64(_) => "i64".into(),
            Value::U8(_) => "u8".into(),
            Value::U16(_) => "u16".into(),
            Value::U32(_) => "u32".into(),
            Value::U64(_) => "u64".into(),
            Value::F32(_) => "f32".into(),
            Value::F64(_) => "f64".into(),
            Value::Char(_) => "char".into(),
            Value::Str(_) => "String".into(),
            Value::List(items) => format!("Vec<{}>", element_type(items.first())),
            Value::Map(entries) => {
                format!("Map<String, {}>", element_type(entries.values().next()))
            }
            Value::Ref(inner) => format!("&{}", inner.type_name()),
            Value::Record { type_name, .. } => type_name.clone(),
        }
    }
}

fn element_type(first: Option<&Value>) -> String {
    first.map(Value::type_name).unwrap_or_else(|| "_".into())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v:?}"),
            Value::Str(v) => write!(f, "{v:?}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Ref(inner) => write!(f, "&{inner}"),
            Value::Record { type_name, fields } => {
                write!(f, "{type_name} {{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {k}: {v}")?;
                }
                write!(f, " }}")
            }
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => Str,
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::I64(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::U64(v as u64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Nil)
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(entries: BTreeMap<String, T>) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Typed extraction of a [`Value`].
///
/// Integer and float targets accept any width of their category, as long as
/// the value fits the target type.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for char {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Char(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

macro_rules! impl_from_value_signed {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Option<Self> {
                    match crate::widen::widen(value) {
                        Value::I64(v) => <$ty>::try_from(v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

macro_rules! impl_from_value_unsigned {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Option<Self> {
                    match crate::widen::widen(value) {
                        Value::U64(v) => <$ty>::try_from(v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_value_signed!(i8, i16, i32, i64, isize);
impl_from_value_unsigned!(u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match crate::widen::widen(value) {
            Value::F64(v) => Some(v),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::F32(v) => Some(*v),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Nil => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// ```
/// use mimic_types::{values, Value};
///
/// let args = values![1u8, "two", true];
/// assert_eq!(args[1], Value::Str("two".into()));
/// ```
#[macro_export]
macro_rules! values {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($v:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($v)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_and_composite_classification() {
        assert!(Value::from(5u8).is_scalar());
        assert!(Value::from("x").is_scalar());
        assert!(Value::from('c').is_scalar());
        assert!(!Value::Nil.is_scalar());
        assert!(!Value::from(vec![1, 2]).is_scalar());
        assert!(!Value::reference(1).is_scalar());
        assert!(!Value::record("Point", [("x", 1)]).is_scalar());
    }

    #[test]
    fn option_none_is_nil() {
        let none: Option<i32> = None;
        assert_eq!(Value::from(none), Value::Nil);
        assert_eq!(Value::from(Some(3i32)), Value::I32(3));
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::from(4u8).type_name(), "u8");
        assert_eq!(Value::from("s").type_name(), "String");
        assert_eq!(Value::from(vec![1i64]).type_name(), "Vec<i64>");
        assert_eq!(Value::List(vec![]).type_name(), "Vec<_>");
        assert_eq!(Value::reference(2u16).type_name(), "&u16");
        assert_eq!(Value::record("geo.Point", [("x", 1)]).type_name(), "geo.Point");
    }

    #[test]
    fn from_value_accepts_any_width_that_fits() {
        assert_eq!(i32::from_value(&Value::I8(-3)), Some(-3));
        assert_eq!(u8::from_value(&Value::U64(300)), None);
        assert_eq!(u64::from_value(&Value::I64(1)), None);
        assert_eq!(f64::from_value(&Value::F32(0.5)), Some(0.5));
        assert_eq!(
            Vec::<u32>::from_value(&Value::from(vec![1u8, 2u8])),
            Some(vec![1, 2])
        );
        assert_eq!(Option::<bool>::from_value(&Value::Nil), Some(None));
    }

    #[test]
    fn display_is_readable() {
        let v = Value::record("Point", [("x", Value::from(1)), ("y", Value::from("a"))]);
        assert_eq!(v.to_string(), "Point { x: 1, y: \"a\" }");
        assert_eq!(values![1, true].len(), 2);
    }

    #[test]
    fn serde_round_trip_preserves_width() {
        let v = Value::from(vec![Value::U8(7), Value::reference(Value::Nil)]);
        let json = serde_json::to_string(&v).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
