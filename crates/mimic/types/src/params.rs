//! Parameter materialization.
//!
//! Behaviors and ledger queries accept a mix of literal values and matchers.
//! [`match_params`] turns such a list into one matcher per position:
//!
//! 1. a matcher is used verbatim;
//! 2. [`Value::Nil`] becomes [`BeNil`];
//! 3. a scalar (bool, numeric, char, string) becomes [`Equal`];
//! 4. a composite (list, map, reference, record) becomes [`Equivalent`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::matcher::{Matcher, SharedMatcher};
use crate::matchers::{
    BeAnything, BeNil, BeNumerically, Equal, Equivalent, HaveType, MatchRegexp, Satisfy,
};
use crate::value::Value;

/// One position of a parameter list: a literal or an already-built matcher.
#[derive(Clone)]
pub enum Param {
    Value(Value),
    Matcher(SharedMatcher),
}

impl Param {
    /// Wrap any matcher, including ones defined outside this crate.
    pub fn matcher<M: Matcher + 'static>(matcher: M) -> Self {
        Param::Matcher(Arc::new(matcher))
    }

    /// Materialize this position into a matcher.
    pub fn into_matcher(self) -> SharedMatcher {
        match self {
            Param::Matcher(m) => m,
            Param::Value(Value::Nil) => Arc::new(BeNil),
            Param::Value(v) if v.is_scalar() => Arc::new(Equal { expected: v }),
            Param::Value(v) => Arc::new(Equivalent { expected: v }),
        }
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Param::Matcher(m) => write!(f, "Matcher({})", m.describe()),
        }
    }
}

/// Convert a heterogeneous parameter list into one matcher per position.
pub fn match_params(params: Vec<Param>) -> Vec<SharedMatcher> {
    params.into_iter().map(Param::into_matcher).collect()
}

impl From<SharedMatcher> for Param {
    fn from(m: SharedMatcher) -> Self {
        Param::Matcher(m)
    }
}

impl From<Value> for Param {
    fn from(v: Value) -> Self {
        Param::Value(v)
    }
}

macro_rules! impl_param_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Param {
                fn from(v: $ty) -> Self {
                    Param::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_param_from_value!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, char, String, &str, ()
);

impl<T: Into<Value>> From<Vec<T>> for Param {
    fn from(v: Vec<T>) -> Self {
        Param::Value(Value::from(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Param {
    fn from(v: Option<T>) -> Self {
        Param::Value(Value::from(v))
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Param {
    fn from(v: BTreeMap<String, T>) -> Self {
        Param::Value(Value::from(v))
    }
}

macro_rules! impl_param_from_matcher {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Param {
                fn from(m: $ty) -> Self {
                    Param::Matcher(Arc::new(m))
                }
            }
        )*
    };
}

impl_param_from_matcher!(
    Equal,
    Equivalent,
    BeNil,
    BeAnything,
    HaveType,
    BeNumerically,
    MatchRegexp,
    Satisfy,
);

/// Build a `Vec<Param>` from literals and matchers.
///
/// ```
/// use mimic_types::{anything, params, Param};
///
/// let p = params![1, "two", anything()];
/// assert!(matches!(p[2], Param::Matcher(_)));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Param>::new()
    };
    ($($p:expr),+ $(,)?) => {
        ::std::vec![$($crate::Param::from($p)),+]
    };
}
