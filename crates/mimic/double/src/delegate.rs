//! Typed delegate adapters.
//!
//! [`Allowed::doing`](mimic_mock::Allowed::doing) takes a delegate over raw
//! argument lists. These adapters wrap an ordinary typed closure instead;
//! arguments are extracted with [`FromValue`] when the delegate runs, and a
//! mismatch between the closure's signature and the actual arguments panics
//! at that moment.
//!
//! ```rust
//! use mimic::{allow, delegate2, params, values, Double, Value};
//!
//! let mut double = Double::new();
//! allow(&mut double)
//!     .call("Add")
//!     .with(params![mimic::anything(), mimic::anything()])
//!     .doing(delegate2(|a: i64, b: i64| a + b));
//!
//! assert_eq!(double.invoke("Add", values![2, 3]).unwrap(), vec![Value::I64(5)]);
//! ```

use std::any::type_name;

use mimic_types::{FromValue, Value};

fn signature_mismatch(signature: &str, args: &[Value]) -> ! {
    panic!("mimic: delegate signature mismatch: expected ({signature}), got {args:?}")
}

fn arity(args: &[Value], expected: usize, signature: &str) {
    if args.len() != expected {
        signature_mismatch(signature, args);
    }
}

fn arg<T: FromValue>(args: &[Value], index: usize, signature: &str) -> T {
    match args.get(index).and_then(T::from_value) {
        Some(value) => value,
        None => signature_mismatch(signature, args),
    }
}

/// Adapt a nullary closure into a delegate.
pub fn delegate0<R, F>(func: F) -> impl Fn(&[Value]) -> Vec<Value> + Send + Sync + 'static
where
    F: Fn() -> R + Send + Sync + 'static,
    R: Into<Value>,
{
    move |args: &[Value]| {
        arity(args, 0, "");
        vec![func().into()]
    }
}

/// Adapt a one-argument closure into a delegate.
pub fn delegate1<A, R, F>(func: F) -> impl Fn(&[Value]) -> Vec<Value> + Send + Sync + 'static
where
    A: FromValue,
    F: Fn(A) -> R + Send + Sync + 'static,
    R: Into<Value>,
{
    move |args: &[Value]| {
        let signature = type_name::<A>();
        arity(args, 1, signature);
        vec![func(arg(args, 0, signature)).into()]
    }
}

/// Adapt a two-argument closure into a delegate.
pub fn delegate2<A, B, R, F>(func: F) -> impl Fn(&[Value]) -> Vec<Value> + Send + Sync + 'static
where
    A: FromValue,
    B: FromValue,
    F: Fn(A, B) -> R + Send + Sync + 'static,
    R: Into<Value>,
{
    move |args: &[Value]| {
        let signature = format!("{}, {}", type_name::<A>(), type_name::<B>());
        arity(args, 2, &signature);
        vec![func(arg(args, 0, &signature), arg(args, 1, &signature)).into()]
    }
}

/// Adapt a three-argument closure into a delegate.
pub fn delegate3<A, B, C, R, F>(
    func: F,
) -> impl Fn(&[Value]) -> Vec<Value> + Send + Sync + 'static
where
    A: FromValue,
    B: FromValue,
    C: FromValue,
    F: Fn(A, B, C) -> R + Send + Sync + 'static,
    R: Into<Value>,
{
    move |args: &[Value]| {
        let signature = format!(
            "{}, {}, {}",
            type_name::<A>(),
            type_name::<B>(),
            type_name::<C>()
        );
        arity(args, 3, &signature);
        vec![func(
            arg(args, 0, &signature),
            arg(args, 1, &signature),
            arg(args, 2, &signature),
        )
        .into()]
    }
}
