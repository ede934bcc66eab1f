use std::sync::Arc;

use obs_core::{Assertion, Predicate};

/// Nullary function producing `R`.
pub type Fn0<R> = Arc<dyn Fn() -> R + Send + Sync>;
/// Unary function producing `R`.
pub type Fn1<A, R> = Arc<dyn Fn(A) -> R + Send + Sync>;
/// Binary function producing `R`.
pub type Fn2<A, B, R> = Arc<dyn Fn(A, B) -> R + Send + Sync>;
/// Ternary function producing `R`.
pub type Fn3<A, B, C, R> = Arc<dyn Fn(A, B, C) -> R + Send + Sync>;
/// Four-argument function producing `R`.
pub type Fn4<A, B, C, D, R> = Arc<dyn Fn(A, B, C, D) -> R + Send + Sync>;

/// Function taking one fixed argument followed by a variadic tail.
///
/// The tail travels as a single sequence, so forwarding it is a move.
pub type Variadic<A, V, R> = Fn2<A, Vec<V>, R>;

/// Values that have a same-typed logical complement.
///
/// Implemented for [`Predicate`], `bool`, and functions of arity zero to four
/// whose return type is an [`Assertion`] shape (`bool`, a nullary boolean
/// function, or a [`Predicate`]). Types outside that set do not implement the
/// trait, so misuse of [`not`] is rejected by the compiler.
pub trait Negatable: Sized {
    /// Returns the complement of `self` without evaluating anything.
    fn negate(self) -> Self;
}

/// Returns the logical negation of `x`, with exactly the type of `x`.
///
/// Functions come back as functions of the same signature that forward their
/// arguments to the original and complement its result when called.
pub fn not<N: Negatable>(x: N) -> N {
    x.negate()
}

impl Negatable for Predicate {
    fn negate(self) -> Self {
        Predicate::negate(self)
    }
}

impl Negatable for bool {
    fn negate(self) -> Self {
        !self
    }
}

impl<R> Negatable for Fn0<R>
where
    R: Assertion + Negatable,
{
    fn negate(self) -> Self {
        let inner = self;
        Arc::new(move || inner().negate())
    }
}

macro_rules! impl_negatable_fn {
    ($($arg:ident: $ty:ident),+) => {
        impl<$($ty: 'static,)+ R> Negatable for Arc<dyn Fn($($ty),+) -> R + Send + Sync>
        where
            R: Assertion + Negatable,
        {
            fn negate(self) -> Self {
                let inner = self;
                Arc::new(move |$($arg: $ty),+| inner($($arg),+).negate())
            }
        }
    };
}

impl_negatable_fn!(a: A);
impl_negatable_fn!(a: A, b: B);
impl_negatable_fn!(a: A, b: B, c: C);
impl_negatable_fn!(a: A, b: B, c: C, d: D);

/// Wraps a nullary closure or fn item as a [`Fn0`].
pub fn lazy<R, F>(f: F) -> Fn0<R>
where
    F: Fn() -> R + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wraps a unary closure or fn item as a [`Fn1`].
pub fn func1<A, R, F>(f: F) -> Fn1<A, R>
where
    F: Fn(A) -> R + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wraps a binary closure or fn item as a [`Fn2`].
pub fn func2<A, B, R, F>(f: F) -> Fn2<A, B, R>
where
    F: Fn(A, B) -> R + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wraps a ternary closure or fn item as a [`Fn3`].
pub fn func3<A, B, C, R, F>(f: F) -> Fn3<A, B, C, R>
where
    F: Fn(A, B, C) -> R + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wraps a four-argument closure or fn item as a [`Fn4`].
pub fn func4<A, B, C, D, R, F>(f: F) -> Fn4<A, B, C, D, R>
where
    F: Fn(A, B, C, D) -> R + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wraps a closure taking a fixed argument and a variadic tail.
pub fn variadic<A, V, R, F>(f: F) -> Variadic<A, V, R>
where
    F: Fn(A, Vec<V>) -> R + Send + Sync + 'static,
{
    Arc::new(f)
}
