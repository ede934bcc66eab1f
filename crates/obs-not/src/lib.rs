#![deny(missing_docs)]
#![doc = "Polymorphic negation for booleans, predicates and predicate-producing functions."]

pub mod dynamic;
/// Statically typed negation.
pub mod negatable;

pub use dynamic::{negate_value, try_negate, AnyValue, Args, DynFn, Signature, TypeTag, Value};
pub use negatable::{
    func1, func2, func3, func4, lazy, not, variadic, Fn0, Fn1, Fn2, Fn3, Fn4, Negatable, Variadic,
};
