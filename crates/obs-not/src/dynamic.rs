//! Negation for values whose shape is only known at runtime.
//!
//! A boxed value is classified into a [`Value`]. Functions travel as
//! [`DynFn`]: a body plus a declared [`Signature`], which stands in for the
//! parameter and return information a reflective runtime would provide.
//! [`try_negate`] checks the declaration before building anything, so an
//! inadmissible function is rejected at negation time rather than at its
//! first call.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use obs_core::errors::{ErrorInfo, ObsError};
use obs_core::{BoolFn, Predicate};
use tracing::{debug, error};

use crate::negatable::Fn0;

/// Type-erased value passed to and returned from a [`DynFn`].
pub type AnyValue = Box<dyn Any + Send>;

fn contract_error(code: &str, message: impl Into<String>) -> ObsError {
    ObsError::Contract(ErrorInfo::new(code, message.into()))
}

fn signature_error(code: &str, message: impl Into<String>) -> ObsError {
    ObsError::Signature(ErrorInfo::new(code, message.into()))
}

fn tag_of(value: &AnyValue) -> TypeId {
    Any::type_id(&**value)
}

/// Runtime identity of a type, with its name kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Returns the tag describing `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the type identifier.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

/// Declared parameters and returns of a [`DynFn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Fixed parameters, in call order.
    pub params: Vec<TypeTag>,
    /// Element type of the trailing variadic parameter, if any.
    pub variadic: Option<TypeTag>,
    /// Declared return values.
    pub returns: Vec<TypeTag>,
}

impl Signature {
    /// Creates a signature without a variadic tail.
    pub fn new(params: Vec<TypeTag>, returns: Vec<TypeTag>) -> Self {
        Self {
            params,
            variadic: None,
            returns,
        }
    }

    /// Adds a variadic tail whose elements have type `tag`.
    pub fn with_variadic(mut self, tag: TypeTag) -> Self {
        self.variadic = Some(tag);
        self
    }

    fn render(&self) -> String {
        let mut params: Vec<String> = self.params.iter().map(|t| t.name.to_string()).collect();
        if let Some(tail) = &self.variadic {
            params.push(format!("...{}", tail.name));
        }
        let returns: Vec<&str> = self.returns.iter().map(|t| t.name).collect();
        format!("fn({}) -> ({})", params.join(", "), returns.join(", "))
    }
}

/// Arguments of a dynamic call: the fixed parameters and the variadic tail.
#[derive(Default)]
pub struct Args {
    /// Fixed arguments, in call order.
    pub fixed: Vec<AnyValue>,
    /// Trailing variadic arguments, forwarded as one sequence.
    pub rest: Vec<AnyValue>,
}

impl Args {
    /// Creates an argument list without a variadic tail.
    pub fn new(fixed: Vec<AnyValue>) -> Self {
        Self {
            fixed,
            rest: Vec::new(),
        }
    }

    /// Sets the variadic tail.
    pub fn with_rest(mut self, rest: Vec<AnyValue>) -> Self {
        self.rest = rest;
        self
    }

    /// Removes and downcasts the next fixed argument.
    pub fn take<T: 'static>(&mut self) -> Result<T, ObsError> {
        if self.fixed.is_empty() {
            return Err(signature_error(
                "obs_not.arity",
                format!("missing argument of type {}", type_name::<T>()),
            ));
        }
        downcast(self.fixed.remove(0))
    }

    /// Drains and downcasts the variadic tail.
    pub fn take_rest<T: 'static>(&mut self) -> Result<Vec<T>, ObsError> {
        self.rest.drain(..).map(downcast).collect()
    }
}

fn downcast<T: 'static>(value: AnyValue) -> Result<T, ObsError> {
    value.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
        signature_error(
            "obs_not.argument_type",
            format!("argument is not of type {}", type_name::<T>()),
        )
    })
}

type Body = Arc<dyn Fn(Args) -> Result<Vec<AnyValue>, ObsError> + Send + Sync>;

/// Callable with a declared [`Signature`], invoked through type-erased
/// arguments.
#[derive(Clone)]
pub struct DynFn {
    signature: Arc<Signature>,
    body: Body,
}

impl DynFn {
    /// Creates a function from its declaration and body.
    pub fn new<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(Args) -> Result<Vec<AnyValue>, ObsError> + Send + Sync + 'static,
    {
        Self {
            signature: Arc::new(signature),
            body: Arc::new(body),
        }
    }

    /// Wraps a nullary function.
    pub fn from_fn0<R, F>(f: F) -> Self
    where
        R: Send + 'static,
        F: Fn() -> R + Send + Sync + 'static,
    {
        Self::new(Signature::new(vec![], vec![TypeTag::of::<R>()]), move |_| {
            Ok(vec![Box::new(f()) as AnyValue])
        })
    }

    /// Wraps a unary function.
    pub fn from_fn1<A, R, F>(f: F) -> Self
    where
        A: 'static,
        R: Send + 'static,
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        let signature = Signature::new(vec![TypeTag::of::<A>()], vec![TypeTag::of::<R>()]);
        Self::new(signature, move |mut args| {
            let a = args.take::<A>()?;
            Ok(vec![Box::new(f(a)) as AnyValue])
        })
    }

    /// Wraps a binary function.
    pub fn from_fn2<A, B, R, F>(f: F) -> Self
    where
        A: 'static,
        B: 'static,
        R: Send + 'static,
        F: Fn(A, B) -> R + Send + Sync + 'static,
    {
        let signature = Signature::new(
            vec![TypeTag::of::<A>(), TypeTag::of::<B>()],
            vec![TypeTag::of::<R>()],
        );
        Self::new(signature, move |mut args| {
            let a = args.take::<A>()?;
            let b = args.take::<B>()?;
            Ok(vec![Box::new(f(a, b)) as AnyValue])
        })
    }

    /// Wraps a function with one fixed parameter and a variadic tail of `V`.
    pub fn variadic1<A, V, R, F>(f: F) -> Self
    where
        A: 'static,
        V: 'static,
        R: Send + 'static,
        F: Fn(A, Vec<V>) -> R + Send + Sync + 'static,
    {
        let signature = Signature::new(vec![TypeTag::of::<A>()], vec![TypeTag::of::<R>()])
            .with_variadic(TypeTag::of::<V>());
        Self::new(signature, move |mut args| {
            let a = args.take::<A>()?;
            let rest = args.take_rest::<V>()?;
            Ok(vec![Box::new(f(a, rest)) as AnyValue])
        })
    }

    /// Returns the declared signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invokes the function after checking `args` against the declaration,
    /// then checks the produced returns.
    pub fn call(&self, args: Args) -> Result<Vec<AnyValue>, ObsError> {
        self.check_args(&args)?;
        let returns = (self.body)(args)?;
        self.check_returns(&returns)?;
        Ok(returns)
    }

    /// Convenience for a function with exactly one declared return.
    pub fn call_one(&self, args: Args) -> Result<AnyValue, ObsError> {
        let mut returns = self.call(args)?;
        match returns.len() {
            1 => Ok(returns.remove(0)),
            n => Err(contract_error(
                "obs_not.return_count",
                format!("expected one return value, {} declares {n}", self.signature.render()),
            )),
        }
    }

    fn check_args(&self, args: &Args) -> Result<(), ObsError> {
        let sig = &self.signature;
        if args.fixed.len() != sig.params.len() {
            return Err(signature_error(
                "obs_not.arity",
                format!(
                    "{} takes {} fixed arguments, got {}",
                    sig.render(),
                    sig.params.len(),
                    args.fixed.len()
                ),
            ));
        }
        if sig.variadic.is_none() && !args.rest.is_empty() {
            return Err(signature_error(
                "obs_not.arity",
                format!("{} is not variadic", sig.render()),
            ));
        }
        for (idx, (arg, param)) in args.fixed.iter().zip(&sig.params).enumerate() {
            if tag_of(arg) != param.id {
                return Err(signature_error(
                    "obs_not.argument_type",
                    format!("argument {idx} is not of type {}", param.name),
                ));
            }
        }
        if let Some(tail) = &sig.variadic {
            if let Some(idx) = args.rest.iter().position(|arg| tag_of(arg) != tail.id) {
                return Err(signature_error(
                    "obs_not.argument_type",
                    format!("variadic argument {idx} is not of type {}", tail.name),
                ));
            }
        }
        Ok(())
    }

    fn check_returns(&self, returns: &[AnyValue]) -> Result<(), ObsError> {
        let declared = &self.signature.returns;
        let matches = returns.len() == declared.len()
            && returns
                .iter()
                .zip(declared)
                .all(|(value, tag)| tag_of(value) == tag.id);
        if matches {
            Ok(())
        } else {
            Err(signature_error(
                "obs_not.return_mismatch",
                format!("body disagrees with declared {}", self.signature.render()),
            ))
        }
    }
}

impl fmt::Debug for DynFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DynFn")
            .field(&self.signature.render())
            .finish()
    }
}

/// A value of runtime-determined shape.
pub enum Value {
    /// Bare boolean.
    Bool(bool),
    /// Nullary boolean function.
    Lazy(BoolFn),
    /// Predicate.
    Predicate(Predicate),
    /// Nullary function producing a predicate.
    LazyPredicate(Fn0<Predicate>),
    /// Function of any arity with a declared signature.
    Func(DynFn),
    /// Anything else. Never negatable.
    Opaque(AnyValue),
}

impl Value {
    /// Classifies a boxed value by its concrete type.
    pub fn from_any(value: AnyValue) -> Self {
        let value = match value.downcast::<bool>() {
            Ok(b) => return Value::Bool(*b),
            Err(other) => other,
        };
        let value = match value.downcast::<Predicate>() {
            Ok(p) => return Value::Predicate(*p),
            Err(other) => other,
        };
        let value = match value.downcast::<BoolFn>() {
            Ok(f) => return Value::Lazy(*f),
            Err(other) => other,
        };
        let value = match value.downcast::<Fn0<Predicate>>() {
            Ok(f) => return Value::LazyPredicate(*f),
            Err(other) => other,
        };
        match value.downcast::<DynFn>() {
            Ok(f) => Value::Func(*f),
            Err(other) => Value::Opaque(other),
        }
    }

    /// Returns a short name for the shape, used in diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Lazy(_) => "fn() -> bool",
            Value::Predicate(_) => "Predicate",
            Value::LazyPredicate(_) => "fn() -> Predicate",
            Value::Func(_) => "fn(..)",
            Value::Opaque(_) => "opaque",
        }
    }

    /// Returns the value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as a predicate, if it is one.
    pub fn into_predicate(self) -> Option<Predicate> {
        match self {
            Value::Predicate(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Predicate(p) => f.debug_tuple("Predicate").field(p).finish(),
            Value::Func(func) => f.debug_tuple("Func").field(func).finish(),
            other => write!(f, "{}(..)", other.shape()),
        }
    }
}

fn negate_bool_fn(f: BoolFn) -> BoolFn {
    Arc::new(move || !f())
}

fn is_admissible_return(tag: &TypeTag) -> bool {
    tag.is::<bool>() || tag.is::<BoolFn>() || tag.is::<Predicate>()
}

// Only called on values whose type was checked against an admissible tag.
fn complement_any(value: AnyValue) -> Result<AnyValue, ObsError> {
    let value = match value.downcast::<bool>() {
        Ok(b) => return Ok(Box::new(!*b)),
        Err(other) => other,
    };
    let value = match value.downcast::<BoolFn>() {
        Ok(f) => return Ok(Box::new(negate_bool_fn(*f))),
        Err(other) => other,
    };
    match value.downcast::<Predicate>() {
        Ok(p) => Ok(Box::new(p.negate())),
        Err(_) => Err(signature_error(
            "obs_not.return_type",
            "function returned a value that cannot be negated",
        )),
    }
}

fn negate_dyn_fn(func: DynFn) -> Result<DynFn, ObsError> {
    let sig = func.signature();
    if sig.returns.len() != 1 {
        return Err(contract_error(
            "obs_not.return_count",
            format!(
                "cannot negate {}: expected exactly one return value",
                sig.render()
            ),
        ));
    }
    if !is_admissible_return(&sig.returns[0]) {
        return Err(ObsError::Contract(
            ErrorInfo::new(
                "obs_not.return_type",
                format!(
                    "cannot negate {}: return type must be bool, fn() -> bool or Predicate",
                    sig.render()
                ),
            )
            .with_context("return", sig.returns[0].name),
        ));
    }
    let signature = func.signature().clone();
    Ok(DynFn::new(signature, move |args| {
        let value = func.call_one(args)?;
        Ok(vec![complement_any(value)?])
    }))
}

/// Negates a value of runtime-determined shape.
///
/// Dispatch follows the order predicate, boolean, nullary boolean function,
/// nullary predicate function, then any declared function. Functions are
/// never called here; their negation forwards arguments on each call.
/// Values outside the supported shapes, and functions declaring anything
/// other than a single `bool`, `fn() -> bool` or `Predicate` return, are
/// rejected with [`ObsError::Contract`].
pub fn try_negate(value: Value) -> Result<Value, ObsError> {
    let shape = value.shape();
    let negated = match value {
        Value::Predicate(p) => Ok(Value::Predicate(p.negate())),
        Value::Bool(b) => Ok(Value::Bool(!b)),
        Value::Lazy(f) => Ok(Value::Lazy(negate_bool_fn(f))),
        Value::LazyPredicate(f) => Ok(Value::LazyPredicate(Arc::new(move || f().negate()))),
        Value::Func(func) => negate_dyn_fn(func).map(Value::Func),
        Value::Opaque(_) => Err(ObsError::Contract(
            ErrorInfo::new(
                "obs_not.unsupported_shape",
                "value is neither a boolean, a predicate nor a function",
            )
            .with_hint("negate a bool, a Predicate or a function returning one"),
        )),
    };
    match &negated {
        Ok(_) => debug!(shape, "negated value"),
        Err(err) => error!(shape, error = %err, "refused to negate value"),
    }
    negated
}

/// Negates a value of runtime-determined shape, panicking on a contract
/// violation.
///
/// # Panics
///
/// Panics with the violation message when [`try_negate`] would return an
/// error. The panic happens here, before any function is invoked.
pub fn negate_value(value: Value) -> Value {
    match try_negate(value) {
        Ok(negated) => negated,
        Err(err) => panic!("{err}"),
    }
}
