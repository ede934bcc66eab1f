mod common;

use std::sync::{Arc, Mutex};

use obs_core::errors::ObsError;
use obs_core::{BoolFn, Predicate};
use obs_not::{
    lazy, negate_value, try_negate, AnyValue, Args, DynFn, Fn0, Signature, TypeTag, Value,
};

use common::{equal, Calls};

fn boxed<T: Send + 'static>(value: T) -> AnyValue {
    Box::new(value)
}

fn returned_predicate(value: AnyValue) -> Predicate {
    *value.downcast::<Predicate>().expect("predicate return")
}

#[test]
fn values_are_classified_by_shape() {
    assert_eq!(Value::from_any(boxed(true)).shape(), "bool");
    assert_eq!(Value::from_any(boxed(Predicate::always())).shape(), "Predicate");
    let f: BoolFn = lazy(|| true);
    assert_eq!(Value::from_any(boxed(f)).shape(), "fn() -> bool");
    let g: Fn0<Predicate> = lazy(Predicate::never);
    assert_eq!(Value::from_any(boxed(g)).shape(), "fn() -> Predicate");
    assert_eq!(Value::from_any(boxed(DynFn::from_fn0(|| true))).shape(), "fn(..)");
    assert_eq!(Value::from_any(boxed(42_i32)).shape(), "opaque");
}

#[test]
fn simple_shapes_negate() {
    let negated = try_negate(Value::from_any(boxed(false))).unwrap();
    assert_eq!(negated.as_bool(), Some(true));

    let negated = try_negate(Value::Predicate(Predicate::never())).unwrap();
    assert!(negated.into_predicate().unwrap().evaluate());

    let calls = Calls::default();
    let counter = calls.clone();
    let f: BoolFn = lazy(move || {
        counter.hit();
        true
    });
    match try_negate(Value::Lazy(f)).unwrap() {
        Value::Lazy(g) => {
            assert_eq!(calls.count(), 0);
            assert!(!g());
            assert_eq!(calls.count(), 1);
        }
        other => panic!("unexpected shape {other:?}"),
    }

    match try_negate(Value::LazyPredicate(lazy(Predicate::always))).unwrap() {
        Value::LazyPredicate(g) => assert!(!g().evaluate()),
        other => panic!("unexpected shape {other:?}"),
    }
}

#[test]
fn opaque_values_are_contract_violations() {
    let err = try_negate(Value::from_any(boxed(42_i32))).unwrap_err();
    assert!(err.is_contract_violation());
    assert_eq!(err.info().code, "obs_not.unsupported_shape");
}

#[test]
#[should_panic(expected = "contract violation")]
fn negate_value_panics_on_opaque_values() {
    negate_value(Value::from_any(boxed("not negatable")));
}

#[test]
fn two_return_functions_are_rejected_before_any_call() {
    let calls = Calls::default();
    let counter = calls.clone();
    let signature = Signature::new(
        vec![],
        vec![TypeTag::of::<Predicate>(), TypeTag::of::<ObsError>()],
    );
    let func = DynFn::new(signature, move |_| {
        counter.hit();
        Ok(vec![])
    });

    let err = try_negate(Value::Func(func)).unwrap_err();
    assert!(err.is_contract_violation());
    assert_eq!(err.info().code, "obs_not.return_count");
    assert_eq!(calls.count(), 0);
}

#[test]
#[should_panic(expected = "obs_not.return_type")]
fn unsupported_return_types_panic_through_negate_value() {
    negate_value(Value::Func(DynFn::from_fn1(|x: i32| x + 1)));
}

#[test]
fn unsupported_return_type_names_the_type() {
    let err = try_negate(Value::Func(DynFn::from_fn1(|x: i32| x.to_string()))).unwrap_err();
    assert_eq!(err.info().code, "obs_not.return_type");
    assert!(err.info().context["return"].contains("String"));
}

#[test]
fn negated_functions_keep_their_signature_and_stay_lazy() {
    let calls = Calls::default();
    let counter = calls.clone();
    let func = DynFn::from_fn2(move |got: String, want: String| {
        counter.hit();
        equal(got, want)
    });
    let original_signature = func.signature().clone();

    let negated = match try_negate(Value::Func(func)).unwrap() {
        Value::Func(f) => f,
        other => panic!("unexpected shape {other:?}"),
    };
    assert_eq!(negated.signature(), &original_signature);
    assert_eq!(calls.count(), 0);

    let args = Args::new(vec![boxed("a".to_string()), boxed("b".to_string())]);
    let p = returned_predicate(negated.call_one(args).unwrap());
    assert!(p.evaluate());
    assert_eq!(p.describe(), "not: expected \"b\", got \"a\"");
    assert_eq!(calls.count(), 1);
}

#[test]
fn negated_bool_and_lazy_returns_are_complemented() {
    let func = DynFn::from_fn1(|x: i32| x > 0);
    let negated = match negate_value(Value::Func(func)) {
        Value::Func(f) => f,
        other => panic!("unexpected shape {other:?}"),
    };
    let out = negated.call_one(Args::new(vec![boxed(5_i32)])).unwrap();
    assert!(!*out.downcast::<bool>().unwrap());

    let func = DynFn::from_fn1(|x: i32| -> BoolFn { lazy(move || x > 0) });
    let negated = match negate_value(Value::Func(func)) {
        Value::Func(f) => f,
        other => panic!("unexpected shape {other:?}"),
    };
    let out = negated.call_one(Args::new(vec![boxed(-5_i32)])).unwrap();
    let inner = *out.downcast::<BoolFn>().unwrap();
    assert!(inner());
}

#[test]
fn variadic_arguments_are_forwarded_as_one_tail() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let func = DynFn::variadic1(move |head: String, rest: Vec<i32>| {
        log.lock().unwrap().push((head, rest));
        Predicate::never()
    });
    let negated = match negate_value(Value::Func(func)) {
        Value::Func(f) => f,
        other => panic!("unexpected shape {other:?}"),
    };

    for rest in [vec![], vec![1], vec![1, 2, 3]] {
        let tail = rest.into_iter().map(boxed).collect();
        let args = Args::new(vec![boxed("foo".to_string())]).with_rest(tail);
        assert!(returned_predicate(negated.call_one(args).unwrap()).evaluate());
    }

    let seen = seen.lock().unwrap();
    let tails: Vec<_> = seen.iter().map(|(_, rest)| rest.clone()).collect();
    assert_eq!(tails, vec![vec![], vec![1], vec![1, 2, 3]]);
    assert!(seen.iter().all(|(head, _)| head == "foo"));
}

#[test]
fn calls_are_checked_against_the_signature() {
    let func = DynFn::from_fn1(|x: i32| x > 0);

    let err = func.call(Args::new(vec![])).unwrap_err();
    assert_eq!(err.info().code, "obs_not.arity");

    let err = func.call(Args::new(vec![boxed("one")])).unwrap_err();
    assert_eq!(err.info().code, "obs_not.argument_type");

    let err = func
        .call(Args::new(vec![boxed(1_i32)]).with_rest(vec![boxed(2_i32)]))
        .unwrap_err();
    assert_eq!(err.info().code, "obs_not.arity");

    let variadic = DynFn::variadic1(|_: i32, _: Vec<u8>| true);
    let err = variadic
        .call(Args::new(vec![boxed(1_i32)]).with_rest(vec![boxed(2_u8), boxed(3_i32)]))
        .unwrap_err();
    assert_eq!(err.info().code, "obs_not.argument_type");
}

#[test]
fn bodies_that_break_their_declaration_are_reported() {
    let liar = DynFn::new(
        Signature::new(vec![], vec![TypeTag::of::<bool>()]),
        |_| Ok(vec![Box::new(7_u32) as AnyValue]),
    );
    let negated = match try_negate(Value::Func(liar)).unwrap() {
        Value::Func(f) => f,
        other => panic!("unexpected shape {other:?}"),
    };
    let err = negated.call(Args::default()).unwrap_err();
    assert_eq!(err.info().code, "obs_not.return_mismatch");
}
