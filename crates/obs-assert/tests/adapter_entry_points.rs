mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use obs_assert::{assert, assertf, normalize, require};
use obs_core::{BoolFn, Predicate};
use obs_not::{func2, lazy, not};

use common::{expect_fail, expect_pass, Spy};

fn equal(got: &'static str, want: &'static str) -> Predicate {
    Predicate::new(move || got == want, move || format!("expected {want}, got {got}"))
}

#[test]
fn normalize_booleans_have_no_message() {
    assert_eq!(normalize(true), (true, String::new()));
    assert_eq!(normalize(false), (false, String::new()));
}

#[test]
fn normalize_invokes_lazy_functions_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let f: BoolFn = lazy(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        false
    });
    assert_eq!(normalize(f), (false, String::new()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn normalize_predicates_carry_their_description() {
    assert_eq!(normalize(equal("a", "b")), (false, "expected b, got a".to_string()));
    assert_eq!(normalize(equal("a", "a")), (true, "expected a, got a".to_string()));
}

#[test]
fn bool_checks() {
    expect_pass(true);
    expect_fail(false);
    expect_pass(not(false));
    expect_fail(not(true));

    expect_pass(lazy(|| 2 + 2 == 4));
    expect_fail(lazy(|| 2 + 2 == 5));
    expect_pass(not(lazy(|| 2 + 2 == 5)));
    expect_fail(not(lazy(|| 2 + 2 == 4)));
}

#[test]
fn predicate_checks() {
    expect_pass(equal("a", "a"));
    expect_fail(equal("a", "b"));
    expect_pass(not(func2(equal))("a", "b"));
    expect_fail(not(func2(equal))("a", "a"));
}

#[test]
fn assert_reports_the_automatic_message() {
    let spy = Spy::new();
    assert!(!assert(&spy, equal("x", "y")));
    assert!(assert(&spy, equal("x", "x")));
    assert_eq!(spy.failures(), vec!["expected y, got x".to_string()]);
    assert_eq!(spy.passes(), 1);
}

#[test]
fn bare_boolean_failures_get_a_placeholder_message() {
    let spy = Spy::new();
    assert!(!assert(&spy, false));
    assert_eq!(spy.failures(), vec!["assertion failed".to_string()]);
}

#[test]
fn assertf_overrides_the_message_but_not_the_outcome() {
    let spy = Spy::new();
    let key = "colour";
    assert!(!obs_assert::assertf!(&spy, equal("red", "blue"), "lookup of {key} failed"));
    assert_eq!(spy.failures(), vec!["lookup of colour failed".to_string()]);

    let spy = Spy::new();
    assert!(assertf(&spy, equal("red", "red"), format_args!("ignored")));
    assert!(!spy.spied_on_failure());
}

#[test]
fn require_passes_silently() {
    let spy = Spy::new();
    require(&spy, true);
    assert_eq!(spy.passes(), 1);
}

#[test]
#[should_panic(expected = "fail_now: expected b, got a")]
fn require_fails_hard() {
    let spy = Spy::new();
    require(&spy, equal("a", "b"));
}

#[test]
#[should_panic(expected = "assertion failed: not: true")]
fn panic_sink_behaves_like_assert_macro() {
    assert(&obs_assert::PanicSink, not(Predicate::always()));
}
