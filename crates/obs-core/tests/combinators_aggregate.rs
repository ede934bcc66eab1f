use obs_core::{all, any, Predicate};

fn failing(msg: &'static str) -> Predicate {
    Predicate::new(|| false, move || msg.to_string())
}

#[test]
fn any_holds_when_one_child_holds() {
    assert!(any([Predicate::never(), Predicate::never(), Predicate::always()]).evaluate());
    assert!(!any([Predicate::never(), Predicate::never()]).evaluate());
}

#[test]
fn all_holds_when_every_child_holds() {
    assert!(all([Predicate::always(), Predicate::always()]).evaluate());
    assert!(!all([Predicate::never(), Predicate::always()]).evaluate());
}

#[test]
fn empty_inputs() {
    assert!(!any(Vec::new()).evaluate());
    assert!(all(Vec::new()).evaluate());
}

#[test]
fn messages_collect_every_failure() {
    let p = all([failing("first"), Predicate::always(), failing("second")]);
    assert!(!p.evaluate());
    assert_eq!(
        p.describe(),
        "expected all to be true, failures: [first, second]"
    );

    let q = any([failing("a"), failing("b")]);
    assert_eq!(q.describe(), "expected any to be true, all failed: [a, b]");
    assert!(!q.evaluate());
}

#[test]
fn children_are_all_evaluated() {
    let children = vec![Predicate::always(), failing("x"), Predicate::always()];
    let p = any(children.clone());
    assert!(p.evaluate());
    assert!(children.iter().all(Predicate::is_evaluated));
}
