use crate::predicate::Predicate;

struct Tally {
    total: usize,
    failures: Vec<String>,
}

// Every child is evaluated so the combined message lists each failure.
fn tally(predicates: &[Predicate]) -> Tally {
    let failures = predicates
        .iter()
        .filter(|p| !p.evaluate())
        .map(|p| p.describe().to_string())
        .collect();
    Tally {
        total: predicates.len(),
        failures,
    }
}

fn bracketed(messages: &[String]) -> String {
    format!("[{}]", messages.join(", "))
}

/// Returns a predicate that holds when at least one input holds.
///
/// An empty input never holds.
pub fn any<I>(predicates: I) -> Predicate
where
    I: IntoIterator<Item = Predicate>,
{
    let predicates: Vec<Predicate> = predicates.into_iter().collect();
    Predicate::memoized(
        move || tally(&predicates),
        |t| t.failures.len() < t.total,
        |t| {
            format!(
                "expected any to be true, all failed: {}",
                bracketed(&t.failures)
            )
        },
    )
}

/// Returns a predicate that holds when every input holds.
///
/// An empty input always holds.
pub fn all<I>(predicates: I) -> Predicate
where
    I: IntoIterator<Item = Predicate>,
{
    let predicates: Vec<Predicate> = predicates.into_iter().collect();
    Predicate::memoized(
        move || tally(&predicates),
        |t| t.failures.is_empty(),
        |t| {
            format!(
                "expected all to be true, failures: {}",
                bracketed(&t.failures)
            )
        },
    )
}
