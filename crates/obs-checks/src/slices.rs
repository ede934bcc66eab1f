use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use obs_core::Predicate;

use crate::shared::check;

/// Holds when `items` yields exactly `want` elements.
pub fn length<T>(items: impl IntoIterator<Item = T>, want: usize) -> Predicate
where
    T: Debug + Send + Sync + 'static,
{
    check(
        items.into_iter().collect::<Vec<_>>(),
        move |items| items.len() == want,
        move |items| format!("expected length {want}, got {}", items.len()),
    )
}

/// Holds when `items` yields nothing.
pub fn empty<T>(items: impl IntoIterator<Item = T>) -> Predicate
where
    T: Debug + Send + Sync + 'static,
{
    length(items, 0)
}

/// Holds when `items` yields an element equal to `elem`.
pub fn contains<T>(items: impl IntoIterator<Item = T>, elem: T) -> Predicate
where
    T: PartialEq + Debug + Send + Sync + 'static,
{
    check(
        (items.into_iter().collect::<Vec<_>>(), elem),
        |(items, elem)| items.contains(elem),
        |(items, elem)| format!("expected {items:?} to contain {elem:?}"),
    )
}

/// Holds when both sequences have the same elements in the same order.
pub fn sequence_equal<T>(
    got: impl IntoIterator<Item = T>,
    want: impl IntoIterator<Item = T>,
) -> Predicate
where
    T: PartialEq + Debug + Send + Sync + 'static,
{
    check(
        (
            got.into_iter().collect::<Vec<_>>(),
            want.into_iter().collect::<Vec<_>>(),
        ),
        |(got, want)| got == want,
        |(got, want)| format!("expected sequence {want:?}, got {got:?}"),
    )
}

fn counts<T: Eq + Hash>(items: &[T]) -> HashMap<&T, usize> {
    let mut counts = HashMap::with_capacity(items.len());
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Holds when both sequences contain the same elements with the same
/// multiplicities, in any order.
///
/// The multiset comparison runs once per predicate.
pub fn elements_match<T>(
    got: impl IntoIterator<Item = T>,
    want: impl IntoIterator<Item = T>,
) -> Predicate
where
    T: Eq + Hash + Debug + Send + Sync + 'static,
{
    let sides = Arc::new((
        got.into_iter().collect::<Vec<_>>(),
        want.into_iter().collect::<Vec<_>>(),
    ));
    let for_msg = Arc::clone(&sides);
    Predicate::memoized(
        move || sides.0.len() == sides.1.len() && counts(&sides.0) == counts(&sides.1),
        |matched| *matched,
        move |_| {
            format!(
                "expected {:?} and {:?} to contain the same elements",
                for_msg.0, for_msg.1
            )
        },
    )
}
