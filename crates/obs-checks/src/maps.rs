use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use obs_core::Predicate;

use crate::shared::check;

/// Holds when `map` has an entry for `key`.
pub fn contains_key<K, V, S>(map: HashMap<K, V, S>, key: K) -> Predicate
where
    K: Eq + Hash + Debug + Send + Sync + 'static,
    V: Send + Sync + 'static,
    S: BuildHasher + Send + Sync + 'static,
{
    check(
        (map, key),
        |(map, key)| map.contains_key(key),
        |(_, key)| format!("expected map to contain key {key:?}"),
    )
}

/// Holds when some entry of `map` has the value `value`.
pub fn contains_value<K, V, S>(map: HashMap<K, V, S>, value: V) -> Predicate
where
    K: Send + Sync + 'static,
    V: PartialEq + Debug + Send + Sync + 'static,
    S: Send + Sync + 'static,
{
    check(
        (map, value),
        |(map, value)| map.values().any(|v| v == value),
        |(_, value)| format!("expected map to contain value {value:?}"),
    )
}

/// Holds when both maps hold the same entries.
///
/// The comparison runs once per predicate.
pub fn map_equal<K, V, S>(got: HashMap<K, V, S>, want: HashMap<K, V, S>) -> Predicate
where
    K: Eq + Hash + Debug + Send + Sync + 'static,
    V: PartialEq + Debug + Send + Sync + 'static,
    S: BuildHasher + Send + Sync + 'static,
{
    let sides = Arc::new((got, want));
    let for_msg = Arc::clone(&sides);
    Predicate::memoized(
        move || sides.0 == sides.1,
        |matched| *matched,
        move |_| {
            format!(
                "expected maps to be equal\nwant: {:#?}\ngot:  {:#?}",
                for_msg.1, for_msg.0
            )
        },
    )
}

/// Holds when `map` has exactly `want` entries.
pub fn map_length<K, V, S>(map: HashMap<K, V, S>, want: usize) -> Predicate
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
    S: Send + Sync + 'static,
{
    check(
        map,
        move |map| map.len() == want,
        move |map| format!("expected map size {want}, got {}", map.len()),
    )
}
