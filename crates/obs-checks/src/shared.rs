use std::sync::Arc;

use obs_core::Predicate;

/// Builds a predicate whose thunks both read the same captured state.
pub(crate) fn check<T, O, M>(state: T, ok: O, msg: M) -> Predicate
where
    T: Send + Sync + 'static,
    O: Fn(&T) -> bool + Send + Sync + 'static,
    M: Fn(&T) -> String + Send + Sync + 'static,
{
    let state = Arc::new(state);
    let for_msg = Arc::clone(&state);
    Predicate::new(move || ok(&state), move || msg(&for_msg))
}
