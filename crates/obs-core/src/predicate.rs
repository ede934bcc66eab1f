//! Lazily evaluated boolean checks paired with an explanation.

use std::fmt;
use std::ops::Not;
use std::sync::{Arc, OnceLock};

use crate::memo::{settle, Memo, Settled};

/// Prefix prepended to the message of a negated predicate.
pub const NEGATION_MARKER: &str = "not: ";

type OkFn = Box<dyn Fn() -> bool + Send + Sync>;
type MsgFn = Box<dyn Fn() -> String + Send + Sync>;

struct Inner {
    ok: OkFn,
    msg: MsgFn,
    ok_cell: OnceLock<Settled<bool>>,
    msg_cell: OnceLock<Settled<String>>,
}

/// Deferred boolean condition together with a message describing the
/// expected condition and what was actually observed.
///
/// Building a predicate never evaluates anything. The condition and the
/// message are each computed on first request and cached; clones share the
/// cache. Builders that capture an expensive computation should go through
/// [`Predicate::memoized`] so that the computation runs once in total,
/// whichever of [`evaluate`](Predicate::evaluate) and
/// [`describe`](Predicate::describe) is called first.
#[derive(Clone)]
pub struct Predicate {
    inner: Arc<Inner>,
}

impl Predicate {
    /// Creates a predicate from an evaluation thunk and a message thunk.
    pub fn new<O, M>(ok: O, msg: M) -> Self
    where
        O: Fn() -> bool + Send + Sync + 'static,
        M: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                ok: Box::new(ok),
                msg: Box::new(msg),
                ok_cell: OnceLock::new(),
                msg_cell: OnceLock::new(),
            }),
        }
    }

    /// Creates a predicate whose thunks both read the outcome of `compute`.
    ///
    /// `compute` runs at most once, on the first call to either accessor.
    pub fn memoized<T, C, O, M>(compute: C, ok: O, msg: M) -> Self
    where
        T: Send + Sync + 'static,
        C: Fn() -> T + Send + Sync + 'static,
        O: Fn(&T) -> bool + Send + Sync + 'static,
        M: Fn(&T) -> String + Send + Sync + 'static,
    {
        let memo = Memo::new(compute);
        let for_msg = memo.clone();
        Self::new(move || ok(memo.get()), move || msg(for_msg.get()))
    }

    /// Predicate that always holds.
    pub fn always() -> Self {
        Self::new(|| true, || "true".to_string())
    }

    /// Predicate that never holds.
    pub fn never() -> Self {
        Self::new(|| false, || "false".to_string())
    }

    /// Evaluates (or returns the cached result of) the condition.
    pub fn evaluate(&self) -> bool {
        *settle(&self.inner.ok_cell, || (self.inner.ok)())
    }

    /// Returns (or computes) the explanation of the check.
    ///
    /// Meaningful whether or not the predicate holds; by convention it is only
    /// surfaced when [`evaluate`](Self::evaluate) returned `false`.
    pub fn describe(&self) -> &str {
        settle::<String, _>(&self.inner.msg_cell, || (self.inner.msg)())
    }

    /// Returns the complement of this predicate.
    ///
    /// The result holds iff `self` does not, and its message is this
    /// predicate's message prefixed with [`NEGATION_MARKER`]. Both accessors
    /// delegate to this predicate's cache.
    pub fn negate(self) -> Self {
        let for_msg = self.clone();
        Self::new(
            move || !self.evaluate(),
            move || format!("{NEGATION_MARKER}{}", for_msg.describe()),
        )
    }

    /// Returns whether the condition has already been evaluated.
    pub fn is_evaluated(&self) -> bool {
        self.inner.ok_cell.get().is_some()
    }
}

impl Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("ok", &self.inner.ok_cell.get())
            .field("message", &self.inner.msg_cell.get())
            .finish()
    }
}
