#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use obs_core::Predicate;

/// Shared call counter for checking laziness.
#[derive(Clone, Default)]
pub struct Calls(Arc<AtomicUsize>);

impl Calls {
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn equal(got: String, want: String) -> Predicate {
    Predicate::new(
        {
            let (got, want) = (got.clone(), want.clone());
            move || got == want
        },
        move || format!("expected {want:?}, got {got:?}"),
    )
}
