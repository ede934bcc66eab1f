#![deny(missing_docs)]
#![doc = "Assertion entry points, failure sinks and reports for observable predicates."]

pub mod adapter;
/// Reporting policy and its loaders.
pub mod policy;
/// Serializable assertion reports.
pub mod report;
/// Collecting failure sink.
pub mod reporter;
pub mod sink;

pub use adapter::{assert, assertf, normalize, require};
pub use policy::{Policy, POLICY_ENV};
pub use report::{AssertionCheck, AssertionReport};
pub use reporter::Reporter;
pub use sink::{FailureSink, PanicSink};
