//! End to end test suite for an external Tanglish to Tamil transliteration
//! web oracle.
//!
//! The suite drives a browser through a W3C WebDriver remote end, feeds each
//! test case's input to the oracle page, waits for the output surface to
//! settle and evaluates a predicate against what the page produced. Cases
//! run sequentially against one shared session; a failing case never aborts
//! the run.

mod cases;
mod end_to_end_spec;
pub mod oracle;
mod predicate;
mod report;
pub mod utils;

pub use cases::{Category, TestCase, suite_cases};
pub use end_to_end_spec::{Spec, SpecConfig};
pub use predicate::{Predicate, ScriptRange, TAMIL};
pub use report::{CaseOutcome, RunResult, SuiteReport};

/// Generic error type
pub type StdError = anyhow::Error;

/// Generic result type
pub type StdResult<T> = anyhow::Result<T>;
