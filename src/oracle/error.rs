use std::time::Duration;
use thiserror::Error;

use crate::StdError;

/// Failures of a single oracle interaction.
///
/// All variants are terminal for the case being run, never for the suite.
#[derive(Error, Debug)]
pub enum OracleError {
    /// Navigation to the external oracle failed (network, DNS, timeout).
    #[error("oracle unreachable")]
    Unreachable(#[source] StdError),

    /// The expected input/output surface did not appear within the
    /// discovery timeout. When many cases fail this way the oracle has
    /// probably changed its page structure.
    #[error("oracle surface not found: {surface}")]
    SurfaceNotFound { surface: String },

    /// Strict mode only: the settling window elapsed without any output
    /// change being observed.
    #[error("no output change observed within the {waited:?} settling window")]
    SettlingTimeout { waited: Duration },
}
