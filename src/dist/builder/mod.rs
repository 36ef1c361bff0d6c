//! Matrix build phase.
//!
//! Runs the external toolchain once per target with an isolated environment
//! overlay and records a [`BuildOutcome`](crate::dist::BuildOutcome) for
//! each, failures included. A single target's failure never aborts the
//! matrix.

mod matrix;
mod probe;

pub use matrix::build_all;
