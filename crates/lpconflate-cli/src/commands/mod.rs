//! CLI command implementations.
//!
//! Each command returns `Ok(false)` when it ran but found problems, so the
//! process can exit non-zero without printing an error.

pub mod convert;
pub mod titles;
pub mod validate;
