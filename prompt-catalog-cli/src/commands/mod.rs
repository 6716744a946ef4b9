//! Command handlers
//!
//! Each handler returns the process exit code on success, and a
//! [`CliError`](crate::error::CliError) for operational failures.

pub mod compile;
pub mod fix;
pub mod validate;
