//! Process exit codes

/// The command succeeded
pub const EXIT_SUCCESS: i32 = 0;

/// The command failed, or validation found errors
pub const EXIT_ERROR: i32 = 1;

/// Validation found warnings but no errors
pub const EXIT_WARNING: i32 = 2;
