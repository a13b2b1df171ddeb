//! Exit code constants for the octocov-config CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable or malformed config)
//! - 2: Validation failure (datastore or central misconfiguration)
//! - 3: Coverage below the acceptable threshold

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, ambiguous, unreadable or malformed config.
pub const USER_ERROR: i32 = 1;

/// Validation failure: datastore or central section is incomplete or malformed.
pub const VALIDATION_FAILURE: i32 = 2;

/// Coverage is below the configured acceptable threshold.
pub const BELOW_THRESHOLD: i32 = 3;
