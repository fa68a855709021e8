//! Application-wide constants.

/// Versioned API prefix. Usage: `format!("{}{}", API_PREFIX, "/records")`.
pub const API_PREFIX: &str = "/api/v0";

/// Minimum length of a process number after trimming.
pub const MIN_PROCESS_NUMBER_LEN: usize = 5;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;
