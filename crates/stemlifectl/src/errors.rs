//! Exit codes for stemlifectl.

use stemlife_common::GameError;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the server returns an invalid or unexpected response
pub const EXIT_INVALID_RESPONSE: i32 = 65;

/// Exit code when the server is unavailable/unreachable
pub const EXIT_SERVER_UNAVAILABLE: i32 = 70;

/// Map a game error to its process exit code.
pub fn exit_code(error: &GameError) -> i32 {
    match error {
        GameError::Network(_) => EXIT_SERVER_UNAVAILABLE,
        GameError::Protocol(_) => EXIT_INVALID_RESPONSE,
        _ => EXIT_GENERAL_ERROR,
    }
}
