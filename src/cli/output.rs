//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::TrackError;

/// Render a command failure, including any context it was wrapped in.
pub fn map_error(e: &anyhow::Error) -> String {
    format!("Error: {:#}", e)
}

/// Process exit status for a failed command.
///
/// A structural mismatch gets its own status so scripts can forget the
/// snapshot and track again.
pub fn exit_code(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<TrackError>() {
        Some(track) if track.is_structural_mismatch() => 2,
        _ => 1,
    }
}
