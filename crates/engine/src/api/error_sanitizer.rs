//! Error sanitization for user-facing replies.
//!
//! Prevents leaking store or connection details into chat.

/// Log the full error and return a generic reply naming the command.
pub fn sanitize_error<E: std::fmt::Display>(error: &E, command: &str) -> String {
    tracing::error!(
        error = %error,
        command = command,
        "Command failed"
    );

    format!("Something went wrong while running `{}`. Please try again.", command)
}
