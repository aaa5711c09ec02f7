//! Generic error reporting shared by the CLI and hosts
//!
//! Errors that a user can fix (a rejected registration, a bad config value)
//! are reported with their own message. System errors (a module that fails
//! to open) get the operation context at error level and the detail at debug
//! level.

/// Errors that can tell user-actionable failures apart from system failures.
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    fn is_user_actionable(&self) -> bool;

    fn user_message(&self) -> Option<String>;
}

/// Log an error with a detail level based on its specificity.
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => {
            log::error!("{}: {}", operation_context, user_msg)
        }
        _ => log::error!("{}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
