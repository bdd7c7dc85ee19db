//! Feature slices for the TUI (state/update/render per slice).

pub mod dashboard;
pub mod register;
pub mod showcase;
pub mod signin;

use crate::state::Route;

/// What a screen's key handler asks the reducer to do.
///
/// Feature updates stay pure: they mutate their own form state and
/// return one of these; the main reducer turns it into effects.
#[derive(Debug, PartialEq, Eq)]
pub enum FormCommand {
    None,
    /// Submit validated email credentials.
    SubmitEmail { email: String, password: String },
    /// Start the interactive Google consent flow.
    StartGoogle,
    /// Cancel a pending Google consent flow.
    CancelGoogle,
    /// Navigate to another screen.
    Goto(Route),
    /// Sign the current user out.
    SignOut,
}

/// Which auth operation a form is currently waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Busy {
    Email,
    Google,
}
