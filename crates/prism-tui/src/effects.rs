//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime
//! executes. They represent I/O and task spawning only; the reducer
//! itself never performs I/O.

use prism_core::identity::GoogleConsent;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};
use crate::events::AuthIntent;

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Submit email credentials to the gateway (sign-in or sign-up).
    SubmitEmailAuth {
        task: TaskId,
        intent: AuthIntent,
        email: String,
        password: String,
    },

    /// Run the interactive Google consent flow to completion.
    StartGoogleAuth { task: TaskId, consent: GoogleConsent },

    /// Open a URL in the system browser.
    OpenBrowser { url: String },

    /// Clear the provider session (idempotent).
    SignOut,

    /// Start the 5-second rotation schedule for the showcase panel.
    /// Replaces any previous schedule.
    StartRotation,

    /// Cancel the rotation schedule unconditionally.
    StopRotation,

    /// Cancel an in-progress task via its token.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}
