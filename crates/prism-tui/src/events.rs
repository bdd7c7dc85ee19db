//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal
//! input, timer ticks, session changes forwarded from the gateway's
//! watch channel, and completed async work from the inbox.

use prism_core::identity::{AuthError, Principal, Session};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Which auth operation an outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthIntent {
    SignIn,
    SignUp,
    Google,
}

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic UI tick (spinner animation).
    Tick,

    /// Raw terminal input.
    Terminal(crossterm::event::Event),

    /// The rotation schedule fired (every 5 s while the register
    /// screen is mounted). Advances the showcase unless suspended.
    RotationTick,

    /// The observed provider session changed.
    Session(Session),

    /// An async task started; the reducer records its id/cancel token.
    TaskStarted { kind: TaskKind, started: TaskStarted },

    /// An async task finished. The inner result event is dispatched
    /// only when the id still matches the active task of this kind —
    /// otherwise the result belongs to a disposed view and is dropped.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted,
    },

    /// Result of an auth operation (always arrives via `TaskCompleted`).
    AuthOutcome {
        intent: AuthIntent,
        result: Result<Principal, AuthError>,
    },
}
