//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return a `UiEvent`; the
//! runtime spawns them and routes the result through the inbox. Every
//! gateway failure is converted into an `AuthOutcome` event here, so
//! nothing can escape as an unhandled task error.

use std::sync::Arc;

use prism_core::identity::{AuthGateway, GoogleConsent};
use tokio_util::sync::CancellationToken;

use crate::events::{AuthIntent, UiEvent};

/// Submits email credentials to the gateway.
pub async fn email_auth(
    gateway: Arc<AuthGateway>,
    intent: AuthIntent,
    email: String,
    password: String,
) -> UiEvent {
    let result = match intent {
        AuthIntent::SignUp => gateway.sign_up_with_email(&email, &password).await,
        _ => gateway.sign_in_with_email(&email, &password).await,
    };
    UiEvent::AuthOutcome { intent, result }
}

/// Runs the interactive Google consent flow to completion.
pub async fn google_auth(
    gateway: Arc<AuthGateway>,
    consent: GoogleConsent,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let cancel = cancel.unwrap_or_default();
    let result = gateway.sign_in_with_google(consent, cancel).await;
    UiEvent::AuthOutcome {
        intent: AuthIntent::Google,
        result,
    }
}
