//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls
//! `update(app, event)` and executes the returned effects. The reducer
//! performs no I/O itself.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use prism_core::identity::{AuthError, GoogleConsent, Principal, Session};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::{AuthIntent, UiEvent};
use crate::features::{FormCommand, dashboard, register, signin};
use crate::state::{AppState, Route, View};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            Vec::new()
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::RotationTick => {
            // The schedule only runs while the register screen is
            // mounted; the suspension check lives with the state.
            if app.route == Route::Register {
                app.register.showcase.timer_tick();
            }
            Vec::new()
        }
        UiEvent::Session(session) => handle_session_change(app, session),
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            Vec::new()
        }
        UiEvent::TaskCompleted { kind, completed } => {
            // Results are only applied while their task is still the
            // active one; anything else belongs to a disposed view.
            if app.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                Vec::new()
            }
        }
        UiEvent::AuthOutcome { intent, result } => handle_auth_outcome(app, intent, result),
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    let Event::Key(key) = event else {
        return Vec::new();
    };
    if key.kind != KeyEventKind::Press {
        return Vec::new();
    }
    if is_quit_key(key) {
        return vec![UiEffect::Quit];
    }

    let command = match app.view() {
        View::Loading => FormCommand::None,
        View::SignIn => signin::handle_key(&mut app.signin, key),
        View::Register => register::handle_key(&mut app.register, key),
        View::Dashboard => dashboard::handle_key(key),
    };
    apply_command(app, command)
}

fn is_quit_key(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn apply_command(app: &mut AppState, command: FormCommand) -> Vec<UiEffect> {
    match command {
        FormCommand::None => Vec::new(),
        FormCommand::SubmitEmail { email, password } => {
            let intent = if app.route == Route::Register {
                AuthIntent::SignUp
            } else {
                AuthIntent::SignIn
            };
            let task = app.task_seq.next_id();
            vec![UiEffect::SubmitEmailAuth {
                task,
                intent,
                email,
                password,
            }]
        }
        FormCommand::StartGoogle => {
            let consent = GoogleConsent::begin();
            let url = consent.url.clone();
            match app.view() {
                View::SignIn => app.signin.consent_url = Some(url.clone()),
                View::Register => app.register.consent_url = Some(url.clone()),
                _ => {}
            }
            let task = app.task_seq.next_id();
            vec![
                UiEffect::OpenBrowser { url },
                UiEffect::StartGoogleAuth { task, consent },
            ]
        }
        FormCommand::CancelGoogle => {
            let token = app.tasks.google_auth.cancel.clone();
            vec![UiEffect::CancelTask {
                kind: TaskKind::GoogleAuth,
                token,
            }]
        }
        FormCommand::Goto(route) => app.navigate(route),
        FormCommand::SignOut => vec![UiEffect::SignOut],
    }
}

/// Applies a session change; the guard's redirect happens here.
fn handle_session_change(app: &mut AppState, session: Session) -> Vec<UiEffect> {
    app.session = session;
    if app.route == Route::Dashboard && app.session == Session::SignedOut {
        return app.navigate(Route::SignIn);
    }
    Vec::new()
}

fn handle_auth_outcome(
    app: &mut AppState,
    _intent: AuthIntent,
    result: Result<Principal, AuthError>,
) -> Vec<UiEffect> {
    // The outcome belongs to whichever auth screen is current: stale
    // outcomes were already discarded by the task-id check.
    match result {
        Ok(_) => {
            settle_form(app, None);
            app.navigate(Route::Dashboard)
        }
        Err(AuthError::Cancelled) => {
            // Abandoned consent flow: back to the idle form, no noise.
            settle_form(app, None);
            Vec::new()
        }
        Err(err) => {
            settle_form(app, Some(err.user_message()));
            Vec::new()
        }
    }
}

fn settle_form(app: &mut AppState, error: Option<String>) {
    match app.view() {
        View::SignIn => {
            app.signin.settle();
            app.signin.error = error;
        }
        View::Register => {
            app.register.settle();
            app.register.error = error;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use prism_core::identity::Principal;

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskStarted};
    use crate::features::Busy;

    fn key_event(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn principal() -> Principal {
        Principal {
            uid: "u1".into(),
            email: Some("user@prism.dev".into()),
        }
    }

    fn start_task(app: &mut AppState, kind: TaskKind, id: TaskId) {
        update(
            app,
            UiEvent::TaskStarted {
                kind,
                started: TaskStarted { id, cancel: None },
            },
        );
    }

    fn complete_task(app: &mut AppState, kind: TaskKind, id: TaskId, inner: UiEvent) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id,
                    result: Box::new(inner),
                },
            },
        )
    }

    #[test]
    fn restore_to_signed_out_redirects_the_protected_root() {
        let mut app = AppState::new();
        assert_eq!(app.view(), View::Loading);

        update(&mut app, UiEvent::Session(Session::SignedOut));
        assert_eq!(app.route, Route::SignIn);
        assert_eq!(app.view(), View::SignIn);
    }

    #[test]
    fn restore_to_signed_in_renders_the_dashboard() {
        let mut app = AppState::new();
        update(&mut app, UiEvent::Session(Session::SignedIn(principal())));
        assert_eq!(app.view(), View::Dashboard);
    }

    #[test]
    fn successful_auth_outcome_navigates_to_the_dashboard() {
        let mut app = AppState::new();
        update(&mut app, UiEvent::Session(Session::SignedOut));
        app.navigate(Route::Register);
        app.register.busy = Some(Busy::Email);

        start_task(&mut app, TaskKind::EmailAuth, TaskId(0));
        // The gateway publishes the session before the task completes.
        update(&mut app, UiEvent::Session(Session::SignedIn(principal())));
        complete_task(
            &mut app,
            TaskKind::EmailAuth,
            TaskId(0),
            UiEvent::AuthOutcome {
                intent: AuthIntent::SignUp,
                result: Ok(principal()),
            },
        );

        assert_eq!(app.route, Route::Dashboard);
        assert_eq!(app.view(), View::Dashboard);
    }

    #[test]
    fn failed_outcome_keeps_the_form_populated_with_an_error() {
        let mut app = AppState::new();
        update(&mut app, UiEvent::Session(Session::SignedOut));

        update(&mut app, key_event(KeyCode::Char('u')));
        app.signin.busy = Some(Busy::Email);
        start_task(&mut app, TaskKind::EmailAuth, TaskId(0));
        complete_task(
            &mut app,
            TaskKind::EmailAuth,
            TaskId(0),
            UiEvent::AuthOutcome {
                intent: AuthIntent::SignIn,
                result: Err(AuthError::InvalidCredential(
                    "Email or password is incorrect.".into(),
                )),
            },
        );

        assert_eq!(app.route, Route::SignIn);
        assert_eq!(app.signin.email.value(), "u");
        assert!(app.signin.error.is_some());
        assert!(app.signin.busy.is_none());
    }

    #[test]
    fn cancelled_google_flow_returns_to_idle_silently() {
        let mut app = AppState::new();
        update(&mut app, UiEvent::Session(Session::SignedOut));
        app.signin.busy = Some(Busy::Google);
        app.signin.consent_url = Some("https://accounts.google.com/...".into());

        start_task(&mut app, TaskKind::GoogleAuth, TaskId(0));
        complete_task(
            &mut app,
            TaskKind::GoogleAuth,
            TaskId(0),
            UiEvent::AuthOutcome {
                intent: AuthIntent::Google,
                result: Err(AuthError::Cancelled),
            },
        );

        assert!(app.signin.busy.is_none());
        assert!(app.signin.consent_url.is_none());
        assert!(app.signin.error.is_none());
    }

    #[test]
    fn outcome_after_navigation_is_discarded() {
        let mut app = AppState::new();
        update(&mut app, UiEvent::Session(Session::SignedOut));
        start_task(&mut app, TaskKind::EmailAuth, TaskId(0));

        // User walks away from the sign-in screen before the provider
        // answers; the late success must not navigate or touch forms.
        app.navigate(Route::Register);
        let effects = complete_task(
            &mut app,
            TaskKind::EmailAuth,
            TaskId(0),
            UiEvent::AuthOutcome {
                intent: AuthIntent::SignIn,
                result: Ok(principal()),
            },
        );

        assert!(effects.is_empty());
        assert_eq!(app.route, Route::Register);
        assert!(app.register.error.is_none());
    }

    #[test]
    fn rotation_tick_advances_only_on_the_register_screen() {
        let mut app = AppState::new();
        update(&mut app, UiEvent::Session(Session::SignedOut));

        update(&mut app, UiEvent::RotationTick);
        app.navigate(Route::Register);
        update(&mut app, UiEvent::RotationTick);
        assert_eq!(app.register.showcase.current(), 1);
    }

    #[test]
    fn rotation_tick_respects_suspension() {
        let mut app = AppState::new();
        update(&mut app, UiEvent::Session(Session::SignedOut));
        app.navigate(Route::Register);
        app.register.showcase.set_suspended(true);

        update(&mut app, UiEvent::RotationTick);
        assert_eq!(app.register.showcase.current(), 0);
    }

    #[test]
    fn sign_out_on_the_dashboard_redirects_to_sign_in() {
        let mut app = AppState::new();
        update(&mut app, UiEvent::Session(Session::SignedIn(principal())));
        assert_eq!(app.view(), View::Dashboard);

        let effects = update(&mut app, key_event(KeyCode::Char('s')));
        assert!(effects.iter().any(|e| matches!(e, UiEffect::SignOut)));

        // The gateway publishes the cleared session; the guard redirects.
        update(&mut app, UiEvent::Session(Session::SignedOut));
        assert_eq!(app.view(), View::SignIn);
    }

    #[test]
    fn ctrl_c_quits_from_any_screen() {
        let mut app = AppState::new();
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(effects.iter().any(|e| matches!(e, UiEffect::Quit)));
    }

    #[test]
    fn starting_google_records_the_consent_url_and_opens_the_browser() {
        let mut app = AppState::new();
        update(&mut app, UiEvent::Session(Session::SignedOut));
        app.signin.focus = crate::features::signin::Focus::Google;

        let effects = update(&mut app, key_event(KeyCode::Enter));
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, UiEffect::OpenBrowser { .. }))
        );
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, UiEffect::StartGoogleAuth { .. }))
        );
        assert!(app.signin.consent_url.is_some());
    }
}
