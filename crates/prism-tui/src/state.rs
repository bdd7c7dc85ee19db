//! Application state composition and routing.
//!
//! `AppState` owns everything the reducer mutates: the requested route,
//! the observed session, per-screen form state, and async task
//! lifecycle state. The route guard is the pure `resolve_view`
//! function: the dashboard route only renders once the session is
//! determined AND authenticated; until determination it holds, and a
//! signed-out session renders the sign-in screen instead.

use prism_core::identity::Session;

use crate::common::{TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::features::register::RegisterState;
use crate::features::signin::SignInState;

/// The requested screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SignIn,
    Register,
    Dashboard,
}

/// What actually renders after the guard weighs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Session not yet determined: hold rather than redirect early.
    Loading,
    SignIn,
    Register,
    Dashboard,
}

/// The route guard. Only the dashboard is gated; the auth screens
/// render as requested.
pub fn resolve_view(route: Route, session: &Session) -> View {
    match route {
        Route::SignIn => View::SignIn,
        Route::Register => View::Register,
        Route::Dashboard => match session {
            Session::Unknown => View::Loading,
            Session::SignedOut => View::SignIn,
            Session::SignedIn(_) => View::Dashboard,
        },
    }
}

pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    pub route: Route,
    /// Latest session observation from the gateway.
    pub session: Session,
    pub signin: SignInState,
    pub register: RegisterState,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Initial state: the protected root is requested, the session is
    /// undetermined, so the first render is the holding view.
    pub fn new() -> Self {
        Self {
            should_quit: false,
            route: Route::Dashboard,
            session: Session::Unknown,
            signin: SignInState::new(),
            register: RegisterState::new(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
        }
    }

    /// The screen currently rendered, per the guard.
    pub fn view(&self) -> View {
        resolve_view(self.route, &self.session)
    }

    /// Navigates to another screen, handling mount/unmount concerns:
    /// fresh form state for the target, the rotation schedule's
    /// lifecycle, and disposal of results that belong to the screen
    /// being left.
    pub fn navigate(&mut self, to: Route) -> Vec<UiEffect> {
        if self.route == to {
            return Vec::new();
        }

        let mut effects = Vec::new();
        let was_register = self.route == Route::Register;

        // An email request may outlive this screen; let it finish but
        // make sure its result no longer matches an active task.
        self.tasks.email_auth.clear();
        // An interactive consent flow is abandoned by leaving.
        if let Some(token) = self.tasks.google_auth.cancel.clone() {
            effects.push(UiEffect::CancelTask {
                kind: TaskKind::GoogleAuth,
                token: Some(token),
            });
        }
        self.tasks.google_auth.clear();

        self.route = to;
        match to {
            Route::SignIn => self.signin = SignInState::new(),
            Route::Register => {
                self.register = RegisterState::new();
                effects.push(UiEffect::StartRotation);
            }
            Route::Dashboard => {}
        }
        if was_register {
            effects.push(UiEffect::StopRotation);
        }

        effects
    }
}

#[cfg(test)]
mod tests {
    use prism_core::identity::Principal;

    use super::*;

    fn signed_in() -> Session {
        Session::SignedIn(Principal {
            uid: "u1".into(),
            email: Some("user@prism.dev".into()),
        })
    }

    #[test]
    fn guard_holds_while_session_is_unknown() {
        assert_eq!(
            resolve_view(Route::Dashboard, &Session::Unknown),
            View::Loading
        );
    }

    #[test]
    fn guard_redirects_signed_out_to_sign_in() {
        assert_eq!(
            resolve_view(Route::Dashboard, &Session::SignedOut),
            View::SignIn
        );
    }

    #[test]
    fn guard_renders_dashboard_when_authenticated() {
        assert_eq!(
            resolve_view(Route::Dashboard, &signed_in()),
            View::Dashboard
        );
    }

    #[test]
    fn auth_screens_are_not_gated() {
        assert_eq!(resolve_view(Route::SignIn, &Session::Unknown), View::SignIn);
        assert_eq!(
            resolve_view(Route::Register, &signed_in()),
            View::Register
        );
    }

    #[test]
    fn entering_register_starts_rotation_and_leaving_stops_it() {
        let mut app = AppState::new();
        let effects = app.navigate(Route::Register);
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, UiEffect::StartRotation))
        );

        let effects = app.navigate(Route::SignIn);
        assert!(effects.iter().any(|e| matches!(e, UiEffect::StopRotation)));
    }

    #[test]
    fn navigation_disposes_in_flight_task_results() {
        use crate::common::{TaskId, TaskStarted};

        let mut app = AppState::new();
        app.navigate(Route::SignIn);
        app.tasks.email_auth.on_started(&TaskStarted {
            id: TaskId(3),
            cancel: None,
        });

        app.navigate(Route::Register);
        // A completion for the old screen's task no longer matches.
        assert!(!app.tasks.email_auth.finish_if_active(TaskId(3)));
    }

    #[test]
    fn remounting_register_resets_its_form_and_rotation() {
        let mut app = AppState::new();
        app.navigate(Route::Register);
        app.register.accept_terms = true;
        app.register.showcase.advance();

        app.navigate(Route::SignIn);
        app.navigate(Route::Register);
        assert!(!app.register.accept_terms);
        assert_eq!(app.register.showcase.current(), 0);
    }
}
