//! Sign-in screen key handling.

use crossterm::event::{KeyCode, KeyEvent};

use super::state::{Focus, SignInState};
use crate::features::{Busy, FormCommand};
use crate::state::Route;

pub fn handle_key(state: &mut SignInState, key: KeyEvent) -> FormCommand {
    // Esc cancels a pending Google flow; everything else stays usable
    // while a request is outstanding.
    if key.code == KeyCode::Esc && state.busy == Some(Busy::Google) {
        return FormCommand::CancelGoogle;
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            state.focus = state.focus.next();
            FormCommand::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus = state.focus.prev();
            FormCommand::None
        }
        KeyCode::Enter => activate(state),
        _ => {
            let consumed = match state.focus {
                Focus::Email => state.email.handle_key(key),
                Focus::Password => state.password.handle_key(key),
                _ => false,
            };
            if consumed {
                state.error = None;
            }
            FormCommand::None
        }
    }
}

fn activate(state: &mut SignInState) -> FormCommand {
    match state.focus {
        Focus::Email | Focus::Password | Focus::Submit => submit(state),
        Focus::Google => start_google(state),
        Focus::RegisterLink => FormCommand::Goto(Route::Register),
    }
}

fn submit(state: &mut SignInState) -> FormCommand {
    if state.busy.is_some() {
        return FormCommand::None;
    }
    if state.email.is_empty() || state.password.is_empty() {
        state.error = Some("Enter your email and password.".to_string());
        return FormCommand::None;
    }
    state.error = None;
    state.busy = Some(Busy::Email);
    FormCommand::SubmitEmail {
        email: state.email.value().to_string(),
        password: state.password.value().to_string(),
    }
}

fn start_google(state: &mut SignInState) -> FormCommand {
    if state.busy.is_some() {
        return FormCommand::None;
    }
    state.error = None;
    state.busy = Some(Busy::Google);
    FormCommand::StartGoogle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(state: &mut SignInState, s: &str) {
        for c in s.chars() {
            handle_key(state, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn empty_submit_is_blocked_with_a_message() {
        let mut state = SignInState::new();
        state.focus = Focus::Submit;
        let cmd = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(cmd, FormCommand::None);
        assert!(state.error.is_some());
        assert!(state.busy.is_none());
    }

    #[test]
    fn filled_submit_yields_credentials() {
        let mut state = SignInState::new();
        type_str(&mut state, "user@prism.dev");
        state.focus = Focus::Password;
        type_str(&mut state, "hunter22");
        let cmd = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(
            cmd,
            FormCommand::SubmitEmail {
                email: "user@prism.dev".into(),
                password: "hunter22".into(),
            }
        );
        assert_eq!(state.busy, Some(Busy::Email));
    }

    #[test]
    fn resubmit_while_busy_is_ignored() {
        let mut state = SignInState::new();
        type_str(&mut state, "user@prism.dev");
        state.focus = Focus::Password;
        type_str(&mut state, "hunter22");
        handle_key(&mut state, key(KeyCode::Enter));
        let cmd = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(cmd, FormCommand::None);
    }

    #[test]
    fn esc_cancels_a_pending_google_flow() {
        let mut state = SignInState::new();
        state.focus = Focus::Google;
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Enter)),
            FormCommand::StartGoogle
        );
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Esc)),
            FormCommand::CancelGoogle
        );
    }

    #[test]
    fn register_link_navigates() {
        let mut state = SignInState::new();
        state.focus = Focus::RegisterLink;
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Enter)),
            FormCommand::Goto(Route::Register)
        );
    }

    #[test]
    fn typing_clears_a_previous_error() {
        let mut state = SignInState::new();
        state.error = Some("Email or password is incorrect.".into());
        type_str(&mut state, "a");
        assert!(state.error.is_none());
    }
}
