//! Register screen key handling.
//!
//! Consent is validated here, before anything leaves the reducer: a
//! submission without the terms checkbox produces a validation message
//! and NO command, so no provider call can happen.

use crossterm::event::{KeyCode, KeyEvent};

use super::state::{Focus, RegisterState};
use crate::features::{Busy, FormCommand};
use crate::state::Route;

pub fn handle_key(state: &mut RegisterState, key: KeyEvent) -> FormCommand {
    if key.code == KeyCode::Esc && state.busy == Some(Busy::Google) {
        return FormCommand::CancelGoogle;
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            move_focus(state, true);
            FormCommand::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            move_focus(state, false);
            FormCommand::None
        }
        KeyCode::Enter => activate(state),
        KeyCode::Left if state.focus == Focus::Showcase => {
            state.showcase.retreat();
            FormCommand::None
        }
        KeyCode::Right if state.focus == Focus::Showcase => {
            state.showcase.advance();
            FormCommand::None
        }
        KeyCode::Char(' ') if state.focus == Focus::Updates => {
            state.accept_updates = !state.accept_updates;
            FormCommand::None
        }
        KeyCode::Char(' ') if state.focus == Focus::Terms => {
            state.accept_terms = !state.accept_terms;
            state.error = None;
            FormCommand::None
        }
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

/// Moves focus and keeps rotation suspension in lockstep with whether
/// the showcase panel holds focus (the terminal analogue of hover).
fn move_focus(state: &mut RegisterState, forward: bool) {
    state.focus = if forward {
        state.focus.next()
    } else {
        state.focus.prev()
    };
    state
        .showcase
        .set_suspended(state.focus == Focus::Showcase);
}

fn activate(state: &mut RegisterState) -> FormCommand {
    match state.focus {
        Focus::Email | Focus::Password | Focus::Submit => submit(state),
        Focus::Google => start_google(state),
        Focus::Updates => {
            state.accept_updates = !state.accept_updates;
            FormCommand::None
        }
        Focus::Terms => {
            state.accept_terms = !state.accept_terms;
            state.error = None;
            FormCommand::None
        }
        Focus::SignInLink => FormCommand::Goto(Route::SignIn),
        Focus::Showcase => {
            state.showcase.advance();
            FormCommand::None
        }
    }
}

fn submit(state: &mut RegisterState) -> FormCommand {
    if state.busy.is_some() {
        return FormCommand::None;
    }
    if !state.accept_terms {
        state.error = Some("Please accept the terms and conditions".to_string());
        return FormCommand::None;
    }
    if state.email.is_empty() || state.password.is_empty() {
        state.error = Some("Enter an email address and password.".to_string());
        return FormCommand::None;
    }
    state.error = None;
    state.busy = Some(Busy::Email);
    FormCommand::SubmitEmail {
        email: state.email.value().to_string(),
        password: state.password.value().to_string(),
    }
}

fn start_google(state: &mut RegisterState) -> FormCommand {
    if state.busy.is_some() {
        return FormCommand::None;
    }
    if !state.accept_terms {
        state.error = Some("Please accept the terms and conditions".to_string());
        return FormCommand::None;
    }
    state.error = None;
    state.busy = Some(Busy::Google);
    FormCommand::StartGoogle
}
