//! Register form state.

use crate::common::TextField;
use crate::features::Busy;
use crate::features::showcase::RotationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Google,
    Email,
    Password,
    Updates,
    Terms,
    Submit,
    SignInLink,
    Showcase,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Google => Focus::Email,
            Focus::Email => Focus::Password,
            Focus::Password => Focus::Updates,
            Focus::Updates => Focus::Terms,
            Focus::Terms => Focus::Submit,
            Focus::Submit => Focus::SignInLink,
            Focus::SignInLink => Focus::Showcase,
            Focus::Showcase => Focus::Google,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Google => Focus::Showcase,
            Focus::Email => Focus::Google,
            Focus::Password => Focus::Email,
            Focus::Updates => Focus::Password,
            Focus::Terms => Focus::Updates,
            Focus::Submit => Focus::Terms,
            Focus::SignInLink => Focus::Submit,
            Focus::Showcase => Focus::SignInLink,
        }
    }
}

#[derive(Debug)]
pub struct RegisterState {
    pub email: TextField,
    pub password: TextField,
    /// "I want to receive updates, special offers, ..." — optional.
    pub accept_updates: bool,
    /// Terms of Service consent — required before any sign-up call.
    pub accept_terms: bool,
    pub focus: Focus,
    pub error: Option<String>,
    pub busy: Option<Busy>,
    pub consent_url: Option<String>,
    /// Showcase rotation; lives exactly as long as this screen.
    pub showcase: RotationState,
}

impl Default for RegisterState {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterState {
    pub fn new() -> Self {
        Self {
            email: TextField::new(),
            password: TextField::masked(),
            accept_updates: false,
            accept_terms: false,
            focus: Focus::default(),
            error: None,
            busy: None,
            consent_url: None,
            showcase: RotationState::default(),
        }
    }

    /// Resets transient request state, leaving the form populated.
    pub fn settle(&mut self) {
        self.busy = None;
        self.consent_url = None;
    }
}
