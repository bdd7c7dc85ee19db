//! Sign-in form state.

use crate::common::TextField;
use crate::features::Busy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Email,
    Password,
    Submit,
    Google,
    RegisterLink,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Email => Focus::Password,
            Focus::Password => Focus::Submit,
            Focus::Submit => Focus::Google,
            Focus::Google => Focus::RegisterLink,
            Focus::RegisterLink => Focus::Email,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Email => Focus::RegisterLink,
            Focus::Password => Focus::Email,
            Focus::Submit => Focus::Password,
            Focus::Google => Focus::Submit,
            Focus::RegisterLink => Focus::Google,
        }
    }
}

#[derive(Debug, Default)]
pub struct SignInState {
    pub email: TextField,
    pub password: TextField,
    pub focus: Focus,
    /// Validation or provider message shown under the form.
    pub error: Option<String>,
    /// Set while a request is outstanding; blocks re-submission only.
    pub busy: Option<Busy>,
    /// Consent URL shown while the Google flow waits on the browser.
    pub consent_url: Option<String>,
}

impl SignInState {
    pub fn new() -> Self {
        Self {
            password: TextField::masked(),
            ..Self::default()
        }
    }

    /// Resets transient request state, leaving the fields populated.
    pub fn settle(&mut self) {
        self.busy = None;
        self.consent_url = None;
    }
}
