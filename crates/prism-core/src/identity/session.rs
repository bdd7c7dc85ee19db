//! Observed session state.
//!
//! The provider owns the session; this module only models what the
//! client observes of it. `Session::Unknown` exists so consumers (the
//! route guard in particular) can tell "not signed in" apart from
//! "not determined yet" while a startup restore is still in flight.

use serde::{Deserialize, Serialize};

/// The identity the provider reports for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Provider-issued stable user id.
    pub uid: String,
    /// Email address, when the provider reports one.
    pub email: Option<String>,
}

impl Principal {
    /// A short human-readable label for greeting the user.
    pub fn display_label(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.uid)
    }
}

/// Session state as observed from the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    /// Provider state not yet determined (startup restore in flight).
    #[default]
    Unknown,
    /// No authenticated session.
    SignedOut,
    /// An authenticated session for this principal.
    SignedIn(Principal),
}

impl Session {
    /// Returns true once the provider has reported a definitive state.
    pub fn is_determined(&self) -> bool {
        !matches!(self, Session::Unknown)
    }

    /// Returns true when an authenticated session exists.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::SignedIn(_))
    }

    /// The signed-in principal, if any.
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Session::SignedIn(principal) => Some(principal),
            _ => None,
        }
    }
}
