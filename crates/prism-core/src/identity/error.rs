//! Error taxonomy for the identity boundary.
//!
//! Three outcomes matter to callers: the credentials were rejected
//! (fix the form and retry), the provider/transport failed (show the
//! message, abandon the attempt), or the user walked away from an
//! interactive flow (return to idle without noise).

use thiserror::Error;

/// Provider error codes that mean "the credentials themselves were
/// rejected" rather than "the provider misbehaved".
const CREDENTIAL_CODES: &[&str] = &[
    "EMAIL_EXISTS",
    "EMAIL_NOT_FOUND",
    "INVALID_EMAIL",
    "INVALID_PASSWORD",
    "INVALID_LOGIN_CREDENTIALS",
    "MISSING_PASSWORD",
    "USER_DISABLED",
    "WEAK_PASSWORD",
];

#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider rejected the supplied address/password.
    #[error("invalid credentials: {0}")]
    InvalidCredential(String),
    /// Transport or provider failure.
    #[error("identity provider error: {0}")]
    Provider(String),
    /// The user abandoned an interactive consent flow.
    #[error("authentication cancelled")]
    Cancelled,
}

impl AuthError {
    /// Classifies a provider error code (e.g. `EMAIL_EXISTS` or
    /// `WEAK_PASSWORD : Password should be...`) into the taxonomy.
    pub(crate) fn from_provider_code(code: &str) -> Self {
        let head = code.split([' ', ':']).next().unwrap_or(code);
        if CREDENTIAL_CODES.contains(&head) {
            AuthError::InvalidCredential(readable_reason(head))
        } else {
            AuthError::Provider(code.to_string())
        }
    }

    /// A message suitable for showing directly on the form.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredential(reason) => reason.clone(),
            AuthError::Provider(message) => format!("Sign-in failed: {message}"),
            AuthError::Cancelled => String::new(),
        }
    }
}

fn readable_reason(code: &str) -> String {
    match code {
        "EMAIL_EXISTS" => "This email address is already registered.".to_string(),
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Email or password is incorrect.".to_string()
        }
        "INVALID_EMAIL" => "That email address is not valid.".to_string(),
        "MISSING_PASSWORD" => "A password is required.".to_string(),
        "USER_DISABLED" => "This account has been disabled.".to_string(),
        "WEAK_PASSWORD" => "Password is too weak (use at least 6 characters).".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_codes_map_to_invalid_credential() {
        for code in ["EMAIL_EXISTS", "WEAK_PASSWORD", "INVALID_LOGIN_CREDENTIALS"] {
            assert!(matches!(
                AuthError::from_provider_code(code),
                AuthError::InvalidCredential(_)
            ));
        }
    }

    #[test]
    fn annotated_codes_still_classify() {
        // The provider appends detail after the code for some rejections.
        let err = AuthError::from_provider_code(
            "WEAK_PASSWORD : Password should be at least 6 characters",
        );
        assert!(matches!(err, AuthError::InvalidCredential(_)));
    }

    #[test]
    fn unknown_codes_are_provider_errors() {
        assert!(matches!(
            AuthError::from_provider_code("QUOTA_EXCEEDED"),
            AuthError::Provider(_)
        ));
    }

    #[test]
    fn cancelled_has_no_user_message() {
        assert!(AuthError::Cancelled.user_message().is_empty());
    }
}
