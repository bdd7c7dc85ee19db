//! Federated consent plumbing for Google sign-in.
//!
//! The interactive part of the flow lives here: PKCE material, the
//! consent URL the browser is sent to, a loopback listener that waits
//! for the redirect, and the code-for-ID-token exchange. The gateway
//! then presents the ID token to the identity provider
//! (`accounts:signInWithIdp`) to establish the session.
//!
//! Cancellation is first-class: the loopback wait races a
//! `CancellationToken` so abandoning the browser flow surfaces as
//! `AuthError::Cancelled`, never as a provider error.

use std::time::Duration;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use super::AuthError;

/// Google OAuth client ID for the PRISM terminal client (public, not a secret).
const CLIENT_ID: &str = "309417529225-h7deqpbvtr5hdfvmq4a3sb4c92k05c1g.apps.googleusercontent.com";

/// Google OAuth client secret for installed apps (public, not a secret).
const CLIENT_SECRET: &str = "GOCSPX-pr1smTermCl13ntPubl1cVal";

/// Google OAuth URLs.
const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Local OAuth callback path (port is dynamic).
pub const LOCAL_CALLBACK_PATH: &str = "/callback";

const SCOPES: &str = "openid email profile";

/// How long the loopback listener waits before giving up.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

/// PKCE code verifier and challenge.
pub struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

/// Generate PKCE code verifier and challenge.
pub fn generate_pkce() -> Pkce {
    // Two UUIDs (16 bytes each) give 32 random bytes for the verifier.
    let uuid1 = uuid::Uuid::new_v4();
    let uuid2 = uuid::Uuid::new_v4();
    let mut verifier_bytes = [0u8; 32];
    verifier_bytes[..16].copy_from_slice(uuid1.as_bytes());
    verifier_bytes[16..].copy_from_slice(uuid2.as_bytes());
    let verifier = URL_SAFE_NO_PAD.encode(verifier_bytes);

    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    let challenge = URL_SAFE_NO_PAD.encode(hasher.finalize());

    Pkce {
        verifier,
        challenge,
    }
}

/// Generates a random high loopback port for the callback listener.
pub fn random_local_port() -> u16 {
    let id = uuid::Uuid::new_v4();
    let bytes = id.as_bytes();
    let raw = u16::from_le_bytes([bytes[0], bytes[1]]);
    49152 + (raw % 16384)
}

/// Builds the redirect URI for a given loopback port.
pub fn build_redirect_uri(port: u16) -> String {
    format!("http://localhost:{port}{LOCAL_CALLBACK_PATH}")
}

/// Builds the consent URL the user's browser is sent to.
pub fn build_consent_url(pkce: &Pkce, state: &str, redirect_uri: &str) -> String {
    let params = [
        ("response_type", "code"),
        ("client_id", CLIENT_ID),
        ("redirect_uri", redirect_uri),
        ("scope", SCOPES),
        ("code_challenge", &pkce.challenge),
        ("code_challenge_method", "S256"),
        ("state", state),
        ("prompt", "select_account"),
    ];

    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();

    format!("{AUTHORIZE_URL}?{query}")
}

/// Everything the UI needs to drive one consent attempt.
///
/// `begin()` is pure (no I/O) so the reducer can construct it; the
/// gateway performs the waiting and exchanging.
pub struct GoogleConsent {
    pub url: String,
    pub(crate) pkce: Pkce,
    pub(crate) state: String,
    pub(crate) port: u16,
    pub(crate) redirect_uri: String,
}

// Manual Debug: the PKCE verifier must never end up in logs.
impl std::fmt::Debug for GoogleConsent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleConsent")
            .field("url", &self.url)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl GoogleConsent {
    /// Prepares a consent attempt: PKCE material, state nonce, loopback
    /// port, and the URL to open in the browser.
    pub fn begin() -> Self {
        let pkce = generate_pkce();
        let state = uuid::Uuid::new_v4().to_string();
        let port = random_local_port();
        let redirect_uri = build_redirect_uri(port);
        let url = build_consent_url(&pkce, &state, &redirect_uri);
        Self {
            url,
            pkce,
            state,
            port,
            redirect_uri,
        }
    }
}

/// Waits on the loopback listener for the consent redirect.
///
/// Resolves to the authorization code, or `AuthError::Cancelled` when
/// the token fires or the wait times out (the user walked away).
pub(crate) async fn wait_for_callback(
    consent: &GoogleConsent,
    cancel: &CancellationToken,
) -> Result<String, AuthError> {
    let listener = TcpListener::bind(("127.0.0.1", consent.port))
        .await
        .map_err(|e| AuthError::Provider(format!("Failed to bind callback listener: {e}")))?;

    let accept_loop = async {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return None;
            };
            let mut buffer = [0u8; 2048];
            let _ = stream.read(&mut buffer).await;
            let request = String::from_utf8_lossy(&buffer);
            let code = extract_code_from_request(&request, &consent.state);
            let response = match code.is_some() {
                true => consent_success_response(),
                false => consent_error_response(),
            };
            let _ = stream.write_all(response.as_bytes()).await;
            if code.is_some() {
                return code;
            }
            // Wrong path/state: keep listening until timeout or cancel.
        }
    };

    tokio::select! {
        () = cancel.cancelled() => Err(AuthError::Cancelled),
        () = tokio::time::sleep(CALLBACK_TIMEOUT) => Err(AuthError::Cancelled),
        code = accept_loop => code.ok_or(AuthError::Cancelled),
    }
}

/// Exchanges the authorization code for Google tokens.
///
/// # Errors
/// Returns an error if the exchange request fails or is rejected.
pub(crate) async fn exchange_code(
    http: &reqwest::Client,
    consent: &GoogleConsent,
    code: &str,
) -> Result<GoogleTokens> {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", "authorization_code")
        .append_pair("client_id", CLIENT_ID)
        .append_pair("client_secret", CLIENT_SECRET)
        .append_pair("code", code)
        .append_pair("code_verifier", &consent.pkce.verifier)
        .append_pair("redirect_uri", &consent.redirect_uri)
        .finish();

    let response = http
        .post(TOKEN_URL)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await
        .context("Failed to send token exchange request")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Token exchange failed (HTTP {status}): {body}");
    }

    response
        .json()
        .await
        .context("Failed to parse token response")
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleTokens {
    pub id_token: String,
}

fn extract_code_from_request(request: &str, expected_state: &str) -> Option<String> {
    let request_line = request.lines().next()?;
    let mut parts = request_line.split_whitespace();
    let _method = parts.next()?;
    let path = parts.next()?;

    let url = url::Url::parse(&format!("http://localhost{path}")).ok()?;
    if url.path() != LOCAL_CALLBACK_PATH {
        return None;
    }
    let state = url
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.to_string())?;
    if state != expected_state {
        return None;
    }
    url.query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.to_string())
}

fn consent_success_response() -> String {
    let body =
        "<html><body><h3>Sign-in complete</h3><p>You can close this window.</p></body></html>";
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    )
}

fn consent_error_response() -> String {
    let body =
        "<html><body><h3>Sign-in failed</h3><p>Please return to the terminal.</p></body></html>";
    format!(
        "HTTP/1.1 400 Bad Request\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pkce_challenge_is_sha256_of_verifier() {
        let pkce = generate_pkce();
        let mut hasher = Sha256::new();
        hasher.update(pkce.verifier.as_bytes());
        assert_eq!(pkce.challenge, URL_SAFE_NO_PAD.encode(hasher.finalize()));
    }

    #[test]
    fn consent_url_carries_challenge_and_state() {
        let pkce = generate_pkce();
        let url = build_consent_url(&pkce, "nonce-1", "http://localhost:50000/callback");
        assert!(url.starts_with(AUTHORIZE_URL));
        assert!(url.contains("code_challenge_method=S256"));
        assert!(url.contains("state=nonce-1"));
    }

    #[test]
    fn random_port_is_in_dynamic_range() {
        for _ in 0..32 {
            let port = random_local_port();
            assert!(port >= 49152);
        }
    }

    #[test]
    fn extracts_code_when_state_matches() {
        let request = "GET /callback?code=abc123&state=s1 HTTP/1.1\r\nHost: localhost\r\n\r\n";
        assert_eq!(
            extract_code_from_request(request, "s1").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn rejects_mismatched_state_or_path() {
        let wrong_state = "GET /callback?code=abc&state=evil HTTP/1.1\r\n\r\n";
        assert!(extract_code_from_request(wrong_state, "s1").is_none());
        let wrong_path = "GET /other?code=abc&state=s1 HTTP/1.1\r\n\r\n";
        assert!(extract_code_from_request(wrong_path, "s1").is_none());
    }

    #[tokio::test]
    async fn callback_wait_honors_cancellation() {
        let consent = GoogleConsent::begin();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = wait_for_callback(&consent, &cancel).await;
        assert!(matches!(result, Err(AuthError::Cancelled)));
    }
}
