//! The auth gateway facade.
//!
//! `AuthGateway` presents a uniform capability set — email sign-up/sign-in,
//! Google sign-in, sign-out, session restore — regardless of which provider
//! mechanism backs each one, and publishes the observed session on a watch
//! channel. Nothing outside this type writes session state.
//!
//! The wire surface is the hosted identity toolkit REST API; when the
//! configuration selects a local emulator, the same paths are served from
//! the emulator host.

use anyhow::Result;
use serde::Deserialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::ProjectConfig;

use super::google::{self, GoogleConsent};
use super::{AuthError, CachedCredentials, CredentialCache, Principal, Session};

const HOSTED_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const HOSTED_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// Facade over the hosted identity provider.
pub struct AuthGateway {
    http: reqwest::Client,
    api_key: String,
    identity_url: String,
    token_url: String,
    cache: CredentialCache,
    session_tx: watch::Sender<Session>,
}

impl AuthGateway {
    /// Creates a gateway for the given project, publishing
    /// `Session::Unknown` until `restore_session` resolves it.
    pub fn new(config: &ProjectConfig, cache: CredentialCache) -> Self {
        let (identity_url, token_url) = match &config.emulator_host {
            Some(host) => (
                format!("http://{host}/identitytoolkit.googleapis.com/v1"),
                format!("http://{host}/securetoken.googleapis.com/v1"),
            ),
            None => (HOSTED_IDENTITY_URL.to_string(), HOSTED_TOKEN_URL.to_string()),
        };
        let (session_tx, _) = watch::channel(Session::Unknown);

        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            identity_url,
            token_url,
            cache,
            session_tx,
        }
    }

    /// Returns a receiver observing session changes.
    ///
    /// Consumers subscribe to this; they never poll the provider.
    pub fn session(&self) -> watch::Receiver<Session> {
        self.session_tx.subscribe()
    }

    /// The currently observed session.
    pub fn current_session(&self) -> Session {
        self.session_tx.borrow().clone()
    }

    /// Creates an account with the provider and establishes a session.
    pub async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Principal, AuthError> {
        let grant = self
            .credential_request(
                "signUp",
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Ok(self.establish(grant))
    }

    /// Verifies email/password with the provider and establishes a session.
    pub async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Principal, AuthError> {
        let grant = self
            .credential_request(
                "signInWithPassword",
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Ok(self.establish(grant))
    }

    /// Completes an interactive Google consent flow and establishes a
    /// session from the resulting federated identity.
    ///
    /// The caller opens `consent.url` in a browser; this waits on the
    /// loopback redirect, exchanges the code for a Google ID token, and
    /// presents it to the provider. Cancelling `cancel` (or abandoning
    /// the browser flow) yields `AuthError::Cancelled`.
    pub async fn sign_in_with_google(
        &self,
        consent: GoogleConsent,
        cancel: CancellationToken,
    ) -> Result<Principal, AuthError> {
        let code = google::wait_for_callback(&consent, &cancel).await?;
        let tokens = google::exchange_code(&self.http, &consent, &code)
            .await
            .map_err(|e| AuthError::Provider(format!("{e:#}")))?;

        let post_body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("id_token", &tokens.id_token)
            .append_pair("providerId", "google.com")
            .finish();
        let grant = self
            .credential_request(
                "signInWithIdp",
                serde_json::json!({
                    "postBody": post_body,
                    "requestUri": "http://localhost",
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Ok(self.establish(grant))
    }

    /// Clears the local session observation.
    ///
    /// Idempotent: signing out with no active session is a no-op.
    ///
    /// # Errors
    /// Returns an error only if removing the credential cache fails.
    pub fn sign_out(&self) -> Result<()> {
        let had_session = self.cache.clear()?;
        let was_signed_in = self.session_tx.borrow().is_authenticated();
        self.session_tx.send_replace(Session::SignedOut);
        if had_session || was_signed_in {
            info!("signed out");
        }
        Ok(())
    }

    /// Resolves the startup session state from cached credentials.
    ///
    /// Always moves the session out of `Unknown`: a valid refresh token
    /// re-establishes the session, anything else resolves to `SignedOut`.
    pub async fn restore_session(&self) -> Session {
        let cached = match self.cache.load() {
            Ok(Some(cached)) => cached,
            Ok(None) => {
                return self.publish(Session::SignedOut);
            }
            Err(e) => {
                warn!("failed to read session cache: {e:#}");
                return self.publish(Session::SignedOut);
            }
        };

        match self.refresh_credentials(&cached).await {
            Ok(principal) => {
                info!(uid = %principal.uid, "session restored");
                self.publish(Session::SignedIn(principal))
            }
            Err(e) => {
                warn!("session restore failed: {e}");
                let _ = self.cache.clear();
                self.publish(Session::SignedOut)
            }
        }
    }

    async fn refresh_credentials(
        &self,
        cached: &CachedCredentials,
    ) -> Result<Principal, AuthError> {
        let url = format!("{}/token?key={}", self.token_url, self.api_key);
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "refresh_token")
            .append_pair("refresh_token", &cached.refresh_token)
            .finish();

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            return Err(provider_rejection(response).await);
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Provider(format!("Malformed refresh response: {e}")))?;

        let principal = Principal {
            uid: refreshed.user_id,
            email: cached.email.clone(),
        };
        // The provider may rotate the refresh token; keep the cache current.
        let rotated = CachedCredentials {
            refresh_token: refreshed.refresh_token,
            uid: principal.uid.clone(),
            email: principal.email.clone(),
        };
        if let Err(e) = self.cache.save(&rotated) {
            warn!("failed to update session cache: {e:#}");
        }
        Ok(principal)
    }

    /// Posts a credential operation (`accounts:<op>`) and parses the grant.
    async fn credential_request(
        &self,
        op: &str,
        body: serde_json::Value,
    ) -> Result<TokenGrant, AuthError> {
        let url = format!("{}/accounts:{op}?key={}", self.identity_url, self.api_key);
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            return Err(provider_rejection(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::Provider(format!("Malformed provider response: {e}")))
    }

    /// Caches the grant and publishes the signed-in session.
    fn establish(&self, grant: TokenGrant) -> Principal {
        let principal = Principal {
            uid: grant.local_id,
            email: grant.email.filter(|e| !e.is_empty()),
        };
        let cached = CachedCredentials {
            refresh_token: grant.refresh_token,
            uid: principal.uid.clone(),
            email: principal.email.clone(),
        };
        if let Err(e) = self.cache.save(&cached) {
            warn!("failed to persist session: {e:#}");
        }
        info!(uid = %principal.uid, "signed in");
        self.session_tx
            .send_replace(Session::SignedIn(principal.clone()));
        principal
    }

    fn publish(&self, session: Session) -> Session {
        self.session_tx.send_replace(session.clone());
        session
    }
}

/// Maps a non-success provider response to the error taxonomy.
async fn provider_rejection(response: reqwest::Response) -> AuthError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ProviderErrorBody>(&body) {
        Ok(parsed) => AuthError::from_provider_code(&parsed.error.message),
        Err(_) => AuthError::Provider(format!("HTTP {status}: {body}")),
    }
}

/// A successful credential grant (`signUp`, `signInWithPassword`,
/// `signInWithIdp` all share this shape).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenGrant {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    refresh_token: String,
}

/// Secure-token refresh response (snake_case on the wire).
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    user_id: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: String,
}
