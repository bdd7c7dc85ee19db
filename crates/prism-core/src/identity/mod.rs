//! Identity boundary: the auth gateway over the hosted provider.
//!
//! ## Module Structure
//!
//! - `session.rs`: observed session state (`Session`, `Principal`)
//! - `error.rs`: the `AuthError` taxonomy
//! - `gateway.rs`: the `AuthGateway` facade (sign-up, sign-in, sign-out,
//!   restore, session observation)
//! - `google.rs`: federated consent plumbing (PKCE, consent URL,
//!   loopback callback, code exchange)
//! - `store.rs`: on-disk credential cache

mod error;
pub mod gateway;
pub mod google;
mod session;
mod store;

pub use error::AuthError;
pub use gateway::AuthGateway;
pub use google::GoogleConsent;
pub use session::{Principal, Session};
pub use store::{CachedCredentials, CredentialCache};
