//! Core library for the PRISM terminal client.
//!
//! Holds everything that is not terminal UI: project configuration, the
//! auth gateway over the hosted identity provider, session observation,
//! and the credential cache.

pub mod config;
pub mod identity;
