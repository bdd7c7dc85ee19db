//! Project configuration for the PRISM client.
//!
//! The identity-provider project values come from `PRISM_*` environment
//! variables. A missing required value is a startup configuration error,
//! never a runtime one: `ProjectConfig::from_env` names every variable
//! that is absent so one pass fixes them all.

use std::env;
use std::fmt;

use anyhow::{Result, bail};
use serde::Serialize;

pub const ENV_API_KEY: &str = "PRISM_API_KEY";
pub const ENV_AUTH_DOMAIN: &str = "PRISM_AUTH_DOMAIN";
pub const ENV_PROJECT_ID: &str = "PRISM_PROJECT_ID";
pub const ENV_STORAGE_BUCKET: &str = "PRISM_STORAGE_BUCKET";
pub const ENV_MESSAGING_SENDER_ID: &str = "PRISM_MESSAGING_SENDER_ID";
pub const ENV_APP_ID: &str = "PRISM_APP_ID";
/// Optional `host:port` of a local auth emulator.
pub const ENV_EMULATOR_HOST: &str = "PRISM_AUTH_EMULATOR_HOST";

/// Emulator endpoint assumed when the auth domain is a local hostname.
const DEFAULT_EMULATOR_HOST: &str = "127.0.0.1:9099";

/// Identity-provider project configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    /// When set, all identity traffic goes to this local emulator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emulator_host: Option<String>,
}

impl ProjectConfig {
    /// Loads the configuration from the environment.
    ///
    /// # Errors
    /// Fails when any required `PRISM_*` variable is unset or empty,
    /// listing every missing variable in the message.
    pub fn from_env() -> Result<Self> {
        let mut missing = Vec::new();
        let api_key = read_required(ENV_API_KEY, &mut missing);
        let auth_domain = read_required(ENV_AUTH_DOMAIN, &mut missing);
        let project_id = read_required(ENV_PROJECT_ID, &mut missing);
        let storage_bucket = read_required(ENV_STORAGE_BUCKET, &mut missing);
        let messaging_sender_id = read_required(ENV_MESSAGING_SENDER_ID, &mut missing);
        let app_id = read_required(ENV_APP_ID, &mut missing);

        if !missing.is_empty() {
            bail!("missing required configuration: {}", missing.join(", "));
        }

        // Explicit emulator host wins; a local auth domain implies the
        // default emulator, matching how local development is expected
        // to run against the provider's emulator.
        let emulator_host = match read_optional(ENV_EMULATOR_HOST) {
            Some(host) => Some(host),
            None if is_local_host(&auth_domain) => Some(DEFAULT_EMULATOR_HOST.to_string()),
            None => None,
        };

        Ok(Self {
            api_key,
            auth_domain,
            project_id,
            storage_bucket,
            messaging_sender_id,
            app_id,
            emulator_host,
        })
    }

    /// Returns true when identity traffic targets a local emulator.
    pub fn uses_emulator(&self) -> bool {
        self.emulator_host.is_some()
    }

    /// The API key with all but a short prefix masked, safe for display.
    pub fn masked_api_key(&self) -> String {
        mask(&self.api_key)
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "project:   {}", self.project_id)?;
        writeln!(f, "domain:    {}", self.auth_domain)?;
        writeln!(f, "app:       {}", self.app_id)?;
        writeln!(f, "api key:   {}", self.masked_api_key())?;
        match &self.emulator_host {
            Some(host) => write!(f, "emulator:  {host}"),
            None => write!(f, "emulator:  (hosted)"),
        }
    }
}

fn read_required(name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match read_optional(name) {
        Some(value) => value,
        None => {
            missing.push(name);
            String::new()
        }
    }
}

fn read_optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns true for hostnames that indicate a local development run.
pub fn is_local_host(host: &str) -> bool {
    let host = host.split(':').next().unwrap_or(host);
    host == "localhost" || host == "127.0.0.1" || host.ends_with(".webcontainer.io")
}

fn mask(value: &str) -> String {
    if value.len() <= 8 {
        return "***".to_string();
    }
    format!("{}***", &value[..6])
}

pub mod paths {
    //! Path resolution for PRISM state directories.
    //!
    //! `PRISM_HOME` resolution order:
    //! 1. `PRISM_HOME` environment variable (if set)
    //! 2. `~/.config/prism` (default)

    use std::path::PathBuf;

    /// Returns the PRISM home directory.
    pub fn prism_home() -> PathBuf {
        if let Ok(home) = std::env::var("PRISM_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("prism"))
            .expect("Could not determine home directory")
    }

    /// Returns the path of the cached-session file.
    pub fn session_cache_path() -> PathBuf {
        prism_home().join("session.json")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        prism_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_REQUIRED: [(&str, Option<&str>); 6] = [
        (ENV_API_KEY, Some("AIzaTestKey0123456789")),
        (ENV_AUTH_DOMAIN, Some("prism-app.firebaseapp.com")),
        (ENV_PROJECT_ID, Some("prism-app")),
        (ENV_STORAGE_BUCKET, Some("prism-app.appspot.com")),
        (ENV_MESSAGING_SENDER_ID, Some("123456789")),
        (ENV_APP_ID, Some("1:123456789:web:abcdef")),
    ];

    fn with_env<R>(overrides: &[(&str, Option<&str>)], f: impl FnOnce() -> R) -> R {
        let mut vars: Vec<(&str, Option<&str>)> = ALL_REQUIRED.to_vec();
        vars.push((ENV_EMULATOR_HOST, None));
        for (name, value) in overrides {
            match vars.iter_mut().find(|(n, _)| n == name) {
                Some(slot) => slot.1 = *value,
                None => vars.push((*name, *value)),
            }
        }
        temp_env::with_vars(vars, f)
    }

    #[test]
    fn loads_with_all_required_values() {
        with_env(&[], || {
            let config = ProjectConfig::from_env().unwrap();
            assert_eq!(config.project_id, "prism-app");
            assert!(!config.uses_emulator());
        });
    }

    #[test]
    fn missing_values_are_all_named() {
        with_env(&[(ENV_API_KEY, None), (ENV_APP_ID, None)], || {
            let err = ProjectConfig::from_env().unwrap_err().to_string();
            assert!(err.contains(ENV_API_KEY), "{err}");
            assert!(err.contains(ENV_APP_ID), "{err}");
            assert!(!err.contains(ENV_PROJECT_ID), "{err}");
        });
    }

    #[test]
    fn empty_value_counts_as_missing() {
        with_env(&[(ENV_API_KEY, Some("  "))], || {
            let err = ProjectConfig::from_env().unwrap_err().to_string();
            assert!(err.contains(ENV_API_KEY), "{err}");
        });
    }

    #[test]
    fn local_auth_domain_selects_default_emulator() {
        with_env(&[(ENV_AUTH_DOMAIN, Some("localhost"))], || {
            let config = ProjectConfig::from_env().unwrap();
            assert_eq!(config.emulator_host.as_deref(), Some("127.0.0.1:9099"));
        });
    }

    #[test]
    fn explicit_emulator_host_wins() {
        with_env(
            &[
                (ENV_AUTH_DOMAIN, Some("localhost")),
                (ENV_EMULATOR_HOST, Some("127.0.0.1:9199")),
            ],
            || {
                let config = ProjectConfig::from_env().unwrap();
                assert_eq!(config.emulator_host.as_deref(), Some("127.0.0.1:9199"));
            },
        );
    }

    #[test]
    fn local_host_detection() {
        assert!(is_local_host("localhost"));
        assert!(is_local_host("localhost:5173"));
        assert!(is_local_host("xyz.webcontainer.io"));
        assert!(!is_local_host("prism-app.firebaseapp.com"));
    }

    #[test]
    fn api_key_is_masked_for_display() {
        with_env(&[], || {
            let config = ProjectConfig::from_env().unwrap();
            let shown = config.masked_api_key();
            assert!(shown.ends_with("***"));
            assert!(!shown.contains("0123456789"));
        });
    }
}
