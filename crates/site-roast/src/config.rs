//! Audit configuration and its resolution from flags and environment.

use serde::{Deserialize, Serialize};

use crate::types::{RoastError, RoastResult};

/// Environment variable overriding the request timeout (seconds).
pub const TIMEOUT_ENV: &str = "SITE_ROAST_TIMEOUT";
/// Environment variable overriding the User-Agent header.
pub const USER_AGENT_ENV: &str = "SITE_ROAST_USER_AGENT";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "site-roast/1.0 (Website Auditor)";

/// Settings for a single audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent sent with the page request.
    pub user_agent: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AuditConfig {
    /// Resolve the configuration: explicit value > environment > default.
    pub fn resolve(timeout_secs: Option<u64>, user_agent: Option<&str>) -> RoastResult<Self> {
        Self::resolve_with(timeout_secs, user_agent, |key| std::env::var(key).ok())
    }

    /// Same as [`AuditConfig::resolve`] with an injectable environment lookup.
    pub fn resolve_with(
        timeout_secs: Option<u64>,
        user_agent: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> RoastResult<Self> {
        let defaults = Self::default();

        let timeout_secs = match timeout_secs {
            Some(t) => t,
            None => match env(TIMEOUT_ENV) {
                Some(raw) => match raw.trim().parse::<u64>() {
                    Ok(t) => t,
                    Err(_) => {
                        tracing::warn!("ignoring unparsable {TIMEOUT_ENV}={raw:?}");
                        defaults.timeout_secs
                    }
                },
                None => defaults.timeout_secs,
            },
        };

        let user_agent = user_agent
            .map(str::to_string)
            .or_else(|| env(USER_AGENT_ENV).filter(|ua| !ua.trim().is_empty()))
            .unwrap_or(defaults.user_agent);

        let config = Self {
            timeout_secs,
            user_agent,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RoastResult<()> {
        if self.timeout_secs == 0 {
            return Err(RoastError::InvalidConfig(
                "timeout must be at least one second".to_string(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(RoastError::InvalidConfig(
                "user agent must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
