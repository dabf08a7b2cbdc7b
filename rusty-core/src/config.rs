//! Environment configuration.

use std::{env, time::Duration};

use rusty_collectors::{CollectorOptions, DEFAULT_TIMEOUT_SECS};
use thiserror::Error;

use crate::parse::parse_duration;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DISCORD_TOKEN is not set")]
    MissingToken,
    #[error("{var} is not a valid duration: {value:?}")]
    InvalidDuration { var: &'static str, value: String },
}

/// Settings read once at startup.
#[derive(Clone)]
pub struct Config {
    pub token: String,
    /// Total lifetime of an interactive session.
    pub session_timeout: Duration,
    /// End a session after this long without a collected reaction.
    pub session_idle: Option<Duration>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("session_timeout", &self.session_timeout)
            .field("session_idle", &self.session_idle)
            .finish()
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let session_timeout = duration_var(&lookup, "SESSION_TIMEOUT")?
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let session_idle = duration_var(&lookup, "SESSION_IDLE")?;

        Ok(Self {
            token,
            session_timeout,
            session_idle,
        })
    }

    /// Collector limits applied to sessions started by commands.
    pub fn session_options(&self) -> CollectorOptions {
        let options = CollectorOptions::default().time(self.session_timeout);
        match self.session_idle {
            Some(idle) => options.idle(idle),
            None => options,
        }
    }
}

fn duration_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };

    parse_duration(&value)
        .map(Some)
        .ok_or(ConfigError::InvalidDuration { var, value })
}
