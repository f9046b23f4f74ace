use anyhow::{anyhow, Result};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Not logged in. Use 'cf login' to log in.")]
pub struct NotLoggedIn;

/// The authenticated context commands run under.
pub trait Session {
    fn is_logged_in(&self) -> bool;

    /// The name of the user the session is authenticated as.
    fn current_username(&self) -> Result<String>;
}

/// A session read from the stored configuration of the default host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSession {
    pub host: String,
    pub token: String,
    user: String,
}

impl ConfigSession {
    pub fn from_config(config: &dyn crate::config::Config) -> Self {
        let host = match config.default_host() {
            Ok(host) => host,
            Err(err) => {
                log::debug!("no default host: {}", err);
                return ConfigSession::default();
            }
        };

        ConfigSession {
            token: config.get(&host, "token").unwrap_or_default(),
            user: config.get(&host, "user").unwrap_or_default(),
            host,
        }
    }
}

impl Session for ConfigSession {
    fn is_logged_in(&self) -> bool {
        !self.host.is_empty() && !self.token.is_empty()
    }

    fn current_username(&self) -> Result<String> {
        if let Some(name) = username_from_token(&self.token) {
            return Ok(name);
        }

        if !self.user.is_empty() {
            return Ok(self.user.to_string());
        }

        Err(anyhow!("could not determine the current user for {}", self.host))
    }
}

pub fn strip_bearer(token: &str) -> &str {
    token
        .strip_prefix("bearer ")
        .or_else(|| token.strip_prefix("Bearer "))
        .unwrap_or(token)
}

#[derive(Debug, Deserialize)]
struct TokenClaims {
    user_name: Option<String>,
}

// username_from_token reads the user_name claim out of a UAA access token.
fn username_from_token(token: &str) -> Option<String> {
    let payload = strip_bearer(token).split('.').nth(1)?;
    let decoded = base64::decode_config(payload, base64::URL_SAFE_NO_PAD).ok()?;
    let claims: TokenClaims = serde_json::from_slice(&decoded).ok()?;

    claims.user_name.filter(|name| !name.is_empty())
}
