use std::env;
use std::fmt;

use crate::config::load_config;
use crate::constants::{ENV_APP_PASSWORD, ENV_USERNAME};
use crate::error::BbResult;

/// Username and app password used for Basic auth.
#[derive(Clone, PartialEq, Default)]
pub struct Credentials {
    pub username: String,
    pub app_password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, app_password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            app_password: app_password.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.app_password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("app_password", &"<redacted>")
            .finish()
    }
}

/// Source of credentials, consulted once per request.
pub trait CredentialProvider: Send + Sync {
    fn credentials(&self) -> BbResult<Credentials>;
}

/// Fixed credentials, handy when they were passed explicitly.
pub struct StaticCredentials(pub Credentials);

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> BbResult<Credentials> {
        Ok(self.0.clone())
    }
}

/// Reads `BB_USERNAME`/`BB_APP_PASSWORD`, then the config file.
///
/// Nothing is cached: every call goes back to the environment and disk, so a
/// credential change made by `bbissues auth` is picked up by the next request.
/// Missing credentials resolve to empty strings and let the server reject them.
#[derive(Default)]
pub struct ConfigCredentials;

impl CredentialProvider for ConfigCredentials {
    fn credentials(&self) -> BbResult<Credentials> {
        if let (Ok(username), Ok(app_password)) = (env::var(ENV_USERNAME), env::var(ENV_APP_PASSWORD)) {
            return Ok(Credentials::new(username, app_password));
        }

        let stored = load_config().auth_credentials.unwrap_or_default();
        Ok(Credentials::new(stored.bb_username, stored.bb_app_password))
    }
}
