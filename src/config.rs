use std::env;

use secrecy::{ExposeSecret as _, SecretString};
use url::Url;

use crate::Result;
use crate::error::Error;
use crate::policy::TimePolicy;

pub const HOST_ENV: &str = "WDB_HOST";
pub const SECRET_KEY_ENV: &str = "WDB_SECRET_KEY";

/// Connection settings for a [`Client`](crate::Client).
///
/// `host` may carry a mount prefix (`http://db:8000/wdb`); endpoint paths are
/// appended to it verbatim.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct Config {
    pub host: Url,
    pub secret_key: SecretString,
    pub time: TimePolicy,
}

impl Config {
    pub fn new(host: Url, secret_key: SecretString, time: TimePolicy) -> Result<Self> {
        if !matches!(host.scheme(), "http" | "https") {
            return Err(Error::validation(format!(
                "host must use http or https, got `{}`",
                host.scheme()
            )));
        }
        if host.cannot_be_a_base() {
            return Err(Error::validation(format!("host `{host}` cannot be a base url")));
        }
        if secret_key.expose_secret().is_empty() {
            return Err(Error::validation("secret key must not be empty"));
        }

        Ok(Self {
            host,
            secret_key,
            time,
        })
    }

    /// Parses plain strings, typically taken from app-level config.
    pub fn from_raw(host: &str, secret_key: &str) -> Result<Self> {
        let host = Url::parse(host.trim())?;
        Self::new(host, SecretString::from(secret_key.to_owned()), TimePolicy::default())
    }

    /// Reads `WDB_HOST` and `WDB_SECRET_KEY`.
    pub fn from_env() -> Result<Self> {
        let host = env::var(HOST_ENV)
            .map_err(|e| Error::validation(format!("{HOST_ENV}: {e}")))?;
        let secret = env::var(SECRET_KEY_ENV)
            .map_err(|e| Error::validation(format!("{SECRET_KEY_ENV}: {e}")))?;

        Self::from_raw(&host, &secret)
    }

    #[must_use]
    pub fn with_time_policy(mut self, time: TimePolicy) -> Self {
        self.time = time;
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.host.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }
}
