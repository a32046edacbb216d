use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::error::PruneError;
use crate::util;

/// Credentials for one git hosting service
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceCredentials {
    pub token: Option<String>,
    pub username: Option<String>,
}

/// Contents of the credentials file, one table per service:
///
/// ```toml
/// [github]
/// token = "..."
///
/// [github_enterprise]
/// token = "..."
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials(BTreeMap<String, ServiceCredentials>);

impl Credentials {
    /// Load the credentials file, a missing file means no credentials
    pub fn load(path: impl AsRef<Path>) -> Result<Credentials, PruneError> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no credentials found at {path:?}");
            return Ok(Credentials::default());
        }
        let contents = util::fs::read_from_path(path)?;
        Credentials::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Credentials, PruneError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn get(&self, service: &str) -> Option<&ServiceCredentials> {
        self.0.get(service)
    }

    /// The credentials section that applies to a git host
    pub fn service_for_host(host: &str) -> &'static str {
        let host = host.to_lowercase();
        if host == "github.com" {
            "github"
        } else if host.contains("gitlab") {
            "gitlab"
        } else if host.contains("bitbucket") {
            "bitbucket"
        } else {
            "github_enterprise"
        }
    }

    pub fn token_for_host(&self, host: &str) -> Option<&str> {
        self.get(Credentials::service_for_host(host))
            .and_then(|creds| creds.token.as_deref())
            .filter(|token| !token.is_empty())
    }

    /// The locker url with the matching token embedded, or the url unchanged
    /// when there is no token for its host.
    pub fn url_with_credentials(&self, locker_url: &str) -> Result<String, PruneError> {
        let mut url = Url::parse(locker_url)?;
        let Some(host) = url.host_str().map(String::from) else {
            return Ok(locker_url.to_string());
        };
        let Some(token) = self.token_for_host(&host) else {
            return Ok(locker_url.to_string());
        };
        let service = self.get(Credentials::service_for_host(&host));
        let set = match service.and_then(|creds| creds.username.as_deref()) {
            Some(username) => url
                .set_username(username)
                .and_then(|_| url.set_password(Some(token))),
            None => url.set_username(token),
        };
        set.map_err(|_| {
            PruneError::config(format!("unable to add credentials to {}", redact_url(locker_url)))
        })?;
        Ok(url.to_string())
    }
}

/// Hide any user or password in a url before it is logged or printed
pub fn redact_url(s: &str) -> String {
    let Ok(mut url) = Url::parse(s) else {
        return s.to_string();
    };
    if url.username().is_empty() && url.password().is_none() {
        return s.to_string();
    }
    let _ = url.set_username("***");
    let _ = url.set_password(None);
    url.to_string()
}
