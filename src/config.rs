use std::{
    collections::BTreeMap,
    fmt::{Debug, Formatter},
    time::Duration,
};

use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use reqwest::{
    Url,
    header::{HeaderName, HeaderValue},
};
use serde::Deserialize;

use crate::error;

const REDACTED: &str = "<redacted>";

/// Process configuration read from the environment.
#[derive(Clone, Deserialize)]
pub struct Config {
    pub listmonk_host: String,
    pub listmonk_username: Option<String>,
    pub listmonk_password: Option<String>,
    /// JSON object of extra header names to values.
    pub listmonk_headers: Option<String>,
    pub listmonk_timeout_seconds: Option<u64>,

    #[serde(default = "default_server_port")]
    pub server_port: u16,
}

fn default_server_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        let config = envy::from_env::<Self>()
            .map_err(|e| anyhow!("Invalid or missing environmental variable: {}", e))?;
        Ok(config)
    }

    pub fn provider_config(&self) -> Result<ProviderConfig, Error> {
        let headers = match self.listmonk_headers.as_deref() {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(raw)
                .map_err(|e| anyhow!("LISTMONK_HEADERS must be a JSON object of strings: {}", e))?,
            _ => BTreeMap::new(),
        };

        Ok(ProviderConfig {
            host: self.listmonk_host.clone(),
            username: self.listmonk_username.clone(),
            password: self.listmonk_password.clone(),
            headers,
            timeout: self.listmonk_timeout_seconds.map(Duration::from_secs),
        })
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("listmonk_host", &self.listmonk_host)
            .field("listmonk_username", &self.listmonk_username)
            .field("listmonk_password", &self.listmonk_password.as_ref().map(|_| REDACTED))
            .field("listmonk_headers", &self.listmonk_headers.as_ref().map(|_| REDACTED))
            .field("listmonk_timeout_seconds", &self.listmonk_timeout_seconds)
            .field("server_port", &self.server_port)
            .finish()
    }
}

/// Declared provider configuration for one session.
///
/// Header values are sent exactly as given. Entries are applied in key order
/// after `Content-Type`, so a configured `Content-Type` replaces the default.
#[derive(Clone, Default, Deserialize)]
pub struct ProviderConfig {
    pub host: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

impl ProviderConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Host with any trailing slash removed, so paths can be appended.
    pub fn base_url(&self) -> &str {
        self.host.trim().trim_end_matches('/')
    }

    pub fn has_credentials(&self) -> bool {
        self.username.is_some() || self.password.is_some()
    }

    pub fn validate(&self) -> error::Result<()> {
        let base_url = self.base_url();
        if base_url.is_empty() {
            return Err(error::Error::Config("host must not be empty".to_string()));
        }

        let url = Url::parse(base_url)
            .map_err(|e| error::Error::Config(format!("host {:?} is not a valid URL: {}", base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(error::Error::Config(format!(
                "host {:?} must use http or https",
                base_url
            )));
        }

        for (name, value) in &self.headers {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| error::Error::Config(format!("invalid header name {:?}", name)))?;
            HeaderValue::from_str(value)
                .map_err(|_| error::Error::Config(format!("invalid value for header {:?}", name)))?;
        }

        Ok(())
    }
}

impl Debug for ProviderConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> = self.headers.keys().map(String::as_str).collect();

        f.debug_struct("ProviderConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("headers", &header_names)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_headers(headers: Option<&str>) -> Config {
        Config {
            listmonk_host: "http://localhost:9000/".to_string(),
            listmonk_username: Some("listmonk".to_string()),
            listmonk_password: Some("hunter2".to_string()),
            listmonk_headers: headers.map(str::to_string),
            listmonk_timeout_seconds: Some(5),
            server_port: 8080,
        }
    }

    #[test]
    fn provider_config_parses_header_json() {
        let config = config_with_headers(Some(r#"{"X-Tenant": "\"acme\""}"#));
        let provider = config.provider_config().unwrap();

        assert_eq!(provider.headers.get("X-Tenant").map(String::as_str), Some("\"acme\""));
        assert_eq!(provider.timeout, Some(Duration::from_secs(5)));
        assert_eq!(provider.base_url(), "http://localhost:9000");
    }

    #[test]
    fn provider_config_rejects_malformed_headers() {
        let config = config_with_headers(Some("X-Tenant=acme"));
        assert!(config.provider_config().is_err());
    }

    #[test]
    fn validate_rejects_empty_and_non_http_hosts() {
        assert!(ProviderConfig::new("").validate().is_err());
        assert!(ProviderConfig::new("ftp://listmonk.local").validate().is_err());
        assert!(ProviderConfig::new("not a url").validate().is_err());
        assert!(ProviderConfig::new("https://listmonk.example.com").validate().is_ok());
    }

    #[test]
    fn validate_rejects_invalid_header_names() {
        let config = ProviderConfig::new("http://localhost:9000").with_header("bad header", "v");
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = config_with_headers(Some(r#"{"X-Api-Key": "secret-key"}"#));
        let provider = config.provider_config().unwrap();

        let rendered = format!("{:?} {:?}", config, provider);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("X-Api-Key"));
    }
}
