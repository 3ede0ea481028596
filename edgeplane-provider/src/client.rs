//! HTTP client wrapper shared by the API families
//!
//! Request signing is not done here: callers hand in a `reqwest::Client`
//! already configured for authentication.

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use edgeplane_core::config::ProviderConfig;

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Error returned by the upstream API clients
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0} not found")]
    NotFound(String),

    /// Problem-details error returned by the API
    #[error("API error {status}: {title}{}", detail.as_deref().map(|d| format!(" ({})", d)).unwrap_or_default())]
    Api {
        status: u16,
        title: String,
        detail: Option<String>,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, serde::Deserialize, Default)]
struct Problem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Truncate a response body and drop non-printable characters for logging
fn sanitize_for_log(body: &str) -> String {
    let truncated: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
    let truncated = if truncated.len() < body.len() {
        format!("{}... [truncated, {} bytes total]", truncated, body.len())
    } else {
        truncated
    };
    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// JSON REST client bound to one API host
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    account_switch_key: Option<String>,
}

impl RestClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            account_switch_key: None,
        }
    }

    pub fn with_account_switch_key(mut self, key: Option<String>) -> Self {
        self.account_switch_key = key;
        self
    }

    /// Client with timeout and user agent taken from the provider configuration
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self::new(http, config.host.clone())
            .with_account_switch_key(config.account_switch_key.clone()))
    }

    fn request(&self, method: Method, path: &str, query: &[(&str, String)]) -> Result<RequestBuilder, ClientError> {
        if !path.starts_with('/') {
            return Err(ClientError::InvalidUrl(path.to_string()));
        }
        let url = format!("{}{}", self.base_url, path);
        log::debug!("{} {}", method, url);
        let mut request = self.http.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(key) = &self.account_switch_key {
            request = request.query(&[("accountSwitchKey", key)]);
        }
        Ok(request)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ClientError> {
        let request = self.request(Method::GET, path, query)?;
        self.send(path, request).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T, ClientError> {
        let request = self.request(Method::POST, path, query)?.json(body);
        self.send(path, request).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ClientError> {
        let request = self.request(Method::PUT, path, &[])?.json(body);
        self.send(path, request).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.request(Method::DELETE, path, &[])?;
        self.send(path, request).await
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            log::error!("API error: {} - {}", status, sanitize_for_log(&body));
            let problem: Problem = serde_json::from_str(&body).unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                title: problem
                    .title
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
                detail: problem.detail,
            });
        }

        // Empty bodies decode as null (unit, Option)
        if body.trim().is_empty() {
            return Ok(serde_json::from_str("null")?);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let logged = sanitize_for_log(&body);
        assert!(logged.starts_with(&"x".repeat(200)));
        assert!(logged.ends_with("[truncated, 500 bytes total]"));
        assert_eq!(sanitize_for_log("ok\n"), "ok");
    }

    #[test]
    fn api_error_display_includes_detail() {
        let err = ClientError::Api {
            status: 400,
            title: "Invalid input".to_string(),
            detail: Some("action must be one of deny, alert, none".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "API error 400: Invalid input (action must be one of deny, alert, none)"
        );
    }

    #[test]
    fn relative_paths_are_rejected() {
        let client = RestClient::new(Client::new(), "https://api.example.net/");
        assert!(matches!(
            client.request(Method::GET, "appsec/v1/configs", &[]),
            Err(ClientError::InvalidUrl(_))
        ));
        assert_eq!(client.base_url, "https://api.example.net");
    }
}
