//! Client for the Context7 MCP documentation-search service.
//!
//! When no API key is configured, or the service fails, callers are
//! expected to answer from the built-in best-practices table instead
//! and mark the response source accordingly.

use serde::Serialize;

/// Errors from the Context7 service.
#[derive(Debug, thiserror::Error)]
pub enum Context7Error {
    /// No API key is configured.
    #[error("Context7 is not configured")]
    MissingKey,

    /// The HTTP request itself failed.
    #[error("Context7 request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("Context7 returned {status}: {message}")]
    Provider { status: u16, message: String },
}

/// Parameters for a documentation search.
#[derive(Debug, Serialize)]
pub struct SearchParams<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<&'a str>,
}

pub struct Context7Client {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl Context7Client {
    pub fn new(http: reqwest::Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search Context7 documentation. Returns the provider's raw JSON.
    pub async fn search(
        &self,
        query: &str,
        library: Option<&str>,
    ) -> Result<serde_json::Value, Context7Error> {
        let key = self.api_key.as_deref().ok_or(Context7Error::MissingKey)?;

        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .bearer_auth(key)
            .json(&SearchParams { query, library })
            .send()
            .await
            .map_err(|e| Context7Error::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Context7Error::Provider {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| Context7Error::Request(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_client_reports_missing_key() {
        let client = Context7Client::new(
            reqwest::Client::new(),
            "http://localhost:8700".to_string(),
            None,
        );
        assert!(!client.is_configured());
    }

    #[test]
    fn search_params_omit_absent_library() {
        let params = SearchParams {
            query: "instagram reels",
            library: None,
        };
        let value = serde_json::to_value(&params).unwrap();
        assert!(value.get("library").is_none());
    }
}
