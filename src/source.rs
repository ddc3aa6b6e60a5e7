//! Upstream contribution lookups.

use crate::models::{ContributionHistory, UpstreamResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

const USER_AGENT: &str = concat!("commit-garden/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("no contributions found for '{0}'")]
    NotFound(String),
    #[error("unexpected response shape: {0}")]
    Malformed(String),
    #[error("upstream request failed: {0}")]
    Network(String),
    #[error("upstream did not answer within {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait ContributionSource: Send + Sync {
    async fn fetch(&self, handle: &str) -> Result<ContributionHistory, LookupError>;
}

/// Fetches `{base}/{handle}?y=last` from the contributions API.
pub struct HttpSource {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, LookupError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| LookupError::Network(err.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn lookup_url(&self, handle: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::Malformed(format!("cannot extend {}", self.base_url)))?
            .pop_if_empty()
            .push(handle);
        url.query_pairs_mut().clear().append_pair("y", "last");
        Ok(url)
    }

    fn classify(&self, err: reqwest::Error) -> LookupError {
        if err.is_timeout() {
            LookupError::Timeout(self.timeout)
        } else if err.is_decode() {
            LookupError::Malformed(err.to_string())
        } else {
            LookupError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl ContributionSource for HttpSource {
    async fn fetch(&self, handle: &str) -> Result<ContributionHistory, LookupError> {
        let url = self.lookup_url(handle)?;
        info!(url = %url, "fetching contributions");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.classify(err))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(handle, status = status.as_u16(), "upstream lookup rejected");
            return Err(match status {
                StatusCode::GATEWAY_TIMEOUT | StatusCode::REQUEST_TIMEOUT => {
                    LookupError::Timeout(self.timeout)
                }
                _ => LookupError::NotFound(handle.to_string()),
            });
        }

        let bytes = resp.bytes().await.map_err(|err| self.classify(err))?;
        let raw: UpstreamResponse = serde_json::from_slice(&bytes)
            .map_err(|err| LookupError::Malformed(err.to_string()))?;

        info!(handle, days = raw.contributions.len(), "fetched contributions");
        Ok(raw.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> HttpSource {
        HttpSource::new(Url::parse(base).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn lookup_url_appends_handle_segment() {
        let src = source("https://github-contributions-api.jogruber.de/v4/");
        assert_eq!(
            src.lookup_url("octocat").unwrap().as_str(),
            "https://github-contributions-api.jogruber.de/v4/octocat?y=last"
        );

        let src = source("http://127.0.0.1:9000/v4");
        assert_eq!(
            src.lookup_url("octocat").unwrap().as_str(),
            "http://127.0.0.1:9000/v4/octocat?y=last"
        );
    }

    #[test]
    fn lookup_url_escapes_handle() {
        let src = source("http://127.0.0.1:9000/v4/");
        let url = src.lookup_url("../admin?x=1").unwrap();
        assert_eq!(url.path(), "/v4/..%2Fadmin%3Fx=1");
        assert_eq!(url.query(), Some("y=last"));
    }

    #[test]
    fn upstream_document_parses_with_extra_fields() {
        let raw = r#"{
            "total": {"2025": 400, "lastYear": 512},
            "contributions": [
                {"date": "2026-03-14", "count": 3, "level": 1},
                {"date": "2026-03-15", "count": 0, "level": 0}
            ]
        }"#;
        let parsed: UpstreamResponse = serde_json::from_str(raw).unwrap();
        let history = ContributionHistory::from(parsed);
        assert_eq!(history.total_last_year, 512);
        assert_eq!(history.contributions.len(), 2);
        assert_eq!(history.contributions[0].count, 3);
    }

    #[test]
    fn upstream_document_without_total_is_rejected() {
        let raw = r#"{"contributions": []}"#;
        assert!(serde_json::from_str::<UpstreamResponse>(raw).is_err());
    }
}
