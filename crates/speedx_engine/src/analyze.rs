use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};
use speedx_logging::{speedx_info, speedx_trace, speedx_warn};
use url::Url;

use crate::{AnalyzeError, FailureKind, Metrics, SettingsError};

/// Origin of the hosted analysis service.
pub const DEFAULT_ORIGIN: &str = "https://speed-backend.onrender.com";

const ANALYZE_PATH: &str = "analyze";

#[derive(Debug, Clone)]
pub struct AnalyzeSettings {
    /// Full URL the POST goes to, `<origin>/analyze`.
    pub endpoint: Url,
    /// `None` waits for the service indefinitely.
    pub request_timeout: Option<Duration>,
}

impl AnalyzeSettings {
    pub fn from_origin(origin: &str) -> Result<Self, SettingsError> {
        let invalid = |reason: String| SettingsError::InvalidOrigin {
            origin: origin.to_string(),
            reason,
        };
        let base = origin.trim().trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}/{ANALYZE_PATH}"))
            .map_err(|err| invalid(err.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", endpoint.scheme())));
        }
        Ok(Self {
            endpoint,
            request_timeout: None,
        })
    }
}

#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    /// Runs one analysis of `url`. Never retries.
    async fn analyze(&self, url: &str) -> Result<Metrics, AnalyzeError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalyzer {
    settings: AnalyzeSettings,
}

impl ReqwestAnalyzer {
    pub fn new(settings: AnalyzeSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, AnalyzeError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|_| AnalyzeError::new(FailureKind::Network))
    }
}

#[async_trait::async_trait]
impl Analyzer for ReqwestAnalyzer {
    async fn analyze(&self, url: &str) -> Result<Metrics, AnalyzeError> {
        let client = self.build_client()?;
        let body = json!({ "url": url }).to_string();

        speedx_info!(
            "POST {} url_len={} url={}",
            self.settings.endpoint,
            url.len(),
            url
        );
        let response = client
            .post(self.settings.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        speedx_trace!("Response status={} body_len={}", status, bytes.len());

        // A body that is not JSON is a transport failure even on an error status.
        let parsed: Value = serde_json::from_slice(&bytes)
            .map_err(|_| AnalyzeError::new(FailureKind::InvalidBody))?;

        if status.is_success() {
            // Only a JSON object can be shown as metric cards; anything else is malformed.
            match parsed {
                Value::Object(metrics) => Ok(metrics),
                _ => {
                    speedx_warn!("Success body from {} is not a JSON object", url);
                    Err(AnalyzeError::new(FailureKind::InvalidBody))
                }
            }
        } else {
            let error = parsed
                .get("error")
                .and_then(Value::as_str)
                .map(ToOwned::to_owned);
            Err(AnalyzeError::new(FailureKind::HttpStatus {
                status: status.as_u16(),
                error,
            }))
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AnalyzeError {
    if err.is_timeout() {
        return AnalyzeError::new(FailureKind::Timeout);
    }
    if err.is_body() || err.is_decode() {
        return AnalyzeError::new(FailureKind::InvalidBody);
    }
    AnalyzeError::new(FailureKind::Network)
}
