use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::{OracleRequest, OracleResponse};
use crate::error::OracleError;

const SCORE_PATH: &str = "recommend/resources";
const HEALTH_PATH: &str = "recommend/health";
/// Upper bound on how much of an error body ends up in logs.
const MAX_ERROR_BODY: usize = 512;

/// The external scoring service.
#[async_trait]
pub trait ScoringOracle: Send + Sync {
    /// Score the payload. One attempt; the caller decides what failure means.
    async fn score(&self, request: &OracleRequest) -> Result<OracleResponse, OracleError>;

    /// Ask the service whether it is up.
    async fn health(&self) -> Result<OracleHealth, OracleError>;
}

/// Body of `GET /recommend/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleHealth {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl OracleHealth {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

/// [`ScoringOracle`] over HTTP with a hard per-call timeout.
#[derive(Debug, Clone)]
pub struct HttpScoringOracle {
    base_url: Url,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpScoringOracle {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, OracleError> {
        // A base without a trailing slash would lose its last segment on join.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| OracleError::Client(format!("invalid oracle url {base_url:?}: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::Client(e.to_string()))?;
        Ok(Self {
            base_url,
            timeout,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self, path: &str) -> Result<Url, OracleError> {
        self.base_url
            .join(path)
            .map_err(|e| OracleError::Client(format!("invalid oracle endpoint {path}: {e}")))
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, OracleError> {
        let status = resp.status();
        if !status.is_success() {
            let mut body = resp.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| body.is_char_boundary(*i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| OracleError::from_reqwest(e, self.timeout))?;
        serde_json::from_slice(&bytes).map_err(|e| OracleError::Malformed(e.to_string()))
    }

    /// Run `fut` under the configured timeout. The client timeout covers the
    /// transfer; this also bounds time spent reading and decoding the body.
    async fn bounded<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T, OracleError>>,
    ) -> Result<T, OracleError> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| OracleError::Timeout(self.timeout))?
    }
}

#[async_trait]
impl ScoringOracle for HttpScoringOracle {
    async fn score(&self, request: &OracleRequest) -> Result<OracleResponse, OracleError> {
        let url = self.endpoint(SCORE_PATH)?;
        self.bounded(async {
            let resp = self
                .client
                .post(url)
                .json(request)
                .send()
                .await
                .map_err(|e| OracleError::from_reqwest(e, self.timeout))?;
            self.read_json(resp).await
        })
        .await
    }

    async fn health(&self) -> Result<OracleHealth, OracleError> {
        let url = self.endpoint(HEALTH_PATH)?;
        self.bounded(async {
            let resp = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| OracleError::from_reqwest(e, self.timeout))?;
            self.read_json(resp).await
        })
        .await
    }
}
