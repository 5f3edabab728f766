use std::time::Duration;

use futures_util::StreamExt;
use playground_core::{sheet_path, DataOutcome, DataRequest, MetaOutcome};
use playground_logging::{playground_debug, playground_info, snippet};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::types::ServiceAccountPayload;
use crate::{classify_data, classify_meta, FailureKind, FetchError, RawResponse};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Absolute base of the backend, e.g. `http://127.0.0.1:4000`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    /// Cap on `/meta` and `/sheet_meta` bodies. Data bodies are read in full.
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:4000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            redirect_limit: 5,
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

impl FetchSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// The backend's three endpoints. Stage methods classify their own outcomes
/// and never fail.
#[async_trait::async_trait]
pub trait SheetApi: Send + Sync {
    /// `GET /meta`: contact e-mail of the backend's service account.
    async fn service_account(&self) -> Result<String, FetchError>;

    /// `GET /sheet_meta?sheet_url=...`
    async fn resolve_sheet(&self, sheet_url: &str) -> MetaOutcome;

    /// `GET /sheet/{id}?...`
    async fn fetch_data(&self, request: &DataRequest) -> DataOutcome;
}

#[derive(Debug, Clone)]
pub struct ReqwestSheetApi {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestSheetApi {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path_and_query: &str) -> Result<Url, FetchError> {
        let base = self.settings.base_url.trim_end_matches('/');
        Url::parse(&format!("{base}{path_and_query}"))
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn sheet_meta_url(&self, sheet_url: &str) -> Result<Url, FetchError> {
        let mut url = self.endpoint("/sheet_meta")?;
        // The backend decodes the parameter once more after query decoding.
        let encoded = urlencoding::encode(sheet_url);
        url.query_pairs_mut().append_pair("sheet_url", &encoded);
        Ok(url)
    }

    /// Issues a GET and reads the whole body, whatever the status. Bodies
    /// above `max_bytes` fail with [`FailureKind::TooLarge`] when a cap is given.
    async fn get(&self, url: Url, max_bytes: Option<u64>) -> Result<RawResponse, FetchError> {
        playground_debug!("GET {}", snippet(url.as_str()));
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        if let (Some(max_bytes), Some(content_len)) = (max_bytes, response.content_length()) {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if let Some(max_bytes) = max_bytes {
                if next_len > max_bytes {
                    return Err(too_large(max_bytes, next_len));
                }
            }
            bytes.extend_from_slice(&chunk);
        }

        playground_debug!("status={} bytes={}", status, bytes.len());
        Ok(RawResponse {
            status,
            content_type,
            bytes,
        })
    }
}

#[async_trait::async_trait]
impl SheetApi for ReqwestSheetApi {
    async fn service_account(&self) -> Result<String, FetchError> {
        let response = self
            .get(self.endpoint("/meta")?, Some(self.settings.max_bytes))
            .await?;
        if response.status != 200 {
            return Err(FetchError::new(
                FailureKind::HttpStatus(response.status),
                String::from_utf8_lossy(&response.bytes).into_owned(),
            ));
        }
        let payload: ServiceAccountPayload = serde_json::from_slice(&response.bytes)
            .map_err(|err| FetchError::new(FailureKind::MalformedBody, err.to_string()))?;
        Ok(payload.service_account)
    }

    async fn resolve_sheet(&self, sheet_url: &str) -> MetaOutcome {
        playground_info!("resolving sheet url {}", snippet(sheet_url));
        let result = match self.sheet_meta_url(sheet_url) {
            Ok(url) => self.get(url, Some(self.settings.max_bytes)).await,
            Err(err) => Err(err),
        };
        classify_meta(result)
    }

    async fn fetch_data(&self, request: &DataRequest) -> DataOutcome {
        playground_info!("fetching {}", request.api_url);
        let path = sheet_path(&request.spreadsheet_id, &request.query);
        // Every received answer is shown, so the data body is not capped.
        let result = match self.endpoint(&path) {
            Ok(url) => self.get(url, None).await,
            Err(err) => Err(err),
        };
        classify_data(result)
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
