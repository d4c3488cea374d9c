use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{ApiError, ApiFailureKind, QueueEntry};

/// All service routes hang off this prefix.
pub const API_PREFIX: &str = "/api";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable overriding the service base origin.
pub const BASE_URL_ENV: &str = "STORYREEL_API_BASE";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Per-request deadline; generation responses can take minutes.
    pub request_timeout: Duration,
    /// Cadence of the background queue poll.
    pub poll_interval: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            poll_interval: Duration::from_secs(8),
        }
    }
}

impl ApiSettings {
    /// Reads the base origin from the environment, leaving everything else
    /// at its default.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(BASE_URL_ENV)
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            ..Self::default()
        }
    }
}

/// The remote service boundary: text extraction, clip generation, platform
/// upload, queue snapshot, repost. Implementations own transport concerns;
/// callers see `ApiError` with a displayable message.
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    async fn extract_text(&self, file: &Path) -> Result<String, ApiError>;
    async fn generate_single(&self, caption: &str) -> Result<String, ApiError>;
    async fn generate_multi(&self, caption: &str) -> Result<Vec<String>, ApiError>;
    async fn enqueue_upload(&self, video_url: &str, caption: &str) -> Result<(), ApiError>;
    async fn fetch_queue(&self) -> Result<Vec<QueueEntry>, ApiError>;
    async fn repost_top_reels(&self) -> Result<serde_json::Value, ApiError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    caption: &'a str,
}

#[derive(Serialize)]
struct UploadRequest<'a> {
    #[serde(rename = "videoUrl")]
    video_url: &'a str,
    caption: &'a str,
}

#[derive(Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct SingleGenerationResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct MultiGenerationResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    files: Option<Vec<String>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct QueueResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    queue: Vec<QueueEntry>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    http: reqwest::Client,
    settings: ApiSettings,
}

impl ReqwestApiClient {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailureKind::Network, err.to_string()))?;
        Ok(Self { http, settings })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.settings.base_url, API_PREFIX, path)
    }

    /// Sends a request and maps any non-success outcome to `ApiError`. A
    /// JSON `{ "error": ... }` body takes precedence over the status line
    /// as the surfaced message.
    async fn send_checked(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| status.to_string());
        Err(ApiError::new(
            ApiFailureKind::HttpStatus(status.as_u16()),
            message,
        ))
    }
}

#[async_trait::async_trait]
impl ApiClient for ReqwestApiClient {
    async fn extract_text(&self, file: &Path) -> Result<String, ApiError> {
        let bytes = tokio::fs::read(file).await.map_err(|err| {
            ApiError::new(
                ApiFailureKind::Io,
                format!("cannot read {}: {err}", file.display()),
            )
        })?;
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", reqwest::multipart::Part::bytes(bytes).file_name(file_name));

        let response = self
            .send_checked(self.http.post(self.endpoint("/extract")).multipart(form))
            .await?;
        let payload: ExtractResponse = response.json().await.map_err(invalid_response)?;
        Ok(payload.text)
    }

    async fn generate_single(&self, caption: &str) -> Result<String, ApiError> {
        let response = self
            .send_checked(
                self.http
                    .post(self.endpoint("/video/generate/single"))
                    .json(&GenerateRequest { caption }),
            )
            .await?;
        let payload: SingleGenerationResponse = response.json().await.map_err(invalid_response)?;
        if !payload.ok {
            return Err(rejected(payload.error, "generation rejected by service"));
        }
        payload.file.ok_or_else(|| {
            ApiError::new(
                ApiFailureKind::InvalidResponse,
                "generation response carried no file",
            )
        })
    }

    async fn generate_multi(&self, caption: &str) -> Result<Vec<String>, ApiError> {
        let response = self
            .send_checked(
                self.http
                    .post(self.endpoint("/video/generate/multi"))
                    .json(&GenerateRequest { caption }),
            )
            .await?;
        let payload: MultiGenerationResponse = response.json().await.map_err(invalid_response)?;
        if !payload.ok {
            return Err(rejected(payload.error, "generation rejected by service"));
        }
        payload.files.ok_or_else(|| {
            ApiError::new(
                ApiFailureKind::InvalidResponse,
                "generation response carried no files",
            )
        })
    }

    async fn enqueue_upload(&self, video_url: &str, caption: &str) -> Result<(), ApiError> {
        self.send_checked(
            self.http
                .post(self.endpoint("/instagram/upload"))
                .json(&UploadRequest { video_url, caption }),
        )
        .await?;
        Ok(())
    }

    async fn fetch_queue(&self) -> Result<Vec<QueueEntry>, ApiError> {
        let response = self
            .send_checked(self.http.get(self.endpoint("/instagram/queue")))
            .await?;
        let payload: QueueResponse = response.json().await.map_err(invalid_response)?;
        if !payload.ok {
            return Err(rejected(payload.error, "queue fetch rejected by service"));
        }
        Ok(payload.queue)
    }

    async fn repost_top_reels(&self) -> Result<serde_json::Value, ApiError> {
        let response = self
            .send_checked(self.http.post(self.endpoint("/repost-top-reels")))
            .await?;
        response.json().await.map_err(invalid_response)
    }
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailureKind::Timeout, err.to_string());
    }
    ApiError::new(ApiFailureKind::Network, err.to_string())
}

fn invalid_response(err: reqwest::Error) -> ApiError {
    ApiError::new(ApiFailureKind::InvalidResponse, err.to_string())
}

fn rejected(error: Option<String>, fallback: &str) -> ApiError {
    ApiError::new(
        ApiFailureKind::Rejected,
        error.unwrap_or_else(|| fallback.to_string()),
    )
}
