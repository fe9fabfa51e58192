//! HTTP client for the resume backend.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use tailor_core::{
    EnhancementError, EnhancementRequest, EnhancementResult, ExtractionError, ExtractionTarget,
    SelectedFile, TailorConfig,
};

use crate::backend::ResumeBackend;
use crate::protocol::ExtractTextResponse;

/// Client for the backend's upload and enhancement endpoints.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with no request timeout.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &TailorConfig) -> anyhow::Result<Self> {
        Self::with_timeout(
            config.base_url(),
            config.api.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/", self.base_url, path)
    }

    /// Upload file bytes to the target's endpoint and return the extracted text.
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub async fn upload(
        &self,
        target: ExtractionTarget,
        file_name: String,
        bytes: Vec<u8>,
    ) -> anyhow::Result<String> {
        let url = self.endpoint(target.endpoint());
        let part = Part::bytes(bytes).file_name(file_name);
        let form = Form::new().part(target.form_field(), part);
        let resp = self.client.post(&url).multipart(form).send().await?;
        let body: ExtractTextResponse = resp.error_for_status()?.json().await?;
        let text = body.into_text();
        debug!("Extracted {} chars", text.len());
        Ok(text)
    }

    /// Send an enhancement request and return the named sections.
    #[instrument(skip(self, request), fields(prompt_len = request.prompt.len()))]
    pub async fn enhance_resume(
        &self,
        request: &EnhancementRequest,
    ) -> anyhow::Result<EnhancementResult> {
        let url = self.endpoint("enhance_resume");
        let resp = self.client.post(&url).json(request).send().await?;
        let result: EnhancementResult = resp.error_for_status()?.json().await?;
        debug!("Received {} sections", result.len());
        Ok(result)
    }
}

/// How a call failed, independent of which endpoint it was.
enum CallFailure {
    Status(u16),
    Decode(String),
    Transport(String),
}

fn classify(err: &anyhow::Error) -> CallFailure {
    if let Some(e) = err.downcast_ref::<reqwest::Error>() {
        if let Some(status) = e.status() {
            return CallFailure::Status(status.as_u16());
        }
        if e.is_decode() {
            return CallFailure::Decode(e.to_string());
        }
    }
    CallFailure::Transport(format!("{err:#}"))
}

#[async_trait]
impl ResumeBackend for ApiClient {
    async fn extract(
        &self,
        target: ExtractionTarget,
        file: &SelectedFile,
    ) -> Result<String, ExtractionError> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| ExtractionError::Read {
                path: file.path.display().to_string(),
                reason: e.to_string(),
            })?;

        self.upload(target, file.file_name.clone(), bytes)
            .await
            .map_err(|e| match classify(&e) {
                CallFailure::Status(code) => ExtractionError::Status(code),
                CallFailure::Decode(msg) => ExtractionError::Decode(msg),
                CallFailure::Transport(msg) => ExtractionError::Transport(msg),
            })
    }

    async fn enhance(
        &self,
        request: &EnhancementRequest,
    ) -> Result<EnhancementResult, EnhancementError> {
        self.enhance_resume(request)
            .await
            .map_err(|e| match classify(&e) {
                CallFailure::Status(code) => EnhancementError::Status(code),
                CallFailure::Decode(msg) => EnhancementError::Decode(msg),
                CallFailure::Transport(msg) => EnhancementError::Transport(msg),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_without_double_slash() {
        let client = ApiClient::new("http://localhost:8000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(
            client.endpoint(ExtractionTarget::Resume.endpoint()),
            "http://localhost:8000/api/upload_resume/"
        );
        assert_eq!(
            client.endpoint("enhance_resume"),
            "http://localhost:8000/api/enhance_resume/"
        );
    }

    #[test]
    fn from_config_uses_resolved_base_url() {
        let config = TailorConfig::default()
            .with_base_url_override(Some("https://cv.example.org/api".to_string()));
        let client = ApiClient::from_config(&config).unwrap();
        assert_eq!(
            client.endpoint(ExtractionTarget::JobDescription.endpoint()),
            "https://cv.example.org/api/upload_jd/"
        );
    }

    #[test]
    fn configured_timeout_builds_a_client() {
        let mut config = TailorConfig::default();
        config.api.request_timeout_secs = Some(30);
        let client = ApiClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }
}
