// src/services/analysis_client.rs
use async_trait::async_trait;
use log::{debug, info};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::errors::FacelensError;
use crate::models::UploadPayload;
use crate::platform::PlatformCapabilities;

/// Seam for the remote analysis service; mocked in session tests.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn submit(&self, payload: UploadPayload) -> Result<Value, FacelensError>;
}

/// Single-attempt HTTP submission of one multipart `image` part. No retry
/// and no timeout: a hung request leaves the session analyzing until the
/// transport gives up.
pub struct AnalysisClient {
    http: Client,
    endpoint: String,
}

impl AnalysisClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn build_part(&self, payload: UploadPayload) -> Result<Part, FacelensError> {
        match payload {
            UploadPayload::Blob {
                filename,
                mime,
                data,
            } => Part::bytes(data.to_vec())
                .file_name(filename)
                .mime_str(&mime)
                .map_err(|e| FacelensError::Encode(e.to_string())),
            UploadPayload::FileRef {
                uri,
                filename,
                mime,
            } => {
                let path = uri.strip_prefix("file://").unwrap_or(&uri);
                let data = tokio::fs::read(path)
                    .await
                    .map_err(|e| FacelensError::Encode(format!("cannot read {}: {}", uri, e)))?;
                Part::bytes(data)
                    .file_name(filename)
                    .mime_str(&mime)
                    .map_err(|e| FacelensError::Encode(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl AnalysisApi for AnalysisClient {
    async fn submit(&self, payload: UploadPayload) -> Result<Value, FacelensError> {
        debug!(
            "submitting {} ({}) to {}",
            payload.filename(),
            payload.mime(),
            self.endpoint
        );

        let part = self.build_part(payload).await?;
        let form = Form::new().part("image", part);

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| FacelensError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(remote_failure(status, &body));
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|e| FacelensError::MalformedResponse(e.to_string()))?;

        info!("analysis response received ({})", status);
        Ok(raw)
    }
}

/// Maps a non-2xx response to a Remote error, preferring the body's
/// `error` field over the bare status line.
fn remote_failure(status: StatusCode, body: &str) -> FacelensError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| status.to_string());

    FacelensError::Remote(message)
}

/// Per-runtime default analysis endpoint, selected once at configuration
/// time. Browser builds talk to the host loopback; device builds need the
/// backend's LAN address.
pub fn default_endpoint(caps: &PlatformCapabilities) -> &'static str {
    if caps.uses_blob_upload {
        "http://localhost:5000/analyze"
    } else {
        "http://10.0.65.109:5000/analyze"
    }
}
