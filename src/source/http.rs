//! Field-notes endpoint over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use super::{ArtifactSource, SourceError};
use crate::models::{Artifact, FieldNotes};

/// Error body the endpoint sends alongside a non-2xx status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Whether a `Content-Type` header value denotes JSON.
pub fn is_json_content_type(value: Option<&str>) -> bool {
    value
        .map(|v| v.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

/// Fetches `{ "entries": [...] }` from a single URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ArtifactSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<Artifact>, SourceError> {
        tracing::debug!(endpoint = %self.endpoint, "Fetching field notes");
        let response = self.client.get(&self.endpoint).send().await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if !is_json_content_type(content_type.as_deref()) {
            return Err(SourceError::UnexpectedContentType(content_type));
        }

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| "Failed to load entries".to_string());
            return Err(SourceError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let notes: FieldNotes = serde_json::from_slice(&body)?;
        Ok(notes.entries)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}
