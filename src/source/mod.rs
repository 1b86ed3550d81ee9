//! Where artifacts come from.
//!
//! A source either yields the full artifact list or fails. Failures never
//! reach the canvas: [`load_artifacts`] logs them and substitutes the
//! built-in sample notes.

mod file;
mod http;
mod samples;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::SourceConfig;
use crate::models::Artifact;

pub use file::FileSource;
pub use http::{is_json_content_type, HttpSource};
pub use samples::sample_artifacts;

/// Errors raised while fetching artifacts.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Expected a JSON response, got content type {0:?}")]
    UnexpectedContentType(Option<String>),

    #[error("Malformed field notes: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can produce the artifact list for a session.
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// Fetch every artifact.
    async fn fetch(&self) -> Result<Vec<Artifact>, SourceError>;

    /// Short human-readable description used in logs.
    fn describe(&self) -> String;
}

/// Where a loaded artifact list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactOrigin {
    /// The configured source answered.
    Remote,
    /// The source failed and the built-in samples were used.
    Fallback,
}

/// Artifacts ready for a render pass.
#[derive(Debug, Clone)]
pub struct LoadedArtifacts {
    pub artifacts: Vec<Artifact>,
    pub origin: ArtifactOrigin,
}

/// Fetch from `source`, falling back to the sample notes on any failure.
pub async fn load_artifacts(source: &dyn ArtifactSource) -> LoadedArtifacts {
    match source.fetch().await {
        Ok(artifacts) => {
            tracing::info!(
                source = %source.describe(),
                count = artifacts.len(),
                "Loaded artifacts"
            );
            LoadedArtifacts {
                artifacts,
                origin: ArtifactOrigin::Remote,
            }
        }
        Err(e) => {
            tracing::warn!(
                source = %source.describe(),
                error = %e,
                "Artifact source unavailable, falling back to sample notes"
            );
            LoadedArtifacts {
                artifacts: sample_artifacts(),
                origin: ArtifactOrigin::Fallback,
            }
        }
    }
}

/// Build the source selected by configuration: a local file when set, else the endpoint.
pub fn from_config(config: &SourceConfig) -> Result<Box<dyn ArtifactSource>, SourceError> {
    match &config.file {
        Some(path) => Ok(Box::new(FileSource::new(path.clone()))),
        None => Ok(Box::new(HttpSource::new(
            config.endpoint.clone(),
            std::time::Duration::from_secs(config.timeout_secs),
        )?)),
    }
}
