//! Field notes read from a local JSON file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{ArtifactSource, SourceError};
use crate::models::{Artifact, FieldNotes};

/// Reads either the `{ "entries": [...] }` envelope or a bare artifact array.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ArtifactSource for FileSource {
    async fn fetch(&self) -> Result<Vec<Artifact>, SourceError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;

        match serde_json::from_slice::<FieldNotes>(&raw) {
            Ok(notes) => Ok(notes.entries),
            Err(envelope_err) => serde_json::from_slice::<Vec<Artifact>>(&raw).map_err(|_| {
                tracing::debug!(path = %self.path.display(), "Not a bare artifact array either");
                SourceError::Decode(envelope_err)
            }),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ENTRY: &str = r#"{"id":"n1","title":"One","type":"Framework","focus":["Brand"],"created":"2024-02-01"}"#;

    async fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        tokio::fs::write(&path, contents).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_reads_envelope() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "notes.json", &format!(r#"{{"entries":[{ENTRY}]}}"#)).await;
        let artifacts = FileSource::new(path).fetch().await.unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].url, "");
    }

    #[tokio::test]
    async fn test_reads_bare_array() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "notes.json", &format!("[{ENTRY}, {ENTRY}]")).await;
        assert_eq!(FileSource::new(path).fetch().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = FileSource::new(dir.path().join("absent.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn test_garbage_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "notes.json", "not json").await;
        let err = FileSource::new(path).fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
