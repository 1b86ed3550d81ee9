//! Domain models for the workbench canvas.

mod artifact;

pub use artifact::{Artifact, ArtifactStyle, ArtifactType, FieldNotes, ACTIVE_WINDOW_DAYS};
