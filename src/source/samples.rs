//! Built-in field notes shown when no source is reachable.

use crate::models::{Artifact, ArtifactType};

fn note(
    id: &str,
    title: &str,
    kind: ArtifactType,
    focus: [&str; 2],
    status: &str,
    created: &str,
    revisited: Option<&str>,
) -> Artifact {
    Artifact {
        id: id.to_string(),
        title: title.to_string(),
        kind,
        focus: focus.iter().map(|t| t.to_string()).collect(),
        status: status.to_string(),
        created: created.to_string(),
        revisited: revisited.map(str::to_string),
        media: None,
        url: "#".to_string(),
    }
}

/// Ten sample notes spread over five primary tags.
pub fn sample_artifacts() -> Vec<Artifact> {
    use ArtifactType::*;

    vec![
        note("mock-1", "Design System Architecture", System, ["Design", "Architecture"], "Working", "2024-11-15", Some("2025-01-25")),
        note("mock-2", "Brand Voice Guidelines", Framework, ["Brand", "Writing"], "Working", "2024-10-20", Some("2025-01-20")),
        note("mock-3", "Color Theory Notes", Note, ["Design", "Color"], "Draft", "2024-09-10", None),
        note("mock-4", "Typography Explorations", Observation, ["Design", "Typography"], "Working", "2024-08-05", Some("2024-12-15")),
        note("mock-5", "Component Library Patterns", System, ["Architecture", "Components"], "Working", "2024-07-22", Some("2025-01-10")),
        note("mock-6", "User Research Synthesis", Framework, ["Research", "Strategy"], "Draft", "2024-06-18", None),
        note("mock-7", "Motion Design Principles", Note, ["Design", "Motion"], "Working", "2024-05-30", Some("2024-11-20")),
        note("mock-8", "Accessibility Checklist", System, ["Architecture", "Accessibility"], "Working", "2024-04-12", Some("2025-01-22")),
        note("mock-9", "Content Strategy Framework", Framework, ["Strategy", "Writing"], "Working", "2024-03-08", Some("2024-10-05")),
        note("mock-10", "Visual Language Evolution", Observation, ["Brand", "Design"], "Draft", "2024-02-14", None),
    ]
}
