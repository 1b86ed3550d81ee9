//! Layout subcommand - headless layout report.

use clap::Parser;
use serde::Serialize;

use super::SourceArgs;
use crate::canvas::{StoredPosition, Workbench};
use crate::config::Config;
use crate::source::{self, load_artifacts, ArtifactOrigin};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

/// Print positions, clusters and connections as JSON.
#[derive(Parser)]
pub struct LayoutCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Ignore persisted overrides and report computed positions only
    #[arg(long)]
    pub no_overrides: bool,
}

/// Full layout of one render pass.
#[derive(Debug, Serialize)]
pub struct LayoutReport {
    /// `remote` or `fallback`.
    pub origin: &'static str,
    pub artifacts: Vec<ArtifactEntry>,
    pub clusters: Vec<ClusterEntry>,
    pub connections: Vec<ConnectionEntry>,
}

#[derive(Debug, Serialize)]
pub struct ArtifactEntry {
    pub id: String,
    pub title: String,
    pub position: StoredPosition,
    pub overridden: bool,
}

#[derive(Debug, Serialize)]
pub struct ClusterEntry {
    pub name: String,
    pub center: StoredPosition,
    pub members: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ConnectionEntry {
    pub from: String,
    pub to: String,
    pub strength: usize,
    pub tags: Vec<String>,
    pub opacity: f32,
    /// SVG path data in canvas space.
    pub path: String,
}

impl LayoutReport {
    /// Snapshot a rendered workbench.
    pub fn from_workbench<S: KeyValueStore>(workbench: &Workbench<S>, origin: ArtifactOrigin) -> Self {
        let artifacts = workbench.artifacts();
        let frame = workbench.frame();

        Self {
            origin: match origin {
                ArtifactOrigin::Remote => "remote",
                ArtifactOrigin::Fallback => "fallback",
            },
            artifacts: artifacts
                .iter()
                .map(|p| ArtifactEntry {
                    id: p.artifact.id.clone(),
                    title: p.artifact.title.clone(),
                    position: p.position.into(),
                    overridden: p.overridden,
                })
                .collect(),
            clusters: workbench
                .clusters()
                .iter()
                .map(|c| ClusterEntry {
                    name: c.name.clone(),
                    center: c.center.into(),
                    members: c
                        .members
                        .iter()
                        .filter_map(|&i| artifacts.get(i))
                        .map(|p| p.artifact.id.clone())
                        .collect(),
                })
                .collect(),
            connections: frame
                .connections
                .iter()
                .filter_map(|projected| {
                    let c = workbench.connections().get(projected.index)?;
                    Some(ConnectionEntry {
                        from: c.from.clone(),
                        to: c.to.clone(),
                        strength: c.strength,
                        tags: c.tags.clone(),
                        opacity: projected.opacity,
                        path: projected.path.to_svg(),
                    })
                })
                .collect(),
        }
    }
}

impl LayoutCommand {
    /// Run the layout command.
    pub async fn run(self, mut config: Config) -> color_eyre::Result<()> {
        self.source.apply(&mut config);

        let artifact_source = source::from_config(&config.source)?;
        let loaded = load_artifacts(artifact_source.as_ref()).await;
        let mut rng = self.source.rng();

        let report = if self.no_overrides {
            let mut workbench = Workbench::new(&config, MemoryStore::new());
            workbench.render_artifacts(loaded.artifacts, &mut rng);
            LayoutReport::from_workbench(&workbench, loaded.origin)
        } else {
            let mut workbench = Workbench::new(&config, FileStore::new(config.storage.resolved_dir()));
            workbench.render_artifacts(loaded.artifacts, &mut rng);
            LayoutReport::from_workbench(&workbench, loaded.origin)
        };

        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}
