//! View subcommand - open the canvas window.

use clap::Parser;

use super::SourceArgs;
use crate::canvas::Workbench;
use crate::config::Config;
use crate::source::{self, load_artifacts, ArtifactOrigin};
use crate::storage::FileStore;
use crate::visualization::run_visualizer;

/// Load artifacts and open the canvas.
#[derive(Parser)]
pub struct ViewCommand {
    #[command(flatten)]
    pub source: SourceArgs,
}

impl ViewCommand {
    /// Run the view command. Blocks until the window is closed.
    pub async fn run(self, mut config: Config) -> color_eyre::Result<()> {
        self.source.apply(&mut config);

        let artifact_source = source::from_config(&config.source)?;
        let loaded = load_artifacts(artifact_source.as_ref()).await;
        if loaded.origin == ArtifactOrigin::Fallback {
            tracing::info!("Showing sample field notes");
        }

        let store = FileStore::new(config.storage.resolved_dir());
        let mut workbench = Workbench::new(&config, store);
        workbench.render_artifacts(loaded.artifacts, &mut self.source.rng());

        run_visualizer(workbench);
        Ok(())
    }
}
