//! CLI module for the workbench.
//!
//! Subcommands:
//! - `view`: Load artifacts and open the canvas window
//! - `layout`: Compute the layout headlessly and print it as JSON
//! - `positions`: Inspect or delete persisted position overrides

mod layout;
mod positions;
mod view;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use layout::{LayoutCommand, LayoutReport};
pub use positions::PositionsCommand;
pub use view::ViewCommand;

use crate::config::Config;

/// Workbench - spatial canvas of field notes
#[derive(Parser)]
#[command(name = "workbench")]
#[command(about = "Pannable, zoomable canvas of field notes clustered and connected by shared tags")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open the canvas window
    View(ViewCommand),

    /// Print the computed layout, clusters and connections as JSON
    Layout(LayoutCommand),

    /// Manage persisted artifact positions
    Positions {
        #[command(subcommand)]
        command: PositionsCommand,
    },
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        let config = Config::load()?;
        tracing::debug!(
            storage = %config.storage.resolved_dir().display(),
            endpoint = %config.source.endpoint,
            "Loaded configuration"
        );

        match self.command {
            Command::View(cmd) => cmd.run(config).await,
            Command::Layout(cmd) => cmd.run(config).await,
            Command::Positions { command } => command.run(&config),
        }
    }
}

/// Source selection shared by the commands that load artifacts.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read field notes from a JSON file instead of the endpoint
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Field-notes endpoint URL
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Seed for the layout jitter (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SourceArgs {
    /// Overlay command-line choices onto the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(file) = &self.file {
            config.source.file = Some(file.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.source.endpoint = endpoint.clone();
            config.source.file = None;
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_view_with_source() {
        let app = App::try_parse_from(["workbench", "view", "--file", "notes.json", "--seed", "7"]).unwrap();
        let Command::View(cmd) = app.command else {
            panic!("expected view");
        };
        assert_eq!(cmd.source.file, Some(PathBuf::from("notes.json")));
        assert_eq!(cmd.source.seed, Some(7));
    }

    #[test]
    fn test_parse_positions_clear() {
        let app = App::try_parse_from(["workbench", "-v", "positions", "clear", "mock-3"]).unwrap();
        assert!(app.verbose);
        assert!(matches!(
            app.command,
            Command::Positions {
                command: PositionsCommand::Clear { ref id }
            } if id == "mock-3"
        ));
    }

    #[test]
    fn test_endpoint_overrides_file() {
        let mut config = Config::default();
        config.source.file = Some(PathBuf::from("a.json"));
        let args = SourceArgs {
            endpoint: Some("http://example.test/notes".to_string()),
            ..SourceArgs::default()
        };
        args.apply(&mut config);
        assert_eq!(config.source.file, None);
        assert_eq!(config.source.endpoint, "http://example.test/notes");
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::Rng;
        let args = SourceArgs {
            seed: Some(42),
            ..SourceArgs::default()
        };
        assert_eq!(args.rng().gen::<u64>(), args.rng().gen::<u64>());
    }
}
