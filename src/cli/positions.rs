//! Positions subcommand - inspect and delete persisted overrides.

use clap::Subcommand;

use crate::canvas::PositionStore;
use crate::config::Config;
use crate::storage::FileStore;

#[derive(Subcommand)]
pub enum PositionsCommand {
    /// List every stored override
    List,

    /// Delete the override of one artifact
    Clear {
        /// Artifact id
        id: String,
    },

    /// Delete every override
    ClearAll,
}

impl PositionsCommand {
    /// Run the positions command.
    pub fn run(self, config: &Config) -> color_eyre::Result<()> {
        let dir = config.storage.resolved_dir();
        let mut positions = PositionStore::new(FileStore::new(&dir), config.storage.key.clone());

        match self {
            PositionsCommand::List => {
                let all = positions.all();
                if all.is_empty() {
                    println!("No stored positions in {}", dir.display());
                }
                for (id, pos) in all {
                    println!("{id}\t{:.1}\t{:.1}", pos.x, pos.y);
                }
            }
            PositionsCommand::Clear { id } => {
                if positions.remove(&id)? {
                    println!("Removed stored position for {id}");
                } else {
                    println!("No stored position for {id}");
                }
            }
            PositionsCommand::ClearAll => {
                positions.clear()?;
                println!("Removed all stored positions");
            }
        }
        Ok(())
    }
}
