//! 2D canvas window.
//!
//! Renders a [`Workbench`] with Bevy: one sprite card per artifact under a
//! canvas root entity carrying the camera transform, connection curves drawn
//! with gizmos, and a zoom/timeline readout.
//!
//! ## Module Structure
//!
//! - `components` - ECS components for the root, cards and overlay text
//! - `resources` - the workbench resource and per-frame state
//! - `systems` - input, frame application and curve drawing
//! - `setup` - scene initialization
//! - `plugin` - Bevy plugin definition
//! - `constants` - colors, sizes and helpers

mod components;
mod constants;
mod plugin;
mod resources;
mod setup;
mod systems;

pub use plugin::WorkbenchPlugin;

use bevy::prelude::*;

use crate::canvas::Workbench;
use crate::storage::FileStore;
use constants::COLOR_BACKGROUND;

/// Run the canvas window. Blocks until the window is closed.
pub fn run_visualizer(workbench: Workbench<FileStore>) {
    let viewport = workbench.camera().viewport();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Workbench".to_string(),
                resolution: (viewport.x, viewport.y).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(COLOR_BACKGROUND))
        .add_plugins(WorkbenchPlugin::new(workbench))
        .run();
}
