//! Canvas plugin for Bevy.

use bevy::prelude::*;
use std::sync::Mutex;

use super::resources::{HoverState, LastFrame, TimelineState, WorkbenchRes};
use super::setup::setup_scene;
use super::systems;
use crate::canvas::Workbench;
use crate::storage::FileStore;

/// Plugin that renders and drives a [`Workbench`].
///
/// The workbench sits in a `Mutex<Option<...>>` so `build()` (which takes
/// `&self`) can move it into a resource.
pub struct WorkbenchPlugin {
    pub workbench: Mutex<Option<Workbench<FileStore>>>,
}

impl WorkbenchPlugin {
    pub fn new(workbench: Workbench<FileStore>) -> Self {
        Self {
            workbench: Mutex::new(Some(workbench)),
        }
    }
}

impl Plugin for WorkbenchPlugin {
    fn build(&self, app: &mut App) {
        let workbench = self.workbench.lock().ok().and_then(|mut slot| slot.take());
        let Some(workbench) = workbench else {
            tracing::error!("Workbench plugin built twice, nothing to render");
            return;
        };

        app.insert_resource(WorkbenchRes(workbench))
            .init_resource::<LastFrame>()
            .init_resource::<HoverState>()
            .init_resource::<TimelineState>()
            .add_systems(Startup, setup_scene)
            .add_systems(
                Update,
                (
                    systems::window_resize_system,
                    systems::camera_input_system,
                    systems::pointer_input_system,
                    systems::touch_input_system,
                    systems::hover_system,
                    systems::timeline_input_system,
                    systems::apply_frame_system,
                    systems::draw_connections_system,
                )
                    .chain(),
            );
    }
}
