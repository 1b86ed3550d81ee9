//! ECS resources for canvas state.

use bevy::prelude::*;

use crate::canvas::{CameraTransform, ProjectedConnection, Workbench};
use crate::storage::FileStore;

/// The engine driving the window.
#[derive(Resource)]
pub struct WorkbenchRes(pub Workbench<FileStore>);

/// Connections of the last applied frame, redrawn every frame by gizmos.
#[derive(Resource, Default)]
pub struct LastFrame {
    pub transform: Option<CameraTransform>,
    pub connections: Vec<ProjectedConnection>,
    pub highlighting: bool,
}

/// Artifact currently under the cursor.
#[derive(Resource, Default)]
pub struct HoverState {
    pub index: Option<usize>,
}

/// Timeline slider position; `None` when the filter is off.
#[derive(Resource, Default)]
pub struct TimelineState {
    pub percent: Option<f32>,
}
