//! Apply engine frames to entities and draw connection curves.

use bevy::prelude::*;

use crate::canvas::Emphasis;
use crate::visualization::components::{ArtifactCard, CanvasRoot, TimelineIndicator, ZoomIndicator};
use crate::visualization::constants::{
    card_alpha, to_world, COLOR_CONNECTION, COLOR_CONNECTION_ACTIVE, CURVE_SEGMENTS, DIMMED_ALPHA,
    DRAG_SCALE, DRAG_Z, EMPHASIS_SCALE,
};
use crate::visualization::resources::{LastFrame, WorkbenchRes};
use crate::visualization::setup::card_z;

/// Flush the workbench and push the resulting frame into the scene.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn apply_frame_system(
    mut workbench: ResMut<WorkbenchRes>,
    mut last: ResMut<LastFrame>,
    mut root_query: Query<&mut Transform, (With<CanvasRoot>, Without<ArtifactCard>)>,
    mut card_query: Query<(&ArtifactCard, &mut Transform, &mut Sprite, &Children), Without<CanvasRoot>>,
    mut text_query: Query<&mut TextColor, With<Text2d>>,
    mut zoom_query: Query<&mut Text, (With<ZoomIndicator>, Without<TimelineIndicator>)>,
    mut timeline_query: Query<&mut Text, (With<TimelineIndicator>, Without<ZoomIndicator>)>,
) {
    let Some(frame) = workbench.0.flush() else {
        return;
    };

    if let Ok(mut root) = root_query.get_single_mut() {
        let origin = to_world(frame.transform.offset);
        root.translation = origin.extend(0.0);
        root.scale = Vec3::new(frame.transform.scale, frame.transform.scale, 1.0);
    }

    for (card, mut transform, mut sprite, children) in card_query.iter_mut() {
        let Some(state) = frame.artifacts.get(card.index) else {
            continue;
        };

        let z = if state.dragging { DRAG_Z } else { card_z(card.index) };
        transform.translation = to_world(state.position).extend(z);

        let bump = if state.dragging {
            DRAG_SCALE
        } else if state.emphasis == Emphasis::Emphasized {
            EMPHASIS_SCALE
        } else {
            1.0
        };
        transform.scale = Vec3::new(bump, bump, 1.0);

        let alpha = card_alpha(state.emphasis, state.opacity);
        sprite.color = card.base_color.with_alpha(alpha);
        for &child in children.iter() {
            if let Ok(mut color) = text_query.get_mut(child) {
                color.0 = color.0.with_alpha(alpha);
            }
        }
    }

    if let Ok(mut text) = zoom_query.get_single_mut() {
        text.0 = format!("{}% · {}", frame.zoom_percent, frame.zoom.as_str());
    }
    if let Ok(mut text) = timeline_query.get_single_mut() {
        text.0 = match workbench.0.timeline().cutoff() {
            Some(cutoff) => format!("Timeline: until {cutoff}"),
            None => "Timeline: all".to_string(),
        };
    }

    last.transform = Some(frame.transform);
    last.highlighting = frame.highlighting;
    last.connections = frame.connections;
}

/// Gizmos are immediate mode, so the last frame's curves are redrawn every tick.
pub fn draw_connections_system(last: Res<LastFrame>, mut gizmos: Gizmos) {
    let Some(transform) = last.transform else {
        return;
    };

    for connection in &last.connections {
        let color = if connection.active {
            COLOR_CONNECTION_ACTIVE
        } else if last.highlighting {
            COLOR_CONNECTION.with_alpha(connection.opacity * DIMMED_ALPHA)
        } else {
            COLOR_CONNECTION.with_alpha(connection.opacity)
        };
        let points = connection
            .path
            .sample(CURVE_SEGMENTS)
            .into_iter()
            .map(|p| to_world(transform.canvas_to_screen(p)));
        gizmos.linestrip_2d(points, color);
    }
}
