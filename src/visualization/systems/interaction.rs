//! Pointer, touch, hover and timeline input.

use bevy::prelude::*;

use crate::canvas::{PointerEvent, PointerRelease, TouchPhase, Workbench};
use crate::storage::FileStore;
use crate::visualization::constants::TIMELINE_STEP;
use crate::visualization::resources::{HoverState, TimelineState, WorkbenchRes};

/// Left mouse button drives artifact drags and canvas pans.
pub fn pointer_input_system(
    mut workbench: ResMut<WorkbenchRes>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut cursor_moved: EventReader<CursorMoved>,
) {
    let wb = &mut workbench.0;

    if mouse_button.just_pressed(MouseButton::Left) {
        let cursor = windows.get_single().ok().and_then(Window::cursor_position);
        if let Some(position) = cursor {
            let target = wb.target_at(position);
            wb.handle(PointerEvent::Down { position, target });
        }
    }

    for ev in cursor_moved.read() {
        wb.handle(PointerEvent::Move {
            position: ev.position,
        });
    }

    if mouse_button.just_released(MouseButton::Left) {
        if let Some(release) = wb.handle(PointerEvent::Up) {
            finish_press(wb, release);
        }
    }
}

/// Single-finger touch mirrors the mouse; multi-finger gestures are ignored.
pub fn touch_input_system(mut workbench: ResMut<WorkbenchRes>, touches: Res<Touches>) {
    let wb = &mut workbench.0;
    let active: Vec<Vec2> = touches.iter().map(|t| t.position()).collect();

    let release = if touches.any_just_pressed() {
        wb.touch(TouchPhase::Start, &active)
    } else if touches.any_just_released() || touches.any_just_canceled() {
        wb.touch(TouchPhase::End, &active)
    } else if touches.iter().any(|t| t.delta() != Vec2::ZERO) {
        wb.touch(TouchPhase::Move, &active)
    } else {
        None
    };

    if let Some(release) = release {
        finish_press(wb, release);
    }
}

/// A release on an artifact is followed by a click, which a finished drag swallows.
fn finish_press(wb: &mut Workbench<FileStore>, release: PointerRelease) {
    let index = match release {
        PointerRelease::Click { index } | PointerRelease::Dropped { index, .. } => index,
    };
    if let Some(url) = wb.click(index) {
        tracing::info!(url, "Open artifact");
    }
}

/// Highlight the artifact under the cursor and its neighbors.
pub fn hover_system(
    mut workbench: ResMut<WorkbenchRes>,
    mut hover: ResMut<HoverState>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
) {
    // Marks stay put while a press is in progress
    if mouse_button.pressed(MouseButton::Left) {
        return;
    }
    let cursor = windows.get_single().ok().and_then(Window::cursor_position);
    let hit = cursor.and_then(|c| workbench.0.hit_test(c));
    if hit == hover.index {
        return;
    }

    hover.index = hit;
    match hit {
        Some(index) => workbench.0.hover_enter(index),
        None => workbench.0.hover_leave(),
    }
}

/// Timeline controls.
///
/// - `[`: move the cut-off earlier
/// - `]`: move the cut-off later
/// - T: show everything
pub fn timeline_input_system(
    mut workbench: ResMut<WorkbenchRes>,
    mut timeline: ResMut<TimelineState>,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    let current = timeline.percent.unwrap_or(100.0);
    let percent = if keyboard.just_pressed(KeyCode::BracketLeft) {
        Some((current - TIMELINE_STEP).max(0.0))
    } else if keyboard.just_pressed(KeyCode::BracketRight) {
        Some((current + TIMELINE_STEP).min(100.0))
    } else if keyboard.just_pressed(KeyCode::KeyT) {
        None
    } else {
        return;
    };

    timeline.percent = percent;
    workbench.0.set_timeline(percent);
}
