//! Wheel, keyboard and window-size camera control.

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::canvas::ZoomControl;
use crate::visualization::resources::WorkbenchRes;
use crate::visualization::setup::camera_translation;

/// Camera zoom control system.
///
/// Controls:
/// - Scroll wheel: zoom around the cursor, one step per event
/// - `+` / `=`: zoom in around the viewport center
/// - `-`: zoom out around the viewport center
/// - `0` / R: reset view
pub fn camera_input_system(
    mut workbench: ResMut<WorkbenchRes>,
    keyboard: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window>,
    mut scroll: EventReader<MouseWheel>,
) {
    let cursor = windows.get_single().ok().and_then(Window::cursor_position);

    for ev in scroll.read() {
        let point = cursor.unwrap_or_else(|| workbench.0.camera().viewport() / 2.0);
        // Bevy reports scroll-up as positive; the engine takes DOM-style deltas
        workbench.0.wheel(point, -ev.y);
    }

    let control = if keyboard.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        Some(ZoomControl::In)
    } else if keyboard.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        Some(ZoomControl::Out)
    } else if keyboard.any_just_pressed([KeyCode::Digit0, KeyCode::Numpad0, KeyCode::KeyR]) {
        Some(ZoomControl::Reset)
    } else {
        None
    };
    if let Some(control) = control {
        workbench.0.zoom_control(control);
    }
}

/// Keep the engine viewport and the 2D camera in sync with the window.
pub fn window_resize_system(
    mut workbench: ResMut<WorkbenchRes>,
    mut resized: EventReader<WindowResized>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let Some(ev) = resized.read().last() else {
        return;
    };
    let viewport = Vec2::new(ev.width, ev.height);
    workbench.0.resize(viewport);

    if let Ok(mut transform) = camera_query.get_single_mut() {
        transform.translation = camera_translation(viewport);
    }
}
