//! Scene setup: camera, canvas root, artifact cards and overlay text.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy::text::TextBounds;
use bevy::ui::PositionType;

use crate::visualization::components::{ArtifactCard, CanvasRoot, TimelineIndicator, ZoomIndicator};
use crate::visualization::constants::{
    card_color, to_world, CARD_PADDING, DRAG_Z, COLOR_META, COLOR_TEXT, META_FONT_SIZE, TITLE_FONT_SIZE,
};
use crate::visualization::resources::WorkbenchRes;

/// Place the 2D camera so world `(x, -y)` is screen pixel `(x, y)` from the top-left.
pub fn camera_translation(viewport: Vec2) -> Vec3 {
    Vec3::new(viewport.x / 2.0, -viewport.y / 2.0, 0.0)
}

/// Spawn the camera, every artifact card under the canvas root, and the overlay.
pub fn setup_scene(mut commands: Commands, workbench: Res<WorkbenchRes>) {
    let wb = &workbench.0;

    commands.spawn((
        Camera2d,
        Transform::from_translation(camera_translation(wb.camera().viewport())),
    ));

    let card_size = wb.card_size();
    let title_font = TextFont {
        font_size: TITLE_FONT_SIZE,
        ..default()
    };
    let meta_font = TextFont {
        font_size: META_FONT_SIZE,
        ..default()
    };
    let text_origin = Vec2::new(-card_size.x / 2.0 + CARD_PADDING, card_size.y / 2.0 - CARD_PADDING);
    let text_width = card_size.x - 2.0 * CARD_PADDING;

    commands
        .spawn((CanvasRoot, Transform::default(), Visibility::default()))
        .with_children(|root| {
            for (index, placed) in wb.artifacts().iter().enumerate() {
                let artifact = &placed.artifact;
                let base_color = card_color(artifact.style());
                let position = to_world(placed.position);

                root.spawn((
                    Sprite::from_color(base_color, card_size),
                    Transform::from_xyz(position.x, position.y, card_z(index)),
                    ArtifactCard { index, base_color },
                ))
                .with_children(|card| {
                    card.spawn((
                        Text2d::new(artifact.title.clone()),
                        title_font.clone(),
                        TextColor(COLOR_TEXT),
                        TextBounds::new_horizontal(text_width),
                        Anchor::TopLeft,
                        Transform::from_xyz(text_origin.x, text_origin.y, 0.1),
                    ));

                    let mut meta = artifact.kind.as_str().to_string();
                    if !artifact.status.is_empty() {
                        meta.push_str(" · ");
                        meta.push_str(&artifact.status);
                    }
                    card.spawn((
                        Text2d::new(meta),
                        meta_font.clone(),
                        TextColor(COLOR_META),
                        TextBounds::new_horizontal(text_width),
                        Anchor::BottomLeft,
                        Transform::from_xyz(text_origin.x, -text_origin.y, 0.1),
                    ));
                });
            }
        });

    // Zoom and timeline readout in the top-right corner
    commands
        .spawn((
            bevy::ui::Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                right: Val::Px(10.0),
                padding: UiRect::all(Val::Px(8.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.85)),
            BorderRadius::all(Val::Px(6.0)),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new(format!("{}%", wb.camera().zoom_percent())),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(COLOR_TEXT),
                ZoomIndicator,
            ));
            panel.spawn((
                Text::new("Timeline: all"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(COLOR_META),
                TimelineIndicator,
            ));
        });
}

/// Later artifacts stack above earlier ones, matching hit-test order.
pub fn card_z(index: usize) -> f32 {
    (index as f32 * 0.5).min(DRAG_Z - 1.0)
}
