//! ECS components for the canvas window.

use bevy::prelude::*;

/// Root entity whose transform is the camera transform; cards are its children.
#[derive(Component)]
pub struct CanvasRoot;

/// A rendered artifact card.
#[derive(Component)]
pub struct ArtifactCard {
    /// Index into the workbench's artifact list.
    pub index: usize,
    /// Fill color before highlight and timeline alpha.
    pub base_color: Color,
}

/// Text showing the zoom percentage.
#[derive(Component)]
pub struct ZoomIndicator;

/// Text showing the timeline cut-off.
#[derive(Component)]
pub struct TimelineIndicator;
