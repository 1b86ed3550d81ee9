//! Colors, sizes and key bindings for the canvas window.

use bevy::prelude::*;

use crate::canvas::Emphasis;
use crate::models::ArtifactStyle;

// =============================================================================
// Canvas
// =============================================================================

/// Window background.
pub const COLOR_BACKGROUND: Color = Color::srgb(0.96, 0.95, 0.92); // #F5F2EB
/// Connection curve color (alpha comes from strength).
pub const COLOR_CONNECTION: Color = Color::srgb(0.55, 0.45, 0.35);
/// Connection color while touching the hovered artifact.
pub const COLOR_CONNECTION_ACTIVE: Color = Color::srgb(0.85, 0.35, 0.2);

// =============================================================================
// Cards
// =============================================================================

/// Sticky note (notes, observations).
pub const COLOR_STICKY: Color = Color::srgb(1.0, 0.93, 0.6); // #FFED99
/// Index card (systems, frameworks).
pub const COLOR_CARD: Color = Color::srgb(1.0, 1.0, 1.0);
/// Anything without a dedicated style.
pub const COLOR_PLAIN: Color = Color::srgb(0.88, 0.88, 0.86);
/// Title text.
pub const COLOR_TEXT: Color = Color::srgb(0.15, 0.15, 0.15);
/// Meta line (type, status).
pub const COLOR_META: Color = Color::srgb(0.45, 0.45, 0.45);

/// Alpha of cards outside the hovered neighborhood.
pub const DIMMED_ALPHA: f32 = 0.3;
/// Scale bump of the hovered artifact and its neighbors.
pub const EMPHASIS_SCALE: f32 = 1.05;
/// Scale bump of the card being dragged.
pub const DRAG_SCALE: f32 = 1.08;

pub const TITLE_FONT_SIZE: f32 = 16.0;
pub const META_FONT_SIZE: f32 = 11.0;
/// Inner padding between card edge and text.
pub const CARD_PADDING: f32 = 14.0;

/// Depth of the card being dragged, above every resting card.
pub const DRAG_Z: f32 = 900.0;

/// Line segments per drawn connection curve.
pub const CURVE_SEGMENTS: usize = 24;

/// Timeline step per key press, in percent.
pub const TIMELINE_STEP: f32 = 10.0;

// =============================================================================
// Helpers
// =============================================================================

/// Base fill for a card style.
pub fn card_color(style: ArtifactStyle) -> Color {
    match style {
        ArtifactStyle::Sticky => COLOR_STICKY,
        ArtifactStyle::Card => COLOR_CARD,
        ArtifactStyle::Plain => COLOR_PLAIN,
    }
}

/// Card alpha for a highlight mark combined with the timeline opacity.
pub fn card_alpha(emphasis: Emphasis, opacity: f32) -> f32 {
    match emphasis {
        Emphasis::Dimmed => DIMMED_ALPHA * opacity,
        Emphasis::Normal | Emphasis::Emphasized => opacity,
    }
}

/// Screen canvas point to Bevy world space (y up).
pub fn to_world(point: Vec2) -> Vec2 {
    Vec2::new(point.x, -point.y)
}
