//! Input normalization: mouse and single-finger touch are the same pointer.

use bevy::math::Vec2;

/// What a pointer press landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas background; starts a pan.
    Canvas,
    /// The artifact at this index; starts a drag.
    Artifact(usize),
    /// A UI control (zoom buttons, timeline); neither pans nor drags.
    Control,
}

/// Device-independent pointer event in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Down { position: Vec2, target: PointerTarget },
    Move { position: Vec2 },
    Up,
}

/// Touch lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

/// The single active touch, or `None` for zero or multi-finger gestures.
pub fn single_touch(touches: &[Vec2]) -> Option<Vec2> {
    match touches {
        [only] => Some(*only),
        _ => None,
    }
}

/// Wheel zoom direction. Only the sign of the delta matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    In,
    Out,
}

impl WheelDirection {
    /// Classify a DOM-style vertical delta (positive scrolls down, zooming out).
    pub fn from_delta(delta_y: f32) -> Option<Self> {
        if delta_y > 0.0 {
            Some(WheelDirection::Out)
        } else if delta_y < 0.0 {
            Some(WheelDirection::In)
        } else {
            None
        }
    }
}

/// Discrete zoom controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomControl {
    In,
    Out,
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_touch_only() {
        assert_eq!(single_touch(&[]), None);
        assert_eq!(single_touch(&[Vec2::ONE]), Some(Vec2::ONE));
        assert_eq!(single_touch(&[Vec2::ONE, Vec2::ZERO]), None);
    }

    #[test]
    fn test_wheel_sign_not_magnitude() {
        assert_eq!(WheelDirection::from_delta(0.01), Some(WheelDirection::Out));
        assert_eq!(WheelDirection::from_delta(900.0), Some(WheelDirection::Out));
        assert_eq!(WheelDirection::from_delta(-3.0), Some(WheelDirection::In));
        assert_eq!(WheelDirection::from_delta(0.0), None);
    }
}
