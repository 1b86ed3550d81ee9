//! Pointer state machines for dragging artifacts and panning the canvas.
//!
//! ```text
//! Idle --down--> Pending --move > threshold--> Dragging --up--> Idle (dropped)
//!                   |                              |
//!                   +--up--> Idle (click)          +--move--> Dragging
//! ```
//!
//! A press that never crosses the threshold is a click. A press that did
//! turn into a drag suppresses the click that follows the release.
//!
//! The threshold is measured in canvas units, per axis: the press becomes a
//! drag once either axis of `(pointer - start) / scale` exceeds it.

use bevy::math::Vec2;

use super::input::PointerTarget;

/// Phase of an artifact drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pointer is down but has not moved far enough to count as a drag.
    Pending {
        /// Screen position of the press.
        start: Vec2,
        /// Artifact center in canvas space at press time.
        initial_center: Vec2,
    },
    /// Artifact follows the pointer.
    Dragging {
        start: Vec2,
        initial_center: Vec2,
        /// Current artifact center in canvas space.
        current: Vec2,
    },
}

/// What a pointer release meant for the artifact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragRelease {
    /// No press was in progress.
    Ignored,
    /// The press never became a drag.
    Click,
    /// The artifact was dropped at this canvas position.
    Dropped(Vec2),
}

/// Drag state machine owned by a single artifact.
#[derive(Debug, Clone)]
pub struct DragController {
    phase: DragPhase,
    threshold: f32,
    suppress_click: bool,
}

impl DragController {
    /// `threshold` is the per-axis canvas distance separating a click from a drag.
    pub fn new(threshold: f32) -> Self {
        Self {
            phase: DragPhase::Idle,
            threshold,
            suppress_click: false,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    pub fn is_pressed(&self) -> bool {
        !matches!(self.phase, DragPhase::Idle)
    }

    /// Press on the artifact. `center` is its current canvas-space center.
    pub fn pointer_down(&mut self, pointer: Vec2, center: Vec2) {
        self.phase = DragPhase::Pending {
            start: pointer,
            initial_center: center,
        };
    }

    /// Pointer moved. Returns the new canvas-space center while dragging.
    pub fn pointer_move(&mut self, pointer: Vec2, scale: f32) -> Option<Vec2> {
        let (start, initial_center) = match self.phase {
            DragPhase::Idle => return None,
            DragPhase::Pending {
                start,
                initial_center,
            } => {
                let moved = (pointer - start) / scale;
                if moved.x.abs() <= self.threshold && moved.y.abs() <= self.threshold {
                    return None;
                }
                tracing::debug!(?start, ?pointer, "Drag threshold crossed");
                (start, initial_center)
            }
            DragPhase::Dragging {
                start,
                initial_center,
                ..
            } => (start, initial_center),
        };

        let current = initial_center + (pointer - start) / scale;
        self.phase = DragPhase::Dragging {
            start,
            initial_center,
            current,
        };
        Some(current)
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) -> DragRelease {
        let release = match self.phase {
            DragPhase::Idle => DragRelease::Ignored,
            DragPhase::Pending { .. } => DragRelease::Click,
            DragPhase::Dragging { current, .. } => {
                self.suppress_click = true;
                DragRelease::Dropped(current)
            }
        };
        self.phase = DragPhase::Idle;
        release
    }

    /// Consume a click. Returns `false` when the click follows a drag and must be ignored.
    pub fn take_click(&mut self) -> bool {
        let allowed = !self.suppress_click;
        self.suppress_click = false;
        allowed
    }
}

/// Phase of a canvas pan.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanPhase {
    #[default]
    Idle,
    Panning {
        /// Last pointer position seen.
        last: Vec2,
    },
}

/// Pan state machine for the canvas background.
#[derive(Debug, Clone, Default)]
pub struct PanController {
    phase: PanPhase,
}

impl PanController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PanPhase {
        self.phase
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.phase, PanPhase::Panning { .. })
    }

    /// Start panning if the press landed on the bare canvas. Returns whether it did.
    pub fn pointer_down(&mut self, pointer: Vec2, target: &PointerTarget) -> bool {
        if !matches!(target, PointerTarget::Canvas) {
            return false;
        }
        self.phase = PanPhase::Panning { last: pointer };
        true
    }

    /// Screen delta since the last move while panning.
    pub fn pointer_move(&mut self, pointer: Vec2) -> Option<Vec2> {
        let PanPhase::Panning { last } = self.phase else {
            return None;
        };
        self.phase = PanPhase::Panning { last: pointer };
        Some(pointer - last)
    }

    pub fn pointer_up(&mut self) {
        self.phase = PanPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Vec2 = Vec2::new(100.0, 50.0);

    #[test]
    fn test_small_move_is_click() {
        let mut drag = DragController::new(5.0);
        drag.pointer_down(Vec2::new(10.0, 10.0), CENTER);
        assert_eq!(drag.pointer_move(Vec2::new(13.0, 14.0), 1.0), None);
        assert!(!drag.is_dragging());
        assert_eq!(drag.pointer_up(), DragRelease::Click);
        assert!(drag.take_click());
    }

    #[test]
    fn test_large_move_drags_and_suppresses_click() {
        let mut drag = DragController::new(5.0);
        drag.pointer_down(Vec2::new(10.0, 10.0), CENTER);
        let pos = drag.pointer_move(Vec2::new(30.0, 10.0), 0.5).unwrap();
        // 20 screen px at scale 0.5 is 40 canvas units
        assert_eq!(pos, Vec2::new(140.0, 50.0));
        assert!(drag.is_dragging());

        assert_eq!(drag.pointer_up(), DragRelease::Dropped(Vec2::new(140.0, 50.0)));
        assert!(!drag.take_click());
        // Suppression applies to one click only
        assert!(drag.take_click());
    }

    #[test]
    fn test_drag_continues_below_threshold_once_started() {
        let mut drag = DragController::new(5.0);
        drag.pointer_down(Vec2::ZERO, CENTER);
        drag.pointer_move(Vec2::new(10.0, 0.0), 1.0);
        // Moving back near the start keeps dragging
        let pos = drag.pointer_move(Vec2::new(1.0, 0.0), 1.0).unwrap();
        assert_eq!(pos, CENTER + Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_exact_threshold_is_not_a_drag() {
        let mut drag = DragController::new(5.0);
        drag.pointer_down(Vec2::ZERO, CENTER);
        assert_eq!(drag.pointer_move(Vec2::new(3.0, 4.0), 1.0), None);
        assert_eq!(drag.pointer_up(), DragRelease::Click);
    }

    #[test]
    fn test_diagonal_within_threshold_is_click() {
        let mut drag = DragController::new(5.0);
        drag.pointer_down(Vec2::ZERO, CENTER);
        // 5.66 px away, but neither axis exceeds 5
        assert_eq!(drag.pointer_move(Vec2::new(4.0, 4.0), 1.0), None);
        assert_eq!(drag.pointer_up(), DragRelease::Click);
    }

    #[test]
    fn test_threshold_measured_in_canvas_units() {
        let mut drag = DragController::new(5.0);
        drag.pointer_down(Vec2::ZERO, CENTER);
        // 4 screen px at scale 0.6 is 6.67 canvas units
        let pos = drag.pointer_move(Vec2::new(4.0, 0.0), 0.6).unwrap();
        assert!((pos - (CENTER + Vec2::new(4.0 / 0.6, 0.0))).length() < 1e-4);

        let mut zoomed = DragController::new(5.0);
        zoomed.pointer_down(Vec2::ZERO, CENTER);
        // 8 screen px at scale 2.0 is only 4 canvas units
        assert_eq!(zoomed.pointer_move(Vec2::new(8.0, 0.0), 2.0), None);
    }

    #[test]
    fn test_idle_ignores_move_and_up() {
        let mut drag = DragController::new(5.0);
        assert_eq!(drag.pointer_move(Vec2::new(100.0, 100.0), 1.0), None);
        assert_eq!(drag.pointer_up(), DragRelease::Ignored);
        assert!(drag.take_click());
    }

    #[test]
    fn test_pan_only_from_canvas() {
        let mut pan = PanController::new();
        assert!(!pan.pointer_down(Vec2::ZERO, &PointerTarget::Artifact(0)));
        assert!(!pan.pointer_down(Vec2::ZERO, &PointerTarget::Control));
        assert_eq!(pan.pointer_move(Vec2::new(5.0, 5.0)), None);

        assert!(pan.pointer_down(Vec2::new(10.0, 10.0), &PointerTarget::Canvas));
        assert_eq!(pan.pointer_move(Vec2::new(15.0, 8.0)), Some(Vec2::new(5.0, -2.0)));
        assert_eq!(pan.pointer_move(Vec2::new(20.0, 8.0)), Some(Vec2::new(5.0, 0.0)));
        pan.pointer_up();
        assert!(!pan.is_panning());
        assert_eq!(pan.pointer_move(Vec2::new(50.0, 50.0)), None);
    }
}
