//! Pan/zoom camera for the 2D canvas.
//!
//! Screen coordinates are logical pixels relative to the top-left corner of
//! the viewport, y pointing down. Canvas coordinates are the untransformed
//! space artifacts are laid out in:
//!
//! `screen = offset + canvas * scale`

use bevy::math::Vec2;

use crate::config::CameraConfig;

/// Semantic zoom band, used to pick how much detail cards show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoomState {
    Overview,
    Normal,
    Detail,
    Reading,
}

impl ZoomState {
    /// Classify a scale value.
    pub fn from_scale(scale: f32) -> Self {
        if scale <= 0.35 {
            ZoomState::Overview
        } else if scale >= 1.2 {
            ZoomState::Reading
        } else if scale >= 0.8 {
            ZoomState::Detail
        } else {
            ZoomState::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoomState::Overview => "overview",
            ZoomState::Normal => "normal",
            ZoomState::Detail => "detail",
            ZoomState::Reading => "reading",
        }
    }
}

/// Snapshot of the camera transform applied to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    pub scale: f32,
    pub offset: Vec2,
}

impl CameraTransform {
    /// Map a canvas-local point to screen space.
    pub fn canvas_to_screen(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }

    /// Map a screen point back to canvas-local space.
    pub fn screen_to_canvas(&self, point: Vec2) -> Vec2 {
        (point - self.offset) / self.scale
    }
}

/// Camera state: a clamped scale and a free translation.
#[derive(Debug, Clone)]
pub struct Camera {
    scale: f32,
    offset: Vec2,
    viewport: Vec2,
    settings: CameraConfig,
}

impl Camera {
    /// Create a camera at the default scale with the canvas origin centered.
    pub fn new(settings: CameraConfig, viewport: Vec2) -> Self {
        let mut camera = Self {
            scale: settings.default_scale,
            offset: Vec2::ZERO,
            viewport,
            settings,
        };
        camera.reset();
        camera
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn settings(&self) -> &CameraConfig {
        &self.settings
    }

    pub fn transform(&self) -> CameraTransform {
        CameraTransform {
            scale: self.scale,
            offset: self.offset,
        }
    }

    pub fn zoom_state(&self) -> ZoomState {
        ZoomState::from_scale(self.scale)
    }

    /// Scale as a rounded percentage, e.g. `60` for 0.6.
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    /// Update the viewport size. Offset is left untouched.
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    /// Translate by a screen-space delta. Scale is unaffected.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Multiply the scale by `factor`, keeping `point` fixed on screen.
    pub fn zoom_at(&mut self, point: Vec2, factor: f32) {
        let new_scale = self.clamp_scale(self.scale * factor);
        let scale_factor = new_scale / self.scale;
        self.offset = point - (point - self.offset) * scale_factor;
        self.scale = new_scale;
    }

    /// Multiply the scale by `factor`, keeping the viewport center fixed.
    pub fn zoom_to_center(&mut self, factor: f32) {
        self.zoom_at(self.viewport / 2.0, factor);
    }

    /// Set an absolute scale (clamped), zooming around the viewport center.
    pub fn set_scale(&mut self, value: f32) {
        self.zoom_to_center(value / self.scale);
    }

    /// Discrete zoom-in control.
    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale * self.settings.button_zoom_step);
    }

    /// Discrete zoom-out control.
    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale / self.settings.button_zoom_step);
    }

    /// One wheel tick at `point`. Only the direction matters, never the magnitude.
    pub fn wheel(&mut self, point: Vec2, zoom_in: bool) {
        let factor = if zoom_in {
            self.settings.wheel_zoom_in
        } else {
            self.settings.wheel_zoom_out
        };
        self.zoom_at(point, factor);
    }

    /// Restore the default scale with the canvas origin at the viewport center.
    pub fn reset(&mut self) {
        self.scale = self.clamp_scale(self.settings.default_scale);
        self.offset = self.viewport / 2.0;
    }

    pub fn canvas_to_screen(&self, point: Vec2) -> Vec2 {
        self.transform().canvas_to_screen(point)
    }

    pub fn screen_to_canvas(&self, point: Vec2) -> Vec2 {
        self.transform().screen_to_canvas(point)
    }

    fn clamp_scale(&self, value: f32) -> f32 {
        value.clamp(self.settings.min_scale, self.settings.max_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn camera() -> Camera {
        Camera::new(CameraConfig::default(), Vec2::new(1000.0, 800.0))
    }

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < EPS, "{a:?} != {b:?}");
    }

    #[test]
    fn test_new_centers_origin() {
        let cam = camera();
        assert_eq!(cam.scale(), 0.6);
        assert_eq!(cam.offset(), Vec2::new(500.0, 400.0));
        assert_close(cam.canvas_to_screen(Vec2::ZERO), Vec2::new(500.0, 400.0));
    }

    #[test]
    fn test_pan_moves_offset_only() {
        let mut cam = camera();
        cam.pan(Vec2::new(15.0, -7.0));
        assert_eq!(cam.offset(), Vec2::new(515.0, 393.0));
        assert_eq!(cam.scale(), 0.6);
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed() {
        let mut cam = camera();
        cam.pan(Vec2::new(-123.0, 45.0));
        let point = Vec2::new(310.0, 220.0);

        for factor in [1.1, 0.9, 1.7, 0.3] {
            let under_cursor = cam.screen_to_canvas(point);
            cam.zoom_at(point, factor);
            assert_close(cam.canvas_to_screen(under_cursor), point);
        }
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed_when_clamped() {
        let mut cam = camera();
        let point = Vec2::new(50.0, 60.0);
        let under_cursor = cam.screen_to_canvas(point);
        cam.zoom_at(point, 100.0);
        assert_eq!(cam.scale(), 2.0);
        assert_close(cam.canvas_to_screen(under_cursor), point);
    }

    #[test]
    fn test_scale_always_within_bounds() {
        let mut cam = camera();
        for _ in 0..50 {
            cam.wheel(Vec2::new(10.0, 10.0), true);
            assert!(cam.scale() <= 2.0);
        }
        assert_eq!(cam.scale(), 2.0);
        for _ in 0..50 {
            cam.zoom_out();
            assert!(cam.scale() >= 0.2);
        }
        assert_eq!(cam.scale(), 0.2);
        cam.set_scale(-4.0);
        assert_eq!(cam.scale(), 0.2);
    }

    #[test]
    fn test_wheel_uses_fixed_steps() {
        let mut cam = camera();
        cam.wheel(Vec2::ZERO, true);
        assert!((cam.scale() - 0.66).abs() < EPS);
        cam.wheel(Vec2::ZERO, false);
        assert!((cam.scale() - 0.594).abs() < EPS);
    }

    #[test]
    fn test_buttons_zoom_around_center() {
        let mut cam = camera();
        let center = cam.viewport() / 2.0;
        let under_center = cam.screen_to_canvas(center);
        cam.zoom_in();
        assert!((cam.scale() - 0.78).abs() < EPS);
        assert_close(cam.canvas_to_screen(under_center), center);
        cam.zoom_out();
        assert!((cam.scale() - 0.6).abs() < EPS);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut cam = camera();
        cam.pan(Vec2::new(300.0, 300.0));
        cam.zoom_in();
        cam.resize(Vec2::new(400.0, 200.0));
        cam.reset();
        assert_eq!(cam.scale(), 0.6);
        assert_eq!(cam.offset(), Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_zoom_states() {
        assert_eq!(ZoomState::from_scale(0.2), ZoomState::Overview);
        assert_eq!(ZoomState::from_scale(0.35), ZoomState::Overview);
        assert_eq!(ZoomState::from_scale(0.6), ZoomState::Normal);
        assert_eq!(ZoomState::from_scale(0.8), ZoomState::Detail);
        assert_eq!(ZoomState::from_scale(1.5), ZoomState::Reading);
        assert_eq!(camera().zoom_percent(), 60);
    }
}
