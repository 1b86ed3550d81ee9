//! The workbench orchestrator.
//!
//! Owns every canvas subsystem and wires them explicitly. Input methods only
//! mutate state and mark what became stale; [`Workbench::flush`] then applies
//! the camera transform and re-projects connections in one step.

use std::collections::{HashMap, HashSet};

use bevy::math::{Rect, Vec2};
use rand::Rng;

use super::camera::{Camera, CameraTransform, ZoomState};
use super::connections::{canvas_local_center, Connection, ConnectionGraph, CurvePath};
use super::drag::{DragController, DragRelease, PanController};
use super::highlight::{Emphasis, Highlight};
use super::input::{single_touch, PointerEvent, PointerTarget, TouchPhase, WheelDirection, ZoomControl};
use super::layout::{Cluster, ClusterLayout};
use super::positions::PositionStore;
use super::timeline::{Timeline, FADED_OPACITY};
use crate::config::{Config, ConnectionConfig};
use crate::error::WorkbenchError;
use crate::models::Artifact;
use crate::storage::KeyValueStore;

/// An artifact together with where it currently sits on the canvas.
#[derive(Debug, Clone)]
pub struct PlacedArtifact {
    pub artifact: Artifact,
    /// Current canvas position (override, layout, or mid-drag).
    pub position: Vec2,
    /// Position computed by the layout for this render pass.
    pub computed: Vec2,
    /// Whether a persisted override is in effect.
    pub overridden: bool,
}

/// Outcome of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerRelease {
    /// A press on the artifact that never became a drag.
    Click { index: usize },
    /// The artifact was dragged and persisted at `position`.
    Dropped { index: usize, position: Vec2 },
}

/// Per-artifact render state.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactFrame {
    pub index: usize,
    pub position: Vec2,
    pub emphasis: Emphasis,
    /// 1.0, or faded when filtered out by the timeline.
    pub opacity: f32,
    pub dragging: bool,
}

/// A connection projected for the current transform and positions.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedConnection {
    /// Index into [`Workbench::connections`].
    pub index: usize,
    /// Curve in canvas space.
    pub path: CurvePath,
    pub opacity: f32,
    /// Touches the hovered artifact.
    pub active: bool,
}

/// Everything the presentation layer needs to redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUpdate {
    pub transform: CameraTransform,
    pub zoom: ZoomState,
    pub zoom_percent: u32,
    pub highlighting: bool,
    pub artifacts: Vec<ArtifactFrame>,
    pub connections: Vec<ProjectedConnection>,
}

/// Subsystems whose output is stale.
#[derive(Debug, Clone, Copy, Default)]
struct Dirty {
    transform: bool,
    positions: bool,
    marks: bool,
}

impl Dirty {
    fn all() -> Self {
        Self {
            transform: true,
            positions: true,
            marks: true,
        }
    }

    fn any(&self) -> bool {
        self.transform || self.positions || self.marks
    }
}

/// Canvas state for one session.
pub struct Workbench<S> {
    camera: Camera,
    layout: ClusterLayout,
    positions: PositionStore<S>,
    connection_config: ConnectionConfig,
    graph: ConnectionGraph,
    clusters: Vec<Cluster>,
    artifacts: Vec<PlacedArtifact>,
    index: HashMap<String, usize>,
    drags: Vec<DragController>,
    active_drag: Option<usize>,
    pan: PanController,
    highlight: Highlight,
    timeline: Timeline,
    timeline_percent: Option<f32>,
    card_size: Vec2,
    drag_threshold: f32,
    dirty: Dirty,
}

impl<S: KeyValueStore> Workbench<S> {
    /// Wire up an empty workbench. Call [`Workbench::render_artifacts`] once data is loaded.
    pub fn new(config: &Config, store: S) -> Self {
        let viewport = Vec2::new(config.viewport.width, config.viewport.height);
        Self {
            camera: Camera::new(config.camera.clone(), viewport),
            layout: ClusterLayout::new(&config.layout),
            positions: PositionStore::new(store, config.storage.key.clone()),
            connection_config: config.connections.clone(),
            graph: ConnectionGraph::empty(&config.connections),
            clusters: Vec::new(),
            artifacts: Vec::new(),
            index: HashMap::new(),
            drags: Vec::new(),
            active_drag: None,
            pan: PanController::new(),
            highlight: Highlight::new(),
            timeline: Timeline::new(),
            timeline_percent: None,
            card_size: Vec2::new(config.layout.card_width, config.layout.card_height),
            drag_threshold: config.drag.threshold,
            dirty: Dirty::all(),
        }
    }

    // =========================================================================
    // Render pass
    // =========================================================================

    /// Full render pass: layout, overlay saved overrides, rebuild connections.
    ///
    /// Artifacts repeating an earlier id are dropped.
    pub fn render_artifacts<R: Rng + ?Sized>(&mut self, artifacts: Vec<Artifact>, rng: &mut R) {
        let mut seen = HashSet::new();
        let artifacts: Vec<Artifact> = artifacts
            .into_iter()
            .filter(|a| {
                let fresh = seen.insert(a.id.clone());
                if !fresh {
                    tracing::warn!(id = %a.id, "Dropping artifact with duplicate id");
                }
                fresh
            })
            .collect();

        let layout = self.layout.layout(&artifacts, rng);
        self.graph = ConnectionGraph::build(&artifacts, &self.connection_config);

        let overrides = self.positions.all();
        self.index = artifacts
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();
        self.artifacts = artifacts
            .into_iter()
            .map(|artifact| {
                let computed = layout.position(&artifact.id).unwrap_or(Vec2::ZERO);
                let stored = overrides.get(&artifact.id).copied();
                PlacedArtifact {
                    position: stored.unwrap_or(computed),
                    computed,
                    overridden: stored.is_some(),
                    artifact,
                }
            })
            .collect();
        self.clusters = layout.clusters;

        self.drags = vec![DragController::new(self.drag_threshold); self.artifacts.len()];
        self.active_drag = None;
        self.pan.pointer_up();
        self.highlight.clear();
        self.timeline
            .set_percent(self.artifacts.iter().map(|p| &p.artifact), self.timeline_percent);
        self.dirty = Dirty::all();

        tracing::info!(
            artifacts = self.artifacts.len(),
            clusters = self.clusters.len(),
            connections = self.graph.len(),
            overrides = self.artifacts.iter().filter(|p| p.overridden).count(),
            "Rendered artifacts"
        );
    }

    /// Apply pending changes. Returns `None` when nothing changed since the last flush.
    pub fn flush(&mut self) -> Option<FrameUpdate> {
        if !self.dirty.any() {
            return None;
        }
        tracing::trace!(
            transform = self.dirty.transform,
            positions = self.dirty.positions,
            marks = self.dirty.marks,
            "Flushing frame"
        );
        self.dirty = Dirty::default();
        Some(self.frame())
    }

    /// Whether a flush would produce a frame.
    pub fn is_dirty(&self) -> bool {
        self.dirty.any()
    }

    /// Snapshot of the current render state, regardless of dirtiness.
    pub fn frame(&self) -> FrameUpdate {
        let artifacts = self
            .artifacts
            .iter()
            .enumerate()
            .map(|(index, placed)| ArtifactFrame {
                index,
                position: placed.position,
                emphasis: self.highlight.emphasis(&placed.artifact.id),
                opacity: if self.timeline.is_visible(&placed.artifact) {
                    1.0
                } else {
                    FADED_OPACITY
                },
                dragging: self.drags[index].is_dragging(),
            })
            .collect();

        FrameUpdate {
            transform: self.camera.transform(),
            zoom: self.camera.zoom_state(),
            zoom_percent: self.camera.zoom_percent(),
            highlighting: self.highlight.is_highlighting(),
            artifacts,
            connections: self.project_connections(),
        }
    }

    fn project_connections(&self) -> Vec<ProjectedConnection> {
        let canvas_rect = self.canvas_rect();
        let scale = self.camera.scale();
        self.graph
            .connections()
            .iter()
            .enumerate()
            .filter_map(|(index, connection)| {
                let from = self.screen_rect(connection.from_idx)?;
                let to = self.screen_rect(connection.to_idx)?;
                Some(ProjectedConnection {
                    index,
                    path: self.graph.project(from, to, canvas_rect, scale),
                    opacity: self.graph.opacity(connection.strength),
                    active: self.highlight.is_active(index),
                })
            })
            .collect()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn artifacts(&self) -> &[PlacedArtifact] {
        &self.artifacts
    }

    pub fn artifact(&self, index: usize) -> Option<&PlacedArtifact> {
        self.artifacts.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Current canvas position of the artifact `id`.
    pub fn position(&self, id: &str) -> Option<Vec2> {
        self.index_of(id).map(|i| self.artifacts[i].position)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn connections(&self) -> &[Connection] {
        self.graph.connections()
    }

    pub fn graph(&self) -> &ConnectionGraph {
        &self.graph
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn positions(&self) -> &PositionStore<S> {
        &self.positions
    }

    pub fn card_size(&self) -> Vec2 {
        self.card_size
    }

    /// On-screen bounds of the canvas element. Its origin is drawn at the camera offset.
    pub fn canvas_rect(&self) -> Rect {
        let origin = self.camera.offset();
        Rect::from_corners(origin, origin)
    }

    /// On-screen bounds of the artifact card at `index`.
    pub fn screen_rect(&self, index: usize) -> Option<Rect> {
        let placed = self.artifacts.get(index)?;
        Some(Rect::from_center_size(
            self.camera.canvas_to_screen(placed.position),
            self.card_size * self.camera.scale(),
        ))
    }

    /// Whether the timeline currently lets the artifact through.
    pub fn is_visible(&self, index: usize) -> bool {
        self.artifacts
            .get(index)
            .map(|p| self.timeline.is_visible(&p.artifact))
            .unwrap_or(false)
    }

    /// Topmost visible artifact under a screen point.
    pub fn hit_test(&self, point: Vec2) -> Option<usize> {
        (0..self.artifacts.len()).rev().find(|&i| {
            self.is_visible(i)
                && self
                    .screen_rect(i)
                    .map(|rect| rect.contains(point))
                    .unwrap_or(false)
        })
    }

    /// What a press at `point` would land on (controls are resolved by the caller).
    pub fn target_at(&self, point: Vec2) -> PointerTarget {
        self.hit_test(point)
            .map(PointerTarget::Artifact)
            .unwrap_or(PointerTarget::Canvas)
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Dispatch a device-independent pointer event.
    pub fn handle(&mut self, event: PointerEvent) -> Option<PointerRelease> {
        match event {
            PointerEvent::Down { position, target } => {
                self.pointer_down(position, target);
                None
            }
            PointerEvent::Move { position } => {
                self.pointer_move(position);
                None
            }
            PointerEvent::Up => self.pointer_up(),
        }
    }

    /// Touch input. Only single-finger gestures are processed.
    pub fn touch(&mut self, phase: TouchPhase, touches: &[Vec2]) -> Option<PointerRelease> {
        match phase {
            TouchPhase::Start => {
                let point = single_touch(touches)?;
                let target = self.target_at(point);
                self.pointer_down(point, target);
                None
            }
            TouchPhase::Move => {
                let point = single_touch(touches)?;
                self.pointer_move(point);
                None
            }
            TouchPhase::End => self.pointer_up(),
        }
    }

    /// Press the pointer. A drag still in flight from an earlier press is
    /// released first, so at most one controller is ever active.
    pub fn pointer_down(&mut self, position: Vec2, target: PointerTarget) {
        if self.active_drag.is_some() {
            self.pointer_up();
        }
        match target {
            PointerTarget::Artifact(index) => {
                if !self.is_visible(index) {
                    return;
                }
                let Some(rect) = self.screen_rect(index) else {
                    return;
                };
                let center = canvas_local_center(rect, self.canvas_rect(), self.camera.scale());
                self.drags[index].pointer_down(position, center);
                self.active_drag = Some(index);
            }
            other => {
                self.pan.pointer_down(position, &other);
            }
        }
    }

    pub fn pointer_move(&mut self, position: Vec2) {
        if let Some(index) = self.active_drag {
            if let Some(center) = self.drags[index].pointer_move(position, self.camera.scale()) {
                self.artifacts[index].position = center;
                self.dirty.positions = true;
            }
        } else if let Some(delta) = self.pan.pointer_move(position) {
            self.camera.pan(delta);
            self.dirty.transform = true;
        }
    }

    /// Release the pointer. A finished drag is persisted before returning.
    pub fn pointer_up(&mut self) -> Option<PointerRelease> {
        self.pan.pointer_up();
        let index = self.active_drag.take()?;
        match self.drags[index].pointer_up() {
            DragRelease::Ignored => None,
            DragRelease::Click => Some(PointerRelease::Click { index }),
            DragRelease::Dropped(position) => {
                let placed = &mut self.artifacts[index];
                placed.position = position;
                placed.overridden = true;
                self.positions.save(&placed.artifact.id, position);
                self.dirty.positions = true;
                tracing::debug!(id = %placed.artifact.id, ?position, "Artifact dropped");
                Some(PointerRelease::Dropped { index, position })
            }
        }
    }

    /// Click on an artifact. Returns its navigation target unless the click
    /// is the tail end of a drag.
    pub fn click(&mut self, index: usize) -> Option<&str> {
        let drag = self.drags.get_mut(index)?;
        if !drag.take_click() {
            tracing::debug!(index, "Click after drag suppressed");
            return None;
        }
        Some(self.artifacts[index].artifact.url.as_str())
    }

    // =========================================================================
    // Camera input
    // =========================================================================

    /// One wheel tick at `point`; `delta_y > 0` zooms out.
    pub fn wheel(&mut self, point: Vec2, delta_y: f32) {
        if let Some(direction) = WheelDirection::from_delta(delta_y) {
            self.camera.wheel(point, direction == WheelDirection::In);
            self.dirty.transform = true;
        }
    }

    pub fn zoom_control(&mut self, control: ZoomControl) {
        match control {
            ZoomControl::In => self.camera.zoom_in(),
            ZoomControl::Out => self.camera.zoom_out(),
            ZoomControl::Reset => self.camera.reset(),
        }
        self.dirty.transform = true;
    }

    pub fn zoom_in(&mut self) {
        self.zoom_control(ZoomControl::In);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_control(ZoomControl::Out);
    }

    pub fn zoom_at(&mut self, point: Vec2, factor: f32) {
        self.camera.zoom_at(point, factor);
        self.dirty.transform = true;
    }

    pub fn set_scale(&mut self, value: f32) {
        self.camera.set_scale(value);
        self.dirty.transform = true;
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.camera.pan(delta);
        self.dirty.transform = true;
    }

    pub fn reset_view(&mut self) {
        self.zoom_control(ZoomControl::Reset);
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.camera.resize(viewport);
        self.dirty.transform = true;
    }

    // =========================================================================
    // Highlight, timeline, overrides
    // =========================================================================

    pub fn hover_enter(&mut self, index: usize) {
        let Some(placed) = self.artifacts.get(index) else {
            return;
        };
        self.highlight.enter(&placed.artifact.id, &self.graph);
        self.dirty.marks = true;
    }

    pub fn hover_leave(&mut self) {
        self.highlight.clear();
        self.dirty.marks = true;
    }

    /// Filter by creation date; `None` shows everything.
    pub fn set_timeline(&mut self, percent: Option<f32>) {
        self.timeline_percent = percent;
        self.timeline
            .set_percent(self.artifacts.iter().map(|p| &p.artifact), percent);
        self.dirty.marks = true;
    }

    /// Delete the persisted override for `id` and move the artifact back to its
    /// computed layout position if it is on the canvas.
    pub fn clear_override(&mut self, id: &str) -> Result<bool, WorkbenchError> {
        let removed = self.positions.remove(id)?;
        if let Some(index) = self.index_of(id) {
            let placed = &mut self.artifacts[index];
            placed.position = placed.computed;
            placed.overridden = false;
            self.dirty.positions = true;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArtifactType;
    use crate::storage::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn artifact(id: &str, tags: &[&str]) -> Artifact {
        Artifact {
            id: id.to_string(),
            title: id.to_string(),
            kind: ArtifactType::Note,
            focus: tags.iter().map(|t| t.to_string()).collect(),
            status: String::new(),
            created: "2024-01-01".to_string(),
            revisited: None,
            media: None,
            url: format!("/notes/{id}"),
        }
    }

    fn workbench() -> Workbench<MemoryStore> {
        let mut wb = Workbench::new(&Config::default(), MemoryStore::new());
        wb.render_artifacts(
            vec![
                artifact("a", &["Design", "Color"]),
                artifact("b", &["Design", "Motion"]),
                artifact("c", &["Brand"]),
            ],
            &mut StdRng::seed_from_u64(3),
        );
        wb
    }

    #[test]
    fn test_flush_only_when_dirty() {
        let mut wb = workbench();
        assert!(wb.flush().is_some());
        assert!(wb.flush().is_none());
        wb.pan_by(Vec2::new(1.0, 0.0));
        assert!(wb.flush().is_some());
    }

    #[test]
    fn test_screen_rect_centers_on_position() {
        let wb = workbench();
        let rect = wb.screen_rect(0).unwrap();
        let expected = wb.camera().canvas_to_screen(wb.artifacts()[0].position);
        assert!((rect.center() - expected).length() < 1e-3);
        assert!((rect.size() - wb.card_size() * 0.6).length() < 1e-3);
    }

    #[test]
    fn test_projection_endpoints_match_positions() {
        let mut wb = workbench();
        let frame = wb.flush().unwrap();
        assert_eq!(frame.connections.len(), 1);
        let path = frame.connections[0].path;
        assert!((path.from - wb.artifacts()[0].position).length() < 1e-2);
        assert!((path.to - wb.artifacts()[1].position).length() < 1e-2);
    }

    #[test]
    fn test_duplicate_ids_dropped() {
        let mut wb = Workbench::new(&Config::default(), MemoryStore::new());
        wb.render_artifacts(
            vec![artifact("a", &["X"]), artifact("a", &["X"])],
            &mut StdRng::seed_from_u64(0),
        );
        assert_eq!(wb.artifacts().len(), 1);
        assert!(wb.connections().is_empty());
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut wb = Workbench::new(&Config::default(), MemoryStore::new());
        wb.render_artifacts(
            vec![artifact("under", &["X"]), artifact("over", &["Y"])],
            &mut StdRng::seed_from_u64(0),
        );
        // Drag the second card on top of the first
        let under = wb.screen_rect(0).unwrap().center();
        let over = wb.screen_rect(1).unwrap().center();
        wb.pointer_down(over, PointerTarget::Artifact(1));
        wb.pointer_move(under);
        wb.pointer_up();
        assert!((wb.artifacts()[1].position - wb.artifacts()[0].position).length() < 1e-2);
        assert_eq!(wb.hit_test(under), Some(1));
        assert_eq!(wb.hit_test(Vec2::new(-10_000.0, -10_000.0)), None);
    }

    #[test]
    fn test_clear_override_reverts_to_layout() {
        let mut wb = workbench();
        let computed = wb.artifacts()[2].computed;
        let start = wb.screen_rect(2).unwrap().center();
        wb.pointer_down(start, PointerTarget::Artifact(2));
        wb.pointer_move(start + Vec2::new(40.0, 0.0));
        wb.pointer_up();
        assert!(wb.artifacts()[2].overridden);

        assert!(wb.clear_override("c").unwrap());
        assert_eq!(wb.position("c"), Some(computed));
        assert!(wb.positions().load("c").is_none());
        assert!(!wb.clear_override("c").unwrap());
    }

    #[test]
    fn test_second_press_releases_active_drag() {
        let mut wb = workbench();
        let a = wb.screen_rect(0).unwrap().center();
        let b = wb.screen_rect(1).unwrap().center();

        wb.pointer_down(a, PointerTarget::Artifact(0));
        wb.pointer_move(a + Vec2::new(40.0, 0.0));
        assert!(wb.frame().artifacts[0].dragging);

        // A press on another card without a release in between
        wb.pointer_down(b, PointerTarget::Artifact(1));
        assert!(!wb.frame().artifacts[0].dragging);
        assert!(wb.positions().load("a").is_some());
        assert!(wb.artifacts()[0].overridden);

        assert_eq!(wb.pointer_up(), Some(PointerRelease::Click { index: 1 }));
        assert!(!wb.frame().artifacts[0].dragging);
        assert!(wb.positions().load("b").is_none());
    }

    #[test]
    fn test_faded_artifacts_not_interactive() {
        let mut wb = Workbench::new(&Config::default(), MemoryStore::new());
        let mut newer = artifact("new", &["X"]);
        newer.created = "2024-06-01".to_string();
        wb.render_artifacts(
            vec![artifact("old", &["X"]), newer],
            &mut StdRng::seed_from_u64(0),
        );
        wb.set_timeline(Some(0.0));

        let frame = wb.flush().unwrap();
        assert_eq!(frame.artifacts[0].opacity, 1.0);
        assert_eq!(frame.artifacts[1].opacity, FADED_OPACITY);

        let center = wb.screen_rect(1).unwrap().center();
        assert_ne!(wb.hit_test(center), Some(1));
        wb.pointer_down(center, PointerTarget::Artifact(1));
        wb.pointer_move(center + Vec2::new(50.0, 0.0));
        assert_eq!(wb.pointer_up(), None);
    }
}
