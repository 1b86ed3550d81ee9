//! Tag-overlap connections between artifacts and their curve geometry.
//!
//! The edge set is built once per render pass with an O(n²) pairwise scan.
//! After that only the geometry is re-projected, on every camera or drag
//! update, which is O(edges).

use std::collections::HashSet;

use bevy::math::{Rect, Vec2};

use crate::config::ConnectionConfig;
use crate::models::Artifact;

/// An undirected edge between two artifacts sharing at least one tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Artifact id of the earlier endpoint in input order.
    pub from: String,
    /// Artifact id of the later endpoint.
    pub to: String,
    /// Index of `from` in the artifact list the graph was built from.
    pub from_idx: usize,
    /// Index of `to` in the artifact list the graph was built from.
    pub to_idx: usize,
    /// Number of shared tags (always ≥ 1).
    pub strength: usize,
    /// Shared tags, in the order they appear on `from`.
    pub tags: Vec<String>,
}

impl Connection {
    /// Whether `id` is one of the endpoints.
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }

    /// The endpoint opposite to `id`, if `id` is an endpoint.
    pub fn other(&self, id: &str) -> Option<&str> {
        if self.from == id {
            Some(&self.to)
        } else if self.to == id {
            Some(&self.from)
        } else {
            None
        }
    }
}

/// A quadratic Bézier from `from` to `to` bending through `control`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePath {
    pub from: Vec2,
    pub control: Vec2,
    pub to: Vec2,
}

impl CurvePath {
    /// Point on the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.from * (u * u) + self.control * (2.0 * u * t) + self.to * (t * t)
    }

    /// `segments + 1` evenly spaced points along the curve.
    pub fn sample(&self, segments: usize) -> Vec<Vec2> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f32 / segments as f32))
            .collect()
    }

    /// SVG path data (`M x y Q cx cy x y`).
    pub fn to_svg(&self) -> String {
        format!(
            "M {} {} Q {} {} {} {}",
            self.from.x, self.from.y, self.control.x, self.control.y, self.to.x, self.to.y
        )
    }
}

/// Center of a screen rect in canvas-local coordinates.
///
/// `canvas_rect` is the on-screen bounds of the canvas element; its `min`
/// corner is where the canvas origin is drawn.
pub fn canvas_local_center(rect: Rect, canvas_rect: Rect, scale: f32) -> Vec2 {
    (rect.center() - canvas_rect.min) / scale
}

/// Connection set plus the styling used to project it.
#[derive(Debug, Clone)]
pub struct ConnectionGraph {
    connections: Vec<Connection>,
    curvature: f32,
    base_opacity: f32,
    opacity_per_tag: f32,
}

impl ConnectionGraph {
    /// An empty graph with the given styling.
    pub fn empty(config: &ConnectionConfig) -> Self {
        Self {
            connections: Vec::new(),
            curvature: config.curvature,
            base_opacity: config.base_opacity,
            opacity_per_tag: config.opacity_per_tag,
        }
    }

    /// Build the full edge set: one connection per unordered pair sharing a tag.
    pub fn build(artifacts: &[Artifact], config: &ConnectionConfig) -> Self {
        let mut graph = Self::empty(config);

        for i in 0..artifacts.len() {
            for j in (i + 1)..artifacts.len() {
                let (a, b) = (&artifacts[i], &artifacts[j]);
                let tags = shared_tags(&a.focus, &b.focus);
                if tags.is_empty() {
                    continue;
                }
                graph.connections.push(Connection {
                    from: a.id.clone(),
                    to: b.id.clone(),
                    from_idx: i,
                    to_idx: j,
                    strength: tags.len(),
                    tags,
                });
            }
        }

        tracing::debug!(
            artifacts = artifacts.len(),
            connections = graph.connections.len(),
            "Built connection graph"
        );
        graph
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Connections having `id` as an endpoint, with their indices.
    pub fn touching<'a>(&'a self, id: &'a str) -> impl Iterator<Item = (usize, &'a Connection)> + 'a {
        self.connections
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.touches(id))
    }

    /// Ids of every artifact directly connected to `id` (excluding `id`).
    pub fn neighbors(&self, id: &str) -> HashSet<String> {
        self.touching(id)
            .filter_map(|(_, c)| c.other(id))
            .map(str::to_string)
            .collect()
    }

    /// Line opacity for a connection of the given strength, capped at 1.
    pub fn opacity(&self, strength: usize) -> f32 {
        (self.base_opacity + strength as f32 * self.opacity_per_tag).min(1.0)
    }

    /// Curve between the current on-screen bounds of two artifacts, in canvas space.
    ///
    /// The control point is pushed `curvature` units along the unit
    /// perpendicular `(-dy, dx) / len`. Coincident centers yield a straight,
    /// zero-length path.
    pub fn project(&self, from_rect: Rect, to_rect: Rect, canvas_rect: Rect, scale: f32) -> CurvePath {
        let from = canvas_local_center(from_rect, canvas_rect, scale);
        let to = canvas_local_center(to_rect, canvas_rect, scale);
        let mid = (from + to) / 2.0;

        let delta = to - from;
        let len = delta.length();
        let control = if len > f32::EPSILON {
            mid + Vec2::new(-delta.y / len, delta.x / len) * self.curvature
        } else {
            mid
        };

        CurvePath { from, control, to }
    }
}

/// Distinct tags of `a` that also appear in `b`, in `a`'s order.
fn shared_tags(a: &[String], b: &[String]) -> Vec<String> {
    let mut shared: Vec<String> = Vec::new();
    for tag in a {
        if b.contains(tag) && !shared.contains(tag) {
            shared.push(tag.clone());
        }
    }
    shared
}
