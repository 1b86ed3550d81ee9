//! Radial cluster layout.
//!
//! Artifacts are grouped by their first focus tag. Clusters sit on a circle
//! around the canvas origin, starting at the top and going clockwise in order
//! of first appearance. Inside a cluster, items spiral outward from the
//! cluster center with a little random jitter so the board looks hand-placed.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::math::Vec2;
use indexmap::IndexMap;
use rand::Rng;

use crate::config::LayoutConfig;
use crate::models::Artifact;

/// Cluster name for artifacts without any focus tag.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Growth of the in-cluster radius per item index.
const ITEM_RADIUS_STEP: f32 = 0.3;
/// In-cluster radius of the first item, as a fraction of the item spacing.
const ITEM_RADIUS_BASE: f32 = 0.5;

/// A group of artifacts sharing a primary tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Primary tag, or [`UNCATEGORIZED`].
    pub name: String,
    /// Angle of the cluster center around the origin (radians).
    pub angle: f32,
    /// Cluster center in canvas space.
    pub center: Vec2,
    /// Indices into the artifact slice, in input order.
    pub members: Vec<usize>,
}

/// Output of one layout pass.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// Computed position per artifact id, in input order.
    pub positions: IndexMap<String, Vec2>,
    /// Clusters in angular order.
    pub clusters: Vec<Cluster>,
}

impl Layout {
    pub fn position(&self, id: &str) -> Option<Vec2> {
        self.positions.get(id).copied()
    }

    /// Name of the cluster holding the artifact at `index`.
    pub fn cluster_of(&self, index: usize) -> Option<&str> {
        self.clusters
            .iter()
            .find(|c| c.members.contains(&index))
            .map(|c| c.name.as_str())
    }
}

/// Radial cluster layout engine.
#[derive(Debug, Clone)]
pub struct ClusterLayout {
    cluster_radius: f32,
    item_spacing: f32,
    jitter: f32,
}

impl ClusterLayout {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            cluster_radius: config.cluster_radius,
            item_spacing: config.item_spacing,
            jitter: config.jitter.abs(),
        }
    }

    pub fn cluster_radius(&self) -> f32 {
        self.cluster_radius
    }

    /// Group artifacts by primary tag and place cluster centers.
    pub fn clusters(&self, artifacts: &[Artifact]) -> Vec<Cluster> {
        let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::new();
        for (index, artifact) in artifacts.iter().enumerate() {
            let key = artifact.primary_tag().unwrap_or(UNCATEGORIZED);
            groups.entry(key).or_default().push(index);
        }

        let count = groups.len();
        groups
            .into_iter()
            .enumerate()
            .map(|(cluster_index, (name, members))| {
                let angle = (cluster_index as f32 / count as f32) * TAU - FRAC_PI_2;
                Cluster {
                    name: name.to_string(),
                    angle,
                    center: Vec2::new(angle.cos(), angle.sin()) * self.cluster_radius,
                    members,
                }
            })
            .collect()
    }

    /// Compute a position for every artifact.
    ///
    /// Positions vary between calls unless `rng` is seeded identically.
    pub fn layout<R: Rng + ?Sized>(&self, artifacts: &[Artifact], rng: &mut R) -> Layout {
        let clusters = self.clusters(artifacts);
        let mut placed = vec![Vec2::ZERO; artifacts.len()];

        for cluster in &clusters {
            let size = cluster.members.len() as f32;
            for (k, &index) in cluster.members.iter().enumerate() {
                let item_angle = (k as f32 / size) * TAU;
                let item_radius =
                    self.item_spacing * (ITEM_RADIUS_BASE + k as f32 * ITEM_RADIUS_STEP);
                let jitter = Vec2::new(self.sample_jitter(rng), self.sample_jitter(rng));
                placed[index] = cluster.center
                    + Vec2::new(item_angle.cos(), item_angle.sin()) * item_radius
                    + jitter;
            }
        }

        let positions = artifacts
            .iter()
            .zip(placed)
            .map(|(artifact, position)| (artifact.id.clone(), position))
            .collect();

        tracing::debug!(
            artifacts = artifacts.len(),
            clusters = clusters.len(),
            "Computed cluster layout"
        );

        Layout {
            positions,
            clusters,
        }
    }

    /// Largest distance an item of a cluster with `size` members can sit from its center.
    pub fn max_item_distance(&self, size: usize) -> f32 {
        let last = size.saturating_sub(1) as f32;
        self.item_spacing * (ITEM_RADIUS_BASE + last * ITEM_RADIUS_STEP)
            + self.jitter * std::f32::consts::SQRT_2
    }

    fn sample_jitter<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.jitter == 0.0 {
            0.0
        } else {
            rng.gen_range(-self.jitter..=self.jitter)
        }
    }
}
