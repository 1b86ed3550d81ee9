//! Spatial canvas engine.
//!
//! Pure state and geometry, independent of any windowing backend:
//!
//! - `camera` - pan/zoom transform between canvas and screen space
//! - `layout` - radial cluster placement grouped by primary tag
//! - `positions` - persisted per-artifact position overrides
//! - `connections` - tag-overlap graph and curve projection
//! - `drag` - drag and pan pointer state machines
//! - `highlight` - hover emphasis of an artifact's neighborhood
//! - `timeline` - creation-date filter
//! - `workbench` - owns all of the above and produces render frames

mod camera;
mod connections;
mod drag;
mod highlight;
mod input;
mod layout;
mod positions;
mod timeline;
mod workbench;

pub use camera::{Camera, CameraTransform, ZoomState};
pub use connections::{canvas_local_center, Connection, ConnectionGraph, CurvePath};
pub use drag::{DragController, DragPhase, DragRelease, PanController, PanPhase};
pub use highlight::{Emphasis, Highlight};
pub use input::{single_touch, PointerEvent, PointerTarget, TouchPhase, WheelDirection, ZoomControl};
pub use layout::{Cluster, ClusterLayout, Layout, UNCATEGORIZED};
pub use positions::{PositionStore, StoredPosition, DEFAULT_POSITIONS_KEY};
pub use timeline::{date_range, Timeline, FADED_OPACITY};
pub use workbench::{
    ArtifactFrame, FrameUpdate, PlacedArtifact, PointerRelease, ProjectedConnection, Workbench,
};
