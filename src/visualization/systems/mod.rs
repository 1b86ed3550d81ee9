//! ECS systems for the canvas window.
//!
//! Input systems only feed the workbench; `apply_frame_system` is the single
//! place engine output reaches entities.

pub mod camera;
pub mod interaction;
pub mod render;

pub use camera::{camera_input_system, window_resize_system};
pub use interaction::{hover_system, pointer_input_system, timeline_input_system, touch_input_system};
pub use render::{apply_frame_system, draw_connections_system};
