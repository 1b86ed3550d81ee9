//! Workbench - spatial canvas of field notes
//!
//! Artifacts are laid out in radial clusters by primary tag, connected by
//! curves wherever they share tags, and can be dragged around a pannable,
//! zoomable canvas. Dragged positions persist across sessions.

pub mod canvas;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod storage;
pub mod visualization;

pub use canvas::Workbench;
pub use error::WorkbenchError;
