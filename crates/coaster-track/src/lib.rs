//! Coaster Track - Ride geometry and animation
//!
//! Builds on `coaster-core` to turn a control point set into something that
//! can be animated and drawn:
//! - `PathSampler` - fixed-step walk along the path with a frame per sample
//! - `emit_rail_strip` / `rail_layout` - rail quad strips
//! - Support columns and scenery
//! - `Ride` - per-tick animation, camera placement, scene assembly
//! - OBJ / JSON export and whole-track inspection

pub mod animation;
pub mod camera;
pub mod export;
pub mod geometry;
pub mod inspect;
pub mod rails;
pub mod ride;
pub mod sampler;
pub mod scenery;
pub mod supports;

pub use animation::{AnimationState, CameraMode, PathParameter};
pub use camera::CameraPlacement;
pub use export::{export_scene, ExportFormat};
pub use geometry::{SceneGeometry, Strip, StripKind};
pub use inspect::TrackReport;
pub use rails::{emit_rail_strip, rail_layout, RailFace, RailStripParams};
pub use ride::{Ride, TickReport};
pub use sampler::{FrameSample, PathSampler};
