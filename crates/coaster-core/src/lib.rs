//! Coaster Core - Curve engine for the Coaster ride
//!
//! This crate provides the math every other Coaster crate builds on:
//! - `ControlPointSet` - The anchor points of the closed ride path
//! - `CurveEvaluator` - Uniform cubic B-spline position, velocity, acceleration
//! - `build_frame` - Moving reference frame along the path
//! - `TiltSolver` - Curvature-driven banking of the up vector
//! - `SpeedModel` - Energy-conservation speed readout
//! - `RideConfig` - Layered TOML configuration
//! - Error types and Result alias

pub mod config;
pub mod control_points;
pub mod curve;
mod error;
pub mod frame;
pub mod speed;
pub mod tilt;
mod types;

pub use config::RideConfig;
pub use control_points::{ClassicLoop, ControlPointSet, ControlPointSource, ParameterDomain};
pub use curve::{CurveEvaluator, CurveSample, Derivative};
pub use error::{CoasterError, Result};
pub use frame::{build_frame, Frame};
pub use speed::SpeedModel;
pub use tilt::{Tilt, TiltMode, TiltSolver};
pub use types::{Color, Vec3};
