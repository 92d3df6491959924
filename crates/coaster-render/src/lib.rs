//! Coaster Render - wgpu-based renderer for the ride
//!
//! Draws a `SceneGeometry` as flat-colored triangle strips with depth
//! testing, from a look-at camera with a perspective projection.

mod camera;
mod context;
mod pipeline;
mod primitives;
mod renderer;

pub use camera::{mat4_mul, project_point, Camera, Mat4, IDENTITY};
pub use context::{RenderContext, RenderError};
pub use pipeline::{StripPipeline, ViewUniforms};
pub use primitives::{srgb_to_linear, surface_color, StripBatch, Vertex};
pub use renderer::TrackRenderer;
