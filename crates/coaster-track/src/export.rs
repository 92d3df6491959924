//! Scene export to Wavefront OBJ and JSON.

use crate::geometry::SceneGeometry;
use coaster_core::{CoasterError, Result};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Obj,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Obj => "obj",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = CoasterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "obj" => Ok(ExportFormat::Obj),
            "json" => Ok(ExportFormat::Json),
            other => Err(CoasterError::ExportError(format!(
                "unknown export format '{other}' (expected 'obj' or 'json')"
            ))),
        }
    }
}

pub fn export_scene(scene: &SceneGeometry, format: ExportFormat, out: &mut impl Write) -> Result<()> {
    match format {
        ExportFormat::Obj => write_obj(scene, out),
        ExportFormat::Json => write_json(scene, out),
    }
}

/// One object per strip; vertex colors follow the position (`v x y z r g b`)
/// and every quad becomes two triangles.
pub fn write_obj(scene: &SceneGeometry, out: &mut impl Write) -> Result<()> {
    writeln!(out, "# coaster scene")?;
    writeln!(
        out,
        "# {} strips, {} vertices, {} triangles",
        scene.strips.len(),
        scene.vertex_count(),
        scene.triangle_count()
    )?;

    // OBJ indices are 1-based and global across objects
    let mut base = 1usize;
    for (i, strip) in scene.strips.iter().enumerate() {
        writeln!(out, "o {}_{}", strip.kind.label(), i)?;
        let c = strip.color;
        for v in &strip.vertices {
            writeln!(
                out,
                "v {:.6} {:.6} {:.6} {:.4} {:.4} {:.4}",
                v.x, v.y, v.z, c.r, c.g, c.b
            )?;
        }
        for [a, b, d] in strip.triangles() {
            writeln!(out, "f {} {} {}", base + a, base + b, base + d)?;
        }
        base += strip.vertices.len();
    }
    Ok(())
}

pub fn write_json(scene: &SceneGeometry, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, scene)
        .map_err(|e| CoasterError::ExportError(e.to_string()))?;
    writeln!(out)?;
    Ok(())
}
