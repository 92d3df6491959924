//! Export command - writes scene strips as OBJ or JSON

use anyhow::{Context, Result};
use coaster_track::{export_scene, ExportFormat};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub struct ExportArgs {
    pub output: Option<PathBuf>,
    pub format: String,
    pub ticks: u64,
    pub config: Option<PathBuf>,
}

pub fn run(args: ExportArgs) -> Result<()> {
    let format: ExportFormat = args.format.parse()?;
    let ride = super::load_ride(args.config.as_deref())?;

    let mut state = ride.initial_state();
    for _ in 0..args.ticks {
        state = ride.tick(state).0;
    }
    let scene = ride.build_scene(&state);

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("coaster.{}", format.extension())));
    let file = File::create(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    export_scene(&scene, format, &mut writer)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    writer.flush()?;

    println!(
        "Exported {} strips ({} vertices, {} triangles) as {} to {}",
        scene.strips.len(),
        scene.vertex_count(),
        scene.triangle_count(),
        format,
        output.display()
    );
    Ok(())
}
