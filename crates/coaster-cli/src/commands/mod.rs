//! CLI command implementations

pub mod check;
pub mod export;
pub mod ride;
pub mod simulate;

use anyhow::{Context, Result};
use coaster_core::{RideConfig, Vec3};
use coaster_track::Ride;
use std::path::Path;

/// Load the layered config and build the classic ride from it.
pub fn load_ride(config: Option<&Path>) -> Result<Ride> {
    let config = RideConfig::load(config).context("Failed to load ride config")?;
    Ok(Ride::classic(config))
}

pub fn fmt_vec3(v: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}
