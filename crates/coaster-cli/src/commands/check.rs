//! Check command - sweeps the track and reports invariant failures

use anyhow::Result;
use coaster_track::TrackReport;
use std::path::Path;

pub fn run(config: Option<&Path>) -> Result<()> {
    let ride = super::load_ride(config)?;
    let report = TrackReport::sweep(&ride);

    println!("{}", report.summary());

    if !report.is_healthy() {
        println!();
        println!("Track check failed.");
        std::process::exit(1);
    }

    println!();
    println!("Track check passed.");
    Ok(())
}
