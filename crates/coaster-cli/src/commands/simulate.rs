//! Simulate command - headless tick loop with telemetry

use super::fmt_vec3;
use anyhow::{Context, Result};
use coaster_track::TickReport;
use std::path::PathBuf;

pub struct SimulateArgs {
    pub ticks: u64,
    pub format: String,
    pub config: Option<PathBuf>,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let ride = super::load_ride(args.config.as_deref())?;

    let mut state = ride.initial_state();
    let mut degenerate = 0usize;
    let mut laps = 0usize;
    for _ in 0..args.ticks {
        let (next, report) = ride.tick(state);
        state = next;
        degenerate += report.degenerate as usize;
        laps += report.wrapped as usize;

        if args.format == "json" {
            let line = serde_json::to_string(&report).context("Failed to serialize tick")?;
            println!("{}", line);
        } else {
            println!("{}", format_tick(&report));
        }
    }

    tracing::info!(ticks = args.ticks, laps, degenerate, "simulation finished");
    Ok(())
}

fn format_tick(r: &TickReport) -> String {
    format!(
        "#{:<5} u={:>7.3} pos={} vel={} k={:>8.4} up={} speed={:>7.3} eye={} target={}{}",
        r.tick,
        r.u,
        fmt_vec3(r.position),
        fmt_vec3(r.velocity),
        r.curvature,
        fmt_vec3(r.world_up),
        r.speed,
        fmt_vec3(r.camera.eye),
        fmt_vec3(r.camera.target),
        if r.degenerate { " [degenerate]" } else { "" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use coaster_core::RideConfig;
    use coaster_track::Ride;

    #[test]
    fn text_line_carries_tick_fields() {
        let ride = Ride::classic(RideConfig::default());
        let (_, report) = ride.tick(ride.initial_state());
        let line = format_tick(&report);
        assert!(line.starts_with("#1 "));
        assert!(line.contains("u=  3.000"));
        assert!(line.contains("speed="));
        assert!(!line.contains("[degenerate]"));
    }
}
