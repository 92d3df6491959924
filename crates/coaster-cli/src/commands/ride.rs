//! Ride command - opens the player window

use anyhow::Result;
use std::path::PathBuf;

pub struct RideArgs {
    pub config: Option<PathBuf>,
    pub fullscreen: bool,
}

pub fn run(args: RideArgs) -> Result<()> {
    let ride = super::load_ride(args.config.as_deref())?;

    println!("Track: {} ({} control points)", ride.points().name(), ride.points().len());
    println!();
    println!("{}", coaster_player::CONTROLS);

    coaster_player::run(ride, args.fullscreen)
}
