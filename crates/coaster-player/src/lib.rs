//! Coaster Player - windowed ride player library
//!
//! This crate provides the `RideApp` application handler, which animates a
//! `Ride` on a fixed tick and draws it with the wgpu renderer.

mod ride_app;

pub use ride_app::RideApp;

use anyhow::Result;
use coaster_track::Ride;
use winit::event_loop::EventLoop;

pub const CONTROLS: &str = "Controls:\n  C        - Toggle orbit / ride camera\n  Q, Esc   - Quit";

/// Open a window and run `ride` until the user quits.
pub fn run(ride: Ride, fullscreen: bool) -> Result<()> {
    let event_loop = EventLoop::new()?;

    let mut app = RideApp::new(ride, fullscreen);
    event_loop.run_app(&mut app)?;

    match app.take_failure() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
