//! Coaster Runtime - Event loop building blocks
//!
//! - `GameClock` - fixed-timestep accumulator driving animation ticks
//! - `InputState` - keyboard tracking with action bindings

mod clock;
mod input;

pub use clock::GameClock;
pub use input::{Action, InputState};
