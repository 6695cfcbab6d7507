//! Platform abstraction layer
//!
//! The simulation never touches the host directly. The frame driver talks to
//! the host through these traits:
//! - Frame scheduling (`TickSource`)
//! - Drawing (`Renderer`)
//! - Sound cues (`AudioCues`)
//! - Score text (`ScoreDisplay`)
//!
//! The browser implements them with requestAnimationFrame, Canvas 2D, Web Audio
//! and the DOM; tests and the native runner use `headless`.

pub mod driver;
pub mod headless;

pub use driver::{DriverPhase, FrameDriver, HostEvent};
pub use headless::{Headless, ManualTicks};

use crate::sim::GameState;

/// Source of display-refresh callbacks
pub trait TickSource {
    /// Ask the host to call the driver's `frame` once more
    fn request_frame(&mut self);
}

/// Draws the world
pub trait Renderer {
    /// Draw one frame: background, clouds, player, monsters (back to front)
    fn draw(&mut self, state: &GameState);
    /// The run has ended; show the game-over indicator instead of a new frame
    fn show_game_over(&mut self, state: &GameState);
}

/// Fire-and-forget sound cues. Replaying a cue restarts it.
pub trait AudioCues {
    fn play_jump_cue(&mut self);
    fn play_milestone_cue(&mut self);
}

/// Shows the running score
pub trait ScoreDisplay {
    fn show_score(&mut self, score: u32);
}
