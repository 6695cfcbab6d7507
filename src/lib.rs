//! Santa Dash - A single-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (jump physics, spawning, collisions, score)
//! - `platform`: Frame driver and the collaborator traits the host implements
//! - `settings`: User preferences
//! - `renderer`: Canvas 2D rendering (web only)
//! - `audio`: Procedural Web Audio cues (web only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use platform::{DriverPhase, FrameDriver, HostEvent};
pub use settings::Settings;

/// Game configuration constants
///
/// Everything is expressed per frame: the simulation advances once per display
/// refresh, not by elapsed wall time.
pub mod consts {
    /// Thickness of the ground strip at the bottom of the screen
    pub const FLOOR_HEIGHT: f32 = 80.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 64.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    /// Upward impulse applied on jump (pixels/frame)
    pub const JUMP_POWER: f32 = 15.0;
    /// Downward acceleration while airborne (pixels/frame²)
    pub const GRAVITY: f32 = 0.8;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 32.0;
    pub const OBSTACLE_HEIGHT: f32 = 32.0;
    /// Leftward scroll speed (pixels/frame)
    pub const OBSTACLE_SPEED: f32 = 6.0;
    /// Frames until the first obstacle
    pub const OBSTACLE_FIRST_INTERVAL: u32 = 90;
    /// Bounds of the randomized spawn interval, inclusive (frames)
    pub const OBSTACLE_MIN_INTERVAL: u32 = 60;
    pub const OBSTACLE_MAX_INTERVAL: u32 = 120;

    /// Clouds spawn on a fixed cadence (frames)
    pub const CLOUD_INTERVAL: u32 = 120;
    /// Clouds are dropped once their x passes this far off the left edge
    pub const CLOUD_DESPAWN_X: f32 = -200.0;
    pub const CLOUD_MIN_Y: f32 = 20.0;
    pub const CLOUD_MIN_SIZE: f32 = 20.0;
    pub const CLOUD_SIZE_RANGE: f32 = 30.0;
    pub const CLOUD_MIN_SPEED: f32 = 1.0;
    pub const CLOUD_SPEED_RANGE: f32 = 1.5;

    /// Score at which the milestone cue plays (once)
    pub const MILESTONE_SCORE: u32 = 10;

    /// Viewport used when the host has not reported one yet
    pub const DEFAULT_SCREEN_WIDTH: f32 = 800.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 600.0;
}
