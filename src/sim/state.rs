//! Game state and core simulation types
//!
//! One `GameState` holds everything a run needs, including its seeded RNG, so
//! a run is reproducible from the seed plus the sequence of jump inputs.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawner::Spawner;
use crate::consts::*;

/// Screen bounds reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Returns None for zero, negative or non-finite sizes, and for screens
    /// too short to fit the player standing on the floor line
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) && height - FLOOR_HEIGHT >= PLAYER_HEIGHT {
            Some(Self { width, height })
        } else {
            None
        }
    }

    /// Top of the ground strip; the player and monsters stand on it
    #[inline]
    pub fn floor_line(&self) -> f32 {
        self.height - FLOOR_HEIGHT
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/frame, negative is up)
    pub vel_y: f32,
    /// True while mid-arc
    pub jumping: bool,
}

impl Player {
    /// A player standing on the given floor line
    pub fn on_floor(floor_line: f32) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            pos: Vec2::new(PLAYER_X, floor_line - size.y),
            size,
            vel_y: 0.0,
            jumping: false,
        }
    }

    /// y of the top edge when standing on `floor_line`
    #[inline]
    pub fn resting_y(&self, floor_line: f32) -> f32 {
        floor_line - self.size.y
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Advance one frame of the jump arc. Landing is instantaneous: the player
    /// snaps to the floor and stops, no bounce. Velocity is zeroed on landing
    /// only for tidiness; the next jump overwrites it anyway.
    pub fn integrate(&mut self, floor_line: f32) {
        if !self.jumping {
            return;
        }
        self.pos.y += self.vel_y;
        self.vel_y += GRAVITY;

        let rest = self.resting_y(floor_line);
        if self.pos.y >= rest {
            self.pos.y = rest;
            self.vel_y = 0.0;
            self.jumping = false;
        }
    }
}

/// Monster variants (visual only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Fire,
    Wing,
}

/// A monster scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
    /// Set once the player has cleared it
    pub scored: bool,
}

impl Obstacle {
    /// A monster standing on the floor line at horizontal position `x`
    pub fn new(x: f32, floor_line: f32, kind: ObstacleKind) -> Self {
        Self {
            pos: Vec2::new(x, floor_line - OBSTACLE_HEIGHT),
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            kind,
            scored: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Fully past the left edge of the screen
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x <= -self.size.x
    }
}

/// Background cloud. Never collides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub size: f32,
    /// Leftward drift (pixels/frame)
    pub speed: f32,
}

impl Cloud {
    pub fn new(x: f32, y: f32, size: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size,
            speed,
        }
    }

    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x <= CLOUD_DESPAWN_X
    }
}

/// Things that happened during a step, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Jump accepted
    Jumped,
    /// An obstacle was cleared; carries the new score
    Scored { score: u32 },
    /// Score reached the milestone
    Milestone { score: u32 },
    /// The player hit an obstacle; the run is over
    Collided { score: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Random source for spawn timing, monster kind and clouds
    pub(crate) rng: Pcg32,
    /// Simulation steps taken
    pub frame: u64,
    pub viewport: Viewport,
    pub player: Player,
    /// Monsters in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Clouds in spawn order
    pub clouds: Vec<Cloud>,
    pub obstacle_spawner: Spawner,
    pub cloud_spawner: Spawner,
    pub score: u32,
    /// Terminal flag. Sticky: once set, nothing else changes.
    pub game_over: bool,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run with the given seed and screen bounds
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            viewport,
            player: Player::on_floor(viewport.floor_line()),
            obstacles: Vec::new(),
            clouds: Vec::new(),
            obstacle_spawner: Spawner::obstacles(),
            cloud_spawner: Spawner::clouds(),
            score: 0,
            game_over: false,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn floor_line(&self) -> f32 {
        self.viewport.floor_line()
    }

    /// Start a jump. No-op (returns false) while airborne or after game over;
    /// jumps are never buffered.
    pub fn request_jump(&mut self) -> bool {
        if self.player.jumping || self.game_over {
            return false;
        }
        self.player.jumping = true;
        self.player.vel_y = -JUMP_POWER;
        self.events.push(GameEvent::Jumped);
        true
    }

    /// Apply new screen bounds. Degenerate sizes are rejected (returns false)
    /// and the previous bounds kept. A grounded player is moved onto the new
    /// floor line; an airborne one finishes the arc against it.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if self.game_over {
            return false;
        }
        let Some(viewport) = Viewport::new(width, height) else {
            return false;
        };
        self.viewport = viewport;
        if !self.player.jumping {
            self.player.pos.y = self.player.resting_y(viewport.floor_line());
        }
        true
    }

    /// Put a monster at `x` on the current floor line
    pub fn spawn_obstacle(&mut self, x: f32, kind: ObstacleKind) {
        let obstacle = Obstacle::new(x, self.floor_line(), kind);
        self.obstacles.push(obstacle);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
