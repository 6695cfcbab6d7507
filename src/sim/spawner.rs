//! Frame-counting spawn timers
//!
//! Obstacles and clouds share the same pattern: count frames, fire when the
//! count reaches the interval, then reset. The obstacle timer redraws its
//! interval after every spawn; the cloud timer keeps a fixed cadence.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Cloud, ObstacleKind};
use crate::consts::*;

/// Countdown timer that fires every `interval` frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawner {
    /// Frames counted since the last spawn
    pub timer: u32,
    /// Frames required before the next spawn
    pub interval: u32,
    /// Inclusive bounds to redraw `interval` from after each spawn (None = fixed)
    pub jitter: Option<(u32, u32)>,
}

impl Spawner {
    /// A timer with a constant interval
    pub fn fixed(interval: u32) -> Self {
        Self {
            timer: 0,
            interval,
            jitter: None,
        }
    }

    /// A timer whose interval is redrawn uniformly from `range` after each spawn.
    /// Reversed bounds are swapped.
    pub fn randomized(first_interval: u32, range: RangeInclusive<u32>) -> Self {
        let (a, b) = range.into_inner();
        Self {
            timer: 0,
            interval: first_interval,
            jitter: Some((a.min(b), a.max(b))),
        }
    }

    /// Obstacle timer: first spawn after 90 frames, then every 60..=120
    pub fn obstacles() -> Self {
        Self::randomized(
            OBSTACLE_FIRST_INTERVAL,
            OBSTACLE_MIN_INTERVAL..=OBSTACLE_MAX_INTERVAL,
        )
    }

    /// Cloud timer: every 120 frames
    pub fn clouds() -> Self {
        Self::fixed(CLOUD_INTERVAL)
    }

    /// Count one frame. Returns true when a spawn should happen this frame.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> bool {
        self.timer += 1;
        if self.timer < self.interval {
            return false;
        }

        self.timer = 0;
        if let Some((min, max)) = self.jitter {
            self.interval = draw_interval(rng, min, max);
        }
        true
    }
}

/// Uniform integer draw from `[min, max]`, bounds in either order
pub fn draw_interval<R: Rng>(rng: &mut R, min: u32, max: u32) -> u32 {
    rng.random_range(min.min(max)..=min.max(max))
}

/// Pick a monster variant uniformly
pub fn draw_obstacle_kind<R: Rng>(rng: &mut R) -> ObstacleKind {
    if rng.random_bool(0.5) {
        ObstacleKind::Fire
    } else {
        ObstacleKind::Wing
    }
}

/// Roll a new cloud entering at the right edge of a screen
pub fn draw_cloud<R: Rng>(rng: &mut R, screen_width: f32, screen_height: f32) -> Cloud {
    let y = CLOUD_MIN_Y + rng.random::<f32>() * (screen_height / 3.0);
    let size = CLOUD_MIN_SIZE + rng.random::<f32>() * CLOUD_SIZE_RANGE;
    let speed = CLOUD_MIN_SPEED + rng.random::<f32>() * CLOUD_SPEED_RANGE;
    Cloud::new(screen_width, y, size, speed)
}
