//! Host without a screen: counts what it is asked to do
//!
//! Drives the native runner and the driver tests.

use super::{AudioCues, Renderer, ScoreDisplay, TickSource};
use crate::sim::GameState;

/// Frame source stepped by hand
#[derive(Debug, Default)]
pub struct ManualTicks {
    /// Frames requested but not yet delivered
    pub pending: u32,
}

impl ManualTicks {
    /// Consume one pending frame request
    pub fn take(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }
}

impl TickSource for ManualTicks {
    fn request_frame(&mut self) {
        self.pending += 1;
    }
}

/// Collaborator that logs and records every call
#[derive(Debug, Default)]
pub struct Headless {
    pub frames_drawn: u64,
    pub game_over_shown: u32,
    pub jump_cues: u32,
    pub milestone_cues: u32,
    /// Every score shown, in order
    pub scores: Vec<u32>,
}

impl Renderer for Headless {
    fn draw(&mut self, state: &GameState) {
        self.frames_drawn += 1;
        log::trace!(
            "frame {}: player y={:.1}, {} monsters, {} clouds",
            state.frame,
            state.player.pos.y,
            state.obstacles.len(),
            state.clouds.len()
        );
    }

    fn show_game_over(&mut self, state: &GameState) {
        self.game_over_shown += 1;
        log::info!("GAME OVER at frame {} with score {}", state.frame, state.score);
    }
}

impl AudioCues for Headless {
    fn play_jump_cue(&mut self) {
        self.jump_cues += 1;
    }

    fn play_milestone_cue(&mut self) {
        self.milestone_cues += 1;
        log::debug!("milestone cue");
    }
}

impl ScoreDisplay for Headless {
    fn show_score(&mut self, score: u32) {
        self.scores.push(score);
    }
}
