//! Frame driver: owns the run and paces it
//!
//! `NotStarted --Start--> Running --collision--> Ended`. There is no way out of
//! `Ended`; a new run needs a new driver (page reload on the web).
//!
//! Host callbacks arrive as `HostEvent`s and are applied between frames, so the
//! simulation only ever sees one writer at a time.

use super::{AudioCues, Renderer, ScoreDisplay, TickSource};
use crate::sim::{GameEvent, GameState, TickInput, Viewport, tick};

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    /// Waiting for the start button
    NotStarted,
    /// Stepping once per display refresh
    Running,
    /// Collision happened; no more frames
    Ended,
}

/// Messages from the host, applied synchronously between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Start button pressed
    Start,
    /// Jump key, mouse down or touch start
    Jump,
    /// Viewport changed size
    Resize { width: f32, height: f32 },
    /// Toggle idle/demo mode
    ToggleAutopilot,
}

/// Runs the simulation against the host's collaborators
pub struct FrameDriver<R, A, S> {
    phase: DriverPhase,
    seed: u64,
    /// Latest valid viewport, used when the run is created
    viewport: Viewport,
    state: Option<GameState>,
    input: TickInput,
    renderer: R,
    audio: A,
    score_display: S,
}

impl<R: Renderer, A: AudioCues, S: ScoreDisplay> FrameDriver<R, A, S> {
    pub fn new(seed: u64, viewport: Viewport, renderer: R, audio: A, score_display: S) -> Self {
        Self {
            phase: DriverPhase::NotStarted,
            seed,
            viewport,
            state: None,
            input: TickInput::default(),
            renderer,
            audio,
            score_display,
        }
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    /// The current run, once started
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn score_display(&self) -> &S {
        &self.score_display
    }

    /// Apply one host message
    pub fn handle<T: TickSource + ?Sized>(&mut self, event: HostEvent, ticks: &mut T) {
        match event {
            HostEvent::Start => self.start(ticks),
            HostEvent::Jump => {
                if self.phase != DriverPhase::Running {
                    return;
                }
                if let Some(state) = self.state.as_mut() {
                    state.request_jump();
                }
                self.dispatch_events();
            }
            HostEvent::Resize { width, height } => self.resize(width, height),
            HostEvent::ToggleAutopilot => {
                self.input.autopilot = !self.input.autopilot;
                log::info!("Autopilot: {}", self.input.autopilot);
            }
        }
    }

    fn start<T: TickSource + ?Sized>(&mut self, ticks: &mut T) {
        if self.phase != DriverPhase::NotStarted {
            log::debug!("Start ignored in phase {:?}", self.phase);
            return;
        }

        self.state = Some(GameState::new(self.seed, self.viewport));
        self.phase = DriverPhase::Running;
        self.score_display.show_score(0);
        log::info!(
            "Run started with seed {} on {}x{}",
            self.seed,
            self.viewport.width,
            self.viewport.height
        );
        ticks.request_frame();
    }

    fn resize(&mut self, width: f32, height: f32) {
        let Some(viewport) = Viewport::new(width, height) else {
            log::warn!("Ignoring degenerate viewport {}x{}", width, height);
            return;
        };
        self.viewport = viewport;
        if let Some(state) = self.state.as_mut() {
            state.resize(width, height);
        }
    }

    /// One display refresh: step, react, then draw and reschedule, or stop.
    pub fn frame<T: TickSource + ?Sized>(&mut self, ticks: &mut T) {
        if self.phase != DriverPhase::Running {
            return;
        }
        let Some(state) = self.state.as_mut() else {
            return;
        };

        tick(state, &self.input);
        self.dispatch_events();

        let Some(state) = self.state.as_ref() else {
            return;
        };
        if state.game_over {
            self.phase = DriverPhase::Ended;
            self.renderer.show_game_over(state);
        } else {
            self.renderer.draw(state);
            ticks.request_frame();
        }
    }

    /// Route simulation events to the collaborators
    fn dispatch_events(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        for event in state.drain_events() {
            match event {
                GameEvent::Jumped => self.audio.play_jump_cue(),
                GameEvent::Scored { score } => self.score_display.show_score(score),
                GameEvent::Milestone { score } => {
                    log::info!("Milestone reached: {}", score);
                    self.audio.play_milestone_cue();
                }
                GameEvent::Collided { score } => {
                    log::info!("Collision! Final score: {}", score);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::platform::{Headless, ManualTicks};
    use crate::sim::ObstacleKind;

    type TestDriver = FrameDriver<Headless, Headless, Headless>;

    fn driver() -> TestDriver {
        FrameDriver::new(
            1234,
            Viewport::new(800.0, 600.0).unwrap(),
            Headless::default(),
            Headless::default(),
            Headless::default(),
        )
    }

    /// Deliver frames until the driver stops asking, up to `limit`
    fn run(driver: &mut TestDriver, ticks: &mut ManualTicks, limit: u32) -> u32 {
        let mut frames = 0;
        while frames < limit && ticks.take() {
            driver.frame(ticks);
            frames += 1;
        }
        frames
    }

    #[test]
    fn test_starts_not_started() {
        let mut d = driver();
        let mut ticks = ManualTicks::default();
        assert_eq!(d.phase(), DriverPhase::NotStarted);
        assert!(d.state().is_none());

        // Frames and jumps before start do nothing
        d.frame(&mut ticks);
        d.handle(HostEvent::Jump, &mut ticks);
        assert_eq!(ticks.pending, 0);
        assert!(d.state().is_none());
        assert_eq!(d.audio().jump_cues, 0);
    }

    #[test]
    fn test_start_schedules_first_frame() {
        let mut d = driver();
        let mut ticks = ManualTicks::default();
        d.handle(HostEvent::Start, &mut ticks);

        assert_eq!(d.phase(), DriverPhase::Running);
        assert_eq!(ticks.pending, 1);
        assert_eq!(d.score_display().scores, vec![0]);
        assert_eq!(d.state().map(|s| s.seed), Some(1234));

        // A second start is ignored
        d.handle(HostEvent::Start, &mut ticks);
        assert_eq!(ticks.pending, 1);
        assert_eq!(d.score_display().scores, vec![0]);
    }

    #[test]
    fn test_each_frame_steps_once_and_reschedules() {
        let mut d = driver();
        let mut ticks = ManualTicks::default();
        d.handle(HostEvent::Start, &mut ticks);

        assert_eq!(run(&mut d, &mut ticks, 10), 10);
        assert_eq!(ticks.pending, 1);
        assert_eq!(d.state().map(|s| s.frame), Some(10));
        assert_eq!(d.renderer().frames_drawn, 10);
    }

    #[test]
    fn test_collision_ends_run_and_stops_scheduling() {
        let mut d = driver();
        let mut ticks = ManualTicks::default();
        d.handle(HostEvent::Start, &mut ticks);

        let frames = run(&mut d, &mut ticks, 10_000);
        assert_eq!(d.phase(), DriverPhase::Ended);
        assert_eq!(ticks.pending, 0);
        assert_eq!(d.renderer().game_over_shown, 1);
        // Every frame but the last was drawn
        assert_eq!(d.renderer().frames_drawn, u64::from(frames) - 1);

        let state = d.state().unwrap();
        assert!(state.game_over);
        assert_eq!(state.frame, u64::from(frames));

        // Ended is terminal
        let frozen = state.clone();
        d.frame(&mut ticks);
        d.handle(HostEvent::Jump, &mut ticks);
        d.handle(HostEvent::Start, &mut ticks);
        assert_eq!(d.phase(), DriverPhase::Ended);
        assert_eq!(ticks.pending, 0);
        assert_eq!(d.state(), Some(&frozen));
        assert_eq!(d.renderer().game_over_shown, 1);
    }

    #[test]
    fn test_first_monster_hits_idle_player() {
        let mut d = driver();
        let mut ticks = ManualTicks::default();
        d.handle(HostEvent::Start, &mut ticks);

        let frames = run(&mut d, &mut ticks, 10_000);
        // Spawned on frame 90, reaches the player 115 frames later
        let travel = ((800.0 - PLAYER_X - PLAYER_WIDTH) / OBSTACLE_SPEED).floor() as u32 + 1;
        assert_eq!(frames, OBSTACLE_FIRST_INTERVAL + travel - 1);
        assert_eq!(d.state().map(|s| s.score), Some(0));
    }

    #[test]
    fn test_jump_plays_cue_once_per_jump() {
        let mut d = driver();
        let mut ticks = ManualTicks::default();
        d.handle(HostEvent::Start, &mut ticks);

        d.handle(HostEvent::Jump, &mut ticks);
        assert_eq!(d.audio().jump_cues, 1);
        assert!(d.state().unwrap().player.jumping);

        // Mid-air presses are dropped
        run(&mut d, &mut ticks, 5);
        d.handle(HostEvent::Jump, &mut ticks);
        d.handle(HostEvent::Jump, &mut ticks);
        assert_eq!(d.audio().jump_cues, 1);

        // After landing a jump is accepted again
        run(&mut d, &mut ticks, 60);
        assert!(!d.state().unwrap().player.jumping);
        d.handle(HostEvent::Jump, &mut ticks);
        assert_eq!(d.audio().jump_cues, 2);
    }

    #[test]
    fn test_autopilot_scores_and_milestone_fires_once() {
        let mut d = driver();
        let mut ticks = ManualTicks::default();
        d.handle(HostEvent::ToggleAutopilot, &mut ticks);
        assert!(d.autopilot());
        d.handle(HostEvent::Start, &mut ticks);

        assert_eq!(run(&mut d, &mut ticks, 3_000), 3_000);
        assert_eq!(d.phase(), DriverPhase::Running);
        assert_eq!(d.audio().milestone_cues, 1);

        let score = d.state().unwrap().score;
        let expected: Vec<u32> = (0..=score).collect();
        assert_eq!(d.score_display().scores, expected);
        assert!(d.audio().jump_cues >= score);
    }

    #[test]
    fn test_resize_before_start_sets_initial_viewport() {
        let mut d = driver();
        let mut ticks = ManualTicks::default();
        d.handle(
            HostEvent::Resize {
                width: 1280.0,
                height: 720.0,
            },
            &mut ticks,
        );
        d.handle(HostEvent::Start, &mut ticks);

        let state = d.state().unwrap();
        assert_eq!(state.viewport.width, 1280.0);
        assert_eq!(state.floor_line(), 640.0);
        assert_eq!(state.player.pos.y, 640.0 - PLAYER_HEIGHT);
    }

    #[test]
    fn test_resize_while_running() {
        let mut d = driver();
        let mut ticks = ManualTicks::default();
        d.handle(HostEvent::Start, &mut ticks);

        d.handle(
            HostEvent::Resize {
                width: 0.0,
                height: 300.0,
            },
            &mut ticks,
        );
        assert_eq!(d.viewport(), Viewport::new(800.0, 600.0).unwrap());
        assert_eq!(d.state().unwrap().floor_line(), 520.0);

        // Too short for a usable floor line
        d.handle(
            HostEvent::Resize {
                width: 800.0,
                height: 50.0,
            },
            &mut ticks,
        );
        assert_eq!(d.viewport(), Viewport::new(800.0, 600.0).unwrap());
        let state = d.state().unwrap();
        assert_eq!(state.floor_line(), 520.0);
        assert_eq!(state.player.pos.y, 520.0 - PLAYER_HEIGHT);

        d.handle(
            HostEvent::Resize {
                width: 640.0,
                height: 480.0,
            },
            &mut ticks,
        );
        let state = d.state().unwrap();
        assert_eq!(state.floor_line(), 400.0);
        assert_eq!(state.player.pos.y, 400.0 - PLAYER_HEIGHT);
    }

    #[test]
    fn test_new_monsters_follow_resized_floor() {
        let mut d = driver();
        let mut ticks = ManualTicks::default();
        d.handle(HostEvent::Start, &mut ticks);
        d.handle(
            HostEvent::Resize {
                width: 1000.0,
                height: 700.0,
            },
            &mut ticks,
        );

        run(&mut d, &mut ticks, OBSTACLE_FIRST_INTERVAL);
        let state = d.state().unwrap();
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, 1000.0 - OBSTACLE_SPEED);
        assert_eq!(state.obstacles[0].pos.y, 620.0 - OBSTACLE_HEIGHT);
        assert!(matches!(
            state.obstacles[0].kind,
            ObstacleKind::Fire | ObstacleKind::Wing
        ));
    }
}
