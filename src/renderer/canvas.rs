//! Canvas 2D render pass
//!
//! Everything is drawn from primitives: sky, ground strip, clouds, Santa and
//! the two monster kinds. Draw order is back to front.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::platform::Renderer;
use crate::sim::{Cloud, GameState, Obstacle, ObstacleKind, Player};

const SKY: &str = "#87CEEB";
const GROUND: &str = "#8B4513";
const CLOUD: &str = "#FFFFFF";

/// Draws `GameState` onto a 2D canvas
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    document: Document,
    /// Draw background clouds
    pub clouds: bool,
}

impl CanvasRenderer {
    /// Grab the canvas' 2D context. None if the browser refuses one.
    pub fn new(canvas: HtmlCanvasElement, document: Document) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            document,
            clouds: true,
        })
    }

    /// Match the canvas backing store to the viewport
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
    }

    fn fill_circle(&self, x: f32, y: f32, r: f32) {
        self.ctx.begin_path();
        if self.ctx.arc(x as f64, y as f64, r as f64, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }

    fn draw_background(&self, state: &GameState) {
        let (w, h) = (state.viewport.width as f64, state.viewport.height as f64);
        let floor = state.floor_line() as f64;

        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.ctx.set_fill_style_str(SKY);
        self.ctx.fill_rect(0.0, 0.0, w, floor);
        self.ctx.set_fill_style_str(GROUND);
        self.ctx.fill_rect(0.0, floor, w, h - floor);
    }

    /// Puffy cloud: one big circle and three smaller ones around it
    fn draw_cloud(&self, cloud: &Cloud) {
        let (cx, cy, s) = (cloud.pos.x, cloud.pos.y, cloud.size);
        self.ctx.set_fill_style_str(CLOUD);
        self.fill_circle(cx, cy, s);
        self.fill_circle(cx - s * 0.6, cy + s * 0.4, s * 0.8);
        self.fill_circle(cx + s * 0.6, cy + s * 0.4, s * 0.8);
        self.fill_circle(cx, cy - s * 0.4, s * 0.7);
    }

    fn draw_player(&self, player: &Player) {
        let (x, y) = (player.pos.x as f64, player.pos.y as f64);
        let (w, h) = (player.size.x as f64, player.size.y as f64);

        // Coat
        self.ctx.set_fill_style_str("#C41E3A");
        self.ctx.fill_rect(x + w * 0.15, y + h * 0.35, w * 0.7, h * 0.65);
        // Belt
        self.ctx.set_fill_style_str("#222222");
        self.ctx.fill_rect(x + w * 0.15, y + h * 0.7, w * 0.7, h * 0.08);
        // Face
        self.ctx.set_fill_style_str("#F5CBA7");
        self.fill_circle((x + w * 0.5) as f32, (y + h * 0.3) as f32, (w * 0.2) as f32);
        // Beard
        self.ctx.set_fill_style_str("#FFFFFF");
        self.fill_circle((x + w * 0.5) as f32, (y + h * 0.42) as f32, (w * 0.17) as f32);
        // Hat
        self.ctx.set_fill_style_str("#C41E3A");
        self.ctx.begin_path();
        self.ctx.move_to(x + w * 0.28, y + h * 0.18);
        self.ctx.line_to(x + w * 0.72, y + h * 0.18);
        self.ctx.line_to(x + w * 0.5, y);
        self.ctx.close_path();
        self.ctx.fill();
        self.ctx.set_fill_style_str("#FFFFFF");
        self.fill_circle((x + w * 0.5) as f32, y as f32, (w * 0.07) as f32);
    }

    fn draw_obstacle(&self, obstacle: &Obstacle) {
        let (x, y) = (obstacle.pos.x as f64, obstacle.pos.y as f64);
        let (w, h) = (obstacle.size.x as f64, obstacle.size.y as f64);

        match obstacle.kind {
            ObstacleKind::Fire => {
                // Three flame tongues
                for (i, color) in ["#FF4500", "#FF8C00", "#FFD700"].iter().enumerate() {
                    let inset = i as f64 * w * 0.15;
                    self.ctx.set_fill_style_str(color);
                    self.ctx.begin_path();
                    self.ctx.move_to(x + inset, y + h);
                    self.ctx.line_to(x + w - inset, y + h);
                    self.ctx.line_to(x + w * 0.5, y + inset * 1.5);
                    self.ctx.close_path();
                    self.ctx.fill();
                }
            }
            ObstacleKind::Wing => {
                // Body with a wing on each side
                self.ctx.set_fill_style_str("#6A0DAD");
                self.fill_circle((x + w * 0.5) as f32, (y + h * 0.6) as f32, (w * 0.3) as f32);
                self.ctx.set_fill_style_str("#9370DB");
                for side in [-1.0, 1.0] {
                    self.ctx.begin_path();
                    self.ctx.move_to(x + w * 0.5, y + h * 0.5);
                    self.ctx.line_to(x + w * 0.5 + side * w * 0.5, y);
                    self.ctx.line_to(x + w * 0.5 + side * w * 0.3, y + h * 0.6);
                    self.ctx.close_path();
                    self.ctx.fill();
                }
                self.ctx.set_fill_style_str("#FFFF00");
                self.fill_circle((x + w * 0.42) as f32, (y + h * 0.55) as f32, (w * 0.05) as f32);
                self.fill_circle((x + w * 0.58) as f32, (y + h * 0.55) as f32, (w * 0.05) as f32);
            }
        }
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, state: &GameState) {
        self.draw_background(state);
        if self.clouds {
            for cloud in &state.clouds {
                self.draw_cloud(cloud);
            }
        }
        self.draw_player(&state.player);
        for obstacle in &state.obstacles {
            self.draw_obstacle(obstacle);
        }
    }

    fn show_game_over(&mut self, _state: &GameState) {
        match self.document.get_element_by_id("game-over") {
            Some(el) => {
                let _ = el.set_attribute("class", "");
            }
            None => log::warn!("No #game-over element"),
        }
    }
}
