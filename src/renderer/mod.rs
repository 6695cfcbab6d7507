//! Canvas 2D rendering and DOM HUD
//!
//! Drawn procedurally from rectangles, triangles and circles; there are no
//! image assets.

pub mod canvas;
pub mod hud;

pub use canvas::CanvasRenderer;
pub use hud::DomScore;
