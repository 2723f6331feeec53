//! 2D drawing surface
//!
//! The game needs five primitives. `Surface` is the seam: the browser backend
//! draws to a `CanvasRenderingContext2d`, tests and the headless runner record
//! commands instead.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::{draw_death_shroud, draw_frame};

use glam::Vec2;

/// RGBA color, channels in 0.0 - 1.0
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    /// Obstacles are red; alpha comes from the obstacle
    pub const OBSTACLE: Color = [1.0, 0.0, 0.0, 1.0];
    pub const GOAL: Color = [0.0, 0.0, 1.0, 0.7];
    /// Ship is black; alpha tracks health
    pub const PLAYER: Color = [0.0, 0.0, 0.0, 1.0];
    /// #404040
    pub const HUD_TEXT: Color = [64.0 / 255.0, 64.0 / 255.0, 64.0 / 255.0, 1.0];

    /// Replace the alpha channel
    pub fn with_alpha(color: Color, alpha: f32) -> Color {
        [color[0], color[1], color[2], alpha]
    }
}

/// The drawing primitives the game uses
pub trait Surface {
    fn clear_rect(&mut self, origin: Vec2, size: Vec2);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_triangle(&mut self, points: [Vec2; 3], color: Color);
    fn fill_text(&mut self, text: &str, at: Vec2, font: &str, color: Color);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { origin: Vec2, size: Vec2 },
    Rect { origin: Vec2, size: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Triangle { points: [Vec2; 3], color: Color },
    Text { text: String, at: Vec2, font: String, color: Color },
}

/// Surface that keeps a log of draw calls (headless runs and tests)
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands since the most recent clear
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// All text drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, origin: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::Clear { origin, size });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect {
            origin,
            size,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_triangle(&mut self, points: [Vec2; 3], color: Color) {
        self.commands.push(DrawCommand::Triangle { points, color });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            font: font.to_string(),
            color,
        });
    }
}
