//! Frame drawing from game state

use glam::Vec2;

use super::colors::{self, with_alpha};
use super::Surface;
use crate::sim::{GameState, Goal, Obstacle, Player};

/// HUD font
pub const HUD_FONT: &str = "24px sans";
/// Left edge of HUD labels
const HUD_LABEL_X: f32 = 10.0;
/// Left edge of HUD values
const HUD_VALUE_X: f32 = 100.0;

/// Something that knows how to put itself on a surface
pub trait Draw {
    fn draw(&self, surface: &mut dyn Surface);
}

impl Draw for Obstacle {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(
            self.pos,
            Vec2::splat(self.size),
            with_alpha(colors::OBSTACLE, self.opacity),
        );
    }
}

impl Draw for Goal {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.pos, self.radius, colors::GOAL);
    }
}

impl Draw for Player {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_triangle(self.triangle(), with_alpha(colors::PLAYER, self.alpha()));
    }
}

/// Draw one full frame: clear, obstacles, goal, ship, HUD
pub fn draw_frame(surface: &mut dyn Surface, state: &GameState) {
    let size = Vec2::new(state.arena.width, state.arena.height);
    surface.clear_rect(Vec2::ZERO, size);

    for obstacle in &state.obstacles {
        obstacle.draw(surface);
    }
    state.goal.draw(surface);
    state.player.draw(surface);

    draw_hud(surface, state);
}

/// Score and health in the bottom-left corner
fn draw_hud(surface: &mut dyn Surface, state: &GameState) {
    let score_y = state.arena.height - 10.0;
    let health_y = state.arena.height - 34.0;
    let rows = [
        ("Score:", state.score.to_string(), score_y),
        ("Health:", state.player.health().to_string(), health_y),
    ];
    for (label, value, y) in rows {
        surface.fill_text(label, Vec2::new(HUD_LABEL_X, y), HUD_FONT, colors::HUD_TEXT);
        surface.fill_text(&value, Vec2::new(HUD_VALUE_X, y), HUD_FONT, colors::HUD_TEXT);
    }
}

/// Bury the last frame under a pile of obstacles
pub fn draw_death_shroud(surface: &mut dyn Surface, shroud: &[Obstacle]) {
    for obstacle in shroud {
        obstacle.draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::sim::Arena;
    use crate::tuning::Tuning;

    #[test]
    fn test_frame_order() {
        let state = GameState::new(5, Arena::new(800.0, 600.0), Tuning::default());
        let mut surface = RecordingSurface::new();
        draw_frame(&mut surface, &state);

        let cmds = &surface.commands;
        assert!(matches!(cmds[0], DrawCommand::Clear { .. }));
        assert!(matches!(cmds[1], DrawCommand::Rect { .. }));
        assert!(matches!(cmds[2], DrawCommand::Rect { .. }));
        assert!(matches!(cmds[3], DrawCommand::Circle { .. }));
        assert!(matches!(cmds[4], DrawCommand::Triangle { .. }));
        assert_eq!(cmds.len(), 9);
    }

    #[test]
    fn test_hud_text() {
        let mut state = GameState::new(5, Arena::new(800.0, 600.0), Tuning::default());
        state.score = 300;
        state.player.reduce_health(7);
        let mut surface = RecordingSurface::new();
        draw_frame(&mut surface, &state);

        let texts: Vec<&str> = surface.texts().collect();
        assert_eq!(texts, vec!["Score:", "300", "Health:", "93"]);
        assert!(surface.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Text { at, .. } if *at == Vec2::new(100.0, 590.0)
        )));
    }

    #[test]
    fn test_player_alpha_follows_health() {
        let mut state = GameState::new(5, Arena::new(800.0, 600.0), Tuning::default());
        state.player.reduce_health(50);
        let mut surface = RecordingSurface::new();
        state.player.draw(&mut surface);
        let DrawCommand::Triangle { color, .. } = &surface.commands[0] else {
            panic!("expected triangle");
        };
        assert!((color[3] - 0.6).abs() < 1e-6);
    }
}
