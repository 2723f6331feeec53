//! Canvas bounds and wrap-around movement
//!
//! Anything that leaves one edge reappears at the opposite edge. There is no
//! bounce.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vector::Vector;

/// Playfield size in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Canvas centre, floored to whole pixels
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.width / 2.0).floor(), (self.height / 2.0).floor())
    }

    /// Small screens get smaller obstacles
    pub fn is_small(&self) -> bool {
        self.width < 800.0 || self.height < 600.0
    }

    /// Teleport a point that crossed an edge to the opposite edge.
    ///
    /// Past the far bound resets to 0, below 0 resets to the bound. Each axis
    /// is checked independently.
    pub fn wrap(&self, pos: &mut Vec2) {
        if pos.x > self.width {
            pos.x = 0.0;
        }
        if pos.x < 0.0 {
            pos.x = self.width;
        }
        if pos.y > self.height {
            pos.y = 0.0;
        }
        if pos.y < 0.0 {
            pos.y = self.height;
        }
    }
}

/// Shared capability of entities that drift with a velocity and wrap at the edges
pub trait Wrapping {
    fn position_mut(&mut self) -> &mut Vec2;

    fn velocity(&self) -> &Vector;

    /// Integrate one tick of motion, then wrap
    fn advance(&mut self, arena: &Arena) {
        let step = self.velocity().as_vec2();
        let pos = self.position_mut();
        *pos += step;
        arena.wrap(pos);
    }
}
