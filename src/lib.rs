//! Steer Clear - a small canvas arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `renderer`: 2D drawing surface abstraction and frame drawing
//! - `audio`: Sound cues
//! - `session`: Ties simulation, clock, surface and audio together
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use settings::{ConfigError, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const FRAME_RATE: u32 = 30;
    /// Tick interval in milliseconds (floor of 1000 / FRAME_RATE)
    pub const UPDATE_INTERVAL_MS: u32 = 1000 / FRAME_RATE;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = UPDATE_INTERVAL_MS as f32 / 1000.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Platform key codes the game listens to
    pub const LEFT_KEY: u32 = 37;
    pub const UP_KEY: u32 = 38;
    pub const RIGHT_KEY: u32 = 39;
    pub const DOWN_KEY: u32 = 40;
}

/// Normalized angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_tick_interval() {
        assert_eq!(consts::UPDATE_INTERVAL_MS, 33);
        assert!((consts::SIM_DT - 0.033).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, PI / 2.0);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
    }
}
