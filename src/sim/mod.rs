//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod clock;
pub mod collision;
pub mod state;
pub mod tick;
pub mod vector;

pub use arena::{Arena, Wrapping};
pub use clock::FixedStep;
pub use collision::{HitRect, first_obstacle_hit, obstacle_damage_at};
pub use state::{
    DEFAULT_PLAYER_SPEED, Effect, GameEvent, GamePhase, GameState, Goal, HeldKeys, Key,
    KeyBindings, Obstacle, Player, Position,
};
pub use tick::tick;
pub use vector::Vector;
