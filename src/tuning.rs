//! Gameplay tuning
//!
//! Keep this separate from player preferences (`Settings`). Every field has a
//! default, so a partial JSON document only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::settings::ConfigError;
use crate::sim::Arena;

/// Obstacle spawn ranges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    pub min_speed: f32,
    pub max_speed: f32,
    /// Side length range on regular canvases
    pub min_size: f32,
    pub max_size: f32,
    /// Side length range when the canvas is smaller than 800x600
    pub small_min_size: f32,
    pub small_max_size: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            min_speed: 0.5,
            max_speed: 3.0,
            min_size: 20.0,
            max_size: 60.0,
            small_min_size: 15.0,
            small_max_size: 40.0,
        }
    }
}

impl ObstacleTuning {
    /// Size range for the given canvas
    pub fn size_range(&self, arena: &Arena) -> (f32, f32) {
        if arena.is_small() {
            (self.small_min_size, self.small_max_size)
        } else {
            (self.min_size, self.max_size)
        }
    }
}

/// Goal geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalTuning {
    pub radius: f32,
    /// Extra slack around the drawn circle when testing hits
    pub courtesy_margin: f32,
}

impl Default for GoalTuning {
    fn default() -> Self {
        Self {
            radius: 8.0,
            courtesy_margin: 4.0,
        }
    }
}

/// Ship handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: i32,
    /// Heading change per tick while a steering key is held (radians)
    pub turn_increment: f32,
    /// Speed change per tick while a speed key is held
    pub throttle_increment: f32,
    /// Triangle base width in pixels
    pub width: f32,
    /// Nose-to-base length in pixels
    pub length: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            turn_increment: 0.1,
            throttle_increment: 0.2,
            width: 15.0,
            length: 30.0,
        }
    }
}

/// Complete game balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub obstacle: ObstacleTuning,
    pub goal: GoalTuning,
    pub player: PlayerTuning,
    /// Obstacles present when a game starts
    pub initial_obstacles: usize,
    /// Ship speed at game start
    pub initial_speed: f32,
    /// Hits cannot slow the ship below this
    pub min_speed: f32,
    /// Goals cannot speed the ship beyond this
    pub max_speed: f32,
    /// Speed gained per goal
    pub speed_increment: f32,
    /// Speed lost per hit
    pub speed_decrement: f32,
    pub score_increment: u64,
    /// Health restored per goal
    pub health_increment: i32,
    /// Obstacles scattered over the screen on death
    pub death_shroud_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        let initial_speed = 4.0;
        let speed_increment = 0.3;
        Self {
            obstacle: ObstacleTuning::default(),
            goal: GoalTuning::default(),
            player: PlayerTuning::default(),
            initial_obstacles: 2,
            initial_speed,
            min_speed: initial_speed + 2.0,
            max_speed: 32.0,
            speed_increment,
            speed_decrement: speed_increment / 2.0,
            score_increment: 100,
            health_increment: 10,
            death_shroud_count: 2500,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning overrides from a JSON file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Reject ranges the simulation cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_speed > self.max_speed {
            return Err(ConfigError::InvalidRange {
                field: "min_speed..max_speed",
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        // The speed floor sits strictly above the starting speed
        if self.initial_speed >= self.min_speed {
            return Err(ConfigError::InvalidRange {
                field: "initial_speed..min_speed",
                min: self.initial_speed,
                max: self.min_speed,
            });
        }
        if self.obstacle.min_speed > self.obstacle.max_speed {
            return Err(ConfigError::InvalidRange {
                field: "obstacle.min_speed..obstacle.max_speed",
                min: self.obstacle.min_speed,
                max: self.obstacle.max_speed,
            });
        }
        if self.obstacle.min_size > self.obstacle.max_size {
            return Err(ConfigError::InvalidRange {
                field: "obstacle.min_size..obstacle.max_size",
                min: self.obstacle.min_size,
                max: self.obstacle.max_size,
            });
        }
        if self.obstacle.small_min_size > self.obstacle.small_max_size {
            return Err(ConfigError::InvalidRange {
                field: "obstacle.small_min_size..obstacle.small_max_size",
                min: self.obstacle.small_min_size,
                max: self.obstacle.small_max_size,
            });
        }
        if self.player.max_health <= 0 {
            return Err(ConfigError::NonPositive("player.max_health"));
        }
        if self.goal.courtesy_margin <= 0.0 {
            return Err(ConfigError::NonPositive("goal.courtesy_margin"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = Tuning::default();
        assert_eq!(t.min_speed, 6.0);
        assert!(t.min_speed > t.initial_speed);
        assert!((t.speed_decrement - 0.15).abs() < 1e-6);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_size_range_depends_on_canvas() {
        let t = ObstacleTuning::default();
        assert_eq!(t.size_range(&Arena::new(1024.0, 768.0)), (20.0, 60.0));
        assert_eq!(t.size_range(&Arena::new(640.0, 480.0)), (15.0, 40.0));
    }

    #[test]
    fn test_partial_json_overrides() {
        let t = Tuning::from_json(r#"{"score_increment": 250, "player": {"max_health": 50}}"#)
            .unwrap();
        assert_eq!(t.score_increment, 250);
        assert_eq!(t.player.max_health, 50);
        assert_eq!(t.player.turn_increment, 0.1);
        assert_eq!(t.initial_obstacles, 2);
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let err = Tuning::from_json(r#"{"min_speed": 40.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRange { .. }));
    }

    #[test]
    fn test_rejects_floor_at_or_below_initial_speed() {
        let err = Tuning::from_json(r#"{"initial_speed": 6.0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidRange {
                field: "initial_speed..min_speed",
                ..
            }
        ));
        assert!(Tuning::from_json(r#"{"initial_speed": 5.5}"#).is_ok());
    }

    #[test]
    fn test_small_size_range_reports_its_own_bounds() {
        let err =
            Tuning::from_json(r#"{"obstacle": {"small_min_size": 50.0, "small_max_size": 10.0}}"#)
                .unwrap_err();
        match err {
            ConfigError::InvalidRange { field, min, max } => {
                assert_eq!(field, "obstacle.small_min_size..obstacle.small_max_size");
                assert_eq!((min, max), (50.0, 10.0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/nonexistent/tuning.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
