//! Point-in-rectangle collision detection
//!
//! The ship is treated as a single point (its nose). Every test uses strict
//! inequalities, so a point on an edge is outside.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;

/// Axis-aligned rectangle used for hit testing, distinct from the drawn shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitRect {
    /// Top-left corner
    pub origin: Vec2,
    pub size: Vec2,
}

impl HitRect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Rectangle of half-extent `half` centred on `center`
    pub fn centered(center: Vec2, half: f32) -> Self {
        Self {
            origin: center - Vec2::splat(half),
            size: Vec2::splat(2.0 * half),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    /// Strict containment (exclusive bounds)
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x > self.origin.x && point.x < max.x && point.y > self.origin.y && point.y < max.y
    }

    /// True when `other` lies strictly inside this rectangle
    pub fn strictly_contains(&self, other: &HitRect) -> bool {
        let (max, other_max) = (self.max(), other.max());
        other.origin.x > self.origin.x
            && other.origin.y > self.origin.y
            && other_max.x < max.x
            && other_max.y < max.y
    }
}

/// First obstacle, in list order, whose square contains `point`
pub fn first_obstacle_hit(obstacles: &[Obstacle], point: Vec2) -> Option<&Obstacle> {
    obstacles.iter().find(|o| o.point_inside(point))
}

/// Damage of the first obstacle containing `point`, or 0 when clear
pub fn obstacle_damage_at(obstacles: &[Obstacle], point: Vec2) -> i32 {
    first_obstacle_hit(obstacles, point).map_or(0, |o| o.damage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Vector;

    fn obstacle_at(id: u32, x: f32, y: f32, size: f32, draw: f32) -> Obstacle {
        Obstacle::from_draw(id, Vec2::new(x, y), Vector::default(), draw, (size, size))
    }

    #[test]
    fn test_contains_point_is_strict() {
        let rect = HitRect::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        assert!(rect.contains_point(Vec2::new(15.0, 15.0)));
        assert!(!rect.contains_point(Vec2::new(10.0, 15.0)));
        assert!(!rect.contains_point(Vec2::new(30.0, 15.0)));
        assert!(!rect.contains_point(Vec2::new(15.0, 30.0)));
    }

    #[test]
    fn test_centered() {
        let rect = HitRect::centered(Vec2::new(50.0, 50.0), 12.0);
        assert_eq!(rect.origin, Vec2::new(38.0, 38.0));
        assert_eq!(rect.size, Vec2::new(24.0, 24.0));
    }

    #[test]
    fn test_first_hit_wins_on_overlap() {
        let obstacles = vec![
            obstacle_at(1, 200.0, 200.0, 20.0, 0.99),
            obstacle_at(2, 90.0, 90.0, 30.0, 0.05),
            obstacle_at(3, 95.0, 95.0, 30.0, 0.95),
        ];
        let hit = first_obstacle_hit(&obstacles, Vec2::new(100.0, 100.0)).unwrap();
        assert_eq!(hit.id, 2);
        assert_eq!(obstacle_damage_at(&obstacles, Vec2::new(100.0, 100.0)), 1);
    }

    #[test]
    fn test_no_hit_is_zero_damage() {
        let obstacles = vec![obstacle_at(1, 0.0, 0.0, 10.0, 0.5)];
        assert_eq!(obstacle_damage_at(&obstacles, Vec2::new(50.0, 50.0)), 0);
        assert_eq!(obstacle_damage_at(&[], Vec2::ZERO), 0);
    }
}
