//! Polar velocity vector
//!
//! Magnitude and direction are the source of truth. The Cartesian components
//! are kept in sync after every mutation, so `x = mag·cos(dir)` and
//! `y = mag·sin(dir)` hold whenever a setter returns.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{normalize_angle, polar_to_cartesian};

/// A velocity in polar form with cached Cartesian components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    mag: f32,
    /// Radians. Unbounded; conceptually mod 2π.
    dir: f32,
    xy: Vec2,
}

impl Default for Vector {
    fn default() -> Self {
        Self {
            mag: 0.0,
            dir: 0.0,
            xy: Vec2::ZERO,
        }
    }
}

impl Vector {
    pub fn new(mag: f32, dir: f32) -> Self {
        Self {
            mag,
            dir,
            xy: polar_to_cartesian(mag, dir),
        }
    }

    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.mag
    }

    #[inline]
    pub fn direction(&self) -> f32 {
        self.dir
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.xy.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.xy.y
    }

    /// Cartesian displacement per tick
    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        self.xy
    }

    /// Unit vector along the heading.
    ///
    /// Derived from the direction rather than `xy / mag`, so it stays finite
    /// for a stationary vector.
    #[inline]
    pub fn unit(&self) -> Vec2 {
        Vec2::new(self.dir.cos(), self.dir.sin())
    }

    /// Add `delta` to the magnitude. Negative results are allowed and reverse travel.
    pub fn add_magnitude(&mut self, delta: f32) {
        self.mag += delta;
        self.update_xy();
    }

    /// Add `delta` radians to the direction
    pub fn add_direction(&mut self, delta: f32) {
        self.dir += delta;
        self.update_xy();
    }

    /// Set the magnitude outright, keeping the direction
    pub fn set_magnitude(&mut self, mag: f32) {
        self.mag = mag;
        self.update_xy();
    }

    pub fn set_x(&mut self, x: f32) {
        self.xy.x = x;
        self.update_polar();
    }

    pub fn set_y(&mut self, y: f32) {
        self.xy.y = y;
        self.update_polar();
    }

    fn update_xy(&mut self) {
        self.xy = polar_to_cartesian(self.mag, self.dir);
    }

    fn update_polar(&mut self) {
        self.mag = self.xy.length();
        // Zero vector has no direction; keep the last heading.
        if self.xy != Vec2::ZERO {
            self.dir = normalize_angle(self.xy.y.atan2(self.xy.x));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn assert_consistent(v: &Vector) {
        assert!((v.x() - v.magnitude() * v.direction().cos()).abs() < 1e-4);
        assert!((v.y() - v.magnitude() * v.direction().sin()).abs() < 1e-4);
    }

    #[test]
    fn test_add_direction_keeps_magnitude() {
        let mut v = Vector::new(2.0, 0.0);
        v.add_direction(0.1);
        assert!((v.magnitude() - 2.0).abs() < 1e-6);
        assert!((v.direction() - 0.1).abs() < 1e-6);
        assert_consistent(&v);
    }

    #[test]
    fn test_add_magnitude_recomputes_components() {
        let mut v = Vector::new(1.0, PI / 2.0);
        v.add_magnitude(2.0);
        assert!(v.x().abs() < 1e-5);
        assert!((v.y() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_negative_magnitude_reverses_travel() {
        let mut v = Vector::new(1.0, 0.0);
        v.add_magnitude(-2.0);
        assert!((v.x() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_set_x_uses_four_quadrant_direction() {
        let mut v = Vector::default();
        v.set_x(-1.0);
        v.set_y(-1.0);
        assert!((v.magnitude() - 2.0_f32.sqrt()).abs() < 1e-5);
        assert!((v.direction() - 5.0 * PI / 4.0).abs() < 1e-5);
        assert_consistent(&v);
    }

    #[test]
    fn test_zero_components_keep_direction() {
        let mut v = Vector::new(1.0, 0.0);
        v.set_x(0.0);
        assert_eq!(v.magnitude(), 0.0);
        assert_eq!(v.direction(), 0.0);
        assert!(v.unit().is_finite());
    }

    #[test]
    fn test_zeroing_one_axis_at_a_time_follows_remaining_axis() {
        let mut v = Vector::new(1.0, 1.0);
        v.set_x(0.0);
        assert!((v.direction() - FRAC_PI_2).abs() < 1e-5);
        v.set_y(0.0);
        assert_eq!(v.magnitude(), 0.0);
        assert!((v.direction() - FRAC_PI_2).abs() < 1e-5);
    }
}
