//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here, including the seeded RNG,
//! so two states built from the same seed evolve identically.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, Wrapping};
use super::collision::HitRect;
use super::vector::Vector;
use crate::tuning::{GoalTuning, ObstacleTuning, PlayerTuning, Tuning};

/// A point in canvas pixel space
pub type Position = Vec2;

/// Speed of a ship built with `Player::new`
pub const DEFAULT_PLAYER_SPEED: f32 = 2.0;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance the simulation
    Running,
    /// Ship destroyed; only a restart leaves this phase
    Ended,
}

/// Something that happened during a tick, for audio/logging/HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ship entered the goal's hit rectangle
    GoalReached { score: u64 },
    /// Ship started touching an obstacle
    Hit { damage: i32, health: i32 },
    /// Health ran out; emitted once per game
    Died { score: u64 },
}

/// Directional keys the ship reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Up,
    Right,
    Down,
}

/// What holding a key does each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Add radians to the heading
    Steer(f32),
    /// Add to the speed
    Throttle(f32),
}

/// Key → effect table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBindings {
    turn: f32,
    /// `None` when the speed keys are unbound
    throttle: Option<f32>,
}

impl KeyBindings {
    pub fn new(tuning: &PlayerTuning, speed_keys: bool) -> Self {
        Self {
            turn: tuning.turn_increment,
            throttle: speed_keys.then_some(tuning.throttle_increment),
        }
    }

    pub fn effect(&self, key: Key) -> Option<Effect> {
        match key {
            Key::Right => Some(Effect::Steer(self.turn)),
            Key::Left => Some(Effect::Steer(-self.turn)),
            Key::Up => self.throttle.map(Effect::Throttle),
            Key::Down => self.throttle.map(|t| Effect::Throttle(-t)),
        }
    }
}

/// Keys currently held, in press order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys(Vec<Key>);

impl HeldKeys {
    pub fn press(&mut self, key: Key) {
        if !self.0.contains(&key) {
            self.0.push(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.0.retain(|k| *k != key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.0.contains(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        self.0.iter().copied()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// A drifting damaging square
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Position,
    pub vel: Vector,
    /// Side length
    pub size: f32,
    /// 1..=9
    pub damage: i32,
    /// Fill alpha, fixed at spawn
    pub opacity: f32,
}

impl Obstacle {
    /// Spawn at a random position with a random heading and speed
    pub fn spawn(id: u32, rng: &mut Pcg32, arena: &Arena, tuning: &ObstacleTuning) -> Self {
        let heading = rng.random_range(0.0..TAU);
        let speed = tuning.min_speed + (tuning.max_speed - tuning.min_speed) * rng.random::<f32>();
        let pos = Vec2::new(
            (arena.width * rng.random::<f32>()).floor(),
            (arena.height * rng.random::<f32>()).floor(),
        );
        let draw = rng.random::<f32>();
        Self::from_draw(
            id,
            pos,
            Vector::new(speed, heading),
            draw,
            tuning.size_range(arena),
        )
    }

    /// Build an obstacle whose size, damage and opacity all derive from one
    /// draw in `[0, 1)`, so bigger obstacles hit harder and are more opaque.
    pub fn from_draw(
        id: u32,
        pos: Position,
        vel: Vector,
        draw: f32,
        size_range: (f32, f32),
    ) -> Self {
        let (min_size, max_size) = size_range;
        Self {
            id,
            pos,
            vel,
            size: min_size + ((max_size - min_size) * draw).floor(),
            damage: 1 + (9.0 * draw).floor() as i32,
            opacity: 0.3 + (7.0 * draw).floor() / 10.0,
        }
    }

    pub fn rect(&self) -> HitRect {
        HitRect::new(self.pos, Vec2::splat(self.size))
    }

    /// Strictly inside the square
    pub fn point_inside(&self, point: Position) -> bool {
        self.rect().contains_point(point)
    }

    /// Move one tick and wrap
    pub fn update(&mut self, arena: &Arena) {
        self.advance(arena);
    }
}

impl Wrapping for Obstacle {
    fn position_mut(&mut self) -> &mut Vec2 {
        &mut self.pos
    }

    fn velocity(&self) -> &Vector {
        &self.vel
    }
}

/// A stationary circular target
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: u32,
    /// Circle centre
    pub pos: Position,
    pub radius: f32,
    /// Enlarged rectangle that counts as reaching the goal
    pub hit_rect: HitRect,
}

impl Goal {
    pub fn new(id: u32, pos: Position, tuning: &GoalTuning) -> Self {
        Self {
            id,
            pos,
            radius: tuning.radius,
            hit_rect: HitRect::centered(pos, tuning.radius + tuning.courtesy_margin),
        }
    }

    /// Random position with the whole circle on screen
    pub fn spawn(id: u32, rng: &mut Pcg32, arena: &Arena, tuning: &GoalTuning) -> Self {
        let r = tuning.radius;
        let pos = Vec2::new(
            (r + (arena.width - 2.0 * r) * rng.random::<f32>()).floor(),
            (r + (arena.height - 2.0 * r) * rng.random::<f32>()).floor(),
        );
        Self::new(id, pos, tuning)
    }

    /// Bounding box of the drawn circle
    pub fn visual_rect(&self) -> HitRect {
        HitRect::centered(self.pos, self.radius)
    }

    pub fn is_hit_by(&self, point: Position) -> bool {
        self.hit_rect.contains_point(point)
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Nose of the ship
    pub pos: Position,
    vel: Vector,
    health: i32,
    max_health: i32,
    /// Fill alpha, tracks health
    alpha: f32,
    pub keys: HeldKeys,
    pub bindings: KeyBindings,
    width: f32,
    length: f32,
}

impl Player {
    /// Ship at the canvas centre heading right at the default speed
    pub fn new(arena: &Arena, tuning: &PlayerTuning) -> Self {
        Self::with_speed(arena, tuning, DEFAULT_PLAYER_SPEED)
    }

    pub fn with_speed(arena: &Arena, tuning: &PlayerTuning, speed: f32) -> Self {
        Self {
            pos: arena.center(),
            vel: Vector::new(speed, 0.0),
            health: tuning.max_health,
            max_health: tuning.max_health,
            alpha: 1.0,
            keys: HeldKeys::default(),
            bindings: KeyBindings::new(tuning, true),
            width: tuning.width,
            length: tuning.length,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.magnitude()
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.vel.direction()
    }

    #[inline]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[inline]
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn steer(&mut self, delta: f32) {
        self.vel.add_direction(delta);
    }

    pub fn change_speed(&mut self, delta: f32) {
        self.vel.add_magnitude(delta);
    }

    /// Raise speed by `delta` without passing `max`. No-op once at `max`.
    pub fn speed_up(&mut self, delta: f32, max: f32) {
        if self.speed() < max {
            self.vel.set_magnitude((self.speed() + delta).min(max));
        }
    }

    /// Lower speed by `delta` without passing `min`. No-op once at or below `min`.
    pub fn slow_down(&mut self, delta: f32, min: f32) {
        if self.speed() > min {
            self.vel.set_magnitude((self.speed() - delta).max(min));
        }
    }

    /// Subtract damage. Health may go negative.
    pub fn reduce_health(&mut self, damage: i32) {
        self.health -= damage;
        self.update_alpha();
    }

    /// Add health, capped at the maximum
    pub fn increase_health(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
        self.update_alpha();
    }

    fn update_alpha(&mut self) {
        self.alpha = 0.2 + 0.8 * (self.health as f32 / self.max_health as f32);
    }

    /// Apply held keys, move, wrap
    pub fn update(&mut self, arena: &Arena) {
        self.apply_keys();
        self.advance(arena);
    }

    fn apply_keys(&mut self) {
        let effects: Vec<Effect> = self
            .keys
            .iter()
            .filter_map(|k| self.bindings.effect(k))
            .collect();
        for effect in effects {
            match effect {
                Effect::Steer(delta) => self.steer(delta),
                Effect::Throttle(delta) => self.change_speed(delta),
            }
        }
    }

    /// Nose, back-left and back-right corners of the ship
    pub fn triangle(&self) -> [Vec2; 3] {
        let unit = self.vel.unit();
        let back = self.pos - self.length * unit;
        let side = Vec2::new(-unit.y, unit.x) * (self.width / 2.0);
        [self.pos, back + side, back - side]
    }
}

impl Wrapping for Player {
    fn position_mut(&mut self) -> &mut Vec2 {
        &mut self.pos
    }

    fn velocity(&self) -> &Vector {
        &self.vel
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub arena: Arena,
    pub tuning: Tuning,
    /// Never decreases
    pub score: u64,
    /// Simulation tick counter
    pub frame: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Spawn order is collision priority
    pub obstacles: Vec<Obstacle>,
    pub goal: Goal,
    /// Ship was inside an obstacle on the previous tick
    pub player_hit: bool,
    next_id: u32,
}

impl GameState {
    /// Create a new game with the given seed
    pub fn new(seed: u64, arena: Arena, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut player = Player::with_speed(&arena, &tuning.player, tuning.initial_speed);
        player.bindings = KeyBindings::new(&tuning.player, false);
        let goal = Goal::spawn(1, &mut rng, &arena, &tuning.goal);

        let mut state = Self {
            seed,
            rng,
            arena,
            tuning,
            score: 0,
            frame: 0,
            phase: GamePhase::Running,
            player,
            obstacles: Vec::new(),
            goal,
            player_hit: false,
            next_id: 2,
        };
        for _ in 0..state.tuning.initial_obstacles {
            state.spawn_obstacle();
        }
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a randomly placed obstacle
    pub fn spawn_obstacle(&mut self) {
        let id = self.next_entity_id();
        let obstacle = Obstacle::spawn(id, &mut self.rng, &self.arena, &self.tuning.obstacle);
        self.obstacles.push(obstacle);
    }

    /// Discard the current goal for a fresh random one
    pub fn respawn_goal(&mut self) {
        let id = self.next_entity_id();
        self.goal = Goal::spawn(id, &mut self.rng, &self.arena, &self.tuning.goal);
    }

    /// Random obstacles for the death screen. Not added to the game.
    pub fn death_shroud(&mut self) -> Vec<Obstacle> {
        (0..self.tuning.death_shroud_count)
            .map(|_| Obstacle::spawn(0, &mut self.rng, &self.arena, &self.tuning.obstacle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arena() -> Arena {
        Arena::new(1024.0, 768.0)
    }

    #[test]
    fn test_fresh_player_defaults() {
        let player = Player::new(&arena(), &PlayerTuning::default());
        assert_eq!(player.pos, Vec2::new(512.0, 384.0));
        assert_eq!(player.speed(), 2.0);
        assert_eq!(player.health(), 100);
        assert_eq!(player.alpha(), 1.0);
    }

    #[test]
    fn test_steer_right_once() {
        let mut player = Player::new(&arena(), &PlayerTuning::default());
        player.keys.press(Key::Right);
        player.update(&arena());
        assert!((player.heading() - 0.1).abs() < 1e-6);
        assert!((player.speed() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_speed_keys_unbound() {
        let tuning = PlayerTuning::default();
        let mut player = Player::new(&arena(), &tuning);
        player.bindings = KeyBindings::new(&tuning, false);
        player.keys.press(Key::Up);
        player.update(&arena());
        assert_eq!(player.speed(), 2.0);

        player.bindings = KeyBindings::new(&tuning, true);
        player.update(&arena());
        assert!((player.speed() - 2.2).abs() < 1e-6);
    }

    #[test]
    fn test_opposed_keys_cancel() {
        let mut player = Player::new(&arena(), &PlayerTuning::default());
        player.keys.press(Key::Left);
        player.keys.press(Key::Right);
        player.update(&arena());
        assert!(player.heading().abs() < 1e-6);
    }

    #[test]
    fn test_held_keys_dedup_and_release() {
        let mut keys = HeldKeys::default();
        keys.press(Key::Left);
        keys.press(Key::Left);
        keys.press(Key::Right);
        assert_eq!(keys.iter().collect::<Vec<_>>(), vec![Key::Left, Key::Right]);
        keys.release(Key::Left);
        assert!(!keys.is_held(Key::Left));
        assert!(keys.is_held(Key::Right));
    }

    #[test]
    fn test_health_and_alpha() {
        let mut player = Player::new(&arena(), &PlayerTuning::default());
        player.reduce_health(50);
        assert_eq!(player.health(), 50);
        assert!((player.alpha() - 0.6).abs() < 1e-6);

        player.increase_health(80);
        assert_eq!(player.health(), 100);
        assert!((player.alpha() - 1.0).abs() < 1e-6);

        player.reduce_health(130);
        assert_eq!(player.health(), -30);
        assert!(player.is_dead());
    }

    #[test]
    fn test_triangle_points_back_from_nose() {
        let player = Player::new(&arena(), &PlayerTuning::default());
        let [nose, left, right] = player.triangle();
        assert_eq!(nose, player.pos);
        // Heading 0 → base is 30px to the left, 15px wide
        assert!((left.x - (nose.x - 30.0)).abs() < 1e-4);
        assert!((right.x - (nose.x - 30.0)).abs() < 1e-4);
        assert!(((left.y - right.y).abs() - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_obstacle_point_inside() {
        let o = Obstacle::from_draw(1, Vec2::new(10.0, 10.0), Vector::default(), 0.5, (20.0, 60.0));
        assert_eq!(o.size, 40.0);
        assert_eq!(o.damage, 5);
        assert!((o.opacity - 0.6).abs() < 1e-6);
        assert!(o.point_inside(Vec2::new(11.0, 49.0)));
        assert!(!o.point_inside(Vec2::new(10.0, 20.0)));
        assert!(!o.point_inside(Vec2::new(20.0, 50.0)));
    }

    #[test]
    fn test_spawned_obstacles_within_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let tuning = ObstacleTuning::default();
        for id in 0..200 {
            let o = Obstacle::spawn(id, &mut rng, &arena(), &tuning);
            assert!((1..=9).contains(&o.damage));
            assert!(o.size >= 20.0 && o.size < 60.0);
            assert!(o.vel.magnitude() >= 0.5 && o.vel.magnitude() <= 3.0);
            assert!(o.pos.x >= 0.0 && o.pos.x <= 1024.0);
            assert!(o.pos.y >= 0.0 && o.pos.y <= 768.0);
        }
    }

    #[test]
    fn test_goal_on_screen() {
        let mut rng = Pcg32::seed_from_u64(3);
        let tuning = GoalTuning::default();
        for id in 0..200 {
            let goal = Goal::spawn(id, &mut rng, &arena(), &tuning);
            assert!(goal.pos.x >= 8.0 && goal.pos.x + 8.0 <= 1024.0);
            assert!(goal.pos.y >= 8.0 && goal.pos.y + 8.0 <= 768.0);
        }
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new(42, arena(), Tuning::default());
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.speed(), 4.0);
        assert_ne!(state.obstacles[0].id, state.obstacles[1].id);
    }

    #[test]
    fn test_death_shroud_leaves_obstacles_alone() {
        let mut state = GameState::new(42, arena(), Tuning::default());
        let shroud = state.death_shroud();
        assert_eq!(shroud.len(), 2500);
        assert_eq!(state.obstacles.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_obstacle_traits_rise_together(a in 0.0f32..1.0, b in 0.0f32..1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let small = Obstacle::from_draw(0, Vec2::ZERO, Vector::default(), lo, (20.0, 60.0));
            let big = Obstacle::from_draw(0, Vec2::ZERO, Vector::default(), hi, (20.0, 60.0));
            prop_assert!(big.size >= small.size);
            prop_assert!(big.damage >= small.damage);
            prop_assert!(big.opacity >= small.opacity);
        }

        #[test]
        fn prop_goal_hit_rect_contains_circle(
            x in 8.0f32..1000.0,
            y in 8.0f32..700.0,
            radius in 1.0f32..50.0,
            margin in 0.5f32..20.0,
        ) {
            let tuning = GoalTuning { radius, courtesy_margin: margin };
            let goal = Goal::new(0, Vec2::new(x, y), &tuning);
            prop_assert!(goal.hit_rect.strictly_contains(&goal.visual_rect()));
        }

        #[test]
        fn prop_increase_health_never_exceeds_max(start in -50i32..=100, heal in 0i32..500) {
            let mut player = Player::new(&Arena::new(800.0, 600.0), &PlayerTuning::default());
            player.reduce_health(100 - start);
            player.increase_health(heal);
            prop_assert!(player.health() <= player.max_health());
        }
    }
}
