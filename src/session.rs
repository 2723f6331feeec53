//! A game session
//!
//! Owns the simulation, the clock and the injected drawing surface and audio
//! sink. The platform layer only forwards frame deltas and input here.

use crate::audio::{AudioSink, Cue};
use crate::input::key_from_touch;
use crate::renderer::{Surface, draw_death_shroud, draw_frame};
use crate::settings::Settings;
use crate::sim::{Arena, FixedStep, GameEvent, GamePhase, GameState, Key, KeyBindings, tick};
use crate::tuning::Tuning;

pub struct Session<S: Surface, A: AudioSink> {
    state: GameState,
    clock: FixedStep,
    tuning: Tuning,
    settings: Settings,
    surface: S,
    audio: A,
}

impl<S: Surface, A: AudioSink> Session<S, A> {
    /// Build a game and start its clock
    pub fn new(
        seed: u64,
        arena: Arena,
        tuning: Tuning,
        settings: Settings,
        surface: S,
        audio: A,
    ) -> Self {
        let state = Self::new_game(seed, arena, tuning, &settings);
        log::info!(
            "Game started: seed {}, canvas {}x{}",
            seed,
            arena.width,
            arena.height
        );
        let mut session = Self {
            state,
            clock: FixedStep::default(),
            tuning,
            settings,
            surface,
            audio,
        };
        draw_frame(&mut session.surface, &session.state);
        session
    }

    fn new_game(seed: u64, arena: Arena, tuning: Tuning, settings: &Settings) -> GameState {
        let mut state = GameState::new(seed, arena, tuning);
        if settings.speed_keys {
            state.player.bindings = KeyBindings::new(&tuning.player, true);
        }
        state
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Lets long headless runs discard recorded frames
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn clock(&self) -> &FixedStep {
        &self.clock
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == GamePhase::Running
    }

    /// Advance by `dt` seconds of wall time. Returns the events of every tick run.
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        let due = self.clock.advance(dt);
        let mut events = Vec::new();
        let mut died = false;

        for _ in 0..due {
            for event in tick(&mut self.state) {
                match event {
                    GameEvent::GoalReached { .. } => self.audio.play(Cue::Goal),
                    GameEvent::Hit { .. } => self.audio.play(Cue::Hit),
                    GameEvent::Died { .. } => died = true,
                }
                events.push(event);
            }
            if died {
                break;
            }
        }

        if due > 0 {
            draw_frame(&mut self.surface, &self.state);
        }
        if died {
            self.end();
        }
        events
    }

    /// Stop the clock and bury the screen
    fn end(&mut self) {
        self.clock.stop();
        let shroud = self.state.death_shroud();
        draw_death_shroud(&mut self.surface, &shroud);
        if self.settings.death_cue {
            self.audio.play(Cue::Death);
        }
        log::info!(
            "Game over after {} ticks, score {}; waiting for restart",
            self.clock.ticks(),
            self.state.score
        );
    }

    /// Start over. Ignored while a game is still running.
    pub fn restart(&mut self, seed: u64) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = Self::new_game(seed, self.state.arena, self.tuning, &self.settings);
        self.clock.restart();
        draw_frame(&mut self.surface, &self.state);
        log::info!("Game restarted with seed: {}", seed);
        true
    }

    pub fn key_down(&mut self, key: Key) {
        if self.is_running() {
            self.state.player.keys.press(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.state.player.keys.release(key);
    }

    /// New touches, by client x coordinate
    pub fn touch_start(&mut self, xs: &[f32]) {
        if !self.settings.touch_controls {
            return;
        }
        let width = self.state.arena.width;
        for &x in xs {
            self.key_down(key_from_touch(x, width));
        }
    }

    /// Ended touches, by client x coordinate
    pub fn touch_end(&mut self, xs: &[f32]) {
        if !self.settings.touch_controls {
            return;
        }
        let width = self.state.arena.width;
        for &x in xs {
            self.key_up(key_from_touch(x, width));
        }
    }
}
