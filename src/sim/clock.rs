//! Fixed timestep clock
//!
//! Turns variable frame deltas into a whole number of simulation ticks.
//! Stopping is an explicit flag: a stopped clock banks no time and yields no
//! ticks until it is restarted.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame delta honoured; anything longer (tab in background) is cut
const MAX_FRAME_DT: f32 = 0.25;

#[derive(Debug, Clone)]
pub struct FixedStep {
    /// Seconds per tick
    step: f32,
    max_substeps: u32,
    accumulator: f32,
    /// Ticks handed out since the last restart
    ticks: u64,
    stopped: bool,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
            ticks: 0,
            stopped: false,
        }
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Bank `dt` seconds and return how many ticks are due now
    pub fn advance(&mut self, dt: f32) -> u32 {
        // A NaN would poison the accumulator for good
        if self.stopped || !dt.is_finite() {
            return 0;
        }
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut due = 0;
        while self.accumulator >= self.step && due < self.max_substeps {
            self.accumulator -= self.step;
            due += 1;
        }
        // Drop backlog the substep cap could not absorb
        if due == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        self.ticks += u64::from(due);
        due
    }

    /// Cancel: no ticks until `restart`
    pub fn stop(&mut self) {
        self.stopped = true;
        self.accumulator = 0.0;
    }

    pub fn restart(&mut self) {
        self.stopped = false;
        self.accumulator = 0.0;
        self.ticks = 0;
    }
}
