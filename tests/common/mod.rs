//! Shared test infrastructure for pomodoro-leds integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::time::Duration;
use pomodoro_leds::{Error, Indicator, LightDriver, Lights, PatternTiming};
use std::time::Instant;

// ============================================================================
// Mock Light Drivers
// ============================================================================

/// Mock driver that records every write for testing
#[derive(Debug, Default)]
pub struct RecordingLights {
    state: [bool; Indicator::COUNT],
    history: Vec<(Indicator, bool)>,
}

impl RecordingLights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self, indicator: Indicator) -> bool {
        self.state[indicator.index()]
    }

    pub fn all_on(&self) -> bool {
        self.state.iter().all(|&on| on)
    }

    pub fn all_off(&self) -> bool {
        self.state.iter().all(|&on| !on)
    }

    pub fn history(&self) -> &[(Indicator, bool)] {
        &self.history
    }

    /// Indicators switched on, in order.
    pub fn switched_on(&self) -> Vec<Indicator> {
        self.history
            .iter()
            .filter(|(_, on)| *on)
            .map(|(indicator, _)| *indicator)
            .collect()
    }

    pub fn on_count(&self, indicator: Indicator) -> usize {
        self.history
            .iter()
            .filter(|&&(i, on)| i == indicator && on)
            .count()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl LightDriver for RecordingLights {
    fn set(&mut self, indicator: Indicator, on: bool) -> Result<(), Error> {
        self.state[indicator.index()] = on;
        self.history.push((indicator, on));
        Ok(())
    }
}

/// Mock driver that fails once its write budget is spent
pub struct FailingLights {
    remaining: usize,
}

impl FailingLights {
    pub fn after(writes: usize) -> Self {
        Self { remaining: writes }
    }
}

impl LightDriver for FailingLights {
    fn set(&mut self, indicator: Indicator, _on: bool) -> Result<(), Error> {
        if self.remaining == 0 {
            return Err(Error::Light {
                indicator,
                reason: "bus fault".into(),
            });
        }
        self.remaining -= 1;
        Ok(())
    }
}

// ============================================================================
// Timing
// ============================================================================

/// Pattern timing with no delays; patterns finish as fast as the driver allows
pub fn instant_timing() -> PatternTiming {
    PatternTiming {
        fade_steps: PatternTiming::DEFAULT_FADE_STEPS,
        pulse: Duration::ZERO,
        stagger: Duration::ZERO,
        fade_length: Duration::ZERO,
    }
}

/// Pattern timing short enough for tests but long enough to interrupt
pub fn fast_timing() -> PatternTiming {
    PatternTiming {
        fade_steps: PatternTiming::DEFAULT_FADE_STEPS,
        pulse: Duration::from_micros(50),
        stagger: Duration::ZERO,
        fade_length: Duration::from_millis(10),
    }
}

/// Pulses each indicator receives during one full rolling fade
pub fn fade_pulses_per_indicator(timing: &PatternTiming) -> u32 {
    let steps = timing.fade_steps.max(1);
    steps * (steps + 1)
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub fn recording_lights() -> Lights<RecordingLights> {
    Lights::new(RecordingLights::new())
}

/// Polls `condition` until it holds or `timeout` passes
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let started = Instant::now();
    while started.elapsed() < timeout {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    condition()
}

/// Lengths of consecutive runs of the same indicator being switched on
pub fn on_runs(lights: &RecordingLights) -> Vec<(Indicator, usize)> {
    let mut runs: Vec<(Indicator, usize)> = Vec::new();
    for indicator in lights.switched_on() {
        match runs.last_mut() {
            Some((last, count)) if *last == indicator => *count += 1,
            _ => runs.push((indicator, 1)),
        }
    }
    runs
}

/// Number of times the introductory pattern started, recognised by its long
/// run of pulses on the first indicator
pub fn intro_plays(lights: &RecordingLights, timing: &PatternTiming) -> usize {
    let intro_run = (pomodoro_leds::pattern::INTRO_ROUNDS * timing.fade_steps) as usize;
    on_runs(lights)
        .iter()
        .filter(|&&(indicator, count)| indicator == Indicator::Back && count >= intro_run)
        .count()
}
