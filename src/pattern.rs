//! Timed on/off patterns across the indicators.
//!
//! Indicators are binary, so a "fade" is approximated in software: each step
//! of a ramp pulses every indicator a number of times equal to the step index,
//! and a longer on-time for later indicators makes the ramp roll across the
//! board. Every pulse checks the abort signal first, and every sleep wakes as
//! soon as it fires.

use crate::error::Error;
use crate::lights::{LightDriver, Lights};
use crate::time::Abort;
use crate::types::{Indicator, PatternOutcome, PatternTiming};
use core::time::Duration;

/// Flash rounds per indicator in the introductory pattern.
pub const INTRO_ROUNDS: u32 = 2;

/// Pulses `indicator` once. Returns `false` if aborted during either half.
fn pulse<L: LightDriver, A: Abort>(
    lights: &Lights<L>,
    indicator: Indicator,
    on_for: Duration,
    off_for: Duration,
    abort: &A,
) -> Result<bool, Error> {
    lights.set(indicator, true)?;
    let held = abort.sleep(on_for);
    lights.set(indicator, false)?;

    Ok(held && abort.sleep(off_for))
}

/// Plays the "ready" flash: each indicator in turn, `fade_steps` quick pulses,
/// [`INTRO_ROUNDS`] times.
///
/// Leaves every indicator off, whether it completes or is interrupted.
pub fn introductory_pattern<L: LightDriver, A: Abort>(
    lights: &Lights<L>,
    timing: &PatternTiming,
    abort: &A,
) -> Result<PatternOutcome, Error> {
    for indicator in Indicator::ALL {
        for _ in 0..INTRO_ROUNDS * timing.fade_steps {
            if abort.is_aborted() || !pulse(lights, indicator, timing.pulse, timing.pulse, abort)? {
                lights.set_all(false)?;
                return Ok(PatternOutcome::Interrupted);
            }
        }
    }

    lights.set_all(false)?;
    Ok(PatternOutcome::Completed)
}

/// Plays one rolling fade in and out over roughly `total_duration`.
///
/// The ramp runs step `1..=N` then `N..=1`, where `N` is
/// [`PatternTiming::fade_steps`]. At step `s` each indicator is pulsed `s`
/// times, and the pass ends with a pacing sleep of `total_duration / N`.
///
/// On interruption returns at once without forcing the indicators off; the
/// caller owns the final state. On completion every indicator is off.
pub fn rolling_fade<L: LightDriver, A: Abort>(
    lights: &Lights<L>,
    timing: &PatternTiming,
    total_duration: Duration,
    abort: &A,
) -> Result<PatternOutcome, Error> {
    let steps = timing.fade_steps.max(1);
    let step_time = total_duration / steps;

    for step in (1..=steps).chain((1..=steps).rev()) {
        for indicator in Indicator::ALL {
            let on_for = timing.on_time(indicator);
            for _ in 0..step {
                if abort.is_aborted() || !pulse(lights, indicator, on_for, timing.pulse, abort)? {
                    return Ok(PatternOutcome::Interrupted);
                }
            }
        }

        if !abort.sleep(step_time) {
            return Ok(PatternOutcome::Interrupted);
        }
    }

    lights.set_all(false)?;
    Ok(PatternOutcome::Completed)
}
