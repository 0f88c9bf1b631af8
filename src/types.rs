//! Core types shared by the pattern engine and the timer.

use core::time::Duration;

/// One of the six indicators on the board.
///
/// Declaration order is the rolling order used by every light pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indicator {
    Back,
    A,
    B,
    C,
    D,
    Enter,
}

impl Indicator {
    /// Number of indicators on the board.
    pub const COUNT: usize = 6;

    /// All indicators in rolling order.
    pub const ALL: [Indicator; Self::COUNT] = [
        Indicator::Back,
        Indicator::A,
        Indicator::B,
        Indicator::C,
        Indicator::D,
        Indicator::Enter,
    ];

    /// Position of this indicator in [`Indicator::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Label printed on the board next to the indicator.
    pub const fn name(self) -> &'static str {
        match self {
            Indicator::Back => "Back",
            Indicator::A => "A",
            Indicator::B => "B",
            Indicator::C => "C",
            Indicator::D => "D",
            Indicator::Enter => "Enter",
        }
    }
}

impl core::fmt::Display for Indicator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether the work/pause cycle is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// No cycle loop. Indicators show the last stop (all off) or reset (all on).
    #[default]
    Idle,
    /// Exactly one cycle loop is active.
    Running,
}

/// How a light pattern ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum PatternOutcome {
    /// Ran to the end. All indicators are off.
    Completed,

    /// Cut short by cancellation or a deadline.
    Interrupted,
}

impl PatternOutcome {
    /// Returns true if the pattern was cut short.
    #[inline]
    pub fn is_interrupted(self) -> bool {
        self == PatternOutcome::Interrupted
    }
}

/// Timing parameters for the pattern engine.
///
/// Indicators are binary, so brightness is faked by pulse count and pulse
/// length. The defaults are tuned for the physical board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternTiming {
    /// Steps in one fade ramp, and pulses per intro flash round.
    pub fade_steps: u32,

    /// Base on-time and off-time of a single pulse.
    pub pulse: Duration,

    /// Extra on-time per indicator position, producing the rolling wave.
    pub stagger: Duration,

    /// Nominal length handed to each rolling fade during the pause phase.
    pub fade_length: Duration,
}

impl PatternTiming {
    pub const DEFAULT_FADE_STEPS: u32 = 10;
    pub const DEFAULT_PULSE: Duration = Duration::from_millis(20);
    pub const DEFAULT_STAGGER: Duration = Duration::from_millis(10);
    pub const DEFAULT_FADE_LENGTH: Duration = Duration::from_secs(2);

    /// On-time of one pulse for the given indicator.
    #[inline]
    pub fn on_time(&self, indicator: Indicator) -> Duration {
        self.pulse + self.stagger * indicator.index() as u32
    }
}

impl Default for PatternTiming {
    fn default() -> Self {
        Self {
            fade_steps: Self::DEFAULT_FADE_STEPS,
            pulse: Self::DEFAULT_PULSE,
            stagger: Self::DEFAULT_STAGGER,
            fade_length: Self::DEFAULT_FADE_LENGTH,
        }
    }
}
