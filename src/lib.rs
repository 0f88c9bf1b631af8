#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`PomodoroTimer`**: Owns the run state and the single cycle worker thread
//! - **`LightDriver`**: Trait to implement for your indicator hardware
//! - **`Lights`**: Shared handle to a light driver, used by the timer and the worker
//! - **`Indicator`**: One of the six board lights, in rolling order
//! - **`introductory_pattern` / `rolling_fade`**: Timed on/off patterns
//! - **`CancelToken`**: Cancellation signal that wakes sleeping patterns at once
//! - **`DurationConfig`**: Work and pause durations from arguments, environment or defaults
//! - **`Event`**: Button presses, shutdown requests and worker faults for the dispatcher
//!
//! Indicators are binary, so fades are approximated by varying pulse count and
//! pulse length rather than brightness.

pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod lights;
pub mod pattern;
pub mod time;
pub mod timer;
pub mod types;

#[cfg(feature = "gpio")]
pub mod gpio;

pub use command::{Button, Event, TimerAction};
pub use config::{ConfigSource, DurationConfig};
pub use error::{ConfigError, Error};
pub use lights::{LightDriver, Lights, LogLights};
pub use pattern::{introductory_pattern, rolling_fade};
pub use time::{Abort, CancelToken, Deadline};
pub use timer::PomodoroTimer;
pub use types::{Indicator, PatternOutcome, PatternTiming, RunState};
