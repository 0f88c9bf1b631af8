//! Error types.

use crate::types::{Indicator, RunState};
use std::io;
use thiserror::Error;

/// Startup configuration errors. Always fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a number of minutes, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number of minutes")]
    NotFinite { field: &'static str },

    #[error("{field} of {value} minutes is too long")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Errors raised by the timer, its light driver or its input sources.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The light driver could not set an indicator.
    #[error("failed to set indicator {indicator}: {reason}")]
    Light {
        indicator: Indicator,
        reason: String,
    },

    #[error("light driver lock poisoned")]
    LightsPoisoned,

    /// Operation called from a state that does not allow it.
    #[error("invalid state: expected {expected}, but timer is {actual:?}")]
    InvalidState {
        expected: &'static str,
        actual: RunState,
    },

    #[error("failed to spawn cycle worker: {0}")]
    WorkerSpawn(#[source] io::Error),

    #[error("cycle worker panicked")]
    WorkerPanicked,

    #[error("input error: {0}")]
    Input(#[source] io::Error),

    #[error("failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[cfg(feature = "gpio")]
    #[error("gpio error: {0}")]
    Gpio(#[from] rppal::gpio::Error),
}
