//! Work and pause duration configuration.
//!
//! Resolved once at startup from the first present source: command-line
//! arguments, then the `WORK_MIN`/`PAUSE_MIN` environment variables, then
//! built-in defaults.

use crate::error::ConfigError;
use core::time::Duration;

pub const DEFAULT_WORK_MINUTES: f64 = 25.0;
pub const DEFAULT_PAUSE_MINUTES: f64 = 5.0;

pub const WORK_ENV: &str = "WORK_MIN";
pub const PAUSE_ENV: &str = "PAUSE_MIN";

/// Where a [`DurationConfig`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigSource {
    /// Positional command-line arguments.
    Arguments,
    /// `WORK_MIN` and `PAUSE_MIN`.
    Environment,
    /// Built-in 25/5 minutes.
    Defaults,
}

/// Work and pause durations. Immutable after startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationConfig {
    work_minutes: f64,
    pause_minutes: f64,
    work: Duration,
    pause: Duration,
    source: ConfigSource,
}

impl DurationConfig {
    /// Validates both values and converts them to durations.
    ///
    /// # Errors
    /// * `NotFinite` - NaN or infinite minutes
    /// * `Negative` - minutes below zero
    /// * `OutOfRange` - too long to represent as a [`Duration`]
    pub fn new(
        work_minutes: f64,
        pause_minutes: f64,
        source: ConfigSource,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            work: to_duration("work", work_minutes)?,
            pause: to_duration("pause", pause_minutes)?,
            work_minutes,
            pause_minutes,
            source,
        })
    }

    /// Resolves the configuration from the given sources.
    ///
    /// `args` is the pair of positional values, if given. `env` looks up a
    /// variable by name; both variables must be present and non-empty for the
    /// environment to be used. A present but malformed value is an error, never
    /// a silent fallback.
    pub fn resolve<F>(args: Option<(&str, &str)>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some((work, pause)) = args {
            return Self::new(
                parse_minutes("work", work)?,
                parse_minutes("pause", pause)?,
                ConfigSource::Arguments,
            );
        }

        let lookup = |key: &str| env(key).filter(|value| !value.is_empty());
        match (lookup(WORK_ENV), lookup(PAUSE_ENV)) {
            (Some(work), Some(pause)) => Self::new(
                parse_minutes(WORK_ENV, &work)?,
                parse_minutes(PAUSE_ENV, &pause)?,
                ConfigSource::Environment,
            ),
            (Some(_), None) | (None, Some(_)) => {
                tracing::warn!(
                    "only one of {WORK_ENV} and {PAUSE_ENV} is set, using defaults"
                );
                Self::defaults()
            }
            (None, None) => Self::defaults(),
        }
    }

    /// Resolves against the process environment.
    pub fn from_process_env(args: Option<(&str, &str)>) -> Result<Self, ConfigError> {
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// The built-in 25/5 minute configuration.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::new(
            DEFAULT_WORK_MINUTES,
            DEFAULT_PAUSE_MINUTES,
            ConfigSource::Defaults,
        )
    }

    /// Length of the work phase.
    pub fn work(&self) -> Duration {
        self.work
    }

    /// Length of the pause phase.
    pub fn pause(&self) -> Duration {
        self.pause
    }

    /// Work length as configured, in minutes.
    pub fn work_minutes(&self) -> f64 {
        self.work_minutes
    }

    /// Pause length as configured, in minutes.
    pub fn pause_minutes(&self) -> f64 {
        self.pause_minutes
    }

    /// Which source supplied the values.
    pub fn source(&self) -> ConfigSource {
        self.source
    }
}

fn parse_minutes(field: &'static str, raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn to_duration(field: &'static str, minutes: f64) -> Result<Duration, ConfigError> {
    if !minutes.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if minutes < 0.0 {
        return Err(ConfigError::Negative {
            field,
            value: minutes,
        });
    }
    Duration::try_from_secs_f64(minutes * 60.0).map_err(|_| ConfigError::OutOfRange {
        field,
        value: minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_twenty_five_and_five() {
        let config = DurationConfig::defaults().unwrap();
        assert_eq!(config.work(), Duration::from_secs(25 * 60));
        assert_eq!(config.pause(), Duration::from_secs(5 * 60));
        assert_eq!(config.source(), ConfigSource::Defaults);
    }

    #[test]
    fn negative_zero_is_accepted() {
        let config = DurationConfig::new(-0.0, 0.0, ConfigSource::Arguments).unwrap();
        assert_eq!(config.work(), Duration::ZERO);
    }

    #[test]
    fn huge_values_are_out_of_range() {
        let result = DurationConfig::new(1e300, 5.0, ConfigSource::Arguments);
        assert!(matches!(
            result,
            Err(ConfigError::OutOfRange { field: "work", .. })
        ));
    }
}
