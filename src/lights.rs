//! Light driver abstraction and the shared handle used by the timer.
//!
//! Defines the [`LightDriver`] trait for indicator hardware, the [`Lights`]
//! handle shared between the main thread and the cycle worker, and
//! [`LogLights`], a driver for running without a board attached.

use crate::error::Error;
use crate::types::Indicator;
use std::sync::{Arc, Mutex};

/// Trait for abstracting indicator hardware.
///
/// Implement this for your board (GPIO, I2C expander, etc.). A failed write is
/// fatal to the timer, since the indicators are its only output.
pub trait LightDriver: Send {
    /// Switches one indicator on or off.
    fn set(&mut self, indicator: Indicator, on: bool) -> Result<(), Error>;
}

impl<T: LightDriver + ?Sized> LightDriver for Box<T> {
    fn set(&mut self, indicator: Indicator, on: bool) -> Result<(), Error> {
        (**self).set(indicator, on)
    }
}

/// Cloneable handle to a light driver shared across threads.
#[derive(Debug)]
pub struct Lights<L> {
    driver: Arc<Mutex<L>>,
}

impl<L> Clone for Lights<L> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
        }
    }
}

impl<L: LightDriver> Lights<L> {
    pub fn new(driver: L) -> Self {
        Self {
            driver: Arc::new(Mutex::new(driver)),
        }
    }

    pub fn set(&self, indicator: Indicator, on: bool) -> Result<(), Error> {
        self.driver
            .lock()
            .map_err(|_| Error::LightsPoisoned)?
            .set(indicator, on)
    }

    /// Switches every indicator, in rolling order, under a single lock.
    pub fn set_all(&self, on: bool) -> Result<(), Error> {
        let mut driver = self.driver.lock().map_err(|_| Error::LightsPoisoned)?;
        for indicator in Indicator::ALL {
            driver.set(indicator, on)?;
        }
        Ok(())
    }

    /// Runs `f` against the driver, e.g. to inspect its state.
    pub fn with_driver<R>(&self, f: impl FnOnce(&L) -> R) -> Result<R, Error> {
        let driver = self.driver.lock().map_err(|_| Error::LightsPoisoned)?;
        Ok(f(&driver))
    }
}

const LIT: char = '●';
const UNLIT: char = '○';
const STATUS_BAR_CAPACITY: usize = Indicator::COUNT * LIT.len_utf8();

/// Driver that keeps indicator state in memory and traces every change.
///
/// Used on development hosts with no board attached; enable `trace` level
/// logging to watch the patterns.
#[derive(Debug, Default)]
pub struct LogLights {
    state: [bool; Indicator::COUNT],
}

impl LogLights {
    /// Creates a driver with every indicator off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last state written for `indicator`.
    pub fn is_on(&self, indicator: Indicator) -> bool {
        self.state[indicator.index()]
    }

    /// Renders the indicators as a row of lit and unlit dots.
    pub fn status_bar(&self) -> heapless::String<STATUS_BAR_CAPACITY> {
        let mut bar = heapless::String::new();
        for on in self.state {
            // Capacity covers one dot per indicator.
            let _ = bar.push(if on { LIT } else { UNLIT });
        }
        bar
    }
}

impl LightDriver for LogLights {
    fn set(&mut self, indicator: Indicator, on: bool) -> Result<(), Error> {
        self.state[indicator.index()] = on;
        tracing::trace!(%indicator, on, lights = %self.status_bar());
        Ok(())
    }
}
