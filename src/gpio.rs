//! Raspberry Pi GPIO light driver and buttons.
//!
//! Pin numbers are BCM numbers. Indicators are driven active high; buttons are
//! active low with the internal pull-up enabled.

use crate::command::{Button, Event};
use crate::error::Error;
use crate::lights::LightDriver;
use crate::types::Indicator;
use core::time::Duration;
use rppal::gpio::{Gpio, InputPin, Level, OutputPin, Trigger};
use std::sync::mpsc::Sender;

/// Output pins for the indicators, in rolling order.
pub const LIGHT_PINS: [u8; Indicator::COUNT] = [5, 6, 13, 19, 26, 21];

pub const CONFIRM_PIN: u8 = 20;
pub const BACK_PIN: u8 = 16;

const DEBOUNCE: Duration = Duration::from_millis(50);

/// One GPIO output per indicator.
pub struct GpioLights {
    pins: Vec<OutputPin>,
}

impl GpioLights {
    /// Claims the pins and drives them low.
    pub fn new(pins: &[u8; Indicator::COUNT]) -> Result<Self, Error> {
        let gpio = Gpio::new()?;
        let pins = pins
            .iter()
            .map(|&pin| gpio.get(pin).map(|pin| pin.into_output_low()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { pins })
    }
}

impl LightDriver for GpioLights {
    fn set(&mut self, indicator: Indicator, on: bool) -> Result<(), Error> {
        let pin = self
            .pins
            .get_mut(indicator.index())
            .ok_or_else(|| Error::Light {
                indicator,
                reason: "no pin assigned".into(),
            })?;
        pin.write(if on { Level::High } else { Level::Low });
        Ok(())
    }
}

/// Confirm and back buttons on GPIO edge interrupts.
///
/// Interrupts stay armed as long as this value is alive.
pub struct GpioButtons {
    _confirm: InputPin,
    _back: InputPin,
}

impl GpioButtons {
    pub fn new(confirm: u8, back: u8, events: Sender<Event>) -> Result<Self, Error> {
        let gpio = Gpio::new()?;
        Ok(Self {
            _confirm: watch(&gpio, confirm, Button::Confirm, events.clone())?,
            _back: watch(&gpio, back, Button::Back, events)?,
        })
    }
}

fn watch(gpio: &Gpio, pin: u8, button: Button, events: Sender<Event>) -> Result<InputPin, Error> {
    let mut input = gpio.get(pin)?.into_input_pullup();
    input.set_async_interrupt(Trigger::FallingEdge, Some(DEBOUNCE), move |_| {
        let _ = events.send(Event::Press(button));
    })?;
    Ok(input)
}
