//! Button events and timer actions.

use crate::error::Error;

/// The two board buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Start/stop toggle (the board's Enter pad).
    Confirm,
    /// Reset to the waiting state.
    Back,
}

/// Actions for controlling the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerAction {
    /// Start when idle, stop when running.
    Toggle,
    /// Launch the work/pause cycle.
    Start,
    /// Cancel the cycle and switch all indicators off.
    Stop,
    /// Cancel any cycle and switch all indicators on.
    Reset,
    /// Stop everything and switch all indicators off.
    Shutdown,
}

impl From<Button> for TimerAction {
    fn from(button: Button) -> Self {
        match button {
            Button::Confirm => TimerAction::Toggle,
            Button::Back => TimerAction::Reset,
        }
    }
}

/// Messages delivered to the main thread's dispatcher.
#[derive(Debug)]
pub enum Event {
    /// A button was pressed.
    Press(Button),
    /// Process termination was requested.
    Shutdown,
    /// The cycle worker hit a fatal error.
    Fault(Error),
}
