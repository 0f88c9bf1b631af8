//! Main-thread event loop.

use crate::command::{Event, TimerAction};
use crate::error::Error;
use crate::lights::LightDriver;
use crate::timer::PomodoroTimer;
use std::sync::mpsc::Receiver;
use tracing::info;

/// Feeds events to the timer until shutdown, then switches everything off.
///
/// Runs on the calling thread, so every transition is serialized. Returns the
/// first fault, after still attempting the shutdown.
pub fn run<L: LightDriver + 'static>(
    timer: &mut PomodoroTimer<L>,
    events: &Receiver<Event>,
) -> Result<(), Error> {
    let result = dispatch(timer, events);
    let shutdown = timer.handle_action(TimerAction::Shutdown);
    result.and(shutdown)
}

fn dispatch<L: LightDriver + 'static>(
    timer: &mut PomodoroTimer<L>,
    events: &Receiver<Event>,
) -> Result<(), Error> {
    for event in events.iter() {
        match event {
            Event::Press(button) => {
                info!(?button, "button pressed");
                timer.handle_action(button.into())?;
            }
            Event::Shutdown => {
                info!("shutdown requested");
                break;
            }
            Event::Fault(err) => return Err(err),
        }
    }
    Ok(())
}
