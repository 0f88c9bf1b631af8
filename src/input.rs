//! Input sources that feed the dispatcher's event channel.

use crate::command::{Button, Event};
use crate::error::Error;
use std::io::{self, BufRead};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Maps a line of keyboard input to an event.
///
/// An empty line (just Enter), `e` or `enter` is the confirm button; `b` or
/// `back` is reset; `q` or `quit` shuts down.
pub fn parse_command(line: &str) -> Option<Event> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "e" | "enter" => Some(Event::Press(Button::Confirm)),
        "b" | "back" => Some(Event::Press(Button::Back)),
        "q" | "quit" => Some(Event::Shutdown),
        _ => None,
    }
}

/// Reads button presses from stdin on a background thread.
///
/// The thread exits at end of input or once the dispatcher is gone.
pub fn spawn_stdin_buttons(events: Sender<Event>) -> Result<JoinHandle<()>, Error> {
    thread::Builder::new()
        .name("stdin-buttons".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        warn!("stdin closed: {err}");
                        break;
                    }
                };

                match parse_command(&line) {
                    Some(event) => {
                        if events.send(event).is_err() {
                            break;
                        }
                    }
                    None => warn!("unrecognised input {line:?}, use Enter, b or q"),
                }
            }
            debug!("stdin reader exiting");
        })
        .map_err(Error::Input)
}

/// Turns Ctrl-C and SIGTERM into [`Event::Shutdown`].
pub fn install_interrupt_handler(events: Sender<Event>) -> Result<(), Error> {
    ctrlc::set_handler(move || {
        let _ = events.send(Event::Shutdown);
    })?;
    Ok(())
}
