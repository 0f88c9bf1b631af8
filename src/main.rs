use clap::{Parser, ValueEnum};
use pomodoro_leds::input::{install_interrupt_handler, spawn_stdin_buttons};
use pomodoro_leds::{
    DurationConfig, Error, Event, LightDriver, Lights, LogLights, PatternTiming, PomodoroTimer,
    dispatch,
};
use std::process::ExitCode;
use std::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::filter::EnvFilter;

#[cfg(feature = "gpio")]
use pomodoro_leds::gpio::{self, GpioButtons, GpioLights};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Pomodoro work/pause timer for a six-LED, two-button board",
    after_help = "Without arguments, WORK_MIN and PAUSE_MIN are read from the environment, \
                  falling back to 25 and 5 minutes."
)]
struct Cli {
    /// Work interval in minutes
    #[arg(requires = "pause", allow_negative_numbers = true)]
    work: Option<String>,

    /// Pause interval in minutes
    #[arg(allow_negative_numbers = true)]
    pause: Option<String>,

    /// Where button presses come from
    #[arg(long, value_enum, default_value_t = InputKind::Stdin)]
    input: InputKind,

    /// Which light driver to use
    #[arg(long, value_enum, default_value_t = LightKind::Log)]
    lights: LightKind,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputKind {
    /// Enter to start/stop, `b` to reset, `q` to quit
    Stdin,
    #[cfg(feature = "gpio")]
    Gpio,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LightKind {
    /// Track lights in memory, visible at trace level
    Log,
    #[cfg(feature = "gpio")]
    Gpio,
}

/// Keeps interrupt-driven inputs armed while alive.
struct InputGuard {
    #[cfg(feature = "gpio")]
    _buttons: Option<GpioButtons>,
}

fn start_input(kind: InputKind, events: &mpsc::Sender<Event>) -> Result<InputGuard, Error> {
    match kind {
        InputKind::Stdin => {
            spawn_stdin_buttons(events.clone())?;
            Ok(InputGuard {
                #[cfg(feature = "gpio")]
                _buttons: None,
            })
        }
        #[cfg(feature = "gpio")]
        InputKind::Gpio => Ok(InputGuard {
            _buttons: Some(GpioButtons::new(
                gpio::CONFIRM_PIN,
                gpio::BACK_PIN,
                events.clone(),
            )?),
        }),
    }
}

/// Initialize logging to stderr, `info` unless RUST_LOG says otherwise.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let args = cli.work.as_deref().zip(cli.pause.as_deref());
    let config = DurationConfig::from_process_env(args)?;

    let driver: Box<dyn LightDriver> = match cli.lights {
        LightKind::Log => Box::new(LogLights::new()),
        #[cfg(feature = "gpio")]
        LightKind::Gpio => Box::new(GpioLights::new(&gpio::LIGHT_PINS)?),
    };

    let (events, inbox) = mpsc::channel();
    install_interrupt_handler(events.clone())?;

    let mut timer = PomodoroTimer::new(
        Lights::new(driver),
        config,
        PatternTiming::default(),
        events.clone(),
    )?;

    let _input = match start_input(cli.input, &events) {
        Ok(input) => input,
        Err(err) => {
            let _ = timer.shutdown();
            return Err(err);
        }
    };

    info!(
        source = ?config.source(),
        "All LEDs on. Press Enter to start/stop the loop. WORK={} min, PAUSE={} min",
        config.work_minutes(),
        config.pause_minutes(),
    );

    dispatch::run(&mut timer, &inbox)?;
    info!("Program terminated, all LEDs off");
    Ok(())
}
