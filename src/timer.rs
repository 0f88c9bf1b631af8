//! Pomodoro timer with run-state management and the background cycle loop.
//!
//! Provides [`PomodoroTimer`], which owns the run state, launches at most one
//! cycle worker thread, and drives the indicators through the work and pause
//! phases. All transitions happen on the thread that owns the timer.

use crate::command::{Event, TimerAction};
use crate::config::DurationConfig;
use crate::error::Error;
use crate::lights::{LightDriver, Lights};
use crate::pattern;
use crate::time::{Abort, CancelToken};
use crate::types::{PatternOutcome, PatternTiming, RunState};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, info};

/// State shared between the timer and its cycle worker.
struct Shared<L> {
    lights: Lights<L>,
    config: DurationConfig,
    timing: PatternTiming,
    first_run: AtomicBool,
    events: Sender<Event>,
}

/// Controls the indicators through alternating work and pause phases.
///
/// Starts `Idle` with every indicator on. Start launches a worker thread that
/// plays the introductory pattern, holds for the work phase, then plays rolling
/// fades for the pause phase, repeating until stopped or reset.
///
/// Stop and reset cancel the worker and join it before touching the
/// indicators, so the final state is deterministic: all off after a stop, all
/// on after a reset.
pub struct PomodoroTimer<L: LightDriver + 'static> {
    shared: Arc<Shared<L>>,
    state: RunState,
    cancel: CancelToken,
    worker: Option<JoinHandle<()>>,
}

impl<L: LightDriver + 'static> PomodoroTimer<L> {
    /// Creates an idle timer and turns every indicator on.
    ///
    /// `events` receives [`Event::Fault`] if the worker hits a driver error.
    pub fn new(
        lights: Lights<L>,
        config: DurationConfig,
        timing: PatternTiming,
        events: Sender<Event>,
    ) -> Result<Self, Error> {
        lights.set_all(true)?;

        Ok(Self {
            shared: Arc::new(Shared {
                lights,
                config,
                timing,
                first_run: AtomicBool::new(true),
                events,
            }),
            state: RunState::Idle,
            cancel: CancelToken::new(),
            worker: None,
        })
    }

    /// Dispatches an action to the matching method.
    pub fn handle_action(&mut self, action: TimerAction) -> Result<(), Error> {
        match action {
            TimerAction::Toggle => self.toggle(),
            TimerAction::Start => self.start(),
            TimerAction::Stop => self.stop(),
            TimerAction::Reset => self.reset(),
            TimerAction::Shutdown => self.shutdown(),
        }
    }

    /// Starts when idle, stops when running.
    pub fn toggle(&mut self) -> Result<(), Error> {
        match self.state() {
            RunState::Idle => self.start(),
            RunState::Running => self.stop(),
        }
    }

    /// Launches the cycle worker.
    ///
    /// Must be called from `Idle`. Arms a fresh cancellation token and queues
    /// the introductory pattern.
    pub fn start(&mut self) -> Result<(), Error> {
        self.reap_ended_worker()?;
        if self.state != RunState::Idle {
            return Err(Error::InvalidState {
                expected: "Idle",
                actual: self.state,
            });
        }

        self.cancel = CancelToken::new();
        self.shared.first_run.store(true, Ordering::SeqCst);

        let shared = Arc::clone(&self.shared);
        let cancel = self.cancel.clone();
        let worker = thread::Builder::new()
            .name("pomodoro-cycle".into())
            .spawn(move || cycle_worker(&shared, &cancel))
            .map_err(Error::WorkerSpawn)?;

        self.worker = Some(worker);
        self.state = RunState::Running;
        info!("Loop started");
        Ok(())
    }

    /// Cancels the cycle and turns every indicator off.
    ///
    /// Must be called from `Running`.
    pub fn stop(&mut self) -> Result<(), Error> {
        self.reap_ended_worker()?;
        if self.state != RunState::Running {
            return Err(Error::InvalidState {
                expected: "Running",
                actual: self.state,
            });
        }

        self.halt_worker()?;
        self.state = RunState::Idle;
        self.shared.lights.set_all(false)?;
        info!("Loop stopped, all LEDs off");
        Ok(())
    }

    /// Returns to the waiting state with every indicator on.
    ///
    /// Can be called from any state. The next start replays the introductory
    /// pattern.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.halt_worker()?;
        self.state = RunState::Idle;
        self.shared.first_run.store(true, Ordering::SeqCst);
        self.shared.lights.set_all(true)?;
        info!("Reset to initial state, waiting for Enter...");
        Ok(())
    }

    /// Cancels any cycle and turns every indicator off. Can be called from any state.
    pub fn shutdown(&mut self) -> Result<(), Error> {
        self.halt_worker()?;
        self.state = RunState::Idle;
        self.shared.lights.set_all(false)?;
        info!("Timer shut down, all LEDs off");
        Ok(())
    }

    /// Returns the current run state.
    ///
    /// A worker that ended on its own after a fault no longer counts as
    /// running.
    pub fn state(&self) -> RunState {
        if self.worker_ended() {
            RunState::Idle
        } else {
            self.state
        }
    }

    /// Returns true while a cycle worker is active.
    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    /// Returns true if the next cycle will open with the introductory pattern.
    pub fn first_run_pending(&self) -> bool {
        self.shared.first_run.load(Ordering::SeqCst)
    }

    /// Returns the durations fixed at construction.
    pub fn config(&self) -> &DurationConfig {
        &self.shared.config
    }

    fn worker_ended(&self) -> bool {
        self.worker.as_ref().is_some_and(JoinHandle::is_finished)
    }

    /// Joins a worker that exited without being cancelled and drops back to `Idle`.
    fn reap_ended_worker(&mut self) -> Result<(), Error> {
        if self.worker_ended() {
            self.state = RunState::Idle;
            self.join_worker()?;
        }
        Ok(())
    }

    fn halt_worker(&mut self) -> Result<(), Error> {
        self.cancel.cancel();
        self.join_worker()
    }

    fn join_worker(&mut self) -> Result<(), Error> {
        if let Some(worker) = self.worker.take() {
            worker.join().map_err(|_| Error::WorkerPanicked)?;
            debug!("cycle worker joined");
        }
        Ok(())
    }
}

impl<L: LightDriver + 'static> Drop for PomodoroTimer<L> {
    fn drop(&mut self) {
        let _ = self.halt_worker();
    }
}

fn cycle_worker<L: LightDriver>(shared: &Shared<L>, cancel: &CancelToken) {
    debug!("cycle worker started");
    if let Err(err) = run_cycles(shared, cancel) {
        // The receiver is gone only while the process is exiting.
        let _ = shared.events.send(Event::Fault(err));
    }
    debug!("cycle worker exiting");
}

fn run_cycles<L: LightDriver>(shared: &Shared<L>, cancel: &CancelToken) -> Result<(), Error> {
    let config = &shared.config;

    while !cancel.is_cancelled() {
        if shared.first_run.load(Ordering::SeqCst) {
            info!("First Enter press: 'I'm ready' light sequence");
            let outcome = pattern::introductory_pattern(&shared.lights, &shared.timing, cancel)?;
            shared.first_run.store(false, Ordering::SeqCst);
            if outcome.is_interrupted() {
                debug!("introductory pattern interrupted");
                break;
            }
        }

        if config.work().is_zero() && config.pause().is_zero() {
            info!("Work and pause are both zero, holding until stopped");
            cancel.wait();
            break;
        }

        info!("Working {} minutes...", config.work_minutes());
        if !cancel.sleep(config.work()) {
            break;
        }

        info!(
            "Pause {} minutes dynamic smooth fade effect",
            config.pause_minutes()
        );
        if pause_phase(shared, cancel)?.is_interrupted() {
            break;
        }
    }

    Ok(())
}

/// Plays back-to-back rolling fades until the pause deadline.
///
/// The last fade is clipped at the deadline rather than overrunning it.
fn pause_phase<L: LightDriver>(
    shared: &Shared<L>,
    cancel: &CancelToken,
) -> Result<PatternOutcome, Error> {
    let deadline = cancel.until(Instant::now().checked_add(shared.config.pause()));

    while !deadline.is_aborted() {
        let _ = pattern::rolling_fade(
            &shared.lights,
            &shared.timing,
            shared.timing.fade_length,
            &deadline,
        )?;
    }

    if cancel.is_cancelled() {
        debug!("pause phase interrupted");
        return Ok(PatternOutcome::Interrupted);
    }

    shared.lights.set_all(false)?;
    Ok(PatternOutcome::Completed)
}
