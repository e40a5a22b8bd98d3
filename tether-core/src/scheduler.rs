//! Fixed-timestep scheduler.
//!
//! A dedicated thread owns every registered simulation and the display while
//! running. Each loop iteration adds the elapsed wall-clock time to a
//! fractional tick debt; for every whole tick owed it snapshots the input,
//! ticks every simulation once and runs one render pass.

use crate::config::SchedulerConfig;
use crate::error::SimError;
use crate::input::{InputState, Key};
use crate::render::Display;
use crate::simulation::Simulation;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Upper bound on one sleep of the loop thread; `stop` waits at most this
/// long for the loop to notice.
const MAX_SLEEP: Duration = Duration::from_millis(20);

/// Fractional tick debt.
#[derive(Debug, Clone)]
pub struct TickAccumulator {
    ms_per_tick: f64,
    delta: f64,
}

impl TickAccumulator {
    pub fn new(ticks_per_second: f64) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_second,
            delta: 0.0,
        }
    }

    /// Add `elapsed / ms_per_tick` to the debt.
    pub fn add(&mut self, elapsed: Duration) {
        self.delta += elapsed.as_secs_f64() * 1000.0 / self.ms_per_tick;
    }

    /// Consume one whole tick of debt if one is owed.
    pub fn take_tick(&mut self) -> bool {
        if self.delta >= 1.0 {
            self.delta -= 1.0;
            true
        } else {
            false
        }
    }

    /// Drop all whole ticks still owed, keeping the fraction. Returns how many.
    pub fn discard_whole(&mut self) -> u64 {
        let whole = self.delta.floor().max(0.0);
        self.delta -= whole;
        whole as u64
    }

    /// Wall-clock time until the next tick is owed.
    pub fn until_next(&self) -> Duration {
        let remaining = (1.0 - self.delta).max(0.0) * self.ms_per_tick;
        Duration::from_secs_f64(remaining / 1000.0)
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }
}

struct Parts<D> {
    simulations: Vec<Box<dyn Simulation>>,
    display: D,
}

impl<D: Display> Parts<D> {
    /// One discrete tick for every simulation followed by one render pass.
    fn tick(&mut self, input: &InputState) {
        let snapshot = input.snapshot();
        let reset = snapshot.is_pressed(Key::Reset);
        for sim in self.simulations.iter_mut() {
            if reset {
                sim.reset();
            }
            sim.tick(&snapshot);
        }
        self.render();
    }

    fn render(&mut self) {
        match self.display.canvas() {
            Some(canvas) => {
                for sim in &self.simulations {
                    sim.render(canvas);
                }
                self.display.present();
            }
            None => debug!("no render surface, skipping frame"),
        }
    }
}

/// Runs registered simulations at a fixed tick rate on its own thread.
///
/// ```
/// use tether_core::config::SchedulerConfig;
/// use tether_core::render::Headless;
/// use tether_core::scheduler::Scheduler;
///
/// let mut scheduler = Scheduler::new(SchedulerConfig::default(), Headless).unwrap();
/// scheduler.start().unwrap();
/// scheduler.start().unwrap(); // no-op
/// scheduler.stop().unwrap();
/// scheduler.stop().unwrap(); // no-op
/// ```
pub struct Scheduler<D: Display + 'static> {
    config: SchedulerConfig,
    input: Arc<InputState>,
    running: Arc<AtomicBool>,
    parked: Option<Parts<D>>,
    handle: Option<JoinHandle<Parts<D>>>,
}

impl<D: Display + 'static> Scheduler<D> {
    pub fn new(config: SchedulerConfig, display: D) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            config,
            input: Arc::new(InputState::new()),
            running: Arc::new(AtomicBool::new(false)),
            parked: Some(Parts {
                simulations: Vec::new(),
                display,
            }),
            handle: None,
        })
    }

    /// Handle the host writes key state into.
    pub fn input(&self) -> Arc<InputState> {
        Arc::clone(&self.input)
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Register a simulation. Only possible while stopped.
    pub fn add_simulation(&mut self, simulation: Box<dyn Simulation>) -> Result<(), SimError> {
        let parts = self.parked_mut()?;
        info!("registered simulation {}", simulation.name());
        parts.simulations.push(simulation);
        Ok(())
    }

    /// Registered simulations, readable while stopped.
    pub fn simulations(&self) -> Option<&[Box<dyn Simulation>]> {
        self.parked.as_ref().map(|p| p.simulations.as_slice())
    }

    /// The display, readable while stopped.
    pub fn display(&self) -> Option<&D> {
        self.parked.as_ref().map(|p| &p.display)
    }

    /// Run exactly one tick and render pass on the caller's thread.
    /// Only possible while stopped.
    pub fn tick_once(&mut self) -> Result<(), SimError> {
        let input = Arc::clone(&self.input);
        self.parked_mut()?.tick(&input);
        Ok(())
    }

    /// Spawn the loop thread. Does nothing if it is already running.
    pub fn start(&mut self) -> Result<(), SimError> {
        if self.handle.is_some() {
            return Ok(());
        }
        let parts = self.parked.take().ok_or(SimError::LoopPanicked)?;
        let input = Arc::clone(&self.input);
        let running = Arc::clone(&self.running);
        let config = self.config.clone();

        running.store(true, Ordering::Release);
        let spawned = thread::Builder::new()
            .name("tether-sim".into())
            .spawn(move || run_loop(parts, input, running, config));
        match spawned {
            Ok(handle) => {
                info!(
                    "scheduler started at {} ticks/s",
                    self.config.ticks_per_second
                );
                self.handle = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::Release);
                Err(SimError::Spawn(e.to_string()))
            }
        }
    }

    /// Stop the loop and wait for the thread to exit. Does nothing if it is
    /// not running. Simulations keep their state for the next `start`.
    pub fn stop(&mut self) -> Result<(), SimError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        self.running.store(false, Ordering::Release);
        match handle.join() {
            Ok(parts) => {
                info!("scheduler stopped");
                self.parked = Some(parts);
                Ok(())
            }
            Err(_) => {
                warn!("simulation thread panicked; registered simulations are lost");
                Err(SimError::LoopPanicked)
            }
        }
    }

    fn parked_mut(&mut self) -> Result<&mut Parts<D>, SimError> {
        if self.handle.is_some() {
            return Err(SimError::AlreadyRunning);
        }
        self.parked.as_mut().ok_or(SimError::LoopPanicked)
    }
}

impl<D: Display + 'static> Drop for Scheduler<D> {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

fn run_loop<D: Display>(
    mut parts: Parts<D>,
    input: Arc<InputState>,
    running: Arc<AtomicBool>,
    config: SchedulerConfig,
) -> Parts<D> {
    let mut accumulator = TickAccumulator::new(config.ticks_per_second);
    let mut last = Instant::now();

    while running.load(Ordering::Acquire) {
        let now = Instant::now();
        accumulator.add(now.duration_since(last));
        last = now;

        let mut ran = 0;
        while accumulator.take_tick() {
            parts.tick(&input);
            ran += 1;
            if ran >= config.max_catch_up {
                let dropped = accumulator.discard_whole();
                if dropped > 0 {
                    debug!("behind schedule, dropped {dropped} ticks");
                }
                break;
            }
        }

        thread::sleep(accumulator.until_next().min(MAX_SLEEP));
    }
    parts
}
