// driver.rs - Randomized step driver and its control state machine

//! The driver owns a [`Lattice`] and opens one closed site per [`Driver::step`].
//! It knows nothing about timers or windows: whoever delivers ticks (a clock
//! task, the terminal runner, a test) just calls `step`.
//!
//! ```text
//! Stopped --start--> Running <--toggle_pause--> Paused
//!    ^                  |  \
//!    +------stop--------+   +--step--> Percolated / Exhausted (terminal)
//! restart: any state -> Stopped, lattice closed again
//! ```

use std::time::Duration;

use log::{debug, info, trace};

use crate::lattice::Lattice;
use crate::source::{RandomSites, SiteSource};

pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 100;
pub const DEFAULT_SPEED: u32 = 10;

/// Candidates drawn per site of the lattice before falling back to a scan.
const MAX_REJECTIONS_PER_SITE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Stopped,
    Running,
    Paused,
    Percolated,
    /// Every site was open and the lattice still did not percolate.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not running or paused; nothing happened.
    Unchanged,
    Continue,
    Percolated,
    /// No closed site was left to open.
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct Driver<S = RandomSites> {
    lattice: Lattice,
    source: S,
    state: DriverState,
    speed: u32,
    steps: u64,
}

impl<S: SiteSource> Driver<S> {
    pub fn new(n: usize, source: S) -> Self {
        Self::from_lattice(Lattice::new(n), source)
    }

    /// Drive an existing lattice instead of a fresh one.
    pub fn from_lattice(lattice: Lattice, source: S) -> Self {
        Self {
            lattice,
            source,
            state: DriverState::Stopped,
            speed: DEFAULT_SPEED,
            steps: 0,
        }
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.set_speed(speed);
        self
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// The site source, e.g. to see how many draws a scripted replay consumed.
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Sites opened since the last restart.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// True while a run is in progress, paused or not.
    pub fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running | DriverState::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.state == DriverState::Paused
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, DriverState::Percolated | DriverState::Exhausted)
    }

    pub fn can_start(&self) -> bool {
        self.state == DriverState::Stopped
    }

    pub fn can_stop(&self) -> bool {
        self.is_running()
    }

    pub fn can_pause(&self) -> bool {
        self.is_running()
    }

    pub fn start(&mut self) -> bool {
        if !self.can_start() {
            debug!("start ignored in state {:?}", self.state);
            return false;
        }
        self.state = DriverState::Running;
        info!("simulation started at {} steps/s", self.speed);
        true
    }

    /// Halt the run without touching the lattice.
    pub fn stop(&mut self) -> bool {
        if !self.can_stop() {
            return false;
        }
        self.state = DriverState::Stopped;
        info!("simulation stopped after {} steps", self.steps);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            DriverState::Running => DriverState::Paused,
            DriverState::Paused => DriverState::Running,
            other => {
                debug!("pause ignored in state {:?}", other);
                return false;
            }
        };
        info!("simulation {}", if self.is_paused() { "paused" } else { "resumed" });
        true
    }

    /// Close every site and go back to `Stopped`.
    pub fn restart(&mut self) {
        self.lattice.reset();
        self.state = DriverState::Stopped;
        self.steps = 0;
        info!("simulation restarted on a {0}x{0} lattice", self.lattice.size());
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Steps per second, clamped to `MIN_SPEED..=MAX_SPEED`. Returns the speed applied.
    pub fn set_speed(&mut self, speed: u32) -> u32 {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        self.speed
    }

    /// Delay between two ticks at the current speed.
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.speed))
    }

    /// Open one closed site and fill from it if it touches the top row or a filled site.
    pub fn step(&mut self) -> StepOutcome {
        if self.state != DriverState::Running {
            return StepOutcome::Unchanged;
        }

        let Some((row, col)) = self.select_closed_site() else {
            self.state = DriverState::Exhausted;
            info!("no closed sites left after {} steps", self.steps);
            return StepOutcome::Exhausted;
        };

        self.lattice.open(row, col);
        self.steps += 1;

        if self.lattice.seeds_fill(row, col) {
            let report = self.lattice.propagate_fill(row, col);
            trace!("step {}: opened ({row}, {col}), filled {}", self.steps, report.filled);
        } else {
            trace!("step {}: opened ({row}, {col})", self.steps);
        }

        if self.lattice.percolates() {
            self.state = DriverState::Percolated;
            info!(
                "lattice percolates after {} steps ({:.1}% open)",
                self.steps,
                self.lattice.open_fraction() * 100.0
            );
            return StepOutcome::Percolated;
        }
        StepOutcome::Continue
    }

    /// Reject-and-resample, bounded; a row-major scan picks up whatever the draws missed.
    fn select_closed_site(&mut self) -> Option<(usize, usize)> {
        if self.lattice.closed_count() == 0 {
            return None;
        }
        let n = self.lattice.size();
        for _ in 0..MAX_REJECTIONS_PER_SITE * n * n {
            let (row, col) = self.source.draw(n);
            if self.lattice.site(row, col).is_some_and(|site| !site.open) {
                return Some((row, col));
            }
        }
        debug!("random draws kept hitting open sites, scanning instead");
        self.lattice.first_closed()
    }
}

impl Driver<RandomSites> {
    /// Driver backed by `StdRng`, seeded when `seed` is given.
    pub fn random(n: usize, seed: Option<u64>) -> Self {
        let source = match seed {
            Some(seed) => RandomSites::seeded(seed),
            None => RandomSites::from_entropy(),
        };
        Self::new(n, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedSites;

    fn scripted(n: usize, draws: &[(usize, usize)]) -> Driver<ScriptedSites> {
        Driver::new(n, ScriptedSites::new(draws.to_vec()))
    }

    #[test]
    fn starts_stopped() {
        let driver = Driver::random(5, Some(1));
        assert_eq!(driver.state(), DriverState::Stopped);
        assert_eq!(driver.speed(), DEFAULT_SPEED);
        assert!(driver.can_start());
        assert!(!driver.can_pause());
    }

    #[test]
    fn step_is_noop_unless_running() {
        let mut driver = scripted(3, &[(1, 1)]);
        assert_eq!(driver.step(), StepOutcome::Unchanged);
        driver.start();
        driver.toggle_pause();
        assert_eq!(driver.step(), StepOutcome::Unchanged);
        assert_eq!(driver.lattice().open_count(), 0);
        driver.toggle_pause();
        assert_eq!(driver.step(), StepOutcome::Continue);
        assert_eq!(driver.lattice().open_count(), 1);
    }

    #[test]
    fn pause_requires_a_run() {
        let mut driver = scripted(3, &[(0, 0)]);
        assert!(!driver.toggle_pause());
        assert_eq!(driver.state(), DriverState::Stopped);
    }

    #[test]
    fn stop_keeps_the_lattice() {
        let mut driver = scripted(3, &[(1, 1), (1, 2)]);
        driver.start();
        driver.step();
        assert!(driver.stop());
        assert_eq!(driver.state(), DriverState::Stopped);
        assert!(driver.lattice().is_open(1, 1));
        assert!(!driver.stop());
    }

    #[test]
    fn stop_from_paused() {
        let mut driver = scripted(3, &[(1, 1)]);
        driver.start();
        driver.toggle_pause();
        assert!(driver.stop());
        assert!(!driver.is_paused());
    }

    #[test]
    fn speed_is_clamped() {
        let mut driver = scripted(3, &[(0, 0)]);
        assert_eq!(driver.set_speed(0), MIN_SPEED);
        assert_eq!(driver.step_interval(), Duration::from_millis(1000));
        assert_eq!(driver.set_speed(500), MAX_SPEED);
        assert_eq!(driver.step_interval(), Duration::from_millis(10));
        assert_eq!(driver.set_speed(10), 10);
        assert_eq!(driver.step_interval(), Duration::from_millis(100));
    }

    #[test]
    fn open_sites_are_redrawn() {
        let mut driver = scripted(3, &[(1, 1), (1, 1), (9, 9), (2, 2)]);
        driver.start();
        driver.step();
        driver.step();
        assert!(driver.lattice().is_open(2, 2));
        assert_eq!(driver.source().drawn(), 4);
        assert_eq!(driver.steps(), 2);
    }

    #[test]
    fn scan_fallback_when_draws_never_hit() {
        // Every draw lands on (0, 0) once it is open.
        let mut driver = scripted(2, &[(0, 0)]);
        driver.start();
        driver.step();
        driver.step();
        assert!(driver.lattice().is_open(0, 1));
    }

    #[test]
    fn exhausted_when_nothing_left_to_open() {
        // Opened without any fill, so the lattice is saturated but does not percolate.
        let mut lattice = Lattice::new(2);
        for (r, c) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            lattice.open(r, c);
        }
        let mut driver = Driver::from_lattice(lattice, ScriptedSites::new(vec![(0, 0)]));
        driver.start();
        assert_eq!(driver.step(), StepOutcome::Exhausted);
        assert_eq!(driver.state(), DriverState::Exhausted);
        assert_eq!(driver.source().drawn(), 0);
        assert!(!driver.start());
        driver.restart();
        assert_eq!(driver.state(), DriverState::Stopped);
        assert_eq!(driver.lattice().open_count(), 0);
    }

    #[test]
    fn percolated_is_terminal_until_restart() {
        let mut driver = scripted(1, &[(0, 0)]);
        driver.start();
        driver.step();
        assert_eq!(driver.state(), DriverState::Percolated);
        assert!(driver.is_finished());
        assert!(!driver.start());
        assert!(!driver.toggle_pause());
        assert!(!driver.stop());
        assert_eq!(driver.step(), StepOutcome::Unchanged);
        driver.restart();
        assert!(driver.start());
        assert_eq!(driver.steps(), 0);
    }
}
