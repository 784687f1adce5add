// clock.rs - Periodic tick source driving the simulation
// A tokio task sends one Tick per interval; the consumer steps the driver per tick.

use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// One "step now" message, stamped with the registration that sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub epoch: u64,
}

pub struct Clock {
    runtime: Runtime,
    sender: UnboundedSender<Tick>,
    task: Option<JoinHandle<()>>,
    epoch: u64,
}

impl Clock {
    pub fn new() -> Result<(Self, UnboundedReceiver<Tick>)> {
        let runtime = Runtime::new().context("failed to start the clock runtime")?;
        let (sender, receiver) = mpsc::unbounded_channel();
        let clock = Self {
            runtime,
            sender,
            task: None,
            epoch: 0,
        };
        Ok((clock, receiver))
    }

    /// Replace any running registration with one ticking every `interval`.
    /// `wake` runs after each tick is sent, e.g. to request a repaint.
    pub fn schedule<F>(&mut self, interval: Duration, wake: F)
    where
        F: Fn() + Send + 'static,
    {
        self.cancel();
        let epoch = self.epoch;
        let sender = self.sender.clone();
        debug!("clock registered every {:?} (epoch {epoch})", interval);

        self.task = Some(self.runtime.spawn(async move {
            let mut ticks = time::interval_at(time::Instant::now() + interval, interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if sender.send(Tick { epoch }).is_err() {
                    break;
                }
                wake();
            }
        }));
    }

    /// Stop ticking. Ticks already queued become stale immediately.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("clock cancelled (epoch {})", self.epoch);
        }
        self.epoch += 1;
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    /// Whether `tick` came from the live registration.
    pub fn is_current(&self, tick: Tick) -> bool {
        self.is_active() && tick.epoch == self.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn ticks_carry_the_live_epoch() {
        let (mut clock, mut ticks) = Clock::new().unwrap();
        clock.schedule(Duration::from_millis(2), || {});
        let tick = ticks.blocking_recv().unwrap();
        assert!(clock.is_active());
        assert!(clock.is_current(tick));
    }

    #[test]
    fn cancel_makes_queued_ticks_stale() {
        let (mut clock, mut ticks) = Clock::new().unwrap();
        clock.schedule(Duration::from_millis(1), || {});
        let tick = ticks.blocking_recv().unwrap();

        clock.cancel();
        assert!(!clock.is_active());
        assert!(!clock.is_current(tick));

        std::thread::sleep(Duration::from_millis(20));
        while let Ok(late) = ticks.try_recv() {
            assert!(!clock.is_current(late));
        }
    }

    #[test]
    fn rescheduling_replaces_the_old_registration() {
        let (mut clock, mut ticks) = Clock::new().unwrap();
        clock.schedule(Duration::from_millis(1), || {});
        let old = ticks.blocking_recv().unwrap();

        clock.schedule(Duration::from_millis(1), || {});
        assert!(!clock.is_current(old));

        let fresh = std::iter::from_fn(|| ticks.blocking_recv())
            .find(|tick| clock.is_current(*tick));
        assert!(fresh.is_some());
    }

    #[test]
    fn wake_runs_after_each_tick() {
        let (mut clock, mut ticks) = Clock::new().unwrap();
        let woken = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&woken);
        clock.schedule(Duration::from_millis(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        ticks.blocking_recv().unwrap();
        ticks.blocking_recv().unwrap();
        assert!(woken.load(Ordering::SeqCst) >= 1);
    }
}
