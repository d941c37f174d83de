// ticker.rs - Cancellable periodic tick source driving engine steps
//
// The engines never schedule themselves: a driver starts a `Clock` when an
// engine enters Running, calls `step()` once per tick, and stops the clock on
// pause or game over.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub epoch: u64,                                   // Which start() produced it
    pub seq: u64,                                     // 0 for the immediate tick
}

/// Owned handle to a task that sends a tick at once, then one per interval.
pub struct Ticker {
    interval: watch::Sender<Duration>,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        let (interval, _) = watch::channel(interval);
        Self { interval, task: None }
    }

    /// Spawns the tick task on `runtime`, cancelling any previous one.
    pub fn start(&mut self, runtime: &Handle, epoch: u64, ticks: mpsc::UnboundedSender<Tick>) {
        self.stop();
        let mut interval = self.interval.subscribe();
        self.task = Some(runtime.spawn(async move {
            let mut seq = 0;
            loop {
                if ticks.send(Tick { epoch, seq }).is_err() {
                    break;
                }
                seq += 1;
                let period = *interval.borrow_and_update();
                tokio::time::sleep(period).await;
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Applies from the next wait; a wait already in progress keeps its length.
    pub fn set_interval(&self, interval: Duration) {
        self.interval.send_replace(interval);
    }

    pub fn interval(&self) -> Duration {
        *self.interval.borrow()
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A `Ticker` together with its receiving end. Ticks from an earlier
/// start/stop cycle are discarded, so nothing stale fires after `stop`.
pub struct Clock {
    ticker: Ticker,
    runtime: Handle,
    sender: mpsc::UnboundedSender<Tick>,
    receiver: mpsc::UnboundedReceiver<Tick>,
    epoch: u64,
}

impl Clock {
    pub fn new(runtime: Handle, interval: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            ticker: Ticker::new(interval),
            runtime,
            sender,
            receiver,
            epoch: 0,
        }
    }

    pub fn start(&mut self) {
        self.epoch += 1;
        self.drain();
        self.ticker.start(&self.runtime, self.epoch, self.sender.clone());
        log::debug!("Clock started (epoch {}, every {:?})", self.epoch, self.ticker.interval());
    }

    pub fn stop(&mut self) {
        self.epoch += 1;
        self.ticker.stop();
        self.drain();
        log::debug!("Clock stopped");
    }

    /// Starts or stops to match the engine's running state.
    pub fn follow(&mut self, running: bool) {
        match (running, self.is_running()) {
            (true, false) => self.start(),
            (false, true) => self.stop(),
            _ => {}
        }
    }

    pub fn set_interval(&self, interval: Duration) {
        self.ticker.set_interval(interval);
    }

    pub fn interval(&self) -> Duration {
        self.ticker.interval()
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_active()
    }

    /// Non-blocking: the number of current ticks received since the last poll.
    pub fn poll(&mut self) -> usize {
        let mut due = 0;
        while let Ok(tick) = self.receiver.try_recv() {
            if tick.epoch == self.epoch {
                due += 1;
            }
        }
        due
    }

    /// Waits for the next current tick. Pending forever while stopped.
    pub async fn next_tick(&mut self) -> Option<Tick> {
        loop {
            let tick = self.receiver.recv().await?;
            if tick.epoch == self.epoch {
                return Some(tick);
            }
        }
    }

    fn drain(&mut self) {
        while self.receiver.try_recv().is_ok() {}
    }
}
