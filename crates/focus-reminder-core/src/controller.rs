//! Async front end for [`DayLifecycle`].
//!
//! `FocusController` shares the lifecycle between the caller and a background
//! tick task. The tick task wakes once per second while the timer counts and
//! parks on a `watch` channel while it is paused, so a resume starts a fresh
//! one-second period. Every event is sent while the lifecycle lock is held,
//! which keeps the event stream in state order.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::Result;
use crate::events::Event;
use crate::session::{DayLifecycle, DayOutcome, DaySnapshot, GoalOutcome};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

struct TickDriver {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct FocusController {
    day: Arc<Mutex<DayLifecycle>>,
    events: mpsc::UnboundedSender<Event>,
    paused: watch::Sender<bool>,
    driver: Option<TickDriver>,
}

impl FocusController {
    /// Wrap a lifecycle. Events arrive on the returned receiver.
    pub fn new(day: DayLifecycle) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (events, rx) = mpsc::unbounded_channel();
        let (paused, _) = watch::channel(false);
        let controller = Self {
            day: Arc::new(Mutex::new(day)),
            events,
            paused,
            driver: None,
        };
        (controller, rx)
    }

    pub async fn snapshot(&self) -> DaySnapshot {
        self.day.lock().await.snapshot()
    }

    pub async fn start_day(&self, intention: &str, goals: &[String], pomodoro_minutes: i64) -> Result<()> {
        let mut day = self.day.lock().await;
        let result = day.start_day(intention, goals, pomodoro_minutes);
        self.forward(&mut day);
        result
    }

    /// Start counting and spawn the tick task. No-op if already running.
    pub async fn start(&mut self) -> bool {
        let mut day = self.day.lock().await;
        let started = day.start();
        if started {
            self.paused.send_replace(false);
            if let Some(old) = self.driver.take() {
                old.cancel.cancel();
            }
            self.driver = Some(self.spawn_driver());
        }
        self.forward(&mut day);
        started
    }

    pub async fn pause(&self, reason: Option<&str>) -> bool {
        let mut day = self.day.lock().await;
        let paused = day.pause(reason);
        if paused {
            self.paused.send_replace(true);
        }
        self.forward(&mut day);
        paused
    }

    pub async fn resume(&self) -> bool {
        let mut day = self.day.lock().await;
        let resumed = day.resume();
        if resumed {
            self.paused.send_replace(false);
        }
        self.forward(&mut day);
        resumed
    }

    pub async fn complete_goal(&self, goal: &str, remarks: Option<&str>) -> Result<GoalOutcome> {
        let mut day = self.day.lock().await;
        let outcome = day.complete_goal(goal, remarks);
        self.forward(&mut day);
        outcome
    }

    pub async fn add_goal(&self, goal: &str) -> Result<String> {
        let mut day = self.day.lock().await;
        let added = day.add_goal(goal);
        self.forward(&mut day);
        added
    }

    /// Close the day. On success the tick task is stopped before returning
    /// and no further `Tick` is sent.
    pub async fn finish_day(&mut self, rating: u8, comments: &str, restart: bool) -> Result<DayOutcome> {
        let (driver, outcome) = {
            let mut day = self.day.lock().await;
            let outcome = day.finish_day(rating, comments, restart);
            self.forward(&mut day);
            let outcome = outcome?;
            // Cancel under the lock: the tick task re-checks it after locking.
            let driver = self.driver.take();
            if let Some(driver) = &driver {
                driver.cancel.cancel();
            }
            (driver, outcome)
        };
        if let Some(driver) = driver {
            join(driver).await;
        }
        Ok(outcome)
    }

    /// Stop the tick task without touching day state.
    pub async fn shutdown(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.cancel.cancel();
            join(driver).await;
        }
    }

    fn forward(&self, day: &mut DayLifecycle) {
        for event in day.drain_events() {
            if self.events.send(event).is_err() {
                debug!("event receiver dropped");
                break;
            }
        }
    }

    fn spawn_driver(&self) -> TickDriver {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(tick_loop(
            self.day.clone(),
            self.events.clone(),
            self.paused.subscribe(),
            cancel.clone(),
        ));
        TickDriver { cancel, handle }
    }
}

impl Drop for FocusController {
    fn drop(&mut self) {
        if let Some(driver) = &self.driver {
            driver.cancel.cancel();
        }
    }
}

async fn join(driver: TickDriver) {
    if let Err(e) = driver.handle.await {
        warn!("tick task failed to join: {e}");
    }
}

async fn tick_loop(
    day: Arc<Mutex<DayLifecycle>>,
    events: mpsc::UnboundedSender<Event>,
    mut paused: watch::Receiver<bool>,
    cancel: CancellationToken,
) {
    let mut ticker = time::interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        if *paused.borrow_and_update() {
            tokio::select! {
                _ = cancel.cancelled() => break,
                changed = paused.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
            ticker.reset();
            continue;
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = paused.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
            _ = ticker.tick() => {}
        }

        let mut guard = day.lock().await;
        if cancel.is_cancelled() {
            break;
        }
        guard.tick();
        for event in guard.drain_events() {
            if events.send(event).is_err() {
                debug!("event receiver dropped, stopping tick task");
                return;
            }
        }
    }
    debug!("tick task stopped");
}
