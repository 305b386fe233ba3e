//! Live idle ticks and autosave.
//!
//! [`GameLoop`] is the schedule: it only decides what is due at a given
//! instant. [`Ticker`] drives it on a background thread against a
//! [`SharedStore`], one locked step at a time so ticks never overlap.

use super::constants::{AUTOSAVE_INTERVAL_MS, TICK_INTERVAL_MS};
use super::idle::IdleGains;
use super::store::SharedStore;
use crate::save_manager::SaveManager;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    pub tick_interval: Duration,
    pub autosave_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            autosave_interval: Duration::from_millis(AUTOSAVE_INTERVAL_MS),
        }
    }
}

/// Work found due by [`GameLoop::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopDue {
    /// Real time since the previous tick, when a tick is due.
    pub tick: Option<Duration>,
    pub autosave: bool,
}

impl LoopDue {
    pub fn is_idle(&self) -> bool {
        self.tick.is_none() && !self.autosave
    }
}

#[derive(Debug, Clone, Copy)]
struct Running {
    last_tick: Instant,
    last_autosave: Instant,
}

/// Start/stop schedule for the tick and autosave tasks.
#[derive(Debug, Clone)]
pub struct GameLoop {
    config: LoopConfig,
    running: Option<Running>,
}

impl GameLoop {
    pub fn new(config: LoopConfig) -> Self {
        Self {
            config,
            running: None,
        }
    }

    pub fn config(&self) -> LoopConfig {
        self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Starts both tasks from `now`. Restarting resets their timers.
    pub fn start(&mut self, now: Instant) {
        self.running = Some(Running {
            last_tick: now,
            last_autosave: now,
        });
    }

    /// Stops both tasks. Safe to call when already stopped.
    pub fn stop(&mut self) {
        self.running = None;
    }

    /// Reports what is due at `now` and marks it done. Nothing is ever due
    /// while stopped.
    pub fn poll(&mut self, now: Instant) -> LoopDue {
        let Some(running) = self.running.as_mut() else {
            return LoopDue::default();
        };

        let mut due = LoopDue::default();
        let since_tick = now.saturating_duration_since(running.last_tick);
        if since_tick >= self.config.tick_interval {
            due.tick = Some(since_tick);
            running.last_tick = now;
        }
        if now.saturating_duration_since(running.last_autosave) >= self.config.autosave_interval {
            due.autosave = true;
            running.last_autosave = now;
        }
        due
    }

    /// How long until the next task is due. A full tick interval while stopped.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        match &self.running {
            None => self.config.tick_interval,
            Some(running) => {
                let next_tick = running.last_tick + self.config.tick_interval;
                let next_save = running.last_autosave + self.config.autosave_interval;
                next_tick.min(next_save).saturating_duration_since(now)
            }
        }
    }
}

/// What one [`run_due`] step changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    pub gains: IdleGains,
    pub saved: bool,
}

/// Applies due work to the store: the idle tick under the lock, then the
/// autosave (when enabled in settings) with the lock released.
pub fn run_due(
    store: &SharedStore,
    saver: Option<&SaveManager>,
    due: LoopDue,
    now_ms: i64,
) -> StepReport {
    let mut report = StepReport::default();
    let snapshot = {
        let mut guard = store.lock();
        if let Some(elapsed) = due.tick {
            report.gains = guard.apply_idle_tick(elapsed.as_millis() as i64);
            tracing::debug!(coins = report.gains.coins, gems = report.gains.gems, "tick");
        }
        match saver {
            Some(_) if due.autosave && guard.state().settings.auto_save => {
                Some(guard.snapshot_for_save(now_ms))
            }
            _ => None,
        }
    };

    if let (Some(state), Some(saver)) = (snapshot, saver) {
        match saver.save(&state) {
            Ok(()) => report.saved = true,
            Err(e) => tracing::warn!(error = %e, "autosave failed"),
        }
    }
    report
}

/// Background thread running a [`GameLoop`] until stopped or dropped.
pub struct Ticker {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(store: SharedStore, saver: Option<SaveManager>, config: LoopConfig) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            let mut schedule = GameLoop::new(config);
            schedule.start(Instant::now());
            loop {
                match stop_rx.recv_timeout(schedule.time_until_next(Instant::now())) {
                    Err(RecvTimeoutError::Timeout) => {}
                    // Stop signal, or the Ticker is gone.
                    _ => break,
                }
                let due = schedule.poll(Instant::now());
                if !due.is_idle() {
                    run_due(&store, saver.as_ref(), due, chrono::Utc::now().timestamp_millis());
                }
            }
            tracing::debug!("ticker stopped");
        });

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stops the thread and waits for it. No step runs after this returns.
    /// Idempotent.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("ticker thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game_state::SettingsUpdate;
    use crate::core::store::GameStore;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_stopped_loop_is_never_due() {
        let mut schedule = GameLoop::new(LoopConfig::default());
        let t0 = Instant::now();
        assert!(schedule.poll(t0 + ms(60_000)).is_idle());
        schedule.stop();
        schedule.stop();
        assert!(!schedule.is_running());
    }

    #[test]
    fn test_tick_and_autosave_cadence() {
        let mut schedule = GameLoop::new(LoopConfig::default());
        let t0 = Instant::now();
        schedule.start(t0);

        assert!(schedule.poll(t0 + ms(999)).is_idle());

        let due = schedule.poll(t0 + ms(1000));
        assert_eq!(due.tick, Some(ms(1000)));
        assert!(!due.autosave);

        // Elapsed is measured from the last tick, not the ideal cadence.
        let due = schedule.poll(t0 + ms(2300));
        assert_eq!(due.tick, Some(ms(1300)));

        let due = schedule.poll(t0 + ms(5000));
        assert!(due.autosave);
        assert_eq!(due.tick, Some(ms(2700)));

        assert!(schedule.poll(t0 + ms(5000)).is_idle(), "same instant is not due twice");
    }

    #[test]
    fn test_stop_then_restart() {
        let mut schedule = GameLoop::new(LoopConfig::default());
        let t0 = Instant::now();
        schedule.start(t0);
        schedule.stop();
        assert!(schedule.poll(t0 + ms(10_000)).is_idle());

        schedule.start(t0 + ms(10_000));
        assert!(schedule.poll(t0 + ms(10_500)).is_idle());
        assert_eq!(schedule.poll(t0 + ms(11_000)).tick, Some(ms(1000)));
    }

    #[test]
    fn test_time_until_next() {
        let mut schedule = GameLoop::new(LoopConfig::default());
        let t0 = Instant::now();
        assert_eq!(schedule.time_until_next(t0), ms(1000));
        schedule.start(t0);
        assert_eq!(schedule.time_until_next(t0 + ms(400)), ms(600));
        assert_eq!(schedule.time_until_next(t0 + ms(1500)), Duration::ZERO);
    }

    #[test]
    fn test_run_due_applies_tick() {
        let store = GameStore::new(0).into_shared();
        let due = LoopDue {
            tick: Some(ms(2000)),
            autosave: false,
        };
        let report = run_due(&store, None, due, 0);
        assert_eq!(report.gains.coins, 2);
        assert!(!report.saved);
        assert_eq!(store.lock().state().resources.coins, 1002);
        assert_eq!(store.lock().state().last_save, 2000);
    }

    #[test]
    fn test_run_due_respects_auto_save_setting() {
        let path = std::env::temp_dir().join(format!(
            "idlegacha_loop_autosave_{}.json",
            std::process::id()
        ));
        let saver = SaveManager::with_path(&path);
        saver.delete().unwrap();

        let store = GameStore::new(0).into_shared();
        store.lock().update_settings(&SettingsUpdate {
            auto_save: Some(false),
            ..SettingsUpdate::default()
        });
        let due = LoopDue {
            tick: None,
            autosave: true,
        };
        assert!(!run_due(&store, Some(&saver), due, 99).saved);
        assert!(!saver.save_exists());

        store.lock().update_settings(&SettingsUpdate {
            auto_save: Some(true),
            ..SettingsUpdate::default()
        });
        assert!(run_due(&store, Some(&saver), due, 99).saved);
        let loaded = saver.load().unwrap().unwrap();
        assert_eq!(loaded.last_save, 99);
        assert_eq!(store.lock().state().last_save, 99);
        saver.delete().unwrap();
    }

    #[test]
    fn test_ticker_stop_is_idempotent() {
        let store = GameStore::new(0).into_shared();
        let mut ticker = Ticker::spawn(store, None, LoopConfig::default());
        assert!(ticker.is_running());
        ticker.stop();
        assert!(!ticker.is_running());
        ticker.stop();
    }
}
