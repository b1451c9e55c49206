//! A monitor: arbitrary state guarded by a hidden mutex/condvar pair.

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use log::trace;

use crate::sync::Poisoned;

/// How many waiters a state change should wake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notify {
    One,
    All,
}

struct MonitorCore<T> {
    state: Mutex<T>,
    cond: Condvar,
}

/// Shared state that can only be touched while its lock is held.
///
/// Handles are cheap to clone and all alias the same state. Mutations go
/// through [`modify_and_notify`](Monitor::modify_and_notify); blocked readers
/// go through [`wait_until`](Monitor::wait_until), which re-checks its
/// predicate on every wakeup, so spurious wakeups and notifications that do
/// not satisfy the predicate never release a waiter.
pub struct Monitor<T> {
    core: Arc<MonitorCore<T>>,
}

impl<T> Clone for Monitor<T> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<T> Monitor<T> {
    pub fn new(initial: T) -> Self {
        Self {
            core: Arc::new(MonitorCore {
                state: Mutex::new(initial),
                cond: Condvar::new(),
            }),
        }
    }

    /// Run `f` on the guarded state without waking anyone.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, Poisoned> {
        let state = self.core.state.lock().map_err(|_| Poisoned)?;
        Ok(f(&state))
    }

    /// Mutate the guarded state, then wake waiters.
    ///
    /// The notification happens while the lock is still held, so a waiter can
    /// never observe the notification before the mutation.
    pub fn modify_and_notify<R>(
        &self,
        f: impl FnOnce(&mut T) -> R,
        notify: Notify,
    ) -> Result<R, Poisoned> {
        let mut state = self.core.state.lock().map_err(|_| Poisoned)?;
        let result = f(&mut state);
        match notify {
            Notify::One => self.core.cond.notify_one(),
            Notify::All => self.core.cond.notify_all(),
        }
        Ok(result)
    }

    /// Block until `pred` holds for the guarded state.
    ///
    /// Returns with the predicate observed true under the lock.
    pub fn wait_until(&self, mut pred: impl FnMut(&T) -> bool) -> Result<(), Poisoned> {
        let mut state = self.core.state.lock().map_err(|_| Poisoned)?;
        while !pred(&state) {
            trace!("monitor: predicate false, waiting");
            state = self.core.cond.wait(state).map_err(|_| Poisoned)?;
        }
        Ok(())
    }

    /// Like [`wait_until`](Monitor::wait_until), but gives up once `timeout`
    /// has elapsed. Returns `Ok(true)` if the predicate was observed true,
    /// `Ok(false)` on timeout.
    pub fn wait_until_timeout(
        &self,
        mut pred: impl FnMut(&T) -> bool,
        timeout: Duration,
    ) -> Result<bool, Poisoned> {
        let deadline = Instant::now() + timeout;
        let mut state = self.core.state.lock().map_err(|_| Poisoned)?;
        while !pred(&state) {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return Ok(false);
            };
            trace!("monitor: predicate false, waiting up to {remaining:?}");
            let (guard, result) = self
                .core
                .cond
                .wait_timeout(state, remaining)
                .map_err(|_| Poisoned)?;
            state = guard;
            // The deadline and a notification can race; the predicate decides.
            if result.timed_out() && !pred(&state) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
