use std::time::Duration;

use log::trace;

use crate::sync::monitor::{Monitor, Notify};
use crate::sync::Poisoned;

/// A one-time rendezvous flag.
///
/// One side performs its work and calls [`set`](Event::set); the other blocks
/// in [`wait`](Event::wait) until the flag has been observed true under the
/// internal lock. The flag is level-triggered: once set it stays set, so a
/// waiter that arrives after the signal returns immediately instead of
/// missing the wakeup.
#[derive(Clone)]
pub struct Event {
    flag: Monitor<bool>,
}

impl Event {
    pub fn new() -> Self {
        Self {
            flag: Monitor::new(false),
        }
    }

    /// Set the flag and wake every waiter. Idempotent.
    pub fn set(&self) -> Result<(), Poisoned> {
        trace!("event: set");
        self.flag.modify_and_notify(|done| *done = true, Notify::All)
    }

    pub fn is_set(&self) -> Result<bool, Poisoned> {
        self.flag.with(|done| *done)
    }

    /// Block until the flag is set.
    pub fn wait(&self) -> Result<(), Poisoned> {
        self.flag.wait_until(|done| *done)
    }

    /// Block until the flag is set or `timeout` elapses. Returns `Ok(true)`
    /// if the flag was observed set, `Ok(false)` on timeout.
    pub fn wait_timeout(&self, timeout: Duration) -> Result<bool, Poisoned> {
        self.flag.wait_until_timeout(|done| *done, timeout)
    }
}
