//! A rendezvous with many producers: the waiter blocks until every
//! registered worker has arrived.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use log::trace;

use crate::sync::Poisoned;

struct WaitGroupCore {
    active: Mutex<usize>,
    cond: Condvar,
}

/// Tracks a set of workers and lets any number of waiters block until all of
/// them have finished.
///
/// Each call to [`worker`](WaitGroup::worker) registers one worker; dropping
/// the returned [`Worker`] records its arrival. [`wait`](WaitGroup::wait)
/// returns once the active count has been observed at zero under the lock.
#[derive(Clone)]
pub struct WaitGroup {
    core: Arc<WaitGroupCore>,
}

/// Registration token for one worker. Cloning registers another worker;
/// dropping records the arrival.
pub struct Worker {
    core: Arc<WaitGroupCore>,
}

impl WaitGroup {
    pub fn new() -> Self {
        Self {
            core: Arc::new(WaitGroupCore {
                active: Mutex::new(0),
                cond: Condvar::new(),
            }),
        }
    }

    pub fn worker(&self) -> Worker {
        let mut active = self
            .core
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *active += 1;
        trace!("wait group: registered worker, {} active", *active);
        Worker {
            core: Arc::clone(&self.core),
        }
    }

    pub fn active(&self) -> Result<usize, Poisoned> {
        let active = self.core.active.lock().map_err(|_| Poisoned)?;
        Ok(*active)
    }

    /// Block until every registered worker has arrived. Returns immediately
    /// if none are active.
    pub fn wait(&self) -> Result<(), Poisoned> {
        let mut active = self.core.active.lock().map_err(|_| Poisoned)?;
        while *active > 0 {
            active = self.core.cond.wait(active).map_err(|_| Poisoned)?;
        }
        Ok(())
    }

    /// Like [`wait`](WaitGroup::wait), but gives up once `timeout` has
    /// elapsed. Returns `Ok(true)` if all workers arrived, `Ok(false)` on
    /// timeout.
    pub fn wait_timeout(&self, timeout: Duration) -> Result<bool, Poisoned> {
        let deadline = Instant::now() + timeout;
        let mut active = self.core.active.lock().map_err(|_| Poisoned)?;
        while *active > 0 {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return Ok(false);
            };
            let (guard, result) = self
                .core
                .cond
                .wait_timeout(active, remaining)
                .map_err(|_| Poisoned)?;
            active = guard;
            if result.timed_out() && *active > 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Clone for Worker {
    fn clone(&self) -> Self {
        let mut active = self.core.active.lock().unwrap_or_else(PoisonError::into_inner);
        *active += 1;
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        let mut active = self.core.active.lock().unwrap_or_else(PoisonError::into_inner);
        *active -= 1;
        trace!("wait group: worker arrived, {} still active", *active);
        if *active == 0 {
            self.core.cond.notify_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn wait_returns_immediately_with_no_workers() {
        let wg = WaitGroup::new();
        wg.wait().unwrap();
    }

    #[test]
    fn wait_blocks_until_all_workers_arrive() {
        let wg = WaitGroup::new();
        let mut handles = vec![];
        for i in 0..8u64 {
            let worker = wg.worker();
            handles.push(thread::spawn(move || {
                thread::sleep(Duration::from_millis(5 * i));
                drop(worker);
            }));
        }
        wg.wait().unwrap();
        assert_eq!(wg.active().unwrap(), 0);
        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn wait_timeout_expires_while_a_worker_is_active() {
        let wg = WaitGroup::new();
        let worker = wg.worker();
        assert!(!wg.wait_timeout(Duration::from_millis(50)).unwrap());
        drop(worker);
        assert!(wg.wait_timeout(Duration::from_secs(1)).unwrap());
    }

    #[test]
    fn cloned_worker_counts_as_another_arrival() {
        let wg = WaitGroup::new();
        let first = wg.worker();
        let second = first.clone();
        assert_eq!(wg.active().unwrap(), 2);
        drop(first);
        assert!(!wg.wait_timeout(Duration::from_millis(20)).unwrap());
        drop(second);
        wg.wait().unwrap();
    }
}
