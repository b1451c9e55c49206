//! A rendezvous that carries a value: the producer hands the consumer one
//! item, exactly once.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use thiserror::Error;

pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    let channel = Arc::new(Channel {
        slot: Mutex::new(Slot {
            item: None,
            closed: false,
        }),
        cond: Condvar::new(),
    });
    (
        Sender {
            channel: channel.clone(),
        },
        Receiver { channel },
    )
}

struct Slot<T> {
    item: Option<T>,
    closed: bool,
}

struct Channel<T> {
    slot: Mutex<Slot<T>>,
    cond: Condvar,
}

pub struct Sender<T> {
    channel: Arc<Channel<T>>,
}

pub struct Receiver<T> {
    channel: Arc<Channel<T>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecvError {
    #[error("channel closed before a value was sent")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TryRecvError {
    #[error("no value has been sent yet")]
    Empty,
    #[error("channel closed before a value was sent")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecvTimeoutError {
    #[error("timed out waiting for a value")]
    Timeout,
    #[error("channel closed before a value was sent")]
    Closed,
}

impl<T> Sender<T> {
    /// Hand the value to the receiver, waking it if it is blocked in `recv`.
    /// Returns the value back if the receiver is already gone.
    pub fn send(self, item: T) -> Result<(), T> {
        // A receiver that panicked while holding the lock counts as gone.
        let Ok(mut slot) = self.channel.slot.lock() else {
            return Err(item);
        };
        if slot.closed {
            return Err(item);
        }
        slot.item = Some(item);
        self.channel.cond.notify_one();
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.channel
            .slot
            .lock()
            .map(|slot| slot.closed)
            .unwrap_or(true)
    }
}

impl<T> Drop for Sender<T> {
    fn drop(&mut self) {
        let mut slot = self
            .channel
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        slot.closed = true;
        self.channel.cond.notify_one();
    }
}

impl<T> Receiver<T> {
    pub fn is_empty(&self) -> bool {
        self.channel
            .slot
            .lock()
            .map(|slot| slot.item.is_none())
            .unwrap_or(true)
    }

    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        let Ok(mut slot) = self.channel.slot.lock() else {
            return Err(TryRecvError::Closed);
        };
        match slot.item.take() {
            Some(item) => Ok(item),
            None if slot.closed => Err(TryRecvError::Closed),
            None => Err(TryRecvError::Empty),
        }
    }

    /// Block until the value arrives or the sender goes away.
    pub fn recv(self) -> Result<T, RecvError> {
        let Ok(mut slot) = self.channel.slot.lock() else {
            return Err(RecvError::Closed);
        };
        loop {
            if let Some(item) = slot.item.take() {
                return Ok(item);
            }
            if slot.closed {
                return Err(RecvError::Closed);
            }
            slot = match self.channel.cond.wait(slot) {
                Ok(guard) => guard,
                Err(_) => return Err(RecvError::Closed),
            };
        }
    }

    /// Like [`recv`](Receiver::recv), but gives up once `timeout` has
    /// elapsed.
    pub fn recv_timeout(self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        let deadline = Instant::now() + timeout;
        let Ok(mut slot) = self.channel.slot.lock() else {
            return Err(RecvTimeoutError::Closed);
        };
        loop {
            if let Some(item) = slot.item.take() {
                return Ok(item);
            }
            if slot.closed {
                return Err(RecvTimeoutError::Closed);
            }
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return Err(RecvTimeoutError::Timeout);
            };
            slot = match self.channel.cond.wait_timeout(slot, remaining) {
                Ok((guard, _)) => guard,
                Err(_) => return Err(RecvTimeoutError::Closed),
            };
        }
    }
}

impl<T> Drop for Receiver<T> {
    fn drop(&mut self) {
        let mut slot = self
            .channel
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        slot.closed = true;
    }
}
