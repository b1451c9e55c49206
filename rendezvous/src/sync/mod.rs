//! Synchronization primitives

use thiserror::Error;

pub(crate) mod event;
pub(crate) mod monitor;
pub mod oneshot;
pub(crate) mod wait_group;

pub use event::Event;
pub use monitor::{Monitor, Notify};
pub use wait_group::{WaitGroup, Worker};

/// Another thread panicked while holding the lock inside a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("synchronization state poisoned by a panicked thread")]
pub struct Poisoned;
