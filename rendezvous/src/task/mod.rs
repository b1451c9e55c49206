//! Thread management module

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use log::debug;
use thiserror::Error;

/// The OS refused to create the backing thread. Fatal for callers that need
/// the peer to exist for the rendezvous to ever complete.
#[derive(Debug, Error)]
#[error("failed to spawn thread: {0}")]
pub struct SpawnError(#[from] io::Error);

/// The spawned thread panicked before producing its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("spawned thread panicked")]
pub struct JoinError;

pub struct JoinHandle<R> {
    inner: thread::JoinHandle<R>,
}

impl<R> JoinHandle<R> {
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    pub fn join(self) -> Result<R, JoinError> {
        self.inner.join().map_err(|_| JoinError)
    }
}

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Spawn a named worker thread.
pub fn spawn<F, R>(f: F) -> Result<JoinHandle<R>, SpawnError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let name = format!("rendezvous-worker-{id}");
    debug!("spawning {name}");
    let inner = thread::Builder::new().name(name).spawn(f)?;
    Ok(JoinHandle { inner })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_returns_the_thread_result() {
        let handle = spawn(|| 2 + 2).unwrap();
        assert_eq!(handle.join().unwrap(), 4);
    }

    #[test]
    fn join_reports_a_panicked_thread() {
        let handle = spawn(|| panic!("boom")).unwrap();
        assert_eq!(handle.join().unwrap_err(), JoinError);
    }

    #[test]
    fn is_finished_becomes_true_after_completion() {
        let handle = spawn(|| ()).unwrap();
        while !handle.is_finished() {
            std::thread::yield_now();
        }
        handle.join().unwrap();
    }
}
