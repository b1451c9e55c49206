//! Rendezvous is a small library of thread synchronization primitives.
//! Each primitive hides its mutex/condvar pair behind the API, so the guarded
//! state can never be read or written without holding the associated lock.

pub mod sync;
pub mod task;

pub use rendezvous_macros::main;
