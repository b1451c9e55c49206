//! End-to-end tests for the producer/waiter rendezvous.
//!
//! Blocking assertions use generous timed waits so a lost-wakeup bug fails
//! the suite quickly instead of hanging it.

use std::thread;
use std::time::Duration;

use rand::Rng;
use rendezvous::sync::{Event, Monitor, Notify};
use rendezvous::task;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// The scenario from which this crate grew: the producer performs one time
// unit of work, sets the flag under the lock, and signals; the waiter blocks
// immediately and must exit its loop after the signal, with no deadlock.
#[test]
fn producer_delays_then_signals_waiter() {
    init_logging();
    let done = Event::new();

    let producer = task::spawn({
        let done = done.clone();
        move || {
            thread::sleep(Duration::from_millis(100));
            done.set()
        }
    })
    .unwrap();

    assert!(done.wait_timeout(Duration::from_secs(10)).unwrap());
    // Safety: the wait loop only exits after observing the flag set.
    assert!(done.is_set().unwrap());
    producer.join().unwrap().unwrap();
}

// Adversarial interleaving: whichever side gets scheduled first, the waiter
// must terminate. A signal before the wait begins is preserved by the
// level-triggered flag; a signal after it begins wakes the waiter.
#[test]
fn signal_is_never_missed_under_jittered_scheduling() {
    init_logging();
    let mut rng = rand::rng();

    for _ in 0..50 {
        let done = Event::new();
        let producer_delay = Duration::from_micros(rng.random_range(0..500));
        let waiter_delay = Duration::from_micros(rng.random_range(0..500));

        let producer = task::spawn({
            let done = done.clone();
            move || {
                thread::sleep(producer_delay);
                done.set()
            }
        })
        .unwrap();

        thread::sleep(waiter_delay);
        assert!(done.wait_timeout(Duration::from_secs(10)).unwrap());
        producer.join().unwrap().unwrap();
    }
}

#[test]
fn every_waiter_wakes_on_one_signal() {
    init_logging();
    let done = Event::new();

    let mut waiters = vec![];
    for _ in 0..4 {
        waiters.push(
            task::spawn({
                let done = done.clone();
                move || done.wait_timeout(Duration::from_secs(10))
            })
            .unwrap(),
        );
    }

    thread::sleep(Duration::from_millis(20));
    done.set().unwrap();
    for waiter in waiters {
        assert!(waiter.join().unwrap().unwrap());
    }
}

// Notifications that leave the predicate false must never release the waiter:
// the predicate is re-checked on every wakeup, so neither spurious wakeups
// nor unrelated state changes can cause early termination.
#[test]
fn waiter_ignores_notifications_that_do_not_satisfy_the_predicate() {
    init_logging();
    let progress = Monitor::new(0usize);

    let noisy = task::spawn({
        let progress = progress.clone();
        move || {
            for _ in 0..10 {
                progress.modify_and_notify(|n| *n += 1, Notify::All).unwrap();
                thread::sleep(Duration::from_millis(2));
            }
        }
    })
    .unwrap();

    let satisfied = progress
        .wait_until_timeout(|n| *n >= 1000, Duration::from_millis(150))
        .unwrap();
    assert!(!satisfied);
    noisy.join().unwrap();
    assert_eq!(progress.with(|n| *n).unwrap(), 10);
}

#[test]
fn waiter_counts_every_producer() {
    init_logging();
    let arrived = Monitor::new(0usize);
    let workers = 16;

    for _ in 0..workers {
        task::spawn({
            let arrived = arrived.clone();
            move || arrived.modify_and_notify(|n| *n += 1, Notify::One)
        })
        .unwrap();
    }

    let all_there = arrived
        .wait_until_timeout(|n| *n == workers, Duration::from_secs(10))
        .unwrap();
    assert!(all_there);
}
