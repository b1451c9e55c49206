use std::error::Error;
use std::thread;
use std::time::Duration;

use rendezvous::sync::{Monitor, Notify};
use rendezvous::task;

const WORKERS: usize = 5;

#[rendezvous::main]
fn main() -> Result<(), Box<dyn Error>> {
    let ready = Monitor::new(0usize);

    for i in 0..WORKERS {
        let ready = ready.clone();
        task::spawn(move || {
            println!("worker {i}: initializing...");
            thread::sleep(Duration::from_millis(10 * i as u64));
            ready.modify_and_notify(|n| *n += 1, Notify::One)
        })?;
    }

    ready.wait_until(|n| *n == WORKERS)?;
    println!("main: all {WORKERS} workers initialized");
    Ok(())
}
