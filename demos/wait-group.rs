use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rendezvous::sync::WaitGroup;
use rendezvous::task;

#[rendezvous::main]
fn main() -> Result<(), Box<dyn Error>> {
    let counter = Arc::new(AtomicUsize::new(0));
    let wg = WaitGroup::new();

    for _ in 0..100 {
        let worker = wg.worker();
        let counter = Arc::clone(&counter);
        task::spawn(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            drop(worker);
        })?;
    }

    wg.wait()?;
    println!("all workers arrived: counter = {}", counter.load(Ordering::SeqCst));
    Ok(())
}
