use std::error::Error;
use std::thread;
use std::time::Duration;

use rendezvous::sync::oneshot::{self, TryRecvError};
use rendezvous::task;

#[rendezvous::main]
fn main() -> Result<(), Box<dyn Error>> {
    let (tx, mut rx) = oneshot::channel();

    let producer = task::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        println!("producer: sending");
        tx.send("hello from the producer").is_ok()
    })?;

    match rx.try_recv() {
        Err(TryRecvError::Empty) => println!("main: nothing yet, blocking"),
        other => println!("main: unexpected early result: {other:?}"),
    }

    let msg = rx.recv()?;
    println!("main: received {msg:?}");
    assert!(producer.join()?);
    Ok(())
}
