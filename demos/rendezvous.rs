use std::error::Error;
use std::thread;
use std::time::Duration;

use rendezvous::sync::Event;
use rendezvous::task;

#[rendezvous::main]
fn main() -> Result<(), Box<dyn Error>> {
    let done = Event::new();

    println!("parent: begin");
    let child = task::spawn({
        let done = done.clone();
        move || {
            println!("child: begin");
            thread::sleep(Duration::from_secs(1));
            println!("child: signal");
            done.set()
        }
    })?;

    println!("parent: waiting to be signalled...");
    done.wait()?;
    child.join()??;
    println!("parent: end");
    Ok(())
}
