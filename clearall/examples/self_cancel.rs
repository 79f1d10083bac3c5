use std::{cell::Cell, rc::Rc};

use clearall::{ClearAll, Listener, Result, testing::EventEmitter};

// A listener that tears down its whole bundle after the third tick.
fn main() -> Result {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let clock = Rc::new(EventEmitter::<u32>::new());

    // Create the handle first so the listener can refer to it
    let clear_all = ClearAll::new();
    let weak = clear_all.downgrade();
    let ticks = Rc::new(Cell::new(0));

    let counter = ticks.clone();
    let on_tick = Listener::new(move |n: &u32| {
        counter.set(counter.get() + 1);
        println!("tick {n}");
        if counter.get() == 3 {
            if let Err(e) = weak.clear() {
                eprintln!("clear failed: {e}");
            }
        }
    });

    clear_all
        .add(&clock, "tick", &on_tick)?
        .add(&clock, "tock", &on_tick)?;

    for n in 1..=5 {
        clock.emit("tick", &n);
    }

    println!("ticks handled: {}", ticks.get());
    println!("still pending: {}", clear_all.len());
    Ok(())
}
