use std::rc::Rc;

use clearall::{
    Convention, Listener, Result,
    testing::{EventEmitter, Probe},
};

fn main() -> Result {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    // An emitter that speaks add_listener/remove_listener and on/off
    let socket = Rc::new(EventEmitter::<String>::new());
    // A DOM-like object that only knows add_event_listener/remove_event_listener
    let button = Rc::new(Probe::<String>::new().expose(Convention::EventTarget));

    let print = Listener::new(|msg: &String| println!("received: {msg}"));

    let clear_all = clearall::add(&socket, "message", &print)?
        .add(&socket, "error", &print)?
        .add_with(&button, "click", &print, [serde_json::json!({ "passive": true })])?;

    socket.emit("message", &"hello".to_string());
    println!("{} subscriptions pending", clear_all.len());

    clear_all.clear()?;
    clear_all.clear()?;

    let delivered = socket.emit("message", &"anyone there?".to_string());
    println!("delivered after clear: {delivered}");
    println!("button calls: {:?}", button.calls());
    Ok(())
}
