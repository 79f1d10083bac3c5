//! Test doubles for code that manages listeners with [`ClearAll`](crate::ClearAll).
//!
//! Enable with the `test-harness` feature:
//!
//! ```toml
//! [dev-dependencies]
//! clearall = { version = "0.1", features = ["test-harness"] }
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use clearall::{Convention, Listener, testing::{EventEmitter, Probe}};
//!
//! let emitter = Rc::new(EventEmitter::<u8>::new());
//! let probe = Rc::new(Probe::<u8>::new().expose(Convention::EventTarget));
//! let listener = Listener::new(|_: &u8| {});
//!
//! let clear_all = clearall::add(&emitter, "data", &listener)
//!     .and_then(|h| h.add(&probe, "click", &listener))
//!     .unwrap();
//!
//! assert_eq!(emitter.emit("data", &1), 1);
//! clear_all.clear().unwrap();
//!
//! assert_eq!(emitter.emit("data", &1), 0);
//! assert_eq!(probe.count("remove_event_listener"), 1);
//! ```
//!
//! # Note
//!
//! Both types use `RefCell` internally and are `!Sync`, matching the
//! single-threaded model of the rest of the crate.

mod event_emitter;
mod probe;

pub use event_emitter::EventEmitter;
pub use probe::{Call, Probe, ProbeError};
