#![cfg_attr(docsrs, feature(doc_cfg))]
//! # clearall
//!
//! One handle to cancel many event listeners, whatever API they were
//! registered through.
//!
//! Event sources disagree on how listeners come and go: some use
//! `add_event_listener`/`remove_event_listener`, some
//! `add_listener`/`remove_listener`, some `on`/`off`, and some a `subscribe`
//! call that hands back its own canceller. `clearall` detects which one a
//! target speaks, registers the listener immediately and remembers how to
//! undo it. A single [`ClearAll::clear`] later undoes everything, exactly
//! once.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use clearall::{Listener, testing::EventEmitter};
//!
//! # fn main() -> clearall::Result {
//! let socket = Rc::new(EventEmitter::<String>::new());
//! let on_message = Listener::new(|msg: &String| println!("got {msg}"));
//!
//! let clear_all = clearall::add(&socket, "message", &on_message)?
//!     .add(&socket, "reconnect", &on_message)?;
//!
//! socket.emit("message", &"hello".to_string());
//!
//! clear_all.clear()?;   // both listeners removed
//! clear_all.clear()?;   // no-op
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ClearAll`] | The handle: `add` subscriptions, `clear` them all |
//! | [`Listenable`] | Implemented by targets to expose their conventions |
//! | [`Convention`] | The four supported registration styles, in priority order |
//! | [`Listener`] | Shared callback compared by identity |
//! | [`Params`] | Extra arguments forwarded to the registration call |
//! | [`Canceller`] | Disposer returned by subscribe-style targets |
//! | [`Config`] | Leak policy and drop behaviour |
//! | [`Error`] | The single error type |
//!
//! ## Detection Order
//!
//! A target may expose several conventions; the first one found in this
//! order is used for both registration and removal:
//!
//! 1. [`EventTarget`] - `add_event_listener` / `remove_event_listener`
//! 2. [`Emitter`] - `add_listener` / `remove_listener`
//! 3. [`OnOff`] - `on` / `off`
//! 4. [`Subscribable`] - `subscribe`, undone by the returned [`Canceller`]
//!    or else by [`Unsubscribable::unsubscribe`]
//!
//! A target exposing none of them is rejected with
//! [`Error::UnsupportedTarget`] before anything is registered.
//!
//! ## Leaked Registrations
//!
//! A subscribe-style target that returns no canceller and has no
//! `unsubscribe` cannot be undone. By default such a registration is kept
//! and a warning is logged; [`LeakPolicy::Reject`] turns it into an error.
//!
//! ## Features
//!
//! - **`serde`** - `Serialize`/`Deserialize` for [`Config`], [`EventName`], [`Params`] and friends
//! - **`test-harness`** - [`testing`] module with an in-memory emitter and a recording probe target

mod canceller;
mod clear_all;
mod config;
mod convention;
mod detect;
mod error;
mod event_name;
mod leak_policy;
mod listenable;
mod listener;
mod params;
mod subscription_id;

mod internal;

#[cfg(any(test, feature = "test-harness"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-harness")))]
pub mod testing;

pub use canceller::Canceller;
pub use clear_all::{ClearAll, WeakClearAll, add, add_with};
pub use config::Config;
pub use convention::Convention;
pub use detect::detect;
pub use error::Error;
pub use event_name::EventName;
pub use leak_policy::LeakPolicy;
pub use listenable::{Emitter, EventTarget, Listenable, OnOff, Subscribable, Unsubscribable};
pub use listener::Listener;
pub use params::Params;
pub use subscription_id::SubscriptionId;

/// Convenience alias for `Result<T, clearall::Error>`.
pub type Result<T = ()> = std::result::Result<T, Error>;
