//! A standalone [StatusNotifierWatcher].
//!
//! Items and hosts register with the watcher, which keeps track of them until their bus name goes
//! away, and tells everyone about it. Besides the freedesktop interface, the same watcher is served
//! under kde's name, and items that only have an object path are tracked through sway's
//! `org.swaywm.LessSuckyStatusNotifierWatcher` extension.
//!
//! [StatusNotifierWatcher]: https://freedesktop.org/wiki/Specifications/StatusNotifierItem/StatusNotifierWatcher/

pub mod names;

mod bus;
pub use bus::*;

mod error;
pub use error::*;

pub mod identity;
pub mod introspect;
pub mod notify;
pub mod properties;

mod registry;
pub use registry::*;

pub mod request;

mod server;
pub use server::*;

mod watcher;
pub use watcher::*;
