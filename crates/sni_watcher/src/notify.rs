//! Turning registry changes into signals.
//!
//! Every change is described once as an [`Event`]. [`signals_for`] then looks the event up in
//! [`FAN_OUT`] and produces one [`Signal`] per dialect the event is broadcast on.

use crate::names;

/// A change to the registry that other parties need to hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ItemRegistered(String),
    ItemUnregistered(String),
    HostRegistered,
    PathItemRegistered { owner: String, path: String },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::ItemRegistered(_) => EventKind::ItemRegistered,
            Event::ItemUnregistered(_) => EventKind::ItemUnregistered,
            Event::HostRegistered => EventKind::HostRegistered,
            Event::PathItemRegistered { .. } => EventKind::PathItemRegistered,
        }
    }

    fn body(&self) -> SignalBody {
        match self {
            Event::ItemRegistered(name) | Event::ItemUnregistered(name) => SignalBody::Service(name.clone()),
            Event::HostRegistered => SignalBody::Empty,
            Event::PathItemRegistered { owner, path } => SignalBody::PathItem { path: path.clone(), owner: owner.clone() },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    ItemRegistered,
    ItemUnregistered,
    HostRegistered,
    PathItemRegistered,
}

/// The parallel interface namespaces the watcher speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `org.freedesktop.StatusNotifierWatcher`
    Freedesktop,
    /// `org.kde.StatusNotifierWatcher`, identical to the freedesktop one apart from the name.
    Kde,
    /// `org.swaywm.LessSuckyStatusNotifierWatcher`, for items registered by object path.
    Sway,
}

impl Dialect {
    pub fn interface(self) -> &'static str {
        match self {
            Dialect::Freedesktop => names::WATCHER_INTERFACE,
            Dialect::Kde => names::KDE_WATCHER_INTERFACE,
            Dialect::Sway => names::SWAY_WATCHER_INTERFACE,
        }
    }
}

/// Which dialects each event is broadcast on, and under which signal name.
pub const FAN_OUT: &[(EventKind, &str, &[Dialect])] = &[
    (EventKind::ItemRegistered, "StatusNotifierItemRegistered", &[Dialect::Freedesktop, Dialect::Kde]),
    (EventKind::ItemUnregistered, "StatusNotifierItemUnregistered", &[Dialect::Freedesktop, Dialect::Kde]),
    (EventKind::HostRegistered, "StatusNotifierHostRegistered", &[Dialect::Freedesktop, Dialect::Kde]),
    (EventKind::PathItemRegistered, "ObjPathItemRegistered", &[Dialect::Sway]),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalBody {
    Empty,
    /// `(s)`: the bus name of an item.
    Service(String),
    /// `(os)`: the object path of a path item, then its owner.
    PathItem { path: String, owner: String },
}

/// A broadcast signal sent from [`names::WATCHER_OBJECT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub dialect: Dialect,
    pub member: &'static str,
    pub body: SignalBody,
}

impl Signal {
    pub fn interface(&self) -> &'static str {
        self.dialect.interface()
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.interface(), self.member)?;
        match &self.body {
            SignalBody::Empty => write!(f, "()"),
            SignalBody::Service(name) => write!(f, "({:?})", name),
            SignalBody::PathItem { path, owner } => write!(f, "({:?}, {:?})", path, owner),
        }
    }
}

/// All signals that announce `event`, in dialect order.
pub fn signals_for(event: &Event) -> Vec<Signal> {
    let kind = event.kind();
    FAN_OUT
        .iter()
        .filter(|(k, ..)| *k == kind)
        .flat_map(|(_, member, dialects)| {
            dialects.iter().map(move |dialect| Signal { dialect: *dialect, member: *member, body: event.body() })
        })
        .collect()
}
