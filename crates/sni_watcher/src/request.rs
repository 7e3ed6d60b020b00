use zbus::{message::Type as MessageType, Message};

use crate::{names, Error, Result};

/// A message the watcher knows how to handle, with its arguments decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    RegisterItem { sender: Option<String>, service: String },
    RegisterHost { service: String },
    Introspect,
    GetProperty { interface: String, property: String },
    SetProperty,
    GetAllProperties { interface: String },
    NameOwnerChanged { name: String, old_owner: String, new_owner: String },
}

/// Which handler a method call or signal goes to, decided from its interface and member alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    RegisterItem,
    RegisterHost,
    Introspect,
    Get,
    Set,
    GetAll,
    NameOwnerChanged,
}

impl Route {
    pub fn method(interface: &str, member: &str) -> Option<Route> {
        match (interface, member) {
            (names::INTROSPECTABLE_INTERFACE, "Introspect") => Some(Route::Introspect),
            (names::PROPERTIES_INTERFACE, "Get") => Some(Route::Get),
            (names::PROPERTIES_INTERFACE, "Set") => Some(Route::Set),
            (names::PROPERTIES_INTERFACE, "GetAll") => Some(Route::GetAll),
            (names::WATCHER_INTERFACE | names::KDE_WATCHER_INTERFACE, "RegisterStatusNotifierItem") => Some(Route::RegisterItem),
            (names::WATCHER_INTERFACE | names::KDE_WATCHER_INTERFACE, "RegisterStatusNotifierHost") => Some(Route::RegisterHost),
            _ => None,
        }
    }

    pub fn signal(interface: &str, member: &str) -> Option<Route> {
        match (interface, member) {
            (names::DBUS_INTERFACE, "NameOwnerChanged") => Some(Route::NameOwnerChanged),
            _ => None,
        }
    }
}

impl Request {
    /// Decode a message received on the watcher's connection.
    ///
    /// Returns `Ok(None)` for anything that isn't meant for the watcher, and an error if the
    /// message is meant for us but its arguments don't have the expected types.
    pub fn from_message(msg: &Message) -> Result<Option<Request>> {
        let hdr = msg.header();
        let (Some(interface), Some(member)) = (hdr.interface(), hdr.member()) else {
            return Ok(None);
        };
        let (interface, member) = (interface.as_str(), member.as_str());

        let route = match hdr.message_type() {
            MessageType::MethodCall if hdr.path().is_some_and(|p| p.as_str() == names::WATCHER_OBJECT) => {
                Route::method(interface, member)
            }
            // anyone can emit a signal named NameOwnerChanged; only the bus's own is trusted
            MessageType::Signal if hdr.sender().is_some_and(|s| s.as_str() == names::DBUS_BUS) => {
                Route::signal(interface, member)
            }
            _ => None,
        };
        let Some(route) = route else {
            return Ok(None);
        };

        let malformed = |source: zbus::Error| Error::MalformedArgs {
            interface: interface.to_string(),
            member: member.to_string(),
            source,
        };
        let body = msg.body();
        let request = match route {
            Route::RegisterItem => Request::RegisterItem {
                sender: hdr.sender().map(|s| s.to_string()),
                service: body.deserialize::<String>().map_err(malformed)?,
            },
            Route::RegisterHost => Request::RegisterHost { service: body.deserialize::<String>().map_err(malformed)? },
            Route::Introspect => Request::Introspect,
            Route::Get => {
                let (interface, property) = body.deserialize::<(String, String)>().map_err(malformed)?;
                Request::GetProperty { interface, property }
            }
            Route::Set => Request::SetProperty,
            Route::GetAll => Request::GetAllProperties { interface: body.deserialize::<String>().map_err(malformed)? },
            Route::NameOwnerChanged => {
                let (name, old_owner, new_owner) = body.deserialize::<(String, String, String)>().map_err(malformed)?;
                Request::NameOwnerChanged { name, old_owner, new_owner }
            }
        };
        Ok(Some(request))
    }
}
