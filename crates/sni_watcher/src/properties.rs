use serde::{ser::SerializeMap, Serialize, Serializer};
use zbus::zvariant::{ObjectPath, Signature, Type, Value};

use crate::Registry;

/// The properties the watcher exposes. They are all read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    RegisteredStatusNotifierItems,
    IsStatusNotifierHostRegistered,
    ProtocolVersion,
    /// Extension property, only returned when asked for by name.
    RegisteredObjectPathItems,
}

/// Properties returned by `GetAll`, in this order.
pub const GET_ALL: [Property; 3] =
    [Property::RegisteredStatusNotifierItems, Property::IsStatusNotifierHostRegistered, Property::ProtocolVersion];

pub const PROTOCOL_VERSION: i32 = 0;

impl Property {
    pub fn from_name(name: &str) -> Option<Property> {
        match name {
            "RegisteredStatusNotifierItems" => Some(Property::RegisteredStatusNotifierItems),
            "IsStatusNotifierHostRegistered" => Some(Property::IsStatusNotifierHostRegistered),
            "ProtocolVersion" => Some(Property::ProtocolVersion),
            "RegisteredObjectPathItems" => Some(Property::RegisteredObjectPathItems),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Property::RegisteredStatusNotifierItems => "RegisteredStatusNotifierItems",
            Property::IsStatusNotifierHostRegistered => "IsStatusNotifierHostRegistered",
            Property::ProtocolVersion => "ProtocolVersion",
            Property::RegisteredObjectPathItems => "RegisteredObjectPathItems",
        }
    }

    pub fn read(self, registry: &Registry) -> PropertyValue {
        match self {
            Property::RegisteredStatusNotifierItems => PropertyValue::Items(registry.items().to_vec()),
            Property::IsStatusNotifierHostRegistered => PropertyValue::HostRegistered(registry.is_host_registered()),
            Property::ProtocolVersion => PropertyValue::ProtocolVersion(PROTOCOL_VERSION),
            Property::RegisteredObjectPathItems => PropertyValue::PathItems(
                registry.path_items().iter().map(|item| (item.path.clone(), item.owner.clone())).collect(),
            ),
        }
    }
}

/// The current value of a [`Property`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// `as`
    Items(Vec<String>),
    /// `b`
    HostRegistered(bool),
    /// `i`
    ProtocolVersion(i32),
    /// `a(os)`, as (path, owner) pairs
    PathItems(Vec<(String, String)>),
}

impl PropertyValue {
    pub fn into_value(self) -> Value<'static> {
        match self {
            PropertyValue::Items(items) => Value::from(items),
            PropertyValue::HostRegistered(registered) => Value::from(registered),
            PropertyValue::ProtocolVersion(version) => Value::from(version),
            PropertyValue::PathItems(items) => Value::from(
                items
                    .into_iter()
                    // the path was validated when the item registered
                    .filter_map(|(path, owner)| Some((ObjectPath::try_from(path).ok()?, owner)))
                    .collect::<Vec<_>>(),
            ),
        }
    }
}

/// The `a{sv}` body of a `GetAll` reply.
///
/// Entries go on the wire in the order they were given. `HashMap` and [`zbus::zvariant::Dict`]
/// would reorder them.
#[derive(Debug)]
pub struct PropertyMap(Vec<(&'static str, Value<'static>)>);

impl PropertyMap {
    pub fn new(props: Vec<(Property, PropertyValue)>) -> Self {
        PropertyMap(props.into_iter().map(|(prop, value)| (prop.name(), value.into_value())).collect())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(name, _)| *name)
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Type for PropertyMap {
    fn signature() -> Signature<'static> {
        Signature::from_static_str_unchecked("a{sv}")
    }
}
