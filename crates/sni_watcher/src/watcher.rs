use crate::{
    identity::Identity,
    introspect::INTROSPECTION_XML,
    notify::Event,
    properties::{Property, PropertyValue, GET_ALL},
    registry::{PathItem, Registry},
    request::Request,
    Bus,
};

/// An instance of [`org.freedesktop.StatusNotifierWatcher`]. It only tracks what tray items and
/// trays exist, and doesn't have any logic for displaying items.
///
/// The watcher never answers a bad request with an error. Invalid, duplicate and unowned
/// registrations are dropped without a reply, since existing items and hosts rely on that.
///
/// [`org.freedesktop.StatusNotifierWatcher`]: https://freedesktop.org/wiki/Specifications/StatusNotifierItem/StatusNotifierWatcher/
#[derive(Debug, Default)]
pub struct Watcher {
    registry: Registry,
}

/// A method return to send back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A return without a body.
    Empty,
    Introspection(&'static str),
    Property(PropertyValue),
    AllProperties(Vec<(Property, PropertyValue)>),
}

/// What handling a single request produced.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Response {
    pub reply: Option<Reply>,
    pub events: Vec<Event>,
}

impl Response {
    fn silent() -> Self {
        Response::default()
    }

    fn reply(reply: Reply) -> Self {
        Response { reply: Some(reply), events: Vec::new() }
    }

    fn event(event: Event) -> Self {
        Response { reply: None, events: vec![event] }
    }
}

impl Watcher {
    /// Create a new Watcher.
    pub fn new() -> Watcher {
        Default::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub async fn handle<B: Bus>(&mut self, bus: &B, request: Request) -> Response {
        match request {
            Request::RegisterItem { sender, service } => self.register_item(bus, sender.as_deref(), &service).await,
            Request::RegisterHost { service } => self.register_host(bus, &service).await,
            Request::NameOwnerChanged { name, new_owner, .. } => self.name_owner_changed(&name, &new_owner),
            Request::Introspect => Response::reply(Reply::Introspection(INTROSPECTION_XML)),
            Request::GetProperty { property, .. } => self.get_property(&property),
            Request::GetAllProperties { .. } => self.get_all_properties(),
            // everything is read-only
            Request::SetProperty => Response::silent(),
        }
    }

    /// RegisterStatusNotifierItem method
    pub async fn register_item<B: Bus>(&mut self, bus: &B, sender: Option<&str>, service: &str) -> Response {
        log::info!("RegisterStatusNotifierItem called with {:?}", service);

        match Identity::classify(service) {
            Identity::Invalid => {
                log::info!("item {:?} is neither a bus name nor an object path, ignoring it", service);
                Response::silent()
            }
            Identity::ObjectPath(path) => {
                let Some(sender) = sender else {
                    log::warn!("item {:?} registered by object path without a sender, ignoring it", path);
                    return Response::silent();
                };
                let item = PathItem::new(sender, path);
                if !self.registry.insert_path_item(item.clone()) {
                    log::debug!("new path item: {} (duplicate)", item);
                    return Response::silent();
                }
                log::info!("new path item: {}", item);
                // path items don't get a method return
                Response::event(Event::PathItemRegistered { owner: item.owner, path: item.path })
            }
            Identity::BusName(name) => {
                if self.registry.has_item(&name) {
                    log::debug!("new item: {} (duplicate)", name);
                    return Response::silent();
                }
                if !bus.name_has_owner(&name).await {
                    log::info!("item {} has no owner on the bus, ignoring it", name);
                    return Response::silent();
                }
                self.registry.insert_item(&name);
                log::info!("new item: {}", name);
                // it's silly, but clients want a reply here
                Response { reply: Some(Reply::Empty), events: vec![Event::ItemRegistered(name)] }
            }
        }
    }

    /// RegisterStatusNotifierHost method
    pub async fn register_host<B: Bus>(&mut self, bus: &B, service: &str) -> Response {
        log::info!("RegisterStatusNotifierHost called with {:?}", service);

        let Identity::BusName(name) = Identity::classify(service) else {
            log::info!("host {:?} is not a bus name, ignoring it", service);
            return Response::silent();
        };
        if self.registry.has_host(&name) {
            log::debug!("new host: {} (duplicate)", name);
            return Response::silent();
        }
        if !bus.name_has_owner(&name).await {
            log::info!("host {} has no owner on the bus, ignoring it", name);
            return Response::silent();
        }
        self.registry.insert_host(&name);
        log::info!("new host: {}", name);
        Response::event(Event::HostRegistered)
    }

    /// React to `org.freedesktop.DBus.NameOwnerChanged`.
    ///
    /// Only names that lost their owner matter. Items are checked first, then hosts, then the
    /// owners of path items; a name is expected to be in at most one of them.
    pub fn name_owner_changed(&mut self, name: &str, new_owner: &str) -> Response {
        if !new_owner.is_empty() {
            return Response::silent();
        }

        if self.registry.remove_item(name) {
            log::info!("lost item: {}", name);
            return Response::event(Event::ItemUnregistered(name.to_string()));
        }
        if self.registry.remove_host(name) {
            // there's no StatusNotifierHostUnregistered in the protocol
            log::info!("lost host: {}", name);
            return Response::silent();
        }
        match self.registry.remove_path_items_of(name) {
            0 => Response::silent(),
            n => {
                log::info!("lost {} path item(s) of {}", n, name);
                Response::event(Event::ItemUnregistered(name.to_string()))
            }
        }
    }

    pub fn get_property(&self, name: &str) -> Response {
        match Property::from_name(name) {
            Some(prop) => Response::reply(Reply::Property(prop.read(&self.registry))),
            None => {
                log::debug!("asked for unknown property {:?}", name);
                Response::silent()
            }
        }
    }

    /// The standard properties. `RegisteredObjectPathItems` has to be asked for by name.
    pub fn get_all_properties(&self) -> Response {
        Response::reply(Reply::AllProperties(GET_ALL.iter().map(|prop| (*prop, prop.read(&self.registry))).collect()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bus::fake::FakeBus;
    use pretty_assertions::assert_eq;

    fn items(watcher: &Watcher) -> Vec<&str> {
        watcher.registry().items().iter().map(String::as_str).collect()
    }

    #[tokio::test]
    async fn test_register_owned_item_once() {
        let bus = FakeBus::with_owners(&["org.test.Item1"]);
        let mut watcher = Watcher::new();

        let res = watcher.register_item(&bus, Some(":1.10"), "org.test.Item1").await;
        assert_eq!(
            res,
            Response { reply: Some(Reply::Empty), events: vec![Event::ItemRegistered("org.test.Item1".to_string())] }
        );
        assert_eq!(items(&watcher), ["org.test.Item1"]);

        let res = watcher.register_item(&bus, Some(":1.10"), "org.test.Item1").await;
        assert_eq!(res, Response::silent());
        assert_eq!(items(&watcher), ["org.test.Item1"]);
    }

    #[tokio::test]
    async fn test_unowned_item_is_dropped() {
        let bus = FakeBus::default();
        let mut watcher = Watcher::new();
        assert_eq!(watcher.register_item(&bus, Some(":1.10"), "org.test.Ghost").await, Response::silent());
        assert!(watcher.registry().items().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_item_is_dropped() {
        let bus = FakeBus::default();
        let mut watcher = Watcher::new();
        for service in ["", "not a name", "org..test", "/trailing/"] {
            assert_eq!(watcher.register_item(&bus, Some(":1.10"), service).await, Response::silent());
        }
        assert!(watcher.registry().items().is_empty());
        assert!(watcher.registry().path_items().is_empty());
    }

    #[tokio::test]
    async fn test_path_item_registration() {
        let bus = FakeBus::default();
        let mut watcher = Watcher::new();

        let res = watcher.register_item(&bus, Some(":1.5"), "/StatusNotifierItem").await;
        assert_eq!(
            res,
            Response::event(Event::PathItemRegistered { owner: ":1.5".to_string(), path: "/StatusNotifierItem".to_string() })
        );
        assert_eq!(watcher.register_item(&bus, Some(":1.5"), "/StatusNotifierItem").await, Response::silent());
        // same path on another connection is another item
        assert_eq!(watcher.register_item(&bus, Some(":1.6"), "/StatusNotifierItem").await.events.len(), 1);
        assert_eq!(watcher.registry().path_items().len(), 2);
    }

    #[tokio::test]
    async fn test_path_item_without_sender_is_dropped() {
        let bus = FakeBus::default();
        let mut watcher = Watcher::new();
        assert_eq!(watcher.register_item(&bus, None, "/StatusNotifierItem").await, Response::silent());
        assert!(watcher.registry().path_items().is_empty());
    }

    #[tokio::test]
    async fn test_register_host() {
        let bus = FakeBus::with_owners(&["org.test.Host1"]);
        let mut watcher = Watcher::new();

        assert_eq!(watcher.register_host(&bus, "/StatusNotifierHost").await, Response::silent());
        assert_eq!(watcher.register_host(&bus, "org.test.Host2").await, Response::silent());
        assert!(!watcher.registry().is_host_registered());

        assert_eq!(watcher.register_host(&bus, "org.test.Host1").await, Response::event(Event::HostRegistered));
        assert_eq!(watcher.register_host(&bus, "org.test.Host1").await, Response::silent());
        assert!(watcher.registry().is_host_registered());
    }

    #[tokio::test]
    async fn test_owner_change_without_release_is_ignored() {
        let bus = FakeBus::with_owners(&["org.test.Item1"]);
        let mut watcher = Watcher::new();
        watcher.register_item(&bus, Some(":1.10"), "org.test.Item1").await;

        assert_eq!(watcher.name_owner_changed("org.test.Item1", ":1.11"), Response::silent());
        assert_eq!(items(&watcher), ["org.test.Item1"]);
    }

    #[tokio::test]
    async fn test_lost_item_is_unregistered() {
        let bus = FakeBus::with_owners(&["org.test.Item1", "org.test.Item2"]);
        let mut watcher = Watcher::new();
        watcher.register_item(&bus, Some(":1.10"), "org.test.Item1").await;
        watcher.register_item(&bus, Some(":1.11"), "org.test.Item2").await;

        assert_eq!(
            watcher.name_owner_changed("org.test.Item1", ""),
            Response::event(Event::ItemUnregistered("org.test.Item1".to_string()))
        );
        assert_eq!(items(&watcher), ["org.test.Item2"]);
        assert_eq!(watcher.name_owner_changed("org.test.Item1", ""), Response::silent());
    }

    #[tokio::test]
    async fn test_lost_host_is_removed_quietly() {
        let bus = FakeBus::with_owners(&["org.test.Host1"]);
        let mut watcher = Watcher::new();
        watcher.register_host(&bus, "org.test.Host1").await;

        assert_eq!(watcher.name_owner_changed("org.test.Host1", ""), Response::silent());
        assert!(!watcher.registry().is_host_registered());
    }

    #[tokio::test]
    async fn test_lost_owner_drops_all_its_path_items_with_one_event() {
        let bus = FakeBus::default();
        let mut watcher = Watcher::new();
        watcher.register_item(&bus, Some(":1.5"), "/A").await;
        watcher.register_item(&bus, Some(":1.5"), "/B").await;
        watcher.register_item(&bus, Some(":1.6"), "/A").await;

        assert_eq!(watcher.name_owner_changed(":1.5", ""), Response::event(Event::ItemUnregistered(":1.5".to_string())));
        assert_eq!(watcher.registry().path_items(), [PathItem::new(":1.6", "/A")]);
    }

    #[tokio::test]
    async fn test_lost_item_takes_priority_over_path_items() {
        let bus = FakeBus::with_owners(&[":1.5"]);
        let mut watcher = Watcher::new();
        watcher.register_item(&bus, Some(":1.5"), ":1.5").await;
        watcher.register_item(&bus, Some(":1.5"), "/A").await;

        assert_eq!(watcher.name_owner_changed(":1.5", ""), Response::event(Event::ItemUnregistered(":1.5".to_string())));
        assert!(watcher.registry().items().is_empty());
        assert_eq!(watcher.registry().path_items().len(), 1);
    }

    #[tokio::test]
    async fn test_properties() {
        let bus = FakeBus::with_owners(&["org.test.Item1", "org.test.Host1"]);
        let mut watcher = Watcher::new();
        watcher.register_item(&bus, Some(":1.10"), "org.test.Item1").await;
        watcher.register_item(&bus, Some(":1.5"), "/StatusNotifierItem").await;
        watcher.register_host(&bus, "org.test.Host1").await;

        assert_eq!(
            watcher.get_property("RegisteredObjectPathItems"),
            Response::reply(Reply::Property(PropertyValue::PathItems(vec![(
                "/StatusNotifierItem".to_string(),
                ":1.5".to_string()
            )])))
        );
        assert_eq!(watcher.get_property("Bogus"), Response::silent());
        assert_eq!(
            watcher.get_all_properties(),
            Response::reply(Reply::AllProperties(vec![
                (Property::RegisteredStatusNotifierItems, PropertyValue::Items(vec!["org.test.Item1".to_string()])),
                (Property::IsStatusNotifierHostRegistered, PropertyValue::HostRegistered(true)),
                (Property::ProtocolVersion, PropertyValue::ProtocolVersion(0)),
            ]))
        );
    }

    #[tokio::test]
    async fn test_set_and_introspect() {
        let bus = FakeBus::default();
        let mut watcher = Watcher::new();
        assert_eq!(watcher.handle(&bus, Request::SetProperty).await, Response::silent());
        assert_eq!(watcher.handle(&bus, Request::Introspect).await, Response::reply(Reply::Introspection(INTROSPECTION_XML)));
    }
}
