use zbus::{names::BusName, zvariant::ObjectPath};

/// What a `RegisterStatusNotifierItem`/`RegisterStatusNotifierHost` argument turned out to be.
///
/// The freedesktop.org specification says the argument is a bus name, however some items pass
/// just the object path they are served at on their own connection. The two grammars can't
/// overlap: object paths always start with `/`, which a bus name can never contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// A unique (`:1.42`) or well-known (`org.example.App`) bus name.
    BusName(String),
    /// An object path on the caller's own connection.
    ObjectPath(String),
    Invalid,
}

impl Identity {
    pub fn classify(service: &str) -> Identity {
        if BusName::try_from(service).is_ok() {
            Identity::BusName(service.to_owned())
        } else if ObjectPath::try_from(service).is_ok() {
            Identity::ObjectPath(service.to_owned())
        } else {
            Identity::Invalid
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_bus_names() {
        assert_eq!(Identity::classify("org.test.Item1"), Identity::BusName("org.test.Item1".to_owned()));
        assert_eq!(Identity::classify(":1.42"), Identity::BusName(":1.42".to_owned()));
        assert_eq!(
            Identity::classify("org.kde.StatusNotifierItem-1234-1"),
            Identity::BusName("org.kde.StatusNotifierItem-1234-1".to_owned())
        );
    }

    #[test]
    fn test_classify_object_paths() {
        assert_eq!(Identity::classify("/StatusNotifierItem"), Identity::ObjectPath("/StatusNotifierItem".to_owned()));
        assert_eq!(
            Identity::classify("/org/ayatana/NotificationItem/nm_applet"),
            Identity::ObjectPath("/org/ayatana/NotificationItem/nm_applet".to_owned())
        );
        assert_eq!(Identity::classify("/"), Identity::ObjectPath("/".to_owned()));
    }

    #[test]
    fn test_classify_invalid() {
        assert_eq!(Identity::classify(""), Identity::Invalid);
        assert_eq!(Identity::classify("nodots"), Identity::Invalid);
        assert_eq!(Identity::classify("org..test"), Identity::Invalid);
        assert_eq!(Identity::classify("/trailing/"), Identity::Invalid);
        assert_eq!(Identity::classify("//double"), Identity::Invalid);
        assert_eq!(Identity::classify("org.test/Item"), Identity::Invalid);
    }
}
