//! Well-known names, paths and interfaces used by the watcher.

/// Well-known name of the freedesktop StatusNotifierWatcher.
pub const WATCHER_BUS: &str = "org.freedesktop.StatusNotifierWatcher";
/// Well-known name of the kde StatusNotifierWatcher, which most items still look for.
pub const KDE_WATCHER_BUS: &str = "org.kde.StatusNotifierWatcher";

/// Object path the watcher is served at.
pub const WATCHER_OBJECT: &str = "/StatusNotifierWatcher";

pub const WATCHER_INTERFACE: &str = "org.freedesktop.StatusNotifierWatcher";
pub const KDE_WATCHER_INTERFACE: &str = "org.kde.StatusNotifierWatcher";
/// Extension interface for items that registered an object path instead of a bus name.
pub const SWAY_WATCHER_INTERFACE: &str = "org.swaywm.LessSuckyStatusNotifierWatcher";

pub const DBUS_BUS: &str = "org.freedesktop.DBus";
pub const DBUS_INTERFACE: &str = "org.freedesktop.DBus";
pub const INTROSPECTABLE_INTERFACE: &str = "org.freedesktop.DBus.Introspectable";
pub const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";
