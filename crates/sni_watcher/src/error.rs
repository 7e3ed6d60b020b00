use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dbus connection error")]
    DbusError(#[from] zbus::Error),
    #[error("Dbus call failed")]
    DbusCallError(#[from] zbus::fdo::Error),
    #[error("Could not claim bus name {0}")]
    NameClaimError(String, #[source] zbus::Error),
    #[error("Malformed arguments for {interface}.{member}")]
    MalformedArgs {
        interface: String,
        member: String,
        #[source]
        source: zbus::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
