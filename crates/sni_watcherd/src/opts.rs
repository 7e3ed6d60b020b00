use clap::Parser;
use sni_watcher::NameOptions;

/// Struct that gets generated from `RawOpt`.
#[derive(Debug, PartialEq, Eq)]
pub struct Opt {
    pub log_debug: bool,
    pub system_bus: bool,
    pub names: NameOptions,
}

#[derive(Parser, Debug, PartialEq, Eq)]
#[command(version, about = "A standalone StatusNotifierWatcher")]
struct RawOpt {
    /// Write out debug logs.
    #[arg(long = "debug")]
    log_debug: bool,

    /// Serve the watcher on the system bus instead of the session bus.
    #[arg(long = "system")]
    system_bus: bool,

    /// Don't take over the watcher names from a watcher that is already running.
    /// We'll wait in the queue for the names instead.
    #[arg(long = "no-replace")]
    no_replace: bool,

    /// Only claim org.freedesktop.StatusNotifierWatcher, not org.kde.StatusNotifierWatcher.
    #[arg(long = "no-kde")]
    no_kde: bool,
}

impl Opt {
    pub fn from_env() -> Self {
        let raw: RawOpt = RawOpt::parse();
        raw.into()
    }
}

impl From<RawOpt> for Opt {
    fn from(other: RawOpt) -> Self {
        let RawOpt { log_debug, system_bus, no_replace, no_kde } = other;
        Opt { log_debug, system_bus, names: NameOptions { replace_existing: !no_replace, claim_kde: !no_kde } }
    }
}
