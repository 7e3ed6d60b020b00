use std::future::Future;

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use zbus::{
    fdo::{DBusProxy, RequestNameFlags, RequestNameReply},
    message::Type as MessageType,
    names::BusName,
    zvariant::ObjectPath,
    Connection, MatchRule, Message, MessageStream,
};

use crate::{
    names,
    notify::{signals_for, Signal, SignalBody},
    properties::PropertyMap,
    request::Request,
    Bus, Error, Reply, Result, Watcher,
};

/// How the watcher claims its well-known names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameOptions {
    /// Ask the bus to take the names over from a running watcher.
    pub replace_existing: bool,
    /// Also claim `org.kde.StatusNotifierWatcher`, which most items look for.
    pub claim_kde: bool,
}

impl Default for NameOptions {
    fn default() -> Self {
        NameOptions { replace_existing: true, claim_kde: true }
    }
}

impl NameOptions {
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = vec![names::WATCHER_BUS];
        if self.claim_kde {
            names.push(names::KDE_WATCHER_BUS);
        }
        names
    }
}

/// [`Bus`] implementation on top of a real zbus connection.
#[derive(Debug, Clone)]
pub struct ZbusBus {
    con: Connection,
    dbus: DBusProxy<'static>,
}

impl ZbusBus {
    pub async fn new(con: Connection) -> Result<Self> {
        let dbus = DBusProxy::new(&con).await?;
        Ok(ZbusBus { con, dbus })
    }

    /// Claim the watcher's well-known names.
    ///
    /// If another watcher holds a name and doesn't allow replacement, we get queued and take over
    /// once it exits. Only an actual bus error is fatal.
    pub async fn claim_names(&self, opts: NameOptions) -> Result<()> {
        // not AllowReplacement, not DoNotQueue
        let flags: &[RequestNameFlags] = if opts.replace_existing { &[RequestNameFlags::ReplaceExisting] } else { &[] };
        for name in opts.names() {
            match self.con.request_name_with_flags(name, flags.iter().copied().collect()).await {
                Ok(RequestNameReply::PrimaryOwner | RequestNameReply::AlreadyOwner) => log::debug!("got watcher name {}", name),
                Ok(RequestNameReply::InQueue) => log::info!("could not get watcher name {}, it may start later", name),
                Ok(RequestNameReply::Exists) | Err(zbus::Error::NameTaken) => {
                    log::warn!("watcher name {} is taken by someone else", name)
                }
                Err(e) => return Err(Error::NameClaimError(name.to_string(), e)),
            }
        }
        Ok(())
    }

    /// Subscribe to `NameOwnerChanged`, so that it shows up in the connection's message stream.
    pub async fn watch_name_owners(&self) -> Result<()> {
        let rule = MatchRule::builder()
            .msg_type(MessageType::Signal)
            .sender(names::DBUS_BUS)?
            .interface(names::DBUS_INTERFACE)?
            .member("NameOwnerChanged")?
            .build();
        self.dbus.add_match_rule(rule).await?;
        Ok(())
    }
}

impl Bus for ZbusBus {
    type Call = Message;

    async fn name_has_owner(&self, name: &str) -> bool {
        let name = match BusName::try_from(name) {
            Ok(name) => name,
            Err(e) => {
                log::warn!("cannot look up owner of {:?}: {}", name, e);
                return false;
            }
        };
        match self.dbus.name_has_owner(name.clone()).await {
            Ok(has_owner) => has_owner,
            Err(e) => {
                log::warn!("failed to look up owner of {:?}: {}", name, e);
                false
            }
        }
    }

    async fn reply(&self, call: &Message, reply: Reply) -> Result<()> {
        match reply {
            Reply::Empty => self.con.reply(call, &()).await?,
            Reply::Introspection(xml) => self.con.reply(call, &xml).await?,
            Reply::Property(value) => self.con.reply(call, &value.into_value()).await?,
            Reply::AllProperties(props) => self.con.reply(call, &PropertyMap::new(props)).await?,
        };
        Ok(())
    }

    async fn emit(&self, signal: &Signal) -> Result<()> {
        let (path, iface, member) = (names::WATCHER_OBJECT, signal.interface(), signal.member);
        match &signal.body {
            SignalBody::Empty => self.con.emit_signal(None::<BusName<'_>>, path, iface, member, &()).await?,
            SignalBody::Service(service) => self.con.emit_signal(None::<BusName<'_>>, path, iface, member, service).await?,
            SignalBody::PathItem { path: item_path, owner } => {
                let item_path = ObjectPath::try_from(item_path.as_str()).map_err(zbus::Error::from)?;
                self.con.emit_signal(None::<BusName<'_>>, path, iface, member, &(item_path, owner)).await?
            }
        }
        Ok(())
    }
}

/// Handle one request: update the watcher, broadcast whatever changed, then answer the caller.
pub async fn dispatch<B: Bus>(watcher: &mut Watcher, bus: &B, call: &B::Call, request: Request) {
    let response = watcher.handle(bus, request).await;
    for event in &response.events {
        for signal in signals_for(event) {
            if let Err(e) = bus.emit(&signal).await {
                log::error!("failed to emit {}: {}", signal, e);
            }
        }
    }
    if let Some(reply) = response.reply {
        if let Err(e) = bus.reply(call, reply).await {
            log::error!("failed to reply: {}", e);
        }
    }
}

/// Move everything `messages` yields into `tx` as soon as it arrives.
///
/// zbus' socket reader waits whenever a `MessageStream` is full. The dispatch loop itself waits on
/// the bus while asking for name owners, so it must never be the one draining the stream.
pub async fn forward_messages<S, T>(mut messages: S, tx: mpsc::UnboundedSender<T>)
where
    S: Stream<Item = T> + Unpin,
{
    while let Some(msg) = messages.next().await {
        if tx.send(msg).is_err() {
            break;
        }
    }
}

/// Serve `watcher` on `bus` until the connection closes or `shutdown` resolves.
///
/// Method calls and `NameOwnerChanged` signals come through the same channel, so they are handled
/// one at a time in the order the bus delivered them.
pub async fn serve<B: Bus<Call = Message>>(
    mut watcher: Watcher,
    bus: &B,
    mut messages: mpsc::UnboundedReceiver<zbus::Result<Message>>,
    shutdown: impl Future<Output = ()>,
) -> Watcher {
    tokio::pin!(shutdown);
    loop {
        let msg = tokio::select! {
            _ = &mut shutdown => {
                log::info!("shutting down watcher");
                break;
            }
            msg = messages.recv() => msg,
        };
        let msg = match msg {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                log::error!("error receiving message: {}", e);
                continue;
            }
            None => {
                log::info!("bus connection closed");
                break;
            }
        };
        match Request::from_message(&msg) {
            Ok(Some(request)) => dispatch(&mut watcher, bus, &msg, request).await,
            Ok(None) => {}
            Err(e) => log::error!("{}: {:?}", e, e),
        }
    }
    watcher
}

/// Connect everything up: claim the names, subscribe to name owner changes and serve `watcher`
/// until `shutdown` resolves.
pub async fn run(watcher: Watcher, con: Connection, opts: NameOptions, shutdown: impl Future<Output = ()>) -> Result<Watcher> {
    let bus = ZbusBus::new(con).await?;
    // subscribe before claiming anything, so that no call can slip past the stream
    let (tx, rx) = mpsc::unbounded_channel();
    let forwarder = tokio::spawn(forward_messages(MessageStream::from(&bus.con), tx));

    let served = async {
        bus.watch_name_owners().await?;
        bus.claim_names(opts).await?;
        log::info!("StatusNotifierWatcher running at {}", names::WATCHER_OBJECT);
        Ok::<_, Error>(serve(watcher, &bus, rx, shutdown).await)
    }
    .await;
    forwarder.abort();
    served
}
