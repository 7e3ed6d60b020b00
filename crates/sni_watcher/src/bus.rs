use crate::{notify::Signal, watcher::Reply, Result};

/// What the watcher needs from the message bus.
///
/// [`ZbusBus`][crate::ZbusBus] is the real thing. Calls are awaited inline by the dispatch loop, so a
/// slow `name_has_owner` holds up every message queued behind it.
#[allow(async_fn_in_trait)]
pub trait Bus {
    /// Handle to the method call being answered.
    type Call;

    /// Whether `name` currently has an owner on the bus. Failing to find out counts as "no".
    async fn name_has_owner(&self, name: &str) -> bool;

    async fn reply(&self, call: &Self::Call, reply: Reply) -> Result<()>;

    /// Broadcast `signal` from the watcher object.
    async fn emit(&self, signal: &Signal) -> Result<()>;
}
