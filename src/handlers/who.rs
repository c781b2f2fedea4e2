//! `SVR:who` - list connected clients.

use super::{Context, Handler, HandlerResult};
use async_trait::async_trait;
use chatrelay_proto::{Command, response};
use tracing::debug;

/// Replies with every registered name in join order, marking the requester.
pub struct WhoHandler;

#[async_trait]
impl Handler for WhoHandler {
    async fn handle(&self, ctx: &mut Context<'_>, _cmd: &Command<'_>) -> HandlerResult {
        let peers = ctx.hub.registry.snapshot();
        debug!(conn_id = %ctx.id, count = peers.len(), "Listing clients");

        let listing = response::who_listing(
            peers
                .iter()
                .map(|peer| (peer.name.as_str(), peer.id == ctx.id)),
        );
        ctx.reply(listing);
        Ok(())
    }
}
