//! `SVR:disconnect` handler for terminating client sessions.

use super::{Context, Handler, HandlerError, HandlerResult};
use async_trait::async_trait;
use chatrelay_proto::Command;
use tracing::info;

pub struct DisconnectHandler;

#[async_trait]
impl Handler for DisconnectHandler {
    async fn handle(&self, ctx: &mut Context<'_>, _cmd: &Command<'_>) -> HandlerResult {
        info!(
            conn_id = %ctx.id,
            name = ?ctx.hub.registry.name_of(ctx.id),
            "Client requested disconnect"
        );

        // The session loop tears the connection down on this error.
        Err(HandlerError::Disconnect)
    }
}
