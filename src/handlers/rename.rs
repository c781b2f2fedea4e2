//! `SVR:rename <name>` - change the caller's display name.

use super::{Context, Handler, HandlerError, HandlerResult};
use crate::state::RenameError;
use async_trait::async_trait;
use chatrelay_proto::{Command, response};
use tracing::{debug, info};

pub struct RenameHandler;

#[async_trait]
impl Handler for RenameHandler {
    async fn handle(&self, ctx: &mut Context<'_>, cmd: &Command<'_>) -> HandlerResult {
        let requested = cmd.arg().unwrap_or_default();
        let old = ctx.hub.registry.name_of(ctx.id);

        match ctx.hub.registry.rename(ctx.id, requested) {
            Ok(name) => {
                info!(conn_id = %ctx.id, old = ?old, new = %name, "Client renamed");
                ctx.reply(response::renamed(&name));
                Ok(())
            }
            Err(RenameError::Empty) => {
                debug!(conn_id = %ctx.id, "Rejected empty name");
                ctx.reply(response::INVALID_USERNAME);
                Ok(())
            }
            Err(RenameError::NotRegistered(id)) => Err(HandlerError::NotRegistered(id)),
        }
    }
}
