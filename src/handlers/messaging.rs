//! Message relay commands.

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::invocation::Invocation;
use async_trait::async_trait;

/// Relay the rest of the line to the channel, casing intact.
///
/// `say Hello World` sends exactly `Hello World`, not the lowercased tokens
/// the argument gate saw.
pub struct SayHandler;

#[async_trait]
impl Handler for SayHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        let channel = inv.channel.as_deref().ok_or(HandlerError::NoChannel)?;
        ctx.bot.privmsg(channel, &inv.rest).await?;
        Ok(())
    }
}
