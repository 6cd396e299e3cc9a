//! Mode commands: channel modes and the bot's own user modes.

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::invocation::Invocation;
use crate::permission::{self, Subject, level};
use async_trait::async_trait;
use tracing::debug;

/// Set modes on the channel the command arrived on.
///
/// Dual gate: the sender needs the operator tier (dispatcher-enforced), and
/// the channel itself must hold at least the halfop tier in the directory.
/// The channel level is re-fetched on every invocation so a freshly promoted
/// channel takes effect immediately.
pub struct ModeHandler;

#[async_trait]
impl Handler for ModeHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        let channel = inv.channel.as_deref().ok_or(HandlerError::NoChannel)?;

        let subject = Subject::channel(channel);
        let channel_level = permission::refresh_bounded(
            ctx.resolver,
            &subject,
            ctx.config.resolver_timeout(),
        )
        .await?;

        if channel_level < level::HALFOP {
            debug!(channel = %channel, channel_level, "channel below mode threshold");
            return Ok(());
        }

        ctx.bot.mode(channel, &inv.args[0]).await?;
        Ok(())
    }
}

/// Set user modes on the bot's own nickname.
pub struct UmodeHandler;

#[async_trait]
impl Handler for UmodeHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        let nickname = ctx.bot.nickname().to_string();
        ctx.bot.mode(&nickname, &inv.args[0]).await?;
        Ok(())
    }
}
