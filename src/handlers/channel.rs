//! Channel membership commands: join, part, switch.
//!
//! ## Syntax
//! ```text
//! join <channel> [key]
//! part <channel>
//! switch <from> <to>
//! ```
//!
//! All three require the trusted tier; the dispatcher enforces that before
//! these handlers run.

use super::{Context, Handler};
use crate::error::HandlerResult;
use crate::invocation::Invocation;
use async_trait::async_trait;
use tracing::info;

pub struct JoinHandler;

#[async_trait]
impl Handler for JoinHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        let channel = &inv.args[0];
        let key = inv.args.get(1).map(String::as_str);
        ctx.bot.join(channel, key).await?;
        info!(channel = %channel, nick = %inv.sender.nick, "joined channel");
        Ok(())
    }
}

pub struct PartHandler;

#[async_trait]
impl Handler for PartHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        let channel = &inv.args[0];
        let reason = format!("Part command issued by {}", inv.sender.nick);
        ctx.bot.part(channel, &reason).await?;
        info!(channel = %channel, nick = %inv.sender.nick, "parted channel");
        Ok(())
    }
}

/// Part one channel and join another in a single command.
pub struct SwitchHandler;

#[async_trait]
impl Handler for SwitchHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        let from = &inv.args[0];
        let to = &inv.args[1];
        ctx.bot.part(from, &format!("Switching to {to}")).await?;
        ctx.bot.join(to, None).await?;
        info!(from = %from, to = %to, "switched channel");
        Ok(())
    }
}
