//! Administrative commands: reload, manager queries, debug info, reconnect,
//! quit.
//!
//! All of these sit behind the admin tier. Quit and reconnect are the only
//! deliberate ways a command may take the connection down; they are outbound
//! calls, never error propagation.

use super::{Context, Handler};
use crate::bot::{Directory, ReloadApi};
use crate::error::{HandlerError, HandlerResult, ResolverError};
use crate::invocation::Invocation;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Reload host scripts or configuration.
///
/// ## Syntax
/// ```text
/// reload <scripts|config>
/// ```
pub struct ReloadHandler {
    reload: Arc<dyn ReloadApi>,
}

impl ReloadHandler {
    pub fn new(reload: Arc<dyn ReloadApi>) -> Self {
        Self { reload }
    }
}

#[async_trait]
impl Handler for ReloadHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        let nick = &inv.sender.nick;
        match inv.args[0].as_str() {
            "scripts" => {
                self.reload
                    .reload_scripts()
                    .await
                    .map_err(HandlerError::Reload)?;
                info!(nick = %nick, "scripts reloaded");
                ctx.bot.notice(nick, "Scripts reloaded").await?;
            }
            "config" => {
                let needs_restart = self
                    .reload
                    .reload_config()
                    .await
                    .map_err(HandlerError::Reload)?;
                info!(nick = %nick, needs_restart, "config reloaded");
                let text = if needs_restart {
                    "Configuration reloaded; a restart is required for some changes"
                } else {
                    "Configuration reloaded"
                };
                ctx.bot.notice(nick, text).await?;
            }
            _ => {
                ctx.bot.notice(nick, "Usage: reload <scripts|config>").await?;
            }
        }
        Ok(())
    }
}

/// Directory queries against the user manager.
///
/// ## Syntax
/// ```text
/// manager getuser <nick> channels
/// ```
pub struct ManagerHandler {
    directory: Arc<dyn Directory>,
}

impl ManagerHandler {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Handler for ManagerHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        let nick = &inv.sender.nick;
        if inv.args[0] != "getuser" || inv.args[2] != "channels" {
            ctx.bot
                .notice(nick, "Usage: manager getuser <nick> channels")
                .await?;
            return Ok(());
        }

        let target = &inv.args[1];
        let channels = self
            .directory
            .user_channels(target)
            .await
            .map_err(|e| HandlerError::Resolver(ResolverError::Directory(e)))?;

        match channels {
            None => {
                ctx.bot.notice(nick, "User not found").await?;
            }
            Some(channels) if channels.is_empty() => {
                ctx.bot.notice(nick, "User is in no channels").await?;
            }
            Some(channels) => {
                ctx.bot.notice(nick, "Channels:").await?;
                for channel in channels {
                    ctx.bot.notice(nick, &channel).await?;
                }
            }
        }
        Ok(())
    }
}

/// Dump router runtime information to the sender.
pub struct DebugInfoHandler {
    started: Instant,
}

impl DebugInfoHandler {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for DebugInfoHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for DebugInfoHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        let nick = &inv.sender.nick;
        let uptime = self.started.elapsed().as_secs();
        ctx.bot
            .notice(nick, &format!("Router uptime: {uptime}s"))
            .await?;
        ctx.bot
            .notice(
                nick,
                &format!("Registered commands: {}", ctx.registry.len()),
            )
            .await?;
        Ok(())
    }
}

pub struct ReconnectHandler;

#[async_trait]
impl Handler for ReconnectHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        warn!(nick = %inv.sender.nick, "reconnect requested");
        ctx.bot.reconnect().await?;
        Ok(())
    }
}

pub struct QuitHandler;

#[async_trait]
impl Handler for QuitHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        let reason = format!("Shutdown initiated by {}", inv.sender.nick);
        warn!(nick = %inv.sender.nick, "shutdown requested");
        ctx.bot.quit(&reason).await?;
        Ok(())
    }
}
