//! Informational commands: version, whoami, permission queries.

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult, ResolverError};
use crate::invocation::Invocation;
use crate::permission::{self, Subject, level};
use async_trait::async_trait;

pub struct VersionHandler;

#[async_trait]
impl Handler for VersionHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        let text = format!("Version {}", ctx.bot.version());
        ctx.bot.notice(&inv.sender.nick, &text).await?;
        Ok(())
    }
}

pub struct WhoamiHandler;

#[async_trait]
impl Handler for WhoamiHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        let text = format!("You are: {}", inv.sender.nick);
        ctx.bot.notice(&inv.sender.nick, &text).await?;
        Ok(())
    }
}

/// Re-fetch and report the sender's own permission level.
pub struct PermissionHandler;

#[async_trait]
impl Handler for PermissionHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        let nick = &inv.sender.nick;
        let subject = Subject::user(nick);
        let refreshed = permission::refresh_bounded(
            ctx.resolver,
            &subject,
            ctx.config.resolver_timeout(),
        )
        .await;

        let current = match refreshed {
            Ok(current) => current,
            Err(ResolverError::UnknownSubject(_)) => {
                ctx.bot
                    .notice(nick, "The directory was unable to find you")
                    .await?;
                return Ok(());
            }
            Err(e) => return Err(HandlerError::Resolver(e)),
        };

        ctx.bot
            .notice(nick, &format!("Permission: {current}"))
            .await?;
        if current == level::OWNER {
            ctx.bot.notice(nick, "Owner level granted").await?;
        }
        Ok(())
    }
}

/// Re-fetch and report the current channel's permission level.
pub struct CpermissionHandler;

#[async_trait]
impl Handler for CpermissionHandler {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult {
        let channel = inv.channel.as_deref().ok_or(HandlerError::NoChannel)?;

        let subject = Subject::channel(channel);
        let refreshed = permission::refresh_bounded(
            ctx.resolver,
            &subject,
            ctx.config.resolver_timeout(),
        )
        .await;

        match refreshed {
            Ok(current) => {
                ctx.bot
                    .notice(&inv.sender.nick, &format!("Channel permission: {current}"))
                    .await?;
                Ok(())
            }
            // Unknown channel: nothing to report
            Err(ResolverError::UnknownSubject(_)) => Ok(()),
            Err(e) => Err(HandlerError::Resolver(e)),
        }
    }
}
