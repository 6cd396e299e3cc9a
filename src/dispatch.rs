//! Command dispatch.
//!
//! The [`Dispatcher`] owns the gate sequence: registry lookup, permission
//! check, argument-count check, handler invocation. Handler failures are
//! caught here, logged with their cause, and reported to the sender as the
//! configured generic notice — cause detail is never echoed to untrusted
//! users, and nothing a handler does can take the host process down.
//!
//! Dispatch is `&self` and the dispatcher is `Send + Sync`, so the host may
//! run one dispatch per incoming message as its own task. Ordering between
//! senders is not assumed; per-sender ordering is whatever the host's intake
//! loop provides.

use crate::bot::BotApi;
use crate::config::RouterConfig;
use crate::handlers::Context;
use crate::invocation::{Invocation, Sender};
use crate::permission::{self, PermissionResolver, Subject};
use crate::registry::{Command, Registry};
use crate::telemetry::{CommandTimer, spans};
use std::sync::Arc;
use tracing::{Instrument, debug, error, warn};

/// Outcome of dispatching one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler ran to completion.
    Handled,
    /// No such command. Silently ignored, matching bot convention for
    /// unknown prefixes.
    UnknownCommand,
    /// Sender below the command's permission threshold. One notice sent.
    PermissionDenied,
    /// Fewer arguments than the command requires. One notice sent.
    NeedMoreParams,
    /// The handler (or permission resolution) failed; carries the stable
    /// error code that was logged.
    Failed(&'static str),
}

/// Routes parsed invocations through permission and argument gates to their
/// handlers.
pub struct Dispatcher {
    registry: Arc<Registry>,
    resolver: Arc<dyn PermissionResolver>,
    config: RouterConfig,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<Registry>,
        resolver: Arc<dyn PermissionResolver>,
        config: RouterConfig,
    ) -> Self {
        Self {
            registry,
            resolver,
            config,
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Entry point for the host IRC layer, called once per received line.
    ///
    /// `permission` is the host's pre-fetched level for the sender; it seeds
    /// the resolver cache and may be superseded by an explicit refresh.
    /// Returns `None` when the line is not a command invocation at all.
    #[allow(clippy::too_many_arguments)]
    pub async fn on_message(
        &self,
        raw: &str,
        channel: Option<&str>,
        nick: &str,
        ident: &str,
        hostmask: &str,
        permission: u8,
        bot: &dyn BotApi,
    ) -> Option<DispatchOutcome> {
        self.resolver.seed(&Subject::user(nick), permission);
        let sender = Sender::new(nick, ident, hostmask);
        let inv = Invocation::from_message(raw, self.config.prefix, sender, channel)?;
        Some(self.dispatch(&inv, bot).await)
    }

    /// Dispatch an already-parsed invocation.
    pub async fn dispatch(&self, inv: &Invocation, bot: &dyn BotApi) -> DispatchOutcome {
        let Some(command) = self.registry.lookup(&inv.name) else {
            debug!(command = %inv.name, "ignoring unknown command");
            return DispatchOutcome::UnknownCommand;
        };

        let span = spans::command(&inv.name, &inv.sender.nick, inv.channel.as_deref());
        self.run_gated(inv, bot, command).instrument(span).await
    }

    async fn run_gated(
        &self,
        inv: &Invocation,
        bot: &dyn BotApi,
        command: Arc<Command>,
    ) -> DispatchOutcome {
        let _timer = CommandTimer::new(inv.name.as_str());

        let subject = Subject::user(&inv.sender.nick);
        let sender_level = match permission::permission_bounded(
            self.resolver.as_ref(),
            &subject,
            self.config.resolver_timeout(),
        )
        .await
        {
            Ok(level) => level,
            Err(e) => {
                warn!(
                    command = %inv.name,
                    nick = %inv.sender.nick,
                    error = %e,
                    code = e.error_code(),
                    "permission resolution failed"
                );
                self.notify(bot, &inv.sender.nick, &self.config.notices.command_failed)
                    .await;
                return DispatchOutcome::Failed(e.error_code());
            }
        };

        if sender_level < command.min_permission {
            debug!(
                command = %inv.name,
                nick = %inv.sender.nick,
                sender_level,
                required = command.min_permission,
                "permission denied"
            );
            self.notify(bot, &inv.sender.nick, &self.config.notices.permission_denied)
                .await;
            return DispatchOutcome::PermissionDenied;
        }

        if inv.args.len() < command.min_args {
            self.notify(bot, &inv.sender.nick, &self.config.notices.need_more_params)
                .await;
            return DispatchOutcome::NeedMoreParams;
        }

        let ctx = Context {
            bot,
            resolver: self.resolver.as_ref(),
            registry: self.registry.as_ref(),
            config: &self.config,
            permission: sender_level,
        };

        match command.handler().handle(&ctx, inv).await {
            Ok(()) => DispatchOutcome::Handled,
            Err(e) => {
                error!(
                    command = %inv.name,
                    nick = %inv.sender.nick,
                    error = %e,
                    code = e.error_code(),
                    "command handler failed"
                );
                self.notify(bot, &inv.sender.nick, &self.config.notices.command_failed)
                    .await;
                DispatchOutcome::Failed(e.error_code())
            }
        }
    }

    /// Best-effort notice; a failed notice must not fail the dispatch.
    async fn notify(&self, bot: &dyn BotApi, nick: &str, text: &str) {
        if let Err(e) = bot.notice(nick, text).await {
            warn!(nick = %nick, error = %e, "failed to send notice");
        }
    }
}
