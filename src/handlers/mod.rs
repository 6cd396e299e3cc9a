//! Command handlers and the handler trait.
//!
//! Each command is a small struct implementing [`Handler`]. Permission and
//! argument-count gates live in the dispatcher, not here: by the time a
//! handler runs, both have already passed. Handlers reach the outside world
//! only through the collaborator traits on [`Context`].

pub mod channel;
pub mod fun;
pub mod messaging;
pub mod mode;
pub mod oper;
pub mod query;

pub use channel::{JoinHandler, PartHandler, SwitchHandler};
pub use fun::EightBallHandler;
pub use messaging::SayHandler;
pub use mode::{ModeHandler, UmodeHandler};
pub use oper::{DebugInfoHandler, ManagerHandler, QuitHandler, ReconnectHandler, ReloadHandler};
pub use query::{CpermissionHandler, PermissionHandler, VersionHandler, WhoamiHandler};

use crate::bot::{BotApi, Directory, ReloadApi};
use crate::config::RouterConfig;
use crate::error::HandlerResult;
use crate::invocation::Invocation;
use crate::permission::{PermissionResolver, level};
use crate::registry::{Command, CommandTable, Registry};
use async_trait::async_trait;
use std::sync::Arc;

/// Context passed to each command handler.
pub struct Context<'a> {
    /// Outbound bot surface.
    pub bot: &'a dyn BotApi,
    /// Permission resolution (for commands that force a refresh).
    pub resolver: &'a dyn PermissionResolver,
    /// The live registry (for introspection commands).
    pub registry: &'a Registry,
    /// Router configuration.
    pub config: &'a RouterConfig,
    /// Sender permission level resolved for this dispatch.
    pub permission: u8,
}

/// A command action, invoked after permission and argument gates pass.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &Context<'_>, inv: &Invocation) -> HandlerResult;
}

/// Build the stock command table with the standard permission thresholds.
///
/// Thresholds are centralized here rather than scattered through handlers;
/// hosts wanting a different policy build their own table.
pub fn standard_table(
    reload: Arc<dyn ReloadApi>,
    directory: Arc<dyn Directory>,
) -> CommandTable {
    let mut table = CommandTable::new();
    let mut bind = |name: &str, min_permission: u8, min_args: usize, handler: Arc<dyn Handler>| {
        table
            .register(Command::new(name, min_permission, min_args, handler))
            .expect("stock command names are unique");
    };

    bind("version", level::NONE, 0, Arc::new(VersionHandler));
    bind("whoami", level::NONE, 0, Arc::new(WhoamiHandler));
    bind("permission", level::NONE, 0, Arc::new(PermissionHandler));
    bind("cpermission", level::NONE, 0, Arc::new(CpermissionHandler));
    bind("8ball", level::NONE, 0, Arc::new(EightBallHandler::new()));

    bind("say", level::VOICE, 1, Arc::new(SayHandler));

    bind("mode", level::OPERATOR, 1, Arc::new(ModeHandler));

    bind("join", level::TRUSTED, 1, Arc::new(JoinHandler));
    bind("part", level::TRUSTED, 1, Arc::new(PartHandler));
    bind("switch", level::TRUSTED, 2, Arc::new(SwitchHandler));
    bind("umode", level::TRUSTED, 1, Arc::new(UmodeHandler));

    bind("reload", level::ADMIN, 1, Arc::new(ReloadHandler::new(reload)));
    bind(
        "manager",
        level::ADMIN,
        3,
        Arc::new(ManagerHandler::new(directory)),
    );
    bind("debug-info", level::ADMIN, 0, Arc::new(DebugInfoHandler::new()));
    bind("reconnect", level::ADMIN, 0, Arc::new(ReconnectHandler));
    bind("quit", level::ADMIN, 0, Arc::new(QuitHandler));

    table
}
