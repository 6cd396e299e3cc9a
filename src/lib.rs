//! botroute — a permission-gated command router core for IRC bots.
//!
//! The crate owns the piece of a bot that turns an incoming chat line into an
//! action: parsing the command prefix, looking the command up in a registry,
//! gating on the sender's permission level and argument count, and invoking
//! the handler with failure containment. Everything around it — the IRC
//! connection, the user/channel directory, the module loader — stays on the
//! host side and is consumed through the traits in [`bot`].
//!
//! ## Flow
//!
//! ```text
//! raw line ──> Invocation::from_message ──> Dispatcher::dispatch
//!                                             │ Registry lookup
//!                                             │ PermissionResolver gate
//!                                             │ argument-count gate
//!                                             └─> Handler ──> BotApi calls
//! ```
//!
//! The host calls [`Dispatcher::on_message`] once per received line. Commands
//! are registered at startup (see [`handlers::standard_table`] for the stock
//! set) and the whole table can be hot-swapped atomically for reloads.

pub mod bot;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod invocation;
pub mod permission;
pub mod registry;
pub mod telemetry;

pub use bot::{BotApi, Directory, ReloadApi};
pub use config::RouterConfig;
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use error::{HandlerError, HandlerResult, RegistryError, ResolverError};
pub use handlers::{Context, Handler};
pub use invocation::{Invocation, Sender};
pub use permission::{CachingResolver, PermissionResolver, Subject};
pub use registry::{Command, CommandTable, Registry};
