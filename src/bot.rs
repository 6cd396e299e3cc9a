//! Collaborator traits supplied by the host bot.
//!
//! The router never opens a socket or loads a module itself. All outward
//! effects go through [`BotApi`], reload requests through [`ReloadApi`], and
//! permission lookups through [`Directory`]. Hosts implement these against
//! their own connection and account machinery; tests implement them with
//! recording mocks.

use async_trait::async_trait;

/// Outbound IRC surface of the host bot.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// The bot's own current nickname.
    fn nickname(&self) -> &str;

    /// Human-readable version string of the host.
    fn version(&self) -> String;

    async fn notice(&self, target: &str, text: &str) -> anyhow::Result<()>;

    async fn privmsg(&self, target: &str, text: &str) -> anyhow::Result<()>;

    async fn join(&self, channel: &str, key: Option<&str>) -> anyhow::Result<()>;

    async fn part(&self, channel: &str, reason: &str) -> anyhow::Result<()>;

    async fn mode(&self, target: &str, modes: &str) -> anyhow::Result<()>;

    /// Drop and re-establish the server connection.
    async fn reconnect(&self) -> anyhow::Result<()>;

    /// Disconnect and shut the bot down.
    async fn quit(&self, reason: &str) -> anyhow::Result<()>;
}

/// Script and configuration reload surface of the host.
#[async_trait]
pub trait ReloadApi: Send + Sync {
    async fn reload_scripts(&self) -> anyhow::Result<()>;

    /// Reload configuration. Returns `true` when the host needs a restart
    /// for some of the new settings to take effect.
    async fn reload_config(&self) -> anyhow::Result<bool>;
}

/// Directory service resolving nick/channel identities to permission levels.
///
/// Lookups may hit a network-backed account store; callers bound them with a
/// timeout. `Ok(None)` means the directory has no entry for the identity.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn user_permission(&self, nick: &str) -> anyhow::Result<Option<u8>>;

    async fn channel_permission(&self, channel: &str) -> anyhow::Result<Option<u8>>;

    /// Channels the user is currently in, or `None` if the user is unknown.
    async fn user_channels(&self, nick: &str) -> anyhow::Result<Option<Vec<String>>>;
}
