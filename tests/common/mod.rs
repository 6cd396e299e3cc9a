//! Integration test common infrastructure.
//!
//! Recording and scripted implementations of the collaborator traits, plus a
//! helper that wires up a dispatcher with the stock command table.

#![allow(dead_code)]

use async_trait::async_trait;
use botroute::handlers::standard_table;
use botroute::{
    BotApi, CachingResolver, Directory, Dispatcher, Registry, ReloadApi, RouterConfig,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// One outbound call made by a handler or the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotEvent {
    Notice { target: String, text: String },
    Privmsg { target: String, text: String },
    Join { channel: String, key: Option<String> },
    Part { channel: String, reason: String },
    Mode { target: String, modes: String },
    Reconnect,
    Quit { reason: String },
}

/// BotApi implementation that records every outbound call.
pub struct RecordingBot {
    nickname: String,
    events: Mutex<Vec<BotEvent>>,
}

impl RecordingBot {
    pub fn new() -> Self {
        Self {
            nickname: "routerbot".to_string(),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<BotEvent> {
        self.events.lock().clone()
    }

    pub fn notices(&self) -> Vec<BotEvent> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, BotEvent::Notice { .. }))
            .collect()
    }

    fn record(&self, event: BotEvent) {
        self.events.lock().push(event);
    }
}

impl Default for RecordingBot {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BotApi for RecordingBot {
    fn nickname(&self) -> &str {
        &self.nickname
    }

    fn version(&self) -> String {
        "0.3.0-test".to_string()
    }

    async fn notice(&self, target: &str, text: &str) -> anyhow::Result<()> {
        self.record(BotEvent::Notice {
            target: target.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn privmsg(&self, target: &str, text: &str) -> anyhow::Result<()> {
        self.record(BotEvent::Privmsg {
            target: target.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn join(&self, channel: &str, key: Option<&str>) -> anyhow::Result<()> {
        self.record(BotEvent::Join {
            channel: channel.to_string(),
            key: key.map(|k| k.to_string()),
        });
        Ok(())
    }

    async fn part(&self, channel: &str, reason: &str) -> anyhow::Result<()> {
        self.record(BotEvent::Part {
            channel: channel.to_string(),
            reason: reason.to_string(),
        });
        Ok(())
    }

    async fn mode(&self, target: &str, modes: &str) -> anyhow::Result<()> {
        self.record(BotEvent::Mode {
            target: target.to_string(),
            modes: modes.to_string(),
        });
        Ok(())
    }

    async fn reconnect(&self) -> anyhow::Result<()> {
        self.record(BotEvent::Reconnect);
        Ok(())
    }

    async fn quit(&self, reason: &str) -> anyhow::Result<()> {
        self.record(BotEvent::Quit {
            reason: reason.to_string(),
        });
        Ok(())
    }
}

/// Directory with fixed permission tables.
#[derive(Default)]
pub struct StaticDirectory {
    pub users: HashMap<String, u8>,
    pub channels: HashMap<String, u8>,
    pub memberships: HashMap<String, Vec<String>>,
}

impl StaticDirectory {
    pub fn with_user(mut self, nick: &str, level: u8) -> Self {
        self.users.insert(nick.to_lowercase(), level);
        self
    }

    pub fn with_channel(mut self, name: &str, level: u8) -> Self {
        self.channels.insert(name.to_lowercase(), level);
        self
    }

    pub fn with_membership(mut self, nick: &str, channels: &[&str]) -> Self {
        self.memberships.insert(
            nick.to_lowercase(),
            channels.iter().map(|c| c.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl Directory for StaticDirectory {
    async fn user_permission(&self, nick: &str) -> anyhow::Result<Option<u8>> {
        Ok(self.users.get(&nick.to_lowercase()).copied())
    }

    async fn channel_permission(&self, channel: &str) -> anyhow::Result<Option<u8>> {
        Ok(self.channels.get(&channel.to_lowercase()).copied())
    }

    async fn user_channels(&self, nick: &str) -> anyhow::Result<Option<Vec<String>>> {
        Ok(self.memberships.get(&nick.to_lowercase()).cloned())
    }
}

/// ReloadApi whose outcomes are scripted per test.
#[derive(Default)]
pub struct StubReload {
    pub fail_scripts: bool,
    pub config_needs_restart: bool,
}

#[async_trait]
impl ReloadApi for StubReload {
    async fn reload_scripts(&self) -> anyhow::Result<()> {
        if self.fail_scripts {
            anyhow::bail!("script engine refused to restart");
        }
        Ok(())
    }

    async fn reload_config(&self) -> anyhow::Result<bool> {
        Ok(self.config_needs_restart)
    }
}

/// Install a test subscriber once so `RUST_LOG` works during test runs.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Dispatcher with the stock table, `/` prefix, and the given collaborators.
pub fn router_with(directory: StaticDirectory, reload: StubReload) -> Dispatcher {
    init_tracing();
    let directory: Arc<dyn Directory> = Arc::new(directory);
    let reload: Arc<dyn ReloadApi> = Arc::new(reload);
    let registry = Arc::new(Registry::from_table(standard_table(
        reload,
        Arc::clone(&directory),
    )));
    let resolver = Arc::new(CachingResolver::new(directory));
    let config = RouterConfig {
        prefix: '/',
        ..RouterConfig::default()
    };
    Dispatcher::new(registry, resolver, config)
}

pub fn router() -> Dispatcher {
    router_with(StaticDirectory::default(), StubReload::default())
}
