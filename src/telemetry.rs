//! Telemetry utilities for command timing and tracing spans.

use std::time::Instant;

/// Guard for timing command execution.
///
/// Logs command latency at debug level when dropped.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(command = %self.command, elapsed_ms, "command dispatched");
    }
}

/// Standardized span constructors for dispatch observability.
pub mod spans {
    use tracing::{Span, debug_span};

    /// Span covering one command dispatch.
    pub fn command(name: &str, nick: &str, channel: Option<&str>) -> Span {
        if let Some(channel) = channel {
            debug_span!("bot.command", command = %name, nick = %nick, channel = %channel)
        } else {
            debug_span!("bot.command", command = %name, nick = %nick)
        }
    }
}
