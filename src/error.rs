//! Unified error handling for the command router.
//!
//! Typed error enums with automatic conversions and stable code strings for
//! log labeling. Handler error detail is logged at the dispatch boundary and
//! never echoed to the sender verbatim.

use thiserror::Error;

// ============================================================================
// Handler errors (command execution)
// ============================================================================

/// Errors that can occur while a command handler runs.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    /// The command only makes sense in a channel and was invoked without one.
    #[error("command requires a channel context")]
    NoChannel,

    #[error("permission lookup failed: {0}")]
    Resolver(#[from] ResolverError),

    #[error("reload failed: {0}")]
    Reload(#[source] anyhow::Error),

    /// An outbound bot call (notice, join, ...) failed.
    #[error("bot call failed: {0}")]
    Bot(#[from] anyhow::Error),
}

impl HandlerError {
    /// Stable code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::NoChannel => "no_channel",
            Self::Resolver(_) => "resolver",
            Self::Reload(_) => "reload_failed",
            Self::Bot(_) => "bot_call_failed",
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Resolver errors (directory lookups)
// ============================================================================

/// Permission resolution failures.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The directory did not answer within the configured deadline.
    #[error("directory lookup timed out")]
    Timeout,

    /// The directory has no entry for the subject.
    #[error("no directory entry for {0}")]
    UnknownSubject(String),

    #[error("directory error: {0}")]
    Directory(#[source] anyhow::Error),
}

impl ResolverError {
    /// Stable code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout => "resolver_timeout",
            Self::UnknownSubject(_) => "unknown_subject",
            Self::Directory(_) => "directory_error",
        }
    }
}

// ============================================================================
// Registry errors
// ============================================================================

/// Command registration failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A command with this name (case-insensitive) is already bound.
    #[error("duplicate command: {0}")]
    DuplicateCommand(String),
}
