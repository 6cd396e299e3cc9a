//! Permission levels and resolution.
//!
//! Levels are plain integers in `[0, 100]`; the named tiers in [`level`]
//! centralize the thresholds the stock command table uses. Resolution goes
//! through the [`PermissionResolver`] trait so hosts can plug in their own
//! caching policy; [`CachingResolver`] is the stock implementation backed by
//! a [`Directory`] with a per-subject cache.

use crate::bot::Directory;
use crate::error::ResolverError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Named permission tiers.
pub mod level {
    pub const OWNER: u8 = 100;
    pub const ADMIN: u8 = 90;
    pub const TRUSTED: u8 = 70;
    pub const OPERATOR: u8 = 50;
    pub const HALFOP: u8 = 30;
    pub const VOICE: u8 = 10;
    pub const NONE: u8 = 0;
}

/// Clamp a raw directory value into the valid level range.
#[inline]
pub fn clamp(raw: u8) -> u8 {
    raw.min(level::OWNER)
}

/// What a permission level is attached to. Keys are lowercased so lookups
/// are case-insensitive, matching IRC nick/channel semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    User(String),
    Channel(String),
}

impl Subject {
    pub fn user(nick: &str) -> Self {
        Self::User(nick.to_lowercase())
    }

    pub fn channel(name: &str) -> Self {
        Self::Channel(name.to_lowercase())
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(nick) => write!(f, "user {nick}"),
            Self::Channel(name) => write!(f, "channel {name}"),
        }
    }
}

/// Resolves the current permission level of a user or channel.
#[async_trait]
pub trait PermissionResolver: Send + Sync {
    /// Current known level. May serve a cached value.
    async fn permission(&self, subject: &Subject) -> Result<u8, ResolverError>;

    /// Re-fetch the level from the backing directory.
    async fn refresh(&self, subject: &Subject) -> Result<u8, ResolverError>;

    /// Prime the cache with a level the host already knows (e.g. the
    /// pre-fetched value passed alongside each incoming message).
    fn seed(&self, _subject: &Subject, _level: u8) {}
}

/// Bound a `permission` call with a deadline.
pub async fn permission_bounded(
    resolver: &dyn PermissionResolver,
    subject: &Subject,
    deadline: Duration,
) -> Result<u8, ResolverError> {
    tokio::time::timeout(deadline, resolver.permission(subject))
        .await
        .map_err(|_| ResolverError::Timeout)?
}

/// Bound a `refresh` call with a deadline.
pub async fn refresh_bounded(
    resolver: &dyn PermissionResolver,
    subject: &Subject,
    deadline: Duration,
) -> Result<u8, ResolverError> {
    tokio::time::timeout(deadline, resolver.refresh(subject))
        .await
        .map_err(|_| ResolverError::Timeout)?
}

/// Stock resolver: caches directory answers per subject.
///
/// Cached values may be stale until a `refresh` (the `permission` and
/// `cpermission` commands) or a `seed` from the next incoming message
/// overwrites them.
pub struct CachingResolver {
    directory: Arc<dyn Directory>,
    cache: DashMap<Subject, u8>,
}

impl CachingResolver {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self {
            directory,
            cache: DashMap::new(),
        }
    }

    /// Number of cached subjects.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl PermissionResolver for CachingResolver {
    async fn permission(&self, subject: &Subject) -> Result<u8, ResolverError> {
        if let Some(level) = self.cache.get(subject) {
            return Ok(*level);
        }
        self.refresh(subject).await
    }

    async fn refresh(&self, subject: &Subject) -> Result<u8, ResolverError> {
        let fetched = match subject {
            Subject::User(nick) => self.directory.user_permission(nick).await,
            Subject::Channel(name) => self.directory.channel_permission(name).await,
        };
        let level = fetched
            .map_err(ResolverError::Directory)?
            .ok_or_else(|| ResolverError::UnknownSubject(subject.to_string()))?;
        let level = clamp(level);
        debug!(subject = %subject, level, "refreshed permission");
        self.cache.insert(subject.clone(), level);
        Ok(level)
    }

    fn seed(&self, subject: &Subject, level: u8) {
        self.cache.insert(subject.clone(), clamp(level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Directory that counts lookups and can simulate latency.
    struct CountingDirectory {
        level: Option<u8>,
        delay: Duration,
        lookups: AtomicUsize,
    }

    impl CountingDirectory {
        fn with_level(level: u8) -> Self {
            Self {
                level: Some(level),
                delay: Duration::ZERO,
                lookups: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Directory for CountingDirectory {
        async fn user_permission(&self, _nick: &str) -> anyhow::Result<Option<u8>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(self.level)
        }

        async fn channel_permission(&self, _channel: &str) -> anyhow::Result<Option<u8>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(self.level)
        }

        async fn user_channels(&self, _nick: &str) -> anyhow::Result<Option<Vec<String>>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_seed_skips_directory() {
        let directory = Arc::new(CountingDirectory::with_level(70));
        let resolver = CachingResolver::new(directory.clone());

        resolver.seed(&Subject::user("Alice"), 50);
        let level = resolver.permission(&Subject::user("alice")).await.unwrap();
        assert_eq!(level, 50);
        assert_eq!(directory.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_refresh_overwrites_seed() {
        let directory = Arc::new(CountingDirectory::with_level(100));
        let resolver = CachingResolver::new(directory.clone());

        resolver.seed(&Subject::user("alice"), 0);
        let level = resolver.refresh(&Subject::user("alice")).await.unwrap();
        assert_eq!(level, 100);
        // Cache now serves the refreshed value
        let level = resolver.permission(&Subject::user("alice")).await.unwrap();
        assert_eq!(level, 100);
        assert_eq!(directory.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_subject() {
        let directory = Arc::new(CountingDirectory {
            level: None,
            delay: Duration::ZERO,
            lookups: AtomicUsize::new(0),
        });
        let resolver = CachingResolver::new(directory);

        let err = resolver
            .permission(&Subject::channel("#nowhere"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolverError::UnknownSubject(_)));
    }

    #[tokio::test]
    async fn test_levels_clamped_to_owner() {
        let directory = Arc::new(CountingDirectory::with_level(255));
        let resolver = CachingResolver::new(directory);

        let level = resolver.refresh(&Subject::user("alice")).await.unwrap();
        assert_eq!(level, level::OWNER);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_deadline() {
        let directory = Arc::new(CountingDirectory {
            level: Some(70),
            delay: Duration::from_secs(60),
            lookups: AtomicUsize::new(0),
        });
        let resolver = CachingResolver::new(directory);

        let err = refresh_bounded(
            &resolver,
            &Subject::user("alice"),
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ResolverError::Timeout));
    }

    #[test]
    fn test_subject_case_insensitive() {
        assert_eq!(Subject::user("Alice"), Subject::user("aLICE"));
        assert_eq!(Subject::channel("#Test"), Subject::channel("#test"));
    }
}
